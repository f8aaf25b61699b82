//! GitHub adapter: issue metadata resolution over GraphQL.

pub mod client;
pub mod types;

pub use client::GithubGraphqlClient;
