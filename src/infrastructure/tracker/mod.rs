//! Tracker adapter: Azure Boards work item and board APIs.

pub mod client;
pub mod error;
pub mod types;

pub use client::AzureBoardsClient;
