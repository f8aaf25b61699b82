//! Webhook delivery layer: HTTP listener and event dispatch.

pub mod dispatch;
pub mod server;

pub use dispatch::{dispatch, DispatchError, DispatchOutcome};
pub use server::{router, serve};
