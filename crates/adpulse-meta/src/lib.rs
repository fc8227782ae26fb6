//! Typed client for the Meta Marketing API (Graph API) insights endpoint.
//!
//! Wraps `reqwest` with Graph-specific error handling, retry with back-off,
//! and typed response deserialization. Credentials are explicit constructor
//! input; there is no process-global SDK state.

mod client;
mod error;
mod retry;
mod types;

pub use client::{MetaClient, MetaClientConfig};
pub use error::MetaError;
pub use types::{ActionStat, InsightsRecord};
