//! Client-side core for the cash-flow tracker.
//!
//! Two independent leaf pieces do the actual work: [`balance`] folds dated
//! transactions into running daily balances, and [`pagination`] normalizes
//! the backend's assorted paginated envelope shapes into one fixed result
//! type. Around them sit an [`ApiClient`] for the HTTP API, a caller-owned
//! [`MockTransactionStore`] that simulates the backend in-memory, and the
//! environment-driven [`ClientConfig`] that switches between the two.

pub mod api;
pub mod balance;
pub mod config;
pub mod error;
pub mod pagination;
pub mod store;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use pagination::{normalize, ResponseShape};
pub use store::MockTransactionStore;
