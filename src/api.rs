//! Typed calls for every backend resource, built on [`Gateway::send`].
//!
//! Each submodule adds inherent methods to [`Gateway`](crate::gateway::Gateway) plus the serde
//! models for its payloads. Field names follow the backend's camelCase JSON; unknown fields are
//! ignored. Statuses, priorities, and dates are carried as the backend's strings.
//!
//! [`Gateway::send`]: crate::gateway::Gateway::send

pub mod auth;
pub mod dropdowns;
pub mod files;
pub mod leaves;
pub mod tasks;
pub mod users;

pub use auth::*;
pub use dropdowns::*;
pub use files::*;
pub use leaves::*;
pub use tasks::*;
pub use users::*;

/// Numeric identifier used by every backend resource.
pub type RecordId = u64;
