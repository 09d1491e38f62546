//! Back-office endpoints and domain models

pub mod model;
mod query;
mod service;

pub use query::{DEFAULT_LIMIT, ListQuery, SortOrder};
pub use service::BackOffice;
