//! mbx-admin
//!
//! Back-office console for the MBX exchange: a session-aware client for the admin REST API,
//! typed endpoint wrappers, an application-state cache and the terminal views built on them.

pub mod api;
pub mod backoffice;
pub mod export;
pub mod format;
pub mod http_client;
pub mod invite;
pub mod model;
pub mod session;
pub mod state;
pub mod views;

#[cfg(test)]
mod test_support;
