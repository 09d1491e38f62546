//! Session-aware back-office API client
//!
//! # Features
//! - Bearer token injection from the persisted session
//! - Single-flight refresh-token renewal on 403, shared by every concurrent caller
//! - One retry per request after a successful refresh
//! - Uniform [`ApiResult`] for every outcome, including transport failures
//! - Toast reporting for operator-triggered actions
//!
//! # Usage
//! ```ignore
//! let client = ApiClient::new(&config, store, notifier)?;
//! let admins: ApiResult<Vec<Admin>> = client.request(RequestOptions::get("/admin/all")).await;
//! ```

mod client;
mod notify;
mod refresh;
mod request;
mod result;

pub use client::ApiClient;
pub use notify::{ConsoleNotifier, Notifier, Toast, ToastVariant, TracingNotifier};
pub use request::RequestOptions;
pub use result::{ApiFailure, ApiResult, FailureKind};
