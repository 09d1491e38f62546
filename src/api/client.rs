//! Session-aware request client
//!
//! Wraps every back-office call with bearer auth. A 403 on the first attempt joins (or
//! starts) the single in-flight refresh; the request is then retried exactly once with
//! the renewed token. When no token can be obtained the persisted session is discarded
//! and [`SessionEvent::LoginRequired`] is broadcast.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use http::StatusCode;
use parking_lot::Mutex;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;

use crate::http_client::build_client;
use crate::model::config::Config;
use crate::session::{Session, SessionEvent, SessionStore};

use super::notify::{Notifier, Toast};
use super::refresh::exchange_refresh_token;
use super::request::RequestOptions;
use super::result::{
    ApiResult, DEFAULT_FAILURE_MESSAGE, DEFAULT_SUCCESS_MESSAGE, Envelope, FailureKind,
    MISSING_TOKEN_MESSAGE, SESSION_EXPIRED_MESSAGE, pick_message, status_error_text,
};

/// Capacity of the session event channel
const SESSION_EVENT_CAPACITY: usize = 16;

/// Refresh outcome shared by every caller waiting on it; `None` means no new token
type SharedRefresh = Shared<BoxFuture<'static, Option<String>>>;

/// Back-office API client
///
/// Cheap to clone; clones share the session store and the refresh slot, so the
/// single-flight guarantee holds across all of them.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: Client,
    base_url: String,
    refresh_timeout: Duration,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    events: broadcast::Sender<SessionEvent>,
    /// Refresh currently in flight, cleared once it settles
    inflight_refresh: Mutex<Option<SharedRefresh>>,
}

/// Raw result of one HTTP attempt
enum Exchange {
    Response { status: StatusCode, body: String },
    Transport(reqwest::Error),
}

impl Exchange {
    fn is_forbidden(&self) -> bool {
        matches!(self, Exchange::Response { status, .. } if *status == StatusCode::FORBIDDEN)
    }
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(
        config: &Config,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> anyhow::Result<Self> {
        let http = build_client(
            config.proxy().as_ref(),
            config.request_timeout(),
            config.tls_backend,
        )?;
        Ok(Self::with_http_client(
            http,
            config.base_url.clone(),
            config.refresh_timeout(),
            store,
            notifier,
        ))
    }

    /// Create a client around an existing reqwest client
    pub fn with_http_client(
        http: Client,
        base_url: impl Into<String>,
        refresh_timeout: Duration,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: base_url.into(),
                refresh_timeout,
                store,
                notifier,
                events,
                inflight_refresh: Mutex::new(None),
            }),
        }
    }

    /// Receive session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Currently persisted session
    pub fn session(&self) -> Option<Session> {
        self.inner.store.load()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session()
            .map(|s| !s.access_token.is_empty())
            .unwrap_or(false)
    }

    /// Persist a freshly issued session
    pub fn start_session(&self, session: &Session) -> anyhow::Result<()> {
        self.inner.store.save(session)?;
        tracing::info!(session = %session.fingerprint(), "Admin session established");
        self.inner.emit(SessionEvent::LoggedIn);
        Ok(())
    }

    /// Drop the persisted session; returns whether one existed
    pub fn end_session(&self) -> bool {
        let removed = self.inner.store.clear();
        tracing::info!("Admin session closed");
        self.inner.emit(SessionEvent::LoggedOut);
        removed
    }

    /// Perform a back-office call
    ///
    /// Never fails past this boundary: every outcome, including a missing session,
    /// transport errors and undecodable bodies, is folded into [`ApiResult`].
    pub async fn request<T: DeserializeOwned>(&self, options: RequestOptions) -> ApiResult<T> {
        tracing::debug!(method = %options.method, url = %options.url, "API request");
        let result = self.execute(&options).await;
        self.report(&options, &result);
        result
    }

    async fn execute<T: DeserializeOwned>(&self, options: &RequestOptions) -> ApiResult<T> {
        let token = if options.requires_auth() {
            match self.inner.store.load() {
                Some(session) if !session.access_token.is_empty() => Some(session.access_token),
                _ => {
                    return ApiResult::failure(
                        FailureKind::Unauthenticated,
                        MISSING_TOKEN_MESSAGE,
                        Some(StatusCode::UNAUTHORIZED.as_u16()),
                    );
                }
            }
        } else {
            None
        };

        let exchange = self.send(options, token.as_deref()).await;

        // Only authenticated first attempts are eligible for refresh-and-retry
        let rejected_token = match token {
            Some(token) if exchange.is_forbidden() => token,
            _ => return self.normalize(exchange, options),
        };

        let Some(renewed) = self.renewed_token(&rejected_token).await else {
            self.expire_session();
            return ApiResult::failure(
                FailureKind::SessionExpired,
                SESSION_EXPIRED_MESSAGE,
                Some(StatusCode::FORBIDDEN.as_u16()),
            );
        };

        tracing::debug!(url = %options.url, "Retrying request with renewed token");
        let retried = self.send(options, Some(&renewed)).await;
        if !retried.is_forbidden() {
            return self.normalize(retried, options);
        }

        // Renewed token refused as well: no second refresh
        self.expire_session();
        match self.normalize(retried, options) {
            ApiResult::Failure(mut failure) => {
                failure.kind = FailureKind::SessionExpired;
                ApiResult::Failure(failure)
            }
            other => other,
        }
    }

    /// Token to retry with after `rejected` drew a 403
    async fn renewed_token(&self, rejected: &str) -> Option<String> {
        // Another request may already have renewed the session
        if let Some(current) = self.inner.store.load() {
            if !current.access_token.is_empty() && current.access_token != rejected {
                tracing::debug!("Token already renewed by another request, skipping refresh");
                return Some(current.access_token);
            }
        }

        self.refresh_access_token().await
    }

    /// Join the in-flight refresh or start one
    async fn refresh_access_token(&self) -> Option<String> {
        let refresh = {
            let mut slot = self.inner.inflight_refresh.lock();
            match slot.as_ref() {
                Some(inflight) => {
                    tracing::debug!("Joining in-flight token refresh");
                    inflight.clone()
                }
                None => {
                    let inner = Arc::clone(&self.inner);
                    let refresh = async move {
                        let token = inner.run_refresh().await;
                        inner.inflight_refresh.lock().take();
                        token
                    }
                    .boxed()
                    .shared();
                    *slot = Some(refresh.clone());
                    refresh
                }
            }
        };

        refresh.await
    }

    fn expire_session(&self) {
        // Clearing is idempotent; only the caller that actually removed the session signals
        if self.inner.store.clear() {
            tracing::warn!("Session could not be renewed, login required");
            self.inner.emit(SessionEvent::LoginRequired);
        }
    }

    async fn send(&self, options: &RequestOptions, token: Option<&str>) -> Exchange {
        let base = options.base_url.as_deref().unwrap_or(&self.inner.base_url);
        let url = join_url(base, &options.url);

        let mut builder = self.inner.http.request(options.method.clone(), &url);
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        match builder.send().await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) => Exchange::Response { status, body },
                    Err(e) => Exchange::Transport(e),
                }
            }
            Err(e) => Exchange::Transport(e),
        }
    }

    fn normalize<T: DeserializeOwned>(
        &self,
        exchange: Exchange,
        options: &RequestOptions,
    ) -> ApiResult<T> {
        let error_message = options.error_message.as_deref();

        let (status, body) = match exchange {
            Exchange::Response { status, body } => (status, body),
            Exchange::Transport(e) => {
                let text = e.to_string();
                return ApiResult::failure(
                    FailureKind::Transport,
                    pick_message([Some(text.as_str()), error_message], DEFAULT_FAILURE_MESSAGE),
                    e.status().map(|s| s.as_u16()),
                );
            }
        };

        let envelope = serde_json::from_str::<Envelope>(&body);

        if !status.is_success() {
            let server_message = envelope.as_ref().ok().and_then(|e| e.message());
            let status_text = status_error_text(status);
            return ApiResult::failure(
                FailureKind::Http,
                pick_message(
                    [server_message, Some(status_text.as_str()), error_message],
                    DEFAULT_FAILURE_MESSAGE,
                ),
                Some(status.as_u16()),
            );
        }

        let envelope = match envelope {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(url = %options.url, "Undecodable response envelope: {}", e);
                return ApiResult::failure(
                    FailureKind::Decode,
                    pick_message([error_message], DEFAULT_FAILURE_MESSAGE),
                    Some(status.as_u16()),
                );
            }
        };

        if !envelope.success {
            return ApiResult::failure(
                FailureKind::Rejected,
                pick_message([envelope.message(), error_message], DEFAULT_FAILURE_MESSAGE),
                Some(status.as_u16()),
            );
        }

        let message = pick_message(
            [envelope.message(), options.success_message.as_deref()],
            DEFAULT_SUCCESS_MESSAGE,
        );

        let data = match envelope.data {
            None => None,
            Some(value) => match serde_json::from_value::<T>(value) {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!(url = %options.url, "Unexpected response payload: {}", e);
                    return ApiResult::failure(
                        FailureKind::Decode,
                        pick_message([error_message], "Unexpected response from server"),
                        Some(status.as_u16()),
                    );
                }
            },
        };

        ApiResult::Success {
            message,
            data,
            status: status.as_u16(),
        }
    }

    fn report<T>(&self, options: &RequestOptions, result: &ApiResult<T>) {
        match result {
            ApiResult::Success { message, .. } => {
                tracing::debug!(url = %options.url, "API request succeeded: {}", message);
                if options.show_toast && !options.is_login() {
                    self.inner.notifier.notify(&Toast::success(message));
                }
            }
            ApiResult::Failure(failure) => {
                tracing::warn!(
                    url = %options.url,
                    status = ?failure.status,
                    kind = %failure.kind,
                    "API request failed: {}",
                    failure.message
                );
                if options.show_toast {
                    self.inner.notifier.notify(&Toast::destructive(&failure.message));
                }
            }
        }
    }
}

impl ClientInner {
    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// The actual `/refresh` round trip; never errors, `None` means no new token
    async fn run_refresh(&self) -> Option<String> {
        let session = match self.store.load() {
            Some(session) if !session.refresh_token.is_empty() => session,
            _ => {
                tracing::info!("No refresh token persisted, cannot renew session");
                return None;
            }
        };

        tracing::info!(session = %session.fingerprint(), "Refreshing access token...");
        let exchange = exchange_refresh_token(&self.http, &self.base_url, &session.refresh_token);

        match tokio::time::timeout(self.refresh_timeout, exchange).await {
            Ok(Ok(access_token)) => {
                if let Err(e) = self.store.save(&session.with_access_token(&access_token)) {
                    tracing::warn!("Failed to persist renewed session (token still used): {}", e);
                }
                self.emit(SessionEvent::Refreshed);
                Some(access_token)
            }
            Ok(Err(e)) => {
                tracing::warn!("Token refresh failed: {}", e);
                None
            }
            Err(_) => {
                tracing::warn!("Token refresh timed out after {:?}", self.refresh_timeout);
                None
            }
        }
    }
}

/// Resolve `path` against `base`; absolute URLs pass through
fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
