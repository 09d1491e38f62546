//! Request description handed to [`ApiClient::request`](super::ApiClient::request)

use http::Method;
use serde::Serialize;

/// Paths under this prefix belong to the login/auth surface and go out without a token
const AUTH_SURFACE: &str = "admin-auth";

/// One back-office API call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Path relative to the base URL, e.g. `/admin/users`
    pub url: String,
    pub method: Method,
    /// JSON body
    pub body: Option<serde_json::Value>,
    /// Query string parameters
    pub query: Vec<(String, String)>,
    /// `None` derives the flag from the path
    pub requires_auth: Option<bool>,
    pub headers: Vec<(String, String)>,
    /// Overrides the client's base URL for this call
    pub base_url: Option<String>,
    /// Fallback message when the server sends none on success
    pub success_message: Option<String>,
    /// Fallback message when the server sends none on failure
    pub error_message: Option<String>,
    /// Emit a toast with the outcome
    pub show_toast: bool,
}

impl RequestOptions {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            body: None,
            query: Vec::new(),
            requires_auth: None,
            headers: Vec::new(),
            base_url: None,
            success_message: None,
            error_message: None,
            show_toast: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(e) => tracing::warn!("Dropping unserializable body for {}: {}", self.url, e),
        }
        self
    }

    pub fn query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = Some(requires_auth);
        self
    }

    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Report the outcome to the operator
    pub fn toast(mut self) -> Self {
        self.show_toast = true;
        self
    }

    /// Explicit flag, otherwise true unless the path is on the auth surface
    pub fn requires_auth(&self) -> bool {
        self.requires_auth
            .unwrap_or_else(|| !self.url.contains(AUTH_SURFACE))
    }

    /// Login responses are announced by the caller, not by a toast
    pub(crate) fn is_login(&self) -> bool {
        self.url.contains("login")
    }
}
