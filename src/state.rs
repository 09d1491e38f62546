//! Process-wide application state
//!
//! Holds the logged-in admin and the dashboard counts once fetched. Each value is a single
//! slot overwritten by every successful fetch; a failed fetch leaves the previous value in
//! place. Nothing expires on its own.

use parking_lot::RwLock;

use crate::api::ApiResult;
use crate::backoffice::BackOffice;
use crate::backoffice::model::{Admin, Counts};

pub struct AppState {
    office: BackOffice,
    admin: RwLock<Option<Admin>>,
    counts: RwLock<Option<Counts>>,
}

impl AppState {
    /// Empty state; nothing is fetched until asked for
    pub fn new(office: BackOffice) -> Self {
        Self {
            office,
            admin: RwLock::new(None),
            counts: RwLock::new(None),
        }
    }

    pub fn backoffice(&self) -> &BackOffice {
        &self.office
    }

    pub fn admin(&self) -> Option<Admin> {
        self.admin.read().clone()
    }

    pub fn counts(&self) -> Option<Counts> {
        self.counts.read().clone()
    }

    pub fn set_admin(&self, admin: Admin) {
        *self.admin.write() = Some(admin);
    }

    /// Fetch the logged-in admin into the cache
    pub async fn load_admin(&self) -> ApiResult<Admin> {
        let result = self.office.profile().await;
        if let Some(admin) = result.data() {
            *self.admin.write() = Some(admin.clone());
        }
        result
    }

    /// Fetch the dashboard counts into the cache
    pub async fn refresh_counts(&self) -> ApiResult<Counts> {
        let result = self.office.counts().await;
        match result.data() {
            Some(counts) => *self.counts.write() = Some(counts.clone()),
            None => tracing::debug!("Counts refresh failed, keeping previous values"),
        }
        result
    }

    /// Admin and counts together, as the main layout needs them
    pub async fn load(&self) -> (ApiResult<Admin>, ApiResult<Counts>) {
        tokio::join!(self.load_admin(), self.refresh_counts())
    }

    /// Log out and discard everything cached
    pub async fn teardown(self) -> ApiResult<()> {
        let result = self.office.logout().await;
        tracing::info!("Application state torn down");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, TracingNotifier};
    use crate::session::{MemorySessionStore, Session, SessionStore};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn state(server: &MockServer, store: Arc<MemorySessionStore>) -> AppState {
        let client = ApiClient::with_http_client(
            reqwest::Client::new(),
            server.uri(),
            Duration::from_secs(5),
            store,
            Arc::new(TracingNotifier),
        );
        AppState::new(BackOffice::new(client))
    }

    fn counts_body(users: u64) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "users": { "all": users } }
        }))
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let server = MockServer::start().await;
        let state = state(&server, Arc::new(MemorySessionStore::default()));
        assert!(state.admin().is_none());
        assert!(state.counts().is_none());
    }

    #[tokio::test]
    async fn test_successful_fetch_overwrites_slot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/counts"))
            .respond_with(counts_body(10))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/counts"))
            .respond_with(counts_body(11))
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new(Some(Session::new("a", "r"))));
        let state = state(&server, store);

        state.refresh_counts().await;
        assert_eq!(state.counts().unwrap().users.all, 10);
        state.refresh_counts().await;
        assert_eq!(state.counts().unwrap().users.all, 11);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_value() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/counts"))
            .respond_with(counts_body(7))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/counts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new(Some(Session::new("a", "r"))));
        let state = state(&server, store);

        assert!(state.refresh_counts().await.is_success());
        assert!(!state.refresh_counts().await.is_success());
        assert_eq!(state.counts().unwrap().users.all, 7);
    }

    #[tokio::test]
    async fn test_load_fills_admin_and_counts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": { "_id": "ad1", "email": "ada@mbx.io", "name": "Ada", "role": "admin" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/counts"))
            .respond_with(counts_body(3))
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new(Some(Session::new("a", "r"))));
        let state = state(&server, store);
        let (admin, counts) = state.load().await;

        assert!(admin.is_success() && counts.is_success());
        assert_eq!(state.admin().unwrap().name, "Ada");
        assert_eq!(state.counts().unwrap().users.all, 3);
    }

    #[tokio::test]
    async fn test_teardown_drops_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin-auth/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true
            })))
            .mount(&server)
            .await;

        let store = Arc::new(MemorySessionStore::new(Some(Session::new("a", "r"))));
        let state = state(&server, store.clone());
        assert!(state.teardown().await.is_success());
        assert!(store.load().is_none());
    }
}
