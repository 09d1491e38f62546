//! Typed back-office endpoints

use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::api::{ApiClient, ApiResult, FailureKind, RequestOptions};
use crate::session::Session;

use super::model::{
    Admin, AdminUpdate, Asset, AssetUpdate, Counts, Credentials, NewAdmin, NewAsset,
    NewNotification, Notification, Page, PasswordChange, ProfileUpdate, Reward, RewardStatus,
    Transaction, TransactionStatus, User,
};
use super::query::ListQuery;

/// `POST /admin-auth/accept-invite` body; the bare token only validates
#[derive(Debug, Serialize)]
struct InviteDecision<'a> {
    token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

/// Back-office API
///
/// One method per endpoint. Operator actions (anything that mutates) raise a toast,
/// passive fetches stay silent.
#[derive(Clone)]
pub struct BackOffice {
    client: ApiClient,
}

impl BackOffice {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn fetch<T: DeserializeOwned>(&self, options: RequestOptions) -> ApiResult<T> {
        self.client.request(options).await
    }

    /// Mutation whose response payload is not used
    async fn perform(&self, options: RequestOptions) -> ApiResult<()> {
        self.client
            .request::<IgnoredAny>(options.toast())
            .await
            .map(|_| ())
    }

    // ============ Auth ============

    /// Log in and persist the issued session
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<()> {
        let options = RequestOptions::post("/admin-auth/login")
            .json(&Credentials {
                email: email.trim().to_string(),
                password: password.to_string(),
            })
            .success_message("Login successful")
            .toast();

        match self.client.request::<Session>(options).await {
            ApiResult::Success {
                message,
                data: Some(session),
                status,
            } if !session.access_token.is_empty() => match self.client.start_session(&session) {
                Ok(()) => ApiResult::Success {
                    message,
                    data: Some(()),
                    status,
                },
                Err(e) => {
                    tracing::error!("Failed to persist session: {:#}", e);
                    ApiResult::failure(
                        FailureKind::Storage,
                        format!("Could not save session: {}", e),
                        None,
                    )
                }
            },
            ApiResult::Success { status, .. } => ApiResult::failure(
                FailureKind::Decode,
                "Login response carried no access token",
                Some(status),
            ),
            ApiResult::Failure(failure) => ApiResult::Failure(failure),
        }
    }

    /// Log out; the local session is dropped even when the backend call fails
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self
            .client
            .request::<IgnoredAny>(
                RequestOptions::get("/admin-auth/logout").success_message("Logged out"),
            )
            .await
            .map(|_| ());
        self.client.end_session();
        result
    }

    /// Check an invitation token with the backend
    pub async fn validate_invite(&self, token: &str) -> ApiResult<()> {
        self.fetch::<IgnoredAny>(RequestOptions::post("/admin-auth/accept-invite").json(
            &InviteDecision {
                token,
                action: None,
                password: None,
            },
        ))
        .await
        .map(|_| ())
    }

    /// Accept an invitation, setting the new account's password
    pub async fn accept_invite(&self, token: &str, password: &str) -> ApiResult<()> {
        self.perform(
            RequestOptions::post("/admin-auth/accept-invite")
                .json(&InviteDecision {
                    token,
                    action: Some("accept"),
                    password: Some(password),
                })
                .success_message("Invitation accepted"),
        )
        .await
    }

    pub async fn reject_invite(&self, token: &str) -> ApiResult<()> {
        self.perform(
            RequestOptions::post("/admin-auth/accept-invite")
                .json(&InviteDecision {
                    token,
                    action: Some("reject"),
                    password: None,
                })
                .success_message("Invitation rejected"),
        )
        .await
    }

    // ============ Profile ============

    /// Logged-in admin
    pub async fn profile(&self) -> ApiResult<Admin> {
        self.fetch(RequestOptions::get("/admin")).await
    }

    pub async fn update_profile(&self, name: &str) -> ApiResult<()> {
        self.perform(
            RequestOptions::patch("/admin")
                .json(&ProfileUpdate {
                    name: name.trim().to_string(),
                })
                .success_message("Profile updated"),
        )
        .await
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> ApiResult<()> {
        self.perform(
            RequestOptions::patch("/admin/password")
                .json(&PasswordChange {
                    old_password: old_password.to_string(),
                    new_password: new_password.to_string(),
                })
                .success_message("Password changed"),
        )
        .await
    }

    // ============ Admin accounts ============

    pub async fn list_admins(&self) -> ApiResult<Vec<Admin>> {
        self.fetch(RequestOptions::get("/admin/all")).await
    }

    /// Invite a new admin; the backend emails the invitation
    pub async fn add_admin(&self, admin: &NewAdmin) -> ApiResult<()> {
        self.perform(
            RequestOptions::post("/admin")
                .json(admin)
                .success_message("Admin invited"),
        )
        .await
    }

    pub async fn update_admin(&self, id: &str, update: &AdminUpdate) -> ApiResult<()> {
        self.perform(
            RequestOptions::patch(format!("/admin/{}", urlencoding::encode(id)))
                .json(update)
                .success_message("Admin updated"),
        )
        .await
    }

    pub async fn remove_admin(&self, id: &str) -> ApiResult<()> {
        self.perform(
            RequestOptions::delete(format!("/admin/{}", urlencoding::encode(id)))
                .success_message("Admin removed"),
        )
        .await
    }

    // ============ Dashboard ============

    pub async fn counts(&self) -> ApiResult<Counts> {
        self.fetch(RequestOptions::get("/admin/counts")).await
    }

    // ============ Users ============

    pub async fn list_users(&self, query: &ListQuery) -> ApiResult<Page<User>> {
        self.fetch(RequestOptions::get("/admin/users").query(query.to_params()))
            .await
    }

    pub async fn user(&self, id: &str) -> ApiResult<User> {
        self.fetch(RequestOptions::get(format!(
            "/admin/users/{}",
            urlencoding::encode(id)
        )))
        .await
    }

    pub async fn delete_user(&self, id: &str) -> ApiResult<()> {
        self.perform(
            RequestOptions::delete(format!("/admin/users/{}", urlencoding::encode(id)))
                .success_message("User deleted"),
        )
        .await
    }

    /// Every transaction of one user, unpaged
    pub async fn user_transactions(&self, user_id: &str) -> ApiResult<Vec<Transaction>> {
        self.fetch(RequestOptions::get(format!(
            "/admin/transactions/user/{}",
            urlencoding::encode(user_id)
        )))
        .await
    }

    /// Every reward of one user, unpaged
    pub async fn user_rewards(&self, user_id: &str) -> ApiResult<Vec<Reward>> {
        self.fetch(RequestOptions::get(format!(
            "/admin/rewards/user/{}",
            urlencoding::encode(user_id)
        )))
        .await
    }

    // ============ Transactions ============

    pub async fn list_transactions(&self, query: &ListQuery) -> ApiResult<Page<Transaction>> {
        self.fetch(RequestOptions::get("/admin/transactions").query(query.to_params()))
            .await
    }

    pub async fn transaction(&self, id: &str) -> ApiResult<Transaction> {
        self.fetch(RequestOptions::get(format!(
            "/admin/transactions/{}",
            urlencoding::encode(id)
        )))
        .await
    }

    /// Approve (`successful`) or decline (`failed`) a transaction
    pub async fn set_transaction_status(
        &self,
        id: &str,
        status: TransactionStatus,
    ) -> ApiResult<()> {
        self.perform(
            RequestOptions::patch(format!(
                "/admin/transactions/{}/{}",
                urlencoding::encode(id),
                status
            ))
            .success_message(format!("Transaction marked {}", status)),
        )
        .await
    }

    // ============ Rewards ============

    pub async fn list_rewards(&self, query: &ListQuery) -> ApiResult<Page<Reward>> {
        self.fetch(RequestOptions::get("/admin/rewards").query(query.to_params()))
            .await
    }

    pub async fn reward(&self, id: &str) -> ApiResult<Reward> {
        self.fetch(RequestOptions::get(format!(
            "/admin/rewards/{}",
            urlencoding::encode(id)
        )))
        .await
    }

    pub async fn set_reward_status(&self, id: &str, status: RewardStatus) -> ApiResult<()> {
        self.perform(
            RequestOptions::patch(format!(
                "/admin/rewards/{}/{}",
                urlencoding::encode(id),
                status
            ))
            .success_message(format!("Reward marked {}", status)),
        )
        .await
    }

    // ============ Notifications ============

    pub async fn list_notifications(&self, page: u32, limit: u32) -> ApiResult<Page<Notification>> {
        self.fetch(
            RequestOptions::get("/admin/notifications")
                .query([("limit", limit.to_string()), ("page", page.to_string())]),
        )
        .await
    }

    pub async fn send_notification(&self, notification: &NewNotification) -> ApiResult<()> {
        self.perform(
            RequestOptions::post("/admin/notifications")
                .json(notification)
                .success_message("Notification sent"),
        )
        .await
    }

    // ============ Assets ============

    pub async fn list_assets(&self) -> ApiResult<Vec<Asset>> {
        self.fetch(RequestOptions::get("/assets")).await
    }

    pub async fn add_asset(&self, asset: &NewAsset) -> ApiResult<()> {
        self.perform(
            RequestOptions::post("/assets")
                .json(asset)
                .success_message("Asset added"),
        )
        .await
    }

    pub async fn update_asset(&self, id: &str, update: &AssetUpdate) -> ApiResult<()> {
        self.perform(
            RequestOptions::patch(format!("/assets/{}", urlencoding::encode(id)))
                .json(update)
                .success_message("Asset updated"),
        )
        .await
    }

    pub async fn remove_asset(&self, id: &str) -> ApiResult<()> {
        self.perform(
            RequestOptions::delete(format!("/assets/{}", urlencoding::encode(id)))
                .success_message("Asset removed"),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Notifier, Toast, ToastVariant};
    use crate::backoffice::model::Role;
    use crate::session::{MemorySessionStore, SessionEvent, SessionStore};
    use crate::backoffice::query::SortOrder;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Default)]
    struct RecordingNotifier {
        toasts: parking_lot::Mutex<Vec<Toast>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, toast: &Toast) {
            self.toasts.lock().push(toast.clone());
        }
    }

    fn backoffice(
        server: &MockServer,
        session: Option<Session>,
    ) -> (BackOffice, Arc<MemorySessionStore>, Arc<RecordingNotifier>) {
        let store = Arc::new(MemorySessionStore::new(session));
        let notifier = Arc::new(RecordingNotifier::default());
        let client = ApiClient::with_http_client(
            reqwest::Client::new(),
            server.uri(),
            Duration::from_secs(5),
            store.clone(),
            notifier.clone(),
        );
        (BackOffice::new(client), store, notifier)
    }

    fn ok(data: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "OK",
            "data": data
        }))
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin-auth/login"))
            .and(body_json(serde_json::json!({ "email": "ops@mbx.io", "password": "pw" })))
            .respond_with(ok(serde_json::json!({ "accessToken": "a1", "refreshToken": "r1" })))
            .expect(1)
            .mount(&server)
            .await;

        let (office, store, notifier) = backoffice(&server, None);
        let mut events = office.client().subscribe();

        let result = office.login(" ops@mbx.io ", "pw").await;
        assert!(result.is_success());
        assert_eq!(store.load(), Some(Session::new("a1", "r1")));
        assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedIn);
        assert!(notifier.toasts.lock().is_empty());
    }

    #[tokio::test]
    async fn test_login_failure_keeps_store_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin-auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "success": false,
                "message": "Invalid credentials"
            })))
            .mount(&server)
            .await;

        let (office, store, notifier) = backoffice(&server, None);
        let result = office.login("ops@mbx.io", "bad").await;

        assert_eq!(result.message(), "Invalid credentials");
        assert!(store.load().is_none());
        assert_eq!(
            notifier.toasts.lock()[0].variant,
            ToastVariant::Destructive
        );
    }

    #[tokio::test]
    async fn test_login_without_tokens_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin-auth/login"))
            .respond_with(ok(serde_json::Value::Null))
            .mount(&server)
            .await;

        let (office, store, _) = backoffice(&server, None);
        let result = office.login("ops@mbx.io", "pw").await;

        assert_eq!(result.failure_ref().unwrap().kind, FailureKind::Decode);
        assert!(store.load().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin-auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let (office, store, _) = backoffice(&server, Some(Session::new("a", "r")));
        let mut events = office.client().subscribe();

        let result = office.logout().await;
        assert!(!result.is_success());
        assert!(store.load().is_none());
        assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedOut);
    }

    #[tokio::test]
    async fn test_list_users_sends_query_and_decodes_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .and(header("authorization", "Bearer a"))
            .and(query_param("limit", "5"))
            .and(query_param("page", "2"))
            .and(query_param("search", "chidi"))
            .and(query_param("sort", "asc"))
            .and(query_param("status", "active"))
            .respond_with(ok(serde_json::json!({
                "data": [{ "_id": "u1", "email": "chidi@mbx.io", "firstName": "Chidi" }],
                "pagination": { "total": 6, "page": 2, "limit": 5, "totalPages": 2 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (office, _, _) = backoffice(&server, Some(Session::new("a", "r")));
        let query = ListQuery::new(2, 5)
            .search("chidi")
            .sort(SortOrder::Asc)
            .status("active");
        let page = office.list_users(&query).await.into_data().unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].full_name(), "Chidi");
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[tokio::test]
    async fn test_status_change_hits_status_path_and_toasts() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/admin/transactions/t1/successful"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": { "_id": "t1", "status": "successful" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (office, _, notifier) = backoffice(&server, Some(Session::new("a", "r")));
        let result = office
            .set_transaction_status("t1", TransactionStatus::Successful)
            .await;

        assert!(result.is_success());
        assert_eq!(
            notifier.toasts.lock().clone(),
            vec![Toast::success("Transaction marked successful")]
        );
    }

    #[tokio::test]
    async fn test_path_ids_are_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/admin/a%2Fb"))
            .respond_with(ok(serde_json::Value::Null))
            .expect(1)
            .mount(&server)
            .await;

        let (office, _, _) = backoffice(&server, Some(Session::new("a", "r")));
        assert!(office.remove_admin("a/b").await.is_success());
    }

    #[tokio::test]
    async fn test_invite_actions_send_decision() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin-auth/accept-invite"))
            .and(body_json(serde_json::json!({ "token": "jwt" })))
            .respond_with(ok(serde_json::Value::Null))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/admin-auth/accept-invite"))
            .and(body_json(serde_json::json!({
                "token": "jwt",
                "action": "accept",
                "password": "s3cret"
            })))
            .respond_with(ok(serde_json::Value::Null))
            .expect(1)
            .mount(&server)
            .await;

        // No session needed on the auth surface
        let (office, _, _) = backoffice(&server, None);
        assert!(office.validate_invite("jwt").await.is_success());
        assert!(office.accept_invite("jwt", "s3cret").await.is_success());
    }

    #[tokio::test]
    async fn test_add_admin_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin"))
            .and(body_json(serde_json::json!({
                "name": "Ngozi",
                "email": "ngozi@mbx.io",
                "role": "editor"
            })))
            .respond_with(ok(serde_json::json!({ "_id": "ad9" })))
            .expect(1)
            .mount(&server)
            .await;

        let (office, _, _) = backoffice(&server, Some(Session::new("a", "r")));
        let result = office
            .add_admin(&NewAdmin {
                name: "Ngozi".into(),
                email: "ngozi@mbx.io".into(),
                role: Role::Editor,
            })
            .await;
        assert!(result.is_success());
    }
}
