//! Shared fixtures for view and state tests

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use wiremock::MockServer;

use crate::api::{ApiClient, Notifier, Toast};
use crate::backoffice::BackOffice;
use crate::session::{MemorySessionStore, Session};
use crate::state::AppState;

/// Keeps every toast for inspection
#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: &Toast) {
        self.toasts.lock().push(toast.clone());
    }
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.toasts.lock().iter().map(|t| t.message.clone()).collect()
    }

    /// Drain the toasts seen so far
    pub fn taken(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock())
    }
}

/// App state logged in against a mock backend
pub fn logged_in_state(server: &MockServer) -> (AppState, Arc<RecordingNotifier>) {
    let store = Arc::new(MemorySessionStore::new(Some(Session::new("access", "refresh"))));
    let notifier = Arc::new(RecordingNotifier::default());
    let client = ApiClient::with_http_client(
        reqwest::Client::new(),
        server.uri(),
        Duration::from_secs(5),
        store,
        notifier.clone(),
    );
    (AppState::new(BackOffice::new(client)), notifier)
}

/// Success envelope around `data`
pub fn ok(data: serde_json::Value) -> wiremock::ResponseTemplate {
    wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "success": true,
        "message": "OK",
        "data": data
    }))
}

pub fn transaction_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "key": format!("TX-{}", id),
        "user": { "id": "u1", "firstName": "Chidi", "lastName": "Okeke" },
        "asset": { "id": "a1", "name": "Tether" },
        "platform": { "id": "p1", "platform": "tron", "address": "TQx, main" },
        "address": "TQx, main",
        "quantity": 100,
        "rate": 1450.5,
        "amount": 145050,
        "proof": "https://cdn.mbx.io/proof.png",
        "status": status,
        "createdAt": "2024-03-05T10:15:00Z"
    })
}

pub fn reward_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "key": format!("RW-{}", id),
        "user": { "id": "u1", "firstName": "Ada", "lastName": "Obi" },
        "amount": 2500,
        "status": status,
        "createdAt": "2024-01-02T00:00:00Z"
    })
}

pub fn paged(items: Vec<serde_json::Value>, page: u32, limit: u32, total: u64) -> serde_json::Value {
    let total_pages = total.div_ceil(u64::from(limit.max(1)));
    serde_json::json!({
        "data": items,
        "pagination": { "total": total, "page": page, "limit": limit, "totalPages": total_pages }
    })
}
