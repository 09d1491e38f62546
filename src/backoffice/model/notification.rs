use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Broadcast message sent to every app user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// `POST /admin/notifications` body
#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
}

impl NewNotification {
    /// Both fields must carry text
    pub fn new(title: &str, message: &str) -> Result<Self, String> {
        let (title, message) = (title.trim(), message.trim());
        if title.is_empty() || message.is_empty() {
            return Err("notification title and message must not be empty".to_string());
        }
        Ok(Self {
            title: title.to_string(),
            message: message.to_string(),
        })
    }
}
