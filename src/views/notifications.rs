//! Broadcast notifications

use crate::backoffice::model::{NewNotification, Notification};
use crate::format::{format_date, format_time};
use crate::state::AppState;

use super::{ViewResult, pagination_footer, sections};

/// Title, body and timestamp per notification
pub fn render_notifications(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return "You have no notification".to_string();
    }
    notifications
        .iter()
        .map(|n| {
            format!(
                "{}\n{}\n{} {}",
                n.title,
                n.message,
                format_date(&n.created_at),
                format_time(&n.created_at)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub async fn list(state: &AppState, page: u32, limit: u32) -> ViewResult {
    let page = state
        .backoffice()
        .list_notifications(page.max(1), limit.max(1))
        .await
        .into_required()?;
    Ok(sections([
        render_notifications(&page.data),
        pagination_footer(&page.pagination),
    ]))
}

pub async fn send(state: &AppState, title: &str, message: &str) -> ViewResult {
    let notification = NewNotification::new(title, message).map_err(anyhow::Error::msg)?;
    state
        .backoffice()
        .send_notification(&notification)
        .await
        .into_result()?;
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{logged_in_state, ok, paged};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer};

    #[tokio::test]
    async fn test_list_renders_notifications() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/notifications"))
            .and(query_param("limit", "5"))
            .and(query_param("page", "1"))
            .respond_with(ok(paged(
                vec![serde_json::json!({
                    "_id": "n1",
                    "title": "Maintenance",
                    "message": "Back at 9",
                    "createdAt": "2024-03-05T21:00:00Z"
                })],
                1,
                5,
                1,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let (state, _) = logged_in_state(&server);
        let out = list(&state, 1, 5).await.unwrap();
        assert!(out.starts_with("Maintenance\nBack at 9\nMar 5, 2024 09:00PM"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(render_notifications(&[]), "You have no notification");
    }

    #[tokio::test]
    async fn test_send_rejects_blank_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ok(serde_json::Value::Null))
            .expect(0)
            .mount(&server)
            .await;

        let (state, _) = logged_in_state(&server);
        assert!(send(&state, " ", "body").await.is_err());
    }
}
