//! Refresh-token exchange against `/refresh`

use anyhow::bail;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::result::Envelope;

/// Token refresh request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Token refresh payload (inside the response envelope)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Exchange a refresh token for a new access token
pub(crate) async fn exchange_refresh_token(
    client: &Client,
    base_url: &str,
    refresh_token: &str,
) -> anyhow::Result<String> {
    let url = format!("{}/refresh", base_url.trim_end_matches('/'));

    let response = client
        .post(&url)
        .header("Accept", "application/json")
        .json(&RefreshRequest { refresh_token })
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body_text = response.text().await.unwrap_or_default();
        let error_msg = match status.as_u16() {
            401 | 403 => "Refresh token rejected, re-authentication required",
            429 => "Too many requests, rate limited",
            500..=599 => "Server error, token service temporarily unavailable",
            _ => "Token refresh failed",
        };
        bail!("{}: {} {}", error_msg, status, body_text);
    }

    let envelope: Envelope = response.json().await?;
    if !envelope.success {
        bail!(
            "Token refresh rejected: {}",
            envelope.message().unwrap_or("no message")
        );
    }

    let payload: RefreshResponse = match envelope.data {
        Some(data) => serde_json::from_value(data)?,
        None => bail!("Token refresh response carried no data"),
    };

    match payload.access_token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => bail!("Token refresh response carried no accessToken"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_exchange_returns_new_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/refresh"))
            .and(body_json(serde_json::json!({ "refreshToken": "r-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "message": "Token refreshed",
                "data": { "accessToken": "fresh" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = exchange_refresh_token(&Client::new(), &server.uri(), "r-1")
            .await
            .unwrap();
        assert_eq!(token, "fresh");
    }

    #[tokio::test]
    async fn test_exchange_fails_on_envelope_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "message": "Refresh token revoked"
            })))
            .mount(&server)
            .await;

        let err = exchange_refresh_token(&Client::new(), &server.uri(), "r-1")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Refresh token revoked"));
    }

    #[tokio::test]
    async fn test_exchange_fails_without_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": {}
            })))
            .mount(&server)
            .await;

        assert!(
            exchange_refresh_token(&Client::new(), &server.uri(), "r-1")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_exchange_fails_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/refresh"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = exchange_refresh_token(&Client::new(), &server.uri(), "r-1")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("temporarily unavailable"));
    }
}
