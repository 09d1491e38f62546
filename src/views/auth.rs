//! Login, logout and invitation flows

use chrono::Utc;

use crate::invite::{InviteClaims, decode_claims, token_from_link};
use crate::state::AppState;

use super::profile::check_new_password;
use super::{Table, ViewResult, cell};

/// Log in, then greet the admin when the profile loads
pub async fn login(state: &AppState, email: &str, password: &str) -> ViewResult {
    if email.trim().is_empty() || password.is_empty() {
        anyhow::bail!("Email and password are required");
    }
    state
        .backoffice()
        .login(email, password)
        .await
        .into_result()?;

    Ok(match state.load_admin().await.into_data() {
        Some(admin) => format!("Signed in as {} ({})", admin.email, admin.role),
        None => String::new(),
    })
}

/// Log out; the session is gone afterwards whatever the backend says
pub async fn logout(state: AppState) -> ViewResult {
    if !state.backoffice().client().is_authenticated() {
        return Ok("Not logged in".to_string());
    }
    state.teardown().await.into_result()?;
    Ok(String::new())
}

fn render_claims(claims: &InviteClaims) -> String {
    let mut details = Table::new(["Field", "Value"]);
    details.row(["Email".to_string(), claims.email.clone()]);
    details.row(["Name".to_string(), cell(claims.name.as_ref())]);
    details.row(["Role".to_string(), cell(Some(&claims.role))]);
    details.row([
        "Expires".to_string(),
        cell(claims.expires_at().map(|at| at.to_rfc2822())),
    ]);
    details.render("")
}

/// Show who an invitation is for and whether the backend still honours it
pub async fn inspect_invite(state: &AppState, link: &str) -> ViewResult {
    let token = token_from_link(link);
    let claims = decode_claims(&token)?;
    if claims.is_expired_at(Utc::now()) {
        anyhow::bail!("Invitation for {} has expired", claims.email);
    }
    state
        .backoffice()
        .validate_invite(&token)
        .await
        .into_result()?;
    Ok(render_claims(&claims))
}

pub async fn accept_invite(
    state: &AppState,
    link: &str,
    password: &str,
    confirmation: &str,
) -> ViewResult {
    check_new_password(password, confirmation)?;
    state
        .backoffice()
        .accept_invite(&token_from_link(link), password)
        .await
        .into_result()?;
    Ok("You can now log in with your email and new password".to_string())
}

pub async fn reject_invite(state: &AppState, link: &str) -> ViewResult {
    state
        .backoffice()
        .reject_invite(&token_from_link(link))
        .await
        .into_result()?;
    Ok(String::new())
}
