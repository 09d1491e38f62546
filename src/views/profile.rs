//! Logged-in admin profile

use crate::backoffice::model::Admin;
use crate::format::format_date;
use crate::state::AppState;

use super::{Table, ViewResult, cell};

/// Smallest password the console accepts before asking the backend
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn render_admin(admin: &Admin) -> String {
    let mut details = Table::new(["Field", "Value"]);
    details.row(["Name".to_string(), cell(Some(&admin.name))]);
    details.row(["Email".to_string(), admin.email.clone()]);
    details.row(["Role".to_string(), admin.role.to_string()]);
    details.row(["Active".to_string(), admin.is_active.to_string()]);
    details.row([
        "Member since".to_string(),
        cell(admin.created_at.as_ref().map(format_date)),
    ]);
    details.render("")
}

pub async fn show(state: &AppState) -> ViewResult {
    let admin = state.load_admin().await.into_required()?;
    Ok(render_admin(&admin))
}

/// Rename the admin and re-read the profile into the cache
pub async fn update(state: &AppState, name: &str) -> ViewResult {
    if name.trim().is_empty() {
        anyhow::bail!("Name must not be empty");
    }
    state
        .backoffice()
        .update_profile(name)
        .await
        .into_result()?;
    state.load_admin().await;
    Ok(String::new())
}

pub fn check_new_password(new_password: &str, confirmation: &str) -> anyhow::Result<()> {
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        anyhow::bail!(
            "New password must be at least {} characters",
            MIN_PASSWORD_LEN
        );
    }
    if new_password != confirmation {
        anyhow::bail!("Passwords do not match");
    }
    Ok(())
}

pub async fn change_password(
    state: &AppState,
    old_password: &str,
    new_password: &str,
    confirmation: &str,
) -> ViewResult {
    check_new_password(new_password, confirmation)?;
    state
        .backoffice()
        .change_password(old_password, new_password)
        .await
        .into_result()?;
    Ok(String::new())
}
