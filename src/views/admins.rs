//! Admin account management

use crate::backoffice::model::{Admin, AdminUpdate, NewAdmin, Role};
use crate::format::{capitalize, format_date};
use crate::state::AppState;

use super::{Table, ViewResult, cell};

fn role_label(role: Role) -> String {
    match role {
        Role::SuperAdmin => "Super Admin".to_string(),
        other => capitalize(other.as_str()),
    }
}

/// Super admins first, otherwise in server order
pub fn sort_admins(admins: &mut [Admin]) {
    admins.sort_by_key(|admin| admin.role != Role::SuperAdmin);
}

pub fn admins_table(admins: &[Admin]) -> Table {
    let mut table = Table::new(["ID", "Name", "Email", "Role", "Status", "Added"]);
    for admin in admins {
        let status = if admin.is_invite_pending() {
            "invited"
        } else if admin.is_active {
            "active"
        } else {
            "inactive"
        };
        table.row([
            admin.id.clone(),
            cell(Some(&admin.name)),
            admin.email.clone(),
            role_label(admin.role),
            status.to_string(),
            cell(admin.created_at.as_ref().map(format_date)),
        ]);
    }
    table
}

pub async fn list(state: &AppState) -> ViewResult {
    let mut admins = state.backoffice().list_admins().await.into_required()?;
    sort_admins(&mut admins);
    Ok(admins_table(&admins).render("No admins found"))
}

/// Refuse admin management for anyone but a super admin when the profile is known
async fn ensure_super_admin(state: &AppState) -> anyhow::Result<()> {
    let admin = match state.admin() {
        Some(admin) => admin,
        None => state.load_admin().await.into_required()?,
    };
    if !admin.role.can_manage_admins() {
        anyhow::bail!("Only a super admin can manage admin accounts");
    }
    Ok(())
}

pub async fn add(state: &AppState, name: &str, email: &str, role: Role) -> ViewResult {
    ensure_super_admin(state).await?;
    state
        .backoffice()
        .add_admin(&NewAdmin {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            role,
        })
        .await
        .into_result()?;
    Ok(String::new())
}

pub async fn update(state: &AppState, id: &str, name: &str, role: Role) -> ViewResult {
    ensure_super_admin(state).await?;
    state
        .backoffice()
        .update_admin(
            id,
            &AdminUpdate {
                name: name.trim().to_string(),
                role,
            },
        )
        .await
        .into_result()?;
    Ok(String::new())
}

pub async fn remove(state: &AppState, id: &str) -> ViewResult {
    ensure_super_admin(state).await?;
    state.backoffice().remove_admin(id).await.into_result()?;
    Ok(String::new())
}
