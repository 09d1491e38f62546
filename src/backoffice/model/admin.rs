use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admin account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(rename = "superadmin")]
    SuperAdmin,
    Admin,
    Editor,
    Moderator,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::SuperAdmin, Role::Admin, Role::Editor, Role::Moderator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superadmin",
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Moderator => "moderator",
        }
    }

    /// Only super admins manage other admin accounts
    pub fn can_manage_admins(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown role '{}' (expected superadmin, admin, editor or moderator)",
                    s
                )
            })
    }
}

/// Admin account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub role: Role,
    /// Present while the invitation is still pending
    #[serde(default)]
    pub invitation_token: Option<String>,
    #[serde(default)]
    pub invitation_expires: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Admin {
    /// First word of the display name, for greetings
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    pub fn is_invite_pending(&self) -> bool {
        self.invitation_token.is_some()
    }
}

/// `POST /admin-auth/login` body
#[derive(Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `PATCH /admin` body
#[derive(Debug, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
}

/// `PATCH /admin/password` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

/// `POST /admin` body; the backend sends the invitation email
#[derive(Debug, Serialize)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// `PATCH /admin/{id}` body
#[derive(Debug, Serialize)]
pub struct AdminUpdate {
    pub name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("superadmin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert_eq!("Editor".parse::<Role>().unwrap(), Role::Editor);
        assert!("owner".parse::<Role>().is_err());
        assert_eq!(Role::Moderator.to_string(), "moderator");
    }

    #[test]
    fn test_admin_deserializes_backend_document() {
        let admin: Admin = serde_json::from_str(
            r#"{
                "_id": "65f0c1",
                "email": "ada@mbx.io",
                "name": "Ada Obi",
                "role": "superadmin",
                "isActive": true,
                "createdAt": "2024-03-05T10:15:00.000Z"
            }"#,
        )
        .unwrap();

        assert_eq!(admin.id, "65f0c1");
        assert_eq!(admin.role, Role::SuperAdmin);
        assert_eq!(admin.first_name(), "Ada");
        assert!(!admin.is_invite_pending());
        assert!(admin.role.can_manage_admins());
    }

    #[test]
    fn test_password_change_uses_camel_case() {
        let body = serde_json::to_value(PasswordChange {
            old_password: "a".into(),
            new_password: "b".into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "oldPassword": "a", "newPassword": "b" }));
    }
}
