use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// How far the user got through onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Incomplete,
    Complete,
    Active,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Incomplete => "incomplete",
            RegistrationStatus::Complete => "complete",
            RegistrationStatus::Active => "active",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub currency: String,
}

/// Payout bank account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referrer {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Exchange customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub referrer: Option<Referrer>,
    /// Number of users this user referred
    #[serde(default)]
    pub referred: Option<u64>,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub notifications_enabled: bool,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub registration_status: RegistrationStatus,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub banks: Vec<Bank>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub successful_transactions: Option<u64>,
    #[serde(default)]
    pub failed_transactions: Option<u64>,
    #[serde(default)]
    pub pending_transactions: Option<u64>,
    #[serde(default)]
    pub total_transactions: Option<u64>,
    #[serde(default)]
    pub successful_rewards: Option<u64>,
    #[serde(default)]
    pub pending_rewards: Option<u64>,
    #[serde(default)]
    pub total_rewards: Option<u64>,
}

impl User {
    /// "First Last", falling back to the email for users who never finished onboarding
    pub fn full_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if name.trim().is_empty() {
            self.email.clone()
        } else {
            name
        }
    }

    pub fn default_bank(&self) -> Option<&Bank> {
        self.banks
            .iter()
            .find(|b| b.default)
            .or_else(|| self.banks.first())
    }

    pub fn country_name(&self) -> &str {
        self.country.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> User {
        serde_json::from_str(r#"{"_id":"u1","email":"new@mbx.io"}"#).unwrap()
    }

    #[test]
    fn test_minimal_user_deserializes() {
        let user = minimal();
        assert_eq!(user.registration_status, RegistrationStatus::Incomplete);
        assert_eq!(user.full_name(), "new@mbx.io");
        assert!(user.default_bank().is_none());
        assert_eq!(user.country_name(), "");
    }

    #[test]
    fn test_full_user_deserializes() {
        let user: User = serde_json::from_str(
            r#"{
                "_id": "u2",
                "email": "chidi@mbx.io",
                "firstName": "Chidi",
                "lastName": "Okeke",
                "country": { "code": "NG", "name": "Nigeria", "flag": "🇳🇬", "currency": "NGN" },
                "gender": "male",
                "registrationStatus": "active",
                "banks": [
                    { "bankName": "GTB", "accountNumber": "0123", "accountName": "C O", "default": false },
                    { "bankName": "Access", "accountNumber": "0456", "accountName": "C O", "default": true }
                ],
                "totalTransactions": 4,
                "pendingTransactions": 1
            }"#,
        )
        .unwrap();

        assert_eq!(user.full_name(), "Chidi Okeke");
        assert_eq!(user.country_name(), "Nigeria");
        assert_eq!(user.default_bank().unwrap().bank_name, "Access");
        assert_eq!(user.gender, Some(Gender::Male));
        assert_eq!(user.total_transactions, Some(4));
    }
}
