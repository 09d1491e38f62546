use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::transaction::UserRef;

/// Payout state of a referral reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardStatus {
    Pending,
    Successful,
}

impl RewardStatus {
    pub const ALL: [RewardStatus; 2] = [RewardStatus::Pending, RewardStatus::Successful];

    pub fn as_str(&self) -> &'static str {
        match self {
            RewardStatus::Pending => "pending",
            RewardStatus::Successful => "successful",
        }
    }
}

impl fmt::Display for RewardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RewardStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown reward status '{}'", s))
    }
}

/// Referral reward owed to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub user: UserRef,
    #[serde(default)]
    pub amount: f64,
    pub status: RewardStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub date_approved: Option<DateTime<Utc>>,
}
