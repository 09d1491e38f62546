use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Period breakdowns ============

/// User counts for one month or year; `key` is the month (1-12) or the year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPeriod {
    pub key: i64,
    pub all: u64,
    pub active: u64,
    pub inactive: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionPeriod {
    pub key: i64,
    pub all: u64,
    pub pending: u64,
    pub successful: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardPeriod {
    pub key: i64,
    pub all: u64,
    pub pending: u64,
    pub successful: u64,
}

// ============ Totals ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserCounts {
    pub all: u64,
    pub active: u64,
    pub inactive: u64,
    pub month: UserPeriod,
    pub year: UserPeriod,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionCounts {
    pub all: u64,
    pub pending: u64,
    pub successful: u64,
    pub failed: u64,
    pub month: TransactionPeriod,
    pub year: TransactionPeriod,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardCounts {
    pub all: u64,
    pub pending: u64,
    pub successful: u64,
    pub month: RewardPeriod,
    pub year: RewardPeriod,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearRevenue {
    pub year: i32,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthRevenue {
    pub month: String,
    pub revenue: f64,
}

/// Revenue in USD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueCounts {
    pub all: f64,
    pub year: Option<YearRevenue>,
    pub month: Option<MonthRevenue>,
}

/// Dashboard aggregates from `GET /admin/counts`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Counts {
    pub users: UserCounts,
    pub transactions: TransactionCounts,
    pub rewards: RewardCounts,
    pub revenue: RevenueCounts,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
