//! Back-office domain models
//!
//! Field names follow the backend's camelCase JSON. Documents carry their id as `_id`;
//! embedded references use `id`.

mod admin;
mod asset;
mod counts;
mod notification;
mod page;
mod reward;
mod transaction;
mod user;

pub use admin::{Admin, AdminUpdate, Credentials, NewAdmin, PasswordChange, ProfileUpdate, Role};
pub use asset::{Asset, AssetUpdate, NATIVE_PLATFORM, NewAsset, PlatformAddress};
pub use counts::{
    Counts, MonthRevenue, RevenueCounts, RewardCounts, RewardPeriod, TransactionCounts,
    TransactionPeriod, UserCounts, UserPeriod, YearRevenue,
};
pub use notification::{NewNotification, Notification};
pub use page::{Page, Pagination};
pub use reward::{Reward, RewardStatus};
pub use transaction::{AssetRef, PlatformRef, Transaction, TransactionStatus, UserRef};
pub use user::{Bank, Country, Gender, Referrer, RegistrationStatus, User};
