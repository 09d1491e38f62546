use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::backoffice::model::{PlatformAddress, RewardStatus, Role, TransactionStatus};
use crate::backoffice::{ListQuery, SortOrder};
use crate::export::ExportFormat;

/// MBX exchange back-office console
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Session file path, overrides the configured one
    #[arg(long)]
    pub session: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with email and password
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log out and forget the local session
    Logout,
    /// Stat cards and recent activity
    Dashboard,
    /// Your admin profile
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Admin accounts (super admin only for changes)
    #[command(subcommand)]
    Admins(AdminsCommand),
    /// App users
    #[command(subcommand)]
    Users(UsersCommand),
    /// Sell transactions
    #[command(subcommand)]
    Transactions(TransactionsCommand),
    /// Referral rewards
    #[command(subcommand)]
    Rewards(RewardsCommand),
    /// Revenue per transaction
    Revenue(ListArgs),
    /// Broadcast notifications
    #[command(subcommand)]
    Notifications(NotificationsCommand),
    /// Tradable assets
    #[command(subcommand)]
    Assets(AssetsCommand),
    /// Admin invitations
    #[command(subcommand)]
    Invite(InviteCommand),
    /// Configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Paging, filtering and export options shared by list commands
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ListArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Rows per page; defaults to the configured value
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(short, long)]
    pub search: Option<String>,
    /// newest (desc) or oldest (asc)
    #[arg(long)]
    pub sort: Option<SortOrder>,
    /// Status tab, e.g. pending or active
    #[arg(long)]
    pub status: Option<String>,
    /// Also write the page to a csv or xls file
    #[arg(long)]
    pub export: Option<ExportFormat>,
}

impl ListArgs {
    pub fn to_query(&self, default_limit: u32) -> ListQuery {
        let mut query = ListQuery::new(self.page, self.limit.unwrap_or(default_limit));
        if let Some(search) = &self.search {
            query = query.search(search.as_str());
        }
        if let Some(sort) = self.sort {
            query = query.sort(sort);
        }
        if let Some(status) = &self.status {
            query = query.status(status.as_str());
        }
        query
    }
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    Show,
    /// Change your display name
    Update {
        #[arg(long)]
        name: String,
    },
    /// Change your password
    Password {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminsCommand {
    List,
    /// Invite a new admin
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: Role,
    },
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: Role,
    },
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List(ListArgs),
    /// Profile with transactions and rewards
    Show { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TransactionsCommand {
    List(ListArgs),
    Show { id: String },
    /// Mark as successful
    Approve { id: String },
    /// Mark as failed
    Decline { id: String },
    SetStatus {
        id: String,
        status: TransactionStatus,
    },
}

#[derive(Subcommand, Debug)]
pub enum RewardsCommand {
    List(ListArgs),
    Show { id: String },
    /// Mark as successful
    Approve { id: String },
    SetStatus { id: String, status: RewardStatus },
}

#[derive(Subcommand, Debug)]
pub enum NotificationsCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Send a notification to every user
    Send {
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AssetsCommand {
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    Add {
        /// Price-feed id, e.g. bitcoin
        #[arg(long)]
        crypto_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        vip_rate: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        /// `platform=address`, or a bare address for single-network assets; repeatable
        #[arg(long = "address", required = true, value_parser = PlatformAddress::parse)]
        addresses: Vec<PlatformAddress>,
    },
    Update {
        id: String,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        ngn_rate: Option<f64>,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long = "address", value_parser = PlatformAddress::parse)]
        addresses: Vec<PlatformAddress>,
    },
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum InviteCommand {
    /// Show who an invitation link is for
    Inspect { link: String },
    Accept {
        link: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    Reject { link: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write the effective configuration to the config file
    Init,
}
