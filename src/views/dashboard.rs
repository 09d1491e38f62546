//! Landing dashboard: stat cards and the latest activity

use crate::backoffice::ListQuery;
use crate::backoffice::model::Counts;
use crate::format::format_usd;
use crate::state::AppState;

use super::rewards::rewards_table;
use super::transactions::transactions_table;
use super::{StatCard, ViewResult, pluralize, render_cards, sections};

/// Rows shown in each of the recent activity tables
pub const RECENT_LIMIT: u32 = 10;

pub fn greeting(name: Option<&str>) -> String {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => format!("Good day, {}", name),
        None => "Good day".to_string(),
    }
}

pub fn stat_cards(counts: &Counts) -> Vec<StatCard> {
    let this_month = format_usd(
        counts
            .revenue
            .month
            .as_ref()
            .map(|m| m.revenue)
            .unwrap_or(0.0),
    );
    vec![
        StatCard::new(
            "Pending Transactions",
            counts.transactions.pending,
            format!(
                "+{}",
                pluralize(counts.transactions.month.pending, "pending txn", "pending txns")
            ),
            "this month",
        ),
        StatCard::new(
            "Pending Rewards",
            counts.rewards.pending,
            format!(
                "+{}",
                pluralize(counts.rewards.month.pending, "pending reward", "pending rewards")
            ),
            "this month",
        ),
        StatCard::new(
            "Total Users",
            counts.users.all,
            format!("+{}", pluralize(counts.users.month.all, "user", "users")),
            "this month",
        ),
        StatCard::new(
            "Total Revenue (USD)",
            format_usd(counts.revenue.all),
            format!("+{}", this_month),
            "this month",
        ),
    ]
}

pub async fn show(state: &AppState) -> ViewResult {
    let office = state.backoffice();
    let recent = ListQuery::new(1, RECENT_LIMIT);
    let ((admin, counts), transactions, rewards) = tokio::join!(
        state.load(),
        office.list_transactions(&recent),
        office.list_rewards(&recent)
    );

    // Profile and counts gate the page; the tables degrade to empty
    let admin = admin.into_required()?;
    let counts = counts.into_required()?;
    let transactions = transactions.into_data().unwrap_or_default();
    let rewards = rewards.into_data().unwrap_or_default();

    Ok(sections([
        greeting(Some(admin.first_name())),
        render_cards(&stat_cards(&counts)),
        format!(
            "Recent transactions\n{}",
            transactions_table(&transactions.data, true).render("No transactions yet")
        ),
        format!(
            "Recent rewards\n{}",
            rewards_table(&rewards.data).render("No rewards yet")
        ),
    ]))
}
