//! Referral rewards views

use crate::backoffice::model::{Reward, RewardStatus};
use crate::export::ExportRow;
use crate::format::{capitalize, format_date, format_usd};
use crate::state::AppState;

use super::{ListOptions, Table, ViewResult, cell, export_rows, pagination_footer, sections};

pub fn reward_rows(rewards: &[Reward]) -> Vec<ExportRow> {
    rewards
        .iter()
        .map(|reward| {
            ExportRow::new()
                .with("Reward ID", reward.key.as_str())
                .with("Amount", format_usd(reward.amount))
                .with("First Name", reward.user.first_name.as_str())
                .with("Last Name", reward.user.last_name.as_str())
                .with("Status", reward.status.as_str())
                .with("Initiation Date", format_date(&reward.created_at))
        })
        .collect()
}

pub fn rewards_table(rewards: &[Reward]) -> Table {
    let mut table = Table::new([
        "Reward ID",
        "Full Name",
        "Amount",
        "Status",
        "Initiation Date",
        "Approval Date",
    ]);
    for reward in rewards {
        table.row([
            reward.key.to_uppercase(),
            cell(Some(reward.user.full_name())),
            format_usd(reward.amount),
            reward.status.to_string(),
            format_date(&reward.created_at),
            cell(reward.date_approved.as_ref().map(format_date)),
        ]);
    }
    table
}

pub async fn list(state: &AppState, options: &ListOptions) -> ViewResult {
    let (page, _) = tokio::join!(
        state.backoffice().list_rewards(&options.query),
        state.refresh_counts()
    );
    let page = page.into_required()?;

    let mut heading = format!("{} rewards", capitalize(options.status_label()));
    if let Some(counts) = state.counts() {
        let r = &counts.rewards;
        heading.push_str(&format!(
            "  [all {} | pending {} | successful {}]",
            r.all, r.pending, r.successful
        ));
    }

    let export = export_rows(options, &reward_rows(&page.data), "rewards")?;
    Ok(sections(
        [
            heading,
            rewards_table(&page.data).render("No rewards found"),
            pagination_footer(&page.pagination),
        ]
        .into_iter()
        .chain(export),
    ))
}

pub async fn show(state: &AppState, id: &str) -> ViewResult {
    let reward = state.backoffice().reward(id).await.into_required()?;

    let mut details = Table::new(["Field", "Value"]);
    details.row(["Reward ID".to_string(), reward.key.to_uppercase()]);
    details.row(["Customer".to_string(), cell(Some(reward.user.full_name()))]);
    details.row(["Amount".to_string(), format_usd(reward.amount)]);
    details.row(["Status".to_string(), reward.status.to_string()]);
    details.row(["Initiated".to_string(), format_date(&reward.created_at)]);
    details.row([
        "Approved".to_string(),
        cell(reward.date_approved.as_ref().map(format_date)),
    ]);
    Ok(details.render(""))
}

pub async fn set_status(state: &AppState, id: &str, status: RewardStatus) -> ViewResult {
    state
        .backoffice()
        .set_reward_status(id, status)
        .await
        .into_result()?;
    state.refresh_counts().await;
    Ok(String::new())
}
