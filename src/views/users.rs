//! Users views

use crate::backoffice::model::User;
use crate::export::ExportRow;
use crate::format::{capitalize, format_date};
use crate::state::AppState;

use super::rewards::rewards_table;
use super::transactions::transactions_table;
use super::{ListOptions, Table, ViewResult, cell, export_rows, pagination_footer, sections};

/// Export columns of the users table
pub fn user_rows(users: &[User]) -> Vec<ExportRow> {
    users
        .iter()
        .map(|user| {
            let full_name = match &user.first_name {
                Some(first) => format!("{} {}", first, user.last_name.as_deref().unwrap_or("")),
                None => "-".to_string(),
            };
            ExportRow::new()
                .with("Email Address", cell(Some(&user.email)))
                .with("Full Name", full_name)
                .with("Phone Number", user.phone_number.clone())
                .with("Country", user.country.as_ref().map(|c| c.name.clone()))
                .with("Total Transactions", user.total_transactions)
                .with("Pending Transactions", user.pending_transactions)
                .with("Succesful Transactions", user.successful_transactions)
                .with("Failed Transactions", user.failed_transactions)
        })
        .collect()
}

pub async fn list(state: &AppState, options: &ListOptions) -> ViewResult {
    let (page, _) = tokio::join!(
        state.backoffice().list_users(&options.query),
        state.refresh_counts()
    );
    let page = page.into_required()?;

    let mut heading = format!("{} users", capitalize(options.status_label()));
    if let Some(counts) = state.counts() {
        let u = &counts.users;
        heading.push_str(&format!(
            "  [all {} | active {} | inactive {}]",
            u.all, u.active, u.inactive
        ));
    }

    let mut table = Table::new([
        "Email Address",
        "Full Name",
        "Phone Number",
        "Country",
        "Transactions",
        "Date Joined",
    ]);
    for user in &page.data {
        table.row([
            user.email.clone(),
            user.full_name(),
            cell(user.phone_number.as_ref()),
            cell(Some(user.country_name())),
            user.total_transactions.unwrap_or(0).to_string(),
            cell(user.created_at.as_ref().map(format_date)),
        ]);
    }

    let export = export_rows(options, &user_rows(&page.data), "users")?;
    Ok(sections(
        [
            heading,
            table.render("No users found"),
            pagination_footer(&page.pagination),
        ]
        .into_iter()
        .chain(export),
    ))
}

fn render_profile(user: &User) -> String {
    let mut details = Table::new(["Field", "Value"]);
    details.row(["Name".to_string(), user.full_name()]);
    details.row(["Email".to_string(), user.email.clone()]);
    details.row(["Username".to_string(), cell(user.user_name.as_ref())]);
    details.row(["Phone".to_string(), cell(user.phone_number.as_ref())]);
    details.row(["Country".to_string(), cell(Some(user.country_name()))]);
    details.row([
        "Registration".to_string(),
        user.registration_status.as_str().to_string(),
    ]);
    details.row(["Email verified".to_string(), user.email_verified.to_string()]);
    details.row(["Points".to_string(), user.points.to_string()]);
    details.row(["Referral code".to_string(), cell(user.referral_code.as_ref())]);
    details.row(["Referred".to_string(), user.referred.unwrap_or(0).to_string()]);
    if let Some(bank) = user.default_bank() {
        details.row([
            "Bank".to_string(),
            format!("{} {} ({})", bank.bank_name, bank.account_number, bank.account_name),
        ]);
    }
    details.row([
        "Joined".to_string(),
        cell(user.created_at.as_ref().map(format_date)),
    ]);
    details.render("")
}

/// User profile with their transactions and rewards
pub async fn show(state: &AppState, id: &str) -> ViewResult {
    let office = state.backoffice();
    let (user, transactions, rewards) = tokio::join!(
        office.user(id),
        office.user_transactions(id),
        office.user_rewards(id)
    );
    let user = user.into_required()?;
    let transactions = transactions.into_data().unwrap_or_default();
    let rewards = rewards.into_data().unwrap_or_default();

    Ok(sections([
        render_profile(&user),
        format!(
            "Transactions\n{}",
            transactions_table(&transactions, true).render("No transactions yet")
        ),
        format!("Rewards\n{}", rewards_table(&rewards).render("No rewards yet")),
    ]))
}

pub async fn delete(state: &AppState, id: &str) -> ViewResult {
    state.backoffice().delete_user(id).await.into_result()?;
    state.refresh_counts().await;
    Ok(String::new())
}
