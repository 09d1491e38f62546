//! Transactions views

use crate::backoffice::model::{Transaction, TransactionStatus};
use crate::export::ExportRow;
use crate::format::{capitalize, format_date, format_usd};
use crate::state::AppState;

use super::{ListOptions, Table, ViewResult, cell, export_rows, pagination_footer, sections};

/// Export columns of the transactions table
pub fn transaction_rows(transactions: &[Transaction]) -> Vec<ExportRow> {
    transactions
        .iter()
        .map(|tx| {
            ExportRow::new()
                .with("Transaction ID", tx.key.as_str())
                .with("Asset", tx.asset.name.as_str())
                .with("Network", capitalize(&tx.platform.platform.to_lowercase()))
                .with("Network Address", tx.address.as_str())
                .with("Quantity", tx.quantity)
                .with("Rate", tx.rate)
                .with("Status", tx.status.as_str())
                .with("Initiation Date", format_date(&tx.created_at))
        })
        .collect()
}

/// On-screen table; the status column only makes sense on the unfiltered list
pub fn transactions_table(transactions: &[Transaction], show_status: bool) -> Table {
    let mut headers = vec![
        "Transaction ID",
        "Asset",
        "Platform",
        "Platform Address",
        "Quantity",
        "Rate",
        "Amount",
    ];
    if show_status {
        headers.push("Status");
    }
    headers.extend(["Initiation Date", "Approval Date"]);

    let mut table = Table::new(headers);
    for tx in transactions {
        let mut cells = vec![
            tx.key.to_uppercase(),
            tx.asset.name.clone(),
            cell(Some(&tx.platform.platform)),
            cell(Some(&tx.address)),
            tx.quantity.to_string(),
            format_usd(tx.rate),
            format_usd(tx.amount),
        ];
        if show_status {
            cells.push(tx.status.to_string());
        }
        cells.push(format_date(&tx.created_at));
        cells.push(cell(tx.date_approved.as_ref().map(format_date)));
        table.row(cells);
    }
    table
}

pub async fn list(state: &AppState, options: &ListOptions) -> ViewResult {
    // Status tab counts come from the dashboard aggregates
    let (page, _) = tokio::join!(
        state.backoffice().list_transactions(&options.query),
        state.refresh_counts()
    );
    let page = page.into_required()?;

    let status = options.status_label();
    let mut heading = format!("{} transactions", capitalize(status));
    if let Some(counts) = state.counts() {
        let t = &counts.transactions;
        heading.push_str(&format!(
            "  [all {} | pending {} | successful {} | failed {}]",
            t.all, t.pending, t.successful, t.failed
        ));
    }

    let table = transactions_table(&page.data, status == "all");
    let export = export_rows(options, &transaction_rows(&page.data), "transactions")?;

    Ok(sections(
        [
            heading,
            table.render("No transactions found"),
            pagination_footer(&page.pagination),
        ]
        .into_iter()
        .chain(export),
    ))
}

/// Detail view of one transaction
pub fn render_transaction(tx: &Transaction) -> String {
    let mut details = Table::new(["Field", "Value"]);
    details.row(["Transaction ID".to_string(), tx.key.to_uppercase()]);
    details.row(["Customer".to_string(), cell(Some(tx.user.full_name()))]);
    details.row(["Asset".to_string(), tx.asset.name.clone()]);
    details.row(["Network".to_string(), capitalize(&tx.platform.platform)]);
    details.row(["Address".to_string(), cell(Some(&tx.address))]);
    details.row(["Quantity".to_string(), tx.quantity.to_string()]);
    details.row(["Rate".to_string(), format_usd(tx.rate)]);
    details.row(["Amount".to_string(), format_usd(tx.amount)]);
    details.row(["Status".to_string(), tx.status.to_string()]);
    details.row(["Proof".to_string(), cell(Some(&tx.proof))]);
    details.row(["Initiated".to_string(), format_date(&tx.created_at)]);
    details.row([
        "Approved".to_string(),
        cell(tx.date_approved.as_ref().map(format_date)),
    ]);
    details.render("")
}

pub async fn show(state: &AppState, id: &str) -> ViewResult {
    let tx = state.backoffice().transaction(id).await.into_required()?;
    Ok(render_transaction(&tx))
}

/// Move a transaction to `status` and refresh the dashboard counts
pub async fn set_status(state: &AppState, id: &str, status: TransactionStatus) -> ViewResult {
    state
        .backoffice()
        .set_transaction_status(id, status)
        .await
        .into_result()?;
    state.refresh_counts().await;
    Ok(String::new())
}
