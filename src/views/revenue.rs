//! Revenue view: transactions with their payout amounts

use crate::backoffice::model::Transaction;
use crate::export::ExportRow;
use crate::format::{capitalize, format_date, format_usd};
use crate::state::AppState;

use super::{ListOptions, Table, ViewResult, cell, export_rows, pagination_footer, sections};

pub fn revenue_rows(transactions: &[Transaction]) -> Vec<ExportRow> {
    transactions
        .iter()
        .map(|tx| {
            ExportRow::new()
                .with("Transaction ID", tx.key.as_str())
                .with("Quantity", tx.quantity)
                .with("Rate", format_usd(tx.rate))
                .with("Amount", format_usd(tx.amount))
                .with("Status", tx.status.as_str())
                .with("Initiation Date", format_date(&tx.created_at))
                .with(
                    "Approval Date",
                    tx.date_approved
                        .as_ref()
                        .map(format_date)
                        .unwrap_or_else(|| "-".to_string()),
                )
        })
        .collect()
}

pub async fn list(state: &AppState, options: &ListOptions) -> ViewResult {
    let (page, _) = tokio::join!(
        state.backoffice().list_transactions(&options.query),
        state.refresh_counts()
    );
    let page = page.into_required()?;

    let mut heading = format!("{} revenue", capitalize(options.status_label()));
    if let Some(counts) = state.counts() {
        heading.push_str(&format!(
            "  [total {} | this month {}]",
            format_usd(counts.revenue.all),
            format_usd(counts.revenue.month.map(|m| m.revenue).unwrap_or(0.0))
        ));
    }

    let mut table = Table::new([
        "Transaction ID",
        "Quantity",
        "Rate",
        "Amount",
        "Status",
        "Initiation Date",
        "Approval Date",
    ]);
    for tx in &page.data {
        table.row([
            tx.key.to_uppercase(),
            tx.quantity.to_string(),
            format_usd(tx.rate),
            format_usd(tx.amount),
            tx.status.to_string(),
            format_date(&tx.created_at),
            cell(tx.date_approved.as_ref().map(format_date)),
        ]);
    }

    let export = export_rows(options, &revenue_rows(&page.data), "revenue")?;
    Ok(sections(
        [
            heading,
            table.render("No revenue records found"),
            pagination_footer(&page.pagination),
        ]
        .into_iter()
        .chain(export),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::to_csv;
    use crate::backoffice::ListQuery;
    use crate::test_support::{logged_in_state, ok, paged, transaction_json};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer};

    #[test]
    fn test_revenue_columns() {
        let tx: Transaction =
            serde_json::from_value(transaction_json("9", "successful")).unwrap();
        let csv = to_csv(&revenue_rows(&[tx])).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "Transaction ID,Quantity,Rate,Amount,Status,Initiation Date,Approval Date"
        );
        assert!(lines[1].ends_with(",successful,\"Mar 5, 2024\",-"));
        assert!(lines[1].contains("\"$145,050.00\""));
    }

    #[tokio::test]
    async fn test_list_heading_carries_revenue_totals() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/transactions"))
            .respond_with(ok(paged(vec![transaction_json("9", "successful")], 1, 10, 1)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/counts"))
            .respond_with(ok(serde_json::json!({
                "revenue": { "all": 15000.5, "month": { "month": "March", "revenue": 1200 } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (state, _) = logged_in_state(&server);
        let out = list(&state, &ListOptions::new(ListQuery::default()))
            .await
            .unwrap();
        assert!(out.starts_with("All revenue  [total $15,000.50 | this month $1,200.00]"));
    }
}
