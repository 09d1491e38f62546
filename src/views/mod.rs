//! Terminal views
//!
//! Each view fetches through [`AppState`](crate::state::AppState) and renders plain text.
//! Failed fetches surface as [`ApiFailure`](crate::api::ApiFailure) errors; mutations
//! report through the client's toasts and render nothing of their own.

pub mod admins;
pub mod assets;
pub mod auth;
mod cards;
pub mod dashboard;
pub mod notifications;
pub mod profile;
pub mod revenue;
pub mod rewards;
mod table;
pub mod transactions;
pub mod users;

use std::path::PathBuf;

use crate::backoffice::ListQuery;
use crate::backoffice::model::Pagination;
use crate::export::{ExportFormat, ExportRow, write_export};

pub use cards::{StatCard, pluralize, render_cards};
pub use table::{EMPTY_CELL, Table, cell};

/// Rendered view output
pub type ViewResult = anyhow::Result<String>;

/// Options shared by the paged list views
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub query: ListQuery,
    pub export: Option<ExportFormat>,
    pub export_dir: PathBuf,
}

impl ListOptions {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            export: None,
            export_dir: PathBuf::from("."),
        }
    }

    /// Status tab the list is filtered by
    pub fn status_label(&self) -> &str {
        self.query.status.as_deref().unwrap_or("all")
    }
}

/// `Showing 11-12 of 12 (page 2 of 2)`
pub fn pagination_footer(pagination: &Pagination) -> String {
    match pagination.row_range() {
        Some((start, end)) => format!(
            "Showing {}-{} of {} (page {} of {})",
            start,
            end,
            pagination.total,
            pagination.page,
            pagination.total_pages.max(1)
        ),
        None => "Showing 0 of 0".to_string(),
    }
}

/// Write the export the options ask for and describe the outcome
pub(crate) fn export_rows(
    options: &ListOptions,
    rows: &[ExportRow],
    entity: &str,
) -> anyhow::Result<Option<String>> {
    let Some(format) = options.export else {
        return Ok(None);
    };

    let message = match write_export(
        &options.export_dir,
        rows,
        options.status_label(),
        entity,
        format,
    )? {
        Some(path) => format!("Exported {} rows to {}", rows.len(), path.display()),
        None => "Nothing to export".to_string(),
    };
    Ok(Some(message))
}

/// Join non-empty sections with a blank line
pub(crate) fn sections(parts: impl IntoIterator<Item = String>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
