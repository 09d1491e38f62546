//! Table export to CSV and legacy Excel
//!
//! Rows are flattened into comma-separated text: a header row taken from the first row's
//! column names, then one line per row, joined by `\n`. Text containing `,` or `"` is
//! quoted with inner quotes doubled; nothing else is escaped. The Excel flavour is the
//! same text behind a UTF-8 byte order mark.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;

const UTF8_BOM: &str = "\u{FEFF}";

/// One exported cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Text that could split the cell or the row is quoted
    fn render(&self) -> String {
        match self {
            CellValue::Text(text) if text.contains([',', '"', '\n', '\r']) => {
                format!("\"{}\"", text.replace('"', "\"\""))
            }
            CellValue::Text(text) => text.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(CellValue::Integer)
            .unwrap_or(CellValue::Number(value as f64))
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// Ordered column/value pairs for one exported line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRow {
    cells: Vec<(String, CellValue)>,
}

impl ExportRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.push((column.into(), value.into()));
        self
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(column, _)| column.as_str())
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, value)| value)
    }
}

/// Flatten rows into CSV text; `None` for an empty row list
pub fn to_csv(rows: &[ExportRow]) -> Option<String> {
    let first = rows.first()?;
    let headers: Vec<&str> = first.columns().collect();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| CellValue::Text(h.to_string()).render())
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let line = headers
            .iter()
            .map(|h| row.get(h).map(CellValue::render).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Some(lines.join("\n"))
}

/// Download flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    /// Legacy Excel; CSV text Excel opens with the right encoding
    Xls,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xls => "xls",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Xls => "application/vnd.ms-excel;charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xls" | "excel" => Ok(ExportFormat::Xls),
            other => Err(format!("unknown export format '{}' (expected csv or xls)", other)),
        }
    }
}

/// Encoded export, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

/// `<status> <entity>.<ext>`; path separators are replaced
pub fn export_file_name(status: &str, entity: &str, format: ExportFormat) -> String {
    let stem = format!("{} {}", status.trim(), entity.trim());
    let stem: String = stem
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("{}.{}", stem, format.extension())
}

/// Encode rows for download; `None` when there is nothing to export
pub fn build_export(
    rows: &[ExportRow],
    status: &str,
    entity: &str,
    format: ExportFormat,
) -> Option<ExportFile> {
    let csv = to_csv(rows)?;
    let contents = match format {
        ExportFormat::Csv => csv,
        ExportFormat::Xls => format!("{}{}", UTF8_BOM, csv),
    };

    Some(ExportFile {
        file_name: export_file_name(status, entity, format),
        mime_type: format.mime_type(),
        contents,
    })
}

/// Write an export into `dir`; returns the written path, `None` when there were no rows
pub fn write_export(
    dir: &Path,
    rows: &[ExportRow],
    status: &str,
    entity: &str,
    format: ExportFormat,
) -> anyhow::Result<Option<PathBuf>> {
    let Some(file) = build_export(rows, status, entity, format) else {
        tracing::info!(entity, "Nothing to export");
        return Ok(None);
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;
    let path = dir.join(&file.file_name);
    fs::write(&path, file.contents.as_bytes())
        .with_context(|| format!("Failed to write export: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        rows = rows.len(),
        mime = file.mime_type,
        "Export written"
    );
    Ok(Some(path))
}
