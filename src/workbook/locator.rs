use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Maps a calendar day to the workbook file that holds it.
///
/// Two invoices dated the same day always resolve to the same path and
/// different days never collide. The date comes from the invoice, not from
/// an ambient clock, so a save is reproducible at any time.
#[derive(Debug, Clone)]
pub struct WorkbookLocator {
    data_dir: PathBuf,
}

impl WorkbookLocator {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        WorkbookLocator {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the workbook for the given calendar day.
    pub fn locate(&self, date: NaiveDate) -> PathBuf {
        self.data_dir
            .join(format!("invoice_{}.xlsx", date.format("%Y-%m-%d")))
    }
}

/// Default data directory when the caller does not supply one.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gv-invoice")
        .join("excel_data")
}
