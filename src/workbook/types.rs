use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A cell value as written to or read from a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellData {
    Empty,
    Text(String),
    Number(f64),
}

impl CellData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellData::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellData::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Summary of one sheet in a workbook file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetOverview {
    pub name: String,
    pub index: u32,
    pub row_count: u32,
    pub col_count: u32,
}

/// Outcome of a successful save.
#[derive(Debug, Clone, Serialize)]
pub struct SaveSummary {
    pub workbook: PathBuf,
    pub rows_appended: usize,
    pub created_workbook: bool,
}

/// Persistence-layer errors
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistenceError {
    pub message: String,
    pub error_type: PersistenceErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PersistenceErrorType {
    InvalidRequest,
    UnknownCategory,
    InvalidInvoice,
    SheetNotFound,
    ItemProcessing,
    StorageIo,
}

impl PersistenceErrorType {
    /// HTTP status the boundary API reports for this error class:
    /// 400 for request-shape problems, 500 for persistence failures.
    pub fn http_status(self) -> u16 {
        match self {
            PersistenceErrorType::InvalidRequest
            | PersistenceErrorType::UnknownCategory
            | PersistenceErrorType::InvalidInvoice => 400,
            PersistenceErrorType::SheetNotFound
            | PersistenceErrorType::ItemProcessing
            | PersistenceErrorType::StorageIo => 500,
        }
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PersistenceError {}

impl PersistenceError {
    pub fn new(message: impl Into<String>, error_type: PersistenceErrorType) -> Self {
        PersistenceError {
            message: message.into(),
            error_type,
            item_index: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        PersistenceError::new(message, PersistenceErrorType::InvalidRequest)
    }

    pub fn unknown_category(tag: &str) -> Self {
        PersistenceError::new(
            format!("Invalid category value '{}'. Must be one of: Patti, Kata, Barthe", tag),
            PersistenceErrorType::UnknownCategory,
        )
    }

    pub fn invalid_invoice(message: impl Into<String>) -> Self {
        PersistenceError::new(message, PersistenceErrorType::InvalidInvoice)
    }

    pub fn sheet_not_found(sheet: &str) -> Self {
        PersistenceError::new(
            format!("Sheet {} not found", sheet),
            PersistenceErrorType::SheetNotFound,
        )
    }

    pub fn item_processing(index: usize, cause: impl std::fmt::Display) -> Self {
        PersistenceError {
            message: format!("Failed to process item {}: {}", index + 1, cause),
            error_type: PersistenceErrorType::ItemProcessing,
            item_index: Some(index),
        }
    }

    pub fn storage_io(message: impl Into<String>) -> Self {
        PersistenceError::new(message, PersistenceErrorType::StorageIo)
    }
}
