//! The boundary API the entry UI calls to persist an invoice.
//!
//! The gateway validates the raw request envelope, delegates to the
//! appender, and turns every failure into a structured response instead of
//! a fault. Saves are serialized through an in-process lock because the
//! underlying storage is a whole-file rewrite with no locking of its own.

use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info};

use crate::invoice::{Category, Invoice};
use crate::workbook::{InvoiceAppender, PersistenceError, SaveSummary, WorkbookLocator};

pub struct PersistenceGateway {
    appender: InvoiceAppender,
    // Serializes saves so two requests for the same day cannot race on the
    // read-modify-write cycle and drop each other's rows.
    save_lock: Mutex<()>,
}

impl PersistenceGateway {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        PersistenceGateway {
            appender: InvoiceAppender::new(WorkbookLocator::new(data_dir)),
            save_lock: Mutex::new(()),
        }
    }

    pub fn appender(&self) -> &InvoiceAppender {
        &self.appender
    }

    /// Handle a raw save request: `{ "category": ..., "invoice": ... }`.
    ///
    /// Never panics on bad input; every failure comes back as a structured
    /// error response with its HTTP status.
    pub fn save(&self, request: &Value) -> SaveResponse {
        info!("received save request");

        let (category, invoice) = match parse_request(request) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(status = e.error_type.http_status(), "rejected save request: {}", e);
                return SaveResponse::from(e);
            }
        };

        match self.save_invoice(category, &invoice) {
            Ok(_) => SaveResponse::success(),
            Err(e) => {
                error!(status = e.error_type.http_status(), "save failed: {}", e);
                SaveResponse::from(e)
            }
        }
    }

    /// Typed save path for callers that already hold a parsed invoice.
    pub fn save_invoice(
        &self,
        category: Category,
        invoice: &Invoice,
    ) -> Result<SaveSummary, PersistenceError> {
        let _guard = self
            .save_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.appender.append(category, invoice)
    }
}

/// Validate the request envelope before anything deeper runs.
fn parse_request(request: &Value) -> Result<(Category, Invoice), PersistenceError> {
    let category_value = request
        .get("category")
        .filter(|v| !v.is_null())
        .ok_or_else(|| PersistenceError::invalid_request("Missing category"))?;

    let tag = category_value
        .as_str()
        .ok_or_else(|| PersistenceError::invalid_request("Category must be a string"))?;

    if tag.is_empty() {
        return Err(PersistenceError::invalid_request("Missing category"));
    }

    let category = Category::parse(tag).ok_or_else(|| PersistenceError::unknown_category(tag))?;

    let invoice_value = request
        .get("invoice")
        .filter(|v| !v.is_null())
        .ok_or_else(|| PersistenceError::invalid_request("Missing invoice data"))?;

    let invoice: Invoice = serde_json::from_value(invoice_value.clone())
        .map_err(|e| PersistenceError::invalid_invoice(format!("Invalid invoice: {}", e)))?;

    Ok((category, invoice))
}

/// Wire response of the boundary API: `{"success":true}` on success,
/// `{"error":..., "details":...}` on failure.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SaveResponse {
    Success {
        success: bool,
    },
    Failure {
        error: String,
        details: Value,
        #[serde(skip)]
        status: u16,
    },
}

impl SaveResponse {
    pub fn success() -> Self {
        SaveResponse::Success { success: true }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SaveResponse::Success { .. })
    }

    /// HTTP status the transport layer should report.
    pub fn status_code(&self) -> u16 {
        match self {
            SaveResponse::Success { .. } => 200,
            SaveResponse::Failure { status, .. } => *status,
        }
    }
}

impl From<PersistenceError> for SaveResponse {
    fn from(e: PersistenceError) -> Self {
        let status = e.error_type.http_status();
        let details = serde_json::to_value(&e).unwrap_or(Value::Null);
        SaveResponse::Failure {
            error: e.message,
            details,
            status,
        }
    }
}
