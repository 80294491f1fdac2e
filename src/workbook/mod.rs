//! Workbook persistence for daily invoice data.
//!
//! This module provides:
//! - Locating the workbook file for a calendar day
//! - The fixed column schemas for the three category sheets
//! - Initializing a fresh workbook with all three sheets
//! - Appending an invoice's line items via a full read-modify-write cycle
//! - Reading sheets back for inspection

pub mod appender;
pub mod init;
pub mod locator;
pub mod reader;
pub mod schema;
pub mod types;

pub use appender::InvoiceAppender;
pub use init::initialize;
pub use locator::{default_data_dir, WorkbookLocator};
pub use reader::{read_rows, sheet_overview};
pub use schema::{column_letter, schema_for, Column, ColumnKind};
pub use types::{CellData, PersistenceError, PersistenceErrorType, SaveSummary, SheetOverview};
