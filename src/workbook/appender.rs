use std::fs;
use tracing::{debug, info, warn};
use umya_spreadsheet::{reader, writer, Worksheet};

use super::init;
use super::locator::WorkbookLocator;
use super::schema::schema_for;
use super::types::{CellData, PersistenceError, SaveSummary};
use crate::invoice::{Category, Invoice, LineItem};

/// Display format applied to every numeric cell.
const NUMBER_FORMAT: &str = "#,##0.00";

/// Fixed render for invoice dates. Every row of a batch carries the same
/// rendered string.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Appends invoices to the day's workbook via a full read-modify-write
/// cycle: the whole file is loaded (or a fresh workbook initialized), rows
/// are added to the category's sheet, and the whole file is written back.
///
/// There is no file locking here; callers that may submit saves
/// concurrently must serialize them, or the last writer's rewrite wins.
#[derive(Debug, Clone)]
pub struct InvoiceAppender {
    locator: WorkbookLocator,
}

impl InvoiceAppender {
    pub fn new(locator: WorkbookLocator) -> Self {
        InvoiceAppender { locator }
    }

    pub fn locator(&self) -> &WorkbookLocator {
        &self.locator
    }

    /// Append one invoice's line items to the sheet for `category` in the
    /// workbook of the invoice's calendar day.
    ///
    /// `null` entries in `items` are skipped without failing the batch; any
    /// other per-item mapping failure aborts the whole append before a
    /// single byte reaches disk. Prior sheets and rows are preserved
    /// verbatim.
    pub fn append(
        &self,
        category: Category,
        invoice: &Invoice,
    ) -> Result<SaveSummary, PersistenceError> {
        let path = self.locator.locate(invoice.date);
        let creating = !path.exists();

        info!(workbook = %path.display(), %category, "saving invoice");

        let mut book = if creating {
            debug!("creating new workbook");
            init::initialize()
        } else {
            debug!("loading existing workbook");
            reader::xlsx::read(&path).map_err(|e| {
                PersistenceError::storage_io(format!("Failed to open workbook: {}", e))
            })?
        };

        // Resolve the target sheet before touching anything. A day file
        // without the expected sheet is corrupted or foreign.
        if book.get_sheet_by_name(category.sheet_name()).is_none() {
            return Err(PersistenceError::sheet_not_found(category.sheet_name()));
        }

        if invoice.customer_name.is_empty() {
            warn!("customer name is empty");
        }

        let rows = render_batch(category, invoice)?;
        debug!(
            items = invoice.items.len(),
            rows = rows.len(),
            "mapped line items"
        );

        let sheet = book
            .get_sheet_by_name_mut(category.sheet_name())
            .ok_or_else(|| PersistenceError::sheet_not_found(category.sheet_name()))?;

        let mut row_num = sheet.get_highest_row() + 1;
        for cells in &rows {
            write_row(sheet, row_num, cells);
            row_num += 1;
        }

        fs::create_dir_all(self.locator.data_dir()).map_err(|e| {
            PersistenceError::storage_io(format!("Failed to create data directory: {}", e))
        })?;

        writer::xlsx::write(&book, &path).map_err(|e| {
            PersistenceError::storage_io(format!("Failed to save workbook: {}", e))
        })?;

        info!(rows = rows.len(), "save completed");

        Ok(SaveSummary {
            workbook: path,
            rows_appended: rows.len(),
            created_workbook: creating,
        })
    }
}

/// Map every line item of the invoice to a renderable row, in order,
/// skipping `null` entries. The first non-skipped Kata row carries the
/// batch aggregates; later rows carry zeros.
fn render_batch(
    category: Category,
    invoice: &Invoice,
) -> Result<Vec<Vec<CellData>>, PersistenceError> {
    let date = invoice.date.format(DATE_FORMAT).to_string();
    let mut rows = Vec::new();
    let mut first_in_batch = true;

    for (index, raw) in invoice.items.iter().enumerate() {
        if raw.is_null() {
            continue;
        }

        let item = LineItem::from_value(category, raw)
            .map_err(|e| PersistenceError::item_processing(index, e))?;
        rows.push(render_row(&date, invoice, &item, first_in_batch));
        first_in_batch = false;
    }

    Ok(rows)
}

/// Render one line item into cells, in the exact order of the category's
/// column schema.
fn render_row(
    date: &str,
    invoice: &Invoice,
    item: &LineItem,
    first_in_batch: bool,
) -> Vec<CellData> {
    let text = |s: &str| CellData::Text(s.to_string());
    let num = CellData::Number;

    let cells = match item {
        LineItem::Patti(it) => vec![
            text(date),
            text(&invoice.customer_name),
            text(&it.item),
            num(it.packet),
            num(it.quantity),
            num(it.rate),
            num(it.hamali),
            num(it.amount),
        ],
        LineItem::Kata(it) => vec![
            text(date),
            text(&invoice.customer_name),
            text(&it.item),
            num(it.net_weight),
            num(it.less_percent),
            num(it.final_weight),
            num(it.rate),
            num(it.packets),
            num(it.hamali_rate),
            num(it.amount),
            num(if first_in_batch { invoice.additional_amount } else { 0.0 }),
            num(if first_in_batch { invoice.grand_total } else { 0.0 }),
        ],
        LineItem::Barthe(it) => vec![
            text(date),
            text(&invoice.customer_name),
            text(&it.item),
            num(it.packet),
            num(it.weight),
            num(it.adjustment),
            num(it.quantity),
            num(it.rate),
            num(it.hamali_rate),
            num(it.amount),
        ],
    };

    debug_assert_eq!(cells.len(), schema_for(category_of(item)).len());
    cells
}

fn category_of(item: &LineItem) -> Category {
    match item {
        LineItem::Patti(_) => Category::Patti,
        LineItem::Kata(_) => Category::Kata,
        LineItem::Barthe(_) => Category::Barthe,
    }
}

/// Write one row of cells, applying the two-decimal display format to
/// numeric cells.
fn write_row(sheet: &mut Worksheet, row_num: u32, cells: &[CellData]) {
    for (idx, cell) in cells.iter().enumerate() {
        let col_num = (idx + 1) as u32;
        let target = sheet.get_cell_mut((col_num, row_num));

        match cell {
            CellData::Empty => {}
            CellData::Text(s) => {
                target.set_value(s);
            }
            CellData::Number(n) => {
                target.set_value_number(*n);
                target
                    .get_style_mut()
                    .get_number_format_mut()
                    .set_format_code(NUMBER_FORMAT);
            }
        }
    }
}
