use umya_spreadsheet::Spreadsheet;

use super::schema::{column_letter, schema_for};
use crate::invoice::Category;

/// Build a fresh, empty workbook containing one sheet per category, each
/// with its header row and column widths set from the schema registry and
/// zero data rows.
///
/// This only constructs an in-memory structure; nothing is written to disk.
/// Callers must persist it only when the day's file does not exist yet,
/// otherwise they would wipe out prior rows.
pub fn initialize() -> Spreadsheet {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();

    for category in Category::ALL {
        if let Ok(sheet) = book.new_sheet(category.sheet_name()) {
            for (idx, column) in schema_for(category).iter().enumerate() {
                let col_num = (idx + 1) as u32;
                sheet.get_cell_mut((col_num, 1)).set_value(column.header);
                sheet
                    .get_column_dimension_mut(&column_letter(idx as u32))
                    .set_width(column.width);
            }
        }
    }

    book
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_has_all_three_sheets() {
        let book = initialize();
        for category in Category::ALL {
            assert!(book.get_sheet_by_name(category.sheet_name()).is_some());
        }
        assert_eq!(book.get_sheet_count(), 3);
    }

    #[test]
    fn test_initialize_sets_column_widths() {
        let book = initialize();
        let sheet = book.get_sheet_by_name("Kata").unwrap();
        // Customer Name column
        let width = sheet.get_column_dimension("B").map(|c| *c.get_width());
        assert_eq!(width, Some(20.0));
    }

    #[test]
    fn test_initialize_headers_in_schema_order() {
        let book = initialize();
        for category in Category::ALL {
            let sheet = book.get_sheet_by_name(category.sheet_name()).unwrap();
            // Header row only, no data rows
            assert_eq!(sheet.get_highest_row(), 1);
            for (idx, column) in schema_for(category).iter().enumerate() {
                let col_num = (idx + 1) as u32;
                let value = sheet
                    .get_cell((col_num, 1))
                    .map(|c| c.get_value().to_string())
                    .unwrap_or_default();
                assert_eq!(value, column.header);
            }
        }
    }
}
