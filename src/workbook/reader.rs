use calamine::{open_workbook_auto, Data, Reader, Sheets};
use std::path::Path;

use super::types::{CellData, PersistenceError, SheetOverview};

/// List the sheets of a workbook file with their sizes.
pub fn sheet_overview(path: &Path) -> Result<Vec<SheetOverview>, PersistenceError> {
    if !path.exists() {
        return Err(PersistenceError::storage_io(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| PersistenceError::storage_io(format!("Failed to open workbook: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::new();

    for (index, name) in sheet_names.iter().enumerate() {
        if let Ok(range) = workbook.worksheet_range(name) {
            let (rows, cols) = range.get_size();
            sheets.push(SheetOverview {
                name: name.clone(),
                index: index as u32,
                row_count: rows as u32,
                col_count: cols as u32,
            });
        }
    }

    Ok(sheets)
}

/// Read every cell of one sheet, header row included.
pub fn read_rows(path: &Path, sheet: &str) -> Result<Vec<Vec<CellData>>, PersistenceError> {
    if !path.exists() {
        return Err(PersistenceError::storage_io(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| PersistenceError::storage_io(format!("Failed to open workbook: {}", e)))?;

    if !workbook.sheet_names().contains(&sheet.to_string()) {
        return Err(PersistenceError::sheet_not_found(sheet));
    }

    let range = workbook.worksheet_range(sheet).map_err(|e| {
        PersistenceError::storage_io(format!("Failed to read sheet '{}': {}", sheet, e))
    })?;

    let (row_count, col_count) = range.get_size();
    let mut rows = Vec::with_capacity(row_count);

    for row_idx in 0..row_count {
        let mut row = Vec::with_capacity(col_count);
        for col_idx in 0..col_count {
            row.push(convert_cell(range.get((row_idx, col_idx))));
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Convert calamine Data to our CellData
fn convert_cell(cell: Option<&Data>) -> CellData {
    match cell {
        None => CellData::Empty,
        Some(data) => match data {
            Data::Empty => CellData::Empty,
            Data::String(s) => CellData::Text(s.clone()),
            Data::Float(f) => CellData::Number(*f),
            Data::Int(i) => CellData::Number(*i as f64),
            Data::Bool(b) => CellData::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
            Data::DateTime(dt) => CellData::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellData::Text(s.clone()),
            Data::Error(e) => CellData::Text(format!("{:?}", e)),
        },
    }
}
