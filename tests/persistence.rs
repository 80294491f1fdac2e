//! End-to-end tests of the save path: gateway -> appender -> workbook file.

use chrono::NaiveDate;
use gv_invoice::gateway::PersistenceGateway;
use gv_invoice::invoice::Category;
use gv_invoice::workbook::{self, initialize, schema_for, CellData, WorkbookLocator};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

const DAY: &str = "2024-06-01";

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn request(category: &str, items: Value) -> Value {
    json!({
        "category": category,
        "invoice": {
            "date": DAY,
            "customerName": "SHIVU TRADERS",
            "items": items,
            "additionalAmount": 50,
            "grandTotal": 500
        }
    })
}

fn workbook_path(dir: &Path) -> std::path::PathBuf {
    WorkbookLocator::new(dir).locate(day())
}

fn data_rows(path: &Path, category: Category) -> Vec<Vec<CellData>> {
    let mut rows = workbook::read_rows(path, category.sheet_name()).unwrap();
    rows.remove(0); // header
    rows
}

#[test]
fn initialized_workbook_has_three_empty_sheets_with_exact_headers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("invoice_2024-06-01.xlsx");

    let book = initialize();
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

    let sheets = workbook::sheet_overview(&path).unwrap();
    let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Patti", "Kata", "Barthe"]);

    for category in Category::ALL {
        let rows = workbook::read_rows(&path, category.sheet_name()).unwrap();
        // Header row only, zero data rows
        assert_eq!(rows.len(), 1);
        let headers: Vec<&str> = rows[0].iter().filter_map(|c| c.as_text()).collect();
        let expected: Vec<&str> = schema_for(category).iter().map(|c| c.header).collect();
        assert_eq!(headers, expected);
    }
}

#[test]
fn saving_twice_appends_in_order() {
    let dir = TempDir::new().unwrap();
    let gateway = PersistenceGateway::new(dir.path());

    let first = gateway.save(&request(
        "Patti",
        json!([
            { "item": "MAIZE", "quantity": 10, "rate": 2250 },
            { "item": "RAGI", "quantity": 5, "rate": 3100 }
        ]),
    ));
    assert!(first.is_success(), "first save failed");

    let second = gateway.save(&request(
        "Patti",
        json!([{ "item": "WHEAT", "quantity": 2, "rate": 2800 }]),
    ));
    assert!(second.is_success(), "second save failed");

    let rows = data_rows(&workbook_path(dir.path()), Category::Patti);
    assert_eq!(rows.len(), 3);

    let items: Vec<&str> = rows.iter().filter_map(|r| r[2].as_text()).collect();
    assert_eq!(items, ["MAIZE", "RAGI", "WHEAT"]);
}

#[test]
fn kata_aggregates_land_on_first_row_of_batch_only() {
    let dir = TempDir::new().unwrap();
    let gateway = PersistenceGateway::new(dir.path());

    let response = gateway.save(&request(
        "Kata",
        json!([
            { "item": "MAIZE", "netWeight": 120 },
            { "item": "RAGI", "netWeight": 80 },
            { "item": "WHEAT", "netWeight": 40 }
        ]),
    ));
    assert!(response.is_success());

    let rows = data_rows(&workbook_path(dir.path()), Category::Kata);
    assert_eq!(rows.len(), 3);

    // kataAmount and total are the last two Kata columns
    assert_eq!(rows[0][10].as_number(), Some(50.0));
    assert_eq!(rows[0][11].as_number(), Some(500.0));
    for row in &rows[1..] {
        assert_eq!(row[10].as_number(), Some(0.0));
        assert_eq!(row[11].as_number(), Some(0.0));
    }
}

#[test]
fn null_items_are_skipped_and_order_preserved() {
    let dir = TempDir::new().unwrap();
    let gateway = PersistenceGateway::new(dir.path());

    let response = gateway.save(&request(
        "Patti",
        json!([
            { "item": "MAIZE" },
            null,
            { "item": "WHEAT" }
        ]),
    ));
    assert!(response.is_success());

    let rows = data_rows(&workbook_path(dir.path()), Category::Patti);
    assert_eq!(rows.len(), 2);
    let items: Vec<&str> = rows.iter().filter_map(|r| r[2].as_text()).collect();
    assert_eq!(items, ["MAIZE", "WHEAT"]);
}

#[test]
fn unknown_category_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let gateway = PersistenceGateway::new(dir.path());

    let response = gateway.save(&request("Unknown", json!([{ "item": "MAIZE" }])));
    assert!(!response.is_success());
    assert_eq!(response.status_code(), 400);

    assert!(!workbook_path(dir.path()).exists());
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(entries.is_empty());
}

#[test]
fn malformed_item_aborts_whole_batch_without_writing() {
    let dir = TempDir::new().unwrap();
    let gateway = PersistenceGateway::new(dir.path());

    let response = gateway.save(&request(
        "Patti",
        json!([{ "item": "MAIZE" }, "not an object"]),
    ));
    assert!(!response.is_success());
    assert_eq!(response.status_code(), 500);
    assert!(!workbook_path(dir.path()).exists());
}

#[test]
fn foreign_workbook_without_expected_sheet_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = workbook_path(dir.path());

    // A file already sits at the day's path but was not produced by this
    // tool: it has none of the category sheets.
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    book.new_sheet("Other").unwrap();
    umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

    let gateway = PersistenceGateway::new(dir.path());
    let response = gateway.save(&request("Patti", json!([{ "item": "MAIZE" }])));
    assert!(!response.is_success());
    assert_eq!(response.status_code(), 500);

    let wire = serde_json::to_value(&response).unwrap();
    assert_eq!(wire["details"]["errorType"], "SheetNotFound");

    // the foreign file is left untouched
    let sheets = workbook::sheet_overview(&path).unwrap();
    let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Other"]);
}

#[test]
fn unreadable_workbook_file_reports_storage_error() {
    let dir = TempDir::new().unwrap();
    let path = workbook_path(dir.path());
    std::fs::write(&path, b"not a workbook").unwrap();

    let gateway = PersistenceGateway::new(dir.path());
    let response = gateway.save(&request("Patti", json!([{ "item": "MAIZE" }])));
    assert!(!response.is_success());
    assert_eq!(response.status_code(), 500);

    let wire = serde_json::to_value(&response).unwrap();
    assert_eq!(wire["details"]["errorType"], "StorageIo");

    // no retry and no rewrite; the bytes on disk are untouched
    assert_eq!(std::fs::read(&path).unwrap(), b"not a workbook");
}

#[test]
fn existing_rows_survive_later_appends_unchanged() {
    let dir = TempDir::new().unwrap();
    let gateway = PersistenceGateway::new(dir.path());

    let items: Vec<Value> = (0..5)
        .map(|i| json!({ "item": format!("ITEM-{i}"), "quantity": i, "rate": 100 + i }))
        .collect();
    assert!(gateway.save(&request("Patti", Value::Array(items))).is_success());

    let before = workbook::read_rows(&workbook_path(dir.path()), "Patti").unwrap();
    assert_eq!(before.len(), 6); // header + 5

    let response = gateway.save(&request(
        "Patti",
        json!([{ "item": "NEW-1" }, { "item": "NEW-2" }]),
    ));
    assert!(response.is_success());

    let after = workbook::read_rows(&workbook_path(dir.path()), "Patti").unwrap();
    assert_eq!(after.len(), 8);
    assert_eq!(&after[..6], &before[..]);
}

#[test]
fn other_sheets_are_preserved_across_saves() {
    let dir = TempDir::new().unwrap();
    let gateway = PersistenceGateway::new(dir.path());

    assert!(gateway
        .save(&request("Kata", json!([{ "item": "MAIZE" }])))
        .is_success());
    assert!(gateway
        .save(&request("Barthe", json!([{ "item": "RAGI" }])))
        .is_success());

    let path = workbook_path(dir.path());
    assert_eq!(data_rows(&path, Category::Kata).len(), 1);
    assert_eq!(data_rows(&path, Category::Barthe).len(), 1);
    assert_eq!(data_rows(&path, Category::Patti).len(), 0);
}

#[test]
fn numeric_cells_get_two_decimal_format_and_zero_defaults() {
    let dir = TempDir::new().unwrap();
    let gateway = PersistenceGateway::new(dir.path());

    // hamali omitted on purpose; it must persist as a formatted zero
    let response = gateway.save(&request(
        "Patti",
        json!([{ "item": "MAIZE", "rate": 1234.5 }]),
    ));
    assert!(response.is_success());

    let path = workbook_path(dir.path());
    let rows = data_rows(&path, Category::Patti);
    assert_eq!(rows[0][5].as_number(), Some(1234.5)); // Rate
    assert_eq!(rows[0][6].as_number(), Some(0.0)); // Hamali, defaulted

    let book = umya_spreadsheet::reader::xlsx::read(&path).unwrap();
    let sheet = book.get_sheet_by_name("Patti").unwrap();
    for col in [4u32, 5, 6, 7, 8] {
        let cell = sheet.get_cell((col, 2u32)).unwrap();
        let format = cell
            .get_style()
            .get_number_format()
            .as_ref()
            .map(|f| f.get_format_code().to_string())
            .unwrap_or_default();
        assert_eq!(format, "#,##0.00", "column {col} lacks the number format");
    }
}

#[test]
fn empty_items_creates_the_day_workbook_with_no_rows() {
    let dir = TempDir::new().unwrap();
    let gateway = PersistenceGateway::new(dir.path());

    let response = gateway.save(&request("Patti", json!([])));
    assert!(response.is_success());

    let path = workbook_path(dir.path());
    assert!(path.exists());
    for category in Category::ALL {
        assert_eq!(data_rows(&path, category).len(), 0);
    }
}

#[test]
fn rows_of_one_invoice_share_the_rendered_date() {
    let dir = TempDir::new().unwrap();
    let gateway = PersistenceGateway::new(dir.path());

    assert!(gateway
        .save(&request(
            "Patti",
            json!([{ "item": "MAIZE" }, { "item": "RAGI" }])
        ))
        .is_success());

    let rows = data_rows(&workbook_path(dir.path()), Category::Patti);
    for row in &rows {
        assert_eq!(row[0].as_text(), Some("01/06/2024"));
        assert_eq!(row[1].as_text(), Some("SHIVU TRADERS"));
    }
}

#[test]
fn concurrent_saves_through_one_gateway_lose_no_rows() {
    let dir = TempDir::new().unwrap();
    let gateway = std::sync::Arc::new(PersistenceGateway::new(dir.path()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let gateway = gateway.clone();
            std::thread::spawn(move || {
                gateway.save(&request("Patti", json!([{ "item": format!("T-{i}") }])))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_success());
    }

    let rows = data_rows(&workbook_path(dir.path()), Category::Patti);
    assert_eq!(rows.len(), 4);
}

#[test]
fn different_days_go_to_different_workbooks() {
    let dir = TempDir::new().unwrap();
    let gateway = PersistenceGateway::new(dir.path());

    let mut monday = request("Patti", json!([{ "item": "MAIZE" }]));
    monday["invoice"]["date"] = json!("2024-06-03");
    assert!(gateway.save(&monday).is_success());
    assert!(gateway
        .save(&request("Patti", json!([{ "item": "RAGI" }])))
        .is_success());

    let locator = WorkbookLocator::new(dir.path());
    assert!(locator.locate(day()).exists());
    assert!(locator
        .locate(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
        .exists());

    assert_eq!(data_rows(&locator.locate(day()), Category::Patti).len(), 1);
}
