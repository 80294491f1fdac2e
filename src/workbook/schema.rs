use crate::invoice::Category;

/// Semantic type of a column. Number columns get the two-decimal display
/// format when written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
}

/// One column of a category sheet: display header, wire field key, semantic
/// kind, and display width in characters.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub key: &'static str,
    pub kind: ColumnKind,
    pub width: f64,
}

const fn text(header: &'static str, key: &'static str, width: f64) -> Column {
    Column { header, key, kind: ColumnKind::Text, width }
}

const fn number(header: &'static str, key: &'static str, width: f64) -> Column {
    Column { header, key, kind: ColumnKind::Number, width }
}

const PATTI_COLUMNS: &[Column] = &[
    text("Date", "date", 12.0),
    text("Customer Name", "customerName", 20.0),
    text("Item", "item", 15.0),
    number("Packet", "packet", 10.0),
    number("Quantity", "quantity", 10.0),
    number("Rate", "rate", 10.0),
    number("Hamali", "hamali", 10.0),
    number("Amount", "amount", 12.0),
];

const KATA_COLUMNS: &[Column] = &[
    text("Date", "date", 12.0),
    text("Customer Name", "customerName", 20.0),
    text("Item", "item", 15.0),
    number("Net Weight", "netWeight", 12.0),
    number("Less %", "lessPercent", 10.0),
    number("Final Weight", "finalWeight", 12.0),
    number("Rate", "rate", 10.0),
    number("Packets", "packets", 10.0),
    number("Hamali Rate", "hamaliRate", 12.0),
    number("Amount", "amount", 12.0),
    number("Kata Amount", "kataAmount", 12.0),
    number("Total", "total", 12.0),
];

const BARTHE_COLUMNS: &[Column] = &[
    text("Date", "date", 12.0),
    text("Customer Name", "customerName", 20.0),
    text("Item", "item", 15.0),
    number("Packet", "packet", 10.0),
    number("Weight", "weight", 10.0),
    number("Adjustment", "adjustment", 10.0),
    number("Quantity", "quantity", 12.0),
    number("Rate", "rate", 10.0),
    number("Hamali Rate", "hamaliRate", 12.0),
    number("Amount", "amount", 12.0),
];

/// The fixed column schema for a category's sheet. Order defines physical
/// column order and is stable across writes.
pub fn schema_for(category: Category) -> &'static [Column] {
    match category {
        Category::Patti => PATTI_COLUMNS,
        Category::Kata => KATA_COLUMNS,
        Category::Barthe => BARTHE_COLUMNS,
    }
}

/// Convert column index (0-based) to Excel column letter (A, B, ..., Z, AA, AB, ...)
pub fn column_letter(index: u32) -> String {
    let mut result = String::new();
    let mut n = index + 1;

    while n > 0 {
        n -= 1;
        let c = (b'A' + (n % 26) as u8) as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}
