use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three business-document types. Each one owns a sheet in the daily
/// workbook and a fixed column schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Patti,
    Kata,
    Barthe,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Patti, Category::Kata, Category::Barthe];

    /// Sheet name inside the daily workbook.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Category::Patti => "Patti",
            Category::Kata => "Kata",
            Category::Barthe => "Barthe",
        }
    }

    /// Exact-match parse of a category tag. Anything outside the three
    /// enumerated tags is rejected, including case variants.
    pub fn parse(tag: &str) -> Option<Category> {
        match tag {
            "Patti" => Some(Category::Patti),
            "Kata" => Some(Category::Kata),
            "Barthe" => Some(Category::Barthe),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// One Patti line item. Missing numeric fields default to 0, missing
/// strings to empty, matching what the entry form sends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PattiItem {
    pub item: String,
    pub packet: f64,
    pub quantity: f64,
    pub rate: f64,
    pub hamali: f64,
    pub amount: f64,
}

/// One Kata line item. The batch-level aggregates (`kataAmount`, `total`)
/// are not part of the item; they live on the invoice envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KataItem {
    pub item: String,
    pub net_weight: f64,
    pub less_percent: f64,
    pub final_weight: f64,
    pub rate: f64,
    pub packets: f64,
    pub hamali_rate: f64,
    pub amount: f64,
}

/// One Barthe line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BartheItem {
    pub item: String,
    pub packet: f64,
    pub weight: f64,
    pub adjustment: f64,
    pub quantity: f64,
    pub rate: f64,
    pub hamali_rate: f64,
    pub amount: f64,
}

/// A line item narrowed to its category's shape. The appender maps every
/// raw item into exactly one of these before any cell is written.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItem {
    Patti(PattiItem),
    Kata(KataItem),
    Barthe(BartheItem),
}

impl LineItem {
    /// Interpret a raw item value in the context of a category.
    pub fn from_value(
        category: Category,
        value: &serde_json::Value,
    ) -> Result<LineItem, serde_json::Error> {
        match category {
            Category::Patti => serde_json::from_value(value.clone()).map(LineItem::Patti),
            Category::Kata => serde_json::from_value(value.clone()).map(LineItem::Kata),
            Category::Barthe => serde_json::from_value(value.clone()).map(LineItem::Barthe),
        }
    }
}

/// The invoice envelope as submitted by the entry form.
///
/// `items` stays as raw JSON values here: `null` entries are legal (they are
/// skipped during the append), and a malformed entry must be reported with
/// its index rather than failing the envelope parse. A missing or non-array
/// `items` field is a hard input error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub date: NaiveDate,
    #[serde(default)]
    pub customer_name: String,
    pub items: Vec<serde_json::Value>,
    /// Kata-only batch aggregate, written to the first row of the batch.
    #[serde(default)]
    pub additional_amount: f64,
    /// Kata-only batch aggregate, written to the first row of the batch.
    #[serde(default)]
    pub grand_total: f64,
}
