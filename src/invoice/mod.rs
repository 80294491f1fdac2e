//! Invoice domain types.
//!
//! This module provides:
//! - The three business categories and their parse rules
//! - Typed line items, one shape per category
//! - The invoice envelope accepted from the UI

pub mod types;

pub use types::{BartheItem, Category, Invoice, KataItem, LineItem, PattiItem};
