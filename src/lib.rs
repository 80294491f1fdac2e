//! Persistence engine behind a daily invoice entry app.
//!
//! Line items entered against one of three business categories (Patti,
//! Kata, Barthe) are appended to an Excel workbook per calendar day, one
//! sheet per category. The [`gateway::PersistenceGateway`] is the only
//! surface the UI shell talks to; everything below it is the
//! load-or-initialize, append, rewrite cycle in [`workbook`].

pub mod gateway;
pub mod invoice;
pub mod workbook;

pub use gateway::{PersistenceGateway, SaveResponse};
pub use invoice::{Category, Invoice};
pub use workbook::{PersistenceError, PersistenceErrorType, SaveSummary};
