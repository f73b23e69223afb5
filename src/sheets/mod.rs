pub mod client;
pub mod models;
pub mod token;

pub use client::{SheetsError, SpreadsheetManager};
pub use models::{FromRow, RowError, SpreadsheetData, ValueRange};
pub use token::{TokenError, TokenManager, GCP_CREDENTIALS_FILENAME};
