use serde_json::json;

use super::models::{FromRow, RowError, SpreadsheetData, ValueRange};
use super::token::{TokenError, TokenManager};

const SPREADSHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const VALUE_INPUT_OPTION: &str = "USER_ENTERED";

#[derive(Debug)]
pub enum SheetsError {
    /// No access token could be obtained.
    Token(TokenError),
    /// The Sheets API rejected the request or was unreachable.
    Network(reqwest::Error),
    /// A returned row did not match the expected schema.
    Row(RowError),
}

impl std::fmt::Display for SheetsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsError::Token(e) => write!(f, "token error: {e}"),
            SheetsError::Network(e) => write!(f, "spreadsheet request failed: {e}"),
            SheetsError::Row(e) => write!(f, "malformed spreadsheet row: {e}"),
        }
    }
}

impl std::error::Error for SheetsError {}

impl From<TokenError> for SheetsError {
    fn from(e: TokenError) -> Self {
        SheetsError::Token(e)
    }
}

impl From<reqwest::Error> for SheetsError {
    fn from(e: reqwest::Error) -> Self {
        SheetsError::Network(e)
    }
}

impl From<RowError> for SheetsError {
    fn from(e: RowError) -> Self {
        SheetsError::Row(e)
    }
}

/// Reads and writes value ranges of one spreadsheet.
pub struct SpreadsheetManager {
    http: reqwest::Client,
    token_manager: TokenManager,
    spreadsheet_id: String,
}

impl SpreadsheetManager {
    pub fn new(
        token_manager: TokenManager,
        spreadsheet_id: String,
        http: reqwest::Client,
    ) -> Self {
        Self {
            http,
            token_manager,
            spreadsheet_id,
        }
    }

    /// Fetches a range and parses every row through `T`'s schema.
    pub async fn get_range<T: FromRow>(
        &self,
        target_range: &str,
    ) -> Result<SpreadsheetData<T>, SheetsError> {
        tracing::debug!("Fetching range {target_range}");
        let token = self.token_manager.get_token().await?;
        let url = format!(
            "{SPREADSHEETS_BASE_URL}/{}/values/{target_range}",
            self.spreadsheet_id
        );

        let range = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json::<ValueRange>()
            .await?;
        tracing::debug!("Received range: {range:?}");

        let mut values = Vec::with_capacity(range.values.len());
        for row in &range.values {
            values.push(T::from_row(row)?);
        }

        Ok(SpreadsheetData {
            target_range: range.range,
            major_dimension: range.major_dimension,
            values,
        })
    }

    /// Writes a block of values into a range, interpreting cells the way
    /// the Sheets UI would.
    pub async fn update_range(
        &self,
        target_range: &str,
        values: Vec<Vec<String>>,
    ) -> Result<(), SheetsError> {
        if values.is_empty() {
            tracing::warn!("No values provided for update.");
            return Ok(());
        }

        tracing::debug!("Updating range {target_range}");
        let token = self.token_manager.get_token().await?;
        let url = format!(
            "{SPREADSHEETS_BASE_URL}/{}/values/{target_range}",
            self.spreadsheet_id
        );
        let body = json!({
            "range": target_range,
            "majorDimension": major_dimension(&values),
            "values": values,
        });

        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", VALUE_INPUT_OPTION)])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;
        tracing::debug!("Update response: {response}");

        Ok(())
    }
}

// A wide, short block is row-major; a tall, narrow one is column-major.
fn major_dimension(values: &[Vec<String>]) -> &'static str {
    if values.len() <= values[0].len() {
        "ROWS"
    } else {
        "COLUMNS"
    }
}
