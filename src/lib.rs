pub mod commands;
pub mod config;
pub mod sheets;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

pub struct Data {
    pub spreadsheet_manager: sheets::SpreadsheetManager,
}
