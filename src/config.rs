use std::env;

use tracing::Level;

pub struct Config {
    pub token: String,
    pub spreadsheet_id: String,
    pub guild_id: Option<u64>,
    pub log_level: Level,
}

/// Errors that prevent the bot from starting.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is not set.
    Missing(&'static str),
    /// An optional environment variable is set to an unusable value.
    Invalid(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => {
                write!(f, "environment variable {key} not found")
            }
            ConfigError::Invalid(key, value) => {
                write!(f, "environment variable {key} has an invalid value: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// `DISCORD_TOKEN` and `SPREADSHEET_ID` are required. `DISCORD_GUILD_ID`
    /// (numeric, scopes command registration to one guild) and `LOG_LEVEL`
    /// (DEBUG/INFO/WARNING/ERROR/CRITICAL, default INFO) are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = getenv_or_err("DISCORD_TOKEN")?;
        let spreadsheet_id = getenv_or_err("SPREADSHEET_ID")?;

        let guild_id = match env::var("DISCORD_GUILD_ID") {
            Ok(raw) => match raw.parse::<u64>() {
                // Serenity's GuildId does not accept zero.
                Ok(0) | Err(_) => {
                    return Err(ConfigError::Invalid("DISCORD_GUILD_ID", raw));
                }
                Ok(id) => Some(id),
            },
            Err(_) => None,
        };

        let log_level = env::var("LOG_LEVEL")
            .map(|raw| parse_log_level(&raw))
            .unwrap_or(Level::INFO);

        Ok(Self {
            token,
            spreadsheet_id,
            guild_id,
            log_level,
        })
    }
}

fn getenv_or_err(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

/// Maps a `LOG_LEVEL` value to a tracing level.
///
/// Names are matched case-insensitively; CRITICAL maps to ERROR (tracing has
/// no critical level) and unrecognized values fall back to INFO.
fn parse_log_level(raw: &str) -> Level {
    match raw.to_ascii_uppercase().as_str() {
        "DEBUG" => Level::DEBUG,
        "INFO" => Level::INFO,
        "WARNING" => Level::WARN,
        "ERROR" => Level::ERROR,
        "CRITICAL" => Level::ERROR,
        _ => Level::INFO,
    }
}
