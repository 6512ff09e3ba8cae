//! Command-line and environment configuration.
use chrono::format::{Item, StrftimeItems};
use clap::Parser;

use crate::api::DEFAULT_API_URL;
use crate::app::DEFAULT_DATE_FORMAT;

#[derive(Clone, Debug, Parser)]
#[command(
    name = "userboard",
    version,
    about = "Manage UserBoard users from the terminal"
)]
pub struct Settings {
    /// Base URL of the UserBoard API.
    #[arg(
        long = "api-url",
        env = "USERBOARD_API_URL",
        default_value = DEFAULT_API_URL
    )]
    pub api_url: String,

    /// Theme file (created with defaults if missing).
    #[arg(long = "theme", default_value = "theme.conf")]
    pub theme_path: String,

    /// Keybindings file (created with defaults if missing).
    #[arg(long = "keybinds", default_value = "keybinds.conf")]
    pub keybinds_path: String,

    /// Where log output goes; the terminal itself is owned by the UI.
    #[arg(
        long = "log-file",
        env = "USERBOARD_LOG_FILE",
        default_value = "userboard.log"
    )]
    pub log_file: String,

    /// strftime pattern for the Date of Birth column.
    #[arg(
        long = "date-format",
        default_value = DEFAULT_DATE_FORMAT,
        value_parser = parse_date_format
    )]
    pub date_format: String,
}

impl Settings {
    /// API URL without trailing slashes.
    pub fn normalized(mut self) -> Self {
        self.api_url = self.api_url.trim_end_matches('/').to_string();
        self
    }
}

/// Accept only patterns chrono can format.
fn parse_date_format(pattern: &str) -> Result<String, String> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid strftime pattern: {pattern}"));
    }
    Ok(pattern.to_string())
}
