//! Startup configuration, read once from flags or the environment.

use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "wishlist_dashboard",
    about = "Wishlist dashboard backed by a published spreadsheet"
)]
pub struct AppConfig {
    /// Spreadsheet share URL (`.../edit#gid=N`)
    #[arg(long = "sheets-url", env = "SHEETS_URL")]
    pub sheets_url: String,

    /// Window and header title
    #[arg(long, default_value = "Wishlist")]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_parsed() {
        let config = AppConfig::try_parse_from([
            "wishlist_dashboard",
            "--sheets-url",
            "https://docs.google.com/spreadsheets/d/abc/edit#gid=0",
            "--title",
            "Birthday",
        ])
        .unwrap();
        assert_eq!(
            config.sheets_url,
            "https://docs.google.com/spreadsheets/d/abc/edit#gid=0"
        );
        assert_eq!(config.title, "Birthday");
    }

    #[test]
    fn title_has_a_default() {
        let config =
            AppConfig::try_parse_from(["wishlist_dashboard", "--sheets-url", "https://x"]).unwrap();
        assert_eq!(config.title, "Wishlist");
    }
}
