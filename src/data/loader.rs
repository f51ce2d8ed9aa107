//! Wishlist Data Loader Module
//! Fetches the published sheet as CSV and builds the typed wishlist table using Polars.

use crate::data::item::{
    COL_AMOUNT, COL_COMMENTS, COL_DATE_ADDED, COL_DESCRIPTION, COL_EFFICIENCY_RANK, COL_ITEM,
    COL_LINK, COL_PURCHASED, COL_WANT, HELPER_COLUMNS, REQUIRED_COLUMNS,
};
use crate::data::{DataProcessor, SortCriterion, Table, WishlistItem};
use log::{debug, info, warn};
use polars::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use std::io::Cursor;
use thiserror::Error;

const EDIT_FRAGMENT: &str = "/edit#gid=";
const EXPORT_FRAGMENT: &str = "/export?format=csv&gid=";

/// Amounts are stored as Decimal(8, 2).
const AMOUNT_SCALE: u32 = 2;
const MAX_AMOUNT_DIGITS: u32 = 8;

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

const PURCHASED_VALUES: [&str; 6] = ["true", "yes", "y", "1", "x", "✓"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Data source error: {0}")]
    DataSource(String),
    #[error("Missing required column '{0}'")]
    Schema(String),
    #[error("Bad row on line {line}{}: {reason}", column_suffix(.column))]
    Format {
        line: usize,
        /// Unset when the row itself is not valid CSV.
        column: Option<String>,
        reason: String,
    },
}

fn column_suffix(column: &Option<String>) -> String {
    column
        .as_ref()
        .map(|c| format!(", column '{}'", c))
        .unwrap_or_default()
}

/// Loads the wishlist from a published spreadsheet.
pub struct WishlistLoader {
    sheets_url: String,
    client: reqwest::blocking::Client,
}

impl WishlistLoader {
    pub fn new(sheets_url: impl Into<String>) -> Self {
        Self {
            sheets_url: sheets_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// The configured share URL.
    pub fn sheets_url(&self) -> &str {
        &self.sheets_url
    }

    /// Rewrite a share (`/edit#gid=N`) URL into its CSV export form.
    ///
    /// URLs without the edit fragment are returned unchanged.
    pub fn export_url(sheets_url: &str) -> String {
        sheets_url.replace(EDIT_FRAGMENT, EXPORT_FRAGMENT)
    }

    /// Fetch, parse and clean the wishlist. The result is always sorted by
    /// efficiency rank.
    pub fn load(&self) -> Result<Table, LoadError> {
        let url = Self::export_url(&self.sheets_url);
        if url == self.sheets_url {
            warn!("Sheets URL has no '{}' fragment, fetching it as-is", EDIT_FRAGMENT);
        }

        info!("Fetching wishlist export from {}", url);
        let body = self.fetch(&url)?;
        let table = Self::parse_table(body)?;
        info!("Loaded {} wishlist items", table.len());
        Ok(table)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| LoadError::DataSource(format!("request to {} failed: {}", url, e)))?;

        let response = response
            .error_for_status()
            .map_err(|e| LoadError::DataSource(e.to_string()))?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if content_type.starts_with("text/html") {
            return Err(LoadError::DataSource(format!(
                "{} returned an HTML page instead of CSV; is the sheet published?",
                url
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| LoadError::DataSource(format!("failed to read response: {}", e)))?;

        Ok(bytes.to_vec())
    }

    /// Parse CSV text into the cleaned table: purchased rows removed, helper
    /// columns dropped, amounts fixed to two decimals, sorted by rank.
    pub fn parse_table(body: Vec<u8>) -> Result<Table, LoadError> {
        let df = Self::read_csv(body)?;
        Self::validate_columns(&df)?;

        let df = Self::drop_helper_columns(&df);
        debug!("Parsed {} raw rows, columns: {:?}", df.height(), df.get_column_names());

        let items = Self::collect_items(&df)?;
        Ok(DataProcessor::apply_sort(&Table::new(items), SortCriterion::EfficiencyRank))
    }

    /// Read every column as text; ragged rows are truncated or null-padded.
    ///
    /// A missing or unreadable header is a source problem; a broken data row
    /// is a format problem on that row.
    fn read_csv(body: Vec<u8>) -> Result<DataFrame, LoadError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(LoadError::DataSource(
                "response is empty, no header row".to_string(),
            ));
        }
        if looks_like_html(&body) {
            return Err(LoadError::DataSource(
                "response is an HTML page, not CSV; is the sheet published?".to_string(),
            ));
        }

        let header_end = body.iter().position(|b| *b == b'\n').unwrap_or(body.len());
        let header = &body[..header_end];
        if header.iter().all(u8::is_ascii_whitespace) {
            return Err(LoadError::DataSource(
                "first line is blank, no header row".to_string(),
            ));
        }
        if header.iter().filter(|b| **b == b'"').count() % 2 == 1 {
            return Err(LoadError::DataSource(
                "header row has an unterminated quote".to_string(),
            ));
        }
        Self::csv_frame(header.to_vec()).map_err(|e| {
            LoadError::DataSource(format!("header row is not parseable CSV: {}", e))
        })?;

        match Self::csv_frame(body.clone()) {
            Ok(df) => Ok(df),
            Err(e) => {
                let line = Self::locate_bad_line(&body);
                warn!("CSV parsing failed near line {}: {}", line, e);
                Err(LoadError::Format {
                    line,
                    column: None,
                    reason: e.to_string(),
                })
            }
        }
    }

    fn csv_frame(bytes: Vec<u8>) -> PolarsResult<DataFrame> {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_parse_options(CsvParseOptions::default().with_truncate_ragged_lines(true))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
    }

    /// 1-based line of the row that broke parsing.
    ///
    /// An unterminated quote is blamed on the line that opened it. Otherwise
    /// the line after the longest parseable prefix is reported.
    fn locate_bad_line(body: &[u8]) -> usize {
        let lines: Vec<&[u8]> = body.split(|b| *b == b'\n').collect();

        let mut open_since = None;
        for (idx, line) in lines.iter().enumerate() {
            for _ in line.iter().filter(|b| **b == b'"') {
                open_since = match open_since {
                    Some(_) => None,
                    None => Some(idx),
                };
            }
        }
        if let Some(idx) = open_since {
            return idx + 1;
        }

        // lines[..k] holds the header plus k - 1 data rows
        for k in (1..lines.len()).rev() {
            if Self::csv_frame(lines[..k].join(&b'\n')).is_ok() {
                return k + 1;
            }
        }
        2
    }

    fn validate_columns(df: &DataFrame) -> Result<(), LoadError> {
        let columns = df.get_column_names();
        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c.as_str() == required) {
                return Err(LoadError::Schema(required.to_string()));
            }
        }
        Ok(())
    }

    fn drop_helper_columns(df: &DataFrame) -> DataFrame {
        df.drop_many(HELPER_COLUMNS)
    }

    fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<Option<&'a StringChunked>, LoadError> {
        match df.column(name) {
            Ok(column) => column
                .str()
                .map(Some)
                .map_err(|e| LoadError::DataSource(format!("column '{}' is not text: {}", name, e))),
            Err(_) => Ok(None),
        }
    }

    fn collect_items(df: &DataFrame) -> Result<Vec<WishlistItem>, LoadError> {
        let item_col = Self::text_column(df, COL_ITEM)?;
        let amount_col = Self::text_column(df, COL_AMOUNT)?;
        let purchased_col = Self::text_column(df, COL_PURCHASED)?;
        let rank_col = Self::text_column(df, COL_EFFICIENCY_RANK)?;
        let want_col = Self::text_column(df, COL_WANT)?;
        let date_col = Self::text_column(df, COL_DATE_ADDED)?;
        let link_col = Self::text_column(df, COL_LINK)?;
        let desc_col = Self::text_column(df, COL_DESCRIPTION)?;
        let comments_col = Self::text_column(df, COL_COMMENTS)?;

        let all_columns: Vec<&StringChunked> = df
            .get_columns()
            .iter()
            .filter_map(|c| c.str().ok())
            .collect();

        let field = |col: Option<&StringChunked>, i: usize| -> String {
            col.and_then(|c| c.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let mut items = Vec::with_capacity(df.height());
        let mut purchased = 0usize;

        for i in 0..df.height() {
            // Header is line 1
            let line = i + 2;

            let blank_row = all_columns
                .iter()
                .all(|c| c.get(i).map_or(true, |v| v.trim().is_empty()));
            if blank_row {
                continue;
            }

            if is_purchased(&field(purchased_col, i)) {
                purchased += 1;
                continue;
            }

            let format_error = |column: &str, reason: String| LoadError::Format {
                line,
                column: Some(column.to_string()),
                reason,
            };

            let item = field(item_col, i);
            if item.is_empty() {
                return Err(format_error(COL_ITEM, "item name is blank".to_string()));
            }

            let amount = parse_amount(&field(amount_col, i))
                .map_err(|reason| format_error(COL_AMOUNT, reason))?;
            let efficiency_rank = parse_rank(&field(rank_col, i))
                .map_err(|reason| format_error(COL_EFFICIENCY_RANK, reason))?;

            items.push(WishlistItem {
                item,
                amount,
                want: parse_want(&field(want_col, i)),
                date_added: field(date_col, i),
                link: field(link_col, i),
                description: field(desc_col, i),
                comments: field(comments_col, i),
                efficiency_rank,
            });
        }

        debug!("Excluded {} purchased rows", purchased);
        Ok(items)
    }
}

fn looks_like_html(body: &[u8]) -> bool {
    let text = String::from_utf8_lossy(&body[..body.len().min(64)]);
    let start = text.trim_start_matches('\u{feff}').trim_start().to_lowercase();
    start.starts_with("<!doctype html") || start.starts_with("<html")
}

fn is_purchased(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    PURCHASED_VALUES.contains(&lowered.as_str())
}

/// Parse a currency cell such as `$1,234.50` or `(12.00)` into Decimal(8, 2).
///
/// Currency symbols, thousands separators and whitespace are ignored; any
/// other non-numeric character rejects the cell.
fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("amount is blank".to_string());
    }

    let (negative, body) = match trimmed.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !(CURRENCY_SYMBOLS.contains(c) || *c == ',' || c.is_whitespace()))
        .collect();

    let not_an_amount = || format!("'{}' is not a currency amount", trimmed);
    if let Some(bad) = cleaned
        .chars()
        .find(|c| !(c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+'))
    {
        return Err(format!("{} (unexpected '{}')", not_an_amount(), bad));
    }

    let mut parsed: Decimal = cleaned.parse().map_err(|_| not_an_amount())?;
    if negative {
        parsed = -parsed.abs();
    }

    let mut amount = parsed.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(AMOUNT_SCALE);

    let limit = Decimal::from(10u64.pow(MAX_AMOUNT_DIGITS - AMOUNT_SCALE));
    if amount.abs() >= limit {
        return Err(format!(
            "'{}' exceeds {} digits of precision",
            trimmed, MAX_AMOUNT_DIGITS
        ));
    }

    Ok(amount)
}

fn parse_rank(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("'{}' is not a numeric rank", raw.trim()))
}

fn parse_want(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    raw.parse::<u8>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(v))
            .map(|v| v as u8)
    })
}
