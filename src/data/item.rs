//! Wishlist Item Module
//! Typed row schema for the wishlist table.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

pub const COL_ITEM: &str = "Item";
pub const COL_AMOUNT: &str = "Amount";
pub const COL_WANT: &str = "Want (1-10)";
pub const COL_DATE_ADDED: &str = "Date Added";
pub const COL_LINK: &str = "Link";
pub const COL_DESCRIPTION: &str = "Desc.";
pub const COL_COMMENTS: &str = "Comments";
pub const COL_PURCHASED: &str = "Purchased";
pub const COL_EFFICIENCY_RANK: &str = "Efficiency Rank";

/// Columns the sheet must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_ITEM, COL_AMOUNT, COL_PURCHASED, COL_EFFICIENCY_RANK];

/// Columns only used upstream to compute the efficiency rank.
pub const HELPER_COLUMNS: [&str; 2] = ["Want/Amt", "norm r/a"];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%m/%d/%y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M:%S"];

/// `%Y` also accepts two-digit years; anything below this came from a `%y` cell.
const MIN_FULL_YEAR: i32 = 1000;

/// One non-purchased row of the wishlist.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistItem {
    pub item: String,
    /// Always scale 2.
    pub amount: Decimal,
    pub want: Option<u8>,
    pub date_added: String,
    pub link: String,
    pub description: String,
    pub comments: String,
    /// Lower is more efficient.
    pub efficiency_rank: f64,
}

impl WishlistItem {
    /// Parse `date_added` against the date layouts sheets commonly export.
    pub fn date_added_parsed(&self) -> Option<NaiveDate> {
        let raw = self.date_added.trim();
        if raw.is_empty() {
            return None;
        }

        DATE_FORMATS
            .iter()
            .find_map(|fmt| {
                NaiveDate::parse_from_str(raw, fmt)
                    .ok()
                    .filter(|d| d.year() >= MIN_FULL_YEAR)
            })
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                    .map(|dt| dt.date())
                    .filter(|d| d.year() >= MIN_FULL_YEAR)
            })
    }
}

/// Ordered wishlist rows for one render cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    items: Vec<WishlistItem>,
}

impl Table {
    pub fn new(items: Vec<WishlistItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WishlistItem> {
        self.items.iter()
    }
}

#[cfg(test)]
pub(crate) fn sample_item(item: &str, amount: Decimal, rank: f64) -> WishlistItem {
    WishlistItem {
        item: item.to_string(),
        amount,
        want: None,
        date_added: String::new(),
        link: String::new(),
        description: String::new(),
        comments: String::new(),
        efficiency_rank: rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_date(raw: &str) -> WishlistItem {
        let mut item = sample_item("A", Decimal::new(100, 2), 1.0);
        item.date_added = raw.to_string();
        item
    }

    #[test]
    fn parses_common_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(with_date("2024-03-15").date_added_parsed(), expected);
        assert_eq!(with_date("3/15/2024").date_added_parsed(), expected);
        assert_eq!(with_date("2024-03-15 00:00:00").date_added_parsed(), expected);
    }

    #[test]
    fn two_digit_years_land_in_this_century() {
        assert_eq!(
            with_date("1/5/24").date_added_parsed(),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn blank_or_garbage_date_is_none() {
        assert_eq!(with_date("   ").date_added_parsed(), None);
        assert_eq!(with_date("last spring").date_added_parsed(), None);
    }
}
