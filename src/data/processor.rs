//! Data Processor Module
//! Handles display ordering of the loaded wishlist table.

use crate::data::{Table, WishlistItem};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Display sort order picked in the "Filter..." control.
///
/// Every criterion is "best first": ascending, except `WantRating`, which
/// puts the most wanted items on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortCriterion {
    /// Column "Efficiency Rank", ascending
    #[default]
    EfficiencyRank,
    /// Column "Want (1-10)", descending
    WantRating,
    /// Column "Amount", ascending
    Amount,
    /// Column "Date Added", ascending
    DateAdded,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 4] = [
        SortCriterion::EfficiencyRank,
        SortCriterion::WantRating,
        SortCriterion::Amount,
        SortCriterion::DateAdded,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortCriterion::EfficiencyRank => "Most efficient",
            SortCriterion::WantRating => "Most wanted",
            SortCriterion::Amount => "Cheapest",
            SortCriterion::DateAdded => "Oldest added",
        }
    }

    fn compare(self, a: &WishlistItem, b: &WishlistItem) -> Ordering {
        match self {
            SortCriterion::EfficiencyRank => a.efficiency_rank.total_cmp(&b.efficiency_rank),
            SortCriterion::WantRating => match (a.want, b.want) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortCriterion::Amount => a.amount.cmp(&b.amount),
            SortCriterion::DateAdded => {
                match (a.date_added_parsed(), b.date_added_parsed()) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        }
    }
}

/// Handles table reordering. There is no predicate filtering; the
/// "Filter..." control in the dashboard only re-sorts.
pub struct DataProcessor;

impl DataProcessor {
    /// Return a reordered copy of `table`. Ties keep their input order.
    pub fn apply_sort(table: &Table, criterion: SortCriterion) -> Table {
        let mut items = table.items().to_vec();
        items.sort_by(|a, b| criterion.compare(a, b));
        Table::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_item;
    use rust_decimal::Decimal;

    fn table() -> Table {
        let mut a = sample_item("A", Decimal::new(1000, 2), 2.0);
        a.want = Some(5);
        a.date_added = "2024-02-01".to_string();
        let mut b = sample_item("B", Decimal::new(500, 2), 1.0);
        b.want = Some(9);
        b.date_added = "2024-03-01".to_string();
        let mut c = sample_item("C", Decimal::new(2000, 2), 3.0);
        c.want = None;
        c.date_added = "2023-12-24".to_string();
        let mut d = sample_item("D", Decimal::new(500, 2), 4.0);
        d.want = Some(9);
        d.date_added = "someday".to_string();
        Table::new(vec![a, b, c, d])
    }

    fn names(table: &Table) -> Vec<&str> {
        table.iter().map(|i| i.item.as_str()).collect()
    }

    #[test]
    fn efficiency_rank_is_ascending() {
        let sorted = DataProcessor::apply_sort(&table(), SortCriterion::EfficiencyRank);
        assert_eq!(names(&sorted), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn want_rating_is_descending_with_missing_last() {
        let sorted = DataProcessor::apply_sort(&table(), SortCriterion::WantRating);
        // B and D tie on 9 and keep input order
        assert_eq!(names(&sorted), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn amount_is_ascending_and_stable() {
        let sorted = DataProcessor::apply_sort(&table(), SortCriterion::Amount);
        assert_eq!(names(&sorted), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn date_added_is_ascending_with_unparseable_last() {
        let sorted = DataProcessor::apply_sort(&table(), SortCriterion::DateAdded);
        assert_eq!(names(&sorted), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn date_added_orders_two_digit_years_after_older_full_dates() {
        let mut recent = sample_item("Recent", Decimal::new(100, 2), 1.0);
        recent.date_added = "1/5/24".to_string();
        let mut older = sample_item("Older", Decimal::new(100, 2), 2.0);
        older.date_added = "12/31/2023".to_string();
        let table = Table::new(vec![recent, older]);

        let sorted = DataProcessor::apply_sort(&table, SortCriterion::DateAdded);
        assert_eq!(names(&sorted), vec!["Older", "Recent"]);
    }

    #[test]
    fn every_criterion_returns_a_permutation_and_leaves_input_alone() {
        let input = table();
        let snapshot = input.clone();
        for criterion in SortCriterion::ALL {
            let sorted = DataProcessor::apply_sort(&input, criterion);
            assert_eq!(sorted.len(), input.len());
            let mut got = names(&sorted);
            let mut want = names(&input);
            got.sort_unstable();
            want.sort_unstable();
            assert_eq!(got, want, "{criterion:?}");
        }
        assert_eq!(input, snapshot);
    }

    #[test]
    fn default_criterion_is_efficiency_rank() {
        assert_eq!(SortCriterion::default(), SortCriterion::EfficiencyRank);
    }
}
