//! Metrics Calculator Module
//! Summary statistics shown at the top of the dashboard.

use crate::data::{Table, WishlistItem};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MetricsError {
    #[error("Cannot compute metrics over an empty table")]
    EmptyTable,
}

/// Aggregates over the non-purchased wishlist.
#[derive(Debug, Clone, PartialEq)]
pub struct WishlistMetrics {
    pub count_of_items: usize,
    pub sum_of_items: Decimal,
    /// Item name with the lowest efficiency rank.
    pub most_efficient_item: String,
    /// Lowest amount (a value, not a name).
    pub cheapest_item: Decimal,
    /// Highest amount (a value, not a name).
    pub expensive_item: Decimal,
}

impl WishlistMetrics {
    pub fn count_label(&self) -> String {
        self.count_of_items.to_string()
    }

    pub fn sum_label(&self) -> String {
        format!("${:.2}", self.sum_of_items)
    }

    pub fn cheapest_label(&self) -> String {
        format!("${:.2}", self.cheapest_item)
    }

    pub fn expensive_label(&self) -> String {
        format!("${:.2}", self.expensive_item)
    }
}

/// Handles metric computation over a loaded table.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Compute count, sum, cheapest, most expensive and most efficient.
    ///
    /// Ties resolve to the first matching row in table order, so results can
    /// shift if the source sheet reorders equal rows.
    pub fn compute_metrics(table: &Table) -> Result<WishlistMetrics, MetricsError> {
        let items = table.items();
        let first = items.first().ok_or(MetricsError::EmptyTable)?;

        let most_efficient = Self::first_extreme(items, Ordering::Less, |a, b| {
            a.efficiency_rank.total_cmp(&b.efficiency_rank)
        });
        let cheapest = Self::first_extreme(items, Ordering::Less, |a, b| a.amount.cmp(&b.amount));
        let expensive =
            Self::first_extreme(items, Ordering::Greater, |a, b| a.amount.cmp(&b.amount));

        Ok(WishlistMetrics {
            count_of_items: items.len(),
            sum_of_items: items.iter().map(|i| i.amount).sum(),
            most_efficient_item: most_efficient.unwrap_or(first).item.clone(),
            cheapest_item: cheapest.unwrap_or(first).amount,
            expensive_item: expensive.unwrap_or(first).amount,
        })
    }

    /// First row that no later row beats in direction `wanted`.
    fn first_extreme<'a, F>(
        items: &'a [WishlistItem],
        wanted: Ordering,
        compare: F,
    ) -> Option<&'a WishlistItem>
    where
        F: Fn(&WishlistItem, &WishlistItem) -> Ordering,
    {
        items.iter().fold(None, |best, item| match best {
            Some(current) if compare(item, current) != wanted => Some(current),
            _ => Some(item),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_item, WishlistLoader};

    #[test]
    fn empty_table_is_an_error() {
        assert_eq!(
            MetricsCalculator::compute_metrics(&Table::default()),
            Err(MetricsError::EmptyTable)
        );
    }

    #[test]
    fn single_row_is_its_own_extremes() {
        let table = Table::new(vec![sample_item("Lamp", Decimal::new(4250, 2), 3.0)]);
        let metrics = MetricsCalculator::compute_metrics(&table).unwrap();
        assert_eq!(metrics.count_of_items, 1);
        assert_eq!(metrics.cheapest_item, Decimal::new(4250, 2));
        assert_eq!(metrics.expensive_item, Decimal::new(4250, 2));
        assert_eq!(metrics.most_efficient_item, "Lamp");
    }

    #[test]
    fn ties_resolve_to_first_occurrence() {
        let table = Table::new(vec![
            sample_item("A", Decimal::new(900, 2), 5.0),
            sample_item("B", Decimal::new(100, 2), 1.0),
            sample_item("C", Decimal::new(900, 2), 1.0),
        ]);
        let metrics = MetricsCalculator::compute_metrics(&table).unwrap();
        assert_eq!(metrics.most_efficient_item, "B");
        assert_eq!(metrics.cheapest_item, Decimal::new(100, 2));
        assert_eq!(metrics.expensive_item, Decimal::new(900, 2));
        assert_eq!(metrics.sum_of_items, Decimal::new(1900, 2));
    }

    #[test]
    fn loaded_sheet_metrics() {
        let body = b"Item,Amount,Purchased,Efficiency Rank\n\
                     A,10.00,false,2\n\
                     B,5.00,false,1\n\
                     C,20.00,true,0\n"
            .to_vec();
        let table = WishlistLoader::parse_table(body).unwrap();
        let metrics = MetricsCalculator::compute_metrics(&table).unwrap();

        assert_eq!(metrics.count_of_items, 2);
        assert_eq!(metrics.cheapest_item, Decimal::new(500, 2));
        assert_eq!(metrics.expensive_item, Decimal::new(1000, 2));
        assert_eq!(metrics.most_efficient_item, "B");
        assert_eq!(metrics.sum_label(), "$15.00");
    }
}
