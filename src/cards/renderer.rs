//! Card Renderer
//! Turns wishlist rows into display cards: a collapsed label plus body fields.

use crate::data::{Table, WishlistItem};
use rust_decimal::{Decimal, RoundingStrategy};

const MISSING: &str = "-";

/// One labelled line in a card body.
#[derive(Debug, Clone, PartialEq)]
pub struct CardField {
    pub name: &'static str,
    pub value: String,
}

/// Presentation unit for one wishlist row.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayCard {
    /// 1-based position in the current sort order.
    pub index: usize,
    pub label: String,
    pub fields: Vec<CardField>,
    /// Present when the row has a non-blank link.
    pub link: Option<String>,
}

pub struct CardRenderer;

impl CardRenderer {
    /// One card per row, numbered in table order.
    pub fn render(table: &Table) -> Vec<DisplayCard> {
        table
            .iter()
            .enumerate()
            .map(|(idx, item)| Self::render_card(idx + 1, item))
            .collect()
    }

    fn render_card(index: usize, item: &WishlistItem) -> DisplayCard {
        let link = item.link.trim();
        let fields = vec![
            CardField {
                name: "Want",
                value: item
                    .want
                    .map(|w| format!("{}/10", w))
                    .unwrap_or_else(|| MISSING.to_string()),
            },
            CardField {
                name: "Date Added",
                value: Self::or_missing(&item.date_added),
            },
            CardField {
                name: "Amount",
                value: format!("${}", Self::amount_2dp(item.amount)),
            },
            CardField {
                name: "Link",
                value: Self::or_missing(link),
            },
            CardField {
                name: "Description",
                value: Self::or_missing(&item.description),
            },
            CardField {
                name: "Comment",
                value: Self::or_missing(&item.comments),
            },
        ];

        DisplayCard {
            index,
            label: format!(
                "{}. {} | ${}",
                index,
                item.item.trim(),
                Self::amount_whole(item.amount)
            ),
            fields,
            link: (!link.is_empty()).then(|| link.to_string()),
        }
    }

    fn or_missing(text: &str) -> String {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            MISSING.to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn amount_whole(amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
    }

    fn amount_2dp(amount: Decimal) -> Decimal {
        let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        rounded
    }
}
