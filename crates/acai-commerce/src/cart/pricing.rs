//! Cart pricing breakdown types.

use crate::ids::LineItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart.
///
/// `total` honors the applied promotion for eligible lines;
/// `original_total` is promotion-blind and backs the struck-through
/// comparison price on the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Amount charged.
    pub total: Money,
    /// Amount before any promotion.
    pub original_total: Money,
    /// `original_total - total`, never negative.
    pub savings: Money,
    /// Per-line breakdown, in cart order.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Check if the applied promotion reached at least one line.
    pub fn has_discount(&self) -> bool {
        self.savings.is_positive()
    }

    /// Number of lines priced at the promotional price.
    pub fn discounted_line_count(&self) -> usize {
        self.line_items.iter().filter(|l| l.discounted).count()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Line item id.
    pub line_id: LineItemId,
    /// Base unit price actually charged (promo price when discounted).
    pub effective_unit_price: Money,
    /// Sum of topping prices for one unit.
    pub toppings_total: Money,
    /// Quantity.
    pub quantity: i64,
    /// `(effective_unit_price + toppings_total) * quantity`.
    pub total: Money,
    /// Same computation with the stored price, promotion-blind.
    pub original_total: Money,
    /// Whether the promotion reached this line.
    pub discounted: bool,
}

impl LineItemPricing {
    /// Unit total including toppings, at the effective price.
    pub fn unit_total(&self) -> Money {
        self.effective_unit_price
            .try_add(&self.toppings_total)
            .unwrap_or(self.effective_unit_price)
    }
}
