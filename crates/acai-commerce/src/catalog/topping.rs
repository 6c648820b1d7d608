//! Topping add-on type.

use crate::ids::ToppingId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A priced add-on attached to a cart line item (e.g., "Leite em pó",
/// "Granola", "Morango").
///
/// Identity is the id. Once attached to a line item a topping is immutable;
/// editing a line replaces its whole topping list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Topping {
    /// Unique topping identifier.
    pub id: ToppingId,
    /// Topping name.
    pub name: String,
    /// Price added per unit of the line item. Never negative.
    pub price: Money,
    /// Whether the topping is offered on the storefront.
    pub active: bool,
    /// Sort order position in the topping picker.
    pub position: i32,
}

impl Topping {
    /// Create a new topping.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ToppingId::generate(),
            name: name.into(),
            price: price.floor_at_zero(),
            active: true,
            position: 0,
        }
    }

    /// Create a topping with a fixed id, for data loaded from the backend.
    pub fn with_id(id: ToppingId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price: price.floor_at_zero(),
            active: true,
            position: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topping_price_never_negative() {
        let topping = Topping::new("Granola", Money::brl(-200));
        assert_eq!(topping.price.amount_cents, 0);
    }

    #[test]
    fn test_topping_identity_is_id() {
        let a = Topping::with_id(ToppingId::new("t1"), "Granola", Money::brl(200));
        let b = Topping::with_id(ToppingId::new("t1"), "Granola", Money::brl(200));
        assert_eq!(a.id, b.id);
    }
}
