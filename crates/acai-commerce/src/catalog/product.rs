//! Product types.

use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A size option offered for a product (e.g., "300ml", "500ml", "700ml").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSize {
    /// Display label for the size.
    pub label: String,
    /// Price of the product in this size.
    pub price: Money,
}

impl ProductSize {
    pub fn new(label: impl Into<String>, price: Money) -> Self {
        Self {
            label: label.into(),
            price,
        }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name, also used for promotion eligibility matching.
    pub name: String,
    /// Full description.
    pub description: Option<String>,
    /// Base price, used when the product has no size options.
    pub price: Money,
    /// URL of the product image, may be empty.
    pub image_url: String,
    /// Category this product belongs to.
    pub category_id: Option<CategoryId>,
    /// Size options. Empty for single-size products.
    pub sizes: Vec<ProductSize>,
    /// Whether the product is visible on the storefront.
    pub active: bool,
    /// Sort order position within its category.
    pub position: i32,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Product {
    /// Create a new single-size product.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        let now = current_timestamp();
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: None,
            price,
            image_url: String::new(),
            category_id: None,
            sizes: Vec::new(),
            active: true,
            position: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a size option.
    pub fn with_size(mut self, label: impl Into<String>, price: Money) -> Self {
        self.sizes.push(ProductSize::new(label, price));
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Check if the product is available for purchase.
    pub fn is_available(&self) -> bool {
        self.active
    }

    /// Resolve the price for a size label.
    ///
    /// Falls back to the base price when the product has no size options.
    /// Returns None when sizes exist but none carries the label.
    pub fn size_price(&self, label: &str) -> Option<Money> {
        if self.sizes.is_empty() {
            return Some(self.price);
        }
        self.sizes
            .iter()
            .find(|s| s.label.eq_ignore_ascii_case(label.trim()))
            .map(|s| s.price)
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_creation() {
        let product = Product::new("Açaí Tradicional", Money::brl(1500));
        assert_eq!(product.name, "Açaí Tradicional");
        assert!(product.is_available());
        assert_eq!(product.price.amount_cents, 1500);
    }

    #[test]
    fn test_size_price_resolution() {
        let product = Product::new("Açaí Premium", Money::brl(1500))
            .with_size("300ml", Money::brl(1500))
            .with_size("500ml", Money::brl(2000));

        assert_eq!(product.size_price("500ml").unwrap().amount_cents, 2000);
        assert_eq!(product.size_price(" 300ML ").unwrap().amount_cents, 1500);
        assert!(product.size_price("1L").is_none());
    }

    #[test]
    fn test_size_price_falls_back_to_base() {
        let product = Product::new("Suco de Laranja", Money::brl(800));
        assert_eq!(product.size_price("Único").unwrap().amount_cents, 800);
    }
}
