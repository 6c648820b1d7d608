//! Promotion and coupon types.

use crate::ids::PromotionId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A time-bounded promotional discount, optionally keyed by a coupon code.
///
/// Promotions are authored in the admin dashboard; the cart only reads
/// them. A promotion targets products by name: a cart line is eligible
/// when its name and `product_name` match under the loose rule in
/// [`crate::cart::eligibility`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Promotion {
    /// Unique promotion identifier.
    pub id: PromotionId,
    /// Display title (e.g., "Semana do Açaí").
    pub title: String,
    /// Description shown on the promotions page.
    pub description: Option<String>,
    /// Name of the product the promotion targets.
    pub product_name: String,
    /// Regular price, shown struck through.
    pub original_price: Money,
    /// Discounted unit price charged while the promotion applies.
    pub promo_price: Money,
    /// Discount as a percentage of the original price, for display.
    pub discount_percentage: f64,
    /// Coupon code that unlocks the promotion, uppercase by convention.
    pub coupon_code: Option<String>,
    /// Unix timestamp the promotion starts (inclusive).
    pub start_date: i64,
    /// Unix timestamp the promotion ends (inclusive).
    pub end_date: i64,
    /// URL of the banner image.
    pub image_url: String,
    /// Flash promotions get highlighted on the storefront.
    pub is_flash: bool,
    /// Whether the promotion is enabled at all.
    pub active: bool,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Promotion {
    /// Create a new promotion over a date window.
    ///
    /// The discount percentage is derived from the two prices.
    pub fn new(
        title: impl Into<String>,
        product_name: impl Into<String>,
        original_price: Money,
        promo_price: Money,
        start_date: i64,
        end_date: i64,
    ) -> Self {
        let discount_percentage = if original_price.amount_cents > 0 {
            let saved = (original_price.amount_cents - promo_price.amount_cents).max(0);
            (saved as f64 / original_price.amount_cents as f64) * 100.0
        } else {
            0.0
        };
        Self {
            id: PromotionId::generate(),
            title: title.into(),
            description: None,
            product_name: product_name.into(),
            original_price,
            promo_price,
            discount_percentage,
            coupon_code: None,
            start_date,
            end_date,
            image_url: String::new(),
            is_flash: false,
            active: true,
            created_at: current_timestamp(),
        }
    }

    /// Set the coupon code. Stored uppercased.
    pub fn with_coupon(mut self, code: impl Into<String>) -> Self {
        self.coupon_code = Some(code.into().trim().to_uppercase());
        self
    }

    /// Mark as a flash promotion.
    pub fn flash(mut self) -> Self {
        self.is_flash = true;
        self
    }

    /// Check whether the promotion is live at the given instant.
    ///
    /// Both window ends are inclusive.
    pub fn is_active_at(&self, now: i64) -> bool {
        self.active && self.start_date <= now && now <= self.end_date
    }

    /// Check whether a coupon code unlocks this promotion.
    ///
    /// Comparison is case-insensitive; a promotion without a code never
    /// matches.
    pub fn matches_coupon(&self, code: &str) -> bool {
        self.coupon_code
            .as_deref()
            .map(|c| c.eq_ignore_ascii_case(code.trim()))
            .unwrap_or(false)
    }

    /// Saved amount per eligible unit.
    pub fn savings_per_unit(&self) -> Money {
        self.original_price
            .try_subtract(&self.promo_price)
            .map(|m| m.floor_at_zero())
            .unwrap_or_else(|| Money::zero(self.promo_price.currency))
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
