//! Cart and line item types.

use crate::cart::coupon::CouponRejection;
use crate::cart::eligibility;
use crate::cart::pricing::{CartPricing, LineItemPricing};
use crate::cart::promotion::Promotion;
use crate::catalog::{Product, Topping};
use crate::error::CommerceError;
use crate::ids::{CartId, LineItemId, ProductId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_LINE: i64 = 99;

/// A line item in the cart.
///
/// One line represents a specific product + size + toppings configuration.
/// Each line carries its own unique id, so callers can address a single
/// variant even when several lines share a product id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Unique line identifier, generated when the line is created.
    pub line_id: LineItemId,
    /// The underlying product. Not unique per line.
    pub product_id: ProductId,
    /// Display name, also used for promotion eligibility matching.
    pub name: String,
    /// Base unit price captured when the item was added. Does not track
    /// later catalog price changes.
    pub price: Money,
    /// Size label (e.g., "300ml", "500ml").
    pub size: String,
    /// URL of the product image, may be empty.
    pub image_url: String,
    /// Quantity, kept in [1, MAX_QUANTITY_PER_LINE].
    pub quantity: i64,
    /// Topping add-ons, in insertion order, unique by id.
    pub toppings: Vec<Topping>,
}

impl LineItem {
    fn new(
        product_id: ProductId,
        name: String,
        price: Money,
        size: String,
        image_url: String,
        toppings: Vec<Topping>,
    ) -> Self {
        Self {
            line_id: LineItemId::generate(),
            product_id,
            name,
            price,
            size,
            image_url,
            quantity: 1,
            toppings,
        }
    }

    /// Sum of topping prices for one unit.
    pub fn toppings_total(&self) -> Option<Money> {
        Money::try_sum(self.toppings.iter().map(|t| &t.price), self.price.currency)
    }

    /// Check whether this line holds the same purchasable configuration.
    ///
    /// Identity is (product id, size, topping id sequence). Topping order
    /// matters: the list is kept in insertion order and compared as-is.
    pub fn same_configuration(
        &self,
        product_id: &ProductId,
        size: &str,
        toppings: &[Topping],
    ) -> bool {
        self.product_id == *product_id
            && self.size == size
            && self.toppings.len() == toppings.len()
            && self
                .toppings
                .iter()
                .zip(toppings.iter())
                .all(|(a, b)| a.id == b.id)
    }
}

/// A shopping cart, scoped to one browsing session.
///
/// The cart owns its line items, the applied promotion and the last coupon
/// rejection. Coupon validation itself lives in
/// [`crate::cart::CartEngine`], which performs the asynchronous promotion
/// lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Items in insertion/merge order.
    pub items: Vec<LineItem>,
    /// At most one promotion applies at a time.
    pub applied_promotion: Option<Promotion>,
    /// Why the last coupon attempt was refused, for display.
    pub coupon_rejection: Option<CouponRejection>,
    /// Whether the cart drawer is visible. Every successful add opens it.
    pub is_open: bool,
    /// Cart currency.
    pub currency: Currency,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new() -> Self {
        let now = current_timestamp();
        Self {
            id: CartId::generate(),
            items: Vec::new(),
            applied_promotion: None,
            coupon_rejection: None,
            is_open: false,
            currency: Currency::BRL,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add one unit of a product configuration to the cart.
    ///
    /// An existing line with the same (product id, size, toppings) has its
    /// quantity bumped, silently capped at [`MAX_QUANTITY_PER_LINE`];
    /// otherwise a new line with quantity 1 is appended. Toppings are
    /// deduplicated by id, keeping the first occurrence. A negative price
    /// is floored at zero.
    ///
    /// Returns an error without mutating when the product id or name is
    /// blank, or the size label is blank after trimming. On success the
    /// cart drawer is opened.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        name: impl Into<String>,
        price: Money,
        size: impl Into<String>,
        image_url: impl Into<String>,
        toppings: Vec<Topping>,
    ) -> Result<LineItemId, CommerceError> {
        let name = name.into();
        let size = size.into();

        if product_id.is_blank() {
            return Err(CommerceError::MissingProductId);
        }
        if name.trim().is_empty() {
            return Err(CommerceError::MissingProductName);
        }
        let size = size.trim().to_string();
        if size.is_empty() {
            return Err(CommerceError::BlankSize);
        }

        let price = price.floor_at_zero();
        let toppings = dedup_toppings(toppings);

        let line_id = if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.same_configuration(&product_id, &size, &toppings))
        {
            existing.quantity = (existing.quantity + 1).min(MAX_QUANTITY_PER_LINE);
            existing.line_id.clone()
        } else {
            let item = LineItem::new(product_id, name, price, size, image_url.into(), toppings);
            let id = item.line_id.clone();
            self.items.push(item);
            id
        };

        self.is_open = true;
        self.updated_at = current_timestamp();
        debug!(line = %line_id, "item added to cart");
        Ok(line_id)
    }

    /// Add a catalog product in a given size.
    ///
    /// Resolves the unit price from the product's size options and carries
    /// over its name and image.
    pub fn add_product(
        &mut self,
        product: &Product,
        size: &str,
        toppings: Vec<Topping>,
    ) -> Result<LineItemId, CommerceError> {
        let price = product
            .size_price(size)
            .ok_or_else(|| CommerceError::UnknownSize {
                product: product.name.clone(),
                size: size.to_string(),
            })?;
        self.add_item(
            product.id.clone(),
            product.name.clone(),
            price,
            size,
            product.image_url.clone(),
            toppings,
        )
    }

    /// Remove every line item for a product id, whatever its size or
    /// toppings. Returns how many lines were removed; a blank id is a
    /// no-op.
    pub fn remove_product(&mut self, product_id: &ProductId) -> usize {
        if product_id.is_blank() {
            return 0;
        }
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        let removed = len_before - self.items.len();
        if removed > 0 {
            self.updated_at = current_timestamp();
            debug!(product = %product_id, removed, "product removed from cart");
        }
        removed
    }

    /// Remove a single line item.
    pub fn remove_line(&mut self, line_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.line_id != line_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.updated_at = current_timestamp();
        }
        removed
    }

    /// Set a line's quantity, clamped to [0, MAX_QUANTITY_PER_LINE].
    ///
    /// A clamped quantity of 0 removes the line. Returns whether the line
    /// existed.
    pub fn update_quantity(&mut self, line_id: &LineItemId, quantity: i64) -> bool {
        let quantity = quantity.clamp(0, MAX_QUANTITY_PER_LINE);
        if quantity == 0 {
            return self.remove_line(line_id);
        }
        if let Some(item) = self.items.iter_mut().find(|i| &i.line_id == line_id) {
            item.quantity = quantity;
            self.updated_at = current_timestamp();
            true
        } else {
            false
        }
    }

    /// Replace a line's topping list.
    ///
    /// The new list is deduplicated by id. The line keeps its identity: it
    /// is not re-merged with another line that already has the same
    /// configuration.
    pub fn update_toppings(&mut self, line_id: &LineItemId, toppings: Vec<Topping>) -> bool {
        if let Some(item) = self.items.iter_mut().find(|i| &i.line_id == line_id) {
            item.toppings = dedup_toppings(toppings);
            self.updated_at = current_timestamp();
            true
        } else {
            false
        }
    }

    /// Apply a promotion, clearing any previous coupon rejection.
    pub fn apply_promotion(&mut self, promotion: Promotion) {
        self.applied_promotion = Some(promotion);
        self.coupon_rejection = None;
        self.updated_at = current_timestamp();
    }

    /// Record why a coupon attempt was refused. The applied promotion, if
    /// any, is left untouched.
    pub(crate) fn record_rejection(&mut self, rejection: CouponRejection) {
        self.coupon_rejection = Some(rejection);
        self.updated_at = current_timestamp();
    }

    /// Clear the applied promotion and any coupon rejection.
    pub fn remove_coupon(&mut self) {
        self.applied_promotion = None;
        self.coupon_rejection = None;
        self.updated_at = current_timestamp();
    }

    /// Empty the cart: items, promotion and rejection all reset together.
    /// Used after a successful checkout submission.
    pub fn clear(&mut self) {
        self.items.clear();
        self.applied_promotion = None;
        self.coupon_rejection = None;
        self.updated_at = current_timestamp();
        debug!("cart cleared");
    }

    /// Open the cart drawer.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Close the cart drawer.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Total unit count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn unique_line_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by id.
    pub fn get_line(&self, line_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.line_id == line_id)
    }

    /// Calculate the cart's pricing breakdown.
    ///
    /// Per line: the effective base price is the applied promotion's promo
    /// price when the line name matches the promotion's product name,
    /// otherwise the stored line price. The line total is
    /// `(effective base + toppings) * quantity`; the original total uses
    /// the stored price and ignores the promotion. Accumulation is exact
    /// integer arithmetic; overflow is an error.
    pub fn pricing(&self) -> Result<CartPricing, CommerceError> {
        let mut line_items = Vec::with_capacity(self.items.len());
        let mut total = Money::zero(self.currency);
        let mut original_total = Money::zero(self.currency);

        for item in &self.items {
            let toppings_total = item.toppings_total().ok_or(CommerceError::Overflow)?;

            let discounted = match &self.applied_promotion {
                Some(p) => eligibility::matches(&item.name, &p.product_name),
                None => false,
            };
            let effective_base = if discounted {
                // Checked above: discounted is only true with a promotion.
                self.applied_promotion
                    .as_ref()
                    .map(|p| p.promo_price)
                    .unwrap_or(item.price)
            } else {
                item.price
            };

            let unit_total = effective_base
                .try_add(&toppings_total)
                .ok_or(CommerceError::Overflow)?;
            let line_total = unit_total
                .try_multiply(item.quantity)
                .ok_or(CommerceError::Overflow)?;

            let original_unit = item
                .price
                .try_add(&toppings_total)
                .ok_or(CommerceError::Overflow)?;
            let line_original = original_unit
                .try_multiply(item.quantity)
                .ok_or(CommerceError::Overflow)?;

            total = total.try_add(&line_total).ok_or(CommerceError::Overflow)?;
            original_total = original_total
                .try_add(&line_original)
                .ok_or(CommerceError::Overflow)?;

            line_items.push(LineItemPricing {
                line_id: item.line_id.clone(),
                effective_unit_price: effective_base,
                toppings_total,
                quantity: item.quantity,
                total: line_total,
                original_total: line_original,
                discounted,
            });
        }

        let savings = original_total
            .try_subtract(&total)
            .ok_or_else(|| CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: "mixed".to_string(),
            })?
            .floor_at_zero();

        Ok(CartPricing {
            total,
            original_total,
            savings,
            line_items,
        })
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Deduplicate toppings by id, keeping the first occurrence in order.
fn dedup_toppings(toppings: Vec<Topping>) -> Vec<Topping> {
    let mut seen = Vec::with_capacity(toppings.len());
    let mut out = Vec::with_capacity(toppings.len());
    for t in toppings {
        if !seen.contains(&t.id) {
            seen.push(t.id.clone());
            out.push(t);
        }
    }
    out
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
    use crate::ids::ToppingId;

    fn topping(id: &str, cents: i64) -> Topping {
        Topping::with_id(ToppingId::new(id), id, Money::brl(cents))
    }

    fn add_acai(cart: &mut Cart, size: &str, toppings: Vec<Topping>) -> LineItemId {
        cart.add_item(
            ProductId::new("p1"),
            "Açaí Premium",
            Money::brl(2000),
            size,
            "",
            toppings,
        )
        .unwrap()
    }

    #[test]
    fn test_add_merges_identical_configuration() {
        let mut cart = Cart::new();
        let first = add_acai(&mut cart, "M", vec![]);
        let second = add_acai(&mut cart, "M", vec![]);

        assert_eq!(first, second);
        assert_eq!(cart.unique_line_count(), 1);
        assert_eq!(cart.items[0].quantity, 2);
    }

    #[test]
    fn test_add_does_not_merge_across_sizes() {
        let mut cart = Cart::new();
        add_acai(&mut cart, "M", vec![]);
        add_acai(&mut cart, "G", vec![]);

        assert_eq!(cart.unique_line_count(), 2);
    }

    #[test]
    fn test_add_does_not_merge_across_toppings() {
        let mut cart = Cart::new();
        add_acai(&mut cart, "M", vec![]);
        add_acai(&mut cart, "M", vec![topping("granola", 200)]);

        assert_eq!(cart.unique_line_count(), 2);
    }

    #[test]
    fn test_topping_order_affects_identity() {
        let mut cart = Cart::new();
        add_acai(
            &mut cart,
            "M",
            vec![topping("granola", 200), topping("morango", 300)],
        );
        add_acai(
            &mut cart,
            "M",
            vec![topping("morango", 300), topping("granola", 200)],
        );

        assert_eq!(cart.unique_line_count(), 2);
    }

    #[test]
    fn test_quantity_caps_silently_at_max() {
        let mut cart = Cart::new();
        let line = add_acai(&mut cart, "M", vec![]);
        cart.update_quantity(&line, MAX_QUANTITY_PER_LINE);
        // The 100th unit is dropped without an error.
        add_acai(&mut cart, "M", vec![]);

        assert_eq!(cart.items[0].quantity, MAX_QUANTITY_PER_LINE);
    }

    #[test]
    fn test_add_validation_rejects_blank_inputs() {
        let mut cart = Cart::new();

        let err = cart
            .add_item(ProductId::new("  "), "Açaí", Money::brl(100), "M", "", vec![])
            .unwrap_err();
        assert_eq!(err, CommerceError::MissingProductId);

        let err = cart
            .add_item(ProductId::new("p1"), "  ", Money::brl(100), "M", "", vec![])
            .unwrap_err();
        assert_eq!(err, CommerceError::MissingProductName);

        let err = cart
            .add_item(ProductId::new("p1"), "Açaí", Money::brl(100), "  ", "", vec![])
            .unwrap_err();
        assert_eq!(err, CommerceError::BlankSize);

        assert!(cart.is_empty());
        assert!(!cart.is_open);
    }

    #[test]
    fn test_negative_price_floored_at_zero() {
        let mut cart = Cart::new();
        let line = cart
            .add_item(ProductId::new("p1"), "Açaí", Money::brl(-500), "M", "", vec![])
            .unwrap();
        assert_eq!(cart.get_line(&line).unwrap().price.amount_cents, 0);
    }

    #[test]
    fn test_toppings_deduplicated_within_add() {
        let mut cart = Cart::new();
        let line = add_acai(
            &mut cart,
            "M",
            vec![topping("granola", 200), topping("granola", 200)],
        );
        assert_eq!(cart.get_line(&line).unwrap().toppings.len(), 1);
    }

    #[test]
    fn test_successful_add_opens_cart() {
        let mut cart = Cart::new();
        assert!(!cart.is_open);
        add_acai(&mut cart, "M", vec![]);
        assert!(cart.is_open);
    }

    #[test]
    fn test_remove_product_removes_all_variants() {
        let mut cart = Cart::new();
        add_acai(&mut cart, "M", vec![]);
        add_acai(&mut cart, "G", vec![]);
        cart.add_item(
            ProductId::new("p2"),
            "Suco de Laranja",
            Money::brl(800),
            "Único",
            "",
            vec![],
        )
        .unwrap();

        assert_eq!(cart.remove_product(&ProductId::new("p1")), 2);
        assert_eq!(cart.unique_line_count(), 1);
        assert_eq!(cart.items[0].name, "Suco de Laranja");
    }

    #[test]
    fn test_remove_product_blank_id_is_noop() {
        let mut cart = Cart::new();
        add_acai(&mut cart, "M", vec![]);
        assert_eq!(cart.remove_product(&ProductId::new("   ")), 0);
        assert_eq!(cart.unique_line_count(), 1);
    }

    #[test]
    fn test_update_quantity_clamps_above_max() {
        let mut cart = Cart::new();
        let line = add_acai(&mut cart, "M", vec![]);
        assert!(cart.update_quantity(&line, 500));
        assert_eq!(cart.items[0].quantity, MAX_QUANTITY_PER_LINE);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        let line = add_acai(&mut cart, "M", vec![]);
        assert!(cart.update_quantity(&line, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_negative_removes_line() {
        let mut cart = Cart::new();
        let line = add_acai(&mut cart, "M", vec![]);
        assert!(cart.update_quantity(&line, -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_targets_one_variant_only() {
        let mut cart = Cart::new();
        let m = add_acai(&mut cart, "M", vec![]);
        let g = add_acai(&mut cart, "G", vec![]);

        cart.update_quantity(&g, 5);
        assert_eq!(cart.get_line(&m).unwrap().quantity, 1);
        assert_eq!(cart.get_line(&g).unwrap().quantity, 5);
    }

    #[test]
    fn test_update_toppings_replaces_without_remerge() {
        let mut cart = Cart::new();
        let plain = add_acai(&mut cart, "M", vec![]);
        let with_granola = add_acai(&mut cart, "M", vec![topping("granola", 200)]);

        // Editing the plain line into the granola configuration keeps two
        // separate lines. Accepted inconsistency in the merge model.
        assert!(cart.update_toppings(&plain, vec![topping("granola", 200)]));
        assert_eq!(cart.unique_line_count(), 2);
        assert_ne!(plain, with_granola);
    }

    #[test]
    fn test_clear_resets_items_promotion_and_rejection() {
        let mut cart = Cart::new();
        add_acai(&mut cart, "M", vec![]);
        cart.apply_promotion(Promotion::new(
            "Promo",
            "Açaí Premium",
            Money::brl(2000),
            Money::brl(1500),
            0,
            i64::MAX,
        ));

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.applied_promotion.is_none());
        assert!(cart.coupon_rejection.is_none());
    }

    #[test]
    fn test_add_product_resolves_size_price() {
        let mut cart = Cart::new();
        let product = Product::new("Açaí Premium", Money::brl(1500))
            .with_size("300ml", Money::brl(1500))
            .with_size("500ml", Money::brl(2000));

        let line = cart.add_product(&product, "500ml", vec![]).unwrap();
        assert_eq!(cart.get_line(&line).unwrap().price.amount_cents, 2000);

        let err = cart.add_product(&product, "1L", vec![]).unwrap_err();
        assert!(matches!(err, CommerceError::UnknownSize { .. }));
    }
}
