//! Storefront domain types and cart pricing engine for the açaí shop.
//!
//! This crate provides the core of the storefront:
//!
//! - **Catalog**: products with size options, categories, topping add-ons
//! - **Cart**: line items with merge identity, quantity limits, pricing
//!   with at most one applied promotion, coupon application over an async
//!   promotion lookup
//! - **Checkout**: formatting the cart as a human-readable order message
//!
//! # Example
//!
//! ```rust,ignore
//! use acai_commerce::prelude::*;
//! use std::sync::Arc;
//!
//! let mut engine = CartEngine::new(Arc::new(promotion_lookup));
//!
//! engine.cart_mut().add_item(
//!     ProductId::new("acai-premium"),
//!     "Açaí Premium",
//!     Money::brl(2000),
//!     "500ml",
//!     "https://cdn.example/acai.jpg",
//!     vec![],
//! )?;
//!
//! engine.apply_coupon("ACAI25").await;
//!
//! let pricing = engine.cart().pricing()?;
//! println!("Total: {}", pricing.total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, Product, ProductSize, Topping};

    // Cart
    pub use crate::cart::{
        Cart, CartEngine, CartPricing, CouponOutcome, CouponRejection, CouponRequest, LineItem,
        LineItemPricing, LookupError, Promotion, PromotionLookup, MAX_QUANTITY_PER_LINE,
    };

    // Checkout
    pub use crate::checkout::{order_message, Fulfillment, OrderDetails, PaymentMethod};
}
