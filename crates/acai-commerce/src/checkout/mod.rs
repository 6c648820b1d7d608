//! Checkout module.
//!
//! The storefront hands finished orders off to a messaging app; this
//! module turns the cart into that human-readable order message.

mod message;

pub use message::{order_message, Fulfillment, OrderDetails, PaymentMethod};
