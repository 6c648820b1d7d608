//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Every variant is recoverable: a failed operation leaves the cart in the
/// state it had before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Product id missing or blank when adding to the cart.
    #[error("Product id is missing")]
    MissingProductId,

    /// Product name missing or blank when adding to the cart.
    #[error("Product name is missing")]
    MissingProductName,

    /// Size label blank after trimming.
    #[error("Size label cannot be blank")]
    BlankSize,

    /// The product does not offer the requested size.
    #[error("Unknown size {size:?} for product {product}")]
    UnknownSize { product: String, size: String },

    /// Line item not found in the cart.
    #[error("Line item not in cart: {0}")]
    LineNotFound(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
