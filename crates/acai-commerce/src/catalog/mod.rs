//! Catalog module.
//!
//! Contains the admin-managed content types: products with size options,
//! categories, and topping add-ons.

mod category;
mod product;
mod topping;

pub use category::Category;
pub use product::{Product, ProductSize};
pub use topping::Topping;
