//! Persistence interface and in-memory store for the açaí storefront.
//!
//! The hosted backend (auth, tables, object storage) stays behind the
//! [`CatalogStore`] trait; the cart engine's promotion lookup is the
//! [`acai_commerce::cart::PromotionLookup`] trait. [`MemoryStore`]
//! implements both for tests and local development.
//!
//! # Example
//!
//! ```rust,ignore
//! use acai_store::{CatalogStore, MemoryStore};
//! use acai_commerce::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! store.upsert_promotion(promotion).await?;
//!
//! let mut engine = CartEngine::new(store.clone());
//! engine.apply_coupon("ACAI25").await;
//! ```

mod catalog;
mod error;
mod memory;

pub use catalog::CatalogStore;
pub use error::StoreError;
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CatalogStore, MemoryStore, StoreError};
}
