//! Catalog persistence interface.
//!
//! The admin dashboard is a set of CRUD screens over these rows; the
//! storefront only reads them. Implementations sit in front of the hosted
//! backend; [`crate::MemoryStore`] backs tests and local development.

use crate::error::StoreError;
use acai_commerce::cart::Promotion;
use acai_commerce::catalog::{Category, Product, Topping};
use acai_commerce::ids::{CategoryId, ProductId, PromotionId, ToppingId};
use async_trait::async_trait;

/// CRUD access to the catalog rows: products, categories, toppings and
/// promotions.
///
/// `list_*` methods return rows in storefront display order. `upsert_*`
/// methods insert or replace by id.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// List all products in display order.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Get a product by id.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    /// Insert or replace a product.
    async fn upsert_product(&self, product: Product) -> Result<(), StoreError>;

    /// Delete a product. Returns whether it existed.
    async fn delete_product(&self, id: &ProductId) -> Result<bool, StoreError>;

    /// List all categories in display order.
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Insert or replace a category.
    async fn upsert_category(&self, category: Category) -> Result<(), StoreError>;

    /// Delete a category. Returns whether it existed.
    async fn delete_category(&self, id: &CategoryId) -> Result<bool, StoreError>;

    /// List all toppings in picker order.
    async fn list_toppings(&self) -> Result<Vec<Topping>, StoreError>;

    /// Insert or replace a topping.
    async fn upsert_topping(&self, topping: Topping) -> Result<(), StoreError>;

    /// Delete a topping. Returns whether it existed.
    async fn delete_topping(&self, id: &ToppingId) -> Result<bool, StoreError>;

    /// List all promotions, newest first.
    async fn list_promotions(&self) -> Result<Vec<Promotion>, StoreError>;

    /// Insert or replace a promotion.
    async fn upsert_promotion(&self, promotion: Promotion) -> Result<(), StoreError>;

    /// Delete a promotion. Returns whether it existed.
    async fn delete_promotion(&self, id: &PromotionId) -> Result<bool, StoreError>;
}
