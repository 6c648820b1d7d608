//! In-memory store for tests and local development.

use crate::catalog::CatalogStore;
use crate::error::StoreError;
use acai_commerce::cart::{LookupError, Promotion, PromotionLookup};
use acai_commerce::catalog::{Category, Product, Topping};
use acai_commerce::ids::{CategoryId, ProductId, PromotionId, ToppingId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Inner {
    products: HashMap<String, Product>,
    categories: HashMap<String, Category>,
    toppings: HashMap<String, Topping>,
    promotions: HashMap<String, Promotion>,
}

/// An in-memory [`CatalogStore`] and [`PromotionLookup`].
///
/// Backed by a `RwLock`; rows are cloned out, so the lock is never held
/// across an await point.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.read()?;
        let mut products: Vec<Product> = inner.products.values().cloned().collect();
        products.sort_by(|a, b| a.position.cmp(&b.position).then(a.name.cmp(&b.name)));
        Ok(products)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read()?.products.get(id.as_str()).cloned())
    }

    async fn upsert_product(&self, product: Product) -> Result<(), StoreError> {
        debug!(product = %product.id, "upsert product");
        self.write()?
            .products
            .insert(product.id.as_str().to_string(), product);
        Ok(())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<bool, StoreError> {
        Ok(self.write()?.products.remove(id.as_str()).is_some())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let inner = self.read()?;
        let mut categories: Vec<Category> = inner.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.position.cmp(&b.position).then(a.name.cmp(&b.name)));
        Ok(categories)
    }

    async fn upsert_category(&self, category: Category) -> Result<(), StoreError> {
        self.write()?
            .categories
            .insert(category.id.as_str().to_string(), category);
        Ok(())
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<bool, StoreError> {
        Ok(self.write()?.categories.remove(id.as_str()).is_some())
    }

    async fn list_toppings(&self) -> Result<Vec<Topping>, StoreError> {
        let inner = self.read()?;
        let mut toppings: Vec<Topping> = inner.toppings.values().cloned().collect();
        toppings.sort_by(|a, b| a.position.cmp(&b.position).then(a.name.cmp(&b.name)));
        Ok(toppings)
    }

    async fn upsert_topping(&self, topping: Topping) -> Result<(), StoreError> {
        self.write()?
            .toppings
            .insert(topping.id.as_str().to_string(), topping);
        Ok(())
    }

    async fn delete_topping(&self, id: &ToppingId) -> Result<bool, StoreError> {
        Ok(self.write()?.toppings.remove(id.as_str()).is_some())
    }

    async fn list_promotions(&self) -> Result<Vec<Promotion>, StoreError> {
        let inner = self.read()?;
        let mut promotions: Vec<Promotion> = inner.promotions.values().cloned().collect();
        promotions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(promotions)
    }

    async fn upsert_promotion(&self, promotion: Promotion) -> Result<(), StoreError> {
        debug!(promotion = %promotion.id, "upsert promotion");
        self.write()?
            .promotions
            .insert(promotion.id.as_str().to_string(), promotion);
        Ok(())
    }

    async fn delete_promotion(&self, id: &PromotionId) -> Result<bool, StoreError> {
        Ok(self.write()?.promotions.remove(id.as_str()).is_some())
    }
}

#[async_trait]
impl PromotionLookup for MemoryStore {
    async fn find_active_by_coupon_code(
        &self,
        code: &str,
        now: i64,
    ) -> Result<Option<Promotion>, LookupError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| LookupError::Backend("store lock poisoned".to_string()))?;
        Ok(inner
            .promotions
            .values()
            .find(|p| p.matches_coupon(code) && p.is_active_at(now))
            .cloned())
    }
}
