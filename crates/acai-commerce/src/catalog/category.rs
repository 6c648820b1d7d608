//! Category type.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A product category (e.g., "Açaí", "Bebidas", "Sobremesas").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Sort order position on the storefront.
    pub position: i32,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Category {
    /// Create a new category.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            position: 0,
            created_at: current_timestamp(),
        }
    }

    /// Set the sort position.
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
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
