//! In-memory implementation of FoodStore for testing and development

use crate::core::{Food, FoodStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};

/// In-memory food store
///
/// Keeps records in insertion order so listings are stable. Uses RwLock for
/// thread-safe access; clones share the same underlying map.
#[derive(Clone)]
pub struct InMemoryFoodStore {
    foods: Arc<RwLock<IndexMap<String, Food>>>,
}

impl InMemoryFoodStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            foods: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    fn filtered(&self, predicate: impl Fn(&Food) -> bool) -> Result<Vec<Food>> {
        let foods = self
            .foods
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(foods.values().filter(|f| predicate(f)).cloned().collect())
    }
}

impl Default for InMemoryFoodStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FoodStore for InMemoryFoodStore {
    async fn find_all(&self) -> Result<Vec<Food>> {
        self.filtered(|_| true)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Food>> {
        let foods = self
            .foods
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(foods.get(id).cloned())
    }

    async fn find_by_title_containing(&self, fragment: &str) -> Result<Vec<Food>> {
        self.filtered(|food| food.title_contains(fragment))
    }

    async fn find_by_restaurant_id(&self, restaurant_id: &str) -> Result<Vec<Food>> {
        self.filtered(|food| food.restaurant_id == restaurant_id)
    }

    async fn find_by_restaurant_name(&self, name: &str) -> Result<Vec<Food>> {
        self.filtered(|food| food.restaurant_name.as_deref() == Some(name))
    }

    async fn save(&self, mut food: Food) -> Result<Food> {
        food.ensure_id();

        let mut foods = self
            .foods
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        foods.insert(food.id.clone(), food.clone());

        Ok(food)
    }

    async fn delete(&self, food: &Food) -> Result<()> {
        let mut foods = self
            .foods
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        foods.shift_remove(&food.id);

        Ok(())
    }
}
