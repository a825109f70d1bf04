//! Store trait for food persistence

use crate::core::Food;
use anyhow::Result;
use async_trait::async_trait;

/// Persistence contract used by the HTTP handlers
///
/// Implementations provide exactly the query shapes the handlers need, so a
/// document database, a relational table or an in-memory map can back the
/// service. There are no transactions; each call stands alone.
#[async_trait]
pub trait FoodStore: Send + Sync {
    /// Every stored record
    async fn find_all(&self) -> Result<Vec<Food>>;

    /// Look up a record by primary key
    async fn find_by_id(&self, id: &str) -> Result<Option<Food>>;

    /// Records whose title contains `fragment`, ignoring case
    async fn find_by_title_containing(&self, fragment: &str) -> Result<Vec<Food>>;

    /// Records whose `restaurant_id` equals `restaurant_id` exactly
    async fn find_by_restaurant_id(&self, restaurant_id: &str) -> Result<Vec<Food>>;

    /// Records whose `restaurant_name` equals `name` exactly
    async fn find_by_restaurant_name(&self, name: &str) -> Result<Vec<Food>>;

    /// Insert or replace a record keyed by its id
    ///
    /// An empty id is replaced with a generated one before writing. Returns
    /// the value as persisted.
    async fn save(&self, food: Food) -> Result<Food>;

    /// Remove a record. Removing a record that is already gone succeeds.
    async fn delete(&self, food: &Food) -> Result<()>;
}
