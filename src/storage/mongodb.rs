//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoFoodStore`, a [`FoodStore`] backed by a single collection
//! (`foods` by default) of a `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! Each food item is one document. Entities are serialized via
//! `serde_json::Value` as an intermediate format, then converted to BSON.
//! The `id` field is mapped to MongoDB's `_id` convention, so the primary key
//! lookup uses the built-in `_id` index. `restaurantID`, `restaurantName` and
//! `title` get secondary indexes from [`MongoFoodStore::ensure_indexes`].

use crate::core::error::StorageError;
use crate::core::{Food, FoodStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;

/// Default collection name for food documents
pub const DEFAULT_COLLECTION: &str = "foods";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for domain entity convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Case-insensitive "contains" filter on the title.
///
/// The fragment is escaped so user input is matched literally.
fn title_filter(fragment: &str) -> Document {
    doc! {
        "title": {
            "$regex": regex::escape(fragment),
            "$options": "i",
        }
    }
}

/// Failure to reach or prepare the database, as opposed to a failed query.
fn connection_error(message: String) -> anyhow::Error {
    StorageError::ConnectionError {
        backend: "mongodb".to_string(),
        message,
    }
    .into()
}

// ---------------------------------------------------------------------------
// MongoFoodStore
// ---------------------------------------------------------------------------

/// Food store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use food_service::storage::MongoFoodStore;
///
/// let store = MongoFoodStore::connect(
///     "mongodb://localhost:27017",
///     "food",
///     "foods",
///     Duration::from_secs(5),
/// )
/// .await?;
/// store.ensure_indexes().await?;
/// let saved = store.save(food).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoFoodStore {
    database: Database,
    collection_name: String,
}

impl MongoFoodStore {
    /// Create a store over the default `foods` collection of `database`.
    pub fn new(database: Database) -> Self {
        Self::with_collection(database, DEFAULT_COLLECTION)
    }

    /// Create a store over a named collection.
    pub fn with_collection(database: Database, collection_name: impl Into<String>) -> Self {
        Self {
            database,
            collection_name: collection_name.into(),
        }
    }

    /// Connect to `uri` and open `collection_name` in `database`.
    ///
    /// `timeout` bounds connection establishment and server selection so a
    /// missing server fails fast instead of hanging the first request.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection_name: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| connection_error(format!("invalid URI: {}", e)))?;
        options.app_name = Some("food-service".to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)
            .map_err(|e| connection_error(format!("failed to create client: {}", e)))?;

        Ok(Self::with_collection(
            client.database(database),
            collection_name,
        ))
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(&self.collection_name)
    }

    /// Create secondary indexes for the field queries.
    ///
    /// Idempotent; called on every startup. This is the first round trip to
    /// the server, so an unreachable server surfaces here as a connection error.
    pub async fn ensure_indexes(&self) -> Result<()> {
        use mongodb::IndexModel;

        let indexes = vec![
            IndexModel::builder().keys(doc! { "restaurantID": 1 }).build(),
            IndexModel::builder()
                .keys(doc! { "restaurantName": 1 })
                .build(),
            IndexModel::builder().keys(doc! { "title": 1 }).build(),
        ];

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| {
                connection_error(format!(
                    "failed to create indexes on {} collection: {}",
                    self.collection_name, e
                ))
            })?;

        Ok(())
    }

    fn food_to_document(food: &Food) -> Result<Document> {
        let json =
            serde_json::to_value(food).map_err(|e| anyhow!("Failed to serialize food: {}", e))?;
        json_to_document(json)
    }

    fn document_to_food(doc: Document) -> Result<Food> {
        let json = document_to_json(doc);
        serde_json::from_value(json)
            .map_err(|e| anyhow!("Failed to deserialize food from document: {}", e))
    }

    async fn find_many(&self, filter: Document, what: &str) -> Result<Vec<Food>> {
        let cursor = self
            .collection()
            .find(filter)
            .await
            .map_err(|e| anyhow!("Failed to {}: {}", what, e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect results ({}): {}", what, e))?;

        docs.into_iter().map(Self::document_to_food).collect()
    }
}

#[async_trait]
impl FoodStore for MongoFoodStore {
    async fn find_all(&self) -> Result<Vec<Food>> {
        self.find_many(doc! {}, "list foods").await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Food>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| anyhow!("Failed to get food: {}", e))?;

        match doc {
            Some(d) => Ok(Some(Self::document_to_food(d)?)),
            None => Ok(None),
        }
    }

    async fn find_by_title_containing(&self, fragment: &str) -> Result<Vec<Food>> {
        self.find_many(title_filter(fragment), "search foods by title")
            .await
    }

    async fn find_by_restaurant_id(&self, restaurant_id: &str) -> Result<Vec<Food>> {
        self.find_many(
            doc! { "restaurantID": restaurant_id },
            "find foods by restaurant id",
        )
        .await
    }

    async fn find_by_restaurant_name(&self, name: &str) -> Result<Vec<Food>> {
        self.find_many(
            doc! { "restaurantName": name },
            "find foods by restaurant name",
        )
        .await
    }

    /// Upsert keyed by `_id`, returning the value that was written.
    async fn save(&self, mut food: Food) -> Result<Food> {
        food.ensure_id();
        let doc = Self::food_to_document(&food)?;

        self.collection()
            .replace_one(doc! { "_id": food.id.as_str() }, doc)
            .upsert(true)
            .await
            .map_err(|e| anyhow!("Failed to save food: {}", e))?;

        Ok(food)
    }

    async fn delete(&self, food: &Food) -> Result<()> {
        self.collection()
            .delete_one(doc! { "_id": food.id.as_str() })
            .await
            .map_err(|e| anyhow!("Failed to delete food: {}", e))?;

        Ok(())
    }
}
