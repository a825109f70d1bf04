//! # Food Service
//!
//! A small REST service managing food items offered by restaurants.
//!
//! ## Features
//!
//! - **CRUD over HTTP**: create, read, update and delete food items as JSON
//! - **Queries**: case-insensitive title search, lookups by restaurant id or name
//! - **Pluggable Storage**: in-memory store, MongoDB behind the `mongodb_backend` feature
//! - **Typed Errors**: every failure maps to one status code and a JSON body
//! - **Identity Hook**: caller identity from upstream-verified token claims
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use food_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryFoodStore::new())
//!         .serve("127.0.0.1:8080")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CallerIdentity, ClaimsIdentityResolver, Food, FoodStore, FoodUpdate, Identity,
        IdentityResolver, NewFood, NoIdentityResolver, ServiceError, ServiceResult, ValidJson,
        VerifiedClaims,
        error::{EntityError, RequestError, StorageError, ValidationError},
    };

    // === Storage ===
    pub use crate::storage::InMemoryFoodStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoFoodStore;

    // === Config ===
    pub use crate::config::{ConfigError, ServiceConfig, StoreBackend};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
