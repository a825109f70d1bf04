//! Core module containing the entity, store contract and request plumbing

pub mod auth;
pub mod error;
pub mod extractors;
pub mod food;
pub mod store;

pub use auth::{
    CallerIdentity, ClaimsIdentityResolver, HasIdentityResolver, Identity, IdentityResolver,
    NoIdentityResolver, VerifiedClaims,
};
pub use error::{ServiceError, ServiceResult};
pub use extractors::ValidJson;
pub use food::{Food, FoodUpdate, NewFood};
pub use store::FoodStore;
