//! HTTP server for the food API
//!
//! The `ServerBuilder` assembles:
//! - Health check routes
//! - Food CRUD and query routes
//! - Tracing and optional CORS layers

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::{accepts_json, build_food_routes, health_routes};
