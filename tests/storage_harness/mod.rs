//! Shared test harness for food store backends
//!
//! Provides sample data builders and two macro-generated suites:
//! - `food_store_tests!` validates a `FoodStore` implementation directly
//! - `rest_integration_tests!` drives the same store through the HTTP layer
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod food_store_tests;

use food_service::core::Food;

/// A fully populated food for `restaurant_id`
pub fn sample_food(restaurant_id: &str, restaurant_name: &str, title: &str) -> Food {
    Food::new(restaurant_id)
        .with_restaurant_name(restaurant_name)
        .with_title(title)
        .with_image(format!("{}.png", title.to_lowercase().replace(' ', "_")))
        .with_description(format!("{} from {}", title, restaurant_name))
}

/// A food with only the required restaurant id set
pub fn bare_food(restaurant_id: &str) -> Food {
    Food::new(restaurant_id)
}

/// Sorted ids of `foods`, for order-independent comparisons
pub fn ids_of(foods: &[Food]) -> Vec<String> {
    let mut ids: Vec<String> = foods.iter().map(|f| f.id.clone()).collect();
    ids.sort();
    ids
}

/// Sorted titles of `foods`
pub fn titles_of(foods: &[Food]) -> Vec<String> {
    let mut titles: Vec<String> = foods.iter().filter_map(|f| f.title.clone()).collect();
    titles.sort();
    titles
}
