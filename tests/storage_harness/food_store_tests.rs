//! Macro-generated test suite for `FoodStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use food_service::storage::InMemoryFoodStore;
//! use storage_harness::*;
//!
//! food_store_tests!(InMemoryFoodStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_save_and_find_by_id`: every field survives storage
//! - `test_find_by_id_missing`: unknown id yields `None`
//! - `test_find_all_empty` / `test_find_all_returns_every_record`
//! - `test_save_generates_missing_id`
//! - `test_save_existing_id_replaces`: upsert, no duplicate
//! - `test_optional_fields_stay_absent`
//! - `test_delete_removes_record` / `test_delete_missing_is_noop`
//!
//! ## Queries
//! - `test_title_search_is_case_insensitive_substring`
//! - `test_title_search_treats_fragment_literally`
//! - `test_title_search_skips_untitled`
//! - `test_find_by_restaurant_id_is_exact`
//! - `test_find_by_restaurant_name_is_exact`
//!
//! ## Concurrency
//! - `test_concurrent_saves`

/// Generate a full `FoodStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store implementing
/// `FoodStore + 'static`. It is re-evaluated for each test.
#[macro_export]
macro_rules! food_store_tests {
    ($factory:expr) => {
        mod food_store_contract_tests {
            use super::*;
            use food_service::core::{Food, FoodStore};
            use std::sync::Arc;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_save_and_find_by_id() {
                let store = $factory;
                let food = sample_food("r1", "Joe's", "Burger");

                let saved = store.save(food.clone()).await.unwrap();
                assert_eq!(saved.id, food.id);

                let found = store.find_by_id(&food.id).await.unwrap().unwrap();
                assert_eq!(found, food);
                assert_eq!(found.restaurant_id, "r1");
                assert_eq!(found.restaurant_name.as_deref(), Some("Joe's"));
                assert_eq!(found.title.as_deref(), Some("Burger"));
                assert_eq!(found.image.as_deref(), Some("burger.png"));
                assert_eq!(found.description.as_deref(), Some("Burger from Joe's"));
            }

            #[tokio::test]
            async fn test_find_by_id_missing() {
                let store = $factory;
                assert!(store.find_by_id("does-not-exist").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_find_all_empty() {
                let store = $factory;
                assert!(store.find_all().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_find_all_returns_every_record() {
                let store = $factory;
                let mut expected = Vec::new();
                for i in 0..5 {
                    let food = sample_food("r1", "Joe's", &format!("Dish {}", i));
                    expected.push(store.save(food).await.unwrap());
                }

                let all = store.find_all().await.unwrap();
                assert_eq!(all.len(), 5);
                assert_eq!(ids_of(&all), ids_of(&expected));
            }

            #[tokio::test]
            async fn test_save_generates_missing_id() {
                let store = $factory;
                let mut food = bare_food("r1");
                food.id.clear();

                let saved = store.save(food).await.unwrap();
                assert!(!saved.id.is_empty());
                assert!(store.find_by_id(&saved.id).await.unwrap().is_some());
            }

            #[tokio::test]
            async fn test_save_existing_id_replaces() {
                let store = $factory;
                let mut food = sample_food("r1", "Joe's", "Burger");
                store.save(food.clone()).await.unwrap();

                food.title = Some("Double Burger".to_string());
                food.description = None;
                store.save(food.clone()).await.unwrap();

                let all = store.find_all().await.unwrap();
                assert_eq!(all.len(), 1);
                assert_eq!(all[0].title.as_deref(), Some("Double Burger"));
                assert!(all[0].description.is_none());
            }

            #[tokio::test]
            async fn test_optional_fields_stay_absent() {
                let store = $factory;
                let food = bare_food("r9");
                store.save(food.clone()).await.unwrap();

                let found = store.find_by_id(&food.id).await.unwrap().unwrap();
                assert_eq!(found.restaurant_id, "r9");
                assert!(found.restaurant_name.is_none());
                assert!(found.title.is_none());
                assert!(found.image.is_none());
                assert!(found.description.is_none());
            }

            #[tokio::test]
            async fn test_delete_removes_record() {
                let store = $factory;
                let keep = store.save(sample_food("r1", "Joe's", "Soup")).await.unwrap();
                let gone = store.save(sample_food("r1", "Joe's", "Salad")).await.unwrap();

                store.delete(&gone).await.unwrap();

                assert!(store.find_by_id(&gone.id).await.unwrap().is_none());
                let all = store.find_all().await.unwrap();
                assert_eq!(ids_of(&all), vec![keep.id]);
            }

            #[tokio::test]
            async fn test_delete_missing_is_noop() {
                let store = $factory;
                let food = bare_food("r1");
                store.delete(&food).await.unwrap();
                assert!(store.find_all().await.unwrap().is_empty());
            }

            // ==================================================================
            // Queries
            // ==================================================================

            #[tokio::test]
            async fn test_title_search_is_case_insensitive_substring() {
                let store = $factory;
                store.save(sample_food("r1", "Joe's", "Veggie Burger")).await.unwrap();
                store.save(sample_food("r2", "Ann's", "Cheeseburger")).await.unwrap();
                store.save(sample_food("r1", "Joe's", "Fries")).await.unwrap();

                let found = store.find_by_title_containing("burger").await.unwrap();
                assert_eq!(titles_of(&found), vec!["Cheeseburger", "Veggie Burger"]);

                let found = store.find_by_title_containing("BURGER").await.unwrap();
                assert_eq!(found.len(), 2);
            }

            #[tokio::test]
            async fn test_title_search_treats_fragment_literally() {
                let store = $factory;
                store.save(sample_food("r1", "Joe's", "Soda 1+1 (large)")).await.unwrap();
                store.save(sample_food("r1", "Joe's", "Soda 11 large")).await.unwrap();

                let found = store.find_by_title_containing("1+1 (large)").await.unwrap();
                assert_eq!(titles_of(&found), vec!["Soda 1+1 (large)"]);

                let found = store.find_by_title_containing(".*").await.unwrap();
                assert!(found.is_empty());
            }

            #[tokio::test]
            async fn test_title_search_skips_untitled() {
                let store = $factory;
                store.save(bare_food("r1")).await.unwrap();

                let found = store.find_by_title_containing("a").await.unwrap();
                assert!(found.is_empty());
            }

            #[tokio::test]
            async fn test_find_by_restaurant_id_is_exact() {
                let store = $factory;
                let a = store.save(sample_food("r1", "Joe's", "Burger")).await.unwrap();
                let b = store.save(sample_food("r1", "Joe's", "Fries")).await.unwrap();
                store.save(sample_food("r10", "Joe's", "Shake")).await.unwrap();
                store.save(sample_food("r2", "Joe's", "Pie")).await.unwrap();

                let found = store.find_by_restaurant_id("r1").await.unwrap();
                assert_eq!(ids_of(&found), ids_of(&[a, b]));
                assert!(found.iter().all(|f| f.restaurant_id == "r1"));

                assert!(store.find_by_restaurant_id("r").await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_find_by_restaurant_name_is_exact() {
                let store = $factory;
                let a = store.save(sample_food("r1", "Joe's", "Burger")).await.unwrap();
                store.save(sample_food("r2", "Joe's Diner", "Fries")).await.unwrap();
                store.save(bare_food("r3")).await.unwrap();

                let found = store.find_by_restaurant_name("Joe's").await.unwrap();
                assert_eq!(ids_of(&found), vec![a.id]);

                assert!(store.find_by_restaurant_name("Nobody").await.unwrap().is_empty());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_saves() {
                let store: Arc<dyn FoodStore> = Arc::new($factory);

                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        let food = Food::new(format!("r{}", i % 3))
                            .with_title(format!("Dish {}", i));
                        store.save(food).await.unwrap()
                    }));
                }

                let mut saved = Vec::new();
                for handle in handles {
                    saved.push(handle.await.unwrap());
                }

                let all = store.find_all().await.unwrap();
                assert_eq!(ids_of(&all), ids_of(&saved));
                assert_eq!(store.find_by_restaurant_id("r0").await.unwrap().len(), 4);
            }
        }
    };
}
