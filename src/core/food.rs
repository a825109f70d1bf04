//! The Food entity and the request payloads that produce it

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;
use validator::Validate;

/// A menu item offered by a restaurant
///
/// Stored in the `foods` collection. `restaurant_name` is a denormalized copy
/// of the restaurant's display name; nothing keeps it in sync.
///
/// Equality and hashing only look at `id`, `title`, `restaurant_name` and
/// `restaurant_id`. Two records that differ only in `image` or `description`
/// compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "restaurantID")]
    pub restaurant_id: String,

    #[serde(rename = "restaurantName")]
    pub restaurant_name: Option<String>,

    pub title: Option<String>,

    pub image: Option<String>,

    pub description: Option<String>,
}

impl Food {
    /// Create a food item with a freshly generated id
    pub fn new(restaurant_id: impl Into<String>) -> Self {
        Self {
            id: new_food_id(),
            restaurant_id: restaurant_id.into(),
            restaurant_name: None,
            title: None,
            image: None,
            description: None,
        }
    }

    pub fn with_restaurant_name(mut self, name: impl Into<String>) -> Self {
        self.restaurant_name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Assign a generated id if none is set. Existing ids are never replaced.
    pub fn ensure_id(&mut self) {
        if self.id.is_empty() {
            self.id = new_food_id();
        }
    }

    /// Overwrite the editable fields from an update request.
    ///
    /// `id`, `restaurant_id` and `restaurant_name` are left untouched.
    pub fn apply_update(&mut self, update: FoodUpdate) {
        self.title = update.title;
        self.image = update.image;
        self.description = update.description;
    }

    /// Case-insensitive substring match on the title
    pub fn title_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title
            .as_deref()
            .is_some_and(|title| title.to_lowercase().contains(&needle))
    }
}

fn new_food_id() -> String {
    Uuid::new_v4().to_string()
}

/// JSON name of a Food field, for reporting field errors to clients
pub fn wire_field_name(field: &str) -> &str {
    match field {
        "restaurant_id" => "restaurantID",
        "restaurant_name" => "restaurantName",
        other => other,
    }
}

impl PartialEq for Food {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.restaurant_name == other.restaurant_name
            && self.restaurant_id == other.restaurant_id
    }
}

impl Eq for Food {}

impl Hash for Food {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.title.hash(state);
        self.restaurant_name.hash(state);
        self.restaurant_id.hash(state);
    }
}

impl fmt::Display for Food {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Food [id={}, title={}, desc={}]",
            self.id,
            self.title.as_deref().unwrap_or("null"),
            self.description.as_deref().unwrap_or("null")
        )
    }
}

/// Body of `POST /food`
///
/// `restaurantID` is optional at the serde level so that a missing value is
/// reported as a field error rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewFood {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(rename = "restaurantID", default)]
    #[validate(
        required(message = "restaurantID is required"),
        length(min = 1, message = "restaurantID must not be empty")
    )]
    pub restaurant_id: Option<String>,

    #[serde(rename = "restaurantName", default)]
    pub restaurant_name: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl NewFood {
    /// Turn a validated payload into an entity, generating the id if absent.
    pub fn into_food(self) -> Food {
        let mut food = Food {
            id: self.id.unwrap_or_default(),
            restaurant_id: self.restaurant_id.unwrap_or_default(),
            restaurant_name: self.restaurant_name,
            title: self.title,
            image: self.image,
            description: self.description,
        };
        food.ensure_id();
        food
    }
}

/// Body of `PUT /food/{id}`
///
/// Any other Food fields in the body (`id`, `restaurantID`, `restaurantName`)
/// are accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FoodUpdate {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}
