//! Household members and their ingredient inventories
//!
//! Users are identified by id and own their ingredients; an ingredient is
//! only ever visible through its owner. Lists come back soonest-expiry first.
//!
//! ```rust
//! use pantry_inventory::{InventoryStore, NewIngredient, NewUser, NutritionInput};
//!
//! let store = InventoryStore::new();
//! let mum = store
//!     .create_user(NewUser { username: "mum".into(), name: "Mum".into(), ..Default::default() })
//!     .unwrap();
//!
//! let milk = NewIngredient {
//!     name: "牛奶".into(),
//!     category: "dairy".into(),
//!     quantity: Some(1.0),
//!     unit: "L".into(),
//!     expiry_date: Some("2030-01-01".into()),
//!     nutrition: Some(NutritionInput {
//!         calories: Some(64.0),
//!         protein: Some(3.2),
//!         carbs: Some(4.8),
//!         fat: Some(3.6),
//!         fiber: Some(0.0),
//!     }),
//! };
//! store.add_ingredient(mum.id, milk).unwrap();
//! assert_eq!(store.list_ingredients(mum.id).unwrap().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod model;
pub mod store;

pub use error::{InventoryError, Result};
pub use model::{
    DEFAULT_DAILY_CALORIES, Ingredient, IngredientUpdate, NewIngredient, NewUser, NutritionInput,
    NutritionNeeds, Role, User, UserUpdate, bmi, parse_expiry,
};
pub use store::{InventoryStats, InventoryStore};
