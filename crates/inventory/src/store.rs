//! In-memory inventory store.
//!
//! All users and ingredients live behind one lock so that a user removal and
//! the removal of their ingredients happen together.

use crate::error::{InventoryError, Result};
use crate::model::{Ingredient, IngredientUpdate, NewIngredient, NewUser, User, UserUpdate};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, User>,
    ingredients: HashMap<Uuid, Ingredient>,
}

impl State {
    fn user(&self, id: Uuid) -> Result<&User> {
        self.users.get(&id).ok_or(InventoryError::UserNotFound(id))
    }

    fn owned_mut(&mut self, user_id: Uuid, id: Uuid) -> Result<&mut Ingredient> {
        self.ingredients
            .get_mut(&id)
            .filter(|i| i.user_id == user_id)
            .ok_or(InventoryError::IngredientNotFound(id))
    }

    fn sorted_for(&self, user_id: Uuid, filter: impl Fn(&Ingredient) -> bool) -> Vec<Ingredient> {
        let mut items: Vec<Ingredient> = self
            .ingredients
            .values()
            .filter(|i| i.user_id == user_id && filter(i))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.expiry_date
                .cmp(&b.expiry_date)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        items
    }
}

/// Counts for the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    /// Registered users
    pub users: usize,
    /// Ingredients across all users
    pub ingredients: usize,
}

/// Thread-safe store of users and their ingredients.
#[derive(Debug, Default)]
pub struct InventoryStore {
    state: RwLock<State>,
}

impl InventoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a user; usernames are unique.
    pub fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let mut state = self.write();
        if state.users.values().any(|u| u.username == new_user.username) {
            return Err(InventoryError::UsernameTaken(new_user.username));
        }
        let user = new_user.into_user(Utc::now());
        state.users.insert(user.id, user.clone());
        info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Look up a user
    pub fn get_user(&self, id: Uuid) -> Result<User> {
        self.read().user(id).cloned()
    }

    /// All users, oldest first
    #[must_use]
    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.read().users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.username.cmp(&b.username)));
        users
    }

    /// Apply a partial profile update. BMI follows height and weight.
    pub fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<User> {
        update.validate()?;
        let mut state = self.write();
        let user = state
            .users
            .get_mut(&id)
            .ok_or(InventoryError::UserNotFound(id))?;
        update.apply(user, Utc::now());
        Ok(user.clone())
    }

    /// Remove a user and every ingredient they own. Returns how many
    /// ingredients went with them.
    pub fn remove_user(&self, id: Uuid) -> Result<usize> {
        let mut state = self.write();
        state
            .users
            .remove(&id)
            .ok_or(InventoryError::UserNotFound(id))?;
        let before = state.ingredients.len();
        state.ingredients.retain(|_, i| i.user_id != id);
        let removed = before - state.ingredients.len();
        info!(user_id = %id, ingredients = removed, "User removed");
        Ok(removed)
    }

    /// A user's ingredients, soonest expiry first
    pub fn list_ingredients(&self, user_id: Uuid) -> Result<Vec<Ingredient>> {
        let state = self.read();
        state.user(user_id)?;
        Ok(state.sorted_for(user_id, |_| true))
    }

    /// Ingredients expiring within `days` from now (already expired included)
    pub fn expiring(&self, user_id: Uuid, days: i64) -> Result<Vec<Ingredient>> {
        self.expiring_within(user_id, days, Utc::now())
    }

    /// [`InventoryStore::expiring`] against an explicit clock
    pub fn expiring_within(&self, user_id: Uuid, days: i64, now: DateTime<Utc>) -> Result<Vec<Ingredient>> {
        if days < 0 {
            return Err(InventoryError::Validation(format!(
                "days: must not be negative (got {days})"
            )));
        }
        let cutoff = Duration::try_days(days)
            .and_then(|window| now.checked_add_signed(window))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let state = self.read();
        state.user(user_id)?;
        let items = state.sorted_for(user_id, |i| i.expiry_date <= cutoff);
        debug!(user_id = %user_id, days, count = items.len(), "Expiring ingredients");
        Ok(items)
    }

    /// One ingredient; another user's ingredient reads as not found
    pub fn get_ingredient(&self, user_id: Uuid, id: Uuid) -> Result<Ingredient> {
        let state = self.read();
        state.user(user_id)?;
        state
            .ingredients
            .get(&id)
            .filter(|i| i.user_id == user_id)
            .cloned()
            .ok_or(InventoryError::IngredientNotFound(id))
    }

    /// Add an ingredient for a user
    pub fn add_ingredient(&self, user_id: Uuid, new_ingredient: NewIngredient) -> Result<Ingredient> {
        let expiry = new_ingredient.validate()?;
        let mut state = self.write();
        state.user(user_id)?;
        let ingredient = new_ingredient.into_ingredient(user_id, expiry, Utc::now());
        state.ingredients.insert(ingredient.id, ingredient.clone());
        debug!(user_id = %user_id, ingredient_id = %ingredient.id, name = %ingredient.name, "Ingredient added");
        Ok(ingredient)
    }

    /// Partially update an ingredient
    pub fn update_ingredient(&self, user_id: Uuid, id: Uuid, update: IngredientUpdate) -> Result<Ingredient> {
        let expiry = update.validate()?;
        let mut state = self.write();
        state.user(user_id)?;
        let ingredient = state.owned_mut(user_id, id)?;
        update.apply(ingredient, expiry, Utc::now());
        Ok(ingredient.clone())
    }

    /// Remove an ingredient
    pub fn remove_ingredient(&self, user_id: Uuid, id: Uuid) -> Result<Ingredient> {
        let mut state = self.write();
        state.user(user_id)?;
        state.owned_mut(user_id, id)?;
        state
            .ingredients
            .remove(&id)
            .ok_or(InventoryError::IngredientNotFound(id))
    }

    /// Current counts
    #[must_use]
    pub fn stats(&self) -> InventoryStats {
        let state = self.read();
        InventoryStats {
            users: state.users.len(),
            ingredients: state.ingredients.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NutritionInput;
    use pantry_nutrition::Nutrients;
    use std::sync::Arc;

    fn user(store: &InventoryStore, username: &str) -> User {
        store
            .create_user(NewUser {
                username: username.into(),
                name: username.into(),
                ..Default::default()
            })
            .unwrap()
    }

    fn milk(expiry: &str) -> NewIngredient {
        NewIngredient {
            name: "牛奶".into(),
            category: "dairy".into(),
            quantity: Some(1.0),
            unit: "L".into(),
            expiry_date: Some(expiry.into()),
            nutrition: Some(NutritionInput::from(Nutrients::new(64.0, 3.2, 4.8, 3.6, 0.0))),
        }
    }

    #[test]
    fn test_duplicate_username() {
        let store = InventoryStore::new();
        user(&store, "mum");
        let err = store
            .create_user(NewUser {
                username: "mum".into(),
                name: "Other".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, InventoryError::UsernameTaken(_)));
    }

    #[test]
    fn test_update_user_recomputes_bmi() {
        let store = InventoryStore::new();
        let mum = user(&store, "mum");
        assert_eq!(mum.bmi, None);

        let updated = store
            .update_user(
                mum.id,
                UserUpdate {
                    height: Some(175.0),
                    weight: Some(70.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.bmi, Some(22.9));
        assert!(updated.updated_at >= mum.updated_at);

        let lighter = store
            .update_user(
                mum.id,
                UserUpdate {
                    weight: Some(60.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(lighter.bmi, Some(19.6));
    }

    #[test]
    fn test_list_sorted_by_expiry() {
        let store = InventoryStore::new();
        let mum = user(&store, "mum");
        store.add_ingredient(mum.id, milk("2025-05-01")).unwrap();
        store.add_ingredient(mum.id, milk("2025-01-01")).unwrap();
        store.add_ingredient(mum.id, milk("2025-03-01")).unwrap();

        let dates: Vec<String> = store
            .list_ingredients(mum.id)
            .unwrap()
            .iter()
            .map(|i| i.expiry_date.format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(dates, ["2025-01-01", "2025-03-01", "2025-05-01"]);
    }

    #[test]
    fn test_expiring_window() {
        let store = InventoryStore::new();
        let mum = user(&store, "mum");
        store.add_ingredient(mum.id, milk("2025-01-01")).unwrap();
        store.add_ingredient(mum.id, milk("2025-01-05")).unwrap();
        store.add_ingredient(mum.id, milk("2025-01-20")).unwrap();

        let now = parse("2025-01-02");
        assert_eq!(store.expiring_within(mum.id, 7, now).unwrap().len(), 2);
        assert_eq!(store.expiring_within(mum.id, 0, now).unwrap().len(), 1);
        assert_eq!(store.expiring_within(mum.id, 30, now).unwrap().len(), 3);
        assert!(store.expiring_within(mum.id, -1, now).is_err());
        assert_eq!(store.expiring_within(mum.id, i64::MAX, now).unwrap().len(), 3);
    }

    fn parse(date: &str) -> DateTime<Utc> {
        crate::model::parse_expiry(date).unwrap()
    }

    #[test]
    fn test_ingredients_are_private_to_owner() {
        let store = InventoryStore::new();
        let mum = user(&store, "mum");
        let kid = user(&store, "kid");
        let item = store.add_ingredient(mum.id, milk("2025-01-01")).unwrap();

        assert!(matches!(
            store.get_ingredient(kid.id, item.id),
            Err(InventoryError::IngredientNotFound(_))
        ));
        assert!(store.remove_ingredient(kid.id, item.id).is_err());
        assert!(
            store
                .update_ingredient(kid.id, item.id, IngredientUpdate::default())
                .is_err()
        );
        assert!(store.list_ingredients(kid.id).unwrap().is_empty());
        assert_eq!(store.get_ingredient(mum.id, item.id).unwrap(), item);
    }

    #[test]
    fn test_remove_user_cascades() {
        let store = InventoryStore::new();
        let mum = user(&store, "mum");
        let kid = user(&store, "kid");
        store.add_ingredient(mum.id, milk("2025-01-01")).unwrap();
        store.add_ingredient(mum.id, milk("2025-01-02")).unwrap();
        store.add_ingredient(kid.id, milk("2025-01-03")).unwrap();

        assert_eq!(store.remove_user(mum.id).unwrap(), 2);
        assert_eq!(store.stats(), InventoryStats { users: 1, ingredients: 1 });
        assert!(matches!(
            store.list_ingredients(mum.id),
            Err(InventoryError::UserNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_user() {
        let store = InventoryStore::new();
        let err = store.add_ingredient(Uuid::new_v4(), milk("2025-01-01")).unwrap_err();
        assert!(matches!(err, InventoryError::UserNotFound(_)));
    }

    #[test]
    fn test_concurrent_adds() {
        let store = Arc::new(InventoryStore::new());
        let mum = user(&store, "mum");
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        store.add_ingredient(mum.id, milk("2025-01-01")).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.list_ingredients(mum.id).unwrap().len(), 80);
    }
}
