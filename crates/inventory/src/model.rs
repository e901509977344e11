//! Users, ingredients, and the payloads that create and change them.

use crate::error::{InventoryError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use pantry_core::validation::{ValidationResult, Validator};
use pantry_nutrition::Nutrients;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static USERNAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,32}$").unwrap());

const MAX_NAME_CHARS: usize = 64;
const MAX_UNIT_CHARS: usize = 16;

/// Household role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Adult member
    #[default]
    Parent,
    /// Child member
    Child,
}

/// Daily nutrient targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionNeeds {
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrate (g)
    pub carbs: f64,
    /// Fat (g)
    pub fat: f64,
    /// Fiber (g)
    pub fiber: f64,
}

impl Default for NutritionNeeds {
    fn default() -> Self {
        Self {
            protein: 60.0,
            carbs: 250.0,
            fat: 70.0,
            fiber: 25.0,
        }
    }
}

/// Default daily energy target (kcal).
pub const DEFAULT_DAILY_CALORIES: f64 = 2000.0;

/// A household member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier
    pub id: Uuid,
    /// Unique login-style handle
    pub username: String,
    /// Display name
    pub name: String,
    /// Household role
    pub role: Role,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Height in centimetres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Body mass index, derived from height and weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    /// Daily energy target (kcal)
    pub daily_calorie_needs: f64,
    /// Daily nutrient targets
    pub nutrition_needs: NutritionNeeds,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last profile change
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Recompute BMI from the current height and weight
    pub(crate) fn refresh_bmi(&mut self) {
        if let (Some(height), Some(weight)) = (self.height, self.weight) {
            self.bmi = bmi(height, weight);
        }
    }
}

/// BMI from height in centimetres and weight in kilograms, one decimal.
#[must_use]
pub fn bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return None;
    }
    let metres = height_cm / 100.0;
    Some((weight_kg / (metres * metres) * 10.0).round() / 10.0)
}

/// Payload for creating a user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Unique handle
    #[serde(default)]
    pub username: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Role, parent when omitted
    pub role: Option<Role>,
    /// Age in years
    pub age: Option<u32>,
    /// Height in centimetres
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Daily energy target
    pub daily_calorie_needs: Option<f64>,
    /// Daily nutrient targets
    pub nutrition_needs: Option<NutritionNeeds>,
}

/// Partial profile update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    /// New display name
    pub name: Option<String>,
    /// New age
    pub age: Option<u32>,
    /// New height
    pub height: Option<f64>,
    /// New weight
    pub weight: Option<f64>,
}

fn check_body(
    mut validator: Validator,
    age: Option<u32>,
    height: Option<f64>,
    weight: Option<f64>,
) -> Validator {
    if let Some(age) = age {
        validator = validator.range("age", age, 0, 150);
    }
    if let Some(height) = height {
        validator = validator.range("height", height, 30.0, 300.0);
    }
    if let Some(weight) = weight {
        validator = validator.range("weight", weight, 1.0, 500.0);
    }
    validator
}

fn finish(result: ValidationResult) -> Result<()> {
    result.into_result().map_err(InventoryError::from)
}

impl NewUser {
    pub(crate) fn validate(&self) -> Result<()> {
        let mut validator = Validator::new()
            .pattern(
                "username",
                &self.username,
                &USERNAME,
                "3-32 letters, digits or underscores",
            )
            .required("name", &self.name)
            .max_chars("name", &self.name, MAX_NAME_CHARS);
        validator = check_body(validator, self.age, self.height, self.weight);
        if let Some(calories) = self.daily_calorie_needs {
            validator = validator.non_negative("dailyCalorieNeeds", calories);
        }
        if let Some(needs) = &self.nutrition_needs {
            validator = validator
                .non_negative("nutritionNeeds.protein", needs.protein)
                .non_negative("nutritionNeeds.carbs", needs.carbs)
                .non_negative("nutritionNeeds.fat", needs.fat)
                .non_negative("nutritionNeeds.fiber", needs.fiber);
        }
        finish(validator.validate())
    }

    pub(crate) fn into_user(self, now: DateTime<Utc>) -> User {
        let mut user = User {
            id: Uuid::new_v4(),
            username: self.username,
            name: self.name.trim().to_string(),
            role: self.role.unwrap_or_default(),
            age: self.age,
            height: self.height,
            weight: self.weight,
            bmi: None,
            daily_calorie_needs: self.daily_calorie_needs.unwrap_or(DEFAULT_DAILY_CALORIES),
            nutrition_needs: self.nutrition_needs.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        user.refresh_bmi();
        user
    }
}

impl UserUpdate {
    pub(crate) fn validate(&self) -> Result<()> {
        let mut validator = Validator::new();
        if let Some(name) = &self.name {
            validator = validator
                .required("name", name)
                .max_chars("name", name, MAX_NAME_CHARS);
        }
        finish(check_body(validator, self.age, self.height, self.weight).validate())
    }

    pub(crate) fn apply(self, user: &mut User, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            user.name = name.trim().to_string();
        }
        if let Some(age) = self.age {
            user.age = Some(age);
        }
        if let Some(height) = self.height {
            user.height = Some(height);
        }
        if let Some(weight) = self.weight {
            user.weight = Some(weight);
        }
        user.refresh_bmi();
        user.updated_at = now;
    }
}

/// A food item in a user's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Name
    pub name: String,
    /// Free-form category
    pub category: String,
    /// Amount on hand
    pub quantity: f64,
    /// Unit of `quantity`
    pub unit: String,
    /// Values per 100 g
    pub nutrition: Nutrients,
    /// Expiry instant
    pub expiry_date: DateTime<Utc>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last change
    pub updated_at: DateTime<Utc>,
}

/// Nutrition values as submitted; every field is optional so missing ones
/// can be reported.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NutritionInput {
    /// Energy (kcal)
    pub calories: Option<f64>,
    /// Protein (g)
    pub protein: Option<f64>,
    /// Carbohydrate (g)
    pub carbs: Option<f64>,
    /// Fat (g)
    pub fat: Option<f64>,
    /// Fiber (g)
    pub fiber: Option<f64>,
}

impl NutritionInput {
    fn fields(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("nutrition.calories", self.calories),
            ("nutrition.protein", self.protein),
            ("nutrition.carbs", self.carbs),
            ("nutrition.fat", self.fat),
            ("nutrition.fiber", self.fiber),
        ]
    }

    fn check(&self, mut validator: Validator, require_all: bool) -> Validator {
        for (field, value) in self.fields() {
            validator = match value {
                Some(v) => validator.non_negative(field, v),
                None if require_all => validator.present::<f64>(field, None),
                None => validator,
            };
        }
        validator
    }

    fn merge_into(&self, nutrients: &mut Nutrients) {
        let slots = [
            (&mut nutrients.calories, self.calories),
            (&mut nutrients.protein, self.protein),
            (&mut nutrients.carbs, self.carbs),
            (&mut nutrients.fat, self.fat),
            (&mut nutrients.fiber, self.fiber),
        ];
        for (slot, value) in slots {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }
}

impl From<Nutrients> for NutritionInput {
    fn from(n: Nutrients) -> Self {
        Self {
            calories: Some(n.calories),
            protein: Some(n.protein),
            carbs: Some(n.carbs),
            fat: Some(n.fat),
            fiber: Some(n.fiber),
        }
    }
}

/// Payload for adding an ingredient.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIngredient {
    /// Name
    #[serde(default)]
    pub name: String,
    /// Category
    #[serde(default)]
    pub category: String,
    /// Amount on hand
    pub quantity: Option<f64>,
    /// Unit of `quantity`
    #[serde(default)]
    pub unit: String,
    /// Expiry, RFC 3339 or `YYYY-MM-DD`
    pub expiry_date: Option<String>,
    /// Values per 100 g
    pub nutrition: Option<NutritionInput>,
}

/// Partial ingredient update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientUpdate {
    /// New name
    pub name: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New amount
    pub quantity: Option<f64>,
    /// New unit
    pub unit: Option<String>,
    /// New expiry, RFC 3339 or `YYYY-MM-DD`
    pub expiry_date: Option<String>,
    /// Nutrition fields to overwrite
    pub nutrition: Option<NutritionInput>,
}

/// Parse an expiry given as RFC 3339 or as a calendar date (midnight UTC).
pub fn parse_expiry(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            InventoryError::Validation(format!(
                "expiryDate: expected RFC 3339 or YYYY-MM-DD, got '{value}'"
            ))
        })
}

fn check_text(validator: Validator, field: &str, value: &str, max: usize) -> Validator {
    validator.required(field, value).max_chars(field, value, max)
}

impl NewIngredient {
    pub(crate) fn validate(&self) -> Result<DateTime<Utc>> {
        let mut validator = Validator::new();
        validator = check_text(validator, "name", &self.name, MAX_NAME_CHARS);
        validator = check_text(validator, "category", &self.category, MAX_NAME_CHARS);
        validator = check_text(validator, "unit", &self.unit, MAX_UNIT_CHARS);
        validator = match self.quantity {
            Some(q) => validator.non_negative("quantity", q),
            None => validator.present::<f64>("quantity", None),
        };
        validator = validator.present("expiryDate", self.expiry_date.as_ref());
        validator = match &self.nutrition {
            Some(nutrition) => nutrition.check(validator, true),
            None => validator.present::<NutritionInput>("nutrition", None),
        };
        finish(validator.validate())?;

        // Presence checked above
        parse_expiry(self.expiry_date.as_deref().unwrap_or_default())
    }

    pub(crate) fn into_ingredient(self, user_id: Uuid, expiry_date: DateTime<Utc>, now: DateTime<Utc>) -> Ingredient {
        let mut nutrition = Nutrients::default();
        if let Some(input) = &self.nutrition {
            input.merge_into(&mut nutrition);
        }
        Ingredient {
            id: Uuid::new_v4(),
            user_id,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            quantity: self.quantity.unwrap_or_default(),
            unit: self.unit.trim().to_string(),
            nutrition,
            expiry_date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl IngredientUpdate {
    pub(crate) fn validate(&self) -> Result<Option<DateTime<Utc>>> {
        let mut validator = Validator::new();
        if let Some(name) = &self.name {
            validator = check_text(validator, "name", name, MAX_NAME_CHARS);
        }
        if let Some(category) = &self.category {
            validator = check_text(validator, "category", category, MAX_NAME_CHARS);
        }
        if let Some(unit) = &self.unit {
            validator = check_text(validator, "unit", unit, MAX_UNIT_CHARS);
        }
        if let Some(quantity) = self.quantity {
            validator = validator.non_negative("quantity", quantity);
        }
        if let Some(nutrition) = &self.nutrition {
            validator = nutrition.check(validator, false);
        }
        finish(validator.validate())?;

        self.expiry_date.as_deref().map(parse_expiry).transpose()
    }

    pub(crate) fn apply(self, ingredient: &mut Ingredient, expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            ingredient.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            ingredient.category = category.trim().to_string();
        }
        if let Some(quantity) = self.quantity {
            ingredient.quantity = quantity;
        }
        if let Some(unit) = self.unit {
            ingredient.unit = unit.trim().to_string();
        }
        if let Some(expiry) = expiry {
            ingredient.expiry_date = expiry;
        }
        if let Some(nutrition) = &self.nutrition {
            nutrition.merge_into(&mut ingredient.nutrition);
        }
        ingredient.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bmi() {
        assert_eq!(bmi(175.0, 70.0), Some(22.9));
        assert_eq!(bmi(0.0, 70.0), None);
    }

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser {
            username: "mum_01".into(),
            name: " 妈妈 ".into(),
            height: Some(160.0),
            weight: Some(55.0),
            ..Default::default()
        }
        .into_user(Utc::now());

        assert_eq!(user.name, "妈妈");
        assert_eq!(user.role, Role::Parent);
        assert_eq!(user.daily_calorie_needs, 2000.0);
        assert_eq!(user.nutrition_needs, NutritionNeeds::default());
        assert_eq!(user.bmi, Some(21.5));
    }

    #[test]
    fn test_new_user_validation() {
        let bad = NewUser {
            username: "a b".into(),
            name: String::new(),
            age: Some(200),
            ..Default::default()
        };
        let err = bad.validate().unwrap_err().to_string();
        assert!(err.contains("username"));
        assert!(err.contains("name"));
        assert!(err.contains("age"));
    }

    #[test]
    fn test_parse_expiry() {
        let date = parse_expiry("2025-03-01").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());

        let instant = parse_expiry("2025-03-01T08:00:00+08:00").unwrap();
        assert_eq!(instant, date);

        assert!(parse_expiry("next tuesday").is_err());
    }

    #[test]
    fn test_new_ingredient_requires_fields() {
        let err = NewIngredient {
            name: "牛奶".into(),
            nutrition: Some(NutritionInput {
                calories: Some(64.0),
                ..Default::default()
            }),
            ..Default::default()
        }
        .validate()
        .unwrap_err()
        .to_string();

        for field in ["category", "unit", "quantity", "expiryDate", "nutrition.protein"] {
            assert!(err.contains(field), "missing {field} in {err}");
        }
    }

    #[test]
    fn test_ingredient_update_merges_nutrition() {
        let now = Utc::now();
        let mut ingredient = NewIngredient {
            name: "牛奶".into(),
            category: "dairy".into(),
            quantity: Some(1.0),
            unit: "L".into(),
            expiry_date: Some("2025-03-01".into()),
            nutrition: Some(Nutrients::new(64.0, 3.2, 4.8, 3.6, 0.0).into()),
        }
        .into_ingredient(Uuid::new_v4(), now, now);

        let update = IngredientUpdate {
            quantity: Some(0.5),
            nutrition: Some(NutritionInput {
                fat: Some(1.5),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(update.validate().unwrap().is_none());
        update.apply(&mut ingredient, None, now);

        assert_eq!(ingredient.quantity, 0.5);
        assert_eq!(ingredient.nutrition.fat, 1.5);
        assert_eq!(ingredient.nutrition.calories, 64.0);
    }
}
