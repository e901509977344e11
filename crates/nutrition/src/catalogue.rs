//! Listing of everything the reference table knows.

use crate::table::{Category, ReferenceTable};
use serde::Serialize;

/// Summary of one table entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodSummary {
    /// Canonical name
    pub name: String,
    /// Category
    pub category: Category,
    /// Base confidence
    pub confidence: f64,
}

/// The full table listing.
#[derive(Debug, Clone, Serialize)]
pub struct Catalogue {
    /// Entries sorted by category then name
    pub foods: Vec<FoodSummary>,
    /// Distinct categories, sorted
    pub categories: Vec<Category>,
}

impl Catalogue {
    /// Number of foods listed
    #[must_use]
    pub fn len(&self) -> usize {
        self.foods.len()
    }

    /// Whether nothing is listed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

/// Build the catalogue for a table.
///
/// Categories sort by their identifier; names sort by code point.
#[must_use]
pub fn catalogue(table: &ReferenceTable) -> Catalogue {
    let mut foods: Vec<FoodSummary> = table
        .iter()
        .map(|entry| FoodSummary {
            name: entry.name.clone(),
            category: entry.category,
            confidence: entry.record.confidence,
        })
        .collect();
    foods.sort_by(|a, b| {
        a.category
            .as_str()
            .cmp(b.category.as_str())
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut categories: Vec<Category> = foods.iter().map(|f| f.category).collect();
    categories.sort_by_key(Category::as_str);
    categories.dedup();

    Catalogue { foods, categories }
}
