//! Search results returned by the resolver.

use crate::record::{Nutrients, NutritionRecord, REMOTE_CONFIDENCE, Source};
use crate::table::{Category, TableEntry};
use serde::{Deserialize, Serialize};

/// One resolved food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// `<source-prefix>_<name>`
    pub id: String,
    /// Name the values belong to (table key, remote description, or the query)
    pub matched_name: String,
    /// Category identifier
    pub category: String,
    /// Human readable provenance
    pub description: String,
    /// Nutrition values with source and confidence
    #[serde(rename = "nutrition")]
    pub record: NutritionRecord,
}

/// A hit from a remote nutrition database, before tagging.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFood {
    /// Identifier in the remote database
    pub external_id: String,
    /// Remote description
    pub name: String,
    /// Remote category label, if any
    pub category: Option<String>,
    /// Values per 100 g
    pub nutrients: Nutrients,
}

impl SearchResult {
    /// Exact table hit
    #[must_use]
    pub fn exact(entry: &TableEntry) -> Self {
        Self {
            id: format!("local_{}", entry.name),
            matched_name: entry.name.clone(),
            category: entry.category.as_str().to_string(),
            description: format!("本地数据库中的{}", entry.name),
            record: entry.record,
        }
    }

    /// Substring table hit for `query`
    #[must_use]
    pub fn fuzzy(entry: &TableEntry, query: &str) -> Self {
        Self {
            id: format!("local_{}", entry.name),
            matched_name: entry.name.clone(),
            category: entry.category.as_str().to_string(),
            description: format!("模糊匹配：{}（搜索词：{}）", entry.name, query),
            record: entry.record.as_fuzzy(),
        }
    }

    /// Keyword estimate for `query`
    #[must_use]
    pub fn estimated(category: Category, query: &str, record: NutritionRecord) -> Self {
        Self {
            id: format!("estimated_{}_{}", category.as_str(), query),
            matched_name: query.to_string(),
            category: category.as_str().to_string(),
            description: format!("关键词估算：{}类食材", category.label()),
            record,
        }
    }

    /// Remote hit from the source named `source_name`
    #[must_use]
    pub fn remote(source_name: &str, food: RemoteFood) -> Self {
        Self {
            id: format!("{source_name}_{}", food.external_id),
            description: format!("{} 数据库：{}", source_name.to_uppercase(), food.name),
            matched_name: food.name,
            category: food.category.unwrap_or_else(|| "unknown".to_string()),
            record: NutritionRecord::new(food.nutrients, Source::Remote, REMOTE_CONFIDENCE),
        }
    }

    /// Provenance tag
    #[must_use]
    pub fn source(&self) -> Source {
        self.record.source
    }

    /// Confidence in `[0, 1]`
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.record.confidence
    }

    /// Display strings with units
    #[must_use]
    pub fn formatted(&self) -> FormattedNutrition {
        FormattedNutrition::from(&self.record)
    }
}

/// Nutrition values rendered for display, e.g. `"52 kcal"`, `"76%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedNutrition {
    /// Energy with unit
    pub calories: String,
    /// Protein with unit
    pub protein: String,
    /// Carbohydrate with unit
    pub carbs: String,
    /// Fat with unit
    pub fat: String,
    /// Fiber with unit
    pub fiber: String,
    /// Whole percentage
    pub confidence: String,
}

impl From<&NutritionRecord> for FormattedNutrition {
    fn from(record: &NutritionRecord) -> Self {
        let n = &record.nutrients;
        Self {
            calories: format!("{} kcal", n.calories),
            protein: format!("{} g", n.protein),
            carbs: format!("{} g", n.carbs),
            fat: format!("{} g", n.fat),
            fiber: format!("{} g", n.fiber),
            confidence: format!("{:.0}%", record.confidence * 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ReferenceTable;

    #[test]
    fn test_ids() {
        let table = ReferenceTable::builtin();
        let apple = table.get("苹果").unwrap();

        assert_eq!(SearchResult::exact(apple).id, "local_苹果");
        assert_eq!(SearchResult::fuzzy(apple, "红苹果").id, "local_苹果");

        let record = NutritionRecord::new(Nutrients::default(), Source::Estimated, 0.6);
        assert_eq!(
            SearchResult::estimated(Category::Fruit, "蓝莓", record).id,
            "estimated_fruit_蓝莓"
        );
    }

    #[test]
    fn test_remote_is_tagged() {
        let result = SearchResult::remote(
            "usda",
            RemoteFood {
                external_id: "171688".to_string(),
                name: "Apples, raw".to_string(),
                category: None,
                nutrients: Nutrients::new(52.0, 0.26, 13.8, 0.17, 2.4),
            },
        );

        assert_eq!(result.id, "usda_171688");
        assert_eq!(result.category, "unknown");
        assert_eq!(result.source(), Source::Remote);
        assert_eq!(result.confidence(), 0.95);
    }

    #[test]
    fn test_formatted() {
        let table = ReferenceTable::builtin();
        let fuzzy = SearchResult::fuzzy(table.get("苹果").unwrap(), "红苹果");
        let formatted = fuzzy.formatted();

        assert_eq!(formatted.calories, "52 kcal");
        assert_eq!(formatted.protein, "0.3 g");
        assert_eq!(formatted.confidence, "72%");
    }

    #[test]
    fn test_serialized_shape() {
        let table = ReferenceTable::builtin();
        let json = serde_json::to_value(SearchResult::exact(table.get("虾").unwrap())).unwrap();

        assert_eq!(json["matchedName"], "虾");
        assert_eq!(json["category"], "seafood");
        assert_eq!(json["nutrition"]["source"], "local");
        assert_eq!(json["nutrition"]["protein"], 18.0);
    }
}
