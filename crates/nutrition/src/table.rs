//! The household reference table.
//!
//! An ordered list of canonical food names with per-100 g values. Declaration
//! order is part of the contract: fuzzy matching returns the first key that
//! matches, and the catalogue is derived from it.

use crate::error::{NutritionError, Result};
use crate::record::{Nutrients, NutritionRecord, Source};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Food category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// 水果
    Fruit,
    /// 蔬菜
    Vegetable,
    /// 肉类
    Meat,
    /// 海鲜
    Seafood,
    /// 蛋奶
    Dairy,
    /// 谷物
    Grain,
    /// 豆类
    Legume,
    /// 坚果
    Nut,
    /// 调料
    Seasoning,
    /// Anything not in the table
    Other,
}

impl Category {
    /// Stable identifier
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fruit => "fruit",
            Self::Vegetable => "vegetable",
            Self::Meat => "meat",
            Self::Seafood => "seafood",
            Self::Dairy => "dairy",
            Self::Grain => "grain",
            Self::Legume => "legume",
            Self::Nut => "nut",
            Self::Seasoning => "seasoning",
            Self::Other => "other",
        }
    }

    /// Display label in the table's language
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fruit => "水果",
            Self::Vegetable => "蔬菜",
            Self::Meat => "肉类",
            Self::Seafood => "海鲜",
            Self::Dairy => "蛋奶",
            Self::Grain => "谷物",
            Self::Legume => "豆类",
            Self::Nut => "坚果",
            Self::Seasoning => "调料",
            Self::Other => "其他",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reference table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableEntry {
    /// Canonical name, unique within the table
    pub name: String,
    /// Category the entry belongs to
    pub category: Category,
    /// Values, always tagged [`Source::Local`]
    pub record: NutritionRecord,
}

impl TableEntry {
    /// Create an entry with a local record
    pub fn new(name: impl Into<String>, category: Category, nutrients: Nutrients, confidence: f64) -> Self {
        Self {
            name: name.into(),
            category,
            record: NutritionRecord::new(nutrients, Source::Local, confidence),
        }
    }
}

/// Read-only, ordered name → record mapping.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    entries: Vec<TableEntry>,
    index: HashMap<String, usize>,
}

static BUILTIN: Lazy<Arc<ReferenceTable>> = Lazy::new(|| {
    let entries = BUILTIN_ROWS
        .iter()
        .map(|&(name, category, calories, protein, carbs, fat, fiber, confidence)| {
            TableEntry::new(
                name,
                category,
                Nutrients::new(calories, protein, carbs, fat, fiber),
                confidence,
            )
        })
        .collect();
    Arc::new(ReferenceTable::from_trusted(entries))
});

impl ReferenceTable {
    /// The built-in household table, shared process-wide
    #[must_use]
    pub fn builtin() -> Arc<ReferenceTable> {
        Arc::clone(&BUILTIN)
    }

    /// Build a table, rejecting duplicate names and out-of-range values
    pub fn from_entries(entries: Vec<TableEntry>) -> Result<Self> {
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(NutritionError::InvalidEntry {
                    name: entry.name.clone(),
                    reason: "name is empty".to_string(),
                });
            }
            if !entry.record.nutrients.is_valid() {
                return Err(NutritionError::InvalidEntry {
                    name: entry.name.clone(),
                    reason: "nutrient values must be non-negative".to_string(),
                });
            }
            if !(0.0..=1.0).contains(&entry.record.confidence) {
                return Err(NutritionError::InvalidEntry {
                    name: entry.name.clone(),
                    reason: format!("confidence {} outside [0, 1]", entry.record.confidence),
                });
            }
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), i).is_some() {
                return Err(NutritionError::DuplicateName(entry.name.clone()));
            }
        }
        Ok(Self { entries, index })
    }

    // Built-in rows are checked by tests
    fn from_trusted(entries: Vec<TableEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Exact lookup by canonical name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TableEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Category of a canonical name, [`Category::Other`] when unknown
    #[must_use]
    pub fn category_of(&self, name: &str) -> Category {
        self.get(name).map_or(Category::Other, |entry| entry.category)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.iter()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

type Row = (&'static str, Category, f64, f64, f64, f64, f64, f64);

// name, category, kcal, protein, carbs, fat, fiber, confidence
#[rustfmt::skip]
const BUILTIN_ROWS: &[Row] = &[
    ("苹果", Category::Fruit, 52.0, 0.3, 14.0, 0.2, 2.4, 0.9),
    ("香蕉", Category::Fruit, 89.0, 1.1, 23.0, 0.3, 2.6, 0.9),
    ("橙子", Category::Fruit, 47.0, 0.9, 12.0, 0.1, 2.4, 0.85),
    ("葡萄", Category::Fruit, 67.0, 0.6, 17.0, 0.2, 0.9, 0.85),
    ("梨", Category::Fruit, 57.0, 0.4, 15.0, 0.1, 3.1, 0.85),
    ("桃子", Category::Fruit, 39.0, 0.9, 9.5, 0.3, 1.5, 0.85),
    ("西瓜", Category::Fruit, 30.0, 0.6, 8.0, 0.2, 0.4, 0.8),
    ("草莓", Category::Fruit, 32.0, 0.7, 7.7, 0.3, 2.0, 0.85),

    ("西兰花", Category::Vegetable, 34.0, 2.8, 7.0, 0.4, 2.6, 0.9),
    ("胡萝卜", Category::Vegetable, 41.0, 0.9, 9.6, 0.2, 2.8, 0.9),
    ("土豆", Category::Vegetable, 77.0, 2.0, 17.0, 0.1, 2.2, 0.9),
    ("白菜", Category::Vegetable, 16.0, 1.5, 3.2, 0.2, 1.2, 0.85),
    ("番茄", Category::Vegetable, 18.0, 0.9, 3.9, 0.2, 1.2, 0.9),
    ("黄瓜", Category::Vegetable, 16.0, 0.7, 4.0, 0.1, 0.5, 0.85),
    ("菠菜", Category::Vegetable, 23.0, 2.9, 3.6, 0.4, 2.2, 0.9),
    ("韭菜", Category::Vegetable, 22.0, 2.4, 4.6, 0.2, 1.4, 0.8),
    ("茄子", Category::Vegetable, 25.0, 1.0, 5.9, 0.2, 3.0, 0.85),
    ("冬瓜", Category::Vegetable, 11.0, 0.4, 2.6, 0.2, 0.7, 0.8),

    ("鸡胸肉", Category::Meat, 165.0, 31.0, 0.0, 3.6, 0.0, 0.95),
    ("猪肉", Category::Meat, 242.0, 27.0, 0.0, 14.0, 0.0, 0.9),
    ("牛肉", Category::Meat, 250.0, 26.0, 0.0, 15.0, 0.0, 0.9),
    ("羊肉", Category::Meat, 203.0, 25.0, 0.0, 11.0, 0.0, 0.85),
    ("鸡腿肉", Category::Meat, 216.0, 24.0, 0.0, 12.0, 0.0, 0.9),

    ("鲫鱼", Category::Seafood, 108.0, 17.0, 0.0, 4.2, 0.0, 0.85),
    ("带鱼", Category::Seafood, 127.0, 17.0, 0.0, 6.1, 0.0, 0.85),
    ("虾", Category::Seafood, 87.0, 18.0, 0.0, 1.2, 0.0, 0.9),
    ("蟹", Category::Seafood, 95.0, 19.0, 0.0, 1.9, 0.0, 0.85),

    ("鸡蛋", Category::Dairy, 155.0, 13.0, 1.1, 11.0, 0.0, 0.95),
    ("牛奶", Category::Dairy, 64.0, 3.2, 4.8, 3.6, 0.0, 0.9),
    ("酸奶", Category::Dairy, 99.0, 3.5, 12.0, 4.3, 0.0, 0.85),
    ("奶酪", Category::Dairy, 328.0, 25.0, 2.1, 25.0, 0.0, 0.85),

    ("米饭", Category::Grain, 130.0, 2.7, 28.0, 0.3, 0.4, 0.9),
    ("面条", Category::Grain, 131.0, 5.0, 25.0, 1.1, 1.8, 0.85),
    ("面包", Category::Grain, 265.0, 9.0, 49.0, 3.2, 2.8, 0.85),
    ("燕麦", Category::Grain, 68.0, 2.4, 12.0, 1.4, 1.7, 0.9),
    ("小米", Category::Grain, 358.0, 9.7, 76.0, 3.1, 1.6, 0.85),

    ("豆腐", Category::Legume, 76.0, 8.0, 1.9, 4.8, 0.4, 0.9),
    ("豆浆", Category::Legume, 14.0, 1.8, 1.1, 0.7, 0.1, 0.85),
    ("红豆", Category::Legume, 324.0, 21.0, 64.0, 0.6, 7.7, 0.85),
    ("绿豆", Category::Legume, 329.0, 22.0, 62.0, 0.8, 6.4, 0.85),
    ("黄豆", Category::Legume, 359.0, 35.0, 34.0, 16.0, 15.0, 0.9),

    ("花生", Category::Nut, 567.0, 26.0, 16.0, 49.0, 8.5, 0.9),
    ("核桃", Category::Nut, 654.0, 15.0, 14.0, 65.0, 6.7, 0.85),
    ("杏仁", Category::Nut, 579.0, 21.0, 22.0, 50.0, 12.0, 0.85),

    ("大蒜", Category::Seasoning, 126.0, 4.5, 28.0, 0.2, 1.2, 0.8),
    ("生姜", Category::Seasoning, 19.0, 0.9, 4.0, 0.2, 1.2, 0.8),
    ("葱", Category::Seasoning, 30.0, 1.2, 7.0, 0.1, 2.2, 0.8),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_valid() {
        let table = ReferenceTable::builtin();
        assert_eq!(table.len(), 45);

        let rebuilt = ReferenceTable::from_entries(table.iter().cloned().collect());
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn test_builtin_preserves_declaration_order() {
        let table = ReferenceTable::builtin();
        let names: Vec<&str> = table.iter().take(3).map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["苹果", "香蕉", "橙子"]);
        assert_eq!(table.iter().last().map(|e| e.name.as_str()), Some("葱"));
    }

    #[test]
    fn test_get_and_category() {
        let table = ReferenceTable::builtin();
        let entry = table.get("鸡胸肉").unwrap();

        assert_eq!(entry.record.nutrients.protein, 31.0);
        assert_eq!(entry.record.source, Source::Local);
        assert_eq!(table.category_of("豆腐"), Category::Legume);
        assert_eq!(table.category_of("火龙果"), Category::Other);
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let n = Nutrients::new(1.0, 1.0, 1.0, 1.0, 1.0);
        let err = ReferenceTable::from_entries(vec![
            TableEntry::new("梨", Category::Fruit, n, 0.8),
            TableEntry::new("梨", Category::Fruit, n, 0.9),
        ])
        .unwrap_err();

        assert!(matches!(err, NutritionError::DuplicateName(name) if name == "梨"));
    }

    #[test]
    fn test_from_entries_rejects_bad_values() {
        let bad = Nutrients::new(-5.0, 0.0, 0.0, 0.0, 0.0);
        assert!(ReferenceTable::from_entries(vec![TableEntry::new("x", Category::Other, bad, 0.5)]).is_err());

        let ok = Nutrients::default();
        assert!(ReferenceTable::from_entries(vec![TableEntry::new("x", Category::Other, ok, 1.5)]).is_err());
    }
}
