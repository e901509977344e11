//! Keyword-based category estimates for names the table does not know.

use crate::record::{ESTIMATED_CONFIDENCE, Nutrients, NutritionRecord, Source};
use crate::table::Category;

/// A category guessed from keywords, with its average values.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    /// Category the rule assigns
    pub category: Category,
    /// Any of these occurring in the query selects the rule
    pub keywords: &'static [&'static str],
    /// Category averages per 100 g
    pub averages: Nutrients,
}

/// Rules in the order they are tested.
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        category: Category::Fruit,
        keywords: &["果", "莓", "桃", "梨", "橙", "柚", "葡萄"],
        averages: Nutrients::new(50.0, 0.5, 12.0, 0.2, 2.0),
    },
    KeywordRule {
        category: Category::Vegetable,
        keywords: &["菜", "瓜", "豆", "菇", "笋"],
        averages: Nutrients::new(25.0, 2.0, 5.0, 0.2, 2.0),
    },
    KeywordRule {
        category: Category::Meat,
        keywords: &["肉", "鸡", "鸭", "鱼", "虾", "蟹"],
        averages: Nutrients::new(200.0, 25.0, 0.0, 10.0, 0.0),
    },
];

/// First rule with a keyword occurring in the query.
#[must_use]
pub fn matching_rule(query: &str) -> Option<&'static KeywordRule> {
    KEYWORD_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|keyword| query.contains(keyword)))
}

/// Estimate a record from keywords in the query.
#[must_use]
pub fn estimate(query: &str) -> Option<(Category, NutritionRecord)> {
    matching_rule(query).map(|rule| {
        (
            rule.category,
            NutritionRecord::new(rule.averages, Source::Estimated, ESTIMATED_CONFIDENCE),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_berry_is_fruit() {
        let (category, record) = estimate("蓝莓").unwrap();
        assert_eq!(category, Category::Fruit);
        assert_eq!(record.source, Source::Estimated);
        assert_eq!(record.confidence, 0.6);
        assert_eq!(record.nutrients.calories, 50.0);
    }

    #[test]
    fn test_rule_order() {
        // 果 (fruit) is tested before 菜 (vegetable)
        assert_eq!(estimate("果菜").map(|(c, _)| c), Some(Category::Fruit));
        // 瓜 (vegetable) is tested before 鸡 (meat)
        assert_eq!(estimate("鸡瓜").map(|(c, _)| c), Some(Category::Vegetable));
        assert_eq!(estimate("烤鸭").map(|(c, _)| c), Some(Category::Meat));
    }

    #[test]
    fn test_no_keyword() {
        assert!(estimate("不存在的食材XYZ").is_none());
        assert!(estimate("").is_none());
    }
}
