//! Nutrition values and the records the resolver hands out.

use serde::{Deserialize, Serialize};

/// Confidence multiplier applied to fuzzy table matches.
pub const FUZZY_PENALTY: f64 = 0.8;

/// Fixed confidence for records from a remote source.
pub const REMOTE_CONFIDENCE: f64 = 0.95;

/// Fixed confidence for keyword-category estimates.
pub const ESTIMATED_CONFIDENCE: f64 = 0.6;

/// Macronutrients per 100 g.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrients {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrate (g)
    pub carbs: f64,
    /// Fat (g)
    pub fat: f64,
    /// Dietary fiber (g)
    pub fiber: f64,
}

impl Nutrients {
    /// Create a nutrient set
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64, fiber: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            fiber,
        }
    }

    /// Whether every value is finite and non-negative
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fat, self.fiber]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Exact reference table hit
    Local,
    /// Substring match against a reference table key
    LocalFuzzy,
    /// Remote nutrition database
    Remote,
    /// Keyword-category estimate
    Estimated,
}

impl Source {
    /// Stable string form, as serialized
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::LocalFuzzy => "local_fuzzy",
            Self::Remote => "remote",
            Self::Estimated => "estimated",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutrition values tagged with provenance and confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    /// Values per 100 g
    #[serde(flatten)]
    pub nutrients: Nutrients,
    /// Provenance
    pub source: Source,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
}

impl NutritionRecord {
    /// Create a record
    #[must_use]
    pub const fn new(nutrients: Nutrients, source: Source, confidence: f64) -> Self {
        Self {
            nutrients,
            source,
            confidence,
        }
    }

    /// Copy of this record as a fuzzy match, with the confidence penalty applied
    #[must_use]
    pub fn as_fuzzy(&self) -> Self {
        Self {
            source: Source::LocalFuzzy,
            confidence: self.confidence * FUZZY_PENALTY,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_fuzzy_keeps_macros() {
        let record = NutritionRecord::new(Nutrients::new(165.0, 31.0, 0.0, 3.6, 0.0), Source::Local, 0.95);
        let fuzzy = record.as_fuzzy();

        assert_eq!(fuzzy.nutrients, record.nutrients);
        assert_eq!(fuzzy.source, Source::LocalFuzzy);
        assert!((fuzzy.confidence - 0.76).abs() < 1e-9);
    }

    #[test]
    fn test_nutrients_validity() {
        assert!(Nutrients::new(0.0, 0.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!Nutrients::new(-1.0, 0.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!Nutrients::new(f64::INFINITY, 0.0, 0.0, 0.0, 0.0).is_valid());
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = NutritionRecord::new(Nutrients::new(52.0, 0.3, 14.0, 0.2, 2.4), Source::LocalFuzzy, 0.72);
        let json = serde_json::to_value(record).unwrap();

        assert_eq!(json["calories"], 52.0);
        assert_eq!(json["source"], "local_fuzzy");
        assert!(json.get("nutrients").is_none());
    }
}
