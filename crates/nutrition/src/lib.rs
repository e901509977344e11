//! Nutrition lookup for household ingredients.
//!
//! This crate provides:
//! - The built-in household reference table (per-100 g values)
//! - Staged resolution: exact, fuzzy substring, optional remote, keyword estimate
//! - Dietary advice derived from the resolved values
//! - A sorted catalogue of everything the table knows
//!
//! ```rust
//! use pantry_nutrition::{Resolver, Source};
//!
//! let resolver = Resolver::default();
//! let results = resolver.resolve_local("西兰");
//! assert_eq!(results[0].matched_name, "西兰花");
//! assert_eq!(results[0].source(), Source::LocalFuzzy);
//! ```

mod advice;
mod catalogue;
mod error;
mod estimate;
mod matching;
mod record;
mod resolver;
mod result;
mod table;

pub use advice::{Advice, AdviceKind, advise};
pub use catalogue::{Catalogue, FoodSummary, catalogue};
pub use error::{NutritionError, Result};
pub use estimate::{KEYWORD_RULES, KeywordRule, estimate};
pub use matching::{exact_match, levenshtein_distance, nearest_names, substring_match};
pub use record::{
    ESTIMATED_CONFIDENCE, FUZZY_PENALTY, Nutrients, NutritionRecord, REMOTE_CONFIDENCE, Source,
};
pub use resolver::{
    DEFAULT_REMOTE_TIMEOUT, RemoteLookup, Resolver, Stage, estimate_stage, exact_stage, fuzzy_stage,
};
pub use result::{FormattedNutrition, RemoteFood, SearchResult};
pub use table::{Category, ReferenceTable, TableEntry};

// Re-exported so implementors of `RemoteLookup` need not depend on it directly
pub use async_trait::async_trait;
