//! Food search endpoint
//!
//! Maps `GET /foods/search` results onto the nutrient shape used by the
//! resolver. Only energy, protein, carbohydrate, fat, and fiber are kept;
//! a nutrient missing from a result counts as zero.

use crate::client::UsdaClient;
use crate::error::ApiResult;
use pantry_nutrition::{Nutrients, RemoteFood};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Foods API interface
#[derive(Clone)]
pub struct FoodsApi {
    client: UsdaClient,
}

impl FoodsApi {
    /// Create a new foods API interface
    pub(crate) fn new(client: UsdaClient) -> Self {
        Self { client }
    }

    /// Raw keyword search
    ///
    /// GET /foods/search?query=<q>&dataType=<types>&pageSize=<n>
    pub async fn search_raw(&self, query: &str) -> ApiResult<FoodSearchResponse> {
        let config = self.client.config();
        let params = [
            ("query", query.to_string()),
            ("dataType", config.data_types.clone()),
            ("pageSize", config.page_size.to_string()),
        ];
        self.client.get("foods/search", &params).await
    }

    /// Keyword search mapped to resolver foods
    pub async fn search(&self, query: &str) -> ApiResult<Vec<RemoteFood>> {
        let response = self.search_raw(query).await?;
        let page_size = usize::try_from(self.client.config().page_size).unwrap_or(usize::MAX);
        debug!(
            query = %query,
            total_hits = response.total_hits.unwrap_or_default(),
            returned = response.foods.len(),
            "USDA search complete"
        );

        Ok(response
            .foods
            .iter()
            .take(page_size)
            .map(SearchFood::to_remote_food)
            .collect())
    }
}

/// Search response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResponse {
    /// Total number of matches upstream
    #[serde(default)]
    pub total_hits: Option<u64>,
    /// Returned page of foods
    #[serde(default)]
    pub foods: Vec<SearchFood>,
}

/// One food in a search response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFood {
    /// FoodData Central id
    pub fdc_id: u64,
    /// Description, e.g. "Apples, raw, with skin"
    pub description: String,
    /// Category label
    #[serde(default)]
    pub food_category: Option<String>,
    /// Nutrient values
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
}

/// One nutrient value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    /// Nutrient name, e.g. "Protein"
    #[serde(default)]
    pub nutrient_name: Option<String>,
    /// Unit, e.g. "G" or "KCAL"
    #[serde(default)]
    pub unit_name: Option<String>,
    /// Amount per 100 g
    #[serde(default)]
    pub value: Option<f64>,
}

impl SearchFood {
    /// Value of the first nutrient whose name contains `name` (and whose unit
    /// equals `unit`, when given), ignoring case. Zero when absent.
    #[must_use]
    pub fn nutrient(&self, name: &str, unit: Option<&str>) -> f64 {
        let name = name.to_lowercase();
        self.food_nutrients
            .iter()
            .find(|n| {
                let name_matches = n
                    .nutrient_name
                    .as_deref()
                    .is_some_and(|candidate| candidate.to_lowercase().contains(&name));
                let unit_matches = unit.is_none_or(|unit| {
                    n.unit_name
                        .as_deref()
                        .is_some_and(|candidate| candidate.eq_ignore_ascii_case(unit))
                });
                name_matches && unit_matches
            })
            .and_then(|n| n.value)
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0)
    }

    /// Map to the resolver's shape
    #[must_use]
    pub fn to_remote_food(&self) -> RemoteFood {
        RemoteFood {
            external_id: self.fdc_id.to_string(),
            name: self.description.clone(),
            category: self.food_category.clone(),
            nutrients: Nutrients::new(
                self.nutrient("Energy", Some("KCAL")),
                self.nutrient("Protein", None),
                self.nutrient("Carbohydrate, by difference", None),
                self.nutrient("Total lipid (fat)", None),
                self.nutrient("Fiber, total dietary", None),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "totalHits": 2,
        "foods": [
            {
                "fdcId": 171688,
                "description": "Apples, raw, with skin",
                "foodCategory": "Fruits and Fruit Juices",
                "foodNutrients": [
                    {"nutrientName": "Energy", "unitName": "KJ", "value": 218},
                    {"nutrientName": "Energy", "unitName": "KCAL", "value": 52},
                    {"nutrientName": "Protein", "unitName": "G", "value": 0.26},
                    {"nutrientName": "Carbohydrate, by difference", "unitName": "G", "value": 13.8},
                    {"nutrientName": "Total lipid (fat)", "unitName": "G", "value": 0.17},
                    {"nutrientName": "Fiber, total dietary", "unitName": "G", "value": 2.4}
                ]
            },
            {
                "fdcId": 2344,
                "description": "Apple juice",
                "foodNutrients": [
                    {"nutrientName": "Energy", "unitName": "KCAL", "value": 46}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_and_map() {
        let response: FoodSearchResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(response.total_hits, Some(2));

        let apple = response.foods[0].to_remote_food();
        assert_eq!(apple.external_id, "171688");
        assert_eq!(apple.category.as_deref(), Some("Fruits and Fruit Juices"));
        // KJ entry is skipped in favour of KCAL
        assert_eq!(apple.nutrients.calories, 52.0);
        assert_eq!(apple.nutrients.protein, 0.26);
        assert_eq!(apple.nutrients.fiber, 2.4);
    }

    #[test]
    fn test_missing_nutrients_are_zero() {
        let response: FoodSearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let juice = response.foods[1].to_remote_food();

        assert_eq!(juice.category, None);
        assert_eq!(juice.nutrients.calories, 46.0);
        assert_eq!(juice.nutrients.protein, 0.0);
        assert_eq!(juice.nutrients.fat, 0.0);
    }

    #[test]
    fn test_empty_response() {
        let response: FoodSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.foods.is_empty());
    }
}
