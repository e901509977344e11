//! Remote stage adapter for the nutrition resolver.

use crate::client::UsdaClient;
use pantry_nutrition::{NutritionError, RemoteFood, RemoteLookup, async_trait};

#[async_trait]
impl RemoteLookup for UsdaClient {
    fn name(&self) -> &str {
        "usda"
    }

    async fn search(&self, query: &str) -> pantry_nutrition::Result<Vec<RemoteFood>> {
        self.foods()
            .search(query)
            .await
            .map_err(NutritionError::from)
    }
}
