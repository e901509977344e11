//! Shared application state

use anyhow::Context;
use pantry_api_client::{ClientConfig, UsdaClient};
use pantry_core::config::{ConfigSchema, NutritionConfig};
use pantry_core::health::{CheckResult, CircuitBreakerCheck, FnCheck, HealthChecker};
use pantry_core::retry::CircuitBreaker;
use pantry_inventory::InventoryStore;
use pantry_nutrition::Resolver;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Resolver plus the breaker guarding its remote stage, if one is enabled
pub struct NutritionSetup {
    pub resolver: Resolver,
    pub breaker: Option<Arc<CircuitBreaker>>,
}

/// Build the resolver. The remote stage is enabled only when configuration
/// asks for it and an API key is available.
pub fn build_resolver(config: &NutritionConfig) -> anyhow::Result<NutritionSetup> {
    let resolver = Resolver::default().with_remote_timeout(config.remote_timeout());
    if !config.remote_lookup {
        return Ok(NutritionSetup {
            resolver,
            breaker: None,
        });
    }

    let client_config = ClientConfig::from_env().context("Invalid USDA client configuration")?;
    if !client_config.has_api_key() {
        warn!("Remote lookup enabled but USDA_API_KEY is not set; using local data only");
        return Ok(NutritionSetup {
            resolver,
            breaker: None,
        });
    }

    let client = UsdaClient::with_config(client_config).context("Failed to build USDA client")?;
    info!(base_url = %client.base_url(), "Remote nutrition lookup enabled");
    let breaker = client.circuit_breaker();
    Ok(NutritionSetup {
        resolver: resolver.with_remote(Arc::new(client)),
        breaker: Some(breaker),
    })
}

/// State shared by every request handler
pub struct AppState {
    pub resolver: Resolver,
    pub store: Arc<InventoryStore>,
    pub health: HealthChecker,
    pub expiring_window_days: i64,
    pub started: Instant,
}

impl AppState {
    /// State for a freshly started server
    pub fn new(schema: &ConfigSchema, nutrition: NutritionSetup) -> Self {
        let store = Arc::new(InventoryStore::new());

        let entries = nutrition.resolver.table().len();
        let mut health = HealthChecker::new()
            .add_check(FnCheck::new(move || {
                if entries == 0 {
                    CheckResult::unhealthy("nutrition_table", "reference table is empty")
                } else {
                    CheckResult::healthy("nutrition_table").with_detail("entries", entries.to_string())
                }
            }))
            .add_check(FnCheck::new({
                let store = Arc::clone(&store);
                move || {
                    let stats = store.stats();
                    CheckResult::healthy("inventory")
                        .with_detail("users", stats.users.to_string())
                        .with_detail("ingredients", stats.ingredients.to_string())
                }
            }));
        if let Some(breaker) = nutrition.breaker {
            health = health.add_check(CircuitBreakerCheck::new("usda", breaker));
        }

        Self {
            resolver: nutrition.resolver,
            store,
            health,
            expiring_window_days: schema.inventory.expiring_window_days,
            started: Instant::now(),
        }
    }
}
