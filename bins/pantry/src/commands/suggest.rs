//! `pantry suggest`

use crate::state::build_resolver;
use pantry_cli::render;
use pantry_core::config::Config;
use pantry_core::error::exit_codes;

/// Print dietary notes for `name`
pub async fn run(config: &Config, name: &str) -> anyhow::Result<i32> {
    let resolver = build_resolver(&config.schema.nutrition)?.resolver;
    let suggestions = resolver.suggestions(name).await;
    render::print_suggestions(name.trim(), &suggestions);
    Ok(exit_codes::SUCCESS)
}
