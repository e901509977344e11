//! `pantry lookup`

use crate::state::build_resolver;
use pantry_cli::output::{Status, format_duration};
use pantry_cli::render;
use pantry_core::config::Config;
use pantry_core::error::exit_codes;
use std::time::Instant;

/// Resolve `name` and print the results
pub async fn run(config: &Config, name: &str, json: bool) -> anyhow::Result<i32> {
    let resolver = build_resolver(&config.schema.nutrition)?.resolver;

    let start = Instant::now();
    let results = resolver.resolve(name).await;
    let elapsed = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(if results.is_empty() {
            exit_codes::NOT_FOUND
        } else {
            exit_codes::SUCCESS
        });
    }

    if results.is_empty() {
        Status::error(&format!("No nutrition data for '{}'", name.trim()));
        let close = resolver.did_you_mean(name, 3);
        if !close.is_empty() {
            Status::info(&format!("Did you mean: {}", close.join(", ")));
        }
        return Ok(exit_codes::NOT_FOUND);
    }

    render::print_results(name.trim(), &results);
    println!();
    Status::success(&format!("Resolved in {}", format_duration(elapsed)));
    Ok(exit_codes::SUCCESS)
}
