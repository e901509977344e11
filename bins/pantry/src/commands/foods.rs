//! `pantry foods`

use pantry_cli::render;
use pantry_core::error::exit_codes;
use pantry_nutrition::Resolver;

/// Print the reference table catalogue
pub fn run(json: bool) -> anyhow::Result<i32> {
    let catalogue = Resolver::default().foods();
    if json {
        println!("{}", serde_json::to_string_pretty(&catalogue)?);
    } else {
        render::print_catalogue(&catalogue);
    }
    Ok(exit_codes::SUCCESS)
}
