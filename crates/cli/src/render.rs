//! Rendering of nutrition results for the terminal.

use crate::output::{Status, format_confidence, format_count};
use owo_colors::OwoColorize;
use pantry_nutrition::{Catalogue, SearchResult, Source};

/// Colourised provenance tag
pub fn source_tag(source: Source) -> String {
    match source {
        Source::Local => source.as_str().green().to_string(),
        Source::LocalFuzzy => source.as_str().cyan().to_string(),
        Source::Remote => source.as_str().blue().to_string(),
        Source::Estimated => source.as_str().yellow().to_string(),
    }
}

/// Lines describing one result, without colour
pub fn result_lines(result: &SearchResult) -> Vec<String> {
    let formatted = result.formatted();
    vec![
        format!("{} [{}]", result.matched_name, result.category),
        format!("  {}", result.description),
        format!(
            "  calories {}  protein {}  carbs {}  fat {}  fiber {}",
            formatted.calories, formatted.protein, formatted.carbs, formatted.fat, formatted.fiber
        ),
    ]
}

/// Print resolved results
pub fn print_results(query: &str, results: &[SearchResult]) {
    Status::header(&format!(
        "{query}: {}",
        format_count(results.len(), "result", "results")
    ));
    for result in results {
        let lines = result_lines(result);
        println!(
            "{} {} {}",
            lines[0].bold(),
            source_tag(result.source()),
            format_confidence(result.confidence()).dimmed()
        );
        for line in &lines[1..] {
            println!("{line}");
        }
    }
}

/// Print advisory texts, or a note when there are none
pub fn print_suggestions(query: &str, suggestions: &[String]) {
    Status::header(query);
    if suggestions.is_empty() {
        Status::info("No dietary notes for this food");
        return;
    }
    for suggestion in suggestions {
        println!("  • {suggestion}");
    }
}

/// Print the catalogue grouped by category
pub fn print_catalogue(catalogue: &Catalogue) {
    Status::header(&format_count(catalogue.len(), "food", "foods"));
    for category in &catalogue.categories {
        let names: Vec<&str> = catalogue
            .foods
            .iter()
            .filter(|f| f.category == *category)
            .map(|f| f.name.as_str())
            .collect();
        println!(
            "{} {}",
            format!("{} ({})", category.label(), category.as_str()).bold(),
            names.join("、")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_nutrition::Resolver;

    #[test]
    fn test_result_lines() {
        let results = Resolver::default().resolve_local("苹果");
        let lines = result_lines(&results[0]);

        assert_eq!(lines[0], "苹果 [fruit]");
        assert!(lines[2].contains("52 kcal"));
    }

    #[test]
    fn test_source_tag_keeps_text() {
        assert!(source_tag(Source::Estimated).contains("estimated"));
    }
}
