//! Menu-driven interactive search session.

use crate::cli::{build_client, prompt_line};
use anyhow::Result;
use unisearch_client::{Freshness, OutputFormat};

/// Run the interactive loop until the user quits.
pub async fn run(key_override: Option<String>) -> Result<()> {
    println!("{}", "=".repeat(50));
    println!("  UniFuncs web search");
    println!("{}", "=".repeat(50));

    let client = build_client(key_override)?;

    loop {
        let query = prompt_line("\nEnter a search query (q to quit): ")?;

        if matches!(query.to_lowercase().as_str(), "q" | "quit" | "exit") {
            println!("\nGoodbye!");
            break;
        }
        if query.is_empty() {
            println!("Please enter a non-empty query");
            continue;
        }

        println!("\nHow fresh should the results be?");
        println!("1. Past day");
        println!("2. Past week");
        println!("3. Past month");
        println!("4. Past year");
        println!("5. No limit");
        let choice = prompt_line("Choose one (default: no limit): ")?;
        let freshness = freshness_choice(&choice);

        let count_input = prompt_line("\nNumber of results (1-50, default 5): ")?;
        let count = match parse_count(&count_input) {
            Ok(count) => count,
            Err(reason) => {
                println!("{reason}, using the default of 5");
                5
            }
        };

        println!("\nOutput format:");
        println!("1. Text (default)");
        println!("2. JSON");
        println!("3. Markdown");
        let format_input = prompt_line("Choose one: ")?;
        let output = format_choice(&format_input);

        println!("\nSearching...\n");
        let formatted = client.search_formatted(&query, freshness, output, count).await;
        println!("{formatted}");

        let save = prompt_line("\nSave the results to a file? (y/n): ")?;
        if save.eq_ignore_ascii_case("y") {
            let filename = prompt_line("Filename: ")?;
            if filename.is_empty() {
                println!("No filename given, skipping save");
                continue;
            }

            let path = with_default_extension(&filename, output);
            match std::fs::write(&path, &formatted) {
                Ok(()) => println!("Results saved to: {path}"),
                Err(e) => println!("Failed to save: {e}"),
            }
        }
    }

    Ok(())
}

/// Map a freshness menu choice; anything unrecognized means no limit.
fn freshness_choice(input: &str) -> Option<Freshness> {
    match input.trim() {
        "1" => Some(Freshness::Day),
        "2" => Some(Freshness::Week),
        "3" => Some(Freshness::Month),
        "4" => Some(Freshness::Year),
        _ => None,
    }
}

/// Parse a result count, empty input meaning the default of 5.
fn parse_count(input: &str) -> Result<u32, &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(5);
    }

    match trimmed.parse::<u32>() {
        Ok(count) if (1..=50).contains(&count) => Ok(count),
        Ok(_) => Err("Count out of range"),
        Err(_) => Err("Invalid number"),
    }
}

/// Map a format menu choice; anything unrecognized means text.
fn format_choice(input: &str) -> OutputFormat {
    match input.trim() {
        "2" => OutputFormat::Json,
        "3" => OutputFormat::Markdown,
        _ => OutputFormat::Text,
    }
}

/// Append an extension matching the output format when the filename has
/// no dot at all.
fn with_default_extension(filename: &str, output: OutputFormat) -> String {
    if filename.contains('.') {
        return filename.to_string();
    }

    let extension = match output {
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Text => "txt",
    };

    format!("{filename}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_choice_mapping() {
        assert_eq!(freshness_choice("1"), Some(Freshness::Day));
        assert_eq!(freshness_choice("2"), Some(Freshness::Week));
        assert_eq!(freshness_choice("3"), Some(Freshness::Month));
        assert_eq!(freshness_choice("4"), Some(Freshness::Year));
        assert_eq!(freshness_choice(""), None);
        assert_eq!(freshness_choice("5"), None);
        assert_eq!(freshness_choice("day"), None);
    }

    #[test]
    fn test_parse_count_defaults_and_bounds() {
        assert_eq!(parse_count(""), Ok(5));
        assert_eq!(parse_count("  "), Ok(5));
        assert_eq!(parse_count("7"), Ok(7));
        assert_eq!(parse_count("1"), Ok(1));
        assert_eq!(parse_count("50"), Ok(50));
        assert_eq!(parse_count("0"), Err("Count out of range"));
        assert_eq!(parse_count("51"), Err("Count out of range"));
        assert_eq!(parse_count("many"), Err("Invalid number"));
        assert_eq!(parse_count("-3"), Err("Invalid number"));
    }

    #[test]
    fn test_format_choice_defaults_to_text() {
        assert_eq!(format_choice("2"), OutputFormat::Json);
        assert_eq!(format_choice("3"), OutputFormat::Markdown);
        assert_eq!(format_choice("1"), OutputFormat::Text);
        assert_eq!(format_choice(""), OutputFormat::Text);
        assert_eq!(format_choice("markdown"), OutputFormat::Text);
    }

    #[test]
    fn test_with_default_extension() {
        assert_eq!(with_default_extension("results", OutputFormat::Json), "results.json");
        assert_eq!(with_default_extension("results", OutputFormat::Markdown), "results.md");
        assert_eq!(with_default_extension("results", OutputFormat::Text), "results.txt");
        assert_eq!(with_default_extension("notes.md", OutputFormat::Json), "notes.md");
        assert_eq!(with_default_extension("a.out", OutputFormat::Text), "a.out");
    }
}
