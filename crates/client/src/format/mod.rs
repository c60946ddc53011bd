//! Search result formatting.
//!
//! Pure functions that render a search outcome as plain text, Markdown, or
//! pretty-printed JSON. Known remote error codes get a human-readable
//! translation; unknown codes fall back to the server-supplied message.

use crate::unifuncs::{SearchResponse, UniFuncsError};
use std::fmt;
use std::str::FromStr;

/// Fixed line reported when a successful response carries no web pages,
/// whatever the requested format.
pub const NO_RESULTS: &str = "No search results found.";

/// Rendering target for formatted search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented plain text.
    #[default]
    Text,
    /// Markdown with one `##` section per result.
    Markdown,
    /// Pretty-printed response envelope, lossless.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "invalid output format '{other}' (expected text, markdown, or json)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        };
        f.write_str(s)
    }
}

/// Human-readable descriptions for the remote error codes the service
/// documents.
pub fn describe_code(code: i64) -> Option<&'static str> {
    match code {
        -20001 => Some("server error, please try again later"),
        -20011 => Some("permission denied for this API"),
        -20014 => Some("account disabled"),
        -20021 => Some("API key invalid or expired"),
        -20025 => Some("insufficient account balance"),
        -20033 => Some("rate limit exceeded"),
        -30000 => Some("search failed"),
        -30001 => Some("invalid search query"),
        _ => None,
    }
}

/// Render a search outcome.
///
/// Local failures become a one-line `Error:` string and remote failures a
/// one-line `API error:` string carrying the original code. Successful
/// responses with no web pages always yield [`NO_RESULTS`].
pub fn format_results(
    outcome: &Result<SearchResponse, UniFuncsError>,
    output: OutputFormat,
) -> String {
    match outcome {
        Err(err) => format!("Error: {err}"),
        Ok(response) => format_response(response, output),
    }
}

/// Render a decoded response envelope.
pub fn format_response(response: &SearchResponse, output: OutputFormat) -> String {
    if !response.is_success() {
        let message = describe_code(response.code).unwrap_or_else(|| response.server_message());
        return format!("API error: {message} (code: {})", response.code);
    }

    if response.web_pages().is_empty() {
        return NO_RESULTS.to_string();
    }

    match output {
        OutputFormat::Json => serde_json::to_string_pretty(response).unwrap_or_default(),
        OutputFormat::Markdown => format_markdown(response),
        OutputFormat::Text => format_text(response),
    }
}

fn format_markdown(response: &SearchResponse) -> String {
    let mut out = format!("# Search results: {}\n\n", response.query());

    for (i, page) in response.web_pages().iter().enumerate() {
        out.push_str(&format!(
            "## {}. [{}]({})\n\n",
            i + 1,
            page.title(),
            page.link()
        ));
        out.push_str(&format!("**Source:** {}\n\n", page.site()));
        out.push_str(&format!("{}\n\n", page.excerpt()));
        out.push_str("---\n\n");
    }

    out
}

fn format_text(response: &SearchResponse) -> String {
    let mut out = format!("Search results: {}\n\n", response.query());

    for (i, page) in response.web_pages().iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, page.title()));
        out.push_str(&format!("   URL: {}\n", page.link()));
        out.push_str(&format!("   Source: {}\n", page.site()));
        out.push_str(&format!("   Summary: {}\n\n", page.excerpt()));
    }

    out
}
