//! Subcommand definitions and the search/read command runners.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use unisearch_client::{
    Freshness, OutputFormat, ReadFormat, ReadRequest, ReadResponse, SearchRequest, UniFuncsClient,
    UniFuncsConfig, describe_code, format_results,
};
use unisearch_core::AppConfig;

/// UniFuncs web search from the command line.
#[derive(Debug, Parser)]
#[command(name = "unisearch", version, about, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search the web and print formatted results
    Search(SearchArgs),
    /// Read a single webpage through the web reader
    Read(ReadArgs),
    /// Menu-driven search session
    Interactive(InteractiveArgs),
}

#[derive(Debug, Args)]
pub struct InteractiveArgs {
    /// API key, overriding UNIFUNCS_API_KEY and the config file
    #[arg(short, long)]
    pub key: Option<String>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search query; prompted for when omitted
    pub query: Option<String>,

    /// API key, overriding UNIFUNCS_API_KEY and the config file
    #[arg(short, long)]
    pub key: Option<String>,

    /// Restrict results by recency: Day, Week, Month, or Year
    #[arg(short, long)]
    pub freshness: Option<Freshness>,

    /// Page number
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Results per page
    #[arg(short, long, default_value_t = 10)]
    pub count: u32,

    /// Output format: text, markdown, or json
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Save the formatted results to a file instead of printing
    #[arg(short, long, value_name = "FILE")]
    pub save: Option<PathBuf>,
}

impl SearchArgs {
    fn to_request(&self, query: String) -> SearchRequest {
        SearchRequest {
            page: self.page,
            count: self.count,
            freshness: self.freshness,
            ..SearchRequest::new(query)
        }
    }
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Webpage URL to read
    pub url: String,

    /// API key, overriding UNIFUNCS_API_KEY and the config file
    #[arg(short, long)]
    pub key: Option<String>,

    /// Reader output format: markdown, md, text, txt, or json
    #[arg(short, long, default_value = "markdown")]
    pub format: ReadFormat,

    /// Leave images out of the page content
    #[arg(long)]
    pub no_images: bool,

    /// Include videos
    #[arg(long)]
    pub videos: bool,

    /// Include element position information
    #[arg(long)]
    pub position: bool,

    /// Append a summary of the page's links
    #[arg(long)]
    pub link_summary: bool,

    /// Keep only elements matching this CSS selector (repeatable)
    #[arg(long = "only", value_name = "SELECTOR")]
    pub only: Vec<String>,

    /// Wait for this CSS selector to appear before reading (repeatable)
    #[arg(long = "wait-for", value_name = "SELECTOR")]
    pub wait_for: Vec<String>,

    /// Drop elements matching this CSS selector (repeatable)
    #[arg(long = "exclude", value_name = "SELECTOR")]
    pub exclude: Vec<String>,

    /// Use the GET variant of the endpoint
    #[arg(long)]
    pub get: bool,

    /// Save the page content to a file instead of printing
    #[arg(short, long, value_name = "FILE")]
    pub save: Option<PathBuf>,
}

impl ReadArgs {
    fn to_request(&self) -> ReadRequest {
        ReadRequest {
            format: self.format,
            include_images: !self.no_images,
            include_videos: self.videos,
            include_position: self.position,
            link_summary: self.link_summary,
            only_css_selectors: non_empty(&self.only),
            wait_for_css_selectors: non_empty(&self.wait_for),
            exclude_css_selectors: non_empty(&self.exclude),
            ..ReadRequest::new(self.url.clone())
        }
    }
}

fn non_empty(selectors: &[String]) -> Option<Vec<String>> {
    if selectors.is_empty() {
        None
    } else {
        Some(selectors.to_vec())
    }
}

/// Run the `search` subcommand.
pub async fn run_search(args: SearchArgs) -> Result<()> {
    let client = build_client(args.key.clone())?;

    let query = match args.query.as_deref() {
        Some(query) if !query.trim().is_empty() => query.to_string(),
        _ => {
            let entered = prompt_line("Enter search query: ")?;
            if entered.is_empty() {
                anyhow::bail!("no search query provided");
            }
            entered
        }
    };

    let request = args.to_request(query);
    tracing::debug!(
        "search subcommand: page={}, count={}, output={}",
        request.page,
        request.count,
        args.output
    );

    let outcome = client.search(&request).await;
    let formatted = format_results(&outcome, args.output);

    match &args.save {
        Some(path) => save_or_print(path, &formatted),
        None => println!("{formatted}"),
    }

    Ok(())
}

/// Run the `read` subcommand.
pub async fn run_read(args: ReadArgs) -> Result<()> {
    let client = build_client(args.key.clone())?;
    let request = args.to_request();
    tracing::debug!("read subcommand: format={}, get={}", request.format, args.get);

    let outcome = if args.get {
        client.read_webpage_get(&request).await
    } else {
        client.read_webpage(&request).await
    };

    let rendered = match outcome {
        Ok(response) => render_read(&response),
        Err(err) => format!("Error: {err}"),
    };

    match &args.save {
        Some(path) => save_or_print(path, &rendered),
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Build a client from layered configuration, with an optional key override.
pub(crate) fn build_client(key_override: Option<String>) -> Result<UniFuncsClient> {
    let config = AppConfig::load()?;
    let api_key = config.resolve_api_key(key_override)?;
    let timeout = config.timeout();

    let client = UniFuncsClient::new(UniFuncsConfig {
        api_key,
        base_url: config.base_url,
        timeout,
        user_agent: config.user_agent,
    })?;

    Ok(client)
}

/// Print `label` and read one trimmed line from stdin.
pub(crate) fn prompt_line(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Write `contents` to `path`, printing them instead when the write fails.
fn save_or_print(path: &Path, contents: &str) {
    match std::fs::write(path, contents) {
        Ok(()) => println!("Results saved to: {}", path.display()),
        Err(e) => {
            eprintln!("Failed to save results: {e}");
            println!("{contents}");
        }
    }
}

/// Render a web-reader envelope for terminal output.
///
/// String payloads print as-is; anything else pretty-prints as JSON.
fn render_read(response: &ReadResponse) -> String {
    if !response.is_success() {
        let message = describe_code(response.code).unwrap_or_else(|| response.server_message());
        return format!("API error: {message} (code: {})", response.code);
    }

    match &response.data {
        Some(serde_json::Value::String(content)) => content.clone(),
        Some(other) => serde_json::to_string_pretty(other).unwrap_or_default(),
        None => String::new(),
    }
}
