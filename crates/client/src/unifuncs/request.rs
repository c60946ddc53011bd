//! UniFuncs API request types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Search request parameters for the web-search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    /// Search query (required, non-empty).
    pub query: String,

    /// Whether to return long-form summaries alongside snippets.
    pub summary: bool,

    /// Page number, 1-based.
    pub page: u32,

    /// Results per page (the service accepts 1-50).
    pub count: u32,

    /// Recency filter; left out of the body entirely when unset so the
    /// server applies its own default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness: Option<Freshness>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            summary: true,
            page: 1,
            count: 10,
            freshness: None,
        }
    }
}

impl SearchRequest {
    /// Create a request for `query` with the default options.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

/// Server-side recency filter for search results.
///
/// Serialized capitalized on the wire (`"Day"`, `"Week"`, ...); parsing
/// accepts any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Freshness {
    Day,
    Week,
    Month,
    Year,
}

impl FromStr for Freshness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Freshness::Day),
            "week" => Ok(Freshness::Week),
            "month" => Ok(Freshness::Month),
            "year" => Ok(Freshness::Year),
            other => Err(format!(
                "invalid freshness '{other}' (expected Day, Week, Month, or Year)"
            )),
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Freshness::Day => "Day",
            Freshness::Week => "Week",
            Freshness::Month => "Month",
            Freshness::Year => "Year",
        };
        f.write_str(s)
    }
}

/// Output format the web-reader endpoint should produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFormat {
    #[default]
    Markdown,
    Md,
    Text,
    Txt,
    Json,
}

impl FromStr for ReadFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" => Ok(ReadFormat::Markdown),
            "md" => Ok(ReadFormat::Md),
            "text" => Ok(ReadFormat::Text),
            "txt" => Ok(ReadFormat::Txt),
            "json" => Ok(ReadFormat::Json),
            other => Err(format!(
                "invalid read format '{other}' (expected markdown, md, text, txt, or json)"
            )),
        }
    }
}

impl fmt::Display for ReadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReadFormat::Markdown => "markdown",
            ReadFormat::Md => "md",
            ReadFormat::Text => "text",
            ReadFormat::Txt => "txt",
            ReadFormat::Json => "json",
        };
        f.write_str(s)
    }
}

/// Request parameters for the web-reader endpoint.
///
/// Serves both wire shapes: the JSON body of the POST variant and, via
/// [`encoded_url`](Self::encoded_url) and
/// [`to_query_pairs`](Self::to_query_pairs), the GET variant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadRequest {
    /// Webpage URL to read (required).
    pub url: String,

    /// Output format for the page content.
    pub format: ReadFormat,

    /// Include images in the output.
    pub include_images: bool,

    /// Include videos in the output.
    pub include_videos: bool,

    /// Include element position information.
    pub include_position: bool,

    /// Append a summary of the page's links.
    pub link_summary: bool,

    /// Keep only elements matching these CSS selectors.
    #[serde(rename = "onlyCSSSelectors", skip_serializing_if = "selectors_unset")]
    pub only_css_selectors: Option<Vec<String>>,

    /// Wait for these CSS selectors to appear before reading.
    #[serde(rename = "waitForCSSSelectors", skip_serializing_if = "selectors_unset")]
    pub wait_for_css_selectors: Option<Vec<String>>,

    /// Drop elements matching these CSS selectors.
    #[serde(rename = "excludeCSSSelectors", skip_serializing_if = "selectors_unset")]
    pub exclude_css_selectors: Option<Vec<String>>,
}

/// An empty selector list carries no information, so it is omitted from the
/// wire exactly like an absent one.
fn selectors_unset(selectors: &Option<Vec<String>>) -> bool {
    selectors.as_ref().is_none_or(|list| list.is_empty())
}

impl Default for ReadRequest {
    fn default() -> Self {
        Self {
            url: String::new(),
            format: ReadFormat::Markdown,
            include_images: true,
            include_videos: false,
            include_position: false,
            link_summary: false,
            only_css_selectors: None,
            wait_for_css_selectors: None,
            exclude_css_selectors: None,
        }
    }
}

impl ReadRequest {
    /// Create a request for `url` with the default options.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Percent-encode the target URL for use as a path segment of the GET
    /// variant. Everything outside the unreserved set is encoded, slashes
    /// and the scheme separator included.
    pub fn encoded_url(&self) -> String {
        urlencoding::encode(&self.url).into_owned()
    }

    /// Query parameters for the GET variant.
    ///
    /// Booleans become lowercase `"true"`/`"false"` and selector lists are
    /// comma-joined, carrying the same semantics as the JSON body.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("format", self.format.to_string()),
            ("includeImages", self.include_images.to_string()),
            ("includeVideos", self.include_videos.to_string()),
            ("includePosition", self.include_position.to_string()),
            ("linkSummary", self.link_summary.to_string()),
        ];

        for (name, selectors) in [
            ("onlyCSSSelectors", &self.only_css_selectors),
            ("waitForCSSSelectors", &self.wait_for_css_selectors),
            ("excludeCSSSelectors", &self.exclude_css_selectors),
        ] {
            if let Some(list) = selectors
                && !list.is_empty()
            {
                pairs.push((name, list.join(",")));
            }
        }

        pairs
    }
}
