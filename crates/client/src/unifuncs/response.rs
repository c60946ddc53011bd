//! UniFuncs API response envelope and payload types.

use serde::{Deserialize, Serialize};

/// The envelope every UniFuncs endpoint returns.
///
/// `code == 0` means success; any other value is a remote application error
/// passed through verbatim, typically alongside a `message` and no `data`.
/// Absent optional fields are skipped on re-serialization so a decoded
/// envelope renders back to the same JSON it arrived as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Remote status code (0 = success).
    pub code: i64,

    /// Server-supplied status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Payload; shape depends on the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Whether the remote call succeeded.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Server-supplied message, with a fallback for silent errors.
    pub fn server_message(&self) -> &str {
        self.message.as_deref().unwrap_or("unknown error")
    }
}

/// Envelope returned by the web-search endpoint.
pub type SearchResponse = ApiResponse<SearchData>;

/// Envelope returned by the web-reader endpoint. The payload varies with
/// the requested format, so it stays free-form JSON.
pub type ReadResponse = ApiResponse<serde_json::Value>;

/// Search payload: the echoed query plus ordered result lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    /// The query as the server echoed it back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Web page hits in server ranking order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub web_pages: Vec<WebPage>,

    /// Image hits in server ranking order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageResult>,
}

/// A single web page hit. Every field is optional on the wire; the accessor
/// methods supply the placeholders the formatters rely on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPage {
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Target URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Shortened URL for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,

    /// Name of the source site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    /// Long-form summary, present when the search asked for one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Short snippet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl WebPage {
    /// Title, or `"Untitled"` when the server omitted one.
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled")
    }

    /// Target URL, empty when absent.
    pub fn link(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// Display URL, falling back to the target URL.
    pub fn display_link(&self) -> &str {
        match self.display_url.as_deref() {
            Some(display) => display,
            None => self.link(),
        }
    }

    /// Source site name, or `"Unknown source"`.
    pub fn site(&self) -> &str {
        self.site_name.as_deref().unwrap_or("Unknown source")
    }

    /// Result text, preferring the long summary over the snippet.
    pub fn excerpt(&self) -> &str {
        self.summary
            .as_deref()
            .or(self.snippet.as_deref())
            .unwrap_or("No summary")
    }
}

/// A single image hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    /// Thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Full-size image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
}

impl SearchResponse {
    /// The echoed query, empty when the payload omitted it.
    pub fn query(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|data| data.query.as_deref())
            .unwrap_or("")
    }

    /// Web page hits in server order.
    pub fn web_pages(&self) -> &[WebPage] {
        self.data
            .as_ref()
            .map(|data| data.web_pages.as_slice())
            .unwrap_or_default()
    }

    /// Image hits in server order.
    pub fn images(&self) -> &[ImageResult] {
        self.data
            .as_ref()
            .map(|data| data.images.as_slice())
            .unwrap_or_default()
    }
}
