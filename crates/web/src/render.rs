//! HTML rendering for the search front-end.
//!
//! Builds the full form page and the results section: an image grid when
//! the response carries image hits, then one card per web page hit. All
//! server-supplied text is HTML-escaped before embedding.

use unisearch_client::{NO_RESULTS, SearchResponse, describe_code};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #fafafa; color: #333; }
.search-container { max-width: 1200px; margin: 0 auto; padding: 20px; }
.search-form { display: flex; flex-wrap: wrap; gap: 10px; align-items: center; margin-bottom: 20px; }
.search-form input[type="text"] { flex: 1 1 300px; padding: 8px; }
.search-form input[type="password"] { flex: 1 1 220px; padding: 8px; }
.search-form input[type="number"] { width: 70px; padding: 8px; }
.search-form button { padding: 8px 20px; border: none; border-radius: 4px; background-color: #4CAF50; color: white; cursor: pointer; }
.notice { padding: 12px; background: #fff3cd; border: 1px solid #ffeaa7; border-radius: 4px; }
.search-card { border: 1px solid #ddd; border-radius: 8px; padding: 15px; margin: 10px 0; background: white; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.search-card h3 { margin: 0 0 10px 0; }
.search-card h3 a { color: #1a0dab; text-decoration: none; }
.search-card .url { color: #006621; font-size: 0.9em; margin-bottom: 8px; word-break: break-all; }
.search-card .snippet { color: #545454; line-height: 1.4; margin-bottom: 12px; }
.search-card .site-name { color: #666; font-size: 0.9em; margin-bottom: 8px; }
.image-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 16px; margin: 20px 0; }
.image-card { border: 1px solid #ddd; border-radius: 8px; overflow: hidden; background: white; aspect-ratio: 1; }
.image-card img { width: 100%; height: 100%; object-fit: contain; background: #f8f8f8; }
h2 { margin: 20px 0; color: #333; font-size: 1.5em; border-bottom: 2px solid #eee; padding-bottom: 8px; }
.visit-button { display: inline-block; padding: 5px 15px; border: none; border-radius: 4px; cursor: pointer; font-size: 14px; background-color: #4CAF50; color: white; text-decoration: none; transition: opacity 0.2s; }
.visit-button:hover { opacity: 0.9; }
"#;

/// Form values echoed back into the page after a submission.
#[derive(Debug, Clone)]
pub struct FormState {
    pub query: String,
    pub freshness: String,
    pub count: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            query: String::new(),
            freshness: "None".to_string(),
            count: "5".to_string(),
        }
    }
}

/// Render the full page: the search form plus an optional results section.
pub fn page(form: &FormState, results: Option<&str>) -> String {
    let mut options = String::new();
    for option in ["None", "Day", "Week", "Month", "Year"] {
        let selected = if option == form.freshness { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{option}"{selected}>{option}</option>"#
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>UniFuncs web search</title>
<style>{STYLE}</style>
</head>
<body>
<div class="search-container">
<h1>UniFuncs web search</h1>
<form class="search-form" action="/search" method="post">
<input type="text" name="query" placeholder="What are you looking for?" value="{query}">
<input type="password" name="api_key" placeholder="API key (optional)">
<label>Freshness <select name="freshness">{options}</select></label>
<label>Results <input type="number" name="count" min="1" max="50" value="{count}"></label>
<button type="submit">Search</button>
</form>
{results}
</div>
</body>
</html>"#,
        query = escape_html(&form.query),
        count = escape_html(&form.count),
        results = results.unwrap_or(""),
    )
}

/// A single-line message styled as a notice box.
pub fn notice(message: &str) -> String {
    format!(r#"<p class="notice">{}</p>"#, escape_html(message))
}

/// Render a decoded search envelope as the results section.
pub fn results(response: &SearchResponse) -> String {
    if !response.is_success() {
        let message = describe_code(response.code).unwrap_or_else(|| response.server_message());
        return notice(&format!("API error: {message} (code: {})", response.code));
    }

    let pages = response.web_pages();
    let images = response.images();
    if pages.is_empty() && images.is_empty() {
        return notice(NO_RESULTS);
    }

    let mut out = String::new();

    if !images.is_empty() {
        out.push_str(r#"<h2>Images</h2><div class="image-grid">"#);
        for image in images {
            // a grid tile needs both the thumbnail and the full image
            if let (Some(thumbnail), Some(content)) =
                (image.thumbnail_url.as_deref(), image.content_url.as_deref())
                && !thumbnail.is_empty()
                && !content.is_empty()
            {
                out.push_str(&format!(
                    r#"<div class="image-card"><a href="{content}" target="_blank"><img src="{thumbnail}" alt="search result image" loading="lazy"></a></div>"#,
                    content = escape_html(content),
                    thumbnail = escape_html(thumbnail),
                ));
            }
        }
        out.push_str("</div>");
    }

    if !pages.is_empty() {
        out.push_str("<h2>Web results</h2>");
        for page in pages {
            out.push_str(&format!(
                r#"<div class="search-card">
<div class="site-name">{site}</div>
<h3><a href="{url}" target="_blank">{title}</a></h3>
<div class="url">{display}</div>
<div class="snippet">{snippet}</div>
<a href="{url}" target="_blank" class="visit-button">Visit page</a>
</div>
"#,
                site = escape_html(page.site_name.as_deref().unwrap_or("")),
                url = escape_html(page.link()),
                title = escape_html(page.title()),
                display = escape_html(page.display_link()),
                snippet = escape_html(page.excerpt()),
            ));
        }
    }

    out
}

/// Escape text for HTML element and attribute positions.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use unisearch_client::{ApiResponse, ImageResult, SearchData, WebPage};

    fn success(data: SearchData) -> SearchResponse {
        ApiResponse { code: 0, message: None, data: Some(data) }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("it's"), "it&#39;s");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_page_echoes_escaped_form_values() {
        let form = FormState {
            query: r#""quoted" <q>"#.to_string(),
            freshness: "Week".to_string(),
            count: "7".to_string(),
        };
        let html = page(&form, None);

        assert!(html.contains(r#"value="&quot;quoted&quot; &lt;q&gt;""#));
        assert!(html.contains(r#"<option value="Week" selected>"#));
        assert!(html.contains(r#"<option value="None">"#));
        assert!(html.contains(r#"value="7""#));
        assert!(html.contains(r#"action="/search""#));
    }

    #[test]
    fn test_page_includes_results_section() {
        let html = page(&FormState::default(), Some("<p>hi</p>"));
        assert!(html.contains("<p>hi</p>"));
    }

    #[test]
    fn test_results_error_code_renders_notice() {
        let response: SearchResponse =
            ApiResponse { code: -20033, message: None, data: None };
        let html = results(&response);
        assert!(html.contains("API error: rate limit exceeded (code: -20033)"));
        assert!(html.contains(r#"class="notice""#));
    }

    #[test]
    fn test_results_empty_renders_no_results_notice() {
        let html = results(&success(SearchData::default()));
        assert!(html.contains(NO_RESULTS));
    }

    #[test]
    fn test_results_cards_are_escaped() {
        let data = SearchData {
            query: None,
            web_pages: vec![WebPage {
                name: Some("<b>Bold</b> title".to_string()),
                url: Some("https://example.com/a?x=1&y=2".to_string()),
                site_name: Some("Example".to_string()),
                summary: Some("A summary.".to_string()),
                ..Default::default()
            }],
            images: vec![],
        };
        let html = results(&success(data));

        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; title"));
        assert!(html.contains("https://example.com/a?x=1&amp;y=2"));
        assert!(html.contains(r#"class="search-card""#));
        assert!(html.contains(r#"class="visit-button""#));
        assert!(html.contains("<h2>Web results</h2>"));
        assert!(!html.contains("<b>Bold</b>"));
    }

    #[test]
    fn test_results_image_grid_needs_both_urls() {
        let data = SearchData {
            query: None,
            web_pages: vec![],
            images: vec![
                ImageResult {
                    thumbnail_url: Some("https://example.com/t1.jpg".to_string()),
                    content_url: Some("https://example.com/c1.jpg".to_string()),
                },
                ImageResult {
                    thumbnail_url: Some("https://example.com/t2.jpg".to_string()),
                    content_url: None,
                },
            ],
        };
        let html = results(&success(data));

        assert!(html.contains("<h2>Images</h2>"));
        assert!(html.contains(r#"src="https://example.com/t1.jpg""#));
        assert!(!html.contains("t2.jpg"));
    }

    #[test]
    fn test_results_missing_fields_use_placeholders() {
        let data = SearchData {
            query: None,
            web_pages: vec![WebPage::default()],
            images: vec![],
        };
        let html = results(&success(data));

        assert!(html.contains("Untitled"));
        assert!(html.contains("No summary"));
        // the card site line stays empty rather than showing a placeholder
        assert!(html.contains(r#"<div class="site-name"></div>"#));
    }
}
