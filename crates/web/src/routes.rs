//! HTTP routes for the search front-end.

use crate::render;
use axum::{
    Form, Router,
    extract::State,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use std::sync::Arc;
use unisearch_client::{Freshness, SearchRequest, UniFuncsClient, UniFuncsConfig, UniFuncsError};
use unisearch_core::AppConfig;

/// Shared state: startup configuration, the resolved key, and the default
/// client built from it.
pub struct AppState {
    pub config: AppConfig,
    pub api_key: String,
    pub client: UniFuncsClient,
}

/// Build the two-route application.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", post(search))
        .with_state(state)
}

/// Fields posted by the search form. Everything arrives as text so the
/// handler can answer malformed input with a friendly message instead of a
/// rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub freshness: String,
    #[serde(default)]
    pub count: String,
}

async fn index() -> Html<String> {
    Html(render::page(&render::FormState::default(), None))
}

async fn search(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Html<String> {
    let section = run_search(&state, &form).await;
    let echo = render::FormState {
        query: form.query.clone(),
        freshness: form.freshness.clone(),
        count: form.count.clone(),
    };

    Html(render::page(&echo, Some(&section)))
}

/// Validate the form, pick the client, and run one search. Every outcome
/// renders as an HTML section.
async fn run_search(state: &AppState, form: &SearchForm) -> String {
    if form.query.trim().is_empty() {
        return render::notice("Please enter a search query");
    }

    let count = match parse_count(&form.count) {
        Ok(count) => count,
        Err(message) => return render::notice(message),
    };

    let freshness = parse_freshness(&form.freshness);

    let client = match request_client(state, &form.api_key) {
        Ok(client) => client,
        Err(err) => return render::notice(&format!("Error: {err}")),
    };

    let request = SearchRequest {
        count,
        freshness,
        ..SearchRequest::new(form.query.clone())
    };

    tracing::debug!("web search: query={}, count={count}", request.query);

    match client.search(&request).await {
        Ok(response) => render::results(&response),
        Err(err) => render::notice(&format!("Error: {err}")),
    }
}

/// Parse the result count field, enforcing the 1-50 range the API accepts.
fn parse_count(input: &str) -> Result<u32, &'static str> {
    match input.trim().parse::<i64>() {
        Ok(count) if (1..=50).contains(&count) => Ok(count as u32),
        Ok(_) => Err("Result count must be between 1 and 50"),
        Err(_) => Err("Result count must be an integer"),
    }
}

/// Map the freshness select value; `"None"`, empty, and anything
/// unrecognized mean no limit.
fn parse_freshness(input: &str) -> Option<Freshness> {
    match input {
        "" | "None" => None,
        other => other.parse().ok(),
    }
}

/// The client to use for one request: the default one unless the form
/// carries a different key, which gets a one-off client with the same
/// settings.
fn request_client(state: &AppState, api_key: &str) -> Result<UniFuncsClient, UniFuncsError> {
    if api_key.is_empty() || api_key == state.api_key {
        return Ok(state.client.clone());
    }

    UniFuncsClient::new(UniFuncsConfig {
        api_key: api_key.to_string(),
        base_url: state.client.base_url().to_string(),
        timeout: state.config.timeout(),
        user_agent: state.config.user_agent.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_range() {
        assert_eq!(parse_count("5"), Ok(5));
        assert_eq!(parse_count(" 50 "), Ok(50));
        assert_eq!(parse_count("0"), Err("Result count must be between 1 and 50"));
        assert_eq!(parse_count("51"), Err("Result count must be between 1 and 50"));
        assert_eq!(parse_count("-2"), Err("Result count must be between 1 and 50"));
        assert_eq!(parse_count("five"), Err("Result count must be an integer"));
        assert_eq!(parse_count(""), Err("Result count must be an integer"));
    }

    #[test]
    fn test_parse_freshness_select_values() {
        assert_eq!(parse_freshness("None"), None);
        assert_eq!(parse_freshness(""), None);
        assert_eq!(parse_freshness("Day"), Some(Freshness::Day));
        assert_eq!(parse_freshness("Year"), Some(Freshness::Year));
        assert_eq!(parse_freshness("tampered"), None);
    }

    #[test]
    fn test_search_form_defaults_missing_fields() {
        let form: SearchForm = serde_urlencoded::from_str("query=rust").unwrap();
        assert_eq!(form.query, "rust");
        assert_eq!(form.api_key, "");
        assert_eq!(form.freshness, "");
        assert_eq!(form.count, "");
    }

    #[test]
    fn test_request_client_override_keeps_settings() {
        let config = AppConfig {
            api_key: Some("configured-key".to_string()),
            base_url: "https://unifuncs.test/api".to_string(),
            ..Default::default()
        };
        let client = UniFuncsClient::new(UniFuncsConfig {
            api_key: "configured-key".to_string(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
        .unwrap();
        let state = AppState { config, api_key: "configured-key".to_string(), client };

        // blank or matching form key reuses the startup client
        let default = request_client(&state, "").unwrap();
        assert_eq!(default.base_url(), "https://unifuncs.test/api");
        let same = request_client(&state, "configured-key").unwrap();
        assert_eq!(same.base_url(), "https://unifuncs.test/api");

        // a different key gets a one-off client with the same base URL
        let one_off = request_client(&state, "other-key").unwrap();
        assert_eq!(one_off.base_url(), "https://unifuncs.test/api");
    }
}
