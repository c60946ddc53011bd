//! Client library for the UniFuncs web-search and web-reader APIs.
//!
//! Provides the HTTP client plus the result formatter shared by the CLI,
//! interactive, and web front-ends.

pub mod format;
pub mod unifuncs;

pub use format::{NO_RESULTS, OutputFormat, describe_code, format_response, format_results};
pub use unifuncs::{
    ApiResponse, Freshness, ImageResult, LOCAL_ERROR_CODE, ReadFormat, ReadRequest, ReadResponse,
    SearchData, SearchRequest, SearchResponse, UniFuncsClient, UniFuncsConfig, UniFuncsError,
    WebPage,
};
