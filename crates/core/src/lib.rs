//! Core types and shared functionality for unisearch.
//!
//! This crate provides the layered application configuration consumed by the
//! CLI and web front-ends.

pub mod config;

pub use config::{AppConfig, ConfigError, DEFAULT_BASE_URL};
