//! # deckhand-core
//!
//! Core library for deckhand - a terminal companion for a document-to-deck
//! generation service.
//!
//! This library provides:
//! - Domain types for conversations, documents, generations, and workflows
//! - Recency formatting (relative ages and day bucketing) for the list views
//! - HTTP client for the studio service
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! The studio service owns all state: uploaded documents, conversations, the
//! generation history, and the pipeline that turns documents into slide decks
//! or posters. deckhand fetches that state over HTTP, formats it for display,
//! and forwards user actions (select, create, delete) back to the service.
//! Nothing is persisted locally.
//!
//! ## Example
//!
//! ```rust,no_run
//! use deckhand_core::{Config, StudioClient};
//!
//! // Load configuration
//! let config = Config::load().expect("failed to load config");
//!
//! // Build a client for the studio service
//! let client = StudioClient::new(config.server.clone()).expect("failed to build client");
//! ```

// Re-export commonly used items at the crate root
pub use api::StudioClient;
pub use config::Config;
pub use error::{Error, Result};
pub use recency::{group_by_day, relative_age, relative_age_opt, DayGroups, RecencyBucket};
pub use types::*;

// Public modules
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod recency;
pub mod types;
