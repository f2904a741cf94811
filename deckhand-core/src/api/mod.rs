//! HTTP client for the studio generation service.
//!
//! The service owns documents, conversations, generation history, and the
//! pipeline state; deckhand only reads that state and forwards user actions.

mod client;

pub use client::StudioClient;
