//! Conversation row data for TUI display.

use chrono::{DateTime, NaiveDate, Utc};
use deckhand_core::display;
use deckhand_core::recency::{self, local_day};
use deckhand_core::Conversation;

/// A denormalized conversation row optimized for list display.
#[derive(Debug, Clone)]
pub struct ConversationRow {
    /// Conversation ID
    pub id: String,
    /// Title line ("quarterly_report", "New Chat", ...)
    pub title: String,
    /// Meta line ("2 files · 5 messages", "Empty")
    pub subtitle: String,
    /// Instant used for the age string and day bucketing
    pub last_touched: Option<DateTime<Utc>>,
}

impl ConversationRow {
    pub fn from_conversation(conv: &Conversation) -> Self {
        Self {
            id: conv.id.clone(),
            title: display::conversation_title(conv),
            subtitle: display::conversation_subtitle(conv),
            last_touched: conv.last_touched(),
        }
    }

    /// Relative age since last activity (e.g. "5m ago"), empty when unknown.
    pub fn relative_time(&self) -> String {
        recency::relative_age_opt(self.last_touched)
    }

    /// The local calendar day this row buckets under.
    pub fn day(&self) -> Option<NaiveDate> {
        self.last_touched.map(local_day)
    }
}
