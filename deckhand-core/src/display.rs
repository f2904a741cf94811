//! Cosmetic formatting helpers shared across the list views.

use crate::types::Conversation;

/// Maximum characters of a conversation title before truncation.
const TITLE_MAX_CHARS: usize = 30;

/// Strip the final extension from a file name ("report.v2.pdf" -> "report.v2").
pub fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// Truncate to `max_chars`, appending "..." when anything was cut.
///
/// Operates on char boundaries, not bytes.
pub fn truncate(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }
    let cut: String = input.chars().take(max_chars).collect();
    format!("{}...", cut)
}

/// Title for a conversation row: first attached file's stem, the explicit
/// title, or "New Chat".
pub fn conversation_title(conv: &Conversation) -> String {
    if let Some(first) = conv.files.first() {
        return truncate(file_stem(&first.name), TITLE_MAX_CHARS);
    }
    conv.title.clone().unwrap_or_else(|| "New Chat".to_string())
}

/// Subtitle for a conversation row: "2 files · 5 messages", or "Empty".
pub fn conversation_subtitle(conv: &Conversation) -> String {
    let mut parts = Vec::new();

    let file_count = conv.files.len();
    if file_count > 0 {
        parts.push(format!(
            "{} file{}",
            file_count,
            if file_count > 1 { "s" } else { "" }
        ));
    }
    if conv.message_count > 0 {
        parts.push(format!(
            "{} message{}",
            conv.message_count,
            if conv.message_count > 1 { "s" } else { "" }
        ));
    }

    if parts.is_empty() {
        "Empty".to_string()
    } else {
        parts.join(" · ")
    }
}

/// File size as "12.3 KB".
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceDocument;
    use chrono::{TimeZone, Utc};

    fn conv_with(files: Vec<SourceDocument>, messages: usize) -> Conversation {
        Conversation {
            id: "c1".to_string(),
            title: None,
            files,
            message_count: messages,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    fn doc(name: &str) -> SourceDocument {
        SourceDocument {
            name: name.to_string(),
            size_bytes: None,
            uploaded_at: None,
        }
    }

    #[test]
    fn test_file_stem_strips_last_extension_only() {
        assert_eq!(file_stem("report.pdf"), "report");
        assert_eq!(file_stem("report.v2.pdf"), "report.v2");
        assert_eq!(file_stem("README"), "README");
        // A leading dot is a hidden file, not an extension.
        assert_eq!(file_stem(".gitignore"), ".gitignore");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_conversation_title_fallbacks() {
        let with_file = conv_with(vec![doc("quarterly_report.pdf")], 0);
        assert_eq!(conversation_title(&with_file), "quarterly_report");

        let mut titled = conv_with(vec![], 0);
        titled.title = Some("Budget review".to_string());
        assert_eq!(conversation_title(&titled), "Budget review");

        let bare = conv_with(vec![], 0);
        assert_eq!(conversation_title(&bare), "New Chat");
    }

    #[test]
    fn test_conversation_title_truncates_long_file_names() {
        let name = format!("{}.pdf", "x".repeat(40));
        let conv = conv_with(vec![doc(&name)], 0);
        assert_eq!(conversation_title(&conv), format!("{}...", "x".repeat(30)));
    }

    #[test]
    fn test_conversation_subtitle() {
        assert_eq!(conversation_subtitle(&conv_with(vec![], 0)), "Empty");
        assert_eq!(
            conversation_subtitle(&conv_with(vec![doc("a.pdf")], 1)),
            "1 file · 1 message"
        );
        assert_eq!(
            conversation_subtitle(&conv_with(vec![doc("a.pdf"), doc("b.pdf")], 5)),
            "2 files · 5 messages"
        );
        assert_eq!(conversation_subtitle(&conv_with(vec![], 3)), "3 messages");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(100), "0.1 KB");
    }
}
