//! Application state for the TUI.

use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use deckhand_core::recency::{group_by_day, today_local, DayGroups};
use deckhand_core::{GenerationRecord, Slide, SourceDocument, Workflow};

use crate::conversation_row::ConversationRow;
use crate::remote::Remote;

/// How many ticks a transient status message stays visible (~5s at 100ms polls).
const STATUS_TICKS: u32 = 50;

/// Which column owns keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Panel {
    #[default]
    Conversations,
    Preview,
    History,
}

/// Active tab in the history column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum HistoryTab {
    #[default]
    Generated,
    Documents,
}

/// One selectable line in the generated-files tab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HistoryEntry {
    /// A generation record, by index into the history list
    Record(usize),
    /// A source file of an expanded record
    SourceFile { record: usize, file: usize },
    /// An entry of the de-duplicated file index
    IndexFile(usize),
}

/// A unique source file across the whole history, with its usage count.
#[derive(Debug, Clone)]
pub struct FileIndexEntry {
    pub name: String,
    pub size_bytes: Option<u64>,
    pub used_in: usize,
}

/// Build the selectable line list for the generated-files tab.
///
/// Records appear in history order; an expanded record is followed by its
/// source files; the file index trails the records.
pub fn build_history_entries(
    history: &[GenerationRecord],
    expanded: &HashSet<String>,
    file_index_len: usize,
) -> Vec<HistoryEntry> {
    let mut entries = Vec::new();

    for (record_idx, record) in history.iter().enumerate() {
        entries.push(HistoryEntry::Record(record_idx));
        if expanded.contains(&record.id) {
            for file_idx in 0..record.source_files.len() {
                entries.push(HistoryEntry::SourceFile {
                    record: record_idx,
                    file: file_idx,
                });
            }
        }
    }

    for idx in 0..file_index_len {
        entries.push(HistoryEntry::IndexFile(idx));
    }

    entries
}

/// Unique source files across all records, first-seen order, with counts.
pub fn build_file_index(history: &[GenerationRecord]) -> Vec<FileIndexEntry> {
    let mut index: Vec<FileIndexEntry> = Vec::new();

    for record in history {
        for file in &record.source_files {
            match index.iter_mut().find(|entry| entry.name == file.name) {
                Some(entry) => entry.used_in += 1,
                None => index.push(FileIndexEntry {
                    name: file.name.clone(),
                    size_bytes: file.size_bytes,
                    used_in: 1,
                }),
            }
        }
    }

    index
}

/// Day-bucketed conversation rows with a flattened selection cursor.
#[derive(Debug, Default)]
pub struct ConversationList {
    pub groups: DayGroups<ConversationRow>,
    /// Index into the flattened (header-free) row order
    pub selected: usize,
}

impl ConversationList {
    pub fn rebuild(&mut self, rows: Vec<ConversationRow>, today: NaiveDate) {
        self.groups = group_by_day(rows, |row| row.day(), today);
        if self.len() == 0 {
            self.selected = 0;
        } else if self.selected >= self.len() {
            self.selected = self.len() - 1;
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Rows in render order, across all non-empty buckets.
    pub fn flattened(&self) -> impl Iterator<Item = &ConversationRow> {
        self.groups.sections().flat_map(|(_, rows)| rows.iter())
    }

    pub fn selected_row(&self) -> Option<&ConversationRow> {
        self.flattened().nth(self.selected)
    }

    /// Position of the selection in the rendered list, counting one extra
    /// line per section header above it.
    pub fn list_index(&self) -> usize {
        let mut seen = 0;
        let mut headers = 0;
        for (_, rows) in self.groups.sections() {
            headers += 1;
            if self.selected < seen + rows.len() {
                break;
            }
            seen += rows.len();
        }
        self.selected + headers
    }

    pub fn move_down(&mut self) {
        if !self.is_empty() && self.selected + 1 < self.len() {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.len().saturating_sub(1);
    }

    pub fn select_id(&mut self, id: &str) {
        let found = self.flattened().position(|row| row.id == id);
        if let Some(idx) = found {
            self.selected = idx;
        }
    }
}

/// Carousel state for the slide preview.
#[derive(Debug, Default)]
pub struct PreviewState {
    pub slides: Vec<Slide>,
    pub index: usize,
    /// History record the slides came from
    pub record_id: Option<String>,
}

impl PreviewState {
    /// The carousel renders only when there is something to page through.
    pub fn is_visible(&self) -> bool {
        !self.slides.is_empty()
    }

    pub fn load(&mut self, record_id: &str, slides: Vec<Slide>) {
        self.slides = slides;
        self.index = 0;
        self.record_id = Some(record_id.to_string());
    }

    pub fn next(&mut self) {
        if !self.slides.is_empty() {
            self.index = (self.index + 1) % self.slides.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.slides.is_empty() {
            self.index = (self.index + self.slides.len() - 1) % self.slides.len();
        }
    }

    pub fn jump(&mut self, slide: usize) {
        if slide < self.slides.len() {
            self.index = slide;
        }
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }
}

/// Main application state.
pub struct App {
    /// Studio service handle
    remote: Remote,
    /// Which column owns keyboard focus
    pub focus: Panel,
    /// Day-bucketed conversation rows
    pub conversations: ConversationList,
    /// The conversation the human is working in
    pub current_conversation_id: Option<String>,
    /// Generation history, as served
    pub history: Vec<GenerationRecord>,
    /// Selectable lines for the generated-files tab
    pub history_entries: Vec<HistoryEntry>,
    /// Selection into `history_entries`
    pub history_selected: usize,
    /// Records whose source files are expanded
    pub expanded: HashSet<String>,
    /// De-duplicated source files across the history
    pub file_index: Vec<FileIndexEntry>,
    /// Active tab in the history column
    pub history_tab: HistoryTab,
    /// Uploaded documents, as served
    pub documents: Vec<SourceDocument>,
    /// Selection into `documents`
    pub documents_selected: usize,
    /// Pipeline state of the generation in flight
    pub workflow: Option<Workflow>,
    /// Slide preview carousel
    pub preview: PreviewState,
    /// Pending delete confirmation: (conversation id, title)
    pub confirm_delete: Option<(String, String)>,
    /// Transient footer message
    status: Option<String>,
    /// Tick the status message was set at
    status_tick: u32,
    /// Current tick count (incremented each render)
    pub tick_count: u32,
    /// Animation frame counter for the stage spinner
    pub animation_frame: u64,
    /// Newest history timestamp seen (for change detection)
    last_known_ts: Option<DateTime<Utc>>,
    /// Whether the app should exit
    pub should_quit: bool,
}

impl App {
    /// Create a new App talking to the given service.
    pub fn new(remote: Remote) -> Self {
        Self {
            remote,
            focus: Panel::default(),
            conversations: ConversationList::default(),
            current_conversation_id: None,
            history: Vec::new(),
            history_entries: Vec::new(),
            history_selected: 0,
            expanded: HashSet::new(),
            file_index: Vec::new(),
            history_tab: HistoryTab::default(),
            documents: Vec::new(),
            documents_selected: 0,
            workflow: None,
            preview: PreviewState::default(),
            confirm_delete: None,
            status: None,
            status_tick: 0,
            tick_count: 0,
            animation_frame: 0,
            last_known_ts: None,
            should_quit: false,
        }
    }

    /// Tick the animation state (call each frame).
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    /// The footer message, while it is still fresh.
    pub fn status_line(&self) -> Option<&str> {
        let age = self.tick_count.wrapping_sub(self.status_tick);
        if age < STATUS_TICKS {
            self.status.as_deref()
        } else {
            None
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.status_tick = self.tick_count;
    }

    // ========== Data Loading ==========

    /// Fetch everything from the service and rebuild derived state.
    pub fn refresh_all(&mut self) -> Result<()> {
        let conversations = self.remote.conversations()?;
        let history = self.remote.generations()?;
        let documents = self.remote.documents()?;
        let workflow = self.remote.current_workflow()?;

        let rows = conversations
            .iter()
            .map(ConversationRow::from_conversation)
            .collect();
        self.conversations.rebuild(rows, today_local());

        self.last_known_ts = newest_timestamp(&history);
        self.history = history;
        self.documents = documents;
        self.workflow = workflow;
        self.rebuild_history_entries();

        if self.documents_selected >= self.documents.len() {
            self.documents_selected = self.documents.len().saturating_sub(1);
        }

        tracing::debug!(
            conversations = self.conversations.len(),
            generations = self.history.len(),
            documents = self.documents.len(),
            "Refreshed from service"
        );
        Ok(())
    }

    /// Cheap periodic poll: workflow always, everything else only when the
    /// history advanced.
    pub fn refresh_live(&mut self) -> Result<()> {
        self.workflow = self.remote.current_workflow()?;

        let history = self.remote.generations()?;
        let newest = newest_timestamp(&history);
        if newest != self.last_known_ts {
            tracing::debug!("History changed, running full refresh");
            self.refresh_all()?;
        }
        Ok(())
    }

    fn rebuild_history_entries(&mut self) {
        self.file_index = build_file_index(&self.history);
        self.history_entries =
            build_history_entries(&self.history, &self.expanded, self.file_index.len());
        if self.history_selected >= self.history_entries.len() {
            self.history_selected = self.history_entries.len().saturating_sub(1);
        }
    }

    // ========== Key Handling ==========

    /// Dispatch a key event against the current focus and overlay.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // The delete confirmation swallows everything while open.
        if self.confirm_delete.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.confirm_delete_yes(),
                KeyCode::Char('n') | KeyCode::Esc => self.confirm_delete = None,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Char('r') => {
                if let Err(e) = self.refresh_all() {
                    self.report_error("refresh failed", e);
                } else {
                    self.set_status("Refreshed");
                }
            }
            KeyCode::Char('n') => self.new_conversation(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Home | KeyCode::Char('g') => self.move_first(),
            KeyCode::End | KeyCode::Char('G') => self.move_last(),
            KeyCode::Enter => self.activate_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
            KeyCode::Char(' ') => self.toggle_expand(),
            KeyCode::Left | KeyCode::Char('h') => {
                if self.focus == Panel::Preview {
                    self.preview.prev();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.focus == Panel::Preview {
                    self.preview.next();
                }
            }
            KeyCode::Char(c @ '1'..='9') => self.handle_digit(c),
            _ => {}
        }
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            Panel::Conversations => {
                if self.preview.is_visible() {
                    Panel::Preview
                } else {
                    Panel::History
                }
            }
            Panel::Preview => Panel::History,
            Panel::History => Panel::Conversations,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Panel::Conversations => Panel::History,
            Panel::Preview => Panel::Conversations,
            Panel::History => {
                if self.preview.is_visible() {
                    Panel::Preview
                } else {
                    Panel::Conversations
                }
            }
        };
    }

    fn handle_digit(&mut self, c: char) {
        match self.focus {
            Panel::Preview => {
                let slide = (c as usize) - ('1' as usize);
                self.preview.jump(slide);
            }
            Panel::History => match c {
                '1' => self.history_tab = HistoryTab::Generated,
                '2' => self.history_tab = HistoryTab::Documents,
                _ => {}
            },
            Panel::Conversations => {}
        }
    }

    fn move_down(&mut self) {
        match self.focus {
            Panel::Conversations => self.conversations.move_down(),
            Panel::History => match self.history_tab {
                HistoryTab::Generated => {
                    if self.history_selected + 1 < self.history_entries.len() {
                        self.history_selected += 1;
                    }
                }
                HistoryTab::Documents => {
                    if self.documents_selected + 1 < self.documents.len() {
                        self.documents_selected += 1;
                    }
                }
            },
            Panel::Preview => self.preview.next(),
        }
    }

    fn move_up(&mut self) {
        match self.focus {
            Panel::Conversations => self.conversations.move_up(),
            Panel::History => match self.history_tab {
                HistoryTab::Generated => {
                    self.history_selected = self.history_selected.saturating_sub(1)
                }
                HistoryTab::Documents => {
                    self.documents_selected = self.documents_selected.saturating_sub(1)
                }
            },
            Panel::Preview => self.preview.prev(),
        }
    }

    fn move_first(&mut self) {
        match self.focus {
            Panel::Conversations => self.conversations.select_first(),
            Panel::History => match self.history_tab {
                HistoryTab::Generated => self.history_selected = 0,
                HistoryTab::Documents => self.documents_selected = 0,
            },
            Panel::Preview => self.preview.jump(0),
        }
    }

    fn move_last(&mut self) {
        match self.focus {
            Panel::Conversations => self.conversations.select_last(),
            Panel::History => match self.history_tab {
                HistoryTab::Generated => {
                    self.history_selected = self.history_entries.len().saturating_sub(1)
                }
                HistoryTab::Documents => {
                    self.documents_selected = self.documents.len().saturating_sub(1)
                }
            },
            Panel::Preview => {
                let last = self.preview.slides.len().saturating_sub(1);
                self.preview.jump(last);
            }
        }
    }

    // ========== Actions ==========

    fn activate_selected(&mut self) {
        match self.focus {
            Panel::Conversations => {
                if let Some(row) = self.conversations.selected_row() {
                    let (id, title) = (row.id.clone(), row.title.clone());
                    self.current_conversation_id = Some(id);
                    self.set_status(format!("Opened {}", title));
                }
            }
            Panel::History => match self.history_tab {
                HistoryTab::Generated => self.activate_history_entry(),
                HistoryTab::Documents => {
                    if let Some(doc) = self.documents.get(self.documents_selected) {
                        let name = doc.name.clone();
                        self.reuse_document(&name);
                    }
                }
            },
            Panel::Preview => {}
        }
    }

    fn activate_history_entry(&mut self) {
        let Some(entry) = self.history_entries.get(self.history_selected).copied() else {
            return;
        };

        match entry {
            HistoryEntry::Record(idx) => {
                if let Some(record) = self.history.get(idx) {
                    let name = record.display_name();
                    if record.slides.is_empty() {
                        self.set_status(format!("{} has no preview", name));
                    } else {
                        let (id, slides) = (record.id.clone(), record.slides.clone());
                        self.preview.load(&id, slides);
                        self.set_status(format!("Previewing {}", name));
                    }
                }
            }
            HistoryEntry::SourceFile { record, file } => {
                if let Some(name) = self
                    .history
                    .get(record)
                    .and_then(|r| r.source_files.get(file))
                    .map(|f| f.name.clone())
                {
                    self.reuse_document(&name);
                }
            }
            HistoryEntry::IndexFile(idx) => {
                if let Some(name) = self.file_index.get(idx).map(|f| f.name.clone()) {
                    self.reuse_document(&name);
                }
            }
        }
    }

    /// Ask the service to reuse a document in the active conversation.
    fn reuse_document(&mut self, name: &str) {
        match self.remote.select_document(name) {
            Ok(()) => self.set_status(format!("Selected {} for reuse", name)),
            Err(e) => self.report_error("select failed", e.into()),
        }
    }

    fn new_conversation(&mut self) {
        match self.remote.create_conversation() {
            Ok(conv) => {
                let id = conv.id.clone();
                self.current_conversation_id = Some(id.clone());
                if let Err(e) = self.refresh_all() {
                    self.report_error("refresh failed", e);
                }
                self.conversations.select_id(&id);
                self.set_status("Started a new conversation");
            }
            Err(e) => self.report_error("create failed", e.into()),
        }
    }

    fn request_delete(&mut self) {
        if self.focus != Panel::Conversations {
            return;
        }
        if let Some(row) = self.conversations.selected_row() {
            self.confirm_delete = Some((row.id.clone(), row.title.clone()));
        }
    }

    fn confirm_delete_yes(&mut self) {
        let Some((id, title)) = self.confirm_delete.take() else {
            return;
        };

        match self.remote.delete_conversation(&id) {
            Ok(true) => self.set_status(format!("Deleted {}", title)),
            Ok(false) => self.set_status(format!("{} was already gone", title)),
            Err(e) => {
                self.report_error("delete failed", e.into());
                return;
            }
        }

        if self.current_conversation_id.as_deref() == Some(id.as_str()) {
            self.current_conversation_id = None;
        }
        if let Err(e) = self.refresh_all() {
            self.report_error("refresh failed", e);
        }
    }

    fn toggle_expand(&mut self) {
        if self.focus != Panel::History || self.history_tab != HistoryTab::Generated {
            return;
        }
        let Some(entry) = self.history_entries.get(self.history_selected).copied() else {
            return;
        };

        // Expanding works from the record line or any of its file lines.
        let record_idx = match entry {
            HistoryEntry::Record(idx) => idx,
            HistoryEntry::SourceFile { record, .. } => record,
            HistoryEntry::IndexFile(_) => return,
        };

        if let Some(record) = self.history.get(record_idx) {
            if !self.expanded.remove(&record.id) {
                self.expanded.insert(record.id.clone());
            }
            self.rebuild_history_entries();
            // Keep the cursor on the record we just toggled.
            if let Some(pos) = self
                .history_entries
                .iter()
                .position(|e| *e == HistoryEntry::Record(record_idx))
            {
                self.history_selected = pos;
            }
        }
    }

    fn report_error(&mut self, context: &str, error: anyhow::Error) {
        tracing::warn!(error = %error, "{}", context);
        self.set_status(format!("{}: {}", context, error));
    }
}

/// Newest generation timestamp in a history payload.
fn newest_timestamp(history: &[GenerationRecord]) -> Option<DateTime<Utc>> {
    history.iter().filter_map(|r| r.created_at).max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use deckhand_core::OutputType;

    fn record(id: &str, files: &[&str]) -> GenerationRecord {
        GenerationRecord {
            id: id.to_string(),
            output_type: OutputType::Slides,
            style: None,
            content: None,
            length: None,
            density: None,
            source_files: files
                .iter()
                .map(|name| SourceDocument {
                    name: name.to_string(),
                    size_bytes: Some(1024),
                    uploaded_at: None,
                })
                .collect(),
            artifact_url: None,
            created_at: None,
            slides: Vec::new(),
        }
    }

    fn row(id: &str, day: Option<(i32, u32, u32)>) -> ConversationRow {
        ConversationRow {
            id: id.to_string(),
            title: id.to_string(),
            subtitle: "Empty".to_string(),
            last_touched: day
                .map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_file_index_dedups_in_first_seen_order() {
        let history = vec![
            record("g1", &["a.pdf", "b.md"]),
            record("g2", &["b.md"]),
            record("g3", &["c.txt", "a.pdf"]),
        ];

        let index = build_file_index(&history);
        let names: Vec<_> = index.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.md", "c.txt"]);
        assert_eq!(index[0].used_in, 2);
        assert_eq!(index[1].used_in, 2);
        assert_eq!(index[2].used_in, 1);
    }

    #[test]
    fn test_history_entries_follow_expansion() {
        let history = vec![record("g1", &["a.pdf", "b.md"]), record("g2", &["c.txt"])];
        let mut expanded = HashSet::new();

        let entries = build_history_entries(&history, &expanded, 3);
        assert_eq!(
            entries,
            vec![
                HistoryEntry::Record(0),
                HistoryEntry::Record(1),
                HistoryEntry::IndexFile(0),
                HistoryEntry::IndexFile(1),
                HistoryEntry::IndexFile(2),
            ]
        );

        expanded.insert("g1".to_string());
        let entries = build_history_entries(&history, &expanded, 0);
        assert_eq!(
            entries,
            vec![
                HistoryEntry::Record(0),
                HistoryEntry::SourceFile { record: 0, file: 0 },
                HistoryEntry::SourceFile { record: 0, file: 1 },
                HistoryEntry::Record(1),
            ]
        );
    }

    #[test]
    fn test_conversation_list_selection_spans_buckets() {
        let mut list = ConversationList::default();
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        list.rebuild(
            vec![
                row("today-1", Some((2026, 8, 6))),
                row("yesterday-1", Some((2026, 8, 5))),
                row("old-1", Some((2026, 1, 1))),
            ],
            today,
        );

        assert_eq!(list.len(), 3);
        assert_eq!(list.selected_row().unwrap().id, "today-1");

        list.move_down();
        assert_eq!(list.selected_row().unwrap().id, "yesterday-1");
        list.move_down();
        assert_eq!(list.selected_row().unwrap().id, "old-1");
        // Bottom of the list stays put.
        list.move_down();
        assert_eq!(list.selected_row().unwrap().id, "old-1");

        list.select_first();
        assert_eq!(list.selected_row().unwrap().id, "today-1");
    }

    #[test]
    fn test_conversation_list_index_accounts_for_headers() {
        let mut list = ConversationList::default();
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        list.rebuild(
            vec![
                row("today-1", Some((2026, 8, 6))),
                row("today-2", Some((2026, 8, 6))),
                row("old-1", Some((2026, 1, 1))),
            ],
            today,
        );

        // "Today" header, two rows, "Older" header, one row.
        list.selected = 0;
        assert_eq!(list.list_index(), 1);
        list.selected = 1;
        assert_eq!(list.list_index(), 2);
        list.selected = 2;
        assert_eq!(list.list_index(), 4);
    }

    #[test]
    fn test_rebuild_clamps_selection() {
        let mut list = ConversationList::default();
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        list.rebuild(
            vec![
                row("a", Some((2026, 8, 6))),
                row("b", Some((2026, 8, 6))),
                row("c", Some((2026, 8, 6))),
            ],
            today,
        );
        list.select_last();

        list.rebuild(vec![row("a", Some((2026, 8, 6)))], today);
        assert_eq!(list.selected_row().unwrap().id, "a");
    }

    #[test]
    fn test_preview_carousel_wraps() {
        let mut preview = PreviewState::default();
        assert!(!preview.is_visible());

        preview.load(
            "g1",
            vec![
                Slide { title: None, image_url: None },
                Slide { title: None, image_url: None },
                Slide { title: None, image_url: None },
            ],
        );
        assert!(preview.is_visible());
        assert_eq!(preview.index, 0);

        preview.prev();
        assert_eq!(preview.index, 2);
        preview.next();
        assert_eq!(preview.index, 0);
        preview.next();
        assert_eq!(preview.index, 1);

        preview.jump(2);
        assert_eq!(preview.index, 2);
        // Out-of-range jumps are ignored.
        preview.jump(9);
        assert_eq!(preview.index, 2);
    }

    #[test]
    fn test_newest_timestamp() {
        let mut history = vec![record("g1", &[]), record("g2", &[])];
        assert_eq!(newest_timestamp(&history), None);

        let early = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 8, 5, 0, 0, 0).unwrap();
        history[0].created_at = Some(late);
        history[1].created_at = Some(early);
        assert_eq!(newest_timestamp(&history), Some(late));
    }
}
