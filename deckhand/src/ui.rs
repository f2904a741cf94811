//! UI rendering for the TUI.

use deckhand_core::display::{format_file_size, truncate};
use deckhand_core::recency::relative_age_opt;
use deckhand_core::{OutputType, StageStatus, Workflow};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, HistoryEntry, HistoryTab, Panel};

// ========== View Colors ==========
// Consistent colors across the three columns

/// Accent for the focused block border and selection
const ACCENT: Color = Color::Rgb(170, 120, 220);
/// Border color for unfocused blocks
const BORDER_DIM: Color = Color::Rgb(70, 70, 70);
/// Section header color (Today / Yesterday / ...)
const SECTION_COLOR: Color = Color::Rgb(130, 130, 130);
/// Slides glyph color
const SLIDES_COLOR: Color = Color::Rgb(90, 150, 250);
/// Poster glyph color
const POSTER_COLOR: Color = Color::Rgb(200, 110, 220);
/// Completed stage color
const STAGE_DONE: Color = Color::Rgb(80, 200, 120);
/// Active stage color
const STAGE_ACTIVE: Color = Color::Rgb(90, 150, 250);
/// Pending stage color
const STAGE_PENDING: Color = Color::Rgb(90, 90, 90);
/// Marker for the conversation currently open
const CURRENT_MARK: Color = Color::Rgb(240, 180, 100);

/// Spinner frames for the active stage, advanced by the animation counter.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Min(10),   // Columns
        Constraint::Length(1), // Footer
    ])
    .split(area);

    let columns = Layout::horizontal([
        Constraint::Percentage(28), // Conversations
        Constraint::Percentage(40), // Workflow + preview
        Constraint::Percentage(32), // History & documents
    ])
    .split(chunks[0]);

    render_conversations(frame, app, columns[0]);
    render_center(frame, app, columns[1]);
    render_history(frame, app, columns[2]);
    render_footer(frame, app, chunks[1]);

    if app.confirm_delete.is_some() {
        render_confirm_delete(frame, app, area);
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(BORDER_DIM)
    }
}

// ========== Conversations ==========

fn render_conversations(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Panel::Conversations;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(focused))
        .title(" Conversations ")
        .title_style(border_style(focused).bold());

    if app.conversations.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("No conversations yet").centered(),
            Line::from(""),
            Line::from(Span::styled(
                "Press n to start a new conversation",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut items: Vec<ListItem> = Vec::new();
    for (bucket, rows) in app.conversations.groups.sections() {
        items.push(ListItem::new(Line::from(Span::styled(
            format!(" {} ", bucket.label()),
            Style::default()
                .fg(SECTION_COLOR)
                .add_modifier(Modifier::BOLD),
        ))));

        for row in rows {
            let is_current = app.current_conversation_id.as_deref() == Some(row.id.as_str());
            let marker = if is_current { "▸ " } else { "  " };
            let title_style = if is_current {
                Style::default().fg(CURRENT_MARK).bold()
            } else {
                Style::default().fg(Color::White)
            };

            let meta = format!("{}  {}", row.subtitle, row.relative_time());
            items.push(ListItem::new(vec![
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(CURRENT_MARK)),
                    Span::styled(truncate(&row.title, 28), title_style),
                ]),
                Line::from(Span::styled(
                    format!("    {}", meta),
                    Style::default().fg(Color::DarkGray),
                )),
            ]));
        }
    }

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Rgb(45, 35, 60))
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    state.select(Some(app.conversations.list_index()));
    frame.render_stateful_widget(list, area, &mut state);
}

// ========== Center Column ==========

fn render_center(frame: &mut Frame, app: &App, area: Rect) {
    if app.preview.is_visible() {
        let chunks = Layout::vertical([
            Constraint::Min(8),    // Workflow
            Constraint::Length(8), // Preview carousel
        ])
        .split(area);
        render_workflow(frame, app, chunks[0]);
        render_preview(frame, app, chunks[1]);
    } else {
        render_workflow(frame, app, area);
    }
}

fn render_workflow(frame: &mut Frame, app: &App, area: Rect) {
    let processing = app
        .workflow
        .as_ref()
        .is_some_and(|w| !w.is_complete());

    let badge = if processing {
        Span::styled(" Processing ", Style::default().fg(Color::Black).bg(ACCENT))
    } else {
        Span::styled(
            " Ready ",
            Style::default().fg(Color::Black).bg(STAGE_DONE),
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_DIM))
        .title(" Workflow Status ")
        .title_style(Style::default().fg(Color::White).bold())
        .title_top(Line::from(badge).right_aligned());

    let Some(workflow) = &app.workflow else {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from("No active workflow").centered(),
            Line::from(Span::styled(
                "Start generating to see progress",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = workflow_task_lines(workflow);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "PROGRESS",
        Style::default().fg(SECTION_COLOR).bold(),
    )));

    let stages = if workflow.stages.is_empty() {
        Workflow::default_stages()
    } else {
        workflow.stages.clone()
    };

    for (idx, stage) in stages.iter().enumerate() {
        let (glyph, color) = match stage.status {
            StageStatus::Completed => ("✔".to_string(), STAGE_DONE),
            StageStatus::Active => {
                let frame_idx = (app.animation_frame / 2) as usize % SPINNER.len();
                (SPINNER[frame_idx].to_string(), STAGE_ACTIVE)
            }
            StageStatus::Pending => ("○".to_string(), STAGE_PENDING),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{} ", glyph), Style::default().fg(color)),
            Span::styled(stage.name.clone(), Style::default().fg(color).bold()),
        ]));
        if let Some(description) = &stage.description {
            lines.push(Line::from(Span::styled(
                format!("    {}", description),
                Style::default().fg(Color::DarkGray),
            )));
        }
        if let Some(details) = &stage.details {
            lines.push(Line::from(Span::styled(
                format!("    {}", details),
                Style::default().fg(Color::Gray),
            )));
        }

        // Connector between stage cards, colored once the stage is done.
        if idx + 1 < stages.len() {
            let connector_color = if stage.status == StageStatus::Completed {
                STAGE_DONE
            } else {
                STAGE_PENDING
            };
            lines.push(Line::from(Span::styled(
                "│",
                Style::default().fg(connector_color),
            )));
        }
    }

    if let Some(step) = &workflow.current_step {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Current step: ", Style::default().fg(SECTION_COLOR)),
            Span::styled(step.clone(), Style::default().fg(Color::White)),
        ]));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}

fn workflow_task_lines(workflow: &Workflow) -> Vec<Line<'static>> {
    let (glyph, color, label) = match workflow.output_type {
        OutputType::Slides => ("▣", SLIDES_COLOR, "Generating Slides"),
        OutputType::Poster => ("▨", POSTER_COLOR, "Generating Poster"),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", glyph), Style::default().fg(color)),
        Span::styled(label, Style::default().fg(Color::White).bold()),
    ])];

    if let Some(style) = &workflow.style {
        lines.push(Line::from(Span::styled(
            format!("  Style: {}", style),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(content) = &workflow.content {
        lines.push(Line::from(Span::styled(
            format!("  Content: {}", content),
            Style::default().fg(Color::Gray),
        )));
    }

    lines
}

// ========== Slide Preview ==========

fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Panel::Preview;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(focused))
        .title(" Slide Preview ")
        .title_style(border_style(focused).bold());

    let total = app.preview.slides.len();
    let current = app.preview.index;

    // Dot row: one dot per slide, the current one filled.
    let mut dots: Vec<Span> = Vec::new();
    for idx in 0..total {
        let style = if idx == current {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(STAGE_PENDING)
        };
        dots.push(Span::styled(if idx == current { "●" } else { "∙" }, style));
        if idx + 1 < total {
            dots.push(Span::raw(" "));
        }
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled("‹ ", Style::default().fg(SECTION_COLOR)),
            Span::styled(
                format!("{} / {}", current + 1, total),
                Style::default().fg(Color::White).bold(),
            ),
            Span::styled(" ›", Style::default().fg(SECTION_COLOR)),
        ])
        .centered(),
        Line::from(dots).centered(),
        Line::from(""),
    ];

    if let Some(slide) = app.preview.current() {
        let title = slide
            .title
            .clone()
            .unwrap_or_else(|| format!("Slide {}", current + 1));
        lines.push(Line::from(Span::styled(title, Style::default().fg(Color::White))).centered());
        if let Some(url) = &slide.image_url {
            lines.push(
                Line::from(Span::styled(
                    truncate(url, 60),
                    Style::default().fg(Color::DarkGray),
                ))
                .centered(),
            );
        }
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

// ========== History & Documents ==========

fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(2), // Tabs
        Constraint::Min(5),    // Content
    ])
    .split(area);

    render_history_tabs(frame, app, chunks[0]);

    match app.history_tab {
        HistoryTab::Generated => render_generated_tab(frame, app, chunks[1]),
        HistoryTab::Documents => render_documents_tab(frame, app, chunks[1]),
    }
}

fn render_history_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tab = |label: &str, active: bool| {
        if active {
            Span::styled(
                format!(" {} ", label),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(SECTION_COLOR))
        }
    };

    let line = Line::from(vec![
        tab("[1] Generated Files", app.history_tab == HistoryTab::Generated),
        Span::raw(" "),
        tab("[2] Documents", app.history_tab == HistoryTab::Documents),
    ]);

    let paragraph = Paragraph::new(vec![line, Line::from("")]);
    frame.render_widget(paragraph, area);
}

fn render_generated_tab(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Panel::History;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(focused))
        .title(" History ")
        .title_style(border_style(focused).bold());

    if app.history.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No generated files yet",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .history_entries
        .iter()
        .map(|entry| history_entry_item(app, *entry))
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Rgb(45, 35, 60))
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    state.select(Some(app.history_selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn history_entry_item(app: &App, entry: HistoryEntry) -> ListItem<'static> {
    match entry {
        HistoryEntry::Record(idx) => {
            let Some(record) = app.history.get(idx) else {
                return ListItem::new("");
            };

            let (glyph, color) = match record.output_type {
                OutputType::Slides => ("▣", SLIDES_COLOR),
                OutputType::Poster => ("▨", POSTER_COLOR),
            };
            let expand_mark = if record.source_files.is_empty() {
                "  "
            } else if app.expanded.contains(&record.id) {
                "▾ "
            } else {
                "▸ "
            };

            let mut meta = relative_age_opt(record.created_at);
            if record.has_artifact() {
                if !meta.is_empty() {
                    meta.push_str("  ");
                }
                meta.push_str("⇩ artifact");
            }

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(expand_mark, Style::default().fg(SECTION_COLOR)),
                    Span::styled(format!("{} ", glyph), Style::default().fg(color)),
                    Span::styled(
                        truncate(&record.display_name(), 34),
                        Style::default().fg(Color::White),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("     {}", meta),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        }
        HistoryEntry::SourceFile { record, file } => {
            let Some(doc) = app
                .history
                .get(record)
                .and_then(|r| r.source_files.get(file))
            else {
                return ListItem::new("");
            };

            let size = doc
                .size_bytes
                .map(|b| format!(" ({})", format_file_size(b)))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled("      · ", Style::default().fg(SECTION_COLOR)),
                Span::styled(truncate(&doc.name, 30), Style::default().fg(Color::Gray)),
                Span::styled(size, Style::default().fg(Color::DarkGray)),
            ]))
        }
        HistoryEntry::IndexFile(idx) => {
            let Some(entry) = app.file_index.get(idx) else {
                return ListItem::new("");
            };

            let count = if entry.used_in > 1 {
                format!("  {}x", entry.used_in)
            } else {
                String::new()
            };
            let mut lines = Vec::new();
            // The index section opens with its own header line.
            if idx == 0 {
                lines.push(Line::from(Span::styled(
                    " File Index ",
                    Style::default()
                        .fg(SECTION_COLOR)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            lines.push(Line::from(vec![
                Span::styled("  ≡ ", Style::default().fg(SECTION_COLOR)),
                Span::styled(truncate(&entry.name, 30), Style::default().fg(Color::Gray)),
                Span::styled(count, Style::default().fg(SLIDES_COLOR)),
            ]));
            ListItem::new(lines)
        }
    }
}

fn render_documents_tab(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Panel::History;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(focused))
        .title(" Documents ")
        .title_style(border_style(focused).bold());

    if app.documents.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No documents uploaded yet",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .documents
        .iter()
        .map(|doc| {
            let size = doc
                .size_bytes
                .map(format_file_size)
                .unwrap_or_default();
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("▤ ", Style::default().fg(SLIDES_COLOR)),
                    Span::styled(truncate(&doc.name, 32), Style::default().fg(Color::White)),
                ]),
                Line::from(Span::styled(
                    format!("   {}", size),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Rgb(45, 35, 60))
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    state.select(Some(app.documents_selected));
    frame.render_stateful_widget(list, area, &mut state);
}

// ========== Footer ==========

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(status) = app.status_line() {
        Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(CURRENT_MARK),
        ))
    } else {
        let hints = match app.focus {
            Panel::Conversations => "j/k move · Enter open · n new · d delete · Tab focus · q quit",
            Panel::Preview => "h/l slide · 1-9 jump · Tab focus · q quit",
            Panel::History => {
                "j/k move · Enter select · Space expand · 1/2 tabs · Tab focus · q quit"
            }
        };
        Line::from(Span::styled(
            format!(" {}", hints),
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

// ========== Delete Confirmation ==========

fn render_confirm_delete(frame: &mut Frame, app: &App, area: Rect) {
    let Some((_, title)) = &app.confirm_delete else {
        return;
    };

    let modal = centered_rect(46, 8, area);
    frame.render_widget(Clear, modal);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Delete Conversation?",
            Style::default().fg(Color::White).bold(),
        ))
        .centered(),
        Line::from(Span::styled(
            truncate(title, 40),
            Style::default().fg(CURRENT_MARK),
        ))
        .centered(),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default().fg(Color::Gray),
        ))
        .centered(),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y] ", Style::default().fg(Color::Red).bold()),
            Span::styled("Delete   ", Style::default().fg(Color::Red)),
            Span::styled("[n] ", Style::default().fg(Color::Gray).bold()),
            Span::styled("Cancel", Style::default().fg(Color::Gray)),
        ])
        .centered(),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(paragraph, modal);
}

/// A rect of the given size centered in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let modal = centered_rect(46, 8, area);
        assert_eq!(modal.width, 46);
        assert_eq!(modal.height, 8);
        assert_eq!(modal.x, 27);
        assert_eq!(modal.y, 16);
    }

    #[test]
    fn test_centered_rect_clamps_to_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let modal = centered_rect(46, 8, area);
        assert!(modal.width <= area.width);
        assert!(modal.height <= area.height);
    }
}
