//! Core domain types for deckhand
//!
//! These types mirror the records the studio service serves to its clients.
//! Every struct is supplied fresh on each fetch; nothing here owns state or
//! persists anything locally.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Conversation** | A chat thread with the service, seeded by uploaded documents |
//! | **SourceDocument** | An uploaded file used as generation input |
//! | **GenerationRecord** | One finished (or in-flight) generation run in the history |
//! | **Workflow** | The service-side pipeline state for the current generation |
//! | **Stage** | One step of the pipeline: RAG, Summary, Plan, Generate |
//! | **Slide** | One page of a generated deck, used by the preview carousel |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Source Documents
// ============================================

/// An uploaded document the service can generate from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// File name; older service payloads use "filename"
    #[serde(alias = "filename")]
    pub name: String,
    /// File size in bytes, when the service reports it
    #[serde(default, alias = "size")]
    pub size_bytes: Option<u64>,
    /// When the document was uploaded
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

// ============================================
// Conversations
// ============================================

/// A chat thread between the human and the generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique identifier assigned by the service
    pub id: String,
    /// Explicit title, when the human named the conversation
    #[serde(default)]
    pub title: Option<String>,
    /// Documents attached to this conversation
    #[serde(default)]
    pub files: Vec<SourceDocument>,
    /// Number of messages exchanged
    #[serde(default)]
    pub message_count: usize,
    /// When the conversation was created
    pub created_at: DateTime<Utc>,
    /// Most recent activity timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Conversation {
    /// The instant used for ages and day bucketing: last update,
    /// falling back to creation time.
    pub fn last_touched(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(Some(self.created_at))
    }
}

// ============================================
// Output Types
// ============================================

/// What a generation run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    /// A slide deck; the wire value "ppt" is a legacy alias
    #[serde(alias = "ppt")]
    Slides,
    Poster,
}

impl OutputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Slides => "slides",
            OutputType::Poster => "poster",
        }
    }

    /// Returns the display name used in history rows and the workflow panel
    pub fn display_name(&self) -> &'static str {
        match self {
            OutputType::Slides => "Slides",
            OutputType::Poster => "Poster",
        }
    }
}

impl std::fmt::Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OutputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slides" | "ppt" => Ok(OutputType::Slides),
            "poster" => Ok(OutputType::Poster),
            _ => Err(format!("unknown output type: {}", s)),
        }
    }
}

// ============================================
// Generation History
// ============================================

/// One slide of a generated deck, as served for preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    /// Slide title, when the generator set one
    #[serde(default)]
    pub title: Option<String>,
    /// URL of the rendered slide image
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One generation run in the history panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Unique identifier assigned by the service
    pub id: String,
    /// What this run produced
    pub output_type: OutputType,
    /// Visual style descriptor (e.g. "minimal", "academic")
    #[serde(default)]
    pub style: Option<String>,
    /// Content descriptor chosen at generation time
    #[serde(default)]
    pub content: Option<String>,
    /// Deck length descriptor; only meaningful for slides
    #[serde(default)]
    pub length: Option<String>,
    /// Layout density descriptor; only meaningful for posters
    #[serde(default)]
    pub density: Option<String>,
    /// Documents this run generated from
    #[serde(default)]
    pub source_files: Vec<SourceDocument>,
    /// Download URL for the finished artifact
    #[serde(default)]
    pub artifact_url: Option<String>,
    /// When this run happened
    #[serde(default, alias = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Slides for the preview carousel (empty for posters)
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl GenerationRecord {
    /// Compact display name for history rows.
    ///
    /// Joins output type, first source file stem, style, content, and the
    /// length (slides) or density (poster) descriptor, skipping absent parts:
    /// "Slides - quarterly_report - minimal - detailed - short".
    pub fn display_name(&self) -> String {
        let mut parts: Vec<String> = vec![self.output_type.display_name().to_string()];

        if let Some(first) = self.source_files.first() {
            parts.push(crate::display::file_stem(&first.name).to_string());
        }
        if let Some(style) = &self.style {
            parts.push(style.clone());
        }
        if let Some(content) = &self.content {
            parts.push(content.clone());
        }
        match self.output_type {
            OutputType::Slides => {
                if let Some(length) = &self.length {
                    parts.push(length.clone());
                }
            }
            OutputType::Poster => {
                if let Some(density) = &self.density {
                    parts.push(density.clone());
                }
            }
        }

        parts.join(" - ")
    }

    /// True when a finished artifact can be downloaded.
    pub fn has_artifact(&self) -> bool {
        self.artifact_url.is_some()
    }
}

// ============================================
// Workflow
// ============================================

/// Status of a single pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Not started yet
    Pending,
    /// Currently running
    Active,
    /// Finished
    Completed,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Pending => "pending",
            StageStatus::Active => "active",
            StageStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for StageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(StageStatus::Pending),
            "active" => Ok(StageStatus::Active),
            "completed" => Ok(StageStatus::Completed),
            _ => Err(format!("unknown stage status: {}", s)),
        }
    }
}

/// One step of the generation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStage {
    /// Stable stage identifier ("RAG", "Summary", ...)
    pub id: String,
    /// Display name
    pub name: String,
    /// Current status
    pub status: StageStatus,
    /// One-line description of what the stage does
    #[serde(default)]
    pub description: Option<String>,
    /// Live progress details reported by the service
    #[serde(default)]
    pub details: Option<String>,
}

/// Pipeline state for the generation currently in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// What is being generated
    pub output_type: OutputType,
    /// Style descriptor for this run
    #[serde(default)]
    pub style: Option<String>,
    /// Content descriptor for this run
    #[serde(default)]
    pub content: Option<String>,
    /// Pipeline stages in execution order
    #[serde(default)]
    pub stages: Vec<WorkflowStage>,
    /// Free-text description of the step currently executing
    #[serde(default)]
    pub current_step: Option<String>,
}

impl Workflow {
    /// The four pipeline stages in their idle state, shown before the
    /// service reports real progress.
    pub fn default_stages() -> Vec<WorkflowStage> {
        let stages = [
            ("RAG", "Index documents and run RAG queries ..."),
            ("Summary", "Summarize key content from RAG results ..."),
            ("Plan", "Plan the generation ..."),
            ("Generate", "Generate ..."),
        ];

        stages
            .into_iter()
            .map(|(id, description)| WorkflowStage {
                id: id.to_string(),
                name: id.to_string(),
                status: StageStatus::Pending,
                description: Some(description.to_string()),
                details: None,
            })
            .collect()
    }

    /// The stage currently running, if any.
    pub fn active_stage(&self) -> Option<&WorkflowStage> {
        self.stages.iter().find(|s| s.status == StageStatus::Active)
    }

    /// True once every stage has completed.
    pub fn is_complete(&self) -> bool {
        !self.stages.is_empty()
            && self
                .stages
                .iter()
                .all(|s| s.status == StageStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn doc(name: &str) -> SourceDocument {
        SourceDocument {
            name: name.to_string(),
            size_bytes: None,
            uploaded_at: None,
        }
    }

    #[test]
    fn test_last_touched_prefers_updated_at() {
        let created = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2026, 8, 5, 9, 0, 0).unwrap();
        let mut conv = Conversation {
            id: "c1".to_string(),
            title: None,
            files: vec![],
            message_count: 0,
            created_at: created,
            updated_at: Some(updated),
        };

        assert_eq!(conv.last_touched(), Some(updated));
        conv.updated_at = None;
        assert_eq!(conv.last_touched(), Some(created));
    }

    #[test]
    fn test_output_type_accepts_ppt_alias() {
        assert_eq!("ppt".parse::<OutputType>().unwrap(), OutputType::Slides);
        let parsed: OutputType = serde_json::from_str("\"ppt\"").unwrap();
        assert_eq!(parsed, OutputType::Slides);
    }

    #[test]
    fn test_display_name_joins_present_parts() {
        let record = GenerationRecord {
            id: "g1".to_string(),
            output_type: OutputType::Slides,
            style: Some("minimal".to_string()),
            content: Some("detailed".to_string()),
            length: Some("short".to_string()),
            density: Some("dense".to_string()),
            source_files: vec![doc("quarterly_report.pdf")],
            artifact_url: None,
            created_at: None,
            slides: vec![],
        };

        // Length applies to slides; density is ignored.
        assert_eq!(
            record.display_name(),
            "Slides - quarterly_report - minimal - detailed - short"
        );
    }

    #[test]
    fn test_display_name_poster_uses_density() {
        let record = GenerationRecord {
            id: "g2".to_string(),
            output_type: OutputType::Poster,
            style: None,
            content: None,
            length: Some("short".to_string()),
            density: Some("dense".to_string()),
            source_files: vec![],
            artifact_url: None,
            created_at: None,
            slides: vec![],
        };

        assert_eq!(record.display_name(), "Poster - dense");
    }

    #[test]
    fn test_source_document_filename_alias() {
        let doc: SourceDocument =
            serde_json::from_str(r#"{"filename": "notes.md", "size": 2048}"#).unwrap();
        assert_eq!(doc.name, "notes.md");
        assert_eq!(doc.size_bytes, Some(2048));
    }

    #[test]
    fn test_default_stages_are_pending_pipeline() {
        let stages = Workflow::default_stages();
        let ids: Vec<_> = stages.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["RAG", "Summary", "Plan", "Generate"]);
        assert!(stages.iter().all(|s| s.status == StageStatus::Pending));
    }

    #[test]
    fn test_workflow_completion() {
        let mut workflow = Workflow {
            output_type: OutputType::Slides,
            style: None,
            content: None,
            stages: Workflow::default_stages(),
            current_step: None,
        };
        assert!(!workflow.is_complete());
        assert!(workflow.active_stage().is_none());

        workflow.stages[0].status = StageStatus::Active;
        assert_eq!(workflow.active_stage().map(|s| s.id.as_str()), Some("RAG"));

        for stage in &mut workflow.stages {
            stage.status = StageStatus::Completed;
        }
        assert!(workflow.is_complete());
    }
}
