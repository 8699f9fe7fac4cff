//! Persisted generation record types.

use crate::Framework;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a generation record.
///
/// Transitions: `Pending → Processing → {Completed | Failed}`. The terminal
/// states are never left once entered.
///
/// # Examples
///
/// ```
/// use atelier_core::GenerationStatus;
///
/// assert!(GenerationStatus::Completed.is_terminal());
/// assert!(!GenerationStatus::Processing.is_terminal());
/// assert_eq!(GenerationStatus::Failed.as_str(), "failed");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    /// Created but not yet picked up
    Pending,
    /// Generation in flight
    Processing,
    /// Finished with code and a quality score
    Completed,
    /// Finished with an error message
    Failed,
}

impl GenerationStatus {
    /// Canonical lowercase identifier, matching the stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Pending => "pending",
            GenerationStatus::Processing => "processing",
            GenerationStatus::Completed => "completed",
            GenerationStatus::Failed => "failed",
        }
    }

    /// Parse the stored representation back into a status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(GenerationStatus::Pending),
            "processing" => Some(GenerationStatus::Processing),
            "completed" => Some(GenerationStatus::Completed),
            "failed" => Some(GenerationStatus::Failed),
            _ => None,
        }
    }

    /// Whether this status is terminal (completed or failed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStatus::Completed | GenerationStatus::Failed)
    }
}

/// A persisted generation entity.
///
/// Created at request start, mutated exactly twice by the orchestrator
/// (`processing → completed` or `processing → failed`), never deleted by
/// this subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Unique identity
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Original prompt text
    pub prompt: String,
    /// Target framework
    pub framework: Framework,
    /// Lifecycle status
    pub status: GenerationStatus,
    /// Chosen provider identifier (e.g. "anthropic", "gateway")
    pub provider: Option<String>,
    /// Chosen model identifier
    pub model: Option<String>,
    /// Resulting code; None until completion
    pub code: Option<String>,
    /// Aggregate quality score in [0, 1]; None until scored
    pub quality_score: Option<f32>,
    /// Error message; set only on failure
    pub error_message: Option<String>,
    /// Prior generation this one refines (forest, never cyclic)
    pub parent_generation_id: Option<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Completion timestamp; None until terminal
    pub completed_at: Option<DateTime<Utc>>,
}

/// Fields for creating a new generation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewGeneration {
    /// Owning user
    pub user_id: Uuid,
    /// Original prompt text
    pub prompt: String,
    /// Target framework
    pub framework: Framework,
    /// Initial lifecycle status
    pub status: GenerationStatus,
    /// Chosen provider identifier
    pub provider: Option<String>,
    /// Chosen model identifier
    pub model: Option<String>,
    /// Prior generation this one refines, if any
    pub parent_generation_id: Option<Uuid>,
}

/// Fields for finalizing a generation record.
///
/// Exactly one of the two shapes is ever written: completion (code + score)
/// or failure (error message).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationUpdate {
    /// New lifecycle status
    pub status: Option<GenerationStatus>,
    /// Final code on completion
    pub code: Option<String>,
    /// Aggregate quality score on completion
    pub quality_score: Option<f32>,
    /// Error message on failure
    pub error_message: Option<String>,
    /// Completion timestamp
    pub completed_at: Option<DateTime<Utc>>,
}

impl GenerationUpdate {
    /// Update marking the record completed with its final code and score.
    pub fn completed(code: impl Into<String>, quality_score: f32) -> Self {
        Self {
            status: Some(GenerationStatus::Completed),
            code: Some(code.into()),
            quality_score: Some(quality_score),
            error_message: None,
            completed_at: Some(Utc::now()),
        }
    }

    /// Update marking the record failed with an error message.
    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            status: Some(GenerationStatus::Failed),
            code: None,
            quality_score: None,
            error_message: Some(error_message.into()),
            completed_at: Some(Utc::now()),
        }
    }
}
