//! Row types for the generation store.

use crate::schema::{generations, usage_events};
use atelier_core::{Framework, GenerationRecord, GenerationStatus, GenerationUpdate, NewGeneration};
use atelier_error::{DatabaseError, DatabaseErrorKind};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// A persisted generation row.
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable)]
#[diesel(table_name = generations)]
pub struct GenerationRow {
    /// Unique identity
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Original prompt text
    pub prompt: String,
    /// Target framework identifier
    pub framework: String,
    /// Lifecycle status identifier
    pub status: String,
    /// Chosen provider identifier
    pub provider: Option<String>,
    /// Chosen model identifier
    pub model: Option<String>,
    /// Resulting code
    pub code: Option<String>,
    /// Aggregate quality score
    pub quality_score: Option<f32>,
    /// Error message
    pub error_message: Option<String>,
    /// Parent generation for refinement chains
    pub parent_generation_id: Option<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Completion timestamp
    pub completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<GenerationRow> for GenerationRecord {
    type Error = DatabaseError;

    fn try_from(row: GenerationRow) -> Result<Self, Self::Error> {
        let framework = Framework::parse(&row.framework).ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::Serialization(format!(
                "unknown framework '{}'",
                row.framework
            )))
        })?;
        let status = GenerationStatus::parse(&row.status).ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::Serialization(format!(
                "unknown status '{}'",
                row.status
            )))
        })?;
        Ok(GenerationRecord {
            id: row.id,
            user_id: row.user_id,
            prompt: row.prompt,
            framework,
            status,
            provider: row.provider,
            model: row.model,
            code: row.code,
            quality_score: row.quality_score,
            error_message: row.error_message,
            parent_generation_id: row.parent_generation_id,
            created_at: row.created_at,
            completed_at: row.completed_at,
        })
    }
}

/// Insertable generation row.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = generations)]
pub struct NewGenerationRow {
    /// Unique identity, assigned at insert time
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Original prompt text
    pub prompt: String,
    /// Target framework identifier
    pub framework: String,
    /// Lifecycle status identifier
    pub status: String,
    /// Chosen provider identifier
    pub provider: Option<String>,
    /// Chosen model identifier
    pub model: Option<String>,
    /// Parent generation for refinement chains
    pub parent_generation_id: Option<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<NewGeneration> for NewGenerationRow {
    fn from(new_generation: NewGeneration) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: new_generation.user_id,
            prompt: new_generation.prompt,
            framework: new_generation.framework.as_str().to_string(),
            status: new_generation.status.as_str().to_string(),
            provider: new_generation.provider,
            model: new_generation.model,
            parent_generation_id: new_generation.parent_generation_id,
            created_at: Utc::now(),
        }
    }
}

/// Changeset for finalizing a generation row.
#[derive(Debug, Clone, PartialEq, Default, AsChangeset)]
#[diesel(table_name = generations)]
pub struct UpdateGenerationRow {
    /// New lifecycle status identifier
    pub status: Option<String>,
    /// Final code on completion
    pub code: Option<String>,
    /// Aggregate quality score on completion
    pub quality_score: Option<f32>,
    /// Error message on failure
    pub error_message: Option<String>,
    /// Completion timestamp
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<GenerationUpdate> for UpdateGenerationRow {
    fn from(update: GenerationUpdate) -> Self {
        Self {
            status: update.status.map(|s| s.as_str().to_string()),
            code: update.code,
            quality_score: update.quality_score,
            error_message: update.error_message,
            completed_at: update.completed_at,
        }
    }
}

/// Insertable usage event row.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = usage_events)]
pub struct NewUsageEventRow {
    /// Unique identity
    pub id: Uuid,
    /// User the event is attributed to
    pub user_id: Uuid,
    /// Event kind
    pub kind: String,
    /// Event timestamp
    pub created_at: DateTime<Utc>,
}

impl NewUsageEventRow {
    /// A usage event recording one completed generation.
    pub fn generation(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind: "generation".to_string(),
            created_at: Utc::now(),
        }
    }
}
