//! Gate result and aggregate report types.

use crate::QualityGate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a gate outcome's impact.
///
/// Only `Error` fails the aggregate report; `Warning` marks style-level
/// findings and `Info` marks a clean pass.
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
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No issues found
    Info,
    /// Style or cleanliness issues only
    Warning,
    /// Correctness or safety defect in the gate's domain
    Error,
}

/// Outcome of a single quality gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityGateResult {
    /// Which gate produced this result
    pub gate: QualityGate,
    /// Whether the gate passed (no issues)
    pub passed: bool,
    /// Human-readable issue descriptions, in detection order
    pub issues: Vec<String>,
    /// Severity classification of the outcome
    pub severity: Severity,
}

/// Aggregate quality report over all gates.
///
/// Contains exactly one result per gate, in fixed evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Per-gate results in evaluation order
    pub results: Vec<QualityGateResult>,
    /// Weighted aggregate score in [0, 1]
    pub score: f32,
    /// True iff no result carries `error` severity
    pub passed: bool,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
        assert_eq!(serde_json::to_string(&Severity::Info).unwrap(), "\"info\"");
    }

    #[test]
    fn gate_names_serialize_kebab_case() {
        assert_eq!(
            serde_json::to_string(&QualityGate::TypeCheck).unwrap(),
            "\"type-check\""
        );
        assert_eq!(
            serde_json::to_string(&QualityGate::Security).unwrap(),
            "\"security\""
        );
    }
}
