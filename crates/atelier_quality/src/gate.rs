//! Gate identities, weights, and detector dispatch.

use crate::detectors;
use crate::report::Severity;
use serde::{Deserialize, Serialize};

/// The closed set of quality gates, declared in evaluation order.
///
/// # Examples
///
/// ```
/// use atelier_quality::QualityGate;
/// use strum::IntoEnumIterator;
///
/// let order: Vec<&str> = QualityGate::iter().map(|g| g.name()).collect();
/// assert_eq!(
///     order,
///     ["security", "lint", "type-check", "accessibility", "responsive"]
/// );
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
#[serde(rename_all = "kebab-case")]
pub enum QualityGate {
    /// Injection sinks, dynamic evaluation, process/filesystem spawning
    Security,
    /// Debug prints, untyped escape hatches, overlong lines
    Lint,
    /// Client-directive consistency for stateful components
    #[serde(rename = "type-check")]
    TypeCheck,
    /// Alt text, accessible labels, tab-order hygiene
    Accessibility,
    /// Responsive breakpoint coverage for layout utilities
    Responsive,
}

impl QualityGate {
    /// Canonical gate name, matching the wire format.
    pub fn name(&self) -> &'static str {
        match self {
            QualityGate::Security => "security",
            QualityGate::Lint => "lint",
            QualityGate::TypeCheck => "type-check",
            QualityGate::Accessibility => "accessibility",
            QualityGate::Responsive => "responsive",
        }
    }

    /// Weight of this gate in the aggregate score.
    ///
    /// Security carries triple weight so a security failure dominates the
    /// aggregate even when every other gate passes.
    pub fn weight(&self) -> u32 {
        match self {
            QualityGate::Security => 3,
            _ => 1,
        }
    }

    /// Severity assigned when this gate fails.
    ///
    /// Lint findings are style-level and non-fatal; every other gate's
    /// failure is a correctness or safety defect in its domain.
    pub fn failure_severity(&self) -> Severity {
        match self {
            QualityGate::Lint => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Run this gate's detector over the code, returning issue strings.
    pub fn detect(&self, code: &str) -> Vec<String> {
        match self {
            QualityGate::Security => detectors::security_issues(code),
            QualityGate::Lint => detectors::lint_issues(code),
            QualityGate::TypeCheck => detectors::type_check_issues(code),
            QualityGate::Accessibility => detectors::accessibility_issues(code),
            QualityGate::Responsive => detectors::responsive_issues(code),
        }
    }
}
