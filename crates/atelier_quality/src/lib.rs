//! Static quality-gate engine for generated UI code.
//!
//! Five independent gates run over the generated source text in a fixed
//! order: `security`, `lint`, `type-check`, `accessibility`, `responsive`.
//! Each produces a pass/fail verdict with human-readable issues and a
//! severity classification; the aggregate score is a weighted average where
//! the security gate dominates.
//!
//! The engine is a pure function set: no I/O, no external services.
//!
//! # Examples
//!
//! ```
//! use atelier_quality::run_all_gates;
//!
//! let report = run_all_gates("export const Button = () => <button>Go</button>;");
//! assert_eq!(report.results.len(), 5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod detectors;
mod gate;
mod report;

pub use gate::QualityGate;
pub use report::{QualityGateResult, QualityReport, Severity};

use strum::IntoEnumIterator;

/// Run a single gate over the generated code.
pub fn run_gate(gate: QualityGate, code: &str) -> QualityGateResult {
    let issues = gate.detect(code);
    let passed = issues.is_empty();
    let severity = if passed {
        Severity::Info
    } else {
        gate.failure_severity()
    };
    QualityGateResult {
        gate,
        passed,
        issues,
        severity,
    }
}

/// Run all five gates in fixed order and assemble the aggregate report.
///
/// The aggregate `passed` flag is true iff no gate result carries `error`
/// severity; the score is the weighted pass average from
/// [`calculate_quality_score`].
pub fn run_all_gates(code: &str) -> QualityReport {
    let results: Vec<QualityGateResult> =
        QualityGate::iter().map(|gate| run_gate(gate, code)).collect();
    let score = calculate_quality_score(&results);
    let passed = results.iter().all(|r| r.severity != Severity::Error);
    QualityReport {
        results,
        score,
        passed,
        generated_at: chrono::Utc::now(),
    }
}

/// Weighted pass average over gate results.
///
/// The security gate carries weight 3, every other gate weight 1:
/// `score = Σ(weight_i · passed_i) / Σ(weight_i)`. An empty result list is
/// vacuously clean and scores 1.
///
/// # Examples
///
/// ```
/// use atelier_quality::calculate_quality_score;
///
/// assert_eq!(calculate_quality_score(&[]), 1.0);
/// ```
pub fn calculate_quality_score(results: &[QualityGateResult]) -> f32 {
    if results.is_empty() {
        return 1.0;
    }
    let total: u32 = results.iter().map(|r| r.gate.weight()).sum();
    let earned: u32 = results
        .iter()
        .filter(|r| r.passed)
        .map(|r| r.gate.weight())
        .sum();
    earned as f32 / total as f32
}
