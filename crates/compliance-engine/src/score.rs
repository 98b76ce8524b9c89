//! Confidence scoring
//!
//! Reduces the accumulated issue list to one scalar in [0.0, 1.0]. This is a
//! linear penalty heuristic, not a calibrated probability: each High issue
//! costs 0.2, each Medium 0.1, Low issues are free. A clean analysis scores
//! 0.95 rather than 1.0 to reflect residual uncertainty.

use shared_types::{ComplianceIssue, Severity};

/// Score for an analysis with no issues at all
pub const CLEAN_BASELINE: f64 = 0.95;

const HIGH_PENALTY: f64 = 0.2;
const MEDIUM_PENALTY: f64 = 0.1;

pub fn confidence_score(issues: &[ComplianceIssue]) -> f64 {
    if issues.is_empty() {
        return CLEAN_BASELINE;
    }

    let high = issues
        .iter()
        .filter(|i| i.severity == Severity::High)
        .count() as f64;
    let medium = issues
        .iter()
        .filter(|i| i.severity == Severity::Medium)
        .count() as f64;

    (1.0 - (high * HIGH_PENALTY + medium * MEDIUM_PENALTY)).clamp(0.0, 1.0)
}
