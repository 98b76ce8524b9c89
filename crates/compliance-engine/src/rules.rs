//! Rule-based issue detection
//!
//! Scans a document's text against every rule in the catalog and flags the
//! rules whose expected evidence is absent. A flagged rule means "clause not
//! found", not "violation proven": a clause worded unusually enough to miss
//! the pattern is flagged the same as a missing one.

use crate::catalog::RuleCatalog;
use shared_types::ComplianceIssue;

/// One issue per catalog rule whose pattern does not match the text,
/// in catalog order.
pub fn match_rules(document_name: &str, text: &str, catalog: &RuleCatalog) -> Vec<ComplianceIssue> {
    catalog
        .rules()
        .iter()
        .filter(|rule| !rule.is_satisfied_by(text))
        .map(|rule| ComplianceIssue {
            document: document_name.to_string(),
            section: "General".to_string(),
            issue: rule.message.clone(),
            severity: rule.severity,
            suggestion: format!(
                "Add a clause satisfying rule {} per {}",
                rule.name, rule.reference
            ),
            reference: rule.reference.clone(),
        })
        .collect()
}
