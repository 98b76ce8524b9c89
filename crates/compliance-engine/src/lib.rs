//! Document compliance analysis engine
//!
//! Inspects a set of already-extracted document texts submitted for a
//! regulatory process and produces a structured assessment: the inferred
//! process type, missing mandatory documents, flagged compliance issues and
//! an aggregate confidence score.
//!
//! Text extraction, report rendering and annotation write-back live outside
//! this crate; the engine operates purely on a [`DocumentSet`] and returns a
//! [`DocumentAnalysis`] value per call, with no persistent state.

pub mod catalog;
pub mod completeness;
pub mod knowledge;
pub mod process;
pub mod retrieval;
pub mod rules;
pub mod score;

use catalog::RuleCatalog;
use process::ProcessType;
use retrieval::RetrievalService;
use shared_types::{DocumentAnalysis, DocumentSet};
use std::sync::Arc;
use std::time::Duration;

/// Default bound on a single retrieval-service call
pub const DEFAULT_RETRIEVAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Compliance analysis engine: catalog plus optional retrieval backend.
///
/// One `analyze` call runs the full pipeline: classify the process type,
/// diff the required-document checklist, scan each document against the rule
/// table, augment with retrieval-derived findings, then score. Documents are
/// processed in input order so the issue sequence is deterministic.
pub struct ComplianceEngine {
    catalog: RuleCatalog,
    retrieval: Option<Arc<dyn RetrievalService>>,
    retrieval_timeout: Duration,
}

impl ComplianceEngine {
    pub fn new(catalog: RuleCatalog, retrieval: Arc<dyn RetrievalService>) -> Self {
        Self {
            catalog,
            retrieval: Some(retrieval),
            retrieval_timeout: DEFAULT_RETRIEVAL_TIMEOUT,
        }
    }

    /// Engine without a retrieval backend; analysis is purely rule-based.
    pub fn rules_only(catalog: RuleCatalog) -> Self {
        Self {
            catalog,
            retrieval: None,
            retrieval_timeout: DEFAULT_RETRIEVAL_TIMEOUT,
        }
    }

    pub fn with_retrieval_timeout(mut self, timeout: Duration) -> Self {
        self.retrieval_timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Analyze one document batch.
    ///
    /// Issue order is the contract: document input order, rule-based issues
    /// before retrieval-derived ones within each document, catalog order
    /// within the rule-based block. A failed retrieval call degrades that
    /// document to rule-based results only; it never fails the analysis.
    /// Cancellation is dropping the returned future; any in-flight retrieval
    /// request is abandoned with it.
    pub async fn analyze(&self, documents: &DocumentSet) -> DocumentAnalysis {
        tracing::info!(documents = documents.len(), "starting compliance analysis");

        let combined = documents
            .iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join("\n");
        let process = ProcessType::classify(&combined);

        let required = self.catalog.checklist(process);
        let uploaded: Vec<&str> = documents.names().collect();
        let missing = completeness::find_missing(&uploaded, required);

        // Invariant: the checker only ever reports checklist entries. A
        // violation is a programming defect, not bad input.
        assert!(
            missing.iter().all(|m| required.contains(m)),
            "missing documents must be a subset of the required checklist"
        );

        let mut issues = Vec::new();
        let mut degraded_documents = 0usize;

        for (name, text) in documents.iter() {
            issues.extend(rules::match_rules(name, text, &self.catalog));

            if let Some(service) = &self.retrieval {
                let outcome =
                    retrieval::augment(name, text, service.as_ref(), self.retrieval_timeout).await;
                if outcome.degraded {
                    degraded_documents += 1;
                }
                issues.extend(outcome.issues);
            }
        }

        if degraded_documents > 0 {
            tracing::warn!(
                degraded_documents,
                "retrieval service unavailable for some documents; \
                 their results are rule-based only"
            );
        }

        let confidence_score = score::confidence_score(&issues);
        tracing::info!(
            process = process.name(),
            issues = issues.len(),
            missing = missing.len(),
            confidence_score,
            "compliance analysis complete"
        );

        DocumentAnalysis {
            process: process.name().to_string(),
            documents_uploaded: documents.len(),
            required_documents: required.len(),
            missing_documents: missing,
            issues_found: issues,
            confidence_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use retrieval::MockRetrieval;
    use shared_types::Severity;

    const COMPLIANT_ARTICLES: &str = "This company's Memorandum of Association establishes a \
        private company limited by shares. The registered office is situated in ADGM. \
        The UBO has been declared in the prescribed form.";

    fn docs(entries: &[(&str, &str)]) -> DocumentSet {
        entries
            .iter()
            .map(|(n, t)| (n.to_string(), t.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_incorporation_scenario_end_to_end() {
        let engine = ComplianceEngine::rules_only(RuleCatalog::adgm_default());
        let documents = docs(&[("articles.docx", COMPLIANT_ARTICLES)]);

        let analysis = engine.analyze(&documents).await;

        assert_eq!(analysis.process, "Company Incorporation");
        assert_eq!(analysis.documents_uploaded, 1);
        assert_eq!(analysis.required_documents, 5);
        // "articles.docx" contains none of the full checklist labels
        assert_eq!(
            analysis.missing_documents,
            vec![
                "Articles of Association",
                "Memorandum of Association",
                "Incorporation Application Form",
                "UBO Declaration Form",
                "Register of Members and Directors",
            ]
        );
        // All three reference clauses are present, so no rule-based issues,
        // and missing documents do not affect the score
        assert_eq!(analysis.issues_found, vec![]);
        assert_eq!(analysis.confidence_score, score::CLEAN_BASELINE);
    }

    #[tokio::test]
    async fn test_empty_batch_yields_clean_general_review() {
        let engine = ComplianceEngine::rules_only(RuleCatalog::adgm_default());
        let analysis = engine.analyze(&DocumentSet::new()).await;

        assert_eq!(analysis.process, "General Compliance Review");
        assert_eq!(analysis.documents_uploaded, 0);
        assert_eq!(analysis.required_documents, 0);
        assert_eq!(analysis.missing_documents, Vec::<String>::new());
        assert_eq!(analysis.issues_found, vec![]);
        assert_eq!(analysis.confidence_score, 0.95);
    }

    #[tokio::test]
    async fn test_issue_order_follows_documents_then_rules_then_augmentation() {
        let service = Arc::new(MockRetrieval::respond_with(
            "Possible issue: governing law clause is vague.",
        ));
        let engine = ComplianceEngine::new(RuleCatalog::adgm_default(), service);

        let documents = docs(&[
            ("first.docx", "Memorandum with no required clauses at all"),
            ("second.docx", COMPLIANT_ARTICLES),
        ]);
        let analysis = engine.analyze(&documents).await;

        let sequence: Vec<(&str, &str)> = analysis
            .issues_found
            .iter()
            .map(|i| (i.document.as_str(), i.section.as_str()))
            .collect();
        assert_eq!(
            sequence,
            vec![
                ("first.docx", "General"),
                ("first.docx", "General"),
                ("first.docx", "General"),
                ("first.docx", "AI Analysis"),
                ("second.docx", "AI Analysis"),
            ]
        );
    }

    #[tokio::test]
    async fn test_retrieval_failure_degrades_without_halting() {
        let service = Arc::new(MockRetrieval::fail_with_timeout());
        let engine = ComplianceEngine::new(RuleCatalog::adgm_default(), service.clone());

        let documents = docs(&[
            ("bare.docx", "No relevant clauses here"),
            ("clean.docx", COMPLIANT_ARTICLES),
        ]);
        let analysis = engine.analyze(&documents).await;

        // Rule-based results survive: three unmet rules in the bare document
        assert_eq!(analysis.issues_found.len(), 3);
        assert!(analysis
            .issues_found
            .iter()
            .all(|i| i.section == "General" && i.document == "bare.docx"));
        // Both documents were attempted
        assert_eq!(service.call_count(), 2);
        // Score reflects the three High rule findings: 1.0 - 3 * 0.2
        assert!((analysis.confidence_score - 0.4).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_one_failed_retrieval_leaves_sibling_augmentation_intact() {
        // bare.docx times out, clean.docx gets a normal response
        let service = Arc::new(
            MockRetrieval::respond_with("Possible issue: governing law clause is vague.")
                .with_timeout_for("bare.docx"),
        );
        let engine = ComplianceEngine::new(RuleCatalog::adgm_default(), service.clone());

        let documents = docs(&[
            ("bare.docx", "No relevant clauses here"),
            ("clean.docx", COMPLIANT_ARTICLES),
        ]);
        let analysis = engine.analyze(&documents).await;

        // The failing document keeps its rule-based findings and nothing
        // else; the sibling still gets its retrieval-derived finding.
        let sequence: Vec<(&str, &str)> = analysis
            .issues_found
            .iter()
            .map(|i| (i.document.as_str(), i.section.as_str()))
            .collect();
        assert_eq!(
            sequence,
            vec![
                ("bare.docx", "General"),
                ("bare.docx", "General"),
                ("bare.docx", "General"),
                ("clean.docx", "AI Analysis"),
            ]
        );
        assert_eq!(service.call_count(), 2);
        // 3 High rule findings + 1 Medium retrieval finding
        assert!((analysis.confidence_score - 0.3).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_every_issue_names_a_supplied_document() {
        let service = Arc::new(MockRetrieval::respond_with("issue spotted"));
        let engine = ComplianceEngine::new(RuleCatalog::adgm_default(), service);

        let documents = docs(&[("a.docx", "text one"), ("b.docx", "text two")]);
        let analysis = engine.analyze(&documents).await;

        let names: Vec<&str> = documents.names().collect();
        assert!(!analysis.issues_found.is_empty());
        assert!(analysis
            .issues_found
            .iter()
            .all(|i| names.contains(&i.document.as_str())));
    }

    #[tokio::test]
    async fn test_missing_documents_shrink_as_uploads_match() {
        let engine = ComplianceEngine::rules_only(RuleCatalog::adgm_default());
        let documents = docs(&[
            ("Articles of Association (signed).docx", COMPLIANT_ARTICLES),
            ("UBO Declaration Form.docx", "UBO details, ADGM jurisdiction"),
        ]);
        let analysis = engine.analyze(&documents).await;

        assert_eq!(
            analysis.missing_documents,
            vec![
                "Memorandum of Association",
                "Incorporation Application Form",
                "Register of Members and Directors",
            ]
        );
    }

    #[tokio::test]
    async fn test_augmentation_issue_raises_medium_count() {
        let service = Arc::new(MockRetrieval::respond_with("issue identified"));
        let engine = ComplianceEngine::new(RuleCatalog::adgm_default(), service);

        let documents = docs(&[("articles.docx", COMPLIANT_ARTICLES)]);
        let analysis = engine.analyze(&documents).await;

        assert_eq!(analysis.issues_found.len(), 1);
        assert_eq!(analysis.issues_found[0].severity, Severity::Medium);
        assert!((analysis.confidence_score - 0.9).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_custom_catalog_rule_is_applied() {
        let catalog = RuleCatalog::adgm_default().with_rule(
            catalog::ComplianceRule::new(
                "director",
                r"natural person",
                Severity::Medium,
                "At least one director must be a natural person",
                "ADGM Companies Regulations 2020, Article 155",
            )
            .unwrap(),
        );
        let engine = ComplianceEngine::rules_only(catalog);

        let documents = docs(&[("articles.docx", COMPLIANT_ARTICLES)]);
        let analysis = engine.analyze(&documents).await;

        assert_eq!(analysis.issues_found.len(), 1);
        assert_eq!(
            analysis.issues_found[0].issue,
            "At least one director must be a natural person"
        );
    }

    #[tokio::test]
    async fn test_repeated_analysis_is_reproducible() {
        let engine = ComplianceEngine::rules_only(RuleCatalog::adgm_default());
        let documents = docs(&[
            ("memo.docx", "Memorandum of Association draft"),
            ("plan.docx", "Business plan without clauses"),
        ]);

        let first = engine.analyze(&documents).await;
        for _ in 0..3 {
            assert_eq!(engine.analyze(&documents).await, first);
        }
    }
}
