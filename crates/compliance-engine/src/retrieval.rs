//! Retrieval-augmented issue detection
//!
//! Consults an external knowledge-retrieval service to surface issues the
//! static rule table misses. The service is a black box behind the
//! [`RetrievalService`] trait: text in, text out, bounded by a timeout. Any
//! failure at this boundary degrades to "no additional issues", so rule-based
//! results are never blocked by an unavailable retrieval backend.

use async_trait::async_trait;
use shared_types::{ComplianceIssue, Severity};
use std::time::Duration;
use thiserror::Error;

/// Document text excerpt length sent to the retrieval service.
/// Bounds request size and cost; longer documents are truncated.
pub const EXCERPT_CHARS: usize = 2000;

/// Length of the response prefix kept as the issue suggestion
const SUGGESTION_CHARS: usize = 200;

/// Response keyword that signals the service spotted a problem
const ISSUE_KEYWORD: &str = "issue";

/// Errors a retrieval backend can produce
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("retrieval request timed out after {0:?}")]
    Timeout(Duration),

    #[error("retrieval service error: {0}")]
    Service(String),

    #[error("malformed retrieval response: {0}")]
    MalformedResponse(String),
}

/// Knowledge-retrieval backend: a prompt goes in, free-form text comes out.
///
/// Implementations should honor the supplied timeout where they can; the
/// augmentor additionally enforces it from the outside, so a backend that
/// ignores it cannot stall an analysis.
#[async_trait]
pub trait RetrievalService: Send + Sync {
    async fn query(&self, prompt: &str, timeout: Duration) -> Result<String, RetrievalError>;
}

/// Result of augmenting one document
#[derive(Debug, Default)]
pub struct AugmentOutcome {
    pub issues: Vec<ComplianceIssue>,
    /// True when the service call failed and the document was analyzed
    /// without retrieval input. Non-fatal; the orchestrator logs it.
    pub degraded: bool,
}

/// Query the retrieval service about one document and convert its answer
/// into at most one issue.
///
/// The response is treated coarsely: if it mentions an issue at all, a single
/// generic Medium-severity finding is emitted with a truncated prefix of the
/// response as the suggestion. Service failures are absorbed here and
/// reported only through the `degraded` flag.
pub async fn augment(
    document_name: &str,
    text: &str,
    service: &dyn RetrievalService,
    timeout: Duration,
) -> AugmentOutcome {
    let prompt = build_prompt(document_name, text);

    let response = match tokio::time::timeout(timeout, service.query(&prompt, timeout)).await {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => {
            tracing::warn!(
                document = document_name,
                error = %err,
                "retrieval augmentation failed; continuing with rule-based results only"
            );
            return AugmentOutcome {
                issues: Vec::new(),
                degraded: true,
            };
        }
        Err(_) => {
            tracing::warn!(
                document = document_name,
                ?timeout,
                "retrieval augmentation timed out; continuing with rule-based results only"
            );
            return AugmentOutcome {
                issues: Vec::new(),
                degraded: true,
            };
        }
    };

    let issues = if response.to_lowercase().contains(ISSUE_KEYWORD) {
        let prefix: String = response.chars().take(SUGGESTION_CHARS).collect();
        vec![ComplianceIssue {
            document: document_name.to_string(),
            section: "AI Analysis".to_string(),
            issue: "Potential compliance issue identified".to_string(),
            severity: Severity::Medium,
            suggestion: format!("{prefix}..."),
            reference: "AI Analysis with ADGM Knowledge Base".to_string(),
        }]
    } else {
        Vec::new()
    };

    AugmentOutcome {
        issues,
        degraded: false,
    }
}

/// Prompt with the document name and a bounded excerpt of its text
fn build_prompt(document_name: &str, text: &str) -> String {
    let excerpt: String = text.chars().take(EXCERPT_CHARS).collect();
    format!(
        "Analyze the following document content for ADGM compliance issues:\n\
         Document: {document_name}\n\
         Content: {excerpt}\n\n\
         Identify any legal issues, missing clauses, or non-compliance with ADGM regulations."
    )
}

/// Deterministic in-memory backend for tests: fixed response, forced
/// failure, or a delay long enough to trip the augmentor's timeout. Keyed
/// overrides select a different behavior for prompts containing a given
/// substring (typically a document name), so one document's call can fail
/// while a sibling's succeeds.
#[derive(Debug, Clone)]
pub struct MockRetrieval {
    default_behavior: MockBehavior,
    keyed: Vec<(String, MockBehavior)>,
    calls: std::sync::Arc<std::sync::Mutex<usize>>,
}

#[derive(Debug, Clone)]
enum MockBehavior {
    Respond(String),
    FailService(String),
    FailTimeout,
    Hang,
}

impl MockRetrieval {
    pub fn respond_with(response: impl Into<String>) -> Self {
        Self::from_behavior(MockBehavior::Respond(response.into()))
    }

    pub fn fail_with_service_error(message: impl Into<String>) -> Self {
        Self::from_behavior(MockBehavior::FailService(message.into()))
    }

    pub fn fail_with_timeout() -> Self {
        Self::from_behavior(MockBehavior::FailTimeout)
    }

    /// Never answers; exercises the augmentor's enforced timeout.
    pub fn hang() -> Self {
        Self::from_behavior(MockBehavior::Hang)
    }

    /// Respond with `response` for prompts containing `needle` instead of
    /// the default behavior. First matching override wins.
    pub fn with_response_for(
        mut self,
        needle: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.keyed
            .push((needle.into(), MockBehavior::Respond(response.into())));
        self
    }

    /// Report a timeout for prompts containing `needle`.
    pub fn with_timeout_for(mut self, needle: impl Into<String>) -> Self {
        self.keyed.push((needle.into(), MockBehavior::FailTimeout));
        self
    }

    /// Fail with a service error for prompts containing `needle`.
    pub fn with_service_error_for(
        mut self,
        needle: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.keyed
            .push((needle.into(), MockBehavior::FailService(message.into())));
        self
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn from_behavior(behavior: MockBehavior) -> Self {
        Self {
            default_behavior: behavior,
            keyed: Vec::new(),
            calls: std::sync::Arc::new(std::sync::Mutex::new(0)),
        }
    }

    fn behavior_for(&self, prompt: &str) -> &MockBehavior {
        self.keyed
            .iter()
            .find(|(needle, _)| prompt.contains(needle))
            .map(|(_, behavior)| behavior)
            .unwrap_or(&self.default_behavior)
    }
}

#[async_trait]
impl RetrievalService for MockRetrieval {
    async fn query(&self, prompt: &str, timeout: Duration) -> Result<String, RetrievalError> {
        *self.calls.lock().unwrap() += 1;
        match self.behavior_for(prompt) {
            MockBehavior::Respond(response) => Ok(response.clone()),
            MockBehavior::FailService(message) => Err(RetrievalError::Service(message.clone())),
            MockBehavior::FailTimeout => Err(RetrievalError::Timeout(timeout)),
            MockBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}
