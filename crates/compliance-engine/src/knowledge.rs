//! Offline ADGM knowledge base
//!
//! A [`RetrievalService`] backed by embedded ADGM reference texts instead of
//! a hosted model. Snippets are scored by keyword overlap with the prompt and
//! the best matches are returned verbatim. Deterministic and network-free,
//! which makes it the default backend for the CLI shim.
//!
//! This backend retrieves guidance; it passes no judgment. Its responses
//! never contain the augmentor's issue-signaling keyword, so analyses run
//! against it produce rule-based findings only. Retrieval-derived findings
//! require a generative backend that can flag problems in its own words.

use crate::retrieval::{RetrievalError, RetrievalService};
use async_trait::async_trait;
use std::time::Duration;

/// Embedded ADGM reference snippets: (citation, text)
const REFERENCE_TEXTS: &[(&str, &str)] = &[
    (
        "ADGM Companies Regulations 2020 - Article 6: Jurisdiction",
        "All companies incorporated in ADGM are subject to ADGM jurisdiction. \
         Legal disputes must be resolved through ADGM Courts unless otherwise specified.",
    ),
    (
        "ADGM AML Rules 2019 - Rule 3.2: Ultimate Beneficial Ownership",
        "All entities must maintain accurate records of Ultimate Beneficial Owners (UBO). \
         UBO information must be declared and updated within specified timeframes.",
    ),
    (
        "ADGM Companies Regulations 2020 - Article 29: Registered Office",
        "Every company must maintain a registered office address within ADGM. \
         The registered office must be accessible during business hours.",
    ),
    (
        "ADGM Companies Regulations 2020 - Article 155: Directors",
        "At least one director must be a natural person. \
         Directors must meet fit and proper requirements as specified by ADGM.",
    ),
];

/// Prompt words shorter than this carry no signal for snippet scoring
const MIN_TERM_LEN: usize = 4;

/// In-process retrieval backend over the embedded reference texts
#[derive(Debug, Clone, Default)]
pub struct StaticKnowledgeBase;

impl StaticKnowledgeBase {
    pub fn new() -> Self {
        Self
    }

    /// Snippets ranked by how many distinct prompt terms they contain;
    /// zero-overlap snippets are dropped.
    fn lookup(&self, prompt: &str) -> Vec<&'static (&'static str, &'static str)> {
        let prompt_lower = prompt.to_lowercase();
        let terms: Vec<&str> = prompt_lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() >= MIN_TERM_LEN)
            .collect();

        let mut scored: Vec<(usize, &(&str, &str))> = Vec::new();
        for snippet in REFERENCE_TEXTS {
            let body = format!("{} {}", snippet.0, snippet.1).to_lowercase();
            let mut seen: Vec<&str> = Vec::new();
            let mut score = 0;
            for term in &terms {
                if seen.contains(term) {
                    continue;
                }
                seen.push(*term);
                if body.contains(term) {
                    score += 1;
                }
            }
            if score > 0 {
                scored.push((score, snippet));
            }
        }

        // Stable sort keeps the catalog order for equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, snippet)| snippet).collect()
    }
}

#[async_trait]
impl RetrievalService for StaticKnowledgeBase {
    async fn query(&self, prompt: &str, _timeout: Duration) -> Result<String, RetrievalError> {
        let matches = self.lookup(prompt);
        if matches.is_empty() {
            return Ok("No directly relevant ADGM guidance found for this document.".to_string());
        }

        let sections: Vec<String> = matches
            .iter()
            .map(|(citation, text)| format!("{citation}\n{text}"))
            .collect();
        Ok(sections.join("\n\n"))
    }
}
