//! Legal process classification
//!
//! Maps a batch of document text to the regulatory procedure it is being
//! submitted for. Classification is keyword-based and checks the process
//! types in a fixed priority order, so a batch that mentions both
//! incorporation and licensing terms is always classified as incorporation.

/// Keywords indicating a company incorporation filing
const INCORPORATION_KEYWORDS: &[&str] = &["incorporation", "articles of association", "memorandum"];

/// Keywords indicating a financial services licensing application
const LICENSING_KEYWORDS: &[&str] = &["fsra", "financial services", "license"];

/// Keywords indicating an employment visa application
const EMPLOYMENT_KEYWORDS: &[&str] = &["employment", "visa", "work permit"];

/// Regulatory procedure a document batch is being submitted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessType {
    Incorporation,
    Licensing,
    Employment,
    /// Fallback when no process-specific keywords are present
    General,
}

impl ProcessType {
    /// Classify a batch from the concatenation of all its document text.
    ///
    /// Pure function: identical input always yields the same process type.
    /// Priority order is incorporation, then licensing, then employment;
    /// anything else falls back to `General`.
    pub fn classify(all_text: &str) -> Self {
        let text = all_text.to_lowercase();

        if INCORPORATION_KEYWORDS.iter().any(|kw| text.contains(kw)) {
            ProcessType::Incorporation
        } else if LICENSING_KEYWORDS.iter().any(|kw| text.contains(kw)) {
            ProcessType::Licensing
        } else if EMPLOYMENT_KEYWORDS.iter().any(|kw| text.contains(kw)) {
            ProcessType::Employment
        } else {
            ProcessType::General
        }
    }

    /// Display name used in the analysis result
    pub fn name(&self) -> &'static str {
        match self {
            ProcessType::Incorporation => "Company Incorporation",
            ProcessType::Licensing => "Financial Services Licensing",
            ProcessType::Employment => "Employment Visa Application",
            ProcessType::General => "General Compliance Review",
        }
    }
}

impl std::fmt::Display for ProcessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
