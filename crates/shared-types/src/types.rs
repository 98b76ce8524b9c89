use serde::{Deserialize, Serialize};

/// Severity of a flagged compliance issue.
///
/// Serialized as the bare variant name ("High", "Medium", "Low"), part of
/// the wire contract consumed by the report renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// A single flagged deficiency in one document.
///
/// Immutable once created; produced by the rule matcher or the retrieval
/// augmentor and owned by the `DocumentAnalysis` that contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    /// Display name of the document the issue was found in.
    pub document: String,
    /// Free-text locator within the document.
    pub section: String,
    /// Human-readable description of the deficiency.
    pub issue: String,
    pub severity: Severity,
    /// Remedial suggestion.
    pub suggestion: String,
    /// Legal citation backing the issue; may be empty.
    pub reference: String,
}

/// Result of one compliance analysis pass over a document set.
///
/// The serialized field names are the wire contract other components
/// (report generator, annotation writer) depend on; do not rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub process: String,
    pub documents_uploaded: usize,
    pub required_documents: usize,
    pub missing_documents: Vec<String>,
    pub issues_found: Vec<ComplianceIssue>,
    pub confidence_score: f64,
}

/// Ordered collection of uploaded documents: display name plus extracted text.
///
/// Iteration order is insertion order, which fixes the order issues appear in
/// the analysis result. Inserting a name that is already present replaces its
/// text in place rather than reordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSet {
    entries: Vec<(String, String)>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        let name = name.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = text,
            None => self.entries.push((name, text)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// (name, text) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t.as_str()))
    }
}

impl FromIterator<(String, String)> for DocumentSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut set = DocumentSet::new();
        for (name, text) in iter {
            set.insert(name, text);
        }
        set
    }
}
