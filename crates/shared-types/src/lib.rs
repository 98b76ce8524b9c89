pub mod types;

pub use types::{ComplianceIssue, DocumentAnalysis, DocumentSet, Severity};
