//! Compliance rule catalog
//!
//! Static configuration for the analysis engine: per-process required-document
//! checklists and the table of text-matching compliance rules. The catalog is
//! immutable after construction and is passed explicitly into the components
//! that consult it. Adding a rule or checklist entry is a data change, not a
//! code change in the matcher or checker.

use crate::process::ProcessType;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use shared_types::Severity;

lazy_static! {
    /// Built-in ADGM rule table
    static ref ADGM_RULES: Vec<ComplianceRule> = vec![
        ComplianceRule {
            name: "jurisdiction".to_string(),
            pattern: Regex::new(r"(?i)ADGM|Abu Dhabi Global Market").unwrap(),
            severity: Severity::High,
            message: "Document must specify ADGM jurisdiction".to_string(),
            reference: "ADGM Companies Regulations 2020, Article 6".to_string(),
        },
        ComplianceRule {
            name: "ubo_declaration".to_string(),
            pattern: Regex::new(r"(?i)Ultimate Beneficial Owner|UBO").unwrap(),
            severity: Severity::High,
            message: "UBO declaration required for AML compliance".to_string(),
            reference: "ADGM AML Rules 2019, Rule 3.2".to_string(),
        },
        ComplianceRule {
            name: "registered_office".to_string(),
            pattern: Regex::new(r"(?i)registered office.*ADGM").unwrap(),
            severity: Severity::High,
            message: "Registered office must be in ADGM".to_string(),
            reference: "ADGM Companies Regulations 2020, Article 29".to_string(),
        },
    ];
}

/// Canonical document types required for each ADGM process
const INCORPORATION_DOCUMENTS: &[&str] = &[
    "Articles of Association",
    "Memorandum of Association",
    "Incorporation Application Form",
    "UBO Declaration Form",
    "Register of Members and Directors",
];

const LICENSING_DOCUMENTS: &[&str] = &[
    "FSRA License Application",
    "Business Plan",
    "Compliance Manual",
    "Risk Management Framework",
    "Key Personnel CVs",
];

const EMPLOYMENT_DOCUMENTS: &[&str] = &[
    "Employment Contract",
    "Educational Certificates",
    "Experience Certificates",
    "Medical Certificate",
    "Passport Copy",
];

/// A single text-matching compliance rule
///
/// The pattern is the evidence the rule expects to find; a document where the
/// pattern is absent is flagged with `message` at `severity`, citing
/// `reference`.
#[derive(Debug, Clone)]
pub struct ComplianceRule {
    pub name: String,
    pub pattern: Regex,
    pub severity: Severity,
    pub message: String,
    pub reference: String,
}

impl ComplianceRule {
    /// Build a rule from a pattern string; matching is always case-insensitive.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        severity: Severity,
        message: impl Into<String>,
        reference: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            name: name.into(),
            pattern,
            severity,
            message: message.into(),
            reference: reference.into(),
        })
    }

    /// Whether the rule's expected evidence is present in the text
    pub fn is_satisfied_by(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Immutable table of compliance rules and required-document checklists
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<ComplianceRule>,
    incorporation: Vec<String>,
    licensing: Vec<String>,
    employment: Vec<String>,
}

impl RuleCatalog {
    /// Empty catalog; compose with `with_rule` / `with_checklist`.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            incorporation: Vec::new(),
            licensing: Vec::new(),
            employment: Vec::new(),
        }
    }

    /// The built-in ADGM catalog: jurisdiction, UBO and registered-office
    /// rules plus the incorporation/licensing/employment checklists.
    pub fn adgm_default() -> Self {
        Self {
            rules: ADGM_RULES.clone(),
            incorporation: to_owned_list(INCORPORATION_DOCUMENTS),
            licensing: to_owned_list(LICENSING_DOCUMENTS),
            employment: to_owned_list(EMPLOYMENT_DOCUMENTS),
        }
    }

    /// Append a rule; existing rules keep their position (stable iteration
    /// order across runs).
    pub fn with_rule(mut self, rule: ComplianceRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replace the required-document checklist for a process type.
    /// `General` has no checklist and is left unchanged.
    pub fn with_checklist(mut self, process: ProcessType, documents: Vec<String>) -> Self {
        match process {
            ProcessType::Incorporation => self.incorporation = documents,
            ProcessType::Licensing => self.licensing = documents,
            ProcessType::Employment => self.employment = documents,
            ProcessType::General => {}
        }
        self
    }

    /// Rules in stable catalog order
    pub fn rules(&self) -> &[ComplianceRule] {
        &self.rules
    }

    /// Ordered required-document checklist for a process type
    pub fn checklist(&self, process: ProcessType) -> &[String] {
        match process {
            ProcessType::Incorporation => &self.incorporation,
            ProcessType::Licensing => &self.licensing,
            ProcessType::Employment => &self.employment,
            ProcessType::General => &[],
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
