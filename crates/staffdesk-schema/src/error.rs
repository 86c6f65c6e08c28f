//! Error types for the schema registry
//!
//! Validation failures are data, not faults: a [`ValidationReport`] lists
//! every field that failed, with the rule it broke and a message suitable for
//! showing next to the form control.

use crate::path::FieldPath;
use crate::schema::ValueKind;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Constraint a field violated
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Required field absent
    Required,
    /// Wrong JSON type
    Type {
        expected: ValueKind,
        found: ValueKind,
    },
    /// String shorter than the minimum
    MinLength { min: usize },
    /// String longer than the maximum
    MaxLength { max: usize },
    /// String not in the expected format
    Format { format: &'static str },
    /// Value outside a closed enumeration
    OneOf { allowed: Vec<String> },
    /// Number below the minimum
    Minimum { min: f64 },
    /// Number above the maximum
    Maximum { max: f64 },
    /// No alternative of a union matched
    Union,
    /// Nesting deeper than the configured cap
    MaxDepth { limit: usize },
    /// Cross-field refinement failed
    Refinement { name: &'static str },
    /// Reference to a schema that is not registered
    UnknownSchema { name: String },
}

impl Rule {
    /// Short stable name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Type { .. } => "type",
            Self::MinLength { .. } => "min_length",
            Self::MaxLength { .. } => "max_length",
            Self::Format { .. } => "format",
            Self::OneOf { .. } => "one_of",
            Self::Minimum { .. } => "minimum",
            Self::Maximum { .. } => "maximum",
            Self::Union => "union",
            Self::MaxDepth { .. } => "max_depth",
            Self::Refinement { .. } => "refinement",
            Self::UnknownSchema { .. } => "unknown_schema",
        }
    }
}

/// One failed field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub path: FieldPath,
    #[serde(flatten)]
    pub rule: Rule,
    pub message: String,
}

impl FieldIssue {
    /// Create new issue
    #[inline]
    #[must_use]
    pub fn new(path: FieldPath, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            path,
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every issue found while validating one candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Schema the candidate was checked against
    pub schema: String,
    /// Issues in discovery order
    pub issues: Vec<FieldIssue>,
}

impl ValidationReport {
    /// Create new report
    #[inline]
    #[must_use]
    pub fn new(schema: impl Into<String>, issues: Vec<FieldIssue>) -> Self {
        Self {
            schema: schema.into(),
            issues,
        }
    }

    /// Number of issues
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Check if no issue was found
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues attached to exactly `path`
    pub fn at<'a>(&'a self, path: &'a FieldPath) -> impl Iterator<Item = &'a FieldIssue> + 'a {
        self.issues.iter().filter(move |issue| &issue.path == path)
    }

    /// Check if any issue is attached to the dotted `path`
    #[must_use]
    pub fn has_issue_at(&self, path: &str) -> bool {
        FieldPath::from_str(path).is_ok_and(|path| self.at(&path).next().is_some())
    }

    /// Check if `path` failed with the named rule
    #[must_use]
    pub fn has_rule_at(&self, path: &str, rule: &str) -> bool {
        FieldPath::from_str(path)
            .is_ok_and(|path| self.at(&path).any(|issue| issue.rule.name() == rule))
    }

    /// Paths that failed, without repeats
    #[must_use]
    pub fn paths(&self) -> Vec<&FieldPath> {
        let mut paths: Vec<&FieldPath> = Vec::new();
        for issue in &self.issues {
            if !paths.contains(&&issue.path) {
                paths.push(&issue.path);
            }
        }
        paths
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed validation ({} issue", self.schema, self.issues.len())?;
        if self.issues.len() != 1 {
            f.write_str("s")?;
        }
        f.write_str(")")?;
        for issue in &self.issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Lookup of a schema name that is not registered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no schema registered under '{0}'")]
pub struct UnknownSchema(pub String);

/// Outcome of a failed validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Candidate broke one or more constraints
    #[error(transparent)]
    Invalid(#[from] ValidationReport),

    /// Schema name not registered
    #[error(transparent)]
    UnknownSchema(#[from] UnknownSchema),

    /// Candidate passed the schema but does not fit the requested type
    #[error("validated value does not fit {type_name}: {source}")]
    Narrowing {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ValidationError {
    /// Report of field issues, when the candidate itself was at fault
    #[inline]
    #[must_use]
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Invalid(report) => Some(report),
            _ => None,
        }
    }

    /// Take the report of field issues
    #[inline]
    #[must_use]
    pub fn into_report(self) -> Option<ValidationReport> {
        match self {
            Self::Invalid(report) => Some(report),
            _ => None,
        }
    }

    /// Check if the candidate itself was at fault
    #[inline]
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ValidationReport {
        ValidationReport::new(
            "address",
            vec![
                FieldIssue::new(
                    FieldPath::key("zip"),
                    Rule::Format { format: "zip" },
                    "Invalid ZIP code",
                ),
                FieldIssue::new(FieldPath::key("zip"), Rule::MinLength { min: 5 }, "too short"),
                FieldIssue::new(FieldPath::key("city"), Rule::Required, "Required"),
            ],
        )
    }

    #[test]
    fn report_lookup_by_path_and_rule() {
        let report = report();
        assert!(report.has_issue_at("zip"));
        assert!(report.has_rule_at("zip", "format"));
        assert!(report.has_rule_at("city", "required"));
        assert!(!report.has_issue_at("street"));
        assert_eq!(report.paths().len(), 2);
    }

    #[test]
    fn report_display_lists_issues() {
        let text = report().to_string();
        assert!(text.starts_with("address failed validation (3 issues)"));
        assert!(text.contains("zip: Invalid ZIP code"));
    }

    #[test]
    fn validation_error_exposes_report() {
        let err = ValidationError::from(report());
        assert!(err.is_invalid());
        assert_eq!(err.report().map(ValidationReport::len), Some(3));

        let err = ValidationError::from(UnknownSchema("nope".into()));
        assert!(!err.is_invalid());
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn issue_serializes_flat() {
        let issue = FieldIssue::new(FieldPath::key("status"), Rule::Required, "Required");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["path"], "status");
        assert_eq!(json["rule"], "required");
        assert_eq!(json["message"], "Required");
    }
}
