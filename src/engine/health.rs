//! engine::health
//!
//! Findings and the status report.
//!
//! # Architecture
//!
//! `status` never stops at the first problem. Every check produces a
//! [`Finding`], and the report fails as a whole if any finding is an issue.
//! Notes carry extra context (such as checked-out branches) and never
//! affect the outcome.
//!
//! # Example
//!
//! ```
//! use aiidalab_develop::core::mode::Mode;
//! use aiidalab_develop::engine::health::{Finding, StatusReport};
//!
//! let mut report = StatusReport::new(Mode::System);
//! report.push(Finding::ok("Link is set."));
//! assert!(report.is_healthy());
//!
//! report.push(Finding::issue("Key 'develop' set to true."));
//! assert_eq!(report.issue_count(), 1);
//! ```

use std::fmt;

use serde::Serialize;

use crate::core::mode::Mode;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The check passed.
    Ok,
    /// The check failed.
    Issue,
}

impl Severity {
    /// Check if this severity fails the report.
    pub fn is_issue(&self) -> bool {
        matches!(self, Severity::Issue)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Ok => write!(f, "ok"),
            Severity::Issue => write!(f, "issue"),
        }
    }
}

/// A single OK/Issue result with a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    /// A passing check.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Ok,
            message: message.into(),
        }
    }

    /// A failing check.
    pub fn issue(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Issue,
            message: message.into(),
        }
    }

    /// Pick OK or Issue from a boolean.
    pub fn check(passed: bool, ok: impl Into<String>, issue: impl Into<String>) -> Self {
        if passed {
            Self::ok(ok)
        } else {
            Self::issue(issue)
        }
    }

    pub fn is_issue(&self) -> bool {
        self.severity.is_issue()
    }
}

/// Result of scanning the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub mode: Mode,
    pub findings: Vec<Finding>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl StatusReport {
    /// An empty report for `mode`.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            findings: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Record a finding.
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Record an informational note.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Number of failing checks.
    pub fn issue_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_issue()).count()
    }

    /// Whether every check passed.
    pub fn is_healthy(&self) -> bool {
        self.issue_count() == 0
    }

    /// Failing checks only.
    pub fn issues(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_issue())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_healthy() {
        assert!(StatusReport::new(Mode::Unknown).is_healthy());
    }

    #[test]
    fn issues_are_counted() {
        let mut report = StatusReport::new(Mode::Development);
        report.push(Finding::ok("a"));
        report.push(Finding::issue("b"));
        report.push(Finding::issue("c"));

        assert_eq!(report.issue_count(), 2);
        assert!(!report.is_healthy());
        let messages: Vec<_> = report.issues().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn notes_do_not_fail_report() {
        let mut report = StatusReport::new(Mode::Development);
        report.note("on branch main");
        assert!(report.is_healthy());
    }

    #[test]
    fn check_picks_severity() {
        assert_eq!(Finding::check(true, "yes", "no"), Finding::ok("yes"));
        assert_eq!(Finding::check(false, "yes", "no"), Finding::issue("no"));
    }

    #[test]
    fn serializes_as_json() {
        let mut report = StatusReport::new(Mode::System);
        report.push(Finding::ok("fine"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "SYSTEM");
        assert_eq!(json["findings"][0]["severity"], "ok");
        assert!(json.get("notes").is_none());
    }
}
