//! Check outcomes and the aggregate validation report

use std::{
    collections::BTreeMap,
    fmt,
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

/// Suggested follow-ups printed when every check passes
pub const NEXT_STEPS: [&str; 3] = [
    "You can publish to GitBook by connecting your repository",
    "Alternatively, use tools like @gitbook/cli for local building",
    "Consider adding GitHub Actions for automated documentation deployment",
];

/// The independent checks, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// GitBook configuration file
    Config,
    /// Required files
    Files,
    /// Structural index links
    Summary,
    /// Expected directories
    Structure,
    /// Root document content
    Readme,
}

impl CheckKind {
    /// All checks in execution order
    pub const ALL: [CheckKind; 5] = [
        CheckKind::Config,
        CheckKind::Files,
        CheckKind::Summary,
        CheckKind::Structure,
        CheckKind::Readme,
    ];

    /// Short machine name
    pub fn name(self) -> &'static str {
        match self {
            CheckKind::Config => "config",
            CheckKind::Files => "files",
            CheckKind::Summary => "summary",
            CheckKind::Structure => "structure",
            CheckKind::Readme => "readme",
        }
    }

    /// Heading shown above the check's output
    pub fn title(self) -> &'static str {
        match self {
            CheckKind::Config => "GitBook configuration",
            CheckKind::Files => "Required files",
            CheckKind::Summary => "Summary structure and links",
            CheckKind::Structure => "Directory structure",
            CheckKind::Readme => "Readme content",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category of a failed check item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Configuration file absent
    ConfigMissing,
    /// Configuration unparsable or lacking a required field
    ConfigMalformed,
    /// Required file absent or unreadable
    FileMissing,
    /// Link target does not exist
    LinkTargetMissing,
    /// Expected directory absent or not a directory
    DirectoryMissing,
    /// Root document fails a content criterion
    ContentInsufficient,
}

impl IssueKind {
    /// Stable diagnostic code
    pub fn code(self) -> &'static str {
        match self {
            IssueKind::ConfigMissing => "config-missing",
            IssueKind::ConfigMalformed => "config-malformed",
            IssueKind::FileMissing => "file-missing",
            IssueKind::LinkTargetMissing => "link-target-missing",
            IssueKind::DirectoryMissing => "directory-missing",
            IssueKind::ContentInsufficient => "content-insufficient",
        }
    }
}

/// One offending item found by a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIssue {
    /// Issue category
    pub kind:    IssueKind,
    /// File the issue is reported against, relative to the root
    pub file:    String,
    /// Offending path, directory name or link target
    pub subject: String,
    /// 1-based line in `file`, when known
    pub line:    Option<usize>,
    /// Human-readable message
    pub message: String,
}

impl CheckIssue {
    /// Create an issue whose subject is also the file it concerns
    pub fn new(kind: IssueKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        let subject = subject.into();
        Self {
            kind,
            file: subject.clone(),
            subject,
            line: None,
            message: message.into(),
        }
    }

    /// Attach the file and 1-based line where the subject was referenced
    pub fn at(mut self, file: impl Into<String>, line: usize) -> Self {
        self.file = file.into();
        self.line = Some(line);
        self
    }
}

/// An item examined by a check, failed or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckItem {
    /// What was examined
    pub subject: String,
    /// Whether it satisfied the check
    pub passed:  bool,
    /// Extra detail (file counts, values, reasons)
    pub detail:  Option<String>,
}

impl CheckItem {
    /// Item that satisfied the check
    pub fn pass(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            passed:  true,
            detail:  None,
        }
    }

    /// Item that failed the check
    pub fn fail(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            passed:  false,
            detail:  None,
        }
    }

    /// Add detail text
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Result of a single check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Which check produced this
    pub kind:    CheckKind,
    /// Pass/fail verdict
    pub passed:  bool,
    /// Every examined item, in order
    pub items:   Vec<CheckItem>,
    /// Failures only
    pub issues:  Vec<CheckIssue>,
    /// One-line summary, e.g. link totals
    pub summary: Option<String>,
}

impl CheckOutcome {
    /// Empty, passing outcome
    pub fn new(kind: CheckKind) -> Self {
        Self {
            kind,
            passed: true,
            items: Vec::new(),
            issues: Vec::new(),
            summary: None,
        }
    }

    /// Record an item that passed
    pub fn pass(&mut self, item: CheckItem) {
        self.items.push(item);
    }

    /// Record a failed item together with its issue; the outcome fails
    pub fn fail(&mut self, item: CheckItem, issue: CheckIssue) {
        self.passed = false;
        self.items.push(item);
        self.issues.push(issue);
    }

    /// Record an issue that has no per-item line; the outcome fails
    pub fn fail_with(&mut self, issue: CheckIssue) {
        self.passed = false;
        self.issues.push(issue);
    }

    /// Set the summary line
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Aggregate result of a validation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Documentation root the checks ran against
    pub root:        String,
    /// Outcomes in execution order
    pub outcomes:    Vec<CheckOutcome>,
    /// Logical AND of all outcomes
    pub passed:      bool,
    /// Wall time of the run in milliseconds
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Build a report; the verdict is derived from the outcomes
    pub fn new(root: impl Into<String>, outcomes: Vec<CheckOutcome>, duration: Duration) -> Self {
        let passed = outcomes.iter().all(|o| o.passed);
        Self {
            root: root.into(),
            outcomes,
            passed,
            duration_ms: duration.as_millis() as u64,
        }
    }

    /// Outcome for a given check, if it ran
    pub fn outcome(&self, kind: CheckKind) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.kind == kind)
    }

    /// Named boolean per check that ran
    pub fn results(&self) -> BTreeMap<CheckKind, bool> {
        self.outcomes.iter().map(|o| (o.kind, o.passed)).collect()
    }

    /// All issues across checks
    pub fn issues(&self) -> impl Iterator<Item = (CheckKind, &CheckIssue)> {
        self.outcomes
            .iter()
            .flat_map(|o| o.issues.iter().map(move |issue| (o.kind, issue)))
    }

    /// Suggested follow-ups; only offered for a passing report
    pub fn next_steps(&self) -> &'static [&'static str] {
        if self.passed { &NEXT_STEPS } else { &[] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_fails_once_an_item_fails() {
        let mut outcome = CheckOutcome::new(CheckKind::Files);
        outcome.pass(CheckItem::pass("README.md"));
        assert!(outcome.passed);

        outcome.fail(
            CheckItem::fail("SUMMARY.md"),
            CheckIssue::new(IssueKind::FileMissing, "SUMMARY.md", "SUMMARY.md missing"),
        );
        outcome.pass(CheckItem::pass("LICENSE"));

        assert!(!outcome.passed);
        assert_eq!(outcome.items.len(), 3);
        assert_eq!(outcome.issues.len(), 1);
    }

    #[test]
    fn test_report_verdict_is_logical_and() {
        let ok = CheckOutcome::new(CheckKind::Config);
        let mut bad = CheckOutcome::new(CheckKind::Readme);
        bad.fail_with(CheckIssue::new(
            IssueKind::ContentInsufficient,
            "README.md",
            "too short",
        ));

        let passing = ValidationReport::new(".", vec![ok.clone()], Duration::ZERO);
        assert!(passing.passed);
        assert_eq!(passing.next_steps().len(), 3);

        let failing = ValidationReport::new(".", vec![ok, bad], Duration::from_millis(7));
        assert!(!failing.passed);
        assert!(failing.next_steps().is_empty());
        assert_eq!(failing.duration_ms, 7);
        assert_eq!(failing.results()[&CheckKind::Readme], false);
        assert_eq!(failing.issues().count(), 1);
    }

    #[test]
    fn test_empty_report_passes() {
        let report = ValidationReport::new(".", Vec::new(), Duration::ZERO);
        assert!(report.passed);
    }

    #[test]
    fn test_issue_location() {
        let issue = CheckIssue::new(IssueKind::LinkTargetMissing, "x.md", "x.md (missing)")
            .at("SUMMARY.md", 4);
        assert_eq!(issue.file, "SUMMARY.md");
        assert_eq!(issue.subject, "x.md");
        assert_eq!(issue.line, Some(4));
    }

    #[test]
    fn test_kind_names() {
        let names: Vec<_> = CheckKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, ["config", "files", "summary", "structure", "readme"]);
        assert_eq!(IssueKind::LinkTargetMissing.code(), "link-target-missing");
    }
}
