//! Documentation validation checks
//!
//! [`GitBookValidator`] runs five independent checks against a documentation
//! root. Each check reads what it needs, evaluates it and returns a
//! [`CheckOutcome`]; a missing file is a failed outcome, never an error.

use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
    time::Instant,
};

use tracing::{
    debug,
    info,
    warn,
};

use crate::{
    config::{
        CheckExpectations,
        GitBookConfig,
    },
    error::{
        GitBookCheckError,
        GitBookResult,
    },
    links::{
        CheckedLink,
        LinkCheckSummary,
        extract_links,
    },
    report::{
        CheckIssue,
        CheckItem,
        CheckKind,
        CheckOutcome,
        IssueKind,
        ValidationReport,
    },
};

/// Runs the documentation checks against one root directory
#[derive(Debug, Clone)]
pub struct GitBookValidator {
    root:         PathBuf,
    expectations: CheckExpectations,
}

impl GitBookValidator {
    /// Create a validator with explicit expectations
    pub fn new(root: impl Into<PathBuf>, expectations: CheckExpectations) -> Self {
        Self {
            root: root.into(),
            expectations,
        }
    }

    /// Create a validator using the default GitBook layout
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self::new(root, CheckExpectations::default())
    }

    /// Documentation root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Expectations in effect
    pub fn expectations(&self) -> &CheckExpectations {
        &self.expectations
    }

    /// Run a single check
    pub fn run_check(&self, kind: CheckKind) -> CheckOutcome {
        debug!(check = %kind, root = %self.root.display(), "running check");
        let outcome = match kind {
            CheckKind::Config => self.check_config(),
            CheckKind::Files => self.check_required_files(),
            CheckKind::Summary => self.check_summary_links(),
            CheckKind::Structure => self.check_directory_structure(),
            CheckKind::Readme => self.check_readme_content(),
        };

        if outcome.passed {
            info!(check = %kind, "check passed");
        } else {
            for issue in &outcome.issues {
                warn!(check = %kind, code = issue.kind.code(), "{}", issue.message);
            }
        }
        outcome
    }

    /// Run the given checks in order and aggregate them
    pub fn run(&self, kinds: &[CheckKind]) -> ValidationReport {
        let start = Instant::now();
        let outcomes = kinds.iter().map(|kind| self.run_check(*kind)).collect();
        let report = ValidationReport::new(
            self.root.to_string_lossy().to_string(),
            outcomes,
            start.elapsed(),
        );

        info!(passed = report.passed, duration_ms = report.duration_ms, "validation finished");
        report
    }

    /// Run every check
    pub fn run_all(&self) -> ValidationReport {
        self.run(&CheckKind::ALL)
    }

    /// Load and validate the GitBook configuration
    pub fn check_config(&self) -> CheckOutcome {
        let mut outcome = CheckOutcome::new(CheckKind::Config);
        let file = self.expectations.config_file.clone();

        match GitBookConfig::load_file(&self.expectations.config_path(&self.root)) {
            Ok(config) => {
                outcome.pass(CheckItem::pass("root").with_detail(config.root.clone()));
                outcome.pass(
                    CheckItem::pass("readme").with_detail(config.structure.readme.clone()),
                );
                outcome.pass(
                    CheckItem::pass("summary").with_detail(config.structure.summary.clone()),
                );
                outcome.pass(CheckItem::pass("format").with_detail(config.format_or_default()));
                outcome.with_summary(format!("{} configuration is valid", file))
            },
            Err(GitBookCheckError::ConfigMissing { .. }) => {
                outcome.fail_with(CheckIssue::new(
                    IssueKind::ConfigMissing,
                    file.clone(),
                    format!("{} not found", file),
                ));
                outcome
            },
            Err(GitBookCheckError::ConfigMalformed { reason, .. }) => {
                outcome.fail_with(CheckIssue::new(
                    IssueKind::ConfigMalformed,
                    file.clone(),
                    format!("{} in {}", reason, file),
                ));
                outcome
            },
            Err(other) => {
                outcome.fail_with(CheckIssue::new(
                    IssueKind::ConfigMalformed,
                    file,
                    other.to_string(),
                ));
                outcome
            },
        }
    }

    /// Check that every required file exists
    pub fn check_required_files(&self) -> CheckOutcome {
        let mut outcome = CheckOutcome::new(CheckKind::Files);

        for file in &self.expectations.required_files {
            if self.root.join(file).exists() {
                outcome.pass(CheckItem::pass(file.clone()).with_detail("exists"));
            } else {
                outcome.fail(
                    CheckItem::fail(file.clone()).with_detail("missing"),
                    CheckIssue::new(
                        IssueKind::FileMissing,
                        file.clone(),
                        format!("{} missing", file),
                    ),
                );
            }
        }

        let present = outcome.items.iter().filter(|i| i.passed).count();
        let total = outcome.items.len();
        outcome.with_summary(format!("{}/{} required files present", present, total))
    }

    /// Check that every link in the structural index resolves
    pub fn check_summary_links(&self) -> CheckOutcome {
        let mut outcome = CheckOutcome::new(CheckKind::Summary);
        let summary_file = &self.expectations.summary;

        let content = match read_document(&self.root, summary_file) {
            Ok(content) => content,
            Err(issue) => {
                outcome.fail_with(issue);
                return outcome;
            },
        };

        let links = extract_links(&content);
        debug!(file = %summary_file, links = links.len(), "extracted links");

        let checked = LinkCheckSummary::check(&self.root, links);
        for CheckedLink { link, exists } in &checked.links {
            if *exists {
                outcome.pass(CheckItem::pass(link.target.clone()));
            } else {
                outcome.fail(
                    CheckItem::fail(link.target.clone())
                        .with_detail(format!("line {}: missing", link.line)),
                    CheckIssue::new(
                        IssueKind::LinkTargetMissing,
                        link.target.clone(),
                        format!("Line {}: {} (missing)", link.line, link.target),
                    )
                    .at(summary_file.clone(), link.line),
                );
            }
        }

        outcome.with_summary(format!(
            "Link Summary: {}/{} links are valid",
            checked.valid_count(),
            checked.total()
        ))
    }

    /// Check that every expected directory exists, counting markdown files
    pub fn check_directory_structure(&self) -> CheckOutcome {
        let mut outcome = CheckOutcome::new(CheckKind::Structure);
        let extension = &self.expectations.markdown_extension;

        for dir in &self.expectations.expected_dirs {
            let path = self.root.join(dir);
            if path.is_dir() {
                let count = count_files_with_extension(&path, extension);
                outcome.pass(
                    CheckItem::pass(format!("{}/", dir)).with_detail(format!("{} files", count)),
                );
            } else {
                outcome.fail(
                    CheckItem::fail(format!("{}/", dir)).with_detail("missing"),
                    CheckIssue::new(
                        IssueKind::DirectoryMissing,
                        dir.clone(),
                        format!("{}/ missing", dir),
                    ),
                );
            }
        }

        outcome
    }

    /// Check that the root document has a title, links and some content
    pub fn check_readme_content(&self) -> CheckOutcome {
        let mut outcome = CheckOutcome::new(CheckKind::Readme);
        let readme = &self.expectations.readme;

        let content = match read_document(&self.root, readme) {
            Ok(content) => content,
            Err(issue) => {
                outcome.fail_with(issue);
                return outcome;
            },
        };

        let length = content.chars().count();
        let min_length = self.expectations.min_readme_length;
        let criteria = [
            ("Has main title", content.contains("# ")),
            ("Contains links", content.contains('[') && content.contains(']')),
            ("Has substantial content", length > min_length),
        ];

        for (label, passed) in criteria {
            if passed {
                outcome.pass(CheckItem::pass(label));
            } else {
                outcome.fail(
                    CheckItem::fail(label),
                    CheckIssue::new(
                        IssueKind::ContentInsufficient,
                        readme.clone(),
                        format!("{}: {} check failed", readme, label.to_lowercase()),
                    ),
                );
            }
        }

        if let Some(item) = outcome.items.last_mut() {
            item.detail = Some(format!("{} chars", length));
        }
        outcome
    }
}

/// Read a document under `root` as text, turning I/O failures into a
/// `FileMissing` issue. Invalid UTF-8 sequences are replaced, not rejected.
fn read_document(root: &Path, name: &str) -> Result<String, CheckIssue> {
    let bytes = fs::read(root.join(name)).map_err(|e| {
        CheckIssue::new(
            IssueKind::FileMissing,
            name.to_string(),
            format!("{} could not be read: {}", name, e),
        )
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Count regular files directly inside `dir` whose name ends with `extension`
pub fn count_files_with_extension(dir: &Path, extension: &str) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "failed to list directory");
            return 0;
        },
    };

    entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(extension))
        .count()
}

/// Run every check against `root` with expectations discovered there
pub fn run_all_validations(root: &Path) -> GitBookResult<ValidationReport> {
    let expectations = CheckExpectations::load(root)?;
    Ok(GitBookValidator::new(root, expectations).run_all())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, name: &str, content: &str) {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    const VALID_CONFIG: &str = "root: ./\nstructure:\n  readme: README.md\n  summary: SUMMARY.md\n";

    #[test]
    fn test_config_missing() {
        let tmp = TempDir::new().unwrap();
        let outcome = GitBookValidator::with_defaults(tmp.path()).check_config();

        assert!(!outcome.passed);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].kind, IssueKind::ConfigMissing);
        assert_eq!(outcome.issues[0].message, ".gitbook.yaml not found");
    }

    #[test]
    fn test_config_without_summary_is_malformed() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".gitbook.yaml", "root: ./\nstructure:\n  readme: README.md\n");

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_config();

        assert!(!outcome.passed);
        assert_eq!(outcome.issues[0].kind, IssueKind::ConfigMalformed);
        assert!(outcome.issues[0].message.contains("structure.summary"));
    }

    #[test]
    fn test_config_without_readme_is_malformed() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".gitbook.yaml", "root: ./\nstructure:\n  summary: SUMMARY.md\n");

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_config();

        assert!(!outcome.passed);
        assert_eq!(outcome.issues[0].kind, IssueKind::ConfigMalformed);
        assert!(outcome.issues[0].message.contains("structure.readme"));
    }

    #[test]
    fn test_config_yaml_error_is_malformed() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".gitbook.yaml", "root: [\n");

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_config();

        assert!(!outcome.passed);
        assert_eq!(outcome.issues[0].kind, IssueKind::ConfigMalformed);
    }

    #[test]
    fn test_valid_config_reports_fields() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".gitbook.yaml", VALID_CONFIG);

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_config();

        assert!(outcome.passed);
        let format = outcome.items.iter().find(|i| i.subject == "format").unwrap();
        assert_eq!(format.detail.as_deref(), Some("markdown"));
    }

    #[test]
    fn test_required_files_reports_each_missing_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "README.md", "# Docs\n");

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_required_files();

        assert!(!outcome.passed);
        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].subject, "SUMMARY.md");
        assert_eq!(outcome.issues[0].kind, IssueKind::FileMissing);
    }

    #[test]
    fn test_summary_without_links_passes() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "SUMMARY.md", "# Summary\n\nNo entries yet.\n");

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_summary_links();

        assert!(outcome.passed);
        assert!(outcome.items.is_empty());
        assert_eq!(outcome.summary.as_deref(), Some("Link Summary: 0/0 links are valid"));
    }

    #[test]
    fn test_summary_reports_missing_target_with_line() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "README.md", "# Docs\n");
        write(tmp.path(), "SUMMARY.md", "# Summary\n\n* [Intro](README.md)\n* [A](x.md)\n");

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_summary_links();

        assert!(!outcome.passed);
        assert_eq!(outcome.issues.len(), 1);
        let issue = &outcome.issues[0];
        assert_eq!(issue.kind, IssueKind::LinkTargetMissing);
        assert_eq!(issue.subject, "x.md");
        assert_eq!(issue.file, "SUMMARY.md");
        assert_eq!(issue.line, Some(4));
        assert_eq!(outcome.summary.as_deref(), Some("Link Summary: 1/2 links are valid"));
    }

    #[test]
    fn test_summary_links_resolve_against_root_not_cwd() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "guides/setup.md", "# Setup\n");
        write(tmp.path(), "SUMMARY.md", "* [Setup](guides/setup.md)\n");

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_summary_links();

        assert!(outcome.passed);
        assert_eq!(outcome.items.len(), 1);
    }

    #[test]
    fn test_unreadable_summary_fails() {
        let tmp = TempDir::new().unwrap();
        let outcome = GitBookValidator::with_defaults(tmp.path()).check_summary_links();

        assert!(!outcome.passed);
        assert_eq!(outcome.issues[0].kind, IssueKind::FileMissing);
    }

    #[test]
    fn test_summary_with_invalid_utf8_still_checks_links() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.md", "# A\n");
        fs::write(tmp.path().join("SUMMARY.md"), b"# Summary \xE9t\xE9\n* [A](a.md)\n").unwrap();

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_summary_links();

        assert!(outcome.passed, "{:?}", outcome.issues);
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.summary.as_deref(), Some("Link Summary: 1/1 links are valid"));
    }

    #[test]
    fn test_readme_with_invalid_utf8_is_checked_as_text() {
        let tmp = TempDir::new().unwrap();
        let mut content = b"# Caf\xE9 guide\n\nSee [setup](setup.md).\n".to_vec();
        content.extend(std::iter::repeat_n(b'x', 120));
        fs::write(tmp.path().join("README.md"), content).unwrap();

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_readme_content();

        assert!(outcome.passed, "{:?}", outcome.issues);
        assert!(outcome.issues.iter().all(|i| i.kind != IssueKind::FileMissing));
    }

    #[test]
    fn test_directory_structure_counts_markdown_files() {
        let tmp = TempDir::new().unwrap();
        for dir in ["architecture", "developers", "contracts", "examples"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }
        write(tmp.path(), "architecture/overview.md", "# Overview\n");
        write(tmp.path(), "architecture/diagram.png", "");
        write(tmp.path(), "architecture/nested/deep.md", "# Deep\n");
        // A file named like the directory is not a directory
        write(tmp.path(), "support", "not a directory");

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_directory_structure();

        assert!(!outcome.passed);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].subject, "support");
        assert_eq!(outcome.issues[0].kind, IssueKind::DirectoryMissing);
        assert_eq!(outcome.items[0].detail.as_deref(), Some("1 files"));
    }

    #[test]
    fn test_empty_directory_still_passes() {
        let tmp = TempDir::new().unwrap();
        for dir in ["architecture", "developers", "contracts", "examples", "support"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_directory_structure();

        assert!(outcome.passed);
        assert!(outcome.items.iter().all(|i| i.detail.as_deref() == Some("0 files")));
    }

    #[test]
    fn test_short_readme_fails_regardless_of_heading_and_links() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "README.md", "# Title\n\nSee [docs](SUMMARY.md).\n");

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_readme_content();

        assert!(!outcome.passed);
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].kind, IssueKind::ContentInsufficient);
        assert!(outcome.items[0].passed);
        assert!(outcome.items[1].passed);
        assert!(!outcome.items[2].passed);
    }

    #[test]
    fn test_readme_at_exact_threshold_fails() {
        let tmp = TempDir::new().unwrap();
        let mut content = String::from("# T [x]");
        content.push_str(&"a".repeat(100 - content.len()));
        assert_eq!(content.chars().count(), 100);
        write(tmp.path(), "README.md", &content);

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_readme_content();
        assert!(!outcome.passed);

        write(tmp.path(), "README.md", &format!("{}a", content));
        let outcome = GitBookValidator::with_defaults(tmp.path()).check_readme_content();
        assert!(outcome.passed);
    }

    #[test]
    fn test_readme_without_heading_fails() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "README.md", &format!("Intro [link](a.md) {}", "x".repeat(200)));

        let outcome = GitBookValidator::with_defaults(tmp.path()).check_readme_content();

        assert!(!outcome.passed);
        assert!(!outcome.items[0].passed);
    }

    #[test]
    fn test_config_check_reads_configured_file_name() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "book.yaml",
            "root: ./\nstructure:\n  readme: README.md\n  summary: SUMMARY.md\n",
        );
        let expectations = CheckExpectations {
            config_file: "book.yaml".to_string(),
            ..CheckExpectations::default()
        };

        let outcome = GitBookValidator::new(tmp.path(), expectations).check_config();

        assert!(outcome.passed, "{:?}", outcome.issues);
        assert_eq!(outcome.summary.as_deref(), Some("book.yaml configuration is valid"));
    }

    #[test]
    fn test_custom_expectations() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("guides")).unwrap();
        let expectations = CheckExpectations {
            expected_dirs: vec!["guides".to_string()],
            ..CheckExpectations::default()
        };

        let outcome = GitBookValidator::new(tmp.path(), expectations).check_directory_structure();
        assert!(outcome.passed);
        assert_eq!(outcome.items.len(), 1);
    }

    #[test]
    fn test_run_subset() {
        let tmp = TempDir::new().unwrap();
        for dir in ["architecture", "developers", "contracts", "examples", "support"] {
            fs::create_dir_all(tmp.path().join(dir)).unwrap();
        }

        let report = GitBookValidator::with_defaults(tmp.path()).run(&[CheckKind::Structure]);

        assert!(report.passed);
        assert_eq!(report.outcomes.len(), 1);
        assert!(report.outcome(CheckKind::Config).is_none());
    }
}
