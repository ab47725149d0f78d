//! Report rendering
//!
//! Human output mirrors a checklist: one numbered section per check, a
//! results table and the overall status. JSON formats print a single
//! document on stdout so they can be piped into other tools.

use std::fmt::Write as _;

use anyhow::{
    Context,
    Result,
};
use colored::Colorize;
use gitbook_check_core::{
    CheckOutcome,
    ValidationReport,
    diagnostics::DiagnosticCollection,
    links::{
        CheckedLink,
        LinkCheckSummary,
    },
};
use serde::Serialize;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Output formats understood by the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
    Diagnostics,
}

/// Print a validation report in the requested format
pub fn print_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => print!("{}", render_report(report)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            println!("{}", json);
        },
        OutputFormat::Diagnostics => {
            let collection = DiagnosticCollection::from_report(report, "check");
            let json = serde_json::to_string_pretty(&collection)
                .context("Failed to serialize diagnostics")?;
            println!("{}", json);
        },
    }
    Ok(())
}

fn mark(passed: bool) -> String {
    if passed {
        "✅".bright_green().to_string()
    } else {
        "❌".bright_red().to_string()
    }
}

fn render_outcome(out: &mut String, index: usize, outcome: &CheckOutcome) {
    let _ = writeln!(out, "{}. {}", index + 1, outcome.kind.title().bold());

    for item in &outcome.items {
        match &item.detail {
            Some(detail) => {
                let _ = writeln!(out, "   {} {} ({})", mark(item.passed), item.subject, detail);
            },
            None => {
                let _ = writeln!(out, "   {} {}", mark(item.passed), item.subject);
            },
        }
    }

    if let Some(summary) = &outcome.summary {
        let _ = writeln!(out, "   {} {}", "📊".bright_cyan(), summary);
    }

    if !outcome.issues.is_empty() {
        let _ = writeln!(out, "   {} Problems:", "🚨".bright_red());
        for issue in &outcome.issues {
            let _ = writeln!(out, "      - {}", issue.message);
        }
    }

    out.push('\n');
}

/// Render the human-readable report
pub fn render_report(report: &ValidationReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} Checking GitBook documentation in {}\n",
        "🚀".bright_blue(),
        report.root
    );

    for (index, outcome) in report.outcomes.iter().enumerate() {
        render_outcome(&mut out, index, outcome);
    }

    let _ = writeln!(out, "{} Check Results Summary:", "📋".bright_cyan());
    let _ = writeln!(out, "{}", RULE);
    for outcome in &report.outcomes {
        let name = outcome.kind.name();
        let mut title = name[..1].to_uppercase();
        title.push_str(&name[1..]);
        let _ = writeln!(out, "{} {} Check", mark(outcome.passed), title);
    }
    let _ = writeln!(out, "{}", RULE);

    if report.passed {
        let _ = writeln!(out, "{} Overall Status: {}", "🎉", "PASSED".bright_green().bold());
        let _ = writeln!(
            out,
            "\n{} GitBook integration is properly configured and ready to use!",
            "✨".bright_yellow()
        );
        let _ = writeln!(out, "\n{} Next steps:", "💡".bright_yellow());
        for step in report.next_steps() {
            let _ = writeln!(out, "   - {}", step);
        }
    } else {
        let _ = writeln!(out, "{} Overall Status: {}", "⚠️", "FAILED".bright_red().bold());
        let _ = writeln!(
            out,
            "\n{} Please fix the failing checks before using GitBook integration.",
            "🔧".bright_yellow()
        );
    }

    out
}

#[derive(Serialize)]
struct LinksOutput<'a> {
    file:  &'a str,
    total: usize,
    valid: usize,
    links: &'a [CheckedLink],
}

/// Print the links of the structural index
pub fn print_links(file: &str, checked: &LinkCheckSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => print!("{}", render_links(file, checked)),
        OutputFormat::Json | OutputFormat::Diagnostics => {
            let doc = LinksOutput {
                file,
                total: checked.total(),
                valid: checked.valid_count(),
                links: &checked.links,
            };
            let json = serde_json::to_string_pretty(&doc).context("Failed to serialize links")?;
            println!("{}", json);
        },
    }
    Ok(())
}

/// Render links in document order with their resolution status
pub fn render_links(file: &str, checked: &LinkCheckSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Links in {}", "🔗".bright_blue(), file);

    for CheckedLink { link, exists } in &checked.links {
        let _ = writeln!(
            out,
            "   {:>4}  {} [{}]({})",
            link.line,
            mark(*exists),
            link.label,
            link.target
        );
    }

    let _ = writeln!(
        out,
        "\n   {} {}/{} links are valid",
        "📊".bright_cyan(),
        checked.valid_count(),
        checked.total()
    );
    out
}
