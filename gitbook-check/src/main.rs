//! gitbook-check - validate a GitBook documentation set
//!
//! Command-line front end for `gitbook-check-core`. Runs the documentation
//! checks against a root directory, renders the report and maps the
//! aggregate verdict to the process exit code.

use std::{
    fs,
    path::PathBuf,
    process,
};

use anyhow::{
    Context,
    Result,
};
use clap::{
    Parser,
    Subcommand,
};
use colored::Colorize;
use gitbook_check_core::{
    CheckExpectations,
    CheckKind,
    GitBookValidator,
    links::{
        LinkCheckSummary,
        extract_links,
    },
};
use tracing::Level;
use tracing_subscriber::{
    EnvFilter,
    FmtSubscriber,
};

mod output;

use output::OutputFormat;

/// Exit code for a failed verdict
const EXIT_CHECKS_FAILED: i32 = 1;
/// Exit code for usage or input errors outside the checks
const EXIT_ERROR: i32 = 2;

/// GitBook documentation checker
#[derive(Parser)]
#[command(name = "gitbook-check")]
#[command(
    version,
    about = "Validate GitBook configuration, structure and links",
    long_about = "
Validate a GitBook documentation set

Checks run against the documentation root (default: current directory):
  config      .gitbook.yaml exists and declares root, structure.readme, structure.summary
  files       required files (README.md, SUMMARY.md) exist
  summary     every [label](target) link in SUMMARY.md resolves
  structure   expected directories exist (markdown files are counted)
  readme      README.md has a title, links and substantial content

Examples:
  gitbook-check
  gitbook-check --root docs check --only summary,files
  gitbook-check --output json
  gitbook-check links

Exit status: 0 when all checks pass, 1 when a check fails, 2 on errors.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Documentation root directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Check expectations file (TOML); defaults to gitbook-check.toml in the root
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, global = true, value_enum, default_value = "human")]
    output: OutputFormatArg,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

/// Available output formats
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormatArg {
    /// Human-readable format with colors (default)
    Human,
    /// Full validation report as JSON
    Json,
    /// LSP-compatible diagnostics as JSON
    Diagnostics,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(format: OutputFormatArg) -> Self {
        match format {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Diagnostics => OutputFormat::Diagnostics,
        }
    }
}

/// Selectable checks
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum CheckArg {
    Config,
    Files,
    Summary,
    Structure,
    Readme,
}

impl From<CheckArg> for CheckKind {
    fn from(check: CheckArg) -> Self {
        match check {
            CheckArg::Config => CheckKind::Config,
            CheckArg::Files => CheckKind::Files,
            CheckArg::Summary => CheckKind::Summary,
            CheckArg::Structure => CheckKind::Structure,
            CheckArg::Readme => CheckKind::Readme,
        }
    }
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Run the documentation checks (default)
    Check {
        /// Run only these checks (comma-separated)
        #[arg(long, value_enum, value_delimiter = ',')]
        only: Vec<CheckArg>,
    },

    /// List the links of the structural index and whether they resolve
    Links,
}

fn main() {
    let cli = Cli::parse();

    let code = match run(&cli) {
        Ok(true) => 0,
        Ok(false) => EXIT_CHECKS_FAILED,
        Err(e) => {
            eprintln!("{} {:#}", "❌".bright_red(), e);
            EXIT_ERROR
        },
    };

    process::exit(code);
}

/// Execute the selected command; `Ok(false)` means checks ran and failed
fn run(cli: &Cli) -> Result<bool> {
    init_logging(&cli.log_level)?;

    let output_format: OutputFormat = cli.output.into();
    if !should_use_colors(output_format, cli.no_color) {
        colored::control::set_override(false);
    }

    let expectations = match &cli.config {
        Some(path) => CheckExpectations::load_file(path).with_context(|| {
            format!("Failed to load check expectations from {}", path.display())
        })?,
        None => CheckExpectations::load(&cli.root).context("Failed to load check expectations")?,
    };
    let validator = GitBookValidator::new(&cli.root, expectations);

    match &cli.command {
        None => cmd_check(&validator, &[], output_format),
        Some(Commands::Check { only }) => cmd_check(&validator, only, output_format),
        Some(Commands::Links) => cmd_links(&validator, output_format),
    }
}

/// Install the global tracing subscriber; logs go to stderr
fn init_logging(log_level: &str) -> Result<()> {
    let level = log_level
        .parse::<Level>()
        .with_context(|| format!("Invalid log level: {}", log_level))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global default tracing subscriber")?;
    Ok(())
}

/// Colors only make sense for human output on a terminal
fn should_use_colors(output_format: OutputFormat, no_color: bool) -> bool {
    match output_format {
        OutputFormat::Human => !no_color && atty::is(atty::Stream::Stdout),
        OutputFormat::Json | OutputFormat::Diagnostics => false,
    }
}

/// Selected checks in execution order; an empty selection means all
fn selected_checks(only: &[CheckArg]) -> Vec<CheckKind> {
    let wanted: Vec<CheckKind> = only.iter().map(|c| (*c).into()).collect();
    CheckKind::ALL
        .into_iter()
        .filter(|kind| wanted.is_empty() || wanted.contains(kind))
        .collect()
}

fn cmd_check(
    validator: &GitBookValidator,
    only: &[CheckArg],
    output_format: OutputFormat,
) -> Result<bool> {
    let report = validator.run(&selected_checks(only));
    output::print_report(&report, output_format)?;
    Ok(report.passed)
}

fn cmd_links(validator: &GitBookValidator, output_format: OutputFormat) -> Result<bool> {
    let summary_file = &validator.expectations().summary;
    let path = validator.root().join(summary_file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let checked = LinkCheckSummary::check(validator.root(), extract_links(&content));
    output::print_links(summary_file, &checked, output_format)?;
    Ok(checked.is_success())
}
