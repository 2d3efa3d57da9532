use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use long_literal_fixer::config::{apply_report, check_report, load_from_path};
use long_literal_fixer::ts::extract_literals_from_file;
use long_literal_fixer::{
    BatchCoordinator, FileFix, FileStore, FixError, FixStatus, Strategy, ViolationPosition,
};
use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "long-literal-fixer")]
#[command(about = "Fix lowercase 'l' long literal suffixes at reported positions", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level filter, e.g. `info` or `long_literal_fixer=debug`
    #[arg(
        long,
        env = "LONG_LITERAL_FIXER_LOG",
        default_value = "warn",
        global = true,
        hide_env = true
    )]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fix violations at the given positions of one file
    Fix {
        /// Java source file to fix
        file: PathBuf,

        /// Violation position (1-based), repeatable
        #[arg(long = "at", value_name = "LINE:COLUMN", required = true)]
        positions: Vec<ViolationPosition>,

        /// How positions are matched against the source
        #[arg(short, long, value_enum, default_value_t = StrategyArg::Coordinate)]
        strategy: StrategyArg,

        /// Dry run - show what would be changed without modifying the file
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a TOML violation report
    Apply {
        /// Report file listing violations per file
        #[arg(short, long)]
        report: PathBuf,

        /// Root for workspace-relative report paths (defaults to the report's directory)
        #[arg(short, long)]
        workspace: Option<PathBuf>,

        /// Dry run - show what would be changed without modifying files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// List lowercase-suffix long literals in a file or directory
    Scan {
        /// Java file or directory to scan
        path: PathBuf,

        /// Print hits as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Inspect the character at each raw coordinate
    Coordinate,
    /// Match coordinates against parsed literal token spans
    Range,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Coordinate => Strategy::Coordinate,
            StrategyArg::Range => Strategy::Range,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level)?)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Fix {
            file,
            positions,
            strategy,
            dry_run,
            diff,
            json,
        } => cmd_fix(&file, positions, strategy.into(), dry_run, diff, json),

        Commands::Apply {
            report,
            workspace,
            dry_run,
            diff,
        } => cmd_apply(&report, workspace, dry_run, diff),

        Commands::Scan { path, json } => cmd_scan(&path, json),
    }
}

#[derive(Serialize)]
struct FixSummary<'a> {
    file: &'a Path,
    strategy: Strategy,
    fixed: usize,
    persisted: bool,
    outcomes: Vec<OutcomeSummary>,
}

#[derive(Serialize)]
struct OutcomeSummary {
    position: ViolationPosition,
    status: String,
}

impl<'a> From<&'a FileFix> for FixSummary<'a> {
    fn from(fix: &'a FileFix) -> Self {
        FixSummary {
            file: &fix.path,
            strategy: fix.strategy,
            fixed: fix.report.fixed_count(),
            persisted: fix.persisted,
            outcomes: fix
                .report
                .outcomes
                .iter()
                .map(|o| OutcomeSummary {
                    position: o.position,
                    status: o.status.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct FixFailure<'a> {
    file: &'a Path,
    error: String,
}

#[derive(Serialize)]
struct ScanHit {
    file: PathBuf,
    position: ViolationPosition,
    literal: String,
}

/// Helper: Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (fixed)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => continue,
        };
        print!("{}", sign);
    }
}

/// Helper: Print per-position outcomes of one file
fn print_fix(fix: &FileFix, dry_run: bool, show_diff: bool) {
    for outcome in &fix.report.outcomes {
        match &outcome.status {
            FixStatus::Fixed => {
                let verb = if dry_run { "Would fix" } else { "Fixed" };
                println!("{} {}:{}: {}", "✓".green(), fix.path.display(), outcome.position, verb);
            }
            FixStatus::NoMatch { .. } => {
                println!(
                    "{} {}:{}: Skipped ({})",
                    "⊘".cyan(),
                    fix.path.display(),
                    outcome.position,
                    outcome.status
                );
            }
            FixStatus::OutOfBounds(_) | FixStatus::Unsupported(_) => {
                println!(
                    "{} {}:{}: Skipped ({})",
                    "⊙".yellow(),
                    fix.path.display(),
                    outcome.position,
                    outcome.status
                );
            }
        }
    }

    if show_diff && fix.original != fix.updated {
        display_diff(&fix.path, &fix.original, &fix.updated);
    }
}

fn report_error(path: &Path, e: &FixError) {
    eprintln!("{} {}: Error - {}", "✗".red(), path.display(), e);
    if let FixError::Structure { .. } = e {
        eprintln!("  {}", "Rewrite would change the parse tree; file left untouched".red());
    }
}

fn report_scan_error(path: &Path, e: &dyn std::error::Error) {
    eprintln!("{} {}: Error - {}", "✗".red(), path.display(), e);
}

fn cmd_fix(
    file: &Path,
    positions: Vec<ViolationPosition>,
    strategy: Strategy,
    dry_run: bool,
    show_diff: bool,
    json: bool,
) -> Result<()> {
    let positions: BTreeSet<ViolationPosition> = positions.into_iter().collect();
    let mut coordinator = BatchCoordinator::new(FileStore);

    let result = if dry_run {
        coordinator.preview_file(file, &positions, strategy)
    } else {
        coordinator.fix_file(file, &positions, strategy)
    };

    let fix = match result {
        Ok(fix) => fix,
        Err(e) => {
            if json {
                let failure = FixFailure {
                    file,
                    error: e.to_string(),
                };
                println!("{}", serde_json::to_string_pretty(&failure)?);
            } else {
                report_error(file, &e);
            }
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&FixSummary::from(&fix))?);
        return Ok(());
    }

    print_fix(&fix, dry_run, show_diff);
    println!();
    println!("{}", "Summary:".bold());
    println!("  {} fixed", format!("{}", fix.report.fixed_count()).green());
    println!("  {} skipped", format!("{}", fix.report.skipped().count()).cyan());
    if fix.report.changed() && !fix.persisted {
        println!("  {}", "[DRY RUN - file not modified]".cyan());
    }

    Ok(())
}

fn cmd_apply(
    report_path: &Path,
    workspace: Option<PathBuf>,
    dry_run: bool,
    show_diff: bool,
) -> Result<()> {
    let report = load_from_path(report_path)?;

    let workspace = match workspace {
        Some(path) => path,
        None => report_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    if !report.meta.name.is_empty() {
        println!("Report: {}", report.meta.name);
    }
    println!("Workspace: {}", workspace.display());
    println!("Strategy: {}", report.meta.strategy);
    println!();

    let mut coordinator = BatchCoordinator::new(FileStore);
    let results = if dry_run {
        println!("{}", "  [DRY RUN - showing what would be fixed]".cyan());
        check_report(&report, &workspace, &coordinator)
    } else {
        apply_report(&report, &workspace, &mut coordinator)
    };

    let mut total_fixed = 0;
    let mut total_skipped = 0;
    let mut files_written = 0;
    let mut files_failed = 0;

    for (path, result) in results {
        match result {
            Ok(fix) => {
                print_fix(&fix, dry_run, show_diff);
                total_fixed += fix.report.fixed_count();
                total_skipped += fix.report.skipped().count();
                if fix.persisted {
                    files_written += 1;
                }
            }
            Err(e) => {
                report_error(&path, &e);
                files_failed += 1;
            }
        }
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("  {} fixed", format!("{}", total_fixed).green());
    println!("  {} skipped", format!("{}", total_skipped).cyan());
    println!("  {} files written", format!("{}", files_written).green());
    println!("  {} files failed", format!("{}", files_failed).red());

    if files_failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_scan(path: &Path, json: bool) -> Result<()> {
    let mut files = Vec::new();
    let mut files_failed = 0;
    for entry in WalkDir::new(path) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let failed = e.path().unwrap_or(path).to_path_buf();
                report_scan_error(&failed, &e);
                files_failed += 1;
                continue;
            }
        };
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|s| s.to_str()) == Some("java")
        {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();

    let mut hits = Vec::new();
    for file in files {
        let tokens = match extract_literals_from_file(&file) {
            Ok(tokens) => tokens,
            Err(e) => {
                report_scan_error(&file, &e);
                files_failed += 1;
                continue;
            }
        };
        for token in tokens.iter().filter(|t| t.is_lowercase_long()) {
            if let Some(position) = token.suffix_position() {
                hits.push(ScanHit {
                    file: file.clone(),
                    position,
                    literal: token.text.clone(),
                });
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        for hit in &hits {
            println!("{}:{} {}", hit.file.display(), hit.position, hit.literal.yellow());
        }
        if hits.is_empty() && files_failed == 0 {
            println!("{}", "No lowercase long literals found".green());
        }
    }

    if files_failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
