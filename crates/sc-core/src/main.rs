//! Safety Checklist Core - EPC/EPI checklist tooling
//!
//! The main entry point for sc-core, handling:
//! - Catalog listing and blank submission templates
//! - Submission validation and status statistics
//! - PDF report rendering

use std::fs;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use sc_common::catalog::CATALOG_VERSION;
use sc_common::error::{format_error_human, StructuredError};
use sc_common::{validate, ChecklistKind, Error, OutputFormat, Result, Submission, SCHEMA_VERSION};
use sc_core::config::{ConfigPaths, ConfigResolver};
use sc_core::exit_codes::ExitCode;
use sc_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use sc_core::output::{
    read_submission, tally_markdown, tally_summary, to_json, CatalogView, ValidationReport,
};
use sc_report::ReportGenerator;
use tracing::{debug, info};

/// Safety Checklist Core - EPC/EPI inspection checklists and PDF reports
#[derive(Parser)]
#[command(name = "sc-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Report configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the categories, items and status codes of a checklist
    Catalog {
        /// Checklist kind
        kind: ChecklistKind,
    },

    /// Emit a blank submission with every item unanswered
    Template(TemplateArgs),

    /// Check a submission without rendering it
    Validate {
        /// Submission JSON file, or - for stdin
        submission: PathBuf,
    },

    /// Count items per status code
    Stats {
        /// Submission JSON file, or - for stdin
        submission: PathBuf,
    },

    /// Render a submission to PDF
    Render(RenderArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct TemplateArgs {
    /// Checklist kind
    kind: ChecklistKind,

    /// Write the template to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Inspection date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Submission JSON file, or - for stdin
    submission: PathBuf,

    /// Output file path
    #[arg(long, short = 'o', conflicts_with_all = ["out_dir", "stdout"])]
    output: Option<PathBuf>,

    /// Directory for the PDF under its suggested file name
    #[arg(long, conflicts_with = "stdout")]
    out_dir: Option<PathBuf>,

    /// Branding image (PNG or JPEG); overrides SC_BRANDING
    #[arg(long)]
    branding: Option<PathBuf>,

    /// Write PDF bytes to stdout instead of a file
    #[arg(long)]
    stdout: bool,
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here
            let code = if e.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = LogLevel::from_flags(cli.global.quiet, cli.global.verbose);
    init_logging(&LogConfig::from_env(cli_level, cli.global.log_format));

    let global = &cli.global;
    let result = match &cli.command {
        Commands::Catalog { kind } => run_catalog(global, *kind),
        Commands::Template(args) => run_template(global, args),
        Commands::Validate { submission } => run_validate(global, submission),
        Commands::Stats { submission } => run_stats(global, submission),
        Commands::Render(args) => run_render(global, args),
        Commands::Version => run_version(global),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => report_error(global, &err),
    };
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Output helpers
// ============================================================================

fn emit(
    global: &GlobalOpts,
    json: impl FnOnce() -> Result<String>,
    markdown: impl FnOnce() -> String,
    summary: impl FnOnce() -> String,
) -> Result<()> {
    match global.format {
        OutputFormat::Json => println!("{}", json()?),
        OutputFormat::Md => print!("{}", markdown()),
        OutputFormat::Summary => println!("{}", summary()),
    }
    Ok(())
}

fn report_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    let code = ExitCode::from(err);
    debug!(error_code = err.code(), exit_code = %code, "Command failed");

    if global.format.is_machine() {
        let structured = StructuredError::from(err).with_context("exit_code", code.code_name());
        println!("{}", structured.to_json());
    } else {
        let use_color = !global.no_color && std::io::stderr().is_terminal();
        eprintln!("{}", format_error_human(err, use_color));
    }
    code
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_catalog(global: &GlobalOpts, kind: ChecklistKind) -> Result<ExitCode> {
    let view = CatalogView::new(kind);
    emit(
        global,
        || to_json(&view),
        || view.to_markdown(),
        || view.to_summary(),
    )?;
    Ok(ExitCode::Clean)
}

fn run_template(global: &GlobalOpts, args: &TemplateArgs) -> Result<ExitCode> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let submission = Submission::blank(args.kind, date);
    let json = submission.to_json()?;

    let Some(path) = &args.output else {
        println!("{}", json);
        return Ok(ExitCode::Clean);
    };

    fs::write(path, format!("{}\n", json))?;
    info!(path = %path.display(), kind = %args.kind, "Template written");

    let payload = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "command": "template",
        "kind": args.kind,
        "output": path,
        "items": submission.answers.len(),
    });
    emit(
        global,
        || to_json(&payload),
        || {
            format!(
                "# Modelo {}\n\n{} itens gravados em `{}`\n",
                args.kind.short_label(),
                submission.answers.len(),
                path.display()
            )
        },
        || format!("template {} -> {}", args.kind.short_label(), path.display()),
    )?;
    Ok(ExitCode::Clean)
}

fn run_validate(global: &GlobalOpts, source: &Path) -> Result<ExitCode> {
    let submission = read_submission(source)?;
    let answers = submission.answer_set()?;
    let tally = answers.tally(submission.kind);
    let problems = validate(&submission.metadata, &answers)
        .err()
        .map(|e| e.problems().to_vec())
        .unwrap_or_default();

    let report = ValidationReport::new(submission.kind, &tally, problems);
    debug!(valid = report.valid, answered = report.answered, "Submission validated");
    emit(
        global,
        || to_json(&report),
        || report.to_markdown(),
        || report.to_summary(),
    )?;

    Ok(if report.valid {
        ExitCode::Clean
    } else {
        ExitCode::ValidationError
    })
}

fn run_stats(global: &GlobalOpts, source: &Path) -> Result<ExitCode> {
    let submission = read_submission(source)?;
    let tally = submission.answer_set()?.tally(submission.kind);
    emit(
        global,
        || to_json(&tally),
        || tally_markdown(&tally),
        || tally_summary(&tally),
    )?;
    Ok(ExitCode::Clean)
}

fn run_render(global: &GlobalOpts, args: &RenderArgs) -> Result<ExitCode> {
    let submission = read_submission(&args.submission)?;

    let resolver = ConfigResolver::new(ConfigPaths {
        config_path: global.config.clone(),
        branding_path: args.branding.clone(),
    });
    let (config, source) = resolver.load()?;

    let generator = ReportGenerator::new(config);
    let report = generator.render_submission(&submission)?;

    if args.stdout {
        let mut out = std::io::stdout().lock();
        out.write_all(&report.bytes)?;
        out.flush()?;
        return Ok(ExitCode::Clean);
    }

    let path = match &args.output {
        Some(path) => path.clone(),
        None => args
            .out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&report.filename),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, &report.bytes)?;
    info!(path = %path.display(), pages = report.page_count, "Report written");

    let payload = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "kind": submission.kind,
        "path": path,
        "filename": report.filename,
        "mime": report.mime,
        "bytes": report.bytes.len(),
        "pages": report.page_count,
        "generated_at": report.generated_at,
        "config": source,
    });
    emit(
        global,
        || to_json(&payload),
        || {
            format!(
                "# Relatório {}\n\n- Arquivo: `{}`\n- Páginas: {}\n- Tamanho: {} bytes\n",
                submission.kind.short_label(),
                path.display(),
                report.page_count,
                report.bytes.len()
            )
        },
        || {
            format!(
                "{} ({} pages, {} bytes)",
                path.display(),
                report.page_count,
                report.bytes.len()
            )
        },
    )?;
    Ok(ExitCode::Clean)
}

fn run_version(global: &GlobalOpts) -> Result<ExitCode> {
    let version_info = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "catalog_version": CATALOG_VERSION,
        "sc_core_version": env!("CARGO_PKG_VERSION"),
        "rust_version": env!("CARGO_PKG_RUST_VERSION"),
    });
    emit(
        global,
        || to_json(&version_info),
        || {
            format!(
                "# sc-core {}\n\n- schema version: {}\n- catalog version: {}\n",
                env!("CARGO_PKG_VERSION"),
                SCHEMA_VERSION,
                CATALOG_VERSION
            )
        },
        || format!("sc-core {}", env!("CARGO_PKG_VERSION")),
    )?;
    Ok(ExitCode::Clean)
}
