use clap::{Parser, ValueEnum};
use std::fs;
use std::time::Instant;
use tejun::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetCli {
    Command,
    Subagent,
}

impl From<TargetCli> for ExportTarget {
    fn from(target: TargetCli) -> Self {
        match target {
            TargetCli::Command => ExportTarget::Command,
            TargetCli::Subagent => ExportTarget::Subagent,
        }
    }
}

/// Compile a visually composed workflow into an agent instruction document
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the editor's workflow JSON file
    workflow_path: String,

    /// The document shape to produce
    #[arg(short, long, value_enum, default_value = "command")]
    target: TargetCli,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Only validate the workflow; exit non-zero if it has errors
    #[arg(long)]
    validate_only: bool,

    /// Refuse to render when validation fails or a cycle drops nodes
    #[arg(long)]
    strict: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let total_start = Instant::now();

    // --- 1. Loading and Conversion ---
    let json = fs::read_to_string(&cli.workflow_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read workflow file '{}': {}",
            &cli.workflow_path, e
        ))
    });
    let workflow = UiWorkflow::from_json(&json)
        .and_then(IntoWorkflow::into_workflow)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load workflow: {}", e)));
    info!(
        workflow_id = %workflow.id,
        nodes = workflow.nodes.len(),
        edges = workflow.edges.len(),
        "Workflow loaded"
    );

    // --- 2. Validation ---
    let report = validate(&workflow);
    for violation in &report.violations {
        let level = match violation.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        eprintln!("{}: {}", level, violation);
    }

    if cli.validate_only {
        if report.is_valid() {
            eprintln!("Workflow '{}' is valid.", workflow.name);
            return;
        }
        std::process::exit(1);
    }
    if cli.strict && !report.is_valid() {
        exit_with_error("Validation failed; refusing to render in strict mode.");
    }

    // --- 3. Compilation ---
    let target = ExportTarget::from(cli.target);
    let export = Exporter::builder(&workflow)
        .target(target)
        .build()
        .render_with_report();

    if !export.excluded.is_empty() {
        eprintln!(
            "warning: cycle detected; excluded from the document: {}",
            export.excluded.join(", ")
        );
        if cli.strict {
            exit_with_error("Cycle detected; refusing to render in strict mode.");
        }
    }

    // --- 4. Output ---
    match &cli.output {
        Some(path) => {
            fs::write(path, format!("{}\n", export.document)).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write document to '{}': {}", path, e))
            });
            eprintln!("Wrote {} document to '{}'", target, path);
        }
        None => println!("{}", export.document),
    }

    debug!(elapsed = ?total_start.elapsed(), "Compilation finished");
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
