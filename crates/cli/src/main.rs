use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use bem_core::{
    print_element, transform_document, Document, HelperCallSynthesizer, Policy, PolicyOverrides,
    TransformStats, Warning,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// BEM attribute resolver.
#[derive(Parser)]
#[command(name = "bem", version, about = "Resolve BEM attributes into class names")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress warnings and error details
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where policy overrides come from. `--set` wins over `--config`.
#[derive(Args)]
struct PolicyArgs {
    /// TOML file with policy overrides (flat or under a [bem] table)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override one policy option, e.g. --set allowIdentifier=true
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform a JSON markup tree and print the result
    Transform {
        /// Path to the JSON document
        file: PathBuf,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Runtime helper called by the synthesized className
        #[arg(long, default_value = HelperCallSynthesizer::DEFAULT_HELPER)]
        helper: String,
    },

    /// Validate a JSON markup tree without printing it
    Check {
        /// Path to the JSON document
        file: PathBuf,
        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Print the effective policy
    Policy {
        #[command(flatten)]
        policy: PolicyArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.output, cli.quiet);

    match cli.command {
        Commands::Transform {
            file,
            policy,
            helper,
        } => {
            cmd_transform(&file, &policy, &helper, cli.output, cli.quiet);
        }
        Commands::Check { file, policy } => {
            cmd_check(&file, &policy, cli.output, cli.quiet);
        }
        Commands::Policy { policy } => {
            cmd_policy(&policy, cli.output, cli.quiet);
        }
    }
}

/// Text mode surfaces resolver warnings through the log; JSON and quiet
/// modes keep stderr for structured output only.
fn init_logging(output: OutputFormat, quiet: bool) {
    let default_level = if quiet || output == OutputFormat::Json {
        "error"
    } else {
        "warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}

fn load_overrides(args: &PolicyArgs) -> Result<PolicyOverrides, String> {
    let mut overrides = match &args.config {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .map_err(|e| format!("error reading {}: {}", path.display(), e))?;
            PolicyOverrides::from_toml_str(&source)
                .map_err(|e| format!("{}: {}", path.display(), e))?
        }
        None => PolicyOverrides::default(),
    };

    for setting in &args.set {
        let (key, value) = setting
            .split_once('=')
            .ok_or_else(|| format!("invalid --set '{}': expected KEY=VALUE", setting))?;
        let recognized = overrides
            .apply_setting(key.trim(), value)
            .map_err(|e| e.to_string())?;
        if !recognized {
            tracing::warn!(option = key.trim(), "ignoring unrecognized policy option");
        }
    }
    Ok(overrides)
}

fn load_document(path: &Path) -> Result<Document, String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("error reading {}: {}", path.display(), e))?;
    let mut doc = Document::from_json_str(&source)
        .map_err(|e| format!("error parsing {}: {}", path.display(), e))?;
    if doc.file.is_empty() {
        doc.file = path.display().to_string();
        doc.fill_provenance();
    }
    Ok(doc)
}

/// Load inputs and run the transform, exiting on any failure.
fn run(
    file: &Path,
    policy: &PolicyArgs,
    helper: &str,
    output: OutputFormat,
    quiet: bool,
) -> (Document, TransformStats, Vec<Warning>) {
    let overrides = load_overrides(policy).unwrap_or_else(|msg| {
        report_error(&msg, output, quiet);
        process::exit(1);
    });
    let mut doc = load_document(file).unwrap_or_else(|msg| {
        report_error(&msg, output, quiet);
        process::exit(1);
    });

    let synthesizer = HelperCallSynthesizer::new(helper);
    let mut warnings: Vec<Warning> = Vec::new();
    match transform_document(&mut doc, &overrides, &synthesizer, &mut warnings) {
        Ok(stats) => {
            report_warnings(&warnings, output, quiet);
            (doc, stats, warnings)
        }
        Err(e) => {
            report_warnings(&warnings, output, quiet);
            if !quiet {
                match output {
                    OutputFormat::Json => {
                        let err_json = serde_json::to_string_pretty(&e.to_json_value())
                            .unwrap_or_else(|_| format!("{{\"error\": \"{:?}\"}}", e));
                        eprintln!("{}", err_json);
                    }
                    OutputFormat::Text => eprintln!("error: {}", e),
                }
            }
            process::exit(1);
        }
    }
}

fn cmd_transform(file: &Path, policy: &PolicyArgs, helper: &str, output: OutputFormat, quiet: bool) {
    let (doc, _, _) = run(file, policy, helper, output, quiet);
    match output {
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&doc)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for root in &doc.roots {
                print!("{}", print_element(root));
            }
        }
    }
}

#[derive(Serialize)]
struct CheckReport<'a> {
    status: &'static str,
    file: &'a str,
    roots: usize,
    #[serde(flatten)]
    stats: TransformStats,
    warnings: &'a [Warning],
}

fn cmd_check(file: &Path, policy: &PolicyArgs, output: OutputFormat, quiet: bool) {
    let (doc, stats, warnings) = run(
        file,
        policy,
        HelperCallSynthesizer::DEFAULT_HELPER,
        output,
        quiet,
    );
    match output {
        OutputFormat::Json => {
            let report = CheckReport {
                status: "ok",
                file: &doc.file,
                roots: doc.roots.len(),
                stats,
                warnings: &warnings,
            };
            let pretty = serde_json::to_string_pretty(&report)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            println!(
                "ok: {} root(s), {} element(s), {} attribute(s) resolved, {} warning(s)",
                doc.roots.len(),
                stats.elements_visited,
                stats.attributes_removed,
                stats.warnings
            );
        }
    }
}

fn cmd_policy(policy: &PolicyArgs, output: OutputFormat, quiet: bool) {
    let overrides = load_overrides(policy).unwrap_or_else(|msg| {
        report_error(&msg, output, quiet);
        process::exit(1);
    });
    let effective = Policy::resolve(&Policy::default(), &overrides);
    let pretty = serde_json::to_string_pretty(&effective)
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);
}

/// JSON mode only; in text mode the resolver already logged each warning.
fn report_warnings(warnings: &[Warning], output: OutputFormat, quiet: bool) {
    if quiet || output == OutputFormat::Text {
        return;
    }
    for w in warnings {
        let line = serde_json::to_string(w).unwrap_or_else(|_| format!("{:?}", w));
        eprintln!("{}", line);
    }
}

fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
