use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use command_match_catalog::{CommandCatalog, CommandMatch, ConfigFormat, builtin_config};
use command_match_core::Value;
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Text,
}

/// CLI-specific catalog file format.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliConfigFormat {
    Json,
    Yaml,
}

impl From<CliConfigFormat> for ConfigFormat {
    fn from(fmt: CliConfigFormat) -> Self {
        match fmt {
            CliConfigFormat::Json => Self::Json,
            CliConfigFormat::Yaml => Self::Yaml,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "command-match", version)]
#[command(about = "Match text lines against a command catalog")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Match text against the catalog; reads stdin lines when no TEXT is given.
    Check(CheckArgs),
    /// Print the help text of every command in the catalog.
    HelpText(CatalogArgs),
    /// Print the built-in task catalog as an editable config file.
    DumpBuiltin(DumpArgs),
}

#[derive(Debug, Args)]
struct CatalogArgs {
    /// Catalog file (YAML or JSON). Defaults to the built-in task commands.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    #[command(flatten)]
    catalog: CatalogArgs,
    /// Output format, one result per input line.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Text to match.
    inputs: Vec<String>,
}

#[derive(Debug, Args)]
struct DumpArgs {
    /// Output format.
    #[arg(long, default_value = "yaml")]
    format: CliConfigFormat,
}

#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    input: &'a str,
    matched: bool,
    #[serde(flatten)]
    found: Option<CommandMatch>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    typed: BTreeMap<String, Value>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Check(args) => run_check(args),
        Command::HelpText(args) => run_help_text(args),
        Command::DumpBuiltin(args) => run_dump_builtin(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_catalog(args: &CatalogArgs) -> Result<CommandCatalog, String> {
    match &args.catalog {
        Some(path) => CommandCatalog::load(path)
            .map_err(|err| format!("Failed to load catalog '{}': {err}", path.display())),
        None => CommandCatalog::builtin().map_err(|err| format!("Failed to build catalog: {err}")),
    }
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let catalog = load_catalog(&args.catalog)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.inputs.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.map_err(|err| format!("Failed to read stdin: {err}"))?;
            check_line(&catalog, &line, args.format, &mut out)?;
        }
    } else {
        for input in &args.inputs {
            check_line(&catalog, input, args.format, &mut out)?;
        }
    }
    Ok(())
}

fn check_line(
    catalog: &CommandCatalog,
    input: &str,
    format: CliOutputFormat,
    out: &mut impl Write,
) -> Result<(), String> {
    let found = catalog
        .match_line(input)
        .map_err(|err| format!("Failed to parse {input:?}: {err}"))?;
    let typed = found
        .as_ref()
        .map(|found| typed_values(catalog, found))
        .unwrap_or_default();

    let rendered = match format {
        CliOutputFormat::Json => {
            let output = CheckOutput {
                input,
                matched: found.is_some(),
                found,
                typed,
            };
            serde_json::to_string(&output)
                .map_err(|err| format!("Failed to serialize result: {err}"))?
        }
        CliOutputFormat::Text => render_text(input, found.as_ref()),
    };
    writeln!(out, "{rendered}").map_err(|err| format!("Failed to write output: {err}"))
}

fn typed_values(catalog: &CommandCatalog, found: &CommandMatch) -> BTreeMap<String, Value> {
    let mut typed = BTreeMap::new();
    for (name, _) in found.values.iter() {
        match catalog.typed_value(found, name) {
            Ok(Some(value)) => {
                typed.insert(name.to_string(), value);
            }
            Ok(None) => {}
            Err(err) => warn!(command = %found.command, value = name, error = %err, "Value left untyped"),
        }
    }
    typed
}

fn render_text(input: &str, found: Option<&CommandMatch>) -> String {
    let Some(found) = found else {
        return format!("{input} => (no match)");
    };
    let mut lines = vec![format!("{input} => {}", found.command)];
    lines.extend(
        found
            .values
            .iter()
            .map(|(name, raw)| format!("  {name} = {raw}")),
    );
    lines.join("\n")
}

fn run_help_text(args: CatalogArgs) -> Result<(), String> {
    let catalog = load_catalog(&args)?;
    println!("{}", catalog.help_text());
    Ok(())
}

fn run_dump_builtin(args: DumpArgs) -> Result<(), String> {
    let rendered = builtin_config()
        .render(args.format.into())
        .map_err(|err| format!("Failed to render catalog: {err}"))?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
