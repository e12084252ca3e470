use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use miette::{miette, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use csvnorm::config::Config;
use csvnorm::normalize::{
    parse_char, ConfirmOverwrite, FileNormalizer, NormalizeJob, OutputTarget, Preset,
    Substitution, TextEncoding, DEFAULT_SUFFIX,
};
use csvnorm::report::{ReportFormat, Reporter};
use csvnorm::NormalizeError;

/// csvnorm - Normalize decimal separators and delimiters in CSV files
#[derive(Parser, Debug)]
#[command(name = "csvnorm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file to normalize (omit to run the jobs from the config file)
    input: Option<PathBuf>,

    /// Path to a job configuration file (.toml, .yml, .yaml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Named substitution
    #[arg(short, long, value_enum, conflicts_with_all = ["from", "to", "swap"])]
    preset: Option<Preset>,

    /// Character to replace (a literal or: comma, period, dot, semicolon, tab, pipe, space)
    #[arg(long, value_parser = parse_char_arg)]
    from: Option<char>,

    /// Replacement character
    #[arg(long, value_parser = parse_char_arg)]
    to: Option<char>,

    /// Exchange --from and --to instead of replacing one direction only
    #[arg(long, requires_all = ["from", "to"])]
    swap: bool,

    /// Text encoding for reading and writing (default: utf-8)
    #[arg(short, long, value_parser = parse_encoding_arg)]
    encoding: Option<TextEncoding>,

    /// Output file (default: <input>_out.<ext> next to the input)
    #[arg(short, long, conflicts_with_all = ["in_place", "suffix"])]
    output: Option<PathBuf>,

    /// Overwrite the input file
    #[arg(long)]
    in_place: bool,

    /// Suffix for the default output name
    #[arg(long, conflicts_with = "in_place")]
    suffix: Option<String>,

    /// Copy an existing output file to <name>.bak before overwriting it
    #[arg(long)]
    backup: bool,

    /// Confirm before overwriting existing files
    #[arg(long)]
    interactive: bool,

    /// Show what would change without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: ReportFormat,

    /// Write the JSON report to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    report_output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn parse_char_arg(s: &str) -> std::result::Result<char, String> {
    parse_char(s).map_err(|e| e.to_string())
}

fn parse_encoding_arg(s: &str) -> std::result::Result<TextEncoding, String> {
    TextEncoding::from_label(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completions
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet);

    info!("csvnorm v{}", env!("CARGO_PKG_VERSION"));

    let jobs = match &cli.input {
        Some(input) => vec![job_from_cli(&cli, input)?],
        None => jobs_from_config(&cli)?,
    };

    let mut normalizer = FileNormalizer::new().dry_run(cli.dry_run);
    if cli.interactive {
        normalizer = normalizer.with_policy(ConfirmOverwrite);
    }

    if cli.report_output.is_some() && cli.format != ReportFormat::Json {
        warn!("--report-output only applies with --format json; printing to the terminal");
    }

    // Report whatever finished before a failure, then surface the failure
    let batch = normalizer.run_all(&jobs);

    if !batch.outcomes.is_empty() || batch.failure.is_none() {
        let reporter =
            Reporter::new(cli.format, cli.report_output.clone()).with_summary(!cli.quiet);
        reporter.report(&batch.outcomes)?;
    }

    match batch.failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries the report
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the single job described by the command line
fn job_from_cli(cli: &Cli, input: &Path) -> Result<NormalizeJob> {
    let substitution = match (cli.preset, cli.from, cli.to) {
        (Some(preset), None, None) => preset.substitution(),
        (None, Some(from), Some(to)) if cli.swap => Substitution::swap(from, to)?,
        (None, Some(from), Some(to)) => Substitution::replace(from, to)?,
        _ => {
            return Err(miette!(
                help = "e.g. --preset period-to-comma, or --from ';' --to ','",
                "Specify either --preset or both --from and --to"
            ))
        }
    };

    let target = if cli.in_place {
        OutputTarget::InPlace
    } else if let Some(output) = &cli.output {
        OutputTarget::Path(output.clone())
    } else {
        OutputTarget::Suffix(
            cli.suffix
                .clone()
                .unwrap_or_else(|| DEFAULT_SUFFIX.to_string()),
        )
    };

    Ok(NormalizeJob::new(input, substitution)
        .with_encoding(cli.encoding.unwrap_or_default())
        .with_target(target)
        .with_backup(cli.backup))
}

/// Load jobs from --config or the default config location
fn jobs_from_config(cli: &Cli) -> Result<Vec<NormalizeJob>> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        // Try to load from default locations
        Config::from_default_locations(Path::new("."))?
    };

    let single_file_flags = cli.preset.is_some()
        || cli.from.is_some()
        || cli.to.is_some()
        || cli.swap
        || cli.output.is_some()
        || cli.in_place;
    if single_file_flags {
        warn!("Substitution and output flags only apply with an INPUT file; using config jobs");
    }

    // Override with CLI arguments
    config.apply_overrides(cli.encoding, cli.suffix.clone(), cli.backup);

    let jobs = config.into_jobs()?;
    if jobs.is_empty() {
        return Err(NormalizeError::NoJobs.into());
    }

    info!("Running {} configured jobs", jobs.len());
    Ok(jobs)
}
