use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dialplan_core::{AreaCodeIndex, Config, Report, Severity};
use dialplan_engine::{generate, AreaResolver};
use dialplan_table::{compare_files, load_area_codes, relocate_file, write_generated_file, TableComparison};

/// Default config file looked up in the working directory
const DEFAULT_CONFIG: &str = "dialplan.toml";

/// Dialplan - synthetic phone numbers and longest-prefix area lookup
#[derive(Parser)]
#[command(name = "dialplan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: dialplan.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate phone numbers for every area code, round-robin
    Generate {
        /// CSV file with area codes and areas
        area_codes: PathBuf,

        /// Output CSV file for generated phone numbers
        output: PathBuf,

        /// Total number of phone numbers to generate
        total_numbers: u64,

        /// Digits per number, area code included
        #[arg(short, long)]
        length: Option<usize>,

        /// Seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Rewrite the area column of a phone number CSV from its area codes
    Locate {
        /// CSV file with area codes and areas
        area_codes: PathBuf,

        /// CSV file with phone numbers
        input: PathBuf,

        /// Output CSV file with updated areas
        output: PathBuf,

        /// Do not check that the output matches the input
        #[arg(long)]
        skip_verify: bool,

        /// Also write a JSON report
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Check whether two CSV files hold the same rows
    Verify {
        left: PathBuf,
        right: PathBuf,
    },

    /// Write a default config file
    Init {
        /// Where to write the config
        #[arg(default_value = DEFAULT_CONFIG)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Init { path, force } = &cli.command {
        return init_command(path, *force);
    }

    let config = load_config(cli.config.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Generate { area_codes, output, total_numbers, length, seed } => {
            generate_command(&config, &area_codes, &output, total_numbers, length, seed)
        }
        Commands::Locate { area_codes, input, output, skip_verify, report } => {
            locate_command(&config, &area_codes, &input, &output, !skip_verify, report.as_deref())
        }
        Commands::Verify { left, right } => verify_command(&left, &right),
        Commands::Init { .. } => Ok(()),
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>, verbose: bool) -> Result<Config> {
    let config = if let Some(config_path) = path {
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else if Path::new(DEFAULT_CONFIG).exists() {
        Config::from_file(Path::new(DEFAULT_CONFIG))
            .with_context(|| format!("Failed to load config from {}", DEFAULT_CONFIG))?
    } else {
        if verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn load_index(config: &Config, area_codes: &Path) -> Result<AreaCodeIndex> {
    load_area_codes(area_codes, &config.columns)
        .with_context(|| format!("Failed to load area codes from {}", area_codes.display()))
}

/// Generate command - write `total_numbers` synthetic numbers
fn generate_command(
    config: &Config,
    area_codes: &Path,
    output: &Path,
    total_numbers: u64,
    length: Option<usize>,
    seed: Option<u64>,
) -> Result<()> {
    let started = Instant::now();
    let total_length = length.unwrap_or(config.generator.total_length);
    let index = load_index(config, area_codes)?;

    let rng = match seed.or(config.generator.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut generator = generate(&index, total_numbers, total_length, rng)?
        .with_max_retries(config.generator.max_retries);

    let written = write_generated_file(output, &config.columns, &mut generator)
        .with_context(|| format!("Failed to write phone numbers to {}", output.display()))?;

    tracing::info!(
        written,
        redraws = generator.redraws(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "generation finished"
    );

    print_banner("Phone Number Generation");
    println!("Area codes:   {}", index.len());
    println!("Digits:       {}", total_length);
    println!("Written:      {}", written.to_string().green());
    println!("Redraws:      {}", generator.redraws());
    println!("Output:       {}", output.display());
    println!();
    println!("Execution time: {:.2} seconds", started.elapsed().as_secs_f64());
    print_rule();

    Ok(())
}

/// Locate command - resolve areas, then check the output against the input
fn locate_command(
    config: &Config,
    area_codes: &Path,
    input: &Path,
    output: &Path,
    verify: bool,
    report_path: Option<&Path>,
) -> Result<()> {
    let started = Instant::now();
    let index = load_index(config, area_codes)?;

    let window = config.resolver.window_for(&index)?;
    if let Some(code) = index.iter().find(|code| !window.contains(code.len())) {
        tracing::warn!(code = code.code(), %window, "area code outside the prefix window will never match");
    }

    let resolver = AreaResolver::with_window(&index, window);
    let relocation = relocate_file(&resolver, &config.columns, input, output)
        .with_context(|| format!("Failed to update locations from {}", input.display()))?;

    let elapsed = started.elapsed();

    let mut report = Report::from_diagnostics(relocation.diagnostics.clone())
        .with_rows(relocation.rows, relocation.unknown);

    let comparison = if verify {
        let comparison = compare_files(input, output)?;
        let input_name = input.display().to_string();
        let output_name = output.display().to_string();
        for diagnostic in comparison.diagnostics(&input_name, &output_name) {
            report.add_diagnostic(diagnostic);
        }
        Some(comparison)
    } else {
        None
    };

    print_banner("Location Update Report");
    println!("Rows:       {}", relocation.rows);
    println!("Resolved:   {}", relocation.resolved.to_string().green());
    if relocation.unknown > 0 {
        println!("Unknown:    {}", relocation.unknown.to_string().yellow());
    } else {
        println!("Unknown:    {}", relocation.unknown.to_string().green());
    }
    println!("Changed:    {}", relocation.changed);
    println!("Window:     {}", window);
    println!();
    println!("Execution time: {:.2} seconds", elapsed.as_secs_f64());

    if let Some(comparison) = &comparison {
        println!();
        if comparison.is_identical() {
            println!("{}", "Validation passed: The files are identical.".green().bold());
        } else {
            println!("{}", "Validation failed: The files are not identical.".red().bold());
            print_mismatch(comparison);
        }
    }

    print_rule();

    if let Some(path) = report_path {
        let report = report.clone().with_metadata(serde_json::json!({
            "area_codes": area_codes.display().to_string(),
            "input": input.display().to_string(),
            "output": output.display().to_string(),
            "prefix_window": window.to_string(),
            "diagnostics_truncated": relocation.is_truncated(),
        }));
        report
            .save_to_file(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        eprintln!("{} {}", "Report saved to:".green(), path.display());
    }

    if report.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Verify command - row-by-row comparison of two tables
fn verify_command(left: &Path, right: &Path) -> Result<()> {
    let comparison = compare_files(left, right)?;

    print_banner("Table Comparison");
    println!("{} {} ({} rows)", "Left: ".bold(), left.display(), comparison.left_rows);
    println!("       sha256 {}", comparison.left_digest);
    println!("{} {} ({} rows)", "Right:".bold(), right.display(), comparison.right_rows);
    println!("       sha256 {}", comparison.right_digest);
    println!();

    if comparison.is_identical() {
        println!("{}", "Validation passed: The files are identical.".green().bold());
        if !comparison.same_bytes() {
            println!("{}", "(rows match; the files differ only in formatting)".yellow());
        }
    } else {
        println!("{}", "Validation failed: The files are not identical.".red().bold());
        print_mismatch(&comparison);
    }

    print_rule();

    if !comparison.is_identical() {
        std::process::exit(1);
    }

    Ok(())
}

/// Init command - write the default configuration
fn init_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        ));
    }

    Config::default()
        .save_to_file(path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}

fn print_mismatch(comparison: &TableComparison) {
    for diagnostic in comparison.diagnostics("left", "right") {
        let severity_str = match diagnostic.severity {
            Severity::Error => "ERROR".red().bold(),
            Severity::Warn => "WARN".yellow().bold(),
            Severity::Info => "INFO".cyan(),
        };

        println!("  [{}] {}: {}", severity_str, diagnostic.code, diagnostic.message);
        if let Some(exp) = &diagnostic.expected {
            println!("    Expected: {}", exp);
        }
        if let Some(act) = &diagnostic.actual {
            println!("    Actual:   {}", act);
        }
    }
}

fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", title.bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();
}

fn print_rule() {
    println!();
    println!("{}", "=".repeat(60).bright_blue());
}
