//! Binary entrypoint: read a Renovate NDJSON log, write an HTML (or JSON) report.
//!
//! After the report is written, one ReportSummary JSON line goes to stdout.
//! Logs go to stderr; any failure exits with status 1.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use renovate_report::{read_log, render, Config, Engine, ReportSummary};

#[derive(Parser)]
#[command(name = "renovate-report", version)]
#[command(about = "Parse Renovate debug logs and generate HTML reports")]
struct Cli {
  /// Path to the Renovate NDJSON debug log file
  input: PathBuf,

  /// Path for the output report
  #[arg(default_value = "renovate-report.html")]
  output: PathBuf,

  /// JSON config file (excluded_messages, noisy_top_n)
  #[arg(long, env = "RENOVATE_REPORT_CONFIG")]
  config: Option<PathBuf>,

  /// Additional error message to exclude (exact match, repeatable)
  #[arg(long = "exclude", value_name = "MSG")]
  exclude: Vec<String>,

  /// Number of repositories in the noisy-project view
  #[arg(long)]
  top: Option<usize>,

  /// Write the report data as JSON instead of HTML
  #[arg(long)]
  json: bool,
}

fn main() {
  if let Err(e) = run() {
    let _ = writeln!(io::stderr(), "renovate-report: {:#}", e);
    std::process::exit(1);
  }
}

fn run() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(EnvFilter::from_default_env().add_directive("renovate_report=info".parse()?))
    .init();

  let cli = Cli::parse();
  let config = load_config(&cli)?;
  debug!(?config, "effective config");

  let input = read_log(&cli.input).with_context(|| format!("{} failed!", cli.input.display()))?;
  let report = Engine::new(config).process(&input);
  let generated_at = Utc::now();

  if cli.json {
    let json = serde_json::to_vec_pretty(&report)?;
    fs::write(&cli.output, json).with_context(|| format!("write {}", cli.output.display()))?;
  } else {
    render::write_html(&cli.output, &report, generated_at)
      .with_context(|| format!("write {}", cli.output.display()))?;
  }

  let summary = ReportSummary::new(&report, cli.output.display().to_string(), generated_at.to_rfc3339());
  let mut out = io::stdout().lock();
  serde_json::to_writer(&mut out, &summary)?;
  writeln!(out)?;
  Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
  let mut config = match &cli.config {
    Some(path) => Config::from_file(path)?,
    None => Config::default(),
  };
  config.exclude(cli.exclude.iter().cloned());
  if let Some(top) = cli.top {
    config.noisy_top_n = top;
  }
  Ok(config)
}
