use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "jira-activity-report",
    version,
    about = "Run Jira issue reports: console summary + CSV export",
    long_about = None
)]
pub struct Cli {
  /// Report to run (see --list for available names)
  #[arg(long)]
  pub report: Option<String>,

  /// List available reports and exit
  #[arg(long)]
  pub list: bool,

  /// Path to the configuration file
  #[arg(long, default_value = "config.toml")]
  pub config: PathBuf,

  /// Directory to write CSV exports into
  #[arg(long, default_value = "reports")]
  pub out: PathBuf,

  /// Maximum number of issues to request (single page, no pagination)
  #[arg(long, default_value_t = 1000)]
  pub max_results: u32,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant for date-relative filters (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug)]
pub struct RunConfig {
  pub report: String,
  pub config_path: PathBuf,
  pub out_dir: PathBuf,
  pub max_results: u32,
  pub now_override: Option<String>,
}

pub fn normalize(cli: Cli) -> Result<RunConfig> {
  let report = match cli.report {
    Some(name) => name,
    None => bail!("Provide --report <name>, or --list to see the available reports"),
  };

  if cli.max_results == 0 {
    bail!("--max-results must be at least 1");
  }

  Ok(RunConfig {
    report,
    config_path: cli.config,
    out_dir: cli.out,
    max_results: cli.max_results,
    now_override: cli.now_override,
  })
}

/// Render a section-1 man page for this CLI. Returns the troff content.
pub fn render_man_page() -> Result<String> {
  let cmd = Cli::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
