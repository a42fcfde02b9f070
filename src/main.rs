use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod dates;
mod export;
mod ext;
mod fields;
mod jira;
mod pipeline;
mod report;
mod reports;

use crate::cli::{normalize, Cli};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = cli::render_man_page()?;
    print!("{}", page);
    return Ok(());
  }

  if cli.list {
    println!("Available reports:");
    for (name, about) in reports::catalog() {
      println!("  {:<16} {}", name, about);
    }
    return Ok(());
  }

  // Phase 1: normalize CLI
  let run = normalize(cli)?;

  // Phase 2: configuration; the one fatal startup condition
  let cfg = match config::load(&run.config_path) {
    Ok(cfg) => cfg,
    Err(err) => {
      eprintln!("[config] {:#}", err);
      std::process::exit(1);
    }
  };

  // Phase 3: resolve the report and run the pipeline
  let now = dates::parse_now(run.now_override.as_deref());

  let Some(report) = reports::by_name(&run.report, &cfg, now) else {
    anyhow::bail!("Unknown report '{}'; use --list to see the available names", run.report);
  };

  let client = jira::SearchClient::new(&cfg);

  pipeline::run_report(report.as_ref(), &client, &run.out_dir, run.max_results)
}
