//! qdelay-sim entry point: CLI wiring, config loading, and result printing.

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;

use qdelay_sim::cli::Cli;
use qdelay_sim::config::SweepConfig;
use qdelay_sim::io::export::{export_csv, export_json};
use qdelay_sim::logging::init_logging;
use qdelay_sim::runner::run_sweep_file;

fn load_config(cli: &Cli) -> Result<SweepConfig> {
    // --config first, then flag overrides on top
    let mut config = match &cli.config {
        Some(path) => SweepConfig::from_toml_file(path)?,
        None => SweepConfig::reference(),
    };
    cli.apply_to(&mut config);

    let errors = config.validate();
    if !errors.is_empty() {
        let msgs: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!(msgs.join("\n"));
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let outcome = run_sweep_file(&config)?;

    for r in &outcome.results {
        println!("{r}");
    }
    println!("\n{}", outcome.report);

    if let Some(path) = &cli.csv_out {
        export_csv(&outcome.results, path)
            .with_context(|| format!("exporting: cannot write CSV \"{}\"", path.display()))?;
        eprintln!("Sweep written to {}", path.display());
    }
    if let Some(path) = &cli.json_out {
        export_json(&outcome.results, path)
            .with_context(|| format!("exporting: cannot write JSON \"{}\"", path.display()))?;
        eprintln!("Sweep written to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
