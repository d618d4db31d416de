mod config;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use config::Args;
use httpgen::{Discovered, discover, generate_batch, resolve_sources};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

/// Run the generator; returns how many requested interfaces produced no output.
fn run(args: &Args) -> Result<usize> {
    let config = args.generator_config()?;
    let files = resolve_sources(&args.patterns)?;
    let mut names: Vec<String> = Vec::with_capacity(args.interfaces.len());
    for name in &args.interfaces {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    let found = discover(&files, &names)?;
    let mut failed = names.len() - found.len();

    let decls: Vec<_> = found.iter().map(|d| d.decl.clone()).collect();
    for (outcome, Discovered { file, .. }) in generate_batch(&decls, &config).into_iter().zip(&found) {
        let artifacts = match outcome.result {
            Ok(artifacts) => artifacts,
            Err(err) => {
                error!("{err:#}");
                failed += 1;
                continue;
            }
        };
        let out_dir = match &args.output {
            Some(dir) => dir.as_path(),
            None => file.parent().unwrap_or(Path::new(".")),
        };
        match artifacts.write_to(out_dir, args.emit_plan) {
            Ok(paths) => {
                for path in paths {
                    info!(interface = %outcome.interface, path = %path.display(), "wrote");
                }
            }
            Err(err) => {
                error!(interface = %outcome.interface, "{err:#}");
                failed += 1;
            }
        }
    }
    Ok(failed)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.level);

    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!(failed, "some interfaces were not generated");
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
