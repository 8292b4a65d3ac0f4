#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use bump_build_nr::bump::{self, BumpOptions, BumpReport};
use bump_build_nr::cli::Args;
use bump_build_nr::logging;
use bump_build_nr::pattern::BuildNrPattern;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        error!("{e:#}");
        eprintln!("bump_build_nr: {e:#}");
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    logging::init(args.verbose, args.quiet, args.no_color);

    info!("= bump_build_nr is starting =");

    let path = args.target_path()?;
    if args.base_folder.is_some() {
        info!("== target path argument: {}", path.display());
    }
    bump::ensure_target(&path).context("failed finding path, please correct it")?;

    let pattern = BuildNrPattern::new(&args.identifier)
        .with_context(|| format!("invalid identifier {:?}", args.identifier))?;
    let options = BumpOptions {
        delta: args.delta,
        dry_run: args.dry_run,
    };
    debug!(
        "identifier={} delta={} dry_run={}",
        pattern.identifier(),
        options.delta,
        options.dry_run
    );

    let report = bump::process(&path, &pattern, &options)?;
    summarize(&report, pattern.identifier());
    Ok(())
}

fn summarize(report: &BumpReport, identifier: &str) {
    let path = report.path.display();
    if report.is_noop() {
        info!("{path}: no {identifier} declaration found, nothing to bump");
    } else if report.written {
        info!("✅  {path} was successfully updated");
    } else {
        info!(
            "{path}: dry run, {} bump(s) not written",
            report.bumps.len()
        );
    }
}
