#![forbid(unsafe_code)]
//! Writes shell completions and a man page for `bump_build_nr`.
//!
//! Usage: `generate-assets [OUT_DIR]` (default `dist`).

use bump_build_nr::cli::Args;
use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate_to, Shell};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

const BIN_NAME: &str = "bump_build_nr";

fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist"));
    let completions_dir = out_dir.join("completions");
    let man_dir = out_dir.join("man");

    fs::create_dir_all(&completions_dir)?;
    fs::create_dir_all(&man_dir)?;

    for shell in Shell::value_variants() {
        let path = generate_to(*shell, &mut Args::command(), BIN_NAME, &completions_dir)?;
        eprintln!("  {}", path.display());
    }

    let mut buffer = Vec::new();
    Man::new(Args::command()).render(&mut buffer)?;
    let man_path = man_dir.join(format!("{BIN_NAME}.1"));
    fs::write(&man_path, buffer)?;
    eprintln!("  {}", man_path.display());

    Ok(())
}
