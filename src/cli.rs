use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::pattern::DEFAULT_IDENTIFIER;

/// Target used when `--base_folder` is absent, relative to the executable's directory.
pub const DEFAULT_TARGET: &str = "../Version.swift";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "bump_build_nr",
    version,
    about = "Bump the hard-coded build number in a version source file",
    after_help = "Examples:\n  bump_build_nr\n  bump_build_nr -b Sources/App/Version.swift\n  bump_build_nr -b Version.swift --dry-run -v"
)]
pub struct Args {
    /// Version file to update (default: ../Version.swift next to the executable)
    #[arg(short = 'b', long = "base_folder", value_name = "PATH")]
    pub base_folder: Option<String>,

    /// Name of the build number declaration
    #[arg(long = "identifier", default_value = DEFAULT_IDENTIFIER)]
    pub identifier: String,

    /// Amount to add to the build number
    #[arg(short = 'd', long = "delta", default_value_t = 1, allow_negative_numbers = true)]
    pub delta: i64,

    /// Report the bump without writing the file
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.quiet {
            self.verbose = 0;
        }
        // An empty -b means "use the default".
        if self.base_folder.as_deref().is_some_and(str::is_empty) {
            self.base_folder = None;
        }
        // Respect NO_COLOR env var
        if std::env::var_os("NO_COLOR").is_some() {
            self.no_color = true;
        }
        self
    }

    /// Resolve the file to update.
    pub fn target_path(&self) -> Result<PathBuf> {
        match &self.base_folder {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_target(),
        }
    }
}

/// `../Version.swift` relative to the directory holding the running executable.
pub fn default_target() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate the running executable")?;
    let dir = exe
        .parent()
        .context("executable path has no parent directory")?;
    Ok(dir.join(DEFAULT_TARGET))
}
