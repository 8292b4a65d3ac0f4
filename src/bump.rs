//! In-place rewrite of a version file through a temporary file and an atomic rename.

use crate::pattern::{BuildNrPattern, Bump};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

#[derive(Debug, thiserror::Error)]
pub enum BumpError {
    /// The target does not exist or is not a regular file.
    #[error("{}: no such file", path.display())]
    PathNotFound { path: PathBuf },
    #[error("{}: failed to read", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{}: failed to create temporary file", dir.display())]
    TempFile { dir: PathBuf, source: io::Error },
    #[error("{}: failed to write replacement", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("{}: failed to replace original", path.display())]
    Persist { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BumpOptions {
    /// Amount added to every build number found.
    pub delta: i64,
    /// Run the full pass but leave the original file alone.
    pub dry_run: bool,
}

impl Default for BumpOptions {
    fn default() -> Self {
        Self {
            delta: 1,
            dry_run: false,
        }
    }
}

/// A bump located at a 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBump {
    pub line_number: usize,
    pub old: u64,
    pub new: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpReport {
    pub path: PathBuf,
    /// Number of lines read from the original.
    pub lines: usize,
    pub bumps: Vec<LineBump>,
    /// Whether the original was replaced.
    pub written: bool,
}

impl BumpReport {
    pub fn is_noop(&self) -> bool {
        self.bumps.is_empty()
    }
}

/// Fail with [`BumpError::PathNotFound`] unless `path` is an existing regular file.
pub fn ensure_target(path: &Path) -> Result<(), BumpError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(BumpError::PathNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Copy `reader` to `writer` line by line, bumping build numbers on the way.
///
/// Line terminators are carried through untouched, including a missing final
/// newline. Reader and writer errors are returned as-is; the caller decides
/// which side failed.
pub fn rewrite<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    pattern: &BuildNrPattern,
    delta: i64,
) -> Result<(usize, Vec<LineBump>), RewriteError> {
    let mut line = String::new();
    let mut lines = 0;
    let mut bumps = Vec::new();

    loop {
        line.clear();
        let n = reader.read_line(&mut line).map_err(RewriteError::Read)?;
        if n == 0 {
            break;
        }
        lines += 1;

        let (out, bump) = pattern.bump_line(&line, delta);
        if let Some(bump) = bump {
            bump.log();
            bumps.push(LineBump::at(lines, bump));
        } else {
            trace!(line = lines, "unchanged");
        }
        writer.write_all(out.as_bytes()).map_err(RewriteError::Write)?;
    }

    Ok((lines, bumps))
}

impl LineBump {
    fn at(line_number: usize, Bump { old, new }: Bump) -> Self {
        Self {
            line_number,
            old,
            new,
        }
    }
}

/// Which side of [`rewrite`] failed.
#[derive(Debug)]
pub enum RewriteError {
    Read(io::Error),
    Write(io::Error),
}

/// Bump the build number in `path`, replacing the file atomically.
///
/// The replacement is written next to the original so the final rename stays
/// on one filesystem. On any error before the rename the temporary file is
/// removed and the original is left as it was.
pub fn process(
    path: &Path,
    pattern: &BuildNrPattern,
    options: &BumpOptions,
) -> Result<BumpReport, BumpError> {
    let source = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BumpError::PathNotFound {
            path: path.to_path_buf(),
        },
        _ => read_err(path, e),
    })?;
    let permissions = source
        .metadata()
        .map_err(|e| read_err(path, e))?
        .permissions();

    let dir = parent_dir(path);
    let tmp = NamedTempFile::new_in(&dir).map_err(|source| BumpError::TempFile {
        dir: dir.clone(),
        source,
    })?;
    debug!(tmp = %tmp.path().display(), "writing replacement");

    let mut out = BufWriter::new(tmp);
    let (lines, bumps) =
        rewrite(BufReader::new(source), &mut out, pattern, options.delta).map_err(|e| match e {
            RewriteError::Read(e) => read_err(path, e),
            RewriteError::Write(e) => write_err(path, e),
        })?;
    let tmp = out.into_inner().map_err(|e| write_err(path, e.into_error()))?;
    tmp.as_file().sync_all().map_err(|e| write_err(path, e))?;

    if options.dry_run {
        debug!("dry run, discarding {}", tmp.path().display());
        return Ok(BumpReport {
            path: path.to_path_buf(),
            lines,
            bumps,
            written: false,
        });
    }

    fs::set_permissions(tmp.path(), permissions).map_err(|e| write_err(path, e))?;
    tmp.persist(path).map_err(|e| BumpError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(BumpReport {
        path: path.to_path_buf(),
        lines,
        bumps,
        written: true,
    })
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn read_err(path: &Path, source: io::Error) -> BumpError {
    BumpError::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn write_err(path: &Path, source: io::Error) -> BumpError {
    BumpError::Write {
        path: path.to_path_buf(),
        source,
    }
}
