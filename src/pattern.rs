//! Build-number declaration matching.
//!
//! A [`BuildNrPattern`] carries everything the matcher needs (compiled regex,
//! capture group name, accepted value range). It is built once by the caller
//! and passed by reference, so there is no process-wide pattern state.

use regex::Regex;
use tracing::{info, warn};

/// Declaration name looked for when none is given.
pub const DEFAULT_IDENTIFIER: &str = "BUILD_NR";

/// Values at or below this are not treated as build numbers.
pub const MIN_EXCLUSIVE: u64 = 0;
/// Values at or above this are not treated as build numbers.
pub const MAX_EXCLUSIVE: u64 = 6_535_600;

const CAPTURE: &str = "build_nr";

/// Digit span of a build number found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildNrMatch {
    /// Byte offset of the first digit.
    pub start: usize,
    /// Byte offset one past the last digit.
    pub end: usize,
    /// Parsed value, `None` when the digit run does not fit in a `u64`.
    pub value: Option<u64>,
}

impl BuildNrMatch {
    /// Whether the captured value lies strictly inside the accepted range.
    pub fn is_candidate(&self) -> bool {
        matches!(self.value, Some(v) if v > MIN_EXCLUSIVE && v < MAX_EXCLUSIVE)
    }
}

/// A single bump applied to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bump {
    pub old: u64,
    pub new: i64,
}

impl Bump {
    pub(crate) fn log(&self) {
        info!("found and bumped build nr from {} to {}", self.old, self.new);
    }
}

#[derive(Debug, Clone)]
pub struct BuildNrPattern {
    identifier: String,
    regex: Regex,
}

impl BuildNrPattern {
    /// Build the matcher for a declaration named `identifier`.
    ///
    /// Up to 40 arbitrary characters may precede the identifier, so prefixed
    /// names such as `APP_BUILD_NR` and modifiers like `public static let` are
    /// accepted. An optional `: Type` annotation may sit between the name and
    /// the `=`.
    pub fn new(identifier: &str) -> Result<Self, regex::Error> {
        let source = format!(
            r"\b.{{0,40}}{ident}\s{{0,2}}(?::\s{{0,2}}\w+\s{{0,2}})?=\s{{0,2}}(?P<{cap}>[0-9]+)\b",
            ident = regex::escape(identifier),
            cap = CAPTURE,
        );
        Ok(Self {
            identifier: identifier.to_string(),
            regex: Regex::new(&source)?,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Locate the build-number declaration on `line`.
    ///
    /// The prefix is greedy, so with two declarations within reach of the
    /// same start the later one is captured. Only one capture is returned.
    pub fn find(&self, line: &str) -> Option<BuildNrMatch> {
        let caps = self.regex.captures(line)?;
        let digits = caps.name(CAPTURE)?;
        Some(BuildNrMatch {
            start: digits.start(),
            end: digits.end(),
            value: digits.as_str().parse().ok(),
        })
    }

    /// Apply `delta` to the build number on `line`, if there is one in range.
    ///
    /// Returns the line to write and the bump that was applied. Lines without
    /// a candidate come back unchanged with `None`.
    pub fn bump_line(&self, line: &str, delta: i64) -> (String, Option<Bump>) {
        let Some(m) = self.find(line) else {
            return (line.to_string(), None);
        };
        let Some(old) = m.value.filter(|_| m.is_candidate()) else {
            return (line.to_string(), None);
        };
        // old < MAX_EXCLUSIVE, so the cast is lossless.
        let Some(new) = (old as i64).checked_add(delta) else {
            warn!(
                "{} = {old} cannot be bumped by {delta} without overflow, left as is",
                self.identifier
            );
            return (line.to_string(), None);
        };

        let mut out = String::with_capacity(line.len() + 2);
        out.push_str(&line[..m.start]);
        out.push_str(&new.to_string());
        out.push_str(&line[m.end..]);
        (out, Some(Bump { old, new }))
    }

    /// Bump the build number on `line` and log the change.
    pub fn match_and_increment(&self, line: &str, delta: i64) -> String {
        let (out, bump) = self.bump_line(line, delta);
        if let Some(bump) = bump {
            bump.log();
        }
        out
    }
}
