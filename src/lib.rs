#![forbid(unsafe_code)]
//! bump_build_nr — increments the hard-coded build number in a version source file.

pub mod bump;
pub mod cli;
pub mod logging;
pub mod pattern;
