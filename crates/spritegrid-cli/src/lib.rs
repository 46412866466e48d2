//! spritegrid CLI - sprite-sheet analysis from the command line.
//!
//! This crate wraps `spritegrid-core` behind three subcommands: `detect`
//! (grid detection with optional cached-result reuse), `crop`
//! (alpha-boundary cropping with pivot remapping) and `pivot`
//! (center-of-mass pivot of a sheet or sub-region). PNG is the only image
//! format spoken at this boundary; the core itself is format-free.

pub mod cli_args;
pub mod commands;
pub mod png_io;
