//! Command implementations, one module per subcommand.

pub mod crop;
pub mod detect;
pub mod pivot;
