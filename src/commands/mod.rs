//! Command implementations, one module per subcommand.

pub mod notify;
pub mod release;
pub mod tag;
