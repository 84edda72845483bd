//! Command implementations behind the `cambio` binary.

pub mod commands;

pub use commands::{PostArgs, build_input, render_balances, render_transactions};
