//! Library side of the `gastos` command: configuration files and logging.

pub mod config;
pub mod logging;
