use std::io::Write;

use log::{LevelFilter, SetLoggerError};

/// Initializes the logger for the command line tool.
///
/// Reads `RUST_LOG` first so per-module filters keep working, then applies
/// `level` to this crate. Records go to stderr; stdout carries only the
/// response.
///
/// Uses `try_init`, so calling it twice returns an error instead of panicking.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_module("httpget", level);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder.try_init()
}
