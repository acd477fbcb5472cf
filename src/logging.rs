use std::fs::File;
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes the global logger, writing to `log_file`.
///
/// The terminal belongs to the game screen, so without a log file no logger
/// is installed and log macros are no-ops. When `verbose` is `true`, debug
/// messages are included; `RUST_LOG` overrides either default.
pub fn init(verbose: bool, log_file: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let file = File::create(path)?;
    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.target(Target::Pipe(Box::new(file)));

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
    Ok(())
}
