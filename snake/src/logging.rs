use crate::cli::Backend;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::File;
use std::path::Path;

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Set up env_logger. `RUST_LOG` wins over `-v`. The terminal backend owns
/// stderr's screen while a game runs, so without a log file it stays quiet.
pub fn init(
    verbose: u8,
    log_file: Option<&Path>,
    backend: Backend,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter(verbose)));
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None if backend == Backend::Terminal => {
            builder.filter_level(LevelFilter::Off);
        }
        None => {}
    }
    builder.try_init()?;
    Ok(())
}
