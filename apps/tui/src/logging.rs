use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Routes tracing output to a file so it never draws over the terminal UI.
/// `RUST_LOG` takes precedence over the debug flag.
pub fn init_logging(log_file: &Path, debug: bool) -> color_eyre::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let default_directive = if debug {
        "rag_query_tui=debug,info"
    } else {
        "rag_query_tui=info,warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(env_filter)
        .try_init()?;

    Ok(())
}
