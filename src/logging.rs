// src/logging.rs - tracing setup shared by the binaries
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Daily rolling file in `log_dir` named `<file_prefix>.YYYY-MM-DD`, plus an
/// optional console layer. The terminal dashboard passes `console = false`
/// because stdout belongs to the UI.
pub fn init_logging(log_dir: &str, file_prefix: &str, console: bool) -> std::io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, file_prefix);

    let console_layer = console.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_level(true)
            .compact()
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_target(true)
                .with_level(true)
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Ok(())
}

/// Console-only subscriber on stderr for one-shot CLI commands, keeping stdout
/// free for their output. Returns false if a global subscriber already exists.
pub fn init_console_logging() -> bool {
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logging_installs_once() {
        init_console_logging();
        assert!(!init_console_logging());
        tracing::info!("🧪 console subscriber active");
    }
}
