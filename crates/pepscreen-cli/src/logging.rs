use crate::error::{CliError, Result};
use std::fs::File;
use std::path::Path;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self},
    prelude::*,
};

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber: compact stderr output, plus a plain-text
/// copy in `log_file` when one is given.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(stderr_layer);

    match log_file {
        Some(path) => {
            let file = File::create(path).map_err(CliError::Io)?;
            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_target(true);
            subscriber.with(file_layer).init();
        }
        None => subscriber.init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{debug, error, info, trace, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(9, false), LevelFilter::TRACE);
        assert_eq!(level_filter(2, true), LevelFilter::OFF);
    }

    #[test]
    #[serial]
    fn initialization_and_macros_work() {
        ensure_global_logger_is_set();

        error!(variant = "GLP1_variant_0001", "error event");
        warn!(requested = 10, available = 3, "warn event");
        info!("info event");
        debug!("debug event");
        trace!("trace event");
    }

    #[test]
    #[serial]
    fn file_layer_writes_structured_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("pepscreen.log");

        let file = File::create(&log_path).unwrap();
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true);
        let subscriber = tracing_subscriber::registry().with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            info!(accepted = 3, rejected = 0, "Variant generation complete.");
        });

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Variant generation complete."));
        assert!(content.contains("accepted=3"));
        assert!(content.contains("ThreadId"));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = setup_logging(0, false, Some(dir.path()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
