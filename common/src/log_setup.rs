use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

/// Starts the global logger.
///
/// `filter` is a flexi_logger filter such as `"info"` or
/// `"info, plate_reader=debug"`; `RUST_LOG` takes precedence when set.
/// Everything goes to stdout, warnings and errors are duplicated to stderr,
/// and a size-rotated copy is kept under `logs/`.
///
/// The returned handle must be kept alive for the lifetime of the program.
pub fn setup_logging(filter: &str, basename: &str) -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(filter)?
        .log_to_file(
            FileSpec::default()
                .directory("logs")
                .basename(basename)
                .suppress_timestamp(),
        )
        .duplicate_to_stderr(Duplicate::Warn)
        .duplicate_to_stdout(Duplicate::All)
        .rotate(
            Criterion::Size(1024 * 1024), //1MB
            Naming::Timestamps,
            Cleanup::KeepLogFiles(5),
        )
        .start()?;

    Ok(handle)
}
