use flexi_logger::{
    Cleanup, Criterion, DeferredNow, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming,
};
use log::Record;

fn line_format(
    writer: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(
        writer,
        "[{}][{}][{}:{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.line().unwrap_or(0),
        &record.args()
    )
}

/// Starts the global logger. The returned handle must be kept alive for
/// file output to be flushed.
pub fn init_logger(log_level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_str(log_level)?;
    let logger = if cfg!(debug_assertions) {
        // stdout carries the event stream
        logger.log_to_stderr()
    } else {
        logger
            .log_to_file(FileSpec::default().directory("logs").basename("blink-shutter"))
            .rotate(
                Criterion::Size(3_000_000),
                Naming::Numbers,
                Cleanup::KeepLogFiles(15),
            )
    };
    logger.format(line_format).start()
}
