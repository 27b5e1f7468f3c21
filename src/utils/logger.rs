use flexi_logger::{DeferredNow, FlexiLoggerError, Logger, LoggerHandle};
use log::Record;
use std::io::Write;

fn line_format(
    writer: &mut dyn Write,
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

/// Starts stdout logging with a `log`-style filter such as `info` or
/// `grid_stress=debug`
///
/// Keep the returned handle alive for the lifetime of the program.
pub fn init_logger(log_level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(log_level)?
        .log_to_stdout()
        .format(line_format)
        .start()
}
