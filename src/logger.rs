use anyhow::Result;
use chrono::Local;
use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Console logger: timestamped, level-colored, with multi-line messages
/// aligned under the first line's header so grids stay readable.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs the console logger at the given level. Call once at startup.
pub fn init(level: LevelFilter) -> Result<()> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

fn colored_level(level: Level) -> ColoredString {
    let name = format!("{level:5}");
    match level {
        Level::Trace => name.white(),
        Level::Debug => name.cyan(),
        Level::Info => name.blue(),
        Level::Warn => name.yellow(),
        Level::Error => name.red(),
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let message = record.args().to_string();
        for (i, line) in message.lines().enumerate() {
            if i == 0 {
                println!("{timestamp} {}: {line}", colored_level(record.level()));
            } else {
                // continuation lines align under the message column
                println!("{:width$}  {line}", "", width = timestamp.len() + 6);
            }
        }
    }

    fn flush(&self) {}
}
