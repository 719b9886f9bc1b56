//! Kernel log output, color-coded per level.
//!
//! Thin `log`-facade backend: messages are formatted with an ANSI color
//! chosen by severity and pushed through a console sink the board layer
//! registers at boot. The compile-time `LOG` environment variable picks the
//! maximum level, mirroring how the kernel build selects verbosity.

use alloc::format;
use log::{Level, LevelFilter, Log, Metadata, Record};
use spin::Once;

use crate::io::Console;

/// Installs the logger with `sink` as its output. Safe to call more than
/// once; later calls keep the first sink.
pub fn init(sink: &'static dyn Console) {
    LOGGER.sink.call_once(|| sink);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(match option_env!("LOG") {
            Some("ERROR") => LevelFilter::Error,
            Some("WARN") => LevelFilter::Warn,
            Some("INFO") => LevelFilter::Info,
            Some("DEBUG") => LevelFilter::Debug,
            Some("TRACE") => LevelFilter::Trace,
            _ => LevelFilter::Off,
        });
    }
}

struct GateLogger {
    sink: Once<&'static dyn Console>,
}

static LOGGER: GateLogger = GateLogger { sink: Once::new() };

impl Log for GateLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sink) = self.sink.get() {
            let line = format!(
                "\u{1B}[{}m[KERNEL][{:>5}] {}\u{1B}[0m\n",
                level_to_color_code(record.level()),
                record.level(),
                record.args()
            );
            sink.write_bytes(line.as_bytes());
        }
    }

    fn flush(&self) {}
}

fn level_to_color_code(level: Level) -> u8 {
    match level {
        Level::Error => 31, // Red
        Level::Warn => 93,  // BrightYellow
        Level::Info => 34,  // Blue
        Level::Debug => 32, // Green
        Level::Trace => 90, // BrightBlack
    }
}
