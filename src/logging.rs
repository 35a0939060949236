//! Logging
//!
//! Routes `tracing` events to the browser console. Each formatted event is
//! buffered and handed to the `console` method matching its level, so the
//! browser's own level filter keeps working.

use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Fallback directive when the configured one does not parse
const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Calling it again is a no-op.
pub fn init_logging(directive: &str) {
    let (filter, rejected) = match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_DIRECTIVE), Some(e)),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(MakeConsoleWriter)
        .with_ansi(false)
        .with_target(true)
        .without_time()
        .try_init()
        .is_ok();

    if let Some(e) = rejected {
        tracing::warn!("Invalid log directive {:?}: {}", directive, e);
    }
    if installed {
        tracing::debug!("Console logging initialized ({})", directive);
    }
}

/// `MakeWriter` producing one console writer per event
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers a single formatted event and flushes it to the console on drop
#[derive(Debug)]
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    /// Level of the event being written
    pub fn level(&self) -> Level {
        self.level
    }

    fn take_line(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let bytes = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&bytes).trim_end().to_string();
        Some(line)
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if let Some(line) = self.take_line() {
            emit(self.level, &line);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use web_sys::console;

    let value = wasm_bindgen::JsValue::from_str(line);
    if level == Level::ERROR {
        console::error_1(&value);
    } else if level == Level::WARN {
        console::warn_1(&value);
    } else if level == Level::INFO {
        console::info_1(&value);
    } else {
        console::debug_1(&value);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_buffers_whole_event() {
        let mut writer = ConsoleWriter::new(Level::WARN);
        write!(writer, "WARN plant_dashboard: ").unwrap();
        writeln!(writer, "Auto-refresh failed").unwrap();

        assert_eq!(writer.level(), Level::WARN);
        assert_eq!(
            writer.take_line().as_deref(),
            Some("WARN plant_dashboard: Auto-refresh failed")
        );
        assert_eq!(writer.take_line(), None);
    }

    #[test]
    fn test_default_writer_level() {
        let make = MakeConsoleWriter;
        assert_eq!(make.make_writer().level(), Level::INFO);
    }

    #[test]
    fn test_init_is_idempotent() {
        init_logging("debug");
        init_logging("not a [valid directive");
        tracing::info!("still logging");
    }
}
