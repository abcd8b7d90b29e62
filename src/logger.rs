//! Logger service object
//!
//! Owns the configuration, the pending buffer, the timer and any active output
//! capture. Buffered entries are written by [`Logger::flush`], which also runs
//! when the logger is dropped.

use crate::buffer::PendingBuffer;
use crate::capture::OutputCapture;
use crate::config::{ConfigUpdate, LoggerConfig};
use crate::error::{LogError, Result};
use crate::format;
use crate::level::Level;
use crate::message::Message;
use crate::timer::Timer;
use crate::writer::{self, WriteMode};

/// What a call to [`Logger::log`] did with the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Written to the log file during the call
    Written,
    /// Held in the pending buffer until the next flush
    Buffered,
}

/// File logger with buffered or immediate delivery
#[derive(Debug, Default)]
pub struct Logger {
    config: LoggerConfig,
    pending: PendingBuffer,
    timer: Timer,
    capture: Option<OutputCapture>,
}

macro_rules! severity_methods {
    ($($(#[$doc:meta])* $name:ident => $level:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self, message: impl Into<Message>) -> Result<Delivery> {
                self.log(message, Level::$level)
            }
        )*
    };
}

impl Logger {
    /// Create a logger with the given configuration
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            pending: PendingBuffer::new(),
            timer: Timer::new(),
            capture: None,
        }
    }

    /// Merge a partial update into the current configuration
    pub fn configure(&mut self, update: ConfigUpdate) {
        self.config.merge(update);
    }

    /// Current configuration
    pub fn configuration(&self) -> &LoggerConfig {
        &self.config
    }

    /// Entries waiting for the next flush
    pub fn pending(&self) -> &PendingBuffer {
        &self.pending
    }

    /// Format and deliver a message at the given level
    ///
    /// In immediate-write mode the entry is written before returning, otherwise
    /// it is buffered until [`Logger::flush`].
    pub fn log(&mut self, message: impl Into<Message>, level: Level) -> Result<Delivery> {
        let mut entry = format::format_message(&self.config, &message.into(), level)?;
        entry.push('\n');

        if self.config.immediate_write {
            self.write(Some(&entry))?;
            Ok(Delivery::Written)
        } else {
            self.pending.push(entry);
            Ok(Delivery::Buffered)
        }
    }

    /// Log at a level chosen by name, e.g. `"error"`
    ///
    /// Unknown names fail with [`LogError::UnknownSeverity`] and write nothing.
    pub fn call(&mut self, severity: &str, message: impl Into<Message>) -> Result<Delivery> {
        let level: Level = severity.parse()?;
        self.log(message, level)
    }

    severity_methods! {
        /// Log at [`Level::Emergency`]
        emergency => Emergency,
        /// Log at [`Level::Alert`]
        alert => Alert,
        /// Log at [`Level::Critical`]
        critical => Critical,
        /// Log at [`Level::Error`]
        error => Error,
        /// Log at [`Level::Warning`]
        warning => Warning,
        /// Log at [`Level::Notice`]
        notice => Notice,
        /// Log at [`Level::Info`]
        info => Info,
        /// Log at [`Level::Debug`]
        debug => Debug,
    }

    /// Persist an explicit message, or the pending buffer when `message` is `None`
    ///
    /// Writing the buffer is skipped when both overwrite and immediate-write are
    /// enabled, since every entry has already reached the file. Nothing to write
    /// is a no-op. The buffer itself is left untouched; see [`Logger::flush`].
    pub fn write(&self, message: Option<&str>) -> Result<()> {
        let data = match message {
            Some(message) => message.to_string(),
            None if self.buffer_suppressed() => String::new(),
            None => self.pending.contents(),
        };

        if data.is_empty() {
            return Ok(());
        }

        let path = format::format_log_file_path(&self.config)?;
        let mode = if self.config.overwrite_file {
            WriteMode::Overwrite
        } else {
            WriteMode::Append
        };
        writer::write_locked(&path, &data, mode)
    }

    /// Overwrite plus immediate-write means the file already holds the latest entry
    fn buffer_suppressed(&self) -> bool {
        self.config.overwrite_file && self.config.immediate_write
    }

    /// Write the pending buffer and clear it
    pub fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let count = self.pending.len();
        if self.buffer_suppressed() {
            self.pending.clear();
            tracing::debug!("Discarded {} buffered log entries in overwrite mode", count);
            return Ok(());
        }

        let result = self.write(None);
        self.pending.clear();
        result?;

        tracing::debug!("Flushed {} buffered log entries", count);
        Ok(())
    }

    /// Start the elapsed-time timer
    pub fn time_start(&mut self) {
        self.timer.start();
    }

    /// Seconds since [`Logger::time_start`], formatted with two decimals
    pub fn time_end(&self) -> String {
        self.timer.end()
    }

    /// Begin capturing standard output
    pub fn ob_start(&mut self) -> Result<()> {
        if self.capture.is_some() {
            return Err(LogError::CaptureActive);
        }
        self.capture = Some(OutputCapture::start()?);
        Ok(())
    }

    /// Stop capturing and log the captured output at [`Level::Info`]
    pub fn ob_end(&mut self) -> Result<Delivery> {
        self.ob_end_with_headers(std::iter::empty::<(&str, &str)>())
    }

    /// Stop capturing, echo `Name: Value` header lines to stdout, then log
    /// the captured output at [`Level::Info`]
    ///
    /// Headers are printed only, never written to the log file.
    pub fn ob_end_with_headers<I, K, V>(&mut self, headers: I) -> Result<Delivery>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let capture = self.capture.take().ok_or(LogError::CaptureInactive)?;
        let captured = capture.finish()?;

        echo_headers(headers)?;

        self.log(format!("\n{}", captured), Level::Info)
    }
}

fn echo_headers<I, K, V>(headers: I) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    use std::io::Write;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (name, value) in headers {
        writeln!(out, "{}: {}", name.as_ref(), value.as_ref()).map_err(LogError::Capture)?;
    }
    out.flush().map_err(LogError::Capture)
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::error!("Failed to flush log buffer on drop: {}", e);
        }
    }
}
