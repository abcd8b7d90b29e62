//! Stamplog - process-wide file logger
//!
//! Formats messages with configurable templates and writes them to one
//! date-stamped file per day, either immediately or in a single flush when the
//! process ends. Also provides an elapsed-time timer and stdout capture.
//!
//! ```no_run
//! use stamplog::ConfigUpdate;
//!
//! stamplog::configure(ConfigUpdate::new().log_dir("/var/log/myapp"));
//! stamplog::info("service started")?;
//! stamplog::error(serde_json::json!({"code": 500, "path": "/api"}))?;
//! # Ok::<(), stamplog::LogError>(())
//! ```

pub mod buffer;
pub mod capture;
pub mod config;
mod error;
pub mod format;
pub mod global;
pub mod level;
pub mod logger;
pub mod message;
pub mod timer;
pub mod writer;

pub use config::{ConfigUpdate, LoggerConfig};
pub use error::{LogError, Result};
pub use global::{
    alert, call, configuration, configure, critical, debug, emergency, error, info, log, notice,
    ob_end, ob_end_with_headers, ob_start, shutdown, time_end, time_start, warning, write,
};
pub use level::Level;
pub use logger::{Delivery, Logger};
pub use message::Message;
