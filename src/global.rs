//! Process-wide logger
//!
//! A single [`Logger`] created on first use and shared by the free functions
//! in this module. The first buffered entry registers an exit hook that
//! flushes the buffer when the process terminates normally; hosts that exit
//! abnormally or run where no hook is available call [`shutdown`] themselves.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use crate::config::{ConfigUpdate, LoggerConfig};
use crate::error::Result;
use crate::level::Level;
use crate::logger::{Delivery, Logger};
use crate::message::Message;

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

/// Set once the exit hook has been registered
static EXIT_HOOK_REGISTERED: AtomicBool = AtomicBool::new(false);

fn instance() -> MutexGuard<'static, Logger> {
    LOGGER
        .get_or_init(|| Mutex::new(Logger::default()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Merge a partial update into the process-wide configuration
pub fn configure(update: ConfigUpdate) {
    if update.is_empty() {
        return;
    }
    instance().configure(update);
}

/// Snapshot of the process-wide configuration
pub fn configuration() -> LoggerConfig {
    instance().configuration().clone()
}

/// Format and deliver a message at the given level
pub fn log(message: impl Into<Message>, level: Level) -> Result<Delivery> {
    let delivery = instance().log(message, level)?;
    if delivery == Delivery::Buffered {
        register_exit_hook();
    }
    Ok(delivery)
}

/// Log at a level chosen by name; unknown names fail and write nothing
pub fn call(severity: &str, message: impl Into<Message>) -> Result<Delivery> {
    let level: Level = severity.parse()?;
    log(message, level)
}

macro_rules! severity_fns {
    ($($name:ident => $level:ident),* $(,)?) => {
        $(
            #[doc = concat!("Log at [`Level::", stringify!($level), "`]")]
            pub fn $name(message: impl Into<Message>) -> Result<Delivery> {
                log(message, Level::$level)
            }
        )*
    };
}

severity_fns! {
    emergency => Emergency,
    alert => Alert,
    critical => Critical,
    error => Error,
    warning => Warning,
    notice => Notice,
    info => Info,
    debug => Debug,
}

/// Persist an explicit message, or the pending buffer when `message` is `None`
pub fn write(message: Option<&str>) -> Result<()> {
    instance().write(message)
}

/// Flush buffered entries to the log file
///
/// This is what the exit hook runs. Calling it earlier is harmless; the buffer
/// is cleared after each flush so nothing is written twice.
pub fn shutdown() -> Result<()> {
    instance().flush()
}

/// Start the process-wide timer
pub fn time_start() {
    instance().time_start();
}

/// Seconds since [`time_start`], formatted with two decimals
pub fn time_end() -> String {
    instance().time_end()
}

/// Begin capturing standard output
pub fn ob_start() -> Result<()> {
    instance().ob_start()
}

/// Stop capturing and log the captured output
pub fn ob_end() -> Result<Delivery> {
    ob_end_with_headers(std::iter::empty::<(&str, &str)>())
}

/// Stop capturing, echo header lines to stdout, and log the captured output
pub fn ob_end_with_headers<I, K, V>(headers: I) -> Result<Delivery>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let delivery = instance().ob_end_with_headers(headers)?;
    if delivery == Delivery::Buffered {
        register_exit_hook();
    }
    Ok(delivery)
}

/// Check whether the exit hook has been registered in this process
pub fn exit_hook_registered() -> bool {
    EXIT_HOOK_REGISTERED.load(Ordering::SeqCst)
}

fn register_exit_hook() {
    if EXIT_HOOK_REGISTERED.swap(true, Ordering::SeqCst) {
        return;
    }

    #[cfg(unix)]
    {
        if unsafe { libc::atexit(flush_at_exit) } == 0 {
            tracing::debug!("Registered log flush exit hook");
        } else {
            tracing::warn!("Could not register exit hook; call stamplog::shutdown() before exiting");
        }
    }

    #[cfg(not(unix))]
    tracing::warn!("No exit hook on this platform; call stamplog::shutdown() before exiting");
}

#[cfg(unix)]
extern "C" fn flush_at_exit() {
    if let Err(e) = shutdown() {
        tracing::error!("Failed to flush log buffer at exit: {}", e);
        eprintln!("stamplog: failed to flush log buffer at exit: {}", e);
    }
}
