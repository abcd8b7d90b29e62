//! Template substitution for log lines and log file names
//!
//! Templates recognise three placeholders: `%D%` (date), `%L%` (level) and
//! `%M%` (message). Unknown placeholders stay as literal text.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::config::LoggerConfig;
use crate::error::{LogError, Result};
use crate::level::Level;
use crate::message::Message;

const DATE: &str = "%D%";
const LEVEL: &str = "%L%";
const MESSAGE: &str = "%M%";

/// Render `now` with a strftime format string
pub fn render_date(now: &DateTime<Local>, format: &str) -> Result<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(LogError::DateFormat(format.to_string()));
    }

    let mut out = String::new();
    write!(out, "{}", now.format_with_items(items.into_iter()))
        .map_err(|_| LogError::DateFormat(format.to_string()))?;
    Ok(out)
}

/// Format a log line (without line terminator) using the current time
pub fn format_message(config: &LoggerConfig, message: &Message, level: Level) -> Result<String> {
    format_message_at(config, message, level, &Local::now())
}

/// Format a log line for a fixed point in time
pub fn format_message_at(
    config: &LoggerConfig,
    message: &Message,
    level: Level,
    now: &DateTime<Local>,
) -> Result<String> {
    let date = render_date(now, &config.message_date_format)?;
    let body = message.render(config.collapse_structured)?;

    Ok(substitute(
        &config.message_template,
        &[(DATE, &date), (LEVEL, level.label()), (MESSAGE, &body)],
    ))
}

/// Path of today's log file
pub fn format_log_file_path(config: &LoggerConfig) -> Result<PathBuf> {
    format_log_file_path_at(config, &Local::now())
}

/// Path of the log file for a fixed point in time
pub fn format_log_file_path_at(config: &LoggerConfig, now: &DateTime<Local>) -> Result<PathBuf> {
    let date = render_date(now, &config.file_date_format)?;
    let name = substitute(&config.file_name_template, &[(DATE, &date)]);
    Ok(config.log_dir.join(name))
}

/// Replace placeholders in a single left-to-right pass
///
/// Replacement text is never rescanned, so a message containing `%L%` is
/// written verbatim.
fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
