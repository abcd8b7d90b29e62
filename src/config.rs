//! Configuration management for the logger

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};

/// Logger configuration
///
/// Always complete: partial changes are applied with [`LoggerConfig::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Directory that receives the log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// File name template, `%D%` is replaced by the date (default: "log-%D%.log")
    #[serde(default = "default_file_name_template")]
    pub file_name_template: String,

    /// Message template: `%D%` date, `%L%` level, `%M%` message (default: "[%D%]: %L% - %M%")
    #[serde(default = "default_message_template")]
    pub message_template: String,

    /// Render structured messages on a single line
    #[serde(default)]
    pub collapse_structured: bool,

    /// Truncate the log file on each write instead of appending
    #[serde(default)]
    pub overwrite_file: bool,

    /// Write on every call instead of buffering until flush
    #[serde(default)]
    pub immediate_write: bool,

    /// strftime format for `%D%` in the file name (default: "%Y-%m-%d")
    #[serde(default = "default_file_date_format")]
    pub file_date_format: String,

    /// strftime format for `%D%` in messages (default: "%Y-%m-%d %H:%M:%S")
    #[serde(default = "default_message_date_format")]
    pub message_date_format: String,
}

fn default_file_name_template() -> String {
    "log-%D%.log".to_string()
}

fn default_message_template() -> String {
    "[%D%]: %L% - %M%".to_string()
}

fn default_file_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_message_date_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            file_name_template: default_file_name_template(),
            message_template: default_message_template(),
            collapse_structured: false,
            overwrite_file: false,
            immediate_write: false,
            file_date_format: default_file_date_format(),
            message_date_format: default_message_date_format(),
        }
    }
}

impl LoggerConfig {
    /// Apply a partial update, keeping every field it leaves unset
    pub fn merge(&mut self, update: ConfigUpdate) {
        let ConfigUpdate {
            log_dir,
            file_name_template,
            message_template,
            collapse_structured,
            overwrite_file,
            immediate_write,
            file_date_format,
            message_date_format,
        } = update;

        if let Some(v) = log_dir {
            self.log_dir = v;
        }
        if let Some(v) = file_name_template {
            self.file_name_template = v;
        }
        if let Some(v) = message_template {
            self.message_template = v;
        }
        if let Some(v) = collapse_structured {
            self.collapse_structured = v;
        }
        if let Some(v) = overwrite_file {
            self.overwrite_file = v;
        }
        if let Some(v) = immediate_write {
            self.immediate_write = v;
        }
        if let Some(v) = file_date_format {
            self.file_date_format = v;
        }
        if let Some(v) = message_date_format {
            self.message_date_format = v;
        }
    }

    /// Build a configuration from defaults plus a partial update
    pub fn with_update(update: ConfigUpdate) -> Self {
        let mut config = Self::default();
        config.merge(update);
        config
    }
}

/// Partial configuration; `None` fields leave the current value untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigUpdate {
    pub log_dir: Option<PathBuf>,
    pub file_name_template: Option<String>,
    pub message_template: Option<String>,
    pub collapse_structured: Option<bool>,
    pub overwrite_file: Option<bool>,
    pub immediate_write: Option<bool>,
    pub file_date_format: Option<String>,
    pub message_date_format: Option<String>,
}

impl ConfigUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn file_name_template(mut self, template: impl Into<String>) -> Self {
        self.file_name_template = Some(template.into());
        self
    }

    pub fn message_template(mut self, template: impl Into<String>) -> Self {
        self.message_template = Some(template.into());
        self
    }

    pub fn collapse_structured(mut self, enabled: bool) -> Self {
        self.collapse_structured = Some(enabled);
        self
    }

    pub fn overwrite_file(mut self, enabled: bool) -> Self {
        self.overwrite_file = Some(enabled);
        self
    }

    pub fn immediate_write(mut self, enabled: bool) -> Self {
        self.immediate_write = Some(enabled);
        self
    }

    pub fn file_date_format(mut self, format: impl Into<String>) -> Self {
        self.file_date_format = Some(format.into());
        self
    }

    pub fn message_date_format(mut self, format: impl Into<String>) -> Self {
        self.message_date_format = Some(format.into());
        self
    }

    /// Check whether the update sets nothing
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Parse a partial configuration from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a partial configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| LogError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Default log directory: `log` next to the running executable
///
/// Falls back to `log` under the current directory, then to a relative `log`.
pub fn default_log_dir() -> PathBuf {
    try_default_log_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine executable or working directory, using relative log dir");
        PathBuf::from("log")
    })
}

/// Try to resolve the default log directory, returning None if no base is available
pub fn try_default_log_dir() -> Option<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));

    let base = match exe_dir {
        Some(dir) => dir,
        None => {
            tracing::warn!("Could not locate executable, using working directory for logs");
            std::env::current_dir().ok()?
        }
    };

    Some(base.join("log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.file_name_template, "log-%D%.log");
        assert_eq!(config.message_template, "[%D%]: %L% - %M%");
        assert_eq!(config.file_date_format, "%Y-%m-%d");
        assert_eq!(config.message_date_format, "%Y-%m-%d %H:%M:%S");
        assert!(!config.collapse_structured);
        assert!(!config.overwrite_file);
        assert!(!config.immediate_write);
        assert!(config.log_dir.ends_with("log"));
    }

    #[test]
    fn test_merge_preserves_unset_fields() {
        let mut config = LoggerConfig::default();
        config.merge(ConfigUpdate::new().immediate_write(true));
        config.merge(ConfigUpdate::new().message_template("%L%: %M%"));

        assert!(config.immediate_write);
        assert_eq!(config.message_template, "%L%: %M%");
        assert_eq!(config.file_name_template, "log-%D%.log");
    }

    #[test]
    fn test_merge_empty_update_is_noop() {
        let mut config = LoggerConfig::default();
        let before = config.clone();
        config.merge(ConfigUpdate::new());
        assert_eq!(config, before);
        assert!(ConfigUpdate::new().is_empty());
    }

    #[test]
    fn test_update_from_toml() {
        let update = ConfigUpdate::from_toml_str(
            r#"
            log_dir = "/var/log/app"
            overwrite_file = true
            "#,
        )
        .unwrap();

        assert_eq!(update.log_dir, Some(PathBuf::from("/var/log/app")));
        assert_eq!(update.overwrite_file, Some(true));
        assert_eq!(update.immediate_write, None);
    }

    #[test]
    fn test_update_from_toml_rejects_unknown_keys() {
        let result = ConfigUpdate::from_toml_str("log_file_dir = \"x\"");
        assert!(matches!(result, Err(LogError::ParseConfig(_))));
    }

    #[test]
    fn test_update_load_missing_file() {
        let result = ConfigUpdate::load(Path::new("/nonexistent/stamplog.toml"));
        assert!(matches!(result, Err(LogError::ReadConfig { .. })));
    }

    #[test]
    fn test_update_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stamplog.toml");
        std::fs::write(&path, "collapse_structured = true\n").unwrap();

        let update = ConfigUpdate::load(&path).unwrap();
        assert_eq!(update.collapse_structured, Some(true));
    }

    #[test]
    fn test_config_serialization() {
        let config = LoggerConfig::with_update(ConfigUpdate::new().log_dir("/tmp/stamplog"));
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: LoggerConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_default_log_dir_does_not_panic() {
        let dir = default_log_dir();
        assert!(dir.ends_with("log"));
    }
}
