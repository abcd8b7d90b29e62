//! Process-wide logger behaviour
//!
//! Everything here shares one global logger, so it runs as a single test.

mod common;

use std::time::Duration;

use anyhow::Result;
use stamplog::{ConfigUpdate, Delivery, Level, LogError};
use tempfile::TempDir;

use common::{init_tracing, read, today_file};

#[test]
fn test_global_logger_lifecycle() -> Result<()> {
    init_tracing();
    let temp_dir = TempDir::new()?;
    let log_dir = temp_dir.path().join("log");

    // Defaults before any configuration
    let defaults = stamplog::configuration();
    assert_eq!(defaults.message_template, "[%D%]: %L% - %M%");
    assert!(defaults.log_dir.ends_with("log"));
    assert!(!stamplog::global::exit_hook_registered());

    // Partial updates merge
    stamplog::configure(ConfigUpdate::new().log_dir(&log_dir));
    stamplog::configure(ConfigUpdate::new().immediate_write(true));
    let config = stamplog::configuration();
    assert_eq!(config.log_dir, log_dir);
    assert!(config.immediate_write);
    assert_eq!(config.file_name_template, "log-%D%.log");
    stamplog::configure(ConfigUpdate::new());
    assert_eq!(stamplog::configuration(), config);

    // Immediate writes create the directory and file
    assert_eq!(stamplog::info("Test info message")?, Delivery::Written);
    let file = today_file(&log_dir);
    assert!(file.is_file());
    assert!(read(&file)?.trim_end().ends_with("]: INFO - Test info message"));

    // Every severity entry point writes its uppercase level
    let severities: [(fn(&str) -> stamplog::Result<Delivery>, Level); 8] = [
        (|m| stamplog::emergency(m), Level::Emergency),
        (|m| stamplog::alert(m), Level::Alert),
        (|m| stamplog::critical(m), Level::Critical),
        (|m| stamplog::error(m), Level::Error),
        (|m| stamplog::warning(m), Level::Warning),
        (|m| stamplog::notice(m), Level::Notice),
        (|m| stamplog::info(m), Level::Info),
        (|m| stamplog::debug(m), Level::Debug),
    ];
    for (entry_point, level) in severities {
        entry_point("severity check")?;
        let content = read(&file)?;
        let last = content.lines().last().unwrap_or_default();
        assert!(
            last.ends_with(&format!("]: {} - severity check", level.label())),
            "unexpected line: {}",
            last
        );
    }

    // Unknown severity names fail without writing
    let before = read(&file)?;
    let err = stamplog::call("message", "nope").unwrap_err();
    assert!(matches!(err, LogError::UnknownSeverity(ref name) if name == "message"));
    assert_eq!(read(&file)?, before);

    // Immediate mode never registers the exit hook
    assert!(!stamplog::global::exit_hook_registered());

    // Buffered mode holds entries until shutdown
    let buffered_dir = temp_dir.path().join("buffered");
    stamplog::configure(
        ConfigUpdate::new()
            .log_dir(&buffered_dir)
            .immediate_write(false)
            .message_template("%M%"),
    );
    assert_eq!(stamplog::log("one", Level::Notice)?, Delivery::Buffered);
    assert_eq!(stamplog::call("DEBUG", "two")?, Delivery::Buffered);
    assert!(stamplog::global::exit_hook_registered());
    assert!(!today_file(&buffered_dir).exists());

    stamplog::shutdown()?;
    assert_eq!(read(&today_file(&buffered_dir))?, "one\ntwo\n");
    stamplog::shutdown()?;
    assert_eq!(read(&today_file(&buffered_dir))?, "one\ntwo\n");

    // Timer
    stamplog::time_start();
    std::thread::sleep(Duration::from_millis(300));
    let elapsed = stamplog::time_end();
    let (_, decimals) = elapsed.split_once('.').unwrap_or_default();
    assert_eq!(decimals.len(), 2);
    let seconds: f64 = elapsed.parse()?;
    assert!((0.29..2.0).contains(&seconds), "elapsed {}", seconds);

    Ok(())
}
