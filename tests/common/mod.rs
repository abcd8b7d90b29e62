#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Route the crate's own diagnostics to the test output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stamplog=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Path of today's log file under the default file name template
pub fn today_file(dir: &Path) -> PathBuf {
    dir.join(format!("log-{}.log", Local::now().format("%Y-%m-%d")))
}

pub fn read(path: &Path) -> anyhow::Result<String> {
    Ok(fs::read_to_string(path)?)
}
