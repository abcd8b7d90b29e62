//! Log file persistence
//!
//! Creates the log directory on demand and writes under an exclusive advisory
//! lock so independent processes sharing a log file never interleave bytes.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{LogError, Result};

/// How the target file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Append,
    Overwrite,
}

/// Ensure the directory exists, creating parents as needed
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        // Another process may have created it in the meantime
        Err(_) if dir.is_dir() => Ok(()),
        Err(source) => Err(LogError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Write `data` to `path`, appending or truncating according to `mode`
pub fn write_locked(path: &Path, data: &str, mode: WriteMode) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        ensure_dir(dir)?;
    }

    let to_write_error = |source| LogError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Append => options.append(true),
        // Truncation waits until the lock is held
        WriteMode::Overwrite => options.write(true),
    };

    let mut file = options.open(path).map_err(to_write_error)?;
    let _lock = FileLock::exclusive(&file).map_err(to_write_error)?;

    if mode == WriteMode::Overwrite {
        file.set_len(0).map_err(to_write_error)?;
    }
    file.write_all(data.as_bytes()).map_err(to_write_error)?;
    file.flush().map_err(to_write_error)?;

    tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

/// Exclusive advisory lock held for the lifetime of the guard
///
/// The lock is released on drop, and by the OS when the file is closed.
struct FileLock {
    #[cfg(unix)]
    fd: std::os::unix::io::RawFd,
}

impl FileLock {
    #[cfg(unix)]
    fn exclusive(file: &File) -> std::io::Result<Self> {
        use std::os::unix::io::AsRawFd;

        let fd = file.as_raw_fd();
        loop {
            if unsafe { libc::flock(fd, libc::LOCK_EX) } == 0 {
                return Ok(Self { fd });
            }
            let err = std::io::Error::last_os_error();
            if err.kind() != std::io::ErrorKind::Interrupted {
                return Err(err);
            }
        }
    }

    /// No advisory locking here: concurrent processes may interleave writes
    #[cfg(not(unix))]
    fn exclusive(_file: &File) -> std::io::Result<Self> {
        Ok(Self {})
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        #[cfg(unix)]
        let _ = unsafe { libc::flock(self.fd, libc::LOCK_UN) };
    }
}
