//! Standard output capture
//!
//! Redirects the process's stdout file descriptor into an anonymous temporary
//! file so anything printed while the capture is active can be logged later.
//! Writes made through Rust's `print!` machinery inside a test harness are
//! intercepted before they reach the descriptor and are not seen here.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::error::{LogError, Result};

/// Active redirection of stdout; restored by [`OutputCapture::finish`] or on drop
#[derive(Debug)]
pub struct OutputCapture {
    #[cfg(unix)]
    saved_fd: Option<std::os::unix::io::RawFd>,
    file: File,
}

#[cfg(unix)]
impl OutputCapture {
    /// Start redirecting stdout into a temporary file
    pub fn start() -> Result<Self> {
        use std::os::unix::io::AsRawFd;

        let file = tempfile::tempfile().map_err(LogError::Capture)?;
        io::stdout().flush().map_err(LogError::Capture)?;

        let saved_fd = unsafe { libc::dup(libc::STDOUT_FILENO) };
        if saved_fd < 0 {
            return Err(LogError::Capture(io::Error::last_os_error()));
        }

        if unsafe { libc::dup2(file.as_raw_fd(), libc::STDOUT_FILENO) } < 0 {
            let err = io::Error::last_os_error();
            unsafe {
                libc::close(saved_fd);
            }
            return Err(LogError::Capture(err));
        }

        tracing::trace!("Stdout capture started");
        Ok(Self {
            saved_fd: Some(saved_fd),
            file,
        })
    }

    /// Restore stdout and return everything written while captured
    pub fn finish(mut self) -> Result<String> {
        self.restore().map_err(LogError::Capture)?;

        let mut captured = Vec::new();
        self.file
            .seek(SeekFrom::Start(0))
            .and_then(|_| self.file.read_to_end(&mut captured))
            .map_err(LogError::Capture)?;

        tracing::trace!("Stdout capture finished with {} bytes", captured.len());
        Ok(String::from_utf8_lossy(&captured).into_owned())
    }

    fn restore(&mut self) -> io::Result<()> {
        let Some(saved_fd) = self.saved_fd.take() else {
            return Ok(());
        };

        // Push anything still sitting in Rust's stdout buffer into the capture
        let _ = io::stdout().flush();

        let rc = unsafe { libc::dup2(saved_fd, libc::STDOUT_FILENO) };
        let err = io::Error::last_os_error();
        unsafe {
            libc::close(saved_fd);
        }

        if rc < 0 {
            Err(err)
        } else {
            Ok(())
        }
    }
}

#[cfg(unix)]
impl Drop for OutputCapture {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::error!("Failed to restore stdout after capture: {}", e);
        }
    }
}

#[cfg(not(unix))]
impl OutputCapture {
    pub fn start() -> Result<Self> {
        Err(LogError::CaptureUnsupported)
    }

    pub fn finish(self) -> Result<String> {
        let _ = &self.file;
        Err(LogError::CaptureUnsupported)
    }
}
