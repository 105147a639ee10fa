//! Access log writer module
//!
//! Provides thread-safe access log writing to a file or stdout.
//! Diagnostics go through `tracing`; only the access log uses this writer.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Global access log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    Stdout,
    File(Mutex<File>),
}

/// Thread-safe access log writer
pub struct LogWriter {
    target: LogTarget,
}

impl LogWriter {
    fn new(access_log_file: Option<&str>) -> io::Result<Self> {
        let target = match access_log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stdout,
        };
        Ok(Self { target })
    }

    pub fn write_access(&self, message: &str) {
        match &self.target {
            LogTarget::Stdout => println!("{message}"),
            LogTarget::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global access log writer
///
/// Returns error if the log file cannot be opened or the writer is already set.
pub fn init(access_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter::new(access_log_file)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global access log writer, if initialized
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_target_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/access.log");
        let path_str = path.to_str().unwrap();

        let writer = LogWriter::new(Some(path_str)).unwrap();
        writer.write_access("first");
        writer.write_access("second");

        let again = LogWriter::new(Some(path_str)).unwrap();
        again.write_access("third");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\nthird\n");
    }

    #[test]
    fn test_stdout_target() {
        let writer = LogWriter::new(None).unwrap();
        assert!(matches!(writer.target, LogTarget::Stdout));
    }
}
