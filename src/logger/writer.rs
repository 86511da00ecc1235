//! Log writer module
//!
//! Low-level output for the logger. Each of the two streams goes to the
//! console or to an append-mode file, fixed once at initialization for the
//! lifetime of the process.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Where one log stream ends up
enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    /// Resolve a configured file path, or fall back to the given console
    /// stream
    fn resolve(path: Option<&str>, console: Self) -> io::Result<Self> {
        match path {
            Some(p) => Ok(Self::File(Mutex::new(open_append(p)?))),
            None => Ok(console),
        }
    }

    fn line(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
        }
    }
}

/// The process-wide pair of log streams
pub struct LogWriter {
    /// Access lines and informational output
    access: LogTarget,
    /// Errors and warnings
    error: LogTarget,
}

impl LogWriter {
    pub fn access_line(&self, message: &str) {
        self.access.line(message);
    }

    pub fn error_line(&self, message: &str) {
        self.error.line(message);
    }
}

/// Open a log file for appending, creating parent directories as needed
fn open_append(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Set up the global writer, once, before anything logs through it
pub fn init(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter {
        access: LogTarget::resolve(access_log_file, LogTarget::Stdout)?,
        error: LogTarget::resolve(error_log_file, LogTarget::Stderr)?,
    };
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "log writer already initialized",
        )
    })
}

/// Global writer; panics when `init` has not run
pub fn get() -> &'static LogWriter {
    LOG_WRITER.get().expect("log writer used before init")
}

/// Check whether `init` has run, for callers that need a console fallback
pub fn is_initialized() -> bool {
    LOG_WRITER.get().is_some()
}
