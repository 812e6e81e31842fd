use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ProcessingError;
use crate::ingestion::SourceFormat;

/// Severity classification used for observer callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProcessingSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (request failed).
    Error,
    /// Critical error (I/O and other infrastructure failures).
    Critical,
}

/// Context about one processing request.
#[derive(Debug, Clone)]
pub struct ProcessingContext {
    /// Name of the operation handling the request.
    pub operation: &'static str,
    /// Declared input format.
    pub format: SourceFormat,
}

/// Outcome stats reported on successful processing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingOutcome {
    /// Number of data rows processed.
    pub rows: usize,
    /// Wall-clock duration in seconds.
    pub duration_seconds: f64,
}

/// Observer interface for request outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ProcessingObserver: Send + Sync {
    /// Called when a request succeeds.
    fn on_success(&self, _ctx: &ProcessingContext, _outcome: ProcessingOutcome) {}

    /// Called when a request fails.
    fn on_failure(&self, _ctx: &ProcessingContext, _severity: ProcessingSeverity, _error: &ProcessingError) {}
}

/// Severity of a failed request: infrastructure failures are critical,
/// everything else is a plain error.
pub fn severity_for_error(e: &ProcessingError) -> ProcessingSeverity {
    match e {
        ProcessingError::Io(_) => ProcessingSeverity::Critical,
        ProcessingError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => ProcessingSeverity::Critical,
            _ => ProcessingSeverity::Error,
        },
        ProcessingError::Excel(_)
        | ProcessingError::Xlsx(_)
        | ProcessingError::Json(_)
        | ProcessingError::Parse { .. }
        | ProcessingError::NotFound { .. } => ProcessingSeverity::Error,
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ProcessingObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ProcessingObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ProcessingObserver for CompositeObserver {
    fn on_success(&self, ctx: &ProcessingContext, outcome: ProcessingOutcome) {
        for o in &self.observers {
            o.on_success(ctx, outcome);
        }
    }

    fn on_failure(&self, ctx: &ProcessingContext, severity: ProcessingSeverity, error: &ProcessingError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }
}

/// Logs request outcomes to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ProcessingObserver for StdErrObserver {
    fn on_success(&self, ctx: &ProcessingContext, outcome: ProcessingOutcome) {
        eprintln!(
            "[process][ok] op={} format={:?} rows={} secs={:.2}",
            ctx.operation, ctx.format, outcome.rows, outcome.duration_seconds
        );
    }

    fn on_failure(&self, ctx: &ProcessingContext, severity: ProcessingSeverity, error: &ProcessingError) {
        eprintln!(
            "[process][{:?}] op={} format={:?} err={}",
            severity, ctx.operation, ctx.format, error
        );
    }
}

/// Appends request outcomes to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ProcessingObserver for FileObserver {
    fn on_success(&self, ctx: &ProcessingContext, outcome: ProcessingOutcome) {
        self.append_line(&format!(
            "{} ok op={} format={:?} rows={} secs={:.2}",
            unix_ts(),
            ctx.operation,
            ctx.format,
            outcome.rows,
            outcome.duration_seconds
        ));
    }

    fn on_failure(&self, ctx: &ProcessingContext, severity: ProcessingSeverity, error: &ProcessingError) {
        self.append_line(&format!(
            "{} fail severity={:?} op={} format={:?} err={}",
            unix_ts(),
            severity,
            ctx.operation,
            ctx.format,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
