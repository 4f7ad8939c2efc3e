//! Diagnostic values and collectors.

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Structural problem; the affected subtree is missing from the output.
    Error,
    /// Completeness problem; output is complete but likely wrong.
    Warning,
    /// Style or best-practice suggestion.
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Hint => "hint",
        })
    }
}

/// A single diagnostic message tied to the file that caused it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Path of the declaring file (`docset.yml`, `toc.yml`, `navigation.yml`).
    pub file: String,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.file, self.message)
    }
}

/// Sink for diagnostics emitted during resolution and assembly.
///
/// Implementations must be shareable across threads; sharing one collector
/// between concurrent builds requires the implementation to synchronize.
pub trait DiagnosticsCollector: Send + Sync {
    /// Record a diagnostic.
    fn emit(&self, diagnostic: Diagnostic);

    /// Record an error.
    fn emit_error(&self, file: &str, message: &str) {
        self.emit(Diagnostic {
            severity: Severity::Error,
            file: file.to_owned(),
            message: message.to_owned(),
        });
    }

    /// Record a warning.
    fn emit_warning(&self, file: &str, message: &str) {
        self.emit(Diagnostic {
            severity: Severity::Warning,
            file: file.to_owned(),
            message: message.to_owned(),
        });
    }

    /// Record a hint.
    fn emit_hint(&self, file: &str, message: &str) {
        self.emit(Diagnostic {
            severity: Severity::Hint,
            file: file.to_owned(),
            message: message.to_owned(),
        });
    }
}

/// In-memory collector that also mirrors every diagnostic to `tracing`.
#[derive(Debug, Default)]
pub struct Collector {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl Collector {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all diagnostics in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Number of errors emitted so far.
    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warnings emitted so far.
    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Number of hints emitted so far.
    pub fn hints(&self) -> usize {
        self.count(Severity::Hint)
    }

    /// Diagnostics of one severity, in emission order.
    pub fn of_severity(&self, severity: Severity) -> Vec<Diagnostic> {
        self.lock()
            .iter()
            .filter(|d| d.severity == severity)
            .cloned()
            .collect()
    }

    fn count(&self, severity: Severity) -> usize {
        self.lock().iter().filter(|d| d.severity == severity).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticsCollector for Collector {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => {
                tracing::error!(file = %diagnostic.file, "{}", diagnostic.message);
            }
            Severity::Warning => {
                tracing::warn!(file = %diagnostic.file, "{}", diagnostic.message);
            }
            Severity::Hint => {
                tracing::debug!(file = %diagnostic.file, "{}", diagnostic.message);
            }
        }
        self.lock().push(diagnostic);
    }
}
