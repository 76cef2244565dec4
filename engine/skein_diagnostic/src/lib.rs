//! Diagnostic reporting for the Skein engine.
//!
//! Resolution treats error reporting as a fire-and-forget sink: faults found
//! while searching for a matching syntax (initialization failures, type and
//! arity mismatches, contextual violations) are reported here and the search
//! moves on. The log collects what was reported so the surrounding caller
//! can decide, once resolution has returned, whether anything is worth
//! surfacing to the script author.

use std::fmt;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A reported diagnostic message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Create a note diagnostic.
    pub fn note(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Note,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Default number of errors retained before further errors are dropped.
pub const DEFAULT_ERROR_LIMIT: usize = 64;

/// Collecting sink for diagnostics.
///
/// Bounded by an error limit (0 = unlimited) so that speculative matching
/// over a large candidate registry cannot grow the log without bound;
/// dropped reports are counted.
#[derive(Debug)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
    error_limit: usize,
    dropped: usize,
}

impl DiagnosticLog {
    /// Create a log with the default error limit.
    pub fn new() -> Self {
        Self::with_error_limit(DEFAULT_ERROR_LIMIT)
    }

    /// Create a log retaining at most `error_limit` errors (0 = unlimited).
    pub fn with_error_limit(error_limit: usize) -> Self {
        DiagnosticLog {
            entries: Vec::new(),
            error_limit,
            dropped: 0,
        }
    }

    /// Report a diagnostic into the log.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity == Severity::Error
            && self.error_limit != 0
            && self.error_count() >= self.error_limit
        {
            self.dropped += 1;
            return;
        }
        self.entries.push(diagnostic);
    }

    /// Everything reported so far, in report order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of retained error-severity entries.
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Number of errors dropped after the limit was reached.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Whether nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drain the log, returning everything reported so far.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.dropped = 0;
        std::mem::take(&mut self.entries)
    }
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collects_in_order() {
        let mut log = DiagnosticLog::new();
        log.report(Diagnostic::error("first"));
        log.report(Diagnostic::note("second"));
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].message, "first");
        assert_eq!(log.error_count(), 1);
    }

    #[test]
    fn error_limit_drops_overflow() {
        let mut log = DiagnosticLog::with_error_limit(2);
        log.report(Diagnostic::error("a"));
        log.report(Diagnostic::error("b"));
        log.report(Diagnostic::error("c"));
        assert_eq!(log.error_count(), 2);
        assert_eq!(log.dropped(), 1);
        // Non-errors are unaffected by the limit.
        log.report(Diagnostic::warning("w"));
        assert_eq!(log.entries().len(), 3);
    }

    #[test]
    fn take_drains() {
        let mut log = DiagnosticLog::new();
        log.report(Diagnostic::error("gone"));
        let drained = log.take();
        assert_eq!(drained.len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn display_formats() {
        assert_eq!(Diagnostic::error("boom").to_string(), "error: boom");
        assert_eq!(Severity::Note.to_string(), "note");
    }
}
