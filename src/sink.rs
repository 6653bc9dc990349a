//! Diagnostic channel for user-visible warnings and confirmations.
//!
//! Core stages never print directly; they report into a `DiagnosticSink` the
//! caller owns, so tests can capture output and `--quiet` can drop it.
use crate::error::TranslateError;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A response row was padded with empty cells to header length.
    ShortRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// A cell with no text representation reached the generic coding fallback.
    UnexpectedValue {
        row: usize,
        column: String,
        value: String,
    },
    /// A fatal error, reported just before the run aborts.
    Fatal(TranslateError),
    /// A fatal input or output failure, rendered with its cause chain.
    Failed(String),
    /// The translated file was written.
    OutputWritten(PathBuf),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ShortRow { row, len, expected } => write!(
                f,
                "Response at index {row} is shorter than expected ({len} < {expected}). \
                 Padded with placeholders; look into why if this repeats."
            ),
            Diagnostic::UnexpectedValue { row, column, value } => write!(
                f,
                "Response at index {row} has a non-text value in column '{column}': {value}"
            ),
            Diagnostic::Fatal(err) => write!(f, "{err}"),
            Diagnostic::Failed(message) => write!(f, "{message}"),
            Diagnostic::OutputWritten(path) => {
                write!(f, "You can find the translated file at {}", path.display())
            }
        }
    }
}

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in memory.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Writes one line per diagnostic to any writer and mirrors it to tracing.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::ShortRow { .. } | Diagnostic::UnexpectedValue { .. } => {
                tracing::warn!(%diagnostic, "diagnostic");
            }
            Diagnostic::Fatal(_) | Diagnostic::Failed(_) => tracing::error!(%diagnostic, "diagnostic"),
            Diagnostic::OutputWritten(_) => tracing::debug!(%diagnostic, "diagnostic"),
        }
        if let Err(err) = writeln!(self.out, "{diagnostic}") {
            tracing::error!(error = %err, "write diagnostic");
        }
    }
}

/// Drops everything; used for `--quiet`.
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(%diagnostic, "suppressed diagnostic");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_sink_emits_one_line_per_diagnostic() {
        let mut buf = Vec::new();
        {
            let mut sink = WriterSink::new(&mut buf);
            sink.report(Diagnostic::ShortRow {
                row: 3,
                len: 4,
                expected: 6,
            });
            sink.report(Diagnostic::OutputWritten(PathBuf::from(
                "translated_EDNA_1.txt",
            )));
        }
        let text = String::from_utf8(buf).expect("utf8 output");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("index 3"));
        assert!(lines[0].contains("(4 < 6)"));
        assert_eq!(
            lines[1],
            "You can find the translated file at translated_EDNA_1.txt"
        );
    }
}
