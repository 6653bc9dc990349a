//! Structural checks and repairs for the raw response matrix.
//!
//! After `validate_matrix` succeeds every row has the header's length and the
//! variable names are unique and short enough for the destination.
use crate::config::CodingConfig;
use crate::error::TranslateError;
use crate::schema::{Cell, HeaderPair, ResponseMatrix, Row};
use crate::sink::{Diagnostic, DiagnosticSink};
use std::collections::HashSet;

/// Validate and repair `matrix` in place.
///
/// Fatal problems are reported to `sink` before the error is returned.
pub fn validate_matrix(
    matrix: &mut ResponseMatrix,
    config: &CodingConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), TranslateError> {
    let result = check_headers(&mut matrix.headers, config)
        .and_then(|width| normalize_rows(&mut matrix.responses, width, sink));
    if let Err(err) = &result {
        sink.report(Diagnostic::Fatal(err.clone()));
    }
    result
}

/// Strip the spurious empty export column and check names and widths.
fn check_headers(
    headers: &mut HeaderPair,
    config: &CodingConfig,
) -> Result<usize, TranslateError> {
    remove_first_empty(&mut headers.titles);
    remove_first_empty(&mut headers.names);

    let mut seen = HashSet::new();
    for name in &headers.names {
        let len = name.chars().count();
        if len > config.max_name_len {
            return Err(TranslateError::NameTooLong {
                name: name.clone(),
                len,
                max: config.max_name_len,
            });
        }
        if !name.is_empty() && !seen.insert(name.as_str()) {
            return Err(TranslateError::DuplicateName { name: name.clone() });
        }
    }

    if headers.titles.len() != headers.names.len() {
        return Err(TranslateError::HeaderLengthMismatch {
            titles: headers.titles.len(),
            names: headers.names.len(),
        });
    }
    Ok(headers.names.len())
}

fn remove_first_empty(row: &mut Vec<String>) {
    if let Some(pos) = row.iter().position(|cell| cell.is_empty()) {
        row.remove(pos);
    }
}

fn normalize_rows(
    rows: &mut [Row],
    width: usize,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), TranslateError> {
    for (index, row) in rows.iter_mut().enumerate() {
        let len = row.len();
        if len < width {
            // Trailing unanswered questions are truncated by the export.
            sink.report(Diagnostic::ShortRow {
                row: index,
                len,
                expected: width,
            });
            row.resize(width, Cell::empty());
        } else if len > width {
            if row[width..].iter().any(|cell| !cell.is_empty()) {
                return Err(TranslateError::RowTooLong {
                    row: index,
                    len,
                    expected: width,
                });
            }
            tracing::debug!(row = index, surplus = len - width, "trim empty trailing cells");
            row.truncate(width);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
