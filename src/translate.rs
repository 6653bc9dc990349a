//! End-to-end translation workflow.
//!
//! Load, validate, expand, code, and only then write. Every fatal condition
//! surfaces before `writer::write_translated` runs.
use crate::coder::code_responses;
use crate::config::CodingConfig;
use crate::error::TranslateError;
use crate::export::read_response_export;
use crate::header::{expand_headers, ExpandedHeader};
use crate::schema::{ResponseMatrix, Row, SurveyStructure};
use crate::sink::{Diagnostic, DiagnosticSink};
use crate::structure::read_structure;
use crate::validate::validate_matrix;
use crate::writer::{write_translated, WriteOutputArgs};
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Paths and settings for one translation run.
pub struct TranslateRequest<'a> {
    pub structure: &'a Path,
    pub responses: &'a Path,
    pub config: &'a CodingConfig,
}

/// A fully coded matrix, ready to write.
#[derive(Debug, Clone)]
pub struct Translation {
    pub structure: SurveyStructure,
    pub header: ExpandedHeader,
    pub rows: Vec<Row>,
}

/// Validate, expand, and code an in-memory matrix.
pub fn translate_matrix(
    mut matrix: ResponseMatrix,
    structure: SurveyStructure,
    config: &CodingConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<Translation, TranslateError> {
    validate_matrix(&mut matrix, config, sink)?;
    let header = expand_headers(&matrix.headers, config);
    let rows = code_responses(matrix.responses, &header, &structure.questions, config, sink)?;
    Ok(Translation {
        structure,
        header,
        rows,
    })
}

/// Read both input files and produce a coded translation without writing.
///
/// Every failure is reported to `sink` before it is returned.
pub fn translate_files(
    request: &TranslateRequest<'_>,
    sink: &mut dyn DiagnosticSink,
) -> Result<Translation> {
    let structure = reported(read_structure(request.structure), sink)?;
    let matrix = reported(read_response_export(request.responses), sink)?;
    // Validation and coding report their own fatal errors.
    translate_matrix(matrix, structure, request.config, sink).map_err(Into::into)
}

/// Translate and write `translated_EDNA_<sid>.txt` into `out_dir`.
pub fn run_translate(
    request: &TranslateRequest<'_>,
    out_dir: &Path,
    sink: &mut dyn DiagnosticSink,
) -> Result<PathBuf> {
    let translation = translate_files(request, sink)?;
    let written = write_translated(
        &WriteOutputArgs {
            out_dir,
            sid: &translation.structure.sid,
            headers: &translation.header.headers,
            rows: &translation.rows,
            config: request.config,
        },
        sink,
    );
    reported(written, sink)
}

fn reported<T>(result: Result<T>, sink: &mut dyn DiagnosticSink) -> Result<T> {
    if let Err(err) = &result {
        let diagnostic = match err.downcast_ref::<TranslateError>() {
            Some(fatal) => Diagnostic::Fatal(fatal.clone()),
            None => Diagnostic::Failed(format!("{err:#}")),
        };
        sink.report(diagnostic);
    }
    result
}

/// Render `name:value>code` for each substantive column of one coded row.
pub fn preview_lines(translation: &Translation, row_index: usize) -> Result<Vec<String>> {
    let row = translation.rows.get(row_index).ok_or_else(|| {
        anyhow!(
            "response row {row_index} does not exist ({} rows)",
            translation.rows.len()
        )
    })?;
    let header = &translation.header;
    let block_start = row.len() - header.status_count();
    let lines = header
        .substantive
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            format!(
                "{}:{}>{}",
                header.headers.names[position],
                row[position].display(),
                row[block_start + i].display()
            )
        })
        .collect();
    Ok(lines)
}
