//! Reading the tab-delimited VV response export.
use crate::error::TranslateError;
use crate::schema::{Cell, HeaderPair, ResponseMatrix, Row};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn read_response_export(path: &Path) -> Result<ResponseMatrix> {
    let file = File::open(path).with_context(|| format!("open responses {}", path.display()))?;
    let matrix =
        parse_response_export(file).with_context(|| format!("parse responses {}", path.display()))?;
    tracing::info!(
        columns = matrix.headers.names.len(),
        rows = matrix.responses.len(),
        "loaded response export"
    );
    Ok(matrix)
}

/// Split the export into its two header rows and the response rows.
///
/// Records may differ in length; the validator reconciles them.
pub fn parse_response_export<R: Read>(reader: R) -> Result<ResponseMatrix> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<Row> = Vec::new();
    for record in csv_reader.byte_records() {
        let record = record.context("read response record")?;
        rows.push(record.iter().map(Cell::from_bytes).collect());
    }
    if rows.len() < 2 {
        return Err(TranslateError::MissingHeaders { found: rows.len() }.into());
    }

    let responses = rows.split_off(2);
    let names = rows.pop().map(header_row).unwrap_or_default();
    let titles = rows.pop().map(header_row).unwrap_or_default();
    Ok(ResponseMatrix {
        headers: HeaderPair { titles, names },
        responses,
    })
}

fn header_row(row: Row) -> Vec<String> {
    row.iter().map(|cell| cell.display().into_owned()).collect()
}
