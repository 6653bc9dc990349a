//! Serialization of the translated matrix.
//!
//! Rows are staged in a temporary file next to the destination and renamed
//! into place only after every row serialized, so a failed run never leaves a
//! partial `translated_EDNA_*` file behind.
use crate::config::CodingConfig;
use crate::schema::{HeaderPair, Row};
use crate::sink::{Diagnostic, DiagnosticSink};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Mode of the published file; staging files start out owner-only.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Inputs required to write a translated export.
pub struct WriteOutputArgs<'a> {
    pub out_dir: &'a Path,
    pub sid: &'a str,
    pub headers: &'a HeaderPair,
    pub rows: &'a [Row],
    pub config: &'a CodingConfig,
}

pub fn output_path(out_dir: &Path, sid: &str, config: &CodingConfig) -> PathBuf {
    out_dir.join(config.output_file_name(sid))
}

/// Write headers then rows as tab-delimited text and report the final path.
pub fn write_translated(
    args: &WriteOutputArgs<'_>,
    sink: &mut dyn DiagnosticSink,
) -> Result<PathBuf> {
    fs::create_dir_all(args.out_dir)
        .with_context(|| format!("create {}", args.out_dir.display()))?;
    let dest = output_path(args.out_dir, args.sid, args.config);

    let mut staged = tempfile::NamedTempFile::new_in(args.out_dir)
        .with_context(|| format!("stage {}", dest.display()))?;
    write_rows(staged.as_file_mut(), args.headers, args.rows)
        .with_context(|| format!("write {}", dest.display()))?;
    set_output_mode(staged.as_file())
        .with_context(|| format!("set permissions on {}", dest.display()))?;
    staged
        .persist(&dest)
        .with_context(|| format!("publish {}", dest.display()))?;

    tracing::info!(path = %dest.display(), rows = args.rows.len(), "wrote translated export");
    sink.report(Diagnostic::OutputWritten(dest.clone()));
    Ok(dest)
}

#[cfg(unix)]
fn set_output_mode(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(OUTPUT_MODE))
}

#[cfg(not(unix))]
fn set_output_mode(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

/// Serialize the two header rows followed by the coded rows.
pub fn write_rows<W: Write>(out: W, headers: &HeaderPair, rows: &[Row]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);
    writer
        .write_record(&headers.titles)
        .context("write title row")?;
    writer
        .write_record(&headers.names)
        .context("write variable-name row")?;
    for row in rows {
        writer
            .write_record(row.iter().map(|cell| cell.as_bytes()))
            .context("write response row")?;
    }
    writer.flush().context("flush translated rows")?;
    Ok(())
}
