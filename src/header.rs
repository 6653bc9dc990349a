//! Status-column generation for the header rows.
use crate::config::CodingConfig;
use crate::schema::HeaderPair;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedHeader {
    /// Original headers followed by one status column per substantive column.
    pub headers: HeaderPair,
    /// Number of non-empty metadata columns.
    pub offset: usize,
    /// Positions of substantive columns in the original rows, left to right.
    pub substantive: Vec<usize>,
}

impl ExpandedHeader {
    pub fn status_count(&self) -> usize {
        self.substantive.len()
    }
}

/// Append a `responseStatus_` column for every non-metadata variable name.
///
/// The export puts metadata first, so substantive position `i` is
/// `offset + i` in practice; the positions are kept explicitly anyway.
pub fn expand_headers(headers: &HeaderPair, config: &CodingConfig) -> ExpandedHeader {
    let mut expanded = headers.clone();
    let mut offset = 0;
    let mut substantive = Vec::new();
    for (position, name) in headers.names.iter().enumerate() {
        if config.is_ignored(name) {
            if !name.is_empty() {
                offset += 1;
            }
            continue;
        }
        expanded.titles.push(String::new());
        expanded.names.push(status_column_name(name, config));
        substantive.push(position);
    }
    tracing::debug!(offset, status_columns = substantive.len(), "expanded headers");
    ExpandedHeader {
        headers: expanded,
        offset,
        substantive,
    }
}

pub fn status_column_name(name: &str, config: &CodingConfig) -> String {
    format!("{}{}", config.status_prefix, name.replace('_', ""))
}
