//! Schema types for survey structure, response matrices, and status codes.

use std::borrow::Cow;
use std::fmt;

/// Question type marker taken from the structure export's `type/scale` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionScale {
    /// `M`: multiple choice, one Y/blank column per option.
    MultipleChoice,
    /// `L`: single-select list (radio).
    ListRadio,
    /// `;`: array of free-text cells.
    Array,
    /// Any other LimeSurvey type code, kept verbatim.
    Other(String),
}

impl QuestionScale {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "M" => QuestionScale::MultipleChoice,
            "L" => QuestionScale::ListRadio,
            ";" => QuestionScale::Array,
            other => QuestionScale::Other(other.to_string()),
        }
    }
}

/// One response column as described by the survey structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDescriptor {
    pub name: String,
    pub parent_scale: QuestionScale,
    pub has_logic: bool,
}

/// Parsed structure export: the survey id plus descriptors in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyStructure {
    pub sid: String,
    pub questions: Vec<QuestionDescriptor>,
}

/// A single response cell.
///
/// The export is byte oriented; cells that do not decode as UTF-8 are carried
/// as raw bytes and written back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Raw(Vec<u8>),
}

impl Cell {
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Cell::Text(text.to_string()),
            Err(_) => Cell::Raw(bytes.to_vec()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Text(text) => text.is_empty(),
            Cell::Raw(bytes) => bytes.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            Cell::Raw(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Cell::Text(text) => text.as_bytes(),
            Cell::Raw(bytes) => bytes,
        }
    }

    pub fn display(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

pub type Row = Vec<Cell>;

/// The two header rows of a response export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderPair {
    pub titles: Vec<String>,
    pub names: Vec<String>,
}

/// Header rows plus response rows, as read from the export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMatrix {
    pub headers: HeaderPair,
    pub responses: Vec<Row>,
}

/// Status written to each synthetic `responseStatus_` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Answered,
    NotApplicable,
    SkippedByLogic,
    Missing,
}

impl StatusCode {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Answered => "E111E",
            StatusCode::NotApplicable => "E222E",
            StatusCode::SkippedByLogic => "E777E",
            StatusCode::Missing => "E999E",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StatusCode> for Cell {
    fn from(code: StatusCode) -> Self {
        Cell::Text(code.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_codes_map_to_known_variants() {
        assert_eq!(QuestionScale::from_code("M"), QuestionScale::MultipleChoice);
        assert_eq!(QuestionScale::from_code(" L "), QuestionScale::ListRadio);
        assert_eq!(QuestionScale::from_code(";"), QuestionScale::Array);
        assert_eq!(
            QuestionScale::from_code("F"),
            QuestionScale::Other("F".to_string())
        );
    }

    #[test]
    fn invalid_utf8_cells_stay_raw() {
        let cell = Cell::from_bytes(&[0x66, 0xff, 0x6f]);
        assert!(matches!(cell, Cell::Raw(_)));
        assert!(!cell.is_empty());
        assert_eq!(cell.as_text(), None);
        assert_eq!(cell.as_bytes(), &[0x66, 0xff, 0x6f]);
    }
}
