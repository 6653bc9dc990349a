use thiserror::Error;

/// Fatal conditions raised while validating or coding a response matrix.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslateError {
    #[error("response export has {found} row(s); expected a title row and a variable-name row")]
    MissingHeaders { found: usize },

    #[error(
        "question name '{name}' is too long ({len} > {max} characters) and may collide in LimeSurvey; choose a shorter question name"
    )]
    NameTooLong { name: String, len: usize, max: usize },

    #[error("question name '{name}' appears more than once in the variable-name row")]
    DuplicateName { name: String },

    #[error(
        "header rows must be equal lengths ({titles} titles, {names} variable names); the response export is likely corrupt"
    )]
    HeaderLengthMismatch { titles: usize, names: usize },

    #[error("response at index {row} has {len} cells but the header has {expected}, and the surplus cells are not empty")]
    RowTooLong {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error(
        "structure describes {descriptors} question column(s) but the export has {columns} substantive column(s)"
    )]
    IndexAlignment { descriptors: usize, columns: usize },
}

/// Failures while reading the survey structure export.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("structure file has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("structure file has no survey setting named 'sid'")]
    MissingSid,

    #[error("subquestion '{name}' at line {line} has no parent question")]
    OrphanSubquestion { name: String, line: u64 },

    #[error("read structure table")]
    Csv(#[from] csv::Error),
}
