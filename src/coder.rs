//! Response status coding.
//!
//! Every substantive cell gets exactly one status code. Rules are tried in a
//! fixed order and the first match wins: scale-specific rules, then display
//! logic, then the generic non-answer/empty/text fallback.
use crate::config::CodingConfig;
use crate::error::TranslateError;
use crate::header::ExpandedHeader;
use crate::schema::{Cell, QuestionDescriptor, QuestionScale, Row, StatusCode};
use crate::sink::{Diagnostic, DiagnosticSink};

/// Outcome of coding one cell; `Unexpected` is the non-text fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coded {
    Code(StatusCode),
    Unexpected,
}

impl Coded {
    pub fn status(self) -> StatusCode {
        match self {
            Coded::Code(code) => code,
            Coded::Unexpected => StatusCode::Missing,
        }
    }
}

/// Code one cell against its question descriptor.
pub fn code_cell(question: &QuestionDescriptor, value: &Cell, config: &CodingConfig) -> Coded {
    let empty = value.is_empty();
    let text = value.as_text();

    let code = match &question.parent_scale {
        QuestionScale::MultipleChoice => {
            if empty || text == Some(config.question_not_shown.as_str()) {
                StatusCode::NotApplicable
            } else if text == Some("Y") {
                StatusCode::Answered
            } else {
                StatusCode::Missing
            }
        }
        QuestionScale::ListRadio => match (empty, question.name.contains("other")) {
            (true, true) => StatusCode::NotApplicable,
            (true, false) => StatusCode::Missing,
            (false, _) => StatusCode::Answered,
        },
        QuestionScale::Array => {
            if empty {
                StatusCode::Missing
            } else {
                StatusCode::Answered
            }
        }
        QuestionScale::Other(_) if question.has_logic => {
            if empty {
                StatusCode::SkippedByLogic
            } else {
                StatusCode::Answered
            }
        }
        QuestionScale::Other(_) => match text {
            Some(text) if config.is_non_answer(text) => StatusCode::Missing,
            Some("") => StatusCode::Missing,
            Some(_) => StatusCode::Answered,
            None => return Coded::Unexpected,
        },
    };
    Coded::Code(code)
}

/// Append the status block to every response row.
///
/// `rows` must already be validated to header width. Descriptor `i` belongs
/// to the `i`-th substantive column of `header`.
pub fn code_responses(
    rows: Vec<Row>,
    header: &ExpandedHeader,
    questions: &[QuestionDescriptor],
    config: &CodingConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<Vec<Row>, TranslateError> {
    if questions.len() != header.status_count() {
        let err = TranslateError::IndexAlignment {
            descriptors: questions.len(),
            columns: header.status_count(),
        };
        sink.report(Diagnostic::Fatal(err.clone()));
        return Err(err);
    }

    let mut coded_rows = Vec::with_capacity(rows.len());
    for (row_index, mut row) in rows.into_iter().enumerate() {
        let mut block = Vec::with_capacity(questions.len());
        for (question, &position) in questions.iter().zip(&header.substantive) {
            let value = &row[position];
            let coded = code_cell(question, value, config);
            if coded == Coded::Unexpected {
                sink.report(Diagnostic::UnexpectedValue {
                    row: row_index,
                    column: question.name.clone(),
                    value: value.display().into_owned(),
                });
            }
            block.push(Cell::from(coded.status()));
        }
        row.extend(block);
        coded_rows.push(row);
    }
    tracing::info!(rows = coded_rows.len(), columns = questions.len(), "coded responses");
    Ok(coded_rows)
}

#[cfg(test)]
#[path = "coder_tests.rs"]
mod tests;
