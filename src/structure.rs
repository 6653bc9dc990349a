//! Survey structure parsing.
//!
//! Reads the tab-separated LimeSurvey structure export and flattens its
//! question/subquestion rows into one descriptor per response column, in the
//! same order the VV export lays out its columns.
use crate::error::StructureError;
use crate::schema::{QuestionDescriptor, QuestionScale, SurveyStructure};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

const CLASS_SETTING: &str = "S";
const CLASS_QUESTION: &str = "Q";
const CLASS_SUBQUESTION: &str = "SQ";
const COLUMN_AXIS: &str = "1";

#[derive(Debug, Clone, Copy)]
struct Columns {
    class: usize,
    scale: usize,
    name: usize,
    relevance: usize,
    other: Option<usize>,
    language: Option<usize>,
    text: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, StructureError> {
        let find = |label: &str| headers.iter().position(|h| h.trim() == label);
        let require =
            |label: &'static str| find(label).ok_or(StructureError::MissingColumn(label));
        Ok(Self {
            class: require("class")?,
            scale: require("type/scale")?,
            name: require("name")?,
            relevance: require("relevance")?,
            other: find("other"),
            language: find("language"),
            text: find("text"),
        })
    }
}

#[derive(Debug, Clone)]
struct StructureRow {
    line: u64,
    class: String,
    scale: String,
    name: String,
    relevance: String,
    other: String,
    language: String,
    text: String,
}

#[derive(Debug)]
struct ParsedQuestion {
    code: String,
    scale: String,
    has_logic: bool,
    other: bool,
    rows: Vec<String>,
    columns: Vec<String>,
}

pub fn read_structure(path: &Path) -> Result<SurveyStructure> {
    let file = File::open(path).with_context(|| format!("open structure {}", path.display()))?;
    let structure =
        parse_structure(file).with_context(|| format!("parse structure {}", path.display()))?;
    tracing::info!(
        sid = %structure.sid,
        questions = structure.questions.len(),
        "loaded survey structure"
    );
    Ok(structure)
}

pub fn parse_structure<R: Read>(reader: R) -> Result<SurveyStructure, StructureError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::locate(csv_reader.headers()?)?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let field = |index: usize| record.get(index).unwrap_or_default().trim().to_string();
        let optional = |index: Option<usize>| index.map(&field).unwrap_or_default();
        rows.push(StructureRow {
            line,
            class: field(columns.class),
            scale: field(columns.scale),
            name: field(columns.name),
            relevance: field(columns.relevance),
            other: optional(columns.other),
            language: optional(columns.language),
            text: optional(columns.text),
        });
    }

    let settings: HashMap<&str, &str> = rows
        .iter()
        .filter(|row| row.class == CLASS_SETTING)
        .map(|row| (row.name.as_str(), row.text.as_str()))
        .collect();
    let sid = settings
        .get("sid")
        .filter(|sid| !sid.is_empty())
        .ok_or(StructureError::MissingSid)?
        .to_string();
    let base_language = settings.get("language").copied().unwrap_or_default();

    let questions = collect_questions(&rows, base_language)?;
    let descriptors = questions.iter().flat_map(expand_question).collect();
    Ok(SurveyStructure {
        sid,
        questions: descriptors,
    })
}

fn collect_questions(
    rows: &[StructureRow],
    base_language: &str,
) -> Result<Vec<ParsedQuestion>, StructureError> {
    let mut questions: Vec<ParsedQuestion> = Vec::new();
    for row in rows {
        // Translations repeat every question once per extra language.
        if !base_language.is_empty() && !row.language.is_empty() && row.language != base_language
        {
            continue;
        }
        match row.class.as_str() {
            CLASS_QUESTION => questions.push(ParsedQuestion {
                code: row.name.clone(),
                scale: row.scale.clone(),
                has_logic: has_display_logic(&row.relevance),
                other: row.other.eq_ignore_ascii_case("Y"),
                rows: Vec::new(),
                columns: Vec::new(),
            }),
            CLASS_SUBQUESTION => {
                let parent =
                    questions
                        .last_mut()
                        .ok_or_else(|| StructureError::OrphanSubquestion {
                            name: row.name.clone(),
                            line: row.line,
                        })?;
                if row.scale == COLUMN_AXIS {
                    parent.columns.push(row.name.clone());
                } else {
                    parent.rows.push(row.name.clone());
                }
            }
            _ => {}
        }
    }
    Ok(questions)
}

fn expand_question(question: &ParsedQuestion) -> Vec<QuestionDescriptor> {
    let code = &question.code;
    let mut names = Vec::new();
    if question.rows.is_empty() {
        names.push(code.clone());
    }
    for row in &question.rows {
        if question.columns.is_empty() {
            names.push(format!("{code}_{row}"));
            if question.scale == "P" {
                names.push(format!("{code}_{row}comment"));
            }
        } else {
            for column in &question.columns {
                names.push(format!("{code}_{row}_{column}"));
            }
        }
    }
    if question.other {
        names.push(format!("{code}_other"));
        if question.scale == "P" {
            names.push(format!("{code}_othercomment"));
        }
    }
    if question.scale == "O" {
        names.push(format!("{code}_comment"));
    }

    let scale = QuestionScale::from_code(&question.scale);
    names
        .into_iter()
        .map(|name| QuestionDescriptor {
            name,
            parent_scale: scale.clone(),
            has_logic: question.has_logic,
        })
        .collect()
}

/// A relevance equation of `1` (or nothing) means "always shown".
pub fn has_display_logic(relevance: &str) -> bool {
    static ALWAYS: OnceLock<Regex> = OnceLock::new();
    let always = ALWAYS.get_or_init(|| {
        Regex::new(r"^\s*(?:1|\(\s*1\s*\))?\s*$").expect("regex for always-true relevance")
    });
    !always.is_match(relevance)
}

#[cfg(test)]
#[path = "structure_tests.rs"]
mod tests;
