//! Shared test infrastructure for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const STRUCTURE_HEADER: &str =
    "id\trelated_id\tclass\ttype/scale\tname\trelevance\ttext\thelp\tlanguage\tvalidation\tmandatory\tother";

/// A survey with one question of each coding family.
///
/// Response columns, after the metadata: `pets_dog`, `pets_cat` (multiple
/// choice), `color`, `color_other` (list with other), `why` (conditional
/// text), `notes` (plain text).
pub const STRUCTURE_ROWS: &[&str] = &[
    "\t\tS\t\tsid\t\t482731\t\t\t\t\t",
    "\t\tS\t\tlanguage\t\ten\t\t\t\t\t",
    "10\t\tQ\tM\tpets\t1\tWhich pets?\t\ten\t\tN\tN",
    "11\t\tSQ\t0\tdog\t\tDog\t\ten\t\t\t",
    "12\t\tSQ\t0\tcat\t\tCat\t\ten\t\t\t",
    "20\t\tQ\tL\tcolor\t1\tFavourite colour\t\ten\t\tY\tY",
    "30\t\tQ\tT\twhy\tpets_cat == \"Y\"\tWhy a cat?\t\ten\t\tN\tN",
    "40\t\tQ\tT\tnotes\t1\tAnything else?\t\ten\t\tN\tN",
];

pub const RESPONSE_TITLES: &[&str] = &[
    "Response ID",
    "Date submitted",
    "Start language",
    "Dog",
    "Cat",
    "Favourite colour",
    "Other colour",
    "Why a cat?",
    "Anything else?",
];

pub const RESPONSE_NAMES: &[&str] = &[
    "id",
    "submitdate",
    "startlanguage",
    "pets_dog",
    "pets_cat",
    "color",
    "color_other",
    "why",
    "notes",
];

/// Temporary working directory holding both survey inputs.
pub struct SurveyFixture {
    pub dir: TempDir,
}

impl SurveyFixture {
    pub fn new(names: &[&str], responses: &[&[&str]]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let fixture = Self { dir };
        fixture.write_structure(STRUCTURE_ROWS);
        fixture.write_responses(RESPONSE_TITLES, names, responses);
        fixture
    }

    pub fn standard(responses: &[&[&str]]) -> Self {
        Self::new(RESPONSE_NAMES, responses)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn structure_path(&self) -> PathBuf {
        self.root().join("limesurvey_survey_482731.txt")
    }

    pub fn responses_path(&self) -> PathBuf {
        self.root().join("vvexport_482731.txt")
    }

    pub fn output_path(&self) -> PathBuf {
        self.root().join("translated_EDNA_482731.txt")
    }

    pub fn write_structure(&self, rows: &[&str]) {
        let mut text = String::from(STRUCTURE_HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        std::fs::write(self.structure_path(), text).expect("write structure");
    }

    pub fn write_responses(&self, titles: &[&str], names: &[&str], responses: &[&[&str]]) {
        let mut text = String::new();
        for row in [titles, names].into_iter().chain(responses.iter().copied()) {
            text.push_str(&row.join("\t"));
            text.push('\n');
        }
        std::fs::write(self.responses_path(), text).expect("write responses");
    }

    /// Run the binary with the fixture directory as working directory.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_edna-translate"))
            .args(args)
            .current_dir(self.root())
            .env("RUST_LOG", "off")
            .env("XDG_CONFIG_HOME", self.root())
            .output()
            .expect("run edna-translate")
    }

    pub fn translate(&self) -> Output {
        self.run(&[
            "translate",
            "--structure",
            "limesurvey_survey_482731.txt",
            "--responses",
            "vvexport_482731.txt",
        ])
    }

    /// Output file split into rows of tab-separated cells.
    pub fn output_rows(&self) -> Vec<Vec<String>> {
        let text = std::fs::read_to_string(self.output_path()).expect("read output");
        text.lines()
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect()
    }
}

pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
