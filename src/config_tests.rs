use super::*;

fn temp_config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp config");
    std::io::Write::write_all(&mut file, contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn default_config_validates_and_round_trips_through_stub() {
    let config = default_config();
    validate_config(&config).expect("default config is valid");

    let stub = config_stub().expect("render stub");
    let parsed: CodingConfig = serde_json::from_str(&stub).expect("parse stub");
    assert_eq!(parsed, config);
}

#[test]
fn partial_config_files_fall_back_to_defaults() {
    let file = temp_config_file(r#"{ "max_name_len": 30 }"#);
    let config = load_config(file.path()).expect("load partial config");
    assert_eq!(config.max_name_len, 30);
    assert_eq!(config.question_not_shown, QUESTION_NOT_SHOWN);
    assert_eq!(config.ignored_columns.len(), IGNORED_COLUMNS.len());
}

#[test]
fn unknown_schema_version_is_rejected() {
    let file = temp_config_file(r#"{ "schema_version": 7 }"#);
    let err = load_config(file.path()).expect_err("schema version 7 rejected");
    assert!(err.to_string().contains("schema_version 7"));
}

#[test]
fn lower_case_non_answers_are_rejected() {
    let mut config = default_config();
    config.non_answers.push("n/a".to_string());
    assert!(validate_config(&config).is_err());
}

#[test]
fn ignore_set_matches_trimmed_names_case_sensitively() {
    let config = default_config();
    assert!(config.is_ignored(" token "));
    assert!(config.is_ignored(""));
    assert!(!config.is_ignored("Token"));
    assert!(!config.is_ignored("q1"));
}

#[test]
fn non_answer_match_ignores_case() {
    let config = default_config();
    assert!(config.is_non_answer("n/a"));
    assert!(config.is_non_answer("Not Available"));
    assert!(config.is_non_answer("?"));
    assert!(!config.is_non_answer(" NA"));
    assert!(!config.is_non_answer("nothing"));
}

#[test]
fn output_file_name_embeds_survey_id() {
    assert_eq!(
        default_config().output_file_name("123456"),
        "translated_EDNA_123456.txt"
    );
}
