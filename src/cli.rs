//! CLI argument parsing for the translation workflow.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "edna-translate",
    version,
    about = "Translate LimeSurvey response exports into EDNA status-coded files",
    after_help = "Examples:\n  edna-translate translate --structure limesurvey_survey_482731.txt --responses vvexport_482731.txt\n  edna-translate preview --structure limesurvey_survey_482731.txt --responses vvexport_482731.txt --row 3\n  edna-translate config > edna.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Translate(TranslateArgs),
    Preview(PreviewArgs),
    Config(ConfigArgs),
}

/// Input files shared by every command that reads a survey.
#[derive(Parser, Debug)]
pub struct InputArgs {
    /// LimeSurvey structure export (limesurvey_survey_<sid>.txt)
    #[arg(long, value_name = "FILE")]
    pub structure: PathBuf,

    /// LimeSurvey VV response export (vvexport_<sid>.txt)
    #[arg(long, value_name = "FILE")]
    pub responses: PathBuf,

    /// JSON coding config (defaults to the per-user config, then built-ins)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(about = "Translate a response export and write translated_EDNA_<sid>.txt")]
pub struct TranslateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory to write the translated file into
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Suppress warnings and the output-path message
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Show name:value>code for one coded response without writing")]
pub struct PreviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Zero-based response row to show
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub row: usize,
}

#[derive(Parser, Debug)]
#[command(about = "Print the default coding config as JSON")]
pub struct ConfigArgs {}
