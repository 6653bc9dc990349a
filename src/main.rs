use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod coder;
mod config;
mod error;
mod export;
mod header;
mod schema;
mod sink;
mod structure;
mod translate;
mod validate;
mod writer;

use cli::{Command, InputArgs, PreviewArgs, RootArgs, TranslateArgs};
use sink::{DiagnosticSink, NullSink, WriterSink};
use translate::{preview_lines, run_translate, translate_files, TranslateRequest};

/// A failure the diagnostic sink has already shown to the user.
#[derive(Debug, thiserror::Error)]
#[error("translation failed")]
struct Reported;

fn main() -> ExitCode {
    let args = RootArgs::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Command::Translate(args) => cmd_translate(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Config(_) => cmd_config(),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !err.is::<Reported>() {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_translate(args: TranslateArgs) -> Result<()> {
    let config = config::resolve_config(args.input.config.as_deref())?;
    let request = request(&args.input, &config);
    let mut sink: Box<dyn DiagnosticSink> = if args.quiet {
        Box::new(NullSink)
    } else {
        Box::new(WriterSink::new(std::io::stdout()))
    };
    // `--quiet` drops the sink's copy, so the error is printed once by `main`.
    run_translate(&request, &args.out_dir, sink.as_mut())
        .map_err(|err| if args.quiet { err } else { Reported.into() })?;
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> Result<()> {
    let config = config::resolve_config(args.input.config.as_deref())?;
    let request = request(&args.input, &config);
    let mut sink = WriterSink::new(std::io::stderr());
    let translation = translate_files(&request, &mut sink).map_err(|_| Reported)?;

    let mut stdout = std::io::stdout().lock();
    for line in preview_lines(&translation, args.row)? {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

fn cmd_config() -> Result<()> {
    println!("{}", config::config_stub()?);
    Ok(())
}

fn request<'a>(input: &'a InputArgs, config: &'a config::CodingConfig) -> TranslateRequest<'a> {
    TranslateRequest {
        structure: &input.structure,
        responses: &input.responses,
        config,
    }
}
