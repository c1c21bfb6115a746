// SPDX-License-Identifier: MIT OR Apache-2.0

//! ack2vim - Open ack matches in vim
//!
//! Runs ack in files-with-matches mode, translates the pattern to Vim
//! search syntax and prints the vim command for the calling shell to run.

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

use ack2vim::config::{Config, ConfigOutputFormat};
use ack2vim::errors::EXIT_TEMPFAIL;
use ack2vim::interpreter::{self, SearchSpec, SearchToolArgs};
use ack2vim::search::{self, SearchTool};
use ack2vim::synthesize::distinct_files;
use ack2vim::{aliases, interpret, synthesize, synthesize_each, translate, Ack2VimError};
use cli::{Cli, OutputFormat};

/// JSON report for `--format json`
#[derive(Debug, Serialize)]
struct Report<'a> {
    search_args: &'a SearchToolArgs,
    /// The source pattern and the modifiers that shaped its translation
    pattern: &'a SearchSpec,
    translated: &'a str,
    files: Vec<String>,
    command: &'a str,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            let code = err
                .downcast_ref::<Ack2VimError>()
                .map_or(1, Ack2VimError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(Level::WARN.into())
            .from_env_lossy()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    init_logging(interpreter::editor_options(cli.args.as_slice()).verbose);
    let config = Config::load(cli.config.as_deref());

    if cli.print_aliases {
        println!("{}", aliases::render_shell_functions("ack2vim"));
        return Ok(0);
    }

    debug!(args = ?cli.args, "interpreting passthrough arguments");
    let invocation = interpret(cli.args.as_slice())?;
    debug!(spec = ?invocation.spec, editor = ?invocation.editor, "interpreted arguments");

    let files = match cli.files_from.as_deref() {
        Some(source) => search::read_file_list(source)?,
        None => {
            let program = config.merge_search_tool(cli.search_tool.as_deref());
            let tool = SearchTool::resolve(&program)?;
            tool.run(&invocation.search)
                .with_context(|| format!("{} search failed", tool.name()))?
        }
    };
    debug!(matched = files.len(), "collected matched files");

    let translated = translate(&invocation.spec);
    debug!(pattern = %translated, "translated pattern");

    let editor = config.merge_editor(cli.editor.as_deref(), cli.no_tabs);
    let format = cli.format.unwrap_or(match config.output_format() {
        Some(ConfigOutputFormat::Json) => OutputFormat::Json,
        _ => OutputFormat::Text,
    });

    if format == OutputFormat::Json {
        let command = synthesize(&translated, files.as_slice(), &editor);
        let report = Report {
            search_args: &invocation.search,
            pattern: &invocation.spec,
            translated: translated.as_str(),
            files: distinct_files(files.iter().cloned()),
            command: command.as_str(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(0);
    }

    if invocation.editor.open_in_editor {
        let command = synthesize(&translated, files.as_slice(), &editor);
        if command.is_noop() {
            info!("no matching files");
        } else {
            println!("{command}");
        }
        return Ok(0);
    }

    let commands = synthesize_each(&translated, files.as_slice(), &editor);
    if commands.is_empty() {
        info!("no matching files");
        return Ok(0);
    }
    println!("{}", commands.join("\n"));
    Ok(EXIT_TEMPFAIL as u8)
}
