// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// ack2vim - Open ack matches in vim
///
/// Runs ack, then prints a vim command that opens every matching file with
/// the search pre-loaded. Without -v, one command per file is listed and
/// the exit status is 75.
#[derive(Parser, Debug)]
#[command(name = "ack2vim")]
#[command(
    version,
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
    override_usage = "ack2vim [OPTIONS] [ACK ARGS]... <PATTERN> [PATHS]...",
    after_help = "Examples:\n  eval \"$(ack2vim -v -w main)\"\n  ack2vim -v --import sys\n  rg -l TODO | ack2vim --files-from - -v TODO\n\nShell aliases:\n  ack2vim --print-aliases >> ~/.bashrc"
)]
pub struct Cli {
    /// Editor program for the emitted command
    #[arg(long, value_name = "PROG")]
    pub editor: Option<String>,

    /// Search tool to run
    #[arg(long, value_name = "PROG")]
    pub search_tool: Option<String>,

    /// Do not open files in tab pages
    #[arg(long)]
    pub no_tabs: bool,

    /// Read matched files from FILE (or stdin for `-`) instead of running the search tool
    #[arg(long, value_name = "FILE")]
    pub files_from: Option<String>,

    /// Output format (text or json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Config file to use instead of the default locations
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print shell functions for the short aliases and exit
    #[arg(long)]
    pub print_aliases: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Print version
    #[arg(long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Flags for ack and ack2vim, the pattern, then paths
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
