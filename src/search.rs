// SPDX-License-Identifier: MIT OR Apache-2.0

//! External search tool invocation
//!
//! Runs the search tool in files-with-matches mode and collects the paths it
//! prints, one per line.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::errors::{Ack2VimError, Result};
use crate::interpreter::SearchToolArgs;

pub const DEFAULT_SEARCH_TOOL: &str = "ack";

/// Flags that make the tool print only file names, uncoloured.
const LIST_FILES_FLAGS: &[&str] = &["--files-with-matches", "--nocolor"];

/// A search tool resolved on `PATH`
#[derive(Debug, Clone)]
pub struct SearchTool {
    name: String,
    path: PathBuf,
}

impl SearchTool {
    pub fn resolve(program: &str) -> Result<Self> {
        let path = which::which(program).map_err(|_| Ack2VimError::SearchToolNotFound {
            program: program.to_string(),
        })?;
        Ok(Self {
            name: program.to_string(),
            path,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full argument list for a files-with-matches run.
    pub fn command_args(args: &SearchToolArgs) -> Vec<String> {
        LIST_FILES_FLAGS
            .iter()
            .map(|flag| flag.to_string())
            .chain(args.to_args())
            .collect()
    }

    /// Run the tool and return the matched paths in output order.
    ///
    /// Exit status 1 with no output means nothing matched and yields an empty
    /// list. Any other non-zero status is an error.
    pub fn run(&self, args: &SearchToolArgs) -> Result<Vec<String>> {
        let argv = Self::command_args(args);
        debug!(tool = %self.path.display(), ?argv, "running search tool");

        let output = Command::new(&self.path)
            .args(&argv)
            .output()
            .map_err(|e| Ack2VimError::io(format!("Failed to run {}", self.name), e))?;

        let status = shell_status(output.status);
        if status == 0 || (status == 1 && output.stdout.is_empty()) {
            let files = parse_file_list(&output.stdout)?;
            debug!(status, matched = files.len(), "search tool finished");
            return Ok(files);
        }

        Err(Ack2VimError::SearchToolFailed {
            status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Exit status the way a shell reports it: `128 + signal` for a killed
/// process, so a tool interrupted by a signal never reads as "no matches".
fn shell_status(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    status.code().unwrap_or(128)
}

/// One path per non-blank line. Paths must be valid UTF-8; a lossy decode
/// would open a different file than the one that matched.
pub fn parse_file_list(stdout: &[u8]) -> Result<Vec<String>> {
    stdout
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(|line| {
            std::str::from_utf8(line)
                .map(str::to_string)
                .map_err(|_| Ack2VimError::NonUtf8Path {
                    lossy: String::from_utf8_lossy(line).into_owned(),
                })
        })
        .collect()
}

/// Read a file list from a path, or from stdin when `source` is `-`.
pub fn read_file_list(source: &str) -> Result<Vec<String>> {
    let mut raw = Vec::new();
    if source == "-" {
        std::io::stdin()
            .read_to_end(&mut raw)
            .map_err(|e| Ack2VimError::io("Failed to read file list from stdin", e))?;
    } else {
        raw = fs::read(source)
            .map_err(|e| Ack2VimError::io(format!("Failed to read file list {source}"), e))?;
    }
    parse_file_list(&raw)
}
