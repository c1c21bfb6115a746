// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types with helpful suggestions
//!
//! Provides user-friendly error messages with actionable suggestions.

use thiserror::Error;

/// `EX_USAGE` from sysexits.h
pub const EXIT_USAGE: i32 = 64;
/// `EX_DATAERR` from sysexits.h
pub const EXIT_DATAERR: i32 = 65;
/// `EX_UNAVAILABLE` from sysexits.h
pub const EXIT_UNAVAILABLE: i32 = 69;
/// `EX_IOERR` from sysexits.h
pub const EXIT_IOERR: i32 = 74;
/// `EX_TEMPFAIL` from sysexits.h, used when a per-file listing was printed
pub const EXIT_TEMPFAIL: i32 = 75;

pub type Result<T> = std::result::Result<T, Ack2VimError>;

#[derive(Debug, Error)]
pub enum Ack2VimError {
    #[error(
        "No search pattern given\n\n\
         Suggestion: pass a pattern after the flags.\n\
         Example: ack2vim -v -w main\n\
         Or use a preset that supplies one: ack2vim -v --todo"
    )]
    MissingPattern,

    #[error(
        "Preset '--{preset}' expects an identifier after it\n\n\
         Example: ack2vim -v --{preset} sys"
    )]
    MissingPresetArgument { preset: String },

    #[error(
        "Search tool '{program}' was not found on PATH\n\n\
         Suggestion: install it, or point ack2vim at another program.\n\
         Example: ack2vim --search-tool ack-grep -v main\n\
         Or feed file names directly: rg -l main | ack2vim --files-from - -v main"
    )]
    SearchToolNotFound { program: String },

    #[error("Search tool exited with status {status}: {stderr}")]
    SearchToolFailed { status: i32, stderr: String },

    #[error(
        "Matched path is not valid UTF-8: {lossy}\n\n\
         Suggestion: rename the file, or narrow the search so it is not matched."
    )]
    NonUtf8Path { lossy: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Ack2VimError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingPattern | Self::MissingPresetArgument { .. } => EXIT_USAGE,
            Self::SearchToolNotFound { .. } => EXIT_UNAVAILABLE,
            Self::SearchToolFailed { status, .. } => *status,
            Self::NonUtf8Path { .. } => EXIT_DATAERR,
            Self::Io { .. } => EXIT_IOERR,
        }
    }
}
