// SPDX-License-Identifier: MIT OR Apache-2.0

//! ack2vim - Open ack matches in vim
//!
//! Translates an ack (Perl regex) search into a Vim search pattern and
//! builds the command line that opens every matching file with that search
//! pre-loaded.

pub mod aliases;
pub mod config;
pub mod errors;
pub mod interpreter;
pub mod presets;
pub mod search;
pub mod synthesize;
pub mod translate;

pub use errors::{Ack2VimError, Result};
pub use interpreter::{interpret, EditorOptions, Invocation, SearchSpec, SearchToolArgs};
pub use synthesize::{synthesize, synthesize_each, EditorCommand, EditorSettings};
pub use translate::{translate, TranslatedPattern};
