// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argument interpreter
//!
//! Splits the flat token list handed over by the calling shell into the
//! search-tool arguments, the editor options and the [`SearchSpec`].

use serde::Serialize;
use std::iter::Peekable;

use crate::errors::{Ack2VimError, Result};
use crate::presets::{self, PatternSource};

/// Long flags of the search tool that consume the following token.
const LONG_FLAGS_WITH_VALUE: &[&str] = &[
    "--after-context",
    "--before-context",
    "--files-from",
    "--ignore-dir",
    "--ignore-directory",
    "--ignore-file",
    "--max-count",
    "--noignore-dir",
    "--noignore-directory",
    "--output",
    "--range-end",
    "--range-start",
    "--type",
    "--type-add",
    "--type-del",
    "--type-set",
];

/// Short flags of the search tool that consume the rest of the cluster or the next token.
const SHORT_FLAGS_WITH_VALUE: &[char] = &['A', 'B', 'g', 'G', 'm', 't'];

/// `-C`/`--context` take an optional count, consumed only when it is numeric.
const LONG_FLAGS_WITH_COUNT: &[&str] = &["--context"];
const SHORT_FLAGS_WITH_COUNT: &[char] = &['C'];

fn is_count(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// What the user asked to search for, and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSpec {
    pub pattern: String,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub literal: bool,
    pub file_type_flags: Vec<String>,
}

/// Arguments forwarded to the search tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchToolArgs {
    pub flags: Vec<String>,
    pub pattern: String,
    pub paths: Vec<String>,
}

impl SearchToolArgs {
    /// Flags, then `--`, the pattern and the paths.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = self.flags.clone();
        args.push("--".to_string());
        args.push(self.pattern.clone());
        args.extend(self.paths.iter().cloned());
        args
    }
}

/// Options consumed by ack2vim itself and never forwarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorOptions {
    /// `-v`: emit one command that opens every file
    pub open_in_editor: bool,
    /// `-V`: debug logging
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub search: SearchToolArgs,
    pub editor: EditorOptions,
    pub spec: SearchSpec,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum CaseMode {
    #[default]
    Sensitive,
    Insensitive,
    Smart,
}

#[derive(Default)]
struct State {
    flags: Vec<String>,
    positionals: Vec<String>,
    file_type_flags: Vec<String>,
    built_pattern: Option<String>,
    default_pattern: Option<&'static str>,
    case: CaseMode,
    whole_word: bool,
    literal: bool,
    editor: EditorOptions,
}

impl State {
    fn push_flag(&mut self, flag: &str) {
        if !self.flags.iter().any(|f| f == flag) {
            self.flags.push(flag.to_string());
        }
    }

    /// Apply a modifier carried by a short flag character. Returns false when
    /// the character belongs to ack2vim and must not be forwarded.
    fn short_modifier(&mut self, c: char) -> bool {
        match c {
            'v' => {
                self.editor.open_in_editor = true;
                return false;
            }
            'V' => {
                self.editor.verbose = true;
                return false;
            }
            'w' => self.whole_word = true,
            'i' => self.case = CaseMode::Insensitive,
            'I' => self.case = CaseMode::Sensitive,
            'S' => self.case = CaseMode::Smart,
            'Q' => self.literal = true,
            _ => {}
        }
        true
    }

    /// Long-flag counterpart of [`State::short_modifier`].
    fn long_modifier(&mut self, flag: &str) -> bool {
        match flag {
            "--vim" => {
                self.editor.open_in_editor = true;
                return false;
            }
            "--verbose" => {
                self.editor.verbose = true;
                return false;
            }
            "--word-regexp" => self.whole_word = true,
            "--ignore-case" => self.case = CaseMode::Insensitive,
            "--no-ignore-case" => self.case = CaseMode::Sensitive,
            "--smart-case" => self.case = CaseMode::Smart,
            "--literal" => self.literal = true,
            _ => {}
        }
        true
    }

    fn short_cluster<'a, I>(&mut self, cluster: &str, rest: &mut Peekable<I>)
    where
        I: Iterator<Item = &'a str>,
    {
        let mut kept = String::new();
        let mut chars = cluster.char_indices();
        while let Some((idx, c)) = chars.next() {
            let tail = &cluster[idx + c.len_utf8()..];
            if SHORT_FLAGS_WITH_VALUE.contains(&c) {
                self.flush_cluster(&mut kept);
                self.flags.push(format!("-{c}"));
                if tail.is_empty() {
                    if let Some(next) = rest.next() {
                        self.flags.push(next.to_string());
                    }
                } else {
                    self.flags.push(tail.to_string());
                }
                return;
            }
            if SHORT_FLAGS_WITH_COUNT.contains(&c) {
                self.flush_cluster(&mut kept);
                self.flags.push(format!("-{c}"));
                let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
                if digits > 0 {
                    self.flags.push(tail[..digits].to_string());
                    for _ in 0..digits {
                        chars.next();
                    }
                } else if tail.is_empty() {
                    if let Some(count) = rest.next_if(|next| is_count(next)) {
                        self.flags.push(count.to_string());
                    }
                }
                continue;
            }
            if self.short_modifier(c) {
                kept.push(c);
            }
        }
        self.flush_cluster(&mut kept);
    }

    /// Forward the plain flags gathered so far as one combined flag.
    fn flush_cluster(&mut self, kept: &mut String) {
        if !kept.is_empty() {
            self.push_flag(&format!("-{kept}"));
            kept.clear();
        }
    }

    fn finish(self) -> Result<Invocation> {
        let mut positionals = self.positionals.into_iter();
        let (pattern, paths) = match self.built_pattern {
            Some(pattern) => (pattern, positionals.collect()),
            None => match positionals.next() {
                Some(pattern) => (pattern, positionals.collect()),
                None => match self.default_pattern {
                    Some(pattern) => (pattern.to_string(), Vec::new()),
                    None => return Err(Ack2VimError::MissingPattern),
                },
            },
        };

        let case_sensitive = match self.case {
            CaseMode::Sensitive => true,
            CaseMode::Insensitive => false,
            CaseMode::Smart => pattern.chars().any(char::is_uppercase),
        };

        Ok(Invocation {
            search: SearchToolArgs {
                flags: self.flags,
                pattern: pattern.clone(),
                paths,
            },
            editor: self.editor,
            spec: SearchSpec {
                pattern,
                case_sensitive,
                whole_word: self.whole_word,
                literal: self.literal,
                file_type_flags: self.file_type_flags,
            },
        })
    }
}

/// Interpret the passthrough token list.
pub fn interpret<S: AsRef<str>>(tokens: &[S]) -> Result<Invocation> {
    let mut state = State::default();
    scan(tokens, &mut state)?;
    state.finish()
}

/// The editor options in `tokens`, even when they do not form a valid
/// invocation. Lets `-V` take effect before interpretation errors are reported.
pub fn editor_options<S: AsRef<str>>(tokens: &[S]) -> EditorOptions {
    let mut state = State::default();
    // Options seen before a failure are still recorded in `state`.
    let _ = scan(tokens, &mut state);
    state.editor
}

fn scan<S: AsRef<str>>(tokens: &[S], state: &mut State) -> Result<()> {
    let mut tokens = tokens.iter().map(|token| token.as_ref()).peekable();

    while let Some(token) = tokens.next() {
        if token == "--" {
            state.positionals.extend(tokens.by_ref().map(str::to_string));
            break;
        }

        if let Some(preset) = presets::lookup(token) {
            for flag in preset.search_flags {
                state.push_flag(flag);
                if !state.file_type_flags.iter().any(|f| f == flag) {
                    state.file_type_flags.push(flag.to_string());
                }
            }
            match preset.pattern {
                PatternSource::Taken => {}
                PatternSource::Default(pattern) => state.default_pattern = Some(pattern),
                PatternSource::FromIdentifier(build) => {
                    let identifier =
                        tokens
                            .next()
                            .ok_or_else(|| Ack2VimError::MissingPresetArgument {
                                preset: preset.name.to_string(),
                            })?;
                    state.built_pattern = Some(build(identifier));
                }
            }
            continue;
        }

        if token.starts_with("--") {
            let name = token.split('=').next().unwrap_or(token);
            if name == "--match" {
                // The pattern given as a flag; it is forwarded after `--` like any other.
                let pattern = match token.split_once('=') {
                    Some((_, value)) => Some(value),
                    None => tokens.next(),
                };
                if let Some(pattern) = pattern {
                    state.built_pattern = Some(pattern.to_string());
                }
                continue;
            }
            if state.long_modifier(name) {
                state.flags.push(token.to_string());
                if !token.contains('=') {
                    if LONG_FLAGS_WITH_VALUE.contains(&name) {
                        if let Some(value) = tokens.next() {
                            state.flags.push(value.to_string());
                        }
                    } else if LONG_FLAGS_WITH_COUNT.contains(&name) {
                        if let Some(count) = tokens.next_if(|next| is_count(next)) {
                            state.flags.push(count.to_string());
                        }
                    }
                }
            }
            continue;
        }

        if let Some(cluster) = token.strip_prefix('-').filter(|c| !c.is_empty()) {
            state.short_cluster(cluster, &mut tokens);
            continue;
        }

        state.positionals.push(token.to_string());
    }

    Ok(())
}
