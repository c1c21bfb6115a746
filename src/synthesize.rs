// SPDX-License-Identifier: MIT OR Apache-2.0

//! Editor command synthesis
//!
//! Builds the shell command line that opens the matched files and jumps to
//! the first match. Every word is quoted with POSIX shell rules so that paths
//! round-trip exactly when the calling shell evaluates the command.

use std::collections::HashSet;
use std::fmt;

use crate::translate::TranslatedPattern;

pub const DEFAULT_EDITOR: &str = "vim";

/// How the editor is launched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    /// Editor program, emitted as-is (it may carry its own arguments)
    pub program: String,
    /// Open the files in tab pages (`-p`)
    pub tab_pages: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_EDITOR.to_string(),
            tab_pages: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Nothing matched; there is nothing to open
    Noop,
    Open(String),
}

impl EditorCommand {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }

    /// The command text; empty for [`EditorCommand::Noop`].
    pub fn as_str(&self) -> &str {
        match self {
            Self::Noop => "",
            Self::Open(command) => command,
        }
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drop repeated paths, keeping the first occurrence of each.
pub fn distinct_files<I, S>(files: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    for file in files {
        let file = file.into();
        if seen.insert(file.clone()) {
            distinct.push(file);
        }
    }
    distinct
}

fn search_word(pattern: &TranslatedPattern) -> String {
    shell_words::quote(&format!("+/{pattern}")).into_owned()
}

/// One command opening every distinct file, searching in the first.
pub fn synthesize<S: AsRef<str>>(
    pattern: &TranslatedPattern,
    files: &[S],
    settings: &EditorSettings,
) -> EditorCommand {
    let files = distinct_files(files.iter().map(|f| f.as_ref()));
    if files.is_empty() {
        return EditorCommand::Noop;
    }

    let mut words = vec![settings.program.clone()];
    if settings.tab_pages {
        words.push("-p".to_string());
    }
    words.extend(files.iter().map(|f| shell_words::quote(f).into_owned()));
    words.push(search_word(pattern));

    EditorCommand::Open(words.join(" "))
}

/// One command per distinct file, for listing rather than running.
pub fn synthesize_each<S: AsRef<str>>(
    pattern: &TranslatedPattern,
    files: &[S],
    settings: &EditorSettings,
) -> Vec<String> {
    let search = search_word(pattern);
    distinct_files(files.iter().map(|f| f.as_ref()))
        .iter()
        .map(|file| format!("{} {} {}", settings.program, shell_words::quote(file), search))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::SearchSpec;
    use crate::translate::translate;

    fn pattern(source: &str, whole_word: bool) -> TranslatedPattern {
        translate(&SearchSpec {
            pattern: source.to_string(),
            case_sensitive: true,
            whole_word,
            literal: false,
            file_type_flags: Vec::new(),
        })
    }

    #[test]
    fn opens_all_files_and_searches_first() {
        let cmd = synthesize(
            &pattern("main", true),
            &["a.py", "b.py"],
            &EditorSettings::default(),
        );
        assert_eq!(cmd.as_str(), r"vim -p a.py b.py '+/\<main\>'");
    }

    #[test]
    fn import_alternation_scenario() {
        let cmd = synthesize(
            &pattern("(import sys|from sys import)", false),
            &["mod.py"],
            &EditorSettings::default(),
        );
        assert_eq!(
            cmd.as_str(),
            r"vim -p mod.py '+/\(import sys\|from sys import\)'"
        );
    }

    #[test]
    fn empty_match_set_is_noop() {
        let files: [&str; 0] = [];
        let cmd = synthesize(&pattern("x", false), &files, &EditorSettings::default());
        assert!(cmd.is_noop());
        assert_eq!(cmd.to_string(), "");
        assert!(synthesize_each(&pattern("x", false), &files, &EditorSettings::default()).is_empty());
    }

    #[test]
    fn duplicates_open_once_in_first_seen_order() {
        assert_eq!(
            distinct_files(["b.py", "a.py", "b.py", "c.py", "a.py"]),
            vec!["b.py", "a.py", "c.py"]
        );

        let cmd = synthesize(
            &pattern("x", false),
            &["b.py", "a.py", "b.py"],
            &EditorSettings::default(),
        );
        assert_eq!(cmd.as_str(), "vim -p b.py a.py +/x");
    }

    #[test]
    fn awkward_paths_round_trip_through_the_shell() {
        let files = ["my file.py", "it's.py", "say \"hi\".rs", "$HOME/x"];
        let cmd = synthesize(&pattern("x", false), &files, &EditorSettings::default());
        let words = shell_words::split(cmd.as_str()).expect("valid shell words");
        assert_eq!(words[0], "vim");
        assert_eq!(words[1], "-p");
        assert_eq!(&words[2..6], &files);
        assert_eq!(words[6], "+/x");
    }

    #[test]
    fn pattern_word_round_trips_through_the_shell() {
        let translated = pattern(r"it's (a|b)", false);
        let cmd = synthesize(&translated, &["f"], &EditorSettings::default());
        let words = shell_words::split(cmd.as_str()).expect("valid shell words");
        assert_eq!(words.last().unwrap(), &format!("+/{translated}"));
    }

    #[test]
    fn tab_pages_can_be_disabled() {
        let settings = EditorSettings {
            program: "nvim".to_string(),
            tab_pages: false,
        };
        let cmd = synthesize(&pattern("x", false), &["a"], &settings);
        assert_eq!(cmd.as_str(), "nvim a +/x");
    }

    #[test]
    fn listing_emits_one_command_per_distinct_file() {
        let lines = synthesize_each(
            &pattern("main", true),
            &["a.py", "b.py", "a.py"],
            &EditorSettings::default(),
        );
        assert_eq!(
            lines,
            vec![r"vim a.py '+/\<main\>'", r"vim b.py '+/\<main\>'"]
        );
    }
}
