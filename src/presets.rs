// SPDX-License-Identifier: MIT OR Apache-2.0

//! Preset dispatch table
//!
//! A preset is a `--<name>` shorthand that expands to search-tool flags and
//! says where the search pattern comes from.

/// Where a preset's search pattern comes from
#[derive(Debug, Clone, Copy)]
pub enum PatternSource {
    /// Pattern is taken from the argument list as usual
    Taken,
    /// The next token is an identifier; the pattern is built from it
    FromIdentifier(fn(&str) -> String),
    /// Used when no pattern token is given
    Default(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub search_flags: &'static [&'static str],
    pub pattern: PatternSource,
}

pub const PRESETS: &[Preset] = &[
    filetype("py", &["--python"]),
    filetype("rs", &["--rust"]),
    filetype("js", &["--js"]),
    filetype("sh", &["--shell"]),
    filetype("c", &["--cc"]),
    filetype("cpp", &["--cpp"]),
    filetype("go", &["--go"]),
    filetype("rb", &["--ruby"]),
    filetype("java", &["--java"]),
    filetype("html", &["--html"]),
    filetype("md", &["--markdown"]),
    Preset {
        name: "import",
        search_flags: &["--python"],
        pattern: PatternSource::FromIdentifier(python_import_pattern),
    },
    Preset {
        name: "todo",
        search_flags: &[],
        pattern: PatternSource::Default("TODO|FIXME|XXX"),
    },
];

const fn filetype(name: &'static str, search_flags: &'static [&'static str]) -> Preset {
    Preset {
        name,
        search_flags,
        pattern: PatternSource::Taken,
    }
}

/// Look up a preset by its exact flag token (`--py`, `--import`, ...).
pub fn lookup(token: &str) -> Option<&'static Preset> {
    let name = token.strip_prefix("--")?;
    PRESETS.iter().find(|preset| preset.name == name)
}

/// Matches `import IDENT` or `from IDENT import`.
pub fn python_import_pattern(identifier: &str) -> String {
    let ident = regex::escape(identifier);
    format!("(import {ident}|from {ident} import)")
}
