// SPDX-License-Identifier: MIT OR Apache-2.0

//! Short command names for the shell profile
//!
//! Each alias is a preset plus whether the result is opened straight away.
//! Only `--print-aliases` reads this table; the shell does the rest.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    pub name: &'static str,
    pub preset: Option<&'static str>,
    pub open_in_editor: bool,
}

const fn alias(name: &'static str, preset: Option<&'static str>, open_in_editor: bool) -> Alias {
    Alias {
        name,
        preset,
        open_in_editor,
    }
}

pub const ALIASES: &[Alias] = &[
    alias("a", None, false),
    alias("va", None, true),
    alias("apy", Some("py"), false),
    alias("vapy", Some("py"), true),
    alias("ars", Some("rs"), false),
    alias("vars", Some("rs"), true),
    alias("ajs", Some("js"), false),
    alias("vajs", Some("js"), true),
    alias("ash", Some("sh"), false),
    alias("vash", Some("sh"), true),
    alias("aimp", Some("import"), false),
    alias("vaimp", Some("import"), true),
    alias("atodo", Some("todo"), false),
    alias("vatodo", Some("todo"), true),
];

impl Alias {
    /// A POSIX shell function invoking `program` with this alias's flags.
    pub fn shell_function(&self, program: &str) -> String {
        let mut invocation = program.to_string();
        if self.open_in_editor {
            invocation.push_str(" -v");
        }
        if let Some(preset) = self.preset {
            invocation.push_str(" --");
            invocation.push_str(preset);
        }
        invocation.push_str(" \"$@\"");

        if self.open_in_editor {
            format!("{}() {{ eval \"$({invocation})\"; }}", self.name)
        } else {
            format!("{}() {{ {invocation}; }}", self.name)
        }
    }
}

/// Every alias as a shell function, one per line.
pub fn render_shell_functions(program: &str) -> String {
    ALIASES
        .iter()
        .map(|alias| alias.shell_function(program))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    fn lookup(name: &str) -> Option<&'static Alias> {
        ALIASES.iter().find(|alias| alias.name == name)
    }

    #[test]
    fn every_alias_preset_exists() {
        for alias in ALIASES {
            if let Some(preset) = alias.preset {
                assert!(
                    presets::lookup(&format!("--{preset}")).is_some(),
                    "alias {} names unknown preset {}",
                    alias.name,
                    preset
                );
            }
        }
    }

    #[test]
    fn alias_names_are_unique() {
        for (idx, alias) in ALIASES.iter().enumerate() {
            assert!(ALIASES[idx + 1..].iter().all(|other| other.name != alias.name));
        }
    }

    #[test]
    fn editor_alias_evals_the_command() {
        let alias = lookup("vapy").expect("vapy alias");
        assert_eq!(
            alias.shell_function("ack2vim"),
            "vapy() { eval \"$(ack2vim -v --py \"$@\")\"; }"
        );
    }

    #[test]
    fn listing_alias_runs_directly() {
        let alias = lookup("a").expect("a alias");
        assert_eq!(alias.shell_function("ack2vim"), "a() { ack2vim \"$@\"; }");
    }

    #[test]
    fn render_emits_one_line_per_alias() {
        assert_eq!(render_shell_functions("ack2vim").lines().count(), ALIASES.len());
    }
}
