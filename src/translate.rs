// SPDX-License-Identifier: MIT OR Apache-2.0

//! Perl-style regex to Vim search pattern translation
//!
//! The output targets Vim's default `magic` mode, or `\V` for literal
//! searches, and is always safe to embed in a `/` search command.
//!
//! Translation never fails. Constructs Vim has no counterpart for pass
//! through with best-effort escaping; the search tool is the authority on
//! whether the source pattern is valid.

use serde::Serialize;
use std::fmt;

use crate::interpreter::SearchSpec;

/// A pattern in Vim search syntax
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranslatedPattern(String);

impl TranslatedPattern {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TranslatedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Output of the dialect remapping step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remapped {
    pub pattern: String,
    /// An inline `(?i)` flag was found and dropped
    pub ignore_case: bool,
}

/// Translate a search spec into a Vim search pattern.
pub fn translate(spec: &SearchSpec) -> TranslatedPattern {
    let mut case_sensitive = spec.case_sensitive;

    let pattern = if spec.literal {
        let body = escape_literal(&spec.pattern);
        let body = if spec.whole_word { worded(&body) } else { body };
        format!(r"\V{body}")
    } else {
        let remapped = remap_dialect(&escape_meta(&spec.pattern));
        case_sensitive &= !remapped.ignore_case;
        if spec.whole_word {
            worded(&remapped.pattern)
        } else {
            remapped.pattern
        }
    };

    if case_sensitive {
        TranslatedPattern(pattern)
    } else {
        TranslatedPattern(format!(r"\c{pattern}"))
    }
}

/// Escape bare characters that are literal in Perl regex but special in a
/// Vim `/` search. Escape pairs, bracket expressions and `\Q...\E` runs are
/// left alone, which makes the step idempotent.
pub fn escape_meta(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' if chars.get(i + 1) == Some(&'Q') => {
                let (_, end) = quote_end(&chars, i + 2);
                out.extend(&chars[i..end]);
                i = end;
            }
            '\\' => {
                let end = (i + 2).min(chars.len());
                out.extend(&chars[i..end]);
                i = end;
            }
            '[' => match bracket_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end + 1;
                }
                None => {
                    out.push('[');
                    i += 1;
                }
            },
            '~' | '/' => {
                out.push('\\');
                out.push(chars[i]);
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Rewrite Perl grouping, alternation, quantifier and anchor syntax into
/// Vim magic syntax.
pub fn remap_dialect(pattern: &str) -> Remapped {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut ignore_case = false;
    // Suffix to emit after each open group's closing `\)`.
    let mut groups: Vec<&'static str> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match c {
            '\\' => {
                let Some(n) = next else {
                    out.push_str(r"\\");
                    break;
                };
                i += 2;
                match n {
                    'b' => {
                        let opens = chars
                            .get(i)
                            .is_some_and(|&a| is_word_char(a) || matches!(a, '(' | '[' | '\\'));
                        out.push_str(if opens { r"\<" } else { r"\>" });
                    }
                    'A' => out.push('^'),
                    'z' | 'Z' => out.push('$'),
                    'Q' => {
                        let (content_end, resume) = quote_end(&chars, i);
                        for &q in &chars[i..content_end] {
                            push_magic_literal(&mut out, q);
                        }
                        i = resume;
                    }
                    _ => i = remap_escape(&chars, n, i, &mut out),
                }
                continue;
            }
            '(' if next == Some('?') => {
                i = open_extended_group(&chars, i, &mut out, &mut groups, &mut ignore_case);
                continue;
            }
            '(' => {
                groups.push("");
                out.push_str(r"\(");
            }
            ')' => {
                out.push_str(r"\)");
                if let Some(suffix) = groups.pop() {
                    out.push_str(suffix);
                }
            }
            '|' => out.push_str(r"\|"),
            '*' if next == Some('?') => {
                out.push_str(r"\{-}");
                i += 1;
            }
            '+' if next == Some('?') => {
                out.push_str(r"\{-1,}");
                i += 1;
            }
            '?' if next == Some('?') => {
                out.push_str(r"\{-0,1}");
                i += 1;
            }
            '+' => out.push_str(r"\+"),
            '?' => out.push_str(r"\="),
            '{' => match counted_quantifier(&chars, i) {
                Some(end) => {
                    let body: String = chars[i + 1..end].iter().collect();
                    if chars.get(end + 1) == Some(&'?') {
                        out.push_str(&format!(r"\{{-{body}}}"));
                        i = end + 1;
                    } else {
                        out.push_str(&format!(r"\{{{body}}}"));
                        i = end;
                    }
                }
                None => out.push('{'),
            },
            '[' => match bracket_end(&chars, i) {
                Some(end) => {
                    out.push_str(&remap_bracket(&chars[i..=end]));
                    i = end;
                }
                None => out.push_str(r"\["),
            },
            '~' | '/' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
        i += 1;
    }

    Remapped {
        pattern: out,
        ignore_case,
    }
}

/// Handle a `(?...` construct starting at `start`. Returns the index to
/// resume scanning from.
fn open_extended_group(
    chars: &[char],
    start: usize,
    out: &mut String,
    groups: &mut Vec<&'static str>,
    ignore_case: &mut bool,
) -> usize {
    let rest: String = chars[start + 2..].iter().take(3).collect();
    let lookaround = [
        ("<=", r"\@<="),
        ("<!", r"\@<!"),
        ("=", r"\@="),
        ("!", r"\@!"),
        (">", r"\@>"),
        (":", ""),
    ];
    for (marker, suffix) in lookaround {
        if rest.starts_with(marker) {
            out.push_str(if marker == ":" { r"\%(" } else { r"\(" });
            groups.push(suffix);
            return start + 2 + marker.chars().count();
        }
    }

    // Named groups: (?<name>...) and (?P<name>...)
    if rest.starts_with('<') || rest.starts_with("P<") {
        if let Some(close) = chars[start..].iter().position(|&c| c == '>') {
            out.push_str(r"\(");
            groups.push("");
            return start + close + 1;
        }
    }

    // Inline flags (?i), (?s-i) and scoped flag groups (?i:...). Vim can only
    // fold case for the whole pattern, so a scoped `i` applies everywhere.
    let mut j = start + 2;
    let mut negated = false;
    let mut flags_ignore_case = false;
    while let Some(&f) = chars.get(j) {
        match f {
            ')' => {
                *ignore_case |= flags_ignore_case;
                return j + 1;
            }
            ':' => {
                *ignore_case |= flags_ignore_case;
                out.push_str(r"\%(");
                groups.push("");
                return j + 1;
            }
            '-' => negated = true,
            'i' if !negated => flags_ignore_case = true,
            f if f.is_ascii_alphabetic() => {}
            _ => break,
        }
        j += 1;
    }

    // Anything else: keep the group, drop the `?`.
    out.push_str(r"\(");
    groups.push("");
    start + 2
}

/// Rewrite the escape `\<n>` whose letter sits just before `i`. Returns the
/// index to resume scanning from.
///
/// Escapes both dialects read the same way are kept. Escaped punctuation is a
/// literal in Perl, so it becomes bare unless Vim magic needs the backslash.
/// Letters Vim would read as something else are rewritten, or reduced to the
/// bare letter when Vim has no counterpart.
fn remap_escape(chars: &[char], n: char, i: usize, out: &mut String) -> usize {
    match n {
        'd' | 'D' | 'w' | 'W' | 's' | 'S' | 'n' | 't' | 'r' | 'e' | '1'..='9' | '\\' | '.'
        | '*' | '[' | ']' | '~' | '^' | '$' | '/' => {
            out.push('\\');
            out.push(n);
        }
        'h' => out.push_str(r"[ \t]"),
        'H' => out.push_str(r"[^ \t]"),
        'v' => out.push_str(r"[\n\x0b\x0c\r]"),
        'V' => out.push_str(r"[^\n\x0b\x0c\r]"),
        'R' => out.push_str(r"\%(\r\n\|[\n\x0b\x0c\r]\)"),
        'N' => out.push('.'),
        'K' => out.push_str(r"\zs"),
        'f' => push_code_point(out, 0x0c),
        'a' => push_code_point(out, 0x07),
        'x' => return remap_hex_escape(chars, i, out),
        'o' if chars.get(i) == Some(&'{') => {
            if let Some((value, end)) = braced_number(chars, i, 8) {
                push_code_point(out, value);
                return end;
            }
            out.push('o');
        }
        '0' => {
            let digits = chars[i..]
                .iter()
                .take(2)
                .take_while(|c| matches!(c, '0'..='7'))
                .count();
            let text: String = chars[i..i + digits].iter().collect();
            push_code_point(out, u32::from_str_radix(&text, 8).unwrap_or(0));
            return i + digits;
        }
        'c' => match chars.get(i) {
            Some(&ctrl) if ctrl.is_ascii() => {
                push_code_point(out, u32::from(ctrl.to_ascii_uppercase()) ^ 0x40);
                return i + 1;
            }
            _ => out.push('c'),
        },
        // Zero-width assertions Vim cannot express, and a stray `\E`.
        'B' | 'G' | 'E' => {}
        _ => out.push(n),
    }
    i
}

/// `\xHH` (up to two digits) or `\x{HHHH}`; `i` points just past the `x`.
fn remap_hex_escape(chars: &[char], i: usize, out: &mut String) -> usize {
    if chars.get(i) == Some(&'{') {
        if let Some((value, end)) = braced_number(chars, i, 16) {
            push_code_point(out, value);
            return end;
        }
        out.push('x');
        return i;
    }
    let digits = chars[i..]
        .iter()
        .take(2)
        .take_while(|c| c.is_ascii_hexdigit())
        .count();
    let text: String = chars[i..i + digits].iter().collect();
    push_code_point(out, u32::from_str_radix(&text, 16).unwrap_or(0));
    i + digits
}

/// Parse `{digits}` at `start` in the given radix. Returns the value and the
/// index past the closing brace.
fn braced_number(chars: &[char], start: usize, radix: u32) -> Option<(u32, usize)> {
    let close = chars[start..].iter().position(|&c| c == '}')? + start;
    let text: String = chars[start + 1..close].iter().collect();
    let value = u32::from_str_radix(text.trim(), radix).ok()?;
    Some((value, close + 1))
}

/// Vim's numeric character items, padded so following digits are not absorbed.
fn push_code_point(out: &mut String, value: u32) {
    if value <= 0xff {
        out.push_str(&format!(r"\%x{value:02x}"));
    } else if value <= 0xffff {
        out.push_str(&format!(r"\%u{value:04x}"));
    } else {
        out.push_str(&format!(r"\%U{value:08x}"));
    }
}

/// Index of the `}` closing a valid `{n}`, `{n,}`, `{,m}` or `{n,m}` at `start`.
fn counted_quantifier(chars: &[char], start: usize) -> Option<usize> {
    let mut digits = 0;
    let mut commas = 0;
    for (offset, &c) in chars[start + 1..].iter().enumerate() {
        match c {
            '0'..='9' => digits += 1,
            ',' if commas == 0 => commas += 1,
            '}' if digits > 0 => return Some(start + 1 + offset),
            _ => return None,
        }
    }
    None
}

/// Index of the `]` closing the bracket expression opened at `start`.
fn bracket_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start + 1;
    if chars.get(j) == Some(&'^') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    while j < chars.len() {
        match chars[j] {
            '\\' => j += 2,
            '[' if matches!(chars.get(j + 1), Some(':' | '=' | '.')) => {
                let delim = chars[j + 1];
                let close = (j + 2..chars.len().saturating_sub(1))
                    .find(|&k| chars[k] == delim && chars[k + 1] == ']');
                j = close.map_or(j + 1, |k| k + 2);
            }
            ']' => return Some(j),
            _ => j += 1,
        }
    }
    None
}

/// End of the quoted content of a `\Q` run starting at `start`, and the
/// index just past its `\E` (both are the end of input when unterminated).
fn quote_end(chars: &[char], start: usize) -> (usize, usize) {
    (start..chars.len().saturating_sub(1))
        .find(|&k| chars[k] == '\\' && chars[k + 1] == 'E')
        .map_or((chars.len(), chars.len()), |k| (k, k + 2))
}

/// Vim collections don't understand Perl class escapes.
fn remap_bracket(class: &[char]) -> String {
    let mut out = String::with_capacity(class.len());
    let mut i = 0;
    while i < class.len() {
        if class[i] == '\\' && i + 1 < class.len() {
            match class[i + 1] {
                'd' => out.push_str("0-9"),
                'w' => out.push_str("0-9A-Za-z_"),
                's' => out.push_str(" \\t"),
                n => {
                    out.push('\\');
                    out.push(n);
                }
            }
            i += 2;
        } else {
            out.push(class[i]);
            i += 1;
        }
    }
    out
}

fn push_magic_literal(out: &mut String, c: char) {
    if matches!(c, '\\' | '.' | '*' | '[' | ']' | '~' | '/' | '^' | '$') {
        out.push('\\');
    }
    out.push(c);
}

/// Escape for a `\V` search: only backslash and the `/` delimiter are special.
pub fn escape_literal(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '/') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Wrap in `\<` ... `\>` unless the anchors are already there.
pub fn worded(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    if !pattern.starts_with(r"\<") {
        out.push_str(r"\<");
    }
    out.push_str(pattern);
    if !ends_with_word_end(pattern) {
        out.push_str(r"\>");
    }
    out
}

/// True when the pattern ends in a `\>` whose backslash is not itself escaped.
fn ends_with_word_end(pattern: &str) -> bool {
    let Some(head) = pattern.strip_suffix('>') else {
        return false;
    };
    let backslashes = head.chars().rev().take_while(|&c| c == '\\').count();
    backslashes % 2 == 1
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
