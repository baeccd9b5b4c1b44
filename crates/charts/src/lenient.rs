//! Lenient Payload Parser
//!
//! The analytics service does not always emit strict JSON for `chart_data`.
//! Observed dialects include JavaScript-style object literals (bare keys,
//! single-quoted strings), Python dict reprs, and numeric arrays cut off
//! mid-stream. This module turns any of these into a candidate JSON value,
//! applying narrowly-scoped text repairs only after a strict parse fails.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// A double-encoded payload (a JSON string holding JSON) is unwrapped at most this often.
const MAX_STRING_NESTING: usize = 2;

static WHITESPACE: OnceLock<Regex> = OnceLock::new();
static BARE_KEY: OnceLock<Regex> = OnceLock::new();
static PYTHON_LITERAL: OnceLock<Regex> = OnceLock::new();
static DANGLING_DECIMAL: OnceLock<Regex> = OnceLock::new();
static TRAILING_COMMA: OnceLock<Regex> = OnceLock::new();
static LEADING_COMMA: OnceLock<Regex> = OnceLock::new();
static DUPLICATE_COMMA: OnceLock<Regex> = OnceLock::new();

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("repair pattern is a valid regex"))
}

/// Turn a raw `chart_data` value into a candidate object.
///
/// - `null` and blank strings yield no candidate
/// - strings go through [`parse_lenient`]
/// - anything else is already structured and is used as-is
pub fn parse_chart_payload(raw: &Value) -> Option<Value> {
    match raw {
        Value::Null => None,
        Value::String(text) => match parse_lenient(text) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("[LenientParser] Chart payload unusable: {}", e);
                None
            }
        },
        other => Some(other.clone()),
    }
}

/// Parse a payload string, repairing it when strict parsing fails.
pub fn parse_lenient(text: &str) -> ChartResult<Value> {
    parse_nested(text, 0)
}

fn parse_nested(text: &str, depth: usize) -> ChartResult<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ChartError::parse("chart payload string is empty"));
    }

    let value = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => value,
        Err(strict_err) => {
            tracing::debug!(
                "[LenientParser] Strict parse failed ({}), applying repairs",
                strict_err
            );
            let repaired = repair(trimmed);
            serde_json::from_str::<Value>(&repaired)
                .map_err(|e| ChartError::parse(format!("{} after repairs", e)))?
        }
    };

    match value {
        Value::String(inner) if depth < MAX_STRING_NESTING => parse_nested(&inner, depth + 1),
        other => Ok(other),
    }
}

/// Apply every text repair, in order, to a payload that failed strict parsing.
///
/// Strings are rewritten first so that every later repair only ever sees
/// the text between string literals.
pub fn repair(text: &str) -> String {
    let quoted = requote_strings(text.trim());
    let keyed = map_unquoted(&quoted, |code| {
        let collapsed = collapse_whitespace(code);
        replace_python_literals(&quote_keys(&collapsed))
    });

    let (cut, truncated) = strip_truncated_tail(&keyed);
    if truncated {
        tracing::debug!("[LenientParser] Removed incomplete trailing fragment");
    }

    let balanced = balance_brackets(&cut);
    map_unquoted(&balanced, remove_stray_commas)
}

/// One run of payload text: either a double-quoted string literal
/// (possibly left open at the end of the text) or the code between literals.
#[derive(Debug, PartialEq)]
enum Span<'a> {
    Code(&'a str),
    Quoted(&'a str),
}

/// Split text whose strings are all double-quoted into code and string spans.
fn spans(text: &str) -> Vec<Span<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                out.push(Span::Quoted(&text[start..=i]));
                start = i + 1;
                in_string = false;
            }
        } else if ch == '"' {
            if start < i {
                out.push(Span::Code(&text[start..i]));
            }
            start = i;
            in_string = true;
        }
    }
    if start < text.len() {
        let rest = &text[start..];
        out.push(if in_string {
            Span::Quoted(rest)
        } else {
            Span::Code(rest)
        });
    }
    out
}

/// Apply `repair` to the code between string literals, leaving strings intact.
fn map_unquoted(text: &str, repair: impl Fn(&str) -> String) -> String {
    spans(text)
        .into_iter()
        .map(|span| match span {
            Span::Code(code) => repair(code),
            Span::Quoted(literal) => literal.to_string(),
        })
        .collect()
}

/// Rewrite every string literal as a valid JSON string.
///
/// Single-quoted strings become double-quoted. A single quote only closes
/// the string when the next non-space character is a delimiter (`,` `:` `}`
/// `]`) or the end of the text, so apostrophes inside items survive. Raw
/// control characters inside any string are escaped.
fn requote_strings(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '"' => {
                out.push('"');
                i += 1;
                while i < chars.len() {
                    let ch = chars[i];
                    i += 1;
                    match ch {
                        '\\' => {
                            out.push('\\');
                            if let Some(&next) = chars.get(i) {
                                out.push(next);
                                i += 1;
                            }
                        }
                        '"' => {
                            out.push('"');
                            break;
                        }
                        other => push_string_char(&mut out, other),
                    }
                }
            }
            '\'' => {
                out.push('"');
                i += 1;
                while i < chars.len() {
                    let ch = chars[i];
                    i += 1;
                    match ch {
                        '\\' => match chars.get(i) {
                            Some('\'') => {
                                out.push('\'');
                                i += 1;
                            }
                            Some(&next) => {
                                out.push('\\');
                                out.push(next);
                                i += 1;
                            }
                            None => {}
                        },
                        '\'' if closes_single_quote(&chars[i..]) => {
                            out.push('"');
                            break;
                        }
                        '"' => out.push_str("\\\""),
                        other => push_string_char(&mut out, other),
                    }
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    out
}

fn closes_single_quote(rest: &[char]) -> bool {
    match rest.iter().find(|c| !c.is_whitespace()) {
        None => true,
        Some(c) => matches!(c, ',' | ':' | '}' | ']'),
    }
}

fn push_string_char(out: &mut String, ch: char) {
    match ch {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
        c => out.push(c),
    }
}

fn collapse_whitespace(code: &str) -> String {
    regex(&WHITESPACE, r"\s+").replace_all(code, " ").into_owned()
}

/// `{key:` / `,key:` become `{"key":` / `,"key":`.
fn quote_keys(code: &str) -> String {
    regex(&BARE_KEY, r"([{,]\s*)([A-Za-z_$][A-Za-z0-9_$]*)\s*:")
        .replace_all(code, r#"${1}"${2}":"#)
        .into_owned()
}

/// `True` / `False` / `None` in value position become JSON literals.
fn replace_python_literals(code: &str) -> String {
    let pattern = regex(&PYTHON_LITERAL, r"([:\[,]\s*)(True|False|None)(\s*[,}\]]|\s*$)");
    let mut current = code.to_string();
    // Adjacent literals share a delimiter, so repeat until nothing changes.
    loop {
        let next = pattern
            .replace_all(&current, |caps: &Captures| {
                let literal = match &caps[2] {
                    "True" => "true",
                    "False" => "false",
                    _ => "null",
                };
                format!("{}{}{}", &caps[1], literal, &caps[3])
            })
            .into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Drop a dangling decimal (`3.`) and any dangling commas at the very end.
///
/// Text that ends inside an open string is left for bracket balancing.
fn strip_truncated_tail(text: &str) -> (String, bool) {
    if matches!(spans(text).last(), Some(Span::Quoted(_))) {
        return (text.to_string(), false);
    }

    let mut out = text.trim_end().to_string();
    let mut truncated = false;

    if let Some(m) = regex(&DANGLING_DECIMAL, r"-?\d+\.\s*$").find(&out) {
        out.truncate(m.start());
        truncated = true;
    }

    loop {
        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
        if out.ends_with(',') {
            out.pop();
            truncated = true;
        } else {
            break;
        }
    }

    (out, truncated)
}

/// Close any string, list, or object left open, innermost first.
fn balance_brackets(text: &str) -> String {
    let mut expected_closers: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => expected_closers.push('}'),
            '[' => expected_closers.push(']'),
            '}' | ']' => {
                if expected_closers.last() == Some(&ch) {
                    expected_closers.pop();
                }
            }
            _ => {}
        }
    }

    let mut out = text.to_string();
    if in_string {
        // A cut-off escape cannot be completed
        if escaped {
            out.pop();
        }
        out.push('"');
    }
    if !expected_closers.is_empty() {
        tracing::debug!(
            "[LenientParser] Appending {} missing closer(s)",
            expected_closers.len()
        );
        out.extend(expected_closers.iter().rev());
    }
    out
}

fn remove_stray_commas(code: &str) -> String {
    let deduped = regex(&DUPLICATE_COMMA, r",(\s*,)+").replace_all(code, ",");
    let no_trailing = regex(&TRAILING_COMMA, r",\s*([\]}])").replace_all(&deduped, "${1}");
    regex(&LEADING_COMMA, r"([\[{])\s*,")
        .replace_all(&no_trailing, "${1}")
        .into_owned()
}

/// Render a value in the service's loose object-literal dialect.
///
/// Keys that are plain identifiers are left unquoted and strings are
/// single-quoted unless they contain a quote or backslash, in which case
/// they fall back to JSON string syntax.
pub fn to_object_literal(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, v)| format!("{}:{}", literal_key(key), to_object_literal(v)))
                .collect();
            format!("{{{}}}", entries.join(","))
        }
        Value::Array(items) => {
            let entries: Vec<String> = items.iter().map(to_object_literal).collect();
            format!("[{}]", entries.join(","))
        }
        Value::String(s) => {
            if s.contains(['\'', '"', '\\']) {
                Value::String(s.clone()).to_string()
            } else {
                format!("'{}'", s)
            }
        }
        other => other.to_string(),
    }
}

fn literal_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if is_identifier {
        key.to_string()
    } else {
        Value::String(key.to_string()).to_string()
    }
}
