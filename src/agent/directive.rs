//! Directive parsing
//!
//! Interprets one raw model reply as a structured directive. The protocol
//! is line-oriented: the reply must contain a line starting with `Action:`,
//! and everything after the marker is the action body, either
//! `finish(answer="...")` or a tool call `name(key="value", ...)`.
//!
//! Parsing is pure text-to-structure; identical input always yields the
//! identical directive.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Line starting with the action marker; the body is everything after it
static ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*Action:[ \t]*").unwrap());

/// The finish form, checked before generic tool-call matching
static FINISH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\Afinish\s*\(\s*answer\s*=\s*"(.*)"\s*\)\s*\z"#).unwrap()
});

/// Generic tool-call shape: identifier followed by a parenthesized body
static CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A([A-Za-z0-9_]+)\s*\((.*)\)\s*\z").unwrap());

/// The structured interpretation of one model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// The model produced its final answer
    Finish { answer: String },
    /// The model wants a tool executed
    Invoke {
        tool_name: String,
        arguments: BTreeMap<String, String>,
    },
    /// No recognizable action in the reply
    Malformed { raw_text: String },
}

/// Parse one raw model reply into a [`Directive`].
pub fn parse(reply: &str) -> Directive {
    let Some(marker) = ACTION_RE.find(reply) else {
        return Directive::Malformed {
            raw_text: reply.to_string(),
        };
    };
    let body = reply[marker.end()..].trim();

    // finish(...) takes priority over generic tool matching, so an answer
    // containing something call-shaped still terminates the loop.
    if let Some(caps) = FINISH_RE.captures(body) {
        return Directive::Finish {
            answer: caps[1].to_string(),
        };
    }

    if let Some(caps) = CALL_RE.captures(body) {
        if let Some(arguments) = parse_argument_list(&caps[2]) {
            return Directive::Invoke {
                tool_name: caps[1].to_string(),
                arguments,
            };
        }
    }

    Directive::Malformed {
        raw_text: reply.to_string(),
    }
}

/// Tokenize a comma-separated list of `key="value"` pairs.
///
/// An empty list is legal and yields an empty map. Non-empty text that
/// matches no pair, trailing garbage after the pairs, and duplicate keys
/// are all rejected (`None`), so a mangled argument list surfaces as a
/// malformed directive instead of a silently empty invocation.
fn parse_argument_list(text: &str) -> Option<BTreeMap<String, String>> {
    let mut arguments = BTreeMap::new();
    let mut rest = text.trim();
    if rest.is_empty() {
        return Some(arguments);
    }

    loop {
        let (key, after_key) = take_identifier(rest)?;
        let after_eq = after_key.trim_start().strip_prefix('=')?;
        let after_quote = after_eq.trim_start().strip_prefix('"')?;
        // Values are double-quoted with no escaping: the value runs to the
        // next quote.
        let value_end = after_quote.find('"')?;
        let value = &after_quote[..value_end];

        if arguments.insert(key.to_string(), value.to_string()).is_some() {
            return None;
        }

        rest = after_quote[value_end + 1..].trim_start();
        if rest.is_empty() {
            return Some(arguments);
        }
        rest = rest.strip_prefix(',')?.trim_start();
    }
}

/// Split a leading identifier (letters, digits, underscore) off `s`.
fn take_identifier(s: &str) -> Option<(&str, &str)> {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some((&s[..end], &s[end..]))
}
