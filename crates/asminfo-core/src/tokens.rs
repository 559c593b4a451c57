//! `$(token)` placeholder expansion.
//!
//! Values may embed `$(name)` or `$(name:parameter)` placeholders. Expansion
//! is a pure function of the text and a [`TokenContext`]; the context
//! carries everything a token can refer to, so no evaluator state is shared
//! between calls.

use std::sync::LazyLock;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use regex::Regex;

use crate::error::{Error, Result};

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\(([^:)]*)(?::([^)]+))?\)").unwrap());

/// Everything a token can resolve against.
#[derive(Debug, Clone, Copy)]
pub struct TokenContext<'a> {
    /// The version component being evaluated; zero outside version slots.
    pub current: u32,
    /// Timestamp for `$(date:...)`, fixed once per batch.
    pub now: DateTime<Local>,
    /// The resolved assembly version of the current file, if any.
    pub version: &'a str,
    /// The resolved assembly file version of the current file, if any.
    pub file_version: &'a str,
}

impl<'a> TokenContext<'a> {
    /// A context with no version information.
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            current: 0,
            now,
            version: "",
            file_version: "",
        }
    }

    /// The same context bound to a different current component value.
    pub fn with_current(&self, current: u32) -> Self {
        Self { current, ..*self }
    }
}

/// Expand every `$(...)` placeholder in `text`.
///
/// Token names are matched case-insensitively. Recognized tokens:
/// `current`, `increment`, `date:<strftime format>`, `version`,
/// `fileversion`.
///
/// # Errors
///
/// Returns [`Error::UnknownToken`] for an unrecognized token name and
/// [`Error::InvalidDateFormat`] for a malformed date format parameter.
pub fn expand(text: &str, ctx: &TokenContext<'_>) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut tail = 0;

    for caps in TOKEN_PATTERN.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let token = caps.get(1).map_or("", |m| m.as_str());
        let param = caps.get(2).map_or("", |m| m.as_str());

        let replacement = match token.to_ascii_lowercase().as_str() {
            "current" => ctx.current.to_string(),
            "increment" => (ctx.current + 1).to_string(),
            "date" => format_date(&ctx.now, param)?,
            "version" => ctx.version.to_string(),
            "fileversion" => ctx.file_version.to_string(),
            _ => {
                return Err(Error::UnknownToken {
                    token: token.to_string(),
                });
            }
        };

        tracing::debug!(token, param, %replacement, "token expanded");
        out.push_str(&text[tail..whole.start()]);
        out.push_str(&replacement);
        tail = whole.end();
    }

    out.push_str(&text[tail..]);
    Ok(out)
}

fn format_date(now: &DateTime<Local>, format: &str) -> Result<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.contains(&Item::Error) {
        return Err(Error::InvalidDateFormat {
            format: format.to_string(),
        });
    }
    Ok(now.format_with_items(items.iter()).to_string())
}
