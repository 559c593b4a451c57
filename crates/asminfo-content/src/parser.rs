//! Declaration recognition.
//!
//! A declaration is a single-line `assembly:`-scoped attribute in any of the
//! three wrapper styles (`[...]`, `<...>`, `[<...>]`). The matcher accepts
//! all three regardless of dialect, so files can also be sniffed from
//! content. Everything around the name and argument spans is captured
//! verbatim into a [`LineTemplate`] so edits reproduce the rest of the line
//! byte-for-byte, including trailing same-line comments.

use std::sync::LazyLock;

use regex::Regex;

use crate::dialect::Dialect;

// Name matching is lazy so a redundant `Attribute` suffix lands in its own
// group; the argument span is lazy so it stops at the first closing sequence.
static DECLARATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?<prefix>\s*[\[<]<?\s*[Aa]ssembly\s*:\s*)(?<name_text>(?<name>\w+?)(?:Attribute)?)(?<infix>\s*\(\s*)(?<value>.*?)(?<suffix>\s*\)\s*>?[>\]].*)"#,
    )
    .unwrap()
});

/// A parsed line with the name and argument spans replaced by placeholders.
///
/// Rendering substitutes the original name token (with its original
/// spelling, including any `Attribute` suffix) and a new encoded argument,
/// reproducing every other character of the source line. Rendering is
/// stable: re-parsing a rendered line and rendering it again yields the
/// same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTemplate {
    prefix: String,
    name_text: String,
    infix: String,
    suffix: String,
}

impl LineTemplate {
    /// Template for a brand-new declaration line in the given dialect.
    pub fn synthesized(dialect: Dialect, name: &str) -> Self {
        Self {
            prefix: dialect.declaration_prefix().to_string(),
            name_text: name.to_string(),
            infix: "(".to_string(),
            suffix: dialect.declaration_suffix().to_string(),
        }
    }

    /// Rebuild the full line around an encoded argument.
    pub fn render(&self, encoded_value: &str) -> String {
        format!(
            "{}{}{}{}{}",
            self.prefix, self.name_text, self.infix, encoded_value, self.suffix
        )
    }

    /// The name token as it appears in the source line.
    pub fn name_text(&self) -> &str {
        &self.name_text
    }
}

/// Result of matching a declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDeclaration {
    /// Short declaration name (`Attribute` suffix stripped).
    pub name: String,
    /// Raw argument text, quotes included.
    pub raw_value: String,
    /// Reusable template for rewriting the line.
    pub template: LineTemplate,
}

/// Whether the line contains a declaration.
pub fn matches(line: &str) -> bool {
    DECLARATION_PATTERN.is_match(line)
}

/// Parse a declaration line into its name, raw argument, and template.
pub fn parse(line: &str) -> Option<ParsedDeclaration> {
    let caps = DECLARATION_PATTERN.captures(line)?;

    Some(ParsedDeclaration {
        name: caps["name"].to_string(),
        raw_value: caps["value"].to_string(),
        template: LineTemplate {
            prefix: caps["prefix"].to_string(),
            name_text: caps["name_text"].to_string(),
            infix: caps["infix"].to_string(),
            suffix: caps["suffix"].to_string(),
        },
    })
}
