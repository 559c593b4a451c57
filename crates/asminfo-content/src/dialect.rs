//! Source dialect detection and syntax tables

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static SLASH_LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*//").unwrap());
static TICK_LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*'").unwrap());
static SLASH_BLOCK_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*/\*").unwrap());
static SLASH_BLOCK_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*/").unwrap());
static PAREN_BLOCK_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\(\*").unwrap());
static PAREN_BLOCK_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\)").unwrap());

/// Supported source dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    CSharp,
    VisualBasic,
    FSharp,
}

impl Dialect {
    /// Detect dialect from a file extension (without the leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "cs" => Some(Self::CSharp),
            "vb" => Some(Self::VisualBasic),
            "fs" => Some(Self::FSharp),
            _ => None,
        }
    }

    /// Detect dialect from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDialect`] for any extension other than
    /// `.cs`, `.vb`, or `.fs`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_extension(&extension).ok_or(Error::UnsupportedDialect { extension })
    }

    /// Default file extensions for this dialect
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::CSharp => &["cs"],
            Self::VisualBasic => &["vb"],
            Self::FSharp => &["fs"],
        }
    }

    /// Opening wrapper used when synthesizing a new declaration line
    pub fn declaration_prefix(&self) -> &'static str {
        match self {
            Self::CSharp => "[assembly: ",
            Self::VisualBasic => "<Assembly: ",
            Self::FSharp => "[<assembly: ",
        }
    }

    /// Closing wrapper used when synthesizing a new declaration line
    pub fn declaration_suffix(&self) -> &'static str {
        match self {
            Self::CSharp => ")]",
            Self::VisualBasic => ")>",
            Self::FSharp => ")>]",
        }
    }

    /// Spelling of a boolean literal in this dialect
    pub fn boolean_literal(&self, value: bool) -> &'static str {
        match self {
            Self::CSharp | Self::FSharp => {
                if value {
                    "true"
                } else {
                    "false"
                }
            }
            Self::VisualBasic => {
                if value {
                    "True"
                } else {
                    "False"
                }
            }
        }
    }

    /// Pattern matching a line that is entirely a single-line comment
    pub(crate) fn line_comment(&self) -> &'static Regex {
        match self {
            Self::CSharp | Self::FSharp => &SLASH_LINE_COMMENT,
            Self::VisualBasic => &TICK_LINE_COMMENT,
        }
    }

    /// Pattern matching a block comment opener at the start of a line.
    /// VB.NET has no block comment form.
    pub(crate) fn block_comment_start(&self) -> Option<&'static Regex> {
        match self {
            Self::CSharp => Some(&SLASH_BLOCK_START),
            Self::FSharp => Some(&PAREN_BLOCK_START),
            Self::VisualBasic => None,
        }
    }

    /// Pattern matching a block comment terminator anywhere in a line
    pub(crate) fn block_comment_end(&self) -> Option<&'static Regex> {
        match self {
            Self::CSharp => Some(&SLASH_BLOCK_END),
            Self::FSharp => Some(&PAREN_BLOCK_END),
            Self::VisualBasic => None,
        }
    }
}
