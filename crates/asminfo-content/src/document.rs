//! Unified document model: the line sequence plus the declaration table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::dialect::Dialect;
use crate::line::{self, Line, LineEnding};
use crate::parser::{self, LineTemplate};
use crate::value::Value;

/// A named declaration found in (or appended to) a document.
///
/// The declaration refers to its line by index rather than by reference, so
/// appending new lines never invalidates earlier declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    name: String,
    value: Value,
    line_index: usize,
    template: LineTemplate,
}

impl Declaration {
    /// Short declaration name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Index of the owning line in the document.
    pub fn line_index(&self) -> usize {
        self.line_index
    }
}

/// A parsed metadata source file.
///
/// Holds every physical line of the input plus an index of the declarations
/// found on non-comment lines. Only the first occurrence of a declaration
/// name is indexed; later duplicates are skipped. Serialization reproduces
/// the input byte-for-byte except for lines whose declaration value was
/// changed and lines appended for newly created declarations.
#[derive(Debug, Clone)]
pub struct Document {
    dialect: Dialect,
    lines: Vec<Line>,
    declarations: HashMap<String, Declaration>,
    /// Terminator used when a line must be added; taken from the first
    /// terminated line of the input.
    newline: LineEnding,
}

impl Document {
    /// Parse source text into a document.
    pub fn parse(source: &str, dialect: Dialect) -> Self {
        let lines = line::classify(source, dialect);

        let newline = lines
            .iter()
            .map(|l| l.ending)
            .find(|e| *e != LineEnding::Eof)
            .unwrap_or_default();

        let mut declarations = HashMap::new();
        for (index, line) in lines.iter().enumerate() {
            if line.is_comment {
                continue;
            }
            let Some(parsed) = parser::parse(&line.text) else {
                continue;
            };
            match declarations.entry(parsed.name.clone()) {
                Entry::Occupied(_) => {
                    tracing::debug!(
                        name = %parsed.name,
                        line = index,
                        "duplicate declaration skipped, first occurrence wins"
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(Declaration {
                        name: parsed.name,
                        value: Value::decode(&parsed.raw_value),
                        line_index: index,
                        template: parsed.template,
                    });
                }
            }
        }

        Self {
            dialect,
            lines,
            declarations,
            newline,
        }
    }

    /// The document's dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// All physical lines, in order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Look up a declaration by name.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    /// Current value of a declaration, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.declarations.get(name).map(|d| &d.value)
    }

    /// Current value of a declaration, creating it when absent.
    ///
    /// A created declaration is appended to the end of the document with a
    /// default value: `1.0.0.0` for the two version declarations, an empty
    /// string for everything else.
    pub fn get_or_ensure(&mut self, name: &str) -> &Value {
        if !self.declarations.contains_key(name) {
            let value = default_value(name);
            self.append_declaration(name, value);
        }
        &self.declarations[name].value
    }

    /// Update the value of an existing declaration and rewrite its line.
    ///
    /// Setting a declaration that does not exist is a silent no-op.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let Some(declaration) = self.declarations.get_mut(name) else {
            tracing::debug!(name, "declaration not present, update skipped");
            return;
        };
        declaration.value = value.into();
        self.lines[declaration.line_index].text = declaration
            .template
            .render(&declaration.value.encode(self.dialect));
    }

    /// Update the value of a declaration, creating it when absent.
    pub fn set_or_ensure(&mut self, name: &str, value: impl Into<Value>) {
        if self.declarations.contains_key(name) {
            self.set(name, value);
        } else {
            self.append_declaration(name, value.into());
        }
    }

    /// Serialize the document back to text.
    ///
    /// Every line is written with the terminator it was read with, so a
    /// document with no updates applied reproduces its input exactly.
    pub fn to_source(&self) -> String {
        let capacity = self
            .lines
            .iter()
            .map(|l| l.text.len() + l.ending.as_str().len())
            .sum();
        let mut out = String::with_capacity(capacity);
        for line in &self.lines {
            out.push_str(&line.text);
            out.push_str(line.ending.as_str());
        }
        out
    }

    /// Append a new declaration line at the end of the document.
    ///
    /// A trailing empty line (from input ending in a line break) is reused
    /// as the slot for the new declaration and the trailing break is
    /// reinstated after it, so the file keeps ending the way it did.
    fn append_declaration(&mut self, name: &str, value: Value) {
        let template = LineTemplate::synthesized(self.dialect, name);
        let text = template.render(&value.encode(self.dialect));

        let reuse_trailing_empty = self
            .lines
            .last()
            .is_some_and(|l| l.text.is_empty() && l.ending == LineEnding::Eof);

        let line_index = if reuse_trailing_empty {
            let index = self.lines.len() - 1;
            if index == 0 {
                // entirely empty input: the new line is the whole file
                self.lines[0].text = text;
            } else {
                let newline = self.newline;
                let last = &mut self.lines[index];
                last.text = text;
                last.ending = newline;
                self.lines.push(Line {
                    text: String::new(),
                    ending: LineEnding::Eof,
                    is_comment: false,
                });
            }
            index
        } else {
            if let Some(last) = self.lines.last_mut() {
                last.ending = self.newline;
            }
            self.lines.push(Line {
                text,
                ending: LineEnding::Eof,
                is_comment: false,
            });
            self.lines.len() - 1
        };

        tracing::debug!(name, line = line_index, "declaration created");
        self.declarations.insert(
            name.to_string(),
            Declaration {
                name: name.to_string(),
                value,
                line_index,
                template,
            },
        );
    }
}

fn default_value(name: &str) -> Value {
    match name {
        "AssemblyVersion" | "AssemblyFileVersion" => Value::Str("1.0.0.0".to_string()),
        _ => Value::Str(String::new()),
    }
}
