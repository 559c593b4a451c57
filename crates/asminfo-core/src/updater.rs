//! The batch update engine.
//!
//! For each input file: read, parse, apply the requested attribute edits in
//! a fixed order, serialize, and write back. The two version declarations
//! resolve first so later free-text values can reference them through
//! `$(version)` and `$(fileversion)`. The first file that fails aborts the
//! batch and its error propagates to the caller.

use std::path::{Path, PathBuf};

use asminfo_content::{Dialect, Document, Value};
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::options::UpdateOptions;
use crate::tokens::{self, TokenContext};
use crate::version::{self, Version};

/// Per-file outcome of a batch update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResult {
    /// The file that was updated.
    pub file: PathBuf,
    /// Computed assembly version, when that declaration was updated.
    pub assembly_version: Option<Version>,
    /// Computed assembly file version, when that declaration was updated.
    pub file_version: Option<Version>,
}

/// A fully computed update for one file, before anything is written.
#[derive(Debug, Clone)]
pub struct FileUpdate {
    pub result: UpdateResult,
    /// Resolved informational version, when that declaration was updated.
    pub informational_version: Option<String>,
    /// File content as read.
    pub original: String,
    /// File content after all edits.
    pub updated: String,
}

/// Aggregate outcome of a batch update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateSummary {
    /// Per-file results, in input order.
    pub results: Vec<UpdateResult>,
    /// Highest assembly version computed across the batch.
    pub max_assembly_version: Option<Version>,
    /// Highest assembly file version computed across the batch.
    pub max_file_version: Option<Version>,
    /// Resolved informational versions, in input order.
    pub informational_versions: Vec<String>,
}

impl UpdateSummary {
    /// Fold one file's outcome into the aggregate.
    pub fn record(&mut self, update: &FileUpdate) {
        if let Some(v) = update.result.assembly_version {
            self.max_assembly_version = Some(self.max_assembly_version.map_or(v, |m| m.max(v)));
        }
        if let Some(v) = update.result.file_version {
            self.max_file_version = Some(self.max_file_version.map_or(v, |m| m.max(v)));
        }
        if let Some(info) = &update.informational_version {
            self.informational_versions.push(info.clone());
        }
        self.results.push(update.result.clone());
    }
}

/// Applies a fixed set of attribute edits to a batch of metadata files.
pub struct UpdateEngine {
    options: UpdateOptions,
    now: DateTime<Local>,
}

impl UpdateEngine {
    /// Create an engine; `$(date:...)` tokens resolve against the current
    /// local time, captured once for the whole batch.
    pub fn new(options: UpdateOptions) -> Self {
        Self::with_timestamp(options, Local::now())
    }

    /// Create an engine with an explicit timestamp.
    pub fn with_timestamp(options: UpdateOptions, now: DateTime<Local>) -> Self {
        Self { options, now }
    }

    /// The options this engine was built with.
    pub fn options(&self) -> &UpdateOptions {
        &self.options
    }

    /// Update every file and write the results back.
    pub fn run(&self) -> Result<UpdateSummary> {
        let mut summary = UpdateSummary::default();

        for path in &self.options.files {
            let update = self.prepare(path)?;
            self.write(path, &update.updated)?;
            summary.record(&update);
        }

        Ok(summary)
    }

    /// Compute every file's update without writing anything.
    pub fn preview(&self) -> Result<Vec<FileUpdate>> {
        self.options.files.iter().map(|p| self.prepare(p)).collect()
    }

    /// Read and parse one file, then apply the full edit sequence.
    fn prepare(&self, path: &Path) -> Result<FileUpdate> {
        tracing::debug!(path = %path.display(), "updating file");

        let original = asminfo_fs::read_text(path)?;
        let dialect = Dialect::from_path(path)?;
        let mut doc = Document::parse(&original, dialect);

        let opts = &self.options;
        let base_ctx = TokenContext::new(self.now);

        let assembly_version = self.update_version(
            &mut doc,
            "AssemblyVersion",
            opts.assembly_version.as_deref(),
            &base_ctx,
        )?;
        let version_text = assembly_version.map(|v| v.to_string()).unwrap_or_default();

        let file_version = self.update_version(
            &mut doc,
            "AssemblyFileVersion",
            opts.file_version.as_deref(),
            &TokenContext {
                version: &version_text,
                ..base_ctx
            },
        )?;
        let file_version_text = file_version.map(|v| v.to_string()).unwrap_or_default();

        let ctx = TokenContext {
            current: 0,
            now: self.now,
            version: &version_text,
            file_version: &file_version_text,
        };

        let informational_version = self.update_text(
            &mut doc,
            "AssemblyInformationalVersion",
            opts.informational_version.as_deref(),
            &ctx,
        )?;

        self.update_text(&mut doc, "AssemblyCompany", opts.company.as_deref(), &ctx)?;
        self.update_text(
            &mut doc,
            "AssemblyConfiguration",
            opts.configuration.as_deref(),
            &ctx,
        )?;
        self.update_text(&mut doc, "AssemblyCopyright", opts.copyright.as_deref(), &ctx)?;
        self.update_text(
            &mut doc,
            "AssemblyDescription",
            opts.description.as_deref(),
            &ctx,
        )?;
        self.update_text(&mut doc, "AssemblyProduct", opts.product.as_deref(), &ctx)?;
        self.update_text(&mut doc, "AssemblyTitle", opts.title.as_deref(), &ctx)?;
        self.update_text(&mut doc, "AssemblyTrademark", opts.trademark.as_deref(), &ctx)?;

        self.update_plain(&mut doc, "AssemblyCulture", opts.culture.clone().map(Value::from));
        self.update_plain(&mut doc, "AssemblyDelaySign", opts.delay_sign.map(Value::from));
        self.update_plain(
            &mut doc,
            "Guid",
            opts.guid.map(|g| Value::from(g.to_string())),
        );
        self.update_plain(&mut doc, "AssemblyKeyFile", opts.key_file.clone().map(Value::from));
        self.update_plain(&mut doc, "AssemblyKeyName", opts.key_name.clone().map(Value::from));
        self.update_plain(&mut doc, "CLSCompliant", opts.cls_compliant.map(Value::from));
        self.update_plain(&mut doc, "ComVisible", opts.com_visible.map(Value::from));

        for (name, value) in &opts.custom_attributes {
            self.update_plain(&mut doc, name, Some(value.clone()));
        }

        Ok(FileUpdate {
            result: UpdateResult {
                file: path.to_path_buf(),
                assembly_version,
                file_version,
            },
            informational_version,
            original,
            updated: doc.to_source(),
        })
    }

    /// Overwrite the file, suspending a read-only attribute for the write.
    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let _guard = asminfo_fs::ReadOnlyGuard::acquire(path)?;
        asminfo_fs::write_text(path, contents)?;
        Ok(())
    }

    /// Apply a four-token version format to a version-shaped declaration.
    fn update_version(
        &self,
        doc: &mut Document,
        name: &str,
        format: Option<&str>,
        ctx: &TokenContext<'_>,
    ) -> Result<Option<Version>> {
        let Some(format) = format else {
            return Ok(None);
        };

        let current_value = if self.options.ensure_attributes {
            Some(doc.get_or_ensure(name).clone())
        } else {
            doc.get(name).cloned()
        };
        let Some(current_value) = current_value else {
            tracing::debug!(name, "declaration not present, version update skipped");
            return Ok(None);
        };

        let raw = current_value.to_string();
        let (numeric, wildcard) = version::normalize_wildcard(&raw);
        let current = Version::parse(&numeric).ok_or_else(|| Error::InvalidVersionValue {
            attribute: name.to_string(),
            value: raw.clone(),
        })?;

        let format_tokens: Vec<&str> = format.split('.').collect();
        if format_tokens.len() != 4 {
            return Err(Error::InvalidVersionFormat {
                attribute: name.to_string(),
                format: format.to_string(),
            });
        }

        let components = current.components();
        let mut next = [0u32; 4];
        for (slot, token) in format_tokens.iter().enumerate() {
            let expanded = tokens::expand(token, &ctx.with_current(components[slot]))?;
            next[slot] = expanded.trim().parse().map_err(|_| Error::InvalidVersionFormat {
                attribute: name.to_string(),
                format: format.to_string(),
            })?;
        }

        let computed = Version::new(next[0], next[1], next[2], next[3]);
        doc.set(name, Value::from(computed.render(wildcard)));
        tracing::debug!(name, version = %computed, "version updated");

        Ok(Some(computed))
    }

    /// Apply a free-text value with token expansion; returns the value the
    /// declaration holds afterwards, if it exists.
    fn update_text(
        &self,
        doc: &mut Document,
        name: &str,
        value: Option<&str>,
        ctx: &TokenContext<'_>,
    ) -> Result<Option<String>> {
        let Some(value) = value else {
            return Ok(None);
        };

        let expanded = tokens::expand(value, ctx)?;
        self.set(doc, name, Value::from(expanded));

        Ok(doc.get(name).map(|v| v.to_string()))
    }

    /// Apply a literal value with no token expansion.
    fn update_plain(&self, doc: &mut Document, name: &str, value: Option<Value>) {
        if let Some(value) = value {
            self.set(doc, name, value);
        }
    }

    fn set(&self, doc: &mut Document, name: &str, value: Value) {
        if self.options.ensure_attributes {
            doc.set_or_ensure(name, value);
        } else {
            doc.set(name, value);
        }
    }
}
