//! Caller-supplied inputs for a batch update.

use std::collections::BTreeMap;
use std::path::PathBuf;

use asminfo_content::Value;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Requested edits for a batch of metadata files.
///
/// Every attribute field is optional; `None` means "do not touch this
/// declaration". The two version fields take a four-token dotted format
/// string (`1.0.$(current).$(increment)`); the free-text fields accept
/// `$(...)` placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateOptions {
    /// Files to update, processed in order.
    pub files: Vec<PathBuf>,

    /// Format string for `AssemblyVersion`.
    pub assembly_version: Option<String>,
    /// Format string for `AssemblyFileVersion`.
    pub file_version: Option<String>,
    /// Value for `AssemblyInformationalVersion` (tokens expanded).
    pub informational_version: Option<String>,

    /// Value for `AssemblyCompany` (tokens expanded).
    pub company: Option<String>,
    /// Value for `AssemblyConfiguration` (tokens expanded).
    pub configuration: Option<String>,
    /// Value for `AssemblyCopyright` (tokens expanded).
    pub copyright: Option<String>,
    /// Value for `AssemblyDescription` (tokens expanded).
    pub description: Option<String>,
    /// Value for `AssemblyProduct` (tokens expanded).
    pub product: Option<String>,
    /// Value for `AssemblyTitle` (tokens expanded).
    pub title: Option<String>,
    /// Value for `AssemblyTrademark` (tokens expanded).
    pub trademark: Option<String>,

    /// Value for `AssemblyCulture` (no token expansion).
    pub culture: Option<String>,
    /// Value for `AssemblyDelaySign`.
    pub delay_sign: Option<bool>,
    /// Value for `Guid`.
    pub guid: Option<Uuid>,
    /// Value for `AssemblyKeyFile` (no token expansion).
    pub key_file: Option<String>,
    /// Value for `AssemblyKeyName` (no token expansion).
    pub key_name: Option<String>,
    /// Value for `CLSCompliant`.
    pub cls_compliant: Option<bool>,
    /// Value for `ComVisible`.
    pub com_visible: Option<bool>,

    /// Create declarations that are missing instead of skipping them.
    pub ensure_attributes: bool,

    /// Additional declarations to apply, by exact name (no token
    /// expansion).
    pub custom_attributes: BTreeMap<String, Value>,
}
