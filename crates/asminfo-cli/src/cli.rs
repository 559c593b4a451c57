//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use uuid::Uuid;

/// Update attribute declarations in C#, VB.NET, and F# assembly metadata files
#[derive(Parser, Debug)]
#[command(name = "asminfo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Update declarations in the given metadata files
    ///
    /// Version flags take a four-token dotted format where each token is a
    /// literal number, $(current), or $(increment), evaluated against the
    /// matching component of the file's current version. Free-text flags
    /// accept $(version), $(fileversion), and $(date:FORMAT) placeholders.
    ///
    /// Examples:
    ///   asminfo update AssemblyInfo.cs --assembly-version '1.4.$(current).$(increment)'
    ///   asminfo update **/AssemblyInfo.cs --copyright 'Copyright $(date:%Y)' --ensure
    ///   asminfo update AssemblyInfo.vb --custom 'BuildServer=true' --dry-run
    Update(UpdateArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Metadata files to update (.cs, .vb, or .fs)
    pub files: Vec<PathBuf>,

    /// Read options from a TOML file (command-line flags win)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Format for AssemblyVersion, e.g. '1.0.$(current).$(increment)'
    #[arg(long, value_name = "FORMAT")]
    pub assembly_version: Option<String>,

    /// Format for AssemblyFileVersion
    #[arg(long, value_name = "FORMAT")]
    pub file_version: Option<String>,

    /// Value for AssemblyInformationalVersion
    #[arg(long, value_name = "VALUE")]
    pub informational_version: Option<String>,

    /// Value for AssemblyCompany
    #[arg(long, value_name = "VALUE")]
    pub company: Option<String>,

    /// Value for AssemblyConfiguration
    #[arg(long, value_name = "VALUE")]
    pub configuration: Option<String>,

    /// Value for AssemblyCopyright
    #[arg(long, value_name = "VALUE")]
    pub copyright: Option<String>,

    /// Value for AssemblyCulture
    #[arg(long, value_name = "VALUE")]
    pub culture: Option<String>,

    /// Value for AssemblyDescription
    #[arg(long, value_name = "VALUE")]
    pub description: Option<String>,

    /// Value for AssemblyProduct
    #[arg(long, value_name = "VALUE")]
    pub product: Option<String>,

    /// Value for AssemblyTitle
    #[arg(long, value_name = "VALUE")]
    pub title: Option<String>,

    /// Value for AssemblyTrademark
    #[arg(long, value_name = "VALUE")]
    pub trademark: Option<String>,

    /// Value for AssemblyDelaySign
    #[arg(long, value_name = "BOOL")]
    pub delay_sign: Option<bool>,

    /// Value for AssemblyKeyFile
    #[arg(long, value_name = "VALUE")]
    pub key_file: Option<String>,

    /// Value for AssemblyKeyName
    #[arg(long, value_name = "VALUE")]
    pub key_name: Option<String>,

    /// Value for CLSCompliant
    #[arg(long, value_name = "BOOL")]
    pub cls_compliant: Option<bool>,

    /// Value for ComVisible
    #[arg(long, value_name = "BOOL")]
    pub com_visible: Option<bool>,

    /// Value for Guid
    #[arg(long, value_name = "UUID")]
    pub guid: Option<Uuid>,

    /// Create declarations that are missing instead of skipping them
    #[arg(long)]
    pub ensure: bool,

    /// Additional NAME=VALUE declaration to apply (repeatable)
    #[arg(long = "custom", value_name = "NAME=VALUE")]
    pub custom: Vec<String>,

    /// Show the changes without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Output results as JSON for scripting
    #[arg(long)]
    pub json: bool,
}
