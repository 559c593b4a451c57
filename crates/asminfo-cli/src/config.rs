//! Option assembly: TOML config file plus command-line overrides.

use std::path::Path;

use asminfo_content::Value;
use asminfo_core::UpdateOptions;

use crate::cli::UpdateArgs;
use crate::error::{CliError, Result};

/// Load update options from a TOML file.
///
/// The file uses the same field names as [`UpdateOptions`]:
///
/// ```toml
/// assembly_version = "1.0.$(current).$(increment)"
/// copyright = "Copyright $(date:%Y)"
/// ensure_attributes = true
///
/// [custom_attributes]
/// BuildServer = true
/// ```
pub fn load(path: &Path) -> Result<UpdateOptions> {
    let text = asminfo_fs::read_text(path)?;
    toml::from_str(&text).map_err(|e| {
        CliError::user(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Combine a config file (if any) with command-line arguments.
///
/// Command-line values win over config file values; custom attributes merge
/// by name with the command line taking precedence.
pub fn build_options(args: &UpdateArgs) -> Result<UpdateOptions> {
    let mut options = match &args.config {
        Some(path) => load(path)?,
        None => UpdateOptions::default(),
    };

    if !args.files.is_empty() {
        options.files = args.files.clone();
    }

    override_option(&mut options.assembly_version, &args.assembly_version);
    override_option(&mut options.file_version, &args.file_version);
    override_option(
        &mut options.informational_version,
        &args.informational_version,
    );
    override_option(&mut options.company, &args.company);
    override_option(&mut options.configuration, &args.configuration);
    override_option(&mut options.copyright, &args.copyright);
    override_option(&mut options.culture, &args.culture);
    override_option(&mut options.description, &args.description);
    override_option(&mut options.product, &args.product);
    override_option(&mut options.title, &args.title);
    override_option(&mut options.trademark, &args.trademark);
    override_option(&mut options.delay_sign, &args.delay_sign);
    override_option(&mut options.key_file, &args.key_file);
    override_option(&mut options.key_name, &args.key_name);
    override_option(&mut options.cls_compliant, &args.cls_compliant);
    override_option(&mut options.com_visible, &args.com_visible);
    override_option(&mut options.guid, &args.guid);

    if args.ensure {
        options.ensure_attributes = true;
    }

    for pair in &args.custom {
        let (name, value) = parse_custom(pair)?;
        options.custom_attributes.insert(name, value);
    }

    if options.files.is_empty() {
        return Err(CliError::user("No input files given"));
    }

    Ok(options)
}

fn override_option<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        *target = value.clone();
    }
}

/// Split a `NAME=VALUE` pair; the value decodes like a declaration argument,
/// so bare `true`/`false` become booleans and quoted text stays a string.
fn parse_custom(pair: &str) -> Result<(String, Value)> {
    let Some((name, value)) = pair.split_once('=') else {
        return Err(CliError::user(format!(
            "--custom expects NAME=VALUE, got '{pair}'"
        )));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::user(format!(
            "--custom expects a non-empty name, got '{pair}'"
        )));
    }

    Ok((name.to_string(), Value::decode(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse_update(args: &[&str]) -> UpdateArgs {
        let cli = crate::cli::Cli::parse_from(
            std::iter::once("asminfo").chain(std::iter::once("update")).chain(args.iter().copied()),
        );
        match cli.command {
            crate::cli::Commands::Update(update) => update,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_flags_become_options() {
        let args = parse_update(&[
            "AssemblyInfo.cs",
            "--assembly-version",
            "1.0.0.$(increment)",
            "--com-visible",
            "false",
            "--ensure",
        ]);
        let options = build_options(&args).unwrap();

        assert_eq!(
            options.assembly_version.as_deref(),
            Some("1.0.0.$(increment)")
        );
        assert_eq!(options.com_visible, Some(false));
        assert!(options.ensure_attributes);
    }

    #[test]
    fn test_no_files_is_an_error() {
        let args = parse_update(&["--ensure"]);
        assert!(build_options(&args).is_err());
    }

    #[test]
    fn test_custom_values_decode() {
        let args = parse_update(&[
            "AssemblyInfo.cs",
            "--custom",
            "BuildServer=true",
            "--custom",
            "Branch=main",
        ]);
        let options = build_options(&args).unwrap();

        assert_eq!(
            options.custom_attributes.get("BuildServer"),
            Some(&Value::Bool(true))
        );
        assert_eq!(
            options.custom_attributes.get("Branch"),
            Some(&Value::Str("main".into()))
        );
    }

    #[test]
    fn test_custom_without_equals_is_rejected() {
        let args = parse_update(&["AssemblyInfo.cs", "--custom", "Broken"]);
        assert!(build_options(&args).is_err());
    }

    #[test]
    fn test_config_file_supplies_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("asminfo.toml");
        std::fs::write(
            &config_path,
            concat!(
                "files = [\"FromConfig.cs\"]\n",
                "assembly_version = \"1.0.0.0\"\n",
                "copyright = \"from config\"\n",
                "ensure_attributes = true\n",
                "\n",
                "[custom_attributes]\n",
                "BuildServer = true\n",
            ),
        )
        .unwrap();

        let args = parse_update(&[
            "--config",
            config_path.to_str().unwrap(),
            "--copyright",
            "from cli",
        ]);
        let options = build_options(&args).unwrap();

        assert_eq!(options.files, vec![std::path::PathBuf::from("FromConfig.cs")]);
        assert_eq!(options.assembly_version.as_deref(), Some("1.0.0.0"));
        // command line wins
        assert_eq!(options.copyright.as_deref(), Some("from cli"));
        assert_eq!(
            options.custom_attributes.get("BuildServer"),
            Some(&Value::Bool(true))
        );
    }
}
