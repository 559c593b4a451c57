//! End-to-end tests for the batch update engine

use std::fs;
use std::path::PathBuf;

use asminfo_content::Value;
use asminfo_core::{Error, UpdateEngine, UpdateOptions};
use chrono::{Local, TimeZone};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn engine(options: UpdateOptions) -> UpdateEngine {
    let now = Local.with_ymd_and_hms(2016, 5, 4, 13, 45, 0).unwrap();
    UpdateEngine::with_timestamp(options, now)
}

#[test]
fn test_increment_revision_component() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyVersion(\"1.0.0.0\")]\n",
    );

    let summary = engine(UpdateOptions {
        files: vec![path.clone()],
        assembly_version: Some("1.0.0.$(increment)".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[assembly: AssemblyVersion(\"1.0.0.1\")]\n"
    );
    assert_eq!(
        summary.results[0].assembly_version.unwrap().to_string(),
        "1.0.0.1"
    );
}

#[test]
fn test_wildcard_shape_survives_update() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyVersion(\"1.2.*\")]\n",
    );

    let summary = engine(UpdateOptions {
        files: vec![path.clone()],
        assembly_version: Some("1.2.3.4".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap();

    // the written text keeps the wildcard; the computed value does not
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[assembly: AssemblyVersion(\"1.2.*\")]\n"
    );
    assert_eq!(
        summary.results[0].assembly_version.unwrap().to_string(),
        "1.2.3.4"
    );
}

#[test]
fn test_four_part_wildcard_shape() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyFileVersion(\"3.1.4.*\")]\n",
    );

    engine(UpdateOptions {
        files: vec![path.clone()],
        file_version: Some("$(current).$(current).$(increment).7".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[assembly: AssemblyFileVersion(\"3.1.5.*\")]\n"
    );
}

#[test]
fn test_current_token_keeps_components() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyVersion(\"7.3.2.9\")]\n",
    );

    engine(UpdateOptions {
        files: vec![path.clone()],
        assembly_version: Some("$(current).$(current).$(current).$(current)".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[assembly: AssemblyVersion(\"7.3.2.9\")]\n"
    );
}

#[test]
fn test_informational_version_references_resolved_versions() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "AssemblyInfo.cs",
        concat!(
            "[assembly: AssemblyVersion(\"1.0.0.0\")]\n",
            "[assembly: AssemblyFileVersion(\"2.0.0.0\")]\n",
            "[assembly: AssemblyInformationalVersion(\"none\")]\n",
        ),
    );

    let summary = engine(UpdateOptions {
        files: vec![path.clone()],
        assembly_version: Some("1.0.0.$(increment)".to_string()),
        file_version: Some("2.0.0.$(increment)".to_string()),
        informational_version: Some("$(version) (file $(fileversion))".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains(
        "[assembly: AssemblyInformationalVersion(\"1.0.0.1 (file 2.0.0.1)\")]"
    ));
    assert_eq!(
        summary.informational_versions,
        vec!["1.0.0.1 (file 2.0.0.1)".to_string()]
    );
}

#[test]
fn test_date_token_in_free_text() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyCopyright(\"old\")]\n",
    );

    engine(UpdateOptions {
        files: vec![path.clone()],
        copyright: Some("Copyright $(date:%Y)".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[assembly: AssemblyCopyright(\"Copyright 2016\")]\n"
    );
}

#[test]
fn test_missing_attribute_without_ensure_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "AssemblyInfo.cs", "// nothing here\n");

    let summary = engine(UpdateOptions {
        files: vec![path.clone()],
        assembly_version: Some("1.0.0.0".to_string()),
        company: Some("Initech".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "// nothing here\n");
    assert_eq!(summary.results[0].assembly_version, None);
}

#[test]
fn test_ensure_creates_missing_attributes() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "AssemblyInfo.cs", "// nothing here\n");

    let summary = engine(UpdateOptions {
        files: vec![path.clone()],
        assembly_version: Some("2.1.0.$(increment)".to_string()),
        com_visible: Some(false),
        ensure_attributes: true,
        ..Default::default()
    })
    .run()
    .unwrap();

    // the created declaration starts at 1.0.0.0 and the format applies to it
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        concat!(
            "// nothing here\n",
            "[assembly: AssemblyVersion(\"2.1.0.1\")]\n",
            "[assembly: ComVisible(false)]\n",
        )
    );
    assert_eq!(
        summary.results[0].assembly_version.unwrap().to_string(),
        "2.1.0.1"
    );
}

#[test]
fn test_custom_attributes_apply_last() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "AssemblyInfo.vb", "' VB file\n");

    let mut options = UpdateOptions {
        files: vec![path.clone()],
        ensure_attributes: true,
        ..Default::default()
    };
    options
        .custom_attributes
        .insert("CustomAttribute".to_string(), Value::Bool(true));

    engine(options).run().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "' VB file\n<Assembly: CustomAttribute(True)>\n"
    );
}

#[test]
fn test_batch_updates_every_file() {
    let dir = TempDir::new().unwrap();
    let cs = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyVersion(\"1.0.0.0\")]\n",
    );
    let vb = write_file(
        &dir,
        "AssemblyInfo.vb",
        "<Assembly: AssemblyVersion(\"4.0.0.0\")>\n",
    );

    let summary = engine(UpdateOptions {
        files: vec![cs.clone(), vb.clone()],
        assembly_version: Some("$(current).$(current).$(current).$(increment)".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap();

    assert_eq!(summary.results.len(), 2);
    assert_eq!(
        summary.max_assembly_version.unwrap().to_string(),
        "4.0.0.1"
    );
    assert!(fs::read_to_string(&vb).unwrap().contains("4.0.0.1"));
}

#[test]
fn test_missing_file_aborts_batch() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.cs");
    let second = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyVersion(\"1.0.0.0\")]\n",
    );

    let err = engine(UpdateOptions {
        files: vec![missing, second.clone()],
        assembly_version: Some("9.0.0.0".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap_err();

    assert!(matches!(err, Error::Fs(asminfo_fs::Error::NotFound { .. })));
    // the failure precedes any write to the later file
    assert!(fs::read_to_string(&second).unwrap().contains("1.0.0.0"));
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "AssemblyInfo.txt", "whatever\n");

    let err = engine(UpdateOptions {
        files: vec![path],
        ..Default::default()
    })
    .run()
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Content(asminfo_content::Error::UnsupportedDialect { .. })
    ));
}

#[test]
fn test_malformed_current_version_is_a_format_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyVersion(\"1.0-beta\")]\n",
    );

    let err = engine(UpdateOptions {
        files: vec![path],
        assembly_version: Some("1.0.0.0".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap_err();

    match err {
        Error::InvalidVersionValue { attribute, value } => {
            assert_eq!(attribute, "AssemblyVersion");
            assert_eq!(value, "1.0-beta");
        }
        other => panic!("expected InvalidVersionValue, got {other:?}"),
    }
}

#[test]
fn test_malformed_format_string_is_a_format_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyVersion(\"1.0.0.0\")]\n",
    );

    let err = engine(UpdateOptions {
        files: vec![path],
        assembly_version: Some("1.0.0".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap_err();

    assert!(matches!(err, Error::InvalidVersionFormat { .. }));
}

#[test]
fn test_unknown_token_aborts_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyDescription(\"d\")]\n",
    );

    let err = engine(UpdateOptions {
        files: vec![path.clone()],
        description: Some("$(buildnumber)".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap_err();

    assert!(matches!(err, Error::UnknownToken { .. }));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[assembly: AssemblyDescription(\"d\")]\n"
    );
}

#[test]
fn test_preview_computes_without_writing() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyVersion(\"1.0.0.0\")]\n",
    );

    let updates = engine(UpdateOptions {
        files: vec![path.clone()],
        assembly_version: Some("1.0.0.$(increment)".to_string()),
        ..Default::default()
    })
    .preview()
    .unwrap();

    assert_eq!(updates.len(), 1);
    assert!(updates[0].updated.contains("1.0.0.1"));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[assembly: AssemblyVersion(\"1.0.0.0\")]\n"
    );
}

#[test]
fn test_readonly_file_is_updated_and_left_readonly() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "AssemblyInfo.cs",
        "[assembly: AssemblyVersion(\"1.0.0.0\")]\n",
    );

    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&path, permissions).unwrap();

    engine(UpdateOptions {
        files: vec![path.clone()],
        assembly_version: Some("2.0.0.0".to_string()),
        ..Default::default()
    })
    .run()
    .unwrap();

    assert!(fs::read_to_string(&path).unwrap().contains("2.0.0.0"));
    assert!(fs::metadata(&path).unwrap().permissions().readonly());

    // leave the temp dir removable
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(false);
    fs::set_permissions(&path, permissions).unwrap();
}
