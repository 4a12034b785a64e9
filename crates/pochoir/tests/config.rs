//! `pochoir.config.json` loading.

use pochoir::{load_config, CompilerConfig, PochoirConfig};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(load_config(Some(dir.path())), PochoirConfig::default());
}

#[test]
fn reads_compiler_section() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("pochoir.config.json"),
        r#"{
  "$schema": "./node_modules/.pochoir/pochoir.config.schema.json",
  "compiler": { "delimiters": ["[[", "]]"] }
}"#,
    )
    .unwrap();

    let config = load_config(Some(dir.path()));
    assert_eq!(
        config.compiler,
        CompilerConfig {
            delimiters: Some(("[[".into(), "]]".into())),
        }
    );
    let options = config.compiler.to_options();
    assert_eq!(options.delimiters.0, "[[");
    assert_eq!(options.delimiters.1, "]]");
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pochoir.config.json"), "{ not json").unwrap();
    assert_eq!(load_config(Some(dir.path())), PochoirConfig::default());

    std::fs::write(
        dir.path().join("pochoir.config.json"),
        r#"{ "compiler": { "unknown": true } }"#,
    )
    .unwrap();
    // Unknown keys are tolerated by the loader; the schema flags them.
    assert_eq!(load_config(Some(dir.path())), PochoirConfig::default());
}

#[test]
fn serializes_without_empty_fields() {
    insta::assert_snapshot!(
        serde_json::to_string(&PochoirConfig::default()).unwrap(),
        @r#"{"compiler":{}}"#
    );
}
