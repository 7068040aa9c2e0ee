use aso_common::observability::LogFormat;
use aso_config::{AsoConfigLoader, CountryInput, GeneratorKind};
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
version: "0.1"
generator:
  kind: mock
  delay_ms: 1500
wizard:
  country_input: free_text
logging:
  format: json
  filter: "aso_wizard=debug"
  "#;
    let p = write_yaml(&tmp, "aso.yaml", file_yaml);

    let config = AsoConfigLoader::new()
        .with_file(p)
        .load()
        .expect("load wizard config");

    assert_eq!(config.generator.kind, GeneratorKind::Mock);
    assert_eq!(config.generator.delay_ms, 1500);
    assert_eq!(config.wizard.country_input, CountryInput::FreeText);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.filter, "aso_wizard=debug");
    assert!(!config.logging.stderr);
}

#[test]
#[serial]
fn env_overrides_file_values() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "aso.yaml", "generator:\n  delay_ms: 1500\n");

    temp_env::with_var("ASO__GENERATOR__DELAY_MS", Some("25"), || {
        let config = AsoConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load with env override");
        assert_eq!(config.generator.delay_ms, 25);
    });
}

#[test]
#[serial]
fn missing_optional_file_falls_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = AsoConfigLoader::new()
        .with_optional_file(tmp.path().join("absent.yaml"))
        .load()
        .expect("defaults");

    assert_eq!(config.generator.delay_ms, 2000);
    assert_eq!(config.wizard.country_input, CountryInput::Picker);
    assert_eq!(config.logging.filter, "info");
    assert!(config.logging.dir.is_none());
}

#[test]
#[serial]
fn missing_required_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let result = AsoConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load();
    assert!(result.is_err());
}

#[test]
#[serial]
fn env_overrides_inline_yaml_sections() {
    temp_env::with_vars(
        [
            ("ASO__LOGGING__FORMAT", Some("json")),
            ("ASO__WIZARD__COUNTRY_INPUT", Some("free_text")),
        ],
        || {
            let config = AsoConfigLoader::new()
                .with_yaml_str("logging:\n  format: text\nwizard:\n  country_input: picker\n")
                .load()
                .expect("load with env overrides");
            assert_eq!(config.logging.format, LogFormat::Json);
            assert_eq!(config.wizard.country_input, CountryInput::FreeText);
        },
    );
}
