//! Loader for wizard configuration with YAML + environment overlays.
//!
//! Every section is optional; an empty source yields the defaults the
//! wizard ships with (mock generator with a 2 s delay, country picker, text
//! logs at `info`). Environment variables use the `ASO__` prefix and `__`
//! as the nesting separator, e.g. `ASO__GENERATOR__DELAY_MS=250`. String
//! values may reference other variables as `${VAR}`.
use aso_common::observability::LogFormat;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// File name looked up in the working directory and the user config dir.
pub const DEFAULT_CONFIG_FILE: &str = "aso.yaml";

#[derive(Debug, Default, Deserialize)]
pub struct AsoConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    #[default]
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub kind: GeneratorKind,
    /// Simulated latency of every generation call.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            kind: GeneratorKind::default(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_delay_ms() -> u64 {
    2_000
}

/// How the country field is entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryInput {
    /// One of the fixed picker countries.
    #[default]
    Picker,
    /// Any two-letter code.
    FreeText,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WizardConfig {
    #[serde(default)]
    pub country_input: CountryInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            dir: None,
            filter: default_filter(),
            stderr: false,
        }
    }
}

fn default_filter() -> String {
    "info".into()
}

/// First existing default config file: `./aso.yaml`, then
/// `<config dir>/aso-wizard/aso.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|d| d.join("aso-wizard").join(DEFAULT_CONFIG_FILE))
        .filter(|p| p.is_file())
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder over the `config` crate wiring (YAML + env overrides).
pub struct AsoConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for AsoConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AsoConfigLoader {
    /// Start with no sources; `ASO__` env overrides are layered on top in
    /// [`load`](Self::load), so they win over every file or snippet.
    ///
    /// ```
    /// use aso_config::{AsoConfigLoader, CountryInput};
    ///
    /// let config = AsoConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.generator.delay_ms, 2000);
    /// assert_eq!(config.wizard.country_input, CountryInput::Picker);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a required YAML/TOML/JSON file; format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use aso_config::{AsoConfigLoader, CountryInput};
    ///
    /// let cfg = AsoConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// generator:
    ///   kind: mock
    ///   delay_ms: 0
    /// wizard:
    ///   country_input: free_text
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.generator.delay_ms, 0);
    /// assert_eq!(cfg.wizard.country_input, CountryInput::FreeText);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// Sources are merged in order with the environment last, then `${VAR}`
    /// placeholders are expanded,
    /// then the result is materialised into [`AsoConfig`].
    ///
    /// ```
    /// use aso_config::AsoConfigLoader;
    ///
    /// unsafe { std::env::set_var("ASO_DOC_LOG_DIR", "/tmp/aso-doc"); }
    ///
    /// let config = AsoConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// logging:
    ///   format: json
    ///   dir: "${ASO_DOC_LOG_DIR}/logs"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(
    ///     config.logging.dir.as_deref(),
    ///     Some(std::path::Path::new("/tmp/aso-doc/logs"))
    /// );
    ///
    /// unsafe { std::env::remove_var("ASO_DOC_LOG_DIR"); }
    /// ```
    pub fn load(self) -> Result<AsoConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("ASO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: AsoConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("ASO_FOO", Some("bar"), || {
            let mut v = json!("prefix-${ASO_FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("ASO_CITY", Some("Recife")), ("ASO_STATE", Some("PE"))], || {
            let mut v = json!(["hello-$ASO_CITY", { "loc": "${ASO_CITY}-${ASO_STATE}" }, 7, false]);
            expand_env_in_value(&mut v);
            assert_eq!(v, json!(["hello-Recife", { "loc": "Recife-PE" }, 7, false]));
        });
    }

    #[test]
    fn expands_through_nested_references() {
        temp_env::with_vars(
            [
                ("ASO_BAZ", Some("qux")),
                ("ASO_BAR", Some("mid-${ASO_BAZ}")),
                ("ASO_TOP", Some("start-${ASO_BAR}-end")),
            ],
            || {
                let mut v = json!("X=${ASO_TOP}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=start-mid-qux-end"));
            },
        );
    }

    #[test]
    fn cyclic_references_terminate() {
        temp_env::with_vars([("ASO_A", Some("${ASO_B}")), ("ASO_B", Some("${ASO_A}"))], || {
            let mut v = json!("x=${ASO_A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${ASO_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${ASO_DOES_NOT_EXIST}"));
    }

    #[test]
    fn unknown_generator_kind_is_rejected() {
        let err = AsoConfigLoader::new()
            .with_yaml_str("generator:\n  kind: oracle\n")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("oracle"));
    }
}
