pub mod log;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use cruet::Inflector;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::log::LoggingConfig;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_FILE_NAME: &str = "codegen.config.yaml";

/// Scaffold written by `init-config`.
pub const CONFIG_TEMPLATE: &str = include_str!("../config.template.yaml");

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CodegenConfig {
    /// Logger configuration for the codegen CLI.
    #[serde(default)]
    pub log: LoggingConfig,

    /// Named generator entries, each an independent
    /// namespace/source/destination triple.
    #[serde(default)]
    pub generators: BTreeMap<String, GeneratorConfig>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Logical namespace; generated modules land in the matching directory
    /// under `destination_path` (e.g. `app::graphql` -> `app/graphql/`).
    pub namespace: String,

    /// Directory holding the GraphQL query/fragment files.
    pub source_path: PathBuf,

    /// Directory the generated Rust code is written under.
    pub destination_path: PathBuf,

    /// Name of the generated facade struct. Defaults to the entry name in
    /// PascalCase with a `Query` suffix.
    #[serde(default)]
    pub facade_name: Option<String>,
}

impl GeneratorConfig {
    pub fn facade_name(&self, entry_name: &str) -> String {
        self.facade_name
            .clone()
            .unwrap_or_else(|| format!("{}Query", entry_name.to_pascal_case()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Not found config file: `{path}`, use `init-config` to scaffold it")]
    NotFound { path: PathBuf },
}

/// Loads the configuration, either from an explicit path or from
/// [`DEFAULT_FILE_NAME`] in the working directory. A missing file is an
/// error either way; a run without configuration would generate nothing.
pub fn load_config(override_config_path: Option<&Path>) -> Result<CodegenConfig, ConfigError> {
    let path = override_config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME));

    if !path.is_file() {
        return Err(ConfigError::NotFound { path });
    }

    Ok(Config::builder()
        .add_source(File::from(path).required(true))
        .build()?
        .try_deserialize::<CodegenConfig>()?)
}

/// Parses configuration from raw YAML text.
pub fn parse_yaml_config(config_raw: &str) -> Result<CodegenConfig, ConfigError> {
    Ok(Config::builder()
        .add_source(File::from_str(config_raw, FileFormat::Yaml))
        .build()?
        .try_deserialize::<CodegenConfig>()?)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::{load_config, parse_yaml_config, ConfigError, CONFIG_TEMPLATE, DEFAULT_FILE_NAME};

    #[test]
    fn template_is_a_valid_config() {
        let config = parse_yaml_config(CONFIG_TEMPLATE).unwrap();

        assert_eq!(config.generators.len(), 1);
        let generator = &config.generators["default"];
        assert_eq!(generator.namespace, "app::graphql");
        assert_eq!(generator.facade_name("default"), "AppQuery");
    }

    #[test]
    fn facade_name_defaults_to_the_entry_name() {
        let config = parse_yaml_config(
            r#"
generators:
  admin_panel:
    namespace: admin::graphql
    source_path: ./queries
    destination_path: ./src
"#,
        )
        .unwrap();

        let generator = &config.generators["admin_panel"];
        assert_eq!(generator.facade_name("admin_panel"), "AdminPanelQuery");
    }

    #[test]
    fn mandatory_fields_are_enforced() {
        let err = parse_yaml_config(
            r#"
generators:
  default:
    namespace: app
"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn explicit_missing_path_is_reported() {
        let err = load_config(Some(Path::new("/definitely/not/there.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn missing_default_file_is_reported() {
        // The package directory carries no `codegen.config.yaml`.
        let err = load_config(None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotFound { ref path } if path == Path::new(DEFAULT_FILE_NAME)
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = parse_yaml_config(
            r#"
generators:
  default:
    namespace: app
    source_path: ./queries
    destination_path: ./src
    query_class: Nope
"#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Load(_)));
    }
}
