//! CLI configuration.
//!
//! Settings come from an optional config file (`nodefit.toml`, or the path
//! in `NODEFIT_CONFIG`) overlaid with `NODEFIT__*` environment variables,
//! e.g. `NODEFIT__CATALOG_PATH=nodes.json`.

use crate::error::CliError;
use nodefit_compat::ScoringRules;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "nodefit.toml";

/// Settings for one CLI run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CliConfig {
    /// JSON file holding the node catalog.
    pub catalog_path: PathBuf,

    /// Optional scoring rules file (JSON, TOML or YAML).
    #[serde(default)]
    pub rules_path: Option<PathBuf>,
}

impl CliConfig {
    /// Loads configuration from the default file location and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if required settings are missing or invalid.
    pub fn load() -> Result<Self, config::ConfigError> {
        let file = std::env::var_os("NODEFIT_CONFIG")
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        Self::load_from(&file)
    }

    /// Loads configuration from `file`, if it exists, and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if required settings are missing or invalid.
    pub fn load_from(file: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix("NODEFIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// Loads and validates a scoring rules file.
///
/// `.json` files are parsed directly so keys keep their exact spelling.
/// Other formats go through `config`; unknown keys fail either way.
///
/// # Errors
///
/// Returns `CliError::Rules` if the file cannot be read, parsed or
/// validated.
pub fn load_rules(path: &Path) -> Result<ScoringRules, CliError> {
    let rules_error = |reason: String| CliError::Rules {
        path: path.display().to_string(),
        reason,
    };

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let json = std::fs::read_to_string(path).map_err(|e| rules_error(e.to_string()))?;
        return ScoringRules::from_json(&json).map_err(|e| rules_error(e.to_string()));
    }

    let rules: ScoringRules = config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .and_then(|built| built.try_deserialize())
        .map_err(|e| rules_error(e.to_string()))?;
    rules.validate().map_err(|e| rules_error(e.to_string()))?;
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_settings_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("nodefit.toml");
        std::fs::write(
            &file,
            "catalog_path = \"nodes.json\"\nrules_path = \"rules.toml\"\n",
        )
        .expect("write config");

        let config = CliConfig::load_from(&file).expect("load config");
        assert_eq!(config.catalog_path, PathBuf::from("nodes.json"));
        assert_eq!(config.rules_path, Some(PathBuf::from("rules.toml")));
    }

    #[test]
    fn rules_path_is_optional() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("nodefit.toml");
        std::fs::write(&file, "catalog_path = \"nodes.json\"\n").expect("write config");

        let config = CliConfig::load_from(&file).expect("load config");
        assert!(config.rules_path.is_none());
    }

    #[test]
    fn loads_partial_rules_over_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("rules.toml");
        std::fs::write(&file, "[weights]\ncategory = 0.35\n").expect("write rules");

        let rules = load_rules(&file).expect("load rules");
        assert_eq!(rules.weights.category, 0.35);
        assert_eq!(rules.weights, {
            let mut expected = ScoringRules::default().weights;
            expected.category = 0.35;
            expected
        });
    }

    #[test]
    fn rejects_negative_weights() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("rules.toml");
        std::fs::write(&file, "[weights]\ncategory = -1.0\n").expect("write rules");

        let err = load_rules(&file).expect_err("should fail");
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn loads_idioms_and_weights_from_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("rules.toml");
        std::fs::write(
            &file,
            "[weights]\ndataFlow = 0.5\n\n[[workflowIdioms]]\nsource = \"rss\"\ntarget = \"slack\"\nbonus = 0.3\n",
        )
        .expect("write rules");

        let rules = load_rules(&file).expect("load rules");
        assert_eq!(rules.weights.data_flow, 0.5);
        assert_eq!(rules.workflow_idioms.len(), 1);
        assert_eq!(rules.workflow_idioms[0].bonus, 0.3);
        assert!(rules.matching_idiom("rssFeedRead", "slack").is_some());
    }

    #[test]
    fn loads_idioms_and_weights_from_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("rules.json");
        std::fs::write(
            &file,
            r#"{"weights": {"dataFlow": 0.5}, "workflowIdioms": [{"source": "rss", "target": "slack", "bonus": 0.3}]}"#,
        )
        .expect("write rules");

        let rules = load_rules(&file).expect("load rules");
        assert_eq!(rules.weights.data_flow, 0.5);
        assert_eq!(rules.workflow_idioms.len(), 1);
        assert_eq!(rules.workflow_idioms[0].bonus, 0.3);
    }

    #[test]
    fn misspelled_table_fails_instead_of_using_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("rules.toml");
        std::fs::write(
            &file,
            "[[workflowIdiom]]\nsource = \"rss\"\ntarget = \"slack\"\n",
        )
        .expect("write rules");

        let err = load_rules(&file).expect_err("should fail");
        assert!(matches!(err, CliError::Rules { .. }));
    }

    #[test]
    fn missing_rules_file_is_an_error() {
        let err = load_rules(Path::new("/nonexistent/rules.toml")).expect_err("should fail");
        assert!(matches!(err, CliError::Rules { .. }));
    }
}
