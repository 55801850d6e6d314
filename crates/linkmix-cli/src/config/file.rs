use crate::error::{CliError, Result};
use linkmix::workflows::scenarios::ScenarioConfig;
use linkmix::workflows::stacking::StackingConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileInputConfig {
    pub monolayer: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileOutputConfig {
    pub directory: Option<PathBuf>,
    pub prefix: Option<String>,
}

/// Contents of a generation config file. Every section is optional; missing
/// keys inside `[stacking]` and `[scenarios]` take the library defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<FileInputConfig>,
    pub output: Option<FileOutputConfig>,
    pub stacking: Option<StackingConfig>,
    pub scenarios: Option<ScenarioConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_section() {
        let config = FileConfig::from_toml(
            r#"
            [input]
            monolayer = "PA_TP.chk"

            [output]
            directory = "out"
            prefix = "ABCDEF"

            [stacking]
            interlayer-distance = 3.4
            layers = 4

            [scenarios]
            seed = 5
            counts = [1, 2]
            include-none = false
            "#,
        )
        .unwrap();

        assert_eq!(
            config.input.unwrap().monolayer,
            Some(PathBuf::from("PA_TP.chk"))
        );
        assert_eq!(config.output.unwrap().prefix.as_deref(), Some("ABCDEF"));
        let stacking = config.stacking.unwrap();
        assert_eq!(stacking.interlayer_distance, 3.4);
        assert_eq!(stacking.layers, 4);
        assert_eq!(stacking.repeats, StackingConfig::default().repeats);
        let scenarios = config.scenarios.unwrap();
        assert_eq!(scenarios.counts, vec![1, 2]);
        assert!(scenarios.include_all);
        assert!(!scenarios.include_none);
    }

    #[test]
    fn empty_file_is_valid() {
        let config = FileConfig::from_toml("").unwrap();
        assert!(config.input.is_none() && config.stacking.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("[stacking]\nlayer-count = 3\n").is_err());
        assert!(FileConfig::from_toml("[extra]\n").is_err());
    }
}
