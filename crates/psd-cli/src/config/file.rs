use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One layer of optional settings.
///
/// The TOML file deserializes straight into it; environment variables, CLI
/// flags and `--set` overrides are folded on top of it in that order.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub layers: Option<usize>,
    pub thresholds: Option<Vec<usize>>,
    pub min_int: Option<usize>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
    pub write_artifacts: Option<bool>,
    pub string: Option<FileStringConfig>,
    pub display: Option<FileDisplayConfig>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileStringConfig {
    pub url: Option<String>,
    pub species: Option<u32>,
    pub partner_limit: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub caller_identity: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileDisplayConfig {
    pub seed_size: Option<f64>,
    pub initial_size: Option<f64>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration file {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn string_mut(&mut self) -> &mut FileStringConfig {
        self.string.get_or_insert_with(Default::default)
    }

    pub fn display_mut(&mut self) -> &mut FileDisplayConfig {
        self.display.get_or_insert_with(Default::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kebab_case_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("psd.toml");
        std::fs::write(
            &path,
            r#"
layers = 3
thresholds = [4, 2]
input = "psd_scaffolds.tsv"
write-artifacts = false

[string]
species = 10090
partner-limit = 20
timeout-secs = 5

[display]
seed-size = 40.0
"#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        assert_eq!(config.layers, Some(3));
        assert_eq!(config.thresholds, Some(vec![4, 2]));
        assert_eq!(config.write_artifacts, Some(false));
        let string = config.string.unwrap();
        assert_eq!(string.species, Some(10090));
        assert_eq!(string.partner_limit, Some(20));
        assert_eq!(string.url, None);
        assert_eq!(config.display.unwrap().seed_size, Some(40.0));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("psd.toml");
        std::fs::write(&path, "layerz = 2\n").unwrap();

        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FileConfig::from_file(&dir.path().join("absent.toml")),
            Err(CliError::Io(_))
        ));
    }
}
