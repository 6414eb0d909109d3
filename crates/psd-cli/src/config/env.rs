use super::file::FileConfig;
use crate::error::{CliError, Result};
use psdexplorer::engine::config::{ThresholdSchedule, parse_layer_count};
use std::path::PathBuf;
use tracing::debug;

pub const ENV_LAYERS: &str = "PSD_LAYERS";
pub const ENV_LAYER_MIN_INTS: &str = "PSD_LAYER_MIN_INTS";
pub const ENV_MIN_INT: &str = "PSD_MIN_INT";
pub const ENV_INPUT: &str = "PSD_INPUT";
pub const ENV_OUT: &str = "PSD_OUT";
pub const ENV_WORK_DIR: &str = "PSD_WORK_DIR";

/// Values that mean "not set" when a launcher exports an empty variable.
const UNSET_SENTINELS: [&str; 3] = ["none", "na", "null"];

/// Reads `name` through `lookup`, treating blank and sentinel values as unset.
pub fn clean_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    let value = lookup(name)?;
    let trimmed = value.trim();
    if trimmed.is_empty()
        || UNSET_SENTINELS
            .iter()
            .any(|sentinel| trimmed.eq_ignore_ascii_case(sentinel))
    {
        debug!("Ignoring unset environment variable {} ({:?})", name, value);
        return None;
    }
    Some(trimmed.to_string())
}

pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Folds the `PSD_*` variables over `config`.
pub fn apply_env(
    mut config: FileConfig,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<FileConfig> {
    if let Some(value) = clean_var(lookup, ENV_LAYERS) {
        let layers = parse_layer_count(&value)
            .map_err(|e| CliError::Config(format!("{}: {}", ENV_LAYERS, e)))?;
        config.layers = Some(layers);
    }
    if let Some(value) = clean_var(lookup, ENV_LAYER_MIN_INTS) {
        let schedule = ThresholdSchedule::parse(&value, 0)
            .map_err(|e| CliError::Config(format!("{}: {}", ENV_LAYER_MIN_INTS, e)))?;
        config.thresholds = Some(schedule.thresholds().to_vec());
    }
    if let Some(value) = clean_var(lookup, ENV_MIN_INT) {
        config.min_int = Some(value.parse().map_err(|_| {
            CliError::Config(format!("{}: invalid integer '{}'", ENV_MIN_INT, value))
        })?);
    }
    if let Some(value) = clean_var(lookup, ENV_INPUT) {
        config.input = Some(PathBuf::from(value));
    }
    if let Some(value) = clean_var(lookup, ENV_OUT) {
        config.output = Some(PathBuf::from(value));
    }
    if let Some(value) = clean_var(lookup, ENV_WORK_DIR) {
        config.work_dir = Some(PathBuf::from(value));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn sentinel_values_count_as_unset() {
        let env = lookup(&[
            (ENV_LAYERS, "None"),
            (ENV_INPUT, "  "),
            (ENV_OUT, "NULL"),
            (ENV_WORK_DIR, "na"),
        ]);
        let config = apply_env(FileConfig::default(), &env).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn variables_override_file_values() {
        let file = FileConfig {
            layers: Some(1),
            input: Some(PathBuf::from("file.tsv")),
            ..Default::default()
        };
        let env = lookup(&[
            (ENV_LAYERS, " 3 "),
            (ENV_LAYER_MIN_INTS, "4,2,"),
            (ENV_MIN_INT, "1"),
            (ENV_OUT, "/tmp/psd/main.html"),
        ]);
        let config = apply_env(file, &env).unwrap();
        assert_eq!(config.layers, Some(3));
        assert_eq!(config.thresholds, Some(vec![4, 2]));
        assert_eq!(config.min_int, Some(1));
        assert_eq!(config.input, Some(PathBuf::from("file.tsv")));
        assert_eq!(config.output, Some(PathBuf::from("/tmp/psd/main.html")));
    }

    #[test]
    fn invalid_values_are_configuration_errors() {
        let env = lookup(&[(ENV_LAYERS, "three")]);
        assert!(matches!(
            apply_env(FileConfig::default(), &env),
            Err(CliError::Config(_))
        ));

        let env = lookup(&[(ENV_LAYER_MIN_INTS, "2,x")]);
        assert!(matches!(
            apply_env(FileConfig::default(), &env),
            Err(CliError::Config(_))
        ));
    }
}
