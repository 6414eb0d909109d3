use super::defaults::DefaultsConfig;
use super::env::{self, ENV_WORK_DIR};
use super::file::FileConfig;
use super::models::{AppConfig, StringSettings};
use crate::cli::ExpandArgs;
use crate::error::{CliError, Result};
use psdexplorer::engine::config::{ConfigError, ExpansionConfigBuilder, ThresholdSchedule};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Merges defaults, the config file, the environment, CLI flags and `--set`
/// overrides, in increasing order of precedence.
pub fn build_config(
    args: &ExpandArgs,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let file_config = env::apply_env(file_config, lookup)?;
    let file_config = apply_cli_args(file_config, args)?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    debug!("Merged configuration layers: {:?}", file_config);

    let output_path = absolute(
        file_config
            .output
            .take()
            .unwrap_or_else(|| PathBuf::from(&defaults.output)),
    )?;
    let work_dir = absolute(file_config.work_dir.take().unwrap_or_else(|| PathBuf::from(".")))?;
    let input_path = resolve_input(
        file_config
            .input
            .take()
            .unwrap_or_else(|| PathBuf::from(&defaults.input)),
        &output_path,
    );

    let string_file = file_config.string.take().unwrap_or_default();
    let display_file = file_config.display.take().unwrap_or_default();

    let schedule = ThresholdSchedule::new(
        file_config.thresholds.take().unwrap_or_default(),
        file_config.min_int.unwrap_or(defaults.min_int),
    );
    let write_artifacts = file_config
        .write_artifacts
        .unwrap_or(defaults.write_artifacts);

    let mut builder = ExpansionConfigBuilder::new()
        .schedule(schedule)
        .partner_limit(string_file.partner_limit.unwrap_or(defaults.partner_limit))
        .seed_size(display_file.seed_size.unwrap_or(defaults.seed_size))
        .initial_size(display_file.initial_size.unwrap_or(defaults.initial_size))
        .artifact_dir(write_artifacts.then(|| work_dir.clone()));
    if let Some(layers) = file_config.layers {
        builder = builder.layers(layers);
    }
    let core_config = builder.build().map_err(|e| match e {
        ConfigError::MissingParameter("layers") => CliError::Config(
            "the number of layers is required (use --layers or PSD_LAYERS)".to_string(),
        ),
        other => CliError::Config(other.to_string()),
    })?;

    let string = StringSettings {
        base_url: string_file
            .url
            .unwrap_or(defaults.string_url)
            .trim_end_matches('/')
            .to_string(),
        species: string_file.species.unwrap_or(defaults.species),
        timeout: Duration::from_secs(string_file.timeout_secs.unwrap_or(defaults.timeout_secs)),
        caller_identity: string_file
            .caller_identity
            .unwrap_or(defaults.caller_identity),
    };

    Ok(AppConfig {
        input_path,
        output_path,
        work_dir,
        string,
        core_config,
    })
}

/// Working directory for `clean`: the flag, then `PSD_WORK_DIR`, then `.`.
pub fn resolve_work_dir(
    cli_arg: Option<&Path>,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    let dir = cli_arg
        .map(Path::to_path_buf)
        .or_else(|| env::clean_var(lookup, ENV_WORK_DIR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    absolute(dir)
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(std::path::absolute(&path)?)
}

/// Relative seed paths live next to the rendered output.
fn resolve_input(input: PathBuf, output_path: &Path) -> PathBuf {
    if input.is_absolute() {
        return input;
    }
    match output_path.parent() {
        Some(dir) => dir.join(input),
        None => input,
    }
}

fn apply_cli_args(mut config: FileConfig, args: &ExpandArgs) -> Result<FileConfig> {
    if let Some(layers) = args.layers {
        config.layers = Some(layers);
    }
    if let Some(list) = &args.thresholds {
        config.thresholds = Some(parse_thresholds(list)?);
    }
    if let Some(min_int) = args.min_int {
        config.min_int = Some(min_int);
    }
    if let Some(input) = &args.input {
        config.input = Some(input.clone());
    }
    if let Some(output) = &args.output {
        config.output = Some(output.clone());
    }
    if let Some(work_dir) = &args.work_dir {
        config.work_dir = Some(work_dir.clone());
    }
    if args.no_artifacts {
        config.write_artifacts = Some(false);
    }

    let string = config.string_mut();
    if let Some(limit) = args.partner_limit {
        string.partner_limit = Some(limit);
    }
    if let Some(species) = args.species {
        string.species = Some(species);
    }
    if let Some(url) = &args.string_url {
        string.url = Some(url.clone());
    }
    if let Some(timeout) = args.timeout {
        string.timeout_secs = Some(timeout);
    }
    Ok(config)
}

fn parse_thresholds(list: &str) -> Result<Vec<usize>> {
    ThresholdSchedule::parse(list, 0)
        .map(|schedule| schedule.thresholds().to_vec())
        .map_err(|e| CliError::Config(e.to_string()))
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key.trim() {
            "layers" => config.layers = Some(parse_value(key, value_str, "integer")?),
            "thresholds" => config.thresholds = Some(parse_thresholds(value_str)?),
            "min-int" => config.min_int = Some(parse_value(key, value_str, "integer")?),
            "input" => config.input = Some(PathBuf::from(value_str)),
            "output" => config.output = Some(PathBuf::from(value_str)),
            "work-dir" => config.work_dir = Some(PathBuf::from(value_str)),
            "write-artifacts" => {
                config.write_artifacts = Some(parse_value(key, value_str, "boolean")?)
            }
            "string.url" => config.string_mut().url = Some(value_str.to_string()),
            "string.species" => {
                config.string_mut().species = Some(parse_value(key, value_str, "integer")?)
            }
            "string.partner-limit" => {
                config.string_mut().partner_limit = Some(parse_value(key, value_str, "integer")?)
            }
            "string.timeout-secs" => {
                config.string_mut().timeout_secs = Some(parse_value(key, value_str, "integer")?)
            }
            "string.caller-identity" => {
                config.string_mut().caller_identity = Some(value_str.to_string())
            }
            "display.seed-size" => {
                config.display_mut().seed_size = Some(parse_value(key, value_str, "float")?)
            }
            "display.initial-size" => {
                config.display_mut().initial_size = Some(parse_value(key, value_str, "float")?)
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn args_in(dir: &Path) -> ExpandArgs {
        ExpandArgs {
            output: Some(dir.join("out").join("main.html")),
            work_dir: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_layer_count_is_reported() {
        let tmp = tempdir().unwrap();
        let err = build_config(&args_in(tmp.path()), &no_env).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("--layers")));
    }

    #[test]
    fn defaults_fill_every_unset_value() {
        let tmp = tempdir().unwrap();
        let args = ExpandArgs {
            layers: Some(2),
            ..args_in(tmp.path())
        };
        let config = build_config(&args, &no_env).unwrap();

        assert_eq!(config.input_path, tmp.path().join("out").join("scaffolds.tsv"));
        assert_eq!(config.core_config.layers, 2);
        assert_eq!(config.core_config.schedule, ThresholdSchedule::new(vec![], 2));
        assert_eq!(config.core_config.partner_limit, 10);
        assert_eq!(config.core_config.artifact_dir, Some(tmp.path().to_path_buf()));
        assert_eq!(config.string.base_url, "https://string-db.org/api");
        assert_eq!(config.string.species, 9606);
        assert_eq!(config.string.timeout, Duration::from_secs(60));
    }

    #[test]
    fn absolute_input_paths_are_kept() {
        let tmp = tempdir().unwrap();
        let seed = tmp.path().join("elsewhere").join("seed.tsv");
        let args = ExpandArgs {
            layers: Some(1),
            input: Some(seed.clone()),
            ..args_in(tmp.path())
        };
        assert_eq!(build_config(&args, &no_env).unwrap().input_path, seed);
    }

    #[test]
    fn precedence_is_file_then_env_then_flags_then_set() {
        let tmp = tempdir().unwrap();
        let config_path = tmp.path().join("psd.toml");
        fs::write(
            &config_path,
            "layers = 1\nmin-int = 5\nthresholds = [9]\n[string]\nspecies = 1\npartner-limit = 3\n",
        )
        .unwrap();

        let env = env_of(&[("PSD_LAYERS", "2"), ("PSD_LAYER_MIN_INTS", "4,3")]);
        let args = ExpandArgs {
            config: Some(config_path),
            thresholds: Some("2,1".to_string()),
            species: Some(10090),
            set_values: vec!["string.species=7955".to_string()],
            ..args_in(tmp.path())
        };
        let config = build_config(&args, &env).unwrap();

        assert_eq!(config.core_config.layers, 2);
        assert_eq!(config.core_config.schedule, ThresholdSchedule::new(vec![2, 1], 5));
        assert_eq!(config.core_config.partner_limit, 3);
        assert_eq!(config.string.species, 7955);
    }

    #[test]
    fn disabling_artifacts_clears_the_artifact_dir() {
        let tmp = tempdir().unwrap();
        let args = ExpandArgs {
            layers: Some(1),
            no_artifacts: true,
            ..args_in(tmp.path())
        };
        assert_eq!(build_config(&args, &no_env).unwrap().core_config.artifact_dir, None);
    }

    #[test]
    fn set_values_are_validated() {
        let config = apply_set_values(
            FileConfig::default(),
            &[
                "display.seed-size=40".to_string(),
                "string.url=http://localhost:8080/api".to_string(),
                "write-artifacts=false".to_string(),
            ],
        )
        .unwrap();
        assert_eq!(config.display.unwrap().seed_size, Some(40.0));
        assert_eq!(
            config.string.unwrap().url.as_deref(),
            Some("http://localhost:8080/api")
        );
        assert_eq!(config.write_artifacts, Some(false));

        for bad in ["layers", "layers=many", "thresholds=1,x", "colour=red"] {
            assert!(
                matches!(
                    apply_set_values(FileConfig::default(), &[bad.to_string()]),
                    Err(CliError::Config(_))
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn trailing_slash_is_removed_from_base_url() {
        let tmp = tempdir().unwrap();
        let args = ExpandArgs {
            layers: Some(1),
            string_url: Some("https://version-12.string-db.org/api/".to_string()),
            ..args_in(tmp.path())
        };
        assert_eq!(
            build_config(&args, &no_env).unwrap().string.base_url,
            "https://version-12.string-db.org/api"
        );
    }

    #[test]
    fn work_dir_for_cleaning_prefers_the_flag() {
        let env = env_of(&[("PSD_WORK_DIR", "/srv/psd")]);
        assert_eq!(
            resolve_work_dir(Some(Path::new("/tmp/run")), &env).unwrap(),
            PathBuf::from("/tmp/run")
        );
        assert_eq!(
            resolve_work_dir(None, &env).unwrap(),
            PathBuf::from("/srv/psd")
        );
    }
}
