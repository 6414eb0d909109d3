use psdexplorer::engine::config::ExpansionConfig;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct StringSettings {
    pub base_url: String,
    pub species: u32,
    pub timeout: Duration,
    pub caller_identity: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub work_dir: PathBuf,
    pub string: StringSettings,
    pub core_config: ExpansionConfig,
}
