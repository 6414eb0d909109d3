use psdexplorer::engine::config::{
    DEFAULT_INITIAL_SIZE, DEFAULT_PARTNER_LIMIT, DEFAULT_SEED_SIZE, DEFAULT_THRESHOLD,
};

pub struct DefaultsConfig {
    pub input: String,
    pub output: String,
    pub min_int: usize,
    pub write_artifacts: bool,
    pub string_url: String,
    pub species: u32,
    pub partner_limit: usize,
    pub timeout_secs: u64,
    pub caller_identity: String,
    pub seed_size: f64,
    pub initial_size: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            input: "scaffolds.tsv".to_string(),
            output: "main.html".to_string(),
            min_int: DEFAULT_THRESHOLD,
            write_artifacts: true,
            string_url: "https://string-db.org/api".to_string(),
            species: 9606,
            partner_limit: DEFAULT_PARTNER_LIMIT,
            timeout_secs: 60,
            caller_identity: "psd-explorer".to_string(),
            seed_size: DEFAULT_SEED_SIZE,
            initial_size: DEFAULT_INITIAL_SIZE,
        }
    }
}
