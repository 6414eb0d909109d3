use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_THRESHOLD: usize = 2;
pub const DEFAULT_PARTNER_LIMIT: usize = 10;
pub const DEFAULT_SEED_SIZE: f64 = 35.0;
pub const DEFAULT_INITIAL_SIZE: f64 = 20.0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid minimum-interaction threshold '{0}': expected a non-negative integer")]
    InvalidThreshold(String),

    #[error("Invalid layer count '{0}': expected a non-negative integer")]
    InvalidLayerCount(String),
}

/// Minimum number of interactions a candidate needs, per expansion layer.
///
/// Layer `i` (1-based) uses the `i`-th listed value; layers past the end of the
/// list reuse the last value, and an empty list falls back to a single value.
/// The seed layer always uses 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdSchedule {
    thresholds: Vec<usize>,
    fallback: usize,
}

impl Default for ThresholdSchedule {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_THRESHOLD)
    }
}

impl ThresholdSchedule {
    pub fn new(thresholds: Vec<usize>, fallback: usize) -> Self {
        Self {
            thresholds,
            fallback,
        }
    }

    pub fn uniform(threshold: usize) -> Self {
        Self::new(vec![threshold], threshold)
    }

    /// Parses a comma-separated list such as `"3,2,1"`.
    ///
    /// Empty entries are ignored; any other non-numeric entry is an error.
    pub fn parse(list: &str, fallback: usize) -> Result<Self, ConfigError> {
        let thresholds = list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidThreshold(entry.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(thresholds, fallback))
    }

    pub fn threshold_for(&self, layer: usize) -> usize {
        if layer == 0 {
            return 0;
        }
        match self.thresholds.last() {
            None => self.fallback,
            Some(&last) => self.thresholds.get(layer - 1).copied().unwrap_or(last),
        }
    }

    pub fn thresholds(&self) -> &[usize] {
        &self.thresholds
    }

    pub fn fallback(&self) -> usize {
        self.fallback
    }
}

pub fn parse_layer_count(value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidLayerCount(value.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionConfig {
    pub layers: usize,
    pub schedule: ThresholdSchedule,
    pub partner_limit: usize,
    pub seed_size: f64,
    pub initial_size: f64,
    pub artifact_dir: Option<PathBuf>,
}

impl ExpansionConfig {
    /// Display size of the nodes admitted at `layer`.
    ///
    /// Expansion layers shrink linearly from `initial_size` by
    /// `initial_size / layers` per layer.
    pub fn node_size(&self, layer: usize) -> f64 {
        if layer == 0 || self.layers == 0 {
            return self.seed_size;
        }
        let step = self.initial_size / self.layers as f64;
        self.initial_size - (layer - 1) as f64 * step
    }
}

#[derive(Default)]
pub struct ExpansionConfigBuilder {
    layers: Option<usize>,
    schedule: Option<ThresholdSchedule>,
    partner_limit: Option<usize>,
    seed_size: Option<f64>,
    initial_size: Option<f64>,
    artifact_dir: Option<PathBuf>,
}

impl ExpansionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(mut self, layers: usize) -> Self {
        self.layers = Some(layers);
        self
    }
    pub fn schedule(mut self, schedule: ThresholdSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }
    pub fn partner_limit(mut self, limit: usize) -> Self {
        self.partner_limit = Some(limit);
        self
    }
    pub fn seed_size(mut self, size: f64) -> Self {
        self.seed_size = Some(size);
        self
    }
    pub fn initial_size(mut self, size: f64) -> Self {
        self.initial_size = Some(size);
        self
    }
    pub fn artifact_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.artifact_dir = dir;
        self
    }

    pub fn build(self) -> Result<ExpansionConfig, ConfigError> {
        Ok(ExpansionConfig {
            layers: self.layers.ok_or(ConfigError::MissingParameter("layers"))?,
            schedule: self.schedule.unwrap_or_default(),
            partner_limit: self.partner_limit.unwrap_or(DEFAULT_PARTNER_LIMIT),
            seed_size: self.seed_size.unwrap_or(DEFAULT_SEED_SIZE),
            initial_size: self.initial_size.unwrap_or(DEFAULT_INITIAL_SIZE),
            artifact_dir: self.artifact_dir,
        })
    }
}
