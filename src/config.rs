//! Generation and pipeline settings.
//!
//! All settings deserialize with defaults for missing fields, so a partial
//! configuration document is valid:
//!
//! ```
//! use u_job_coverage::config::CoverageConfig;
//!
//! let config: CoverageConfig =
//!     serde_json::from_str(r#"{ "pipeline": { "waves": 4 } }"#).unwrap();
//! assert_eq!(config.pipeline.waves, 4);
//! assert_eq!(config.generator.pair_size, 2);
//! ```

use serde::{Deserialize, Serialize};

/// Default interaction strength.
pub const DEFAULT_PAIR_SIZE: usize = 2;

/// Default admission-call budget per seed tuple.
pub const DEFAULT_SEARCH_BUDGET: usize = 50_000;

/// Default number of waves.
pub const DEFAULT_WAVES: usize = 10;

/// Combination generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Interaction strength `t` (2 = pairwise).
    pub pair_size: usize,
    /// Maximum admission calls spent completing one seed tuple. A seed whose
    /// search exceeds the budget is dropped.
    pub search_budget: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            pair_size: DEFAULT_PAIR_SIZE,
            search_budget: DEFAULT_SEARCH_BUDGET,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the interaction strength.
    pub fn with_pair_size(mut self, pair_size: usize) -> Self {
        self.pair_size = pair_size;
        self
    }

    /// Sets the admission-call budget per seed tuple.
    pub fn with_search_budget(mut self, budget: usize) -> Self {
        self.search_budget = budget;
        self
    }
}

/// Ordering and partitioning settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Keep only jobs whose name matches this regex (anchored at the start).
    pub name_filter: Option<String>,
    /// Whitespace-separated priority regex list.
    pub reorder: Option<String>,
    /// Maximum number of waves.
    pub waves: usize,
    /// Shuffle the job list with this seed before reordering.
    pub shuffle_seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name_filter: None,
            reorder: None,
            waves: DEFAULT_WAVES,
            shuffle_seed: None,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name filter regex.
    pub fn with_name_filter(mut self, pattern: impl Into<String>) -> Self {
        self.name_filter = Some(pattern.into());
        self
    }

    /// Sets the priority regex list.
    pub fn with_reorder(mut self, patterns: impl Into<String>) -> Self {
        self.reorder = Some(patterns.into());
        self
    }

    /// Sets the maximum number of waves.
    pub fn with_waves(mut self, waves: usize) -> Self {
        self.waves = waves;
        self
    }

    /// Enables the seeded shuffle.
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }
}

/// Complete settings of one job matrix run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    pub generator: GeneratorConfig,
    pub pipeline: PipelineConfig,
}

impl CoverageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }
}
