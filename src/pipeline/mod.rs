//! Post-generation ordering and partitioning.
//!
//! The generated matrix is turned into named jobs outside this crate. The
//! pipeline then orders and stages those jobs:
//!
//! 1. optional seeded shuffle, so that consecutive runs spread load over
//!    different jobs,
//! 2. name filter (keep matching jobs),
//! 3. priority reorder (matching jobs first),
//! 4. wave split (bounded fan-out per stage).
//!
//! Manual pinning with [`search_and_move`] works on matrix rows before the
//! jobs are named.
//!
//! # Usage
//!
//! ```
//! use u_job_coverage::config::PipelineConfig;
//! use u_job_coverage::pipeline::Pipeline;
//!
//! let jobs = vec!["GCC_9", "NVCC_11.2", "CLANG_14", "NVCC_12.0"];
//! let pipeline = Pipeline::new(PipelineConfig::new().with_reorder("^NVCC").with_waves(2));
//! let waves = pipeline.run(jobs).unwrap();
//! assert_eq!(waves, vec![vec!["NVCC_11.2", "NVCC_12.0"], vec!["GCC_9", "CLANG_14"]]);
//! ```

mod reorder;
mod waves;

pub use reorder::{filter_by_name, reorder};
pub use waves::distribute_waves;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::models::{NamedJob, Row};

/// Moves the first row containing every value of `searched` to `position`.
///
/// A row matches if it holds an equal value for each parameter of
/// `searched`; other parameters are ignored. Positions past the end are
/// clamped to the end. Returns `false` and leaves the matrix untouched if
/// no row matches.
///
/// # Errors
/// [`Error::EmptySearchKey`] if `searched` has no parameters.
pub fn search_and_move(matrix: &mut Vec<Row>, searched: &Row, position: usize) -> Result<bool> {
    if searched.is_empty() {
        return Err(Error::EmptySearchKey);
    }
    let Some(index) = matrix.iter().position(|row| row.contains(searched)) else {
        return Ok(false);
    };
    let row = matrix.remove(index);
    let position = position.min(matrix.len());
    matrix.insert(position, row);
    Ok(true)
}

/// Shuffles jobs deterministically: the same seed yields the same order.
pub fn shuffle<J>(jobs: &mut [J], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    jobs.shuffle(&mut rng);
}

/// Runs shuffle, name filter, reorder and wave split from a configuration.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Orders the jobs and splits them into waves.
    ///
    /// # Errors
    /// - [`Error::InvalidPattern`] for an invalid filter or reorder regex
    /// - [`Error::InvalidWaveCount`] if the configured wave count is zero
    pub fn run<J: NamedJob>(&self, jobs: Vec<J>) -> Result<Vec<Vec<J>>> {
        distribute_waves(self.order(jobs)?, self.config.waves)
    }

    /// Applies every step except the wave split.
    pub fn order<J: NamedJob>(&self, mut jobs: Vec<J>) -> Result<Vec<J>> {
        if let Some(seed) = self.config.shuffle_seed {
            shuffle(&mut jobs, seed);
        }
        if let Some(pattern) = &self.config.name_filter {
            jobs = filter_by_name(jobs, pattern)?;
        }
        if let Some(patterns) = &self.config.reorder {
            jobs = reorder(jobs, patterns)?;
        }
        log::debug!("pipeline ordered {} jobs", jobs.len());
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::names::{CLANG, GCC, NVCC};
    use crate::models::{Job, Parameter, Version};

    fn matrix() -> Vec<Row> {
        let row = |host: &str, host_version: u32, device: &str, device_version: Version| {
            Row::new()
                .with_variant(Parameter::HostCompiler, host, Version::major(host_version))
                .with_variant(Parameter::DeviceCompiler, device, device_version)
        };
        vec![
            row(GCC, 9, GCC, Version::major(9)),
            row(CLANG, 14, CLANG, Version::major(14)),
            row(GCC, 10, NVCC, Version::major_minor(11, 2)),
            row(GCC, 12, NVCC, Version::major_minor(12, 0)),
        ]
    }

    #[test]
    fn test_search_and_move_to_front() {
        let mut m = matrix();
        let key = Row::new().with_variant(Parameter::DeviceCompiler, NVCC, Version::major(12));
        assert!(search_and_move(&mut m, &key, 0).unwrap());
        assert_eq!(m[0].version_of(&Parameter::HostCompiler), Some(Version::major(12)));
        assert_eq!(m.len(), 4);
    }

    #[test]
    fn test_search_and_move_requires_all_attributes() {
        let mut m = matrix();
        let key = Row::new()
            .with_variant(Parameter::HostCompiler, GCC, Version::major(9))
            .with_variant(Parameter::DeviceCompiler, NVCC, Version::major_minor(11, 2));
        assert!(!search_and_move(&mut m, &key, 0).unwrap());
        assert_eq!(m, matrix());
    }

    #[test]
    fn test_search_and_move_clamps_position() {
        let mut m = matrix();
        let key = Row::new().with_variant(Parameter::HostCompiler, GCC, Version::major(9));
        assert!(search_and_move(&mut m, &key, 100).unwrap());
        assert_eq!(m[3].version_of(&Parameter::HostCompiler), Some(Version::major(9)));
        assert_eq!(m[0].name_of(&Parameter::HostCompiler), Some(CLANG));
    }

    #[test]
    fn test_search_and_move_empty_key() {
        let mut m = matrix();
        assert!(matches!(
            search_and_move(&mut m, &Row::new(), 0),
            Err(Error::EmptySearchKey)
        ));
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let mut a: Vec<u32> = (0..50).collect();
        let mut b = a.clone();
        shuffle(&mut a, 42);
        shuffle(&mut b, 42);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(a, sorted);
    }

    #[test]
    fn test_pipeline_filter_reorder_waves() {
        let jobs: Vec<Job> = matrix().into_iter().map(Job::from_row).collect();
        let config = PipelineConfig::new()
            .with_name_filter("host_compiler=gcc")
            .with_reorder(".*nvcc@12")
            .with_waves(2);
        let waves = Pipeline::new(config).run(jobs).unwrap();
        assert_eq!(waves.len(), 2);
        assert_eq!(
            waves[0][0].name,
            "host_compiler=gcc@12 device_compiler=nvcc@12.0"
        );
        assert_eq!(waves.iter().map(Vec::len).sum::<usize>(), 3);
    }

    #[test]
    fn test_pipeline_defaults_keep_order() {
        let jobs = vec!["a", "b", "c"];
        let ordered = Pipeline::default().order(jobs.clone()).unwrap();
        assert_eq!(ordered, jobs);
    }

    #[test]
    fn test_pipeline_shuffle_then_reorder() {
        let jobs: Vec<String> = (0..20).map(|i| format!("job{i:02}")).collect();
        let config = PipelineConfig::new()
            .with_shuffle_seed(7)
            .with_reorder("job00")
            .with_waves(1);
        let pipeline = Pipeline::new(config);
        let first = pipeline.order(jobs.clone()).unwrap();
        let second = pipeline.order(jobs).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0], "job00");
    }

    #[test]
    fn test_pipeline_zero_waves() {
        let pipeline = Pipeline::new(PipelineConfig::new().with_waves(0));
        assert!(matches!(
            pipeline.run(vec!["a"]),
            Err(Error::InvalidWaveCount)
        ));
    }
}
