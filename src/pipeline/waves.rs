//! Wave distribution.

use crate::error::{Error, Result};

/// Splits jobs into at most `waves` contiguous groups of near-equal size.
///
/// The first `len % waves` groups hold one job more than the rest. Order is
/// preserved and no group is empty, so fewer jobs than waves yields one
/// group per job.
///
/// # Errors
/// [`Error::InvalidWaveCount`] if `waves` is zero.
pub fn distribute_waves<J>(jobs: Vec<J>, waves: usize) -> Result<Vec<Vec<J>>> {
    if waves == 0 {
        return Err(Error::InvalidWaveCount);
    }
    let groups = waves.min(jobs.len());
    if groups == 0 {
        return Ok(Vec::new());
    }

    let base = jobs.len() / groups;
    let extra = jobs.len() % groups;
    let mut remaining = jobs.into_iter();
    let result: Vec<Vec<J>> = (0..groups)
        .map(|i| {
            let size = if i < extra { base + 1 } else { base };
            remaining.by_ref().take(size).collect()
        })
        .collect();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_23_jobs_into_10_waves() {
        let jobs: Vec<usize> = (0..23).collect();
        let waves = distribute_waves(jobs.clone(), 10).unwrap();
        assert_eq!(waves.len(), 10);
        assert!(waves.iter().all(|w| w.len() == 2 || w.len() == 3));
        assert_eq!(waves.iter().map(Vec::len).sum::<usize>(), 23);
        let flattened: Vec<usize> = waves.into_iter().flatten().collect();
        assert_eq!(flattened, jobs);
    }

    #[test]
    fn test_larger_waves_come_first() {
        let waves = distribute_waves((0..7).collect::<Vec<_>>(), 3).unwrap();
        assert_eq!(waves, vec![vec![0, 1, 2], vec![3, 4], vec![5, 6]]);
    }

    #[test]
    fn test_fewer_jobs_than_waves() {
        let waves = distribute_waves(vec!["a", "b", "c"], 10).unwrap();
        assert_eq!(waves, vec![vec!["a"], vec!["b"], vec!["c"]]);
    }

    #[test]
    fn test_no_jobs() {
        let waves = distribute_waves(Vec::<u8>::new(), 4).unwrap();
        assert!(waves.is_empty());
    }

    #[test]
    fn test_zero_waves() {
        assert!(matches!(
            distribute_waves(vec![1, 2, 3], 0),
            Err(Error::InvalidWaveCount)
        ));
    }

    #[test]
    fn test_single_wave() {
        let waves = distribute_waves(vec![1, 2, 3], 1).unwrap();
        assert_eq!(waves, vec![vec![1, 2, 3]]);
    }
}
