//! Name-based filtering and priority reordering.
//!
//! Patterns are regular expressions matched at the start of the job name,
//! so `gcc` matches `gcc12_nvcc11` but not `linux_gcc12`.

use regex::Regex;

use crate::error::Result;
use crate::models::NamedJob;

/// Compiles a pattern anchored at the start of the input.
fn anchored(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("^(?:{pattern})"))?)
}

/// Keeps only jobs whose name matches `pattern`.
///
/// Order is preserved. A pattern matching nothing yields an empty list.
///
/// # Errors
/// [`Error::InvalidPattern`](crate::Error::InvalidPattern) if `pattern` is
/// not a valid regex.
pub fn filter_by_name<J: NamedJob>(jobs: Vec<J>, pattern: &str) -> Result<Vec<J>> {
    let regex = anchored(pattern)?;
    let before = jobs.len();
    let kept: Vec<J> = jobs
        .into_iter()
        .filter(|job| regex.is_match(job.name()))
        .collect();
    log::debug!("name filter '{pattern}' kept {} of {before} jobs", kept.len());
    Ok(kept)
}

/// Reorders jobs by a whitespace-separated priority list of patterns.
///
/// Jobs matching the first pattern come first, then jobs matching the
/// second, and so on. A job matching several patterns belongs to the first
/// one. Jobs matching no pattern keep their place at the end. Relative order
/// within each group is preserved. An empty list leaves the jobs unchanged.
///
/// # Errors
/// [`Error::InvalidPattern`](crate::Error::InvalidPattern) for an invalid
/// regex in the list.
pub fn reorder<J: NamedJob>(jobs: Vec<J>, patterns: &str) -> Result<Vec<J>> {
    let regexes = patterns
        .split_whitespace()
        .map(anchored)
        .collect::<Result<Vec<_>>>()?;
    if regexes.is_empty() {
        return Ok(jobs);
    }

    let priority = |job: &J| {
        regexes
            .iter()
            .position(|r| r.is_match(job.name()))
            .unwrap_or(regexes.len())
    };
    let mut ranked: Vec<(usize, J)> = jobs.into_iter().map(|job| (priority(&job), job)).collect();
    ranked.sort_by_key(|(rank, _)| *rank);
    Ok(ranked.into_iter().map(|(_, job)| job).collect())
}
