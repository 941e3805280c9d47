//! Pairwise coverage oracle.
//!
//! Computes the expected value pairs of a domain set and checks a generated
//! matrix against them. Without filtering, every pair of values of every two
//! parameters is expected. With filtering the check degenerates to a subset
//! check, since rejected pairs can never appear.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Expected | Unordered parameter pairs × value pairs |
//! | Covered | Expected pairs found in at least one row |
//! | Missing | Expected pairs found in no row |
//! | Coverage | Covered / Expected |

use std::collections::HashSet;
use std::fmt;

use crate::generator::combinations;
use crate::models::{Domains, Parameter, ParameterValue, Row};

/// One expected value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoverageTuple {
    pub first: (Parameter, ParameterValue),
    pub second: (Parameter, ParameterValue),
}

impl CoverageTuple {
    /// Whether the row holds both values.
    pub fn is_covered_by(&self, row: &Row) -> bool {
        row.get(&self.first.0) == Some(&self.first.1)
            && row.get(&self.second.0) == Some(&self.second.1)
    }
}

impl fmt::Display for CoverageTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {} -> {} : {}",
            self.first.0, self.first.1, self.second.0, self.second.1
        )
    }
}

/// Every value pair of every two distinct parameters, in domain order.
pub fn expected_tuples(domains: &Domains) -> Vec<CoverageTuple> {
    let entries: Vec<_> = domains.iter().collect();
    let mut expected = Vec::new();
    for pick in combinations(entries.len(), 2) {
        let (p1, values1) = entries[pick[0]];
        let (p2, values2) = entries[pick[1]];
        for v1 in values1 {
            for v2 in values2 {
                expected.push(CoverageTuple {
                    first: (p1.clone(), v1.clone()),
                    second: (p2.clone(), v2.clone()),
                });
            }
        }
    }
    expected
}

/// Coverage of a matrix against the expected pairs of a domain set.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Number of expected pairs.
    pub expected: usize,
    /// Number of expected pairs present in the matrix.
    pub covered: usize,
    /// Expected pairs absent from the matrix, in domain order.
    pub missing: Vec<CoverageTuple>,
}

impl CoverageReport {
    /// Checks `matrix` against the expected pairs of `domains`.
    pub fn calculate(matrix: &[Row], domains: &Domains) -> Self {
        let present: HashSet<(&Parameter, &ParameterValue, &Parameter, &ParameterValue)> = matrix
            .iter()
            .flat_map(|row| {
                let cells: Vec<_> = row.iter().collect();
                combinations(cells.len(), 2)
                    .into_iter()
                    .map(move |pick| {
                        let (p1, v1) = cells[pick[0]];
                        let (p2, v2) = cells[pick[1]];
                        (p1, v1, p2, v2)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let expected = expected_tuples(domains);
        let total = expected.len();
        let missing: Vec<CoverageTuple> = expected
            .into_iter()
            .filter(|t| !Self::contains(&present, t))
            .collect();

        Self {
            expected: total,
            covered: total - missing.len(),
            missing,
        }
    }

    fn contains(
        present: &HashSet<(&Parameter, &ParameterValue, &Parameter, &ParameterValue)>,
        tuple: &CoverageTuple,
    ) -> bool {
        let (p1, v1) = (&tuple.first.0, &tuple.first.1);
        let (p2, v2) = (&tuple.second.0, &tuple.second.1);
        present.contains(&(p1, v1, p2, v2)) || present.contains(&(p2, v2, p1, v1))
    }

    /// Whether every expected pair is covered.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Fraction of expected pairs covered (1.0 for nothing expected).
    pub fn coverage(&self) -> f64 {
        if self.expected == 0 {
            1.0
        } else {
            self.covered as f64 / self.expected as f64
        }
    }
}

/// Expected pairs of `domains` that no row of `matrix` covers.
pub fn coverage_report(matrix: &[Row], domains: &Domains) -> Vec<CoverageTuple> {
    CoverageReport::calculate(matrix, domains).missing
}

/// Whether `matrix` covers every expected pair of `domains`.
///
/// Each missing pair is logged at warn level.
pub fn verify(matrix: &[Row], domains: &Domains) -> bool {
    let report = CoverageReport::calculate(matrix, domains);
    for tuple in &report.missing {
        log::warn!("could not find expected pair: {tuple}");
    }
    report.is_complete()
}
