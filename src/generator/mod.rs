//! Constraint-aware t-wise combination generator.
//!
//! Builds a small set of full rows such that every t-tuple of parameter
//! values that can occur in an admitted row occurs in at least one output
//! row. Illegal partial rows are pruned during construction instead of
//! filtering a generated matrix afterwards.
//!
//! # Algorithm
//!
//! 1. Enumerate all t-tuples in canonical order. Tuples whose own partial
//!    row is rejected are marked unsatisfiable up front.
//! 2. Take the first uncovered tuple as the seed of a new row.
//! 3. Complete the row by depth-first search over the remaining parameters
//!    in domain order. Candidate values are tried by number of newly
//!    covered tuples (descending), then by domain position. Every partial
//!    row is checked against the admission predicate before descending.
//! 4. Mark every tuple of the completed row as covered. A seed that cannot
//!    be completed, or whose search exceeds the budget, is dropped.
//!
//! # Complexity
//! Enumeration is O(C(n, t) * d^t) for n parameters with domains of size d.
//! Each row costs at most `search_budget` admission calls.
//!
//! # Reference
//! Cohen et al. (1997), "The AETG System: An Approach to Testing Based on
//! Combinatorial Design"

mod tuples;

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::filters::FilterChain;
use crate::models::{Domains, Parameter, ParameterValue, Row};

pub(crate) use tuples::combinations;
use tuples::{Assignment, TupleSet, TupleState};

/// Generates a covering matrix of strength `pair_size`.
///
/// `admit` decides whether a (partial) row is legal. It must reject only on
/// values present in the row; see [`FilterModule`](crate::filters::FilterModule).
///
/// # Errors
/// [`Error::InvalidPairSize`] unless `1 <= pair_size <= domains.len()`.
/// Empty domains produce an empty matrix instead.
pub fn generate<F>(domains: &Domains, admit: F, pair_size: usize) -> Result<Vec<Row>>
where
    F: Fn(&Row) -> bool,
{
    generate_with(
        domains,
        admit,
        &GeneratorConfig::default().with_pair_size(pair_size),
    )
}

/// Generates a covering matrix with explicit settings.
pub fn generate_with<F>(domains: &Domains, admit: F, config: &GeneratorConfig) -> Result<Vec<Row>>
where
    F: Fn(&Row) -> bool,
{
    if domains.is_empty() {
        return Ok(Vec::new());
    }
    if config.pair_size == 0 || config.pair_size > domains.len() {
        return Err(Error::InvalidPairSize {
            pair_size: config.pair_size,
            parameters: domains.len(),
        });
    }
    Ok(Generator::new(domains, &admit, config).run())
}

/// Generates the job matrix admitted by a filter chain.
pub fn create_job_list(
    domains: &Domains,
    chain: &FilterChain,
    config: &GeneratorConfig,
) -> Result<Vec<Row>> {
    generate_with(domains, |row| chain.admits(row), config)
}

enum Search {
    Found,
    Exhausted,
    BudgetExceeded,
}

struct Generator<'a, F> {
    parameters: Vec<&'a Parameter>,
    values: Vec<&'a [ParameterValue]>,
    admit: &'a F,
    strength: usize,
    budget: usize,
    tuples: TupleSet,
}

impl<'a, F> Generator<'a, F>
where
    F: Fn(&Row) -> bool,
{
    fn new(domains: &'a Domains, admit: &'a F, config: &GeneratorConfig) -> Self {
        let (parameters, values): (Vec<_>, Vec<_>) = domains.iter().unzip();
        let sizes: Vec<usize> = values.iter().map(|v| v.len()).collect();
        let tuples = TupleSet::new(&sizes, config.pair_size);
        Self {
            parameters,
            values,
            admit,
            strength: config.pair_size,
            budget: config.search_budget,
            tuples,
        }
    }

    fn run(mut self) -> Vec<Row> {
        self.prune_unsatisfiable();

        let mut rows = Vec::new();
        let mut cursor = 0;
        while let Some(seed) = self.tuples.next_uncovered(cursor) {
            cursor = seed;
            match self.complete(seed) {
                Some(assignment) => {
                    self.mark_covered(&assignment);
                    rows.push(self.build_row(&assignment));
                }
                None => self.tuples.set_state(seed, TupleState::Unsatisfiable),
            }
        }

        log::info!(
            "generated {} rows covering {} of {} {}-tuples ({} unsatisfiable)",
            rows.len(),
            self.tuples.count(TupleState::Covered),
            self.tuples.len(),
            self.strength,
            self.tuples.count(TupleState::Unsatisfiable),
        );
        rows
    }

    fn prune_unsatisfiable(&mut self) {
        for id in 0..self.tuples.len() {
            let mut row = Row::new();
            for &(p, v) in self.tuples.tuple(id) {
                row.insert(self.parameters[p].clone(), self.values[p][v].clone());
            }
            if !(self.admit)(&row) {
                log::debug!("dropping unsatisfiable tuple {row}");
                self.tuples.set_state(id, TupleState::Unsatisfiable);
            }
        }
    }

    /// Completes the seed tuple to a full admitted assignment.
    fn complete(&self, seed: usize) -> Option<Vec<usize>> {
        let n = self.parameters.len();
        let mut assignment: Vec<Option<usize>> = vec![None; n];
        let mut row = Row::new();
        for &(p, v) in self.tuples.tuple(seed) {
            assignment[p] = Some(v);
            row.insert(self.parameters[p].clone(), self.values[p][v].clone());
        }
        let order: Vec<usize> = (0..n).filter(|&p| assignment[p].is_none()).collect();

        let mut calls = 0;
        match self.search(&order, &mut assignment, &mut row, &mut calls) {
            Search::Found => assignment.into_iter().collect(),
            Search::Exhausted => {
                log::debug!("no admitted row contains seed {row}");
                None
            }
            Search::BudgetExceeded => {
                log::warn!(
                    "search budget of {} admission calls exceeded, dropping seed {row}",
                    self.budget
                );
                None
            }
        }
    }

    fn search(
        &self,
        order: &[usize],
        assignment: &mut [Option<usize>],
        row: &mut Row,
        calls: &mut usize,
    ) -> Search {
        let Some((&p, rest)) = order.split_first() else {
            return Search::Found;
        };
        let parameter = self.parameters[p];

        for v in self.ranked_candidates(p, assignment) {
            if *calls >= self.budget {
                return Search::BudgetExceeded;
            }
            *calls += 1;
            row.insert(parameter.clone(), self.values[p][v].clone());
            if (self.admit)(row) {
                assignment[p] = Some(v);
                match self.search(rest, assignment, row, calls) {
                    Search::Exhausted => assignment[p] = None,
                    done => return done,
                }
            }
        }
        row.remove(parameter);
        Search::Exhausted
    }

    /// Value indices of parameter `p`, best gain first.
    fn ranked_candidates(&self, p: usize, assignment: &[Option<usize>]) -> Vec<usize> {
        let assigned: Vec<Assignment> = assignment
            .iter()
            .enumerate()
            .filter_map(|(q, v)| v.map(|v| (q, v)))
            .collect();
        let mut ranked: Vec<(usize, usize)> = (0..self.values[p].len())
            .map(|v| (self.gain(&assigned, (p, v)), v))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        ranked.into_iter().map(|(_, v)| v).collect()
    }

    /// Uncovered tuples completed by adding `candidate` to `assigned`.
    fn gain(&self, assigned: &[Assignment], candidate: Assignment) -> usize {
        let others = self.strength - 1;
        combinations(assigned.len(), others)
            .into_iter()
            .filter(|picked| {
                let mut tuple: Vec<Assignment> = picked.iter().map(|&i| assigned[i]).collect();
                tuple.push(candidate);
                tuple.sort_unstable();
                self.tuples.is_uncovered(&tuple)
            })
            .count()
    }

    fn mark_covered(&mut self, assignment: &[usize]) {
        for params in combinations(assignment.len(), self.strength) {
            let tuple: Vec<Assignment> = params.iter().map(|&p| (p, assignment[p])).collect();
            if let Some(id) = self.tuples.lookup(&tuple) {
                self.tuples.set_state(id, TupleState::Covered);
            }
        }
    }

    fn build_row(&self, assignment: &[usize]) -> Row {
        assignment
            .iter()
            .enumerate()
            .map(|(p, &v)| (self.parameters[p].clone(), self.values[p][v].clone()))
            .collect()
    }
}
