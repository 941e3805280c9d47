//! Interaction tuples and their coverage state.
//!
//! A tuple is a set of `t` (parameter index, value index) assignments over
//! `t` distinct parameters, sorted by parameter index.

use std::collections::HashMap;

/// One (parameter index, value index) assignment.
pub(crate) type Assignment = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TupleState {
    Uncovered,
    Covered,
    /// Cannot occur in any admitted row (or its seed search failed).
    Unsatisfiable,
}

/// All `t`-tuples of a domain set, in canonical order.
///
/// Canonical order: parameter combinations lexicographically, then value
/// combinations lexicographically within each parameter combination.
#[derive(Debug)]
pub(crate) struct TupleSet {
    tuples: Vec<Vec<Assignment>>,
    index: HashMap<Vec<Assignment>, usize>,
    state: Vec<TupleState>,
}

impl TupleSet {
    /// Enumerates all tuples of strength `strength` over domains of the
    /// given sizes.
    pub fn new(domain_sizes: &[usize], strength: usize) -> Self {
        let mut tuples = Vec::new();
        for params in combinations(domain_sizes.len(), strength) {
            let sizes: Vec<usize> = params.iter().map(|&p| domain_sizes[p]).collect();
            for values in cartesian(&sizes) {
                tuples.push(params.iter().copied().zip(values).collect::<Vec<_>>());
            }
        }
        let index = tuples
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        let state = vec![TupleState::Uncovered; tuples.len()];
        Self {
            tuples,
            index,
            state,
        }
    }

    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    pub fn tuple(&self, id: usize) -> &[Assignment] {
        &self.tuples[id]
    }

    pub fn set_state(&mut self, id: usize, state: TupleState) {
        self.state[id] = state;
    }

    /// Id of a tuple given in canonical (parameter-sorted) form.
    pub fn lookup(&self, tuple: &[Assignment]) -> Option<usize> {
        self.index.get(tuple).copied()
    }

    /// Whether the tuple is still uncovered.
    pub fn is_uncovered(&self, tuple: &[Assignment]) -> bool {
        self.lookup(tuple)
            .is_some_and(|id| self.state[id] == TupleState::Uncovered)
    }

    /// First uncovered tuple at or after `from`.
    pub fn next_uncovered(&self, from: usize) -> Option<usize> {
        (from..self.tuples.len()).find(|&id| self.state[id] == TupleState::Uncovered)
    }

    pub fn count(&self, state: TupleState) -> usize {
        self.state.iter().filter(|&&s| s == state).count()
    }
}

/// All `k`-subsets of `0..n` as sorted index lists, lexicographically.
pub(crate) fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut current: Vec<usize> = (0..k).collect();
    loop {
        result.push(current.clone());
        // rightmost position that can still be incremented
        let Some(i) = (0..k).rev().find(|&i| current[i] < n - k + i) else {
            return result;
        };
        current[i] += 1;
        for j in i + 1..k {
            current[j] = current[j - 1] + 1;
        }
    }
}

/// All index vectors `v` with `v[i] < sizes[i]`, lexicographically.
pub(crate) fn cartesian(sizes: &[usize]) -> Vec<Vec<usize>> {
    if sizes.contains(&0) {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut current = vec![0; sizes.len()];
    loop {
        result.push(current.clone());
        let Some(i) = (0..sizes.len()).rev().find(|&i| current[i] + 1 < sizes[i]) else {
            return result;
        };
        current[i] += 1;
        for slot in current.iter_mut().skip(i + 1) {
            *slot = 0;
        }
    }
}
