//! Filter chain: the admission predicate of the generator.
//!
//! Composes filter modules in order. A row is admitted iff every module
//! admits it; the first rejecting module short-circuits.

use std::fmt;
use std::sync::Arc;

use super::rules;
use super::{Decision, FilterModule, Rejection};
use crate::models::{Parameter, Row};

/// An ordered, composable set of filter modules.
///
/// # Example
/// ```
/// use u_job_coverage::filters::{FilterChain, PredicateFilter};
/// use u_job_coverage::models::{Parameter, Version};
///
/// let chain = FilterChain::standard().with_module(PredicateFilter::new(
///     "no-old-cmake",
///     |row| !row.version_of(&Parameter::Cmake).is_some_and(|v| v < Version::major_minor(3, 20)),
/// ));
/// assert_eq!(chain.len(), 6);
/// ```
#[derive(Clone)]
pub struct FilterChain {
    modules: Vec<Arc<dyn FilterModule>>,
}

impl FilterChain {
    /// Creates an empty chain (admits everything).
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Chain with all built-in compatibility modules.
    pub fn standard() -> Self {
        Self::new()
            .with_module(rules::CompilerNameFilter)
            .with_module(rules::CompilerVersionFilter)
            .with_module(rules::BackendConflictFilter)
            .with_module(rules::BackendCompatibilityFilter)
            .with_module(rules::SoftwareDependencyFilter)
    }

    /// Appends a module.
    pub fn with_module<M: FilterModule + 'static>(mut self, module: M) -> Self {
        self.modules.push(Arc::new(module));
        self
    }

    /// Appends an already shared module.
    pub fn with_shared_module(mut self, module: Arc<dyn FilterModule>) -> Self {
        self.modules.push(module);
        self
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Module names in evaluation order.
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Whether every module admits the row.
    pub fn admits(&self, row: &Row) -> bool {
        self.modules.iter().all(|m| m.check(row, None))
    }

    /// Like [`admits`](Self::admits), appending the rejection reason to
    /// `diagnostics`.
    pub fn check(&self, row: &Row, diagnostics: &mut Vec<String>) -> bool {
        self.modules
            .iter()
            .all(|m| m.check(row, Some(&mut *diagnostics)))
    }

    /// Admission with the rejecting module and its reason.
    pub fn explain(&self, row: &Row) -> Result<(), Rejection> {
        for module in &self.modules {
            if !row.has_all(&module.required_parameters()) {
                continue;
            }
            if let Decision::Reject(reason) = module.evaluate(row) {
                return Err(Rejection {
                    module: module.name().to_string(),
                    reason: reason.into_owned(),
                });
            }
        }
        Ok(())
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("modules", &self.module_names())
            .finish()
    }
}

type Predicate = dyn Fn(&Row) -> bool + Send + Sync;

/// A user-supplied predicate as a filter module.
///
/// Used for project-specific rules that extend the built-in chain.
pub struct PredicateFilter {
    name: String,
    required: Vec<Parameter>,
    predicate: Box<Predicate>,
}

impl PredicateFilter {
    /// Wraps `predicate`. Returning `false` rejects the row.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Row) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            required: Vec::new(),
            predicate: Box::new(predicate),
        }
    }

    /// Skips the predicate until all `parameters` are present.
    pub fn with_required(mut self, parameters: Vec<Parameter>) -> Self {
        self.required = parameters;
        self
    }
}

impl FilterModule for PredicateFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_parameters(&self) -> Vec<Parameter> {
        self.required.clone()
    }

    fn evaluate(&self, row: &Row) -> Decision {
        Decision::reject_if(!(self.predicate)(row), "rejected by predicate")
    }
}

impl fmt::Debug for PredicateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateFilter")
            .field("name", &self.name)
            .field("required", &self.required)
            .finish()
    }
}
