//! Constraint filters for job matrix rows.
//!
//! Provides the [`FilterModule`] trait, the built-in compatibility rules and
//! a composable [`FilterChain`] that is used as the admission predicate of
//! the generator.
//!
//! # Usage
//!
//! ```
//! use u_job_coverage::filters::FilterChain;
//! use u_job_coverage::models::{names, Parameter, Row, Version};
//!
//! let chain = FilterChain::standard();
//! let row = Row::new()
//!     .with_variant(Parameter::HostCompiler, names::GCC, Version::major(13))
//!     .with_variant(Parameter::DeviceCompiler, names::NVCC, Version::major_minor(11, 2));
//! assert!(!chain.admits(&row));
//! ```
//!
//! # Partial rows
//!
//! The generator evaluates rows while they are still being built. A module
//! whose [`required_parameters`](FilterModule::required_parameters) are not
//! all present is skipped (passes vacuously), and every rule inside a module
//! only rejects on values that are actually present.

mod chain;
pub mod rules;
mod table;

pub use chain::{FilterChain, PredicateFilter};
pub use table::{BoundKind, CompatTable};

use std::borrow::Cow;
use std::fmt::Debug;
use thiserror::Error;

use crate::models::{Parameter, Row};

/// Outcome of evaluating one filter module against a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Admit,
    /// Rejected, with a human-readable reason.
    Reject(Cow<'static, str>),
}

impl Decision {
    /// Rejection with the given reason.
    pub fn reject(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Reject(reason.into())
    }

    /// Rejects with `reason` if `condition` holds, admits otherwise.
    pub fn reject_if(condition: bool, reason: impl Into<Cow<'static, str>>) -> Self {
        if condition {
            Self::reject(reason)
        } else {
            Self::Admit
        }
    }

    pub fn is_admit(&self) -> bool {
        matches!(self, Self::Admit)
    }

    /// Evaluates `next` only if this decision admits.
    pub fn and_then(self, next: impl FnOnce() -> Decision) -> Decision {
        match self {
            Self::Admit => next(),
            reject => reject,
        }
    }
}

/// A rejected row: which module rejected it and why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{module}: {reason}")]
pub struct Rejection {
    pub module: String,
    pub reason: String,
}

/// A filter over (partial) job matrix rows.
///
/// # Contract
/// `evaluate` must be pure. It must tolerate any subset of parameters being
/// absent and reject only on values present in the row, so that a rejected
/// partial row can never be completed into an admitted full row.
pub trait FilterModule: Send + Sync + Debug {
    /// Module name (e.g., "compiler-name").
    fn name(&self) -> &str;

    /// Parameters that must all be present for the module to be evaluated.
    fn required_parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    /// Evaluates the row, ignoring the required-parameter check.
    fn evaluate(&self, row: &Row) -> Decision;

    /// Module description.
    fn description(&self) -> &str {
        self.name()
    }

    /// Admission check with vacuous pass on missing parameters.
    ///
    /// On rejection, appends `"<module>: <reason>"` to `diagnostics` if given.
    fn check(&self, row: &Row, diagnostics: Option<&mut Vec<String>>) -> bool {
        if !row.has_all(&self.required_parameters()) {
            return true;
        }
        match self.evaluate(row) {
            Decision::Admit => true,
            Decision::Reject(reason) => {
                if let Some(sink) = diagnostics {
                    sink.push(format!("{}: {}", self.name(), reason));
                }
                false
            }
        }
    }
}
