//! Job matrix domain models.
//!
//! Provides the core data types shared by the filter engine, the generator
//! and the ordering pipeline.
//!
//! # Domain Mappings
//!
//! | u-job-coverage | CI matrix | Example |
//! |----------------|-----------|---------|
//! | Parameter | Matrix axis | host compiler, CMake |
//! | Variant | Axis value | `gcc@12`, `cmake@3.25` |
//! | Row | Job configuration | one combination of all axes |
//! | Job | CI job | named row |

mod domains;
mod job;
mod parameter;
mod row;
mod version;

pub use domains::Domains;
pub use job::{Job, NamedJob};
pub use parameter::{names, Backend, BackendVariant, Parameter, ParameterValue, Variant};
pub use row::Row;
pub use version::{Comparison, PreRelease, Version, MAX_SEGMENTS};
