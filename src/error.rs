//! Crate-wide error type.
//!
//! Only malformed input is an error. Rejections by filter modules are
//! ordinary values (see [`crate::filters::Decision`]) and unsatisfiable
//! tuples are silently dropped by the generator.

use thiserror::Error;

use crate::models::Parameter;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A version string could not be parsed.
    #[error("Invalid version string: '{input}'")]
    VersionFormat { input: String },

    /// A software name is absent from the version catalog.
    #[error("Unknown software name: {0}")]
    UnknownSoftware(String),

    /// A manual pin was requested without any search attribute.
    #[error("Search key must not be empty")]
    EmptySearchKey,

    /// The same parameter was registered twice in one domain set.
    #[error("Duplicate parameter: {0}")]
    DuplicateParameter(Parameter),

    /// A parameter was registered with no values.
    #[error("Parameter '{0}' has an empty domain")]
    EmptyDomain(Parameter),

    /// A value does not have the shape its parameter expects.
    #[error("Parameter '{parameter}' expects {expected} values")]
    ValueShape {
        parameter: Parameter,
        expected: &'static str,
    },

    /// The interaction strength is out of range for the given domains.
    #[error("Pair size {pair_size} is invalid for {parameters} parameters")]
    InvalidPairSize { pair_size: usize, parameters: usize },

    /// Jobs cannot be split into zero waves.
    #[error("Number of waves must be at least 1")]
    InvalidWaveCount,

    /// A job-name pattern is not a valid regular expression.
    #[error("Invalid job name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
