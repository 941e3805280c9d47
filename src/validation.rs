//! Input validation for parameter domains.
//!
//! Checks the structural integrity of domains before generation. Detects:
//! - Software names the catalog does not know
//! - Software placed on the wrong axis (e.g. `cmake` as host compiler)
//! - Duplicate values within a domain
//! - Backend sets naming the same backend twice
//!
//! Versions outside the catalog are not errors; see [`unsupported_variants`].

use std::collections::HashSet;
use std::fmt;

use crate::catalog::VersionCatalog;
use crate::models::names::{
    BOOST, CLANG, CLANG_CUDA, CMAKE, CXX_STANDARD, GCC, HIPCC, ICPX, NVCC, UBUNTU,
};
use crate::models::{Domains, Parameter, ParameterValue, Version};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A variant names software the catalog does not know.
    UnknownSoftware,
    /// A variant names software that does not belong on its axis.
    MisplacedSoftware,
    /// A domain lists the same value twice.
    DuplicateValue,
    /// A backend set lists the same backend twice.
    DuplicateBackend,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

const COMPILERS: [&str; 6] = [GCC, CLANG, NVCC, CLANG_CUDA, HIPCC, ICPX];

/// Software names allowed on an axis, or `None` if the axis is unchecked.
fn allowed_names(parameter: &Parameter) -> Option<&'static [&'static str]> {
    match parameter {
        Parameter::HostCompiler | Parameter::DeviceCompiler => Some(&COMPILERS),
        Parameter::Cmake => Some(&[CMAKE]),
        Parameter::Boost => Some(&[BOOST]),
        Parameter::Ubuntu => Some(&[UBUNTU]),
        Parameter::CxxStandard => Some(&[CXX_STANDARD]),
        Parameter::Backends | Parameter::Alpaka | Parameter::Custom(_) => None,
    }
}

/// Validates parameter domains against a catalog.
///
/// Checks:
/// 1. No value appears twice in a domain
/// 2. No backend set names a backend twice
/// 3. Every variant on a known axis names software allowed on that axis
/// 4. Every such software is in the catalog
///
/// `alpaka` and custom axes are only checked for duplicates.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_domains(domains: &Domains, catalog: &VersionCatalog) -> ValidationResult {
    let mut errors = Vec::new();

    for (parameter, values) in domains.iter() {
        let mut seen = HashSet::new();
        for value in values {
            if !seen.insert(value) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateValue,
                    format!("Duplicate value '{value}' for parameter '{parameter}'"),
                ));
            }

            match value {
                ParameterValue::Backends(set) => {
                    let mut backends = HashSet::new();
                    for b in set {
                        if !backends.insert(b.backend) {
                            errors.push(ValidationError::new(
                                ValidationErrorKind::DuplicateBackend,
                                format!("Backend '{}' appears twice in {value}", b.backend),
                            ));
                        }
                    }
                }
                ParameterValue::Single(variant) => {
                    let Some(allowed) = allowed_names(parameter) else {
                        continue;
                    };
                    if !catalog.knows(&variant.name) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::UnknownSoftware,
                            format!("Unknown software '{}' for parameter '{parameter}'", variant.name),
                        ));
                    } else if !allowed.contains(&variant.name.as_str()) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::MisplacedSoftware,
                            format!("'{}' is not valid for parameter '{parameter}'", variant.name),
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A known software version that the catalog does not list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedVariant {
    pub parameter: Parameter,
    pub name: String,
    pub version: Version,
}

impl fmt::Display for UnsupportedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}@{}", self.parameter, self.name, self.version)
    }
}

/// Lists variants whose software is known but whose version is not
/// catalogued, in domain order. Each one is logged at warn level.
///
/// Unknown software is skipped here; [`validate_domains`] reports it.
pub fn unsupported_variants(domains: &Domains, catalog: &VersionCatalog) -> Vec<UnsupportedVariant> {
    let mut unsupported = Vec::new();
    for (parameter, values) in domains.iter() {
        for value in values {
            match value {
                ParameterValue::Single(variant) => {
                    if let Ok(false) = catalog.is_supported(&variant.name, variant.version) {
                        unsupported.push(UnsupportedVariant {
                            parameter: parameter.clone(),
                            name: variant.name.clone(),
                            version: variant.version,
                        });
                    }
                }
                ParameterValue::Backends(set) => {
                    unsupported.extend(set.iter().filter(|b| !catalog.is_backend_supported(b)).map(
                        |b| UnsupportedVariant {
                            parameter: parameter.clone(),
                            name: b.backend.as_str().to_string(),
                            version: b.version,
                        },
                    ));
                }
            }
        }
    }
    for variant in &unsupported {
        log::warn!("unsupported version {variant}");
    }
    unsupported
}
