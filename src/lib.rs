//! Constraint-aware pairwise job matrix generation for CI.
//!
//! Builds a small set of build jobs (host compiler, device compiler, enabled
//! backends, CMake, Boost, OS, C++ standard, ...) such that every pair of
//! parameter values that can legally occur together is exercised by at least
//! one job. Illegal combinations are pruned during construction by a chain
//! of filter modules that encode toolchain compatibility rules.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Version`, `Parameter`, `Variant`,
//!   `BackendVariant`, `Row`, `Domains`, `Job`
//! - **`filters`**: `FilterModule` trait, `FilterChain`, and the built-in
//!   compatibility rules
//! - **`generator`**: Greedy t-wise covering generator with constraint pruning
//! - **`pipeline`**: Shuffle, name filter, priority reorder, wave split, pinning
//! - **`oracle`**: Independent pairwise coverage check
//! - **`catalog`**: Versions the rules are written for
//! - **`validation`**: Domain integrity checks against the catalog
//! - **`config`**: Serde-deserializable settings
//!
//! # Usage
//!
//! ```
//! use u_job_coverage::config::GeneratorConfig;
//! use u_job_coverage::filters::FilterChain;
//! use u_job_coverage::generator::create_job_list;
//! use u_job_coverage::models::{names, Domains, Parameter, Variant, Version};
//!
//! let compilers = vec![
//!     Variant::new(names::GCC, Version::major(12)),
//!     Variant::new(names::CLANG, Version::major(16)),
//! ];
//! let cmake = vec![
//!     Variant::new(names::CMAKE, Version::major_minor(3, 22)),
//!     Variant::new(names::CMAKE, Version::major_minor(3, 26)),
//! ];
//! let domains = Domains::new()
//!     .with_variants(Parameter::HostCompiler, compilers.clone())?
//!     .with_variants(Parameter::DeviceCompiler, compilers)?
//!     .with_variants(Parameter::Cmake, cmake)?;
//!
//! let rows = create_job_list(&domains, &FilterChain::standard(), &GeneratorConfig::default())?;
//! assert!(rows
//!     .iter()
//!     .all(|r| r.name_of(&Parameter::HostCompiler) == r.name_of(&Parameter::DeviceCompiler)));
//! # Ok::<(), u_job_coverage::Error>(())
//! ```
//!
//! # References
//!
//! - Cohen et al. (1997), "The AETG System: An Approach to Testing Based on
//!   Combinatorial Design"
//! - Kuhn, Kacker, Lei (2013), "Introduction to Combinatorial Testing"

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod generator;
pub mod models;
pub mod oracle;
pub mod pipeline;
pub mod validation;

pub use error::{Error, Result};
