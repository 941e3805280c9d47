//! Built-in compatibility rules.
//!
//! # Modules
//!
//! - **Compiler names**: which host/device compiler pairs exist at all
//! - **Compiler versions**: host/device version equality and the nvcc
//!   host compiler tables
//! - **Backends**: mutually exclusive GPU backends and which backends a
//!   device compiler can build
//! - **Software dependencies**: OS images, CMake and C++ standard support
//!
//! # Forward compatibility
//! Every version table bounds only the releases it knows about. Versions
//! beyond the last table entry are permitted.

mod backend;
mod compiler_name;
mod compiler_version;
mod software_dependency;

pub use backend::{BackendCompatibilityFilter, BackendConflictFilter, CLANG_CUDA_SDK};
pub use compiler_name::CompilerNameFilter;
pub use compiler_version::{CompilerVersionFilter, NVCC_CLANG, NVCC_GCC};
pub use software_dependency::{SoftwareDependencyFilter, NVCC_CXX};
