//! Parameters (axes), variants and backend switches.
//!
//! A parameter is one axis of the job matrix (host compiler, CMake, OS, ...).
//! Each axis has a domain of values. All axes hold single
//! [`Variant`]s except [`Parameter::Backends`], whose values are sets of
//! simultaneously active [`BackendVariant`]s.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Version;
use crate::error::{Error, Result};

/// Well-known software names used as variant names.
pub mod names {
    pub const GCC: &str = "gcc";
    pub const CLANG: &str = "clang";
    pub const NVCC: &str = "nvcc";
    pub const CLANG_CUDA: &str = "clang-cuda";
    pub const HIPCC: &str = "hipcc";
    pub const ICPX: &str = "icpx";
    pub const UBUNTU: &str = "ubuntu";
    pub const CMAKE: &str = "cmake";
    pub const BOOST: &str = "boost";
    pub const CXX_STANDARD: &str = "cxx";
    pub const ALPAKA: &str = "alpaka";
}

/// A named axis of the job matrix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Parameter {
    HostCompiler,
    DeviceCompiler,
    /// Accelerator backend sets.
    Backends,
    Cmake,
    Boost,
    Alpaka,
    Ubuntu,
    CxxStandard,
    /// Project-specific axis.
    Custom(String),
}

impl Parameter {
    /// Creates a project-specific parameter.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Stable snake_case name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::HostCompiler => "host_compiler",
            Self::DeviceCompiler => "device_compiler",
            Self::Backends => "backends",
            Self::Cmake => "cmake",
            Self::Boost => "boost",
            Self::Alpaka => "alpaka",
            Self::Ubuntu => "ubuntu",
            Self::CxxStandard => "cxx_standard",
            Self::Custom(name) => name,
        }
    }

    /// Whether values of this parameter are backend sets.
    pub fn is_backend_axis(&self) -> bool {
        matches!(self, Self::Backends)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Parameter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "host_compiler" => Self::HostCompiler,
            "device_compiler" => Self::DeviceCompiler,
            "backends" => Self::Backends,
            "cmake" => Self::Cmake,
            "boost" => Self::Boost,
            "alpaka" => Self::Alpaka,
            "ubuntu" => Self::Ubuntu,
            "cxx_standard" => Self::CxxStandard,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl From<String> for Parameter {
    fn from(name: String) -> Self {
        match name.parse() {
            Ok(parameter) => parameter,
            Err(never) => match never {},
        }
    }
}

impl From<Parameter> for String {
    fn from(parameter: Parameter) -> Self {
        parameter.as_str().to_string()
    }
}

/// An accelerator backend switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Backend {
    #[serde(rename = "alpaka_ACC_CPU_B_SEQ_T_SEQ_ENABLE")]
    CpuSerial,
    #[serde(rename = "alpaka_ACC_CPU_B_SEQ_T_THREADS_ENABLE")]
    CpuThreads,
    #[serde(rename = "alpaka_ACC_CPU_B_TBB_T_SEQ_ENABLE")]
    CpuTbbBlocks,
    #[serde(rename = "alpaka_ACC_CPU_B_OMP2_T_SEQ_ENABLE")]
    CpuOmp2Blocks,
    #[serde(rename = "alpaka_ACC_CPU_B_SEQ_T_OMP2_ENABLE")]
    CpuOmp2Threads,
    #[serde(rename = "alpaka_ACC_GPU_CUDA_ENABLE")]
    Cuda,
    #[serde(rename = "alpaka_ACC_GPU_HIP_ENABLE")]
    Hip,
    #[serde(rename = "alpaka_ACC_SYCL_ENABLE")]
    Sycl,
}

impl Backend {
    /// All known backends.
    pub const ALL: [Backend; 8] = [
        Backend::CpuSerial,
        Backend::CpuThreads,
        Backend::CpuTbbBlocks,
        Backend::CpuOmp2Blocks,
        Backend::CpuOmp2Threads,
        Backend::Cuda,
        Backend::Hip,
        Backend::Sycl,
    ];

    /// CMake switch name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CpuSerial => "alpaka_ACC_CPU_B_SEQ_T_SEQ_ENABLE",
            Self::CpuThreads => "alpaka_ACC_CPU_B_SEQ_T_THREADS_ENABLE",
            Self::CpuTbbBlocks => "alpaka_ACC_CPU_B_TBB_T_SEQ_ENABLE",
            Self::CpuOmp2Blocks => "alpaka_ACC_CPU_B_OMP2_T_SEQ_ENABLE",
            Self::CpuOmp2Threads => "alpaka_ACC_CPU_B_SEQ_T_OMP2_ENABLE",
            Self::Cuda => "alpaka_ACC_GPU_CUDA_ENABLE",
            Self::Hip => "alpaka_ACC_GPU_HIP_ENABLE",
            Self::Sycl => "alpaka_ACC_SYCL_ENABLE",
        }
    }

    /// Whether the backend version is a toolkit version (CUDA, HIP)
    /// rather than an ON/OFF switch.
    pub const fn is_versioned(self) -> bool {
        matches!(self, Self::Cuda | Self::Hip)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = Error;

    /// Case-insensitive, so `ALPAKA_ACC_GPU_CUDA_ENABLE` is accepted too.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownSoftware(s.to_string()))
    }
}

/// A software name with a version, e.g. `gcc 9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub version: Version,
}

impl Variant {
    /// Creates a variant from an already parsed version.
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Creates a variant by parsing the version string.
    ///
    /// # Errors
    /// Returns [`Error::VersionFormat`] for an unparseable version.
    pub fn parse(name: impl Into<String>, version: &str) -> Result<Self> {
        Ok(Self::new(name, Version::parse(version)?))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// A backend switch with its version (or ON/OFF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackendVariant {
    pub backend: Backend,
    pub version: Version,
}

impl BackendVariant {
    pub fn new(backend: Backend, version: Version) -> Self {
        Self { backend, version }
    }

    /// Enabled switch without a version.
    pub fn on(backend: Backend) -> Self {
        Self::new(backend, Version::ON)
    }

    /// Disabled switch.
    pub fn off(backend: Backend) -> Self {
        Self::new(backend, Version::OFF)
    }

    /// Whether the backend is enabled (anything but OFF).
    pub fn is_enabled(&self) -> bool {
        !self.version.is_off()
    }
}

impl fmt::Display for BackendVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.backend, self.version)
    }
}

/// The value a row holds for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Single(Variant),
    Backends(Vec<BackendVariant>),
}

impl ParameterValue {
    /// Single variant, if this is not a backend set.
    pub fn as_variant(&self) -> Option<&Variant> {
        match self {
            Self::Single(variant) => Some(variant),
            Self::Backends(_) => None,
        }
    }

    /// Backend set, if this is one.
    pub fn as_backends(&self) -> Option<&[BackendVariant]> {
        match self {
            Self::Single(_) => None,
            Self::Backends(set) => Some(set),
        }
    }

    /// Whether the value fits the shape the parameter expects.
    pub fn fits(&self, parameter: &Parameter) -> bool {
        parameter.is_backend_axis() == matches!(self, Self::Backends(_))
    }
}

impl From<Variant> for ParameterValue {
    fn from(variant: Variant) -> Self {
        Self::Single(variant)
    }
}

impl From<Vec<BackendVariant>> for ParameterValue {
    fn from(set: Vec<BackendVariant>) -> Self {
        Self::Backends(set)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(variant) => variant.fmt(f),
            Self::Backends(set) => {
                f.write_str("[")?;
                for (i, b) in set.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    b.fmt(f)?;
                }
                f.write_str("]")
            }
        }
    }
}
