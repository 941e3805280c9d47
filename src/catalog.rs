//! Catalog of software versions the compatibility rules know about.
//!
//! A version outside the catalog is not rejected by the filters, but the
//! rules were never written with it in mind. [`crate::validation`] uses the
//! catalog to warn about such inputs.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::names::{
    BOOST, CLANG, CLANG_CUDA, CMAKE, CXX_STANDARD, GCC, HIPCC, ICPX, NVCC, UBUNTU,
};
use crate::models::{Backend, BackendVariant, Version};

/// Supported versions per software and per backend.
#[derive(Debug, Clone, Default)]
pub struct VersionCatalog {
    software: BTreeMap<String, Vec<Version>>,
    backends: BTreeMap<Backend, Vec<Version>>,
}

impl VersionCatalog {
    /// An empty catalog. Every name is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// The versions covered by the built-in rule tables.
    pub fn standard() -> Self {
        let majors = |range: std::ops::RangeInclusive<u32>| -> Vec<Version> {
            range.map(Version::major).collect()
        };
        let minors = |major: u32, range: std::ops::RangeInclusive<u32>| -> Vec<Version> {
            range.map(|minor| Version::major_minor(major, minor)).collect()
        };

        let clang = majors(6..=17);
        let mut nvcc = minors(10, 0..=2);
        nvcc.extend(minors(11, 0..=8));
        nvcc.extend(minors(12, 0..=3));
        let mut hipcc = minors(5, 0..=7);
        hipcc.push(Version::major_minor(6, 0));

        let mut catalog = Self::new()
            .with_software(GCC, majors(6..=13))
            .with_software(CLANG, clang.clone())
            .with_software(CLANG_CUDA, clang)
            .with_software(NVCC, nvcc.clone())
            .with_software(HIPCC, hipcc.clone())
            .with_software(
                ICPX,
                vec![Version::triple(2023, 1, 0), Version::triple(2023, 2, 0)],
            )
            .with_software(
                UBUNTU,
                vec![Version::major_minor(18, 4), Version::major_minor(20, 4)],
            )
            .with_software(CMAKE, minors(3, 18..=26))
            .with_software(
                BOOST,
                (74..=82).map(|minor| Version::triple(1, minor, 0)).collect(),
            )
            .with_software(CXX_STANDARD, vec![Version::major(17), Version::major(20)]);

        for backend in Backend::ALL {
            let versions: Vec<Version> = match backend {
                Backend::Cuda => std::iter::once(Version::OFF).chain(nvcc.iter().copied()).collect(),
                Backend::Hip => std::iter::once(Version::OFF).chain(hipcc.iter().copied()).collect(),
                _ => vec![Version::ON, Version::OFF],
            };
            catalog.backends.insert(backend, versions);
        }
        catalog
    }

    /// Adds (or replaces) the versions of a software.
    pub fn with_software(mut self, name: impl Into<String>, versions: Vec<Version>) -> Self {
        self.software.insert(name.into(), versions);
        self
    }

    /// Adds (or replaces) the versions of a backend.
    pub fn with_backend(mut self, backend: Backend, versions: Vec<Version>) -> Self {
        self.backends.insert(backend, versions);
        self
    }

    /// Whether the name is a known software or backend switch.
    pub fn knows(&self, name: &str) -> bool {
        self.versions(name).is_ok()
    }

    /// Known software names.
    pub fn software_names(&self) -> impl Iterator<Item = &str> {
        self.software.keys().map(String::as_str)
    }

    /// Versions of a software or backend switch.
    ///
    /// Backend names are matched case-insensitively.
    ///
    /// # Errors
    /// [`Error::UnknownSoftware`] if the name is not in the catalog.
    pub fn versions(&self, name: &str) -> Result<&[Version]> {
        if let Some(versions) = self.software.get(name) {
            return Ok(versions);
        }
        let backend: Backend = name.parse()?;
        self.backends
            .get(&backend)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownSoftware(name.to_string()))
    }

    /// Whether `version` of `name` is in the catalog.
    ///
    /// Versions compare numerically, so `10` matches a catalogued `10.0`.
    ///
    /// # Errors
    /// [`Error::UnknownSoftware`] if the name is not in the catalog.
    pub fn is_supported(&self, name: &str, version: Version) -> Result<bool> {
        Ok(self.versions(name)?.contains(&version))
    }

    /// Whether a backend switch is in the catalog.
    pub fn is_backend_supported(&self, variant: &BackendVariant) -> bool {
        self.backends
            .get(&variant.backend)
            .is_some_and(|versions| versions.contains(&variant.version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_compilers() {
        let catalog = VersionCatalog::standard();
        assert!(catalog.is_supported(GCC, Version::major(6)).unwrap());
        assert!(catalog.is_supported(GCC, Version::major(13)).unwrap());
        assert!(!catalog.is_supported(GCC, Version::major(5)).unwrap());
        assert!(catalog.is_supported(CLANG_CUDA, Version::major(17)).unwrap());
        assert!(!catalog.is_supported(CLANG, Version::major(18)).unwrap());
    }

    #[test]
    fn test_numeric_comparison() {
        let catalog = VersionCatalog::standard();
        assert!(catalog.is_supported(NVCC, Version::major(11)).unwrap());
        assert!(catalog.is_supported(NVCC, Version::parse("12.3").unwrap()).unwrap());
        assert!(!catalog.is_supported(NVCC, Version::parse("12.4").unwrap()).unwrap());
        assert!(catalog.is_supported(UBUNTU, Version::parse("20.04").unwrap()).unwrap());
        assert!(catalog.is_supported(BOOST, Version::parse("1.80").unwrap()).unwrap());
        assert!(catalog.is_supported(ICPX, Version::parse("2023.2.0").unwrap()).unwrap());
    }

    #[test]
    fn test_backend_versions() {
        let catalog = VersionCatalog::standard();
        let cuda = Backend::Cuda.as_str();
        assert!(catalog.is_supported(cuda, Version::OFF).unwrap());
        assert!(catalog.is_supported(cuda, Version::major_minor(11, 4)).unwrap());
        assert!(!catalog.is_supported(cuda, Version::ON).unwrap());

        let serial = "ALPAKA_ACC_CPU_B_SEQ_T_SEQ_ENABLE";
        assert!(catalog.is_supported(serial, Version::ON).unwrap());
        assert!(!catalog.is_supported(serial, Version::major(1)).unwrap());

        assert!(catalog.is_backend_supported(&BackendVariant::new(
            Backend::Hip,
            Version::major_minor(5, 7)
        )));
        assert!(!catalog.is_backend_supported(&BackendVariant::on(Backend::Hip)));
    }

    #[test]
    fn test_unknown_software() {
        let catalog = VersionCatalog::standard();
        assert!(matches!(
            catalog.is_supported("msvc", Version::major(19)),
            Err(Error::UnknownSoftware(name)) if name == "msvc"
        ));
        assert!(!catalog.knows("msvc"));
        assert!(catalog.knows(CMAKE));
        assert!(!VersionCatalog::new().knows(GCC));
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = VersionCatalog::new().with_software("fmt", vec![Version::major(10)]);
        assert!(catalog.is_supported("fmt", Version::major(10)).unwrap());
        assert_eq!(catalog.software_names().collect::<Vec<_>>(), vec!["fmt"]);
    }
}
