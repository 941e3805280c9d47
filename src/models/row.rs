//! Rows: (partial) parameter assignments.
//!
//! A row maps parameters to values by name, so there is no positional
//! binding to configure before evaluating filters. A row may hold only some
//! of the parameters (a partial row, as seen mid-generation). Every lookup
//! tolerates missing parameters and returns `None`/`false` instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Backend, BackendVariant, Comparison, Parameter, ParameterValue, Variant, Version};

/// A (possibly partial) assignment of values to parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: BTreeMap<Parameter, ParameterValue>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter value.
    pub fn with(mut self, parameter: Parameter, value: impl Into<ParameterValue>) -> Self {
        self.insert(parameter, value);
        self
    }

    /// Sets a single-variant parameter.
    pub fn with_variant(
        self,
        parameter: Parameter,
        name: impl Into<String>,
        version: Version,
    ) -> Self {
        self.with(parameter, Variant::new(name, version))
    }

    /// Sets the backend set.
    pub fn with_backends(self, backends: Vec<BackendVariant>) -> Self {
        self.with(Parameter::Backends, backends)
    }

    /// Sets a parameter value, returning the previous one.
    pub fn insert(
        &mut self,
        parameter: Parameter,
        value: impl Into<ParameterValue>,
    ) -> Option<ParameterValue> {
        self.values.insert(parameter, value.into())
    }

    /// Removes a parameter.
    pub fn remove(&mut self, parameter: &Parameter) -> Option<ParameterValue> {
        self.values.remove(parameter)
    }

    /// Value of a parameter.
    pub fn get(&self, parameter: &Parameter) -> Option<&ParameterValue> {
        self.values.get(parameter)
    }

    /// Whether the row holds a value for the parameter.
    #[inline]
    pub fn is_present(&self, parameter: &Parameter) -> bool {
        self.values.contains_key(parameter)
    }

    /// Whether every given parameter is present.
    pub fn has_all(&self, parameters: &[Parameter]) -> bool {
        parameters.iter().all(|p| self.is_present(p))
    }

    /// Number of parameters set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates parameters and values in parameter order.
    pub fn iter(&self) -> impl Iterator<Item = (&Parameter, &ParameterValue)> {
        self.values.iter()
    }

    /// Single variant of a parameter. `None` if absent or a backend set.
    pub fn variant(&self, parameter: &Parameter) -> Option<&Variant> {
        self.get(parameter).and_then(ParameterValue::as_variant)
    }

    /// Software name of a parameter.
    pub fn name_of(&self, parameter: &Parameter) -> Option<&str> {
        self.variant(parameter).map(|v| v.name.as_str())
    }

    /// Version of a parameter.
    pub fn version_of(&self, parameter: &Parameter) -> Option<Version> {
        self.variant(parameter).map(|v| v.version)
    }

    /// Backend set. `None` if the backend axis is absent.
    pub fn backends(&self) -> Option<&[BackendVariant]> {
        self.get(&Parameter::Backends)
            .and_then(ParameterValue::as_backends)
    }

    /// Whether the backend is listed (enabled or not).
    ///
    /// An absent backend axis lists nothing.
    pub fn backend_present(&self, backend: Backend) -> bool {
        self.backend_version(backend).is_some()
    }

    /// Version of a listed backend. `None` if the backend is undefined.
    pub fn backend_version(&self, backend: Backend) -> Option<Version> {
        self.backends()?
            .iter()
            .find(|b| b.backend == backend)
            .map(|b| b.version)
    }

    /// Whether the backend is listed with anything but OFF.
    pub fn backend_enabled(&self, backend: Backend) -> bool {
        self.backend_version(backend).is_some_and(|v| !v.is_off())
    }

    /// Compares the software name of a parameter.
    ///
    /// Only `Eq` and `Ne` are meaningful for names. Returns `false` if the
    /// parameter is absent.
    pub fn check_name(&self, parameter: &Parameter, op: Comparison, name: &str) -> bool {
        self.name_of(parameter)
            .is_some_and(|actual| op.holds(actual, name))
    }

    /// Compares the version of a parameter. Returns `false` if absent.
    pub fn check_version(&self, parameter: &Parameter, op: Comparison, version: Version) -> bool {
        self.version_of(parameter)
            .is_some_and(|actual| op.holds(&actual, &version))
    }

    /// Compares the version of a backend. Returns `false` if undefined.
    pub fn check_backend_version(&self, backend: Backend, op: Comparison, version: Version) -> bool {
        self.backend_version(backend)
            .is_some_and(|actual| op.holds(&actual, &version))
    }

    /// Whether a parameter holds the given software name and a version
    /// within `[min, max]` (inclusive).
    pub fn is_in_range(&self, parameter: &Parameter, name: &str, min: Version, max: Version) -> bool {
        self.variant(parameter)
            .is_some_and(|v| v.name == name && v.version >= min && v.version <= max)
    }

    /// Whether every parameter of `other` is present here with an equal value.
    pub fn contains(&self, other: &Row) -> bool {
        other
            .iter()
            .all(|(parameter, value)| self.get(parameter) == Some(value))
    }
}

impl FromIterator<(Parameter, ParameterValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (Parameter, ParameterValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (parameter, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{parameter}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::names::{CMAKE, GCC, HIPCC, NVCC};

    fn ver(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn mixed_row() -> Row {
        Row::new()
            .with_variant(Parameter::HostCompiler, GCC, ver("9"))
            .with_variant(Parameter::DeviceCompiler, NVCC, ver("11.4"))
            .with_backends(vec![
                BackendVariant::on(Backend::CpuSerial),
                BackendVariant::on(Backend::CpuOmp2Threads),
                BackendVariant::new(Backend::Hip, ver("5.5")),
            ])
            .with_variant(Parameter::Cmake, CMAKE, ver("3.25"))
    }

    #[test]
    fn test_presence_and_lookups() {
        let row = mixed_row();
        assert!(row.is_present(&Parameter::HostCompiler));
        assert!(!row.is_present(&Parameter::Ubuntu));
        assert_eq!(row.name_of(&Parameter::DeviceCompiler), Some(NVCC));
        assert_eq!(row.version_of(&Parameter::Cmake), Some(ver("3.25")));
        assert_eq!(row.name_of(&Parameter::Ubuntu), None);
        assert_eq!(row.version_of(&Parameter::Backends), None);
        assert_eq!(row.len(), 4);
    }

    #[test]
    fn test_backend_lookups() {
        let row = mixed_row();
        assert!(row.backend_present(Backend::Hip));
        assert!(row.backend_present(Backend::CpuSerial));
        assert!(!row.backend_present(Backend::Cuda));
        assert_eq!(row.backend_version(Backend::Hip), Some(ver("5.5")));
        assert_eq!(row.backend_version(Backend::Cuda), None);
        assert!(row.backend_enabled(Backend::Hip));
    }

    #[test]
    fn test_backend_disabled_is_still_present() {
        let row = Row::new().with_backends(vec![
            BackendVariant::on(Backend::CpuSerial),
            BackendVariant::off(Backend::Cuda),
        ]);
        assert!(row.backend_present(Backend::Cuda));
        assert!(!row.backend_enabled(Backend::Cuda));
        assert_eq!(row.backend_version(Backend::Cuda), Some(Version::OFF));
    }

    #[test]
    fn test_backend_lookups_without_axis() {
        let row = Row::new()
            .with_variant(Parameter::HostCompiler, GCC, ver("9"))
            .with_variant(Parameter::DeviceCompiler, GCC, ver("9"));
        assert!(!row.backend_present(Backend::Cuda));
        assert!(!row.backend_enabled(Backend::Cuda));
        assert!(!row.check_backend_version(Backend::Cuda, Comparison::Ne, Version::OFF));
        assert!(Row::new().backends().is_none());
    }

    #[test]
    fn test_checks_on_absent_parameters_are_false() {
        let row = Row::new().with_variant(Parameter::HostCompiler, HIPCC, ver("5.5"));
        assert!(!row.check_name(&Parameter::DeviceCompiler, Comparison::Eq, HIPCC));
        assert!(!row.check_name(&Parameter::DeviceCompiler, Comparison::Ne, HIPCC));
        assert!(!row.check_version(&Parameter::Ubuntu, Comparison::Ge, ver("0")));
        assert!(row.check_name(&Parameter::HostCompiler, Comparison::Eq, HIPCC));
        assert!(row.check_version(&Parameter::HostCompiler, Comparison::Lt, ver("6.0")));
    }

    #[test]
    fn test_range_check() {
        let row = mixed_row();
        assert!(row.is_in_range(&Parameter::DeviceCompiler, NVCC, ver("11.0"), ver("11.4")));
        assert!(!row.is_in_range(&Parameter::DeviceCompiler, NVCC, ver("11.0"), ver("11.3")));
        assert!(!row.is_in_range(&Parameter::DeviceCompiler, GCC, ver("0"), ver("99")));
    }

    #[test]
    fn test_contains() {
        let row = mixed_row();
        let key = Row::new().with_variant(Parameter::HostCompiler, GCC, ver("9.0"));
        assert!(row.contains(&key));
        let other = Row::new().with_variant(Parameter::HostCompiler, GCC, ver("10"));
        assert!(!row.contains(&other));
        assert!(row.contains(&Row::new()));
    }

    #[test]
    fn test_display() {
        let row = Row::new()
            .with_variant(Parameter::HostCompiler, GCC, ver("9"))
            .with_variant(Parameter::DeviceCompiler, GCC, ver("9"));
        assert_eq!(row.to_string(), "host_compiler=gcc@9 device_compiler=gcc@9");
    }

    #[test]
    fn test_serde_map_shape() {
        let row = Row::new().with_variant(Parameter::custom("mdspan"), "mdspan", ver("0.6"));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["mdspan"]["name"], "mdspan");
        let back: Row = serde_json::from_value(json).unwrap();
        assert_eq!(back, row);
    }
}
