//! Parameter domains: the input of the generator.

use serde::{Deserialize, Serialize};

use super::{BackendVariant, Parameter, ParameterValue, Variant};
use crate::error::{Error, Result};

/// Ordered mapping of parameters to their candidate values.
///
/// Insertion order is significant: the generator completes rows in this
/// order, and ties between equally good candidates are broken by a value's
/// position in its domain.
///
/// Serialized as a sequence of `[parameter, values]` pairs. Deserialization
/// goes through [`insert`](Self::insert), so malformed documents are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Entry>", into = "Vec<Entry>")]
pub struct Domains {
    entries: Vec<(Parameter, Vec<ParameterValue>)>,
}

type Entry = (Parameter, Vec<ParameterValue>);

impl TryFrom<Vec<Entry>> for Domains {
    type Error = Error;

    fn try_from(entries: Vec<Entry>) -> Result<Self> {
        let mut domains = Self::new();
        for (parameter, values) in entries {
            domains.insert(parameter, values)?;
        }
        Ok(domains)
    }
}

impl From<Domains> for Vec<Entry> {
    fn from(domains: Domains) -> Self {
        domains.entries
    }
}

impl Domains {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parameter with its values.
    ///
    /// # Errors
    /// - [`Error::DuplicateParameter`] if the parameter is already registered
    /// - [`Error::EmptyDomain`] if `values` is empty
    /// - [`Error::ValueShape`] if a value does not fit the parameter
    pub fn insert(&mut self, parameter: Parameter, values: Vec<ParameterValue>) -> Result<()> {
        if self.contains(&parameter) {
            return Err(Error::DuplicateParameter(parameter));
        }
        if values.is_empty() {
            return Err(Error::EmptyDomain(parameter));
        }
        if values.iter().any(|v| !v.fits(&parameter)) {
            let expected = if parameter.is_backend_axis() {
                "backend set"
            } else {
                "single variant"
            };
            return Err(Error::ValueShape {
                parameter,
                expected,
            });
        }
        self.entries.push((parameter, values));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, parameter: Parameter, values: Vec<ParameterValue>) -> Result<Self> {
        self.insert(parameter, values)?;
        Ok(self)
    }

    /// Registers a single-variant parameter.
    pub fn with_variants(self, parameter: Parameter, variants: Vec<Variant>) -> Result<Self> {
        self.with(parameter, variants.into_iter().map(Into::into).collect())
    }

    /// Registers the backend axis.
    pub fn with_backend_sets(self, sets: Vec<Vec<BackendVariant>>) -> Result<Self> {
        self.with(
            Parameter::Backends,
            sets.into_iter().map(Into::into).collect(),
        )
    }

    pub fn contains(&self, parameter: &Parameter) -> bool {
        self.entries.iter().any(|(p, _)| p == parameter)
    }

    /// Values of a parameter.
    pub fn values(&self, parameter: &Parameter) -> Option<&[ParameterValue]> {
        self.entries
            .iter()
            .find(|(p, _)| p == parameter)
            .map(|(_, values)| values.as_slice())
    }

    /// Parameters in insertion order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.iter().map(|(p, _)| p)
    }

    /// Parameters with their values, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Parameter, &[ParameterValue])> {
        self.entries.iter().map(|(p, v)| (p, v.as_slice()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the full cross product (saturating).
    pub fn cross_product_size(&self) -> usize {
        if self.entries.is_empty() {
            return 0;
        }
        self.entries
            .iter()
            .fold(1usize, |acc, (_, v)| acc.saturating_mul(v.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::names::{CMAKE, GCC};
    use crate::models::{Backend, Version};

    fn gcc(major: u32) -> Variant {
        Variant::new(GCC, Version::major(major))
    }

    #[test]
    fn test_insertion_order_kept() {
        let domains = Domains::new()
            .with_variants(Parameter::HostCompiler, vec![gcc(9), gcc(10)])
            .unwrap()
            .with_variants(
                Parameter::Cmake,
                vec![Variant::new(CMAKE, Version::major_minor(3, 22))],
            )
            .unwrap();
        let params: Vec<_> = domains.parameters().cloned().collect();
        assert_eq!(params, vec![Parameter::HostCompiler, Parameter::Cmake]);
        assert_eq!(domains.values(&Parameter::HostCompiler).unwrap().len(), 2);
        assert_eq!(domains.cross_product_size(), 2);
    }

    #[test]
    fn test_duplicate_parameter() {
        let result = Domains::new()
            .with_variants(Parameter::HostCompiler, vec![gcc(9)])
            .unwrap()
            .with_variants(Parameter::HostCompiler, vec![gcc(10)]);
        assert!(matches!(result, Err(Error::DuplicateParameter(Parameter::HostCompiler))));
    }

    #[test]
    fn test_empty_domain() {
        let result = Domains::new().with_variants(Parameter::Boost, vec![]);
        assert!(matches!(result, Err(Error::EmptyDomain(Parameter::Boost))));
    }

    #[test]
    fn test_value_shape() {
        let result = Domains::new().with(
            Parameter::HostCompiler,
            vec![vec![BackendVariant::on(Backend::CpuSerial)].into()],
        );
        assert!(matches!(result, Err(Error::ValueShape { .. })));

        let result = Domains::new().with(Parameter::Backends, vec![gcc(9).into()]);
        assert!(matches!(result, Err(Error::ValueShape { .. })));

        let ok = Domains::new().with_backend_sets(vec![vec![BackendVariant::on(Backend::CpuSerial)]]);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_deserialize_validates_entries() {
        let duplicate = r#"[
            ["host_compiler", [{ "name": "gcc", "version": "9" }]],
            ["host_compiler", [{ "name": "gcc", "version": "10" }]]
        ]"#;
        let err = serde_json::from_str::<Domains>(duplicate).unwrap_err();
        assert!(err.to_string().contains("Duplicate parameter: host_compiler"));

        let empty = r#"[["cmake", []]]"#;
        let err = serde_json::from_str::<Domains>(empty).unwrap_err();
        assert!(err.to_string().contains("empty domain"));

        let shape = r#"[["backends", [{ "name": "gcc", "version": "9" }]]]"#;
        assert!(serde_json::from_str::<Domains>(shape).is_err());
    }

    #[test]
    fn test_deserialize_keeps_order() {
        let domains = Domains::new()
            .with_variants(Parameter::Cmake, vec![Variant::new(CMAKE, Version::major_minor(3, 22))])
            .unwrap()
            .with_variants(Parameter::HostCompiler, vec![gcc(9), gcc(10)])
            .unwrap();
        let json = serde_json::to_string(&domains).unwrap();
        let parsed: Domains = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, domains);
        let params: Vec<_> = parsed.parameters().cloned().collect();
        assert_eq!(params, vec![Parameter::Cmake, Parameter::HostCompiler]);
    }

    #[test]
    fn test_empty_domains_have_no_cross_product() {
        assert_eq!(Domains::new().cross_product_size(), 0);
    }
}
