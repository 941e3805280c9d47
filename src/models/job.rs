//! Job model.
//!
//! A job is one accepted row of the job matrix, paired with the display
//! name the ordering pipeline filters and sorts by. Names are derived
//! outside this crate, so the pipeline works on anything implementing
//! [`NamedJob`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Row;

/// Anything the ordering pipeline can sort by name.
pub trait NamedJob {
    fn name(&self) -> &str;
}

/// A named job produced from a matrix row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Display name (unique within a job list by convention).
    pub name: String,
    /// Parameter assignment this job runs with.
    pub row: Row,
    /// Free-form key-value metadata for the downstream serializer.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,
}

impl Job {
    /// Creates a job with the given name and row.
    pub fn new(name: impl Into<String>, row: Row) -> Self {
        Self {
            name: name.into(),
            row,
            attributes: HashMap::new(),
        }
    }

    /// Adds a metadata attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Creates a job named after its row, e.g.
    /// `host_compiler=gcc@9 device_compiler=gcc@9`.
    pub fn from_row(row: Row) -> Self {
        Self::new(row.to_string(), row)
    }
}

impl NamedJob for Job {
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedJob for String {
    fn name(&self) -> &str {
        self
    }
}

impl NamedJob for &str {
    fn name(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::names::GCC;
    use crate::models::{Parameter, Version};

    #[test]
    fn test_job_builder() {
        let row = Row::new().with_variant(Parameter::HostCompiler, GCC, Version::major(12));
        let job = Job::new("linux_gcc12", row.clone()).with_attribute("runs-on", "x86_64");
        assert_eq!(job.name(), "linux_gcc12");
        assert_eq!(job.row, row);
        assert_eq!(job.attributes.get("runs-on").map(String::as_str), Some("x86_64"));
    }

    #[test]
    fn test_job_from_row() {
        let row = Row::new().with_variant(Parameter::HostCompiler, GCC, Version::major(12));
        assert_eq!(Job::from_row(row).name(), "host_compiler=gcc@12");
    }

    #[test]
    fn test_strings_are_named_jobs() {
        assert_eq!(NamedJob::name(&"abc"), "abc");
        assert_eq!(NamedJob::name(&"xyz".to_string()), "xyz");
    }
}
