//! Version compatibility tables.
//!
//! A table maps a subject version (e.g., an nvcc release) to the highest
//! supported version of a dependent component (e.g., the gcc host compiler).
//!
//! # Algorithm
//! Entries are walked front-to-back. The first entry whose bound covers the
//! subject wins and its limit applies; this is an explicit first-match
//! policy, not a nearest-match. A subject beyond every bound is unbounded,
//! so unreleased versions are permitted until the table learns about them.

use crate::models::Version;

/// How an entry bound relates to the subject version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// Entry applies if `subject <= bound`.
    Inclusive,
    /// Entry applies if `subject < bound`.
    Exclusive,
}

impl BoundKind {
    fn covers(self, bound: Version, subject: Version) -> bool {
        match self {
            Self::Inclusive => subject <= bound,
            Self::Exclusive => subject < bound,
        }
    }
}

/// Ordered `(bound, limit)` compatibility table.
#[derive(Debug, Clone, Copy)]
pub struct CompatTable {
    kind: BoundKind,
    entries: &'static [(Version, Version)],
}

impl CompatTable {
    /// Table whose bounds include the bound version itself.
    pub const fn inclusive(entries: &'static [(Version, Version)]) -> Self {
        Self {
            kind: BoundKind::Inclusive,
            entries,
        }
    }

    /// Table whose bounds exclude the bound version.
    pub const fn exclusive(entries: &'static [(Version, Version)]) -> Self {
        Self {
            kind: BoundKind::Exclusive,
            entries,
        }
    }

    pub fn kind(&self) -> BoundKind {
        self.kind
    }

    pub fn entries(&self) -> &'static [(Version, Version)] {
        self.entries
    }

    /// Highest permitted dependent version for `subject`.
    ///
    /// `None` means unbounded.
    pub fn limit_for(&self, subject: Version) -> Option<Version> {
        self.entries
            .iter()
            .find(|(bound, _)| self.kind.covers(*bound, subject))
            .map(|&(_, limit)| limit)
    }

    /// Whether `dependent` is permitted together with `subject`.
    pub fn permits(&self, subject: Version, dependent: Version) -> bool {
        self.limit_for(subject).map_or(true, |limit| dependent <= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCLUSIVE: CompatTable = CompatTable::inclusive(&[
        (Version::major_minor(10, 0), Version::major(7)),
        (Version::major_minor(11, 0), Version::major(9)),
        (Version::major_minor(12, 0), Version::major(12)),
    ]);

    const EXCLUSIVE: CompatTable = CompatTable::exclusive(&[
        (Version::major_minor(11, 0), Version::major(14)),
        (Version::major_minor(12, 0), Version::major(17)),
    ]);

    #[test]
    fn test_inclusive_first_match_wins() {
        assert_eq!(INCLUSIVE.limit_for(Version::major_minor(9, 2)), Some(Version::major(7)));
        assert_eq!(INCLUSIVE.limit_for(Version::major(10)), Some(Version::major(7)));
        assert_eq!(INCLUSIVE.limit_for(Version::major_minor(10, 1)), Some(Version::major(9)));
        assert_eq!(INCLUSIVE.limit_for(Version::major_minor(12, 0)), Some(Version::major(12)));
    }

    #[test]
    fn test_exclusive_bound() {
        assert_eq!(EXCLUSIVE.limit_for(Version::major_minor(10, 2)), Some(Version::major(14)));
        assert_eq!(EXCLUSIVE.limit_for(Version::major(11)), Some(Version::major(17)));
        assert_eq!(EXCLUSIVE.limit_for(Version::major(12)), None);
    }

    #[test]
    fn test_beyond_every_bound_is_unbounded() {
        assert_eq!(INCLUSIVE.limit_for(Version::major(42)), None);
        assert!(INCLUSIVE.permits(Version::major(42), Version::major(45)));
    }

    #[test]
    fn test_permits() {
        assert!(INCLUSIVE.permits(Version::major_minor(10, 0), Version::major(7)));
        assert!(!INCLUSIVE.permits(Version::major_minor(10, 0), Version::major(8)));
        assert!(INCLUSIVE.permits(Version::major_minor(10, 0), Version::major_minor(6, 5)));
    }

    #[test]
    fn test_empty_table_permits_everything() {
        const EMPTY: CompatTable = CompatTable::inclusive(&[]);
        assert!(EMPTY.permits(Version::major(1), Version::major(99)));
        assert_eq!(EMPTY.kind(), BoundKind::Inclusive);
        assert!(EMPTY.entries().is_empty());
    }
}
