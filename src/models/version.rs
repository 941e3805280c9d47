//! Semantic version values.
//!
//! A [`Version`] is either a dotted numeric release (optionally with a
//! pre-release tag) or one of two backend switch sentinels:
//!
//! - [`Version::OFF`]: lower than every release, marks a disabled backend.
//! - [`Version::ON`]: higher than every release, marks a backend that is
//!   enabled without any numeric meaning.
//!
//! # Ordering
//!
//! Releases compare segment by segment as integers, so `9 < 10` and
//! `11.2 < 11.10`. Missing trailing segments count as zero (`11 == 11.0`).
//! For equal release numbers, pre-releases sort before the final release:
//! `dev < a < b < rc < final`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Maximum number of dotted release segments.
pub const MAX_SEGMENTS: usize = 6;

/// Pre-release tag of a release version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    /// Development snapshot (`1.0.0-dev`, `1.0.0.dev2`).
    Dev(u32),
    /// Alpha (`1.0a1`, `1.0-alpha`).
    Alpha(u32),
    /// Beta (`1.0b1`, `1.0-beta.2`).
    Beta(u32),
    /// Release candidate (`1.0rc1`).
    Rc(u32),
}

#[derive(Debug, Clone, Copy)]
enum Repr {
    Off,
    Release {
        segments: [u32; MAX_SEGMENTS],
        len: u8,
        pre: Option<PreRelease>,
    },
    On,
}

/// A parsed, totally ordered version value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    repr: Repr,
}

impl Version {
    /// Disabled backend. Compares lower than every release.
    pub const OFF: Version = Version { repr: Repr::Off };

    /// Enabled backend without a version. Compares higher than every release.
    pub const ON: Version = Version { repr: Repr::On };

    /// Creates a single-segment release, e.g. `9`.
    pub const fn major(major: u32) -> Self {
        Self::from_parts([major, 0, 0, 0, 0, 0], 1)
    }

    /// Creates a two-segment release, e.g. `11.4`.
    pub const fn major_minor(major: u32, minor: u32) -> Self {
        Self::from_parts([major, minor, 0, 0, 0, 0], 2)
    }

    /// Creates a three-segment release, e.g. `3.18.3`.
    pub const fn triple(major: u32, minor: u32, patch: u32) -> Self {
        Self::from_parts([major, minor, patch, 0, 0, 0], 3)
    }

    const fn from_parts(segments: [u32; MAX_SEGMENTS], len: u8) -> Self {
        Self {
            repr: Repr::Release {
                segments,
                len,
                pre: None,
            },
        }
    }

    /// Parses a version string.
    ///
    /// Accepts `ON`/`OFF` (case-insensitive) and dotted numeric releases
    /// with an optional pre-release tag.
    ///
    /// # Errors
    /// Returns [`Error::VersionFormat`] if the string is not a version.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        if text.eq_ignore_ascii_case("off") {
            return Ok(Self::OFF);
        }
        if text.eq_ignore_ascii_case("on") {
            return Ok(Self::ON);
        }

        let invalid = || Error::VersionFormat {
            input: input.to_string(),
        };

        let split = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(text.len());
        let (release, suffix) = text.split_at(split);
        let release = match suffix.is_empty() {
            true => release,
            // "1.0.dev0": the dot belongs to the tag
            false => release.strip_suffix('.').unwrap_or(release),
        };

        if release.is_empty() {
            return Err(invalid());
        }

        let mut segments = [0u32; MAX_SEGMENTS];
        let mut len = 0usize;
        for part in release.split('.') {
            if part.is_empty() || len == MAX_SEGMENTS {
                return Err(invalid());
            }
            segments[len] = part.parse().map_err(|_| invalid())?;
            len += 1;
        }

        let pre = match suffix {
            "" => None,
            _ => Some(parse_pre_release(suffix).ok_or_else(invalid)?),
        };

        Ok(Self {
            repr: Repr::Release {
                segments,
                len: len as u8,
                pre,
            },
        })
    }

    /// Whether this is the [`Version::OFF`] sentinel.
    pub fn is_off(&self) -> bool {
        matches!(self.repr, Repr::Off)
    }

    /// Whether this is the [`Version::ON`] sentinel.
    pub fn is_on(&self) -> bool {
        matches!(self.repr, Repr::On)
    }

    /// Whether this is a numeric release.
    pub fn is_release(&self) -> bool {
        matches!(self.repr, Repr::Release { .. })
    }

    /// Release segments as written. Empty for sentinels.
    pub fn segments(&self) -> &[u32] {
        match &self.repr {
            Repr::Release { segments, len, .. } => &segments[..*len as usize],
            _ => &[],
        }
    }

    /// Pre-release tag, if any.
    pub fn pre_release(&self) -> Option<PreRelease> {
        match self.repr {
            Repr::Release { pre, .. } => pre,
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self.repr {
            Repr::Off => 0,
            Repr::Release { .. } => 1,
            Repr::On => 2,
        }
    }
}

fn parse_pre_release(suffix: &str) -> Option<PreRelease> {
    let tag = suffix.trim_start_matches(['-', '_', '.']);
    let label_end = tag
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(tag.len());
    let (label, rest) = tag.split_at(label_end);
    let number = rest.trim_start_matches(['-', '_', '.']);
    let number = match number {
        "" => 0,
        digits => digits.parse().ok()?,
    };

    match label.to_ascii_lowercase().as_str() {
        "dev" => Some(PreRelease::Dev(number)),
        "a" | "alpha" => Some(PreRelease::Alpha(number)),
        "b" | "beta" => Some(PreRelease::Beta(number)),
        "rc" | "c" | "pre" | "preview" => Some(PreRelease::Rc(number)),
        _ => None,
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.repr, &other.repr) {
            (
                Repr::Release {
                    segments: a,
                    pre: pre_a,
                    ..
                },
                Repr::Release {
                    segments: b,
                    pre: pre_b,
                    ..
                },
            ) => a.cmp(b).then_with(|| match (pre_a, pre_b) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(x), Some(y)) => x.cmp(y),
            }),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `len` is not hashed: 11 and 11.0 are equal
        match &self.repr {
            Repr::Release { segments, pre, .. } => {
                1u8.hash(state);
                segments.hash(state);
                pre.hash(state);
            }
            _ => self.rank().hash(state),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr {
            Repr::Off => f.write_str("OFF"),
            Repr::On => f.write_str("ON"),
            Repr::Release { pre, .. } => {
                for (i, segment) in self.segments().iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    write!(f, "{segment}")?;
                }
                match pre {
                    None => Ok(()),
                    Some(PreRelease::Dev(n)) => write!(f, ".dev{n}"),
                    Some(PreRelease::Alpha(n)) => write!(f, "a{n}"),
                    Some(PreRelease::Beta(n)) => write!(f, "b{n}"),
                    Some(PreRelease::Rc(n)) => write!(f, "rc{n}"),
                }
            }
        }
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Version {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

/// Comparison operator used by row checks and rule tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    /// Evaluates `lhs <op> rhs`.
    #[inline]
    pub fn holds<T: Ord + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        let ordering = lhs.cmp(rhs);
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
        }
    }

    /// Operator symbol (`==`, `<=`, ...).
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_numeric_segment_ordering() {
        assert!(v("9") < v("10"));
        assert!(v("11.2") < v("11.10"));
        assert!(v("3.18") < v("3.18.3"));
        assert!(v("2023.1.0") < v("2023.2.0"));
        assert!(v("12.1") > v("12.0"));
    }

    #[test]
    fn test_trailing_zeros_are_insignificant() {
        assert_eq!(v("11"), v("11.0"));
        assert_eq!(v("1.74"), v("1.74.0"));
        assert_eq!(Version::major_minor(11, 0), v("11"));
        assert_ne!(v("11.0.1"), v("11.0"));
    }

    #[test]
    fn test_sentinels() {
        assert!(Version::OFF < v("0"));
        assert!(Version::OFF < v("0.0.0"));
        assert!(Version::ON > v("99999.9"));
        assert!(Version::OFF < Version::ON);
        assert_eq!(v("off"), Version::OFF);
        assert_eq!(v("ON"), Version::ON);
        assert!(Version::OFF.is_off());
        assert!(Version::ON.is_on());
        assert!(!v("1").is_on());
        assert!(Version::ON.segments().is_empty());
    }

    #[test]
    fn test_pre_release_ordering() {
        assert!(v("1.0.0-dev") < v("1.0.0"));
        assert!(v("1.0.0-dev") > v("0.9.0"));
        assert!(v("1.0a1") < v("1.0b1"));
        assert!(v("1.0b2") < v("1.0rc1"));
        assert!(v("1.0rc1") < v("1.0"));
        assert_eq!(v("1.0.0-dev").pre_release(), Some(PreRelease::Dev(0)));
        assert_eq!(v("2.0-beta.2").pre_release(), Some(PreRelease::Beta(2)));
    }

    #[test]
    fn test_invalid_versions() {
        for input in ["", "abc", "1..2", ".1", "1.2.", "1.x", "1.0-foo", "1.2.3.4.5.6.7"] {
            assert!(
                matches!(Version::parse(input), Err(Error::VersionFormat { .. })),
                "'{input}' should be rejected"
            );
        }
    }

    #[test]
    fn test_display_keeps_written_segments() {
        assert_eq!(v("11.0").to_string(), "11.0");
        assert_eq!(v("3.18.3").to_string(), "3.18.3");
        assert_eq!(v("1.0.0-dev").to_string(), "1.0.0.dev0");
        assert_eq!(Version::OFF.to_string(), "OFF");
        assert_eq!(Version::major(9).to_string(), "9");
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        use std::collections::HashSet;
        let set: HashSet<Version> = [v("11"), v("11.0"), v("11.0.0")].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&v("11.4")).unwrap();
        assert_eq!(json, "\"11.4\"");
        let back: Version = serde_json::from_str("\"OFF\"").unwrap();
        assert!(back.is_off());
        assert!(serde_json::from_str::<Version>("\"x.y\"").is_err());
    }

    #[test]
    fn test_comparison_operators() {
        let a = v("11.2");
        let b = v("11.4");
        assert!(Comparison::Lt.holds(&a, &b));
        assert!(Comparison::Le.holds(&a, &a));
        assert!(Comparison::Ne.holds(&a, &b));
        assert!(!Comparison::Eq.holds(&a, &b));
        assert!(Comparison::Gt.holds(&b, &a));
        assert!(Comparison::Ge.holds(&b, &b));
        assert_eq!(Comparison::Ge.to_string(), ">=");
    }
}
