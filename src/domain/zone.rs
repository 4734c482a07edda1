//! Zone names and parsing of the `zones` connection parameter.

use std::collections::BTreeSet;
use std::fmt;

/// Name of a broadcast zone.
///
/// Any string is accepted, including the empty string: an empty `zones`
/// parameter yields exactly one zone named `""`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneName(String);

impl ZoneName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ZoneName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Set of zones a connection asked to join.
pub type ZoneSet = BTreeSet<ZoneName>;

/// Splits a comma-separated `zones` parameter into a zone set.
///
/// Splitting is literal: no trimming, and an absent or empty parameter
/// produces the single zone `""`. Repeated names collapse into one.
pub fn parse_zones(param: Option<&str>) -> ZoneSet {
    param.unwrap_or("").split(',').map(ZoneName::from).collect()
}
