//! Storage-side row filters derived from a [`PeopleScope`].
//!
//! A people scope narrows to at most one equality predicate on a person's
//! primary anchors. Repositories translate [`ScopeFilter::property`] to a
//! column; [`RowFilter::matches`] evaluates the same predicate in memory.

use std::fmt;

use serde::Serialize;

use crate::people_scope::PeopleScope;
use crate::person::PersonAnchors;

/// Person properties a people scope can constrain.
pub mod person_properties {
    /// Typically maps to the `primary_region` column.
    pub const PRIMARY_REGION: &str = "primary_region";

    /// Typically maps to the `primary_district_id` column.
    pub const PRIMARY_DISTRICT_ID: &str = "primary_district_id";

    /// Typically maps to the `primary_campus_id` column.
    pub const PRIMARY_CAMPUS_ID: &str = "primary_campus_id";
}

/// A scalar compared against a person property.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ScopeValue {
    String(String),
    Int(i64),
}

impl ScopeValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::String(_) => None,
        }
    }
}

impl fmt::Display for ScopeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for ScopeValue {
    #[inline]
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for ScopeValue {
    #[inline]
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<i64> for ScopeValue {
    #[inline]
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// Equality filter: `property = value`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ScopeFilter {
    property: &'static str,
    value: ScopeValue,
}

impl ScopeFilter {
    #[must_use]
    pub fn new(property: &'static str, value: impl Into<ScopeValue>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }

    /// One of the [`person_properties`] names.
    #[inline]
    #[must_use]
    pub fn property(&self) -> &'static str {
        self.property
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &ScopeValue {
        &self.value
    }

    /// Evaluate against a person. Unknown properties never match.
    #[must_use]
    pub fn matches(&self, person: &PersonAnchors) -> bool {
        match self.property {
            person_properties::PRIMARY_REGION => self
                .value
                .as_str()
                .is_some_and(|v| person.primary_region() == Some(v)),
            person_properties::PRIMARY_DISTRICT_ID => self
                .value
                .as_str()
                .is_some_and(|v| person.primary_district_id() == Some(v)),
            person_properties::PRIMARY_CAMPUS_ID => self
                .value
                .as_int()
                .is_some_and(|v| person.primary_campus_id() == Some(v)),
            _ => false,
        }
    }
}

impl fmt::Display for ScopeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.property, self.value)
    }
}

/// Row-level restriction for a people query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowFilter {
    /// No row-level filtering.
    Unrestricted,
    /// Rows must satisfy the predicate.
    Eq(ScopeFilter),
}

impl RowFilter {
    #[must_use]
    pub fn matches(&self, person: &PersonAnchors) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Eq(filter) => filter.matches(person),
        }
    }
}

impl PeopleScope {
    /// The storage predicate equivalent to this scope.
    #[must_use]
    pub fn row_filter(&self) -> RowFilter {
        match self {
            Self::All => RowFilter::Unrestricted,
            Self::Region { region_id } => RowFilter::Eq(ScopeFilter::new(
                person_properties::PRIMARY_REGION,
                region_id.as_str(),
            )),
            Self::District { district_id } => RowFilter::Eq(ScopeFilter::new(
                person_properties::PRIMARY_DISTRICT_ID,
                district_id.as_str(),
            )),
            Self::Campus { campus_id } => RowFilter::Eq(ScopeFilter::new(
                person_properties::PRIMARY_CAMPUS_ID,
                *campus_id,
            )),
        }
    }
}
