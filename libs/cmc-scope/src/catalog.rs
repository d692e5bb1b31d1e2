//! District to region lookup.
//!
//! Used to resolve a person's region when only their district is known, and
//! by callers that need a district's region for [`crate::is_district_in_scope`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// District id of the National Team panel.
pub const XAN_DISTRICT_ID: &str = "XAN";

/// Fallback mapping for districts that are not yet seeded in the database.
/// `NorthernNewEnglend` is a spelling variant still present in older rows.
const BUILTIN_DISTRICT_REGIONS: &[(&str, &str)] = &[
    ("XAN", "National Team"),
    ("Alabama", "Southeast"),
    ("Alaska", "Northwest"),
    ("Appalachian", "Mid-Atlantic"),
    ("Arizona", "West Coast"),
    ("Arkansas", "South Central"),
    ("Colorado", "Big Sky"),
    ("Georgia", "Southeast"),
    ("Hawaii", "West Coast"),
    ("Illinois", "Great Lakes"),
    ("Indiana", "Great Lakes"),
    ("Iowa", "Great Plains South"),
    ("Kansas", "Great Plains South"),
    ("Kentucky", "Mid-Atlantic"),
    ("Louisiana", "South Central"),
    ("Michigan", "Great Lakes"),
    ("Minnesota", "Great Plains North"),
    ("Mississippi", "Southeast"),
    ("Montana", "Big Sky"),
    ("Nebraska", "Great Plains South"),
    ("NewJersey", "Northeast"),
    ("NewMexico", "Texico"),
    ("NewYork", "Northeast"),
    ("NorthCarolina", "Mid-Atlantic"),
    ("NorthDakota", "Great Plains North"),
    ("NorthernCal-Nevada", "West Coast"),
    ("NorthernNewEnglend", "Northeast"),
    ("NorthernNewEngland", "Northeast"),
    ("NorthIdaho", "Northwest"),
    ("NorthernMissouri", "Great Plains South"),
    ("NorthTexas", "Texico"),
    ("Ohio", "Great Lakes"),
    ("Oklahoma", "South Central"),
    ("Oregon", "Northwest"),
    ("PeninsularFlorida", "Southeast"),
    ("Penn-Del", "Northeast"),
    ("Potomac", "Mid-Atlantic"),
    ("SouthCarolina", "Southeast"),
    ("SouthDakota", "Great Plains North"),
    ("SouthernCalifornia", "West Coast"),
    ("SouthernNewEngland", "Northeast"),
    ("SouthIdaho", "Big Sky"),
    ("SouthernMissouri", "Great Plains South"),
    ("SouthTexas", "Texico"),
    ("Tennessee", "Mid-Atlantic"),
    ("Utah", "Big Sky"),
    ("Washington", "Northwest"),
    ("WestFlorida", "Southeast"),
    ("WestTexas", "Texico"),
    ("Wisconsin-NorthMichigan", "Great Plains North"),
    ("Wyoming", "Big Sky"),
    ("Connecticut", "Northeast"),
    ("Maine", "Northeast"),
    ("Massachusetts", "Northeast"),
    ("Pennsylvania", "Northeast"),
    ("Vermont", "Northeast"),
    ("Virginia", "Mid-Atlantic"),
    ("WestVirginia", "Mid-Atlantic"),
    ("Florida", "Southeast"),
    ("Nevada", "West Coast"),
    ("NorthCalifornia", "West Coast"),
    ("SouthCalifornia", "West Coast"),
];

/// Mapping from district id to region name.
///
/// `Default` yields the builtin table; use [`DistrictCatalog::empty`] for a
/// catalog that only knows what it is told.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictCatalog {
    regions: BTreeMap<String, String>,
}

impl Default for DistrictCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DistrictCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            regions: BTreeMap::new(),
        }
    }

    /// The builtin district table.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            regions: BUILTIN_DISTRICT_REGIONS
                .iter()
                .map(|(district, region)| ((*district).to_owned(), (*region).to_owned()))
                .collect(),
        }
    }

    /// Add or replace entries. Later entries win.
    #[must_use]
    pub fn with_overrides<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (district, region) in entries {
            self.insert(district, region);
        }
        self
    }

    /// Add or replace one entry, returning the previous region if any.
    pub fn insert(
        &mut self,
        district_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Option<String> {
        self.regions.insert(district_id.into(), region.into())
    }

    #[must_use]
    pub fn region_of(&self, district_id: &str) -> Option<&str> {
        self.regions.get(district_id).map(String::as_str)
    }

    /// Districts belonging to `region`, in id order.
    pub fn districts_in<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.regions
            .iter()
            .filter(move |(_, r)| r.as_str() == region)
            .map(|(d, _)| d.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
