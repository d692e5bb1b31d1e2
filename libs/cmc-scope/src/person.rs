//! Per-person checks used to gate detail views and edits.

use serde::{Deserialize, Serialize};

use crate::catalog::{DistrictCatalog, XAN_DISTRICT_ID};
use crate::levels::{EditScope, edit_scope, view_scope};
use crate::people_scope::PeopleScope;
use crate::role::is_national_team_role;
use crate::user::UserAnchors;

/// Where a person is anchored in the organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonAnchors {
    #[serde(default)]
    primary_campus_id: Option<i64>,
    #[serde(default)]
    primary_district_id: Option<String>,
    #[serde(default)]
    primary_region: Option<String>,
    /// The person's own role, as stored.
    #[serde(default)]
    primary_role: Option<String>,
}

impl PersonAnchors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_campus(mut self, campus_id: i64) -> Self {
        self.primary_campus_id = Some(campus_id);
        self
    }

    #[must_use]
    pub fn with_district(mut self, district_id: impl Into<String>) -> Self {
        self.primary_district_id = Some(district_id.into());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.primary_region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.primary_role = Some(role.into());
        self
    }

    #[must_use]
    pub fn primary_campus_id(&self) -> Option<i64> {
        self.primary_campus_id
    }

    #[must_use]
    pub fn primary_district_id(&self) -> Option<&str> {
        self.primary_district_id.as_deref().filter(|d| !d.is_empty())
    }

    #[must_use]
    pub fn primary_region(&self) -> Option<&str> {
        self.primary_region.as_deref().filter(|r| !r.is_empty())
    }

    #[must_use]
    pub fn primary_role(&self) -> Option<&str> {
        self.primary_role.as_deref().filter(|r| !r.is_empty())
    }

    /// Member of the National Team (XAN) panel: filed under the `XAN`
    /// district, or holding a National Team role.
    #[must_use]
    pub fn is_xan_member(&self) -> bool {
        self.primary_district_id() == Some(XAN_DISTRICT_ID)
            || self.primary_role().is_some_and(is_national_team_role)
    }
}

/// Is `user` on the National Team? Decided by the stored role.
#[must_use]
pub fn is_national_team_member(user: Option<&UserAnchors>) -> bool {
    user.is_some_and(|user| is_national_team_role(user.role()))
}

/// The person's region: their own if recorded, else their district's.
#[must_use]
pub fn resolve_person_region<'a>(
    person: &'a PersonAnchors,
    catalog: &'a DistrictCatalog,
) -> Option<&'a str> {
    person.primary_region().or_else(|| {
        person
            .primary_district_id()
            .and_then(|district| catalog.region_of(district))
    })
}

impl PeopleScope {
    /// Does this scope cover `person`? Region scopes fall back to the
    /// catalog when the person has no recorded region.
    #[must_use]
    pub fn contains_person(&self, person: &PersonAnchors, catalog: &DistrictCatalog) -> bool {
        match self {
            Self::All => true,
            Self::Region { region_id } => {
                resolve_person_region(person, catalog) == Some(region_id.as_str())
            }
            Self::District { district_id } => {
                person.primary_district_id() == Some(district_id.as_str())
            }
            Self::Campus { campus_id } => person.primary_campus_id() == Some(*campus_id),
        }
    }
}

impl EditScope {
    /// Does this scope allow editing `person`?
    #[must_use]
    pub fn contains_person(&self, person: &PersonAnchors, catalog: &DistrictCatalog) -> bool {
        match self {
            Self::All => true,
            Self::Xan => person.is_xan_member(),
            Self::Region { region_id } => {
                resolve_person_region(person, catalog) == Some(region_id.as_str())
            }
            Self::District { district_id } => {
                person.primary_district_id() == Some(district_id.as_str())
            }
            Self::Campus { campus_id } => person.primary_campus_id() == Some(*campus_id),
        }
    }
}

/// Can `user` see the person's role, needs, notes and status colour?
///
/// National Team members' details are visible to the National Team only,
/// whatever the user's view level.
#[must_use]
pub fn can_view_person_details(
    user: Option<&UserAnchors>,
    person: &PersonAnchors,
    catalog: &DistrictCatalog,
) -> bool {
    if person.is_xan_member() {
        return is_national_team_member(user);
    }
    view_scope(user).is_some_and(|scope| scope.contains_person(person, catalog))
}

/// Can `user` edit the person's record?
///
/// The National Team may always edit its own members.
#[must_use]
pub fn can_edit_person(
    user: Option<&UserAnchors>,
    person: &PersonAnchors,
    catalog: &DistrictCatalog,
) -> bool {
    if person.is_xan_member() && is_national_team_member(user) {
        return true;
    }
    edit_scope(user).is_some_and(|scope| scope.contains_person(person, catalog))
}

/// Can `user` run district-level edits (rename, add or remove a campus) on a
/// district in `district_region`?
///
/// District-level editors pass here; the exact district is checked by the
/// server against the district record.
#[must_use]
pub fn can_edit_district_in_region(
    user: Option<&UserAnchors>,
    district_region: Option<&str>,
) -> bool {
    let Some(district_region) = district_region.filter(|r| !r.is_empty()) else {
        return false;
    };
    match edit_scope(user) {
        Some(EditScope::All | EditScope::District { .. }) => true,
        Some(EditScope::Region { region_id }) => region_id == district_region,
        Some(EditScope::Campus { .. } | EditScope::Xan) | None => false,
    }
}

/// Quick region-level edit gate for a person.
///
/// Region editors must match the person's region and XAN editors never pass.
/// District and campus editors pass here and are narrowed by the server.
#[must_use]
pub fn can_edit_person_by_region(
    user: Option<&UserAnchors>,
    person_primary_region: Option<&str>,
) -> bool {
    match edit_scope(user) {
        Some(EditScope::All | EditScope::District { .. } | EditScope::Campus { .. }) => true,
        Some(EditScope::Region { region_id }) => person_primary_region == Some(region_id.as_str()),
        Some(EditScope::Xan) | None => false,
    }
}
