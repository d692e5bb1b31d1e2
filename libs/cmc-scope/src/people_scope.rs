//! People scope: the broadest organisational level a user may see.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::person::PersonAnchors;
use crate::role::{RoleTier, canonicalize_role};
use crate::user::UserAnchors;

/// Visibility granted to a user.
///
/// Ordered from widest to narrowest: `All`, `Region`, `District`, `Campus`.
/// "No access" is represented by `Option::None`, never by a variant.
///
/// Serializes in the shape the dashboard consumes:
///
/// ```
/// use cmc_scope::PeopleScope;
///
/// let json = serde_json::to_string(&PeopleScope::region("Big Sky")).unwrap();
/// assert_eq!(json, r#"{"level":"REGION","regionId":"Big Sky"}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    tag = "level",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum PeopleScope {
    /// Everything.
    All,
    /// Entities in one region.
    Region { region_id: String },
    /// Entities in one district.
    District { district_id: String },
    /// Entities on one campus.
    Campus { campus_id: i64 },
}

impl PeopleScope {
    #[must_use]
    pub fn region(region_id: impl Into<String>) -> Self {
        Self::Region {
            region_id: region_id.into(),
        }
    }

    #[must_use]
    pub fn district(district_id: impl Into<String>) -> Self {
        Self::District {
            district_id: district_id.into(),
        }
    }

    #[must_use]
    pub fn campus(campus_id: i64) -> Self {
        Self::Campus { campus_id }
    }

    /// Does this scope cover `district_id`?
    ///
    /// `district_region` is the district's own region, supplied by the caller.
    /// A campus scope never covers a district, not even its own.
    #[must_use]
    pub fn contains_district(&self, district_id: &str, district_region: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Region { region_id } => district_region == Some(region_id.as_str()),
            Self::District { district_id: own } => own == district_id,
            Self::Campus { .. } => false,
        }
    }

    /// Does this scope cover the campus `campus_id`?
    ///
    /// `campus_district_id` is the campus's owning district and
    /// `district_region` that district's region, both supplied by the caller.
    #[must_use]
    pub fn contains_campus(
        &self,
        campus_id: i64,
        campus_district_id: Option<&str>,
        district_region: Option<&str>,
    ) -> bool {
        match self {
            Self::All => true,
            Self::Region { region_id } => district_region == Some(region_id.as_str()),
            Self::District { district_id } => campus_district_id == Some(district_id.as_str()),
            Self::Campus { campus_id: own } => *own == campus_id,
        }
    }
}

/// Compute the people scope of `user`.
///
/// Returns `None` for a logged-out caller or when the user's role needs a
/// location anchor that is missing. Region directors and admins always get
/// [`PeopleScope::All`]. Directors below that narrow to the next anchor they
/// actually have rather than being denied outright:
///
/// | tier | tried in order |
/// |---|---|
/// | district director | region, district, campus |
/// | campus director | district, campus |
/// | staff, co-directors and unknown roles | campus |
#[must_use]
pub fn people_scope(user: Option<&UserAnchors>) -> Option<PeopleScope> {
    let user = user?;
    let tier = RoleTier::of(user.role());

    let scope = match tier {
        RoleTier::National => Some(PeopleScope::All),
        RoleTier::District => user
            .region_id()
            .map(PeopleScope::region)
            .or_else(|| user.district_id().map(PeopleScope::district))
            .or_else(|| user.campus_id().map(PeopleScope::campus)),
        RoleTier::Campus => user
            .district_id()
            .map(PeopleScope::district)
            .or_else(|| user.campus_id().map(PeopleScope::campus)),
        RoleTier::Staff | RoleTier::Unrecognized => user.campus_id().map(PeopleScope::campus),
    };

    if scope.is_none() {
        debug!(
            role = %canonicalize_role(user.role()),
            tier = %tier,
            "people scope denied: no usable location anchor"
        );
    }
    scope
}

/// Is the district `district_id` visible to `user`?
///
/// `district_region` is the district's region from the district catalog;
/// without it a region scope cannot match.
#[must_use]
pub fn is_district_in_scope(
    district_id: &str,
    user: Option<&UserAnchors>,
    district_region: Option<&str>,
) -> bool {
    people_scope(user).is_some_and(|scope| scope.contains_district(district_id, district_region))
}

/// Is the campus `campus_id` visible to `user`?
#[must_use]
pub fn is_campus_in_scope(
    campus_id: i64,
    campus_district_id: Option<&str>,
    user: Option<&UserAnchors>,
    district_region: Option<&str>,
) -> bool {
    people_scope(user).is_some_and(|scope| {
        scope.contains_campus(campus_id, campus_district_id, district_region)
    })
}

/// Can `user` access the person record at all?
///
/// Compares the people scope against the person's primary anchors exactly as
/// the storage row filter does, with no catalog fallback.
#[must_use]
pub fn can_access_person(user: Option<&UserAnchors>, person: &PersonAnchors) -> bool {
    people_scope(user).is_some_and(|scope| scope.row_filter().matches(person))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    fn user(
        role: &str,
        campus: Option<i64>,
        district: Option<&str>,
        region: Option<&str>,
    ) -> UserAnchors {
        let mut b = UserAnchors::builder().role(role);
        if let Some(c) = campus {
            b = b.campus_id(c);
        }
        if let Some(d) = district {
            b = b.district_id(d);
        }
        if let Some(r) = region {
            b = b.region_id(r);
        }
        b.build()
    }

    #[test]
    fn logged_out_has_no_scope() {
        assert_eq!(people_scope(None), None);
    }

    #[test]
    fn national_roles_see_everything_without_anchors() {
        for role in [
            "ADMIN",
            "REGION_DIRECTOR",
            "NATIONAL_STAFF",
            "field director",
            "CMC_GO_ADMIN",
            "regional staff",
        ] {
            assert_eq!(
                people_scope(Some(&user(role, None, None, None))),
                Some(PeopleScope::All),
                "role {role}"
            );
        }
    }

    #[test]
    fn district_director_narrows_step_by_step() {
        let full = user("DISTRICT_DIRECTOR", Some(1), Some("Colorado"), Some("Big Sky"));
        assert_eq!(people_scope(Some(&full)), Some(PeopleScope::region("Big Sky")));

        let no_region = user("DISTRICT_DIRECTOR", Some(1), Some("Colorado"), None);
        assert_eq!(people_scope(Some(&no_region)), Some(PeopleScope::district("Colorado")));

        let campus_only = user("district staff", Some(1), None, None);
        assert_eq!(people_scope(Some(&campus_only)), Some(PeopleScope::campus(1)));

        let nothing = user("DISTRICT_DIRECTOR", None, None, None);
        assert_eq!(people_scope(Some(&nothing)), None);
    }

    #[test]
    fn district_director_ignores_oversee_region() {
        let u = UserAnchors::builder()
            .role("DISTRICT_DIRECTOR")
            .district_id("Ohio")
            .oversee_region_id("Great Lakes")
            .build();
        assert_eq!(people_scope(Some(&u)), Some(PeopleScope::district("Ohio")));
    }

    #[test]
    fn campus_director_never_reaches_region() {
        let u = user("CAMPUS_DIRECTOR", Some(3), Some("Ohio"), Some("Great Lakes"));
        assert_eq!(people_scope(Some(&u)), Some(PeopleScope::district("Ohio")));

        let u = user("CAMPUS_DIRECTOR", Some(3), None, Some("Great Lakes"));
        assert_eq!(people_scope(Some(&u)), Some(PeopleScope::campus(3)));

        let u = user("CAMPUS_DIRECTOR", None, None, Some("Great Lakes"));
        assert_eq!(people_scope(Some(&u)), None);
    }

    #[test]
    fn co_directors_are_campus_only() {
        for role in ["co-director", "campus co-director", "CO_DIRECTOR", "CAMPUS_CO_DIRECTOR"] {
            let u = user(role, Some(1), Some("Colorado"), Some("Big Sky"));
            assert_eq!(people_scope(Some(&u)), Some(PeopleScope::campus(1)), "role {role}");
            assert!(!is_district_in_scope("Colorado", Some(&u), Some("Big Sky")));
            assert!(!is_campus_in_scope(9, Some("Colorado"), Some(&u), Some("Big Sky")));
        }
        let u = user("co-director", None, Some("Colorado"), Some("Big Sky"));
        assert_eq!(people_scope(Some(&u)), None);
    }

    #[test]
    #[traced_test]
    fn denial_logs_canonical_role() {
        let u = user("campus co-director", None, Some("Ohio"), None);
        assert_eq!(people_scope(Some(&u)), None);
        assert!(logs_contain("role=CAMPUS_DIRECTOR"));
        assert!(logs_contain("tier=staff"));
        assert!(!logs_contain("campus co-director"));
    }

    #[test]
    fn staff_and_unknown_roles_are_campus_only() {
        let u = user("STAFF", Some(9), Some("Ohio"), Some("Great Lakes"));
        assert_eq!(people_scope(Some(&u)), Some(PeopleScope::campus(9)));

        let u = user("Greeter", Some(9), Some("Ohio"), Some("Great Lakes"));
        assert_eq!(people_scope(Some(&u)), Some(PeopleScope::campus(9)));

        let u = user("campus intern", None, Some("Ohio"), Some("Great Lakes"));
        assert_eq!(people_scope(Some(&u)), None);
    }

    #[test]
    fn empty_district_falls_through_to_campus() {
        let u = UserAnchors::builder()
            .role("CAMPUS_DIRECTOR")
            .district_id("")
            .campus_id(4)
            .build();
        assert_eq!(people_scope(Some(&u)), Some(PeopleScope::campus(4)));
    }

    #[test]
    fn region_scope_needs_caller_supplied_region() {
        let scope = PeopleScope::region("Great Lakes");
        assert!(scope.contains_district("Ohio", Some("Great Lakes")));
        assert!(!scope.contains_district("Ohio", None));
        assert!(!scope.contains_campus(5, Some("Ohio"), None));
    }

    #[test]
    fn campus_scope_never_contains_a_district() {
        let scope = PeopleScope::campus(1);
        assert!(!scope.contains_district("Colorado", Some("Big Sky")));
        assert!(scope.contains_campus(1, None, None));
        assert!(!scope.contains_campus(2, None, None));
    }

    #[test]
    fn scope_json_shapes() {
        assert_eq!(
            serde_json::to_value(PeopleScope::All).unwrap(),
            serde_json::json!({"level": "ALL"})
        );
        assert_eq!(
            serde_json::to_value(PeopleScope::campus(1)).unwrap(),
            serde_json::json!({"level": "CAMPUS", "campusId": 1})
        );
        let parsed: PeopleScope =
            serde_json::from_str(r#"{"level":"DISTRICT","districtId":"Colorado"}"#).unwrap();
        assert_eq!(parsed, PeopleScope::district("Colorado"));
    }

    #[test]
    fn person_access_uses_primary_anchors() {
        let director = user("CAMPUS_DIRECTOR", Some(1), Some("Colorado"), None);
        let inside = PersonAnchors::new().with_district("Colorado").with_campus(2);
        let outside = PersonAnchors::new().with_district("Utah").with_campus(1);

        assert!(can_access_person(Some(&director), &inside));
        assert!(!can_access_person(Some(&director), &outside));
        assert!(!can_access_person(None, &inside));
    }
}
