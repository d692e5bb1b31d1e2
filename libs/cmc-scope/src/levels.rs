//! Stored authorization levels and the scopes they resolve to.
//!
//! Besides the role-derived people scope, each user carries two stored
//! levels: a detail-view level and an edit level. When a level is not stored
//! the role's default applies. Defaults are keyed on the normalized role as
//! stored, not on its canonical form: `NATIONAL_STAFF` and `ADMIN` share a
//! canonical role but not an edit level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ScopeError;
use crate::people_scope::PeopleScope;
use crate::role::normalize_role;
use crate::user::UserAnchors;

/// An authorization level, widest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthLevel {
    National,
    /// National Team panel only. Meaningful for editing.
    Xan,
    Region,
    District,
    Campus,
}

impl AuthLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::National => "NATIONAL",
            Self::Xan => "XAN",
            Self::Region => "REGION",
            Self::District => "DISTRICT",
            Self::Campus => "CAMPUS",
        }
    }

    /// Detail-view level a role gets when none is stored.
    #[must_use]
    pub fn default_view_for(role: &str) -> Self {
        match normalize_role(role).as_str() {
            "NATIONAL_DIRECTOR" | "FIELD_DIRECTOR" | "CMC_GO_ADMIN" | "ADMIN"
            | "NATIONAL_STAFF" | "REGION_DIRECTOR" | "REGIONAL_STAFF" => Self::National,
            "DISTRICT_DIRECTOR" | "DISTRICT_STAFF" => Self::Region,
            "CAMPUS_DIRECTOR" | "CO_DIRECTOR" | "CAMPUS_CO_DIRECTOR" => Self::District,
            _ => Self::Campus,
        }
    }

    /// Edit level a role gets when none is stored.
    #[must_use]
    pub fn default_edit_for(role: &str) -> Self {
        match normalize_role(role).as_str() {
            "NATIONAL_DIRECTOR" | "FIELD_DIRECTOR" | "CMC_GO_ADMIN" | "ADMIN" => Self::National,
            "NATIONAL_STAFF" => Self::Xan,
            "REGION_DIRECTOR" | "REGIONAL_STAFF" => Self::Region,
            "DISTRICT_DIRECTOR" | "DISTRICT_STAFF" => Self::District,
            _ => Self::Campus,
        }
    }
}

impl fmt::Display for AuthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthLevel {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [
            Self::National,
            Self::Xan,
            Self::Region,
            Self::District,
            Self::Campus,
        ]
        .into_iter()
        .find(|level| level.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| ScopeError::UnknownLevel(s.to_owned()))
    }
}

/// What a user may edit.
///
/// Same shape as [`PeopleScope`] plus `Xan`, which allows editing National
/// Team members and nobody else.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    tag = "level",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum EditScope {
    All,
    Xan,
    Region { region_id: String },
    District { district_id: String },
    Campus { campus_id: i64 },
}

impl From<PeopleScope> for EditScope {
    fn from(scope: PeopleScope) -> Self {
        match scope {
            PeopleScope::All => Self::All,
            PeopleScope::Region { region_id } => Self::Region { region_id },
            PeopleScope::District { district_id } => Self::District { district_id },
            PeopleScope::Campus { campus_id } => Self::Campus { campus_id },
        }
    }
}

/// Resolve a level against the user's anchors.
///
/// Narrows to the next anchor the user has when the one the level asks for
/// is missing. `REGION` uses the overseen region before the home region.
/// `XAN` grants no viewing scope.
#[must_use]
pub fn resolve_level(level: AuthLevel, user: &UserAnchors) -> Option<PeopleScope> {
    let campus = || user.campus_id().map(PeopleScope::campus);
    let district_or_campus = || {
        user.district_id()
            .map(PeopleScope::district)
            .or_else(campus)
    };

    match level {
        AuthLevel::National => Some(PeopleScope::All),
        AuthLevel::Region => user
            .effective_region()
            .map(PeopleScope::region)
            .or_else(district_or_campus),
        AuthLevel::District => district_or_campus(),
        AuthLevel::Campus => campus(),
        AuthLevel::Xan => None,
    }
}

/// The stored level if there is one, else the role default.
///
/// A stored level that does not parse denies access instead of falling back.
fn effective_level(
    user: &UserAnchors,
    stored: Option<&str>,
    default: AuthLevel,
) -> Option<AuthLevel> {
    let Some(stored) = stored else {
        return Some(default);
    };
    match stored.parse() {
        Ok(level) => Some(level),
        Err(err) => {
            warn!(
                role = %user.role(),
                error = %err,
                "stored authorization level is unreadable, denying"
            );
            None
        }
    }
}

/// Whose details (roles, needs, notes, status colours) `user` may see.
#[must_use]
pub fn view_scope(user: Option<&UserAnchors>) -> Option<PeopleScope> {
    let user = user?;
    let level = effective_level(
        user,
        user.view_level(),
        AuthLevel::default_view_for(user.role()),
    )?;
    resolve_level(level, user)
}

/// Whose records `user` may modify.
#[must_use]
pub fn edit_scope(user: Option<&UserAnchors>) -> Option<EditScope> {
    let user = user?;
    let level = effective_level(
        user,
        user.edit_level(),
        AuthLevel::default_edit_for(user.role()),
    )?;
    match level {
        AuthLevel::Xan => Some(EditScope::Xan),
        other => resolve_level(other, user).map(EditScope::from),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn anchored(role: &str) -> UserAnchors {
        UserAnchors::builder()
            .role(role)
            .campus_id(1)
            .district_id("Colorado")
            .region_id("Big Sky")
            .build()
    }

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!("region".parse::<AuthLevel>(), Ok(AuthLevel::Region));
        assert_eq!(" XAN ".parse::<AuthLevel>(), Ok(AuthLevel::Xan));
        assert_eq!(
            "GLOBAL".parse::<AuthLevel>(),
            Err(ScopeError::UnknownLevel("GLOBAL".to_owned()))
        );
    }

    #[test]
    fn default_view_levels() {
        assert_eq!(AuthLevel::default_view_for("regional staff"), AuthLevel::National);
        assert_eq!(AuthLevel::default_view_for("NATIONAL_STAFF"), AuthLevel::National);
        assert_eq!(AuthLevel::default_view_for("DISTRICT_STAFF"), AuthLevel::Region);
        assert_eq!(AuthLevel::default_view_for("co-director"), AuthLevel::District);
        assert_eq!(AuthLevel::default_view_for("CAMPUS_INTERN"), AuthLevel::Campus);
        assert_eq!(AuthLevel::default_view_for("Greeter"), AuthLevel::Campus);
    }

    #[test]
    fn default_edit_levels() {
        assert_eq!(AuthLevel::default_edit_for("FIELD_DIRECTOR"), AuthLevel::National);
        assert_eq!(AuthLevel::default_edit_for("NATIONAL_STAFF"), AuthLevel::Xan);
        assert_eq!(AuthLevel::default_edit_for("REGION_DIRECTOR"), AuthLevel::Region);
        assert_eq!(AuthLevel::default_edit_for("district director"), AuthLevel::District);
        assert_eq!(AuthLevel::default_edit_for("CAMPUS_DIRECTOR"), AuthLevel::Campus);
    }

    #[test]
    fn region_level_prefers_oversee_region() {
        let user = UserAnchors::builder()
            .role("REGIONAL_STAFF")
            .region_id("Big Sky")
            .oversee_region_id("Northwest")
            .build();
        assert_eq!(
            resolve_level(AuthLevel::Region, &user),
            Some(PeopleScope::region("Northwest"))
        );
    }

    #[test]
    fn levels_narrow_on_missing_anchors() {
        let user = UserAnchors::builder().role("STAFF").campus_id(5).build();
        assert_eq!(resolve_level(AuthLevel::Region, &user), Some(PeopleScope::campus(5)));
        assert_eq!(resolve_level(AuthLevel::District, &user), Some(PeopleScope::campus(5)));
        assert_eq!(resolve_level(AuthLevel::Xan, &user), None);
        assert_eq!(resolve_level(AuthLevel::Campus, &UserAnchors::new("STAFF")), None);
    }

    #[test]
    fn view_scope_uses_role_defaults() {
        assert_eq!(view_scope(None), None);
        assert_eq!(
            view_scope(Some(&anchored("DISTRICT_DIRECTOR"))),
            Some(PeopleScope::region("Big Sky"))
        );
        assert_eq!(
            view_scope(Some(&anchored("CAMPUS_DIRECTOR"))),
            Some(PeopleScope::district("Colorado"))
        );
        assert_eq!(view_scope(Some(&anchored("STAFF"))), Some(PeopleScope::campus(1)));
    }

    #[test]
    fn stored_levels_override_defaults() {
        let user = UserAnchors::builder()
            .role("STAFF")
            .district_id("Colorado")
            .view_level("district")
            .edit_level("NATIONAL")
            .build();
        assert_eq!(view_scope(Some(&user)), Some(PeopleScope::district("Colorado")));
        assert_eq!(edit_scope(Some(&user)), Some(EditScope::All));
    }

    #[test]
    fn unreadable_stored_level_denies() {
        let user = UserAnchors::builder()
            .role("ADMIN")
            .view_level("EVERYTHING")
            .edit_level("EVERYTHING")
            .build();
        assert_eq!(view_scope(Some(&user)), None);
        assert_eq!(edit_scope(Some(&user)), None);
    }

    #[test]
    fn national_staff_edits_xan_only() {
        assert_eq!(edit_scope(Some(&anchored("NATIONAL_STAFF"))), Some(EditScope::Xan));
        assert_eq!(
            edit_scope(Some(&anchored("DISTRICT_STAFF"))),
            Some(EditScope::District {
                district_id: "Colorado".to_owned()
            })
        );
    }

    #[test]
    fn edit_scope_json_shape() {
        assert_eq!(
            serde_json::to_value(EditScope::Xan).unwrap(),
            serde_json::json!({"level": "XAN"})
        );
    }
}
