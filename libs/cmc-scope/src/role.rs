//! Role canonicalization.
//!
//! Roles reach us as free-form strings from the session layer, and several
//! legacy titles share a tier. They are folded onto a small set of canonical
//! codes before any scope decision is made.

use std::fmt;

pub const CAMPUS_DIRECTOR: &str = "CAMPUS_DIRECTOR";
pub const STAFF: &str = "STAFF";
pub const DISTRICT_DIRECTOR: &str = "DISTRICT_DIRECTOR";
pub const REGION_DIRECTOR: &str = "REGION_DIRECTOR";
pub const ADMIN: &str = "ADMIN";

/// Intermediate code, produced and consumed only by the alias rules.
const REGIONAL_DIRECTOR: &str = "REGIONAL_DIRECTOR";

/// Co-director titles. They canonicalize to `CAMPUS_DIRECTOR` but carry staff
/// visibility: a co-director is scoped to their campus.
const CO_DIRECTOR_ALIASES: &[&str] = &["CAMPUS_CO_DIRECTOR", "CO_DIRECTOR"];

/// Stored roles that make a user, or a person record, part of the National
/// Team (XAN panel). Matched on the normalized role, before aliasing.
pub const NATIONAL_TEAM_ROLES: &[&str] = &[
    "NATIONAL_STAFF",
    "NATIONAL_DIRECTOR",
    "FIELD_DIRECTOR",
    "REGION_DIRECTOR",
    "REGIONAL_STAFF",
    "CMC_GO_ADMIN",
];

struct AliasRule {
    aliases: &'static [&'static str],
    canonical: &'static str,
}

/// Applied top to bottom, each rule seeing the output of the previous ones.
/// `REGIONAL_STAFF` depends on this ordering to reach `REGION_DIRECTOR`.
const ALIAS_RULES: &[AliasRule] = &[
    AliasRule {
        aliases: CO_DIRECTOR_ALIASES,
        canonical: CAMPUS_DIRECTOR,
    },
    AliasRule {
        aliases: &["CAMPUS_VOLUNTEER", "CAMPUS_INTERN"],
        canonical: STAFF,
    },
    AliasRule {
        aliases: &["DISTRICT_STAFF"],
        canonical: DISTRICT_DIRECTOR,
    },
    AliasRule {
        aliases: &["REGIONAL_STAFF"],
        canonical: REGIONAL_DIRECTOR,
    },
    AliasRule {
        aliases: &["NATIONAL_DIRECTOR", REGIONAL_DIRECTOR, "FIELD_DIRECTOR"],
        canonical: REGION_DIRECTOR,
    },
    AliasRule {
        aliases: &["NATIONAL_STAFF", "CMC_GO_ADMIN"],
        canonical: ADMIN,
    },
];

/// Normalize a role string into its lookup key.
///
/// Trims, upper-cases and replaces every run of whitespace or `-` with a
/// single `_`, so `"campus co-director"` becomes `"CAMPUS_CO_DIRECTOR"`.
#[must_use]
pub fn normalize_role(role: &str) -> String {
    let mut key = String::with_capacity(role.len());
    let mut in_separator = false;
    for ch in role.trim().chars() {
        if ch.is_whitespace() || ch == '-' {
            if !in_separator {
                key.push('_');
                in_separator = true;
            }
        } else {
            key.extend(ch.to_uppercase());
            in_separator = false;
        }
    }
    key
}

/// Map a legacy or alias role onto its canonical code.
///
/// Roles that match no alias, canonical codes and unknown strings alike,
/// come back unchanged. Applying this twice gives the same result as
/// applying it once.
///
/// ```
/// use cmc_scope::canonicalize_role;
///
/// assert_eq!(canonicalize_role("campus co-director"), "CAMPUS_DIRECTOR");
/// assert_eq!(canonicalize_role("REGIONAL_STAFF"), "REGION_DIRECTOR");
/// assert_eq!(canonicalize_role("Chaplain"), "Chaplain");
/// ```
#[must_use]
pub fn canonicalize_role(role: &str) -> String {
    let key = normalize_role(role);
    let mut current = key.as_str();
    let mut rewritten = false;

    for rule in ALIAS_RULES {
        if rule.aliases.iter().any(|alias| *alias == current) {
            current = rule.canonical;
            rewritten = true;
        }
    }

    if rewritten {
        current.to_owned()
    } else {
        role.to_owned()
    }
}

/// Is `role` one of the [`NATIONAL_TEAM_ROLES`]? `ADMIN` is not.
#[must_use]
pub fn is_national_team_role(role: &str) -> bool {
    let key = normalize_role(role);
    NATIONAL_TEAM_ROLES.iter().any(|team| *team == key)
}

/// The organisational tier a role resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoleTier {
    /// `REGION_DIRECTOR` and `ADMIN`: unrestricted visibility.
    National,
    /// `DISTRICT_DIRECTOR`.
    District,
    /// `CAMPUS_DIRECTOR`.
    Campus,
    /// `STAFF`, and co-directors whatever their spelling.
    Staff,
    /// Any role the alias table does not know. Treated like `Staff`.
    Unrecognized,
}

impl RoleTier {
    /// Canonicalize `role` and classify it.
    ///
    /// Co-director titles are classified before aliasing and land in
    /// [`RoleTier::Staff`], not with the campus director they alias to.
    #[must_use]
    pub fn of(role: &str) -> Self {
        let key = normalize_role(role);
        if CO_DIRECTOR_ALIASES.iter().any(|alias| *alias == key) {
            return Self::Staff;
        }
        let canonical = canonicalize_role(role);
        match normalize_role(&canonical).as_str() {
            REGION_DIRECTOR | ADMIN => Self::National,
            DISTRICT_DIRECTOR => Self::District,
            CAMPUS_DIRECTOR => Self::Campus,
            STAFF => Self::Staff,
            _ => Self::Unrecognized,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::National => "national",
            Self::District => "district",
            Self::Campus => "campus",
            Self::Staff => "staff",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for RoleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
