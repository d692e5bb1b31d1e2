use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use cmc_scope::{
    DistrictCatalog, EditScope, PeopleScope, RowFilter, UserAnchors, canonicalize_role,
    edit_scope, is_campus_in_scope, is_district_in_scope, people_scope, view_scope,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::Command;

/// Everything the resolver says about one user.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScopeReport {
    pub canonical_role: String,
    pub people_scope: Option<PeopleScope>,
    pub view_scope: Option<PeopleScope>,
    pub edit_scope: Option<EditScope>,
    /// `None` when the user has no people scope at all.
    pub row_filter: Option<RowFilter>,
}

impl ScopeReport {
    #[must_use]
    pub fn for_user(user: &UserAnchors) -> Self {
        let people = people_scope(Some(user));
        Self {
            canonical_role: canonicalize_role(user.role()),
            row_filter: people.as_ref().map(PeopleScope::row_filter),
            people_scope: people,
            view_scope: view_scope(Some(user)),
            edit_scope: edit_scope(Some(user)),
        }
    }
}

/// Parse a session-shaped user record.
///
/// # Errors
/// Returns an error if `json` is not a valid user record.
pub fn parse_user(json: &str) -> anyhow::Result<UserAnchors> {
    serde_json::from_str(json).context("invalid user record")
}

/// Read a user record from `path`, or from stdin when `path` is `-`.
///
/// # Errors
/// Returns an error if the source cannot be read or does not parse.
pub fn read_user(path: &Path) -> anyhow::Result<UserAnchors> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read user record from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read user record {}", path.display()))?
    };
    parse_user(&json)
}

/// Run `command` and return what should be printed on stdout.
///
/// # Errors
/// Returns an error if the user record cannot be loaded or the report cannot
/// be serialized.
pub fn run(command: &Command, catalog: &DistrictCatalog) -> anyhow::Result<String> {
    match command {
        Command::Canonicalize { role } => Ok(canonicalize_role(role)),
        Command::Scope { user } => {
            let user = read_user(user)?;
            let report = ScopeReport::for_user(&user);
            info!(role = %user.role(), canonical = %report.canonical_role, "resolved scopes");
            serde_json::to_string_pretty(&report).context("failed to serialize scope report")
        }
        Command::District {
            district_id,
            user,
            region,
        } => {
            let user = read_user(user)?;
            let region = region
                .as_deref()
                .or_else(|| catalog.region_of(district_id));
            debug!(district = %district_id, region = ?region, "checking district");
            Ok(is_district_in_scope(district_id, Some(&user), region).to_string())
        }
        Command::Campus {
            campus_id,
            user,
            district,
            region,
        } => {
            let user = read_user(user)?;
            let district = district.as_deref();
            let region = region
                .as_deref()
                .or_else(|| district.and_then(|d| catalog.region_of(d)));
            debug!(campus = campus_id, district = ?district, region = ?region, "checking campus");
            Ok(is_campus_in_scope(*campus_id, district, Some(&user), region).to_string())
        }
    }
}
