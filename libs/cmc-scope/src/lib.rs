#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! People-scope resolution for CMC Go.
//!
//! A user's role and location anchors (campus, district, region) decide how
//! much of the organisation they can see. Everything here is pure and
//! fail-closed: missing data narrows access, it never widens it. "No access"
//! is always `None` or `false`, never an error.
//!
//! - [`canonicalize_role`] folds legacy role titles onto canonical codes
//! - [`people_scope`] computes the broadest [`PeopleScope`] a user may see
//! - [`is_district_in_scope`] / [`is_campus_in_scope`] gate map and panel data
//! - [`view_scope`] / [`edit_scope`] resolve the stored authorization levels
//! - [`PeopleScope::row_filter`] turns a scope into a storage-side predicate

pub mod catalog;
pub mod error;
pub mod filter;
pub mod levels;
pub mod people_scope;
pub mod person;
pub mod role;
pub mod user;

pub use catalog::{DistrictCatalog, XAN_DISTRICT_ID};
pub use error::ScopeError;
pub use filter::{RowFilter, ScopeFilter, ScopeValue, person_properties};
pub use levels::{AuthLevel, EditScope, edit_scope, resolve_level, view_scope};
pub use people_scope::{
    PeopleScope, can_access_person, is_campus_in_scope, is_district_in_scope, people_scope,
};
pub use person::{
    PersonAnchors, can_edit_district_in_region, can_edit_person, can_edit_person_by_region,
    can_view_person_details, is_national_team_member, resolve_person_region,
};
pub use role::{
    NATIONAL_TEAM_ROLES, RoleTier, canonicalize_role, is_national_team_role, normalize_role,
};
pub use user::{UserAnchors, UserAnchorsBuilder};
