use serde::{Deserialize, Serialize};

/// `UserAnchors` is the slice of an authenticated user that scope decisions read.
///
/// Produced by the session layer and passed explicitly into every resolver
/// call. Any anchor may be missing regardless of role; empty strings are
/// treated the same as missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnchors {
    /// Role as stored, before canonicalization.
    role: String,
    #[serde(default)]
    campus_id: Option<i64>,
    #[serde(default)]
    district_id: Option<String>,
    #[serde(default)]
    region_id: Option<String>,
    /// Region a national-team member oversees. Takes priority over
    /// `region_id` when resolving a `REGION` authorization level.
    #[serde(default)]
    oversee_region_id: Option<String>,
    /// Stored detail-view level (`NATIONAL`, `REGION`, ...). Role default when absent.
    #[serde(default)]
    view_level: Option<String>,
    /// Stored edit level (`NATIONAL`, `XAN`, `REGION`, ...). Role default when absent.
    #[serde(default)]
    edit_level: Option<String>,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl UserAnchors {
    /// A user with the given role and no location anchors.
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn builder() -> UserAnchorsBuilder {
        UserAnchorsBuilder::default()
    }

    /// The stored role, not canonicalized.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    #[must_use]
    pub fn campus_id(&self) -> Option<i64> {
        self.campus_id
    }

    #[must_use]
    pub fn district_id(&self) -> Option<&str> {
        present(self.district_id.as_ref())
    }

    #[must_use]
    pub fn region_id(&self) -> Option<&str> {
        present(self.region_id.as_ref())
    }

    #[must_use]
    pub fn oversee_region_id(&self) -> Option<&str> {
        present(self.oversee_region_id.as_ref())
    }

    /// The region used for `REGION` authorization levels: the overseen
    /// region when set, the home region otherwise.
    #[must_use]
    pub fn effective_region(&self) -> Option<&str> {
        self.oversee_region_id().or_else(|| self.region_id())
    }

    #[must_use]
    pub fn view_level(&self) -> Option<&str> {
        present(self.view_level.as_ref())
    }

    #[must_use]
    pub fn edit_level(&self) -> Option<&str> {
        present(self.edit_level.as_ref())
    }
}

#[derive(Default)]
pub struct UserAnchorsBuilder {
    inner: UserAnchors,
}

impl UserAnchorsBuilder {
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.inner.role = role.into();
        self
    }

    #[must_use]
    pub fn campus_id(mut self, campus_id: i64) -> Self {
        self.inner.campus_id = Some(campus_id);
        self
    }

    #[must_use]
    pub fn district_id(mut self, district_id: impl Into<String>) -> Self {
        self.inner.district_id = Some(district_id.into());
        self
    }

    #[must_use]
    pub fn region_id(mut self, region_id: impl Into<String>) -> Self {
        self.inner.region_id = Some(region_id.into());
        self
    }

    #[must_use]
    pub fn oversee_region_id(mut self, region_id: impl Into<String>) -> Self {
        self.inner.oversee_region_id = Some(region_id.into());
        self
    }

    #[must_use]
    pub fn view_level(mut self, level: impl Into<String>) -> Self {
        self.inner.view_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn edit_level(mut self, level: impl Into<String>) -> Self {
        self.inner.edit_level = Some(level.into());
        self
    }

    #[must_use]
    pub fn build(self) -> UserAnchors {
        self.inner
    }
}
