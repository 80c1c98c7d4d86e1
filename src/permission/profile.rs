//! Ranked permission sources and their JSON loading

use serde::{Deserialize, Serialize};

use super::types::Permission;
use crate::error::{AuthzError, Result};

/// Id given to the synthetic source built from a profile's overrides
pub const OVERRIDES_SOURCE_ID: &str = "overrides";

/// Rank given to the synthetic overrides source
pub const OVERRIDES_RANK: i32 = 0;

/// One ranked source of permissions, typically a staff position
///
/// Larger ranks take precedence. The order of `grants` is the order in which
/// entries (including `@clear` directives) are applied within this source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPositionGrant")]
pub struct PositionGrant {
    /// Position identifier
    pub id: String,

    /// Precedence of this source
    pub rank: i32,

    /// Permissions granted, revoked or cleared by this source
    pub grants: Vec<Permission>,
}

impl PositionGrant {
    /// Creates a new position grant
    ///
    /// # Examples
    ///
    /// ```
    /// use rankperms::{Permission, PositionGrant};
    ///
    /// let position = PositionGrant::new("reviewer", 1, Permission::from_list(["rpc.Claim"]));
    /// assert_eq!(position.rank, 1);
    /// ```
    pub fn new(id: impl Into<String>, rank: i32, grants: Vec<Permission>) -> Self {
        Self {
            id: id.into(),
            rank,
            grants,
        }
    }

    /// Creates a position grant from a rank whose integrality is not known
    /// statically, e.g. one received as a JSON number
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::InvalidRank` if `rank` has a fractional part, is
    /// not finite, or does not fit in an `i32`.
    pub fn with_raw_rank(id: impl Into<String>, rank: f64, grants: Vec<Permission>) -> Result<Self> {
        let id = id.into();
        let rank = rank_from_f64(&id, rank)?;
        Ok(Self::new(id, rank, grants))
    }
}

/// All permission sources for one principal
///
/// `overrides` behave as an extra position with rank 0, appended after every
/// real position before ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPermissionProfile")]
pub struct PermissionProfile {
    /// Positions held by the principal
    pub positions: Vec<PositionGrant>,

    /// Direct per-principal overrides
    pub overrides: Vec<Permission>,
}

impl PermissionProfile {
    /// Creates a new profile
    pub fn new(positions: Vec<PositionGrant>, overrides: Vec<Permission>) -> Self {
        Self {
            positions,
            overrides,
        }
    }

    /// Adds a position, consuming and returning the profile
    pub fn with_position(mut self, position: PositionGrant) -> Self {
        self.positions.push(position);
        self
    }

    /// Replaces the overrides, consuming and returning the profile
    pub fn with_overrides(mut self, overrides: Vec<Permission>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Loads a profile from JSON text
    ///
    /// ```
    /// use rankperms::PermissionProfile;
    ///
    /// let profile = PermissionProfile::from_json(
    ///     r#"{"positions": [{"id": "mod", "rank": 2, "grants": ["rpc.*"]}], "overrides": ["~rpc.Ban"]}"#,
    /// ).unwrap();
    /// assert_eq!(profile.positions[0].rank, 2);
    /// assert_eq!(profile.overrides[0].to_string(), "~rpc.Ban");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `AuthzError::InvalidProfile` if the JSON has the wrong shape,
    /// or `AuthzError::InvalidRank` if any rank is not an integer. One bad
    /// rank rejects the whole profile.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawPermissionProfile = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Loads a profile from an already parsed JSON value
    ///
    /// # Errors
    ///
    /// Same as [`PermissionProfile::from_json`].
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawPermissionProfile = serde_json::from_value(value)?;
        Self::try_from(raw)
    }

    /// Builds the ranked source list: positions followed by the synthetic
    /// overrides source
    pub(crate) fn sources(&self) -> Vec<PositionGrant> {
        let mut sources = self.positions.clone();
        sources.push(PositionGrant::new(
            OVERRIDES_SOURCE_ID,
            OVERRIDES_RANK,
            self.overrides.clone(),
        ));
        sources
    }
}

/// Wire shape of a position before rank validation
#[derive(Debug, Deserialize)]
struct RawPositionGrant {
    id: String,
    rank: serde_json::Number,
    #[serde(default)]
    grants: Vec<Permission>,
}

/// Wire shape of a profile before rank validation
#[derive(Debug, Deserialize)]
struct RawPermissionProfile {
    #[serde(default)]
    positions: Vec<RawPositionGrant>,
    #[serde(default)]
    overrides: Vec<Permission>,
}

impl TryFrom<RawPositionGrant> for PositionGrant {
    type Error = AuthzError;

    fn try_from(raw: RawPositionGrant) -> Result<Self> {
        let rank = match raw.rank.as_i64() {
            Some(rank) => i32::try_from(rank).map_err(|_| AuthzError::InvalidRank {
                position: raw.id.clone(),
                rank: raw.rank.to_string(),
            })?,
            None => match raw.rank.as_f64() {
                // Report the rank as written, not its f64 rendering
                Some(rank) => rank_from_f64(&raw.id, rank).map_err(|_| AuthzError::InvalidRank {
                    position: raw.id.clone(),
                    rank: raw.rank.to_string(),
                })?,
                None => {
                    return Err(AuthzError::InvalidRank {
                        position: raw.id,
                        rank: raw.rank.to_string(),
                    })
                }
            },
        };

        Ok(PositionGrant::new(raw.id, rank, raw.grants))
    }
}

impl TryFrom<RawPermissionProfile> for PermissionProfile {
    type Error = AuthzError;

    fn try_from(raw: RawPermissionProfile) -> Result<Self> {
        let positions = raw
            .positions
            .into_iter()
            .map(PositionGrant::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(PermissionProfile::new(positions, raw.overrides))
    }
}

fn rank_from_f64(position: &str, rank: f64) -> Result<i32> {
    let in_range = rank >= f64::from(i32::MIN) && rank <= f64::from(i32::MAX);
    if !rank.is_finite() || rank.fract() != 0.0 || !in_range {
        return Err(AuthzError::InvalidRank {
            position: position.to_string(),
            rank: rank.to_string(),
        });
    }

    Ok(rank as i32)
}
