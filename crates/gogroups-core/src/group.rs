//! Group records as returned by `GET /api/groups`.
//!
//! ## Observed wire shapes
//!
//! ### Field names
//! Keys are `PascalCase` (`Name`, `URL`, `Members`, ...). The oldest servers
//! sent the group page as `Link`; it is accepted as an alias of `URL`.
//!
//! ### `Members`
//! Usually a JSON integer. Older payloads occasionally omit it, send `null`,
//! or send it as a string (`""`, `"194"`). Absent, `null` and empty all count
//! as zero members; a numeric string is parsed.
//!
//! ### `Lat` / `Lon`
//! Only present in the legacy shape and in catalogs that carry coordinates.
//! Modeled as `Option<f64>` and skipped on output when absent.

use serde::{Deserialize, Deserializer, Serialize};

/// One user group's display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupRecord {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "URL", alias = "Link", default)]
    pub url: String,

    #[serde(default, deserialize_with = "members_or_zero")]
    pub members: u64,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub country: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub continent: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl GroupRecord {
    /// Returns the group's coordinates when it has a known location.
    ///
    /// A group with no coordinates, a non-finite coordinate, or sitting
    /// exactly on `(0, 0)` has no known location. A single zero coordinate is
    /// a real position.
    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon))
                if lat.is_finite() && lon.is_finite() && (lat != 0.0 || lon != 0.0) =>
            {
                Some((lat, lon))
            }
            _ => None,
        }
    }
}

fn members_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            D::Error::custom(format!("Members must be a non-negative integer, got {n}"))
        }),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| D::Error::custom(format!("invalid Members {s:?}: {e}"))),
        other => Err(D::Error::custom(format!(
            "Members must be a number, got {other}"
        ))),
    }
}
