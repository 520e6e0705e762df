//! The `/api/groups` response envelope.
//!
//! Two shapes have been served over time:
//!
//! - legacy: `{"Groups": [...], "Error": "<string>"}` with groups carrying
//!   `Link`, `Lat` and `Lon`;
//! - current: `{"Groups": [...], "Errors": ["<string>", ...]}` with groups
//!   carrying `URL`.
//!
//! Both decode into [`GroupsPayload`] through a single wire struct so the
//! shape is decided in exactly one place. Groups are decoded one entry at a
//! time: an entry that does not decode is reported as an
//! `entry <n>: <reason>` error and the remaining groups are kept.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::group::GroupRecord;

/// A decoded groups response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WirePayload")]
pub enum GroupsPayload {
    Current {
        groups: Vec<GroupRecord>,
        errors: Vec<String>,
    },
    Legacy {
        groups: Vec<GroupRecord>,
        error: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WirePayload {
    #[serde(default)]
    groups: Option<Vec<Value>>,
    // Outer Option: key present; inner Option: value non-null.
    #[serde(default, deserialize_with = "present")]
    errors: Option<Option<Vec<String>>>,
    #[serde(default)]
    error: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Decodes each group entry on its own, collecting one message per entry
/// that fails.
fn decode_groups(entries: Vec<Value>) -> (Vec<GroupRecord>, Vec<String>) {
    let mut groups = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    for (i, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<GroupRecord>(entry) {
            Ok(group) => groups.push(group),
            Err(e) => {
                tracing::warn!(entry = i + 1, error = %e, "dropping undecodable group");
                rejected.push(format!("entry {}: {e}", i + 1));
            }
        }
    }
    (groups, rejected)
}

impl From<WirePayload> for GroupsPayload {
    fn from(wire: WirePayload) -> Self {
        let (groups, rejected) = decode_groups(wire.groups.unwrap_or_default());
        match (wire.errors, wire.error) {
            (Some(errors), legacy) => {
                let mut errors = errors.unwrap_or_default();
                errors.extend(legacy.filter(|e| !e.is_empty()));
                errors.extend(rejected);
                GroupsPayload::Current { groups, errors }
            }
            (None, Some(error)) => {
                let messages: Vec<String> = std::iter::once(error)
                    .filter(|e| !e.is_empty())
                    .chain(rejected)
                    .collect();
                GroupsPayload::legacy(groups, &messages)
            }
            (None, None) => GroupsPayload::Current {
                groups,
                errors: rejected,
            },
        }
    }
}

impl GroupsPayload {
    #[must_use]
    pub fn current(groups: Vec<GroupRecord>, errors: Vec<String>) -> Self {
        GroupsPayload::Current { groups, errors }
    }

    /// Builds a legacy payload, folding many errors into the single
    /// `Error` string.
    #[must_use]
    pub fn legacy(groups: Vec<GroupRecord>, errors: &[String]) -> Self {
        let error = if errors.is_empty() {
            None
        } else {
            Some(errors.join("\n"))
        };
        GroupsPayload::Legacy { groups, error }
    }

    /// Splits the payload into its groups and its error messages.
    ///
    /// An empty legacy `Error` string yields no message.
    #[must_use]
    pub fn into_parts(self) -> (Vec<GroupRecord>, Vec<String>) {
        match self {
            GroupsPayload::Current { groups, errors } => (groups, errors),
            GroupsPayload::Legacy { groups, error } => {
                (groups, error.into_iter().filter(|e| !e.is_empty()).collect())
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CurrentOut<'a> {
    groups: &'a [GroupRecord],
    errors: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LegacyOut<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    groups: Vec<LegacyGroup<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct LegacyGroup<'a> {
    name: &'a str,
    link: &'a str,
    members: u64,
    city: &'a str,
    country: &'a str,
    lat: f64,
    lon: f64,
}

impl<'a> From<&'a GroupRecord> for LegacyGroup<'a> {
    fn from(g: &'a GroupRecord) -> Self {
        Self {
            name: &g.name,
            link: &g.url,
            members: g.members,
            city: &g.city,
            country: &g.country,
            lat: g.lat.unwrap_or_default(),
            lon: g.lon.unwrap_or_default(),
        }
    }
}

impl Serialize for GroupsPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupsPayload::Current { groups, errors } => {
                CurrentOut { groups, errors }.serialize(serializer)
            }
            GroupsPayload::Legacy { groups, error } => LegacyOut {
                groups: groups.iter().map(LegacyGroup::from).collect(),
                error: error.as_deref().filter(|e| !e.is_empty()),
            }
            .serialize(serializer),
        }
    }
}
