//! The YAML group catalog served by `/api/groups`.
//!
//! ```yaml
//! groups:
//!   - name: GoSV
//!     url: http://www.meetup.com/golangsv
//!     members: 194
//!     city: San Mateo
//!     country: US
//!     lat: 37.56
//!     lon: -122.32
//! ```
//!
//! Entries are decoded one at a time: a malformed entry becomes an error
//! message for the response instead of failing the whole catalog.

use std::collections::HashMap;
use std::future::{ready, Future};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::continents::continent_for;
use crate::group::GroupRecord;
use crate::payload::GroupsPayload;
use crate::source::DataSource;
use crate::ConfigError;

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    groups: Vec<serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
    #[serde(alias = "link")]
    url: String,
    #[serde(default)]
    members: u64,
    #[serde(default)]
    city: String,
    #[serde(default)]
    country: String,
    continent: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Groups decoded from a catalog plus one message per rejected entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub groups: Vec<GroupRecord>,
    pub errors: Vec<String>,
}

impl Catalog {
    #[must_use]
    pub fn into_payload(self) -> GroupsPayload {
        GroupsPayload::current(self.groups, self.errors)
    }
}

/// Read and decode a catalog file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or is not a YAML mapping
/// with a `groups` list. Problems with individual entries are reported in
/// [`Catalog::errors`] instead.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&content)
}

/// Decode catalog YAML.
///
/// Entries are de-duplicated by URL: a later entry replaces an earlier one
/// but keeps the earlier one's position. Continents missing from an entry
/// are filled from the country code.
///
/// # Errors
///
/// Returns [`ConfigError::CatalogParse`] if the document itself is invalid.
pub fn parse_catalog(content: &str) -> Result<Catalog, ConfigError> {
    let raw: RawCatalog = serde_yaml::from_str(content)?;

    let mut catalog = Catalog::default();
    let mut by_url: HashMap<String, usize> = HashMap::new();

    for (i, value) in raw.groups.into_iter().enumerate() {
        let entry_no = i + 1;
        let entry: CatalogEntry = match serde_yaml::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                catalog.errors.push(format!("entry {entry_no}: {e}"));
                continue;
            }
        };

        if let Err(reason) = validate_entry(&entry) {
            catalog.errors.push(format!("entry {entry_no}: {reason}"));
            continue;
        }

        let group = into_group(entry);
        if let Some(&slot) = by_url.get(&group.url) {
            tracing::debug!(url = %group.url, entry = entry_no, "duplicate catalog url; replacing");
            catalog.groups[slot] = group;
        } else {
            by_url.insert(group.url.clone(), catalog.groups.len());
            catalog.groups.push(group);
        }
    }

    Ok(catalog)
}

fn validate_entry(entry: &CatalogEntry) -> Result<(), String> {
    if entry.name.trim().is_empty() {
        return Err("group name must be non-empty".to_string());
    }
    if entry.url.trim().is_empty() {
        return Err(format!("group '{}' has an empty url", entry.name));
    }
    Ok(())
}

fn into_group(entry: CatalogEntry) -> GroupRecord {
    let continent = match entry.continent.filter(|c| !c.trim().is_empty()) {
        Some(c) => c,
        None => continent_for(&entry.country).map_or_else(
            || {
                tracing::warn!(
                    group = %entry.name,
                    country = %entry.country,
                    "no continent known for country"
                );
                String::new()
            },
            str::to_string,
        ),
    };

    GroupRecord {
        name: entry.name,
        url: entry.url,
        members: entry.members,
        city: entry.city,
        country: entry.country,
        continent,
        lat: entry.lat,
        lon: entry.lon,
    }
}

/// A catalog file used directly as a [`DataSource`], bypassing HTTP.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for CatalogFile {
    type Error = ConfigError;

    fn fetch_groups(&self) -> impl Future<Output = Result<GroupsPayload, ConfigError>> + Send {
        ready(load_catalog(&self.path).map(Catalog::into_payload))
    }
}
