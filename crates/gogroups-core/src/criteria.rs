//! Per-field substring filters over group records.

use std::fmt;
use std::str::FromStr;

use crate::group::GroupRecord;

/// The fields a user can filter the group list by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    Name,
    City,
    Country,
    Continent,
}

impl FilterField {
    /// Every filterable field, in display order.
    pub const ALL: [FilterField; 4] = [
        FilterField::Name,
        FilterField::City,
        FilterField::Country,
        FilterField::Continent,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::Name => "Name",
            FilterField::City => "City",
            FilterField::Country => "Country",
            FilterField::Continent => "Continent",
        }
    }

    /// The value of this field on a record.
    #[must_use]
    pub fn value_of(self, group: &GroupRecord) -> &str {
        match self {
            FilterField::Name => &group.name,
            FilterField::City => &group.city,
            FilterField::Country => &group.country,
            FilterField::Continent => &group.continent,
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown filter field '{s}'"))
    }
}

/// The active set of per-field filters.
///
/// A field is `Some` only while it holds a non-empty filter; an empty value
/// means "no constraint", never "must be empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
}

impl SearchCriteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Sets a field's filter. An empty value clears the field.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        *self.slot_mut(field) = if value.is_empty() { None } else { Some(value) };
    }

    /// Drops any field left holding an empty string.
    ///
    /// The public fields can be assigned directly, so `Some("")` is
    /// reachable; this restores the "present only while non-empty" rule.
    pub fn prune_empty(&mut self) {
        for field in FilterField::ALL {
            let slot = self.slot_mut(field);
            if slot.as_deref() == Some("") {
                *slot = None;
            }
        }
    }

    /// Active `(field, value)` pairs in [`FilterField::ALL`] order.
    pub fn active(&self) -> impl Iterator<Item = (FilterField, &str)> + '_ {
        FilterField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// True when every active filter is a case-insensitive substring of the
    /// corresponding field.
    #[must_use]
    pub fn matches(&self, group: &GroupRecord) -> bool {
        self.active().all(|(field, needle)| {
            if needle.is_empty() {
                return true;
            }
            field
                .value_of(group)
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }

    fn slot(&self, field: FilterField) -> &Option<String> {
        match field {
            FilterField::Name => &self.name,
            FilterField::City => &self.city,
            FilterField::Country => &self.country,
            FilterField::Continent => &self.continent,
        }
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::Name => &mut self.name,
            FilterField::City => &mut self.city,
            FilterField::Country => &mut self.country,
            FilterField::Continent => &mut self.continent,
        }
    }
}
