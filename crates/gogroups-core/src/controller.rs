//! Client-side state for the group list: the fetched groups, the active
//! filters, the derived filtered view, and the error log shown to the user.

use crate::criteria::{FilterField, SearchCriteria};
use crate::error_log::ErrorLog;
use crate::group::GroupRecord;
use crate::map::{MapRenderer, MarkerMap};
use crate::source::DataSource;

/// Bridges the fetched group list and the rendered view.
///
/// The filtered view is always a function of the group list and the search
/// criteria; it is recomputed by [`refilter`](Self::refilter) and never
/// edited directly.
#[derive(Debug)]
pub struct GroupListController<M = MarkerMap> {
    groups: Vec<GroupRecord>,
    search: SearchCriteria,
    filtered: Vec<GroupRecord>,
    errors: ErrorLog,
    map: Option<M>,
}

impl GroupListController {
    /// A controller with no map wired in.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            search: SearchCriteria::new(),
            filtered: Vec::new(),
            errors: ErrorLog::new(),
            map: None,
        }
    }
}

impl Default for GroupListController {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MapRenderer> GroupListController<M> {
    /// A controller that plots the filtered view on `map` after every refilter.
    #[must_use]
    pub fn with_map(map: M) -> Self {
        Self {
            groups: Vec::new(),
            search: SearchCriteria::new(),
            filtered: Vec::new(),
            errors: ErrorLog::new(),
            map: Some(map),
        }
    }

    /// Fetches the group list once from `source`.
    ///
    /// On success the list is replaced, each payload error is logged in
    /// order, and the view is refiltered. On failure the failure text is
    /// logged as a single entry and the previous list is kept.
    pub async fn load_groups<S: DataSource>(&mut self, source: &S) {
        match source.fetch_groups().await {
            Ok(payload) => {
                let (groups, errors) = payload.into_parts();
                tracing::info!(
                    groups = groups.len(),
                    errors = errors.len(),
                    "group list loaded"
                );
                self.groups = groups;
                for error in errors {
                    self.log(error);
                }
                self.refilter();
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "group list fetch failed");
                self.log(message);
            }
        }
    }

    /// Recomputes the filtered view from the group list and search criteria,
    /// then hands it to the map if one is wired in.
    pub fn refilter(&mut self) {
        self.search.prune_empty();
        self.filtered = self
            .groups
            .iter()
            .filter(|g| self.search.matches(g))
            .cloned()
            .collect();
        tracing::debug!(
            total = self.groups.len(),
            shown = self.filtered.len(),
            "refiltered group list"
        );
        if let Some(map) = self.map.as_mut() {
            map.render(&self.filtered);
        }
    }

    /// Applies a user edit to one filter field and refilters.
    ///
    /// An empty value removes the field's constraint.
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.search.set(field, value);
        self.refilter();
    }

    /// Replaces every filter at once and refilters.
    pub fn set_search(&mut self, search: SearchCriteria) {
        self.search = search;
        self.refilter();
    }

    /// Sum of `Members` over the filtered view, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_members(&self) -> u64 {
        self.filtered
            .iter()
            .fold(0_u64, |total, g| total.saturating_add(g.members))
    }

    /// Appends a message to the error log.
    pub fn log(&mut self, message: impl Into<String>) {
        self.errors.push(message);
    }

    #[must_use]
    pub fn groups(&self) -> &[GroupRecord] {
        &self.groups
    }

    #[must_use]
    pub fn filtered(&self) -> &[GroupRecord] {
        &self.filtered
    }

    #[must_use]
    pub fn search(&self) -> &SearchCriteria {
        &self.search
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    #[must_use]
    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
