//! Per-route activation result.

use indexmap::IndexMap;
use serde::Serialize;

use crate::routing::tree::RouteId;

/// Mapping of route id to "is highlighted", in route declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActivationResult {
    entries: IndexMap<RouteId, bool>,
}

impl ActivationResult {
    pub(crate) fn from_entries(entries: impl IntoIterator<Item = (RouteId, bool)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Whether `id` is active. Unknown ids are inactive.
    pub fn is_active(&self, id: &str) -> bool {
        self.entries.get(id).copied().unwrap_or(false)
    }

    /// Ids of every active route.
    pub fn active_ids(&self) -> Vec<&RouteId> {
        self.entries
            .iter()
            .filter(|&(_, &active)| active)
            .map(|(id, _)| id)
            .collect()
    }

    /// First active route in declaration order.
    pub fn first_active(&self) -> Option<&RouteId> {
        self.entries
            .iter()
            .find(|&(_, &active)| active)
            .map(|(id, _)| id)
    }

    pub fn any_active(&self) -> bool {
        self.entries.values().any(|&active| active)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouteId, bool)> {
        self.entries.iter().map(|(id, &active)| (id, active))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn set(&mut self, id: &str, active: bool) {
        if let Some(slot) = self.entries.get_mut(id) {
            *slot = active;
        }
    }
}
