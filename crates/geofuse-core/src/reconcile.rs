// crates/geofuse-core/src/reconcile.rs

//! # Delta Reconciler
//!
//! Keeps a registry of live visual objects in step with the identity set a
//! filter pass produced, emitting the minimal add/remove instructions
//! instead of rebuilding the layer. Under rapid re-filtering (playback
//! ticks every ~150ms) the untouched majority of markers must stay
//! untouched.

use crate::model::db::FeatureId;
use std::collections::{HashMap, HashSet};

/// Instructions for one registry update. Both lists are sorted by id so
/// repeated runs over the same sets are byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDelta {
    pub to_add: Vec<FeatureId>,
    pub to_remove: Vec<FeatureId>,
}

impl RenderDelta {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Live visual objects keyed by stable feature identity, plus the one
/// piece of view-state the display owns: which marker is highlighted.
#[derive(Debug, Clone)]
pub struct MarkerRegistry<M> {
    markers: HashMap<FeatureId, M>,
    highlighted: Option<FeatureId>,
}

impl<M> Default for MarkerRegistry<M> {
    fn default() -> Self {
        MarkerRegistry {
            markers: HashMap::new(),
            highlighted: None,
        }
    }
}

impl<M> MarkerRegistry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn contains(&self, id: FeatureId) -> bool {
        self.markers.contains_key(&id)
    }

    pub fn get(&self, id: FeatureId) -> Option<&M> {
        self.markers.get(&id)
    }

    pub fn get_mut(&mut self, id: FeatureId) -> Option<&mut M> {
        self.markers.get_mut(&id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<FeatureId> {
        let mut ids: Vec<FeatureId> = self.markers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Diff the registry against the wanted identity set without touching
    /// it. Ids present on both sides produce no instruction.
    ///
    /// Runs in O(|registry| + |wanted|).
    pub fn reconcile(&self, wanted: &[FeatureId]) -> RenderDelta {
        let wanted_set: HashSet<FeatureId> = wanted.iter().copied().collect();
        let mut delta = RenderDelta::default();
        for id in self.markers.keys() {
            if !wanted_set.contains(id) {
                delta.to_remove.push(*id);
            }
        }
        for id in &wanted_set {
            if !self.markers.contains_key(id) {
                delta.to_add.push(*id);
            }
        }
        delta.to_add.sort_unstable();
        delta.to_remove.sort_unstable();
        delta
    }

    /// Apply the diff: tear down markers that fell out of the wanted set,
    /// build markers that entered it, leave the rest alone. Removing the
    /// highlighted marker clears the highlight.
    pub fn sync(
        &mut self,
        wanted: &[FeatureId],
        mut build: impl FnMut(FeatureId) -> M,
        mut teardown: impl FnMut(FeatureId, M),
    ) -> RenderDelta {
        let delta = self.reconcile(wanted);
        for id in &delta.to_remove {
            if let Some(marker) = self.markers.remove(id) {
                if self.highlighted == Some(*id) {
                    self.highlighted = None;
                }
                teardown(*id, marker);
            }
        }
        for id in &delta.to_add {
            let marker = build(*id);
            self.markers.insert(*id, marker);
        }
        delta
    }

    /// Mark a registered id as highlighted. Unregistered ids are refused
    /// so the highlight can never point at a dead marker.
    pub fn highlight(&mut self, id: FeatureId) -> bool {
        if self.markers.contains_key(&id) {
            self.highlighted = Some(id);
            true
        } else {
            false
        }
    }

    pub fn highlighted(&self) -> Option<FeatureId> {
        self.highlighted
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    /// Tear down everything.
    pub fn clear(&mut self, mut teardown: impl FnMut(FeatureId, M)) {
        for (id, marker) in self.markers.drain() {
            teardown(id, marker);
        }
        self.highlighted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[(u16, u32)]) -> Vec<FeatureId> {
        raw.iter().map(|(s, i)| FeatureId::new(*s, *i)).collect()
    }

    fn synced(wanted: &[(u16, u32)]) -> MarkerRegistry<String> {
        let mut registry = MarkerRegistry::new();
        registry.sync(&ids(wanted), |id| id.to_string(), |_, _| {});
        registry
    }

    #[test]
    fn reconcile_emits_minimal_instructions() {
        let registry = synced(&[(0, 1), (0, 2), (0, 3)]);
        let delta = registry.reconcile(&ids(&[(0, 2), (0, 3), (0, 4)]));
        assert_eq!(delta.to_add, ids(&[(0, 4)]));
        assert_eq!(delta.to_remove, ids(&[(0, 1)]));
    }

    #[test]
    fn identical_sets_produce_no_instructions() {
        let registry = synced(&[(0, 1), (1, 0)]);
        let delta = registry.reconcile(&ids(&[(1, 0), (0, 1)]));
        assert!(delta.is_empty());
    }

    #[test]
    fn sync_builds_and_tears_down_only_the_diff() {
        let mut registry = MarkerRegistry::new();
        let mut built = Vec::new();
        let mut torn = Vec::new();

        registry.sync(
            &ids(&[(0, 1), (0, 2)]),
            |id| {
                built.push(id);
                format!("marker {id}")
            },
            |id, _| torn.push(id),
        );
        assert_eq!(built, ids(&[(0, 1), (0, 2)]));
        assert!(torn.is_empty());

        built.clear();
        registry.sync(
            &ids(&[(0, 2), (0, 3)]),
            |id| {
                built.push(id);
                format!("marker {id}")
            },
            |id, _| torn.push(id),
        );
        assert_eq!(built, ids(&[(0, 3)]));
        assert_eq!(torn, ids(&[(0, 1)]));
        assert_eq!(registry.ids(), ids(&[(0, 2), (0, 3)]));
        assert_eq!(registry.get(FeatureId::new(0, 2)).map(String::as_str), Some("marker 0:2"));
    }

    #[test]
    fn empty_wanted_set_clears_the_registry() {
        let mut registry = synced(&[(0, 1), (0, 2)]);
        let delta = registry.sync(&[], |id| id.to_string(), |_, _| {});
        assert_eq!(delta.to_remove.len(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn highlight_requires_registration() {
        let mut registry = synced(&[(0, 1)]);
        assert!(registry.highlight(FeatureId::new(0, 1)));
        assert_eq!(registry.highlighted(), Some(FeatureId::new(0, 1)));
        assert!(!registry.highlight(FeatureId::new(9, 9)));
        // A refused highlight leaves the previous one in place.
        assert_eq!(registry.highlighted(), Some(FeatureId::new(0, 1)));
    }

    #[test]
    fn removing_the_highlighted_marker_clears_the_highlight() {
        let mut registry = synced(&[(0, 1), (0, 2)]);
        registry.highlight(FeatureId::new(0, 1));

        registry.sync(&ids(&[(0, 2)]), |id| id.to_string(), |_, _| {});
        assert_eq!(registry.highlighted(), None);

        // Surviving highlights are untouched.
        registry.highlight(FeatureId::new(0, 2));
        registry.sync(&ids(&[(0, 2), (0, 3)]), |id| id.to_string(), |_, _| {});
        assert_eq!(registry.highlighted(), Some(FeatureId::new(0, 2)));
    }

    #[test]
    fn clear_tears_down_everything() {
        let mut registry = synced(&[(0, 1), (0, 2), (0, 3)]);
        registry.highlight(FeatureId::new(0, 2));
        let mut torn = Vec::new();
        registry.clear(|id, _| torn.push(id));
        torn.sort_unstable();
        assert_eq!(torn, ids(&[(0, 1), (0, 2), (0, 3)]));
        assert!(registry.is_empty());
        assert_eq!(registry.highlighted(), None);
    }

    #[test]
    fn duplicate_wanted_ids_build_once() {
        let mut registry = MarkerRegistry::new();
        let mut builds = 0;
        registry.sync(
            &ids(&[(0, 1), (0, 1)]),
            |id| {
                builds += 1;
                id.to_string()
            },
            |_, _| {},
        );
        assert_eq!(builds, 1);
        assert_eq!(registry.len(), 1);
    }
}
