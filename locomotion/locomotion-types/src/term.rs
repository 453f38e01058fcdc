//! Named term containers.
//!
//! Manager-based environments describe observations, events, rewards and
//! terminations as tables of named terms. A [`TermSet`] keeps one slot per
//! name; an empty slot is a term that has been removed, so the name stays
//! visible while the term no longer contributes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An ordered table of named, optionally-removed terms.
///
/// # Example
///
/// ```
/// use locomotion_types::TermSet;
///
/// let mut terms = TermSet::new();
/// terms.insert("track_lin_vel", 1.0);
/// terms.insert("lin_vel_z", -2.0);
/// terms.remove("lin_vel_z");
///
/// assert!(terms.contains("track_lin_vel"));
/// assert!(!terms.contains("lin_vel_z"));
/// assert_eq!(terms.names().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermSet<T> {
    slots: BTreeMap<String, Option<T>>,
}

impl<T> Default for TermSet<T> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<T> TermSet<T> {
    /// Create an empty term set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a term. Returns the previously active term, if any.
    pub fn insert(&mut self, name: impl Into<String>, term: T) -> Option<T> {
        self.slots.insert(name.into(), Some(term)).flatten()
    }

    /// Remove a term, keeping its slot. Returns the term that was active.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        match self.slots.get_mut(name) {
            Some(slot) => slot.take(),
            None => {
                self.slots.insert(name.to_owned(), None);
                None
            }
        }
    }

    /// Get an active term by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.slots.get(name).and_then(Option::as_ref)
    }

    /// Get a mutable reference to an active term by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.slots.get_mut(name).and_then(Option::as_mut)
    }

    /// Check whether a term with this name is active.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Check whether a slot exists for this name, active or removed.
    #[must_use]
    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Iterate over active terms in name order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &T)> {
        self.slots
            .iter()
            .filter_map(|(name, slot)| slot.as_ref().map(|term| (name.as_str(), term)))
    }

    /// Iterate over every slot name, including removed terms.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Number of active terms.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.values().filter(|slot| slot.is_some()).count()
    }

    /// Whether no term is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}

impl<T: Clone> TermSet<T> {
    /// Copy of this set where every term whose name does not start with
    /// `prefix` is removed. Slots are preserved.
    #[must_use]
    pub fn retain_prefix(&self, prefix: &str) -> Self {
        let slots = self
            .slots
            .iter()
            .map(|(name, slot)| {
                let kept = if name.starts_with(prefix) {
                    slot.clone()
                } else {
                    None
                };
                (name.clone(), kept)
            })
            .collect();
        Self { slots }
    }
}

impl<T, S: Into<String>> FromIterator<(S, T)> for TermSet<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self {
            slots: iter
                .into_iter()
                .map(|(name, term)| (name.into(), Some(term)))
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample() -> TermSet<i32> {
        [("track_a", 1), ("track_b", 2), ("penalty", 3)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_insert_replaces() {
        let mut terms = sample();
        assert_eq!(terms.insert("penalty", 4), Some(3));
        assert_eq!(terms.get("penalty"), Some(&4));
    }

    #[test]
    fn test_remove_keeps_slot() {
        let mut terms = sample();
        assert_eq!(terms.remove("penalty"), Some(3));
        assert!(!terms.contains("penalty"));
        assert!(terms.has_slot("penalty"));
        assert_eq!(terms.active_count(), 2);

        // Removing again is a no-op.
        assert_eq!(terms.remove("penalty"), None);
    }

    #[test]
    fn test_remove_unknown_creates_empty_slot() {
        let mut terms = sample();
        assert_eq!(terms.remove("height_scan"), None);
        assert!(terms.has_slot("height_scan"));
        assert!(!terms.contains("height_scan"));
    }

    #[test]
    fn test_reinsert_after_remove() {
        let mut terms = sample();
        terms.remove("penalty");
        assert_eq!(terms.insert("penalty", 7), None);
        assert_eq!(terms.get("penalty"), Some(&7));
    }

    #[test]
    fn test_retain_prefix() {
        let terms = sample();
        let filtered = terms.retain_prefix("track");

        assert_eq!(filtered.active_count(), 2);
        assert!(filtered.contains("track_a"));
        assert!(!filtered.contains("penalty"));
        assert!(filtered.has_slot("penalty"));

        // The source is untouched.
        assert!(terms.contains("penalty"));
    }

    #[test]
    fn test_active_order() {
        let mut terms = sample();
        terms.remove("track_a");
        let names: Vec<_> = terms.active().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["penalty", "track_b"]);
    }

    #[test]
    fn test_serde_shape() {
        let mut terms = sample();
        terms.remove("penalty");
        let json = serde_json::to_value(&terms).unwrap();
        assert_eq!(json["penalty"], serde_json::Value::Null);
        assert_eq!(json["track_a"], 1);

        let back: TermSet<i32> = serde_json::from_value(json).unwrap();
        assert_eq!(back, terms);
    }
}
