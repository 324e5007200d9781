//! Ordered, capacity-bounded storage of sample points.

use tracing::debug;

use crate::config::{CapacityPolicy, SessionConfig};
use crate::types::{PointId, SamplePoint};

/// Outcome of a store mutation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    /// A new point was created.
    Added(PointId),
    /// An existing point was repositioned.
    Moved(PointId),
    /// A point was deleted.
    Removed(PointId),
    /// The oldest point made room for a new one.
    Evicted { evicted: PointId, added: PointId },
    /// All points were deleted.
    Cleared(usize),
    /// Nothing changed (store full, unknown id, non-finite coordinates).
    Ignored,
}

impl StoreChange {
    /// Whether the store contents changed.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, StoreChange::Ignored | StoreChange::Cleared(0))
    }

    /// The point created or moved by this change, if any.
    pub fn point_id(&self) -> Option<PointId> {
        match *self {
            StoreChange::Added(id) | StoreChange::Moved(id) => Some(id),
            StoreChange::Evicted { added, .. } => Some(added),
            _ => None,
        }
    }
}

/// The active sample points of one session, in creation order.
///
/// Cardinality never exceeds `max_points`. Identifiers are assigned from a
/// monotonically increasing counter and never reused after removal.
#[derive(Debug, Clone)]
pub struct PointStore {
    points: Vec<SamplePoint>,
    next_id: u32,
    max_points: usize,
    match_tolerance: f64,
    policy: CapacityPolicy,
}

impl PointStore {
    /// Create an empty store with the given capacity and default matching.
    pub fn new(max_points: usize) -> Self {
        Self::from_config(&SessionConfig {
            max_points,
            ..SessionConfig::default()
        })
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            points: Vec::with_capacity(config.max_points),
            next_id: 0,
            max_points: config.max_points,
            match_tolerance: config.match_tolerance,
            policy: config.capacity_policy,
        }
    }

    /// Add a point, or move the existing marker found at `(x, y)`.
    ///
    /// Returns the point's identifier, or `None` when the store is full and
    /// the click does not land on an existing marker.
    pub fn add_or_move(&mut self, x: f64, y: f64) -> Option<PointId> {
        self.click(x, y).point_id()
    }

    /// Same as [`PointStore::add_or_move`], reporting what changed.
    pub fn click(&mut self, x: f64, y: f64) -> StoreChange {
        if !x.is_finite() || !y.is_finite() {
            debug!(x, y, "ignoring click with non-finite coordinates");
            return StoreChange::Ignored;
        }

        let tolerance = self.match_tolerance;
        if let Some(point) = self.points.iter_mut().find(|p| p.matches(x, y, tolerance)) {
            point.x = x;
            point.y = y;
            debug!(id = %point.id, x, y, "moved existing point");
            return StoreChange::Moved(point.id);
        }

        if self.points.len() < self.max_points {
            let id = self.insert(x, y);
            return StoreChange::Added(id);
        }

        match self.policy {
            CapacityPolicy::Reject => {
                debug!(x, y, max_points = self.max_points, "store full, ignoring new point");
                StoreChange::Ignored
            }
            CapacityPolicy::EvictOldest if self.points.is_empty() => {
                debug!(x, y, "zero-capacity store, ignoring new point");
                StoreChange::Ignored
            }
            CapacityPolicy::EvictOldest => {
                let evicted = self.points.remove(0).id;
                let added = self.insert(x, y);
                debug!(%evicted, %added, "evicted oldest point");
                StoreChange::Evicted { evicted, added }
            }
        }
    }

    /// Reposition an existing point (a drag). No-op if the id is unknown.
    pub fn move_point(&mut self, id: PointId, x: f64, y: f64) -> StoreChange {
        if !x.is_finite() || !y.is_finite() {
            debug!(%id, x, y, "ignoring drag with non-finite coordinates");
            return StoreChange::Ignored;
        }

        match self.points.iter_mut().find(|p| p.id == id) {
            Some(point) => {
                point.x = x;
                point.y = y;
                debug!(%id, x, y, "dragged point");
                StoreChange::Moved(id)
            }
            None => StoreChange::Ignored,
        }
    }

    /// Delete a point if present.
    pub fn remove(&mut self, id: PointId) -> StoreChange {
        match self.points.iter().position(|p| p.id == id) {
            Some(index) => {
                self.points.remove(index);
                debug!(%id, remaining = self.points.len(), "removed point");
                StoreChange::Removed(id)
            }
            None => StoreChange::Ignored,
        }
    }

    /// Delete every point. Identifiers keep counting from where they were.
    pub fn clear(&mut self) -> StoreChange {
        let count = self.points.len();
        self.points.clear();
        StoreChange::Cleared(count)
    }

    /// Active points in creation order.
    pub fn list(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn get(&self, id: PointId) -> Option<&SamplePoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= self.max_points
    }

    fn insert(&mut self, x: f64, y: f64) -> PointId {
        let id = PointId(self.next_id);
        self.next_id += 1;
        self.points.push(SamplePoint::new(id, x, y));
        debug!(%id, x, y, count = self.points.len(), "added point");
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_coordinates_move_not_add() {
        let mut store = PointStore::new(10);
        let a = store.add_or_move(10.0, 20.0);
        let b = store.add_or_move(10.0, 20.0);
        assert_eq!(a, Some(PointId(0)));
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_eleventh_point_is_ignored() {
        let mut store = PointStore::new(10);
        for i in 0..10 {
            assert!(store.add_or_move(i as f64, 0.0).is_some());
        }
        assert_eq!(store.add_or_move(100.0, 100.0), None);
        assert_eq!(store.len(), 10);
        assert!(store.is_full());
    }

    #[test]
    fn test_click_on_marker_still_moves_when_full() {
        let mut store = PointStore::new(2);
        store.add_or_move(1.0, 1.0);
        store.add_or_move(2.0, 2.0);
        assert_eq!(store.click(2.0, 2.0), StoreChange::Moved(PointId(1)));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut store = PointStore::new(3);
        store.add_or_move(1.0, 1.0);
        store.add_or_move(2.0, 2.0);
        store.remove(PointId(1));
        assert_eq!(store.add_or_move(3.0, 3.0), Some(PointId(2)));

        store.clear();
        assert_eq!(store.add_or_move(4.0, 4.0), Some(PointId(3)));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = PointStore::new(3);
        store.add_or_move(1.0, 1.0);
        assert_eq!(store.remove(PointId(9)), StoreChange::Ignored);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_move_point_keeps_order_and_id() {
        let mut store = PointStore::new(3);
        store.add_or_move(1.0, 1.0);
        store.add_or_move(2.0, 2.0);
        assert_eq!(store.move_point(PointId(0), 5.0, 5.0), StoreChange::Moved(PointId(0)));

        let ids: Vec<_> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PointId(0), PointId(1)]);
        assert_eq!(store.get(PointId(0)).map(|p| (p.x, p.y)), Some((5.0, 5.0)));
        assert_eq!(store.move_point(PointId(7), 0.0, 0.0), StoreChange::Ignored);
    }

    #[test]
    fn test_non_finite_click_ignored() {
        let mut store = PointStore::new(3);
        assert_eq!(store.click(f64::NAN, 1.0), StoreChange::Ignored);
        assert_eq!(store.click(1.0, f64::INFINITY), StoreChange::Ignored);
        assert!(store.is_empty());
    }

    #[test]
    fn test_evict_oldest_policy() {
        let config = SessionConfig {
            max_points: 2,
            capacity_policy: CapacityPolicy::EvictOldest,
            ..SessionConfig::default()
        };
        let mut store = PointStore::from_config(&config);
        store.add_or_move(1.0, 1.0);
        store.add_or_move(2.0, 2.0);

        assert_eq!(
            store.click(3.0, 3.0),
            StoreChange::Evicted {
                evicted: PointId(0),
                added: PointId(2)
            }
        );
        let ids: Vec<_> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PointId(1), PointId(2)]);
    }

    #[test]
    fn test_zero_capacity_ignores_clicks() {
        for policy in [CapacityPolicy::Reject, CapacityPolicy::EvictOldest] {
            let config = SessionConfig {
                max_points: 0,
                capacity_policy: policy,
                ..SessionConfig::default()
            };
            let mut store = PointStore::from_config(&config);
            assert_eq!(store.click(1.0, 1.0), StoreChange::Ignored);
            assert!(store.is_empty());
        }
    }

    #[test]
    fn test_cleared_empty_store_is_not_a_mutation() {
        let mut store = PointStore::new(3);
        assert!(!store.clear().is_mutation());
        store.add_or_move(1.0, 1.0);
        assert!(store.clear().is_mutation());
    }
}
