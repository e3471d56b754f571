//! Search outputs: predecessor and cost maps plus run statistics.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use voxnav_core::Point3;

use crate::path::{PathError, reconstruct_path};

// ---------------------------------------------------------------------------
// PredecessorMap
// ---------------------------------------------------------------------------

/// For every visited position, the position it was reached from.
///
/// The origin maps to `None`. Positions that were never visited are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredecessorMap {
    map: HashMap<Point3, Option<Point3>>,
}

impl PredecessorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map containing only `origin`.
    pub fn seeded(origin: Point3) -> Self {
        let mut m = Self::new();
        m.map.insert(origin, None);
        m
    }

    /// Record `p` as reached from `from` unless it is already present.
    /// Returns whether the entry was inserted.
    pub fn discover(&mut self, p: Point3, from: Point3) -> bool {
        match self.map.entry(p) {
            Entry::Occupied(_) => false,
            Entry::Vacant(v) => {
                v.insert(Some(from));
                true
            }
        }
    }

    /// Set (or replace) the predecessor of `p`.
    pub fn set(&mut self, p: Point3, from: Option<Point3>) {
        self.map.insert(p, from);
    }

    /// Whether `p` was visited.
    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        self.map.contains_key(&p)
    }

    /// `None` when `p` was not visited, `Some(None)` for the origin.
    #[inline]
    pub fn get(&self, p: Point3) -> Option<Option<Point3>> {
        self.map.get(&p).copied()
    }

    /// The origin of the search, if the map has one.
    pub fn origin(&self) -> Option<Point3> {
        self.map
            .iter()
            .find_map(|(&p, from)| from.is_none().then_some(p))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(position, predecessor)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Point3, Option<Point3>)> + '_ {
        self.map.iter().map(|(&p, &from)| (p, from))
    }

    /// Route from `origin` to `goal`, both included, in travel order.
    ///
    /// `Ok(None)` when `goal` was not reached.
    pub fn path_to(&self, origin: Point3, goal: Point3) -> Result<Option<Vec<Point3>>, PathError> {
        let Some(mut route) = reconstruct_path(self, origin, goal)? else {
            return Ok(None);
        };
        route.push(origin);
        route.reverse();
        Ok(Some(route))
    }
}

impl FromIterator<(Point3, Option<Point3>)> for PredecessorMap {
    fn from_iter<I: IntoIterator<Item = (Point3, Option<Point3>)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// CostMap
// ---------------------------------------------------------------------------

/// Lowest cumulative cost found so far per visited position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostMap {
    map: HashMap<Point3, f64>,
}

impl CostMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, p: Point3) -> Option<f64> {
        self.map.get(&p).copied()
    }

    #[inline]
    pub fn contains(&self, p: Point3) -> bool {
        self.map.contains_key(&p)
    }

    #[inline]
    pub fn set(&mut self, p: Point3, cost: f64) {
        self.map.insert(p, cost);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point3, f64)> + '_ {
        self.map.iter().map(|(&p, &c)| (p, c))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PredecessorMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|&(p, _)| p);
        entries.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PredecessorMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(Point3, Option<Point3>)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CostMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|&(p, _)| p);
        entries.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CostMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(Point3, f64)>::deserialize(deserializer)?;
        Ok(Self {
            map: entries.into_iter().collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Frontier pops that were expanded or matched the goal. Stale
    /// priority-queue entries are not counted.
    pub pops: usize,
    /// Entries pushed onto the frontier, the origin included.
    pub pushes: usize,
    pub reached_goal: bool,
    /// The search stopped because its [`CancelToken`](crate::CancelToken)
    /// fired.
    pub cancelled: bool,
}

/// Output of a breadth-first search.
#[derive(Debug, Clone)]
pub struct Traversal {
    pub came_from: PredecessorMap,
    pub stats: SearchStats,
}

/// Output of Dijkstra or A*.
#[derive(Debug, Clone)]
pub struct WeightedTraversal {
    pub came_from: PredecessorMap,
    pub cost_so_far: CostMap,
    pub stats: SearchStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, z: i32) -> Point3 {
        Point3::new(x, 0, z)
    }

    #[test]
    fn discover_keeps_first() {
        let mut m = PredecessorMap::seeded(p(0, 0));
        assert!(m.discover(p(4, 0), p(0, 0)));
        assert!(!m.discover(p(4, 0), p(8, 0)));
        assert_eq!(m.get(p(4, 0)), Some(Some(p(0, 0))));
        assert!(!m.discover(p(0, 0), p(4, 0)));
        assert_eq!(m.get(p(0, 0)), Some(None));
        assert_eq!(m.get(p(8, 0)), None);
        assert_eq!(m.origin(), Some(p(0, 0)));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn path_to_includes_endpoints() {
        let mut m = PredecessorMap::seeded(p(0, 0));
        m.discover(p(4, 0), p(0, 0));
        m.discover(p(8, 0), p(4, 0));
        let route = m.path_to(p(0, 0), p(8, 0)).unwrap();
        assert_eq!(route, Some(vec![p(0, 0), p(4, 0), p(8, 0)]));
        assert_eq!(m.path_to(p(0, 0), p(0, 0)).unwrap(), Some(vec![p(0, 0)]));
        assert_eq!(m.path_to(p(0, 0), p(12, 0)).unwrap(), None);
    }

    #[test]
    fn cost_map_basics() {
        let mut c = CostMap::new();
        assert!(c.is_empty());
        c.set(p(0, 0), 0.0);
        c.set(p(4, 0), 20.0);
        c.set(p(4, 0), 2.0);
        assert_eq!(c.get(p(4, 0)), Some(2.0));
        assert!(c.contains(p(0, 0)));
        assert_eq!(c.len(), 2);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn predecessor_map_round_trip() {
        let mut m = PredecessorMap::seeded(Point3::new(0, 0, 0));
        m.discover(Point3::new(4, 4, 0), Point3::new(0, 0, 0));
        let json = serde_json::to_string(&m).unwrap();
        let back: PredecessorMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn search_stats_round_trip() {
        let stats = SearchStats {
            pops: 10,
            pushes: 14,
            reached_goal: true,
            cancelled: false,
        };
        let json = serde_json::to_string(&stats).unwrap();
        let back: SearchStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn cost_map_round_trip() {
        let mut c = CostMap::new();
        c.set(Point3::new(0, 0, 0), 0.0);
        c.set(Point3::new(0, 0, 4), 20.0);
        let json = serde_json::to_string(&c).unwrap();
        let back: CostMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
