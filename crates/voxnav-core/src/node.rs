//! Weighted navigation nodes.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::geom::Point3;

/// A weighted point in the navigation graph.
///
/// A node is immutable once built. Its `cost` is charged when a search
/// *enters* the node. The `payload` is an opaque handle owned by whoever
/// built the node (a voxel reference, a scene object id, ...); search code
/// never looks at it.
///
/// Identity is the position: two nodes at the same position compare and
/// hash equal regardless of cost or payload.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node<P = ()> {
    position: Point3,
    cost: f64,
    payload: P,
}

impl<P> Node<P> {
    /// Create a new node. `cost` must be finite and > 0.
    pub fn new(position: Point3, cost: f64, payload: P) -> Self {
        debug_assert!(
            cost.is_finite() && cost > 0.0,
            "node cost must be finite and positive, got {cost}"
        );
        Self {
            position,
            cost,
            payload,
        }
    }

    #[inline]
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Cost of entering this node.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consume the node and return its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Replace the payload, keeping position and cost.
    pub fn map_payload<Q>(self, f: impl FnOnce(P) -> Q) -> Node<Q> {
        Node {
            position: self.position,
            cost: self.cost,
            payload: f(self.payload),
        }
    }
}

impl Node<()> {
    /// A node without payload.
    pub fn bare(position: Point3, cost: f64) -> Self {
        Self::new(position, cost, ())
    }
}

impl<P> PartialEq for Node<P> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<P> Eq for Node<P> {}

impl<P> Hash for Node<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}

impl<P> fmt::Debug for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("position", &self.position)
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn node_round_trip() {
        let n = Node::new(Point3::new(0, 4, -4), 1.0, String::from("road"));
        let json = serde_json::to_string(&n).unwrap();
        let back: Node<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.position(), n.position());
        assert_eq!(back.cost(), n.cost());
        assert_eq!(back.payload(), n.payload());
    }
}
