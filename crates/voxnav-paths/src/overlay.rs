//! Text overlay of search results.
//!
//! Renders one horizontal layer of a [`NavGrid`] with an arrow on every
//! visited node pointing at its predecessor, and the reconstructed route
//! marked on top. Only positions and relations are read.

use std::collections::{BTreeMap, HashSet};

use voxnav_core::Point3;

use crate::NavGrid;
use crate::traversal::PredecessorMap;

/// Compass direction of a step, as seen from above. North is −z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Up,
    Down,
}

impl Direction {
    /// Classify the step from `from` to `to`.
    ///
    /// Only the sign of each axis matters. Any horizontal movement wins over
    /// vertical movement; `None` when both positions are equal.
    pub fn between(from: Point3, to: Point3) -> Option<Self> {
        let d = (to - from).signum();
        let dir = match (d.x, d.z) {
            (1, 1) => Self::SouthEast,
            (-1, 1) => Self::SouthWest,
            (1, -1) => Self::NorthEast,
            (-1, -1) => Self::NorthWest,
            (1, _) => Self::East,
            (-1, _) => Self::West,
            (_, 1) => Self::South,
            (_, -1) => Self::North,
            _ => match d.y {
                1 => Self::Up,
                -1 => Self::Down,
                _ => return None,
            },
        };
        Some(dir)
    }

    /// Arrow glyph for this direction.
    pub fn glyph(self) -> char {
        match self {
            Self::North => '↑',
            Self::NorthEast => '↗',
            Self::East => '→',
            Self::SouthEast => '↘',
            Self::South => '↓',
            Self::SouthWest => '↙',
            Self::West => '←',
            Self::NorthWest => '↖',
            Self::Up => '⇡',
            Self::Down => '⇣',
        }
    }
}

/// Direction from every visited node toward its predecessor.
///
/// The origin and nodes sharing a position with their predecessor are left
/// out.
pub fn direction_field(came_from: &PredecessorMap) -> BTreeMap<Point3, Direction> {
    came_from
        .iter()
        .filter_map(|(p, from)| {
            let prev = from?;
            Direction::between(p, prev).map(|d| (p, d))
        })
        .collect()
}

/// Glyph overlay over a grid and a finished search.
pub struct Overlay<'a, P> {
    grid: &'a NavGrid<P>,
    field: BTreeMap<Point3, Direction>,
    route: Vec<Point3>,
    on_route: HashSet<Point3>,
}

impl<'a, P> Overlay<'a, P> {
    /// Overlay showing the directions recorded in `came_from`.
    pub fn new(grid: &'a NavGrid<P>, came_from: &PredecessorMap) -> Self {
        Self {
            grid,
            field: direction_field(came_from),
            route: Vec::new(),
            on_route: HashSet::new(),
        }
    }

    /// Mark a route, origin first. The first position renders as `O`, the
    /// last as `G`, the rest as `*`.
    pub fn with_route(mut self, route: &[Point3]) -> Self {
        self.route = route.to_vec();
        self.on_route = route.iter().copied().collect();
        self
    }

    /// Distinct `y` values holding at least one node, ascending.
    pub fn layers(&self) -> Vec<i32> {
        let mut ys: Vec<i32> = self.grid.iter().map(|n| n.position().y).collect();
        ys.sort_unstable();
        ys.dedup();
        ys
    }

    /// Character shown for position `p`.
    pub fn cell(&self, p: Point3) -> char {
        if self.route.first() == Some(&p) {
            return 'O';
        }
        if self.route.last() == Some(&p) {
            return 'G';
        }
        if self.on_route.contains(&p) {
            return '*';
        }
        if let Some(d) = self.field.get(&p) {
            return d.glyph();
        }
        if self.grid.contains(p) { '.' } else { ' ' }
    }

    /// Render layer `y` as rows of constant z (north first), one column per
    /// grid step in x. Empty when the grid is empty.
    pub fn render_layer(&self, y: i32) -> Vec<String> {
        let Some((min, max)) = self.grid.bounds() else {
            return Vec::new();
        };
        let step = self.grid.step() as usize;
        (min.z..=max.z)
            .step_by(step)
            .map(|z| {
                (min.x..=max.x)
                    .step_by(step)
                    .map(|x| self.cell(Point3::new(x, y, z)))
                    .collect::<String>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxnav_core::Node;

    fn p(x: i32, y: i32, z: i32) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn classifies_steps() {
        let o = Point3::ZERO;
        assert_eq!(Direction::between(o, p(4, 0, 4)), Some(Direction::SouthEast));
        assert_eq!(Direction::between(o, p(-4, 0, 4)), Some(Direction::SouthWest));
        assert_eq!(Direction::between(o, p(4, 0, -4)), Some(Direction::NorthEast));
        assert_eq!(Direction::between(o, p(-4, 0, -4)), Some(Direction::NorthWest));
        assert_eq!(Direction::between(o, p(4, 4, 0)), Some(Direction::East));
        assert_eq!(Direction::between(o, p(-4, -4, 0)), Some(Direction::West));
        assert_eq!(Direction::between(o, p(0, 0, 4)), Some(Direction::South));
        assert_eq!(Direction::between(o, p(0, 4, -4)), Some(Direction::North));
        assert_eq!(Direction::between(o, p(0, 4, 0)), Some(Direction::Up));
        assert_eq!(Direction::between(o, p(0, -4, 0)), Some(Direction::Down));
        assert_eq!(Direction::between(o, o), None);
        assert_eq!(Direction::East.glyph(), '→');
    }

    #[test]
    fn field_points_at_predecessors() {
        let mut m = PredecessorMap::seeded(p(0, 0, 0));
        m.discover(p(4, 0, 0), p(0, 0, 0));
        m.discover(p(4, 0, 4), p(4, 0, 0));
        let field = direction_field(&m);
        assert_eq!(field.len(), 2);
        assert_eq!(field[&p(4, 0, 0)], Direction::West);
        assert_eq!(field[&p(4, 0, 4)], Direction::North);
    }

    #[test]
    fn renders_layer() {
        let mut g: NavGrid = NavGrid::new();
        for x in 0..3 {
            for z in 0..2 {
                g.add_node(Node::bare(p(4 * x, 0, 4 * z), 1.0));
            }
        }
        g.remove(p(8, 0, 0));
        g.add_node(Node::bare(p(0, 4, 8), 1.0));
        // Only reachable through the goal, which is never expanded.
        g.add_node(Node::bare(p(8, 4, 8), 1.0));

        let origin = g.node(p(0, 0, 0)).unwrap();
        let goal = g.node(p(8, 0, 4)).unwrap();
        let t = g.breadth_first_search(origin, goal);
        let route = t
            .came_from
            .path_to(origin.position(), goal.position())
            .unwrap()
            .unwrap();

        let overlay = Overlay::new(&g, &t.came_from).with_route(&route);
        assert_eq!(overlay.layers(), vec![0, 4]);

        let rows = overlay.render_layer(0);
        // Bounds span z 0..=8, so three rows.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].chars().count(), 3);
        assert_eq!(rows[0].chars().next(), Some('O'));
        assert_eq!(rows[0].chars().nth(2), Some(' '));
        assert_eq!(rows[1].chars().nth(2), Some('G'));
        assert!(rows[2].chars().all(|c| c == ' '));
        assert_eq!(rows[0], "O← ");
        assert_eq!(rows[1], "**G");
        assert_eq!(overlay.render_layer(4)[2], "↑ .");
    }

    #[test]
    fn empty_grid_renders_nothing() {
        let g: NavGrid = NavGrid::new();
        let overlay = Overlay::new(&g, &PredecessorMap::new());
        assert!(overlay.render_layer(0).is_empty());
        assert!(overlay.layers().is_empty());
    }
}
