/// How Dijkstra and A* decide whether a newly found route to a neighbor
/// replaces the recorded one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relaxation {
    /// Replace when `new_cost < cost_so_far[neighbor]`.
    #[default]
    Canonical,
    /// Replace when the neighbor is unseen or `new_cost < cost_so_far[current]`.
    ///
    /// With positive entry costs the second clause never holds, so the first
    /// route to reach a node is kept. A* under this rule can settle on a
    /// costlier route than [`Canonical`](Self::Canonical).
    Legacy,
}

/// Tuning knobs for the weighted searches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub relaxation: Relaxation,
    /// Multiplier applied to [`horizontal_manhattan`](crate::horizontal_manhattan)
    /// in A*. The estimate is admissible when every step costs at least
    /// `step * heuristic_weight`; use `1.0 / step` for unit node costs.
    pub heuristic_weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            relaxation: Relaxation::Canonical,
            heuristic_weight: 1.0,
        }
    }
}

impl SearchConfig {
    /// Config whose A* estimate counts lateral steps on a grid of the given
    /// step, admissible for node costs >= 1.
    pub fn unit_steps(step: i32) -> Self {
        Self {
            heuristic_weight: 1.0 / f64::from(step.max(1)),
            ..Self::default()
        }
    }

    /// Same config with a different relaxation rule.
    pub fn with_relaxation(mut self, relaxation: Relaxation) -> Self {
        self.relaxation = relaxation;
        self
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = SearchConfig::unit_steps(4).with_relaxation(Relaxation::Legacy);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
