use voxnav_core::Point3;

/// Minimal search interface — provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point3, buf: &mut Vec<Point3>);
}

/// Pather whose vertices carry a positive entry cost.
pub trait WeightedPather: Pather {
    /// Cost charged for entering `p`. Must be > 0 for every position
    /// returned by [`Pather::neighbors`].
    fn entry_cost(&self, p: Point3) -> f64;
}
