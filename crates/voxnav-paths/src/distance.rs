use voxnav_core::Point3;

/// Manhattan (L1) distance projected onto the horizontal XZ plane.
///
/// Vertical displacement is ignored. Computed in `i64` so any two points
/// have a representable distance.
#[inline]
pub fn horizontal_manhattan(a: Point3, b: Point3) -> i64 {
    (i64::from(a.x) - i64::from(b.x)).abs() + (i64::from(a.z) - i64::from(b.z)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_vertical() {
        let a = Point3::new(40, -4, -8);
        let b = Point3::new(-48, 12, -8);
        assert_eq!(horizontal_manhattan(a, b), 88);
        assert_eq!(horizontal_manhattan(a, a.shift(0, 400, 0)), 0);
        assert_eq!(horizontal_manhattan(Point3::ZERO, Point3::new(4, 4, -4)), 8);
    }

    #[test]
    fn far_apart_points() {
        let a = Point3::new(-2_000_000_000, 0, i32::MIN);
        let b = Point3::new(2_000_000_000, 0, i32::MAX);
        assert_eq!(
            horizontal_manhattan(a, b),
            4_000_000_000 + u32::MAX as i64
        );
    }
}
