use gridstar_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible and consistent for unit-cost 4-directional movement, which is
/// what [`Search`](crate::Search) expands.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
