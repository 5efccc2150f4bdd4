//! Normalisation and outline helpers used when handing clusters to a renderer.
//!
//! All helpers are total. Degenerate inputs (flat axes, fewer than three
//! vertices) fall back to a defined result instead of failing.

use alloc::vec::Vec;

use crate::cloud::Point;

/// Default tension for [`smooth_polygon`] (the classic four-point scheme).
pub const DEFAULT_TENSION: f64 = 1.0 / 16.0;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Smallest x.
    pub min_x: f64,
    /// Largest x.
    pub max_x: f64,
    /// Smallest y.
    pub min_y: f64,
    /// Largest y.
    pub max_y: f64,
}

impl Bounds {
    /// Tight bounds of `points`; `None` for an empty slice.
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(points.iter().fold(init, |b, p| Self {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }
}

/// Min-max scale `v` from `[lo, hi]` into `[0, 1]`; a flat axis maps to 0.
fn scale(v: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span == 0.0 {
        0.0
    } else {
        (v - lo) / span
    }
}

/// Copies of `points` with coordinates min-max scaled into `[0, 1]` by `bounds`.
///
/// Ids and paths are preserved. An axis with `max == min` maps every value
/// on it to `0`.
pub fn normalize(points: &[Point], bounds: &Bounds) -> Vec<Point> {
    points
        .iter()
        .map(|p| Point {
            id: p.id,
            x: scale(p.x, bounds.min_x, bounds.max_x),
            y: scale(p.y, bounds.min_y, bounds.max_y),
            path: p.path.clone(),
        })
        .collect()
}

fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

/// Convex hull (Andrew's monotone chain), counter-clockwise, starting from the
/// lowest-x (then lowest-y) vertex. Collinear boundary points are dropped.
///
/// Fewer than three input vertices are returned unchanged. Input that
/// collapses to fewer than three distinct vertices yields those vertices, so
/// a cluster of identical points keeps a one-vertex outline.
pub fn convex_hull(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let mut hull: Vec<(f64, f64)> = Vec::with_capacity(sorted.len() * 2);
    // lower chain
    for &p in &sorted {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    // upper chain
    let lower_len = hull.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Hull of a set of points, e.g. a cluster's members.
pub fn member_hull<'a, I>(members: I) -> Vec<(f64, f64)>
where
    I: IntoIterator<Item = &'a Point>,
{
    let coords: Vec<(f64, f64)> = members.into_iter().map(Point::position).collect();
    convex_hull(&coords)
}

/// Insert one point between every pair of consecutive vertices of a closed
/// polygon, using the four-point subdivision rule
///
/// ```text
/// q = (½ + w)(pᵢ + pᵢ₊₁) − w(pᵢ₋₁ + pᵢ₊₂)
/// ```
///
/// with `w = tension`. `w = 0` gives plain midpoints; [`DEFAULT_TENSION`]
/// gives the smooth classic curve. Output has `2n` vertices, originals at
/// even positions. Fewer than three vertices are returned unchanged.
pub fn smooth_polygon(vertices: &[(f64, f64)], tension: f64) -> Vec<(f64, f64)> {
    let n = vertices.len();
    if n < 3 {
        return vertices.to_vec();
    }

    let mut out = Vec::with_capacity(2 * n);
    for i in 0..n {
        let prev = vertices[(i + n - 1) % n];
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let next = vertices[(i + 2) % n];
        let inner = 0.5 + tension;
        out.push(a);
        out.push((
            inner * (a.0 + b.0) - tension * (prev.0 + next.0),
            inner * (a.1 + b.1) - tension * (prev.1 + next.1),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_two_points() {
        let pts = [Point::new(0, 0.0, 0.0), Point::new(1, 10.0, 10.0)];
        let b = Bounds::of(&pts).expect("non-empty");
        let n = normalize(&pts, &b);
        assert_eq!(n[0].position(), (0.0, 0.0));
        assert_eq!(n[1].position(), (1.0, 1.0));
    }

    #[test]
    fn test_normalize_flat_axis_maps_to_zero() {
        let pts = [Point::new(0, 3.0, 5.0), Point::new(1, 7.0, 5.0)];
        let b = Bounds::of(&pts).expect("non-empty");
        let n = normalize(&pts, &b);
        assert_eq!(n[0].y, 0.0);
        assert_eq!(n[1].y, 0.0);
        assert_eq!(n[1].x, 1.0);
    }

    #[test]
    fn test_normalize_keeps_ids_and_paths() {
        let mut p = Point::new(9, 2.0, 4.0);
        p.path = alloc::vec![1, 0];
        let b = Bounds { min_x: 0.0, max_x: 4.0, min_y: 0.0, max_y: 8.0 };
        let n = normalize(&[p], &b);
        assert_eq!(n[0].id, 9);
        assert_eq!(n[0].path, [1, 0]);
        assert_eq!(n[0].position(), (0.5, 0.5));
    }

    #[test]
    fn test_bounds_of_empty() {
        assert!(Bounds::of(&[]).is_none());
    }

    #[test]
    fn test_hull_of_square_with_interior_point() {
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.5, 0.5), (0.5, 0.0)];
        let hull = convex_hull(&pts);
        assert_eq!(hull, [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    }

    #[test]
    fn test_hull_short_input_unchanged() {
        let pts = [(3.0, 1.0), (0.0, 0.0)];
        assert_eq!(convex_hull(&pts), pts);
    }

    #[test]
    fn test_hull_of_identical_points_keeps_the_point() {
        let pts = [(1.0, 2.0); 5];
        assert_eq!(convex_hull(&pts), [(1.0, 2.0)]);
    }

    #[test]
    fn test_hull_of_two_distinct_points_after_dedup() {
        let pts = [(2.0, 0.0), (0.0, 0.0), (2.0, 0.0), (0.0, 0.0)];
        assert_eq!(convex_hull(&pts), [(0.0, 0.0), (2.0, 0.0)]);
    }

    #[test]
    fn test_hull_of_collinear_points_is_segment() {
        let pts = [(0.0, 0.0), (3.0, 3.0), (1.0, 1.0), (2.0, 2.0)];
        assert_eq!(convex_hull(&pts), [(0.0, 0.0), (3.0, 3.0)]);
    }

    #[test]
    fn test_hull_contains_all_points() {
        let cloud = crate::cloud::generate(300, 8);
        let hull = member_hull(cloud.iter());
        assert!(hull.len() >= 3);
        let n = hull.len();
        for p in &cloud {
            for i in 0..n {
                let c = cross(hull[i], hull[(i + 1) % n], p.position());
                assert!(c >= -1e-9, "point {} outside hull edge {}", p.id, i);
            }
        }
    }

    #[test]
    fn test_smooth_doubles_vertices() {
        let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let s = smooth_polygon(&square, DEFAULT_TENSION);
        assert_eq!(s.len(), 8);
        assert_eq!(s[0], square[0]);
        assert_eq!(s[2], square[1]);
        // bottom edge midpoint is pushed outwards (below y = 0)
        assert!(s[1].1 < 0.0);
        assert!((s[1].0 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_smooth_zero_tension_is_midpoints() {
        let tri = [(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)];
        let s = smooth_polygon(&tri, 0.0);
        assert_eq!(s[1], (1.0, 0.0));
        assert_eq!(s[3], (1.0, 1.0));
        assert_eq!(s[5], (0.0, 1.0));
    }

    #[test]
    fn test_smooth_short_input_unchanged() {
        let seg = [(0.0, 0.0), (1.0, 1.0)];
        assert_eq!(smooth_polygon(&seg, DEFAULT_TENSION), seg);
    }
}
