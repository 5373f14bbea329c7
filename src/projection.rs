// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Planar projection used by map displays, where one degree of latitude
//! spans a fixed number of units and the vertical axis points south.

use crate::graph::{Graph, NodeIdx};
use crate::{GeoPoint, Result};

/// Default scale of the display projection.
pub const PIXELS_PER_DEGREE: f64 = 20_000.0;

/// A point in the display coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Projects `point` relative to `origin`.
///
/// Longitude offsets are scaled by the cosine of the latitude of `point`,
/// and the latitude axis is inverted.
pub fn project(origin: GeoPoint, point: GeoPoint, pixels_per_degree: f64) -> ScreenPoint {
    let x = (point.lon - origin.lon) * pixels_per_degree * point.lat.to_radians().cos();
    let y = -(point.lat - origin.lat) * pixels_per_degree;
    ScreenPoint { x, y }
}

/// Returns the display position of a node, relative to the [center node](Graph::center_node).
pub fn assign_display_point(g: &Graph, node: NodeIdx) -> Result<ScreenPoint> {
    let origin = g.center_node()?.position;
    let node = g
        .get_node(node)
        .ok_or(crate::Error::InvalidReference(node))?;
    Ok(project(origin, node.position, PIXELS_PER_DEGREE))
}

/// Euclidean distance from `p` to the closest point of the segment `a`-`b`.
pub fn segment_distance(p: ScreenPoint, a: ScreenPoint, b: ScreenPoint) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return p.distance_to(a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(ScreenPoint::new(a.x + t * dx, a.y + t * dy))
}

/// Smallest [segment_distance] from `p` to any segment of a polyline.
/// Returns `None` for polylines with fewer than 2 points.
pub fn polyline_distance(p: ScreenPoint, polyline: &[ScreenPoint]) -> Option<f64> {
    polyline
        .windows(2)
        .map(|pair| segment_distance(p, pair[0], pair[1]))
        .min_by(f64::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_graphs;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-9),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    #[test]
    fn project_relative_to_origin() {
        let origin = GeoPoint::new(0.0, 0.0);
        let p = project(origin, GeoPoint::new(0.001, 0.002), PIXELS_PER_DEGREE);
        assert_almost_eq!(p.x, 40.0 * 0.001f64.to_radians().cos());
        assert_almost_eq!(p.y, -20.0);

        let p = project(origin, origin, PIXELS_PER_DEGREE);
        assert_eq!(p, ScreenPoint::new(0.0, 0.0));
    }

    #[test]
    fn longitude_shrinks_with_latitude() {
        let origin = GeoPoint::new(60.0, 10.0);
        let p = project(origin, GeoPoint::new(60.0, 10.001), PIXELS_PER_DEGREE);
        assert_almost_eq!(p.x, 10.0);
        assert_almost_eq!(p.y, 0.0);
    }

    #[test]
    fn display_points() {
        let g = test_graphs::line();
        let a = g.lookup_node("a").unwrap();
        let c = g.lookup_node("c").unwrap();
        assert_eq!(assign_display_point(&g, a).unwrap(), ScreenPoint::new(0.0, 0.0));
        assert_almost_eq!(assign_display_point(&g, c).unwrap().x, 40.0);
        assert!(assign_display_point(&Graph::default(), a).is_err());
    }

    #[test]
    fn segment_distances() {
        let a = ScreenPoint::new(0.0, 0.0);
        let b = ScreenPoint::new(10.0, 0.0);

        assert_almost_eq!(segment_distance(ScreenPoint::new(5.0, 3.0), a, b), 3.0);
        assert_almost_eq!(segment_distance(ScreenPoint::new(5.0, 0.0), a, b), 0.0);
        // Beyond the endpoints, the distance is to the closest endpoint
        assert_almost_eq!(segment_distance(ScreenPoint::new(13.0, 4.0), a, b), 5.0);
        assert_almost_eq!(segment_distance(ScreenPoint::new(-3.0, -4.0), a, b), 5.0);
        // Degenerate segment
        assert_almost_eq!(segment_distance(ScreenPoint::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn polyline_distances() {
        let line = [
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(10.0, 0.0),
            ScreenPoint::new(10.0, 10.0),
        ];
        assert_almost_eq!(polyline_distance(ScreenPoint::new(12.0, 5.0), &line).unwrap(), 2.0);
        assert_eq!(polyline_distance(ScreenPoint::default(), &line[..1]), None);
    }
}
