/// Half-space clipping of triangles
use crate::geometry::Triangle;
use crate::vector::{intersect_plane, Vector3D};

/// A clipping plane. Points with `normal . (p - point) >= 0` are inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vector3D,
    pub normal: Vector3D,
}

impl Plane {
    pub fn new(point: Vector3D, normal: Vector3D) -> Self {
        Self { point, normal }
    }

    /// Camera-space near plane at depth `near`, facing +z
    pub fn near(near: f32) -> Self {
        Self::new(Vector3D::new(0.0, 0.0, near), Vector3D::new(0.0, 0.0, 1.0))
    }

    /// The four inward-facing viewport edges, in clip order: top, bottom, left, right
    pub fn screen_edges(width: f32, height: f32) -> [Plane; 4] {
        [
            Self::new(Vector3D::ZERO, Vector3D::new(0.0, 1.0, 0.0)),
            Self::new(Vector3D::new(0.0, height, 0.0), Vector3D::new(0.0, -1.0, 0.0)),
            Self::new(Vector3D::ZERO, Vector3D::new(1.0, 0.0, 0.0)),
            Self::new(Vector3D::new(width, 0.0, 0.0), Vector3D::new(-1.0, 0.0, 0.0)),
        ]
    }

    /// Signed distance-like value, scaled by the normal's length
    pub fn distance(&self, point: &Vector3D) -> f32 {
        self.normal.dot(point) - self.normal.dot(&self.point)
    }

    pub fn contains(&self, point: &Vector3D) -> bool {
        self.distance(point) >= 0.0
    }

    fn intersect(&self, start: Vector3D, end: Vector3D) -> Vector3D {
        intersect_plane(self.point, self.normal, start, end)
    }
}

/// Clip `triangle` against `plane`, producing 0, 1 or 2 triangles.
///
/// When two vertices are inside, the second output triangle reuses the
/// first one's intersection point, so both share that edge exactly.
pub fn clip_triangle(plane: &Plane, triangle: &Triangle) -> Vec<Triangle> {
    let mut inside = Vec::with_capacity(3);
    let mut outside = Vec::with_capacity(3);
    for point in triangle.points {
        if plane.contains(&point) {
            inside.push(point);
        } else {
            outside.push(point);
        }
    }

    let color = triangle.base_color;
    match inside.len() {
        3 => vec![*triangle],
        1 => vec![Triangle::new(
            [
                inside[0],
                plane.intersect(inside[0], outside[0]),
                plane.intersect(inside[0], outside[1]),
            ],
            color,
        )],
        2 => {
            let shared = plane.intersect(inside[0], outside[0]);
            vec![
                Triangle::new([inside[0], inside[1], shared], color),
                Triangle::new(
                    [inside[1], shared, plane.intersect(inside[1], outside[0])],
                    color,
                ),
            ]
        }
        _ => Vec::new(),
    }
}

/// Clip `triangle` against each plane in turn, feeding every plane's output
/// into the next. A triangle a plane rejects is dropped.
pub fn clip_against_planes(planes: &[Plane], triangle: &Triangle) -> Vec<Triangle> {
    let mut triangles = vec![*triangle];
    for plane in planes {
        triangles = triangles
            .iter()
            .flat_map(|tri| clip_triangle(plane, tri))
            .collect();
        if triangles.is_empty() {
            break;
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rgb;

    fn tri(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle::new([a.into(), b.into(), c.into()], Rgb::new(10, 20, 30))
    }

    fn is_original_or_on_plane(plane: &Plane, original: &Triangle, point: &Vector3D) -> bool {
        original.points.contains(point) || plane.distance(point).abs() < 1e-5
    }

    #[test]
    fn test_fully_inside_is_unchanged() {
        let t = tri([0.0, 0.0, 1.0], [1.0, 0.0, 2.0], [0.0, 1.0, 3.0]);
        assert_eq!(clip_triangle(&Plane::near(0.1), &t), vec![t]);
    }

    #[test]
    fn test_fully_outside_is_discarded() {
        let t = tri([0.0, 0.0, -1.0], [1.0, 0.0, -2.0], [0.0, 1.0, -3.0]);
        assert!(clip_triangle(&Plane::near(0.1), &t).is_empty());
    }

    #[test]
    fn test_vertex_on_plane_counts_as_inside() {
        let t = tri([0.0, 0.0, 0.1], [1.0, 0.0, 0.1], [0.0, 1.0, 0.1]);
        assert_eq!(clip_triangle(&Plane::near(0.1), &t), vec![t]);
    }

    #[test]
    fn test_one_inside_gives_one_triangle() {
        let plane = Plane::near(1.0);
        let t = tri([0.0, 0.0, 3.0], [2.0, 0.0, -1.0], [0.0, 2.0, -1.0]);
        let out = clip_triangle(&plane, &t);
        assert_eq!(out.len(), 1);
        let clipped = out[0];
        assert_eq!(clipped.points[0], t.points[0]);
        assert!((clipped.points[1].x - 1.0).abs() < 1e-6);
        assert!((clipped.points[1].z - 1.0).abs() < 1e-6);
        assert!((clipped.points[2].y - 1.0).abs() < 1e-6);
        assert!((clipped.points[2].z - 1.0).abs() < 1e-6);
        assert_eq!(clipped.base_color, t.base_color);
        assert!(clipped.area() <= t.area());
    }

    #[test]
    fn test_two_inside_share_exact_point() {
        let plane = Plane::near(0.1);
        let t = tri([-1.0, 0.0, 2.0], [1.0, 0.0, 2.0], [0.0, 1.0, -2.0]);
        let out = clip_triangle(&plane, &t);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].points[0], t.points[0]);
        assert_eq!(out[0].points[1], t.points[1]);
        assert_eq!(out[1].points[0], t.points[1]);
        // bitwise identical, not merely close
        assert_eq!(out[0].points[2], out[1].points[1]);
        for clipped in &out {
            for p in &clipped.points {
                assert!(plane.contains(p) || plane.distance(p).abs() < 1e-5);
                assert!(is_original_or_on_plane(&plane, &t, p));
            }
        }
        let area: f32 = out.iter().map(Triangle::area).sum();
        assert!(area <= t.area() + 1e-5);
    }

    #[test]
    fn test_screen_edges_point_inward() {
        let edges = Plane::screen_edges(600.0, 400.0);
        let center = Vector3D::new(300.0, 200.0, 0.0);
        for edge in &edges {
            assert!(edge.distance(&center) > 0.0);
        }
        assert!(!edges[0].contains(&Vector3D::new(10.0, -1.0, 0.0)));
        assert!(!edges[1].contains(&Vector3D::new(10.0, 401.0, 0.0)));
        assert!(!edges[2].contains(&Vector3D::new(-1.0, 10.0, 0.0)));
        assert!(!edges[3].contains(&Vector3D::new(601.0, 10.0, 0.0)));
    }

    #[test]
    fn test_clip_against_planes_keeps_points_on_screen() {
        let edges = Plane::screen_edges(100.0, 100.0);
        let t = tri([-50.0, -50.0, 0.0], [150.0, 50.0, 0.0], [50.0, 150.0, 0.0]);
        let out = clip_against_planes(&edges, &t);
        assert!(!out.is_empty());
        for clipped in &out {
            for p in &clipped.points {
                assert!(p.x >= -1e-3 && p.x <= 100.0 + 1e-3);
                assert!(p.y >= -1e-3 && p.y <= 100.0 + 1e-3);
            }
        }
        let area: f32 = out.iter().map(Triangle::area).sum();
        assert!(area <= t.area());
    }

    #[test]
    fn test_clip_against_planes_drops_offscreen() {
        let edges = Plane::screen_edges(100.0, 100.0);
        let t = tri([200.0, 10.0, 0.0], [300.0, 10.0, 0.0], [250.0, 90.0, 0.0]);
        assert!(clip_against_planes(&edges, &t).is_empty());
    }
}
