/// Per-frame rendering: cull, depth sort, shade, clip, project
use crate::clip::{clip_against_planes, clip_triangle, Plane};
use crate::geometry::{Mesh, Rgb, Triangle};
use crate::lighting::{shade, Light, LightBlend};
use crate::projection::{Camera, Viewport};
use crate::transform::Matrix4x4;
use crate::vector::Vector3D;

/// A 2D target that paints solid filled polygons. It has no depth test,
/// so polygons must arrive far to near.
pub trait DrawSurface {
    fn draw_filled_polygon(&mut self, points: &[(f32, f32)], color: Rgb);
}

/// A screen-space polygon and its flat colour
#[derive(Debug, Clone, PartialEq)]
pub struct ShadedPolygon {
    pub points: Vec<(f32, f32)>,
    pub color: Rgb,
}

impl DrawSurface for Vec<ShadedPolygon> {
    fn draw_filled_polygon(&mut self, points: &[(f32, f32)], color: Rgb) {
        self.push(ShadedPolygon {
            points: points.to_vec(),
            color,
        });
    }
}

/// `true` if the triangle's normal faces `eye`
pub fn is_front_facing(triangle: &Triangle, eye: &Vector3D) -> bool {
    triangle.normal().dot(&(triangle.points[0] - *eye)) < 0.0
}

/// Triangles ordered farthest-first by centroid distance to `eye`.
/// Equal distances keep their input order.
pub fn depth_sorted<'a, I>(triangles: I, eye: &Vector3D) -> Vec<&'a Triangle>
where
    I: IntoIterator<Item = &'a Triangle>,
{
    let mut keyed: Vec<(f32, &Triangle)> = triangles
        .into_iter()
        .map(|tri| ((tri.centroid() - *eye).length(), tri))
        .collect();
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.into_iter().map(|(_, tri)| tri).collect()
}

/// Turns a mesh, a camera and lights into painter-ordered polygons.
///
/// The mesh and camera are only borrowed; every stage builds new triangles.
#[derive(Debug, Clone)]
pub struct FramePipeline {
    viewport: Viewport,
    projection: Matrix4x4,
    cull_back_faces: bool,
    light_blend: LightBlend,
}

impl FramePipeline {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            projection: viewport.projection_matrix(),
            viewport,
            cull_back_faces: true,
            light_blend: LightBlend::default(),
        }
    }

    pub fn with_back_face_culling(mut self, enabled: bool) -> Self {
        self.cull_back_faces = enabled;
        self
    }

    pub fn with_light_blend(mut self, blend: LightBlend) -> Self {
        self.light_blend = blend;
        self
    }

    /// Replace the viewport and rebuild the cached projection
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.projection = viewport.projection_matrix();
        self.viewport = viewport;
    }

    pub fn projection_matrix(&self) -> &Matrix4x4 {
        &self.projection
    }

    /// Camera-space point to pixel coordinates
    fn project(&self, point: &Vector3D) -> Vector3D {
        let projected = self.projection.transform(point);
        let w = projected.w;
        let ndc = projected / Vector3D::new(w, w, w);
        self.viewport.to_screen(&ndc)
    }

    /// Render one frame into a list of polygons, far to near
    pub fn render(&self, camera: &Camera, mesh: &Mesh, lights: &[Light]) -> Vec<ShadedPolygon> {
        let mut polygons = Vec::with_capacity(mesh.len());
        self.draw(camera, mesh, lights, &mut polygons);
        polygons
    }

    /// Render one frame straight onto `surface`. Returns the number of
    /// polygons emitted.
    pub fn draw<S>(&self, camera: &Camera, mesh: &Mesh, lights: &[Light], surface: &mut S) -> usize
    where
        S: DrawSurface + ?Sized,
    {
        let view = camera.view_matrix();
        let near_plane = Plane::near(self.viewport.near);
        let screen_edges =
            Plane::screen_edges(self.viewport.width as f32, self.viewport.height as f32);

        let visible = mesh
            .triangles
            .iter()
            .filter(|tri| !self.cull_back_faces || is_front_facing(tri, &camera.position));

        let mut emitted = 0;
        for triangle in depth_sorted(visible, &camera.position) {
            let color = shade(triangle, lights, self.light_blend);
            let viewed = triangle.map_points(|p| view.transform(p));

            for clipped in clip_triangle(&near_plane, &viewed) {
                let on_screen = clipped.map_points(|p| self.project(p));
                for piece in clip_against_planes(&screen_edges, &on_screen) {
                    let points = piece.points.map(|p| (p.x, p.y));
                    surface.draw_filled_polygon(&points, color);
                    emitted += 1;
                }
            }
        }
        emitted
    }
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
