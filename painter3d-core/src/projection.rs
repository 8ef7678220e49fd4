/// Camera, viewport configuration and view/projection matrices
use crate::transform::{Matrix4x4, Orientation};
use crate::vector::Vector3D;

/// Direction the camera looks at zero yaw
pub const REFERENCE_FORWARD: Vector3D = Vector3D::new(0.0, 0.0, 1.0);

/// Fixed world up direction
pub const WORLD_UP: Vector3D = Vector3D::new(0.0, 1.0, 0.0);

/// Output surface size and frustum parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// `height / width`
    pub fn aspect_ratio(&self) -> f32 {
        self.height as f32 / self.width as f32
    }

    /// Perspective matrix for row vectors. Leaves `w_out = z_in`; the
    /// homogeneous divide happens afterwards.
    pub fn projection_matrix(&self) -> Matrix4x4 {
        let fov_scaling = 1.0 / (self.fov_degrees.to_radians() * 0.5).tan();
        let depth_scale = self.far / (self.far - self.near);
        Matrix4x4::from_rows([
            [self.aspect_ratio() * fov_scaling, 0.0, 0.0, 0.0],
            [0.0, fov_scaling, 0.0, 0.0],
            [0.0, 0.0, depth_scale, 1.0],
            [0.0, 0.0, -self.near * depth_scale, 0.0],
        ])
    }

    /// Map a perspective-divided point from `[-1, 1]` into pixels
    pub fn to_screen(&self, point: &Vector3D) -> Vector3D {
        Vector3D::with_w(
            (point.x + 1.0) * 0.5 * self.width as f32,
            (point.y + 1.0) * 0.5 * self.height as f32,
            point.z,
            point.w,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            fov_degrees: 90.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Camera state. Only yaw affects the look direction; pitch and roll are
/// carried but unused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3D,
    pub up: Vector3D,
    pub orientation: Orientation,
}

impl Camera {
    pub fn new(position: Vector3D) -> Self {
        Self {
            position,
            up: WORLD_UP,
            orientation: Orientation::zero(),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.orientation.yaw
    }

    /// Unit forward vector: the reference forward rotated by yaw around y
    pub fn look_direction(&self) -> Vector3D {
        Matrix4x4::rotation_y(self.orientation.yaw).transform(&REFERENCE_FORWARD)
    }

    /// `look x up`, the strafe axis
    pub fn right_direction(&self) -> Vector3D {
        self.look_direction().cross(&self.up)
    }

    pub fn target(&self) -> Vector3D {
        self.position + self.look_direction()
    }

    pub fn translate(&mut self, delta: Vector3D) {
        self.position = self.position + delta;
    }

    pub fn turn(&mut self, d_yaw: f32) {
        self.orientation.rotate(d_yaw, 0.0, 0.0);
    }

    pub fn frame(&self) -> OrthonormalFrame {
        OrthonormalFrame::point_at(self.position, self.target(), self.up)
    }

    /// World-to-camera transform for the current state
    pub fn view_matrix(&self) -> Matrix4x4 {
        self.frame().view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3D::ZERO)
    }
}

/// Orthonormal right/up/forward basis placed at `position`.
///
/// Because the basis is orthonormal, its inverse is its transpose, which is
/// what `view_matrix` relies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthonormalFrame {
    pub right: Vector3D,
    pub up: Vector3D,
    pub forward: Vector3D,
    pub position: Vector3D,
}

impl OrthonormalFrame {
    /// Gram-Schmidt basis looking from `position` at `target`
    pub fn point_at(position: Vector3D, target: Vector3D, up: Vector3D) -> Self {
        let forward = (target - position).normalize();
        let up = (up - forward * up.dot(&forward)).normalize();
        let right = up.cross(&forward);
        Self {
            right,
            up,
            forward,
            position,
        }
    }

    /// Unit axes and pairwise orthogonal, within `tolerance`
    pub fn is_orthonormal(&self, tolerance: f32) -> bool {
        let axes = [self.right, self.up, self.forward];
        let unit = axes.iter().all(|a| (a.length() - 1.0).abs() <= tolerance);
        let orthogonal = self.right.dot(&self.up).abs() <= tolerance
            && self.right.dot(&self.forward).abs() <= tolerance
            && self.up.dot(&self.forward).abs() <= tolerance;
        unit && orthogonal
    }

    /// Camera-to-world transform: basis rows, then position
    pub fn point_at_matrix(&self) -> Matrix4x4 {
        let (r, u, f, p) = (self.right, self.up, self.forward, self.position);
        Matrix4x4::from_rows([
            [r.x, r.y, r.z, 0.0],
            [u.x, u.y, u.z, 0.0],
            [f.x, f.y, f.z, 0.0],
            [p.x, p.y, p.z, 1.0],
        ])
    }

    /// Inverse of `point_at_matrix`: rotation transposed, translation
    /// projected onto each axis and negated
    pub fn view_matrix(&self) -> Matrix4x4 {
        debug_assert!(
            self.is_orthonormal(1e-4),
            "camera basis is not orthonormal: {self:?}"
        );
        let (r, u, f, p) = (self.right, self.up, self.forward, self.position);
        Matrix4x4::from_rows([
            [r.x, u.x, f.x, 0.0],
            [r.y, u.y, f.y, 0.0],
            [r.z, u.z, f.z, 0.0],
            [-p.dot(&r), -p.dot(&u), -p.dot(&f), 1.0],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_close(a: Vector3D, b: Vector3D) {
        assert!((a.x - b.x).abs() < 1e-5, "{a:?} != {b:?}");
        assert!((a.y - b.y).abs() < 1e-5, "{a:?} != {b:?}");
        assert!((a.z - b.z).abs() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_viewport_defaults() {
        let viewport = Viewport::default();
        assert_eq!((viewport.width, viewport.height), (600, 400));
        assert!((viewport.aspect_ratio() - 400.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_look_direction_follows_yaw() {
        let mut camera = Camera::default();
        assert_close(camera.look_direction(), Vector3D::new(0.0, 0.0, 1.0));
        camera.turn(FRAC_PI_2);
        assert_close(camera.look_direction(), Vector3D::new(-1.0, 0.0, 0.0));
        assert!((camera.look_direction().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let mut camera = Camera::new(Vector3D::new(3.0, -2.0, 7.0));
        for _ in 0..40 {
            camera.turn(0.37);
            assert!(camera.frame().is_orthonormal(1e-5));
        }
    }

    #[test]
    fn test_view_matrix_inverts_point_at() {
        let mut camera = Camera::new(Vector3D::new(1.5, 2.0, -4.0));
        camera.turn(0.8);
        let frame = camera.frame();
        let round_trip = frame.point_at_matrix() * frame.view_matrix();
        let error = round_trip.as_nalgebra() - Matrix4x4::identity().as_nalgebra();
        assert!(error.norm() < 1e-5);
    }

    fn skewed_frame() -> OrthonormalFrame {
        OrthonormalFrame {
            right: Vector3D::new(1.0, 0.0, 0.0),
            up: Vector3D::new(1.0, 1.0, 0.0),
            forward: Vector3D::new(0.0, 0.0, 1.0),
            position: Vector3D::ZERO,
        }
    }

    #[test]
    fn test_skewed_frame_is_not_orthonormal() {
        let frame = skewed_frame();
        assert!(!frame.is_orthonormal(1e-4));
        let mut fixed = frame;
        fixed.up = Vector3D::new(0.0, 1.0, 0.0);
        assert!(fixed.is_orthonormal(1e-4));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "camera basis is not orthonormal")]
    fn test_skewed_frame_view_matrix_panics() {
        skewed_frame().view_matrix();
    }

    #[test]
    fn test_view_matrix_puts_target_ahead() {
        let mut camera = Camera::new(Vector3D::new(5.0, 1.0, 5.0));
        camera.turn(-1.2);
        let view = camera.view_matrix();
        assert_close(view.transform(&camera.position), Vector3D::ZERO);
        let ahead = camera.position + camera.look_direction() * 4.0;
        assert_close(view.transform(&ahead), Vector3D::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_projection_carries_depth_into_w() {
        let viewport = Viewport::default();
        let projected = viewport
            .projection_matrix()
            .transform(&Vector3D::new(0.0, 0.0, 10.0));
        assert!((projected.w - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_near_plane_point_projects_to_finite_screen() {
        let viewport = Viewport::default();
        let camera = Camera::default();
        let point = camera.position + camera.look_direction() * viewport.near;
        let viewed = camera.view_matrix().transform(&point);
        let projected = viewport.projection_matrix().transform(&viewed);
        let w = projected.w;
        let ndc = projected / Vector3D::new(w, w, w);
        let screen = viewport.to_screen(&ndc);
        assert!(screen.x.is_finite() && screen.y.is_finite());
        assert!((screen.x - 300.0).abs() < 1e-3);
        assert!((screen.y - 200.0).abs() < 1e-3);
        // near plane maps to depth 0
        assert!(ndc.z.abs() < 1e-4);
    }
}
