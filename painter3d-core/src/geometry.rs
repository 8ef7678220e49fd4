/// Scene geometry: colours, triangles and meshes
use crate::vector::Vector3D;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unclamped channel values, saturating into `0..=255`
    pub fn clamped(channels: [f32; 3]) -> Self {
        let clamp = |c: f32| c.clamp(0.0, 255.0) as u8;
        Self::new(clamp(channels[0]), clamp(channels[1]), clamp(channels[2]))
    }

    pub fn channels(&self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }
}

/// A triangle face. Winding order determines the normal's sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Vector3D; 3],
    pub base_color: Rgb,
    normal: Vector3D,
}

impl Triangle {
    pub fn new(points: [Vector3D; 3], base_color: Rgb) -> Self {
        Self {
            points,
            base_color,
            normal: Self::calculate_normal(&points),
        }
    }

    /// Unit normal `normalize((p1 - p0) x (p2 - p0))`
    pub fn calculate_normal(points: &[Vector3D; 3]) -> Vector3D {
        let edge1 = points[1] - points[0];
        let edge2 = points[2] - points[0];
        edge1.cross(&edge2).normalize()
    }

    /// Normal derived from the winding this triangle was created with
    pub fn normal(&self) -> Vector3D {
        self.normal
    }

    pub fn centroid(&self) -> Vector3D {
        (self.points[0] + self.points[1] + self.points[2]) / 3.0
    }

    /// Apply `f` to every vertex, keeping the colour
    pub fn map_points(&self, f: impl Fn(&Vector3D) -> Vector3D) -> Self {
        Self::new(
            [f(&self.points[0]), f(&self.points[1]), f(&self.points[2])],
            self.base_color,
        )
    }

    /// Area of the x/y/z triangle
    pub fn area(&self) -> f32 {
        let edge1 = self.points[1] - self.points[0];
        let edge2 = self.points[2] - self.points[0];
        edge1.cross(&edge2).length() * 0.5
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// A copy of this mesh moved by `offset` in world space
    pub fn translated(&self, offset: Vector3D) -> Self {
        Self {
            triangles: self
                .triangles
                .iter()
                .map(|tri| tri.map_points(|p| *p + offset))
                .collect(),
        }
    }

    /// A copy of this mesh with every triangle painted `color`
    pub fn with_base_color(&self, color: Rgb) -> Self {
        Self {
            triangles: self
                .triangles
                .iter()
                .map(|tri| Triangle::new(tri.points, color))
                .collect(),
        }
    }

    /// Cube centred on the origin with outward-facing winding
    pub fn cube(size: f32, color: Rgb) -> Self {
        let h = size / 2.0;
        let v = |x: f32, y: f32, z: f32| Vector3D::new(x, y, z);
        let faces = [
            // Front
            [v(-h, -h, h), v(h, -h, h), v(h, h, h)],
            [v(-h, -h, h), v(h, h, h), v(-h, h, h)],
            // Back
            [v(-h, -h, -h), v(-h, h, -h), v(h, h, -h)],
            [v(-h, -h, -h), v(h, h, -h), v(h, -h, -h)],
            // Top
            [v(-h, h, -h), v(-h, h, h), v(h, h, h)],
            [v(-h, h, -h), v(h, h, h), v(h, h, -h)],
            // Bottom
            [v(-h, -h, -h), v(h, -h, -h), v(h, -h, h)],
            [v(-h, -h, -h), v(h, -h, h), v(-h, -h, h)],
            // Right
            [v(h, -h, -h), v(h, h, -h), v(h, h, h)],
            [v(h, -h, -h), v(h, h, h), v(h, -h, h)],
            // Left
            [v(-h, -h, -h), v(-h, -h, h), v(-h, h, h)],
            [v(-h, -h, -h), v(-h, h, h), v(-h, h, -h)],
        ];

        let mut mesh = Self::with_capacity(faces.len());
        for points in faces {
            mesh.add_triangle(Triangle::new(points, color));
        }
        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
