/// Homogeneous 3D vector and the arithmetic the pipeline is built on
use nalgebra::Vector3;
use std::ops::{Add, Div, Mul, Sub};

/// A point or direction in homogeneous 3D space.
///
/// Arithmetic operators (`+`, `-`, `*`, `/`) work on x, y and z only, either
/// component-wise against another vector or broadcast against an `f32`.
/// Their result always carries `w = 1.0`; only matrix products produce any
/// other `w`.
///
/// Division never fails: a zero divisor leaves the affected component at
/// its default of `0.0`. For a scalar divisor of zero the whole result is
/// `Vector3D::default()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector3D {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a point with `w = 1.0`
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    pub const fn with_w(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// The x, y, z part as an nalgebra vector
    pub fn xyz(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_xyz(v: &Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.xyz().dot(&other.xyz())
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::from_xyz(&self.xyz().cross(&other.xyz()))
    }

    /// Euclidean length, ignoring `w`
    pub fn length(&self) -> f32 {
        self.xyz().norm()
    }

    /// Divide by the own length. The zero vector normalizes to itself.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        *self / Self::new(length, length, length)
    }
}

impl Default for Vector3D {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[f32; 3]> for Vector3D {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Add for Vector3D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Add<f32> for Vector3D {
    type Output = Self;

    fn add(self, rhs: f32) -> Self {
        Self::new(self.x + rhs, self.y + rhs, self.z + rhs)
    }
}

impl Sub for Vector3D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<f32> for Vector3D {
    type Output = Self;

    fn sub(self, rhs: f32) -> Self {
        Self::new(self.x - rhs, self.y - rhs, self.z - rhs)
    }
}

impl Mul for Vector3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Mul<f32> for Vector3D {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div for Vector3D {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let mut out = Self::default();
        if rhs.x != 0.0 {
            out.x = self.x / rhs.x;
        }
        if rhs.y != 0.0 {
            out.y = self.y / rhs.y;
        }
        if rhs.z != 0.0 {
            out.z = self.z / rhs.z;
        }
        out
    }
}

impl Div<f32> for Vector3D {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        if rhs == 0.0 {
            return Self::default();
        }
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// Point where the segment `line_start..line_end` meets the plane.
///
/// The caller must make sure the segment straddles the plane; a segment
/// parallel to it divides by zero.
pub fn intersect_plane(
    plane_point: Vector3D,
    plane_normal: Vector3D,
    line_start: Vector3D,
    line_end: Vector3D,
) -> Vector3D {
    let plane_d = plane_normal.dot(&plane_point);
    let ad = line_start.dot(&plane_normal);
    let bd = line_end.dot(&plane_normal);
    let t = (plane_d - ad) / (bd - ad);
    line_start + (line_end - line_start) * t
}
