/// 4x4 transformation matrices and rotation state
use nalgebra::{Matrix4, RowVector4};
use std::ops::{Index, Mul};

use crate::vector::Vector3D;

/// Camera rotation around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Orientation {
    pub fn zero() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32, d_roll: f32) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
        self.roll += d_roll;
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::zero()
    }
}

/// Row-major 4x4 matrix used with row vectors: `v' = v * M`.
///
/// Under this convention translation lives in the bottom row and
/// `a * b` applies `a` first, then `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4x4(Matrix4<f32>);

impl Matrix4x4 {
    /// Build from rows, `rows[r][c]`
    #[rustfmt::skip]
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let [r0, r1, r2, r3] = rows;
        Self(Matrix4::new(
            r0[0], r0[1], r0[2], r0[3],
            r1[0], r1[1], r1[2], r1[3],
            r2[0], r2[1], r2[2], r2[3],
            r3[0], r3[1], r3[2], r3[3],
        ))
    }

    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    pub fn rotation_y(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_rows([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(offset: Vector3D) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [offset.x, offset.y, offset.z, 1.0],
        ])
    }

    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Multiply `vector` (as a 1x4 row, including `w`) by this matrix
    pub fn transform(&self, vector: &Vector3D) -> Vector3D {
        let row = RowVector4::new(vector.x, vector.y, vector.z, vector.w) * self.0;
        Vector3D::with_w(row[0], row[1], row[2], row[3])
    }

    pub fn as_nalgebra(&self) -> &Matrix4<f32> {
        &self.0
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<(usize, usize)> for Matrix4x4 {
    type Output = f32;

    fn index(&self, index: (usize, usize)) -> &f32 {
        &self.0[index]
    }
}

impl Mul for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}
