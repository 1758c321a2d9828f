//! Matrix operations for color space transforms
//!
//! [`Matrix3x3`] carries the linear part of RGB↔XYZ conversions and chromatic
//! adaptation. [`Matrix3x4`] adds a translation column so the black-point
//! offset of a [`CieXyzColorSpace`](crate::space::CieXyzColorSpace) can be
//! expressed in the same composition chain.
//!
//! Both act on column vectors: `m.apply(v)` computes `M × v`, and
//! `a.then(&b)` is the transform that applies `a` first.

use std::ops::{Index, IndexMut, Mul};

/// A 3x3 matrix for color space transformations
///
/// Stored in row-major order: m[row][col]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix3x3 {
    /// Matrix elements in row-major order
    pub m: [[f64; 3]; 3],
}

impl Matrix3x3 {
    #[inline]
    pub const fn new(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::diagonal(1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { m: [[0.0; 3]; 3] }
    }

    #[inline]
    pub const fn diagonal(d0: f64, d1: f64, d2: f64) -> Self {
        Self {
            m: [[d0, 0.0, 0.0], [0.0, d1, 0.0], [0.0, 0.0, d2]],
        }
    }

    /// Build from three column vectors
    #[inline]
    pub const fn from_columns(c0: [f64; 3], c1: [f64; 3], c2: [f64; 3]) -> Self {
        Self {
            m: [
                [c0[0], c1[0], c2[0]],
                [c0[1], c1[1], c2[1]],
                [c0[2], c1[2], c2[2]],
            ],
        }
    }

    #[inline]
    pub fn column(&self, index: usize) -> [f64; 3] {
        [self.m[0][index], self.m[1][index], self.m[2][index]]
    }

    /// Returns M × v
    #[inline]
    pub fn multiply_vec(&self, v: [f64; 3]) -> [f64; 3] {
        [
            self.m[0][0] * v[0] + self.m[0][1] * v[1] + self.m[0][2] * v[2],
            self.m[1][0] * v[0] + self.m[1][1] * v[1] + self.m[1][2] * v[2],
            self.m[2][0] * v[0] + self.m[2][1] * v[1] + self.m[2][2] * v[2],
        ]
    }

    /// Returns self × other
    #[inline]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for i in 0..3 {
            for j in 0..3 {
                result.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        result
    }

    /// Scale each column by the matching factor (self × diag(s))
    #[inline]
    pub fn scale_columns(&self, s: [f64; 3]) -> Self {
        let m = &self.m;
        Self {
            m: [
                [m[0][0] * s[0], m[0][1] * s[1], m[0][2] * s[2]],
                [m[1][0] * s[0], m[1][1] * s[1], m[1][2] * s[2]],
                [m[2][0] * s[0], m[2][1] * s[1], m[2][2] * s[2]],
            ],
        }
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_columns(self.m[0], self.m[1], self.m[2])
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Calculate the inverse of this matrix
    ///
    /// Returns None if the matrix is singular (determinant ≈ 0)
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-14 || !det.is_finite() {
            return None;
        }

        let inv_det = 1.0 / det;
        let m = &self.m;

        // adjugate / determinant
        Some(Self {
            m: [
                [
                    (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                    (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                    (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
                ],
                [
                    (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                    (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                    (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
                ],
                [
                    (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                    (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                    (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
                ],
            ],
        })
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.approx_eq(&Self::identity(), epsilon)
    }
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<usize> for Matrix3x3 {
    type Output = [f64; 3];

    fn index(&self, row: usize) -> &Self::Output {
        &self.m[row]
    }
}

impl IndexMut<usize> for Matrix3x3 {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        &mut self.m[row]
    }
}

impl Mul for Matrix3x3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl Mul<[f64; 3]> for Matrix3x3 {
    type Output = [f64; 3];

    fn mul(self, rhs: [f64; 3]) -> Self::Output {
        self.multiply_vec(rhs)
    }
}

/// Affine transform: a 3x3 linear part followed by a translation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix3x4 {
    pub linear: Matrix3x3,
    pub translation: [f64; 3],
}

impl Matrix3x4 {
    pub const fn new(linear: Matrix3x3, translation: [f64; 3]) -> Self {
        Self {
            linear,
            translation,
        }
    }

    pub const fn identity() -> Self {
        Self::new(Matrix3x3::identity(), [0.0; 3])
    }

    pub const fn translate(x: f64, y: f64, z: f64) -> Self {
        Self::new(Matrix3x3::identity(), [x, y, z])
    }

    pub const fn scale(x: f64, y: f64, z: f64) -> Self {
        Self::new(Matrix3x3::diagonal(x, y, z), [0.0; 3])
    }

    pub const fn from_linear(linear: Matrix3x3) -> Self {
        Self::new(linear, [0.0; 3])
    }

    /// Returns M × v + t
    #[inline]
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        let p = self.linear.multiply_vec(v);
        [
            p[0] + self.translation[0],
            p[1] + self.translation[1],
            p[2] + self.translation[2],
        ]
    }

    /// The transform that applies `self` first, then `next`
    pub fn then(&self, next: &Self) -> Self {
        let t = next.linear.multiply_vec(self.translation);
        Self {
            linear: next.linear.multiply(&self.linear),
            translation: [
                t[0] + next.translation[0],
                t[1] + next.translation[1],
                t[2] + next.translation[2],
            ],
        }
    }

    /// Apply a pure linear map after this transform
    pub fn then_linear(&self, next: &Matrix3x3) -> Self {
        self.then(&Self::from_linear(*next))
    }

    pub fn inverse(&self) -> Option<Self> {
        let linear = self.linear.inverse()?;
        let t = linear.multiply_vec(self.translation);
        Some(Self {
            linear,
            translation: [-t[0], -t[1], -t[2]],
        })
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.linear.approx_eq(&other.linear, epsilon)
            && self
                .translation
                .iter()
                .zip(&other.translation)
                .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Matrix3x4 {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_identity() {
        let v = [1.0, 2.0, 3.0];
        let result = Matrix3x3::identity().multiply_vec(v);
        for i in 0..3 {
            assert!((result[i] - v[i]).abs() < EPSILON);
        }
    }

    #[test]
    fn test_multiply_matrices() {
        let a = Matrix3x3::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let id = Matrix3x3::identity();
        assert!(a.multiply(&id).approx_eq(&a, EPSILON));
        assert!(id.multiply(&a).approx_eq(&a, EPSILON));
    }

    #[test]
    fn test_columns() {
        let a = Matrix3x3::from_columns([1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]);
        assert_eq!(a.m[0], [1.0, 4.0, 7.0]);
        assert_eq!(a.column(2), [7.0, 8.0, 9.0]);
        assert!(a.transpose().transpose().approx_eq(&a, EPSILON));

        let scaled = a.scale_columns([1.0, 0.5, 2.0]);
        let explicit = a.multiply(&Matrix3x3::diagonal(1.0, 0.5, 2.0));
        assert!(scaled.approx_eq(&explicit, EPSILON));
    }

    #[test]
    fn test_inverse() {
        let a = Matrix3x3::new([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        assert!((a.determinant() - 1.0).abs() < EPSILON);
        let a_inv = a.inverse().unwrap();
        assert!(a.multiply(&a_inv).is_identity(1e-9));
    }

    #[test]
    fn test_singular_matrix() {
        // row 3 = row 1 + row 2
        let singular = Matrix3x3::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [5.0, 7.0, 9.0]]);
        assert!(singular.inverse().is_none());
    }

    #[test]
    fn test_affine_composition_order() {
        let t = Matrix3x4::translate(-1.0, -2.0, -3.0);
        let s = Matrix3x4::scale(2.0, 2.0, 2.0);

        // translate, then scale
        let ts = t.then(&s);
        assert_eq!(ts.apply([1.0, 2.0, 3.0]), [0.0, 0.0, 0.0]);
        assert_eq!(ts.apply([2.0, 2.0, 2.0]), [2.0, 0.0, -2.0]);

        // scale, then translate
        let st = s.then(&t);
        assert_eq!(st.apply([1.0, 1.0, 1.0]), [1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_affine_inverse() {
        let m = Matrix3x4::translate(0.1, -0.2, 0.3)
            .then(&Matrix3x4::scale(2.0, 4.0, 0.5))
            .then_linear(&Matrix3x3::new([[1.0, 0.2, 0.0], [0.0, 1.0, 0.1], [0.3, 0.0, 1.0]]));
        let inv = m.inverse().unwrap();

        let v = [0.25, 0.5, 0.75];
        let back = inv.apply(m.apply(v));
        for i in 0..3 {
            assert!((back[i] - v[i]).abs() < 1e-12, "channel {} {} vs {}", i, back[i], v[i]);
        }
        assert!(m.then(&inv).approx_eq(&Matrix3x4::identity(), 1e-12));
    }
}
