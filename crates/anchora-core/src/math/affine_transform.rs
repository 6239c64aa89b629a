// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Affine transformations for 3D space.

use crate::math::{degrees_to_radians, Mat4, Vec3};

/// Represents a 3D affine transformation (translation, rotation, scale).
///
/// This is a semantic wrapper around a `Mat4` that guarantees the matrix
/// represents a valid affine transform. The chaining methods each
/// **post-multiply** the current matrix, so
/// `AffineTransform::IDENTITY.translate(t).rotate_degrees(a, up).scale(s, s, s)`
/// yields `T · R · S`: geometry is scaled first, then rotated, then moved.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct AffineTransform(pub Mat4);

impl AffineTransform {
    /// The identity transform, which results in no change.
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    /// Creates an `AffineTransform` from a translation vector.
    ///
    /// # Example
    ///
    /// ```rust
    /// use anchora_core::math::{AffineTransform, Vec3};
    ///
    /// let transform = AffineTransform::from_translation(Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(transform.translation(), Vec3::new(1.0, 2.0, 3.0));
    /// ```
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self(Mat4::from_translation(v))
    }

    /// Appends a translation.
    #[inline]
    pub fn translate(self, x: f32, y: f32, z: f32) -> Self {
        Self(self.0 * Mat4::from_translation(Vec3::new(x, y, z)))
    }

    /// Appends a rotation of `angle_degrees` **degrees** around `axis`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use anchora_core::math::{AffineTransform, Vec3};
    ///
    /// let t = AffineTransform::IDENTITY.rotate_degrees(90.0, Vec3::Y);
    /// let p = t.to_matrix().transform_point3(Vec3::X);
    /// assert!((p.z + 1.0).abs() < 1e-5);
    /// ```
    #[inline]
    pub fn rotate_degrees(self, angle_degrees: f32, axis: Vec3) -> Self {
        Self(self.0 * Mat4::from_axis_angle(axis, degrees_to_radians(angle_degrees)))
    }

    /// Appends a non-uniform scale.
    #[inline]
    pub fn scale(self, x: f32, y: f32, z: f32) -> Self {
        Self(self.0 * Mat4::from_scale(Vec3::new(x, y, z)))
    }

    /// Converts the `AffineTransform` to a `Mat4`.
    ///
    /// This is useful when you need to pass the transformation matrix to
    /// a render host that expects a raw matrix.
    #[inline]
    pub fn to_matrix(&self) -> Mat4 {
        self.0
    }

    /// Extracts the translation component from the affine transform.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.0.translation()
    }
}

impl Default for AffineTransform {
    /// Returns the identity `AffineTransform`.
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Allow easy conversion to the underlying Mat4 for sending to the GPU, etc.
impl From<AffineTransform> for Mat4 {
    #[inline]
    fn from(transform: AffineTransform) -> Self {
        transform.0
    }
}
