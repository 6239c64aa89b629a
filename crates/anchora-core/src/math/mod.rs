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

//! Provides the mathematics primitives used to place objects in 3D space.
//!
//! This module contains the vector and matrix types, the affine transform
//! builder used to compose model matrices, and a handful of scalar utilities.
//!
//! All angular functions in this module operate in **radians** by default, unless
//! explicitly specified otherwise (e.g., [`AffineTransform::rotate_degrees`]).

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

// Re-export standard mathematical constants for convenience.
pub use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;
/// The factor to convert radians to degrees (180.0 / PI).
pub const RAD_TO_DEG: f32 = 180.0 / PI;

// --- Declare Sub-Modules ---

pub mod affine_transform;
pub mod matrix;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::affine_transform::AffineTransform;
pub use self::matrix::Mat4;
pub use self::vector::{Vec2, Vec3, Vec4};

// --- Utility Functions ---

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use anchora_core::math::{approx_eq, degrees_to_radians, PI};
/// assert!(approx_eq(degrees_to_radians(180.0), PI));
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Converts an angle from radians to degrees.
///
/// # Examples
///
/// ```
/// use anchora_core::math::{approx_eq_eps, radians_to_degrees, PI};
/// assert!(approx_eq_eps(radians_to_degrees(PI), 180.0, 1e-3));
/// ```
#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * RAD_TO_DEG
}

/// Wraps an angle in radians into the half-open range `[0, 2π)`.
///
/// The wrap is modular: angles are never clamped, so `2π + 0.5` becomes `0.5`
/// and `-0.5` becomes `2π - 0.5`. Applying it to an already normalized angle
/// returns the angle unchanged.
///
/// # Examples
///
/// ```
/// use anchora_core::math::{approx_eq, normalize_angle, PI, TAU};
/// assert!(approx_eq(normalize_angle(TAU + 0.5), 0.5));
/// assert!(approx_eq(normalize_angle(-PI), PI));
/// assert_eq!(normalize_angle(0.25), 0.25);
/// ```
#[inline]
pub fn normalize_angle(radians: f32) -> f32 {
    let wrapped = radians.rem_euclid(TAU);
    // rem_euclid may round a tiny negative input up to exactly TAU.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Performs an approximate equality comparison between two floats with a custom tolerance.
///
/// # Examples
///
/// ```
/// use anchora_core::math::approx_eq_eps;
/// assert!(approx_eq_eps(0.001, 0.002, 1e-2));
/// assert!(!approx_eq_eps(0.001, 0.002, 1e-4));
/// ```
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Performs an approximate equality comparison using the module's default [`EPSILON`].
///
/// # Examples
///
/// ```
/// use anchora_core::math::{approx_eq, EPSILON};
/// assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
/// assert!(!approx_eq(1.0, 1.0 + EPSILON * 2.0));
/// ```
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}
