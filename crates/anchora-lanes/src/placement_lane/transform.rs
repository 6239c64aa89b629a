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

use anchora_core::gesture::GestureEvent;
use anchora_core::math::{
    normalize_angle, radians_to_degrees, AffineTransform, Mat4, Vec3,
};
use serde::{Deserialize, Serialize};

/// The accumulated transform of one placed object.
///
/// Owned by exactly one object controller and only mutated by its gesture
/// processing. Invariants: `yaw` is in `[0, 2π)` and `scale > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectTransform {
    /// World-space position, taken from the latest ray-cast hit.
    pub translation: Vec3,
    /// Rotation around the world up axis, in radians.
    pub yaw: f32,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            yaw: 0.0,
            scale: 1.0,
        }
    }
}

impl ObjectTransform {
    /// Creates a transform, normalizing `yaw` and falling back to a yaw of `0`
    /// or a scale of `1.0` when either is unusable.
    pub fn new(translation: Vec3, yaw: f32, scale: f32) -> Self {
        let scale = if is_valid_scale(scale) {
            scale
        } else {
            log::warn!("Rejected initial scale {scale}, using 1.0.");
            1.0
        };
        let yaw = if yaw.is_finite() {
            normalize_angle(yaw)
        } else {
            log::warn!("Rejected initial yaw {yaw}, using 0.");
            0.0
        };
        Self {
            translation,
            yaw,
            scale,
        }
    }

    /// Accumulates a relative rotation and a multiplicative scale change.
    ///
    /// Each half is checked on its own: a non-finite `delta_yaw` leaves the
    /// yaw alone, and a scale that would stop being a positive finite number
    /// (bad factor, underflow to zero, overflow to infinity) leaves the scale
    /// alone.
    pub fn apply_update(&mut self, delta_yaw: f32, scale_factor: f32) {
        if delta_yaw.is_finite() {
            self.yaw = normalize_angle(self.yaw + delta_yaw);
        } else {
            log::warn!("Ignored non-finite yaw delta {delta_yaw}.");
        }

        let scale = self.scale * scale_factor;
        if is_valid_scale(scale_factor) && is_valid_scale(scale) {
            self.scale = scale;
        } else {
            log::warn!(
                "Ignored scale factor {scale_factor} (scale {} would become {scale}).",
                self.scale
            );
        }
    }

    /// Applies a gesture. Only [`GestureEvent::Update`] changes rotation and
    /// scale; returns whether the transform was touched.
    pub fn apply_gesture(&mut self, event: &GestureEvent) -> bool {
        match *event {
            GestureEvent::Update {
                delta_yaw,
                scale_factor,
            } => {
                self.apply_update(delta_yaw, scale_factor);
                true
            }
            GestureEvent::Move { .. } => false,
        }
    }

    /// Composes `Translate(translation) · Rotate(yaw, up) · Scale(scale)`.
    pub fn model_matrix(&self) -> Mat4 {
        AffineTransform::IDENTITY
            .translate(self.translation.x, self.translation.y, self.translation.z)
            .rotate_degrees(radians_to_degrees(self.yaw), Vec3::Y)
            .scale(self.scale, self.scale, self.scale)
            .to_matrix()
    }
}

fn is_valid_scale(scale: f32) -> bool {
    scale.is_finite() && scale > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchora_core::math::{PI, TAU};
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_origin_unrotated_unit_scale() {
        let t = ObjectTransform::default();
        assert_eq!(t.translation, Vec3::ZERO);
        assert_eq!(t.yaw, 0.0);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_updates_sum_yaw_and_multiply_scale() {
        let deltas = [(0.5, 2.0), (-1.7, 0.5), (4.0, 1.5), (PI, 0.9)];
        let mut t = ObjectTransform::default();
        for (yaw, factor) in deltas {
            t.apply_update(yaw, factor);
        }

        let yaw_sum: f32 = deltas.iter().map(|(y, _)| y).sum();
        let scale_product: f32 = deltas.iter().map(|(_, s)| s).product();
        assert_relative_eq!(t.yaw, normalize_angle(yaw_sum), epsilon = 1e-4);
        assert_relative_eq!(t.scale, scale_product, epsilon = 1e-5);
        assert!((0.0..TAU).contains(&t.yaw));
    }

    #[test]
    fn test_yaw_wraps_instead_of_clamping() {
        let mut t = ObjectTransform::default();
        t.apply_update(TAU - 0.1, 1.0);
        t.apply_update(0.3, 1.0);
        assert_relative_eq!(t.yaw, 0.2, epsilon = 1e-5);
    }

    #[test]
    fn test_invalid_scale_factor_is_ignored() {
        let mut t = ObjectTransform::default();
        t.apply_update(0.0, 0.0);
        t.apply_update(0.0, -2.0);
        t.apply_update(0.0, f32::NAN);
        assert_eq!(t.scale, 1.0);
        assert_eq!(ObjectTransform::new(Vec3::ZERO, 0.0, -1.0).scale, 1.0);
    }

    #[test]
    fn test_non_finite_yaw_delta_is_ignored() {
        let mut t = ObjectTransform::default();
        t.apply_update(f32::INFINITY, 1.0);
        t.apply_update(f32::NAN, 2.0);
        assert_eq!(t.yaw, 0.0);
        // The scale half of the update still applies.
        assert_eq!(t.scale, 2.0);

        t.apply_update(0.5, 1.0);
        assert_relative_eq!(t.yaw, 0.5);
        assert!((0.0..TAU).contains(&t.yaw));
        assert!(t.model_matrix().to_cols_array().iter().all(|v| v.is_finite()));
        assert_eq!(ObjectTransform::new(Vec3::ZERO, f32::NAN, 1.0).yaw, 0.0);
    }

    #[test]
    fn test_scale_never_underflows_to_zero() {
        let mut t = ObjectTransform::default();
        for _ in 0..3 {
            t.apply_update(0.0, 1e-20);
        }
        assert!(t.scale > 0.0);
        assert_relative_eq!(t.scale, 1e-20, max_relative = 1e-5);

        // Still recovers from a tiny scale.
        t.apply_update(0.0, 1e20);
        assert_relative_eq!(t.scale, 1.0, max_relative = 1e-5);
    }

    #[test]
    fn test_scale_never_overflows_to_infinity() {
        let mut t = ObjectTransform::default();
        for _ in 0..3 {
            t.apply_update(0.0, 1e20);
        }
        assert!(t.scale.is_finite());
        assert_relative_eq!(t.scale, 1e20, max_relative = 1e-5);
    }

    #[test]
    fn test_move_gestures_leave_rotation_and_scale() {
        let mut t = ObjectTransform::new(Vec3::ZERO, 1.0, 2.0);
        assert!(!t.apply_gesture(&GestureEvent::moved(0.3, 0.3)));
        assert_eq!((t.yaw, t.scale), (1.0, 2.0));
        assert!(t.apply_gesture(&GestureEvent::update(0.5, 2.0)));
        assert_relative_eq!(t.yaw, 1.5);
        assert_relative_eq!(t.scale, 4.0);
    }

    #[test]
    fn test_model_matrix_composition() {
        let t = ObjectTransform::new(Vec3::new(1.0, 2.0, 3.0), PI, 2.0);
        let m = t.model_matrix();

        // Translation column is untouched by rotation and scale.
        assert_eq!(m.translation(), Vec3::new(1.0, 2.0, 3.0));
        // Half a turn around Y with scale 2: +X maps to -2X, +Z to -2Z.
        let p = m.transform_point3(Vec3::X);
        assert_relative_eq!(p.x, -1.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-4);
        assert_relative_eq!(p.z, 3.0, epsilon = 1e-4);
        let up = m.transform_point3(Vec3::Y);
        assert_relative_eq!(up.y, 4.0, epsilon = 1e-4);
    }
}
