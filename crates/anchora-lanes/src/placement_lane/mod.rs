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

//! Pure placement math run on every gesture and every frame.
//!
//! Nothing in this lane suspends or touches a host: object controllers feed it
//! gestures and ray-cast results and hand its matrices to the render host.

mod anchoring;
mod scale_ramp;
mod transform;

pub use anchoring::{select_anchor_hit, ScreenCursor};
pub use scale_ramp::ScaleRamp;
pub use transform::ObjectTransform;

/// Rotation applied by one rotate nudge, in degrees.
pub const ROTATION_NUDGE_DEGREES: f32 = 10.0;
