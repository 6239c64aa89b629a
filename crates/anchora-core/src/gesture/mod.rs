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

//! Discrete user gestures targeting one placed object.

use serde::{Deserialize, Serialize};

/// A user gesture routed to a single placed object.
///
/// Gestures are produced by input handlers and consumed by the owning object
/// controller. Under backpressure only the latest gesture is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// Screen-space movement used to re-anchor the object.
    ///
    /// The gesture that creates an object carries absolute normalized screen
    /// coordinates; every later `Move` is a delta added to the running cursor.
    Move {
        /// Horizontal coordinate or delta.
        x: f32,
        /// Vertical coordinate or delta.
        y: f32,
    },
    /// Relative rotation/scale adjustment.
    Update {
        /// Rotation around the up axis to add, in radians.
        delta_yaw: f32,
        /// Factor the current scale is multiplied by.
        scale_factor: f32,
    },
}

impl GestureEvent {
    /// Shorthand for a [`GestureEvent::Move`].
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::Move { x, y }
    }

    /// Shorthand for a [`GestureEvent::Update`].
    pub const fn update(delta_yaw: f32, scale_factor: f32) -> Self {
        Self::Update {
            delta_yaw,
            scale_factor,
        }
    }
}
