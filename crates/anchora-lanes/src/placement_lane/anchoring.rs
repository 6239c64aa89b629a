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

use anchora_core::math::Vec2;
use anchora_core::tracking::{HitResult, TrackableKind};

/// Picks the hit an object should anchor to.
///
/// Feature-point hits are preferred; otherwise the first (closest) hit wins.
/// Returns `None` on a miss.
pub fn select_anchor_hit(hits: &[HitResult]) -> Option<&HitResult> {
    hits.iter()
        .find(|hit| hit.trackable == TrackableKind::Point)
        .or_else(|| hits.first())
}

/// Accumulates relative drag deltas into an absolute screen position.
///
/// Gesture sources that only report deltas drive a cursor and publish its
/// position as a [`GestureEvent::Move`](anchora_core::GestureEvent::Move).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenCursor {
    position: Vec2,
}

impl ScreenCursor {
    /// Starts the cursor at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }

    /// The current position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the cursor by a delta and returns the new position.
    pub fn advance(&mut self, dx: f32, dy: f32) -> Vec2 {
        self.position += Vec2::new(dx, dy);
        self.position
    }
}
