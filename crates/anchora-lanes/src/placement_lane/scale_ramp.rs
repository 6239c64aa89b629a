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

/// Turns repeated "grow"/"shrink" nudges into accelerating scale factors.
///
/// Each nudge in the same direction adds one `step` to a running offset and
/// yields `1 + offset`; reversing direction restarts the offset at one step.
/// The offset is capped at `max_offset` so shrinking never reaches zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRamp {
    step: f32,
    max_offset: f32,
    offset: f32,
}

impl Default for ScaleRamp {
    fn default() -> Self {
        Self::new(0.01, 0.5)
    }
}

impl ScaleRamp {
    /// Creates a ramp. `max_offset` is clamped below `1.0`.
    pub fn new(step: f32, max_offset: f32) -> Self {
        Self {
            step: step.abs(),
            max_offset: max_offset.abs().min(0.99),
            offset: 0.0,
        }
    }

    /// The factor for one "grow" nudge.
    pub fn grow(&mut self) -> f32 {
        self.offset = if self.offset < 0.0 {
            self.step
        } else {
            self.offset + self.step
        };
        self.factor()
    }

    /// The factor for one "shrink" nudge.
    pub fn shrink(&mut self) -> f32 {
        self.offset = if self.offset > 0.0 {
            -self.step
        } else {
            self.offset - self.step
        };
        self.factor()
    }

    /// Forgets the accumulated offset.
    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    fn factor(&mut self) -> f32 {
        self.offset = self.offset.clamp(-self.max_offset, self.max_offset);
        1.0 + self.offset
    }
}
