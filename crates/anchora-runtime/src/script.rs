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


//! The gesture sequence replayed against the placed object.

use anchora_sdk::prelude::{GesturePublisher, ScaleRamp, ROTATION_NUDGE_DEGREES};

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Drag by a normalized screen delta.
    Move(f32, f32),
    /// Rotate by this many degrees.
    Rotate(f32),
    /// One press-and-hold tick of the grow control.
    Grow,
    /// One press-and-hold tick of the shrink control.
    Shrink,
    /// Release of the scale controls.
    ReleaseScale,
}

/// Drag a little, nudge both ways, hold grow then shrink.
pub fn default_script() -> Vec<Step> {
    let mut script = vec![
        Step::Move(0.05, 0.0),
        Step::Move(0.0, -0.05),
        Step::Rotate(ROTATION_NUDGE_DEGREES),
        Step::Rotate(ROTATION_NUDGE_DEGREES),
        Step::Rotate(-ROTATION_NUDGE_DEGREES),
    ];
    script.extend(std::iter::repeat(Step::Grow).take(10));
    script.push(Step::ReleaseScale);
    script.extend(std::iter::repeat(Step::Shrink).take(5));
    script.push(Step::ReleaseScale);
    script
}

/// Plays a script one step at a time.
#[derive(Debug)]
pub struct ScriptPlayer {
    steps: std::vec::IntoIter<Step>,
    ramp: ScaleRamp,
    played: usize,
}

impl ScriptPlayer {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into_iter(),
            ramp: ScaleRamp::default(),
            played: 0,
        }
    }

    /// Publishes the next step. Returns `false` once the script is exhausted.
    pub fn play_next(&mut self, gestures: &GesturePublisher) -> bool {
        let Some(step) = self.steps.next() else {
            return false;
        };
        log::trace!("Script step {}: {:?}", self.played, step);
        match step {
            Step::Move(dx, dy) => gestures.publish_move(dx, dy),
            Step::Rotate(degrees) => gestures.rotate_degrees(degrees),
            Step::Grow => gestures.publish_update(0.0, self.ramp.grow()),
            Step::Shrink => gestures.publish_update(0.0, self.ramp.shrink()),
            Step::ReleaseScale => self.ramp.reset(),
        }
        self.played += 1;
        true
    }

    pub fn played(&self) -> usize {
        self.played
    }
}
