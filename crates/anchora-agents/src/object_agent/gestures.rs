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

use anchora_core::event::EventChannel;
use anchora_core::gesture::GestureEvent;
use anchora_core::math::degrees_to_radians;

/// Input-side handle to one object's gesture channel.
///
/// Cheap to clone; UI handlers each keep their own copy. Publishing never
/// blocks, and an event not yet consumed is replaced by the next one.
#[derive(Debug, Clone)]
pub struct GesturePublisher {
    channel: EventChannel<GestureEvent>,
}

impl GesturePublisher {
    pub(crate) fn new(channel: EventChannel<GestureEvent>) -> Self {
        Self { channel }
    }

    /// Publishes a raw gesture.
    pub fn publish(&self, event: GestureEvent) {
        self.channel.publish(event);
    }

    /// Moves the object's screen cursor by `(dx, dy)` and re-anchors it.
    pub fn publish_move(&self, dx: f32, dy: f32) {
        self.publish(GestureEvent::moved(dx, dy));
    }

    /// Rotates by `delta_yaw` radians and multiplies the scale by `scale_factor`.
    pub fn publish_update(&self, delta_yaw: f32, scale_factor: f32) {
        self.publish(GestureEvent::update(delta_yaw, scale_factor));
    }

    /// Rotates by `degrees` around the up axis, leaving the scale alone.
    pub fn rotate_degrees(&self, degrees: f32) {
        self.publish_update(degrees_to_radians(degrees), 1.0);
    }
}
