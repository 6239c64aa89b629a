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

//! A tracking session that sees a single, infinite horizontal plane.

use anchora_core::math::{degrees_to_radians, Mat4, Vec3, Vec4};
use anchora_core::tracking::{
    Frame, HitResult, Pose, TrackableKind, TrackingQuality, TrackingSession,
};
use anchora_core::SessionError;
use std::cell::RefCell;
use std::rc::Rc;

/// Camera and scene parameters of a [`SimulatedPlaneSession`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSessionConfig {
    /// Height of the camera above the world origin, in meters.
    pub camera_height: f32,
    /// Camera pitch in degrees. Negative values look down.
    pub camera_pitch_degrees: f32,
    /// Vertical field of view in degrees.
    pub vertical_fov_degrees: f32,
    /// Viewport width divided by height.
    pub aspect_ratio: f32,
    /// Height of the detected plane.
    pub plane_height: f32,
    /// Frames produced after a resume before tracking is established.
    pub warmup_frames: u64,
}

impl Default for PlaneSessionConfig {
    fn default() -> Self {
        Self {
            camera_height: 1.5,
            camera_pitch_degrees: -30.0,
            vertical_fov_degrees: 60.0,
            aspect_ratio: 9.0 / 16.0,
            plane_height: 0.0,
            warmup_frames: 3,
        }
    }
}

/// Snapshot produced by [`SimulatedPlaneSession::update`].
#[derive(Debug)]
struct PlaneFrame {
    config: PlaneSessionConfig,
    quality: TrackingQuality,
}

impl PlaneFrame {
    /// The world-space direction of the ray through normalized screen point `(x, y)`.
    fn ray_direction(&self, x: f32, y: f32) -> Vec3 {
        let half_height = (degrees_to_radians(self.config.vertical_fov_degrees) * 0.5).tan();
        let half_width = half_height * self.config.aspect_ratio;
        let camera_space = Vec3::new(
            (2.0 * x - 1.0) * half_width,
            (1.0 - 2.0 * y) * half_height,
            -1.0,
        );
        let pitch = Mat4::from_axis_angle(
            Vec3::X,
            degrees_to_radians(self.config.camera_pitch_degrees),
        );
        (pitch * Vec4::from_vec3(camera_space, 0.0))
            .truncate()
            .normalize()
    }
}

impl Frame for PlaneFrame {
    fn tracking_quality(&self) -> TrackingQuality {
        self.quality
    }

    fn ray_cast(&self, x: f32, y: f32) -> Vec<HitResult> {
        if self.quality != TrackingQuality::Tracking {
            return Vec::new();
        }
        if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
            return Vec::new();
        }

        let origin = Vec3::new(0.0, self.config.camera_height, 0.0);
        let direction = self.ray_direction(x, y);
        let plane_point = Vec3::new(0.0, self.config.plane_height, 0.0);
        raycast_plane(origin, direction, plane_point, Vec3::Y)
            .into_iter()
            .collect()
    }
}

/// Intersects a ray with a plane. `direction` must be normalized.
fn raycast_plane(
    origin: Vec3,
    direction: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<HitResult> {
    let denom = plane_normal.dot(direction);
    // Parallel to the plane.
    if denom.abs() < 1e-6 {
        return None;
    }

    let t = (plane_point - origin).dot(plane_normal) / denom;
    // Behind the camera.
    if t < 0.0 {
        return None;
    }

    Some(HitResult {
        pose: Pose::from_translation(origin + direction * t),
        trackable: TrackableKind::Plane,
        distance: t,
    })
}

#[derive(Debug, Default)]
struct SessionState {
    resumed: bool,
    closed: bool,
    frames_since_resume: u64,
    current: Option<Rc<PlaneFrame>>,
}

/// A tracking session over one simulated horizontal plane.
///
/// Produces no frames while paused. After a resume, frames report
/// [`TrackingQuality::Paused`] until the warm-up is over, then
/// [`TrackingQuality::Tracking`]; only tracked frames return ray-cast hits.
#[derive(Debug, Default)]
pub struct SimulatedPlaneSession {
    config: PlaneSessionConfig,
    state: RefCell<SessionState>,
}

impl SimulatedPlaneSession {
    /// Creates a paused session.
    pub fn new(config: PlaneSessionConfig) -> Self {
        Self {
            config,
            state: RefCell::new(SessionState::default()),
        }
    }

    /// The session's parameters.
    pub fn config(&self) -> &PlaneSessionConfig {
        &self.config
    }

    /// Whether the session is currently resumed.
    pub fn is_resumed(&self) -> bool {
        self.state.borrow().resumed
    }

    /// Whether [`TrackingSession::close`] has run.
    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }
}

impl TrackingSession for SimulatedPlaneSession {
    fn resume(&self) -> Result<(), SessionError> {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return Err(SessionError::Init("tracking session already closed".into()));
        }
        if !state.resumed {
            state.resumed = true;
            state.frames_since_resume = 0;
            log::debug!("Simulated tracking session resumed.");
        }
        Ok(())
    }

    fn pause(&self) {
        let mut state = self.state.borrow_mut();
        if state.resumed {
            state.resumed = false;
            log::debug!("Simulated tracking session paused.");
        }
    }

    fn update(&self) -> Option<Rc<dyn Frame>> {
        let mut state = self.state.borrow_mut();
        if !state.resumed {
            return None;
        }
        state.frames_since_resume += 1;
        let quality = if state.frames_since_resume > self.config.warmup_frames {
            TrackingQuality::Tracking
        } else {
            TrackingQuality::Paused
        };

        let frame = Rc::new(PlaneFrame {
            config: self.config,
            quality,
        });
        state.current = Some(Rc::clone(&frame));
        Some(frame)
    }

    fn current_frame(&self) -> Option<Rc<dyn Frame>> {
        self.state
            .borrow()
            .current
            .as_ref()
            .map(|frame| Rc::clone(frame) as Rc<dyn Frame>)
    }

    fn close(&self) {
        let mut state = self.state.borrow_mut();
        state.resumed = false;
        state.closed = true;
        state.current = None;
        log::info!("Simulated tracking session closed.");
    }
}
