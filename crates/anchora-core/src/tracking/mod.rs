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

//! Contracts of the external tracking session.
//!
//! The tracking host owns camera tracking and surface estimation. The engine
//! only consumes per-frame snapshots ([`Frame`]) and issues ray-casts against
//! them; it never drives tracking itself beyond `resume`/`pause`.

use crate::math::{Mat4, Vec3};
use crate::platform::SessionError;
use std::fmt;
use std::rc::Rc;

/// A position and orientation in world space, captured from a ray-cast hit.
///
/// Immutable once captured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    matrix: Mat4,
}

impl Pose {
    /// Wraps an affine world matrix.
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// A pose at `translation` with no rotation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_matrix(Mat4::from_translation(translation))
    }

    /// The position component of the pose.
    pub fn translation(&self) -> Vec3 {
        self.matrix.translation()
    }

    /// The full pose matrix.
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }
}

/// The kind of tracked geometry a ray-cast hit landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackableKind {
    /// A feature point of the tracked point cloud.
    Point,
    /// A detected plane.
    Plane,
    /// Any other trackable (depth sample, image, ...).
    Other,
}

/// One candidate surface hit returned by [`Frame::ray_cast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Where the ray met the surface.
    pub pose: Pose,
    /// What kind of trackable was hit.
    pub trackable: TrackableKind,
    /// Distance from the camera to the hit, in meters.
    pub distance: f32,
}

/// Whether the session currently has a reliable spatial estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackingQuality {
    /// The spatial estimate is reliable.
    Tracking,
    /// Tracking is temporarily lost; it may recover.
    #[default]
    Paused,
    /// Tracking has stopped and will not recover.
    Stopped,
}

/// A per-frame snapshot produced by the tracking session.
pub trait Frame {
    /// The tracking quality of this frame.
    fn tracking_quality(&self) -> TrackingQuality;

    /// Casts a ray through the screen point `(x, y)` into the tracked scene.
    ///
    /// Hits are ordered by relevance (closest first). An empty vector is a miss.
    fn ray_cast(&self, x: f32, y: f32) -> Vec<HitResult>;
}

/// The snapshot published on the shared frame-tick channel once per rendered frame.
#[derive(Clone)]
pub struct FrameTick {
    /// Monotonic frame counter assigned by the frame pump.
    pub sequence: u64,
    /// Copy of the frame's tracking quality.
    pub tracking_quality: TrackingQuality,
    /// The frame itself, for ray-casting.
    pub frame: Rc<dyn Frame>,
}

impl FrameTick {
    /// Captures a tick from a tracking frame.
    pub fn new(sequence: u64, frame: Rc<dyn Frame>) -> Self {
        Self {
            sequence,
            tracking_quality: frame.tracking_quality(),
            frame,
        }
    }

    /// Ray-casts against this tick's frame.
    pub fn ray_cast(&self, x: f32, y: f32) -> Vec<HitResult> {
        self.frame.ray_cast(x, y)
    }
}

impl fmt::Debug for FrameTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameTick")
            .field("sequence", &self.sequence)
            .field("tracking_quality", &self.tracking_quality)
            .finish_non_exhaustive()
    }
}

/// The tracking-session host.
///
/// Implementations use interior mutability: the engine shares one session
/// between the frame pump and every object controller on a single thread.
pub trait TrackingSession {
    /// Resumes camera tracking.
    fn resume(&self) -> Result<(), SessionError>;

    /// Pauses camera tracking. Pausing a paused session is a no-op.
    fn pause(&self);

    /// Advances the session by one frame and returns the new snapshot.
    ///
    /// Returns `None` while the session is paused.
    fn update(&self) -> Option<Rc<dyn Frame>>;

    /// The most recent snapshot, if any frame has been produced yet.
    fn current_frame(&self) -> Option<Rc<dyn Frame>>;

    /// Releases the session. Called exactly once during teardown.
    fn close(&self);
}
