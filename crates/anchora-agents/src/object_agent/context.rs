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

use anchora_core::scene::RenderHost;
use anchora_core::tracking::TrackingSession;
use anchora_lanes::asset_lane::AssetLoadLane;
use anchora_lanes::placement_lane::ObjectTransform;
use std::fmt;
use std::rc::Rc;

/// Identifies one placed object within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// The collaborators an object controller works against.
///
/// Hosts are shared by every controller of the session.
#[derive(Clone)]
pub struct ObjectContext {
    /// Scene graph and GPU upload.
    pub render_host: Rc<dyn RenderHost>,
    /// Source of the frames ray-casts run against.
    pub tracking_session: Rc<dyn TrackingSession>,
    /// Off-thread asset read and decode.
    pub loader: AssetLoadLane,
    /// Rotation and scale a new object starts with. The translation is
    /// replaced by the initial ray-cast when it hits.
    pub initial_transform: ObjectTransform,
}

impl ObjectContext {
    /// Builds a context with the default initial transform.
    pub fn new(
        render_host: Rc<dyn RenderHost>,
        tracking_session: Rc<dyn TrackingSession>,
        loader: AssetLoadLane,
    ) -> Self {
        Self {
            render_host,
            tracking_session,
            loader,
            initial_transform: ObjectTransform::default(),
        }
    }

    /// Replaces the transform new objects start with.
    pub fn with_initial_transform(mut self, transform: ObjectTransform) -> Self {
        self.initial_transform = transform;
        self
    }
}

impl fmt::Debug for ObjectContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectContext")
            .field("initial_transform", &self.initial_transform)
            .finish_non_exhaustive()
    }
}
