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

//! The public-facing API of the Anchora placement engine.
//!
//! A [`SessionCoordinator`] acquires everything a placement session needs from
//! a [`Platform`](anchora_core::platform::Platform), hands an [`ArSession`] to
//! the application and releases it all in reverse order when the application
//! returns, fails or is cancelled.

#![warn(missing_docs)]

pub mod config;
pub mod frame_pump;
pub mod pool;
pub mod release_stack;
pub mod session;

pub use config::{PlacementConfig, SessionConfig};
pub use frame_pump::FramePump;
pub use pool::ObjectPool;
pub use release_stack::ReleaseStack;
pub use session::{ArSession, SessionCoordinator, SessionEnd, TrackingRun};

/// Commonly used types, re-exported for applications.
pub mod prelude {
    pub use crate::{ArSession, SessionConfig, SessionCoordinator, SessionEnd};
    pub use anchora_agents::object_agent::{GesturePublisher, ObjectId};
    pub use anchora_core::asset::{AssetReference, AssetStatus};
    pub use anchora_core::platform::{GraphicsVersion, Platform};
    pub use anchora_core::SessionError;
    pub use anchora_lanes::placement_lane::{ObjectTransform, ScaleRamp, ROTATION_NUDGE_DEGREES};
}
