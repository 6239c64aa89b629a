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

//! Contracts of the hosting platform: capability checks, permissions, and
//! construction of the tracking session and render context.

mod error;

pub use error::SessionError;

use crate::asset::AssetStorage;
use crate::scene::RenderHost;
use crate::tracking::TrackingSession;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// A graphics API version, compared lexicographically (`major`, then `minor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphicsVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
}

impl GraphicsVersion {
    /// Creates a version.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for GraphicsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The hosting platform the session coordinator acquires resources from.
///
/// The asynchronous methods may suspend on user interaction (an install
/// prompt, a permission dialog). Everything runs on one cooperative thread,
/// hence `?Send`.
#[async_trait(?Send)]
pub trait Platform {
    /// The graphics API version the device supports.
    fn graphics_version(&self) -> GraphicsVersion;

    /// Makes sure the tracking runtime is installed, prompting if needed.
    ///
    /// Returns [`SessionError::UserCancelled`] when the user declines the install.
    async fn ensure_tracking_runtime(&self) -> Result<(), SessionError>;

    /// Whether camera access has already been granted.
    fn has_camera_permission(&self) -> bool;

    /// Asks the user for camera access. `Ok(false)` means it was denied.
    async fn request_camera_permission(&self) -> Result<bool, SessionError>;

    /// Builds the render context.
    fn create_render_host(&self) -> Result<Rc<dyn RenderHost>, SessionError>;

    /// Builds the tracking session bound to `render_host`.
    fn create_tracking_session(
        &self,
        render_host: &Rc<dyn RenderHost>,
    ) -> Result<Rc<dyn TrackingSession>, SessionError>;

    /// The storage assets are read from.
    fn asset_storage(&self) -> Arc<dyn AssetStorage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphics_version_ordering() {
        assert!(GraphicsVersion::new(3, 0) < GraphicsVersion::new(3, 1));
        assert!(GraphicsVersion::new(2, 9) < GraphicsVersion::new(3, 0));
        assert_eq!(GraphicsVersion::new(3, 2).to_string(), "3.2");
    }
}
