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

//! A scriptable platform for running sessions without a device.

use crate::graphics::HeadlessRenderHost;
use crate::tracking::{PlaneSessionConfig, SimulatedPlaneSession};
use anchora_core::asset::AssetStorage;
use anchora_core::platform::{GraphicsVersion, Platform};
use anchora_core::scene::RenderHost;
use anchora_core::tracking::TrackingSession;
use anchora_core::SessionError;
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

/// How the tracking runtime install check resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingRuntime {
    /// Already installed.
    #[default]
    Installed,
    /// Missing, and the user declines the install prompt.
    InstallDeclined,
    /// Not available on this device at all.
    Unavailable,
}

/// A [`Platform`] whose answers are fixed up front.
///
/// Keeps a handle on the hosts it creates so callers can inspect them after
/// the session has ended.
pub struct HeadlessPlatform {
    graphics_version: GraphicsVersion,
    tracking_runtime: TrackingRuntime,
    camera_permission: Cell<bool>,
    grants_permission: bool,
    session_failure: Option<String>,
    session_config: PlaneSessionConfig,
    storage: Arc<dyn AssetStorage>,
    render_host: RefCell<Option<Rc<HeadlessRenderHost>>>,
    tracking_session: RefCell<Option<Rc<SimulatedPlaneSession>>>,
}

impl HeadlessPlatform {
    /// A capable platform with camera access already granted.
    pub fn new(storage: Arc<dyn AssetStorage>) -> Self {
        Self {
            graphics_version: GraphicsVersion::new(3, 2),
            tracking_runtime: TrackingRuntime::Installed,
            camera_permission: Cell::new(true),
            grants_permission: true,
            session_failure: None,
            session_config: PlaneSessionConfig::default(),
            storage,
            render_host: RefCell::new(None),
            tracking_session: RefCell::new(None),
        }
    }

    /// Sets the supported graphics version.
    pub fn with_graphics_version(mut self, version: GraphicsVersion) -> Self {
        self.graphics_version = version;
        self
    }

    /// Sets how the tracking runtime check resolves.
    pub fn with_tracking_runtime(mut self, runtime: TrackingRuntime) -> Self {
        self.tracking_runtime = runtime;
        self
    }

    /// Starts without camera access; `grants` is the user's answer to the prompt.
    pub fn with_permission_prompt(mut self, grants: bool) -> Self {
        self.camera_permission = Cell::new(false);
        self.grants_permission = grants;
        self
    }

    /// Makes tracking session construction fail with `reason`.
    pub fn with_session_failure(mut self, reason: impl Into<String>) -> Self {
        self.session_failure = Some(reason.into());
        self
    }

    /// Sets the parameters of the simulated tracking session.
    pub fn with_session_config(mut self, config: PlaneSessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// The last render host created.
    pub fn render_host(&self) -> Option<Rc<HeadlessRenderHost>> {
        self.render_host.borrow().clone()
    }

    /// The last tracking session created.
    pub fn tracking_session(&self) -> Option<Rc<SimulatedPlaneSession>> {
        self.tracking_session.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Platform for HeadlessPlatform {
    fn graphics_version(&self) -> GraphicsVersion {
        self.graphics_version
    }

    async fn ensure_tracking_runtime(&self) -> Result<(), SessionError> {
        match self.tracking_runtime {
            TrackingRuntime::Installed => Ok(()),
            TrackingRuntime::InstallDeclined => {
                log::info!("Tracking runtime install declined.");
                Err(SessionError::UserCancelled)
            }
            TrackingRuntime::Unavailable => Err(SessionError::Unsupported(
                "tracking runtime unavailable on this device".into(),
            )),
        }
    }

    fn has_camera_permission(&self) -> bool {
        self.camera_permission.get()
    }

    async fn request_camera_permission(&self) -> Result<bool, SessionError> {
        self.camera_permission.set(self.grants_permission);
        Ok(self.grants_permission)
    }

    fn create_render_host(&self) -> Result<Rc<dyn RenderHost>, SessionError> {
        let host = Rc::new(HeadlessRenderHost::new());
        *self.render_host.borrow_mut() = Some(Rc::clone(&host));
        Ok(host)
    }

    fn create_tracking_session(
        &self,
        _render_host: &Rc<dyn RenderHost>,
    ) -> Result<Rc<dyn TrackingSession>, SessionError> {
        if let Some(reason) = &self.session_failure {
            return Err(SessionError::Init(reason.clone()));
        }
        let session = Rc::new(SimulatedPlaneSession::new(self.session_config));
        *self.tracking_session.borrow_mut() = Some(Rc::clone(&session));
        Ok(session)
    }

    fn asset_storage(&self) -> Arc<dyn AssetStorage> {
        Arc::clone(&self.storage)
    }
}

impl std::fmt::Debug for HeadlessPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessPlatform")
            .field("graphics_version", &self.graphics_version)
            .field("tracking_runtime", &self.tracking_runtime)
            .field("camera_permission", &self.camera_permission.get())
            .finish_non_exhaustive()
    }
}
