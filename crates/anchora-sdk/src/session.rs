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

//! Session lifecycle: nested acquisition, the application-facing session
//! handle and the tracking start/stop cycle.

use crate::config::SessionConfig;
use crate::frame_pump::FramePump;
use crate::pool::ObjectPool;
use crate::release_stack::ReleaseStack;
use anchora_agents::object_agent::{
    wait_until_settled, GesturePublisher, ObjectContext, ObjectController, ObjectId,
};
use anchora_core::asset::{AssetReference, AssetStatus};
use anchora_core::event::EventChannel;
use anchora_core::platform::Platform;
use anchora_core::scene::RenderHost;
use anchora_core::tracking::{FrameTick, TrackingSession};
use anchora_core::SessionError;
use anchora_lanes::asset_lane::{AssetDecoder, AssetLoadLane, GltfDecoderLane};
use anchora_lanes::placement_lane::ObjectTransform;
use std::cell::{Ref, RefCell};
use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

/// How a session ended without a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The application body returned normally.
    Completed,
    /// The user declined an install or permission prompt.
    Cancelled,
}

/// Acquires a session's resources from a [`Platform`] and guarantees their
/// release.
pub struct SessionCoordinator<P: Platform> {
    platform: P,
    config: SessionConfig,
    decoder: Arc<dyn AssetDecoder>,
}

impl<P: Platform> SessionCoordinator<P> {
    /// Creates a coordinator decoding assets as glTF.
    pub fn new(platform: P, config: SessionConfig) -> Self {
        Self {
            platform,
            config,
            decoder: Arc::new(GltfDecoderLane::new()),
        }
    }

    /// Replaces the asset decoder.
    pub fn with_decoder(mut self, decoder: Arc<dyn AssetDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// The platform resources are acquired from.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Runs one session.
    ///
    /// Acquires, in order: capability checks, camera permission, the render
    /// host, the tracking session and the object pool. `body` then runs with
    /// the [`ArSession`]. Everything acquired is released in reverse order
    /// whatever the outcome, including when this future is dropped.
    ///
    /// # Returns
    /// [`SessionEnd::Cancelled`] when the user declined a prompt, otherwise
    /// [`SessionEnd::Completed`] once `body` returns `Ok`.
    ///
    /// # Errors
    /// Fatal [`SessionError`]s from acquisition or from `body`.
    ///
    /// # Panics
    /// Panics when called outside a [`tokio::task::LocalSet`].
    pub async fn run<F, Fut>(&self, body: F) -> Result<SessionEnd, SessionError>
    where
        F: FnOnce(ArSession) -> Fut,
        Fut: Future<Output = Result<(), SessionError>>,
    {
        let mut releases = ReleaseStack::new();
        let outcome = self.acquire_and_run(&mut releases, body).await;
        releases.unwind();

        match outcome {
            Ok(()) => {
                log::info!("Session completed.");
                Ok(SessionEnd::Completed)
            }
            Err(SessionError::UserCancelled) => {
                log::info!("Session cancelled by the user.");
                Ok(SessionEnd::Cancelled)
            }
            Err(e) => {
                log::error!("Session ended: {}", e);
                Err(e)
            }
        }
    }

    async fn acquire_and_run<F, Fut>(
        &self,
        releases: &mut ReleaseStack,
        body: F,
    ) -> Result<(), SessionError>
    where
        F: FnOnce(ArSession) -> Fut,
        Fut: Future<Output = Result<(), SessionError>>,
    {
        // --- 1. Capability checks ---
        let version = self.platform.graphics_version();
        if version < self.config.min_graphics_version {
            return Err(SessionError::Unsupported(format!(
                "graphics version {} is below the required {}",
                version, self.config.min_graphics_version
            )));
        }
        self.platform.ensure_tracking_runtime().await?;

        // --- 2. Permission ---
        if !self.platform.has_camera_permission()
            && !self.platform.request_camera_permission().await?
        {
            log::info!("Camera permission denied.");
            return Err(SessionError::UserCancelled);
        }

        // --- 3. Render host and tracking session ---
        let render_host = self.platform.create_render_host()?;
        let host = Rc::clone(&render_host);
        releases.push("render host", move || host.shutdown());

        let tracking_session = self.platform.create_tracking_session(&render_host)?;
        let session = Rc::clone(&tracking_session);
        releases.push("tracking session", move || session.close());

        // --- 4. Object pool ---
        let pool = Rc::new(RefCell::new(ObjectPool::new()));
        let pool_release = Rc::clone(&pool);
        releases.push("object pool", move || pool_release.borrow_mut().destroy_all());

        let frame_ticks = EventChannel::new();
        let pump = FramePump::new(
            Rc::clone(&tracking_session),
            frame_ticks.clone(),
            self.config.frame_interval(),
        );
        let ar_session = ArSession {
            render_host,
            tracking_session,
            loader: AssetLoadLane::new(self.platform.asset_storage(), Arc::clone(&self.decoder)),
            initial_transform: self.config.initial_transform(),
            frame_ticks,
            pump: Rc::new(RefCell::new(pump)),
            pool,
        };

        log::info!("Session acquired, running.");
        body(ar_session).await
    }
}

impl<P: Platform + std::fmt::Debug> std::fmt::Debug for SessionCoordinator<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCoordinator")
            .field("platform", &self.platform)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The application's handle on a running session.
///
/// Places and removes objects, exposes their gesture publishers and drives
/// the frame tick source. Dropping it stops the frame pump; the objects are
/// released by the coordinator.
pub struct ArSession {
    render_host: Rc<dyn RenderHost>,
    tracking_session: Rc<dyn TrackingSession>,
    loader: AssetLoadLane,
    initial_transform: ObjectTransform,
    frame_ticks: EventChannel<FrameTick>,
    pump: Rc<RefCell<FramePump>>,
    pool: Rc<RefCell<ObjectPool>>,
}

impl ArSession {
    /// Places a new object at screen point `(x, y)` backed by `reference`.
    pub fn place_object(&self, x: f32, y: f32, reference: AssetReference) -> ObjectId {
        let mut pool = self.pool.borrow_mut();
        let id = pool.next_id();
        let context = ObjectContext::new(
            Rc::clone(&self.render_host),
            Rc::clone(&self.tracking_session),
            self.loader.clone(),
        )
        .with_initial_transform(self.initial_transform);

        log::info!("Placing {} with '{}'.", id, reference);
        pool.insert(ObjectController::spawn(
            id,
            x,
            y,
            reference,
            context,
            &self.frame_ticks,
        ));
        id
    }

    /// Borrows the controller of `id`. Do not hold the borrow across an `.await`.
    pub fn object(&self, id: ObjectId) -> Option<Ref<'_, ObjectController>> {
        Ref::filter_map(self.pool.borrow(), |pool| pool.get(id)).ok()
    }

    /// A gesture publisher for `id`.
    pub fn gestures(&self, id: ObjectId) -> Option<GesturePublisher> {
        self.object(id).map(|object| object.gestures())
    }

    /// A snapshot of the transform of `id`.
    pub fn transform(&self, id: ObjectId) -> Option<ObjectTransform> {
        self.object(id).map(|object| object.transform())
    }

    /// Waits for the asset of `id` to settle.
    pub async fn wait_for_asset(&self, id: ObjectId) -> Option<AssetStatus> {
        let receiver = self.object(id).map(|object| object.status_receiver())?;
        Some(wait_until_settled(receiver).await)
    }

    /// Swaps the asset backing `id`. Returns `false` for unknown ids.
    pub fn replace_asset(&self, id: ObjectId, reference: AssetReference) -> bool {
        match self.pool.borrow_mut().get_mut(id) {
            Some(object) => {
                object.replace_asset(reference);
                true
            }
            None => false,
        }
    }

    /// Destroys the object `id`. Returns `false` for unknown ids.
    pub fn remove_object(&self, id: ObjectId) -> bool {
        let removed = self.pool.borrow_mut().remove(id);
        match removed {
            Some(mut object) => {
                object.destroy();
                log::info!("Removed {}.", id);
                true
            }
            None => false,
        }
    }

    /// Ids of every placed object.
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.pool.borrow().ids()
    }

    /// The channel frame ticks are published on.
    pub fn frame_ticks(&self) -> EventChannel<FrameTick> {
        self.frame_ticks.clone()
    }

    /// The session's render host.
    pub fn render_host(&self) -> &Rc<dyn RenderHost> {
        &self.render_host
    }

    /// The session's tracking session.
    pub fn tracking_session(&self) -> &Rc<dyn TrackingSession> {
        &self.tracking_session
    }

    /// Resumes tracking and starts the frame pump until the returned run is
    /// stopped or dropped.
    ///
    /// # Errors
    /// Whatever the tracking session reports on resume.
    pub fn start(&self) -> Result<TrackingRun, SessionError> {
        TrackingRun::start(Rc::clone(&self.tracking_session), Rc::clone(&self.pump))
    }

    /// Publishes one frame tick by hand. `None` while tracking is paused.
    pub fn pump_frame(&self) -> Option<FrameTick> {
        self.pump.borrow().pump_once()
    }

    /// Whether any frame has reported reliable tracking yet.
    pub fn tracking_established(&self) -> bool {
        self.pump.borrow().tracking_established()
    }

    /// Number of frame ticks published so far.
    pub fn frames_published(&self) -> u64 {
        self.pump.borrow().frames_published()
    }
}

impl Drop for ArSession {
    fn drop(&mut self) {
        if let Ok(mut pump) = self.pump.try_borrow_mut() {
            pump.stop();
        }
    }
}

impl std::fmt::Debug for ArSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArSession")
            .field("objects", &self.object_ids())
            .field("pump", &self.pump)
            .finish_non_exhaustive()
    }
}

/// One start/stop cycle of tracking.
///
/// Starting resumes the tracking session then starts the frame pump;
/// stopping (explicitly or on drop) stops the pump then pauses the session.
pub struct TrackingRun {
    session: Rc<dyn TrackingSession>,
    pump: Rc<RefCell<FramePump>>,
    active: bool,
}

impl TrackingRun {
    fn start(
        session: Rc<dyn TrackingSession>,
        pump: Rc<RefCell<FramePump>>,
    ) -> Result<Self, SessionError> {
        session.resume()?;
        pump.borrow_mut().start();
        log::info!("Tracking started.");
        Ok(Self {
            session,
            pump,
            active: true,
        })
    }

    /// Whether this run has not been stopped yet.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stops the frame pump, then pauses tracking.
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        if !std::mem::take(&mut self.active) {
            return;
        }
        self.pump.borrow_mut().stop();
        self.session.pause();
        log::info!("Tracking stopped.");
    }
}

impl std::fmt::Debug for TrackingRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingRun")
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Drop for TrackingRun {
    fn drop(&mut self) {
        self.halt();
    }
}
