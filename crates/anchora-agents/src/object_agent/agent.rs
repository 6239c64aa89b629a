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

//! The per-object state machine.

use super::{GesturePublisher, ObjectContext, ObjectId};
use anchora_core::asset::{AssetReference, AssetStatus};
use anchora_core::event::{EventChannel, Subscription};
use anchora_core::gesture::GestureEvent;
use anchora_core::math::Vec3;
use anchora_core::scene::{LoadedAsset, RenderHost};
use anchora_core::tracking::{FrameTick, TrackingSession};
use anchora_lanes::asset_lane::AssetLoadLane;
use anchora_lanes::placement_lane::{select_anchor_hit, ObjectTransform, ScreenCursor};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Mutable state shared by the controller and its pipelines.
///
/// Only touched from the cooperative thread, and never borrowed across an
/// `.await`.
#[derive(Debug)]
struct ObjectState {
    transform: ObjectTransform,
    cursor: ScreenCursor,
    loaded_asset: Option<LoadedAsset>,
    registered: bool,
    destroyed: bool,
}

/// Drives one placed object from its placement gesture until it is destroyed.
///
/// Must be created inside a [`tokio::task::LocalSet`]: every pipeline runs as
/// a local task on the session's thread.
pub struct ObjectController {
    id: ObjectId,
    reference: AssetReference,
    state: Rc<RefCell<ObjectState>>,
    gestures: EventChannel<GestureEvent>,
    status: Rc<watch::Sender<AssetStatus>>,
    tasks: Vec<JoinHandle<()>>,
    load_task: Option<JoinHandle<()>>,
    render_host: Rc<dyn RenderHost>,
    loader: AssetLoadLane,
}

impl ObjectController {
    /// Places a new object at screen point `(x, y)` and starts its pipelines.
    ///
    /// The initial ray-cast runs against the session's current frame. A miss
    /// keeps the initial transform's translation. The asset load starts
    /// right away and settles in [`asset_status`](Self::asset_status).
    ///
    /// # Panics
    /// Panics when called outside a [`tokio::task::LocalSet`].
    pub fn spawn(
        id: ObjectId,
        x: f32,
        y: f32,
        reference: AssetReference,
        context: ObjectContext,
        frame_ticks: &EventChannel<FrameTick>,
    ) -> Self {
        let ObjectContext {
            render_host,
            tracking_session,
            loader,
            initial_transform,
        } = context;

        let mut transform = initial_transform;
        match anchor_translation(&*tracking_session, x, y) {
            Some(translation) => transform.translation = translation,
            None => log::debug!("{}: initial ray-cast at ({}, {}) missed.", id, x, y),
        }

        let state = Rc::new(RefCell::new(ObjectState {
            transform,
            cursor: ScreenCursor::new(x, y),
            loaded_asset: None,
            registered: false,
            destroyed: false,
        }));
        let gestures = EventChannel::new();
        let (status, _) = watch::channel(AssetStatus::Loading);

        // Subscribe before anything can be published.
        let tasks = vec![
            tokio::task::spawn_local(run_reanchoring(
                id,
                Rc::clone(&state),
                tracking_session,
                gestures.subscribe(),
            )),
            tokio::task::spawn_local(run_transform_updates(
                Rc::clone(&state),
                gestures.subscribe(),
            )),
            tokio::task::spawn_local(run_frame_composition(
                id,
                Rc::clone(&state),
                Rc::clone(&render_host),
                frame_ticks.subscribe(),
            )),
        ];

        let mut controller = Self {
            id,
            reference: reference.clone(),
            state,
            gestures,
            status: Rc::new(status),
            tasks,
            load_task: None,
            render_host,
            loader,
        };
        log::debug!("{}: placed at {:?}.", id, transform.translation);
        controller.start_load(reference);
        controller
    }

    /// The object's identifier.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The asset currently backing the object.
    pub fn reference(&self) -> &AssetReference {
        &self.reference
    }

    /// A publisher for this object's gestures.
    pub fn gestures(&self) -> GesturePublisher {
        GesturePublisher::new(self.gestures.clone())
    }

    /// Shorthand for [`GesturePublisher::publish_move`].
    pub fn publish_move(&self, dx: f32, dy: f32) {
        self.gestures().publish_move(dx, dy);
    }

    /// Shorthand for [`GesturePublisher::publish_update`].
    pub fn publish_update(&self, delta_yaw: f32, scale_factor: f32) {
        self.gestures().publish_update(delta_yaw, scale_factor);
    }

    /// A snapshot of the accumulated transform.
    pub fn transform(&self) -> ObjectTransform {
        self.state.borrow().transform
    }

    /// Where the backing asset is in its lifecycle.
    pub fn asset_status(&self) -> AssetStatus {
        self.status.borrow().clone()
    }

    /// A receiver observing every asset status change.
    ///
    /// Holding it does not borrow the controller, so it can be awaited while
    /// the controller sits in a shared pool.
    pub fn status_receiver(&self) -> watch::Receiver<AssetStatus> {
        self.status.subscribe()
    }

    /// Waits until the current load has settled and returns the outcome.
    pub async fn wait_for_asset(&self) -> AssetStatus {
        wait_until_settled(self.status_receiver()).await
    }

    /// Swaps the backing asset.
    ///
    /// Any in-flight load is aborted and the current asset is unregistered
    /// and released before the new load starts. Does nothing once destroyed.
    pub fn replace_asset(&mut self, reference: AssetReference) {
        if self.is_destroyed() {
            log::warn!("{}: cannot replace the asset of a destroyed object.", self.id);
            return;
        }
        log::debug!("{}: replacing '{}' with '{}'.", self.id, self.reference, reference);
        if let Some(load) = self.load_task.take() {
            load.abort();
        }
        self.release_asset();
        self.reference = reference.clone();
        self.start_load(reference);
    }

    /// Returns `true` once [`destroy`](Self::destroy) has run.
    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    /// Stops every pipeline, aborts a pending load, then unregisters and
    /// releases the asset.
    ///
    /// Idempotent: later calls do nothing.
    pub fn destroy(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            if state.destroyed {
                return;
            }
            state.destroyed = true;
        }

        for task in self.tasks.drain(..) {
            task.abort();
        }
        if let Some(load) = self.load_task.take() {
            load.abort();
        }
        self.release_asset();
        self.status.send_replace(AssetStatus::Released);
        log::debug!("{}: destroyed.", self.id);
    }

    fn start_load(&mut self, reference: AssetReference) {
        self.status.send_replace(AssetStatus::Loading);
        self.load_task = Some(tokio::task::spawn_local(run_load(
            self.id,
            reference,
            self.loader.clone(),
            Rc::clone(&self.state),
            Rc::clone(&self.render_host),
            Rc::clone(&self.status),
        )));
    }

    fn release_asset(&self) {
        let (asset, registered) = {
            let mut state = self.state.borrow_mut();
            (
                state.loaded_asset.take(),
                std::mem::take(&mut state.registered),
            )
        };
        if let Some(asset) = asset {
            if registered {
                self.render_host.unregister_entities(&asset.entities);
            }
            self.render_host.destroy_asset(asset);
        }
    }
}

impl Drop for ObjectController {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl std::fmt::Debug for ObjectController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectController")
            .field("id", &self.id)
            .field("reference", &self.reference)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Waits on `receiver` until the status leaves [`AssetStatus::Loading`].
///
/// A controller dropped while waiting reads as [`AssetStatus::Released`].
pub async fn wait_until_settled(mut receiver: watch::Receiver<AssetStatus>) -> AssetStatus {
    receiver
        .wait_for(AssetStatus::is_settled)
        .await
        .map(|status| AssetStatus::clone(&status))
        .unwrap_or(AssetStatus::Released)
}

/// Ray-casts the session's current frame and returns the chosen hit's position.
fn anchor_translation(session: &dyn TrackingSession, x: f32, y: f32) -> Option<Vec3> {
    let frame = session.current_frame()?;
    let hits = frame.ray_cast(x, y);
    select_anchor_hit(&hits).map(|hit| hit.pose.translation())
}

async fn run_reanchoring(
    id: ObjectId,
    state: Rc<RefCell<ObjectState>>,
    session: Rc<dyn TrackingSession>,
    mut gestures: Subscription<GestureEvent>,
) {
    while let Some(event) = gestures.recv().await {
        let GestureEvent::Move { x, y } = event else {
            continue;
        };
        let mut state = state.borrow_mut();
        let cursor = state.cursor.advance(x, y);
        match anchor_translation(&*session, cursor.x, cursor.y) {
            Some(translation) => state.transform.translation = translation,
            // Keep the stale position rather than jumping to the origin.
            None => log::trace!("{}: re-anchor ray-cast missed.", id),
        }
    }
}

async fn run_transform_updates(
    state: Rc<RefCell<ObjectState>>,
    mut gestures: Subscription<GestureEvent>,
) {
    while let Some(event) = gestures.recv().await {
        state.borrow_mut().transform.apply_gesture(&event);
    }
}

async fn run_frame_composition(
    id: ObjectId,
    state: Rc<RefCell<ObjectState>>,
    render_host: Rc<dyn RenderHost>,
    mut ticks: Subscription<FrameTick>,
) {
    while let Some(tick) = ticks.recv().await {
        let mut state = state.borrow_mut();
        let ObjectState {
            transform,
            loaded_asset,
            registered,
            ..
        } = &mut *state;
        let Some(asset) = loaded_asset.as_ref() else {
            continue;
        };

        if !*registered {
            render_host.register_entities(&asset.entities);
            *registered = true;
            log::debug!("{}: registered {} entities.", id, asset.entities.len());
        }
        render_host.set_entity_transform(asset.root, &transform.model_matrix());
        log::trace!("{}: composed frame {}.", id, tick.sequence);
    }
}

async fn run_load(
    id: ObjectId,
    reference: AssetReference,
    loader: AssetLoadLane,
    state: Rc<RefCell<ObjectState>>,
    render_host: Rc<dyn RenderHost>,
    status: Rc<watch::Sender<AssetStatus>>,
) {
    let decoded = loader.load(&reference).await;
    if state.borrow().destroyed {
        log::debug!("{}: load of '{}' finished after destroy, dropped.", id, reference);
        return;
    }

    match decoded.and_then(|model| render_host.upload_asset(model, &reference)) {
        Ok(asset) => {
            {
                let mut state = state.borrow_mut();
                debug_assert!(state.loaded_asset.is_none());
                state.loaded_asset = Some(asset);
                state.registered = false;
            }
            log::debug!("{}: asset '{}' ready.", id, reference);
            status.send_replace(AssetStatus::Ready);
        }
        Err(e) => {
            log::warn!("{}: asset load failed, object stays invisible: {}", id, e);
            status.send_replace(AssetStatus::Failed(e));
        }
    }
}
