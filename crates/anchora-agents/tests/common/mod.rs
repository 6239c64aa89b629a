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


//! Test doubles shared by the object agent tests.

#![allow(dead_code)]

use anchora_agents::object_agent::ObjectContext;
use anchora_core::asset::{
    AssetError, AssetReference, AssetStorage, DecodedMesh, DecodedModel,
};
use anchora_core::event::EventChannel;
use anchora_core::math::{Mat4, Vec3};
use anchora_core::scene::{AssetId, EntityId, LoadedAsset, RenderHost};
use anchora_core::tracking::{
    Frame, FrameTick, HitResult, Pose, TrackableKind, TrackingQuality, TrackingSession,
};
use anchora_core::SessionError;
use anchora_lanes::asset_lane::{AssetDecoder, AssetLoadLane};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::io;
use std::rc::Rc;
use std::sync::{mpsc, Arc, Mutex};

// --- Render host ---

/// One call received by the [`RecordingRenderHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Register(Vec<EntityId>),
    Unregister(Vec<EntityId>),
    SetTransform(EntityId, Mat4),
    Upload(AssetReference),
    Destroy(AssetId),
}

/// Records every call and hands out one entity per uploaded asset.
#[derive(Default)]
pub struct RecordingRenderHost {
    calls: RefCell<Vec<HostCall>>,
    next_id: Cell<u32>,
}

impl RecordingRenderHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, matches: impl Fn(&HostCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }

    pub fn registrations(&self) -> usize {
        self.count(|c| matches!(c, HostCall::Register(_)))
    }

    pub fn unregistrations(&self) -> usize {
        self.count(|c| matches!(c, HostCall::Unregister(_)))
    }

    pub fn uploads(&self) -> usize {
        self.count(|c| matches!(c, HostCall::Upload(_)))
    }

    pub fn destroyed_assets(&self) -> usize {
        self.count(|c| matches!(c, HostCall::Destroy(_)))
    }

    pub fn transforms(&self) -> Vec<Mat4> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                HostCall::SetTransform(_, m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    /// Matrices submitted for `entity`, oldest first.
    pub fn transforms_of(&self, entity: EntityId) -> Vec<Mat4> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                HostCall::SetTransform(e, m) if *e == entity => Some(*m),
                _ => None,
            })
            .collect()
    }

    /// Whether `entity` was registered and not unregistered since.
    pub fn is_registered(&self, entity: EntityId) -> bool {
        self.calls.borrow().iter().fold(false, |registered, c| match c {
            HostCall::Register(set) if set.contains(&entity) => true,
            HostCall::Unregister(set) if set.contains(&entity) => false,
            _ => registered,
        })
    }
}

impl RenderHost for RecordingRenderHost {
    fn register_entities(&self, entities: &[EntityId]) {
        self.calls
            .borrow_mut()
            .push(HostCall::Register(entities.to_vec()));
    }

    fn unregister_entities(&self, entities: &[EntityId]) {
        self.calls
            .borrow_mut()
            .push(HostCall::Unregister(entities.to_vec()));
    }

    fn set_entity_transform(&self, entity: EntityId, matrix: &Mat4) {
        self.calls
            .borrow_mut()
            .push(HostCall::SetTransform(entity, *matrix));
    }

    fn upload_asset(
        &self,
        _model: DecodedModel,
        reference: &AssetReference,
    ) -> Result<LoadedAsset, AssetError> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.calls
            .borrow_mut()
            .push(HostCall::Upload(reference.clone()));
        Ok(LoadedAsset {
            id: AssetId(id as u64),
            reference: reference.clone(),
            root: EntityId(id),
            entities: vec![EntityId(id)],
        })
    }

    fn destroy_asset(&self, asset: LoadedAsset) {
        self.calls.borrow_mut().push(HostCall::Destroy(asset.id));
    }

    fn shutdown(&self) {}
}

// --- Tracking session ---

struct StubFrame {
    hits: Vec<HitResult>,
    casts: Rc<RefCell<Vec<(f32, f32)>>>,
}

impl Frame for StubFrame {
    fn tracking_quality(&self) -> TrackingQuality {
        TrackingQuality::Tracking
    }

    fn ray_cast(&self, x: f32, y: f32) -> Vec<HitResult> {
        self.casts.borrow_mut().push((x, y));
        self.hits.clone()
    }
}

/// A session whose frames return scripted hits and record ray-cast points.
#[derive(Default)]
pub struct StubSession {
    hits: RefCell<Vec<HitResult>>,
    casts: Rc<RefCell<Vec<(f32, f32)>>>,
}

impl StubSession {
    pub fn hitting(position: Vec3) -> Rc<Self> {
        let session = Rc::new(Self::default());
        session.set_hit(Some(position));
        session
    }

    pub fn missing() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn set_hit(&self, position: Option<Vec3>) {
        *self.hits.borrow_mut() = position
            .map(|p| HitResult {
                pose: Pose::from_translation(p),
                trackable: TrackableKind::Point,
                distance: 1.0,
            })
            .into_iter()
            .collect();
    }

    pub fn last_cast(&self) -> Option<(f32, f32)> {
        self.casts.borrow().last().copied()
    }

    pub fn frame(&self) -> Rc<dyn Frame> {
        Rc::new(StubFrame {
            hits: self.hits.borrow().clone(),
            casts: Rc::clone(&self.casts),
        })
    }
}

impl TrackingSession for StubSession {
    fn resume(&self) -> Result<(), SessionError> {
        Ok(())
    }

    fn pause(&self) {}

    fn update(&self) -> Option<Rc<dyn Frame>> {
        Some(self.frame())
    }

    fn current_frame(&self) -> Option<Rc<dyn Frame>> {
        Some(self.frame())
    }

    fn close(&self) {}
}

// --- Asset loading ---

struct StubStorage;

impl AssetStorage for StubStorage {
    fn open_binary(&self, _reference: &AssetReference) -> io::Result<Vec<u8>> {
        Ok(b"stub".to_vec())
    }
}

/// Decoder outcomes used by the tests.
pub enum StubDecoder {
    Succeeds,
    Fails,
    /// Blocks until the paired sender fires or is dropped.
    Gated(Mutex<mpsc::Receiver<()>>),
}

impl StubDecoder {
    pub fn gated() -> (mpsc::Sender<()>, Self) {
        let (gate, receiver) = mpsc::channel();
        (gate, Self::Gated(Mutex::new(receiver)))
    }
}

fn triangle() -> DecodedModel {
    DecodedModel {
        meshes: vec![DecodedMesh {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: None,
            indices: None,
        }],
    }
}

impl AssetDecoder for StubDecoder {
    fn decode(&self, _bytes: &[u8]) -> Result<DecodedModel, Box<dyn Error + Send + Sync>> {
        match self {
            StubDecoder::Succeeds => Ok(triangle()),
            StubDecoder::Fails => Err("malformed model".into()),
            StubDecoder::Gated(gate) => {
                if let Ok(receiver) = gate.lock() {
                    let _ = receiver.recv();
                }
                Ok(triangle())
            }
        }
    }
}

// --- Wiring ---

pub fn context(
    host: &Rc<RecordingRenderHost>,
    session: &Rc<StubSession>,
    decoder: StubDecoder,
) -> ObjectContext {
    let loader = AssetLoadLane::new(Arc::new(StubStorage), Arc::new(decoder));
    ObjectContext::new(host.clone(), session.clone(), loader)
}

/// Publishes one frame tick built from the session's current frame.
pub fn tick(channel: &EventChannel<FrameTick>, session: &StubSession, sequence: u64) {
    channel.publish(FrameTick::new(sequence, session.frame()));
}

/// Lets every local task run until it is waiting again.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
