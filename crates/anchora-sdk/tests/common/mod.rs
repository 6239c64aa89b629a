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


//! Test doubles for the session tests: a platform that logs every lifecycle
//! call made on the hosts it creates.

#![allow(dead_code)]

use anchora_core::asset::{
    AssetError, AssetReference, AssetStorage, DecodedMesh, DecodedModel,
};
use anchora_core::math::{Mat4, Vec3};
use anchora_core::platform::{GraphicsVersion, Platform};
use anchora_core::scene::{EntityId, LoadedAsset, RenderHost};
use anchora_core::tracking::{Frame, TrackingSession};
use anchora_core::SessionError;
use anchora_infra::HeadlessPlatform;
use anchora_lanes::asset_lane::AssetDecoder;
use async_trait::async_trait;
use std::cell::RefCell;
use std::error::Error;
use std::io;
use std::rc::Rc;
use std::sync::Arc;

pub type CallLog = Rc<RefCell<Vec<&'static str>>>;

// --- Hosts ---

struct LoggingHost {
    inner: Rc<dyn RenderHost>,
    log: CallLog,
}

impl RenderHost for LoggingHost {
    fn register_entities(&self, entities: &[EntityId]) {
        self.log.borrow_mut().push("register");
        self.inner.register_entities(entities);
    }

    fn unregister_entities(&self, entities: &[EntityId]) {
        self.log.borrow_mut().push("unregister");
        self.inner.unregister_entities(entities);
    }

    fn set_entity_transform(&self, entity: EntityId, matrix: &Mat4) {
        self.inner.set_entity_transform(entity, matrix);
    }

    fn upload_asset(
        &self,
        model: DecodedModel,
        reference: &AssetReference,
    ) -> Result<LoadedAsset, AssetError> {
        self.log.borrow_mut().push("upload");
        self.inner.upload_asset(model, reference)
    }

    fn destroy_asset(&self, asset: LoadedAsset) {
        self.log.borrow_mut().push("destroy_asset");
        self.inner.destroy_asset(asset);
    }

    fn shutdown(&self) {
        self.log.borrow_mut().push("shutdown");
        self.inner.shutdown();
    }
}

struct LoggingSession {
    inner: Rc<dyn TrackingSession>,
    log: CallLog,
}

impl TrackingSession for LoggingSession {
    fn resume(&self) -> Result<(), SessionError> {
        self.log.borrow_mut().push("resume");
        self.inner.resume()
    }

    fn pause(&self) {
        self.log.borrow_mut().push("pause");
        self.inner.pause();
    }

    fn update(&self) -> Option<Rc<dyn Frame>> {
        self.inner.update()
    }

    fn current_frame(&self) -> Option<Rc<dyn Frame>> {
        self.inner.current_frame()
    }

    fn close(&self) {
        self.log.borrow_mut().push("close");
        self.inner.close();
    }
}

// --- Platform ---

pub struct LoggingPlatform {
    pub headless: HeadlessPlatform,
    pub log: CallLog,
}

impl LoggingPlatform {
    pub fn new(headless: HeadlessPlatform) -> Self {
        Self {
            headless,
            log: CallLog::default(),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.log.borrow().clone()
    }

    /// Index of the first occurrence of `call`.
    pub fn first(&self, call: &str) -> Option<usize> {
        self.log.borrow().iter().position(|c| *c == call)
    }

    /// Index of the last occurrence of `call`.
    pub fn last(&self, call: &str) -> Option<usize> {
        self.log.borrow().iter().rposition(|c| *c == call)
    }
}

#[async_trait(?Send)]
impl Platform for LoggingPlatform {
    fn graphics_version(&self) -> GraphicsVersion {
        self.headless.graphics_version()
    }

    async fn ensure_tracking_runtime(&self) -> Result<(), SessionError> {
        self.headless.ensure_tracking_runtime().await
    }

    fn has_camera_permission(&self) -> bool {
        self.headless.has_camera_permission()
    }

    async fn request_camera_permission(&self) -> Result<bool, SessionError> {
        self.headless.request_camera_permission().await
    }

    fn create_render_host(&self) -> Result<Rc<dyn RenderHost>, SessionError> {
        let inner = self.headless.create_render_host()?;
        Ok(Rc::new(LoggingHost {
            inner,
            log: Rc::clone(&self.log),
        }))
    }

    fn create_tracking_session(
        &self,
        render_host: &Rc<dyn RenderHost>,
    ) -> Result<Rc<dyn TrackingSession>, SessionError> {
        let inner = self.headless.create_tracking_session(render_host)?;
        Ok(Rc::new(LoggingSession {
            inner,
            log: Rc::clone(&self.log),
        }))
    }

    fn asset_storage(&self) -> Arc<dyn AssetStorage> {
        self.headless.asset_storage()
    }
}

// --- Assets ---

struct StubStorage;

impl AssetStorage for StubStorage {
    fn open_binary(&self, reference: &AssetReference) -> io::Result<Vec<u8>> {
        if reference.as_str().starts_with("missing/") {
            return Err(io::Error::new(io::ErrorKind::NotFound, reference.to_string()));
        }
        Ok(b"stub".to_vec())
    }
}

/// Decodes any bytes into a single triangle.
pub struct TriangleDecoder;

impl AssetDecoder for TriangleDecoder {
    fn decode(&self, _bytes: &[u8]) -> Result<DecodedModel, Box<dyn Error + Send + Sync>> {
        Ok(DecodedModel {
            meshes: vec![DecodedMesh {
                positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
                normals: None,
                indices: Some(vec![0, 1, 2]),
            }],
        })
    }
}

pub fn headless() -> HeadlessPlatform {
    HeadlessPlatform::new(Arc::new(StubStorage))
}

/// Lets every local task run until it is waiting again.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
