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

//! An in-memory scene graph standing in for a GPU renderer.

use anchora_core::asset::{AssetError, AssetReference, DecodedModel};
use anchora_core::math::Mat4;
use anchora_core::scene::{AssetId, EntityId, LoadedAsset, RenderHost};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Debug)]
struct AssetRecord {
    reference: AssetReference,
    entities: Vec<EntityId>,
    vertex_count: usize,
}

#[derive(Debug, Default)]
struct SceneGraph {
    next_entity: u32,
    next_asset: u64,
    assets: HashMap<AssetId, AssetRecord>,
    registered: HashSet<EntityId>,
    transforms: HashMap<EntityId, Mat4>,
    transform_updates: u64,
    shut_down: bool,
}

/// A render host keeping its scene graph in memory.
///
/// Uploading creates one root entity plus one child per mesh. Nothing is
/// drawn; the accessors let callers inspect what a real renderer would show.
#[derive(Debug, Default)]
pub struct HeadlessRenderHost {
    scene: RefCell<SceneGraph>,
}

impl HeadlessRenderHost {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `entity` is currently part of the rendered scene.
    pub fn is_registered(&self, entity: EntityId) -> bool {
        self.scene.borrow().registered.contains(&entity)
    }

    /// Number of entities currently in the rendered scene.
    pub fn registered_count(&self) -> usize {
        self.scene.borrow().registered.len()
    }

    /// The last transform submitted for `entity`.
    pub fn transform_of(&self, entity: EntityId) -> Option<Mat4> {
        self.scene.borrow().transforms.get(&entity).copied()
    }

    /// Number of uploaded assets not yet destroyed.
    pub fn live_assets(&self) -> usize {
        self.scene.borrow().assets.len()
    }

    /// Total vertices held by live assets.
    pub fn live_vertices(&self) -> usize {
        self.scene
            .borrow()
            .assets
            .values()
            .map(|record| record.vertex_count)
            .sum()
    }

    /// Total number of transform submissions since creation.
    pub fn transform_updates(&self) -> u64 {
        self.scene.borrow().transform_updates
    }

    /// Whether [`RenderHost::shutdown`] has run.
    pub fn is_shut_down(&self) -> bool {
        self.scene.borrow().shut_down
    }
}

impl RenderHost for HeadlessRenderHost {
    fn register_entities(&self, entities: &[EntityId]) {
        let mut scene = self.scene.borrow_mut();
        scene.registered.extend(entities.iter().copied());
        log::trace!("Registered {} entities.", entities.len());
    }

    fn unregister_entities(&self, entities: &[EntityId]) {
        let mut scene = self.scene.borrow_mut();
        for entity in entities {
            if !scene.registered.remove(entity) {
                log::warn!("Unregistering {} which is not in the scene.", entity);
            }
        }
    }

    fn set_entity_transform(&self, entity: EntityId, matrix: &Mat4) {
        let mut scene = self.scene.borrow_mut();
        scene.transforms.insert(entity, *matrix);
        scene.transform_updates += 1;
    }

    fn upload_asset(
        &self,
        model: DecodedModel,
        reference: &AssetReference,
    ) -> Result<LoadedAsset, AssetError> {
        if model.meshes.is_empty() {
            return Err(AssetError::decode(reference, "model has no meshes"));
        }

        let mut scene = self.scene.borrow_mut();
        if scene.shut_down {
            return Err(AssetError::decode(reference, "render host is shut down"));
        }

        let mut entities = Vec::with_capacity(model.meshes.len() + 1);
        for _ in 0..=model.meshes.len() {
            scene.next_entity += 1;
            entities.push(EntityId(scene.next_entity));
        }
        scene.next_asset += 1;
        let id = AssetId(scene.next_asset);

        scene.assets.insert(
            id,
            AssetRecord {
                reference: reference.clone(),
                entities: entities.clone(),
                vertex_count: model.vertex_count(),
            },
        );
        log::debug!(
            "Uploaded '{}' ({} vertices, {} triangles) as {:?}.",
            reference,
            model.vertex_count(),
            model.triangle_count(),
            id
        );

        Ok(LoadedAsset {
            id,
            reference: reference.clone(),
            root: entities[0],
            entities,
        })
    }

    fn destroy_asset(&self, asset: LoadedAsset) {
        let mut scene = self.scene.borrow_mut();
        let Some(record) = scene.assets.remove(&asset.id) else {
            log::warn!("Destroying unknown asset {:?}.", asset.id);
            return;
        };
        for entity in &record.entities {
            if scene.registered.remove(entity) {
                log::warn!("{} of '{}' was still registered.", entity, record.reference);
            }
            scene.transforms.remove(entity);
        }
        log::debug!("Destroyed {:?} ('{}').", asset.id, record.reference);
    }

    fn shutdown(&self) {
        let mut scene = self.scene.borrow_mut();
        if !scene.assets.is_empty() {
            log::warn!("Render host shut down with {} live asset(s).", scene.assets.len());
        }
        scene.shut_down = true;
        log::info!("Headless render host shut down.");
    }
}
