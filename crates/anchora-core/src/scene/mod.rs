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

//! Contracts of the rendering-engine host that owns the scene graph.

use crate::asset::{AssetError, AssetReference, DecodedModel};
use crate::math::Mat4;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An entity in the render host's scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Identifies one uploaded asset inside the render host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// GPU-resident geometry owned by exactly one object controller.
///
/// Deliberately not `Clone`: the handle moves from the render host to its
/// controller on upload and back to the host on [`RenderHost::destroy_asset`].
/// Its entities must be unregistered from the scene before it is released.
#[derive(Debug, PartialEq, Eq)]
pub struct LoadedAsset {
    /// Host-side identifier.
    pub id: AssetId,
    /// The asset this geometry was built from.
    pub reference: AssetReference,
    /// The entity whose transform places the whole asset.
    pub root: EntityId,
    /// Every entity of the asset, root included.
    pub entities: Vec<EntityId>,
}

/// The rendering-engine host.
///
/// All methods take `&self`: the host is shared by every object controller on
/// one cooperative thread, and each controller only touches entities it
/// created.
pub trait RenderHost {
    /// Adds entities to the rendered scene.
    fn register_entities(&self, entities: &[EntityId]);

    /// Removes entities from the rendered scene.
    fn unregister_entities(&self, entities: &[EntityId]);

    /// Sets an entity's world transform.
    fn set_entity_transform(&self, entity: EntityId, matrix: &Mat4);

    /// Creates GPU resources and scene entities for a decoded model.
    ///
    /// The entities are not registered with the scene yet.
    fn upload_asset(&self, model: DecodedModel, reference: &AssetReference)
        -> Result<LoadedAsset, AssetError>;

    /// Releases an asset's GPU resources and entities.
    fn destroy_asset(&self, asset: LoadedAsset);

    /// Tears down the render context. Called exactly once during teardown.
    fn shutdown(&self);
}
