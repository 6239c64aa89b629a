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

use crate::math::Vec3;

/// One mesh primitive decoded from an asset, ready for GPU upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedMesh {
    /// Vertex positions in model space.
    pub positions: Vec<Vec3>,
    /// Optional per-vertex normals.
    pub normals: Option<Vec<Vec3>>,
    /// Optional triangle indices. Without them, vertices form a triangle list.
    pub indices: Option<Vec<u32>>,
}

impl DecodedMesh {
    /// Number of triangles drawn by this mesh.
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }
}

/// The GPU-uploadable representation of a 3D asset produced by a decoder.
///
/// Decoding happens off the cooperative thread; the model is handed to the
/// render host for upload only once it is back on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedModel {
    /// Every mesh primitive of the asset.
    pub meshes: Vec<DecodedMesh>,
}

impl DecodedModel {
    /// Total vertex count across all meshes.
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.positions.len()).sum()
    }

    /// Total triangle count across all meshes.
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(DecodedMesh::triangle_count).sum()
    }
}
