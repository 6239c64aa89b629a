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

//! glTF 2.0 decoder lane for binary (`.glb`) and self-contained JSON assets.

use super::AssetDecoder;
use anchora_core::asset::{DecodedMesh, DecodedModel};
use anchora_core::math::Vec3;
use base64::Engine;
use gltf::{mesh::Reader, Buffer};
use std::error::Error;

const DATA_URI_PREFIXES: [&str; 2] = [
    "data:application/octet-stream;base64,",
    "data:application/gltf-buffer;base64,",
];

/// Decodes every mesh primitive of a glTF asset.
///
/// Buffers must be embedded, either as the GLB binary chunk or as base64
/// `data:` URIs. External buffer files are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfDecoderLane;

impl GltfDecoderLane {
    /// Creates the decoder.
    pub fn new() -> Self {
        Self
    }
}

impl AssetDecoder for GltfDecoderLane {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedModel, Box<dyn Error + Send + Sync>> {
        let gltf =
            gltf::Gltf::from_slice(bytes).map_err(|e| format!("Failed to parse glTF: {}", e))?;

        let buffer_data = self.load_buffer_data(&gltf)?;
        let get_buffer_data = |buffer: Buffer<'_>| buffer_data.get(buffer.index()).map(Vec::as_slice);

        let mut meshes = Vec::new();
        for mesh in gltf.document.meshes() {
            for primitive in mesh.primitives() {
                let reader = primitive.reader(get_buffer_data);
                let positions = self.extract_positions(&reader)?;
                meshes.push(DecodedMesh {
                    positions,
                    normals: self.extract_normals(&reader),
                    indices: self.extract_indices(&reader),
                });
            }
        }

        if meshes.is_empty() {
            return Err("No mesh primitives found in glTF asset".into());
        }
        log::trace!("Decoded glTF asset with {} mesh primitive(s).", meshes.len());
        Ok(DecodedModel { meshes })
    }
}

impl GltfDecoderLane {
    fn load_buffer_data(
        &self,
        gltf: &gltf::Gltf,
    ) -> Result<Vec<Vec<u8>>, Box<dyn Error + Send + Sync>> {
        let mut buffer_data = Vec::new();
        for buffer in gltf.buffers() {
            match buffer.source() {
                gltf::buffer::Source::Bin => match gltf.blob.as_deref() {
                    Some(blob) => buffer_data.push(blob.to_vec()),
                    None => {
                        return Err("GLB references a binary chunk but it is missing".into());
                    }
                },
                gltf::buffer::Source::Uri(uri) => buffer_data.push(self.decode_data_uri(uri)?),
            }
        }
        Ok(buffer_data)
    }

    fn decode_data_uri(&self, uri: &str) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
        let payload = DATA_URI_PREFIXES
            .iter()
            .find_map(|prefix| uri.strip_prefix(prefix))
            .ok_or_else(|| format!("Unsupported buffer URI (only embedded data): {}", uri))?;
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(Into::into)
    }

    fn extract_positions<'a, 's, F>(
        &self,
        reader: &Reader<'a, 's, F>,
    ) -> Result<Vec<Vec3>, Box<dyn Error + Send + Sync>>
    where
        F: Clone + Fn(Buffer<'a>) -> Option<&'s [u8]>,
    {
        reader
            .read_positions()
            .map(|iter| iter.map(Vec3::from).collect())
            .ok_or_else(|| "Vertex positions attribute not found".into())
    }

    fn extract_normals<'a, 's, F>(&self, reader: &Reader<'a, 's, F>) -> Option<Vec<Vec3>>
    where
        F: Clone + Fn(Buffer<'a>) -> Option<&'s [u8]>,
    {
        reader.read_normals().map(|iter| iter.map(Vec3::from).collect())
    }

    fn extract_indices<'a, 's, F>(&self, reader: &Reader<'a, 's, F>) -> Option<Vec<u32>>
    where
        F: Clone + Fn(Buffer<'a>) -> Option<&'s [u8]>,
    {
        reader.read_indices().map(|iter| iter.into_u32().collect())
    }
}
