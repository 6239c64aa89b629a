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

use super::AssetDecoder;
use anchora_core::asset::{AssetError, AssetReference, AssetStorage, DecodedModel};
use std::sync::Arc;

/// Reads and decodes assets on a blocking worker thread.
///
/// Upload to the render host is not part of this lane: the caller gets the
/// [`DecodedModel`] back on its own thread and uploads it there.
#[derive(Clone)]
pub struct AssetLoadLane {
    storage: Arc<dyn AssetStorage>,
    decoder: Arc<dyn AssetDecoder>,
}

impl AssetLoadLane {
    /// Creates a load lane reading from `storage` and decoding with `decoder`.
    pub fn new(storage: Arc<dyn AssetStorage>, decoder: Arc<dyn AssetDecoder>) -> Self {
        Self { storage, decoder }
    }

    /// Reads and decodes `reference`.
    ///
    /// Must be awaited inside a Tokio runtime. Dropping the future abandons
    /// the result; the worker thread still runs to completion.
    ///
    /// # Errors
    /// [`AssetError::Io`] when the storage read fails, [`AssetError::Decode`]
    /// when the bytes cannot be decoded or the decoder panics.
    pub async fn load(&self, reference: &AssetReference) -> Result<DecodedModel, AssetError> {
        let storage = Arc::clone(&self.storage);
        let decoder = Arc::clone(&self.decoder);
        let owned = reference.clone();

        log::debug!("Loading asset '{}'.", reference);
        let worker = tokio::task::spawn_blocking(move || {
            let bytes = storage
                .open_binary(&owned)
                .map_err(|e| AssetError::io(&owned, e))?;
            decoder
                .decode(&bytes)
                .map_err(|e| AssetError::decode(&owned, e.to_string()))
        });

        match worker.await {
            Ok(result) => result,
            Err(e) => Err(AssetError::decode(
                reference,
                format!("decode worker failed: {}", e),
            )),
        }
    }
}

impl std::fmt::Debug for AssetLoadLane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetLoadLane").finish_non_exhaustive()
    }
}
