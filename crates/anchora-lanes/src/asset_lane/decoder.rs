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

use anchora_core::asset::DecodedModel;
use std::error::Error;

/// A format decoder turning raw asset bytes into uploadable geometry.
///
/// This is the CPU-heavy half of loading. It always runs on a blocking worker
/// thread, so implementors must be thread-safe and must not touch any host.
pub trait AssetDecoder: Send + Sync {
    /// Parses `bytes` into a model.
    ///
    /// # Returns
    /// The decoded model, or a boxed thread-safe error describing why the
    /// bytes are not a usable asset.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedModel, Box<dyn Error + Send + Sync>>;
}
