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

//! Asset contracts: references, storage, decoded geometry and load status.

mod error;
mod model;

pub use error::*;
pub use model::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// A storage-relative reference to a binary 3D asset (e.g. `models/chair.glb`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetReference(String);

impl AssetReference {
    /// Creates a reference from a storage path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The raw storage path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetReference {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// The asset storage host.
///
/// Reads run on a blocking worker thread, hence the `Send + Sync` bound.
pub trait AssetStorage: Send + Sync {
    /// Reads the whole binary behind `reference`.
    fn open_binary(&self, reference: &AssetReference) -> io::Result<Vec<u8>>;
}

/// Where an object's asset is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssetStatus {
    /// The load is in flight.
    #[default]
    Loading,
    /// The asset is uploaded and owned by its controller.
    Ready,
    /// The load failed; the object stays invisible until it is recreated
    /// or explicitly given another asset.
    Failed(AssetError),
    /// The asset was released (object destroyed or asset replaced).
    Released,
}

impl AssetStatus {
    /// Returns `true` once the load has settled one way or another.
    pub fn is_settled(&self) -> bool {
        !matches!(self, AssetStatus::Loading)
    }
}
