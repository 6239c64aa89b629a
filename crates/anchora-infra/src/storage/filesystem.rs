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

use anchora_core::asset::{AssetReference, AssetStorage};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Reads assets from a directory on disk.
///
/// References are relative paths below the root. Absolute paths and `..`
/// components are refused so a reference cannot escape the root.
#[derive(Debug, Clone)]
pub struct FileAssetStorage {
    root: PathBuf,
}

impl FileAssetStorage {
    /// Creates a storage rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `reference` to a path below the root.
    pub fn resolve(&self, reference: &AssetReference) -> io::Result<PathBuf> {
        let relative = Path::new(reference.as_str());
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || reference.as_str().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset reference '{}' is not a relative path", reference),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl AssetStorage for FileAssetStorage {
    fn open_binary(&self, reference: &AssetReference) -> io::Result<Vec<u8>> {
        let path = self.resolve(reference)?;
        log::trace!("Reading asset from {}.", path.display());
        std::fs::read(path)
    }
}
