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

use super::AssetReference;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Failures of the asset pipeline.
///
/// These are never fatal to an object's transform pipeline: they only leave
/// the object without a renderable asset.
#[derive(Debug, Clone, Error)]
pub enum AssetError {
    /// The asset source could not be read.
    #[error("failed to read asset '{reference}': {source}")]
    Io {
        /// The asset that was requested.
        reference: AssetReference,
        /// The underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// The binary was malformed or could not be turned into a renderable asset.
    #[error("failed to decode asset '{reference}': {reason}")]
    Decode {
        /// The asset that was requested.
        reference: AssetReference,
        /// What the decoder or the render host reported.
        reason: String,
    },
}

impl AssetError {
    /// Builds an [`AssetError::Io`].
    pub fn io(reference: &AssetReference, source: io::Error) -> Self {
        Self::Io {
            reference: reference.clone(),
            source: Arc::new(source),
        }
    }

    /// Builds an [`AssetError::Decode`].
    pub fn decode(reference: &AssetReference, reason: impl Into<String>) -> Self {
        Self::Decode {
            reference: reference.clone(),
            reason: reason.into(),
        }
    }

    /// The asset the error refers to.
    pub fn reference(&self) -> &AssetReference {
        match self {
            AssetError::Io { reference, .. } | AssetError::Decode { reference, .. } => reference,
        }
    }
}

impl PartialEq for AssetError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                AssetError::Io { reference: a, source: sa },
                AssetError::Io { reference: b, source: sb },
            ) => a == b && sa.kind() == sb.kind(),
            (
                AssetError::Decode { reference: a, reason: ra },
                AssetError::Decode { reference: b, reason: rb },
            ) => a == b && ra == rb,
            _ => false,
        }
    }
}
