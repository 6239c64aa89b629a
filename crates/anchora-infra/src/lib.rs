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

//! # Anchora Infra
//!
//! Concrete implementations of the collaborator contracts declared in
//! `anchora-core`. Everything here runs without a GPU or a camera: an
//! in-memory scene graph, a tracking session that sees one horizontal plane,
//! a scriptable platform and file-system asset storage.

#![warn(missing_docs)]

pub mod graphics;
pub mod platform;
pub mod storage;
pub mod tracking;

pub use graphics::HeadlessRenderHost;
pub use platform::{HeadlessPlatform, TrackingRuntime};
pub use storage::FileAssetStorage;
pub use tracking::{PlaneSessionConfig, SimulatedPlaneSession};
