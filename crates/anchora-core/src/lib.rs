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

//! # Anchora Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! shared by every layer of the placement engine: math primitives, the
//! latest-value event channel, and the contracts of the external collaborators
//! (tracking session, render host, asset storage, platform).

#![warn(missing_docs)]

pub mod asset;
pub mod event;
pub mod gesture;
pub mod math;
pub mod platform;
pub mod scene;
pub mod tracking;

pub use asset::{AssetError, AssetReference, AssetStatus};
pub use event::{EventChannel, Subscription};
pub use gesture::GestureEvent;
pub use platform::SessionError;
