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

//! Asset lanes: turning a stored binary into a [`DecodedModel`] without
//! blocking the cooperative thread.
//!
//! [`DecodedModel`]: anchora_core::asset::DecodedModel

mod decoder;
mod gltf_decoder_lane;
mod load_lane;

pub use decoder::*;
pub use gltf_decoder_lane::*;
pub use load_lane::*;
