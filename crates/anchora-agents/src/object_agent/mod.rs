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

//! Acts as the agent for one placed object.
//!
//! An [`ObjectController`] is created from a placement gesture and then runs
//! three independent pipelines until it is destroyed:
//! - re-anchoring the object on `Move` gestures by ray-casting the tracked scene,
//! - accumulating rotation and scale from `Update` gestures,
//! - composing the model matrix on every frame tick and submitting it to the
//!   render host once the asset is loaded.
//!
//! The asset is loaded once in the background; its decode runs off the
//! cooperative thread through the asset load lane.

mod agent;
mod context;
mod gestures;

pub use agent::{wait_until_settled, ObjectController};
pub use context::{ObjectContext, ObjectId};
pub use gestures::GesturePublisher;
