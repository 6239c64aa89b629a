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

//! The collection of live object controllers of one session.

use anchora_agents::object_agent::{ObjectController, ObjectId};
use std::collections::BTreeMap;

/// Owns every placed object of a session, keyed by id.
#[derive(Debug, Default)]
pub struct ObjectPool {
    objects: BTreeMap<ObjectId, ObjectController>,
    next_id: u64,
}

impl ObjectPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the id of the next object.
    pub fn next_id(&mut self) -> ObjectId {
        self.next_id += 1;
        ObjectId(self.next_id)
    }

    /// Adds a controller, destroying any previous one under the same id.
    pub fn insert(&mut self, controller: ObjectController) {
        if let Some(mut previous) = self.objects.insert(controller.id(), controller) {
            log::warn!("{} was placed twice, destroying the older one.", previous.id());
            previous.destroy();
        }
    }

    /// Takes a controller out of the pool.
    pub fn remove(&mut self, id: ObjectId) -> Option<ObjectController> {
        self.objects.remove(&id)
    }

    /// The controller of `id`.
    pub fn get(&self, id: ObjectId) -> Option<&ObjectController> {
        self.objects.get(&id)
    }

    /// The controller of `id`, mutably.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut ObjectController> {
        self.objects.get_mut(&id)
    }

    /// Ids of every live object, in placement order.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Destroys and drops every controller.
    pub fn destroy_all(&mut self) {
        let count = self.objects.len();
        for (_, mut controller) in std::mem::take(&mut self.objects) {
            controller.destroy();
        }
        if count > 0 {
            log::debug!("Destroyed {} object(s).", count);
        }
    }
}
