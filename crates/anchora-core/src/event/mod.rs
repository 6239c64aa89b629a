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

//! Provides the latest-value broadcast primitive used for gestures and frame ticks.
//!
//! The [`EventChannel`] is a bounded, single-slot, drop-oldest broadcast: each
//! subscriber owns a one-element mailbox that a new publication overwrites.
//! Consumers therefore only ever observe the most recent pending event, which
//! is the desired property for bursty user input and a real-time tick source.

mod channel;

pub use self::channel::{EventChannel, Subscription};
