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

use thiserror::Error;

/// Failures of the session lifecycle.
///
/// `Unsupported` and `Init` are fatal and end the session.
/// `UserCancelled` is a normal termination: the user declined a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The device lacks a required capability.
    #[error("device not supported: {0}")]
    Unsupported(String),
    /// The tracking session or render context could not be constructed.
    #[error("session initialization failed: {0}")]
    Init(String),
    /// The user declined an install or permission prompt.
    #[error("cancelled by the user")]
    UserCancelled,
}

impl SessionError {
    /// Returns `true` for [`SessionError::UserCancelled`].
    pub fn is_user_cancelled(&self) -> bool {
        matches!(self, SessionError::UserCancelled)
    }
}
