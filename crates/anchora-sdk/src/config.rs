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

//! Session configuration, read from TOML.

use anchora_core::math::{degrees_to_radians, Vec3};
use anchora_core::platform::GraphicsVersion;
use anchora_lanes::placement_lane::ObjectTransform;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables of a placement session. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Oldest graphics API version the session runs on.
    pub min_graphics_version: GraphicsVersion,
    /// Frame ticks per second while tracking runs.
    pub frame_rate_hz: u32,
    /// How newly placed objects start out.
    pub placement: PlacementConfig,
}

/// Initial rotation and scale of placed objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Uniform scale. Must be positive.
    pub initial_scale: f32,
    /// Rotation around the up axis, in degrees.
    pub initial_yaw_degrees: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_graphics_version: GraphicsVersion::new(3, 0),
            frame_rate_hz: 60,
            placement: PlacementConfig::default(),
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            initial_scale: 1.0,
            initial_yaw_degrees: 0.0,
        }
    }
}

impl SessionConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).context("Failed to parse session config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the TOML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{}'", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    /// Checks the values serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.frame_rate_hz == 0 {
            bail!("frame_rate_hz must be at least 1");
        }
        let scale = self.placement.initial_scale;
        if !(scale.is_finite() && scale > 0.0) {
            bail!("placement.initial_scale must be positive, got {}", scale);
        }
        if !self.placement.initial_yaw_degrees.is_finite() {
            bail!("placement.initial_yaw_degrees must be finite");
        }
        Ok(())
    }

    /// Time between two frame ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate_hz.max(1)))
    }

    /// The transform a newly placed object starts from, before its initial
    /// ray-cast sets the translation.
    pub fn initial_transform(&self) -> ObjectTransform {
        ObjectTransform::new(
            Vec3::ZERO,
            degrees_to_radians(self.placement.initial_yaw_degrees),
            self.placement.initial_scale,
        )
    }
}
