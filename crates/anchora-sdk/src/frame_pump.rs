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

//! Publishes one frame tick per rendered frame.

use anchora_core::event::EventChannel;
use anchora_core::tracking::{FrameTick, TrackingQuality, TrackingSession};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

struct PumpCore {
    session: Rc<dyn TrackingSession>,
    ticks: EventChannel<FrameTick>,
    sequence: Cell<u64>,
    tracking_established: Cell<bool>,
}

impl PumpCore {
    fn pump_once(&self) -> Option<FrameTick> {
        let frame = self.session.update()?;
        let sequence = self.sequence.get() + 1;
        self.sequence.set(sequence);

        let tick = FrameTick::new(sequence, frame);
        if tick.tracking_quality == TrackingQuality::Tracking && !self.tracking_established.get() {
            self.tracking_established.set(true);
            log::info!("Tracking established at frame {}.", sequence);
        }
        self.ticks.publish(tick.clone());
        Some(tick)
    }
}

/// Advances the tracking session and publishes a [`FrameTick`] for each frame.
///
/// Either driven by a timer after [`start`](Self::start) or stepped by hand
/// with [`pump_once`](Self::pump_once). A paused session produces no ticks.
pub struct FramePump {
    core: Rc<PumpCore>,
    interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl FramePump {
    /// Creates a stopped pump publishing on `ticks` every `interval`.
    pub fn new(
        session: Rc<dyn TrackingSession>,
        ticks: EventChannel<FrameTick>,
        interval: Duration,
    ) -> Self {
        Self {
            core: Rc::new(PumpCore {
                session,
                ticks,
                sequence: Cell::new(0),
                tracking_established: Cell::new(false),
            }),
            interval,
            task: None,
        }
    }

    /// Produces and publishes one tick. Returns `None` while the session is paused.
    pub fn pump_once(&self) -> Option<FrameTick> {
        self.core.pump_once()
    }

    /// Starts publishing on a timer. Does nothing if already running.
    ///
    /// # Panics
    /// Panics when called outside a [`tokio::task::LocalSet`].
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let core = Rc::clone(&self.core);
        let period = self.interval;
        self.task = Some(tokio::task::spawn_local(async move {
            let mut timer = tokio::time::interval(period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                timer.tick().await;
                core.pump_once();
            }
        }));
        log::debug!("Frame pump started ({:?} per frame).", period);
    }

    /// Stops the timer. Ticks already published stay in subscribers' mailboxes.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log::debug!("Frame pump stopped.");
        }
    }

    /// Whether the timer is running.
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Number of ticks published so far.
    pub fn frames_published(&self) -> u64 {
        self.core.sequence.get()
    }

    /// Whether any published frame has reported [`TrackingQuality::Tracking`].
    pub fn tracking_established(&self) -> bool {
        self.core.tracking_established.get()
    }
}

impl Drop for FramePump {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for FramePump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramePump")
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .field("frames_published", &self.frames_published())
            .finish()
    }
}
