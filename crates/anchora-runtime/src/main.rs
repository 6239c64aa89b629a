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


//! Headless Anchora runtime.
//!
//! Runs one placement session against the headless platform: places an
//! object at the screen centre, replays a scripted gesture sequence while the
//! frame pump runs, then prints a JSON summary.

mod script;

use anchora_infra::{FileAssetStorage, HeadlessPlatform};
use anchora_sdk::prelude::*;
use anyhow::{Context, Result};
use clap::Parser;
use script::{default_script, ScriptPlayer};
use serde::Serialize;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use tokio::task::LocalSet;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Asset reference, relative to the assets root.
    #[arg(long)]
    asset: String,

    /// Directory asset references are resolved against.
    #[arg(long, default_value = ".")]
    assets_root: PathBuf,

    /// Session config file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to pump after the asset has settled.
    #[arg(long, default_value_t = 120)]
    frames: u64,
}

/// End-of-session report.
#[derive(Debug, Default, Serialize)]
struct Summary {
    outcome: &'static str,
    asset: String,
    asset_status: String,
    frames_published: u64,
    tracking_established: bool,
    gestures_played: usize,
    transform: Option<ObjectTransform>,
    live_vertices: usize,
}

fn describe(status: &AssetStatus) -> String {
    match status {
        AssetStatus::Failed(e) => format!("failed: {}", e),
        other => format!("{:?}", other).to_lowercase(),
    }
}

async fn run_session(args: Args, config: SessionConfig) -> Result<Summary> {
    let storage = FileAssetStorage::new(&args.assets_root);
    let interval = config.frame_interval();
    let coordinator = SessionCoordinator::new(HeadlessPlatform::new(Arc::new(storage)), config);
    let report = Rc::new(RefCell::new(Summary {
        asset: args.asset.clone(),
        ..Summary::default()
    }));

    let body_report = Rc::clone(&report);
    let platform = coordinator.platform();
    let end = coordinator
        .run(|session| async move {
            let run = session.start()?;
            let deadline = session.frames_published() + args.frames;
            while !session.tracking_established() && session.frames_published() < deadline {
                tokio::time::sleep(interval).await;
            }
            if !session.tracking_established() {
                log::warn!("No tracking after {} frames, placing anyway.", args.frames);
            }

            let id = session.place_object(0.5, 0.5, AssetReference::new(args.asset));
            let status = session
                .wait_for_asset(id)
                .await
                .unwrap_or(AssetStatus::Released);
            if let AssetStatus::Failed(e) = &status {
                log::warn!("{} has no model to show: {}", id, e);
            }

            let mut player = ScriptPlayer::new(default_script());
            let target = session.frames_published() + args.frames;
            while session.frames_published() < target {
                if let Some(gestures) = session.gestures(id) {
                    player.play_next(&gestures);
                }
                tokio::time::sleep(interval).await;
            }
            run.stop();

            let mut report = body_report.borrow_mut();
            report.asset_status = describe(&status);
            report.frames_published = session.frames_published();
            report.tracking_established = session.tracking_established();
            report.gestures_played = player.played();
            report.transform = session.transform(id);
            report.live_vertices = platform
                .render_host()
                .map_or(0, |host| host.live_vertices());
            Ok::<(), SessionError>(())
        })
        .await?;

    let mut summary = report.take();
    summary.outcome = match end {
        SessionEnd::Completed => "completed",
        SessionEnd::Cancelled => "cancelled",
    };
    Ok(summary)
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build the async runtime")?;
    let summary = LocalSet::new().block_on(&runtime, run_session(args, config))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Failed to serialize the summary")?
    );
    Ok(())
}
