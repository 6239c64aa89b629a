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


mod common;

use anchora_agents::object_agent::{ObjectController, ObjectId};
use anchora_core::asset::{AssetError, AssetReference, AssetStatus};
use anchora_core::event::EventChannel;
use anchora_core::math::{Vec3, FRAC_PI_2, PI};
use anchora_core::scene::EntityId;
use anchora_core::tracking::FrameTick;
use anchora_lanes::placement_lane::ObjectTransform;
use approx::assert_relative_eq;
use common::{context, settle, tick, RecordingRenderHost, StubDecoder, StubSession};
use std::rc::Rc;
use tokio::task::LocalSet;

fn spawn_at_center(
    host: &Rc<RecordingRenderHost>,
    session: &Rc<StubSession>,
    decoder: StubDecoder,
    ticks: &EventChannel<FrameTick>,
) -> ObjectController {
    ObjectController::spawn(
        ObjectId(1),
        0.5,
        0.5,
        AssetReference::new("models/chair.glb"),
        context(host, session, decoder),
        ticks,
    )
}

#[tokio::test]
async fn test_initial_ray_cast_seeds_translation() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::hitting(Vec3::new(1.0, 2.0, 3.0));
            let ticks = EventChannel::new();

            let controller = spawn_at_center(&host, &session, StubDecoder::Succeeds, &ticks);

            assert_eq!(controller.transform().translation, Vec3::new(1.0, 2.0, 3.0));
            assert_eq!(session.last_cast(), Some((0.5, 0.5)));
        })
        .await;
}

#[tokio::test]
async fn test_initial_miss_keeps_origin() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::missing();
            let ticks = EventChannel::new();

            let controller = spawn_at_center(&host, &session, StubDecoder::Succeeds, &ticks);

            assert_eq!(controller.transform(), ObjectTransform::default());
        })
        .await;
}

#[tokio::test]
async fn test_update_then_tick_composes_matrix_and_registers_once() {
    LocalSet::new()
        .run_until(async {
            // --- 1. Place the object on a hit at (1, 2, 3) and let it load ---
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::hitting(Vec3::new(1.0, 2.0, 3.0));
            let ticks = EventChannel::new();
            let controller = spawn_at_center(&host, &session, StubDecoder::Succeeds, &ticks);
            assert_eq!(controller.wait_for_asset().await, AssetStatus::Ready);

            // --- 2. Rotate half a turn and double the scale ---
            controller.publish_update(PI, 2.0);
            settle().await;

            // --- 3. Two frames ---
            tick(&ticks, &session, 1);
            settle().await;
            tick(&ticks, &session, 2);
            settle().await;

            // --- 4. Assert ---
            let expected = ObjectTransform::new(Vec3::new(1.0, 2.0, 3.0), PI, 2.0);
            assert_eq!(controller.transform(), expected);
            assert_eq!(host.registrations(), 1);

            let transforms = host.transforms();
            assert_eq!(transforms.len(), 2);
            let matrix = transforms[1];
            assert_eq!(matrix, expected.model_matrix());
            assert_eq!(matrix.translation(), Vec3::new(1.0, 2.0, 3.0));
            let x_axis = matrix.transform_point3(Vec3::X);
            assert_relative_eq!(x_axis.x, -1.0, epsilon = 1e-4);
        })
        .await;
}

#[tokio::test]
async fn test_tick_before_load_completes_is_a_no_op() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::hitting(Vec3::ZERO);
            let ticks = EventChannel::new();
            let (gate, decoder) = StubDecoder::gated();
            let controller = spawn_at_center(&host, &session, decoder, &ticks);

            tick(&ticks, &session, 1);
            settle().await;
            assert_eq!(controller.asset_status(), AssetStatus::Loading);
            assert!(host.calls().is_empty());

            gate.send(()).unwrap();
            assert_eq!(controller.wait_for_asset().await, AssetStatus::Ready);
            tick(&ticks, &session, 2);
            settle().await;
            assert_eq!(host.registrations(), 1);
            assert_eq!(host.transforms().len(), 1);
        })
        .await;
}

#[tokio::test]
async fn test_decode_failure_keeps_transform_pipeline_but_never_renders() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::hitting(Vec3::new(1.0, 0.0, 0.0));
            let ticks = EventChannel::new();
            let controller = spawn_at_center(&host, &session, StubDecoder::Fails, &ticks);

            let status = controller.wait_for_asset().await;
            assert!(matches!(
                status,
                AssetStatus::Failed(AssetError::Decode { .. })
            ));

            controller.publish_update(FRAC_PI_2, 0.5);
            settle().await;
            session.set_hit(Some(Vec3::new(4.0, 5.0, 6.0)));
            controller.publish_move(0.1, 0.0);
            settle().await;
            for sequence in 1..=3 {
                tick(&ticks, &session, sequence);
                settle().await;
            }

            let transform = controller.transform();
            assert_relative_eq!(transform.yaw, FRAC_PI_2);
            assert_relative_eq!(transform.scale, 0.5);
            assert_eq!(transform.translation, Vec3::new(4.0, 5.0, 6.0));
            assert!(host.transforms().is_empty());
            assert_eq!(host.registrations(), 0);
            assert_eq!(host.uploads(), 0);
        })
        .await;
}

#[tokio::test]
async fn test_move_miss_leaves_translation_unchanged() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::hitting(Vec3::new(1.0, 2.0, 3.0));
            let ticks = EventChannel::new();
            let controller = spawn_at_center(&host, &session, StubDecoder::Succeeds, &ticks);

            session.set_hit(None);
            controller.publish_move(0.1, -0.2);
            settle().await;
            assert_eq!(controller.transform().translation, Vec3::new(1.0, 2.0, 3.0));

            // The cursor keeps accumulating across misses.
            session.set_hit(Some(Vec3::new(-1.0, 0.0, -2.0)));
            controller.publish_move(0.1, 0.1);
            settle().await;
            assert_eq!(controller.transform().translation, Vec3::new(-1.0, 0.0, -2.0));
            let (x, y) = session.last_cast().unwrap();
            assert_relative_eq!(x, 0.7, epsilon = 1e-5);
            assert_relative_eq!(y, 0.4, epsilon = 1e-5);
        })
        .await;
}

#[tokio::test]
async fn test_rotate_nudges_accumulate() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::missing();
            let ticks = EventChannel::new();
            let controller = spawn_at_center(&host, &session, StubDecoder::Succeeds, &ticks);
            let gestures = controller.gestures();

            gestures.rotate_degrees(-10.0);
            settle().await;
            gestures.rotate_degrees(100.0);
            settle().await;

            assert_relative_eq!(controller.transform().yaw, FRAC_PI_2, epsilon = 1e-5);
            assert_eq!(controller.transform().scale, 1.0);
        })
        .await;
}

#[tokio::test]
async fn test_destroy_twice_releases_once() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::hitting(Vec3::ZERO);
            let ticks = EventChannel::new();
            let mut controller = spawn_at_center(&host, &session, StubDecoder::Succeeds, &ticks);
            controller.wait_for_asset().await;
            tick(&ticks, &session, 1);
            settle().await;
            assert_eq!(host.registrations(), 1);

            controller.destroy();
            controller.destroy();

            assert!(controller.is_destroyed());
            assert_eq!(controller.asset_status(), AssetStatus::Released);
            assert_eq!(host.unregistrations(), 1);
            assert_eq!(host.destroyed_assets(), 1);

            // Unregistration happens before release.
            let calls = host.calls();
            let unregister = calls
                .iter()
                .position(|c| matches!(c, common::HostCall::Unregister(_)));
            let release = calls
                .iter()
                .position(|c| matches!(c, common::HostCall::Destroy(_)));
            assert!(unregister < release);

            // Later frames are ignored.
            tick(&ticks, &session, 2);
            settle().await;
            assert_eq!(host.transforms().len(), 1);
            drop(controller);
            assert_eq!(host.destroyed_assets(), 1);
        })
        .await;
}

#[tokio::test]
async fn test_destroy_mid_load_performs_no_registration() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::hitting(Vec3::ZERO);
            let ticks = EventChannel::new();
            let (gate, decoder) = StubDecoder::gated();
            let mut controller = spawn_at_center(&host, &session, decoder, &ticks);
            settle().await;

            controller.destroy();
            gate.send(()).unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            tick(&ticks, &session, 1);
            settle().await;

            assert_eq!(controller.asset_status(), AssetStatus::Released);
            assert!(host.calls().is_empty());
        })
        .await;
}

#[tokio::test]
async fn test_unregistered_asset_is_released_without_unregistering() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::hitting(Vec3::ZERO);
            let ticks = EventChannel::new();
            let controller = spawn_at_center(&host, &session, StubDecoder::Succeeds, &ticks);
            controller.wait_for_asset().await;

            drop(controller);

            assert_eq!(host.unregistrations(), 0);
            assert_eq!(host.destroyed_assets(), 1);
        })
        .await;
}

#[tokio::test]
async fn test_replace_asset_releases_previous_and_loads_new() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::hitting(Vec3::ZERO);
            let ticks = EventChannel::new();
            let mut controller = spawn_at_center(&host, &session, StubDecoder::Succeeds, &ticks);
            controller.wait_for_asset().await;
            tick(&ticks, &session, 1);
            settle().await;

            controller.replace_asset(AssetReference::new("models/lamp.glb"));
            assert_eq!(controller.asset_status(), AssetStatus::Loading);
            assert_eq!(host.unregistrations(), 1);
            assert_eq!(host.destroyed_assets(), 1);

            assert_eq!(controller.wait_for_asset().await, AssetStatus::Ready);
            assert_eq!(controller.reference().as_str(), "models/lamp.glb");
            tick(&ticks, &session, 2);
            settle().await;
            assert_eq!(host.registrations(), 2);
            assert_eq!(host.uploads(), 2);
        })
        .await;
}

#[tokio::test]
async fn test_objects_on_one_tick_channel_stay_independent() {
    LocalSet::new()
        .run_until(async {
            let host = Rc::new(RecordingRenderHost::default());
            let session = StubSession::hitting(Vec3::new(1.0, 2.0, 3.0));
            let ticks = EventChannel::new();

            // Load one after the other so the chair's root is entity 1 and
            // the lamp's is entity 2.
            let mut chair = spawn_at_center(&host, &session, StubDecoder::Succeeds, &ticks);
            assert_eq!(chair.wait_for_asset().await, AssetStatus::Ready);
            session.set_hit(Some(Vec3::new(4.0, 0.0, -2.0)));
            let lamp = ObjectController::spawn(
                ObjectId(2),
                0.2,
                0.7,
                AssetReference::new("models/lamp.glb"),
                context(&host, &session, StubDecoder::Succeeds),
                &ticks,
            );
            assert_eq!(lamp.wait_for_asset().await, AssetStatus::Ready);
            let lamp_initial = lamp.transform();
            assert_eq!(lamp_initial.translation, Vec3::new(4.0, 0.0, -2.0));

            // --- Gesture on the chair only, then one frame ---
            chair.publish_update(FRAC_PI_2, 3.0);
            settle().await;
            tick(&ticks, &session, 1);
            settle().await;

            let chair_expected = ObjectTransform::new(Vec3::new(1.0, 2.0, 3.0), FRAC_PI_2, 3.0);
            assert_eq!(chair.transform(), chair_expected);
            assert_eq!(lamp.transform(), lamp_initial);

            let chair_root = EntityId(1);
            let lamp_root = EntityId(2);
            assert_eq!(host.transforms_of(chair_root), vec![chair_expected.model_matrix()]);
            assert_eq!(host.transforms_of(lamp_root), vec![lamp_initial.model_matrix()]);
            assert!(host.is_registered(chair_root));
            assert!(host.is_registered(lamp_root));

            // --- Removing the chair leaves the lamp rendering ---
            chair.destroy();
            tick(&ticks, &session, 2);
            settle().await;

            assert!(!host.is_registered(chair_root));
            assert!(host.is_registered(lamp_root));
            assert_eq!(host.transforms_of(chair_root).len(), 1);
            assert_eq!(
                host.transforms_of(lamp_root),
                vec![lamp_initial.model_matrix(); 2]
            );
            assert_eq!(lamp.asset_status(), AssetStatus::Ready);
        })
        .await;
}
