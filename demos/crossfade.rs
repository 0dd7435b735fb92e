//! Headless crossfade demo.
//!
//! Builds a three-joint arm, starts an idle loop, crossfades into a wave
//! and back, and logs the hand position every few frames.
//!
//! ```text
//! RUST_LOG=debug cargo run --example crossfade
//! ```

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec3;
use marrow::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

fn build_rig() -> Result<Arc<Rig>> {
    let joints = vec![
        Joint::from_position_euler(0, None, Vec3::ZERO, Vec3::ZERO).with_name("shoulder"),
        Joint::from_position_euler(1, Some(0), Vec3::Y * 3.0, Vec3::ZERO).with_name("elbow"),
        Joint::from_position_euler(2, Some(1), Vec3::Y * 2.5, Vec3::ZERO).with_name("hand"),
    ];
    Ok(Arc::new(Rig::new(joints)?))
}

fn idle_clip() -> Arc<AnimationClip> {
    let sway = KeyframeTrack::from_euler_keys([
        (0.0, Vec3::new(0.0, 0.0, -0.05)),
        (1.0, Vec3::new(0.0, 0.0, 0.05)),
        (2.0, Vec3::new(0.0, 0.0, -0.05)),
    ]);
    Arc::new(AnimationClip::new(
        "idle",
        vec![
            JointTrack::new(KeyframeTrack::empty(), sway),
            JointTrack::empty(),
            JointTrack::empty(),
        ],
    ))
}

fn wave_clip() -> Arc<AnimationClip> {
    let raise = KeyframeTrack::from_euler_keys([
        (0.0, Vec3::new(0.0, 0.0, 0.0)),
        (0.5, Vec3::new(0.0, 0.0, 1.2)),
    ]);
    let wave = KeyframeTrack::from_euler_keys([
        (0.0, Vec3::new(0.0, 0.0, -0.4)),
        (0.25, Vec3::new(0.0, 0.0, 0.4)),
        (0.5, Vec3::new(0.0, 0.0, -0.4)),
    ]);
    Arc::new(AnimationClip::new(
        "wave",
        vec![
            JointTrack::new(KeyframeTrack::empty(), raise),
            JointTrack::new(KeyframeTrack::empty(), wave),
            JointTrack::empty(),
        ],
    ))
}

fn main() -> Result<()> {
    env_logger::init();

    let rig = build_rig()?;
    for joint in rig.joints() {
        log::info!("{joint}");
    }

    let idle = idle_clip();
    let wave = wave_clip();

    let mut skeleton = Skeleton::new(Arc::clone(&rig));
    skeleton.start_animation(Some(&idle), PlayMode::ForwardLoop, 1.0, true)?;

    let hand = rig.joint_index("hand").unwrap_or(rig.len() - 1);
    let mut clock = FixedStep::from_rate(60.0)?;

    let start = Instant::now();
    let mut last = start;
    let mut frame: u64 = 0;

    while start.elapsed() < Duration::from_secs(4) {
        thread::sleep(FRAME);
        let now = Instant::now();
        let frame_dt = (now - last).as_secs_f32();
        last = now;
        frame += 1;

        if frame == 60 {
            skeleton.stop_animation(&idle);
            skeleton.play(&wave, PlayMode::ForwardBackwardLoop, 1.0)?;
        } else if frame == 180 {
            skeleton.stop_animation(&wave);
            skeleton.play(&idle, PlayMode::ForwardLoop, 1.0)?;
        }

        for _ in 0..clock.advance(frame_dt) {
            skeleton.update(clock.step());
        }

        if frame % 15 == 0 {
            let position = skeleton.final_joint_matrices()[hand].transform_point3(Vec3::ZERO);
            let weights: Vec<String> = skeleton
                .playbacks()
                .map(|(_, state)| format!("{} {:.2}", state.clip(), state.fade_weight()))
                .collect();
            log::info!("frame {frame:>4}: hand at {position:.2} [{}]", weights.join(", "));
        }
    }

    log::info!(
        "{} animation steps, uploading {} bytes of joint matrices",
        clock.steps_taken,
        skeleton.final_joint_bytes().len()
    );
    Ok(())
}
