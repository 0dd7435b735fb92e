//! Animation Data Tests
//!
//! Tests for:
//! - KeyframeTrack clamping, keyframe exactness, lerp/slerp interpolation
//! - KeyframeCursor agreement with stateless sampling
//! - JointTrack independent channels and queries
//! - AnimationClip duration auto-computation
//! - PlayMode boundary table (all ten modes)
//! - PlaybackState fade ramps and time advance

use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use glam::{Quat, Vec3};

use marrow::animation::Interpolatable;
use marrow::animation::clip::{AnimationClip, JointTrack};
use marrow::animation::play_mode::{Boundary, Direction, PlayMode};
use marrow::animation::playback::{PlaybackState, PlaybackStatus};
use marrow::animation::tracks::{KeyframeCursor, KeyframeTrack};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

/// Same orientation, either hemisphere.
fn approx_quat(a: Quat, b: Quat) -> bool {
    a.dot(b).abs() > 1.0 - EPSILON
}

// ============================================================================
// KeyframeTrack: Clamping
// ============================================================================

#[test]
fn track_clamps_before_first_key() {
    let track = KeyframeTrack::new(vec![1.0, 2.0], vec![10.0_f32, 20.0]);
    assert!(approx(track.sample(0.5), 10.0), "got {}", track.sample(0.5));
    assert!(approx(track.sample(-100.0), 10.0));
}

#[test]
fn track_clamps_at_and_after_last_key() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32, 10.0]);
    assert!(approx(track.sample(1.0), 10.0));
    assert!(approx(track.sample(5.0), 10.0), "got {}", track.sample(5.0));
}

#[test]
fn track_clamp_law_for_rotations() {
    let q0 = Quat::from_rotation_x(0.3);
    let q1 = Quat::from_rotation_y(1.2);
    let track = KeyframeTrack::new(vec![0.5, 1.5], vec![q0, q1]);

    assert!(approx_quat(track.sample(0.0), q0));
    assert!(approx_quat(track.sample(1.5), q1));
    assert!(approx_quat(track.sample(9.0), q1));
}

#[test]
fn empty_track_samples_rest_value() {
    let positions: KeyframeTrack<Vec3> = KeyframeTrack::empty();
    let rotations: KeyframeTrack<Quat> = KeyframeTrack::empty();
    assert_eq!(positions.sample(0.3), Vec3::ZERO);
    assert_eq!(rotations.sample(0.3), Quat::IDENTITY);
    assert!(approx(positions.duration(), 0.0));
}

// ============================================================================
// KeyframeTrack: Interpolation
// ============================================================================

#[test]
fn track_linear_vec3_midpoint() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)]);
    let val = track.sample(0.5);
    assert!(approx_vec3(val, Vec3::new(5.0, 10.0, 15.0)), "got {val}");
}

#[test]
fn track_keyframe_exactness() {
    let positions = vec![
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(-4.0, 0.5, 9.0),
        Vec3::new(7.0, 7.0, -7.0),
    ];
    let track = KeyframeTrack::new(vec![0.0, 0.4, 1.3], positions.clone());
    for (time, expected) in [0.0, 0.4, 1.3].into_iter().zip(positions) {
        assert_eq!(track.sample(time), expected, "t={time}");
    }

    let rotations = vec![
        Quat::IDENTITY,
        Quat::from_rotation_y(FRAC_PI_2),
        Quat::from_rotation_z(2.0),
    ];
    let track = KeyframeTrack::new(vec![0.0, 0.4, 1.3], rotations.clone());
    for (time, expected) in [0.0, 0.4, 1.3].into_iter().zip(rotations) {
        assert!(approx_quat(track.sample(time), expected), "t={time}");
    }
}

#[test]
fn track_quat_slerp() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(PI * 0.5);

    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![q0, q1]);
    let val = track.sample(0.5);
    let expected = Quat::from_rotation_y(PI * 0.25);
    assert!(approx_quat(val, expected), "got {val}");
}

#[test]
fn track_quat_slerp_takes_shortest_arc() {
    let q0 = Quat::from_rotation_y(0.2);
    // Same orientation as rotation_y(0.6), stored in the opposite hemisphere
    let q1 = -Quat::from_rotation_y(0.6);

    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![q0, q1]);
    let val = track.sample(0.5);
    assert!(approx_quat(val, Quat::from_rotation_y(0.4)));
}

#[test]
fn track_coincident_keys_do_not_divide_by_zero() {
    let track = KeyframeTrack::new(vec![0.0, 1.0, 1.0, 2.0], vec![0.0_f32, 10.0, 50.0, 60.0]);
    let val = track.sample(1.0);
    assert!(val.is_finite());
    assert!(approx(val, 50.0), "got {val}");
}

#[test]
fn interpolatable_quat_linear_is_slerp() {
    let a = Quat::IDENTITY;
    let b = Quat::from_rotation_y(FRAC_PI_2);
    let result = Quat::interpolate_linear(&a, &b, 0.5);

    let expected = Quat::from_rotation_y(FRAC_PI_2 * 0.5);
    assert!(approx_quat(result, expected), "Slerp mismatch: {result} vs {expected}");
}

#[test]
fn from_euler_keys_builds_zyx_rotations() {
    let track =
        KeyframeTrack::from_euler_keys([(0.0, Vec3::ZERO), (1.0, Vec3::new(0.0, 0.0, FRAC_PI_2))]);
    assert_eq!(track.len(), 2);
    assert!(approx_quat(track.sample(1.0), Quat::from_rotation_z(FRAC_PI_2)));
}

// ============================================================================
// KeyframeCursor
// ============================================================================

#[test]
fn cursor_matches_sample_across_all_times() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 5.0, 20.0, 15.0],
    );
    let mut cursor = KeyframeCursor::default();
    for i in -5..=45 {
        let t = i as f32 * 0.1;
        let val_cursor = track.sample_with_cursor(t, &mut cursor);
        let val_sample = track.sample(t);
        assert!(
            approx(val_sample, val_cursor),
            "t={t}: sample()={val_sample} != sample_with_cursor()={val_cursor}"
        );
    }
}

#[test]
fn cursor_forward_then_jump_back() {
    let track = KeyframeTrack::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0_f32, 10.0, 20.0, 30.0]);

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(2.5, &mut cursor), 25.0));
    assert_eq!(cursor.last_index, 2);

    // Loop wrap back to the start
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor), 5.0));
    assert_eq!(cursor.last_index, 0);
}

#[test]
fn cursor_single_keyframe() {
    let track = KeyframeTrack::new(vec![0.0], vec![42.0_f32]);
    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(5.0, &mut cursor), 42.0));
    assert!(approx(track.sample_with_cursor(-5.0, &mut cursor), 42.0));
}

// ============================================================================
// JointTrack
// ============================================================================

#[test]
fn joint_track_channels_are_independent() {
    let track = JointTrack::new(
        KeyframeTrack::new(vec![0.0, 2.0], vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)]),
        KeyframeTrack::new(
            vec![0.0, 0.5, 1.0],
            vec![
                Quat::IDENTITY,
                Quat::from_rotation_z(FRAC_PI_2),
                Quat::from_rotation_z(PI),
            ],
        ),
    );

    let (position, rotation) = track.sample(0.5);
    assert!(approx_vec3(position, Vec3::new(0.5, 0.0, 0.0)), "got {position}");
    assert!(approx_quat(rotation, Quat::from_rotation_z(FRAC_PI_2)));

    // Rotation channel has ended, position keeps interpolating
    let (position, rotation) = track.sample(1.5);
    assert!(approx_vec3(position, Vec3::new(1.5, 0.0, 0.0)));
    assert!(approx_quat(rotation, Quat::from_rotation_z(PI)));
}

#[test]
fn joint_track_queries() {
    let track = JointTrack::new(
        KeyframeTrack::new(vec![0.0, 0.5, 2.0], vec![Vec3::ZERO; 3]),
        KeyframeTrack::new(vec![0.0, 3.0], vec![Quat::IDENTITY; 2]),
    )
    .with_weight(0.5);

    assert_eq!(track.position_count(), 3);
    assert_eq!(track.rotation_count(), 2);
    assert_eq!(track.frame_count(), 3);
    assert!(approx(track.position_duration(), 2.0));
    assert!(approx(track.rotation_duration(), 3.0));
    assert!(approx(track.duration(), 3.0));
    assert!(approx(track.weight, 0.5));
    assert!(!track.is_empty());
    assert!(JointTrack::empty().is_empty());
    assert!(approx(JointTrack::default().weight, 1.0));
}

#[test]
fn joint_track_with_only_rotation_uses_zero_translation() {
    let track = JointTrack::new(
        KeyframeTrack::empty(),
        KeyframeTrack::new(vec![0.0], vec![Quat::from_rotation_x(1.0)]),
    );
    let (position, _) = track.sample(0.0);
    assert_eq!(position, Vec3::ZERO);
}

// ============================================================================
// AnimationClip
// ============================================================================

#[test]
fn clip_auto_duration() {
    let clip = AnimationClip::new(
        "test",
        vec![
            JointTrack::new(
                KeyframeTrack::new(vec![0.0, 1.5], vec![Vec3::ZERO, Vec3::X]),
                KeyframeTrack::empty(),
            ),
            JointTrack::empty(),
            JointTrack::new(
                KeyframeTrack::empty(),
                KeyframeTrack::new(
                    vec![0.0, 3.0],
                    vec![Quat::IDENTITY, Quat::from_rotation_y(1.0)],
                ),
            ),
        ],
    );

    assert!(
        approx(clip.duration(), 3.0),
        "Duration should be max of all tracks (3.0), got {}",
        clip.duration()
    );
    assert_eq!(clip.joint_count(), 3);
    assert!(clip.track(0).is_some());
    assert!(clip.track(1).is_none());
    assert_eq!(clip.to_string(), "test");
    assert_eq!(clip.name(), "test");
    assert_eq!(clip.tracks().len(), 3);
    assert_eq!(clip.tracks()[2].rotation_count(), 2);
}

#[test]
fn clip_empty_tracks_zero_duration() {
    let clip = AnimationClip::new("empty", vec![]);
    assert!(approx(clip.duration(), 0.0));
}

#[test]
#[should_panic]
fn clip_track_out_of_range_panics() {
    let clip = AnimationClip::new("one", vec![JointTrack::empty()]);
    let _ = clip.track(1);
}

// ============================================================================
// PlayMode Boundary Table
// ============================================================================

const TOTAL: f32 = 2.0;

fn resolve(mode: PlayMode, time: f32, direction: Direction) -> Boundary {
    mode.resolve(time, direction, TOTAL)
}

#[test]
fn initial_directions() {
    use PlayMode::*;
    for mode in [
        ForwardStop,
        ForwardLoop,
        ForwardHalt,
        ForwardBackwardStop,
        ForwardBackwardLoop,
    ] {
        assert_eq!(mode.initial_direction(), Direction::Forward, "{mode}");
    }
    for mode in [
        BackwardStop,
        BackwardLoop,
        BackwardHalt,
        BackwardForwardStop,
        BackwardForwardLoop,
    ] {
        assert_eq!(mode.initial_direction(), Direction::Backward, "{mode}");
    }
}

#[test]
fn forward_stop_clamps_and_finishes() {
    let b = resolve(PlayMode::ForwardStop, 2.5, Direction::Forward);
    assert!(approx(b.time, TOTAL));
    assert!(b.finished);
}

#[test]
fn forward_loop_wraps_by_modulo() {
    let b = resolve(PlayMode::ForwardLoop, 2.5, Direction::Forward);
    assert!(approx(b.time, 0.5), "got {}", b.time);
    assert!(!b.finished);

    let b = resolve(PlayMode::ForwardLoop, TOTAL, Direction::Forward);
    assert!(approx(b.time, 0.0));
}

#[test]
fn forward_halt_clamps_forever() {
    let b = resolve(PlayMode::ForwardHalt, 7.0, Direction::Forward);
    assert!(approx(b.time, TOTAL));
    assert!(!b.finished);
}

#[test]
fn forward_backward_stop_bounces_once() {
    let b = resolve(PlayMode::ForwardBackwardStop, 2.2, Direction::Forward);
    assert!(approx(b.time, TOTAL));
    assert_eq!(b.direction, Direction::Backward);
    assert!(!b.finished);

    let b = resolve(PlayMode::ForwardBackwardStop, -0.1, Direction::Backward);
    assert!(approx(b.time, 0.0));
    assert!(b.finished);
}

#[test]
fn ping_pong_modes_flip_at_both_ends() {
    for mode in [PlayMode::ForwardBackwardLoop, PlayMode::BackwardForwardLoop] {
        let b = resolve(mode, 2.2, Direction::Forward);
        assert!(approx(b.time, TOTAL), "{mode}");
        assert_eq!(b.direction, Direction::Backward, "{mode}");
        assert!(!b.finished);

        let b = resolve(mode, -0.2, Direction::Backward);
        assert!(approx(b.time, 0.0), "{mode}");
        assert_eq!(b.direction, Direction::Forward, "{mode}");
        assert!(!b.finished);
    }
}

#[test]
fn backward_stop_finishes_without_clamping() {
    let b = resolve(PlayMode::BackwardStop, -0.3, Direction::Backward);
    assert!(b.finished);
    assert!(approx(b.time, -0.3));
}

#[test]
fn backward_loop_restarts_past_total() {
    // Pinned: `total - time` with a negative time exceeds `total`.
    let b = resolve(PlayMode::BackwardLoop, -0.25, Direction::Backward);
    assert!(approx(b.time, TOTAL + 0.25), "got {}", b.time);
    assert!(!b.finished);
}

#[test]
fn backward_halt_clamps_to_zero() {
    let b = resolve(PlayMode::BackwardHalt, -3.0, Direction::Backward);
    assert!(approx(b.time, 0.0));
    assert!(!b.finished);
}

#[test]
fn backward_forward_stop_bounces_then_finishes() {
    let b = resolve(PlayMode::BackwardForwardStop, -0.1, Direction::Backward);
    assert!(approx(b.time, 0.0));
    assert_eq!(b.direction, Direction::Forward);
    assert!(!b.finished);

    let b = resolve(PlayMode::BackwardForwardStop, 2.1, Direction::Forward);
    assert!(approx(b.time, TOTAL));
    assert!(b.finished);
}

#[test]
fn modes_ignore_the_boundary_they_do_not_handle() {
    // Forward-only modes never see negative times in practice; they leave them alone.
    let b = resolve(PlayMode::ForwardStop, -1.0, Direction::Forward);
    assert!(approx(b.time, -1.0));
    assert!(!b.finished);

    let b = resolve(PlayMode::BackwardHalt, 5.0, Direction::Backward);
    assert!(approx(b.time, 5.0));
}

// ============================================================================
// PlaybackState
// ============================================================================

fn make_clip(duration: f32) -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        "ramp",
        vec![JointTrack::new(
            KeyframeTrack::new(vec![0.0, duration], vec![Vec3::ZERO, Vec3::X]),
            KeyframeTrack::empty(),
        )],
    ))
}

#[test]
fn playback_starts_at_zero_fading_in() {
    let state = PlaybackState::new(make_clip(1.0), PlayMode::BackwardLoop, 1.0, false);
    assert!(approx(state.time(), 0.0));
    assert!(approx(state.fade_weight(), 0.0));
    assert!(state.is_fading_in());
    assert!(!state.is_finished());
    assert_eq!(state.direction(), Direction::Backward);
}

#[test]
fn playback_skip_fade_in_starts_at_full_weight() {
    let state = PlaybackState::new(make_clip(1.0), PlayMode::ForwardLoop, 1.0, true);
    assert!(approx(state.fade_weight(), 1.0));
    assert!(!state.is_fading_in());
}

#[test]
fn playback_fade_in_is_monotonic_until_clamped() {
    let mut state = PlaybackState::new(make_clip(10.0), PlayMode::ForwardLoop, 1.0, false);
    let dt = 0.03;
    let mut previous = state.fade_weight();

    while state.is_fading_in() {
        state.advance(dt, 10.0);
        let weight = state.fade_weight();
        if state.is_fading_in() {
            assert!(approx(weight - previous, 10.0 * dt), "step {}", weight - previous);
        }
        assert!(weight > previous);
        previous = weight;
    }
    assert!(approx(state.fade_weight(), 1.0));
}

#[test]
fn playback_speed_divides_time_step() {
    let mut state = PlaybackState::new(make_clip(10.0), PlayMode::ForwardLoop, 2.0, true);
    state.advance(1.0, 10.0);
    assert!(approx(state.time(), 0.5), "got {}", state.time());
}

#[test]
fn playback_finished_state_fades_out_and_freezes_time() {
    let mut state = PlaybackState::new(make_clip(10.0), PlayMode::ForwardLoop, 1.0, true);
    state.advance(0.5, 10.0);
    state.finish();

    assert_eq!(state.advance(0.05, 10.0), PlaybackStatus::Active);
    assert!(approx(state.fade_weight(), 0.5));
    assert!(approx(state.time(), 0.5));

    assert_eq!(state.advance(0.05, 10.0), PlaybackStatus::Expired);
}

#[test]
fn playback_contribution_is_track_weight_times_fade() {
    let clip = Arc::new(AnimationClip::new(
        "weighted",
        vec![
            JointTrack::new(
                KeyframeTrack::new(vec![0.0], vec![Vec3::ZERO]),
                KeyframeTrack::empty(),
            )
            .with_weight(0.5),
            JointTrack::empty(),
        ],
    ));
    let mut state = PlaybackState::new(clip, PlayMode::ForwardLoop, 1.0, false);
    state.advance(0.05, 10.0);

    assert!(approx(state.contribution(0).unwrap_or_default(), 0.25));
    assert_eq!(state.contribution(1), None);
    assert_eq!(state.sample_joint(1), None);
}
