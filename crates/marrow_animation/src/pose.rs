//! Pose resolution: per-joint blending of every playing clip, composed down
//! the hierarchy in a single forward pass.
//!
//! # Blending
//!
//! For each joint the playback states whose clip animates it are gathered
//! and their weights (`track.weight * fade_weight`) normalized to sum to
//! one. Each contributor's sampled rotation and translation is turned into a
//! rigid transform, scaled by its normalized weight and summed entry by
//! entry.
//!
//! Summing matrices is cheaper than lerp/slerp-then-compose but the rotation
//! block of the result is only orthonormal when a single clip contributes.
//!
//! # Composition
//!
//! ```text
//! animated  = local_bind[j] * blended[j]
//! final[j]  = final[parent] * animated      (root: animated)
//! ```
//!
//! Joints without contributors, or whose contributors carry no weight,
//! follow their bind pose relative to the parent's current pose.

use glam::Mat4;
use slotmap::SlotMap;
use smallvec::SmallVec;

use marrow_core::math::{accumulate_weighted, rigid_transform};

use crate::joint::Rig;
use crate::playback::PlaybackState;
use crate::skeleton::PlaybackKey;

/// Normalized blend weights for one joint, in playback start order.
pub type Contributions = SmallVec<[(PlaybackKey, f32); 4]>;

/// Gathers the playback states animating `joint` and normalizes their
/// weights.
///
/// Returns an empty list when no state animates the joint, or when their
/// summed weight is at or below `weight_epsilon`.
#[must_use]
pub fn joint_contributions(
    joint: usize,
    order: &[PlaybackKey],
    playbacks: &SlotMap<PlaybackKey, PlaybackState>,
    weight_epsilon: f32,
) -> Contributions {
    let (mut contributions, total_weight) = gather(joint, order, playbacks);
    normalize(&mut contributions, total_weight, weight_epsilon);
    contributions
}

fn gather(
    joint: usize,
    order: &[PlaybackKey],
    playbacks: &SlotMap<PlaybackKey, PlaybackState>,
) -> (Contributions, f32) {
    let mut contributions = Contributions::new();
    let mut total_weight = 0.0;

    for &key in order {
        if let Some(weight) = playbacks[key].contribution(joint) {
            total_weight += weight;
            contributions.push((key, weight));
        }
    }
    (contributions, total_weight)
}

/// Scales the weights to sum to one. Clears the list and returns `false`
/// when the total is too small to divide by.
fn normalize(contributions: &mut Contributions, total_weight: f32, weight_epsilon: f32) -> bool {
    if total_weight <= weight_epsilon {
        contributions.clear();
        return false;
    }
    for (_, weight) in contributions.iter_mut() {
        *weight /= total_weight;
    }
    true
}

/// Weighted sum of the contributors' sampled transforms for `joint`.
pub fn blend_joint(
    joint: usize,
    contributions: &Contributions,
    playbacks: &mut SlotMap<PlaybackKey, PlaybackState>,
) -> Mat4 {
    let mut blended = Mat4::ZERO;
    for &(key, weight) in contributions {
        if let Some((translation, rotation)) = playbacks[key].sample_joint(joint) {
            let transform = rigid_transform(rotation, translation);
            accumulate_weighted(&mut blended, &transform, weight);
        }
    }
    blended
}

/// Writes the current pose of every joint of `rig` into `out`.
///
/// `out` must hold one matrix per joint. Returns how many joints had
/// contributors whose summed weight was too small to blend; those follow
/// their bind pose this frame.
pub fn resolve_pose(
    rig: &Rig,
    order: &[PlaybackKey],
    playbacks: &mut SlotMap<PlaybackKey, PlaybackState>,
    weight_epsilon: f32,
    out: &mut [Mat4],
) -> usize {
    debug_assert_eq!(out.len(), rig.len());
    let bind = rig.bind_matrices();
    let mut weightless = 0;

    for joint in rig.joints() {
        let j = joint.index;
        let (mut contributions, total_weight) = gather(j, order, playbacks);
        let has_contributors = !contributions.is_empty();
        if has_contributors && !normalize(&mut contributions, total_weight, weight_epsilon) {
            log::trace!("Joint {j}: total weight {total_weight}, holding bind pose");
            weightless += 1;
        }

        out[j] = if contributions.is_empty() {
            match joint.parent {
                None => bind[j],
                Some(parent) => out[parent] * joint.local_bind,
            }
        } else {
            let animated = joint.local_bind * blend_joint(j, &contributions, playbacks);
            match joint.parent {
                None => animated,
                Some(parent) => out[parent] * animated,
            }
        };
    }
    weightless
}
