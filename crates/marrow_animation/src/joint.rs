//! Rig topology.
//!
//! A [`Rig`] is the immutable joint hierarchy shared by every skeleton
//! instance built from it. Joints are addressed by index and stored parent
//! before child, so any per-joint pass over the hierarchy is a single
//! forward loop.

use std::fmt;

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;

use marrow_core::errors::{MarrowError, Result};
use marrow_core::math::{rigid_transform_euler, try_inverse};

/// A node of the rig: its place in the hierarchy and its bind transform
/// relative to the parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub index: usize,
    /// `None` for a root joint. Must be smaller than `index`.
    pub parent: Option<usize>,
    pub name: String,
    pub local_bind: Mat4,
}

impl Joint {
    #[must_use]
    pub fn new(index: usize, parent: Option<usize>, local_bind: Mat4) -> Self {
        Self {
            index,
            parent,
            name: String::new(),
            local_bind,
        }
    }

    /// Builds the bind transform from an importer-style position and ZYX
    /// Euler rotation (radians): rotate first, then translate.
    #[must_use]
    pub fn from_position_euler(
        index: usize,
        parent: Option<usize>,
        position: Vec3,
        euler: Vec3,
    ) -> Self {
        Self::new(index, parent, rigid_transform_euler(euler, position))
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parent {
            Some(parent) => write!(f, "{}. {} -> {}", self.index, self.name, parent),
            None => write!(f, "{}. {} -> -1", self.index, self.name),
        }
    }
}

/// Immutable joint hierarchy with its bind pose resolved once.
///
/// Wrap in an `Arc` and hand it to as many [`Skeleton`](crate::Skeleton)s
/// as there are characters sharing the rig.
#[derive(Debug, Clone)]
pub struct Rig {
    joints: Vec<Joint>,
    /// Model-space bind transform per joint
    bind_matrices: Vec<Mat4>,
    /// Inverse of `bind_matrices`, moves a vertex into joint space
    inverse_bind_matrices: Vec<Mat4>,
    name_index: FxHashMap<String, usize>,
}

impl Rig {
    /// Validates the topology and resolves the bind pose.
    ///
    /// Every joint must sit at the position matching its `index`, and every
    /// parent must precede its children.
    pub fn new(joints: Vec<Joint>) -> Result<Self> {
        let count = joints.len();
        let mut bind_matrices: Vec<Mat4> = Vec::with_capacity(count);
        let mut inverse_bind_matrices = Vec::with_capacity(count);
        let mut name_index = FxHashMap::default();

        for (position, joint) in joints.iter().enumerate() {
            if joint.index != position {
                return Err(MarrowError::JointIndexMismatch {
                    position,
                    index: joint.index,
                });
            }

            let bind = match joint.parent {
                None => joint.local_bind,
                Some(parent) if parent < joint.index => bind_matrices[parent] * joint.local_bind,
                Some(parent) => {
                    return Err(MarrowError::JointOrderViolation {
                        index: joint.index,
                        parent,
                    });
                }
            };

            let inverse = try_inverse(&bind)
                .ok_or(MarrowError::NonInvertibleBindPose { joint: joint.index })?;

            bind_matrices.push(bind);
            inverse_bind_matrices.push(inverse);

            if !joint.name.is_empty() {
                name_index.entry(joint.name.clone()).or_insert(position);
            }
        }

        log::debug!("Rig built: {count} joints, {} named", name_index.len());

        Ok(Self {
            joints,
            bind_matrices,
            inverse_bind_matrices,
            name_index,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    #[inline]
    #[must_use]
    pub fn joint(&self, index: usize) -> Option<&Joint> {
        self.joints.get(index)
    }

    /// Index of the first joint called `name`.
    #[must_use]
    pub fn joint_index(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn bind_matrices(&self) -> &[Mat4] {
        &self.bind_matrices
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> &[Mat4] {
        &self.inverse_bind_matrices
    }
}
