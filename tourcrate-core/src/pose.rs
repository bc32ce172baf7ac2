//! Captured camera viewpoints and the store that serves them
//!
//! A [`PoseList`] is the ordered, immutable sequence of viewpoints loaded at
//! startup. A [`PoseStore`] pairs it with the fixed look-at target (the point
//! cloud centroid) and memoizes each pose's orientation the first time it is
//! asked for.

use std::cell::OnceCell;

use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::point::{Point3f, Vector3f};

/// A pose record as it appears in the pose document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCameraPose {
    /// Image file name for this viewpoint
    pub label: String,
    /// Camera center in world coordinates, expected to hold exactly 3 values
    #[serde(rename = "position_C")]
    pub position: Vec<f32>,
}

impl RawCameraPose {
    pub fn new(label: impl Into<String>, position: [f32; 3]) -> Self {
        Self {
            label: label.into(),
            position: position.to_vec(),
        }
    }
}

/// One captured viewpoint
#[derive(Debug, Clone, PartialEq)]
pub struct CameraPose {
    pub label: String,
    pub position: Point3f,
    pub sequence_index: usize,
}

/// Ordered sequence of viewpoints; insertion order is navigation order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseList {
    poses: Vec<CameraPose>,
}

impl PoseList {
    /// A list with no navigable poses
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the list from raw records, assigning 0-based sequence indices
    pub fn load(raw_poses: &[RawCameraPose]) -> Result<Self> {
        let poses = raw_poses
            .iter()
            .enumerate()
            .map(|(index, raw)| -> Result<CameraPose> {
                let [x, y, z] = <[f32; 3]>::try_from(raw.position.as_slice()).map_err(|_| {
                    Error::InvalidData(format!(
                        "pose {} ('{}') has {} position components, expected 3",
                        index,
                        raw.label,
                        raw.position.len()
                    ))
                })?;

                Ok(CameraPose {
                    label: raw.label.clone(),
                    position: Point3f::new(x, y, z),
                    sequence_index: index,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { poses })
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CameraPose> {
        self.poses.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CameraPose> {
        self.poses.iter()
    }
}

/// Orientation of a camera at `eye` facing `target`.
///
/// The camera looks down its local -Z axis with +Y up. A camera sitting on
/// its target keeps the identity orientation; a view direction parallel to
/// world up falls back to +Z as the up hint.
pub fn look_at_orientation(eye: &Point3f, target: &Point3f) -> UnitQuaternion<f32> {
    let backward = eye - target;
    let len_sq = backward.norm_squared();
    if len_sq <= f32::EPSILON {
        return UnitQuaternion::identity();
    }

    let mut up = Vector3f::y();
    if backward.cross(&up).norm_squared() <= f32::EPSILON * len_sq {
        up = Vector3f::z();
    }

    UnitQuaternion::face_towards(&backward, &up)
}

/// Pose list plus the fixed look-at target and a per-index orientation memo
#[derive(Debug)]
pub struct PoseStore {
    poses: PoseList,
    look_target: Point3f,
    orientations: Vec<OnceCell<UnitQuaternion<f32>>>,
}

impl PoseStore {
    pub fn new(poses: PoseList, look_target: Point3f) -> Self {
        let orientations = (0..poses.len()).map(|_| OnceCell::new()).collect();
        Self {
            poses,
            look_target,
            orientations,
        }
    }

    pub fn poses(&self) -> &PoseList {
        &self.poses
    }

    pub fn look_target(&self) -> Point3f {
        self.look_target
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.poses.len()
    }

    pub fn pose(&self, index: usize) -> Option<&CameraPose> {
        self.poses.get(index)
    }

    /// Look-at orientation of the pose at `index`, derived on first use
    pub fn orientation(&self, index: usize) -> Option<UnitQuaternion<f32>> {
        let pose = self.poses.get(index)?;
        let cell = &self.orientations[index];
        Some(*cell.get_or_init(|| look_at_orientation(&pose.position, &self.look_target)))
    }

    /// Whether the orientation at `index` has been derived yet
    pub fn is_orientation_cached(&self, index: usize) -> bool {
        self.orientations
            .get(index)
            .is_some_and(|cell| cell.get().is_some())
    }
}
