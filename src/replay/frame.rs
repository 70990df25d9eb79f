use glam::{Quat, Vec3};
use noisy_float::prelude::*;
use serde::Deserialize;

use crate::utils::{Lerp, Quantify};

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Linear in position, spherical in rotation.
impl Lerp for Pose {
    type Output = Self;

    fn lerp(&self, next: &Self, t: f32) -> Self::Output {
        Self {
            position: self.position.lerp(next.position, t),
            rotation: self.rotation.slerp(next.rotation, t),
        }
    }
}

/// Head and both hands at one instant.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub head: Pose,
    pub left_hand: Pose,
    pub right_hand: Pose,
}

impl Lerp for PlayerPose {
    type Output = Self;

    fn lerp(&self, next: &Self, t: f32) -> Self::Output {
        Self {
            head: self.head.lerp(&next.head, t),
            left_hand: self.left_hand.lerp(&next.left_hand, t),
            right_hand: self.right_hand.lerp(&next.right_hand, t),
        }
    }
}

/// Replay frame record as the replay parser hands it over.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFrame {
    pub time: f32,
    pub head: Pose,
    pub left_hand: Pose,
    pub right_hand: Pose,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayFrame {
    pub time: R32,
    pub pose: PlayerPose,
}

impl ReplayFrame {
    /// `None` for frames stamped with NaN or infinity.
    pub fn from_raw(raw: &RawFrame) -> Option<Self> {
        raw.time.is_finite().then(|| Self {
            time: r32(raw.time),
            pose: PlayerPose {
                head: raw.head,
                left_hand: raw.left_hand,
                right_hand: raw.right_hand,
            },
        })
    }
}

impl Quantify for ReplayFrame {
    fn quantify(&self) -> R32 {
        self.time
    }
}
