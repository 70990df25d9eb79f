use glam::{Quat, Vec3};
use itertools::Itertools;
use noisy_float::prelude::*;
use serde::Deserialize;
use tracing::{info, trace, warn};

use super::{Pose, PlayerPose, RawFrame, ReplayFrame};
use crate::{
    config::{keys, ReplayConfig, SettingsProvider},
    utils::*,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReplayInfo {
    pub one_saber: bool,
    pub left_handed: bool,
}

/// Interpolated player state for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplaySample {
    pub pose: PlayerPose,
    pub left_tip: Vec3,
    pub right_tip: Vec3,
    pub left_visible: bool,
    pub right_visible: bool,
    pub headset_visible: bool,
    /// Frame the sample starts from, `None` when nothing is loaded.
    pub frame_index: Option<usize>,
}

pub struct ReplaySampler {
    frames: Vec<ReplayFrame>,
    info: ReplayInfo,
    cursor: Cursor,
    config: ReplayConfig,
}

impl ReplaySampler {
    pub fn new(config: ReplayConfig) -> Self {
        Self {
            frames: vec![],
            info: ReplayInfo::default(),
            cursor: Cursor::default(),
            config,
        }
    }

    /// Replaces the loaded frames, returns how many were kept.
    pub fn load(&mut self, raw: &[RawFrame], info: ReplayInfo) -> usize {
        self.frames = raw
            .iter()
            .filter_map(|record| {
                let frame = ReplayFrame::from_raw(record);
                if frame.is_none() {
                    warn!(time = record.time, "skipping replay frame");
                }
                frame
            })
            .sorted_by_key(|frame| frame.time)
            .collect();
        debug_assert!(self.frames.is_quantified());
        self.info = info;
        self.cursor.reset();

        info!(frames = self.frames.len(), dropped = raw.len() - self.frames.len(), "loaded replay");
        self.frames.len()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.info = ReplayInfo::default();
        self.cursor.reset();
    }

    pub fn frames(&self) -> &[ReplayFrame] {
        &self.frames
    }

    pub fn default_pose(&self) -> PlayerPose {
        PlayerPose {
            head: Pose::new(self.config.default_head_position, Quat::IDENTITY),
            left_hand: Pose::new(self.config.default_left_hand_position, Quat::IDENTITY),
            right_hand: Pose::new(self.config.default_right_hand_position, Quat::IDENTITY),
        }
    }

    /// Which sabers are drawn: one-saber replays only show the dominant hand.
    pub fn saber_visibility(&self) -> (bool, bool) {
        match self.info {
            ReplayInfo { one_saber: true, left_handed } => (left_handed, !left_handed),
            _ => (true, true),
        }
    }

    fn tip(&self, hand: &Pose) -> Vec3 {
        hand.position + hand.forward() * self.config.saber_tip_offset
    }

    /// Times before the first frame hold the first frame, times past the last
    /// hold the last.
    #[rustfmt::skip]
    pub fn sample(&mut self, time: R32, settings: &dyn SettingsProvider) -> ReplaySample {
        let index = self.frames.seek(&mut self.cursor, time);
        trace!(?index, time = time.raw(), "replay lookup");

        let (pose, frame_index) = match self.frames.first() {
            None => (self.default_pose(), None),
            Some(first) => {
                let index = index.unwrap_or(0);
                let current = self.frames.get(index).unwrap_or(first);
                let next = self.frames.get(index + 1).unwrap_or(current);

                let t = completion_ratio(time.raw(), current.time.raw(), next.time.raw())
                    .clamp(0., 1.);
                (current.pose.lerp(&next.pose, t), Some(index))
            }
        };

        let (left_visible, right_visible) = self.saber_visibility();
        ReplaySample {
            left_tip: self.tip(&pose.left_hand),
            right_tip: self.tip(&pose.right_hand),
            pose,
            left_visible,
            right_visible,
            headset_visible: settings.get_bool(keys::SHOW_HEADSET)
                && !settings.get_bool(keys::FIRST_PERSON_REPLAY),
            frame_index,
        }
    }

    /// Frames the saber trails are drawn through, ending at the frame after
    /// the last sampled one. `None` when trails are off.
    pub fn trail(&self, settings: &dyn SettingsProvider) -> Option<&[ReplayFrame]> {
        let length = usize::try_from(settings.get_int(keys::SABER_TRAIL_LENGTH)).ok()?;
        if !settings.get_bool(keys::SABER_TRAILS) || length == 0 || self.frames.is_empty() {
            return None;
        }

        let end = (self.cursor.index().unwrap_or(0) + 2).min(self.frames.len());
        self.frames.get(end.saturating_sub(length)..end)
    }

    /// One-off lookup that leaves the playback cursor alone.
    pub fn head_position_at(&self, time: R32) -> Vec3 {
        self.frames
            .before_or_at(time)
            .last()
            .or_else(|| self.frames.first())
            .map_or(Vec3::ZERO, |frame| frame.pose.head.position)
    }
}
