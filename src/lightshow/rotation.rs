use noisy_float::prelude::*;
use rand::Rng;
use tracing::debug;

use crate::{
    config::RotationConfig,
    events::{LaserSpeedEvent, RotationAssignment, RotationAssignments},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RotationSummary {
    /// Right events that copied a simultaneous left event.
    pub mirrored: usize,
    /// Events on either side that got fresh random assignments.
    pub randomized: usize,
}

/// Hands out per-unit starting angles and directions to speed events.
pub struct RotationResolver<R> {
    rng: R,
    config: RotationConfig,
}

impl<R: Rng> RotationResolver<R> {
    pub fn new(rng: R, config: RotationConfig) -> Self {
        Self { rng, config }
    }

    /// One assignment per unit. Stopped lasers all rest at angle 0.
    pub fn randomize(&mut self, speed: i32) -> RotationAssignments {
        (0..self.config.unit_count)
            .map(|_| match speed {
                0 => RotationAssignment::default(),
                _ => RotationAssignment {
                    start_angle: self.rng.gen_range(0f32..360.),
                    direction: self.rng.gen_bool(0.5),
                },
            })
            .collect()
    }

    fn same_time(&self, left: R32, right: R32) -> bool {
        (left - right).raw().abs() <= self.config.same_time_tolerance
    }

    /// Fills `rotations` on both streams. Both must be sorted by time.
    ///
    /// Every left event is randomized. Each right event copies the left
    /// event at the same time if there is one, so simultaneous speed changes
    /// spin both sides in mirror. Otherwise it gets its own random values.
    #[rustfmt::skip]
    pub fn populate(
        &mut self,
        left: &mut [LaserSpeedEvent],
        right: &mut [LaserSpeedEvent],
    ) -> RotationSummary {
        let mut summary = RotationSummary::default();

        left.iter_mut().for_each(|event| {
            event.rotations = self.randomize(event.speed);
            summary.randomized += 1;
        });

        let mut cursor = 0;
        right.iter_mut().for_each(|event| {
            let time = event.time;
            while left.get(cursor).map_or(false, |candidate| {
                candidate.time < time && !self.same_time(candidate.time, time)
            }) {
                cursor += 1;
            }

            match left.get(cursor).filter(|candidate| self.same_time(candidate.time, time)) {
                Some(partner) => {
                    event.rotations = partner.rotations.clone();
                    summary.mirrored += 1;
                }
                None => {
                    event.rotations = self.randomize(event.speed);
                    summary.randomized += 1;
                }
            }
        });

        debug!(
            left = left.len(),
            right = right.len(),
            mirrored = summary.mirrored,
            randomized = summary.randomized,
            "populated laser rotations"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::SpeedChannel;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn speeds(channel: SpeedChannel, events: &[(f32, i32)]) -> Vec<LaserSpeedEvent> {
        events
            .iter()
            .map(|&(time, speed)| LaserSpeedEvent::new(channel, time, r32(time), speed))
            .collect()
    }

    fn resolver(seed: u64, config: RotationConfig) -> RotationResolver<StdRng> {
        RotationResolver::new(StdRng::seed_from_u64(seed), config)
    }

    #[test]
    fn assignments_have_unit_shape() {
        let mut resolver = resolver(1, RotationConfig::default());

        (0..200).for_each(|_| {
            let rotations = resolver.randomize(3);
            assert_eq!(rotations.len(), 4);
            assert!(rotations
                .iter()
                .all(|rotation| (0. ..360.).contains(&rotation.start_angle)));
        })
    }

    #[test]
    fn stopped_lasers_rest_at_zero() {
        let mut resolver = resolver(2, RotationConfig::default());
        assert!(resolver
            .randomize(0)
            .iter()
            .all(|rotation| *rotation == RotationAssignment::default()));
    }

    #[test]
    fn simultaneous_events_mirror() {
        let mut left = speeds(SpeedChannel::Left, &[(1., 2), (2., 5), (4., 3)]);
        let mut right = speeds(SpeedChannel::Right, &[(0.5, 1), (2., 5), (3., 1), (4., 8)]);

        let summary = resolver(3, RotationConfig::default()).populate(&mut left, &mut right);

        assert_eq!(right[1].rotations, left[1].rotations);
        assert_eq!(right[3].rotations, left[2].rotations);
        assert_eq!(summary, RotationSummary { mirrored: 2, randomized: 5 });
        right.iter().chain(&left).for_each(|event| assert_eq!(event.rotations.len(), 4));
    }

    #[test]
    fn independent_events_are_not_copies() {
        let left_times: Vec<_> = (0..64).map(|i| (i as f32, 2)).collect();
        let right_times: Vec<_> = (0..64).map(|i| (i as f32 + 0.5, 2)).collect();
        let mut left = speeds(SpeedChannel::Left, &left_times);
        let mut right = speeds(SpeedChannel::Right, &right_times);

        let summary = resolver(4, RotationConfig::default()).populate(&mut left, &mut right);
        assert_eq!(summary.mirrored, 0);

        let copies = right
            .iter()
            .filter(|event| left.iter().any(|other| other.rotations == event.rotations))
            .count();
        assert_eq!(copies, 0);

        let clockwise = right
            .iter()
            .flat_map(|event| event.rotations.iter())
            .filter(|rotation| rotation.direction)
            .count();
        assert!((64..192).contains(&clockwise), "{}", clockwise);
    }

    #[test]
    fn tolerance_widens_matching() {
        let mut left = speeds(SpeedChannel::Left, &[(1., 2)]);
        let mut exact = speeds(SpeedChannel::Right, &[(1.0005, 2)]);
        let mut loose = exact.clone();

        resolver(5, RotationConfig::default()).populate(&mut left, &mut exact);
        assert_ne!(exact[0].rotations, left[0].rotations);

        let config = RotationConfig {
            same_time_tolerance: 0.001,
            ..Default::default()
        };
        let summary = resolver(5, config).populate(&mut left, &mut loose);
        assert_eq!(summary.mirrored, 1);
        assert_eq!(loose[0].rotations, left[0].rotations);
    }

    #[test]
    fn seeded_runs_reproduce() {
        let run = || {
            let mut left = speeds(SpeedChannel::Left, &[(0., 1), (1., 2)]);
            let mut right = speeds(SpeedChannel::Right, &[(0.5, 3)]);
            resolver(9, RotationConfig::default()).populate(&mut left, &mut right);
            (left, right)
        };
        assert_eq!(run(), run());
    }
}
