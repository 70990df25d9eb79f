use itertools::Itertools;
use rand::Rng;
use tap::Pipe;
use tracing::{info, trace, warn};

use super::rotation::{RotationResolver, RotationSummary};
use crate::{
    events::*,
    timing::TempoMap,
    utils::{Cursor, Quantify, SeekExtensions},
};

/// Counts reported after a difficulty is loaded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RebuildSummary {
    pub lights: usize,
    pub speeds: usize,
    pub boosts: usize,
    pub rings: usize,
    /// Valid tags this engine doesn't render.
    pub unused: usize,
    /// Records rejected with an [`EventError`].
    pub skipped: usize,
    pub rotations: RotationSummary,
}

/// Every sorted event collection one difficulty plays back from.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Timeline {
    lights: [Vec<LightEvent>; 5],
    speeds: [Vec<LaserSpeedEvent>; 2],
    boosts: Vec<BoostEvent>,
    ring_spins: Vec<RingEvent>,
    ring_zooms: Vec<RingEvent>,
}

/// Stable, so simultaneous events keep their order in the map.
fn sorted<T: Quantify>(events: Vec<T>) -> Vec<T> {
    let events = events.into_iter().sorted_by_key(|event| event.quantify()).collect_vec();
    debug_assert!(events.is_quantified());
    events
}

impl Timeline {
    /// Routes, sorts and populates rotations in one go. The returned timeline
    /// is complete, nothing is observable half built.
    pub fn build<R: Rng>(
        difficulty: &Difficulty,
        tempo: &dyn TempoMap,
        rotations: &mut RotationResolver<R>,
    ) -> (Self, RebuildSummary) {
        let mut timeline = Self::default();
        let mut summary = RebuildSummary::default();

        difficulty
            .events
            .iter()
            .for_each(|raw| match RoutedEvent::from_raw(raw, tempo) {
                Ok(RoutedEvent::Light(event)) => timeline.lights[event.channel.index()].push(event),
                Ok(RoutedEvent::Speed(event)) => timeline.speeds[event.channel.index()].push(event),
                Ok(RoutedEvent::Ring(event)) => match event.kind {
                    RingEventKind::Spin => timeline.ring_spins.push(event),
                    RingEventKind::Zoom => timeline.ring_zooms.push(event),
                },
                Ok(RoutedEvent::Unused(kind)) => {
                    trace!(%kind, beat = raw.beat, "skipping unused event");
                    summary.unused += 1;
                }
                Err(error) => {
                    warn!(%error, beat = raw.beat, "skipping event");
                    summary.skipped += 1;
                }
            });

        timeline.boosts = difficulty
            .boosts
            .iter()
            .filter_map(|raw| {
                BoostEvent::from_raw(raw, tempo)
                    .map_err(|error| {
                        warn!(%error, "skipping boost event");
                        summary.skipped += 1;
                    })
                    .ok()
            })
            .collect_vec()
            .pipe(sorted);

        timeline.lights = timeline.lights.map(sorted);
        timeline.speeds = timeline.speeds.map(sorted);
        timeline.ring_spins = sorted(timeline.ring_spins);
        timeline.ring_zooms = sorted(timeline.ring_zooms);

        let [left, right] = &mut timeline.speeds;
        summary.rotations = rotations.populate(left, right);

        summary.lights = timeline.lights.iter().map(Vec::len).sum();
        summary.speeds = timeline.speeds.iter().map(Vec::len).sum();
        summary.boosts = timeline.boosts.len();
        summary.rings = timeline.ring_spins.len() + timeline.ring_zooms.len();

        info!(
            lights = summary.lights,
            speeds = summary.speeds,
            boosts = summary.boosts,
            rings = summary.rings,
            unused = summary.unused,
            skipped = summary.skipped,
            "rebuilt timeline"
        );
        (timeline, summary)
    }

    pub fn lights(&self, channel: LightChannel) -> &[LightEvent] {
        &self.lights[channel.index()]
    }

    pub fn speeds(&self, channel: SpeedChannel) -> &[LaserSpeedEvent] {
        &self.speeds[channel.index()]
    }

    pub fn boosts(&self) -> &[BoostEvent] {
        &self.boosts
    }

    pub fn rings(&self, kind: RingEventKind) -> &[RingEvent] {
        match kind {
            RingEventKind::Spin => &self.ring_spins,
            RingEventKind::Zoom => &self.ring_zooms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lights.iter().all(Vec::is_empty)
            && self.speeds.iter().all(Vec::is_empty)
            && self.ring_spins.is_empty()
            && self.ring_zooms.is_empty()
    }
}

/// One [`Cursor`] per collection of a [`Timeline`]. Reset whenever the
/// timeline is replaced.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TimelineCursors {
    pub lights: [Cursor; 5],
    pub speeds: [Cursor; 2],
    pub boost: Cursor,
    pub ring_spin: Cursor,
    pub ring_zoom: Cursor,
}

impl TimelineCursors {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
