use serde::Deserialize;

/// Beat to seconds conversion. Tempo maps are built by whoever parses the map,
/// the engine only asks for times.
pub trait TempoMap {
    fn time_at(&self, beat: f32) -> f32;
    fn beat_at(&self, time: f32) -> f32;
}

/// Constant tempo with an optional start offset in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bpm {
    pub bpm: f32,
    #[serde(default)]
    pub offset: f32,
}

impl Bpm {
    pub fn new(bpm: f32) -> Self {
        Self { bpm, offset: 0. }
    }

    fn beat_period(&self) -> f32 {
        60. / self.bpm
    }
}

impl Default for Bpm {
    fn default() -> Self {
        Self::new(120.)
    }
}

impl TempoMap for Bpm {
    fn time_at(&self, beat: f32) -> f32 {
        beat * self.beat_period() + self.offset
    }

    fn beat_at(&self, time: f32) -> f32 {
        (time - self.offset) / self.beat_period()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(60., 0., 4., 4.; "one beat per second")]
    #[test_case(120., 0., 4., 2.; "two beats per second")]
    #[test_case(60., 1.5, 2., 3.5; "offset")]
    fn beat_to_time(bpm: f32, offset: f32, beat: f32, time: f32) {
        let tempo = Bpm { bpm, offset };
        assert_eq!(tempo.time_at(beat), time);
        assert_eq!(tempo.beat_at(time), beat);
    }
}
