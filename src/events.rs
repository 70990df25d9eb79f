mod channel;
mod record;
mod value;

pub use channel::*;
pub use record::*;
pub use value::*;

use derive_more::Display;
use noisy_float::prelude::*;
use tinyvec::TinyVec;

use crate::{timing::TempoMap, utils::Quantify};

/// Physical rotating units driven by one rotation-speed channel.
pub const ROTATION_UNITS: usize = 4;

/// Degrees per second for each step of a speed event's value.
pub const ROTATION_SPEED_STEP: f32 = 20.;

#[derive(Debug, Display, Clone, PartialEq)]
pub enum EventError {
    #[display(fmt = "unknown channel tag {}", _0)]
    UnknownChannel(i32),
    #[display(fmt = "beat {} maps to a non-finite time", beat)]
    NonFiniteTime { beat: f32 },
}

impl std::error::Error for EventError {}

/// Seconds of `beat` through `tempo`, rejected when the tempo map yields NaN or infinity.
pub fn event_time(beat: f32, tempo: &dyn TempoMap) -> Result<R32, EventError> {
    let time = tempo.time_at(beat);
    if time.is_finite() {
        Ok(r32(time))
    } else {
        Err(EventError::NonFiniteTime { beat })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightEvent {
    pub beat: f32,
    pub time: R32,
    pub channel: LightChannel,
    pub value: LightValue,
    pub intensity: f32,
}

impl LightEvent {
    pub fn new(channel: LightChannel, beat: f32, time: R32, value: LightValue) -> Self {
        Self {
            beat,
            time,
            channel,
            value,
            intensity: 1.,
        }
    }

    pub fn with_intensity(self, intensity: f32) -> Self {
        Self { intensity, ..self }
    }

    pub fn is_transition(&self) -> bool {
        self.value.is_transition()
    }
}

impl Quantify for LightEvent {
    fn quantify(&self) -> R32 {
        self.time
    }
}

/// Starting angle (degrees, `[0, 360)`) and spin direction of one rotating unit.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RotationAssignment {
    pub start_angle: f32,
    pub direction: bool,
}

pub type RotationAssignments = TinyVec<[RotationAssignment; ROTATION_UNITS]>;

#[derive(Debug, Clone, PartialEq)]
pub struct LaserSpeedEvent {
    pub beat: f32,
    pub time: R32,
    pub channel: SpeedChannel,
    /// Value ordinal, reused as a signed speed multiplier.
    pub speed: i32,
    pub intensity: f32,
    /// Filled once by the rotation pass after a rebuild.
    pub rotations: RotationAssignments,
}

impl LaserSpeedEvent {
    pub fn new(channel: SpeedChannel, beat: f32, time: R32, speed: i32) -> Self {
        Self {
            beat,
            time,
            channel,
            speed,
            intensity: 1.,
            rotations: RotationAssignments::default(),
        }
    }

    /// Degrees per second.
    pub fn rotation_speed(&self) -> f32 {
        self.speed as f32 * ROTATION_SPEED_STEP
    }
}

impl Quantify for LaserSpeedEvent {
    fn quantify(&self) -> R32 {
        self.time
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostEvent {
    pub beat: f32,
    pub time: R32,
    pub active: bool,
}

impl Quantify for BoostEvent {
    fn quantify(&self) -> R32 {
        self.time
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingEvent {
    pub beat: f32,
    pub time: R32,
    pub kind: RingEventKind,
    pub value: i32,
    pub float_param: f32,
}

impl Quantify for RingEvent {
    fn quantify(&self) -> R32 {
        self.time
    }
}
//
//
//
//
//
/// A raw record converted into the event type its channel tag selects.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutedEvent {
    Light(LightEvent),
    Speed(LaserSpeedEvent),
    Ring(RingEvent),
    /// Valid tag this engine doesn't render.
    Unused(EventType),
}

impl RoutedEvent {
    pub fn from_raw(raw: &RawEvent, tempo: &dyn TempoMap) -> Result<Self, EventError> {
        let kind = EventType::try_from(raw.channel_tag)?;
        let beat = raw.beat;

        Ok(match kind.route() {
            Route::Unused => Self::Unused(kind),
            Route::Light(channel) => Self::Light(
                LightEvent::new(
                    channel,
                    beat,
                    event_time(beat, tempo)?,
                    LightValue::from_ordinal(raw.value_ordinal),
                )
                .with_intensity(raw.float_param),
            ),
            Route::Speed(channel) => Self::Speed(LaserSpeedEvent {
                intensity: raw.float_param,
                ..LaserSpeedEvent::new(channel, beat, event_time(beat, tempo)?, raw.value_ordinal)
            }),
            Route::Ring(ring) => Self::Ring(RingEvent {
                beat,
                time: event_time(beat, tempo)?,
                kind: ring,
                value: raw.value_ordinal,
                float_param: raw.float_param,
            }),
        })
    }
}

impl BoostEvent {
    pub fn from_raw(raw: &RawBoostEvent, tempo: &dyn TempoMap) -> Result<Self, EventError> {
        Ok(Self {
            beat: raw.beat,
            time: event_time(raw.beat, tempo)?,
            active: raw.active,
        })
    }
}
