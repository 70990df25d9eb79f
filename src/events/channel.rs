use derive_more::Display;

use super::EventError;

/// Every channel tag a basic beatmap event can carry.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    BackLasers = 0,
    Rings = 1,
    LeftRotatingLasers = 2,
    RightRotatingLasers = 3,
    CenterLights = 4,
    LeftSideExtra = 6,
    RightSideExtra = 7,
    RingSpin = 8,
    RingZoom = 9,
    BillieLeftLasers = 10,
    BillieRightLasers = 11,
    LeftRotationSpeed = 12,
    RightRotationSpeed = 13,
    InterscopeHydraulicsDown = 16,
    InterscopeHydraulicsUp = 17,
    GagaLeftTowerHeight = 18,
    GagaRightTowerHeight = 19,
}

impl TryFrom<i32> for EventType {
    type Error = EventError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        use EventType::*;

        Ok(match tag {
            0 => BackLasers,
            1 => Rings,
            2 => LeftRotatingLasers,
            3 => RightRotatingLasers,
            4 => CenterLights,
            6 => LeftSideExtra,
            7 => RightSideExtra,
            8 => RingSpin,
            9 => RingZoom,
            10 => BillieLeftLasers,
            11 => BillieRightLasers,
            12 => LeftRotationSpeed,
            13 => RightRotationSpeed,
            16 => InterscopeHydraulicsDown,
            17 => InterscopeHydraulicsUp,
            18 => GagaLeftTowerHeight,
            19 => GagaRightTowerHeight,
            _ => return Err(EventError::UnknownChannel(tag)),
        })
    }
}

/// Which collection an event type is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Light(LightChannel),
    Speed(SpeedChannel),
    Ring(RingEventKind),
    Unused,
}

impl EventType {
    pub fn route(self) -> Route {
        use EventType::*;

        match self {
            BackLasers => Route::Light(LightChannel::BackLasers),
            Rings => Route::Light(LightChannel::Rings),
            LeftRotatingLasers => Route::Light(LightChannel::LeftRotatingLasers),
            RightRotatingLasers => Route::Light(LightChannel::RightRotatingLasers),
            CenterLights => Route::Light(LightChannel::CenterLights),
            LeftRotationSpeed => Route::Speed(SpeedChannel::Left),
            RightRotationSpeed => Route::Speed(SpeedChannel::Right),
            RingSpin => Route::Ring(RingEventKind::Spin),
            RingZoom => Route::Ring(RingEventKind::Zoom),
            LeftSideExtra
            | RightSideExtra
            | BillieLeftLasers
            | BillieRightLasers
            | InterscopeHydraulicsDown
            | InterscopeHydraulicsUp
            | GagaLeftTowerHeight
            | GagaRightTowerHeight => Route::Unused,
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightChannel {
    BackLasers,
    Rings,
    LeftRotatingLasers,
    RightRotatingLasers,
    CenterLights,
}

impl LightChannel {
    pub const ALL: [LightChannel; 5] = [
        LightChannel::BackLasers,
        LightChannel::Rings,
        LightChannel::LeftRotatingLasers,
        LightChannel::RightRotatingLasers,
        LightChannel::CenterLights,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedChannel {
    Left,
    Right,
}

impl SpeedChannel {
    pub const ALL: [SpeedChannel; 2] = [SpeedChannel::Left, SpeedChannel::Right];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingEventKind {
    Spin,
    Zoom,
}
