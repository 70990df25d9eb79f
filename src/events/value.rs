use derive_more::Display;

/// Palette slot a light value draws its color from.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Red,
    Blue,
    White,
}

/// Interpretation of a light event's value ordinal.
///
/// Ordinals: 0 Off, then On/Flash/Fade/Transition in blocks of four for
/// Blue (1-4), Red (5-8) and White (9-12). Anything else is kept as
/// `Unrecognized` and renders clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightValue {
    Off,
    On(Hue),
    Flash(Hue),
    Fade(Hue),
    Transition(Hue),
    Unrecognized(i32),
}

impl LightValue {
    pub fn from_ordinal(ordinal: i32) -> Self {
        let hue = match ordinal {
            0 => return Self::Off,
            1..=4 => Hue::Blue,
            5..=8 => Hue::Red,
            9..=12 => Hue::White,
            _ => return Self::Unrecognized(ordinal),
        };

        match (ordinal - 1) % 4 {
            0 => Self::On(hue),
            1 => Self::Flash(hue),
            2 => Self::Fade(hue),
            _ => Self::Transition(hue),
        }
    }

    pub fn ordinal(self) -> i32 {
        let (block, hue) = match self {
            Self::Off => return 0,
            Self::Unrecognized(ordinal) => return ordinal,
            Self::On(hue) => (1, hue),
            Self::Flash(hue) => (2, hue),
            Self::Fade(hue) => (3, hue),
            Self::Transition(hue) => (4, hue),
        };

        block + match hue {
            Hue::Blue => 0,
            Hue::Red => 4,
            Hue::White => 8,
        }
    }

    pub fn is_transition(self) -> bool {
        matches!(self, Self::Transition(_))
    }
}
