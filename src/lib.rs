pub mod config;
pub mod events;
pub mod lightshow;
pub mod replay;
pub mod timing;
pub mod utils;

pub use config::{EngineConfig, Settings, SettingsProvider};
pub use events::{Difficulty, EventError, RawBoostEvent, RawEvent};
pub use lightshow::{DriverState, LightFrame, PlaybackContext, PlaybackDriver, Trigger};
pub use replay::{RawFrame, ReplayInfo, ReplaySample, ReplaySampler};
pub use timing::{Bpm, TempoMap};
