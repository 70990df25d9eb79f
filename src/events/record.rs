use serde::Deserialize;

/// Basic beatmap event as the map parser hands it over.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "b")]
    pub beat: f32,
    #[serde(rename = "et")]
    pub channel_tag: i32,
    #[serde(rename = "i", default)]
    pub value_ordinal: i32,
    #[serde(rename = "f", default = "default_float_param")]
    pub float_param: f32,
}

fn default_float_param() -> f32 {
    1.
}

impl RawEvent {
    pub fn new(beat: f32, channel_tag: i32, value_ordinal: i32, float_param: f32) -> Self {
        Self {
            beat,
            channel_tag,
            value_ordinal,
            float_param,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawBoostEvent {
    #[serde(rename = "b")]
    pub beat: f32,
    #[serde(rename = "o")]
    pub active: bool,
}

/// Parsed event lists of one difficulty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Difficulty {
    #[serde(default)]
    pub environment: String,
    #[serde(rename = "basicBeatmapEvents", default)]
    pub events: Vec<RawEvent>,
    #[serde(rename = "colorBoostBeatmapEvents", default)]
    pub boosts: Vec<RawBoostEvent>,
}
