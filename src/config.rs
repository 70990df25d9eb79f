use std::collections::HashMap;

use educe::Educe;
use glam::Vec3;
use serde::Deserialize;

use crate::lightshow::{ColorPalette, Rgba};

pub mod keys {
    pub const ALL: &str = "all";
    pub const STATIC_LIGHTS: &str = "staticlights";
    pub const STATIC_LIGHTS_WHILE_SCRUBBING: &str = "staticlightswhilescrubbing";
    pub const LIGHT_GLOW_BRIGHTNESS: &str = "lightglowbrightness";
    pub const SABER_TRAILS: &str = "sabertrails";
    pub const SABER_TRAIL_LENGTH: &str = "sabertraillength";
    pub const SHOW_HEADSET: &str = "showheadset";
    pub const FIRST_PERSON_REPLAY: &str = "firstpersonreplay";

    /// Keys whose change invalidates the current light frame.
    pub const LIGHT_SETTINGS: [&str; 4] = [
        ALL,
        STATIC_LIGHTS,
        STATIC_LIGHTS_WHILE_SCRUBBING,
        LIGHT_GLOW_BRIGHTNESS,
    ];
}

/// Read access to the user's settings. Missing keys read as false / zero.
pub trait SettingsProvider {
    fn get_bool(&self, key: &str) -> bool;
    fn get_float(&self, key: &str) -> f32;
    fn get_int(&self, key: &str) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl SettingsProvider for HashMap<String, SettingValue> {
    fn get_bool(&self, key: &str) -> bool {
        matches!(self.get(key), Some(SettingValue::Bool(true)))
    }

    fn get_float(&self, key: &str) -> f32 {
        match self.get(key) {
            Some(SettingValue::Float(value)) => *value,
            Some(SettingValue::Int(value)) => *value as f32,
            _ => 0.,
        }
    }

    fn get_int(&self, key: &str) -> i32 {
        match self.get(key) {
            Some(SettingValue::Int(value)) => *value,
            Some(SettingValue::Float(value)) => *value as i32,
            _ => 0,
        }
    }
}

/// JSON keys are the [`keys`] names, so a settings file reads the same
/// through either provider.
#[derive(Debug, Clone, PartialEq, Deserialize, Educe)]
#[educe(Default)]
#[serde(default, rename_all = "lowercase")]
pub struct Settings {
    pub static_lights: bool,
    #[educe(Default = true)]
    pub static_lights_while_scrubbing: bool,
    #[educe(Default = 1.0)]
    pub light_glow_brightness: f32,
    #[educe(Default = true)]
    pub saber_trails: bool,
    #[educe(Default = 20)]
    pub saber_trail_length: i32,
    #[educe(Default = true)]
    pub show_headset: bool,
    pub first_person_replay: bool,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl SettingsProvider for Settings {
    fn get_bool(&self, key: &str) -> bool {
        match key {
            keys::STATIC_LIGHTS => self.static_lights,
            keys::STATIC_LIGHTS_WHILE_SCRUBBING => self.static_lights_while_scrubbing,
            keys::SABER_TRAILS => self.saber_trails,
            keys::SHOW_HEADSET => self.show_headset,
            keys::FIRST_PERSON_REPLAY => self.first_person_replay,
            _ => false,
        }
    }

    fn get_float(&self, key: &str) -> f32 {
        match key {
            keys::LIGHT_GLOW_BRIGHTNESS => self.light_glow_brightness,
            _ => self.get_int(key) as f32,
        }
    }

    fn get_int(&self, key: &str) -> i32 {
        match key {
            keys::SABER_TRAIL_LENGTH => self.saber_trail_length,
            _ => 0,
        }
    }
}
//
//
//
//
//
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Educe)]
#[educe(Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RotationConfig {
    #[educe(Default = 4)]
    pub unit_count: usize,
    /// Left and right speed events closer than this (seconds) share assignments.
    /// Zero means exact equality.
    pub same_time_tolerance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LightStyle {
    pub saturation: f32,
    pub emission_saturation: f32,
    pub emission: f32,
    pub platform_color: Rgba,
}

impl Default for LightStyle {
    fn default() -> Self {
        Self {
            saturation: 0.8,
            emission_saturation: 0.9,
            emission: 2.5,
            platform_color: Rgba::new(0.1, 0.1, 0.1, 1.),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReplayConfig {
    pub default_head_position: Vec3,
    pub default_left_hand_position: Vec3,
    pub default_right_hand_position: Vec3,
    /// Distance from the hand to the saber tip along the hand's forward axis.
    pub saber_tip_offset: f32,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            default_head_position: Vec3::new(0., 1.7, 0.),
            default_left_hand_position: Vec3::new(-0.2, 1., 0.3),
            default_right_hand_position: Vec3::new(0.2, 1., 0.3),
            saber_tip_offset: 1.,
        }
    }
}

/// Environments whose lighting can't be driven by basic events.
pub const STATIC_ENVIRONMENTS: [&str; 9] = [
    "WeaveEnvironment",
    "PyroEnvironment",
    "EDMEnvironment",
    "TheSecondEnvironment",
    "LizzoEnvironment",
    "TheWeekndEnvironment",
    "RockMixtapeEnvironment",
    "Dragons2Environment",
    "Panic2Environment",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub rotation: RotationConfig,
    pub style: LightStyle,
    pub palette: ColorPalette,
    pub replay: ReplayConfig,
    pub static_environments: Vec<String>,
    /// Fixed seed for rotation assignments, entropy when absent.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rotation: RotationConfig::default(),
            style: LightStyle::default(),
            palette: ColorPalette::default(),
            replay: ReplayConfig::default(),
            static_environments: STATIC_ENVIRONMENTS.map(String::from).to_vec(),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_static_environment(&self, environment: &str) -> bool {
        self.static_environments.iter().any(|name| name == environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn settings_defaults() {
        let settings = Settings::default();
        assert!(!settings.get_bool(keys::STATIC_LIGHTS));
        assert!(settings.get_bool(keys::STATIC_LIGHTS_WHILE_SCRUBBING));
        assert_eq!(settings.get_float(keys::LIGHT_GLOW_BRIGHTNESS), 1.);
        assert_eq!(settings.get_int(keys::SABER_TRAIL_LENGTH), 20);
        assert!(!settings.get_bool("unknown"));
    }

    #[test]
    fn settings_from_partial_json() {
        let settings = Settings::from_json(r#"{ "staticlights": true, "lightglowbrightness": 0.5 }"#)
            .unwrap();
        assert!(settings.static_lights);
        assert_eq!(settings.light_glow_brightness, 0.5);
        assert!(settings.show_headset);
    }

    #[test]
    fn providers_agree_on_one_document() {
        let json = r#"{
            "staticlights": true,
            "staticlightswhilescrubbing": false,
            "lightglowbrightness": 0.25,
            "sabertrails": false,
            "sabertraillength": 8,
            "showheadset": false,
            "firstpersonreplay": true
        }"#;
        let settings = Settings::from_json(json).unwrap();
        let map: HashMap<String, SettingValue> = serde_json::from_str(json).unwrap();

        [
            keys::STATIC_LIGHTS,
            keys::STATIC_LIGHTS_WHILE_SCRUBBING,
            keys::SABER_TRAILS,
            keys::SHOW_HEADSET,
            keys::FIRST_PERSON_REPLAY,
        ]
        .into_iter()
        .for_each(|key| assert_eq!(settings.get_bool(key), map.get_bool(key), "{}", key));

        assert_eq!(settings.get_float(keys::LIGHT_GLOW_BRIGHTNESS), 0.25);
        assert_eq!(settings.get_float(keys::LIGHT_GLOW_BRIGHTNESS), map.get_float(keys::LIGHT_GLOW_BRIGHTNESS));
        assert_eq!(settings.get_int(keys::SABER_TRAIL_LENGTH), map.get_int(keys::SABER_TRAIL_LENGTH));
        assert_ne!(settings, Settings::default());
    }

    #[test]
    fn map_provider() {
        let settings: HashMap<String, SettingValue> =
            serde_json::from_str(r#"{ "staticlights": true, "lightglowbrightness": 0.25, "sabertraillength": 8 }"#)
                .unwrap();
        assert!(settings.get_bool(keys::STATIC_LIGHTS));
        assert_eq!(settings.get_float(keys::LIGHT_GLOW_BRIGHTNESS), 0.25);
        assert_eq!(settings.get_int(keys::SABER_TRAIL_LENGTH), 8);
        assert_eq!(settings.get_float("missing"), 0.);
    }

    #[test]
    fn engine_config_overrides() {
        let config = EngineConfig::from_json(
            r#"{
                "rotation": { "sameTimeTolerance": 0.001 },
                "style": { "emissionSaturation": 0.5 },
                "palette": { "lightColor1": { "r": 1, "g": 0, "b": 0, "a": 1 } },
                "replay": { "saberTipOffset": 0.5 },
                "staticEnvironments": ["DefaultEnvironment"],
                "seed": 7
            }"#,
        )
        .unwrap();
        assert_eq!(config.rotation.unit_count, 4);
        assert_eq!(config.rotation.same_time_tolerance, 0.001);
        assert_eq!(config.style.emission_saturation, 0.5);
        assert_eq!(config.style.saturation, 0.8);
        assert_eq!(config.palette.light_color_1, Rgba::new(1., 0., 0., 1.));
        assert_eq!(config.palette.light_color_2, ColorPalette::default().light_color_2);
        assert_eq!(config.replay.saber_tip_offset, 0.5);
        assert_eq!(config.seed, Some(7));
        assert!(config.is_static_environment("DefaultEnvironment"));
        assert!(!config.is_static_environment("WeaveEnvironment"));
    }
}
