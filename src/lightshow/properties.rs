use super::Rgba;
use crate::{config::LightStyle, utils::Lerp};

/// Colors the renderer binds for one light channel, all derived from the
/// channel's base color.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LightProperties {
    pub glow: Rgba,
    pub light: Rgba,
    pub persistent: Rgba,
    pub emission: Rgba,
}

impl LightProperties {
    pub fn derive(base: Rgba, style: &LightStyle, glow_brightness: f32) -> Self {
        let (h, s, _) = base.to_hsv();

        let light = base
            .with_saturation(s * style.saturation)
            .with_alpha(base.a.clamp(0., 1.));

        let emission = Rgba::from_hsv(
            h,
            s * style.emission_saturation,
            style.emission * base.a,
            true,
        )
        .with_alpha(base.a);

        Self {
            glow: base.with_alpha(base.a * glow_brightness),
            light,
            persistent: style.platform_color.lerp(&light, light.a).with_alpha(1.),
            emission,
        }
    }
}
