use serde::Deserialize;

use crate::{events::Hue, utils::*};

#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const CLEAR: Self = Self::new(0., 0., 0., 0.);
    pub const WHITE: Self = Self::new(1., 1., 1., 1.);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Hue, saturation and value, all in `[0, 1]` for an LDR color.
    pub fn to_hsv(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;

        if max <= 0. {
            return (0., 0., 0.);
        }
        if delta <= 0. {
            return (0., 0., max);
        }

        let sector = if max == self.r {
            (self.g - self.b) / delta
        } else if max == self.g {
            2. + (self.b - self.r) / delta
        } else {
            4. + (self.r - self.g) / delta
        };

        ((sector / 6.).rem_euclid(1.), delta / max, max)
    }

    /// Inverse of [`Rgba::to_hsv`]. With `hdr` the value may exceed 1,
    /// otherwise channels are clamped to `[0, 1]`. Alpha is 1.
    pub fn from_hsv(h: f32, s: f32, v: f32, hdr: bool) -> Self {
        let (s, v) = (s.clamp(0., 1.), if hdr { v.max(0.) } else { v.clamp(0., 1.) });
        // `rem_euclid` rounds tiny negative hues up to exactly 1.
        let sector = (h.rem_euclid(1.) * 6.) % 6.;
        let fract = sector.fract();

        let p = v * (1. - s);
        let q = v * (1. - s * fract);
        let t = v * (1. - s * (1. - fract));

        let (r, g, b) = match sector as u32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Self::new(r, g, b, 1.)
    }

    /// Same hue and value with a new saturation, alpha preserved.
    pub fn with_saturation(self, saturation: f32) -> Self {
        let (h, _, v) = self.to_hsv();
        Self::from_hsv(h, saturation, v, true).with_alpha(self.a)
    }
}

/// Component-wise with `t` clamped to the unit interval.
impl Lerp for Rgba {
    type Output = Self;

    fn lerp(&self, next: &Self, t: f32) -> Self::Output {
        let t = t.clamp(0., 1.);
        Self::new(
            self.r.lerp(&next.r, t),
            self.g.lerp(&next.g, t),
            self.b.lerp(&next.b, t),
            self.a.lerp(&next.a, t),
        )
    }
}
//
//
//
//
//
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorPalette {
    pub light_color_1: Rgba,
    pub light_color_2: Rgba,
    pub white_light_color: Rgba,
    pub boost_light_color_1: Rgba,
    pub boost_light_color_2: Rgba,
    pub boost_white_light_color: Rgba,
}

impl Default for ColorPalette {
    fn default() -> Self {
        let red = Rgba::new(0.85, 0.085, 0.085, 1.);
        let blue = Rgba::new(0.1882, 0.675, 1., 1.);

        Self {
            light_color_1: red,
            light_color_2: blue,
            white_light_color: Rgba::WHITE,
            boost_light_color_1: red,
            boost_light_color_2: blue,
            boost_white_light_color: Rgba::WHITE,
        }
    }
}

impl ColorPalette {
    pub fn color(&self, hue: Hue, boost: bool) -> Rgba {
        match (hue, boost) {
            (Hue::Red, false) => self.light_color_1,
            (Hue::Blue, false) => self.light_color_2,
            (Hue::White, false) => self.white_light_color,
            (Hue::Red, true) => self.boost_light_color_1,
            (Hue::Blue, true) => self.boost_light_color_2,
            (Hue::White, true) => self.boost_white_light_color,
        }
    }
}
