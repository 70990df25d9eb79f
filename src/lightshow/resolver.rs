use noisy_float::prelude::*;
use tracing::trace;

use super::{ColorPalette, Rgba};
use crate::{
    events::{BoostEvent, LaserSpeedEvent, LightEvent, LightValue},
    utils::*,
};

/// Peak brightness multiplier of flash and fade events.
pub const FLASH_INTENSITY: f32 = 1.2;
/// Seconds a flash takes to settle back to its intensity.
pub const FLASH_FADE_TIME: f32 = 0.6;
/// Seconds a fade takes to reach darkness.
pub const FADE_TIME: f32 = 1.5;

/// Everything one tick's color resolution depends on besides the events.
#[derive(Debug, Clone, Copy)]
pub struct LightContext<'a> {
    pub time: R32,
    pub palette: &'a ColorPalette,
    pub boost: bool,
}

impl<'a> LightContext<'a> {
    /// Color of `current` at this context's time. `next` is the following
    /// event on the same channel and only matters when it's a transition.
    #[rustfmt::skip]
    pub fn event_color(&self, current: Option<&LightEvent>, next: Option<&LightEvent>) -> Rgba {
        let Some(current) = current else {
            return Rgba::CLEAR;
        };

        match current.value {
            LightValue::On(hue) | LightValue::Transition(hue) => {
                self.standard_color(current, self.palette.color(hue, self.boost), next)
            }
            LightValue::Flash(hue) => self.flash_color(current, self.palette.color(hue, self.boost)),
            LightValue::Fade(hue) => self.fade_color(current, self.palette.color(hue, self.boost)),
            LightValue::Off => self.standard_color(current, Rgba::CLEAR, next),
            LightValue::Unrecognized(_) => Rgba::CLEAR,
        }
    }

    /// Target color a transition event fades into.
    fn base_color(&self, event: &LightEvent) -> Rgba {
        match event.value {
            LightValue::On(hue) | LightValue::Transition(hue) => {
                self.palette.color(hue, self.boost).with_alpha(event.intensity)
            }
            _ => Rgba::CLEAR,
        }
    }

    fn standard_color(&self, event: &LightEvent, base: Rgba, next: Option<&LightEvent>) -> Rgba {
        let transition = next.filter(|next| next.is_transition());

        // Off events take on the color they transition into
        let color = match (event.value, transition) {
            (LightValue::Off, Some(next)) => self.base_color(next).with_alpha(0.),
            (LightValue::Off, None) => base.with_alpha(0.),
            _ => base.with_alpha(event.intensity),
        };

        match transition {
            Some(next) => color.lerp(
                &self.base_color(next),
                completion_ratio(self.time.raw(), event.time.raw(), next.time.raw()),
            ),
            None => color,
        }
    }

    fn flash_color(&self, event: &LightEvent, base: Rgba) -> Rgba {
        let elapsed = (self.time - event.time).raw();

        if FLASH_FADE_TIME <= elapsed {
            base.with_alpha(event.intensity)
        } else {
            let peak = event.intensity * FLASH_INTENSITY;
            let t = Easing::CubicOut.eval(elapsed / FLASH_FADE_TIME);
            base.with_alpha(peak.lerp(&event.intensity, t))
        }
    }

    fn fade_color(&self, event: &LightEvent, base: Rgba) -> Rgba {
        let elapsed = (self.time - event.time).raw();

        if FADE_TIME <= elapsed {
            base.with_alpha(0.)
        } else {
            let peak = event.intensity * FLASH_INTENSITY;
            let t = Easing::ExpoOut.eval(elapsed / FADE_TIME);
            base.with_alpha(peak.lerp(&0., t))
        }
    }
}
//
//
//
//
//
/// Current color of a light channel, tracked with the channel's cursor.
pub fn resolve_light(ctx: &LightContext, events: &[LightEvent], cursor: &mut Cursor) -> Rgba {
    let index = events.seek(cursor, ctx.time);
    trace!(?index, time = ctx.time.raw(), "light lookup");

    let current = index.and_then(|index| events.get(index));
    let next = index.and_then(|index| events.get(index + 1));
    ctx.event_color(current, next)
}

/// Speed event in effect, if any.
pub fn resolve_speed<'a>(
    time: R32,
    events: &'a [LaserSpeedEvent],
    cursor: &mut Cursor,
) -> Option<&'a LaserSpeedEvent> {
    events.seek(cursor, time).and_then(|index| events.get(index))
}

/// Whether the boost palette is selected at `beat`. The cursor is keyed on
/// `time` so scrubbing is detected the same way as for the light channels.
pub fn resolve_boost(time: R32, beat: f32, events: &[BoostEvent], cursor: &mut Cursor) -> bool {
    events
        .seek_where(cursor, time, |event| event.beat <= beat)
        .and_then(|index| events.get(index))
        .map_or(false, |event| event.active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Hue, LightChannel};
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use Hue::*;
    use LightValue::*;

    fn event(time: f32, value: LightValue) -> LightEvent {
        LightEvent::new(LightChannel::BackLasers, time, r32(time), value)
    }

    fn context(palette: &ColorPalette, time: f32) -> LightContext {
        LightContext {
            time: r32(time),
            palette,
            boost: false,
        }
    }

    fn alpha_at(time: f32, current: &LightEvent) -> f32 {
        context(&ColorPalette::default(), time)
            .event_color(Some(current), None)
            .a
    }

    #[test]
    fn no_event_is_clear() {
        let palette = ColorPalette::default();
        assert_eq!(context(&palette, 3.).event_color(None, None), Rgba::CLEAR);
    }

    #[test_case(0., 1.2; "peak")]
    #[test_case(0.6, 1.; "settled")]
    #[test_case(5., 1.; "held")]
    fn flash_alpha(elapsed: f32, expected: f32) {
        assert!((alpha_at(elapsed, &event(0., Flash(Blue))) - expected).abs() < 1e-6)
    }

    #[test]
    fn flash_never_brightens() {
        let flash = event(0., Flash(Red));
        (1..=60).map(|i| i as f32 / 100.).for_each(|t| {
            assert!(alpha_at(t, &flash) <= alpha_at(t - 0.01, &flash));
        })
    }

    #[test_case(0., 1.2; "peak")]
    #[test_case(1.5, 0.; "dark")]
    #[test_case(9., 0.; "held dark")]
    fn fade_alpha(elapsed: f32, expected: f32) {
        assert!((alpha_at(elapsed, &event(0., Fade(White))) - expected).abs() < 1e-6)
    }

    #[test]
    fn intensity_scales_flash_peak() {
        let flash = event(0., Flash(Blue)).with_intensity(0.5);
        assert!((alpha_at(0., &flash) - 0.6).abs() < 1e-6);
        assert_eq!(alpha_at(1., &flash), 0.5);
    }

    #[test]
    fn off_takes_on_transition_color() {
        let palette = ColorPalette::default();
        let off = event(0., Off);
        let transition = event(2., Transition(Red));

        let color = context(&palette, 0.).event_color(Some(&off), Some(&transition));
        assert_eq!(color, palette.light_color_1.with_alpha(0.));
    }

    #[test]
    fn off_without_transition_is_clear() {
        let palette = ColorPalette::default();
        let off = event(0., Off);
        let on = event(2., On(Red));

        assert_eq!(context(&palette, 1.).event_color(Some(&off), Some(&on)), Rgba::CLEAR);
    }

    #[test]
    fn transition_interpolates() {
        let palette = ColorPalette {
            light_color_1: Rgba::new(1., 0., 0., 1.),
            light_color_2: Rgba::new(0., 0., 1., 1.),
            ..Default::default()
        };
        let from = event(0., On(Red));
        let to = event(2., Transition(Blue)).with_intensity(0.5);

        let color = context(&palette, 1.).event_color(Some(&from), Some(&to));
        assert_eq!(color, Rgba::new(0.5, 0., 0.5, 0.75));
    }

    #[test]
    fn unrecognized_is_clear() {
        let palette = ColorPalette::default();
        let odd = event(0., Unrecognized(42));
        assert_eq!(context(&palette, 1.).event_color(Some(&odd), None), Rgba::CLEAR);
    }

    #[test]
    fn boost_swaps_palette() {
        let palette = ColorPalette {
            boost_light_color_2: Rgba::new(0., 1., 0., 1.),
            ..Default::default()
        };
        let ctx = LightContext {
            time: r32(1.),
            palette: &palette,
            boost: true,
        };
        assert_eq!(ctx.event_color(Some(&event(0., On(Blue))), None), Rgba::new(0., 1., 0., 1.));
    }

    #[test]
    fn channel_lookup_before_first_event_is_clear() {
        let palette = ColorPalette::default();
        let events = vec![event(1., On(Blue)), event(4., Off)];
        let mut cursor = Cursor::default();

        assert_eq!(resolve_light(&context(&palette, 0.5), &events, &mut cursor), Rgba::CLEAR);
        assert_eq!(
            resolve_light(&context(&palette, 2.), &events, &mut cursor),
            palette.light_color_2
        );
        assert_eq!(resolve_light(&context(&palette, 5.), &events, &mut cursor), Rgba::CLEAR);
    }

    #[test]
    fn empty_channel_is_always_clear() {
        let palette = ColorPalette::default();
        let mut cursor = Cursor::default();

        [0., 10., 2., -5.].into_iter().for_each(|time| {
            assert_eq!(resolve_light(&context(&palette, time), &[], &mut cursor).a, 0.)
        })
    }

    #[test]
    fn boost_follows_last_toggle() {
        let boosts = vec![
            BoostEvent { beat: 1., time: r32(1.), active: true },
            BoostEvent { beat: 3., time: r32(3.), active: false },
        ];
        let mut cursor = Cursor::default();

        assert!(!resolve_boost(r32(0.), 0., &boosts, &mut cursor));
        assert!(resolve_boost(r32(2.), 2., &boosts, &mut cursor));
        assert!(!resolve_boost(r32(3.), 3., &boosts, &mut cursor));
        assert!(resolve_boost(r32(1.5), 1.5, &boosts, &mut cursor));
    }
}
