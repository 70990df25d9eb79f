#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    CubicOut,
    ExpoOut,
}

impl Easing {
    /// `t` is clamped to the unit interval.
    pub fn eval(&self, t: f32) -> f32 {
        let t = t.clamp(0., 1.);

        match self {
            Easing::Linear => t,
            Easing::CubicOut => (t - 1.).powi(3) + 1.,
            Easing::ExpoOut if 1. <= t => 1.,
            Easing::ExpoOut => 1. - 2f32.powf(-10. * t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use Easing::*;

    #[test]
    fn easing_inflections() {
        [Linear, CubicOut, ExpoOut].into_iter().for_each(|easing| {
            assert_eq!(easing.eval(0.), 0.);
            assert_eq!(easing.eval(1.), 1.);
            assert_eq!(easing.eval(-1.), 0.);
            assert_eq!(easing.eval(2.), 1.);
        });
        assert_eq!(CubicOut.eval(0.5), 0.875);
    }

    #[test]
    fn easing_growth() {
        [Linear, CubicOut, ExpoOut].into_iter().for_each(|easing| {
            (1..=100).map(|i| i as f32 / 100.).for_each(|t1| {
                let t0 = t1 - 0.01;
                assert!(easing.eval(t0) <= easing.eval(t1));
            })
        })
    }
}
