pub trait Lerp {
    type Output;
    fn lerp(&self, next: &Self, t: f32) -> Self::Output;
}

impl Lerp for f32 {
    type Output = Self;

    fn lerp(&self, next: &Self, t: f32) -> Self::Output {
        self + (next - self) * t
    }
}

/// Position of `offset` between `start` and `end` as a fraction.
/// Degenerate or inverted spans give 0.
pub fn completion_ratio(offset: f32, start: f32, end: f32) -> f32 {
    let span = end - start;
    if span <= 0. {
        0.
    } else {
        (offset - start) / span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalar_lerp() {
        assert_eq!(0f32.lerp(&2., 0.), 0.);
        assert_eq!(0f32.lerp(&2., 0.25), 0.5);
        assert_eq!(0f32.lerp(&2., 1.), 2.);
    }

    #[test]
    fn degenerate_ratio() {
        assert_eq!(completion_ratio(3., 3., 3.), 0.);
        assert_eq!(completion_ratio(3., 4., 2.), 0.);
        assert_eq!(completion_ratio(3., 2., 4.), 0.5);
    }
}
