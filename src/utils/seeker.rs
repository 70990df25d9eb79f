use noisy_float::prelude::*;

/// Time key an element is ordered and searched by.
pub trait Quantify {
    fn quantify(&self) -> R32;
}

impl Quantify for R32 {
    fn quantify(&self) -> R32 {
        *self
    }
}

/// Cached result of the last sequential lookup on one collection.
/// Keep one per collection per call site.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Cursor {
    index: Option<usize>,
    offset: Option<R32>,
}

impl Cursor {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

///
/// Lookups over a slice sorted by [`Quantify`].
///
/// `jump` is a plain binary search and can be called in any order.
/// `seek` walks forward from a [`Cursor`] and is cheap for small forward time
/// deltas. It falls back to `jump` whenever the offset regresses, so both
/// always return the same index for the same offset.
///
pub trait SeekExtensions<T> {
    /// Greatest index whose element satisfies `pred`.
    /// `pred` has to hold for a prefix of the slice and fail for the rest.
    fn last_index_where(&self, pred: impl FnMut(&T) -> bool) -> Option<usize>;

    /// Sequential counterpart of [`SeekExtensions::last_index_where`].
    /// `offset` is the query time the cursor uses to detect regressions.
    fn seek_where(
        &self,
        cursor: &mut Cursor,
        offset: R32,
        pred: impl FnMut(&T) -> bool,
    ) -> Option<usize>;

    fn jump(&self, offset: R32) -> Option<usize>;
    fn seek(&self, cursor: &mut Cursor, offset: R32) -> Option<usize>;

    /// Prefix of elements at or before `offset`.
    fn before_or_at(&self, offset: R32) -> &[T];
    fn is_quantified(&self) -> bool;
}

impl<T: Quantify> SeekExtensions<T> for [T] {
    fn last_index_where(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.partition_point(pred).checked_sub(1)
    }

    #[rustfmt::skip]
    fn seek_where(
        &self,
        cursor: &mut Cursor,
        offset: R32,
        mut pred: impl FnMut(&T) -> bool,
    ) -> Option<usize> {
        let resumable = cursor.offset.map_or(false, |last| last <= offset)
            && cursor.index.map_or(true, |index| index < self.len());

        let index = if resumable {
            let mut index = cursor.index;
            loop {
                let next = index.map_or(0, |index| index + 1);
                match self.get(next) {
                    Some(elem) if pred(elem) => index = Some(next),
                    _ => break index,
                }
            }
        } else {
            self.last_index_where(pred)
        };

        *cursor = Cursor { index, offset: Some(offset) };
        index
    }

    fn jump(&self, offset: R32) -> Option<usize> {
        self.last_index_where(|elem| elem.quantify() <= offset)
    }

    fn seek(&self, cursor: &mut Cursor, offset: R32) -> Option<usize> {
        self.seek_where(cursor, offset, |elem| elem.quantify() <= offset)
    }

    fn before_or_at(&self, offset: R32) -> &[T] {
        &self[..self.jump(offset).map_or(0, |index| index + 1)]
    }

    fn is_quantified(&self) -> bool {
        self.windows(2).all(|pair| pair[0].quantify() <= pair[1].quantify())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn offsets() -> Vec<R32> {
        [0., 1., 1., 2., 4., 4., 4., 7.].map(r32).to_vec()
    }

    #[test_case(-1., None; "before first")]
    #[test_case(0., Some(0); "on first")]
    #[test_case(1., Some(2); "ties pick the last inserted")]
    #[test_case(3.5, Some(3); "between")]
    #[test_case(4., Some(6); "trailing ties")]
    #[test_case(100., Some(7); "past end")]
    fn jump_cases(offset: f32, expected: Option<usize>) {
        assert_eq!(offsets().jump(r32(offset)), expected)
    }

    #[test]
    fn empty_slice() {
        let empty: Vec<R32> = vec![];
        let mut cursor = Cursor::default();
        assert_eq!(empty.jump(r32(1.)), None);
        assert_eq!(empty.seek(&mut cursor, r32(1.)), None);
        assert!(empty.before_or_at(r32(1.)).is_empty());
    }

    #[test]
    fn forward_seek_matches_jump() {
        let offsets = offsets();
        let mut cursor = Cursor::default();

        (-10..=80).map(|i| r32(i as f32 / 10.)).for_each(|offset| {
            assert_eq!(offsets.seek(&mut cursor, offset), offsets.jump(offset))
        })
    }

    #[test]
    fn scrubbing_seek_matches_jump() {
        let offsets = offsets();
        let mut cursor = Cursor::default();
        let scrub = [0., 5., 1.5, 1.6, 8., -2., 4., 4., 3.9, 7.5, 0.5];

        scrub.into_iter().map(r32).for_each(|offset| {
            assert_eq!(offsets.seek(&mut cursor, offset), offsets.jump(offset));
            assert_eq!(cursor.index(), offsets.jump(offset));
        })
    }

    #[test]
    fn stale_cursor_is_not_trusted() {
        let offsets = offsets();
        let mut cursor = Cursor::default();
        offsets.seek(&mut cursor, r32(10.));

        let shorter = offsets[..3].to_vec();
        assert_eq!(shorter.seek(&mut cursor, r32(11.)), Some(2));
    }

    #[test]
    fn slice_views() {
        let offsets = offsets();
        assert_eq!(offsets.before_or_at(r32(1.)).len(), 3);
        assert!(offsets.before_or_at(r32(-1.)).is_empty());
        assert_eq!(offsets.before_or_at(r32(7.)).len(), offsets.len());
        assert!(offsets.is_quantified());
        assert!(![r32(1.), r32(0.)].is_quantified());
    }
}
