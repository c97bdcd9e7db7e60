//! Text selection inside the focused element.

/// A selection as a byte range into the focused element's text content.
///
/// The range is always normalized such that `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl SelectionRange {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Collapsed selection (a caret) at `offset`.
    #[inline]
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Clamps both ends to `len` and backs them off to a char boundary of `text`.
    ///
    /// Text may have changed between capturing a selection and restoring it.
    pub fn clamp_to(self, text: &str) -> Self {
        let clamp = |mut offset: usize| {
            offset = offset.min(text.len());
            while offset > 0 && !text.is_char_boundary(offset) {
                offset -= 1;
            }
            offset
        };
        Self::new(clamp(self.start), clamp(self.end))
    }
}
