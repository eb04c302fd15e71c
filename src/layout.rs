//! Row addressing for flat population buffers.

use std::ops::Range;

/// Fixed row width of a flat `rows × width` buffer.
///
/// Both engines store their populations row-major in one `Vec`; this is the
/// only place the `row * width + column` arithmetic lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Stride(pub usize);

impl Stride {
    /// Slice range covering `row`.
    #[inline]
    pub fn range(self, row: usize) -> Range<usize> {
        let start = row * self.0;
        start..start + self.0
    }

    /// Flat index of (`row`, `column`).
    #[inline]
    pub fn index(self, row: usize, column: usize) -> usize {
        debug_assert!(column < self.0, "column {column} out of width {}", self.0);
        row * self.0 + column
    }

    /// Borrows row `row` of `buf`.
    #[inline]
    pub fn row<T>(self, buf: &[T], row: usize) -> &[T] {
        &buf[self.range(row)]
    }
}
