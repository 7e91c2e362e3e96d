//! Virtual-window arithmetic for large row sets.
//!
//! A caller rendering tens of thousands of rows materializes only the
//! slice the viewport can show, padded by an overscan margin so small
//! scroll steps reuse already built rows.

/// Inputs for one window computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowParams {
    /// Total number of rows in the sequence.
    pub total_rows: usize,
    /// Rows the viewport can show at once.
    pub viewport_height: usize,
    /// Index of the first row the viewport wants.
    pub scroll_offset: usize,
    /// Extra rows to materialize above and below the viewport.
    pub overscan: usize,
}

/// A half-open row range `start..end` to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualWindow {
    pub start: usize,
    pub end: usize,
}

impl VirtualWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, row_index: usize) -> bool {
        (self.start..self.end).contains(&row_index)
    }
}

/// Compute the row range worth materializing.
///
/// The range is clamped to `0..total_rows`, so a scroll offset past the
/// end settles on the final rows rather than an out-of-bounds slice.
pub fn compute_window(params: WindowParams) -> VirtualWindow {
    let offset = params.scroll_offset.min(params.total_rows);
    let start = offset.saturating_sub(params.overscan);
    let end = offset
        .saturating_add(params.viewport_height)
        .saturating_add(params.overscan)
        .min(params.total_rows);

    VirtualWindow { start, end }
}
