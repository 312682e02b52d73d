//! Seams between the motion engine and whatever hosts it.

use std::time::Instant;

/// Sizing assigned to one slide by the layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideLayout {
    /// Fixed width, or `None` to keep the slide's natural width.
    pub width: Option<f64>,
    pub flex_shrink: f64,
    pub margin_right: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragCursor {
    Grab,
    Grabbing,
}

/// An ordered row of slides with a measurable width.
pub trait SlideContainer {
    /// Rendered width of the container.
    fn width(&self) -> f64;

    fn slide_count(&self) -> usize;

    /// Rendered width of slide `index`.
    fn measured_slide_width(&self, index: usize) -> f64;

    /// Base styling the engine needs on the container (row layout, clipping).
    fn apply_base_style(&mut self) {}

    fn set_slide_layout(&mut self, index: usize, layout: SlideLayout);

    /// Horizontal translation of slide `index` from its laid-out position.
    fn set_slide_offset(&mut self, index: usize, offset: f64);

    fn set_drag_cursor(&mut self, _cursor: DragCursor) {}
}

/// Monotonic millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Identifies one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Schedules a single callback for the next frame. The host answers by
/// calling `Carousel::frame` with the returned handle.
pub trait FrameScheduler {
    fn schedule_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}
