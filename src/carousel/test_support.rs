use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::host::{Clock, DragCursor, FrameHandle, FrameScheduler, SlideContainer, SlideLayout};

#[derive(Debug, Clone)]
pub struct FakeSlide {
    pub natural_width: f64,
    pub layout: Option<SlideLayout>,
    pub offset: f64,
    pub offset_writes: usize,
}

#[derive(Debug, Clone)]
pub struct FakeContainer {
    pub width: f64,
    pub slides: Vec<FakeSlide>,
    pub base_styled: bool,
    pub cursor: Option<DragCursor>,
}

impl FakeContainer {
    pub fn new(width: f64, slide_widths: &[f64]) -> Self {
        Self {
            width,
            slides: slide_widths
                .iter()
                .map(|&natural_width| FakeSlide {
                    natural_width,
                    layout: None,
                    offset: 0.0,
                    offset_writes: 0,
                })
                .collect(),
            base_styled: false,
            cursor: None,
        }
    }
}

impl SlideContainer for FakeContainer {
    fn width(&self) -> f64 {
        self.width
    }

    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn measured_slide_width(&self, index: usize) -> f64 {
        self.slides
            .get(index)
            .map(|s| s.layout.and_then(|l| l.width).unwrap_or(s.natural_width))
            .unwrap_or(0.0)
    }

    fn apply_base_style(&mut self) {
        self.base_styled = true;
    }

    fn set_slide_layout(&mut self, index: usize, layout: SlideLayout) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.layout = Some(layout);
        }
    }

    fn set_slide_offset(&mut self, index: usize, offset: f64) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.offset = offset;
            slide.offset_writes += 1;
        }
    }

    fn set_drag_cursor(&mut self, cursor: DragCursor) {
        self.cursor = Some(cursor);
    }
}

/// Clock that only moves when told to. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    pub fn at(ms: f64) -> Self {
        Self(Rc::new(Cell::new(ms)))
    }

    pub fn advance(&self, ms: f64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

#[derive(Debug, Default)]
pub struct SchedulerLog {
    next_id: u64,
    pub pending: Option<FrameHandle>,
    pub scheduled: usize,
    pub cancelled: Vec<FrameHandle>,
}

/// Scheduler that records requests; tests fire frames by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler(pub Rc<RefCell<SchedulerLog>>);

impl ManualScheduler {
    pub fn pending(&self) -> Option<FrameHandle> {
        self.0.borrow().pending
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_frame(&mut self) -> FrameHandle {
        let mut log = self.0.borrow_mut();
        log.next_id += 1;
        let handle = FrameHandle(log.next_id);
        log.pending = Some(handle);
        log.scheduled += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut log = self.0.borrow_mut();
        if log.pending == Some(handle) {
            log.pending = None;
        }
        log.cancelled.push(handle);
    }
}
