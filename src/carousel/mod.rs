//! Endless drag carousel engine.
//!
//! Input moves `target_position`; the frame loop eases `current_position`
//! toward it and writes wrapped slide offsets into the container. Releasing
//! a drag applies momentum once and, when enabled, snaps the target.

pub mod frame_loop;
pub mod host;
pub mod layout;
pub mod momentum;
pub mod snap;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use crate::config::CarouselConfig;
use crate::input::{InputResponse, PointerEvent};
use host::{Clock, DragCursor, FrameHandle, FrameScheduler, SlideContainer};
use momentum::Momentum;
use state::{MotionSnapshot, MotionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragSource {
    Mouse,
    Touch,
}

pub struct Carousel<C: SlideContainer> {
    container: C,
    config: CarouselConfig,
    state: MotionState,
    momentum: Box<dyn Momentum>,
    clock: Box<dyn Clock>,
    scheduler: Box<dyn FrameScheduler>,
    listening: bool,
}

impl<C: SlideContainer> Carousel<C> {
    /// Take over `container`, lay it out, render once and start the frame loop.
    pub fn new(
        mut container: C,
        config: CarouselConfig,
        clock: Box<dyn Clock>,
        mut scheduler: Box<dyn FrameScheduler>,
    ) -> Self {
        let mut state = MotionState::new(clock.now_ms(), config.momentum.samples);
        let momentum = momentum::from_config(&config.momentum);

        container.apply_base_style();
        container.set_drag_cursor(DragCursor::Grab);
        layout::measure(&mut container, &mut state, &config);

        let offset = snap::snap_offset(&container, &config, &state);
        state.target_position = offset;
        state.current_position = offset;
        state.prev_position = offset;
        layout::render(&mut container, &state);

        frame_loop::start(&mut state, scheduler.as_mut(), clock.now_ms());
        log::debug!(
            "carousel up: {} slides, item width {:.1}, start offset {:.3}",
            state.slide_count,
            state.item_width,
            offset
        );

        Self {
            container,
            config,
            state,
            momentum,
            clock,
            scheduler,
            listening: true,
        }
    }

    /// Re-measure after the slide set or container size changed.
    pub fn measure(&mut self) {
        layout::measure(&mut self.container, &mut self.state, &self.config);
        layout::render(&mut self.container, &self.state);
        log::debug!(
            "measured {} slides, item width {:.1}",
            self.state.slide_count,
            self.state.item_width
        );
    }

    /// Host callback for a frame it was asked to schedule. Frames that are
    /// no longer the pending one (cancelled or destroyed) are ignored.
    pub fn frame(&mut self, handle: FrameHandle) {
        if self.state.animation_handle != Some(handle) {
            return;
        }
        let now = self.clock.now_ms();
        frame_loop::run_frame(
            &mut self.container,
            &mut self.state,
            &self.config,
            self.scheduler.as_mut(),
            now,
        );
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> InputResponse {
        if !self.listening {
            return InputResponse::default();
        }
        match event {
            PointerEvent::MouseDown { x } => self.drag_start(x, DragSource::Mouse),
            PointerEvent::TouchStart { x } => self.drag_start(x, DragSource::Touch),
            PointerEvent::MouseMove { x } => {
                self.drag_move(x);
            }
            PointerEvent::TouchMove { x } => {
                return InputResponse { prevent_default: self.drag_move(x) };
            }
            PointerEvent::MouseUp | PointerEvent::MouseLeave => self.drag_end(DragSource::Mouse),
            PointerEvent::TouchEnd => self.drag_end(DragSource::Touch),
        }
        InputResponse::default()
    }

    fn drag_start(&mut self, x: f64, source: DragSource) {
        let state = &mut self.state;
        state.is_dragging = true;
        state.drag_start_x = x;
        state.drag_start_position = state.target_position;
        state.drag_samples.clear();
        if source == DragSource::Mouse {
            self.container.set_drag_cursor(DragCursor::Grabbing);
        }
        log::debug!("drag start at x={:.1}, position {:.3}", x, state.target_position);
    }

    /// Returns whether the move was consumed by an active drag.
    fn drag_move(&mut self, x: f64) -> bool {
        if !self.state.is_dragging {
            return false;
        }
        let state = &mut self.state;
        state.target_position =
            state.drag_start_position + (x - state.drag_start_x) * self.config.drag_sensitivity;
        self.momentum.record_sample(state, self.clock.now_ms());
        true
    }

    fn drag_end(&mut self, source: DragSource) {
        if !self.state.is_dragging {
            return;
        }
        self.state.is_dragging = false;
        if source == DragSource::Mouse {
            self.container.set_drag_cursor(DragCursor::Grab);
        }
        self.momentum.apply(&mut self.state);
        if self.config.snap {
            snap::snap_to_nearest(&self.container, &self.config, &mut self.state);
        }
        log::debug!("drag end, target {:.3}", self.state.target_position);
    }

    /// Live motion state, read-only.
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub fn snapshot(&self) -> MotionSnapshot {
        self.state.snapshot()
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Mutable container access for the host. Call `measure` after changing
    /// the slide set.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn is_running(&self) -> bool {
        self.state.animation_handle.is_some()
    }

    /// Stop the frame loop and ignore all further input. Safe to repeat.
    pub fn destroy(&mut self) {
        if !self.listening && self.state.animation_handle.is_none() {
            return;
        }
        frame_loop::stop(&mut self.state, self.scheduler.as_mut());
        self.listening = false;
        self.state.is_dragging = false;
        log::debug!("carousel destroyed");
    }
}

impl<C: SlideContainer> Drop for Carousel<C> {
    fn drop(&mut self) {
        self.destroy();
    }
}
