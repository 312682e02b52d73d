//! Per-frame integrator. Stopped when `animation_handle` is `None`, running
//! when it holds the one frame scheduled next.

use super::host::{FrameScheduler, SlideContainer};
use super::layout;
use super::state::MotionState;
use crate::animation::math::damp;
use crate::config::CarouselConfig;

pub fn start(state: &mut MotionState, scheduler: &mut dyn FrameScheduler, now_ms: f64) {
    if state.animation_handle.is_some() {
        return;
    }
    state.prev_time = now_ms;
    state.animation_handle = Some(scheduler.schedule_frame());
}

/// Advance one frame: relax toward the target, derive force, render.
pub fn tick<C: SlideContainer + ?Sized>(
    container: &mut C,
    state: &mut MotionState,
    config: &CarouselConfig,
    now_ms: f64,
) {
    let dt = (now_ms - state.prev_time) / 1000.0;
    state.prev_time = now_ms;

    state.current_position = damp(
        state.current_position,
        state.target_position,
        1.0 / config.lerp_factor,
        dt,
    );

    let delta_position = state.current_position - state.prev_position;
    state.prev_position = state.current_position;
    state.force = (delta_position * config.force_power).clamp(-1.0, 1.0);

    layout::render(container, state);
}

/// Tick and queue the following frame.
pub fn run_frame<C: SlideContainer + ?Sized>(
    container: &mut C,
    state: &mut MotionState,
    config: &CarouselConfig,
    scheduler: &mut dyn FrameScheduler,
    now_ms: f64,
) {
    tick(container, state, config, now_ms);
    state.animation_handle = Some(scheduler.schedule_frame());
}

pub fn stop(state: &mut MotionState, scheduler: &mut dyn FrameScheduler) {
    if let Some(handle) = state.animation_handle.take() {
        scheduler.cancel_frame(handle);
    }
}
