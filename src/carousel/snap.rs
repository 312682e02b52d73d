use super::host::SlideContainer;
use super::state::MotionState;
use crate::animation::math::round_half_up;
use crate::config::{CarouselConfig, SnapAlign};

/// Fractional position shift that puts a slide at the configured alignment.
/// Start alignment needs no shift; center shifts by half the leftover width.
pub fn snap_offset<C: SlideContainer + ?Sized>(
    container: &C,
    config: &CarouselConfig,
    state: &MotionState,
) -> f64 {
    if config.snap_align != SnapAlign::Center || state.item_width == 0.0 {
        return 0.0;
    }
    let slide_width = state.item_width - config.gap;
    (container.width() - slide_width) / 2.0 / state.item_width
}

pub fn snap_to_nearest<C: SlideContainer + ?Sized>(
    container: &C,
    config: &CarouselConfig,
    state: &mut MotionState,
) {
    let offset = snap_offset(container, config, state);
    let snapped = round_half_up(state.target_position - offset) + offset;
    log::trace!("snap {:.4} -> {:.4}", state.target_position, snapped);
    state.target_position = snapped;
}
