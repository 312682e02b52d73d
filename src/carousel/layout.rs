use super::host::{SlideContainer, SlideLayout};
use super::state::MotionState;
use crate::animation::math::symmetric_mod;
use crate::config::CarouselConfig;

/// Size the slides from the container and record count and item width.
/// An empty container leaves `state` untouched.
pub fn measure<C: SlideContainer + ?Sized>(
    container: &mut C,
    state: &mut MotionState,
    config: &CarouselConfig,
) {
    let count = container.slide_count();
    if count == 0 {
        return;
    }

    let gap = config.gap;
    let mut slide_width = config.slide_width;
    if config.visible_slides > 0.0 {
        let visible = config.visible_slides;
        slide_width = (container.width() - (visible - 1.0) * gap) / visible;
    }

    state.slide_count = count;
    state.item_width = if slide_width > 0.0 {
        slide_width + gap
    } else {
        container.measured_slide_width(0) + gap
    };

    for index in 0..count {
        container.set_slide_layout(
            index,
            SlideLayout {
                width: (slide_width > 0.0).then_some(slide_width),
                flex_shrink: 0.0,
                margin_right: if index + 1 < count { gap } else { 0.0 },
            },
        );
    }
}

/// Offset of slide `index` so that it sits on the copy of itself nearest the
/// viewport in an endlessly repeating row.
pub fn wrapped_offset(current_position: f64, index: usize, slide_count: usize, item_width: f64) -> f64 {
    let unit_pos = current_position + index as f64;
    let wrapped = symmetric_mod(unit_pos, slide_count as f64);
    (wrapped - index as f64) * item_width
}

pub fn render<C: SlideContainer + ?Sized>(container: &mut C, state: &MotionState) {
    if state.slide_count == 0 {
        return;
    }
    // Slides added since the last measure are left alone until re-measured.
    let count = state.slide_count.min(container.slide_count());
    for index in 0..count {
        let offset = wrapped_offset(state.current_position, index, state.slide_count, state.item_width);
        container.set_slide_offset(index, offset);
    }
}
