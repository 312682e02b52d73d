//! The window-side slide row the carousel drives. Works in logical pixels
//! and lays slides out like a non-wrapping flex row.

use crate::carousel::host::{DragCursor, SlideContainer, SlideLayout};
use crate::config::SlidesConfig;

/// Natural slide aspect (width / height) when nothing fixes the width.
const CARD_ASPECT: f32 = 0.75;

#[derive(Debug, Clone)]
pub struct StageSlide {
    pub natural_width: f64,
    pub layout: SlideLayout,
    pub offset: f64,
    pub colors: [[f32; 4]; 4],
}

/// Final placement of one slide, relative to the stage origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideRect {
    pub x: f64,
    pub width: f64,
}

#[derive(Debug, Clone)]
pub struct Stage {
    width: f64,
    height: f64,
    slide_height_ratio: f32,
    pub slides: Vec<StageSlide>,
    pub cursor: DragCursor,
    /// Set once the carousel has styled the stage; slides are clipped to it.
    pub clip: bool,
}

impl Stage {
    pub fn new(config: &SlidesConfig, width: f64, height: f64) -> Self {
        let mut stage = Self {
            width,
            height,
            slide_height_ratio: config.height_ratio,
            slides: Vec::with_capacity(config.count),
            cursor: DragCursor::Grab,
            clip: false,
        };
        let natural_width = stage.natural_slide_width();
        stage.slides = (0..config.count)
            .map(|i| StageSlide {
                natural_width,
                layout: SlideLayout { width: None, flex_shrink: 1.0, margin_right: 0.0 },
                offset: 0.0,
                colors: config.corner_colors(i),
            })
            .collect();
        stage
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn slide_height(&self) -> f64 {
        self.height * self.slide_height_ratio as f64
    }

    fn natural_slide_width(&self) -> f64 {
        self.slide_height() * CARD_ASPECT as f64
    }

    /// Resize the stage. Natural slide widths follow the new height; the
    /// carousel must re-measure afterwards.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        let natural = self.natural_slide_width();
        for slide in &mut self.slides {
            slide.natural_width = natural;
        }
    }

    fn laid_out_width(&self, slide: &StageSlide) -> f64 {
        slide.layout.width.unwrap_or(slide.natural_width)
    }

    /// Flex position of every slide plus its translation.
    pub fn slide_rects(&self) -> Vec<SlideRect> {
        let mut cursor_x = 0.0;
        self.slides
            .iter()
            .map(|slide| {
                let width = self.laid_out_width(slide);
                let rect = SlideRect { x: cursor_x + slide.offset, width };
                cursor_x += width + slide.layout.margin_right;
                rect
            })
            .collect()
    }
}

impl SlideContainer for Stage {
    fn width(&self) -> f64 {
        self.width
    }

    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn measured_slide_width(&self, index: usize) -> f64 {
        self.slides
            .get(index)
            .map(|s| self.laid_out_width(s))
            .unwrap_or(0.0)
    }

    fn apply_base_style(&mut self) {
        self.clip = true;
    }

    fn set_slide_layout(&mut self, index: usize, layout: SlideLayout) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.layout = layout;
        }
    }

    fn set_slide_offset(&mut self, index: usize, offset: f64) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.offset = offset;
        }
    }

    fn set_drag_cursor(&mut self, cursor: DragCursor) {
        self.cursor = cursor;
    }
}
