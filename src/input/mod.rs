use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase};

/// Resolved drag input, horizontal coordinate in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    MouseDown { x: f64 },
    MouseMove { x: f64 },
    MouseUp,
    /// Pointer left the container; ends a mouse drag like `MouseUp`.
    MouseLeave,
    TouchStart { x: f64 },
    TouchMove { x: f64 },
    TouchEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputResponse {
    /// The host should suppress its default handling (touch scrolling).
    pub prevent_default: bool,
}

/// Turns winit window events into single-pointer `PointerEvent`s.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    cursor_x: f64,
    active_touch: Option<u64>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>, scale_factor: f64) -> PointerEvent {
        self.cursor_x = to_logical(position.x, scale_factor);
        PointerEvent::MouseMove { x: self.cursor_x }
    }

    pub fn cursor_left(&mut self) -> PointerEvent {
        PointerEvent::MouseLeave
    }

    /// Only the primary button drags.
    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }
        Some(match state {
            ElementState::Pressed => PointerEvent::MouseDown { x: self.cursor_x },
            ElementState::Released => PointerEvent::MouseUp,
        })
    }

    /// Tracks the first finger down; every other touch is ignored until it lifts.
    pub fn touch(&mut self, touch: &Touch, scale_factor: f64) -> Option<PointerEvent> {
        let x = to_logical(touch.location.x, scale_factor);
        self.touch_phase(touch.id, touch.phase, x)
    }

    fn touch_phase(&mut self, id: u64, phase: TouchPhase, x: f64) -> Option<PointerEvent> {
        match phase {
            TouchPhase::Started => {
                if self.active_touch.is_some() {
                    return None;
                }
                self.active_touch = Some(id);
                Some(PointerEvent::TouchStart { x })
            }
            TouchPhase::Moved => {
                (self.active_touch == Some(id)).then_some(PointerEvent::TouchMove { x })
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.active_touch != Some(id) {
                    return None;
                }
                self.active_touch = None;
                Some(PointerEvent::TouchEnd)
            }
        }
    }
}

fn to_logical(physical: f64, scale_factor: f64) -> f64 {
    if scale_factor > 0.0 {
        physical / scale_factor
    } else {
        physical
    }
}
