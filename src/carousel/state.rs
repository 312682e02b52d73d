use std::collections::VecDeque;

use super::host::FrameHandle;

/// A target position observed at a point in time during a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    pub position: f64,
    /// Milliseconds on the engine clock.
    pub time: f64,
}

/// FIFO of recent drag samples. Pushing past `cap` evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: VecDeque<DragSample>,
    cap: usize,
}

impl SampleBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(cap + 1),
            cap,
        }
    }

    pub fn push(&mut self, sample: DragSample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.cap {
            self.samples.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn oldest(&self) -> Option<&DragSample> {
        self.samples.front()
    }

    pub fn newest(&self) -> Option<&DragSample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DragSample> {
        self.samples.iter()
    }
}

/// Mutable motion record for one carousel. Positions are in item widths.
#[derive(Debug, Clone)]
pub struct MotionState {
    /// Smoothed position that is actually rendered.
    pub current_position: f64,
    /// Position the frame loop relaxes toward.
    pub target_position: f64,
    /// `current_position` as of the previous frame.
    pub prev_position: f64,
    pub is_dragging: bool,
    pub drag_start_x: f64,
    pub drag_start_position: f64,
    /// Clock reading of the previous frame, in ms.
    pub prev_time: f64,
    /// Present exactly while the frame loop is running.
    pub animation_handle: Option<FrameHandle>,
    pub slide_count: usize,
    /// Slide width plus trailing gap.
    pub item_width: f64,
    /// Per-frame motion signal, always within [-1, 1].
    pub force: f64,
    pub drag_samples: SampleBuffer,
}

impl MotionState {
    pub fn new(now_ms: f64, sample_cap: usize) -> Self {
        Self {
            current_position: 0.0,
            target_position: 0.0,
            prev_position: 0.0,
            is_dragging: false,
            drag_start_x: 0.0,
            drag_start_position: 0.0,
            prev_time: now_ms,
            animation_handle: None,
            slide_count: 0,
            item_width: 0.0,
            force: 0.0,
            drag_samples: SampleBuffer::new(sample_cap),
        }
    }

    pub fn snapshot(&self) -> MotionSnapshot {
        MotionSnapshot {
            force: self.force,
            current_position: self.current_position,
            target_position: self.target_position,
            is_dragging: self.is_dragging,
            slide_count: self.slide_count,
            item_width: self.item_width,
        }
    }
}

/// Read-only copy of the values external consumers care about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSnapshot {
    pub force: f64,
    pub current_position: f64,
    pub target_position: f64,
    pub is_dragging: bool,
    pub slide_count: usize,
    pub item_width: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(position: f64, time: f64) -> DragSample {
        DragSample { position, time }
    }

    #[test]
    fn fresh_state_is_zeroed() {
        let s = MotionState::new(1234.0, 5);
        assert_eq!(s.current_position, 0.0);
        assert_eq!(s.target_position, 0.0);
        assert_eq!(s.prev_time, 1234.0);
        assert!(s.animation_handle.is_none());
        assert!(s.drag_samples.is_empty());
        assert_eq!(s.drag_samples.cap(), 5);
    }

    #[test]
    fn buffer_keeps_last_cap_samples_in_order() {
        let mut buf = SampleBuffer::new(3);
        for i in 0..7 {
            buf.push(sample(i as f64, i as f64 * 10.0));
        }
        assert_eq!(buf.len(), 3);
        let positions: Vec<f64> = buf.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![4.0, 5.0, 6.0]);
        assert_eq!(buf.oldest().map(|s| s.time), Some(40.0));
        assert_eq!(buf.newest().map(|s| s.time), Some(60.0));
    }

    #[test]
    fn buffer_under_cap_keeps_everything() {
        let mut buf = SampleBuffer::new(5);
        buf.push(sample(1.0, 0.0));
        buf.push(sample(2.0, 1.0));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn zero_cap_buffer_stays_empty() {
        let mut buf = SampleBuffer::new(0);
        buf.push(sample(1.0, 0.0));
        assert!(buf.is_empty());
    }

    #[test]
    fn snapshot_mirrors_state() {
        let mut s = MotionState::new(0.0, 5);
        s.force = -0.4;
        s.current_position = 2.5;
        s.is_dragging = true;
        let snap = s.snapshot();
        assert_eq!(snap.force, -0.4);
        assert_eq!(snap.current_position, 2.5);
        assert!(snap.is_dragging);
    }
}
