//! Release momentum. Both models sample the drag the same way and turn the
//! sample window into a one-shot push of the target position.

use super::state::{DragSample, MotionState, SampleBuffer};
use crate::config::{MomentumConfig, MomentumModel};

/// Converts a per-millisecond rate into position units at `power = 1`.
/// Tied to the millisecond clock.
const RATE_SCALE: f64 = 100.0;

pub trait Momentum {
    /// Record the current target position. Called on every drag move.
    fn record_sample(&self, state: &mut MotionState, now_ms: f64);

    /// Push the target position by the release rate. Called once per drag end;
    /// always leaves the sample buffer empty.
    fn apply(&self, state: &mut MotionState);
}

pub fn from_config(config: &MomentumConfig) -> Box<dyn Momentum> {
    match config.model {
        MomentumModel::Velocity => Box::new(VelocityMomentum { power: config.power }),
        MomentumModel::Damping => Box::new(DampingMomentum { power: config.power }),
    }
}

fn push_sample(state: &mut MotionState, now_ms: f64) {
    let sample = DragSample { position: state.target_position, time: now_ms };
    state.drag_samples.push(sample);
}

/// Finite-difference rate across the whole window, in positions per ms.
/// `None` with fewer than two samples or no elapsed time.
fn window_rate(samples: &SampleBuffer) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let (oldest, newest) = (samples.oldest()?, samples.newest()?);
    let dt = newest.time - oldest.time;
    if dt <= 0.0 {
        return None;
    }
    Some((newest.position - oldest.position) / dt)
}

#[derive(Debug, Clone, Copy)]
pub struct VelocityMomentum {
    pub power: f64,
}

impl Momentum for VelocityMomentum {
    fn record_sample(&self, state: &mut MotionState, now_ms: f64) {
        push_sample(state, now_ms);
    }

    fn apply(&self, state: &mut MotionState) {
        if self.power != 0.0 {
            if let Some(velocity) = window_rate(&state.drag_samples) {
                let push = velocity * self.power * RATE_SCALE;
                log::trace!("velocity {:.5}/ms, push {:.4}", velocity, push);
                state.target_position += push;
            }
        }
        state.drag_samples.clear();
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DampingMomentum {
    pub power: f64,
}

impl Momentum for DampingMomentum {
    fn record_sample(&self, state: &mut MotionState, now_ms: f64) {
        push_sample(state, now_ms);
    }

    fn apply(&self, state: &mut MotionState) {
        let damping = match window_rate(&state.drag_samples) {
            Some(rate) if self.power != 0.0 => rate,
            _ => {
                state.drag_samples.clear();
                return;
            }
        };
        let push = damping * self.power * RATE_SCALE;
        log::trace!("damping rate {:.5}/ms, push {:.4}", damping, push);
        state.target_position += push;
        state.drag_samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models(power: f64) -> Vec<Box<dyn Momentum>> {
        vec![
            Box::new(VelocityMomentum { power }),
            Box::new(DampingMomentum { power }),
        ]
    }

    fn state_with_samples(samples: &[(f64, f64)]) -> MotionState {
        let mut s = MotionState::new(0.0, 5);
        for &(position, time) in samples {
            s.drag_samples.push(DragSample { position, time });
        }
        s
    }

    #[test]
    fn record_sample_captures_target_and_time() {
        for m in models(1.0) {
            let mut s = MotionState::new(0.0, 5);
            s.target_position = 0.7;
            m.record_sample(&mut s, 42.0);
            assert_eq!(s.drag_samples.newest(), Some(&DragSample { position: 0.7, time: 42.0 }));
        }
    }

    #[test]
    fn record_sample_evicts_oldest_past_cap() {
        for m in models(1.0) {
            let mut s = MotionState::new(0.0, 3);
            for i in 0..5 {
                s.target_position = i as f64;
                m.record_sample(&mut s, i as f64 * 16.0);
            }
            let positions: Vec<f64> = s.drag_samples.iter().map(|d| d.position).collect();
            assert_eq!(positions, vec![2.0, 3.0, 4.0]);
        }
    }

    #[test]
    fn zero_power_changes_nothing() {
        for m in models(0.0) {
            let mut s = state_with_samples(&[(0.0, 0.0), (1.0, 100.0)]);
            m.apply(&mut s);
            assert_eq!(s.target_position, 0.0);
            assert!(s.drag_samples.is_empty());
        }
    }

    #[test]
    fn single_sample_changes_nothing() {
        for m in models(1.0) {
            let mut s = state_with_samples(&[(1.0, 100.0)]);
            s.target_position = 1.0;
            m.apply(&mut s);
            assert_eq!(s.target_position, 1.0);
            assert!(s.drag_samples.is_empty());
        }
    }

    #[test]
    fn non_positive_elapsed_time_changes_nothing() {
        for m in models(1.0) {
            let mut s = state_with_samples(&[(0.0, 50.0), (1.0, 50.0)]);
            m.apply(&mut s);
            assert_eq!(s.target_position, 0.0);
            assert!(s.drag_samples.is_empty());

            let mut s = state_with_samples(&[(0.0, 80.0), (1.0, 50.0)]);
            m.apply(&mut s);
            assert_eq!(s.target_position, 0.0);
        }
    }

    #[test]
    fn one_unit_per_hundred_ms_pushes_one_unit() {
        for m in models(1.0) {
            let mut s = state_with_samples(&[(0.0, 1000.0), (1.0, 1100.0)]);
            m.apply(&mut s);
            assert!((s.target_position - 1.0).abs() < 1e-12);
            assert!(s.drag_samples.is_empty());
        }
    }

    #[test]
    fn push_is_linear_in_power() {
        let samples = [(0.0, 0.0), (0.2, 16.0), (0.5, 40.0)];
        for (single, double) in models(1.0).into_iter().zip(models(2.0)) {
            let mut a = state_with_samples(&samples);
            let mut b = state_with_samples(&samples);
            single.apply(&mut a);
            double.apply(&mut b);
            assert!((b.target_position - 2.0 * a.target_position).abs() < 1e-12);
        }
    }

    #[test]
    fn only_window_endpoints_matter() {
        for m in models(1.0) {
            let mut wobbly = state_with_samples(&[(0.0, 0.0), (5.0, 10.0), (-3.0, 20.0), (1.0, 100.0)]);
            let mut straight = state_with_samples(&[(0.0, 0.0), (1.0, 100.0)]);
            m.apply(&mut wobbly);
            m.apply(&mut straight);
            assert!((wobbly.target_position - straight.target_position).abs() < 1e-12);
        }
    }

    #[test]
    fn from_config_picks_model() {
        let config = MomentumConfig { model: MomentumModel::Velocity, power: 3.0, samples: 5 };
        let m = from_config(&config);
        let mut s = state_with_samples(&[(0.0, 0.0), (1.0, 100.0)]);
        m.apply(&mut s);
        assert!((s.target_position - 3.0).abs() < 1e-12);
    }
}
