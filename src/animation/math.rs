/// Linear interpolation. `t` is not clamped.
pub fn lerp(v0: f64, v1: f64, t: f64) -> f64 {
    v0 * (1.0 - t) + v1 * t
}

/// Frame-rate independent exponential approach of `a` toward `b`.
/// `lambda` is the decay rate per second, `dt` the elapsed time in seconds.
pub fn damp(a: f64, b: f64, lambda: f64, dt: f64) -> f64 {
    let t = 1.0 - (-lambda * dt).exp();
    a + (b - a) * t
}

/// Shortest signed distance around a cycle of length `base`.
/// Result lies in `(-base/2, base/2]`.
pub fn symmetric_mod(value: f64, base: f64) -> f64 {
    let half = base / 2.0;
    let m = value % base;
    if m > half {
        m - base
    } else if m <= -half {
        m + base
    } else {
        m
    }
}

pub fn calculate_force(velocity: f64, dt: f64) -> f64 {
    velocity * dt
}

/// Map `value` from `[min, max]` onto `[0, 1]`. A degenerate range yields 0.
pub fn normalize(value: f64, min: f64, max: f64, clamp: bool) -> f64 {
    if min == max {
        return 0.0;
    }
    let normalized = (value - min) / (max - min);
    if !clamp {
        return normalized;
    }
    normalized.clamp(0.0, 1.0)
}

/// Round to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
