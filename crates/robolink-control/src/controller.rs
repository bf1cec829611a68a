//! Proportional controller mapping pilot sticks and inertial samples to
//! four actuator strengths.
//!
//! Inputs arrive from different threads (input events, sensor callbacks,
//! the output pump), so all state sits behind one mutex and every public
//! method takes the lock for its whole body.

use std::sync::Mutex;
use std::time::Instant;

use crate::math::{add4, clip, mean4, mean_samples, norm4, scale4, sigmoid};

/// Number of actuators.
pub const STATE_LEN: usize = 4;

/// Upper bound of an actuator strength byte.
pub const MAX_STRENGTH: f32 = 255.0;

/// Proportional gain.
pub const KP: f32 = 5.0;

/// Accelerometer samples averaged per bias update.
pub const MOVING_AVG_DEPTH: usize = 3;

/// Below this throttle the sensor bias is ignored.
pub const LOW_THROTTLE: f32 = 0.1;

/// Output pump rate gated by [`QuadController::is_ready`].
pub const UPDATE_RATE_HZ: f32 = 100.0;

/// Per-axis weight of the X mixing matrix.
pub const MIX: f32 = 0.25;

/// Weight of the raw gravity magnitude in the bias vector.
pub const GRAVITY_NORM_WEIGHT: f32 = 1e-6;

/// Throttle inputs below this are treated as stick noise.
pub const INPUT_EPS: f32 = 1e-3;

const SENSOR_LOG_THRESHOLD: f32 = 10.0;

#[derive(Debug, Default)]
struct Inner {
    state: [f32; STATE_LEN],
    bias: [f32; STATE_LEN],
    input_mix: [f32; STATE_LEN],
    sensor_weight: f32,
    throttle: f32,
    first_input: bool,
    window: Vec<[f32; 3]>,
    last_tick: Option<Instant>,
}

/// Shared controller state. Cheap to share behind an `Arc`.
#[derive(Debug)]
pub struct QuadController {
    inner: Mutex<Inner>,
    max_strength: f32,
}

impl Default for QuadController {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadController {
    pub fn new() -> Self {
        Self::with_max_strength(MAX_STRENGTH)
    }

    pub fn with_max_strength(max_strength: f32) -> Self {
        QuadController {
            inner: Mutex::new(Inner::default()),
            max_strength,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-update left the state torn.
        self.inner.lock().expect("controller state lock poisoned")
    }

    /// Feeds one accelerometer (or gravity) sample.
    ///
    /// Samples are averaged in batches of [`MOVING_AVG_DEPTH`]; each full
    /// batch contributes one attitude bias update.
    pub fn update_sensor(&self, accel: [f32; 3]) {
        let mut inner = self.lock();
        inner.window.push(accel);
        if inner.window.len() < MOVING_AVG_DEPTH {
            return;
        }
        let g = mean_samples(&inner.window);
        inner.window.clear();
        let bias = gravity_bias(g, &mut inner);
        inner.bias = add4(inner.bias, bias);
        if norm4(inner.bias) > SENSOR_LOG_THRESHOLD {
            tracing::trace!(bias = ?inner.bias, "large accumulated sensor bias");
        }
    }

    /// Feeds one gyroscope sample; applied immediately, no averaging.
    pub fn update_gyro(&self, rate: [f32; 3]) {
        let mut inner = self.lock();
        inner.bias = add4(inner.bias, gyro_bias(rate));
    }

    /// Feeds one stick input as `[throttle, roll, pitch, yaw]`.
    pub fn update_input(&self, input: [f32; 4]) {
        let mut inner = self.lock();
        inner.first_input = true;
        inner.input_mix = input_mix(input);
        if input[0].abs() > INPUT_EPS {
            let next = self.step(inner.state, inner.input_mix);
            inner.throttle = mean4(next);
        }
    }

    /// Adopts an actuator state reported back by the device.
    pub fn set_state(&self, state: [u8; STATE_LEN]) {
        let mut inner = self.lock();
        for (slot, byte) in inner.state.iter_mut().zip(state) {
            *slot = f32::from(byte);
        }
    }

    /// Advances the control law one tick and returns the actuator bytes.
    ///
    /// The accumulated sensor bias is consumed here; it never carries over
    /// to the next tick.
    pub fn last_state(&self) -> [u8; STATE_LEN] {
        let mut inner = self.lock();
        let mut weight = inner.sensor_weight;
        if inner.throttle < LOW_THROTTLE {
            weight = 0.0;
        }
        let error = add4(scale4(inner.bias, weight), inner.input_mix);
        let next = self.renormalize(self.step(inner.state, error), inner.throttle);
        inner.state = next;
        inner.bias = [0.0; STATE_LEN];
        next.map(|v| v as u8)
    }

    /// Commanded throttle, the mean of the projected actuator state.
    pub fn throttle(&self) -> f32 {
        self.lock().throttle
    }

    /// Rate gate for the output pump.
    ///
    /// True on the first call and whenever a full update period elapsed
    /// since the previous call. The reference timestamp resets on every
    /// call, ready or not.
    pub fn is_ready(&self) -> bool {
        let mut inner = self.lock();
        let now = Instant::now();
        let ready = match inner.last_tick {
            None => true,
            Some(last) => now.duration_since(last).as_secs_f32() >= 1.0 / UPDATE_RATE_HZ,
        };
        inner.last_tick = Some(now);
        ready
    }

    fn step(&self, state: [f32; STATE_LEN], error: [f32; STATE_LEN]) -> [f32; STATE_LEN] {
        let mut next = [0.0; STATE_LEN];
        for i in 0..STATE_LEN {
            next[i] = clip(KP * error[i] + state[i], 0.0, self.max_strength);
        }
        next
    }

    /// Nudges the state mean a quarter of the way back toward the
    /// commanded throttle.
    fn renormalize(&self, mut state: [f32; STATE_LEN], throttle: f32) -> [f32; STATE_LEN] {
        let added = (throttle - mean4(state)) / 4.0;
        for v in &mut state {
            *v = clip(*v + added, 0.0, self.max_strength);
        }
        state
    }
}

/// X mixing matrix: equal weights, fixed sign pattern per actuator.
fn input_mix(input: [f32; 4]) -> [f32; STATE_LEN] {
    let [t, r, p, y] = input.map(|v| v * MIX);
    [t - r - p + y, t + r - p - y, t + r + p + y, t - r + p - y]
}

fn gravity_bias(g: [f32; 3], inner: &mut Inner) -> [f32; STATE_LEN] {
    let g_n = (g[0] * g[0] + g[1] * g[1] + g[2] * g[2]).sqrt();
    if g_n == 0.0 {
        return [0.0; STATE_LEN];
    }
    let gx = g[0] / g_n;
    let gy = g[1] / g_n;
    let mut gz = g[2] / g_n;
    let gxy = (gx * gx + gy * gy).sqrt();
    if inner.first_input {
        inner.sensor_weight = (sigmoid(gxy, 2.0) - 0.5) * 2.0;
    }
    if gz > 0.0 {
        // Vertical pull only matters once the device is flipped over.
        gz = 0.0;
    }
    let (x, y, z, n) = (MIX * gx, MIX * gy, MIX * gz, GRAVITY_NORM_WEIGHT * g_n);
    [
        -x - y + z + n,
        -x + y + z + n,
        x + y + z + n,
        x - y + z + n,
    ]
}

fn gyro_bias(rate: [f32; 3]) -> [f32; STATE_LEN] {
    let [x, y, z] = rate.map(|v| v * MIX);
    [-x + y - z, x + y + z, x - y - z, -x - y + z]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn pure_throttle_raises_all_actuators_equally() {
        let ctl = QuadController::new();
        ctl.update_input([1.0, 0.0, 0.0, 0.0]);
        assert!((ctl.throttle() - 1.25).abs() < 1e-6);
        let state = ctl.last_state();
        assert_eq!(state, [1; STATE_LEN]);
    }

    #[test]
    fn roll_input_splits_the_actuator_pairs() {
        let ctl = QuadController::new();
        ctl.update_input([0.0, 1.0, 0.0, 0.0]);
        // Throttle stays zero for a pure-roll stick.
        assert_eq!(ctl.throttle(), 0.0);
        let state = ctl.last_state();
        assert_eq!(state[0], state[3]);
        assert_eq!(state[1], state[2]);
        assert!(state[1] > state[0]);
    }

    #[test]
    fn stick_noise_does_not_move_the_throttle() {
        let ctl = QuadController::new();
        ctl.update_input([1e-4, 0.0, 0.0, 0.0]);
        assert_eq!(ctl.throttle(), 0.0);
    }

    #[test]
    fn sensor_bias_is_gated_below_low_throttle() {
        let ctl = QuadController::new();
        ctl.update_input([0.0, 0.0, 0.0, 0.0]);
        for _ in 0..MOVING_AVG_DEPTH {
            ctl.update_sensor([9.81, 0.0, 0.0]);
        }
        // Throttle is zero, so the tilt bias must not move the state.
        assert_eq!(ctl.last_state(), [0; STATE_LEN]);
    }

    #[test]
    fn tilt_bias_shifts_actuators_at_flying_throttle() {
        let ctl = QuadController::new();
        ctl.update_input([1.0, 0.0, 0.0, 0.0]);
        for _ in 0..MOVING_AVG_DEPTH {
            ctl.update_sensor([9.81, 0.0, 0.0]);
        }
        let state = ctl.last_state();
        // A pure +x tilt pushes actuators 2 and 3 up relative to 0 and 1.
        assert!(state[2] > state[0]);
        assert!(state[3] > state[1]);
    }

    #[test]
    fn level_device_contributes_no_attitude_bias() {
        let ctl = QuadController::new();
        ctl.update_input([1.0, 0.0, 0.0, 0.0]);
        for _ in 0..MOVING_AVG_DEPTH {
            // Flat and face-up: all gravity on +z, which is zeroed.
            ctl.update_sensor([0.0, 0.0, 9.81]);
        }
        let state = ctl.last_state();
        assert_eq!(state[0], state[1]);
        assert_eq!(state[1], state[2]);
        assert_eq!(state[2], state[3]);
    }

    #[test]
    fn bias_does_not_accumulate_across_ticks() {
        let ctl = QuadController::new();
        ctl.update_input([1.0, 0.0, 0.0, 0.0]);
        for _ in 0..MOVING_AVG_DEPTH {
            ctl.update_sensor([9.81, 0.0, 0.0]);
        }
        let first = ctl.last_state();
        let second = ctl.last_state();
        // The tilt contribution was consumed by the first tick.
        assert!(first[2] - first[0] >= second[2] - second[0]);
    }

    #[test]
    fn partial_sensor_window_is_ignored() {
        let ctl = QuadController::new();
        ctl.update_input([1.0, 0.0, 0.0, 0.0]);
        for _ in 0..MOVING_AVG_DEPTH - 1 {
            ctl.update_sensor([9.81, 0.0, 0.0]);
        }
        let state = ctl.last_state();
        assert_eq!(state[0], state[2]);
    }

    #[test]
    fn gyro_bias_applies_without_averaging() {
        let ctl = QuadController::new();
        ctl.update_input([1.0, 0.0, 0.0, 0.0]);
        // Force a nonzero sensor weight first.
        for _ in 0..MOVING_AVG_DEPTH {
            ctl.update_sensor([9.81, 0.0, 0.0]);
        }
        ctl.last_state();
        ctl.update_gyro([1.0, 0.0, 0.0]);
        let state = ctl.last_state();
        assert!(state[1] > state[0]);
        assert!(state[2] > state[3]);
    }

    #[test]
    fn reported_state_feeds_the_next_tick() {
        let ctl = QuadController::new();
        ctl.set_state([10, 20, 30, 40]);
        // Zero error, zero throttle: the mean is pulled a quarter toward 0.
        assert_eq!(ctl.last_state(), [3, 13, 23, 33]);
    }

    #[test]
    fn ready_gate_tracks_the_update_period() {
        let ctl = QuadController::new();
        assert!(ctl.is_ready());
        assert!(!ctl.is_ready());
        sleep(Duration::from_millis(15));
        assert!(ctl.is_ready());
    }

    #[test]
    fn output_saturates_at_max_strength() {
        let ctl = QuadController::new();
        ctl.set_state([255; STATE_LEN]);
        ctl.update_input([100.0, 0.0, 0.0, 0.0]);
        assert_eq!(ctl.last_state(), [255; STATE_LEN]);
    }
}
