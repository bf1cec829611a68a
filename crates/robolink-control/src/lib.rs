//! Quad actuator controller.
//!
//! A proportional control law over four actuator strengths, fed by stick
//! input, an averaged accelerometer bias, and optional gyro rates. The
//! controller struct is thread-safe; see [`controller::QuadController`].

pub mod controller;
pub mod math;

pub use controller::{
    QuadController, GRAVITY_NORM_WEIGHT, INPUT_EPS, KP, LOW_THROTTLE, MAX_STRENGTH,
    MOVING_AVG_DEPTH, STATE_LEN, UPDATE_RATE_HZ,
};
