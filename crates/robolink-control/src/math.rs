//! Small fixed-size vector helpers for the control law.

/// Element-wise sum of two actuator vectors.
pub fn add4(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2], a[3] + b[3]]
}

/// Scales every element of an actuator vector.
pub fn scale4(a: [f32; 4], scale: f32) -> [f32; 4] {
    [a[0] * scale, a[1] * scale, a[2] * scale, a[3] * scale]
}

/// Arithmetic mean of an actuator vector.
pub fn mean4(a: [f32; 4]) -> f32 {
    (a[0] + a[1] + a[2] + a[3]) / 4.0
}

/// Length-normalized Euclidean norm.
pub fn norm4(a: [f32; 4]) -> f32 {
    let sum: f32 = a.iter().map(|v| v * v).sum();
    sum.sqrt() / 4.0
}

/// Clamps `v` into `[min_v, max_v]`.
pub fn clip(v: f32, min_v: f32, max_v: f32) -> f32 {
    if v > max_v {
        max_v
    } else if v < min_v {
        min_v
    } else {
        v
    }
}

/// Logistic function with slope `c0`.
pub fn sigmoid(x: f32, c0: f32) -> f32 {
    1.0 / ((-x * c0).exp() + 1.0)
}

/// Mean of a batch of 3-axis samples. Empty input yields the zero vector.
pub fn mean_samples(samples: &[[f32; 3]]) -> [f32; 3] {
    if samples.is_empty() {
        return [0.0; 3];
    }
    let mut sum = [0.0f32; 3];
    for s in samples {
        sum[0] += s[0];
        sum[1] += s[1];
        sum[2] += s[2];
    }
    let inv = 1.0 / samples.len() as f32;
    [sum[0] * inv, sum[1] * inv, sum[2] * inv]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_scale_are_element_wise() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [0.5, 0.5, 0.5, 0.5];
        assert_eq!(add4(a, b), [1.5, 2.5, 3.5, 4.5]);
        assert_eq!(scale4(a, 2.0), [2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn mean_of_uniform_vector_is_the_element() {
        assert_eq!(mean4([3.0; 4]), 3.0);
    }

    #[test]
    fn norm_is_length_normalized() {
        assert_eq!(norm4([0.0; 4]), 0.0);
        assert!((norm4([2.0, 2.0, 2.0, 2.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn clip_saturates_both_ends() {
        assert_eq!(clip(-1.0, 0.0, 255.0), 0.0);
        assert_eq!(clip(300.0, 0.0, 255.0), 255.0);
        assert_eq!(clip(128.0, 0.0, 255.0), 128.0);
    }

    #[test]
    fn sigmoid_is_centered_and_monotonic() {
        assert!((sigmoid(0.0, 2.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(1.0, 2.0) > sigmoid(0.0, 2.0));
        assert!(sigmoid(-1.0, 2.0) < 0.5);
    }

    #[test]
    fn sample_mean_averages_per_axis() {
        let mean = mean_samples(&[[1.0, 0.0, 3.0], [3.0, 0.0, 9.0]]);
        assert_eq!(mean, [2.0, 0.0, 6.0]);
        assert_eq!(mean_samples(&[]), [0.0; 3]);
    }
}
