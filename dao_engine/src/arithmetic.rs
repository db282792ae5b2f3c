//! Arithmetic primitives shared by the generator and the simulator.
//!
//! Rounding is half toward positive infinity everywhere (`2.5 -> 3`,
//! `-2.5 -> -2`). `f64::round` rounds half away from zero, which would
//! move negative influence terms by one point, so it is never used here.

/// Round to the nearest integer, ties toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Clamp an integer into `[min, max]`.
pub fn clamp(value: i64, min: i64, max: i64) -> i64 {
    value.max(min).min(max)
}

/// Arithmetic mean. The mean of an empty sequence is 0.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = i64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v as f64;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_positive() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(7.0), 7);
    }

    #[test]
    fn test_round_half_up_negative_ties_go_up() {
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(-0.4), 0);
    }

    #[test]
    fn test_round_half_up_just_below_half() {
        assert_eq!(round_half_up(0.499_999_999_999_999_94), 0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(120, 0, 100), 100);
        assert_eq!(clamp(-4, 0, 100), 0);
        assert_eq!(clamp(55, 0, 100), 55);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(vec![40, 60]), 50.0);
        assert_eq!(mean(Vec::<i64>::new()), 0.0);
    }
}
