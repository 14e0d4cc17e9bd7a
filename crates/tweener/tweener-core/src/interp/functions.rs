//! Interpolation helpers:
//! - lerp_f64 (unclamped linear blend)
//! - normalized_offset (position of an offset within a keyframe span)

/// Linear interpolation of scalars. `t` outside [0,1] extrapolates.
#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Where `offset` falls between `start` and `end`, as a fraction of the span.
///
/// A zero-length span yields 0, so the earlier keyframe's values are returned
/// unchanged. The result is not clamped.
#[inline]
pub fn normalized_offset(offset: f64, start: f64, end: f64) -> f64 {
    let range = end - start;
    if range == 0.0 {
        0.0
    } else {
        (offset - start) / range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_span_is_zero() {
        assert_eq!(normalized_offset(3.0, 0.5, 0.5), 0.0);
    }

    #[test]
    fn outside_the_span_is_not_clamped() {
        assert_eq!(normalized_offset(2.0, 0.0, 1.0), 2.0);
        assert_eq!(lerp_f64(0.0, 10.0, -0.5), -5.0);
    }

    #[test]
    fn t_zero_returns_start_exactly() {
        let a = 0.1 + 0.2;
        assert_eq!(lerp_f64(a, 7.0, 0.0).to_bits(), a.to_bits());
    }
}
