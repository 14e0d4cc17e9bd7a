//! Keyframe interpolation.
//!
//! Linear only: each named value moves along the straight line between the
//! bracketing keyframes. Bracket selection lives in [`crate::sampling`].

pub mod functions;

use crate::data::Keyframe;
use crate::value::Values;
use functions::normalized_offset;

/// Interpolate between `early` and `late` at `offset`.
///
/// `t = (offset - early.offset) / (late.offset - early.offset)`, or 0 when the
/// two offsets are equal. `t` is not clamped, so an offset outside the pair
/// extrapolates. The result carries the query `offset`.
pub fn interpolate<V: Values>(offset: f64, early: &Keyframe<V>, late: &Keyframe<V>) -> Keyframe<V> {
    let t = normalized_offset(offset, early.offset, late.offset);
    Keyframe {
        offset,
        values: V::lerp(&early.values, &late.values, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueMap;

    fn kf(offset: f64, x: f64) -> Keyframe<ValueMap> {
        Keyframe::new(offset, ValueMap::from([("x", x)]))
    }

    #[test]
    fn midpoint() {
        let out = interpolate(0.5, &kf(0.0, 0.0), &kf(1.0, 10.0));
        assert_eq!(out.offset, 0.5);
        assert_eq!(out.values.get("x"), Some(5.0));
    }

    #[test]
    fn degenerate_pair_returns_early_values() {
        let k = kf(0.3, 4.0);
        let out = interpolate(0.9, &k, &k);
        assert_eq!(out.values.get("x"), Some(4.0));
        assert_eq!(out.offset, 0.9);
    }

    #[test]
    fn extrapolates_beyond_the_pair() {
        let out = interpolate(1.5, &kf(0.0, 0.0), &kf(1.0, 10.0));
        assert_eq!(out.values.get("x"), Some(15.0));
    }
}
