//! # Library-Internal Utilities

/// Integer division rounding towards negative infinity
///
/// # Panics
///
/// If `den` is zero.
#[must_use]
pub(crate) fn div_floor(num: i64, den: i64) -> i64 {
    let quot = num / den;
    if (num % den != 0) && ((num < 0) != (den < 0)) {
        quot - 1
    } else {
        quot
    }
}

/// Integer division rounding towards positive infinity
///
/// # Panics
///
/// If `den` is zero.
#[must_use]
pub(crate) fn div_ceil(num: i64, den: i64) -> i64 {
    let quot = num / den;
    if (num % den != 0) && ((num < 0) == (den < 0)) {
        quot + 1
    } else {
        quot
    }
}

/// The interval covered by `coef * x` for `x` in `lo..=hi`
#[must_use]
pub(crate) fn scaled_bounds(coef: i64, lo: i64, hi: i64) -> (i64, i64) {
    if coef >= 0 {
        (coef * lo, coef * hi)
    } else {
        (coef * hi, coef * lo)
    }
}

/// Checks whether a sorted slice contains a value
#[inline]
#[must_use]
pub(crate) fn sorted_contains(elems: &[i64], val: i64) -> bool {
    elems.binary_search(&val).is_ok()
}

macro_rules! unreachable_none {
    ($opt:expr) => {{
        if let Some(val) = $opt {
            val
        } else {
            unreachable!()
        }
    }};
}
pub(crate) use unreachable_none;

#[cfg(test)]
mod tests {
    #[test]
    fn div_floor_signs() {
        assert_eq!(super::div_floor(7, 2), 3);
        assert_eq!(super::div_floor(-7, 2), -4);
        assert_eq!(super::div_floor(7, -2), -4);
        assert_eq!(super::div_floor(-7, -2), 3);
        assert_eq!(super::div_floor(6, -2), -3);
    }

    #[test]
    fn div_ceil_signs() {
        assert_eq!(super::div_ceil(7, 2), 4);
        assert_eq!(super::div_ceil(-7, 2), -3);
        assert_eq!(super::div_ceil(7, -2), -3);
        assert_eq!(super::div_ceil(-7, -2), 4);
        assert_eq!(super::div_ceil(-6, 2), -3);
    }

    #[test]
    fn scaled_bounds_negative() {
        assert_eq!(super::scaled_bounds(-2, 1, 3), (-6, -2));
        assert_eq!(super::scaled_bounds(3, -1, 2), (-3, 6));
    }
}
