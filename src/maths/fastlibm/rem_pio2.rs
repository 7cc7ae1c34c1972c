//! x rem pi/2 as a head/tail pair.
//!
//! Small multiples of pi/2 are subtracted with a single 33+53 bit split of
//! pi/2. Medium arguments round x*2/pi to an integer and add correction rounds
//! only when the subtraction cancels enough leading bits to need them. Huge
//! arguments go through the Payne–Hanek reducer.

use super::rem_pio2_large::{Precision, decompose, rem_pio2_large};
use super::{hi_exp, hi_word};

const TOINT: f64 = 6755399441055744.0; // 1.5 * 2^52
const INVPIO2: f64 = 6.36619772367581382433e-01; // 0x3FE45F30, 0x6DC9C883

const PIO2_1: f64 = 1.57079632673412561417e+00; // 0x3FF921FB, 0x54400000
const PIO2_1T: f64 = 6.07710050650619224932e-11; // 0x3DD0B461, 0x1A626331
const PIO2_2: f64 = 6.07710050630396597660e-11; // 0x3DD0B461, 0x1A600000
const PIO2_2T: f64 = 2.02226624879595063154e-21; // 0x3BA3198A, 0x2E037073
const PIO2_3: f64 = 2.02226624871116645580e-21; // 0x3BA3198A, 0x2E000000
const PIO2_3T: f64 = 8.47842766036889956997e-32; // 0x397B839A, 0x252049C1

/// Further pi/2 pieces and the cancellation, in bits, that triggers each.
/// The second round is good to 118 bits, the third to 151.
const CORRECTIONS: [(f64, f64, i32); 2] = [(PIO2_2, PIO2_2T, 16), (PIO2_3, PIO2_3T, 49)];

/// Reduces `x` to `n*pi/2 + (y0 + y1)` with `|y0 + y1| <= pi/4`.
///
/// Only `n & 3` is meaningful for huge `|x|`. Arguments already within
/// pi/4 come back unchanged with `n = 0`; Inf and NaN give NaN.
pub(crate) fn rem_pio2(x: f64) -> (i32, f64, f64) {
    let hx = hi_word(x) as i32;
    let ix = (hx & 0x7fff_ffff) as u32;

    if ix <= 0x3fe9_21fb {
        // |x| ~<= pi/4
        return (0, x, 0.0);
    }

    if ix <= 0x400f_6a7a {
        // |x| ~<= 5pi/4
        if (ix & 0xfffff) != 0x921fb {
            // not near pi/2 or pi
            let k = if ix <= 0x4002_d97c { 1 } else { 2 };
            return small_multiple(x, k, hx > 0);
        }
    } else if ix <= 0x401c_463b {
        // |x| ~<= 9pi/4
        if ix <= 0x4015_fdbc {
            // |x| ~<= 7pi/4
            if ix != 0x4012_d97c {
                // not near 3pi/2
                return small_multiple(x, 3, hx > 0);
            }
        } else if ix != 0x4019_21fb {
            // not near 2pi
            return small_multiple(x, 4, hx > 0);
        }
    } else if ix >= 0x4139_21fb {
        // |x| ~>= 2^20*(pi/2)
        return huge(x, ix, hx < 0);
    }

    medium(x, ix)
}

/// One subtraction of `k*pi/2` split as `k*PIO2_1 + k*PIO2_1T`, good to 85
/// bits while k <= 4 and x is away from the multiple itself.
#[inline(always)]
fn small_multiple(x: f64, k: i32, positive: bool) -> (i32, f64, f64) {
    let kf = k as f64;
    if positive {
        let z = x - kf * PIO2_1;
        let y0 = z - kf * PIO2_1T;
        let y1 = (z - y0) - kf * PIO2_1T;
        (k, y0, y1)
    } else {
        let z = x + kf * PIO2_1;
        let y0 = z + kf * PIO2_1T;
        let y1 = (z - y0) + kf * PIO2_1T;
        (-k, y0, y1)
    }
}

/// Bits lost between the exponent of x and that of the reduced head.
#[inline(always)]
fn cancelled_bits(ix: u32, y0: f64) -> i32 {
    hi_exp(ix) - hi_exp(hi_word(y0))
}

#[inline(always)]
fn medium(x: f64, ix: u32) -> (i32, f64, f64) {
    // round-to-nearest-even via the 1.5*2^52 shift
    let fn_ = (x * INVPIO2 + TOINT) - TOINT;
    let n = fn_ as i32;

    let mut r = x - fn_ * PIO2_1;
    let mut w = fn_ * PIO2_1T;
    let mut y0 = r - w;

    for &(pio2, pio2t, limit) in &CORRECTIONS {
        if cancelled_bits(ix, y0) <= limit {
            break;
        }
        let t = r;
        w = fn_ * pio2;
        r = t - w;
        w = fn_ * pio2t - ((t - r) - w);
        y0 = r - w;
    }

    let y1 = (r - y0) - w;
    (n, y0, y1)
}

#[inline(always)]
fn huge(x: f64, ix: u32, negative: bool) -> (i32, f64, f64) {
    if ix >= 0x7ff0_0000 {
        // Inf or NaN
        let nan = x - x;
        return (0, nan, nan);
    }

    let (limbs, e0) = decompose(x);
    let (n, y) = rem_pio2_large(&limbs, e0, Precision::Double);
    if negative {
        (-n, -y[0], -y[1])
    } else {
        (n, y[0], y[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    // Tier thresholds look at the high word only, so small multiples may
    // overshoot pi/4 by up to one high-word step (2^-18 at 9pi/4).
    const RANGE_EPS: f64 = 1e-5;

    fn assert_in_range(x: f64) {
        let (_, y0, y1) = rem_pio2(x);
        assert!(
            (y0 + y1).abs() <= FRAC_PI_4 + RANGE_EPS,
            "rem_pio2({x}) = {y0} + {y1} is out of range"
        );
        assert!(
            y1.abs() <= y0.abs() * 1e-15,
            "tail of rem_pio2({x}) overlaps the head"
        );
    }

    #[test]
    fn small_multiples_pick_the_nearest_quadrant() {
        let cases = [
            (2.0, 1),
            (2.3, 1),
            (3.0, 2),
            (3.9, 2),
            (4.0, 3),
            (5.4, 3),
            (5.6, 4),
            (7.0, 4),
        ];
        for &(x, k) in &cases {
            let (n, y0, y1) = rem_pio2(x);
            assert_eq!(n, k, "quadrant of {x}");
            let approx = x - (k as f64) * FRAC_PI_2;
            assert!((y0 + y1 - approx).abs() < 1e-14, "remainder of {x}");

            let (m, z0, z1) = rem_pio2(-x);
            assert_eq!(m, -k, "quadrant of -{x}");
            assert_eq!(z0, -y0);
            assert_eq!(z1, -y1);
        }
    }

    #[test]
    fn within_pi_over_four_is_untouched() {
        assert_eq!(rem_pio2(0.5), (0, 0.5, 0.0));
        assert_eq!(rem_pio2(-FRAC_PI_4), (0, -FRAC_PI_4, 0.0));
    }

    #[test]
    fn multiples_of_pi_over_two_keep_full_precision() {
        // Each remainder is exactly the rounding error of the literal, which
        // the single-term subtraction would only get to about 30 bits. Every
        // literal rounds below the true multiple, so all four are negative.
        let cases = [
            (FRAC_PI_2, 1, -6.123233995736766e-17),
            (PI, 2, -1.2246467991473532e-16),
            (3.0 * FRAC_PI_2, 3, -1.8369701987210297e-16),
            (2.0 * PI, 4, -2.4492935982947064e-16),
        ];
        for &(x, k, expected) in &cases {
            let (n, y0, _) = rem_pio2(x);
            assert_eq!(n, k, "quadrant of {x}");
            assert!(y0 < 0.0, "rem_pio2({x}) = {y0} has the wrong sign");
            assert!(
                (y0 - expected).abs() <= expected.abs() * 1e-15,
                "rem_pio2({x}) = {y0}, expected {expected}"
            );

            let (m, z0, _) = rem_pio2(-x);
            assert_eq!(m, -k, "quadrant of -{x}");
            assert_eq!(z0, -y0);
        }
    }

    #[test]
    fn tier_edges_stay_in_range() {
        let edges: [u32; 8] = [
            0x4002_d97c,
            0x4002_d97d,
            0x400f_6a7a,
            0x400f_6a7b,
            0x4015_fdbc,
            0x4015_fdbd,
            0x401c_463b,
            0x401c_463c,
        ];
        for &hi in &edges {
            for &lo in &[0u32, 0x8000_0000, 0xffff_ffff] {
                let x = f64::from_bits(((hi as u64) << 32) | lo as u64);
                assert_in_range(x);
                assert_in_range(-x);
            }
        }
    }

    #[test]
    fn medium_and_huge_stay_in_range() {
        let mut x = 2.5;
        while x < 1e300 {
            assert_in_range(x);
            assert_in_range(-x);
            x *= 1.7;
        }
        assert_in_range(f64::MAX);
        assert_in_range(f64::MIN);
    }

    #[test]
    fn medium_n_is_nearest_integer() {
        for &x in &[10.0, 100.0, 12345.678, -98765.4321, 1.5e6] {
            let (n, y0, y1) = rem_pio2(x);
            let approx = x / FRAC_PI_2;
            assert!((n as f64 - approx).abs() <= 0.5 + 1e-9, "n for {x}");
            assert!((y0 + y1).abs() <= FRAC_PI_4 + RANGE_EPS);
        }
    }

    #[test]
    fn huge_is_odd_symmetric() {
        for &x in &[1e7, 1e22, 1e100, 1e308] {
            let (n, y0, y1) = rem_pio2(x);
            let (m, z0, z1) = rem_pio2(-x);
            assert_eq!(m, -n);
            assert_eq!(z0, -y0);
            assert_eq!(z1, -y1);
        }
    }

    #[test]
    fn non_finite_gives_nan() {
        for &x in &[f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let (n, y0, y1) = rem_pio2(x);
            assert_eq!(n, 0);
            assert!(y0.is_nan() && y1.is_nan());
        }
    }
}
