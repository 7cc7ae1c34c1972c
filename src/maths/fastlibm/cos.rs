//! cos(x) implementation.
//!
//! Shares the range reducer and kernels with sin; the quadrant table is
//! C, -S, -C, S.

use super::hi_word;
use super::kernel::{k_cos, k_sin};
use super::rem_pio2::rem_pio2;

pub fn cos(x: f64) -> f64 {
    let ix = hi_word(x) & 0x7fff_ffff;

    // |x| ~<= pi/4
    if ix <= 0x3fe9_21fb {
        if ix < 0x3e46_a09e {
            // |x| < 2^-27 * sqrt(2)
            if (x as i32) == 0 {
                return 1.0;
            }
        }
        return k_cos(x, 0.0);
    }

    // cos(Inf or NaN) is NaN
    if ix >= 0x7ff0_0000 {
        return x - x;
    }

    let (n, y0, y1) = rem_pio2(x);
    match n & 3 {
        0 => k_cos(y0, y1),
        1 => -k_sin(y0, y1, true),
        2 => -k_cos(y0, y1),
        _ => k_sin(y0, y1, true),
    }
}
