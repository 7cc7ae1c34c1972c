//! sin(x) implementation.
//!
//! Let S and C denote sin and cos on [-pi/4, pi/4]. The argument is reduced
//! to `y0 + y1 = x - n*pi/2` and the quadrant `n & 3` picks the kernel:
//!
//! | n & 3 | sin(x) |
//! |-------|--------|
//! | 0     | S      |
//! | 1     | C      |
//! | 2     | -S     |
//! | 3     | -C     |
//!
//! sin(+-Inf) and sin(NaN) are NaN. The result is nearly rounded.

use super::hi_word;
use super::kernel::{k_cos, k_sin};
use super::rem_pio2::rem_pio2;

pub fn sin(x: f64) -> f64 {
    let ix = hi_word(x) & 0x7fff_ffff;

    // |x| ~<= pi/4
    if ix <= 0x3fe9_21fb {
        if ix < 0x3e50_0000 {
            // |x| < 2^-26
            if (x as i32) == 0 {
                return x;
            }
        }
        return k_sin(x, 0.0, false);
    }

    // sin(Inf or NaN) is NaN
    if ix >= 0x7ff0_0000 {
        return x - x;
    }

    let (n, y0, y1) = rem_pio2(x);
    match n & 3 {
        0 => k_sin(y0, y1, true),
        1 => k_cos(y0, y1),
        2 => -k_sin(y0, y1, true),
        _ => -k_cos(y0, y1),
    }
}
