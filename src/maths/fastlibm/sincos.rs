//! sin(x) and cos(x) from a single reduction.

use super::hi_word;
use super::kernel::{k_cos, k_sin};
use super::rem_pio2::rem_pio2;

pub fn sincos(x: f64) -> (f64, f64) {
    let ix = hi_word(x) & 0x7fff_ffff;

    // |x| ~<= pi/4
    if ix <= 0x3fe9_21fb {
        if ix < 0x3e46_a09e {
            // |x| < 2^-27 * sqrt(2)
            return (x, 1.0);
        }
        return (k_sin(x, 0.0, false), k_cos(x, 0.0));
    }

    if ix >= 0x7ff0_0000 {
        let nan = x - x;
        return (nan, nan);
    }

    let (n, y0, y1) = rem_pio2(x);
    let s = k_sin(y0, y1, true);
    let c = k_cos(y0, y1);
    match n & 3 {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    }
}
