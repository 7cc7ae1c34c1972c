//! Reduced-range sine and cosine kernels.
//!
//! Both evaluate fdlibm minimax polynomials on |x| <= pi/4 where the argument
//! is carried as a head/tail pair `x + y` produced by the range reducer.

use super::{hi_word, with_hi_lo};

// __kernel_sin coefficients (fdlibm)
const S1: f64 = -1.66666666666666324348e-01; // 0xBFC55555, 0x55555549
const S2: f64 = 8.33333333332248946124e-03; // 0x3F811111, 0x1110F8A6
const S3: f64 = -1.98412698298579493134e-04; // 0xBF2A01A0, 0x19C161D5
const S4: f64 = 2.75573137070700676789e-06; // 0x3EC71DE3, 0x57B1FE7D
const S5: f64 = -2.50507602534068634195e-08; // 0xBE5AE5E6, 0x8A2B9CEB
const S6: f64 = 1.58969099521155010221e-10; // 0x3DE5D93A, 0x5ACFD57C

// __kernel_cos coefficients (fdlibm)
const C1: f64 = 4.16666666666666019037e-02; // 0x3FA55555, 0x5555554C
const C2: f64 = -1.38888888888741095749e-03; // 0xBF56C16C, 0x16C15177
const C3: f64 = 2.48015872894767294178e-05; // 0x3EFA01A0, 0x19CB1590
const C4: f64 = -2.75573143513906633035e-07; // 0xBE927E4F, 0x809C52AD
const C5: f64 = 2.08757232129817482790e-09; // 0x3E21EE9E, 0xBDB4B1C4
const C6: f64 = -1.13596475577881948265e-11; // 0xBDA8FAE9, 0xBE8838D4

/// Odd part of the sine series past the cubic term, in z = x^2.
#[inline(always)]
fn sin_poly(z: f64) -> f64 {
    S2 + z * (S3 + z * (S4 + z * (S5 + z * S6)))
}

/// z * (cos series past the quadratic term), in z = x^2.
#[inline(always)]
fn cos_poly(z: f64) -> f64 {
    z * (C1 + z * (C2 + z * (C3 + z * (C4 + z * (C5 + z * C6)))))
}

/// Below 2^-27 both series collapse onto their leading term.
#[inline(always)]
fn is_negligible(x: f64) -> bool {
    (hi_word(x) & 0x7fff_ffff) < 0x3e40_0000 && (x as i32) == 0
}

/// sin(x + y) for |x + y| <= pi/4.
///
/// With `high_precision` the tail `y` takes part in the final rounding; the
/// dispatcher sets it whenever the argument came out of the reducer.
#[inline(always)]
pub(super) fn k_sin(x: f64, y: f64, high_precision: bool) -> f64 {
    if is_negligible(x) {
        return x;
    }
    let z = x * x;
    let x3 = z * x;
    let r = sin_poly(z);
    if !high_precision {
        return x + x3 * (S1 + z * r);
    }
    // x + y + x3*(S1 + z*r) - y*z/2
    x - ((z * (0.5 * y - x3 * r) - y) - x3 * S1)
}

/// cos(x + y) for |x + y| <= pi/4.
#[inline(always)]
pub(super) fn k_cos(x: f64, y: f64) -> f64 {
    if is_negligible(x) {
        return 1.0;
    }
    let ix = hi_word(x) & 0x7fff_ffff;
    let z = x * x;
    let tail = cos_poly(z) * z - x * y;
    let hz = 0.5 * z;

    // Past 0.3, 1 - z/2 loses bits; peel off an exact qx first.
    let qx = match ix {
        0..0x3fd3_3333 => return 1.0 - (hz - tail),
        0x3fd3_3333..=0x3fe9_0000 => with_hi_lo(ix - 0x0020_0000, 0), // x/4, low word cleared
        _ => 0.28125,
    };
    (1.0 - qx) - ((hz - qx) - tail)
}
