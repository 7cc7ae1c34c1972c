#![allow(clippy::excessive_precision)]
#![allow(clippy::unusual_byte_groupings)]

mod cos;
mod kernel;
mod rem_pio2;
mod rem_pio2_large;
mod sin;
mod sincos;

pub use cos::cos;
pub use rem_pio2_large::{Limbs, MAX_E0, Precision, decompose, rem_pio2_large};
pub use sin::sin;
pub use sincos::sincos;

#[cfg(test)]
pub(crate) use rem_pio2::rem_pio2;

// ========= bit helpers =========

#[inline(always)]
fn f64_from_bits(u: u64) -> f64 {
    f64::from_bits(u)
}
#[inline(always)]
fn f64_to_bits(x: f64) -> u64 {
    x.to_bits()
}

#[inline(always)]
fn hi_word(x: f64) -> u32 {
    (f64_to_bits(x) >> 32) as u32
}
#[inline(always)]
fn lo_word(x: f64) -> u32 {
    (f64_to_bits(x) & 0xffff_ffffu64) as u32
}
#[inline(always)]
fn with_hi_lo(hi: u32, lo: u32) -> f64 {
    f64_from_bits(((hi as u64) << 32) | (lo as u64))
}

/// Biased exponent field of the high word, as it sits in bits 20..31.
#[inline(always)]
fn hi_exp(hi: u32) -> i32 {
    ((hi >> 20) & 0x7ff) as i32
}

#[inline(always)]
fn get_exp_bits(u: u64) -> i32 {
    ((u >> 52) & 0x7ff) as i32
}

/// scalbn(x, n): multiply by 2^n without calling any libm.
#[inline(always)]
fn scalbn(mut x: f64, n: i32) -> f64 {
    let ux = f64_to_bits(x);
    let e = get_exp_bits(ux);
    if e == 0 {
        if x == 0.0 {
            return x;
        }
        // normalize
        x *= f64_from_bits(0x4350_0000_0000_0000u64); // 2^54
        let uy = f64_to_bits(x);
        let ey = get_exp_bits(uy) - 54;
        let ne = ey + n;
        if ne <= 0 {
            if ne <= -53 {
                return 0.0 * x;
            }
            let mant = (uy & 0x000f_ffff_ffff_ffffu64) | 0x0010_0000_0000_0000u64;
            return f64_from_bits((uy & 0x8000_0000_0000_0000u64) | (mant >> (1 - ne) as u32));
        }
        if ne >= 0x7ff {
            return if x.is_sign_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }
        return f64_from_bits((uy & 0x800f_ffff_ffff_ffffu64) | ((ne as u64) << 52));
    }
    if e == 0x7ff {
        return x;
    }
    let ne = e + n;
    if ne <= 0 {
        if ne <= -52 {
            return 0.0 * x;
        }
        let mant = (ux & 0x000f_ffff_ffff_ffffu64) | 0x0010_0000_0000_0000u64;
        let shift = (1 - ne) as u32;
        let sub = mant >> shift;
        return f64_from_bits((ux & 0x8000_0000_0000_0000u64) | sub);
    }
    if ne >= 0x7ff {
        return if x.is_sign_negative() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    f64_from_bits((ux & 0x800f_ffff_ffff_ffffu64) | ((ne as u64) << 52))
}

/// floor(x) implemented via bit manipulation (no libm).
#[inline(always)]
fn floor_f64(x: f64) -> f64 {
    let u = f64_to_bits(x);
    let sx = u >> 63;
    let e = get_exp_bits(u);
    if e == 0x7ff {
        return x;
    } // NaN/Inf
    if e == 0 {
        // |x| < 2^-1022
        return if sx == 1 && (u << 1) != 0 { -1.0 } else { 0.0 };
    }
    let j0 = e - 1023;
    if j0 < 0 {
        // |x| < 1
        return if sx == 1 && x != 0.0 { -1.0 } else { 0.0 };
    }
    if j0 >= 52 {
        return x;
    }
    let mask = (1u64 << (52 - j0)) - 1;
    if (u & mask) == 0 {
        return x;
    }
    let mut ui = u & !mask;
    if sx == 1 {
        // negative: floor moves away from zero
        ui = ui.wrapping_add(1u64 << (52 - j0));
    }
    f64_from_bits(ui)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_round_trip_through_hi_lo() {
        let x = core::f64::consts::FRAC_PI_2;
        assert_eq!(hi_word(x), 0x3ff9_21fb);
        assert_eq!(lo_word(x), 0x5444_2d18);
        assert_eq!(with_hi_lo(hi_word(x), lo_word(x)).to_bits(), x.to_bits());
        assert_eq!(hi_exp(hi_word(x)), 0x3ff);
    }

    #[test]
    fn scalbn_handles_normal_subnormal_and_overflow() {
        assert_eq!(scalbn(1.0, 10), 1024.0);
        assert_eq!(scalbn(3.0, -1), 1.5);
        assert_eq!(scalbn(1.0, -1074), f64::from_bits(1));
        assert_eq!(scalbn(f64::from_bits(1), 1074), 1.0);
        assert_eq!(scalbn(1.0, 1024), f64::INFINITY);
        assert_eq!(scalbn(-1.0, 1024), f64::NEG_INFINITY);
        assert_eq!(scalbn(1.0, -1100), 0.0);
        assert_eq!(scalbn(0.0, 5).to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn floor_matches_integer_truncation_rules() {
        assert_eq!(floor_f64(2.5), 2.0);
        assert_eq!(floor_f64(-2.5), -3.0);
        assert_eq!(floor_f64(0.125), 0.0);
        assert_eq!(floor_f64(-0.125), -1.0);
        assert_eq!(floor_f64(7.0), 7.0);
        assert_eq!(floor_f64(1e300), 1e300);
    }
}
