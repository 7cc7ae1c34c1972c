//! Payne–Hanek reduction for arguments too large for the pi/2 split constants.
//!
//! The input is carried as up to three 24-bit integer limbs scaled by `2^e0`.
//! They are multiplied by just enough 24-bit chunks of 2/pi to expose the
//! quadrant and the fractional part, and the fraction is then multiplied back
//! by pi/2.

#![allow(clippy::needless_range_loop)]

use super::{floor_f64, hi_word, lo_word, scalbn, with_hi_lo};

// 2/pi in 24-bit chunks
const TWO_OVER_PI: [u32; 66] = [
    0xa2f983, 0x6e4e44, 0x1529fc, 0x2757d1, 0xf534dd, 0xc0db62, 0x95993c, 0x439041, 0xfe5163,
    0xabdebb, 0xc561b7, 0x246e3a, 0x424dd2, 0xe00649, 0x2eea09, 0xd1921c, 0xfe1deb, 0x1cb129,
    0xa73ee8, 0x8235f5, 0x2ebb44, 0x84e99c, 0x7026b4, 0x5f7e41, 0x3991d6, 0x398353, 0x39f49c,
    0x845f8b, 0xbdf928, 0x3b1ff8, 0x97ffde, 0x05980f, 0xef2f11, 0x8b5a0a, 0x6d1f6d, 0x367ecf,
    0x27cb09, 0xb74f46, 0x3f669e, 0x5fea2d, 0x7527ba, 0xc7ebe5, 0xf17b3d, 0x0739f7, 0x8a5292,
    0xea6bfb, 0x5fb11f, 0x8d5d08, 0x560330, 0x46fc7b, 0x6babf0, 0xcfbc20, 0x9af436, 0x1da9e3,
    0x91615e, 0xe61b08, 0x659985, 0x5f14a0, 0x68408d, 0xffd880, 0x4d7327, 0x310606, 0x1556ca,
    0x73a8c9, 0x60e27b, 0xc08c6b,
];

// pi/2 in 24-bit chunks
const PIO2: [f64; 8] = [
    1.57079625129699707031e+00, // 0x3FF921FB, 0x40000000
    7.54978941586159635335e-08, // 0x3E74442D, 0x00000000
    5.39030252995776476554e-15, // 0x3CF84698, 0x80000000
    3.28200341580791294123e-22, // 0x3B78CC51, 0x60000000
    1.27065575308067607349e-29, // 0x39F01B83, 0x80000000
    1.22933308981111328932e-36, // 0x387A2520, 0x40000000
    2.73370053816464559624e-44, // 0x36E38222, 0x80000000
    2.16741683877804819444e-51, // 0x3569F31D, 0x00000000
];

const TWO24: f64 = 1.67772160000000000000e+07; // 2^24
const TWON24: f64 = 5.96046447753906250000e-08; // 2^-24

/// Largest `e0` the 2/pi table covers: ilogb(f64::MAX) - 23.
pub const MAX_E0: i32 = 1000;

/// Target precision of the reduced remainder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    /// 24 bits, one term.
    Single,
    /// 53 bits, two terms.
    Double,
    /// 64 bits, two terms.
    Extended,
    /// 113 bits, three terms.
    Quad,
}

impl Precision {
    /// Initial number of 2/pi chunks, minus one.
    const fn jk(self) -> usize {
        match self {
            Precision::Single => 3,
            Precision::Double | Precision::Extended => 4,
            Precision::Quad => 6,
        }
    }

    /// Number of doubles the remainder is returned in.
    pub const fn terms(self) -> usize {
        match self {
            Precision::Single => 1,
            Precision::Double | Precision::Extended => 2,
            Precision::Quad => 3,
        }
    }
}

/// Up to three 24-bit integer limbs, most significant first.
///
/// The last kept limb is never zero unless the whole input was.
#[derive(Clone, Copy, Debug)]
pub struct Limbs {
    tx: [f64; 3],
    nx: usize,
}

impl Limbs {
    /// Splits `z` in `[2^23, 2^24)` into limbs, dropping trailing zeros.
    pub fn split(mut z: f64) -> Self {
        let mut tx = [0.0f64; 3];
        for limb in tx.iter_mut().take(2) {
            *limb = (z as i32) as f64;
            z = (z - *limb) * TWO24;
        }
        tx[2] = z;

        let mut nx = 3;
        while nx > 1 && tx[nx - 1] == 0.0 {
            nx -= 1;
        }
        Limbs { tx, nx }
    }

    /// Number of kept limbs, 1 to 3.
    pub fn count(&self) -> usize {
        self.nx
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.tx[..self.nx]
    }
}

/// Limbs of `|x| * 2^-e0` together with `e0 = ilogb(x) - 23`.
///
/// Expects a finite `|x| >= 2^20`.
pub fn decompose(x: f64) -> (Limbs, i32) {
    let ix = (hi_word(x) & 0x7fff_ffff) as i32;
    let e0 = (ix >> 20) - 1046;
    let z = with_hi_lo((ix - (e0 << 20)) as u32, lo_word(x));
    (Limbs::split(z), e0)
}

#[inline(always)]
fn dot(x: &[f64], f: &[f64; 20], top: usize) -> f64 {
    let mut fw = 0.0;
    for (j, &xj) in x.iter().enumerate() {
        fw += xj * f[top - j];
    }
    fw
}

/// Reduces `sum x[i] * 2^(e0 - 24 i)` modulo pi/2.
///
/// Returns the low three bits of the quadrant count and the remainder split
/// into `prec.terms()` doubles; the remaining slots are zero.
///
/// `e0` is the exponent paired with the limbs by [`decompose`].
///
/// # Panics
///
/// If `e0 > MAX_E0`, which no finite double produces, or if the leading
/// limb is zero.
pub fn rem_pio2_large(limbs: &Limbs, e0: i32, prec: Precision) -> (i32, [f64; 3]) {
    let x = limbs.as_slice();
    assert!(e0 <= MAX_E0, "exponent {e0} is past the 2/pi table");
    assert!(x[0] != 0.0, "leading limb must be non-zero");
    let mut iq = [0i32; 20];
    let mut f = [0f64; 20];
    let mut fq = [0f64; 20];
    let mut q = [0f64; 20];

    let jk = prec.jk();
    let jp = jk;

    // determine jx, jv, q0; note that 3 > q0
    let jx = x.len() - 1;
    let jv = ((e0 - 3) / 24).max(0);
    let mut q0 = e0 - 24 * (jv + 1);
    let jv = jv as usize;

    // f[0..=jx+jk] where f[jx+jk] = TWO_OVER_PI[jv+jk]
    let mut j = jv as isize - jx as isize;
    for fi in f.iter_mut().take(jx + jk + 1) {
        *fi = if j < 0 {
            0.0
        } else {
            TWO_OVER_PI[j as usize] as f64
        };
        j += 1;
    }

    for i in 0..=jk {
        q[i] = dot(x, &f, jx + i);
    }

    let mut jz = jk;

    loop {
        // distill q[] into iq[] reversingly
        let mut z = q[jz];
        for (i, j) in (1..=jz).rev().enumerate() {
            let fw = ((TWON24 * z) as i32) as f64;
            iq[i] = (z - TWO24 * fw) as i32;
            z = q[j - 1] + fw;
        }

        // compute n
        z = scalbn(z, q0);
        z -= 8.0 * floor_f64(z * 0.125);
        let mut n = z as i32;
        z -= n as f64;

        let mut ih = 0;
        if q0 > 0 {
            // iq[jz-1] holds the integer bits below the binary point
            let i = iq[jz - 1] >> (24 - q0);
            n += i;
            iq[jz - 1] -= i << (24 - q0);
            ih = iq[jz - 1] >> (23 - q0);
        } else if q0 == 0 {
            ih = iq[jz - 1] >> 23;
        } else if z >= 0.5 {
            ih = 2;
        }

        if ih > 0 {
            // fraction > 0.5: use 1 - q
            n += 1;
            let mut carry = false;
            for v in iq.iter_mut().take(jz) {
                if carry {
                    *v = 0xff_ffff - *v;
                } else if *v != 0 {
                    carry = true;
                    *v = 0x100_0000 - *v;
                }
            }
            match q0 {
                1 => iq[jz - 1] &= 0x7f_ffff,
                2 => iq[jz - 1] &= 0x3f_ffff,
                _ => {}
            }
            if ih == 2 {
                z = 1.0 - z;
                if carry {
                    z -= scalbn(1.0, q0);
                }
            }
        }

        // an all-zero fraction needs more chunks of 2/pi
        if z == 0.0 && iq[jk..jz].iter().all(|&v| v == 0) {
            let mut k = 1;
            while k < jk && iq[jk - k] == 0 {
                k += 1;
            }
            for i in (jz + 1)..=(jz + k) {
                f[jx + i] = TWO_OVER_PI[jv + i] as f64;
                q[i] = dot(x, &f, jx + i);
            }
            jz += k;
            continue;
        }

        // chop off zero terms
        if z == 0.0 {
            jz -= 1;
            q0 -= 24;
            while iq[jz] == 0 {
                jz -= 1;
                q0 -= 24;
            }
        } else {
            // break z into 24-bit chunks if necessary
            z = scalbn(z, -q0);
            if z >= TWO24 {
                let fw = ((TWON24 * z) as i32) as f64;
                iq[jz] = (z - TWO24 * fw) as i32;
                jz += 1;
                q0 += 24;
                iq[jz] = fw as i32;
            } else {
                iq[jz] = z as i32;
            }
        }

        // convert integer chunks back to floating point
        let mut fw = scalbn(1.0, q0);
        for i in (0..=jz).rev() {
            q[i] = fw * (iq[i] as f64);
            fw *= TWON24;
        }

        // PIO2[0..=jp] * q[jz..=0]
        for i in (0..=jz).rev() {
            let mut fw = 0.0;
            for k in 0..=jp.min(jz - i) {
                fw += PIO2[k] * q[i + k];
            }
            fq[jz - i] = fw;
        }

        let sign = |v: f64| if ih == 0 { v } else { -v };
        let mut y = [0.0f64; 3];
        match prec {
            Precision::Single => {
                let fw = fq[..=jz].iter().rev().fold(0.0, |acc, &v| acc + v);
                y[0] = sign(fw);
            }
            Precision::Double | Precision::Extended => {
                let fw = fq[..=jz].iter().rev().fold(0.0, |acc, &v| acc + v);
                y[0] = sign(fw);
                let fw = fq[1..=jz].iter().fold(fq[0] - fw, |acc, &v| acc + v);
                y[1] = sign(fw);
            }
            Precision::Quad => {
                for i in (1..=jz).rev() {
                    let fw = fq[i - 1] + fq[i];
                    fq[i] += fq[i - 1] - fw;
                    fq[i - 1] = fw;
                }
                for i in (2..=jz).rev() {
                    let fw = fq[i - 1] + fq[i];
                    fq[i] += fq[i - 1] - fw;
                    fq[i - 1] = fw;
                }
                let fw = fq[2..=jz.max(1)]
                    .iter()
                    .rev()
                    .fold(0.0, |acc, &v| acc + v);
                y = [sign(fq[0]), sign(fq[1]), sign(fw)];
            }
        }
        return (n & 7, y);
    }
}
