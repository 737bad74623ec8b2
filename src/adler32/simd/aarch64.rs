//! NEON adler32 kernel.
//!
//! 32-byte lanes. Pairwise widening adds fold each lane into `s1`, per-column
//! 16-bit sums are kept across the chunk and multiplied by the descending
//! weights once at the end with `umlal`.

use core::arch::aarch64::{
    uint16x4_t, uint16x8_t, uint32x4_t, vaddq_u32, vaddvq_u32, vaddw_u8, vdupq_n_u16,
    vdupq_n_u32, vget_high_u16, vget_high_u8, vget_low_u16, vget_low_u8, vld1_u16, vld1q_u8,
    vmlal_u16, vpadalq_u16, vpadalq_u8, vpaddlq_u8, vsetq_lane_u32, vshlq_n_u32,
};

use super::{CHUNK_SIZE, LANE};
use crate::adler32::{scalar, MOD};

/// Weight for byte `j` of a lane is `32 - j`
#[rustfmt::skip]
static WEIGHTS: [u16; LANE] = [
    32, 31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17,
    16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1,
];

/// NEON entry point.
///
/// Only handed out by the dispatcher after `neon` was detected.
pub(crate) fn update_neon(s1: u32, s2: u32, data: &[u8]) -> (u32, u32) {
    unsafe { update_neon_imp(s1, s2, data) }
}

#[target_feature(enable = "neon")]
unsafe fn update_neon_imp(mut s1: u32, mut s2: u32, data: &[u8]) -> (u32, u32) {
    let mut chunks = data.chunks_exact(CHUNK_SIZE);
    for chunk in &mut chunks {
        sum_lanes(&mut s1, &mut s2, chunk);
        s1 %= MOD;
        s2 %= MOD;
    }

    let tail = sum_lanes(&mut s1, &mut s2, chunks.remainder());
    scalar::update(s1 % MOD, s2 % MOD, tail)
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn sum_lanes<'a>(s1: &mut u32, s2: &mut u32, chunk: &'a [u8]) -> &'a [u8] {
    debug_assert!(chunk.len() <= CHUNK_SIZE);

    let lanes = chunk.chunks_exact(LANE);
    let tail = lanes.remainder();
    let n = lanes.len() as u32;
    if n == 0 {
        return tail;
    }

    let mut p: uint32x4_t = vsetq_lane_u32::<3>(*s1 * n, vdupq_n_u32(0));
    let mut a: uint32x4_t = vdupq_n_u32(0);
    // At most NMAX / 32 lanes of 255, fits in u16
    let mut col_1: uint16x8_t = vdupq_n_u16(0);
    let mut col_2: uint16x8_t = vdupq_n_u16(0);
    let mut col_3: uint16x8_t = vdupq_n_u16(0);
    let mut col_4: uint16x8_t = vdupq_n_u16(0);

    for lane in lanes {
        let ptr = lane.as_ptr();
        let bytes_1 = vld1q_u8(ptr);
        let bytes_2 = vld1q_u8(ptr.add(16));

        p = vaddq_u32(p, a);
        a = vpadalq_u16(a, vpadalq_u8(vpaddlq_u8(bytes_1), bytes_2));

        col_1 = vaddw_u8(col_1, vget_low_u8(bytes_1));
        col_2 = vaddw_u8(col_2, vget_high_u8(bytes_1));
        col_3 = vaddw_u8(col_3, vget_low_u8(bytes_2));
        col_4 = vaddw_u8(col_4, vget_high_u8(bytes_2));
    }

    let mut b = vshlq_n_u32::<5>(p);

    let w = WEIGHTS.as_ptr();
    b = weighted(b, col_1, vld1_u16(w), vld1_u16(w.add(4)));
    b = weighted(b, col_2, vld1_u16(w.add(8)), vld1_u16(w.add(12)));
    b = weighted(b, col_3, vld1_u16(w.add(16)), vld1_u16(w.add(20)));
    b = weighted(b, col_4, vld1_u16(w.add(24)), vld1_u16(w.add(28)));

    *s1 += vaddvq_u32(a);
    *s2 += vaddvq_u32(b);

    tail
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn weighted(acc: uint32x4_t, cols: uint16x8_t, w_lo: uint16x4_t, w_hi: uint16x4_t) -> uint32x4_t {
    let acc = vmlal_u16(acc, vget_low_u16(cols), w_lo);
    vmlal_u16(acc, vget_high_u16(cols), w_hi)
}
