//! SSE2 and AVX2 adler32 kernels.
//!
//! Both process 32-byte lanes. `psadbw` against zero gives the horizontal
//! byte sum for `s1`; the weighted sum for `s2` multiplies each byte by
//! `32 - offset` and widens to 32-bit lanes with `pmaddwd`.

use core::arch::x86_64::{
    __m128i, __m256i, _mm256_add_epi32, _mm256_castsi256_si128, _mm256_extracti128_si256,
    _mm256_loadu_si256, _mm256_madd_epi16, _mm256_maddubs_epi16, _mm256_sad_epu8,
    _mm256_set1_epi16, _mm256_set_epi8, _mm256_setzero_si256, _mm256_slli_epi32,
    _mm_add_epi32, _mm_cvtsi128_si32, _mm_cvtsi32_si128, _mm_loadu_si128, _mm_madd_epi16,
    _mm_sad_epu8, _mm_set_epi16, _mm_setzero_si128, _mm_shuffle_epi32, _mm_slli_epi32,
    _mm_unpackhi_epi64, _mm_unpackhi_epi8, _mm_unpacklo_epi8,
};

use super::{CHUNK_SIZE, LANE};
use crate::adler32::{scalar, MOD};

/// SSE2 entry point.
///
/// Only handed out by the dispatcher after `sse2` was detected.
pub(crate) fn update_sse2(s1: u32, s2: u32, data: &[u8]) -> (u32, u32) {
    unsafe { update_sse2_imp(s1, s2, data) }
}

/// AVX2 entry point.
///
/// Only handed out by the dispatcher after `avx2` was detected.
pub(crate) fn update_avx2(s1: u32, s2: u32, data: &[u8]) -> (u32, u32) {
    unsafe { update_avx2_imp(s1, s2, data) }
}

#[target_feature(enable = "sse2")]
unsafe fn update_sse2_imp(mut s1: u32, mut s2: u32, data: &[u8]) -> (u32, u32) {
    let mut chunks = data.chunks_exact(CHUNK_SIZE);
    for chunk in &mut chunks {
        sum_lanes_sse2(&mut s1, &mut s2, chunk);
        s1 %= MOD;
        s2 %= MOD;
    }

    let tail = sum_lanes_sse2(&mut s1, &mut s2, chunks.remainder());
    scalar::update(s1 % MOD, s2 % MOD, tail)
}

/// Fold every whole lane of `chunk` into the sums, returning the leftover
/// bytes. `chunk` holds at most `CHUNK_SIZE` bytes; the sums are left
/// unreduced.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn sum_lanes_sse2<'a>(s1: &mut u32, s2: &mut u32, chunk: &'a [u8]) -> &'a [u8] {
    debug_assert!(chunk.len() <= CHUNK_SIZE);

    let lanes = chunk.chunks_exact(LANE);
    let tail = lanes.remainder();
    let n = lanes.len() as u32;
    if n == 0 {
        return tail;
    }

    let zero = _mm_setzero_si128();
    // Weights 32..=17 for the first 16 bytes, 16..=1 for the second 16
    let w_lo_first = _mm_set_epi16(25, 26, 27, 28, 29, 30, 31, 32);
    let w_hi_first = _mm_set_epi16(17, 18, 19, 20, 21, 22, 23, 24);
    let w_lo_second = _mm_set_epi16(9, 10, 11, 12, 13, 14, 15, 16);
    let w_hi_second = _mm_set_epi16(1, 2, 3, 4, 5, 6, 7, 8);

    let mut p = _mm_cvtsi32_si128((*s1 * n) as i32);
    let mut a = _mm_setzero_si128();
    let mut b = _mm_setzero_si128();

    for lane in lanes {
        let ptr = lane.as_ptr() as *const __m128i;
        let first = _mm_loadu_si128(ptr);
        let second = _mm_loadu_si128(ptr.add(1));

        // Running total of the previous lanes, counted once per lane
        p = _mm_add_epi32(p, a);

        a = _mm_add_epi32(a, _mm_sad_epu8(first, zero));
        a = _mm_add_epi32(a, _mm_sad_epu8(second, zero));

        b = _mm_add_epi32(b, _mm_madd_epi16(_mm_unpacklo_epi8(first, zero), w_lo_first));
        b = _mm_add_epi32(b, _mm_madd_epi16(_mm_unpackhi_epi8(first, zero), w_hi_first));
        b = _mm_add_epi32(b, _mm_madd_epi16(_mm_unpacklo_epi8(second, zero), w_lo_second));
        b = _mm_add_epi32(b, _mm_madd_epi16(_mm_unpackhi_epi8(second, zero), w_hi_second));
    }

    // LANE == 32
    b = _mm_add_epi32(b, _mm_slli_epi32(p, 5));

    *s1 += hsum_128(a);
    *s2 += hsum_128(b);

    tail
}

#[target_feature(enable = "avx2")]
unsafe fn update_avx2_imp(mut s1: u32, mut s2: u32, data: &[u8]) -> (u32, u32) {
    let mut chunks = data.chunks_exact(CHUNK_SIZE);
    for chunk in &mut chunks {
        sum_lanes_avx2(&mut s1, &mut s2, chunk);
        s1 %= MOD;
        s2 %= MOD;
    }

    let tail = sum_lanes_avx2(&mut s1, &mut s2, chunks.remainder());
    scalar::update(s1 % MOD, s2 % MOD, tail)
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn sum_lanes_avx2<'a>(s1: &mut u32, s2: &mut u32, chunk: &'a [u8]) -> &'a [u8] {
    debug_assert!(chunk.len() <= CHUNK_SIZE);

    let lanes = chunk.chunks_exact(LANE);
    let tail = lanes.remainder();
    let n = lanes.len() as u32;
    if n == 0 {
        return tail;
    }

    let zero = _mm256_setzero_si256();
    let ones = _mm256_set1_epi16(1);
    #[rustfmt::skip]
    let weights = _mm256_set_epi8(
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16,
        17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32,
    );

    let mut p = _mm256_setzero_si256();
    let mut a = _mm256_setzero_si256();
    let mut b = _mm256_setzero_si256();

    for lane in lanes {
        let bytes = _mm256_loadu_si256(lane.as_ptr() as *const __m256i);

        p = _mm256_add_epi32(p, a);
        a = _mm256_add_epi32(a, _mm256_sad_epu8(bytes, zero));

        // u8 * i8 pairs fit in i16: 255 * (32 + 31) < 32768
        let pairs = _mm256_maddubs_epi16(bytes, weights);
        b = _mm256_add_epi32(b, _mm256_madd_epi16(pairs, ones));
    }

    b = _mm256_add_epi32(b, _mm256_slli_epi32(p, 5));

    *s2 += LANE as u32 * n * *s1 + hsum_256(b);
    *s1 += hsum_256(a);

    tail
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn hsum_128(v: __m128i) -> u32 {
    let sum = _mm_add_epi32(v, _mm_unpackhi_epi64(v, v));
    // 0b10_11_00_01 swaps adjacent 32-bit lanes
    let sum = _mm_add_epi32(sum, _mm_shuffle_epi32(sum, 0b10_11_00_01));
    _mm_cvtsi128_si32(sum) as u32
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn hsum_256(v: __m256i) -> u32 {
    let lo = _mm256_castsi256_si128(v);
    let hi = _mm256_extracti128_si256(v, 1);
    hsum_128(_mm_add_epi32(lo, hi))
}
