//! Scalar adler32 engine
//!
//! Byte-at-a-time accumulation unrolled over 16-byte strides, with `s1`/`s2`
//! reduced after every stride. Blocks are cut at `NMAX` so the bound holds
//! even if the stride reduction were dropped.

use super::{MOD, NMAX};

/// Bytes accumulated between reductions on the long path
pub const STRIDE: usize = 16;

// NMAX is a whole number of strides
const _: () = assert!(NMAX % STRIDE == 0);

/// Feed `data` into the component sums and return the reduced pair.
///
/// `s1` and `s2` must already be below `MOD`. Empty input returns the pair
/// unchanged.
pub fn update(mut s1: u32, mut s2: u32, data: &[u8]) -> (u32, u32) {
    if data.is_empty() {
        return (s1, s2);
    }

    // Short run: cannot overflow before a single reduction
    if data.len() < STRIDE {
        for &byte in data {
            s1 += u32::from(byte);
            s2 += s1;
        }
        return (s1 % MOD, s2 % MOD);
    }

    let mut blocks = data.chunks_exact(NMAX);
    for block in &mut blocks {
        for stride in block.chunks_exact(STRIDE) {
            accumulate_stride(&mut s1, &mut s2, stride);
        }
    }

    let rest = blocks.remainder();
    let mut strides = rest.chunks_exact(STRIDE);
    for stride in &mut strides {
        accumulate_stride(&mut s1, &mut s2, stride);
    }

    for &byte in strides.remainder() {
        s1 += u32::from(byte);
        s2 += s1;
    }

    (s1 % MOD, s2 % MOD)
}

/// 16 sequential steps, then one reduction.
#[inline(always)]
fn accumulate_stride(s1: &mut u32, s2: &mut u32, stride: &[u8]) {
    debug_assert_eq!(stride.len(), STRIDE);

    let mut a = *s1;
    let mut b = *s2;

    a += u32::from(stride[0]);
    b += a;
    a += u32::from(stride[1]);
    b += a;
    a += u32::from(stride[2]);
    b += a;
    a += u32::from(stride[3]);
    b += a;
    a += u32::from(stride[4]);
    b += a;
    a += u32::from(stride[5]);
    b += a;
    a += u32::from(stride[6]);
    b += a;
    a += u32::from(stride[7]);
    b += a;
    a += u32::from(stride[8]);
    b += a;
    a += u32::from(stride[9]);
    b += a;
    a += u32::from(stride[10]);
    b += a;
    a += u32::from(stride[11]);
    b += a;
    a += u32::from(stride[12]);
    b += a;
    a += u32::from(stride[13]);
    b += a;
    a += u32::from(stride[14]);
    b += a;
    a += u32::from(stride[15]);
    b += a;

    *s1 = a % MOD;
    *s2 = b % MOD;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adler32(data: &[u8]) -> u32 {
        let (s1, s2) = update(1, 0, data);
        (s2 << 16) | s1
    }

    /// Reduce after every byte; slow but obviously correct
    fn naive(data: &[u8]) -> u32 {
        let (mut s1, mut s2) = (1u32, 0u32);
        for &byte in data {
            s1 = (s1 + u32::from(byte)) % MOD;
            s2 = (s2 + s1) % MOD;
        }
        (s2 << 16) | s1
    }

    #[test]
    fn test_zeroes() {
        assert_eq!(adler32(&[]), 1);
        assert_eq!(adler32(&[0]), 1 | 1 << 16);
        assert_eq!(adler32(&[0, 0]), 1 | 2 << 16);
        assert_eq!(adler32(&[0; 100]), 0x0064_0001);
        assert_eq!(adler32(&[0; 1024]), 0x0400_0001);
        assert_eq!(adler32(&[0; 1024 * 1024]), 0x00F0_0001);
    }

    #[test]
    fn test_ones() {
        assert_eq!(adler32(&[0xFF; 1024]), 0x79A6_FC2E);
        assert_eq!(adler32(&[0xFF; 1024 * 1024]), 0x8E88_EF11);
    }

    #[test]
    fn test_wiki() {
        assert_eq!(adler32(b"Wikipedia"), 0x11E6_0398);
    }

    #[test]
    fn test_matches_naive_across_paths() {
        let data: Vec<u8> = (0..3 * NMAX + 77).map(|i| (i * 31 + 7) as u8).collect();
        for len in [0, 1, 15, 16, 17, 33, NMAX - 1, NMAX, NMAX + 1, 2 * NMAX, data.len()] {
            assert_eq!(adler32(&data[..len]), naive(&data[..len]), "len {len}");
        }
    }

    #[test]
    fn test_worst_case_state_does_not_overflow() {
        // Largest reduced state followed by the largest byte values
        let data = vec![0xFF; 4 * NMAX + 15];
        let (s1, s2) = update(MOD - 1, MOD - 1, &data);
        assert!(s1 < MOD && s2 < MOD);
    }
}
