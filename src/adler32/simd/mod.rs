//! Vectorized adler32 kernels.
//!
//! Every kernel consumes input in chunks of `CHUNK_SIZE` bytes, the largest
//! multiple of `LANE` not exceeding `NMAX`, and reduces once per chunk. For a
//! chunk of `n` lanes starting from `(s1, s2)`:
//!
//! ```text
//! s1' = s1 + sum(bytes)
//! s2' = s2 + LANE * n * s1 + LANE * sum(prefix_k) + sum((LANE - j) * byte[k][j])
//! ```
//!
//! where `prefix_k` is the byte total of lanes `0..k`. Bytes past the last
//! whole lane go through the scalar engine.

use super::NMAX;

#[cfg(target_arch = "aarch64")]
pub mod aarch64;
#[cfg(target_arch = "x86_64")]
pub mod x86_64;

/// Bytes per vector step
pub const LANE: usize = 32;

/// Lanes per reduction
pub const MAX_LANES: usize = NMAX / LANE;

/// Bytes per reduction
pub const CHUNK_SIZE: usize = MAX_LANES * LANE;

// Worst case for one chunk: reduced state, every byte 0xFF
const _: () = {
    const MAX_S: u64 = super::MOD as u64 - 1;
    const N: u64 = MAX_LANES as u64;
    const L: u64 = LANE as u64;
    const LANE_SUM: u64 = 255 * L;
    const PREFIX_SUM: u64 = LANE_SUM * N * (N - 1) / 2;
    const WEIGHTED: u64 = 255 * L * (L + 1) / 2 * N;
    assert!(MAX_S + L * N * MAX_S + L * PREFIX_SUM + WEIGHTED <= u32::MAX as u64);
    assert!(MAX_S + LANE_SUM * N <= u32::MAX as u64);
};

/// Kernel signature shared by scalar and vector engines
pub type Kernel = fn(u32, u32, &[u8]) -> (u32, u32);
