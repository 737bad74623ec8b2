// 公共测试辅助函数
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Interesting input lengths around stride, lane and reduction boundaries
pub const BOUNDARY_LENGTHS: [usize; 15] = [
    0, 1, 15, 16, 17, 31, 32, 33, 5535, 5536, 5537, 5551, 5552, 5553, 11104,
];

/// Deterministic pseudo-random bytes
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf[..]);
    buf
}

/// Independent adler32 implementation to check against
pub fn reference(data: &[u8]) -> u32 {
    adler2::adler32_slice(data)
}

/// Textbook byte-at-a-time adler32
pub fn naive(data: &[u8]) -> u32 {
    let (mut a, mut b) = (1u32, 0u32);
    for &byte in data {
        a = (a + byte as u32) % 65521;
        b = (b + a) % 65521;
    }
    (b << 16) | a
}
