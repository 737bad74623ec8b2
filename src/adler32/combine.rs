//! Adler-32 combination.
//!
//! Given `adler(A)`, `adler(B)` and `len(B)`, computes `adler(A || B)` in
//! constant time. Every byte of `B` adds `s1_a - 1` to `s2` once more than it
//! would have starting from the initial state, hence the `len_b * (s1_a - 1)`
//! term.

use super::MOD;

/// Combine two adler32 checksums.
///
/// # Arguments
///
/// * `adler_a` - checksum of the first part
/// * `adler_b` - checksum of the second part
/// * `len_b` - length of the second part in bytes
pub fn combine(adler_a: u32, adler_b: u32, len_b: u64) -> u32 {
    let rem = (len_b % u64::from(MOD)) as u32;

    let s1_a = (adler_a & 0xffff) % MOD;
    let s2_a = (adler_a >> 16) % MOD;
    let s1_b = (adler_b & 0xffff) % MOD;
    let s2_b = (adler_b >> 16) % MOD;

    // rem < MOD and s1_a < MOD, product fits in 32 bits
    let mut s1 = s1_a + s1_b + MOD - 1;
    let mut s2 = (rem * s1_a) % MOD + s2_a + s2_b + MOD - rem;

    if s1 >= MOD {
        s1 -= MOD;
    }
    if s1 >= MOD {
        s1 -= MOD;
    }
    if s2 >= MOD << 1 {
        s2 -= MOD << 1;
    }
    if s2 >= MOD {
        s2 -= MOD;
    }

    (s2 << 16) | s1
}

#[cfg(test)]
mod tests {
    use super::super::scalar;
    use super::*;

    fn adler32(data: &[u8]) -> u32 {
        let (s1, s2) = scalar::update(1, 0, data);
        (s2 << 16) | s1
    }

    #[test]
    fn test_combine_with_empty() {
        let a = adler32(b"Wikipedia");
        assert_eq!(combine(a, adler32(b""), 0), a);
        assert_eq!(combine(adler32(b""), a, 9), a);
    }

    #[test]
    fn test_combine_splits() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i ^ (i >> 3)) as u8).collect();
        let expected = adler32(&data);
        for split in [0, 1, 9, 5551, 5552, 5553, 13_107, data.len()] {
            let (a, b) = data.split_at(split);
            assert_eq!(
                combine(adler32(a), adler32(b), b.len() as u64),
                expected,
                "split {split}"
            );
        }
    }

    #[test]
    fn test_combine_long_second_part() {
        // len_b larger than the modulus exercises the reduction of len_b
        let b = vec![0xA5u8; 3 * MOD as usize + 11];
        let a = b"prefix bytes";
        let mut joined = a.to_vec();
        joined.extend_from_slice(&b);
        assert_eq!(
            combine(adler32(a), adler32(&b), b.len() as u64),
            adler32(&joined)
        );
    }
}
