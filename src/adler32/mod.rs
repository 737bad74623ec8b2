//! Adler-32 checksum (RFC 1950).
//!
//! Two sums modulo 65521: `s1` is 1 plus the byte total, `s2` is the total of
//! every intermediate `s1`. The checksum is `(s2 << 16) | s1`.
//!
//! References:
//!
//! * <https://www.ietf.org/rfc/rfc1950.txt>
//! * <https://en.wikipedia.org/wiki/Adler-32>

mod combine;
mod engine;
pub mod scalar;
pub mod simd;

use std::io::{self, Read};

pub use combine::combine;
pub use engine::{Engine, ENGINE_ENV};

use crate::error::Result;

/// Largest prime smaller than 65536
pub const MOD: u32 = 65521;

/// Largest n such that 255n(n+1)/2 + (n+1)(MOD-1) <= 2^32-1
pub const NMAX: usize = 5552;

const fn worst_case(n: u64) -> u64 {
    255 * n * (n + 1) / 2 + (n + 1) * (MOD as u64 - 1)
}

const _: () = {
    assert!(worst_case(NMAX as u64) <= u32::MAX as u64);
    assert!(worst_case(NMAX as u64 + 1) > u32::MAX as u64);
};

/// Initial checksum of the empty input
pub const ADLER32_INIT: u32 = 1;

/// Streaming adler32 state.
///
/// ```
/// use zlib_adler::Adler32;
///
/// let mut adler = Adler32::new();
/// adler.update(b"Wiki");
/// adler.update(b"pedia");
/// assert_eq!(adler.finish(), 0x11E6_0398);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adler32 {
    s1: u32,
    s2: u32,
}

impl Default for Adler32 {
    fn default() -> Self {
        Self { s1: 1, s2: 0 }
    }
}

impl Adler32 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously finished checksum.
    ///
    /// Both halves are reduced modulo `MOD`, so out-of-range values continue
    /// the same sequence as zlib would.
    pub fn from_checksum(checksum: u32) -> Self {
        Self {
            s1: (checksum & 0xffff) % MOD,
            s2: (checksum >> 16) % MOD,
        }
    }

    /// Feed bytes using the process-wide engine
    pub fn update(&mut self, data: &[u8]) {
        self.update_with(Engine::active(), data);
    }

    /// Feed bytes using a specific engine; unavailable engines fall back to
    /// the scalar one
    pub fn update_with(&mut self, engine: Engine, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        let (s1, s2) = engine.kernel_or_scalar()(self.s1, self.s2, data);
        self.s1 = s1;
        self.s2 = s2;
    }

    /// Checksum of everything fed so far. Does not reset the state.
    pub fn finish(&self) -> u32 {
        (self.s2 << 16) | self.s1
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// State of `self`'s input followed by `other`'s input of `other_len` bytes
    pub fn combine(&self, other: &Adler32, other_len: u64) -> Adler32 {
        Adler32::from_checksum(combine(self.finish(), other.finish(), other_len))
    }

    /// Component sums `(s1, s2)`
    pub fn sums(&self) -> (u32, u32) {
        (self.s1, self.s2)
    }
}

impl io::Write for Adler32 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Adler32 of a byte slice
pub fn checksum(data: &[u8]) -> u32 {
    let mut adler = Adler32::new();
    adler.update(data);
    adler.finish()
}

/// Adler32 of a byte slice with a specific engine
pub fn checksum_with(engine: Engine, data: &[u8]) -> u32 {
    let mut adler = Adler32::new();
    adler.update_with(engine, data);
    adler.finish()
}

/// Adler32 of everything a reader yields until EOF
pub fn checksum_reader<R: Read>(mut reader: R) -> Result<u32> {
    let mut adler = Adler32::new();
    io::copy(&mut reader, &mut adler)?;
    Ok(adler.finish())
}
