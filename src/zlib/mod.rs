//! zlib container framing.
//!
//! A container is the fixed header `78 5e`, a raw DEFLATE body produced by
//! an external compressor, and the adler32 of the uncompressed data as a
//! big-endian trailer. The framer never inspects the body.

mod builder;

pub use builder::{ZlibBuilder, ZlibOutput};

use crate::adler32::{checksum, Adler32};
use crate::error::{CompressionLevel, Result, ZlibError};

/// CMF = deflate with a 32K window, FLG = level hint 1, no dictionary
pub const HEADER: [u8; 2] = [0x78, 0x5e];

/// Trailer length in bytes
pub const TRAILER_LEN: usize = 4;

// FCHECK: CMF*256 + FLG must be a multiple of 31
const _: () = assert!((HEADER[0] as u16 * 256 + HEADER[1] as u16) % 31 == 0);

/// DEFLATE compressor collaborator.
///
/// Takes the uncompressed bytes and returns a raw DEFLATE stream (no zlib
/// header or trailer).
pub trait Compressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

impl<F> Compressor for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>>,
{
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        self(data)
    }
}

/// Raw DEFLATE via `miniz_oxide`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deflate {
    pub level: CompressionLevel,
}

impl Deflate {
    pub fn new(level: CompressionLevel) -> Self {
        Self { level }
    }
}

impl Compressor for Deflate {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(miniz_oxide::deflate::compress_to_vec(data, self.level.as_u8()))
    }
}

/// Frame a compressed body.
///
/// Returns `78 5e ++ body ++ be32(checksum)`.
pub fn frame(body: &[u8], checksum: u32) -> Vec<u8> {
    let mut output = Vec::with_capacity(HEADER.len() + body.len() + TRAILER_LEN);
    output.extend_from_slice(&HEADER);
    output.extend_from_slice(body);
    output.extend_from_slice(&checksum.to_be_bytes());
    log::trace!("framed {} byte body, adler32 {:#010x}", body.len(), checksum);
    output
}

/// Compress with the default compressor and frame the result
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(&Deflate::default(), data)
}

/// Compress with `compressor` and frame the result.
///
/// A compressor error is returned unchanged and nothing is framed.
pub fn compress_with<C: Compressor + ?Sized>(compressor: &C, data: &[u8]) -> Result<Vec<u8>> {
    let body = compressor.compress(data)?;
    Ok(frame(&body, checksum(data)))
}

/// Borrowed view of a container's three parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container<'a> {
    pub header: [u8; 2],
    pub body: &'a [u8],
    pub checksum: u32,
}

impl<'a> Container<'a> {
    /// Split `bytes` into header, body and trailer.
    ///
    /// Checks the length and header bytes only; the body is not inflated.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < HEADER.len() + TRAILER_LEN {
            return Err(ZlibError::Truncated { len: bytes.len() });
        }

        let header = [bytes[0], bytes[1]];
        if header != HEADER {
            return Err(ZlibError::InvalidHeader { found: header });
        }

        let (rest, trailer) = bytes.split_at(bytes.len() - TRAILER_LEN);
        let checksum = u32::from_be_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);

        Ok(Self {
            header,
            body: &rest[HEADER.len()..],
            checksum,
        })
    }

    /// Inflate the body and check it against the trailer
    pub fn decompress(&self) -> Result<Vec<u8>> {
        let data = miniz_oxide::inflate::decompress_to_vec(self.body)
            .map_err(|e| ZlibError::decompression(format!("{:?}", e.status)))?;

        let mut adler = Adler32::new();
        adler.update(&data);
        let actual = adler.finish();
        if actual != self.checksum {
            return Err(ZlibError::ChecksumMismatch {
                expected: self.checksum,
                actual,
            });
        }
        Ok(data)
    }
}

/// Parse, inflate and verify a container
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    Container::parse(bytes)?.decompress()
}
