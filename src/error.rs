//! Error types for zlib-adler
//!
//! Checksumming itself never fails; these errors come from the compressor
//! collaborator, the container reader and configuration parsing.

use std::io;
use thiserror::Error;

/// Main error type for zlib-adler
#[derive(Error, Debug)]
pub enum ZlibError {
    /// The compressor collaborator failed
    #[error("compression failed: {reason}")]
    Compression { reason: String },

    /// The container body is not a valid DEFLATE stream
    #[error("decompression failed: {reason}")]
    Decompression { reason: String },

    /// Container does not start with the expected header
    #[error("invalid zlib header: expected 78 5e, found {:02x} {:02x}", .found[0], .found[1])]
    InvalidHeader { found: [u8; 2] },

    /// Container is shorter than header + trailer
    #[error("truncated zlib container: {len} bytes, need at least 6")]
    Truncated { len: usize },

    /// Trailer does not match the checksum of the decompressed data
    #[error("adler32 mismatch: trailer {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// Compression level outside 0-9
    #[error("invalid compression level {level}: must be 0-9")]
    InvalidLevel { level: u8 },

    /// Unknown engine name in configuration
    #[error("unknown adler32 engine '{name}'")]
    UnknownEngine { name: String },

    /// IO error with context
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Generic error
    #[error("{0}")]
    Generic(String),
}

impl ZlibError {
    /// Create a compression error
    pub fn compression(reason: impl Into<String>) -> Self {
        ZlibError::Compression {
            reason: reason.into(),
        }
    }

    /// Create a decompression error
    pub fn decompression(reason: impl Into<String>) -> Self {
        ZlibError::Decompression {
            reason: reason.into(),
        }
    }

    /// Create a generic error
    pub fn generic(msg: impl Into<String>) -> Self {
        ZlibError::Generic(msg.into())
    }
}

/// Result type for zlib-adler operations
pub type Result<T> = std::result::Result<T, ZlibError>;

/// Compression level (0-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum CompressionLevel {
    NoCompression = 0,
    Level1 = 1,
    Level2 = 2,
    Level3 = 3,
    Level4 = 4,
    Level5 = 5,
    #[default]
    Level6 = 6,
    Level7 = 7,
    Level8 = 8,
    Level9 = 9,
}

impl CompressionLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(level: u8) -> Option<Self> {
        match level {
            0 => Some(CompressionLevel::NoCompression),
            1 => Some(CompressionLevel::Level1),
            2 => Some(CompressionLevel::Level2),
            3 => Some(CompressionLevel::Level3),
            4 => Some(CompressionLevel::Level4),
            5 => Some(CompressionLevel::Level5),
            6 => Some(CompressionLevel::Level6),
            7 => Some(CompressionLevel::Level7),
            8 => Some(CompressionLevel::Level8),
            9 => Some(CompressionLevel::Level9),
            _ => None,
        }
    }
}

impl TryFrom<u8> for CompressionLevel {
    type Error = ZlibError;

    fn try_from(level: u8) -> Result<Self> {
        CompressionLevel::from_u8(level).ok_or(ZlibError::InvalidLevel { level })
    }
}
