//! zlib-adler - Adler-32 校验和与 zlib 容器
//!
//! Streaming Adler-32 with scalar and vectorized engines, plus a small zlib
//! container framer around an external DEFLATE compressor.
//!
//! ## 功能
//!
//! - Adler-32 streaming checksum (RFC 1950)
//! - SSE2 / AVX2 / NEON engines selected at runtime
//! - Checksum combination and multi-threaded checksumming
//! - zlib container framing (`78 5e` + DEFLATE + big-endian adler32)
//!
//! ## 示例
//!
//! ```
//! use zlib_adler::{checksum, compress, decompress};
//!
//! assert_eq!(checksum(b"Wikipedia"), 0x11E6_0398);
//!
//! let container = compress(b"Wikipedia").unwrap();
//! assert_eq!(&container[container.len() - 4..], &[0x11, 0xE6, 0x03, 0x98]);
//! assert_eq!(decompress(&container).unwrap(), b"Wikipedia");
//! ```

pub mod adler32;
pub mod error;
pub mod parallel;
pub mod platform;
pub mod zlib;

// 重导出常用类型
pub use adler32::{
    checksum, checksum_reader, checksum_with, combine, Adler32, Engine, ADLER32_INIT,
    ENGINE_ENV, MOD, NMAX,
};
pub use error::{CompressionLevel, Result, ZlibError};
pub use parallel::{checksum_chunks, checksum_parallel, combine_checksums};
pub use zlib::{
    compress, compress_with, decompress, frame, Compressor, Container, Deflate, ZlibBuilder,
    ZlibOutput,
};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 当前平台信息
pub fn current_platform() -> &'static impl platform::Platform {
    platform::current_platform()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_current_platform() {
        let platform = current_platform();
        assert!(!platform.arch().is_empty());
    }
}
