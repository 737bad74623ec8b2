use super::{frame, Compressor, Deflate};
use crate::adler32::{Adler32, Engine};
use crate::error::{CompressionLevel, Result};

/// zlib builder options.
#[derive(Debug, Clone)]
pub struct ZlibBuilderOptions {
    pub compression_level: CompressionLevel,
    /// `None` uses the process-wide engine
    pub engine: Option<Engine>,
}

impl Default for ZlibBuilderOptions {
    fn default() -> Self {
        Self {
            compression_level: CompressionLevel::Level6,
            engine: None,
        }
    }
}

/// Result of a build: the container plus the numbers that went into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZlibOutput {
    pub output: Vec<u8>,
    pub checksum: u32,
    pub bytes_read: usize,
    pub bytes_written: usize,
}

/// Collects input and produces a zlib container.
///
/// ```
/// use zlib_adler::{CompressionLevel, ZlibBuilder};
///
/// let out = ZlibBuilder::new()
///     .compression_level(CompressionLevel::Level9)
///     .data(b"Wiki")
///     .data(b"pedia")
///     .build()
///     .unwrap();
/// assert_eq!(out.checksum, 0x11E6_0398);
/// assert_eq!(&out.output[..2], &[0x78, 0x5e]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ZlibBuilder {
    options: ZlibBuilderOptions,
    data: Vec<u8>,
}

impl ZlibBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compression_level(mut self, level: CompressionLevel) -> Self {
        self.options.compression_level = level;
        self
    }

    pub fn engine(mut self, engine: Engine) -> Self {
        self.options.engine = Some(engine);
        self
    }

    /// Append input bytes
    pub fn data(mut self, data: impl AsRef<[u8]>) -> Self {
        self.data.extend_from_slice(data.as_ref());
        self
    }

    pub fn options(&self) -> &ZlibBuilderOptions {
        &self.options
    }

    /// Compress with `miniz_oxide` at the configured level
    pub fn build(self) -> Result<ZlibOutput> {
        let deflate = Deflate::new(self.options.compression_level);
        self.build_with(&deflate)
    }

    /// Compress with a caller-supplied compressor
    pub fn build_with<C: Compressor + ?Sized>(self, compressor: &C) -> Result<ZlibOutput> {
        let body = compressor.compress(&self.data)?;

        let mut adler = Adler32::new();
        match self.options.engine {
            Some(engine) => adler.update_with(engine, &self.data),
            None => adler.update(&self.data),
        }
        let checksum = adler.finish();

        let output = frame(&body, checksum);
        log::debug!(
            "zlib: {} bytes in, {} bytes out, level {}",
            self.data.len(),
            output.len(),
            self.options.compression_level.as_u8()
        );

        Ok(ZlibOutput {
            bytes_read: self.data.len(),
            bytes_written: output.len(),
            checksum,
            output,
        })
    }
}
