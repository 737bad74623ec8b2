//! Engine selection.
//!
//! The fastest engine the CPU supports is resolved once per process and
//! cached. `ZLIB_ADLER_ENGINE` overrides the choice (`auto`, `scalar`,
//! `sse2`, `avx2`, `neon`); an unavailable or unknown value falls back to
//! automatic detection.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::scalar;
use super::simd::Kernel;
use crate::error::{Result, ZlibError};
use crate::platform::{current_platform, Capabilities, Platform};

/// Environment variable consulted on first use
pub const ENGINE_ENV: &str = "ZLIB_ADLER_ENGINE";

/// Adler32 implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    /// 16-byte-stride reference engine, always available
    Scalar,
    /// x86_64 SSE2, 32-byte lanes
    Sse2,
    /// x86_64 AVX2, 32-byte lanes
    Avx2,
    /// aarch64 NEON, 32-byte lanes
    Neon,
}

impl Engine {
    pub const ALL: [Engine; 4] = [Engine::Scalar, Engine::Sse2, Engine::Avx2, Engine::Neon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Scalar => "scalar",
            Engine::Sse2 => "sse2",
            Engine::Avx2 => "avx2",
            Engine::Neon => "neon",
        }
    }

    pub fn is_vectorized(&self) -> bool {
        !matches!(self, Engine::Scalar)
    }

    /// Whether the running CPU can execute this engine
    pub fn is_available(&self) -> bool {
        self.supported_by(&current_platform().capabilities())
    }

    fn supported_by(&self, caps: &Capabilities) -> bool {
        match self {
            Engine::Scalar => true,
            Engine::Sse2 => cfg!(target_arch = "x86_64") && caps.sse2,
            Engine::Avx2 => cfg!(target_arch = "x86_64") && caps.avx2,
            Engine::Neon => cfg!(target_arch = "aarch64") && caps.neon,
        }
    }

    /// Engines usable on this CPU, scalar first
    pub fn available() -> Vec<Engine> {
        let caps = current_platform().capabilities();
        Engine::ALL
            .into_iter()
            .filter(|engine| engine.supported_by(&caps))
            .collect()
    }

    /// Fastest engine supported by the running CPU
    pub fn detect() -> Engine {
        let caps = current_platform().capabilities();
        [Engine::Avx2, Engine::Neon, Engine::Sse2]
            .into_iter()
            .find(|engine| engine.supported_by(&caps))
            .unwrap_or(Engine::Scalar)
    }

    /// Process-wide engine, resolved on first call
    pub fn active() -> Engine {
        static ACTIVE: OnceLock<Engine> = OnceLock::new();
        *ACTIVE.get_or_init(|| {
            let engine = match std::env::var(ENGINE_ENV) {
                Ok(value) => from_env(&value),
                Err(_) => Engine::detect(),
            };
            log::debug!(
                "adler32 engine: {} (arch {})",
                engine,
                current_platform().arch()
            );
            engine
        })
    }

    /// Kernel for this engine, or `None` if the CPU lacks the feature
    pub fn kernel(&self) -> Option<Kernel> {
        if !self.is_available() {
            return None;
        }
        match self {
            Engine::Scalar => Some(scalar::update as Kernel),
            #[cfg(target_arch = "x86_64")]
            Engine::Sse2 => Some(super::simd::x86_64::update_sse2 as Kernel),
            #[cfg(target_arch = "x86_64")]
            Engine::Avx2 => Some(super::simd::x86_64::update_avx2 as Kernel),
            #[cfg(target_arch = "aarch64")]
            Engine::Neon => Some(super::simd::aarch64::update_neon as Kernel),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Kernel for this engine, falling back to scalar when unavailable
    pub(crate) fn kernel_or_scalar(&self) -> Kernel {
        match self.kernel() {
            Some(kernel) => kernel,
            None => {
                log::warn!("adler32 engine {} unavailable, using scalar", self);
                scalar::update
            }
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = ZlibError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(Engine::Scalar),
            "sse2" => Ok(Engine::Sse2),
            "avx2" => Ok(Engine::Avx2),
            "neon" => Ok(Engine::Neon),
            _ => Err(ZlibError::UnknownEngine { name: s.to_string() }),
        }
    }
}

/// Interpret the override variable
fn from_env(value: &str) -> Engine {
    if value.trim().is_empty() || value.trim().eq_ignore_ascii_case("auto") {
        return Engine::detect();
    }
    match value.parse::<Engine>() {
        Ok(engine) if engine.is_available() => engine,
        Ok(engine) => {
            log::warn!("{ENGINE_ENV}={value}: {engine} not supported by this CPU");
            Engine::detect()
        }
        Err(err) => {
            log::warn!("{ENGINE_ENV}: {err}");
            Engine::detect()
        }
    }
}
