//! Platform abstraction layer
//!
//! This module reports which SIMD instruction sets the running CPU supports,
//! behind a small trait with one implementation per target architecture.

/// SIMD capabilities relevant to the adler32 kernels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub sse2: bool,
    pub avx2: bool,
    pub neon: bool,
}

impl Capabilities {
    /// True when at least one vector kernel can run
    pub fn has_vector(&self) -> bool {
        self.sse2 || self.avx2 || self.neon
    }
}

/// Platform-specific operations trait
pub trait Platform {
    /// Target architecture name
    fn arch(&self) -> &'static str;

    /// Detect CPU capabilities at runtime
    fn capabilities(&self) -> Capabilities;
}

/// x86_64 platform implementation
#[cfg(target_arch = "x86_64")]
pub struct X86_64Platform;

#[cfg(target_arch = "x86_64")]
impl Platform for X86_64Platform {
    fn arch(&self) -> &'static str {
        "x86_64"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            sse2: std::arch::is_x86_feature_detected!("sse2"),
            avx2: std::arch::is_x86_feature_detected!("avx2"),
            neon: false,
        }
    }
}

/// aarch64 platform implementation
#[cfg(target_arch = "aarch64")]
pub struct Aarch64Platform;

#[cfg(target_arch = "aarch64")]
impl Platform for Aarch64Platform {
    fn arch(&self) -> &'static str {
        "aarch64"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            sse2: false,
            avx2: false,
            neon: std::arch::is_aarch64_feature_detected!("neon"),
        }
    }
}

/// Generic platform implementation for other architectures
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub struct GenericPlatform;

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
impl Platform for GenericPlatform {
    fn arch(&self) -> &'static str {
        std::env::consts::ARCH
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }
}

/// Get the platform implementation for the current architecture
pub fn current_platform() -> &'static impl Platform {
    #[cfg(target_arch = "x86_64")]
    {
        static PLATFORM: X86_64Platform = X86_64Platform;
        &PLATFORM
    }

    #[cfg(target_arch = "aarch64")]
    {
        static PLATFORM: Aarch64Platform = Aarch64Platform;
        &PLATFORM
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        // Scalar only
        static PLATFORM: GenericPlatform = GenericPlatform;
        &PLATFORM
    }
}
