//! OS Integration Layer
//!
//! This module provides the platform calls the transparency controller needs:
//! - Reading and writing the extended window style (layered bit)
//! - Applying and querying layered-window alpha
//! - Probing the OS version
//! - Checking whether a native handle still names a window

#[cfg(windows)]
pub mod windows;

#[cfg(windows)]
pub use windows::WindowsLayeredApi as PlatformLayeredApi;

#[cfg(not(windows))]
pub mod stub;

#[cfg(not(windows))]
pub use stub::StubLayeredApi as PlatformLayeredApi;


use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Native window handle (an `HWND` on Windows)
pub type NativeHandle = usize;

/// Extended style bit that enables layered-window composition
pub const LAYERED_STYLE_BIT: u32 = 0x0008_0000;

/// Names of the platform calls, as reported in `PlatformCallFailed`
pub const CALL_GET_STYLE: &str = "GetWindowLongW";
pub const CALL_SET_STYLE: &str = "SetWindowLongW";
pub const CALL_SET_ALPHA: &str = "SetLayeredWindowAttributes";
pub const CALL_GET_ALPHA: &str = "GetLayeredWindowAttributes";
pub const CALL_GET_VERSION: &str = "GetVersionExW";

/// OS version (major.minor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
}

impl OsVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl std::fmt::Display for OsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Result of querying a window's layered attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayeredAttributes {
    /// Alpha byte reported by the OS
    pub alpha: u8,
    /// Whether any layered attribute flags are set
    pub flags_set: bool,
}

/// Returns true if the layered bit is present in `style`
pub fn has_layered_bit(style: u32) -> bool {
    style & LAYERED_STYLE_BIT != 0
}

/// Layered window API trait for cross-platform abstraction
pub trait LayeredWindowApi: Send + Sync {
    /// Whether this platform can apply layered-window opacity at all
    fn is_supported(&self) -> bool;

    /// Probe the OS version
    fn os_version(&self) -> Result<OsVersion>;

    /// Whether the handle still names an existing window
    fn is_window(&self, hwnd: NativeHandle) -> bool;

    /// Current foreground window, if any
    fn foreground_window(&self) -> Option<NativeHandle>;

    /// Read the extended style flags
    fn window_ex_style(&self, hwnd: NativeHandle) -> Result<u32>;

    /// Write the extended style flags
    fn set_window_ex_style(&self, hwnd: NativeHandle, style: u32) -> Result<()>;

    /// Apply a uniform alpha (alpha-blend mode, no colour key)
    fn set_layered_alpha(&self, hwnd: NativeHandle, alpha: u8) -> Result<()>;

    /// Query the layered attributes
    fn layered_attributes(&self, hwnd: NativeHandle) -> Result<LayeredAttributes>;
}
