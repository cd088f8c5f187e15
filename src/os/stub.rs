//! Stub layered window API for non-Windows platforms
//!
//! Layered windows are a Win32 concept; everywhere else the controller is
//! inert and every call reports `PlatformNotSupported`.

use crate::core::error::{OsError, Result};
use crate::os::{LayeredAttributes, LayeredWindowApi, NativeHandle, OsVersion};

/// Stub layered window API
#[derive(Debug, Default)]
pub struct StubLayeredApi;

impl StubLayeredApi {
    pub fn new() -> Self {
        Self
    }
}

impl LayeredWindowApi for StubLayeredApi {
    fn is_supported(&self) -> bool {
        false
    }

    fn os_version(&self) -> Result<OsVersion> {
        Err(OsError::unsupported().into())
    }

    fn is_window(&self, _hwnd: NativeHandle) -> bool {
        false
    }

    fn foreground_window(&self) -> Option<NativeHandle> {
        None
    }

    fn window_ex_style(&self, _hwnd: NativeHandle) -> Result<u32> {
        Err(OsError::unsupported().into())
    }

    fn set_window_ex_style(&self, _hwnd: NativeHandle, _style: u32) -> Result<()> {
        Err(OsError::unsupported().into())
    }

    fn set_layered_alpha(&self, _hwnd: NativeHandle, _alpha: u8) -> Result<()> {
        tracing::warn!("Layered window opacity not supported on this platform");
        Err(OsError::unsupported().into())
    }

    fn layered_attributes(&self, _hwnd: NativeHandle) -> Result<LayeredAttributes> {
        Err(OsError::unsupported().into())
    }
}
