//! Windows Layered Window API
//!
//! Thin wrappers over the Win32 calls that control layered-window opacity.
//! Every BOOL-returning call is checked; failures become
//! `OsError::PlatformCallFailed` naming the call.

use windows::Win32::Foundation::{SetLastError, COLORREF, HWND, WIN32_ERROR};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetLayeredWindowAttributes, GetWindowLongW, IsWindow,
    SetLayeredWindowAttributes, SetWindowLongW, GWL_EXSTYLE, LAYERED_WINDOW_ATTRIBUTES_FLAGS,
    LWA_ALPHA,
};

use crate::core::error::{OsError, Result};
use crate::os::{
    has_layered_bit, LayeredAttributes, LayeredWindowApi, NativeHandle, OsVersion,
    CALL_GET_ALPHA, CALL_GET_STYLE, CALL_SET_ALPHA, CALL_SET_STYLE,
};

use super::version;

/// Windows layered window API
#[derive(Debug, Default)]
pub struct WindowsLayeredApi;

impl WindowsLayeredApi {
    /// Create a new Windows layered window API
    pub fn new() -> Self {
        Self
    }

    fn hwnd(handle: NativeHandle) -> Result<HWND> {
        if handle == 0 {
            return Err(OsError::InvalidWindowHandle {
                reason: "null window handle".to_string(),
            }
            .into());
        }
        Ok(HWND(handle as isize))
    }
}

/// Fails if the thread's last error is set.
///
/// `GetWindowLongW` and `SetWindowLongW` return 0 both on failure and when the
/// previous value was 0, so the last error is the only reliable signal.
fn check_last_error(call: &'static str) -> Result<()> {
    let err = windows::core::Error::from_win32();
    if err.code().is_err() {
        return Err(OsError::call_failed(call, err.message().to_string()).into());
    }
    Ok(())
}

impl LayeredWindowApi for WindowsLayeredApi {
    fn is_supported(&self) -> bool {
        true
    }

    fn os_version(&self) -> Result<OsVersion> {
        version::probe()
    }

    fn is_window(&self, hwnd: NativeHandle) -> bool {
        if hwnd == 0 {
            return false;
        }
        unsafe { IsWindow(HWND(hwnd as isize)).as_bool() }
    }

    fn foreground_window(&self) -> Option<NativeHandle> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0 == 0 {
            None
        } else {
            Some(hwnd.0 as NativeHandle)
        }
    }

    fn window_ex_style(&self, hwnd: NativeHandle) -> Result<u32> {
        let hwnd = Self::hwnd(hwnd)?;
        unsafe {
            SetLastError(WIN32_ERROR(0));
            let style = GetWindowLongW(hwnd, GWL_EXSTYLE);
            if style == 0 {
                check_last_error(CALL_GET_STYLE)?;
            }
            Ok(style as u32)
        }
    }

    fn set_window_ex_style(&self, hwnd: NativeHandle, style: u32) -> Result<()> {
        let hwnd = Self::hwnd(hwnd)?;
        unsafe {
            SetLastError(WIN32_ERROR(0));
            let previous = SetWindowLongW(hwnd, GWL_EXSTYLE, style as i32);
            if previous == 0 {
                check_last_error(CALL_SET_STYLE)?;
            }
        }
        tracing::trace!(hwnd = ?hwnd, style = format_args!("{:#010x}", style), "Extended style written");
        Ok(())
    }

    fn set_layered_alpha(&self, hwnd: NativeHandle, alpha: u8) -> Result<()> {
        let hwnd = Self::hwnd(hwnd)?;
        unsafe {
            SetLayeredWindowAttributes(hwnd, COLORREF(0), alpha, LWA_ALPHA)
                .map_err(|e| OsError::call_failed(CALL_SET_ALPHA, e.message().to_string()))?;
        }
        Ok(())
    }

    fn layered_attributes(&self, hwnd: NativeHandle) -> Result<LayeredAttributes> {
        // Querying a window without the layered bit fails, which is the same
        // as "no attributes set".
        if !has_layered_bit(self.window_ex_style(hwnd)?) {
            return Ok(LayeredAttributes::default());
        }

        let hwnd = Self::hwnd(hwnd)?;
        let mut key = COLORREF(0);
        let mut alpha: u8 = 0;
        let mut flags = LAYERED_WINDOW_ATTRIBUTES_FLAGS(0);
        unsafe {
            GetLayeredWindowAttributes(
                hwnd,
                Some(&mut key as *mut COLORREF),
                Some(&mut alpha as *mut u8),
                Some(&mut flags as *mut LAYERED_WINDOW_ATTRIBUTES_FLAGS),
            )
            .map_err(|e| OsError::call_failed(CALL_GET_ALPHA, e.message().to_string()))?;
        }

        Ok(LayeredAttributes {
            alpha,
            flags_set: flags.0 != 0,
        })
    }
}
