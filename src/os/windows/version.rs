//! OS version probe

use windows::Win32::System::SystemInformation::{GetVersionExW, OSVERSIONINFOW};

use crate::core::error::{OsError, Result};
use crate::os::{OsVersion, CALL_GET_VERSION};

/// Read the running Windows version.
///
/// Without a compatibility manifest Windows 8.1 and later report 6.2, which
/// is still far above the legacy threshold.
pub fn probe() -> Result<OsVersion> {
    let mut info = OSVERSIONINFOW {
        dwOSVersionInfoSize: std::mem::size_of::<OSVERSIONINFOW>() as u32,
        ..Default::default()
    };

    unsafe {
        GetVersionExW(&mut info)
            .map_err(|e| OsError::call_failed(CALL_GET_VERSION, e.message().to_string()))?;
    }

    let version = OsVersion::new(info.dwMajorVersion, info.dwMinorVersion);
    tracing::debug!(%version, build = info.dwBuildNumber, "Windows version probed");
    Ok(version)
}
