//! Read-back backends and their one-time selection
//!
//! Windows XP (5.1) and older silently lose layered attributes after a
//! resize, so reading them back from the OS returns garbage. On those
//! versions the last value written is remembered in-process instead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::os::{LayeredWindowApi, NativeHandle, OsVersion};

use super::alpha::Alpha;

/// Last OS version whose layered-attribute query is unreliable
pub const LEGACY_QUERY_THRESHOLD: OsVersion = OsVersion::new(5, 1);

/// Which backend reads alpha values back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Query the OS window-attribute store
    Direct,
    /// Remember the last applied value per window
    Cached,
}

impl BackendKind {
    pub fn into_backend(self) -> Box<dyn AlphaBackend> {
        match self {
            BackendKind::Direct => Box::new(DirectBackend),
            BackendKind::Cached => Box::new(CachedBackend::new()),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Direct => write!(f, "direct"),
            BackendKind::Cached => write!(f, "cached"),
        }
    }
}

/// Strategy for reading a window's current alpha
pub trait AlphaBackend: Send {
    fn kind(&self) -> BackendKind;

    /// Current alpha of the window
    fn read(&mut self, platform: &dyn LayeredWindowApi, hwnd: NativeHandle) -> Result<u8>;

    /// Called after a value has been applied successfully
    fn record(&mut self, hwnd: NativeHandle, applied: Alpha);

    /// Drop any state held for the window
    fn forget(&mut self, hwnd: NativeHandle);
}

/// Reads straight from the OS
#[derive(Debug, Default)]
pub struct DirectBackend;

impl AlphaBackend for DirectBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Direct
    }

    fn read(&mut self, platform: &dyn LayeredWindowApi, hwnd: NativeHandle) -> Result<u8> {
        let attributes = platform.layered_attributes(hwnd)?;
        if !attributes.flags_set {
            // Never made layered-transparent: implicitly opaque
            return Ok(Alpha::OPAQUE.get());
        }
        Ok(attributes.alpha)
    }

    fn record(&mut self, _hwnd: NativeHandle, _applied: Alpha) {}

    fn forget(&mut self, _hwnd: NativeHandle) {}
}

/// Reads from a per-window cache of the last applied value
#[derive(Debug, Default)]
pub struct CachedBackend {
    values: HashMap<NativeHandle, Alpha>,
}

impl CachedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of windows currently tracked
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AlphaBackend for CachedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Cached
    }

    fn read(&mut self, _platform: &dyn LayeredWindowApi, hwnd: NativeHandle) -> Result<u8> {
        Ok(self.values.entry(hwnd).or_insert(Alpha::OPAQUE).get())
    }

    fn record(&mut self, hwnd: NativeHandle, applied: Alpha) {
        self.values.insert(hwnd, applied);
    }

    fn forget(&mut self, hwnd: NativeHandle) {
        if self.values.remove(&hwnd).is_some() {
            tracing::debug!(hwnd, "Dropped cached alpha");
        }
    }
}

/// One-time decision between the direct and cached backends
pub struct BackendSelector;

impl BackendSelector {
    /// Backend for a given OS version (5.1 inclusive goes to cached)
    pub fn select(version: OsVersion) -> BackendKind {
        if version <= LEGACY_QUERY_THRESHOLD {
            BackendKind::Cached
        } else {
            BackendKind::Direct
        }
    }

    /// Probe the platform and pick a backend.
    ///
    /// A failed probe on a supported platform falls back to the direct
    /// backend, which is correct for every release after XP.
    pub fn detect(platform: &dyn LayeredWindowApi) -> BackendKind {
        match platform.os_version() {
            Ok(version) => {
                let kind = Self::select(version);
                tracing::info!(%version, backend = %kind, "Alpha backend selected");
                kind
            }
            Err(e) => {
                tracing::warn!("OS version probe failed, using direct backend: {}", e);
                BackendKind::Direct
            }
        }
    }
}
