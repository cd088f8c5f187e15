//! Alpha Controller
//!
//! Gets and sets the effective opacity of windows. Writes always go to the
//! OS; reads go through the backend chosen once at construction.

use std::sync::Arc;

use crate::core::error::Result;
use crate::os::{has_layered_bit, LayeredWindowApi, NativeHandle, LAYERED_STYLE_BIT};

use super::alpha::{Alpha, ALPHA_STEP};
use super::backend::{AlphaBackend, BackendKind, BackendSelector};

/// An opacity change, decoded once at the command boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaOperation {
    /// Set to an absolute value (clamped)
    SetTo(i64),
    /// Raise the current value by a step
    IncreaseBy(u8),
    /// Lower the current value by a step
    DecreaseBy(u8),
}

impl AlphaOperation {
    pub fn increase() -> Self {
        AlphaOperation::IncreaseBy(ALPHA_STEP)
    }

    pub fn decrease() -> Self {
        AlphaOperation::DecreaseBy(ALPHA_STEP)
    }
}

/// Alpha Controller
pub struct AlphaController {
    platform: Arc<dyn LayeredWindowApi>,
    backend: Box<dyn AlphaBackend>,
}

impl AlphaController {
    /// Create a controller, probing the OS version to pick the backend
    pub fn new(platform: Arc<dyn LayeredWindowApi>) -> Self {
        let kind = BackendSelector::detect(platform.as_ref());
        Self::with_backend(platform, kind)
    }

    /// Create a controller with a fixed backend
    pub fn with_backend(platform: Arc<dyn LayeredWindowApi>, kind: BackendKind) -> Self {
        Self {
            platform,
            backend: kind.into_backend(),
        }
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn platform(&self) -> &Arc<dyn LayeredWindowApi> {
        &self.platform
    }

    /// Clamp `requested`, make the window layered and apply the value.
    ///
    /// On failure the window keeps its previous opacity: a layered bit added
    /// by this call is removed again and the backend is not updated.
    pub fn set_alpha(&mut self, hwnd: NativeHandle, requested: i64) -> Result<Alpha> {
        let alpha = Alpha::clamped(requested);

        let style = self.platform.window_ex_style(hwnd)?;
        let added_layered = !has_layered_bit(style);
        if added_layered {
            self.platform
                .set_window_ex_style(hwnd, style | LAYERED_STYLE_BIT)?;
        }

        if let Err(e) = self.platform.set_layered_alpha(hwnd, alpha.get()) {
            tracing::warn!(hwnd, alpha = alpha.get(), "Applying alpha failed: {}", e);
            if added_layered {
                if let Err(restore) = self.platform.set_window_ex_style(hwnd, style) {
                    tracing::warn!(hwnd, "Restoring window style failed: {}", restore);
                }
            }
            return Err(e);
        }

        self.backend.record(hwnd, alpha);
        tracing::debug!(hwnd, requested, applied = alpha.get(), "Alpha applied");
        Ok(alpha)
    }

    /// Current alpha of the window as seen by the backend
    pub fn get_alpha(&mut self, hwnd: NativeHandle) -> Result<u8> {
        self.backend.read(self.platform.as_ref(), hwnd)
    }

    pub fn increase_alpha(&mut self, hwnd: NativeHandle) -> Result<Alpha> {
        self.apply(hwnd, AlphaOperation::increase())
    }

    pub fn decrease_alpha(&mut self, hwnd: NativeHandle) -> Result<Alpha> {
        self.apply(hwnd, AlphaOperation::decrease())
    }

    pub fn apply(&mut self, hwnd: NativeHandle, operation: AlphaOperation) -> Result<Alpha> {
        match operation {
            AlphaOperation::SetTo(value) => self.set_alpha(hwnd, value),
            AlphaOperation::IncreaseBy(step) => {
                let current = self.get_alpha(hwnd)? as i64;
                self.set_alpha(hwnd, current + step as i64)
            }
            AlphaOperation::DecreaseBy(step) => {
                let current = self.get_alpha(hwnd)? as i64;
                self.set_alpha(hwnd, current - step as i64)
            }
        }
    }

    /// Drop per-window state once the window is gone
    pub fn forget_window(&mut self, hwnd: NativeHandle) {
        self.backend.forget(hwnd);
    }
}
