//! Baseline opacity for newly created windows
//!
//! A new window is given the layered bit and full opacity once it has had
//! time to finish creation, so later increase/decrease steps start from a
//! known value.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::host::{EditorHost, WindowHandle};
use crate::os::NativeHandle;

use super::alpha::Alpha;
use super::controller::AlphaController;

/// Default settle delay after window creation
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// What a baseline run applied, and where
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineOutcome {
    pub hwnd: NativeHandle,
    pub alpha: Alpha,
}

/// Deferred baseline application for one window
pub struct BaselineTask {
    window: WindowHandle,
    host: Arc<dyn EditorHost>,
    controller: Arc<Mutex<AlphaController>>,
}

impl BaselineTask {
    pub fn new(
        window: WindowHandle,
        host: Arc<dyn EditorHost>,
        controller: Arc<Mutex<AlphaController>>,
    ) -> Self {
        Self {
            window,
            host,
            controller,
        }
    }

    /// Apply the baseline, or do nothing if the window is gone.
    pub fn run(self) -> Option<BaselineOutcome> {
        let Some(hwnd) = self.host.native_handle(self.window) else {
            tracing::debug!(window = %self.window, "Window closed before baseline, skipping");
            return None;
        };

        let mut controller = self.controller.lock();
        if !controller.platform().is_window(hwnd) {
            tracing::debug!(window = %self.window, hwnd, "Native window gone before baseline, skipping");
            return None;
        }

        match controller.set_alpha(hwnd, Alpha::OPAQUE.get() as i64) {
            Ok(alpha) => {
                tracing::debug!(window = %self.window, hwnd, "Baseline opacity applied");
                Some(BaselineOutcome { hwnd, alpha })
            }
            Err(e) => {
                tracing::warn!(window = %self.window, hwnd, "Baseline opacity failed: {}", e);
                None
            }
        }
    }
}
