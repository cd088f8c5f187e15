//! Editor host boundary
//!
//! The editor that embeds this plugin owns windows, events and the event
//! loop. It is reached only through these traits.

mod scheduler;

pub use scheduler::{ScheduledTask, Scheduler, TokioScheduler};

use serde::{Deserialize, Serialize};

use crate::os::{LayeredWindowApi, NativeHandle};
use std::sync::Arc;

/// Host-side window identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub u64);

impl std::fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Services consumed from the editor host
pub trait EditorHost: Send + Sync {
    /// Window the next command applies to
    fn active_window(&self) -> Option<WindowHandle>;

    /// Native handle of a host window, `None` once the window is gone
    fn native_handle(&self, window: WindowHandle) -> Option<NativeHandle>;

    /// Show a notice to the user
    fn notify(&self, message: &str);
}

/// Host for the standalone binary: the foreground window is the only window.
///
/// Host and native handles are the same number.
pub struct ForegroundHost {
    platform: Arc<dyn LayeredWindowApi>,
}

impl ForegroundHost {
    pub fn new(platform: Arc<dyn LayeredWindowApi>) -> Self {
        Self { platform }
    }
}

impl EditorHost for ForegroundHost {
    fn active_window(&self) -> Option<WindowHandle> {
        self.platform
            .foreground_window()
            .map(|hwnd| WindowHandle(hwnd as u64))
    }

    fn native_handle(&self, window: WindowHandle) -> Option<NativeHandle> {
        let hwnd = window.0 as NativeHandle;
        self.platform.is_window(hwnd).then_some(hwnd)
    }

    fn notify(&self, message: &str) {
        eprintln!("{}", message);
    }
}
