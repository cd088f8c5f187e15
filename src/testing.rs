//! In-memory doubles for the platform and the editor host

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::core::error::{OsError, Result};
use crate::host::{EditorHost, ScheduledTask, Scheduler, WindowHandle};
use crate::os::{
    has_layered_bit, LayeredAttributes, LayeredWindowApi, NativeHandle, OsVersion,
    CALL_GET_ALPHA, CALL_GET_STYLE, CALL_SET_ALPHA, CALL_SET_STYLE,
};

/// Observable state of a fake window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FakeWindow {
    pub ex_style: u32,
    pub alpha: u8,
    pub attributes_set: bool,
}

#[derive(Default)]
struct FakeState {
    windows: HashMap<NativeHandle, FakeWindow>,
    foreground: Option<NativeHandle>,
    failing: HashSet<&'static str>,
    style_writes: usize,
    alpha_writes: usize,
    /// Query reports "no attributes" whatever was set, as XP does after a resize
    lost_attributes: bool,
}

/// Layered window API backed by a map of fake windows
pub struct FakeLayeredWindows {
    supported: bool,
    version: Option<OsVersion>,
    state: Mutex<FakeState>,
}

impl FakeLayeredWindows {
    pub fn new(version: OsVersion) -> Self {
        Self {
            supported: true,
            version: Some(version),
            state: Mutex::new(FakeState::default()),
        }
    }

    /// Platform whose version probe fails
    pub fn without_version() -> Self {
        Self {
            supported: true,
            version: None,
            state: Mutex::new(FakeState::default()),
        }
    }

    /// Platform without layered windows; windows exist but can't be touched
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::modern()
        }
    }

    pub fn modern() -> Self {
        Self::new(OsVersion::new(10, 0))
    }

    pub fn legacy() -> Self {
        Self::new(OsVersion::new(5, 1))
    }

    pub fn with_window(self, hwnd: NativeHandle) -> Self {
        self.open_window(hwnd);
        self
    }

    pub fn with_layered_window(self, hwnd: NativeHandle, alpha: u8) -> Self {
        self.state.lock().windows.insert(
            hwnd,
            FakeWindow {
                ex_style: crate::os::LAYERED_STYLE_BIT,
                alpha,
                attributes_set: true,
            },
        );
        self
    }

    pub fn open_window(&self, hwnd: NativeHandle) {
        let mut state = self.state.lock();
        state.windows.insert(hwnd, FakeWindow::default());
        state.foreground = Some(hwnd);
    }

    pub fn close_window(&self, hwnd: NativeHandle) {
        let mut state = self.state.lock();
        state.windows.remove(&hwnd);
        if state.foreground == Some(hwnd) {
            state.foreground = None;
        }
    }

    pub fn window(&self, hwnd: NativeHandle) -> Option<FakeWindow> {
        self.state.lock().windows.get(&hwnd).copied()
    }

    pub fn fail_call(&self, call: &'static str) {
        self.state.lock().failing.insert(call);
    }

    pub fn lose_attributes(&self) {
        self.state.lock().lost_attributes = true;
    }

    pub fn style_writes(&self) -> usize {
        self.state.lock().style_writes
    }

    pub fn alpha_writes(&self) -> usize {
        self.state.lock().alpha_writes
    }

    fn check(state: &FakeState, call: &'static str, hwnd: NativeHandle) -> Result<()> {
        if state.failing.contains(call) {
            return Err(OsError::call_failed(call, "access denied").into());
        }
        if !state.windows.contains_key(&hwnd) {
            return Err(OsError::call_failed(call, "invalid window handle").into());
        }
        Ok(())
    }
}

impl LayeredWindowApi for FakeLayeredWindows {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn os_version(&self) -> Result<OsVersion> {
        self.version
            .ok_or_else(|| OsError::call_failed(crate::os::CALL_GET_VERSION, "unavailable").into())
    }

    fn is_window(&self, hwnd: NativeHandle) -> bool {
        self.state.lock().windows.contains_key(&hwnd)
    }

    fn foreground_window(&self) -> Option<NativeHandle> {
        self.state.lock().foreground
    }

    fn window_ex_style(&self, hwnd: NativeHandle) -> Result<u32> {
        let state = self.state.lock();
        Self::check(&state, CALL_GET_STYLE, hwnd)?;
        Ok(state.windows[&hwnd].ex_style)
    }

    fn set_window_ex_style(&self, hwnd: NativeHandle, style: u32) -> Result<()> {
        let mut state = self.state.lock();
        Self::check(&state, CALL_SET_STYLE, hwnd)?;
        state.style_writes += 1;
        if let Some(window) = state.windows.get_mut(&hwnd) {
            window.ex_style = style;
        }
        Ok(())
    }

    fn set_layered_alpha(&self, hwnd: NativeHandle, alpha: u8) -> Result<()> {
        let mut state = self.state.lock();
        Self::check(&state, CALL_SET_ALPHA, hwnd)?;
        state.alpha_writes += 1;
        if let Some(window) = state.windows.get_mut(&hwnd) {
            window.alpha = alpha;
            window.attributes_set = true;
        }
        Ok(())
    }

    fn layered_attributes(&self, hwnd: NativeHandle) -> Result<LayeredAttributes> {
        let state = self.state.lock();
        Self::check(&state, CALL_GET_ALPHA, hwnd)?;
        let window = state.windows[&hwnd];
        if state.lost_attributes || !has_layered_bit(window.ex_style) || !window.attributes_set {
            return Ok(LayeredAttributes::default());
        }
        Ok(LayeredAttributes {
            alpha: window.alpha,
            flags_set: true,
        })
    }
}

/// Host whose windows map one-to-one onto fake native handles
pub struct RecordingHost {
    platform: Arc<FakeLayeredWindows>,
    active: Mutex<Option<WindowHandle>>,
    notices: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn new(platform: Arc<FakeLayeredWindows>) -> Self {
        Self {
            platform,
            active: Mutex::new(None),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn activate(&self, window: WindowHandle) {
        *self.active.lock() = Some(window);
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().clone()
    }
}

impl EditorHost for RecordingHost {
    fn active_window(&self) -> Option<WindowHandle> {
        *self.active.lock()
    }

    fn native_handle(&self, window: WindowHandle) -> Option<NativeHandle> {
        let hwnd = window.0 as NativeHandle;
        self.platform.is_window(hwnd).then_some(hwnd)
    }

    fn notify(&self, message: &str) {
        self.notices.lock().push(message.to_string());
    }
}

/// Scheduler that holds tasks until the test advances time
#[derive(Default)]
pub struct ManualScheduler {
    pending: Mutex<Vec<(Duration, ScheduledTask)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.pending.lock().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run every task whose delay has elapsed after `elapsed`
    pub fn advance(&self, elapsed: Duration) {
        let due: Vec<ScheduledTask> = {
            let mut pending = self.pending.lock();
            let (due, rest): (Vec<_>, Vec<_>) =
                pending.drain(..).partition(|(delay, _)| *delay <= elapsed);
            *pending = rest
                .into_iter()
                .map(|(delay, task)| (delay - elapsed, task))
                .collect();
            due.into_iter().map(|(_, task)| task).collect()
        };
        for task in due {
            task();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, task: ScheduledTask) {
        self.pending.lock().push((delay, task));
    }
}
