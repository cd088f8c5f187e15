//! Transparency Plugin
//!
//! Entry points the editor host calls: the transparency command and the
//! window created/closed notifications.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::commands::decode_operation;
use crate::config::TransparencyConfig;
use crate::core::error::{CommandError, ErrorRecovery, OsError, RecoveryAction, Result, TransparencyError};
use crate::host::{EditorHost, Scheduler, WindowHandle};
use crate::os::{LayeredWindowApi, NativeHandle};
use crate::transparency::{Alpha, AlphaController, BaselineTask};

/// Transparency plugin
pub struct TransparencyPlugin {
    host: Arc<dyn EditorHost>,
    scheduler: Arc<dyn Scheduler>,
    config: TransparencyConfig,
    /// `None` on platforms without layered windows
    controller: Option<Arc<Mutex<AlphaController>>>,
    /// Native handles of windows seen so far, for cleanup on close
    tracked: Arc<Mutex<HashMap<WindowHandle, NativeHandle>>>,
}

impl TransparencyPlugin {
    pub fn new(
        host: Arc<dyn EditorHost>,
        platform: Arc<dyn LayeredWindowApi>,
        scheduler: Arc<dyn Scheduler>,
        config: TransparencyConfig,
    ) -> Self {
        let controller = if platform.is_supported() {
            let controller = match config.backend_override {
                Some(kind) => {
                    tracing::info!(backend = %kind, "Alpha backend pinned by configuration");
                    AlphaController::with_backend(platform, kind)
                }
                None => AlphaController::new(platform),
            };
            Some(Arc::new(Mutex::new(controller)))
        } else {
            tracing::info!("Layered windows not supported on {}, plugin inert", std::env::consts::OS);
            None
        };

        Self {
            host,
            scheduler,
            config,
            controller,
            tracked: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.controller.is_some()
    }

    pub fn controller(&self) -> Option<&Arc<Mutex<AlphaController>>> {
        self.controller.as_ref()
    }

    /// Run the transparency command against the active window.
    ///
    /// Errors are logged and, where the user needs to know, shown through
    /// the host before being returned.
    pub fn run_command(&self, args: &Map<String, Value>) -> Result<Alpha> {
        let result = self.try_run_command(args);
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    fn try_run_command(&self, args: &Map<String, Value>) -> Result<Alpha> {
        let controller = self.controller.as_ref().ok_or_else(OsError::unsupported)?;
        let operation = decode_operation(args)?;

        let window = self.host.active_window().ok_or(CommandError::NoTargetWindow)?;
        let hwnd = self.resolve(window)?;

        let applied = controller.lock().apply(hwnd, operation)?;
        tracing::info!(window = %window, ?operation, applied = applied.get(), "Transparency command applied");
        Ok(applied)
    }

    /// Schedule baseline opacity for a newly created window
    pub fn on_window_created(&self, window: WindowHandle) {
        let Some(controller) = &self.controller else {
            return;
        };
        if !self.config.auto_baseline {
            return;
        }

        let delay = self.config.settle_delay();
        let task = BaselineTask::new(window, self.host.clone(), controller.clone());
        let tracked = self.tracked.clone();
        self.scheduler.schedule_after(
            delay,
            Box::new(move || {
                if let Some(outcome) = task.run() {
                    tracked.lock().insert(window, outcome.hwnd);
                }
            }),
        );
        tracing::debug!(window = %window, delay_ms = delay.as_millis() as u64, "Baseline scheduled");
    }

    /// Drop state held for a closed window
    pub fn on_window_closed(&self, window: WindowHandle) {
        let Some(hwnd) = self.tracked.lock().remove(&window) else {
            return;
        };
        if let Some(controller) = &self.controller {
            controller.lock().forget_window(hwnd);
        }
        tracing::debug!(window = %window, hwnd, "Window state released");
    }

    fn resolve(&self, window: WindowHandle) -> Result<NativeHandle> {
        let hwnd = self.host.native_handle(window).ok_or_else(|| OsError::InvalidWindowHandle {
            reason: format!("{} has no native handle", window),
        })?;
        self.tracked.lock().insert(window, hwnd);
        Ok(hwnd)
    }

    fn report(&self, error: &TransparencyError) {
        match error.recovery_action() {
            RecoveryAction::NotifyUser => {
                tracing::warn!("Transparency command failed: {}", error);
                self.host.notify(&notice_for(error));
            }
            RecoveryAction::Skip => {
                tracing::warn!("Transparency command skipped: {}", error);
            }
        }
    }
}

fn notice_for(error: &TransparencyError) -> String {
    match error {
        TransparencyError::Os(OsError::PlatformNotSupported { .. }) => {
            "Window transparency is only available on Windows.".to_string()
        }
        other => format!("Window transparency: {}", other),
    }
}
