//! Window Transparency - per-window opacity control for editor windows
//!
//! This crate provides:
//! - Set, increase and decrease of a window's opacity within [150, 255]
//! - OS-version dependent read-back (direct query or an in-process cache)
//! - Baseline full opacity for newly created windows after a settle delay
//! - Persistent JSON configuration and structured logging

pub mod commands;
pub mod config;
pub mod core;
pub mod host;
pub mod logging;
pub mod os;
pub mod plugin;
pub mod transparency;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use crate::core::error::{Result, TransparencyError};
pub use config::{AppConfig, ConfigStore, TransparencyConfig};
pub use host::{EditorHost, Scheduler, WindowHandle};
pub use os::{LayeredWindowApi, NativeHandle, PlatformLayeredApi};
pub use plugin::TransparencyPlugin;
pub use transparency::{Alpha, AlphaController, AlphaOperation, BackendKind};
