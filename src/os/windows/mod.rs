//! Windows-specific OS integration
//!
//! This module provides Windows-specific implementations for:
//! - Layered window style and alpha control
//! - OS version probing

pub mod layered;
pub mod version;

pub use layered::WindowsLayeredApi;
