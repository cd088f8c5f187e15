//! Core module
//!
//! Error types and recovery hints shared by every layer.

pub mod error;

pub use error::{
    CommandError, ErrorRecovery, OsError, RecoveryAction, Result, TransparencyError,
};
