//! Host Commands
//!
//! Argument decoding for the single transparency command.

pub mod transparency;

pub use transparency::{args_from_cli, decode_operation, DEFAULT_OPT, OPT_KEY, VAL_KEY};
