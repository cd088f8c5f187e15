//! Window transparency state machine
//!
//! - Alpha clamping to the usable range
//! - Direct and cached read-back backends, selected once by OS version
//! - The controller composing get/set into increase/decrease
//! - Baseline opacity for newly created windows

mod alpha;
mod auto;
mod backend;
mod controller;

#[cfg(test)]
mod tests;

pub use alpha::{Alpha, ALPHA_STEP, MAX_ALPHA, MIN_ALPHA};
pub use auto::{BaselineOutcome, BaselineTask, DEFAULT_SETTLE_DELAY};
pub use backend::{
    AlphaBackend, BackendKind, BackendSelector, CachedBackend, DirectBackend,
    LEGACY_QUERY_THRESHOLD,
};
pub use controller::{AlphaController, AlphaOperation};
