//! overlay_core: shared tracking-provider/hand-predictor interfaces.
//!
//! These types are framework-agnostic so collaborators (camera-backed
//! trackers, model runtimes, test fakes) can be implemented without pulling
//! in the Bevy runtime.

pub mod config;
pub mod error;
pub mod interfaces;

pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::interfaces::*;
}
