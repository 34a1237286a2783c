//! Detecting which components are already installed.
//!
//! Detection is read-only and always runs to completion before anything is
//! installed. Its result, a [`PresenceSnapshot`], is the only source dispatchers
//! consult when deciding whether to skip a component.

pub mod detector;
pub mod snapshot;

pub use detector::Detector;
pub use snapshot::{Presence, PresenceSnapshot};
