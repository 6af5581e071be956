//! Pointer and wheel input mapped to camera actions.
//!
//! # Invariants
//! - The camera consumes [`CameraInput`], never raw pointer events.
//! - Input only moves a camera whose control is attached to a region.

pub mod action;
pub mod pointer;

pub use action::CameraInput;
pub use pointer::PointerTracker;
