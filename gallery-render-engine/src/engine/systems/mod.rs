//! Per-frame runtime systems.

/// Idle drift of particles, models and photos.
pub mod idle_motion;

/// FPS notifications to the page and the native overlay readout.
pub mod fps_tracking;
