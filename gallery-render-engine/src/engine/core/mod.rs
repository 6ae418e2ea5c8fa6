//! Application setup and lifecycle.
//!
//! Builds the Bevy app, orders the per-frame systems and checks the host can
//! render at all before anything starts.

/// App construction, plugin configuration and system ordering.
pub mod app_setup;

/// Loading and running states.
pub mod app_state;

/// Up-front capability probe and the failure path that dismisses the
/// loading screen.
pub mod capability;

/// Platform-specific window configuration for native and WASM builds.
///
/// Binds to the page canvas on web targets.
pub mod window_config;
