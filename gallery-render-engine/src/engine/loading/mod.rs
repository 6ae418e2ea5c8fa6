//! Asset loading for the gallery.
//!
//! The manifest resolves first, then the model and every photo texture load
//! independently. Progress feeds a single gate that hides the loading screen
//! once, whichever trigger comes first.

/// Gallery manifest loading with the built-in fallback.
pub mod manifest_loader;

/// Existence check for the model asset ahead of the full glTF load.
pub mod model_probe;

/// Model slot state machine: loaded model or placeholder, never both.
pub mod model_loader;

/// Per-photo texture loading. A failed texture leaves its photo out.
pub mod photo_loader;

/// Loading progress tracking across model and photos.
pub mod progress;

/// Hide-once gate with the loading ceiling timer.
pub mod loading_gate;

/// Loading screen fade sequence, on the page and in-engine.
pub mod loading_screen;
