//! Pointer tracking and per-frame photo picking.

/// Pointer position in normalised device coordinates.
pub mod pointer;

/// Ray intersection against photo rectangles.
pub mod ray;

/// Pointer ray, hover state with the edge-triggered cursor, click-to-focus.
pub mod picking;
