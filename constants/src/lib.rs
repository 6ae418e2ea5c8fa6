//! Shared gallery configuration: sample photo layout, model placement,
//! render settings and timings.

pub mod gallery;
pub mod render_settings;
pub mod timing;
