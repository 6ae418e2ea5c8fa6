//! Gallery data: photo descriptors, the JSON manifest, and the owned scene
//! context that records every constructed entity.

/// Photo descriptor records and Euler helpers.
pub mod photo_descriptor;

/// Gallery manifest loaded from JSON, with a built-in fallback.
pub mod gallery_manifest;

/// Scene context tracking photo planes, models and static scenery.
pub mod gallery_scene;
