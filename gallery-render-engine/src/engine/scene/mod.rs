//! Scene construction: static environment, particles, framed photos and the
//! focal model.

/// Lights and ground plane, plus the particle field, spawned at startup.
pub mod environment;

/// Seeded point-list particle field.
pub mod particles;

/// Framed photo planes built from resolved textures.
pub mod photo_planes;

/// Loaded glTF model with its looping clip, or the procedural placeholder.
pub mod model;

/// Dark and light palette for background and fog.
pub mod theme;
