//! Gallery camera: damped orbit controls and the focus transition that
//! flies the camera to a photo.

/// Orbit camera resource, camera spawn and input controller.
pub mod orbit_camera;

/// Eased focus tween toward a photo. The latest request wins.
pub mod focus;
