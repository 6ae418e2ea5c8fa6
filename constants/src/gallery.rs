use bevy::math::Vec3;
use std::f32::consts::PI;

/// Photo entry baked into the binary, used when no manifest is available.
#[derive(Debug, Clone, Copy)]
pub struct SamplePhoto {
    pub url: &'static str,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

/// Manifest path relative to the asset root.
pub const MANIFEST_PATH: &str = "gallery/manifest.json";

/// Focal model path relative to the asset root.
pub const MODEL_PATH: &str = "models/sci-fi_sniper_rifle.glb";

pub const SAMPLE_PHOTOS: [SamplePhoto; 5] = [
    SamplePhoto {
        url: "photos/studio_camera.jpg",
        position: Vec3::new(-3.0, 1.5, -5.0),
        rotation: Vec3::new(0.0, PI * 0.1, 0.0),
        scale: Vec3::new(2.0, 1.5, 1.0),
    },
    SamplePhoto {
        url: "photos/portrait_smile.jpg",
        position: Vec3::new(2.0, 0.0, -4.0),
        rotation: Vec3::new(0.0, -PI * 0.15, 0.0),
        scale: Vec3::new(1.5, 2.0, 1.0),
    },
    SamplePhoto {
        url: "photos/portrait_studio.jpg",
        position: Vec3::new(-2.0, -1.0, -3.0),
        rotation: Vec3::new(0.0, PI * 0.08, 0.0),
        scale: Vec3::new(1.5, 2.0, 1.0),
    },
    SamplePhoto {
        url: "photos/portrait_outdoor.jpg",
        position: Vec3::new(3.0, -0.5, -6.0),
        rotation: Vec3::new(0.0, -PI * 0.1, 0.0),
        scale: Vec3::new(1.3, 1.7, 1.0),
    },
    SamplePhoto {
        url: "photos/portrait_fashion.jpg",
        position: Vec3::new(0.0, 1.0, -7.0),
        rotation: Vec3::new(0.0, 0.0, 0.0),
        scale: Vec3::new(1.8, 2.4, 1.0),
    },
];

// Loaded model placement
pub const MODEL_SCALE: f32 = 0.3;
pub const MODEL_POSITION: Vec3 = Vec3::new(1.5, -1.5, 0.0);
pub const MODEL_YAW: f32 = PI * 0.75;
pub const MODEL_ROUGHNESS: f32 = 0.6;
pub const MODEL_METALLIC: f32 = 0.8;

// Placeholder camera model used when the focal model is unavailable
pub const PLACEHOLDER_POSITION: Vec3 = Vec3::new(1.5, -1.5, 0.0);
pub const PLACEHOLDER_YAW: f32 = PI * 0.25;
pub const PLACEHOLDER_BODY_SIZE: Vec3 = Vec3::new(0.5, 0.5, 1.0);
pub const PLACEHOLDER_LENS_RADIUS: f32 = 0.2;
pub const PLACEHOLDER_LENS_LENGTH: f32 = 0.5;
pub const PLACEHOLDER_LENS_OFFSET_Z: f32 = 0.75;

// Photo frame geometry, in units of the photo height
pub const FRAME_BORDER: f32 = 0.05;
pub const FRAME_DEPTH: f32 = 0.1;
