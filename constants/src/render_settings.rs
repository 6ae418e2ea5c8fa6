use bevy::color::Color;
use bevy::math::Vec3;

pub const BACKGROUND_LIGHT: Color = Color::srgb(0.067, 0.067, 0.067);
pub const BACKGROUND_DARK: Color = Color::srgb(0.020, 0.020, 0.020);
pub const FOG_DENSITY: f32 = 0.05;

pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, 5.0);
pub const CAMERA_LOOK_AT: Vec3 = Vec3::new(0.0, 0.0, -3.0);

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 15.0;
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::PI / 1.5;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95;

// Lighting
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;
pub const DIRECTIONAL_ILLUMINANCE: f32 = 8_000.0;
pub const DIRECTIONAL_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const POINT_LIGHT_INTENSITY: f32 = 200_000.0;
pub const POINT_LIGHT_RANGE: f32 = 10.0;
pub const WARM_LIGHT_COLOR: Color = Color::srgb(1.000, 0.565, 0.000);
pub const WARM_LIGHT_POSITION: Vec3 = Vec3::new(2.0, 1.0, 2.0);
pub const COOL_LIGHT_COLOR: Color = Color::srgb(0.000, 0.471, 1.000);
pub const COOL_LIGHT_POSITION: Vec3 = Vec3::new(-2.0, 1.0, 2.0);

// Ground
pub const GROUND_SIZE: f32 = 100.0;
pub const GROUND_HEIGHT: f32 = -5.0;
pub const GROUND_COLOR: Color = Color::srgb(0.200, 0.200, 0.200);

// Frames and placeholder
pub const FRAME_COLOR: Color = Color::srgb(0.867, 0.867, 0.867);
pub const PLACEHOLDER_COLOR: Color = Color::srgb(0.533, 0.533, 0.533);

// Particle field
pub const PARTICLE_COUNT: usize = 2000;
pub const PARTICLE_SPREAD: f32 = 20.0;
pub const PARTICLE_SEED: u64 = 0x5eed_ca11;
pub const PARTICLE_OPACITY: f32 = 0.8;
