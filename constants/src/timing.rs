/// Loading indicator is force-hidden after this many seconds.
pub const LOADING_CEILING_SECS: f32 = 10.0;

/// Delay between a hide trigger and the start of the fade.
pub const LOADING_FADE_DELAY_SECS: f32 = 1.0;

/// Fade-out length before the indicator leaves the layout.
pub const LOADING_FADE_SECS: f32 = 0.5;

/// Camera focus transition length.
pub const FOCUS_DURATION_SECS: f32 = 1.5;

/// Distance the camera settles in front of a focused photo.
pub const FOCUS_DISTANCE: f32 = 2.0;

// Idle motion, in radians per frame
pub const PARTICLE_SPIN_PER_FRAME: f32 = 0.0003;
pub const MODEL_SPIN_PER_FRAME: f32 = 0.002;
pub const PHOTO_SWAY_PER_FRAME: f32 = 0.0005;
pub const PHOTO_SWAY_FREQUENCY: f32 = 0.5;

/// Interval between frame-rate notifications to the page.
pub const FPS_NOTIFY_INTERVAL_SECS: f32 = 0.5;
