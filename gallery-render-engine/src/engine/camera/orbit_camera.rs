use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::render_settings::*;
use std::f32::consts::TAU;

const MIN_POLAR: f32 = 1e-4;

#[derive(Component)]
pub struct GalleryCamera;

/// Damped orbit around a look-at target. Input accumulates into pending
/// deltas that bleed off over several frames.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub eye: Vec3,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_polar: f32,
    theta_delta: f32,
    phi_delta: f32,
    zoom_scale: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: CAMERA_LOOK_AT,
            eye: CAMERA_START,
            damping: ORBIT_DAMPING,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            max_polar: ORBIT_MAX_POLAR,
            theta_delta: 0.0,
            phi_delta: 0.0,
            zoom_scale: 1.0,
        }
    }
}

impl OrbitCamera {
    /// Queue a rotation. `delta` is the pointer drag in pixels, `viewport_height`
    /// scales it so a full-height drag is one revolution.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.theta_delta -= TAU * delta.x / viewport_height * ORBIT_ROTATE_SPEED;
        self.phi_delta -= TAU * delta.y / viewport_height * ORBIT_ROTATE_SPEED;
    }

    /// Queue a dolly. Positive steps move toward the target.
    pub fn dolly(&mut self, steps: f32) {
        self.zoom_scale *= ORBIT_ZOOM_STEP.powf(steps);
    }

    /// Jump to a pose, dropping any pending input.
    pub fn set_pose(&mut self, eye: Vec3, target: Vec3) {
        self.eye = eye;
        self.target = target;
        self.theta_delta = 0.0;
        self.phi_delta = 0.0;
        self.zoom_scale = 1.0;
    }

    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    #[cfg(test)]
    fn is_settled(&self) -> bool {
        self.theta_delta.abs() < 1e-6 && self.phi_delta.abs() < 1e-6 && self.zoom_scale == 1.0
    }

    /// One damped step: apply a fraction of the pending rotation, clamp polar
    /// angle and distance, and recompute the eye.
    pub fn update(&mut self) {
        let offset = self.eye - self.target;
        let radius = offset.length().max(f32::EPSILON);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.theta_delta * self.damping;
        phi = (phi + self.phi_delta * self.damping).clamp(MIN_POLAR, self.max_polar);
        let radius = (radius * self.zoom_scale).clamp(self.min_distance, self.max_distance);

        self.theta_delta *= 1.0 - self.damping;
        self.phi_delta *= 1.0 - self.damping;
        self.zoom_scale = 1.0;

        let sin_phi = phi.sin();
        self.eye = self.target
            + Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye).looking_at(self.target, Vec3::Y)
    }
}

pub fn spawn_gallery_camera(commands: &mut Commands, orbit: &OrbitCamera) -> Entity {
    commands
        .spawn((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: CAMERA_FOV_DEGREES.to_radians(),
                near: CAMERA_NEAR,
                far: CAMERA_FAR,
                ..default()
            }),
            Tonemapping::AcesFitted,
            DistanceFog {
                color: BACKGROUND_LIGHT,
                falloff: FogFalloff::Exponential {
                    density: FOG_DENSITY,
                },
                ..default()
            },
            orbit.transform(),
            GalleryCamera,
        ))
        .id()
}

/// Left drag rotates, the wheel dollies.
pub fn orbit_camera_controller(
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        if let Ok(window) = windows.single() {
            orbit.rotate(mouse_delta, window.height());
        }
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.dolly(scroll_accum);
    }

    orbit.update();
}

/// Write the orbit pose into the camera after controls and focus have run.
pub fn sync_camera_transform(
    orbit: Res<OrbitCamera>,
    mut camera_query: Query<&mut Transform, With<GalleryCamera>>,
) {
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    *transform = orbit.transform();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_without_input_keeps_the_pose() {
        let mut orbit = OrbitCamera::default();
        orbit.update();
        assert!((orbit.eye - CAMERA_START).length() < 1e-4);
        assert!(orbit.is_settled());
    }

    #[test]
    fn distance_is_clamped() {
        let mut orbit = OrbitCamera::default();
        orbit.dolly(-200.0);
        orbit.update();
        assert!((orbit.distance() - ORBIT_MAX_DISTANCE).abs() < 1e-3);

        orbit.dolly(500.0);
        orbit.update();
        assert!((orbit.distance() - ORBIT_MIN_DISTANCE).abs() < 1e-3);
    }

    #[test]
    fn rotation_is_damped_over_frames() {
        let mut orbit = OrbitCamera::default();
        orbit.rotate(Vec2::new(100.0, 0.0), 800.0);
        orbit.update();
        let first = orbit.eye;
        orbit.update();
        let second = orbit.eye;
        assert_ne!(first, CAMERA_START);
        assert_ne!(first, second);
        assert!(!orbit.is_settled());
        assert!((orbit.distance() - 8.0).abs() < 1e-3);
    }

    #[test]
    fn polar_angle_never_passes_the_limit() {
        let mut orbit = OrbitCamera::default();
        for _ in 0..200 {
            orbit.rotate(Vec2::new(0.0, -400.0), 800.0);
            orbit.update();
        }
        let offset = orbit.eye - orbit.target;
        let phi = (offset.y / offset.length()).acos();
        assert!(phi <= ORBIT_MAX_POLAR + 1e-4);
    }
}
