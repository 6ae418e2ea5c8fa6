use bevy::math::curve::{Curve, EaseFunction};
use bevy::prelude::*;
use constants::timing::{FOCUS_DISTANCE, FOCUS_DURATION_SECS};
use std::time::Duration;

use crate::engine::assets::gallery_scene::GalleryScene;
use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::scene::photo_planes::PhotoGroup;
use crate::rpc::web_rpc::WebRpcInterface;

/// Camera eye and orbit look-at point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFocusTarget {
    pub eye: Vec3,
    pub look_at: Vec3,
}

impl CameraFocusTarget {
    /// Stand in front of a photo group, shifted against its yaw.
    pub fn for_photo(position: Vec3, yaw: f32) -> Self {
        Self {
            eye: position + Vec3::new(-FOCUS_DISTANCE * yaw.sin(), 0.0, FOCUS_DISTANCE),
            look_at: position,
        }
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            eye: self.eye.lerp(other.eye, t),
            look_at: self.look_at.lerp(other.look_at, t),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FocusTween {
    pub index: usize,
    from: CameraFocusTarget,
    to: CameraFocusTarget,
    timer: Timer,
}

impl FocusTween {
    pub fn new(index: usize, from: CameraFocusTarget, to: CameraFocusTarget, secs: f32) -> Self {
        Self {
            index,
            from,
            to,
            timer: Timer::from_seconds(secs, TimerMode::Once),
        }
    }

    pub fn target(&self) -> CameraFocusTarget {
        self.to
    }

    /// Step the tween and return the eased pose.
    pub fn advance(&mut self, delta: Duration) -> CameraFocusTarget {
        if self.timer.tick(delta).finished() {
            return self.to;
        }
        let t = EaseFunction::QuadraticInOut.sample_clamped(self.timer.fraction());
        self.from.lerp(&self.to, t)
    }

    pub fn is_finished(&self) -> bool {
        self.timer.finished()
    }
}

/// The single in-flight focus transition. A new request replaces it.
#[derive(Resource, Default, Debug)]
pub struct CameraFocus {
    active: Option<FocusTween>,
}

impl CameraFocus {
    pub fn request(&mut self, index: usize, from: CameraFocusTarget, to: CameraFocusTarget) {
        self.active = Some(FocusTween::new(index, from, to, FOCUS_DURATION_SECS));
    }

    /// Advance the active tween. The final pose is returned on the frame it
    /// completes, after which the tween is dropped.
    pub fn advance(&mut self, delta: Duration) -> Option<CameraFocusTarget> {
        let tween = self.active.as_mut()?;
        let pose = tween.advance(delta);
        if tween.is_finished() {
            self.active = None;
        }
        Some(pose)
    }

    pub fn active(&self) -> Option<&FocusTween> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSource {
    Pointer,
    Host,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct FocusPhotoEvent {
    pub index: usize,
    pub source: FocusSource,
}

/// Start a tween from the current orbit pose toward the requested photo.
/// An index with no photo plane is ignored.
pub fn handle_focus_requests(
    mut events: EventReader<FocusPhotoEvent>,
    scene: Res<GalleryScene>,
    groups: Query<(&GlobalTransform, &PhotoGroup)>,
    orbit: Res<OrbitCamera>,
    mut focus: ResMut<CameraFocus>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        let Some(plane) = scene.photo_plane(event.index) else {
            debug!("No photo plane for index {}, focus ignored", event.index);
            continue;
        };
        let Ok((transform, group)) = groups.get(plane.group) else {
            continue;
        };

        let from = CameraFocusTarget {
            eye: orbit.eye,
            look_at: orbit.target,
        };
        let to = CameraFocusTarget::for_photo(transform.translation(), group.euler.y);
        focus.request(event.index, from, to);

        info!("Focusing photo {} ({:?})", event.index, event.source);
        rpc_interface.send_notification(
            "photo_focus",
            serde_json::json!({ "index": event.index }),
        );
    }
}

pub fn advance_camera_focus(
    mut focus: ResMut<CameraFocus>,
    mut orbit: ResMut<OrbitCamera>,
    time: Res<Time>,
) {
    if let Some(pose) = focus.advance(time.delta()) {
        orbit.set_pose(pose.eye, pose.look_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> CameraFocusTarget {
        CameraFocusTarget {
            eye: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::new(0.0, 0.0, -3.0),
        }
    }

    #[test]
    fn photo_target_sits_in_front_of_the_group() {
        let target = CameraFocusTarget::for_photo(Vec3::new(-3.0, 0.0, -2.0), 0.0);
        assert_eq!(target.eye, Vec3::new(-3.0, 0.0, 0.0));
        assert_eq!(target.look_at, Vec3::new(-3.0, 0.0, -2.0));

        let turned = CameraFocusTarget::for_photo(Vec3::ZERO, 0.3);
        assert!((turned.eye.x + 2.0 * 0.3_f32.sin()).abs() < 1e-6);
    }

    #[test]
    fn tween_eases_and_ends_on_target() {
        let to = CameraFocusTarget::for_photo(Vec3::new(3.0, 0.5, -1.0), 0.0);
        let mut focus = CameraFocus::default();
        focus.request(1, start(), to);

        let quarter = focus.advance(Duration::from_secs_f32(0.375));
        let Some(quarter) = quarter else {
            panic!("tween should be active");
        };
        // Quadratic ease-in covers an eighth of the way at a quarter of the time.
        let expected = start().lerp(&to, 0.125);
        assert!((quarter.eye - expected.eye).length() < 1e-4);

        let end = focus.advance(Duration::from_secs(2));
        assert_eq!(end, Some(to));
        assert!(!focus.is_active());
        assert_eq!(focus.advance(Duration::from_secs(1)), None);
    }

    #[test]
    fn latest_request_replaces_the_active_tween() {
        let first = CameraFocusTarget::for_photo(Vec3::new(-3.0, 0.0, -2.0), 0.0);
        let second = CameraFocusTarget::for_photo(Vec3::new(3.0, 0.0, -2.0), 0.0);
        let mut focus = CameraFocus::default();

        focus.request(0, start(), first);
        let midway = focus.advance(Duration::from_secs_f32(0.5));
        let Some(midway) = midway else {
            panic!("tween should be active");
        };
        focus.request(2, midway, second);

        assert_eq!(focus.active().map(|t| t.index), Some(2));
        assert_eq!(focus.active().map(|t| t.target()), Some(second));
    }

    #[test]
    fn two_quick_requests_for_the_same_photo_leave_one_tween() {
        let target = CameraFocusTarget::for_photo(Vec3::new(0.0, 1.0, -4.0), 0.0);
        let mut focus = CameraFocus::default();
        focus.request(1, start(), target);
        focus.request(1, start(), target);

        assert!(focus.is_active());
        assert_eq!(focus.active().map(|t| t.target()), Some(target));
        let end = focus.advance(Duration::from_secs_f32(FOCUS_DURATION_SECS));
        assert_eq!(end, Some(target));
        assert!(!focus.is_active());
    }
}
