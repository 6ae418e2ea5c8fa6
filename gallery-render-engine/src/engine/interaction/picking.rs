use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;

use crate::engine::camera::focus::{FocusPhotoEvent, FocusSource};
use crate::engine::camera::orbit_camera::GalleryCamera;
use crate::engine::core::app_state::AppState;
use crate::engine::interaction::pointer::{PointerNdc, ndc_to_cursor};
use crate::engine::interaction::ray::ray_hits_rect;
use crate::engine::scene::photo_planes::PhotoSurface;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAffordance {
    Pointer,
    Default,
}

impl CursorAffordance {
    pub fn icon(&self) -> CursorIcon {
        match self {
            CursorAffordance::Pointer => SystemCursorIcon::Pointer.into(),
            CursorAffordance::Default => SystemCursorIcon::Default.into(),
        }
    }
}

/// Hovered photo index, or `None` while idle.
#[derive(Resource, Default, Debug)]
pub struct PickState {
    hovered: Option<usize>,
}

impl PickState {
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Record this frame's hit. The returned affordance is `Some` only when
    /// hovering flips between some photo and none.
    pub fn update(&mut self, hit: Option<usize>) -> Option<CursorAffordance> {
        let was_hovering = self.hovered.is_some();
        self.hovered = hit;
        match (was_hovering, hit.is_some()) {
            (false, true) => Some(CursorAffordance::Pointer),
            (true, false) => Some(CursorAffordance::Default),
            _ => None,
        }
    }
}

/// Index of the closest surface the ray passes through.
pub fn pick_nearest<'a>(
    origin: Vec3,
    dir: Vec3,
    surfaces: impl IntoIterator<Item = (&'a GlobalTransform, &'a PhotoSurface)>,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (xf, surface) in surfaces {
        if let Some(t) = ray_hits_rect(origin, dir, xf, surface.size) {
            if best.is_none_or(|(_, best_t)| t < best_t) {
                best = Some((surface.index, t));
            }
        }
    }
    best.map(|(index, _)| index)
}

/// World-space ray under the pointer, refreshed once transforms have propagated.
#[derive(Resource, Default, Debug)]
pub struct PointerRay(pub Option<Ray3d>);

/// Picking reads `GlobalTransform`, so it runs in `PostUpdate` after
/// propagation and sees this frame's camera and idle motion.
pub struct PhotoPickingPlugin;

impl Plugin for PhotoPickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PickState>()
            .init_resource::<PointerRay>()
            .add_systems(
                PostUpdate,
                (cast_pointer_ray, pick_photo_planes)
                    .chain()
                    .after(TransformSystem::TransformPropagate)
                    .run_if(in_state(AppState::Running)),
            );
    }
}

/// Ray from the camera through the pointer. Left untouched while there is
/// no window or camera.
pub fn cast_pointer_ray(
    pointer: Res<PointerNdc>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<GalleryCamera>>,
    mut pointer_ray: ResMut<PointerRay>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, cam_xf)) = cameras.single() else {
        return;
    };

    let cursor_pos = ndc_to_cursor(pointer.0, window.size());
    pointer_ray.0 = camera.viewport_to_world(cam_xf, cursor_pos).ok();
}

/// Test the pointer ray against every photo surface.
pub fn pick_photo_planes(
    mut commands: Commands,
    pointer_ray: Res<PointerRay>,
    windows: Query<Entity, With<PrimaryWindow>>,
    surfaces: Query<(&GlobalTransform, &PhotoSurface)>,
    mut pick_state: ResMut<PickState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(ray) = pointer_ray.0 else {
        return;
    };

    let hit = pick_nearest(ray.origin, ray.direction.as_vec3(), &surfaces);
    let previous = pick_state.hovered();

    if let Some(affordance) = pick_state.update(hit) {
        if let Ok(window_entity) = windows.single() {
            commands.entity(window_entity).insert(affordance.icon());
        }
    }
    if previous != hit {
        rpc_interface.send_notification("photo_hover", serde_json::json!({ "index": hit }));
    }
}

/// A click while hovering a photo focuses it.
pub fn click_to_focus(
    buttons: Res<ButtonInput<MouseButton>>,
    pick_state: Res<PickState>,
    mut focus_events: EventWriter<FocusPhotoEvent>,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }
    if let Some(index) = pick_state.hovered() {
        focus_events.write(FocusPhotoEvent {
            index,
            source: FocusSource::Pointer,
        });
    }
}
