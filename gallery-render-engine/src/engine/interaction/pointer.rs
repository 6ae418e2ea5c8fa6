use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Last pointer position in normalised device coordinates, +y up.
/// Starts at the viewport centre until the pointer first moves.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PointerNdc(pub Vec2);

pub fn cursor_to_ndc(cursor: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        cursor.x / viewport.x * 2.0 - 1.0,
        1.0 - cursor.y / viewport.y * 2.0,
    )
}

pub fn ndc_to_cursor(ndc: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.x,
        (1.0 - ndc.y) * 0.5 * viewport.y,
    )
}

/// Pointer moves only update the NDC pair; picking happens per frame.
pub fn track_pointer(
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerNdc>,
) {
    let Some(last) = cursor_moved.read().last() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let viewport = window.size();
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return;
    }
    pointer.0 = cursor_to_ndc(last.position, viewport);
}
