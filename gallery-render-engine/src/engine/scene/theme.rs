use bevy::pbr::DistanceFog;
use bevy::prelude::*;
use constants::render_settings::{BACKGROUND_DARK, BACKGROUND_LIGHT};

/// Background and fog palette. The page owns the stored preference and only
/// forwards the boolean.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SceneTheme {
    pub dark: bool,
}

impl SceneTheme {
    pub fn background(&self) -> Color {
        if self.dark {
            BACKGROUND_DARK
        } else {
            BACKGROUND_LIGHT
        }
    }
}

/// Push the palette into the clear colour and every camera's fog.
pub fn apply_scene_theme(
    theme: Res<SceneTheme>,
    mut clear_color: ResMut<ClearColor>,
    mut fogs: Query<&mut DistanceFog>,
) {
    if !theme.is_changed() {
        return;
    }
    let background = theme.background();
    clear_color.0 = background;
    for mut fog in &mut fogs {
        fog.color = background;
    }
    debug!("Scene theme: {}", if theme.dark { "dark" } else { "light" });
}
