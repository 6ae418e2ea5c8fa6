use bevy::prelude::*;
use bevy::window::PresentMode;

/// Canvas the page reserves for the gallery.
pub const CANVAS_SELECTOR: &str = "#gallery-canvas";

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Gallery".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
