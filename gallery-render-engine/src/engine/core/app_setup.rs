use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::BACKGROUND_LIGHT;

use crate::engine::assets::gallery_manifest::GalleryManifest;
use crate::engine::assets::gallery_scene::{GalleryScene, dispose_on_exit};
use crate::engine::camera::focus::{
    CameraFocus, FocusPhotoEvent, advance_camera_focus, handle_focus_requests,
};
use crate::engine::camera::orbit_camera::{
    OrbitCamera, orbit_camera_controller, spawn_gallery_camera, sync_camera_transform,
};
use crate::engine::core::app_state::{AppState, log_running_state};
use crate::engine::core::window_config::create_window_config;
use crate::engine::interaction::picking::{PhotoPickingPlugin, click_to_focus};
use crate::engine::interaction::pointer::{PointerNdc, track_pointer};
use crate::engine::loading::loading_gate::{
    DismissLoadingEvent, LoadingGate, dismiss_on_completion, process_dismiss_requests,
    tick_loading_ceiling,
};
use crate::engine::loading::loading_screen::{
    LoadingScreen, animate_loading_screen, update_loading_overlay_text,
};
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::model_loader::{ModelSlot, load_model, probe_model};
use crate::engine::loading::photo_loader::{
    PhotoLoader, resolve_photo_textures, start_photo_loading,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::environment::setup_environment;
use crate::engine::scene::theme::{SceneTheme, apply_scene_theme};
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::idle_motion::apply_idle_motion;
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::loading::loading_screen::spawn_loading_overlay;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, spawn_fps_overlay};

const LOG_FILTER: &str = "wgpu=error,naga=warn,gallery_render_engine=debug";

/// Per-frame order: assets settle, input is read, the camera moves, then idle
/// motion runs. Picking follows in `PostUpdate` once transforms propagate.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GallerySet {
    Loading,
    Input,
    Camera,
    Motion,
}

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers GalleryManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<GalleryManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(PhotoPickingPlugin)
        .insert_resource(ClearColor(BACKGROUND_LIGHT));

    // Initialise resources early
    app.init_resource::<GalleryScene>()
        .init_resource::<LoadingProgress>()
        .init_resource::<LoadingGate>()
        .init_resource::<LoadingScreen>()
        .init_resource::<ManifestLoader>()
        .init_resource::<ModelSlot>()
        .init_resource::<PhotoLoader>()
        .init_resource::<OrbitCamera>()
        .init_resource::<CameraFocus>()
        .init_resource::<PointerNdc>()
        .init_resource::<SceneTheme>()
        .add_event::<FocusPhotoEvent>()
        .add_event::<DismissLoadingEvent>();

    app.configure_sets(
        Update,
        (
            GallerySet::Loading,
            GallerySet::Input,
            GallerySet::Camera,
            GallerySet::Motion,
        )
            .chain(),
    );

    app.add_systems(Startup, (setup, setup_environment, start_loading).chain())
        .add_systems(OnEnter(AppState::Running), log_running_state);

    // Loading keeps running after the screen hides so late assets still
    // join the scene.
    app.add_systems(
        Update,
        (
            load_manifest_system,
            probe_model,
            load_model,
            start_photo_loading,
            resolve_photo_textures,
            dismiss_on_completion,
            tick_loading_ceiling,
            process_dismiss_requests,
            animate_loading_screen,
            update_loading_overlay_text,
        )
            .chain()
            .in_set(GallerySet::Loading),
    );

    app.add_systems(
        Update,
        (track_pointer, click_to_focus)
            .chain()
            .in_set(GallerySet::Input)
            .run_if(in_state(AppState::Running)),
    )
    .add_systems(
        Update,
        (
            orbit_camera_controller,
            handle_focus_requests,
            advance_camera_focus,
            sync_camera_transform,
        )
            .chain()
            .in_set(GallerySet::Camera),
    )
    .add_systems(
        Update,
        (apply_idle_motion, apply_scene_theme).in_set(GallerySet::Motion),
    )
    .add_systems(Update, fps_notification_system)
    .add_systems(Last, dispose_on_exit);

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

// Startup system: camera plus the native stand-ins for page chrome
fn setup(mut commands: Commands, orbit: Res<OrbitCamera>) {
    info!("=== GALLERY RENDER ENGINE ===");
    spawn_gallery_camera(&mut commands, &orbit);

    #[cfg(not(target_arch = "wasm32"))]
    {
        spawn_loading_overlay(&mut commands);
        spawn_fps_overlay(&mut commands);
    }
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        level: Level::INFO,
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
