use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::gallery::MANIFEST_PATH;

use crate::engine::assets::gallery_manifest::GalleryManifest;
use crate::engine::error::GalleryError;
use crate::engine::loading::loading_gate::LoadingGate;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<GalleryManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading gallery manifest from {}", MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Publish the manifest as a resource once it resolves. A missing or broken
/// manifest falls back to the built-in sample gallery.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    mut gate: ResMut<LoadingGate>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    manifests: Res<Assets<GalleryManifest>>,
) {
    if loading_progress.manifest_resolved {
        return;
    }
    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    let manifest = match asset_server.get_load_state(handle) {
        Some(LoadState::Loaded) => match manifests.get(handle) {
            Some(manifest) => {
                info!(
                    "✓ Gallery manifest loaded: {} photos, model {}",
                    manifest.photo_count(),
                    manifest.model
                );
                manifest.clone()
            }
            None => return,
        },
        Some(LoadState::Failed(err)) => {
            let err = GalleryError::asset_load(MANIFEST_PATH, err);
            warn!("{err}; using built-in gallery");
            GalleryManifest::default()
        }
        _ => return,
    };

    gate.set_ceiling(manifest.loading_ceiling_secs);
    commands.insert_resource(manifest);
    loading_progress.manifest_resolved = true;
}
