use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::gallery_manifest::GalleryManifest;
use crate::engine::assets::gallery_scene::GalleryScene;
use crate::engine::error::GalleryError;
use crate::engine::loading::progress::{LoadingProgress, report_failed, report_loaded};
use crate::engine::scene::photo_planes::{image_aspect, spawn_photo_plane};
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone)]
pub struct PendingPhoto {
    pub index: usize,
    pub url: String,
    pub handle: Handle<Image>,
}

/// Photo textures still in flight. Each one resolves on its own.
#[derive(Resource, Default, Debug)]
pub struct PhotoLoader {
    pending: Vec<PendingPhoto>,
    started: bool,
}

pub fn start_photo_loading(
    mut loader: ResMut<PhotoLoader>,
    mut progress: ResMut<LoadingProgress>,
    manifest: Option<Res<GalleryManifest>>,
    asset_server: Res<AssetServer>,
) {
    if loader.started {
        return;
    }
    let Some(manifest) = manifest else {
        return;
    };

    for (index, photo) in manifest.photos.iter().enumerate() {
        progress.item_started(&photo.url);
        loader.pending.push(PendingPhoto {
            index,
            url: photo.url.clone(),
            handle: asset_server.load(photo.url.clone()),
        });
    }
    loader.started = true;
    info!("Loading {} photo textures", manifest.photo_count());
}

/// Turn every settled texture into a framed photo, or drop it on failure.
pub fn resolve_photo_textures(
    mut commands: Commands,
    mut loader: ResMut<PhotoLoader>,
    mut scene: ResMut<GalleryScene>,
    mut progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    manifest: Option<Res<GalleryManifest>>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(manifest) = manifest else {
        return;
    };
    if loader.pending.is_empty() {
        return;
    }

    let mut still_pending = Vec::with_capacity(loader.pending.len());
    for photo in loader.pending.drain(..) {
        match asset_server.get_load_state(&photo.handle) {
            Some(LoadState::Loaded) => {
                let (Some(image), Some(descriptor)) =
                    (images.get(&photo.handle), manifest.photo(photo.index))
                else {
                    still_pending.push(photo);
                    continue;
                };
                let record = spawn_photo_plane(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    photo.index,
                    descriptor,
                    photo.handle.clone(),
                    image_aspect(image),
                );
                if !scene.add_photo_plane(record) {
                    commands.entity(record.group).despawn();
                    continue;
                }
                report_loaded(&mut progress, &mut rpc_interface, &photo.url);
            }
            Some(LoadState::Failed(err)) => {
                let err = GalleryError::asset_load(&photo.url, err);
                error!("{err}; photo {} left out", photo.index);
                report_failed(&mut progress, &mut rpc_interface, &err);
            }
            _ => still_pending.push(photo),
        }
    }
    loader.pending = still_pending;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::photo_descriptor::PhotoDescriptor;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn descriptor(url: &str, position: [f32; 3]) -> PhotoDescriptor {
        PhotoDescriptor {
            url: url.to_string(),
            position,
            rotation: [0.0, 0.3, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    fn photo_app(photos: Vec<PhotoDescriptor>) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Image>()
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_resource::<PhotoLoader>()
            .init_resource::<GalleryScene>()
            .init_resource::<LoadingProgress>()
            .init_resource::<WebRpcInterface>()
            .insert_resource(GalleryManifest {
                photos,
                model: "models/a.glb".to_string(),
                loading_ceiling_secs: 10.0,
            });
        app
    }

    #[test]
    fn failed_texture_does_not_block_the_others() {
        let ready = descriptor("photos/ready.jpg", [-3.0, 0.5, -2.0]);
        let missing = descriptor("photos/missing.jpg", [3.0, -0.5, -2.0]);
        let mut app = photo_app(vec![missing.clone(), ready.clone()]);

        let asset_server = app.world().resource::<AssetServer>().clone();
        let pending = vec![
            PendingPhoto {
                index: 0,
                url: missing.url.clone(),
                handle: asset_server.load(missing.url.clone()),
            },
            PendingPhoto {
                index: 1,
                url: ready.url.clone(),
                handle: asset_server.add(Image::default()),
            },
        ];
        {
            let world = app.world_mut();
            let mut progress = world.resource_mut::<LoadingProgress>();
            progress.item_started(&missing.url);
            progress.item_started(&ready.url);
            let mut loader = world.resource_mut::<PhotoLoader>();
            loader.pending = pending;
            loader.started = true;
        }

        for _ in 0..400 {
            app.update();
            let _ = app.world_mut().run_system_once(resolve_photo_textures);
            if app.world().resource::<PhotoLoader>().pending.is_empty() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        let world = app.world();
        let planes = world.resource::<GalleryScene>().photo_planes().to_vec();
        assert_eq!(planes.len(), 1);
        assert_eq!(planes[0].index, 1);
        assert_eq!(
            world.get::<Transform>(planes[0].group).copied(),
            Some(ready.transform())
        );

        let progress = world.resource::<LoadingProgress>();
        assert_eq!(progress.loaded(), 1);
        assert_eq!(progress.failed(), 1);
        assert!(progress.is_complete());

        let rpc = world.resource::<WebRpcInterface>();
        assert_eq!(rpc.sent("loading_progress").len(), 1);
        let errors = rpc.sent("loading_error");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["url"], "photos/missing.jpg");
    }
}
