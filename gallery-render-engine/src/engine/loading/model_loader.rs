use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::assets::gallery_manifest::GalleryManifest;
use crate::engine::assets::gallery_scene::GalleryScene;
use crate::engine::error::GalleryError;
use crate::engine::loading::model_probe::{ModelProbe, ProbeResult};
use crate::engine::loading::progress::{LoadingProgress, report_failed, report_loaded};
use crate::engine::scene::model::{spawn_loaded_model, spawn_placeholder_model};
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelOutcome {
    Loaded,
    Placeholder,
}

#[derive(Debug, Default)]
pub enum ModelStage {
    #[default]
    Idle,
    Probing(ModelProbe),
    Loading(Handle<Gltf>),
    Resolved(ModelOutcome),
}

/// The single model slot. It resolves to the loaded model or the placeholder,
/// never both.
#[derive(Resource, Default, Debug)]
pub struct ModelSlot {
    stage: ModelStage,
    path: String,
}

impl ModelSlot {
    pub fn stage(&self) -> &ModelStage {
        &self.stage
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn begin_probe(&mut self, path: &str, probe: ModelProbe) {
        if matches!(self.stage, ModelStage::Idle) {
            self.path = path.to_string();
            self.stage = ModelStage::Probing(probe);
        }
    }

    pub fn begin_load(&mut self, handle: Handle<Gltf>) {
        if matches!(self.stage, ModelStage::Probing(_)) {
            self.stage = ModelStage::Loading(handle);
        }
    }

    /// Settle the slot. Returns false when it had already settled.
    pub fn resolve(&mut self, outcome: ModelOutcome) -> bool {
        if self.outcome().is_some() {
            return false;
        }
        self.stage = ModelStage::Resolved(outcome);
        true
    }

    pub fn outcome(&self) -> Option<ModelOutcome> {
        match self.stage {
            ModelStage::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Kick off the existence check once the manifest names the model. The model
/// counts as a loading item from here, whichever way it resolves.
pub fn probe_model(
    mut slot: ResMut<ModelSlot>,
    mut progress: ResMut<LoadingProgress>,
    manifest: Option<Res<GalleryManifest>>,
) {
    let Some(manifest) = manifest else {
        return;
    };
    if !matches!(slot.stage(), ModelStage::Idle) {
        return;
    }

    debug!("Probing model {}", manifest.model);
    progress.item_started(&manifest.model);
    slot.begin_probe(&manifest.model, ModelProbe::start(&manifest.model));
}

pub fn load_model(
    mut commands: Commands,
    mut slot: ResMut<ModelSlot>,
    mut scene: ResMut<GalleryScene>,
    mut progress: ResMut<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let path = slot.path().to_string();

    let failure = match slot.stage() {
        ModelStage::Probing(probe) => match probe.poll() {
            Some(ProbeResult::Present) => {
                let handle: Handle<Gltf> = asset_server.load(path.clone());
                slot.begin_load(handle);
                return;
            }
            Some(ProbeResult::Absent) => {
                GalleryError::asset_load(&path, "model not found")
            }
            None => return,
        },
        ModelStage::Loading(handle) => match asset_server.get_load_state(handle) {
            Some(LoadState::Loaded) => {
                let Some(gltf) = gltfs.get(handle) else {
                    return;
                };
                match spawn_loaded_model(&mut commands, gltf, &mut graphs) {
                    Some(entity) => {
                        if slot.resolve(ModelOutcome::Loaded) {
                            info!("✓ Model loaded: {}", path);
                            scene.add_model(entity);
                            report_loaded(&mut progress, &mut rpc_interface, &path);
                        }
                        return;
                    }
                    None => GalleryError::asset_load(&path, "glTF contains no scene"),
                }
            }
            Some(LoadState::Failed(err)) => GalleryError::asset_load(&path, err),
            _ => return,
        },
        ModelStage::Idle | ModelStage::Resolved(_) => return,
    };

    if !slot.resolve(ModelOutcome::Placeholder) {
        return;
    }
    warn!("{failure}; using placeholder model");
    report_failed(&mut progress, &mut rpc_interface, &failure);
    let placeholder = spawn_placeholder_model(&mut commands, &mut meshes, &mut materials);
    scene.add_model(placeholder);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::loading::loading_gate::{
        DismissLoadingEvent, HideReason, dismiss_on_completion,
    };
    use crate::engine::scene::model::PlaceholderModel;
    use bevy::ecs::system::RunSystemOnce;

    fn model_app(model: &str) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Gltf>()
            .init_asset::<AnimationGraph>()
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .init_resource::<ModelSlot>()
            .init_resource::<GalleryScene>()
            .init_resource::<LoadingProgress>()
            .init_resource::<WebRpcInterface>()
            .add_event::<DismissLoadingEvent>()
            .insert_resource(GalleryManifest {
                photos: Vec::new(),
                model: model.to_string(),
                loading_ceiling_secs: 10.0,
            });
        app
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn absent_model_settles_as_one_failed_item() {
        let mut app = model_app("models/does-not-exist.glb");
        let world = app.world_mut();

        let _ = world.run_system_once(probe_model);
        assert_eq!(world.resource::<LoadingProgress>().total(), 1);

        let _ = world.run_system_once(load_model);
        let _ = world.run_system_once(load_model);
        let _ = world.run_system_once(dismiss_on_completion);

        let slot = world.resource::<ModelSlot>();
        assert_eq!(slot.outcome(), Some(ModelOutcome::Placeholder));

        let models = world.resource::<GalleryScene>().loaded_models().to_vec();
        assert_eq!(models.len(), 1);
        assert!(world.get::<PlaceholderModel>(models[0]).is_some());

        let progress = world.resource::<LoadingProgress>();
        assert_eq!(progress.failed(), 1);
        assert_eq!(progress.loaded(), 0);

        let errors = world.resource::<WebRpcInterface>().sent("loading_error");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["url"], "models/does-not-exist.glb");

        let reasons: Vec<HideReason> = world
            .resource::<Events<DismissLoadingEvent>>()
            .iter_current_update_events()
            .map(|e| e.reason)
            .collect();
        assert_eq!(reasons, vec![HideReason::AssetsLoaded]);
    }

    #[test]
    fn probing_registers_the_model_once() {
        let mut app = model_app("models/does-not-exist.glb");
        let world = app.world_mut();
        let _ = world.run_system_once(probe_model);
        let _ = world.run_system_once(probe_model);

        let progress = world.resource::<LoadingProgress>();
        assert_eq!(progress.total(), 1);
        assert!(progress.status("models/does-not-exist.glb").is_some());
    }

    #[test]
    fn slot_resolves_exactly_once() {
        let mut slot = ModelSlot::default();
        slot.begin_probe("models/a.glb", ModelProbe::default());
        assert_eq!(slot.path(), "models/a.glb");
        assert!(slot.outcome().is_none());

        assert!(slot.resolve(ModelOutcome::Placeholder));
        assert!(!slot.resolve(ModelOutcome::Loaded));
        assert_eq!(slot.outcome(), Some(ModelOutcome::Placeholder));
    }

    #[test]
    fn load_only_follows_a_probe() {
        let mut slot = ModelSlot::default();
        slot.begin_load(Handle::default());
        assert!(matches!(slot.stage(), ModelStage::Idle));

        slot.begin_probe("models/a.glb", ModelProbe::default());
        slot.begin_load(Handle::default());
        assert!(matches!(slot.stage(), ModelStage::Loading(_)));

        slot.begin_probe("models/b.glb", ModelProbe::default());
        assert_eq!(slot.path(), "models/a.glb");
    }
}
