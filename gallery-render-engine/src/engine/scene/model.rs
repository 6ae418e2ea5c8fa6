use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::gallery::*;
use constants::render_settings::PLACEHOLDER_COLOR;
use std::f32::consts::{FRAC_PI_2, TAU};

/// The focal model or its placeholder. Carries the yaw driven by idle motion.
#[derive(Component, Debug, Clone, Copy)]
pub struct LoadedModel {
    pub yaw: f32,
    pub initial_yaw: f32,
}

impl LoadedModel {
    pub fn new(yaw: f32) -> Self {
        Self {
            yaw,
            initial_yaw: yaw,
        }
    }

    /// Yaw added since spawn, wrapped to [0, 2π).
    pub fn accumulated_yaw(&self) -> f32 {
        (self.yaw - self.initial_yaw).rem_euclid(TAU)
    }
}

#[derive(Component)]
pub struct PlaceholderModel;

/// The single clip bound to a loaded model, started once its scene is ready.
#[derive(Component, Clone)]
pub struct ModelAnimation {
    pub graph: Handle<AnimationGraph>,
    pub node: AnimationNodeIndex,
}

pub fn model_transform() -> Transform {
    Transform {
        translation: MODEL_POSITION,
        rotation: Quat::from_rotation_y(MODEL_YAW),
        scale: Vec3::splat(MODEL_SCALE),
    }
}

/// Spawn the glTF scene. Returns `None` when the asset has no scene to show.
pub fn spawn_loaded_model(
    commands: &mut Commands,
    gltf: &Gltf,
    graphs: &mut Assets<AnimationGraph>,
) -> Option<Entity> {
    let scene = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())?;

    let mut entity = commands.spawn((
        SceneRoot(scene),
        model_transform(),
        LoadedModel::new(MODEL_YAW),
    ));

    if let Some(clip) = gltf.animations.first() {
        let (graph, node) = AnimationGraph::from_clip(clip.clone());
        entity.insert(ModelAnimation {
            graph: graphs.add(graph),
            node,
        });
    }

    entity.observe(prepare_model_scene);
    Some(entity.id())
}

/// Once the glTF hierarchy exists: retune every mesh material and start the
/// looping clip on the first animation player found.
fn prepare_model_scene(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    children: Query<&Children>,
    animations: Query<&ModelAnimation>,
    mut players: Query<&mut AnimationPlayer>,
    mesh_materials: Query<&MeshMaterial3d<StandardMaterial>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let root = trigger.target();
    let animation = animations.get(root).ok().cloned();
    let mut animation_bound = false;

    for descendant in children.iter_descendants(root) {
        if let Ok(handle) = mesh_materials.get(descendant) {
            if let Some(material) = materials.get_mut(&handle.0) {
                material.perceptual_roughness = MODEL_ROUGHNESS;
                material.metallic = MODEL_METALLIC;
            }
        }

        if animation_bound {
            continue;
        }
        let Some(ref animation) = animation else {
            continue;
        };
        if let Ok(mut player) = players.get_mut(descendant) {
            player.play(animation.node).repeat();
            commands
                .entity(descendant)
                .insert(AnimationGraphHandle(animation.graph.clone()));
            animation_bound = true;
        }
    }

    if animation.is_some() && !animation_bound {
        warn!("Model has an animation clip but no animation player");
    }
}

fn lens_transform() -> Transform {
    Transform::from_xyz(0.0, 0.0, PLACEHOLDER_LENS_OFFSET_Z)
        .with_rotation(Quat::from_rotation_x(FRAC_PI_2))
}

/// Procedural stand-in: a box body with a cylindrical lens pointing along +z.
pub fn spawn_placeholder_model(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let material = materials.add(StandardMaterial {
        base_color: PLACEHOLDER_COLOR,
        perceptual_roughness: 0.5,
        metallic: 0.7,
        ..default()
    });
    let body = meshes.add(Cuboid::from_size(PLACEHOLDER_BODY_SIZE));
    let lens = meshes.add(Cylinder::new(
        PLACEHOLDER_LENS_RADIUS,
        PLACEHOLDER_LENS_LENGTH,
    ));

    commands
        .spawn((
            Transform::from_translation(PLACEHOLDER_POSITION)
                .with_rotation(Quat::from_rotation_y(PLACEHOLDER_YAW)),
            Visibility::default(),
            LoadedModel::new(PLACEHOLDER_YAW),
            PlaceholderModel,
        ))
        .with_children(|parent| {
            parent.spawn((Mesh3d(body), MeshMaterial3d(material.clone())));
            parent.spawn((Mesh3d(lens), MeshMaterial3d(material), lens_transform()));
        })
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::world::CommandQueue;

    #[test]
    fn accumulated_yaw_wraps() {
        let mut model = LoadedModel::new(1.0);
        model.yaw += TAU + 0.5;
        assert!((model.accumulated_yaw() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn lens_points_forward_of_the_body() {
        let lens = lens_transform();
        let axis = lens.rotation * Vec3::Y;
        assert!((axis - Vec3::Z).length() < 1e-5);
        assert_eq!(lens.translation.z, 0.75);
    }

    #[test]
    fn placeholder_has_body_and_lens() {
        let mut world = World::new();
        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<StandardMaterial>::default();
        let mut queue = CommandQueue::default();

        let root = {
            let mut commands = Commands::new(&mut queue, &world);
            spawn_placeholder_model(&mut commands, &mut meshes, &mut materials)
        };
        queue.apply(&mut world);

        let children = world.get::<Children>(root).map(|c| c.len());
        assert_eq!(children, Some(2));
        assert!(world.get::<PlaceholderModel>(root).is_some());
        let transform = world.get::<Transform>(root).copied().unwrap_or_default();
        assert_eq!(transform.translation, PLACEHOLDER_POSITION);
        assert_eq!(meshes.len(), 2);
        assert_eq!(materials.len(), 1);
    }
}
