use bevy::prelude::*;
use constants::render_settings::*;

use crate::engine::assets::gallery_scene::GalleryScene;
use crate::engine::scene::particles::spawn_particle_field;

#[derive(Component)]
pub struct GroundPlane;

fn spawn_lighting(commands: &mut Commands, scene: &mut GalleryScene) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    scene.add_static(
        commands
            .spawn((
                DirectionalLight {
                    illuminance: DIRECTIONAL_ILLUMINANCE,
                    shadows_enabled: true,
                    ..default()
                },
                Transform::from_translation(DIRECTIONAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
            ))
            .id(),
    );

    for (color, position) in [
        (WARM_LIGHT_COLOR, WARM_LIGHT_POSITION),
        (COOL_LIGHT_COLOR, COOL_LIGHT_POSITION),
    ] {
        scene.add_static(
            commands
                .spawn((
                    PointLight {
                        color,
                        intensity: POINT_LIGHT_INTENSITY,
                        range: POINT_LIGHT_RANGE,
                        ..default()
                    },
                    Transform::from_translation(position),
                ))
                .id(),
        );
    }
}

fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    commands
        .spawn((
            Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: GROUND_COLOR,
                perceptual_roughness: 0.8,
                metallic: 0.2,
                ..default()
            })),
            Transform::from_xyz(0.0, GROUND_HEIGHT, 0.0),
            GroundPlane,
        ))
        .id()
}

/// Static scenery: lights, ground and the particle field. Built once at startup.
pub fn setup_environment(
    mut commands: Commands,
    mut scene: ResMut<GalleryScene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_lighting(&mut commands, &mut scene);

    let ground = spawn_ground(&mut commands, &mut meshes, &mut materials);
    scene.add_static(ground);

    let particles = spawn_particle_field(&mut commands, &mut meshes, &mut materials);
    scene.set_particle_field(particles);

    debug!("Environment ready: {} static entities", scene.static_count());
}
