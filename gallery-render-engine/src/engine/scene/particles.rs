use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use constants::render_settings::{PARTICLE_COUNT, PARTICLE_OPACITY, PARTICLE_SEED, PARTICLE_SPREAD};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Floating dust around the gallery. `yaw` accumulates idle rotation.
#[derive(Component, Debug, Default)]
pub struct ParticleField {
    pub yaw: f32,
}

/// Uniform positions inside a cube of edge `spread` centred on the origin.
/// The same seed always yields the same layout.
pub fn create_particle_positions(count: usize, spread: f32, seed: u64) -> Vec<[f32; 3]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = spread / 2.0;
    (0..count)
        .map(|_| {
            [
                rng.random_range(-half..half),
                rng.random_range(-half..half),
                rng.random_range(-half..half),
            ]
        })
        .collect()
}

/// Point-list mesh, one vertex per particle.
pub fn create_particle_mesh(positions: Vec<[f32; 3]>) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh
}

pub fn spawn_particle_field(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let positions = create_particle_positions(PARTICLE_COUNT, PARTICLE_SPREAD, PARTICLE_SEED);
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, PARTICLE_OPACITY),
        alpha_mode: AlphaMode::Add,
        unlit: true,
        ..default()
    });

    commands
        .spawn((
            Mesh3d(meshes.add(create_particle_mesh(positions))),
            MeshMaterial3d(material),
            Transform::IDENTITY,
            ParticleField::default(),
        ))
        .id()
}
