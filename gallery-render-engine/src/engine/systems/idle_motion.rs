use bevy::prelude::*;
use constants::timing::*;
use std::f32::consts::TAU;

use crate::engine::assets::photo_descriptor::euler_xyz;
use crate::engine::scene::model::LoadedModel;
use crate::engine::scene::particles::ParticleField;
use crate::engine::scene::photo_planes::PhotoGroup;

/// Add `step` to a yaw, wrapped to [0, 2π).
pub fn spin_yaw(yaw: f32, step: f32) -> f32 {
    (yaw + step).rem_euclid(TAU)
}

/// Per-frame sway added to every photo group at `elapsed` seconds.
pub fn photo_sway(elapsed: f32) -> f32 {
    (elapsed * PHOTO_SWAY_FREQUENCY).sin() * PHOTO_SWAY_PER_FRAME
}

/// Fixed per-frame drift: particles and models spin, photos sway.
pub fn apply_idle_motion(
    time: Res<Time>,
    mut particles: Query<(&mut ParticleField, &mut Transform), (Without<LoadedModel>, Without<PhotoGroup>)>,
    mut models: Query<(&mut LoadedModel, &mut Transform), (Without<ParticleField>, Without<PhotoGroup>)>,
    mut photos: Query<(&mut PhotoGroup, &mut Transform), (Without<ParticleField>, Without<LoadedModel>)>,
) {
    for (mut field, mut transform) in &mut particles {
        field.yaw = spin_yaw(field.yaw, PARTICLE_SPIN_PER_FRAME);
        transform.rotation = Quat::from_rotation_y(field.yaw);
    }

    for (mut model, mut transform) in &mut models {
        model.yaw = spin_yaw(model.yaw, MODEL_SPIN_PER_FRAME);
        transform.rotation = Quat::from_rotation_y(model.yaw);
    }

    let sway = photo_sway(time.elapsed_secs());
    for (mut group, mut transform) in &mut photos {
        group.euler.y += sway;
        transform.rotation = euler_xyz(group.euler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn model_yaw_accumulates_per_frame() {
        let mut world = World::new();
        world.insert_resource(Time::<()>::default());
        let model = world
            .spawn((LoadedModel::new(0.3), Transform::default()))
            .id();

        let frames = 50;
        for _ in 0..frames {
            let _ = world.run_system_once(apply_idle_motion);
        }

        let accumulated = world
            .get::<LoadedModel>(model)
            .map(|m| m.accumulated_yaw())
            .unwrap_or_default();
        let expected = (frames as f32 * MODEL_SPIN_PER_FRAME).rem_euclid(TAU);
        assert!((accumulated - expected).abs() < 1e-4);
    }

    #[test]
    fn spin_wraps_past_full_turn() {
        let yaw = spin_yaw(TAU - 0.001, 0.002);
        assert!((yaw - 0.001).abs() < 1e-5);
    }

    #[test]
    fn sway_is_zero_at_start() {
        assert_eq!(photo_sway(0.0), 0.0);
        assert!(photo_sway(std::f32::consts::PI).abs() <= PHOTO_SWAY_PER_FRAME);
    }
}
