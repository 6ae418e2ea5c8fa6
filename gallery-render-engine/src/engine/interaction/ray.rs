use bevy::prelude::*;

/// Ray test against a rectangle lying in the local XY plane of `xf`, centred
/// on its origin. Returns the world-space ray parameter of the hit.
pub fn ray_hits_rect(origin: Vec3, dir: Vec3, xf: &GlobalTransform, size: Vec2) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);

    // Parallel to the plane: no single hit point.
    if d_local.z.abs() <= f32::EPSILON {
        return None;
    }

    let t = -o_local.z / d_local.z;
    if t < 0.0 {
        return None;
    }

    let hit = o_local + d_local * t;
    let half = size * 0.5;
    if hit.x.abs() <= half.x && hit.y.abs() <= half.y {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_rect_in_front() {
        let xf = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -2.0));
        let t = ray_hits_rect(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, &xf, Vec2::new(1.5, 1.0));
        assert_eq!(t, Some(7.0));
    }

    #[test]
    fn misses_outside_and_behind() {
        let xf = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -2.0));
        let size = Vec2::new(1.5, 1.0);
        assert!(ray_hits_rect(Vec3::new(0.0, 0.6, 5.0), Vec3::NEG_Z, &xf, size).is_none());
        assert!(ray_hits_rect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, &xf, size).is_none());
        assert!(ray_hits_rect(Vec3::new(0.0, 0.0, 5.0), Vec3::X, &xf, size).is_none());
    }

    #[test]
    fn respects_group_scale_and_rotation() {
        let xf = GlobalTransform::from(
            Transform::from_xyz(0.0, 0.0, -2.0)
                .with_rotation(Quat::from_rotation_y(0.3))
                .with_scale(Vec3::splat(1.5)),
        );
        // 0.7 is outside the unscaled half height but inside the scaled one.
        let t = ray_hits_rect(Vec3::new(0.0, 0.7, 5.0), Vec3::NEG_Z, &xf, Vec2::ONE);
        assert!(t.is_some());
    }
}
