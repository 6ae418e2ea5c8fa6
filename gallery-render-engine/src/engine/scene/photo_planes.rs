use bevy::prelude::*;
use constants::gallery::{FRAME_BORDER, FRAME_DEPTH};
use constants::render_settings::FRAME_COLOR;

use crate::engine::assets::gallery_scene::PhotoPlane;
use crate::engine::assets::photo_descriptor::PhotoDescriptor;

/// Frame group of one photo. `euler` is the live XYZ rotation, which idle
/// motion keeps adding yaw to.
#[derive(Component, Debug, Clone, Copy)]
pub struct PhotoGroup {
    pub index: usize,
    pub euler: Vec3,
}

/// The pickable image surface. `size` is the plane's extent in group space.
#[derive(Component, Debug, Clone, Copy)]
pub struct PhotoSurface {
    pub index: usize,
    pub size: Vec2,
}

#[derive(Component)]
pub struct PhotoFrame;

/// Plane and frame dimensions for a photo of the given aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoPlaneLayout {
    pub plane_size: Vec2,
    pub frame_size: Vec3,
    pub frame_offset: Vec3,
}

impl PhotoPlaneLayout {
    pub fn from_aspect(aspect: f32) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Self {
            plane_size: Vec2::new(aspect, 1.0),
            frame_size: Vec3::new(
                aspect + FRAME_BORDER * 2.0,
                1.0 + FRAME_BORDER * 2.0,
                FRAME_DEPTH,
            ),
            frame_offset: Vec3::new(0.0, 0.0, -FRAME_DEPTH / 2.0),
        }
    }
}

pub fn image_aspect(image: &Image) -> f32 {
    let height = image.height();
    if height == 0 {
        return 1.0;
    }
    image.width() as f32 / height as f32
}

/// Build the framed photo for descriptor `index` and return its record.
pub fn spawn_photo_plane(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    index: usize,
    descriptor: &PhotoDescriptor,
    texture: Handle<Image>,
    aspect: f32,
) -> PhotoPlane {
    let layout = PhotoPlaneLayout::from_aspect(aspect);

    let frame_material = materials.add(StandardMaterial {
        base_color: FRAME_COLOR,
        perceptual_roughness: 0.2,
        metallic: 0.8,
        ..default()
    });
    let photo_material = materials.add(StandardMaterial {
        base_color_texture: Some(texture),
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    let group = commands
        .spawn((
            descriptor.transform(),
            Visibility::default(),
            PhotoGroup {
                index,
                euler: descriptor.euler(),
            },
        ))
        .id();

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(layout.frame_size))),
        MeshMaterial3d(frame_material),
        Transform::from_translation(layout.frame_offset),
        PhotoFrame,
        ChildOf(group),
    ));

    let plane = commands
        .spawn((
            Mesh3d(meshes.add(Rectangle::from_size(layout.plane_size))),
            MeshMaterial3d(photo_material),
            Transform::IDENTITY,
            PhotoSurface {
                index,
                size: layout.plane_size,
            },
            ChildOf(group),
        ))
        .id();

    PhotoPlane { group, plane, index }
}
