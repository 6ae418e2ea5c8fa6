use bevy::prelude::*;

/// Runtime record of a spawned photo: the frame group, the pickable surface
/// and the index of the descriptor it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoPlane {
    pub group: Entity,
    pub plane: Entity,
    pub index: usize,
}

/// Owned scene context. Lists only grow while the gallery runs; everything
/// is released together by `dispose`.
#[derive(Resource, Default, Debug)]
pub struct GalleryScene {
    photo_planes: Vec<PhotoPlane>,
    loaded_models: Vec<Entity>,
    static_entities: Vec<Entity>,
    particle_field: Option<Entity>,
}

impl GalleryScene {
    /// Register a constructed photo. Rejects a second plane for the same
    /// descriptor index.
    pub fn add_photo_plane(&mut self, plane: PhotoPlane) -> bool {
        if self.photo_plane(plane.index).is_some() {
            return false;
        }
        self.photo_planes.push(plane);
        true
    }

    pub fn photo_plane(&self, index: usize) -> Option<&PhotoPlane> {
        self.photo_planes.iter().find(|p| p.index == index)
    }

    pub fn photo_planes(&self) -> &[PhotoPlane] {
        &self.photo_planes
    }

    pub fn add_model(&mut self, model: Entity) {
        self.loaded_models.push(model);
    }

    pub fn loaded_models(&self) -> &[Entity] {
        &self.loaded_models
    }

    pub fn add_static(&mut self, entity: Entity) {
        self.static_entities.push(entity);
    }

    pub fn static_count(&self) -> usize {
        self.static_entities.len()
    }

    pub fn set_particle_field(&mut self, entity: Entity) {
        self.particle_field = Some(entity);
        self.static_entities.push(entity);
    }

    pub fn particle_field(&self) -> Option<Entity> {
        self.particle_field
    }

    /// Despawn every entity the gallery created and clear all lists.
    pub fn dispose(&mut self, commands: &mut Commands) {
        let roots = self
            .photo_planes
            .drain(..)
            .map(|p| p.group)
            .chain(self.loaded_models.drain(..))
            .chain(self.static_entities.drain(..));

        for entity in roots {
            commands.entity(entity).despawn();
        }
        self.particle_field = None;
    }

    pub fn is_empty(&self) -> bool {
        self.photo_planes.is_empty()
            && self.loaded_models.is_empty()
            && self.static_entities.is_empty()
    }
}

/// Release the scene when the app is shutting down.
pub fn dispose_on_exit(
    mut exit_events: EventReader<AppExit>,
    mut scene: ResMut<GalleryScene>,
    mut commands: Commands,
) {
    if exit_events.read().next().is_none() || scene.is_empty() {
        return;
    }
    info!("Disposing gallery scene");
    scene.dispose(&mut commands);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane(world: &mut World, index: usize) -> PhotoPlane {
        let group = world.spawn_empty().id();
        let plane = world.spawn(ChildOf(group)).id();
        PhotoPlane {
            group,
            plane,
            index,
        }
    }

    #[test]
    fn second_plane_for_same_index_is_rejected() {
        let mut world = World::new();
        let mut scene = GalleryScene::default();

        let first = plane(&mut world, 2);
        let duplicate = plane(&mut world, 2);

        assert!(scene.add_photo_plane(first));
        assert!(!scene.add_photo_plane(duplicate));
        assert_eq!(scene.photo_planes().len(), 1);
        assert_eq!(scene.photo_plane(2), Some(&first));
    }

    #[test]
    fn planes_are_looked_up_by_descriptor_index() {
        let mut world = World::new();
        let mut scene = GalleryScene::default();
        let a = plane(&mut world, 0);
        let b = plane(&mut world, 3);
        scene.add_photo_plane(a);
        scene.add_photo_plane(b);

        assert_eq!(scene.photo_plane(3).map(|p| p.plane), Some(b.plane));
        assert!(scene.photo_plane(1).is_none());
    }

    #[test]
    fn dispose_despawns_everything() {
        let mut world = World::new();
        let mut scene = GalleryScene::default();
        let photo = plane(&mut world, 0);
        let model = world.spawn_empty().id();
        let particles = world.spawn_empty().id();
        scene.add_photo_plane(photo);
        scene.add_model(model);
        scene.set_particle_field(particles);

        let mut queue = bevy::ecs::world::CommandQueue::default();
        let mut commands = Commands::new(&mut queue, &world);
        scene.dispose(&mut commands);
        queue.apply(&mut world);

        assert!(scene.is_empty());
        assert!(scene.particle_field().is_none());
        for entity in [photo.group, photo.plane, model, particles] {
            assert!(!world.entities().contains(entity));
        }
    }
}
