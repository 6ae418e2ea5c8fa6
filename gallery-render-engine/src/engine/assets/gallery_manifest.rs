use bevy::prelude::*;
use constants::gallery::{MODEL_PATH, SAMPLE_PHOTOS};
use constants::timing::LOADING_CEILING_SECS;
use serde::{Deserialize, Serialize};

use super::photo_descriptor::PhotoDescriptor;

/// Gallery layout as a Bevy asset. Mirrors `gallery/manifest.json`.
/// Falls back to the built-in sample gallery when the file is unavailable.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath, Resource)]
pub struct GalleryManifest {
    pub photos: Vec<PhotoDescriptor>,
    #[serde(default = "default_model_path")]
    pub model: String,
    #[serde(default = "default_loading_ceiling")]
    pub loading_ceiling_secs: f32,
}

fn default_model_path() -> String {
    MODEL_PATH.to_string()
}

fn default_loading_ceiling() -> f32 {
    LOADING_CEILING_SECS
}

impl Default for GalleryManifest {
    fn default() -> Self {
        Self {
            photos: SAMPLE_PHOTOS.iter().map(PhotoDescriptor::from).collect(),
            model: default_model_path(),
            loading_ceiling_secs: default_loading_ceiling(),
        }
    }
}

impl GalleryManifest {
    pub fn photo(&self, index: usize) -> Option<&PhotoDescriptor> {
        self.photos.get(index)
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }
}
