use bevy::prelude::*;
use constants::gallery::SamplePhoto;
use serde::{Deserialize, Serialize};

/// One gallery photo: texture location plus the transform of its frame group.
/// Rotation is an XYZ Euler triple in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoDescriptor {
    pub url: String,
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl PhotoDescriptor {
    pub fn translation(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn euler(&self) -> Vec3 {
        Vec3::from_array(self.rotation)
    }

    pub fn scale_factors(&self) -> Vec3 {
        Vec3::from_array(self.scale)
    }

    /// Transform applied to the photo group when it is spawned.
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.translation(),
            rotation: euler_xyz(self.euler()),
            scale: self.scale_factors(),
        }
    }
}

impl From<&SamplePhoto> for PhotoDescriptor {
    fn from(sample: &SamplePhoto) -> Self {
        Self {
            url: sample.url.to_string(),
            position: sample.position.to_array(),
            rotation: sample.rotation.to_array(),
            scale: sample.scale.to_array(),
        }
    }
}

/// Quaternion for an XYZ-ordered Euler triple.
pub fn euler_xyz(euler: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z)
}
