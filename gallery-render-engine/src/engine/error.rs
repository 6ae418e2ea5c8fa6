//! Error types for gallery initialisation and asset loading.
//!
//! None of these are fatal to the page: each variant is logged and mapped to
//! a fallback (placeholder model, missing photo, forced loading completion).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GalleryError {
    /// A required engine or browser capability is absent at startup.
    #[error("missing capability: {0}")]
    MissingCapability(String),

    /// A single asset failed to fetch or decode.
    #[error("failed to load asset '{path}': {reason}")]
    AssetLoad { path: String, reason: String },

    /// Loading exceeded the configured ceiling.
    #[error("loading did not finish within {seconds}s")]
    Timeout { seconds: f32 },
}

impl GalleryError {
    pub fn asset_load(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::AssetLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type GalleryResult<T> = Result<T, GalleryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_load_message_names_the_path() {
        let err = GalleryError::asset_load("photos/a.jpg", "404 Not Found");
        assert_eq!(
            err.to_string(),
            "failed to load asset 'photos/a.jpg': 404 Not Found"
        );
    }

    #[test]
    fn timeout_message_includes_ceiling() {
        let err = GalleryError::Timeout { seconds: 10.0 };
        assert_eq!(err.to_string(), "loading did not finish within 10s");
    }
}
