pub mod assets;
pub mod camera;
pub mod core;
pub mod error;
pub mod interaction;
pub mod loading;
pub mod scene;
pub mod systems;
