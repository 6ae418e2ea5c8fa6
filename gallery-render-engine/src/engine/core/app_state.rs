use bevy::prelude::*;

/// `Loading` until the loading screen is dismissed, then `Running`.
/// Assets that settle after the switch still join the scene.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

pub fn log_running_state() {
    info!("→ Gallery running");
}
