use bevy::prelude::*;
use std::time::Duration;

use crate::engine::core::app_state::AppState;
use crate::engine::error::GalleryError;
use crate::engine::loading::loading_screen::LoadingScreen;
use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    AssetsLoaded,
    Timeout,
    Dismissed,
}

impl HideReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            HideReason::AssetsLoaded => "assets_loaded",
            HideReason::Timeout => "timeout",
            HideReason::Dismissed => "dismissed",
        }
    }
}

/// Request to hide the loading indicator. Only the first one has an effect.
#[derive(Event, Debug, Clone, Copy)]
pub struct DismissLoadingEvent {
    pub reason: HideReason,
}

/// Loading indicator state plus the wall-clock ceiling that forces it closed.
#[derive(Resource, Debug)]
pub struct LoadingGate {
    ceiling: Timer,
    ceiling_active: bool,
    hidden: Option<HideReason>,
}

impl LoadingGate {
    pub fn new(ceiling_secs: f32) -> Self {
        Self {
            ceiling: Timer::from_seconds(ceiling_secs, TimerMode::Once),
            ceiling_active: true,
            hidden: None,
        }
    }

    /// Replace the ceiling length, keeping time already elapsed. A length
    /// that is not a representable duration leaves the current one in place.
    pub fn set_ceiling(&mut self, ceiling_secs: f32) {
        if !self.ceiling_active {
            return;
        }
        let duration = Some(ceiling_secs)
            .filter(|secs| secs.is_finite())
            .and_then(|secs| Duration::try_from_secs_f32(secs.max(0.0)).ok());
        match duration {
            Some(duration) => self.ceiling.set_duration(duration),
            None => warn!(
                "Ignoring loading ceiling of {ceiling_secs}s; keeping {}s",
                self.ceiling_secs()
            ),
        }
    }

    /// Hide the indicator. Returns false if it was already hidden.
    pub fn hide(&mut self, reason: HideReason) -> bool {
        if self.hidden.is_some() {
            return false;
        }
        self.hidden = Some(reason);
        self.ceiling_active = false;
        true
    }

    /// Advance the ceiling timer. Returns true once, when it expires while the
    /// indicator is still visible.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.ceiling_active || self.hidden.is_some() {
            return false;
        }
        if self.ceiling.tick(delta).just_finished() {
            self.ceiling_active = false;
            return true;
        }
        false
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.is_some()
    }

    pub fn hidden_reason(&self) -> Option<HideReason> {
        self.hidden
    }

    pub fn ceiling_active(&self) -> bool {
        self.ceiling_active
    }

    pub fn ceiling_secs(&self) -> f32 {
        self.ceiling.duration().as_secs_f32()
    }
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new(constants::timing::LOADING_CEILING_SECS)
    }
}

pub fn tick_loading_ceiling(
    mut gate: ResMut<LoadingGate>,
    time: Res<Time>,
    mut dismiss: EventWriter<DismissLoadingEvent>,
) {
    if gate.tick(time.delta()) {
        let err = GalleryError::Timeout {
            seconds: gate.ceiling_secs(),
        };
        warn!("{err}; showing the gallery anyway");
        dismiss.write(DismissLoadingEvent {
            reason: HideReason::Timeout,
        });
    }
}

/// Every started asset has settled, successfully or not. The model joins
/// the count when its probe starts, so a pending probe holds completion back.
pub fn dismiss_on_completion(
    mut progress: ResMut<LoadingProgress>,
    mut dismiss: EventWriter<DismissLoadingEvent>,
) {
    if progress.take_completion() {
        info!(
            "All assets settled: {} loaded, {} failed",
            progress.loaded(),
            progress.failed()
        );
        dismiss.write(DismissLoadingEvent {
            reason: HideReason::AssetsLoaded,
        });
    }
}

/// Single entry point that hides the indicator, starts its fade and moves
/// the app into `Running`.
pub fn process_dismiss_requests(
    mut events: EventReader<DismissLoadingEvent>,
    mut gate: ResMut<LoadingGate>,
    mut screen: ResMut<LoadingScreen>,
    mut next_state: ResMut<NextState<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in events.read() {
        if !gate.hide(event.reason) {
            debug!("Loading indicator already hidden, ignoring {:?}", event.reason);
            continue;
        }
        info!("Hiding loading indicator ({})", event.reason.as_str());
        screen.begin_hide();
        next_state.set(AppState::Running);
        rpc_interface.send_notification(
            "loading_complete",
            serde_json::json!({ "reason": event.reason.as_str() }),
        );
    }
}
