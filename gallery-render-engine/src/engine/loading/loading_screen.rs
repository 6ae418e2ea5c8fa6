//! Loading indicator presentation: a DOM element on the web, a UI overlay on
//! native builds. Hiding waits, fades the opacity, then removes it from layout.

use bevy::color::Alpha;
use bevy::prelude::*;
use constants::timing::{LOADING_FADE_DELAY_SECS, LOADING_FADE_SECS};
use std::time::Duration;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    Visible,
    Waiting,
    Fading,
    Removed,
}

#[derive(Resource, Debug)]
pub struct LoadingScreen {
    phase: FadePhase,
    timer: Timer,
}

impl Default for LoadingScreen {
    fn default() -> Self {
        Self {
            phase: FadePhase::Visible,
            timer: Timer::from_seconds(LOADING_FADE_DELAY_SECS, TimerMode::Once),
        }
    }
}

impl LoadingScreen {
    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    /// Start the hide sequence. Only the first call has an effect.
    pub fn begin_hide(&mut self) -> bool {
        if self.phase != FadePhase::Visible {
            return false;
        }
        self.phase = FadePhase::Waiting;
        self.timer = Timer::from_seconds(LOADING_FADE_DELAY_SECS, TimerMode::Once);
        true
    }

    /// Advance the fade. Returns the new phase when it changes.
    pub fn advance(&mut self, delta: Duration) -> Option<FadePhase> {
        let next = match self.phase {
            FadePhase::Visible | FadePhase::Removed => return None,
            FadePhase::Waiting => FadePhase::Fading,
            FadePhase::Fading => FadePhase::Removed,
        };
        if !self.timer.tick(delta).finished() {
            return None;
        }
        self.phase = next;
        self.timer = Timer::from_seconds(LOADING_FADE_SECS, TimerMode::Once);
        Some(next)
    }
}

/// Marker for the native loading overlay root.
#[derive(Component)]
pub struct LoadingOverlay;

/// Marker for the native progress label.
#[derive(Component)]
pub struct LoadingOverlayText;

pub fn animate_loading_screen(
    mut screen: ResMut<LoadingScreen>,
    time: Res<Time>,
    mut overlays: Query<(&mut Node, &mut BackgroundColor), With<LoadingOverlay>>,
    mut labels: Query<&mut TextColor, With<LoadingOverlayText>>,
) {
    let Some(phase) = screen.advance(time.delta()) else {
        return;
    };
    debug!("Loading screen phase: {:?}", phase);

    dom::apply_phase(phase);

    for (mut node, mut background) in &mut overlays {
        match phase {
            FadePhase::Fading => background.0.set_alpha(0.0),
            FadePhase::Removed => node.display = Display::None,
            _ => {}
        }
    }
    if phase == FadePhase::Fading {
        for mut colour in &mut labels {
            colour.0.set_alpha(0.0);
        }
    }
}

pub fn update_loading_overlay_text(
    progress: Res<LoadingProgress>,
    mut labels: Query<&mut Text, With<LoadingOverlayText>>,
) {
    if !progress.is_changed() {
        return;
    }
    for mut text in &mut labels {
        text.0 = format!("Loading gallery... {:.0}%", progress.ratio() * 100.0);
    }
}

pub fn spawn_loading_overlay(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            LoadingOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading gallery..."),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                LoadingOverlayText,
            ));
        });
}

/// Loading screen element in the host page.
pub mod dom {
    use super::FadePhase;

    pub const LOADING_SCREEN_ID: &str = "loading-screen";

    #[cfg(target_arch = "wasm32")]
    fn set_style(property: &str, value: &str) {
        use wasm_bindgen::JsCast;

        let Some(element) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(LOADING_SCREEN_ID))
        else {
            return;
        };
        if let Ok(html) = element.dyn_into::<web_sys::HtmlElement>() {
            style_applied(property, html.style().set_property(property, value));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn set_style(_property: &str, _value: &str) {}

    /// Whether a style write took effect. DOM errors are logged, not raised.
    #[cfg(any(target_arch = "wasm32", test))]
    pub(super) fn style_applied<E: std::fmt::Debug>(property: &str, result: Result<(), E>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                bevy::log::warn!("Failed to set loading screen {property}: {:?}", e);
                false
            }
        }
    }

    pub fn apply_phase(phase: FadePhase) {
        match phase {
            FadePhase::Fading => set_style("opacity", "0"),
            FadePhase::Removed => set_style("display", "none"),
            _ => {}
        }
    }

    /// Remove the indicator immediately, used when the engine cannot start.
    pub fn hide_now() {
        set_style("opacity", "0");
        set_style("display", "none");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_waits_then_fades_then_removes() {
        let mut screen = LoadingScreen::default();
        assert_eq!(screen.advance(Duration::from_secs(5)), None);

        assert!(screen.begin_hide());
        assert!(!screen.begin_hide());
        assert_eq!(screen.advance(Duration::from_millis(900)), None);
        assert_eq!(
            screen.advance(Duration::from_millis(100)),
            Some(FadePhase::Fading)
        );
        assert_eq!(screen.advance(Duration::from_millis(400)), None);
        assert_eq!(
            screen.advance(Duration::from_millis(100)),
            Some(FadePhase::Removed)
        );
        assert_eq!(screen.advance(Duration::from_secs(1)), None);
        assert_eq!(screen.phase(), FadePhase::Removed);
    }

    #[test]
    fn style_errors_are_reported_not_dropped() {
        assert!(dom::style_applied("opacity", Ok::<(), &str>(())));
        assert!(!dom::style_applied("display", Err("element detached")));
    }
}
