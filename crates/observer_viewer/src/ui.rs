//! Replay HUD using egui.
//!
//! A top status bar (round, score, speed, perspective) and a bottom help
//! bar with the key bindings. Pause and match-end states get a banner.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use observer_core::record::{Perspective, Side};

use crate::playback::Playback;
use crate::view::{ActivePerspective, MatchReplay};

/// Plugin for the replay HUD.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, (ui_status_bar, ui_help_bar, ui_banner));
    }
}

/// Human-readable perspective label.
#[must_use]
pub fn perspective_label(perspective: Perspective) -> &'static str {
    match perspective {
        Perspective::Omniscient => "observer",
        Perspective::Side(Side::Defender) => "defender",
        Perspective::Side(Side::Attacker) => "attacker",
    }
}

fn ui_status_bar(
    mut contexts: EguiContexts,
    replay: Res<MatchReplay>,
    playback: Res<Playback>,
    perspective: Res<ActivePerspective>,
) {
    let ctx = contexts.ctx_mut();
    let round = playback.clock.current_round();
    let snapshot = &replay.0.rounds[round];

    egui::TopBottomPanel::top("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!("Round {}", snapshot.round))
                    .size(16.0)
                    .strong(),
            );
            ui.separator();
            ui.label(format!("Score {}", snapshot.score));
            ui.separator();
            ui.label(format!("Speed {:.1}", playback.clock.speed()));
            ui.separator();
            ui.label(format!("View: {}", perspective_label(perspective.0)));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "{} / {}",
                        snapshot.round,
                        replay.0.rounds[replay.0.final_round_index()].round
                    ))
                    .weak(),
                );
            });
        });
    });
}

fn ui_help_bar(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    egui::TopBottomPanel::bottom("help_bar").show(ctx, |ui| {
        ui.label(
            egui::RichText::new(
                "space pause | up/down speed | 0/1/2 view | wasd pan | +/- or wheel zoom",
            )
            .size(12.0)
            .weak(),
        );
    });
}

fn ui_banner(mut contexts: EguiContexts, replay: Res<MatchReplay>, playback: Res<Playback>) {
    let ended = replay.0.is_terminal_round(playback.clock.current_round());
    let paused = playback.clock.is_paused();
    if !ended && !paused {
        return;
    }
    let ctx = contexts.ctx_mut();
    egui::Area::new(egui::Id::new("banner"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 40.0))
        .show(ctx, |ui| {
            let (text, color) = if ended {
                ("MATCH ENDED", egui::Color32::from_rgb(230, 200, 80))
            } else {
                ("PAUSED", egui::Color32::WHITE)
            };
            ui.label(egui::RichText::new(text).size(28.0).strong().color(color));
        });
}
