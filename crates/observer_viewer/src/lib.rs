//! # Skirmish Observer
//!
//! Desktop replay viewer for skirmish match logs.
//!
//! This crate integrates the pure replay engine from `observer_core` with
//! Bevy for rendering, camera control, input, and the HUD. The match log is
//! loaded and parsed before the window opens; a bad log never reaches the
//! renderer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::PathBuf;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use observer_core::playback::PlaybackClock;
use observer_core::record::Perspective;

pub mod camera;
pub mod commands;
pub mod error;
pub mod loader;
pub mod playback;
pub mod plugins;
pub mod render;
pub mod ui;
pub mod view;

pub use error::{ObserverError, Result};
pub use plugins::ObserverPlugins;

use crate::playback::Playback;
use crate::view::{ActivePerspective, FogState, MatchReplay};

/// Startup configuration for the viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Path to the match log. Required; errors out if absent.
    pub log_path: Option<PathBuf>,
    /// Swap rows and columns once after parsing.
    pub transpose: bool,
    /// Initial viewing perspective.
    pub perspective: Perspective,
    /// Initial playback speed in round fractions per second.
    pub speed: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            transpose: false,
            perspective: Perspective::Omniscient,
            speed: 1.0,
        }
    }
}

/// Run the viewer.
///
/// Loads and parses the log first so that log errors surface before any
/// window is created.
///
/// # Errors
///
/// Returns an error if the log path is missing, unreadable, or malformed.
pub fn run(config: ViewerConfig) -> Result<()> {
    let record = loader::load_match(config.log_path.as_deref(), config.transpose)?;

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Skirmish Observer".into(),
                    resolution: (1280.0, 800.0).into(),
                    ..default()
                }),
                ..default()
            })
            .disable::<LogPlugin>(), // logging already initialized in main.rs
    );

    app.insert_resource(ClearColor(Color::srgb(0.10, 0.10, 0.13)));
    app.insert_resource(FogState::empty(&record));
    app.insert_resource(MatchReplay(record));
    app.insert_resource(Playback {
        clock: PlaybackClock::new(config.speed),
    });
    app.insert_resource(ActivePerspective(config.perspective));

    app.add_plugins(ObserverPlugins);

    app.run();
    Ok(())
}
