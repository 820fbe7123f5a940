//! Viewer plugins for Bevy.
//!
//! Aggregates the observer's plugins into a single registration point.

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

use crate::camera::CameraPlugin;
use crate::commands::CommandPlugin;
use crate::playback::PlaybackPlugin;
use crate::render::RenderPlugin;
use crate::ui::HudPlugin;
use crate::view::ViewPlugin;

/// Main plugin group containing all viewer plugins.
///
/// # Example
/// ```ignore
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(ObserverPlugins)
///     .run();
/// ```
pub struct ObserverPlugins;

impl PluginGroup for ObserverPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(CameraPlugin)
            .add(CommandPlugin)
            .add(PlaybackPlugin)
            .add(ViewPlugin)
            .add(RenderPlugin)
            .add(HudPlugin)
    }
}
