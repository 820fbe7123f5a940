//! Camera plugin for 2D camera control.
//!
//! Provides keyboard panning and zoom through the command layer, plus mouse
//! wheel zoom. The camera starts centered on the map, zoomed so the whole
//! grid fits the window.

use bevy::prelude::*;

use crate::commands::PanDirection;
use crate::render::{map_world_center, map_world_size, TILE_SIZE};
use crate::view::MatchReplay;

/// Settings for camera behavior.
#[derive(Resource)]
pub struct CameraSettings {
    /// Pan speed in world units per second at scale 1.
    pub pan_speed: f32,
    /// Scale change per zoom step.
    pub zoom_step: f32,
    /// Minimum scale (most zoomed in).
    pub min_scale: f32,
    /// Maximum scale (most zoomed out).
    pub max_scale: f32,
    /// Largest on-screen tile size at startup, in pixels.
    pub max_tile_pixels: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pan_speed: 400.0,
            zoom_step: 0.1,
            min_scale: 0.25,
            max_scale: 8.0,
            max_tile_pixels: 100.0,
        }
    }
}

/// Marker component for the viewer camera.
#[derive(Component)]
pub struct ObserverCamera;

/// Plugin for 2D camera control.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, camera_mouse_zoom);
    }
}

/// Startup scale that fits the whole map into the window without making
/// individual tiles larger than `max_tile_pixels`.
#[must_use]
pub fn fit_scale(map_size: Vec2, window_size: Vec2, settings: &CameraSettings) -> f32 {
    let fit = (map_size.x / window_size.x).max(map_size.y / window_size.y);
    let tile_cap = TILE_SIZE / settings.max_tile_pixels;
    fit.max(tile_cap).clamp(settings.min_scale, settings.max_scale)
}

/// Spawns the camera centered on the map at the fitting zoom level.
fn spawn_camera(
    mut commands: Commands,
    windows: Query<&Window>,
    replay: Res<MatchReplay>,
    settings: Res<CameraSettings>,
) {
    let window_size = windows
        .get_single()
        .map_or(Vec2::new(1280.0, 800.0), |w| Vec2::new(w.width(), w.height()));

    let scale = fit_scale(
        map_world_size(replay.0.rows, replay.0.cols),
        window_size,
        &settings,
    );

    let center = map_world_center(replay.0.rows, replay.0.cols);
    commands.spawn((
        Camera2dBundle {
            transform: Transform {
                translation: center.extend(999.0),
                scale: Vec3::splat(scale),
                ..default()
            },
            ..default()
        },
        ObserverCamera,
    ));
}

/// Applies one zoom step. Positive direction zooms out.
pub fn zoom_camera(transform: &mut Transform, direction: f32, settings: &CameraSettings) {
    let new_scale = (transform.scale.x + direction * settings.zoom_step)
        .clamp(settings.min_scale, settings.max_scale);
    transform.scale = Vec3::splat(new_scale);
}

/// Applies one frame of panning in the given direction, scaled by zoom so
/// panning covers the same on-screen distance at any zoom level.
pub fn pan_camera(
    transform: &mut Transform,
    direction: PanDirection,
    delta_secs: f32,
    settings: &CameraSettings,
) {
    let dir = match direction {
        PanDirection::Up => Vec2::Y,
        PanDirection::Down => Vec2::NEG_Y,
        PanDirection::Left => Vec2::NEG_X,
        PanDirection::Right => Vec2::X,
    };
    let delta = dir * settings.pan_speed * delta_secs * transform.scale.x;
    transform.translation.x += delta.x;
    transform.translation.y += delta.y;
}

/// Handles mouse wheel zoom.
fn camera_mouse_zoom(
    mut scroll_events: EventReader<bevy::input::mouse::MouseWheel>,
    settings: Res<CameraSettings>,
    mut camera_query: Query<&mut Transform, With<ObserverCamera>>,
) {
    let Ok(mut transform) = camera_query.get_single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        zoom_camera(&mut transform, -event.y, &settings);
    }
}
