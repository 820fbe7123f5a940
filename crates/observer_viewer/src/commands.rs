//! Keyboard command mapping.
//!
//! Every user control is a variant of the closed [`ObserverCommand`] enum:
//! the keyboard layer only translates key codes into commands, and a single
//! exhaustive handler applies them. Adding a control means adding a variant,
//! and the compiler points at every place that must handle it.

use bevy::prelude::*;

use observer_core::record::{Perspective, Side};

use crate::camera::{pan_camera, zoom_camera, CameraSettings, ObserverCamera};
use crate::playback::Playback;
use crate::view::ActivePerspective;

/// Direction of a camera pan command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    /// Pan up.
    Up,
    /// Pan down.
    Down,
    /// Pan left.
    Left,
    /// Pan right.
    Right,
}

/// The full vocabulary of viewer controls.
#[derive(Debug, Clone, Copy, PartialEq, Event)]
pub enum ObserverCommand {
    /// Increase playback speed by one step.
    SpeedUp,
    /// Decrease playback speed by one step.
    SlowDown,
    /// Pause if running, resume if paused.
    TogglePause,
    /// Switch the fog perspective.
    SetPerspective(Perspective),
    /// Zoom the camera in by one step.
    ZoomIn,
    /// Zoom the camera out by one step.
    ZoomOut,
    /// Pan the camera. Emitted every frame while the key is held.
    Pan(PanDirection),
}

/// Map a key press to its discrete command, if any.
///
/// Pan keys are not listed here; they repeat while held and are mapped by
/// [`pan_for_key`].
#[must_use]
pub fn command_for_key(key: KeyCode) -> Option<ObserverCommand> {
    match key {
        KeyCode::ArrowUp => Some(ObserverCommand::SpeedUp),
        KeyCode::ArrowDown => Some(ObserverCommand::SlowDown),
        KeyCode::Space => Some(ObserverCommand::TogglePause),
        KeyCode::Digit0 => Some(ObserverCommand::SetPerspective(Perspective::Omniscient)),
        KeyCode::Digit1 => Some(ObserverCommand::SetPerspective(Perspective::Side(
            Side::Defender,
        ))),
        KeyCode::Digit2 => Some(ObserverCommand::SetPerspective(Perspective::Side(
            Side::Attacker,
        ))),
        KeyCode::Equal => Some(ObserverCommand::ZoomIn),
        KeyCode::Minus => Some(ObserverCommand::ZoomOut),
        _ => None,
    }
}

/// Map a held key to its pan direction, if any.
#[must_use]
pub fn pan_for_key(key: KeyCode) -> Option<PanDirection> {
    match key {
        KeyCode::KeyW => Some(PanDirection::Up),
        KeyCode::KeyS => Some(PanDirection::Down),
        KeyCode::KeyA => Some(PanDirection::Left),
        KeyCode::KeyD => Some(PanDirection::Right),
        _ => None,
    }
}

/// Plugin wiring keyboard input to the command handler.
pub struct CommandPlugin;

impl Plugin for CommandPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ObserverCommand>()
            .add_systems(Update, (map_keyboard_input, apply_commands).chain());
    }
}

/// Translates raw key state into [`ObserverCommand`] events.
fn map_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<ObserverCommand>,
) {
    for key in keyboard.get_just_pressed() {
        if let Some(command) = command_for_key(*key) {
            commands.send(command);
        }
    }
    for key in keyboard.get_pressed() {
        if let Some(direction) = pan_for_key(*key) {
            commands.send(ObserverCommand::Pan(direction));
        }
    }
}

/// The single command handler. Exhaustive by construction.
fn apply_commands(
    mut events: EventReader<ObserverCommand>,
    time: Res<Time>,
    settings: Res<CameraSettings>,
    mut playback: ResMut<Playback>,
    mut perspective: ResMut<ActivePerspective>,
    mut camera: Query<&mut Transform, With<ObserverCamera>>,
) {
    for command in events.read() {
        match *command {
            ObserverCommand::SpeedUp => playback.clock.speed_up(),
            ObserverCommand::SlowDown => playback.clock.slow_down(),
            ObserverCommand::TogglePause => playback.clock.toggle_pause(),
            ObserverCommand::SetPerspective(next) => {
                if perspective.0 != next {
                    perspective.0 = next;
                }
            }
            ObserverCommand::ZoomIn => {
                if let Ok(mut transform) = camera.get_single_mut() {
                    zoom_camera(&mut transform, -1.0, &settings);
                }
            }
            ObserverCommand::ZoomOut => {
                if let Ok(mut transform) = camera.get_single_mut() {
                    zoom_camera(&mut transform, 1.0, &settings);
                }
            }
            ObserverCommand::Pan(direction) => {
                if let Ok(mut transform) = camera.get_single_mut() {
                    pan_camera(&mut transform, direction, time.delta_seconds(), &settings);
                }
            }
        }
    }
}
