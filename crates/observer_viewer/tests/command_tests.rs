//! Key binding tests for the command layer.

use bevy::prelude::KeyCode;

use observer_core::record::{Perspective, Side};
use observer_viewer::commands::{command_for_key, pan_for_key, ObserverCommand, PanDirection};

#[test]
fn speed_keys_map_to_speed_commands() {
    assert_eq!(
        command_for_key(KeyCode::ArrowUp),
        Some(ObserverCommand::SpeedUp)
    );
    assert_eq!(
        command_for_key(KeyCode::ArrowDown),
        Some(ObserverCommand::SlowDown)
    );
}

#[test]
fn space_toggles_pause() {
    assert_eq!(
        command_for_key(KeyCode::Space),
        Some(ObserverCommand::TogglePause)
    );
}

#[test]
fn digit_keys_select_perspectives() {
    assert_eq!(
        command_for_key(KeyCode::Digit0),
        Some(ObserverCommand::SetPerspective(Perspective::Omniscient))
    );
    assert_eq!(
        command_for_key(KeyCode::Digit1),
        Some(ObserverCommand::SetPerspective(Perspective::Side(
            Side::Defender
        )))
    );
    assert_eq!(
        command_for_key(KeyCode::Digit2),
        Some(ObserverCommand::SetPerspective(Perspective::Side(
            Side::Attacker
        )))
    );
}

#[test]
fn zoom_keys_map_to_zoom_commands() {
    assert_eq!(
        command_for_key(KeyCode::Equal),
        Some(ObserverCommand::ZoomIn)
    );
    assert_eq!(
        command_for_key(KeyCode::Minus),
        Some(ObserverCommand::ZoomOut)
    );
}

#[test]
fn wasd_maps_to_pan_directions() {
    assert_eq!(pan_for_key(KeyCode::KeyW), Some(PanDirection::Up));
    assert_eq!(pan_for_key(KeyCode::KeyS), Some(PanDirection::Down));
    assert_eq!(pan_for_key(KeyCode::KeyA), Some(PanDirection::Left));
    assert_eq!(pan_for_key(KeyCode::KeyD), Some(PanDirection::Right));
}

#[test]
fn unbound_keys_map_to_nothing() {
    assert_eq!(command_for_key(KeyCode::KeyQ), None);
    assert_eq!(command_for_key(KeyCode::Enter), None);
    // pan keys are held-key bindings, not discrete commands
    assert_eq!(command_for_key(KeyCode::KeyW), None);
    assert_eq!(pan_for_key(KeyCode::Space), None);
}
