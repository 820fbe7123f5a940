//! Map, unit and fog rendering.
//!
//! Coordinate convention: grid `col` runs along +X, grid `row` along -Y,
//! one cell per [`TILE_SIZE`] world units. The engine hands this module
//! grid-space coordinates; everything pixel-related stays here.

use std::collections::HashMap;

use bevy::prelude::*;

use observer_core::interpolate::{interpolate, InterpolatedUnit};
use observer_core::record::{CellPos, Side, TerrainKind, UnitKind};

use crate::playback::Playback;
use crate::view::{recompute_fog, FogState, MatchReplay};

/// World-unit size of one map cell.
pub const TILE_SIZE: f32 = 32.0;

/// Sub-cell offset applied to ranged units, a presentation constant.
pub const ARCHER_OFFSET: Vec2 = Vec2::new(TILE_SIZE / 6.0, -TILE_SIZE / 6.0);

/// Elevation at which terrain shading bottoms out.
const SHADE_MAX_HEIGHT: f32 = 10.0;

const TERRAIN_Z: f32 = 0.0;
const UNIT_Z: f32 = 1.0;
const FOG_Z: f32 = 2.0;

/// World position of a cell center for (possibly fractional) grid
/// coordinates.
#[must_use]
pub fn cell_center(row: f32, col: f32) -> Vec2 {
    Vec2::new((col + 0.5) * TILE_SIZE, -(row + 0.5) * TILE_SIZE)
}

/// World-space size of the whole map.
#[must_use]
pub fn map_world_size(rows: u32, cols: u32) -> Vec2 {
    Vec2::new(cols as f32 * TILE_SIZE, rows as f32 * TILE_SIZE)
}

/// World position of the map center.
#[must_use]
pub fn map_world_center(rows: u32, cols: u32) -> Vec2 {
    Vec2::new(
        cols as f32 * TILE_SIZE / 2.0,
        -(rows as f32 * TILE_SIZE / 2.0),
    )
}

/// Tile color for a terrain kind, darkened by elevation.
#[must_use]
pub fn terrain_color(kind: TerrainKind, height: u32) -> Color {
    let (r, g, b) = match kind {
        TerrainKind::Plains => (0.45, 0.62, 0.34),
        TerrainKind::Forest => (0.18, 0.38, 0.20),
        TerrainKind::Water => (0.20, 0.36, 0.65),
    };
    let shade = 1.0 - (height as f32 / SHADE_MAX_HEIGHT).min(0.9);
    Color::srgb(r * shade, g * shade, b * shade)
}

/// Sprite color for a side's units.
#[must_use]
pub fn side_color(side: Side) -> Color {
    match side {
        Side::Defender => Color::srgb(0.20, 0.35, 0.90),
        Side::Attacker => Color::srgb(0.85, 0.20, 0.15),
    }
}

/// World position of a unit, including the per-kind offset.
#[must_use]
pub fn unit_world_pos(row: f32, col: f32, kind: UnitKind) -> Vec2 {
    let center = cell_center(row, col);
    match kind {
        UnitKind::Warrior => center,
        UnitKind::Archer => center + ARCHER_OFFSET,
    }
}

/// Sprite size per unit kind.
#[must_use]
pub fn unit_sprite_size(kind: UnitKind) -> Vec2 {
    match kind {
        UnitKind::Warrior => Vec2::splat(TILE_SIZE * 2.0 / 3.0),
        UnitKind::Archer => Vec2::splat(TILE_SIZE / 2.0),
    }
}

/// Marker component for terrain tiles.
#[derive(Component)]
pub struct TerrainTile;

/// Fog overlay tile covering one map cell.
#[derive(Component)]
pub struct FogTile(pub CellPos);

/// A rendered unit, keyed by its log id.
#[derive(Component)]
pub struct ReplayUnit {
    /// Unit id from the log.
    pub id: u32,
}

/// Plugin for map, unit and fog sprite rendering.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_map)
            .add_systems(Update, (sync_units, apply_fog).after(recompute_fog));
    }
}

/// Spawns one terrain sprite and one (initially hidden) fog sprite per cell.
fn spawn_map(mut commands: Commands, replay: Res<MatchReplay>) {
    let record = &replay.0;
    for (pos, kind) in record.terrain.iter() {
        let height = record.heights.get(pos).copied().unwrap_or(0);
        let center = cell_center(pos.row as f32, pos.col as f32);
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: terrain_color(*kind, height),
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                transform: Transform::from_translation(center.extend(TERRAIN_Z)),
                ..default()
            },
            TerrainTile,
        ));
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::srgba(0.02, 0.02, 0.05, 0.92),
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                transform: Transform::from_translation(center.extend(FOG_Z)),
                visibility: Visibility::Hidden,
                ..default()
            },
            FogTile(pos),
        ));
    }
    tracing::info!(
        rows = record.rows,
        cols = record.cols,
        "spawned terrain grid"
    );
}

/// The renderable unit set for the current clock state.
fn renderable_units(replay: &MatchReplay, playback: &Playback) -> Vec<InterpolatedUnit> {
    let round = playback.clock.current_round();
    if replay.0.is_terminal_round(round) {
        // no transition out of the terminal round; draw it statically
        replay.0.rounds[round]
            .units
            .iter()
            .map(|u| InterpolatedUnit {
                id: u.id,
                row: u.pos.row as f32,
                col: u.pos.col as f32,
                owner: u.owner,
                kind: u.kind,
                hp: u.hp,
                stamina: u.stamina,
            })
            .collect()
    } else {
        let (current, next) = replay.0.round_pair(round);
        interpolate(current, next, playback.clock.fraction())
    }
}

/// Reconciles unit entities against the interpolated set every frame:
/// moves continuing units, despawns removed ids, spawns new ones, and hides
/// units standing in fogged cells.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sync_units(
    mut commands: Commands,
    replay: Res<MatchReplay>,
    playback: Res<Playback>,
    fog: Res<FogState>,
    mut existing: Query<(Entity, &ReplayUnit, &mut Transform, &mut Visibility)>,
) {
    let units = renderable_units(&replay, &playback);
    let mut by_id: HashMap<u32, &InterpolatedUnit> = units.iter().map(|u| (u.id, u)).collect();

    for (entity, unit, mut transform, mut visibility) in existing.iter_mut() {
        if let Some(u) = by_id.remove(&unit.id) {
            let pos = unit_world_pos(u.row, u.col, u.kind);
            transform.translation.x = pos.x;
            transform.translation.y = pos.y;
            *visibility = fog_visibility(&fog, u);
        } else {
            commands.entity(entity).despawn();
        }
    }

    for u in by_id.into_values() {
        let pos = unit_world_pos(u.row, u.col, u.kind);
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: side_color(u.owner),
                    custom_size: Some(unit_sprite_size(u.kind)),
                    ..default()
                },
                transform: Transform::from_translation(pos.extend(UNIT_Z)),
                visibility: fog_visibility(&fog, u),
                ..default()
            },
            ReplayUnit { id: u.id },
        ));
    }
}

/// A unit in a fogged cell is hidden along with the cell.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fog_visibility(fog: &FogState, unit: &InterpolatedUnit) -> Visibility {
    let cell = CellPos::new(unit.row.round() as u32, unit.col.round() as u32);
    if fog.grid.is_hidden(cell) {
        Visibility::Hidden
    } else {
        Visibility::Visible
    }
}

/// Toggles fog overlay tiles whenever the fog grid changes.
fn apply_fog(fog: Res<FogState>, mut tiles: Query<(&FogTile, &mut Visibility)>) {
    if !fog.is_changed() {
        return;
    }
    for (tile, mut visibility) in tiles.iter_mut() {
        *visibility = if fog.grid.is_hidden(tile.0) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
