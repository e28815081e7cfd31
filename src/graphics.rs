//! Wireframe view of a running match, drawn with gizmos.
//!
//! Only the windowed binary adds [`ArenaViewPlugin`]; headless apps and tests
//! never touch it.

use crate::arena::ArenaMap;
use crate::character::CharacterController;
use crate::config::ArenaConfig;
use crate::menu::GameState;
use crate::pickup::Pickup;
use crate::projectile::{ProjectileKind, ProjectilePool};
use crate::services::{EffectKind, EffectRegistry};
use bevy::prelude::*;

const BLAST_DRAW_RADIUS: f32 = 10.0;

pub struct ArenaViewPlugin;

impl Plugin for ArenaViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera).add_systems(
            Update,
            arena_gizmo_system.run_if(in_state(GameState::Playing)),
        );
    }
}

/// Fixed camera looking down across the arena.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 260.0, 320.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    info!("[view] camera spawned");
}

fn kind_color(kind: ProjectileKind) -> Color {
    match kind {
        ProjectileKind::Normal => Color::srgb(1.0, 0.9, 0.3),
        ProjectileKind::Grappler => Color::srgb(1.0, 0.09, 1.0),
        ProjectileKind::Bomb => Color::srgb(1.0, 0.35, 0.1),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn arena_gizmo_system(
    mut gizmos: Gizmos,
    config: Res<ArenaConfig>,
    map: Option<Res<ArenaMap>>,
    pool: Option<Res<ProjectilePool>>,
    effects: Res<EffectRegistry>,
    characters: Query<&CharacterController>,
    pickups: Query<&Pickup>,
) {
    if let Some(map) = map {
        let extent = map.floor_half_extent;
        gizmos.cuboid(
            Transform::from_xyz(0.0, map.floor_height, 0.0)
                .with_scale(Vec3::new(extent * 2.0, 0.01, extent * 2.0)),
            Color::srgb(0.3, 0.3, 0.35),
        );
        for block in &map.blocks {
            gizmos.cuboid(
                Transform::from_translation((block.min + block.max) * 0.5)
                    .with_scale(block.max - block.min),
                Color::srgb(0.55, 0.55, 0.6),
            );
        }
    }

    for character in &characters {
        let body = character.hit_capsule(&config);
        let color = match (character.is_stunned(), character.is_player()) {
            (true, _) => Color::srgb(0.5, 0.5, 0.5),
            (false, true) => Color::srgb(0.2, 0.8, 1.0),
            (false, false) => Color::srgb(1.0, 0.3, 0.3),
        };
        let top = body.base + Vec3::Y * body.height;
        gizmos.sphere(Isometry3d::from_translation(body.base), body.radius, color);
        gizmos.sphere(Isometry3d::from_translation(top), body.radius, color);
        gizmos.line(body.base, top, color);

        let state = character.state();
        let muzzle = top + state.forward * 12.0;
        gizmos.line(top, muzzle, Color::WHITE);

        if let Some(pool) = pool.as_deref() {
            if let Some((hook, anchor)) = character.grapple_tether(pool, &config) {
                gizmos.line(hook, anchor, kind_color(ProjectileKind::Grappler));
            }
        }
    }

    if let Some(pool) = pool.as_deref() {
        for projectile in pool.iter().filter(|p| !p.is_dead()) {
            gizmos.sphere(
                Isometry3d::from_translation(projectile.position),
                projectile.radius,
                kind_color(projectile.kind),
            );
        }
    }

    for pickup in &pickups {
        gizmos.sphere(
            Isometry3d::from_translation(pickup.position + Vec3::Y * 3.0),
            3.0,
            Color::srgb(0.3, 1.0, 0.4),
        );
    }

    for effect in effects.live().filter(|e| e.kind == EffectKind::BombBlast) {
        gizmos.sphere(
            Isometry3d::from_translation(effect.position),
            BLAST_DRAW_RADIUS,
            kind_color(ProjectileKind::Bomb),
        );
    }
}
