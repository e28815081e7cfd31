//! The match: setup, the ordered per-frame loop, and teardown.
//!
//! ## Frame order (`Update`, chained, only in `GameState::Playing`)
//!
//! | # | System | Reads | Writes |
//! |---|--------|-------|--------|
//! | 1 | [`character_control_system`] | pads, pool | movement, fire requests |
//! | 2 | [`character_update_system`] | pool (last frame's hooks) | physics, status, rig |
//! | 3 | [`resolve_characters_system`] | map | character positions |
//! | 4 | [`advance_projectiles_system`] | map | pool |
//! | 5 | [`projectile_hit_system`] | pool | stun status |
//! | 6 | [`pickup_collect_system`] | pickups | boost status |
//! | 7 | [`kill_line_system`] | positions | dead flags, `GameState` |
//! | 8 | [`tick_effects_system`] | | one-shot effects |
//! | 9 | [`flush_sound_queue_system`] | | sound cues |
//!
//! Every character finishes its control and physics before the pool moves,
//! and the pool has moved before anyone is hit.

use crate::arena::ArenaMap;
use crate::character::{CharacterController, FrameContext, HeadlessRig};
use crate::config::ArenaConfig;
use crate::input::PadInputs;
use crate::menu::{GameState, MatchOutcome};
use crate::pickup::{pickup_collect_system, spawn_pickups, Pickup};
use crate::projectile::ProjectilePool;
use crate::services::{
    flush_sound_queue_system, tick_effects_system, EffectRegistry, SoundQueue,
};
use bevy::prelude::*;

/// Slot of the human on pad 0.
pub const PLAYER_SLOT: usize = 0;
/// Slot of the computer rival.
pub const RIVAL_SLOT: usize = 1;

/// Model-space offset of the firing hand from the feet.
const HAND_OFFSET: Vec3 = Vec3::new(2.0, 9.0, 1.5);

pub struct MatchPlugin;

impl Plugin for MatchPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PadInputs>()
            .init_resource::<EffectRegistry>()
            .init_resource::<SoundQueue>()
            .init_resource::<MatchOutcome>()
            .add_systems(OnEnter(GameState::Playing), setup_match)
            .add_systems(OnExit(GameState::Playing), teardown_match)
            .add_systems(
                Update,
                (
                    character_control_system,
                    character_update_system,
                    resolve_characters_system,
                    advance_projectiles_system,
                    projectile_hit_system,
                    pickup_collect_system,
                    kill_line_system,
                    tick_effects_system,
                    flush_sound_queue_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

fn headless_rig(config: &ArenaConfig) -> Box<HeadlessRig> {
    Box::new(HeadlessRig::new().with_attachment(config.bone_finger, HAND_OFFSET))
}

/// Fresh pool, both characters, and the pickups. A map already present
/// (a test arena, say) is kept; otherwise the standard arena is built.
pub fn setup_match(
    mut commands: Commands,
    config: Res<ArenaConfig>,
    map: Option<Res<ArenaMap>>,
    mut outcome: ResMut<MatchOutcome>,
) {
    if map.is_none() {
        commands.insert_resource(ArenaMap::standard(&config));
    }
    commands.insert_resource(ProjectilePool::new(&config));
    *outcome = MatchOutcome::default();

    commands.spawn(CharacterController::player(
        PLAYER_SLOT,
        0,
        Vec3::from_array(config.player_spawn),
        headless_rig(&config),
        &config,
    ));
    commands.spawn(CharacterController::rival(
        RIVAL_SLOT,
        Vec3::from_array(config.rival_spawn),
        headless_rig(&config),
        &config,
    ));
    spawn_pickups(&mut commands, &config);

    info!("[match] started");
}

pub fn teardown_match(
    mut commands: Commands,
    mut characters: Query<(Entity, &mut CharacterController)>,
    pickups: Query<Entity, With<Pickup>>,
    pool: Option<ResMut<ProjectilePool>>,
    mut effects: ResMut<EffectRegistry>,
) {
    for (entity, mut character) in &mut characters {
        character.teardown(&mut *effects);
        commands.entity(entity).despawn();
    }
    for entity in &pickups {
        commands.entity(entity).despawn();
    }
    if let Some(mut pool) = pool {
        pool.clear(&mut *effects);
    }
    info!("[match] torn down");
}

/// Feet position of the first living human, or the origin.
fn hunt_target<'a>(characters: impl Iterator<Item = &'a CharacterController>) -> Vec3 {
    characters
        .filter(|c| c.is_player() && !c.is_dead())
        .map(CharacterController::position)
        .next()
        .unwrap_or(Vec3::ZERO)
}

pub fn character_control_system(
    mut characters: Query<&mut CharacterController>,
    config: Res<ArenaConfig>,
    mut pool: ResMut<ProjectilePool>,
    inputs: Res<PadInputs>,
    mut sound: ResMut<SoundQueue>,
    mut effects: ResMut<EffectRegistry>,
) {
    let target = hunt_target(characters.iter());
    for mut character in &mut characters {
        if character.is_dead() {
            continue;
        }
        let mut ctx = FrameContext {
            config: &config,
            pool: &mut pool,
            input: &*inputs,
            sound: &mut *sound,
            effects: &mut *effects,
            target,
        };
        character.control(&mut ctx);
    }
}

pub fn character_update_system(
    mut characters: Query<&mut CharacterController>,
    config: Res<ArenaConfig>,
    mut pool: ResMut<ProjectilePool>,
    inputs: Res<PadInputs>,
    mut sound: ResMut<SoundQueue>,
    mut effects: ResMut<EffectRegistry>,
) {
    let target = hunt_target(characters.iter());
    for mut character in &mut characters {
        if character.is_dead() {
            continue;
        }
        let mut ctx = FrameContext {
            config: &config,
            pool: &mut pool,
            input: &*inputs,
            sound: &mut *sound,
            effects: &mut *effects,
            target,
        };
        character.update(&mut ctx);
    }
}

pub fn resolve_characters_system(
    mut characters: Query<&mut CharacterController>,
    map: Res<ArenaMap>,
    config: Res<ArenaConfig>,
) {
    for mut character in &mut characters {
        character.resolve_against(&map, &config);
    }
}

pub fn advance_projectiles_system(
    map: Res<ArenaMap>,
    mut pool: ResMut<ProjectilePool>,
    mut effects: ResMut<EffectRegistry>,
    mut sound: ResMut<SoundQueue>,
) {
    pool.advance_all(&*map, &mut *effects, &mut *sound);
}

pub fn projectile_hit_system(
    mut characters: Query<&mut CharacterController>,
    config: Res<ArenaConfig>,
    mut pool: ResMut<ProjectilePool>,
    mut sound: ResMut<SoundQueue>,
) {
    for mut character in &mut characters {
        if character.is_dead() {
            continue;
        }
        let body = character.hit_capsule(&config);
        if let Some(kind) = pool.hit_test(character.slot(), &body) {
            character.apply_hit(kind, &mut *sound);
        }
    }
}

/// Kill anyone below the kill line; end the match once someone has died.
pub fn kill_line_system(
    mut characters: Query<&mut CharacterController>,
    config: Res<ArenaConfig>,
    mut outcome: ResMut<MatchOutcome>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let mut anyone_died = false;
    for mut character in &mut characters {
        if !character.is_dead() && character.position().y < config.kill_line {
            character.kill();
            anyone_died = true;
            info!("[match] slot {} fell out of the arena", character.slot());
        }
    }
    if !anyone_died {
        return;
    }

    let mut survivors = characters.iter().filter(|c| !c.is_dead());
    outcome.winner = match (survivors.next(), survivors.next()) {
        (Some(last), None) => Some(last.slot()),
        _ => None,
    };
    next_state.set(GameState::GameOver);
}
