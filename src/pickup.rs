//! Item pickups lying in the arena.

use crate::character::CharacterController;
use crate::config::ArenaConfig;
use crate::services::{EffectRegistry, SoundQueue};
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickupKind {
    SpeedUp,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub position: Vec3,
}

/// Where the standard arena places its speed-ups, relative to the floor.
pub const SPEED_UP_SPOTS: [Vec3; 4] = [
    Vec3::new(-60.0, 0.0, 0.0),
    Vec3::new(60.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, -110.0),
    Vec3::new(0.0, 0.0, 110.0),
];

pub fn spawn_pickups(commands: &mut Commands, config: &ArenaConfig) {
    for spot in SPEED_UP_SPOTS {
        commands.spawn(Pickup {
            kind: PickupKind::SpeedUp,
            position: spot + Vec3::Y * config.floor_height,
        });
    }
}

/// Hand each pickup to the first living character standing on it.
pub fn pickup_collect_system(
    mut commands: Commands,
    pickups: Query<(Entity, &Pickup)>,
    mut characters: Query<&mut CharacterController>,
    config: Res<ArenaConfig>,
    mut effects: ResMut<EffectRegistry>,
    mut sound: ResMut<SoundQueue>,
) {
    for (entity, pickup) in &pickups {
        let collector = characters.iter_mut().find(|c| {
            !c.is_dead() && c.position().distance(pickup.position) <= config.pickup_radius
        });
        if let Some(mut character) = collector {
            character.apply_pickup(pickup.kind, &mut *effects, &mut *sound);
            commands.entity(entity).despawn();
        }
    }
}
