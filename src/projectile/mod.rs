//! Projectiles: the in-flight entity and the pool that owns them.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`entity`] | [`Projectile`] state and its per-frame integration |
//! | [`pool`] | [`ProjectilePool`]: spawning, advancing, per-owner grapple queries, character hit tests |
//!
//! ## Ammo kinds
//!
//! | Kind | On map impact | On character hit |
//! |------|---------------|------------------|
//! | `Normal` | removed | stuns (unless boosted) |
//! | `Grappler` | sticks; owner is pulled toward it | never tested |
//! | `Bomb` | removed with a blast effect | no status effect yet |

pub mod entity;
pub mod pool;

pub use entity::{Projectile, ProjectileTuning};
pub use pool::ProjectilePool;

use crate::services::{EffectKind, SoundCue};

/// Match slot index of the character that fired a projectile.
pub type OwnerSlot = usize;

/// Slots with a tracked grapple. One human and one rival today; sized for
/// four-player split screen.
pub const MAX_SLOTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectileKind {
    Normal,
    Grappler,
    Bomb,
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 3] = [
        ProjectileKind::Normal,
        ProjectileKind::Grappler,
        ProjectileKind::Bomb,
    ];

    /// Dense index for per-kind tables.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            ProjectileKind::Normal => 0,
            ProjectileKind::Grappler => 1,
            ProjectileKind::Bomb => 2,
        }
    }

    pub fn fire_cue(self) -> SoundCue {
        match self {
            ProjectileKind::Normal => SoundCue::ShotNormal,
            ProjectileKind::Grappler => SoundCue::ShotGrapple,
            ProjectileKind::Bomb => SoundCue::ShotBomb,
        }
    }

    pub fn trail(self) -> EffectKind {
        match self {
            ProjectileKind::Normal => EffectKind::NormalTrail,
            ProjectileKind::Grappler => EffectKind::GrappleTrail,
            ProjectileKind::Bomb => EffectKind::BombTrail,
        }
    }
}
