//! A single in-flight projectile.

use super::{OwnerSlot, ProjectileKind};
use crate::services::{EffectHandle, EffectService, MapCollision};
use bevy::prelude::*;

/// Per-kind flight constants, resolved from config at spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileTuning {
    /// Distance travelled along the launch direction each frame.
    pub speed: f32,
    /// Added to the accumulated drop each frame.
    pub gravity: f32,
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub owner: OwnerSlot,
    pub position: Vec3,
    /// Unit launch direction; never changes after spawn.
    pub direction: Vec3,
    pub radius: f32,
    speed: f32,
    gravity: f32,
    /// Accumulated downward speed. Only grows, and only before impact.
    fall: f32,
    collided: bool,
    dead: bool,
    invalidated: bool,
    /// Frames since invalidation.
    lifetime_frames: u32,
    effect: Option<EffectHandle>,
}

impl Projectile {
    pub fn new(
        kind: ProjectileKind,
        owner: OwnerSlot,
        origin: Vec3,
        direction: Vec3,
        tuning: ProjectileTuning,
    ) -> Self {
        Self {
            kind,
            owner,
            position: origin,
            direction: direction.normalize_or_zero(),
            radius: tuning.radius,
            speed: tuning.speed,
            gravity: tuning.gravity,
            fall: 0.0,
            collided: false,
            dead: false,
            invalidated: false,
            lifetime_frames: 0,
            effect: None,
        }
    }

    pub fn with_effect(mut self, handle: EffectHandle) -> Self {
        self.effect = Some(handle);
        self
    }

    #[inline]
    pub fn is_collided(&self) -> bool {
        self.collided
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    #[inline]
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    #[inline]
    pub fn lifetime_frames(&self) -> u32 {
        self.lifetime_frames
    }

    #[inline]
    pub fn fall(&self) -> f32 {
        self.fall
    }

    #[inline]
    pub fn effect(&self) -> Option<EffectHandle> {
        self.effect
    }

    /// Mark as consumed. The projectile lingers for the grapple lifetime.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    pub fn mark_dead(&mut self) {
        self.dead = true;
    }

    /// One frame of flight.
    ///
    /// Returns `true` on the frame the projectile first touches the map.
    pub fn advance(
        &mut self,
        map: &dyn MapCollision,
        despawn_line: f32,
        grapple_lifetime: u32,
    ) -> bool {
        if !self.collided {
            self.position += self.direction * self.speed;
            self.fall += self.gravity;
            self.position.y -= self.fall;
        }

        if self.position.abs().max_element() >= despawn_line {
            self.dead = true;
        }

        let impact = !self.collided && map.test_collision(self.position, self.radius, self.kind);
        if impact {
            self.collided = true;
        }

        if self.invalidated {
            self.lifetime_frames += 1;
            if self.lifetime_frames >= grapple_lifetime {
                self.dead = true;
            }
        }

        impact
    }

    /// Keep the trail on the projectile, or stop it once dead.
    pub fn sync_effect(&mut self, effects: &mut dyn EffectService) {
        if self.dead {
            self.stop_effect(effects);
        } else if let Some(handle) = self.effect {
            effects.update(handle, self.position);
        }
    }

    pub fn stop_effect(&mut self, effects: &mut dyn EffectService) {
        if let Some(handle) = self.effect.take() {
            effects.stop(handle);
        }
    }
}
