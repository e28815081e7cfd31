//! Per-character state and the per-frame service bundle.
//!
//! [`CharacterState`] is everything a pilot and the physics step mutate.
//! Pilots live beside it (not inside it) in
//! [`super::CharacterController`] so a pilot can borrow the state mutably
//! while also holding its own decision memory.

use super::animation::Animation;
use crate::config::ArenaConfig;
use crate::projectile::{OwnerSlot, ProjectileKind, ProjectilePool};
use crate::services::{EffectHandle, EffectService, InputSource, Rig, SoundService};
use bevy::prelude::*;

// ── Frame context ─────────────────────────────────────────────────────────────

/// Services a character reaches during one `control` / `update` pass.
///
/// Built fresh by the match loop each frame from its resources; nothing here
/// outlives the frame.
pub struct FrameContext<'a> {
    pub config: &'a ArenaConfig,
    pub pool: &'a mut ProjectilePool,
    pub input: &'a dyn InputSource,
    pub sound: &'a mut dyn SoundService,
    pub effects: &'a mut dyn EffectService,
    /// Feet position of the human the rival hunts.
    pub target: Vec3,
}

// ── Cooldowns ─────────────────────────────────────────────────────────────────

/// One countdown per ammo kind, in frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cooldowns([u32; 3]);

impl Cooldowns {
    #[inline]
    pub fn get(&self, kind: ProjectileKind) -> u32 {
        self.0[kind.index()]
    }

    #[inline]
    pub fn is_ready(&self, kind: ProjectileKind) -> bool {
        self.get(kind) == 0
    }

    pub fn start(&mut self, kind: ProjectileKind, frames: u32) {
        self.0[kind.index()] = frames;
    }

    /// Count every timer down by one frame, holding at zero.
    pub fn tick(&mut self) {
        for frames in &mut self.0 {
            *frames = frames.saturating_sub(1);
        }
    }
}

// ── Status timers ─────────────────────────────────────────────────────────────

/// A status that switches itself off after a fixed number of frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTimer {
    active: bool,
    elapsed: u32,
}

impl StatusTimer {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Switch on, or restart the count if already on.
    pub fn start(&mut self) {
        self.active = true;
        self.elapsed = 0;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Count one frame. Returns `true` on the frame the status runs out.
    pub fn tick(&mut self, duration: u32) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= duration {
            self.clear();
            return true;
        }
        false
    }
}

// ── Character state ───────────────────────────────────────────────────────────

pub struct CharacterState {
    pub slot: OwnerSlot,
    /// Feet position.
    pub position: Vec3,
    pub vertical_speed: f32,
    /// Aim yaw, kept in `[0, 2π)`.
    pub yaw: f32,
    /// Aim tilt, kept in `[-max_pitch, max_pitch]`.
    pub pitch: f32,
    /// Unit firing direction.
    pub forward: Vec3,
    /// This frame's displacement, built by the pilot and applied by `update`.
    pub movement: Vec3,
    pub grounded: bool,
    pub(super) ground_frames: u32,
    /// Height seen by the previous `update`; NaN before the first one.
    pub(super) prev_y: f32,
    pub grapple_direction: Vec3,
    pub grapple_speed: f32,
    pub cooldowns: Cooldowns,
    pub stun: StatusTimer,
    pub boost: StatusTimer,
    pub(super) boost_effect: Option<EffectHandle>,
    pub animation: Animation,
    pub(super) dead: bool,
    pub(super) rig: Box<dyn Rig>,
}

impl CharacterState {
    pub fn new(slot: OwnerSlot, spawn: Vec3, mut rig: Box<dyn Rig>, config: &ArenaConfig) -> Self {
        rig.play(config.anim_aiming_idle, true, config.blend_rate);
        rig.set_transform(spawn, -std::f32::consts::FRAC_PI_2, 0.0);
        Self {
            slot,
            position: spawn,
            vertical_speed: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            forward: Vec3::X,
            movement: Vec3::ZERO,
            grounded: false,
            ground_frames: 0,
            prev_y: f32::NAN,
            grapple_direction: Vec3::ZERO,
            grapple_speed: 0.0,
            cooldowns: Cooldowns::default(),
            stun: StatusTimer::default(),
            boost: StatusTimer::default(),
            boost_effect: None,
            animation: Animation::Idle,
            dead: false,
            rig,
        }
    }

    pub fn rig(&self) -> &dyn Rig {
        self.rig.as_ref()
    }

    pub fn boost_effect(&self) -> Option<EffectHandle> {
        self.boost_effect
    }

    /// Walking speed for the current status: stunned, boosted, or plain.
    pub fn walk_speed(&self, config: &ArenaConfig) -> f32 {
        if self.stun.is_active() {
            config.stun_walk_speed
        } else if self.boost.is_active() {
            config.speed_up_walk_speed
        } else {
            config.walk_speed
        }
    }

    /// Launch `kind` from the hand along `forward` if its cooldown is spent.
    ///
    /// The cue and the cooldown only follow a launch the pool accepted.
    pub fn fire(&mut self, kind: ProjectileKind, ctx: &mut FrameContext) -> bool {
        if !self.cooldowns.is_ready(kind) {
            return false;
        }
        let origin = self.rig.attachment_position(ctx.config.bone_finger);
        if !ctx.pool.spawn(kind, self.forward, origin, self.slot, ctx.effects) {
            return false;
        }
        ctx.sound.play_cue(kind.fire_cue());
        self.cooldowns.start(kind, ctx.config.cooldown(kind));
        true
    }

    /// Start a jump from the ground.
    pub fn jump(&mut self, config: &ArenaConfig) {
        self.vertical_speed = config.jump_speed;
    }

    pub fn stop_boost_effect(&mut self, effects: &mut dyn EffectService) {
        if let Some(handle) = self.boost_effect.take() {
            effects.stop(handle);
        }
    }
}
