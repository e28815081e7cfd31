//! Who decides what a character does each frame.
//!
//! | Pilot | Decisions from |
//! |-------|----------------|
//! | [`PadControl`] | one gamepad: sticks aim and walk, buttons fire and jump |
//! | [`AiControl`] | the human's position plus a seeded RNG |
//!
//! Both build `state.movement` for the physics step to apply; neither moves
//! the character directly.

use super::aim::{step_yaw, wrap_yaw, yaw_toward};
use super::animation;
use super::state::{CharacterState, FrameContext};
use crate::projectile::ProjectileKind;
use crate::services::{PadButton, Stick};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::FRAC_PI_2;

/// Per-frame decision making for one character.
pub trait Control {
    /// Decide this frame: tick cooldowns, fire, and leave the intended
    /// displacement in `state.movement`. Called before the physics step.
    fn control(&mut self, state: &mut CharacterState, ctx: &mut FrameContext);

    /// Whether the physics step should rebuild `forward` from yaw and pitch.
    fn aims_with_yaw(&self) -> bool;
}

/// Fixed for a character's lifetime.
pub enum Pilot {
    /// A human reading one gamepad.
    Player(PadControl),
    /// The rival.
    Ai(AiControl),
}

impl Pilot {
    /// The pilot behind the common [`Control`] seam, so the controller never
    /// matches on the variant itself.
    pub fn as_control(&mut self) -> &mut dyn Control {
        match self {
            Pilot::Player(pad) => pad,
            Pilot::Ai(ai) => ai,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Pilot::Player(_))
    }
}

// ── Human ─────────────────────────────────────────────────────────────────────

/// Reads sticks and buttons for one human.
///
/// Right trigger fires a normal round. X fires a grapple; Y fires a bomb
/// when X is not held. The right stick turns and pitches the aim, the left
/// stick walks relative to the aim yaw, and A jumps from the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadControl {
    /// Index into [`PadInputs`](crate::input::PadInputs).
    pub pad: usize,
}

impl PadControl {
    fn fire_inputs(&self, state: &mut CharacterState, ctx: &mut FrameContext) {
        if ctx.input.is_held(self.pad, PadButton::RightTrigger) {
            state.fire(ProjectileKind::Normal, ctx);
        }
        if ctx.input.is_held(self.pad, PadButton::X) {
            state.fire(ProjectileKind::Grappler, ctx);
        } else if ctx.input.is_held(self.pad, PadButton::Y) {
            state.fire(ProjectileKind::Bomb, ctx);
        }
    }

    fn aim_inputs(&self, state: &mut CharacterState, ctx: &FrameContext) {
        let config = ctx.config;
        let stick = ctx.input.stick(self.pad, Stick::Right);
        if stick.length() <= config.stick_dead_zone {
            return;
        }
        if stick.x != 0.0 {
            state.yaw = wrap_yaw(state.yaw + config.angle_scale * stick.x);
        }
        if stick.y != 0.0 {
            state.pitch = (state.pitch + config.angle_scale * stick.y)
                .clamp(-config.max_pitch, config.max_pitch);
        }
    }
}

impl Control for PadControl {
    fn control(&mut self, state: &mut CharacterState, ctx: &mut FrameContext) {
        self.fire_inputs(state, ctx);
        state.cooldowns.tick();
        self.aim_inputs(state, ctx);

        let config = ctx.config;
        let stick = ctx.input.stick(self.pad, Stick::Left);
        let walk = if stick.length() > config.stick_dead_zone {
            stick.normalize_or_zero() * state.walk_speed(config)
        } else {
            Vec2::ZERO
        };

        if ctx.input.is_triggered(self.pad, PadButton::A) && state.grounded {
            state.jump(config);
            animation::start_jump(state, config);
        }

        // Stick up is away from the camera; the model frame sits a quarter
        // turn off the aim yaw.
        let local = Vec3::new(-walk.x, state.vertical_speed, -walk.y);
        let (sin, cos) = (state.yaw - FRAC_PI_2).sin_cos();
        let world = Vec3::new(
            local.x * cos + local.z * sin,
            local.y,
            -local.x * sin + local.z * cos,
        );

        state.movement = world + state.grapple_direction * state.grapple_speed;
    }

    fn aims_with_yaw(&self) -> bool {
        true
    }
}

// ── Rival ─────────────────────────────────────────────────────────────────────

/// Chases and shoots at the human.
pub struct AiControl {
    rng: StdRng,
    frame: u32,
    /// Position at the last stuck check.
    checkpoint: Vec3,
}

impl AiControl {
    /// `spawn` is the first stuck-check reference, so the very first
    /// decision always jumps.
    pub fn new(seed: u64, spawn: Vec3) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            frame: 0,
            checkpoint: spawn,
        }
    }

    /// Decisions made so far.
    pub fn frame(&self) -> u32 {
        self.frame
    }
}

impl Control for AiControl {
    fn control(&mut self, state: &mut CharacterState, ctx: &mut FrameContext) {
        let config = ctx.config;
        state.cooldowns.tick();

        let target = ctx.target;
        let toward = (target - state.position).normalize_or_zero();
        state.yaw = step_yaw(state.yaw, yaw_toward(toward), config.turn_step);
        // Aim at the target's feet rather than its centre.
        state.forward = (Vec3::new(target.x, 0.0, target.z) - state.position).normalize_or_zero();

        let mut movement = Vec3::ZERO;

        if ctx.pool.is_collided_for(state.slot) && !ctx.pool.invalid_for(state.slot) {
            movement += toward * config.stun_walk_speed * config.ai_grapple_chase_scale;
        }

        if state.grounded && self.rng.gen_range(0..config.ai_jump_interval) == 0 {
            state.jump(config);
        }

        if self.frame % config.ai_stuck_check_frames == 0 {
            if state.position.distance(self.checkpoint) < config.ai_stuck_distance {
                state.jump(config);
            }
            self.checkpoint = state.position;
        }

        movement += toward * state.walk_speed(config);

        if self.frame % config.ai_fire_interval == 0 {
            let kind = ProjectileKind::ALL[self.rng.gen_range(0..ProjectileKind::ALL.len())];
            state.fire(kind, ctx);
        }

        movement.y += state.vertical_speed;
        state.movement = movement + state.grapple_direction * state.grapple_speed;
        self.frame = self.frame.wrapping_add(1);
    }

    fn aims_with_yaw(&self) -> bool {
        false
    }
}
