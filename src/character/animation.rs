//! Movement-direction classification and clip selection.
//!
//! Movement is rotated into the character's facing frame and bucketed into
//! eight π/4 sectors, `[-π/8, π/8)` being [`Sector::Front`] and indices
//! increasing clockwise. The rig's model is authored a quarter turn off the
//! aim frame, so [`clip_for`] maps sectors onto run clips two sectors over.

use super::state::CharacterState;
use crate::config::ArenaConfig;
use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sector {
    Front,
    FrontRight,
    Right,
    BackRight,
    Back,
    BackLeft,
    Left,
    FrontLeft,
}

impl Sector {
    pub const ALL: [Sector; 8] = [
        Sector::Front,
        Sector::FrontRight,
        Sector::Right,
        Sector::BackRight,
        Sector::Back,
        Sector::BackLeft,
        Sector::Left,
        Sector::FrontLeft,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Sector {
        Sector::ALL[(self.index() + 4) % 8]
    }

    /// Bucket a vector already expressed in the facing frame.
    pub fn classify(local: Vec3) -> Sector {
        let angle = local.x.atan2(local.z);
        let index = ((angle + FRAC_PI_8).rem_euclid(TAU) / FRAC_PI_4) as usize;
        Sector::ALL[index % 8]
    }
}

/// Rotate world-space `movement` into the frame of a character at `yaw`.
#[inline]
pub fn into_facing_frame(movement: Vec3, yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.sin_cos();
    Vec3::new(
        movement.x * cos - movement.z * sin,
        0.0,
        movement.x * sin + movement.z * cos,
    )
}

/// What the character's body is doing this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Idle,
    JumpUp,
    JumpLoop,
    Run(Sector),
}

/// Run clip for a movement sector.
pub fn clip_for(sector: Sector, config: &ArenaConfig) -> i32 {
    match sector {
        Sector::Front => config.anim_run_left,
        Sector::FrontRight => config.anim_run_forward_left,
        Sector::Right => config.anim_run_forward,
        Sector::BackRight => config.anim_run_forward_right,
        Sector::Back => config.anim_run_right,
        Sector::BackLeft => config.anim_run_backward_right,
        Sector::Left => config.anim_run_backward,
        Sector::FrontLeft => config.anim_run_backward_left,
    }
}

/// Pick the animation for the current frame.
///
/// A character counts as airborne while rising, so the jump-start clip is
/// not replaced on the frame the jump begins.
pub fn select(state: &CharacterState) -> Animation {
    if !state.grounded || state.movement.y > 0.0 {
        return Animation::JumpLoop;
    }
    if state.movement.x == 0.0 && state.movement.z == 0.0 {
        return Animation::Idle;
    }
    Animation::Run(Sector::classify(into_facing_frame(
        state.movement,
        state.yaw,
    )))
}

/// Select, play, advance and place the character's rig.
pub fn drive(state: &mut CharacterState, config: &ArenaConfig) {
    let blend = config.blend_rate;
    match select(state) {
        Animation::JumpLoop => {
            if state.rig.active_clip() != config.anim_jump_up {
                state.rig.play(config.anim_jump_loop, true, blend);
                state.animation = Animation::JumpLoop;
            }
        }
        Animation::Idle => {
            state.rig.play(config.anim_aiming_idle, true, blend);
            state.animation = Animation::Idle;
        }
        Animation::Run(sector) => {
            state.rig.play(clip_for(sector, config), true, blend);
            state.animation = Animation::Run(sector);
        }
        Animation::JumpUp => {}
    }

    let speed = if state.boost.is_active() {
        config.anim_speed_speed_up
    } else {
        config.anim_speed_walk
    };
    state.rig.advance(speed);
    state
        .rig
        .set_transform(state.position, state.yaw - FRAC_PI_2, state.pitch);
}

/// Begin the one-shot jump-start clip.
pub fn start_jump(state: &mut CharacterState, config: &ArenaConfig) {
    state
        .rig
        .play(config.anim_jump_up, false, config.blend_rate);
    state.animation = Animation::JumpUp;
}
