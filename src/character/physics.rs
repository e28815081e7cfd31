//! The per-frame physics step shared by humans and the rival.
//!
//! Order within [`step`]:
//!
//! 1. grounding debounce
//! 2. fall acceleration
//! 3. grapple decay
//! 4. grapple-hit resolution
//! 5. status timers
//! 6. aim refresh, animation and rig placement
//! 7. `position += movement`
//!
//! Grapple hits are read from the pool as it was left by last frame's
//! `advance_all`, so a hook lands one frame before it pulls.

use super::aim::aim_forward;
use super::animation;
use super::state::{CharacterState, FrameContext};
use bevy::prelude::*;

/// Motion constants that differ between pilots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTuning {
    /// Added to the downward speed each airborne frame.
    pub fall_acceleration: f32,
    /// Terminal downward speed.
    pub max_fall_speed: f32,
    /// Subtracted from the grapple pull each airborne frame.
    pub grapple_decay: f32,
    /// Pull speed per unit of distance to the hook.
    pub grapple_speed_base: f32,
    /// Cap on the pull, however far away the hook landed.
    pub grapple_max_speed: f32,
    /// Hop given by a hook that lands while standing.
    pub grapple_jump_ground: f32,
    /// Hop given by a hook that lands mid-air.
    pub grapple_jump_air: f32,
}

/// Advance one character by one frame, applying the `movement` its pilot
/// chose. `refresh_aim` rebuilds `forward` from yaw and pitch, which only
/// humans want.
///
/// Level geometry is not consulted here; the caller resolves the new
/// position against the map afterwards.
pub fn step(
    state: &mut CharacterState,
    tuning: &MotionTuning,
    ctx: &mut FrameContext,
    refresh_aim: bool,
) {
    settle_grounding(state);

    if !state.grounded {
        state.vertical_speed =
            (state.vertical_speed - tuning.fall_acceleration).max(-tuning.max_fall_speed);
    }

    decay_grapple(state, tuning);
    resolve_grapple_hit(state, tuning, ctx);
    tick_status(state, ctx);

    if refresh_aim {
        state.forward = aim_forward(state.yaw, state.pitch);
    }
    animation::drive(state, ctx.config);

    state.position += state.movement;
}

/// Grounded once the height has held still across two updates.
pub fn settle_grounding(state: &mut CharacterState) {
    if state.prev_y == state.position.y {
        if state.ground_frames == 0 {
            state.ground_frames += 1;
        } else {
            state.grounded = true;
        }
    } else {
        state.ground_frames = 0;
        state.grounded = false;
    }
    state.prev_y = state.position.y;
}

pub fn decay_grapple(state: &mut CharacterState, tuning: &MotionTuning) {
    state.grapple_speed = if state.grounded || state.grapple_speed <= tuning.grapple_decay {
        0.0
    } else {
        state.grapple_speed - tuning.grapple_decay
    };
}

/// Consume a freshly hooked grapple: hop, then pull toward the hook.
fn resolve_grapple_hit(state: &mut CharacterState, tuning: &MotionTuning, ctx: &mut FrameContext) {
    let slot = state.slot;
    if !ctx.pool.is_collided_for(slot) || ctx.pool.invalid_for(slot) {
        return;
    }
    ctx.pool.kill(slot);

    state.vertical_speed = if state.grounded {
        tuning.grapple_jump_ground
    } else {
        tuning.grapple_jump_air
    };

    let to_hook = ctx.pool.position_for(slot) - state.position;
    state.grapple_direction = to_hook.normalize_or_zero();
    state.grapple_speed = (tuning.grapple_speed_base * to_hook.length()).min(tuning.grapple_max_speed);
    debug!(
        "[character] slot {slot} pulled toward hook at {:.2} u/frame",
        state.grapple_speed
    );
}

fn tick_status(state: &mut CharacterState, ctx: &mut FrameContext) {
    if state.stun.tick(ctx.config.stun_frames) {
        debug!("[character] slot {} recovered from stun", state.slot);
    }

    if state.boost.is_active() {
        if let Some(handle) = state.boost_effect {
            ctx.effects.update(handle, state.position);
        }
        if state.boost.tick(ctx.config.speed_up_frames) {
            state.stop_boost_effect(ctx.effects);
            debug!("[character] slot {} speed boost ended", state.slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::HeadlessRig;
    use crate::config::ArenaConfig;

    fn state() -> CharacterState {
        CharacterState::new(
            0,
            Vec3::ZERO,
            Box::new(HeadlessRig::new()),
            &ArenaConfig::default(),
        )
    }

    fn tuning() -> MotionTuning {
        MotionTuning {
            fall_acceleration: 0.5,
            max_fall_speed: 1.2,
            grapple_decay: 0.25,
            grapple_speed_base: 0.1,
            grapple_max_speed: 2.0,
            grapple_jump_ground: 3.0,
            grapple_jump_air: 1.0,
        }
    }

    #[test]
    fn two_still_frames_ground_and_any_change_clears() {
        let mut s = state();
        s.position.y = 5.0;
        settle_grounding(&mut s);
        assert!(!s.grounded, "no previous height yet");
        settle_grounding(&mut s);
        assert!(!s.grounded, "first still frame only arms the debounce");
        settle_grounding(&mut s);
        assert!(s.grounded);

        s.position.y = 5.5;
        settle_grounding(&mut s);
        assert!(!s.grounded);
        assert_eq!(s.ground_frames, 0);
    }

    #[test]
    fn grapple_decays_to_exactly_zero_in_bounded_frames() {
        let t = tuning();
        let mut s = state();
        s.grapple_speed = 1.0;
        let bound = (1.0f32 / t.grapple_decay).ceil() as usize;

        let mut trace = Vec::new();
        for _ in 0..bound {
            decay_grapple(&mut s, &t);
            assert!(s.grapple_speed >= 0.0);
            trace.push(s.grapple_speed);
        }
        assert_eq!(trace, vec![0.75, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn grounded_character_loses_grapple_pull_at_once() {
        let mut s = state();
        s.grounded = true;
        s.grapple_speed = 2.0;
        decay_grapple(&mut s, &tuning());
        assert_eq!(s.grapple_speed, 0.0);
    }
}
