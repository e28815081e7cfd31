//! Yaw/pitch helpers shared by both pilots.

use bevy::prelude::*;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_yaw(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Turn `current` toward `target` by at most `step`, the short way round.
///
/// Snaps onto the target once it is within one step. The result is always
/// in `[0, 2π)`.
pub fn step_yaw(current: f32, target: f32, step: f32) -> f32 {
    let target = wrap_yaw(target);
    let add = wrap_yaw(target - current);
    let sub = TAU - add;
    if add.min(sub) <= step {
        return target;
    }
    if add < sub {
        wrap_yaw(current + step)
    } else {
        wrap_yaw(current - step)
    }
}

/// Yaw that makes a character face along `direction` on the ground plane.
#[inline]
pub fn yaw_toward(direction: Vec3) -> f32 {
    wrap_yaw(direction.x.atan2(direction.z) - FRAC_PI_2)
}

/// Unit aim vector for a human's yaw and pitch.
#[inline]
pub fn aim_forward(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        (-yaw).cos() * pitch.cos(),
        pitch.sin(),
        (-yaw).sin() * pitch.cos(),
    )
}
