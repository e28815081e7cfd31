//! Collaborators the simulation core calls into.
//!
//! The core never reaches for a global: every capability below is handed to
//! it explicitly, either at construction (a character's [`Rig`]) or through
//! [`crate::character::FrameContext`] each frame. The Bevy layer stores the
//! concrete implementations as resources.
//!
//! | Trait | Headless implementation |
//! |-------|-------------------------|
//! | [`ConstantTable`] | [`crate::config::ArenaConfig`] |
//! | [`MapCollision`] | [`crate::arena::ArenaMap`] |
//! | [`InputSource`] | [`crate::input::PadInputs`] |
//! | [`EffectService`] | [`EffectRegistry`] |
//! | [`SoundService`] | [`SoundQueue`] |
//! | [`Rig`] | [`crate::character::HeadlessRig`] |

use crate::error::ArenaResult;
use crate::projectile::ProjectileKind;
use bevy::prelude::*;
use std::collections::HashMap;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Named lookup over the closed set of tunables.
pub trait ConstantTable {
    fn get_float(&self, name: &str) -> ArenaResult<f32>;
    fn get_int(&self, name: &str) -> ArenaResult<i32>;
}

// ── Map ───────────────────────────────────────────────────────────────────────

pub trait MapCollision: Send + Sync {
    /// Whether a sphere of `radius` at `position` touches level geometry.
    /// `kind` lets the map treat grapple-able surfaces differently.
    fn test_collision(&self, position: Vec3, radius: f32, kind: ProjectileKind) -> bool;
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stick {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    A,
    B,
    X,
    Y,
    RightTrigger,
    Start,
}

/// Per-pad stick and button state for the current frame.
pub trait InputSource {
    /// Stick deflection, each axis in `[-1, 1]`; `y` is up/forward.
    fn stick(&self, pad: usize, stick: Stick) -> Vec2;
    /// Held this frame.
    fn is_held(&self, pad: usize, button: PadButton) -> bool;
    /// Went down this frame.
    fn is_triggered(&self, pad: usize, button: PadButton) -> bool;
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    SpeedUp,
    NormalTrail,
    GrappleTrail,
    BombTrail,
    BombBlast,
}

impl EffectKind {
    /// Frames a fire-and-forget effect plays before it ends by itself.
    /// `None` for effects that run until stopped.
    pub fn one_shot_frames(self) -> Option<u32> {
        match self {
            EffectKind::BombBlast => Some(45),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectHandle(pub u32);

pub trait EffectService: Send + Sync {
    fn spawn(&mut self, effect: EffectKind, position: Vec3) -> EffectHandle;
    fn update(&mut self, handle: EffectHandle, position: Vec3);
    /// Stopping an already-stopped handle is a no-op.
    fn stop(&mut self, handle: EffectHandle);
}

// ── Sound ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    ShotNormal,
    ShotGrapple,
    ShotBomb,
    BombBlast,
    Stunned,
    Pickup,
}

pub trait SoundService: Send + Sync {
    fn play_cue(&mut self, cue: SoundCue);
}

// ── Skeleton / animation ──────────────────────────────────────────────────────

/// A character's skeletal model: attachment queries plus clip playback.
pub trait Rig: Send + Sync {
    /// World position of the named skeleton attachment.
    fn attachment_position(&self, bone: i32) -> Vec3;
    /// Cross-fade into `clip`. Re-requesting the active clip keeps it playing.
    fn play(&mut self, clip: i32, looping: bool, blend_rate: f32);
    fn active_clip(&self) -> i32;
    fn advance(&mut self, speed: f32);
    /// Place the model. `yaw` is the model-space yaw, not the aim yaw.
    fn set_transform(&mut self, position: Vec3, yaw: f32, pitch: f32);
}

// ── Headless effect registry ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveEffect {
    pub kind: EffectKind,
    pub position: Vec3,
    /// Remaining frames for one-shot effects.
    pub frames_left: Option<u32>,
}

/// Tracks live effects by handle so a renderer (or a test) can read them.
#[derive(Resource, Debug, Default)]
pub struct EffectRegistry {
    next: u32,
    live: HashMap<EffectHandle, LiveEffect>,
}

impl EffectRegistry {
    pub fn get(&self, handle: EffectHandle) -> Option<&LiveEffect> {
        self.live.get(&handle)
    }

    pub fn is_live(&self, handle: EffectHandle) -> bool {
        self.live.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn live(&self) -> impl Iterator<Item = &LiveEffect> {
        self.live.values()
    }

    pub fn count_of(&self, kind: EffectKind) -> usize {
        self.live.values().filter(|e| e.kind == kind).count()
    }

    /// Age one-shot effects and drop the ones that have finished.
    pub fn tick_one_shots(&mut self) {
        self.live.retain(|_, effect| match effect.frames_left.as_mut() {
            Some(0) => false,
            Some(frames) => {
                *frames -= 1;
                true
            }
            None => true,
        });
    }
}

impl EffectService for EffectRegistry {
    fn spawn(&mut self, effect: EffectKind, position: Vec3) -> EffectHandle {
        let handle = EffectHandle(self.next);
        self.next = self.next.wrapping_add(1);
        self.live.insert(
            handle,
            LiveEffect {
                kind: effect,
                position,
                frames_left: effect.one_shot_frames(),
            },
        );
        handle
    }

    fn update(&mut self, handle: EffectHandle, position: Vec3) {
        if let Some(effect) = self.live.get_mut(&handle) {
            effect.position = position;
        }
    }

    fn stop(&mut self, handle: EffectHandle) {
        self.live.remove(&handle);
    }
}

// ── Headless sound queue ──────────────────────────────────────────────────────

/// Collects cues requested this frame; the audio backend drains it.
#[derive(Resource, Debug, Default)]
pub struct SoundQueue {
    pending: Vec<SoundCue>,
}

impl SoundQueue {
    pub fn pending(&self) -> &[SoundCue] {
        &self.pending
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, SoundCue> {
        self.pending.drain(..)
    }
}

impl SoundService for SoundQueue {
    fn play_cue(&mut self, cue: SoundCue) {
        self.pending.push(cue);
    }
}

pub fn tick_effects_system(mut effects: ResMut<EffectRegistry>) {
    effects.tick_one_shots();
}

/// Stand-in audio backend for headless runs: logs and discards queued cues.
pub fn flush_sound_queue_system(mut queue: ResMut<SoundQueue>) {
    for cue in queue.drain() {
        debug!("[sound] {:?}", cue);
    }
}
