//! Skeleton stand-in for headless runs and tests.

use crate::services::Rig;
use bevy::prelude::*;
use std::collections::HashMap;

/// Tracks what a skinned model would be doing without any mesh behind it.
///
/// Attachments are fixed offsets in model space, rotated by the model yaw.
/// A non-looping clip stays the active clip after it finishes, matching how
/// the jump-start check reads the rig.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRig {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    clip: Option<i32>,
    looping: bool,
    blend: f32,
    blend_rate: f32,
    play_time: f32,
    attachments: HashMap<i32, Vec3>,
}

impl HeadlessRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attachment(mut self, bone: i32, offset: Vec3) -> Self {
        self.attachments.insert(bone, offset);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Cross-fade weight of the active clip, `0..=1`.
    pub fn blend(&self) -> f32 {
        self.blend
    }

    pub fn play_time(&self) -> f32 {
        self.play_time
    }
}

impl Rig for HeadlessRig {
    fn attachment_position(&self, bone: i32) -> Vec3 {
        let offset = self.attachments.get(&bone).copied().unwrap_or(Vec3::ZERO);
        self.position + Quat::from_rotation_y(self.yaw) * offset
    }

    fn play(&mut self, clip: i32, looping: bool, blend_rate: f32) {
        if self.clip == Some(clip) {
            return;
        }
        self.clip = Some(clip);
        self.looping = looping;
        self.blend_rate = blend_rate;
        self.blend = 0.0;
        self.play_time = 0.0;
    }

    fn active_clip(&self) -> i32 {
        self.clip.unwrap_or(-1)
    }

    fn advance(&mut self, speed: f32) {
        self.play_time += speed;
        self.blend = (self.blend + self.blend_rate).min(1.0);
    }

    fn set_transform(&mut self, position: Vec3, yaw: f32, pitch: f32) {
        self.position = position;
        self.yaw = yaw;
        self.pitch = pitch;
    }
}
