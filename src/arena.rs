//! Arena geometry: a square floor plus axis-aligned blocks.
//!
//! [`ArenaMap`] answers projectile collision queries (it is the match's
//! [`MapCollision`]) and pushes characters back out of geometry after they
//! move. Resolving onto a surface leaves the character's height unchanged
//! frame to frame, which is what the grounding debounce in
//! [`crate::character`] keys off.

use crate::config::ArenaConfig;
use crate::projectile::ProjectileKind;
use crate::services::MapCollision;
use bevy::prelude::*;

/// Vertical capsule: a segment from `base` up by `height`, swept by `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub base: Vec3,
    pub height: f32,
    pub radius: f32,
}

impl Capsule {
    /// Distance from `point` to the capsule's core segment.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        let top = self.base.y + self.height;
        let closest = Vec3::new(self.base.x, point.y.clamp(self.base.y, top), self.base.z);
        closest.distance(point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub min: Vec3,
    pub max: Vec3,
}

impl Block {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    fn touches_sphere(&self, center: Vec3, radius: f32) -> bool {
        center.clamp(self.min, self.max).distance_squared(center) <= radius * radius
    }

    fn covers_xz(&self, p: Vec3, margin: f32) -> bool {
        p.x > self.min.x - margin
            && p.x < self.max.x + margin
            && p.z > self.min.z - margin
            && p.z < self.max.z + margin
    }
}

/// Height a character may climb onto a block top in one frame.
const STEP_UP: f32 = 3.5;

#[derive(Resource, Debug, Clone)]
pub struct ArenaMap {
    pub floor_height: f32,
    pub floor_half_extent: f32,
    pub blocks: Vec<Block>,
}

impl ArenaMap {
    pub fn new(floor_height: f32, floor_half_extent: f32) -> Self {
        Self {
            floor_height,
            floor_half_extent,
            blocks: Vec::new(),
        }
    }

    /// The standard arena: floor plus four pillars and a central wall.
    pub fn standard(config: &ArenaConfig) -> Self {
        let mut map = Self::new(config.floor_height, config.floor_half_extent);
        let floor = config.floor_height;
        for (x, z) in [(-80.0, -80.0), (80.0, -80.0), (-80.0, 80.0), (80.0, 80.0)] {
            map.blocks.push(Block::new(
                Vec3::new(x, floor + 40.0, z),
                Vec3::new(10.0, 40.0, 10.0),
            ));
        }
        map.blocks.push(Block::new(
            Vec3::new(0.0, floor + 8.0, 0.0),
            Vec3::new(30.0, 8.0, 3.0),
        ));
        map
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    fn over_floor(&self, p: Vec3) -> bool {
        p.x.abs() <= self.floor_half_extent && p.z.abs() <= self.floor_half_extent
    }

    /// Push a character standing at `feet` (body `radius`) out of geometry.
    ///
    /// `from_y` is the feet height before this frame's move. Feet that were
    /// at or above a block top and are now inside the block land on the top
    /// however far they dropped. A NaN `from_y` (no previous frame) only
    /// allows the step-up band.
    pub fn resolve_character(&self, from_y: f32, feet: Vec3, radius: f32) -> Vec3 {
        let mut p = feet;

        for block in &self.blocks {
            if !block.covers_xz(p, radius) || p.y >= block.max.y || p.y < block.min.y - radius {
                continue;
            }
            let dropped_onto = from_y >= block.max.y;
            if block.covers_xz(p, 0.0) && (dropped_onto || p.y >= block.max.y - STEP_UP) {
                p.y = block.max.y;
                continue;
            }
            // Side contact: leave along the shallowest horizontal axis.
            let push = [
                (block.min.x - radius) - p.x,
                (block.max.x + radius) - p.x,
                (block.min.z - radius) - p.z,
                (block.max.z + radius) - p.z,
            ];
            let (axis, amount) = push
                .iter()
                .copied()
                .enumerate()
                .min_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
                .unwrap_or((0, 0.0));
            if axis < 2 {
                p.x += amount;
            } else {
                p.z += amount;
            }
        }

        if self.over_floor(p) && p.y < self.floor_height {
            p.y = self.floor_height;
        }
        p
    }
}

impl MapCollision for ArenaMap {
    fn test_collision(&self, position: Vec3, radius: f32, _kind: ProjectileKind) -> bool {
        if self.over_floor(position) && position.y - radius <= self.floor_height {
            return true;
        }
        self.blocks
            .iter()
            .any(|block| block.touches_sphere(position, radius))
    }
}
