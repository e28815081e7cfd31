//! Runtime gameplay configuration loaded from `assets/arena.toml`.
//!
//! [`ArenaConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`]. At startup the binary calls [`ArenaConfig::load`],
//! which overwrites the defaults with any values present in the file. Missing
//! keys fall back to the compile-time defaults, so a minimal TOML can override
//! just the constants you care about.
//!
//! The key set is closed: an unrecognised key in the file, or an unknown name
//! passed to [`ConstantTable::get_float`], is a content error raised at load
//! time rather than something the frame loop has to cope with.
//!
//! ## Usage in systems
//!
//! Add `config: Res<ArenaConfig>` to any system parameter list and read values
//! with `config.walk_speed`, `config.cooldown(kind)`, etc.

use crate::character::MotionTuning;
use crate::constants::*;
use crate::error::{
    validate_max_pitch, validate_non_negative, validate_positive, ArenaError, ArenaResult,
};
use crate::projectile::{ProjectileKind, ProjectileTuning};
use crate::services::ConstantTable;
use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Default location of the override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/arena.toml";

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    // ── Character: Body ───────────────────────────────────────────────────────
    pub capsule_radius: f32,
    pub capsule_height: f32,
    pub player_spawn: [f32; 3],
    pub rival_spawn: [f32; 3],

    // ── Character: Movement ───────────────────────────────────────────────────
    pub stick_dead_zone: f32,
    pub walk_speed: f32,
    pub stun_walk_speed: f32,
    pub speed_up_walk_speed: f32,
    pub jump_speed: f32,
    pub fall_acceleration: f32,
    pub max_fall_speed: f32,

    // ── Character: Aim ────────────────────────────────────────────────────────
    pub angle_scale: f32,
    pub max_pitch: f32,
    pub turn_step: f32,

    // ── Character: Grapple ────────────────────────────────────────────────────
    pub grapple_decay: f32,
    pub grapple_speed_base: f32,
    pub ai_grapple_speed_base: f32,
    pub grapple_max_speed: f32,
    pub grapple_jump_speed_ground: f32,
    pub grapple_jump_speed_air: f32,
    pub grapple_tether_height: f32,

    // ── Character: Status ─────────────────────────────────────────────────────
    pub stun_frames: u32,
    pub speed_up_frames: u32,

    // ── Character: Weapons ────────────────────────────────────────────────────
    pub cooldown_normal: u32,
    pub cooldown_grappler: u32,
    pub cooldown_bomb: u32,
    pub bone_finger: i32,

    // ── Character: Animation ──────────────────────────────────────────────────
    pub anim_aiming_idle: i32,
    pub anim_jump_up: i32,
    pub anim_jump_loop: i32,
    pub anim_run_forward: i32,
    pub anim_run_forward_left: i32,
    pub anim_run_forward_right: i32,
    pub anim_run_left: i32,
    pub anim_run_right: i32,
    pub anim_run_backward: i32,
    pub anim_run_backward_left: i32,
    pub anim_run_backward_right: i32,
    pub blend_rate: f32,
    pub anim_speed_walk: f32,
    pub anim_speed_speed_up: f32,

    // ── Rival AI ──────────────────────────────────────────────────────────────
    pub ai_jump_interval: u32,
    pub ai_stuck_check_frames: u32,
    pub ai_stuck_distance: f32,
    pub ai_fire_interval: u32,
    pub ai_grapple_chase_scale: f32,
    pub ai_seed: u64,

    // ── Projectiles ───────────────────────────────────────────────────────────
    pub normal_radius: f32,
    pub normal_speed: f32,
    pub normal_gravity: f32,
    pub grappler_radius: f32,
    pub grappler_speed: f32,
    pub grappler_gravity: f32,
    pub bomb_radius: f32,
    pub bomb_speed: f32,
    pub bomb_gravity: f32,
    pub despawn_line: f32,
    pub grapple_lifetime: u32,

    // ── Arena ─────────────────────────────────────────────────────────────────
    pub floor_height: f32,
    pub floor_half_extent: f32,
    pub kill_line: f32,
    pub pickup_radius: f32,

    // ── Select scene ──────────────────────────────────────────────────────────
    pub screen_width: f32,
    pub slide_speed: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            // Body
            capsule_radius: CAPSULE_RADIUS,
            capsule_height: CAPSULE_HEIGHT,
            player_spawn: PLAYER_SPAWN,
            rival_spawn: RIVAL_SPAWN,
            // Movement
            stick_dead_zone: STICK_DEAD_ZONE,
            walk_speed: WALK_SPEED,
            stun_walk_speed: STUN_WALK_SPEED,
            speed_up_walk_speed: SPEED_UP_WALK_SPEED,
            jump_speed: JUMP_SPEED,
            fall_acceleration: FALL_ACCELERATION,
            max_fall_speed: MAX_FALL_SPEED,
            // Aim
            angle_scale: ANGLE_SCALE,
            max_pitch: MAX_PITCH,
            turn_step: TURN_STEP,
            // Grapple
            grapple_decay: GRAPPLE_DECAY,
            grapple_speed_base: GRAPPLE_SPEED_BASE,
            ai_grapple_speed_base: AI_GRAPPLE_SPEED_BASE,
            grapple_max_speed: GRAPPLE_MAX_SPEED,
            grapple_jump_speed_ground: GRAPPLE_JUMP_SPEED_GROUND,
            grapple_jump_speed_air: GRAPPLE_JUMP_SPEED_AIR,
            grapple_tether_height: GRAPPLE_TETHER_HEIGHT,
            // Status
            stun_frames: STUN_FRAMES,
            speed_up_frames: SPEED_UP_FRAMES,
            // Weapons
            cooldown_normal: COOLDOWN_NORMAL,
            cooldown_grappler: COOLDOWN_GRAPPLER,
            cooldown_bomb: COOLDOWN_BOMB,
            bone_finger: BONE_FINGER,
            // Animation
            anim_aiming_idle: ANIM_AIMING_IDLE,
            anim_jump_up: ANIM_JUMP_UP,
            anim_jump_loop: ANIM_JUMP_LOOP,
            anim_run_forward: ANIM_RUN_FORWARD,
            anim_run_forward_left: ANIM_RUN_FORWARD_LEFT,
            anim_run_forward_right: ANIM_RUN_FORWARD_RIGHT,
            anim_run_left: ANIM_RUN_LEFT,
            anim_run_right: ANIM_RUN_RIGHT,
            anim_run_backward: ANIM_RUN_BACKWARD,
            anim_run_backward_left: ANIM_RUN_BACKWARD_LEFT,
            anim_run_backward_right: ANIM_RUN_BACKWARD_RIGHT,
            blend_rate: BLEND_RATE,
            anim_speed_walk: ANIM_SPEED_WALK,
            anim_speed_speed_up: ANIM_SPEED_SPEED_UP,
            // Rival AI
            ai_jump_interval: AI_JUMP_INTERVAL,
            ai_stuck_check_frames: AI_STUCK_CHECK_FRAMES,
            ai_stuck_distance: AI_STUCK_DISTANCE,
            ai_fire_interval: AI_FIRE_INTERVAL,
            ai_grapple_chase_scale: AI_GRAPPLE_CHASE_SCALE,
            ai_seed: AI_SEED,
            // Projectiles
            normal_radius: NORMAL_RADIUS,
            normal_speed: NORMAL_SPEED,
            normal_gravity: NORMAL_GRAVITY,
            grappler_radius: GRAPPLER_RADIUS,
            grappler_speed: GRAPPLER_SPEED,
            grappler_gravity: GRAPPLER_GRAVITY,
            bomb_radius: BOMB_RADIUS,
            bomb_speed: BOMB_SPEED,
            bomb_gravity: BOMB_GRAVITY,
            despawn_line: DESPAWN_LINE,
            grapple_lifetime: GRAPPLE_LIFETIME,
            // Arena
            floor_height: FLOOR_HEIGHT,
            floor_half_extent: FLOOR_HALF_EXTENT,
            kill_line: KILL_LINE,
            pickup_radius: PICKUP_RADIUS,
            // Select scene
            screen_width: SCREEN_WIDTH,
            slide_speed: SLIDE_SPEED,
        }
    }
}

/// Float tunables reachable through [`ConstantTable::get_float`].
pub const FLOAT_KEYS: &[&str] = &[
    "capsule_radius",
    "capsule_height",
    "stick_dead_zone",
    "walk_speed",
    "stun_walk_speed",
    "speed_up_walk_speed",
    "jump_speed",
    "fall_acceleration",
    "max_fall_speed",
    "angle_scale",
    "max_pitch",
    "turn_step",
    "grapple_decay",
    "grapple_speed_base",
    "ai_grapple_speed_base",
    "grapple_max_speed",
    "grapple_jump_speed_ground",
    "grapple_jump_speed_air",
    "grapple_tether_height",
    "blend_rate",
    "anim_speed_walk",
    "anim_speed_speed_up",
    "ai_stuck_distance",
    "ai_grapple_chase_scale",
    "normal_radius",
    "normal_speed",
    "normal_gravity",
    "grappler_radius",
    "grappler_speed",
    "grappler_gravity",
    "bomb_radius",
    "bomb_speed",
    "bomb_gravity",
    "despawn_line",
    "floor_half_extent",
    "pickup_radius",
    "screen_width",
    "slide_speed",
];

/// Integer tunables reachable through [`ConstantTable::get_int`].
pub const INT_KEYS: &[&str] = &[
    "stun_frames",
    "speed_up_frames",
    "cooldown_normal",
    "cooldown_grappler",
    "cooldown_bomb",
    "bone_finger",
    "anim_aiming_idle",
    "anim_jump_up",
    "anim_jump_loop",
    "anim_run_forward",
    "anim_run_forward_left",
    "anim_run_forward_right",
    "anim_run_left",
    "anim_run_right",
    "anim_run_backward",
    "anim_run_backward_left",
    "anim_run_backward_right",
    "ai_jump_interval",
    "ai_stuck_check_frames",
    "ai_fire_interval",
    "grapple_lifetime",
];

impl ConstantTable for ArenaConfig {
    fn get_float(&self, name: &str) -> ArenaResult<f32> {
        let value = match name {
            "capsule_radius" => self.capsule_radius,
            "capsule_height" => self.capsule_height,
            "stick_dead_zone" => self.stick_dead_zone,
            "walk_speed" => self.walk_speed,
            "stun_walk_speed" => self.stun_walk_speed,
            "speed_up_walk_speed" => self.speed_up_walk_speed,
            "jump_speed" => self.jump_speed,
            "fall_acceleration" => self.fall_acceleration,
            "max_fall_speed" => self.max_fall_speed,
            "angle_scale" => self.angle_scale,
            "max_pitch" => self.max_pitch,
            "turn_step" => self.turn_step,
            "grapple_decay" => self.grapple_decay,
            "grapple_speed_base" => self.grapple_speed_base,
            "ai_grapple_speed_base" => self.ai_grapple_speed_base,
            "grapple_max_speed" => self.grapple_max_speed,
            "grapple_jump_speed_ground" => self.grapple_jump_speed_ground,
            "grapple_jump_speed_air" => self.grapple_jump_speed_air,
            "grapple_tether_height" => self.grapple_tether_height,
            "blend_rate" => self.blend_rate,
            "anim_speed_walk" => self.anim_speed_walk,
            "anim_speed_speed_up" => self.anim_speed_speed_up,
            "ai_stuck_distance" => self.ai_stuck_distance,
            "ai_grapple_chase_scale" => self.ai_grapple_chase_scale,
            "normal_radius" => self.normal_radius,
            "normal_speed" => self.normal_speed,
            "normal_gravity" => self.normal_gravity,
            "grappler_radius" => self.grappler_radius,
            "grappler_speed" => self.grappler_speed,
            "grappler_gravity" => self.grappler_gravity,
            "bomb_radius" => self.bomb_radius,
            "bomb_speed" => self.bomb_speed,
            "bomb_gravity" => self.bomb_gravity,
            "despawn_line" => self.despawn_line,
            "floor_half_extent" => self.floor_half_extent,
            "pickup_radius" => self.pickup_radius,
            "screen_width" => self.screen_width,
            "slide_speed" => self.slide_speed,
            _ => {
                return Err(ArenaError::UnknownConstant {
                    name: name.to_owned(),
                })
            }
        };
        Ok(value)
    }

    fn get_int(&self, name: &str) -> ArenaResult<i32> {
        let value = match name {
            "stun_frames" => self.stun_frames as i32,
            "speed_up_frames" => self.speed_up_frames as i32,
            "cooldown_normal" => self.cooldown_normal as i32,
            "cooldown_grappler" => self.cooldown_grappler as i32,
            "cooldown_bomb" => self.cooldown_bomb as i32,
            "bone_finger" => self.bone_finger,
            "anim_aiming_idle" => self.anim_aiming_idle,
            "anim_jump_up" => self.anim_jump_up,
            "anim_jump_loop" => self.anim_jump_loop,
            "anim_run_forward" => self.anim_run_forward,
            "anim_run_forward_left" => self.anim_run_forward_left,
            "anim_run_forward_right" => self.anim_run_forward_right,
            "anim_run_left" => self.anim_run_left,
            "anim_run_right" => self.anim_run_right,
            "anim_run_backward" => self.anim_run_backward,
            "anim_run_backward_left" => self.anim_run_backward_left,
            "anim_run_backward_right" => self.anim_run_backward_right,
            "ai_jump_interval" => self.ai_jump_interval as i32,
            "ai_stuck_check_frames" => self.ai_stuck_check_frames as i32,
            "ai_fire_interval" => self.ai_fire_interval as i32,
            "grapple_lifetime" => self.grapple_lifetime as i32,
            _ => {
                return Err(ArenaError::UnknownConstant {
                    name: name.to_owned(),
                })
            }
        };
        Ok(value)
    }
}

impl ArenaConfig {
    /// Parse a TOML document, keeping defaults for absent keys.
    ///
    /// `origin` only labels errors.
    pub fn from_toml_str(contents: &str, origin: &str) -> ArenaResult<Self> {
        toml::from_str::<ArenaConfig>(contents).map_err(|e| ArenaError::ConfigParse {
            path: origin.to_owned(),
            message: e.to_string(),
        })
    }

    /// Read and validate the override file at `path`.
    ///
    /// A missing file is not an error: the compiled defaults are returned.
    /// Unreadable files, parse errors, unknown keys and out-of-range values
    /// are all fatal.
    pub fn load(path: impl AsRef<Path>) -> ArenaResult<Self> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let config = match std::fs::read_to_string(path) {
            Ok(contents) => {
                let loaded = Self::from_toml_str(&contents, &label)?;
                info!("Loaded arena config from {label}");
                loaded
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No {label} found; using compiled defaults");
                Self::default()
            }
            Err(source) => {
                return Err(ArenaError::ConfigIo {
                    path: label,
                    source,
                })
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every tunable against its safe range.
    pub fn validate(&self) -> ArenaResult<()> {
        for &name in FLOAT_KEYS {
            // FLOAT_KEYS only holds static names, so the lookup cannot miss.
            let value = self.get_float(name)?;
            validate_non_negative(name, value)?;
        }
        for &name in INT_KEYS {
            let value = self.get_int(name)?;
            validate_non_negative(name, value as f32)?;
        }
        validate_positive("fall_acceleration", self.fall_acceleration)?;
        validate_positive("turn_step", self.turn_step)?;
        validate_positive("slide_speed", self.slide_speed)?;
        validate_positive("despawn_line", self.despawn_line)?;
        validate_positive("ai_jump_interval", self.ai_jump_interval as f32)?;
        validate_positive("ai_stuck_check_frames", self.ai_stuck_check_frames as f32)?;
        validate_positive("ai_fire_interval", self.ai_fire_interval as f32)?;
        validate_max_pitch(self.max_pitch)?;
        if self.stun_walk_speed > self.walk_speed {
            return Err(ArenaError::UnsafeConstant {
                name: "stun_walk_speed",
                value: self.stun_walk_speed,
                safe_range: "[0.0, walk_speed]",
            });
        }
        Ok(())
    }

    // ── Derived views ────────────────────────────────────────────────────────

    /// Cooldown in frames started by a successful fire of `kind`.
    pub fn cooldown(&self, kind: ProjectileKind) -> u32 {
        match kind {
            ProjectileKind::Normal => self.cooldown_normal,
            ProjectileKind::Grappler => self.cooldown_grappler,
            ProjectileKind::Bomb => self.cooldown_bomb,
        }
    }

    pub fn projectile_tuning(&self, kind: ProjectileKind) -> ProjectileTuning {
        match kind {
            ProjectileKind::Normal => ProjectileTuning {
                speed: self.normal_speed,
                gravity: self.normal_gravity,
                radius: self.normal_radius,
            },
            ProjectileKind::Grappler => ProjectileTuning {
                speed: self.grappler_speed,
                gravity: self.grappler_gravity,
                radius: self.grappler_radius,
            },
            ProjectileKind::Bomb => ProjectileTuning {
                speed: self.bomb_speed,
                gravity: self.bomb_gravity,
                radius: self.bomb_radius,
            },
        }
    }

    /// Motion constants for a human-controlled character.
    pub fn player_motion(&self) -> MotionTuning {
        MotionTuning {
            fall_acceleration: self.fall_acceleration,
            max_fall_speed: self.max_fall_speed,
            grapple_decay: self.grapple_decay,
            grapple_speed_base: self.grapple_speed_base,
            grapple_max_speed: self.grapple_max_speed,
            grapple_jump_ground: self.grapple_jump_speed_ground,
            grapple_jump_air: self.grapple_jump_speed_air,
        }
    }

    /// Motion constants for the rival AI. Differs from the player only in
    /// how hard a grapple pulls per unit distance.
    pub fn rival_motion(&self) -> MotionTuning {
        MotionTuning {
            grapple_speed_base: self.ai_grapple_speed_base,
            ..self.player_motion()
        }
    }
}
