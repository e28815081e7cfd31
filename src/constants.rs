//! Centralised gameplay constants.
//!
//! These are the compiled defaults behind [`crate::config::ArenaConfig`].
//! Every value is per frame (the simulation steps once per rendered frame at
//! 60 Hz) unless the name says otherwise. Distances are world units; one unit
//! is roughly a centimetre of character height.
//!
//! ## Tuning guidance
//!
//! Prefer overriding values in `assets/arena.toml` over editing this file.
//! Keep the two in sync when a default changes for good.

// ── Character: Body ───────────────────────────────────────────────────────────

/// Radius of the character's hit capsule.
pub const CAPSULE_RADIUS: f32 = 4.0;

/// Height of the capsule's core segment, measured up from the feet.
pub const CAPSULE_HEIGHT: f32 = 12.0;

/// Where both characters enter the arena before the first fall settles them.
pub const PLAYER_SPAWN: [f32; 3] = [0.0, 25.0, -60.0];
pub const RIVAL_SPAWN: [f32; 3] = [0.0, 25.0, 60.0];

// ── Character: Movement ───────────────────────────────────────────────────────

/// Stick magnitude below which sticks are treated as centred.
pub const STICK_DEAD_ZONE: f32 = 0.2;

pub const WALK_SPEED: f32 = 0.8;
/// Walk speed while stunned. Must stay below `WALK_SPEED`.
pub const STUN_WALK_SPEED: f32 = 0.3;
/// Walk speed while the speed-up pickup is active.
pub const SPEED_UP_WALK_SPEED: f32 = 1.4;

/// Upward speed granted by a jump.
pub const JUMP_SPEED: f32 = 2.0;

/// Downward acceleration applied every airborne frame.
///
/// At 0.1 a standing jump peaks after 20 frames, about a third of a second.
pub const FALL_ACCELERATION: f32 = 0.1;

/// Terminal fall speed (positive magnitude).
pub const MAX_FALL_SPEED: f32 = 3.0;

// ── Character: Aim ────────────────────────────────────────────────────────────

/// Radians per frame at full right-stick deflection.
pub const ANGLE_SCALE: f32 = 0.05;

/// Pitch limit (radians, symmetric).
pub const MAX_PITCH: f32 = 0.6;

/// Fixed yaw step used when turning smoothly toward a target heading.
pub const TURN_STEP: f32 = 0.1;

// ── Character: Grapple ────────────────────────────────────────────────────────

/// Pull speed lost per airborne frame after a grapple hook-up.
pub const GRAPPLE_DECAY: f32 = 0.01;

/// Pull speed per unit of distance to the hook point.
pub const GRAPPLE_SPEED_BASE: f32 = 0.02;

/// Rival AI pull speed per unit distance.  Kept separate so the AI can be
/// tuned gentler or harsher than a human.
pub const AI_GRAPPLE_SPEED_BASE: f32 = 0.02;

/// Upper bound on grapple pull speed.
pub const GRAPPLE_MAX_SPEED: f32 = 3.0;

/// Vertical speed given on hook-up while standing.
pub const GRAPPLE_JUMP_SPEED_GROUND: f32 = 2.5;

/// Vertical speed given on hook-up while airborne.
pub const GRAPPLE_JUMP_SPEED_AIR: f32 = 1.5;

/// Height above the feet where the grapple tether attaches for drawing.
pub const GRAPPLE_TETHER_HEIGHT: f32 = 8.0;

// ── Character: Status ─────────────────────────────────────────────────────────

/// Frames a Normal-projectile hit keeps the character stunned.
pub const STUN_FRAMES: u32 = 60;

/// Frames a speed-up pickup lasts.
pub const SPEED_UP_FRAMES: u32 = 300;

// ── Character: Weapons ────────────────────────────────────────────────────────

pub const COOLDOWN_NORMAL: u32 = 10;
pub const COOLDOWN_GRAPPLER: u32 = 90;
pub const COOLDOWN_BOMB: u32 = 120;

/// Skeleton attachment point projectiles are fired from.
pub const BONE_FINGER: i32 = 24;

// ── Character: Animation ──────────────────────────────────────────────────────

pub const ANIM_AIMING_IDLE: i32 = 0;
pub const ANIM_JUMP_UP: i32 = 1;
pub const ANIM_JUMP_LOOP: i32 = 2;
pub const ANIM_RUN_FORWARD: i32 = 3;
pub const ANIM_RUN_FORWARD_LEFT: i32 = 4;
pub const ANIM_RUN_FORWARD_RIGHT: i32 = 5;
pub const ANIM_RUN_LEFT: i32 = 6;
pub const ANIM_RUN_RIGHT: i32 = 7;
pub const ANIM_RUN_BACKWARD: i32 = 8;
pub const ANIM_RUN_BACKWARD_LEFT: i32 = 9;
pub const ANIM_RUN_BACKWARD_RIGHT: i32 = 10;

/// Cross-fade rate handed to the rig on every clip change.
pub const BLEND_RATE: f32 = 0.1;

pub const ANIM_SPEED_WALK: f32 = 0.5;
pub const ANIM_SPEED_SPEED_UP: f32 = 0.8;

// ── Rival AI ──────────────────────────────────────────────────────────────────

/// One-in-N chance per grounded frame that the rival jumps.
pub const AI_JUMP_INTERVAL: u32 = 120;

/// Frames between stuck checks.
pub const AI_STUCK_CHECK_FRAMES: u32 = 30;

/// Displacement over one check window below which the rival counts as stuck.
pub const AI_STUCK_DISTANCE: f32 = 10.0;

/// Frames between rival shots.
pub const AI_FIRE_INTERVAL: u32 = 15;

/// Chase speed multiplier (over stun walk speed) while the rival's own
/// grapple has hooked.
pub const AI_GRAPPLE_CHASE_SCALE: f32 = 1.5;

pub const AI_SEED: u64 = 0x5eed;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const NORMAL_RADIUS: f32 = 1.0;
pub const NORMAL_SPEED: f32 = 4.0;
pub const NORMAL_GRAVITY: f32 = 0.002;

pub const GRAPPLER_RADIUS: f32 = 1.5;
pub const GRAPPLER_SPEED: f32 = 3.0;
pub const GRAPPLER_GRAVITY: f32 = 0.01;

pub const BOMB_RADIUS: f32 = 2.5;
pub const BOMB_SPEED: f32 = 2.0;
pub const BOMB_GRAVITY: f32 = 0.05;

/// Any projectile with a coordinate at or beyond ±this is despawned.
pub const DESPAWN_LINE: f32 = 1000.0;

/// Frames a consumed grapple lingers before it is removed.
pub const GRAPPLE_LIFETIME: u32 = 30;

// ── Arena ─────────────────────────────────────────────────────────────────────

pub const FLOOR_HEIGHT: f32 = 0.0;

/// Half-extent of the square floor; walking past it drops the character.
pub const FLOOR_HALF_EXTENT: f32 = 200.0;

/// Characters below this height are out of the match.
pub const KILL_LINE: f32 = -200.0;

/// Reach within which a character collects a pickup.
pub const PICKUP_RADIUS: f32 = 6.0;

// ── Select scene ──────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 1920.0;

/// Horizontal pixels per frame the slide panel travels.
pub const SLIDE_SPEED: f32 = 60.0;
