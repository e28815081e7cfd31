//! Characters: one per match slot, human or rival.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | [`CharacterState`], cooldowns, status timers, [`FrameContext`] |
//! | [`pilot`] | [`Pilot`] strategies: gamepad human and chasing rival |
//! | [`physics`] | The shared per-frame step, parameterized by [`MotionTuning`] |
//! | [`animation`] | Movement-sector classification and clip selection |
//! | [`aim`] | Yaw wrapping, smooth turning, aim vectors |
//! | [`rig`] | [`HeadlessRig`], the skeleton stand-in |
//!
//! ## Frame contract
//!
//! The match loop calls [`CharacterController::control`] then
//! [`CharacterController::update`] for every character, resolves positions
//! against the map, and only then advances the projectile pool.

pub mod aim;
pub mod animation;
pub mod physics;
pub mod pilot;
pub mod rig;
pub mod state;

pub use animation::{Animation, Sector};
pub use physics::MotionTuning;
pub use pilot::{AiControl, Control, PadControl, Pilot};
pub use rig::HeadlessRig;
pub use state::{CharacterState, Cooldowns, FrameContext, StatusTimer};

use crate::arena::{ArenaMap, Capsule};
use crate::config::ArenaConfig;
use crate::pickup::PickupKind;
use crate::projectile::{OwnerSlot, ProjectileKind, ProjectilePool};
use crate::services::{EffectKind, EffectService, Rig, SoundCue, SoundService};
use bevy::prelude::*;

#[derive(Component)]
pub struct CharacterController {
    pilot: Pilot,
    tuning: MotionTuning,
    state: CharacterState,
}

impl CharacterController {
    /// A human on gamepad `pad`.
    pub fn player(
        slot: OwnerSlot,
        pad: usize,
        spawn: Vec3,
        rig: Box<dyn Rig>,
        config: &ArenaConfig,
    ) -> Self {
        Self {
            pilot: Pilot::Player(PadControl { pad }),
            tuning: config.player_motion(),
            state: CharacterState::new(slot, spawn, rig, config),
        }
    }

    /// The computer-controlled rival. Its RNG is seeded from config so runs
    /// repeat exactly.
    pub fn rival(slot: OwnerSlot, spawn: Vec3, rig: Box<dyn Rig>, config: &ArenaConfig) -> Self {
        Self {
            pilot: Pilot::Ai(AiControl::new(config.ai_seed, spawn)),
            tuning: config.rival_motion(),
            state: CharacterState::new(slot, spawn, rig, config),
        }
    }

    #[inline]
    pub fn slot(&self) -> OwnerSlot {
        self.state.slot
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.pilot.is_player()
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    /// Direct state access for scripted setups and tests.
    pub fn state_mut(&mut self) -> &mut CharacterState {
        &mut self.state
    }

    pub fn tuning(&self) -> &MotionTuning {
        &self.tuning
    }

    pub fn is_stunned(&self) -> bool {
        self.state.stun.is_active()
    }

    pub fn is_boosted(&self) -> bool {
        self.state.boost.is_active()
    }

    // ── Frame steps ──────────────────────────────────────────────────────────

    pub fn control(&mut self, ctx: &mut FrameContext) {
        self.pilot.as_control().control(&mut self.state, ctx);
    }

    pub fn update(&mut self, ctx: &mut FrameContext) {
        let refresh_aim = self.pilot.as_control().aims_with_yaw();
        physics::step(&mut self.state, &self.tuning, ctx, refresh_aim);
    }

    /// Push the character back out of level geometry after it has moved.
    ///
    /// The height recorded at the start of the last physics step tells the
    /// map whether the feet came down onto a block from above.
    pub fn resolve_against(&mut self, map: &ArenaMap, config: &ArenaConfig) {
        self.state.position =
            map.resolve_character(self.state.prev_y, self.state.position, config.capsule_radius);
    }

    pub fn fire(&mut self, kind: ProjectileKind, ctx: &mut FrameContext) -> bool {
        self.state.fire(kind, ctx)
    }

    // ── Status entry points ──────────────────────────────────────────────────

    /// React to being struck by someone else's round. Returns whether the
    /// hit stunned.
    pub fn apply_hit(&mut self, kind: ProjectileKind, sound: &mut dyn SoundService) -> bool {
        match kind {
            ProjectileKind::Normal if !self.state.boost.is_active() => {
                self.state.stun.start();
                sound.play_cue(SoundCue::Stunned);
                info!("[character] slot {} stunned", self.state.slot);
                true
            }
            ProjectileKind::Normal => {
                debug!("[character] slot {} shrugged off a hit while boosted", self.state.slot);
                false
            }
            // No status effect for these yet.
            ProjectileKind::Grappler | ProjectileKind::Bomb => false,
        }
    }

    pub fn apply_pickup(
        &mut self,
        kind: PickupKind,
        effects: &mut dyn EffectService,
        sound: &mut dyn SoundService,
    ) {
        match kind {
            PickupKind::SpeedUp => {
                self.state.stop_boost_effect(effects);
                self.state.boost_effect = Some(effects.spawn(EffectKind::SpeedUp, self.state.position));
                self.state.boost.start();
                sound.play_cue(SoundCue::Pickup);
                info!("[character] slot {} picked up a speed boost", self.state.slot);
            }
        }
    }

    // ── Queries for the match loop and renderer ──────────────────────────────

    /// Endpoints of the grapple line: the projectile, and a point above the
    /// character's feet. `None` while the character has no grapple out.
    pub fn grapple_tether(&self, pool: &ProjectilePool, config: &ArenaConfig) -> Option<(Vec3, Vec3)> {
        let slot = self.state.slot;
        pool.exists_for(slot).then(|| {
            (
                pool.position_for(slot),
                self.state.position + Vec3::Y * config.grapple_tether_height,
            )
        })
    }

    pub fn hit_capsule(&self, config: &ArenaConfig) -> Capsule {
        Capsule {
            base: self.state.position,
            height: config.capsule_height,
            radius: config.capsule_radius,
        }
    }

    pub fn kill(&mut self) {
        self.state.dead = true;
    }

    pub fn is_dead(&self) -> bool {
        self.state.dead
    }

    /// Release everything the character holds in external services.
    pub fn teardown(&mut self, effects: &mut dyn EffectService) {
        self.state.stop_boost_effect(effects);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Block;
    use crate::input::PadInputs;
    use crate::projectile::MAX_SLOTS;
    use crate::services::{EffectRegistry, PadButton, SoundQueue, Stick};
    use std::f32::consts::TAU;

    struct Bench {
        config: ArenaConfig,
        pool: ProjectilePool,
        inputs: PadInputs,
        effects: EffectRegistry,
        sound: SoundQueue,
        map: ArenaMap,
    }

    impl Bench {
        fn new() -> Self {
            let config = ArenaConfig::default();
            Self {
                pool: ProjectilePool::new(&config),
                inputs: PadInputs::default(),
                effects: EffectRegistry::default(),
                sound: SoundQueue::default(),
                map: ArenaMap::new(0.0, 100.0),
                config,
            }
        }

        fn ctx(&mut self, target: Vec3) -> FrameContext<'_> {
            FrameContext {
                config: &self.config,
                pool: &mut self.pool,
                input: &self.inputs,
                sound: &mut self.sound,
                effects: &mut self.effects,
                target,
            }
        }

        fn player(&self, spawn: Vec3) -> CharacterController {
            CharacterController::player(0, 0, spawn, Box::new(HeadlessRig::new()), &self.config)
        }

        fn rival(&self, spawn: Vec3) -> CharacterController {
            CharacterController::rival(1, spawn, Box::new(HeadlessRig::new()), &self.config)
        }

        /// One full match frame for a lone character.
        fn frame(&mut self, character: &mut CharacterController) {
            let mut ctx = self.ctx(Vec3::ZERO);
            character.control(&mut ctx);
            character.update(&mut ctx);
            character.resolve_against(&self.map, &self.config);
            self.pool
                .advance_all(&self.map, &mut self.effects, &mut self.sound);
        }

        fn update_only(&mut self, character: &mut CharacterController, frames: u32) {
            for _ in 0..frames {
                let mut ctx = self.ctx(Vec3::ZERO);
                character.update(&mut ctx);
            }
        }
    }

    #[test]
    fn fire_respects_cooldown() {
        let mut bench = Bench::new();
        let mut hero = bench.player(Vec3::ZERO);

        let mut ctx = bench.ctx(Vec3::ZERO);
        assert!(hero.fire(ProjectileKind::Normal, &mut ctx));
        assert!(!hero.fire(ProjectileKind::Normal, &mut ctx), "second shot is on cooldown");
        drop(ctx);

        assert_eq!(bench.pool.len(), 1);
        assert_eq!(
            hero.state().cooldowns.get(ProjectileKind::Normal),
            bench.config.cooldown_normal
        );
        assert_eq!(bench.sound.pending(), &[SoundCue::ShotNormal]);
    }

    #[test]
    fn fire_on_cooldown_leaves_cooldown_untouched() {
        let mut bench = Bench::new();
        let mut hero = bench.player(Vec3::ZERO);
        hero.state_mut().cooldowns.start(ProjectileKind::Bomb, 7);

        let mut ctx = bench.ctx(Vec3::ZERO);
        assert!(!hero.fire(ProjectileKind::Bomb, &mut ctx));
        drop(ctx);

        assert!(bench.pool.is_empty());
        assert_eq!(hero.state().cooldowns.get(ProjectileKind::Bomb), 7);
    }

    #[test]
    fn projectile_leaves_from_hand_attachment() {
        let mut bench = Bench::new();
        let rig = HeadlessRig::new().with_attachment(bench.config.bone_finger, Vec3::Y * 9.0);
        let mut hero =
            CharacterController::player(0, 0, Vec3::new(5.0, 0.0, 5.0), Box::new(rig), &bench.config);

        let mut ctx = bench.ctx(Vec3::ZERO);
        hero.fire(ProjectileKind::Normal, &mut ctx);
        drop(ctx);

        let round = bench.pool.iter().next().expect("one round");
        assert_eq!(round.position, Vec3::new(5.0, 9.0, 5.0));
        assert_eq!(round.owner, 0);
    }

    #[test]
    fn trigger_fires_then_cooldown_ticks_same_frame() {
        let mut bench = Bench::new();
        bench.inputs.hold(0, PadButton::RightTrigger);
        let mut hero = bench.player(Vec3::new(0.0, 50.0, 0.0));

        let mut ctx = bench.ctx(Vec3::ZERO);
        hero.control(&mut ctx);
        drop(ctx);

        assert_eq!(bench.pool.len(), 1);
        assert_eq!(
            hero.state().cooldowns.get(ProjectileKind::Normal),
            bench.config.cooldown_normal - 1
        );
    }

    #[test]
    fn grapple_button_wins_over_bomb() {
        let mut bench = Bench::new();
        bench.inputs.hold(0, PadButton::X);
        bench.inputs.hold(0, PadButton::Y);
        let mut hero = bench.player(Vec3::new(0.0, 50.0, 0.0));

        let mut ctx = bench.ctx(Vec3::ZERO);
        hero.control(&mut ctx);
        drop(ctx);

        assert!(bench.pool.exists_for(0));
        assert!(bench.pool.iter().all(|p| p.kind == ProjectileKind::Grappler));
    }

    #[test]
    fn left_stick_up_walks_along_aim() {
        let mut bench = Bench::new();
        bench.inputs.set_stick(0, Stick::Left, Vec2::Y);
        let mut hero = bench.player(Vec3::ZERO);

        let mut ctx = bench.ctx(Vec3::ZERO);
        hero.control(&mut ctx);
        drop(ctx);

        let movement = hero.state().movement;
        assert!((movement.x - bench.config.walk_speed).abs() < 1e-5, "{movement:?}");
        assert!(movement.z.abs() < 1e-5, "{movement:?}");
        assert!(hero.state().forward.dot(movement) > 0.0);
    }

    #[test]
    fn stick_inside_dead_zone_is_ignored() {
        let mut bench = Bench::new();
        bench.inputs.set_stick(0, Stick::Left, Vec2::new(0.1, 0.1));
        bench.inputs.set_stick(0, Stick::Right, Vec2::new(0.1, 0.0));
        let mut hero = bench.player(Vec3::ZERO);

        let mut ctx = bench.ctx(Vec3::ZERO);
        hero.control(&mut ctx);
        drop(ctx);

        assert_eq!(hero.state().movement, Vec3::ZERO);
        assert_eq!(hero.state().yaw, 0.0);
    }

    #[test]
    fn right_stick_wraps_yaw_and_clamps_pitch() {
        let mut bench = Bench::new();
        bench.inputs.set_stick(0, Stick::Right, Vec2::new(-1.0, 1.0));
        let mut hero = bench.player(Vec3::ZERO);

        for _ in 0..20 {
            let mut ctx = bench.ctx(Vec3::ZERO);
            hero.control(&mut ctx);
        }

        let state = hero.state();
        assert!((0.0..TAU).contains(&state.yaw));
        assert!(state.yaw > std::f32::consts::PI, "turned left past zero: {}", state.yaw);
        assert_eq!(state.pitch, bench.config.max_pitch);
    }

    #[test]
    fn jump_needs_ground_and_starts_jump_clip() {
        let mut bench = Bench::new();
        bench.inputs.press(0, PadButton::A);
        let mut hero = bench.player(Vec3::ZERO);

        let mut ctx = bench.ctx(Vec3::ZERO);
        hero.control(&mut ctx);
        drop(ctx);
        assert_eq!(hero.state().vertical_speed, 0.0, "airborne: no jump");

        hero.state_mut().grounded = true;
        let mut ctx = bench.ctx(Vec3::ZERO);
        hero.control(&mut ctx);
        hero.update(&mut ctx);
        drop(ctx);

        assert!(hero.state().vertical_speed > 0.0);
        assert_eq!(hero.state().animation, Animation::JumpUp);
        assert_eq!(hero.state().rig().active_clip(), bench.config.anim_jump_up);
    }

    #[test]
    fn falling_character_lands_grounded_and_idle() {
        let mut bench = Bench::new();
        let mut hero = bench.player(Vec3::new(0.0, 10.0, 0.0));

        for _ in 0..60 {
            bench.frame(&mut hero);
        }

        assert!(hero.state().grounded);
        assert_eq!(hero.position().y, 0.0);
        assert_eq!(hero.state().animation, Animation::Idle);
        assert_eq!(hero.state().rig().active_clip(), bench.config.anim_aiming_idle);
    }

    #[test]
    fn fall_speed_is_capped() {
        let mut bench = Bench::new();
        let mut hero = bench.player(Vec3::new(150.0, 0.0, 0.0));
        for _ in 0..200 {
            bench.frame(&mut hero);
        }
        assert_eq!(hero.state().vertical_speed, -bench.config.max_fall_speed);
    }

    #[test]
    fn hooked_grapple_is_consumed_and_pulls() {
        let mut bench = Bench::new();
        bench.pool.spawn(
            ProjectileKind::Grappler,
            Vec3::NEG_Y,
            Vec3::new(0.0, 1.0, 0.0),
            0,
            &mut bench.effects,
        );
        bench
            .pool
            .advance_all(&bench.map, &mut bench.effects, &mut bench.sound);
        assert!(bench.pool.is_collided_for(0));
        let hook = bench.pool.position_for(0);

        let mut hero = bench.player(Vec3::new(0.0, 50.0, 0.0));
        bench.update_only(&mut hero, 1);

        assert!(bench.pool.invalid_for(0), "hook consumed");
        let state = hero.state();
        assert_eq!(state.vertical_speed, bench.config.grapple_jump_speed_air);
        assert!((state.grapple_direction - Vec3::NEG_Y).length() < 1e-5);
        let expected = (bench.config.grapple_speed_base * (50.0 - hook.y))
            .min(bench.config.grapple_max_speed);
        assert!((state.grapple_speed - expected).abs() < 1e-4);

        // The pull only fires once per hook.
        let speed = state.grapple_speed;
        bench.update_only(&mut hero, 1);
        assert!(hero.state().grapple_speed < speed);
    }

    #[test]
    fn grapple_tether_only_while_grapple_exists() {
        let mut bench = Bench::new();
        let hero = bench.player(Vec3::new(1.0, 2.0, 3.0));
        assert!(hero.grapple_tether(&bench.pool, &bench.config).is_none());

        bench.pool.spawn(
            ProjectileKind::Grappler,
            Vec3::Z,
            Vec3::new(7.0, 7.0, 7.0),
            0,
            &mut bench.effects,
        );
        let (hook, anchor) = hero
            .grapple_tether(&bench.pool, &bench.config)
            .expect("tether");
        assert_eq!(hook, Vec3::new(7.0, 7.0, 7.0));
        assert_eq!(
            anchor,
            Vec3::new(1.0, 2.0 + bench.config.grapple_tether_height, 3.0)
        );
    }

    #[test]
    fn normal_hit_stuns_for_exactly_stun_frames() {
        let mut bench = Bench::new();
        let mut hero = bench.player(Vec3::ZERO);

        assert!(hero.apply_hit(ProjectileKind::Normal, &mut bench.sound));
        assert!(hero.is_stunned());

        let frames = bench.config.stun_frames;
        bench.update_only(&mut hero, frames - 1);
        assert!(hero.is_stunned());
        bench.update_only(&mut hero, 1);
        assert!(!hero.is_stunned());
    }

    #[test]
    fn boost_blocks_stun() {
        let mut bench = Bench::new();
        let mut hero = bench.player(Vec3::ZERO);
        hero.apply_pickup(PickupKind::SpeedUp, &mut bench.effects, &mut bench.sound);

        assert!(!hero.apply_hit(ProjectileKind::Normal, &mut bench.sound));
        assert!(!hero.is_stunned());
    }

    #[test]
    fn grapple_and_bomb_hits_change_nothing() {
        let mut bench = Bench::new();
        let mut hero = bench.player(Vec3::ZERO);
        assert!(!hero.apply_hit(ProjectileKind::Grappler, &mut bench.sound));
        assert!(!hero.apply_hit(ProjectileKind::Bomb, &mut bench.sound));
        assert!(!hero.is_stunned());
        assert!(bench.sound.pending().is_empty());
    }

    #[test]
    fn stunned_walk_is_slower_and_boosted_faster() {
        let bench = Bench::new();
        let mut hero = bench.player(Vec3::ZERO);
        let config = &bench.config;
        assert_eq!(hero.state().walk_speed(config), config.walk_speed);

        hero.state_mut().stun.start();
        assert_eq!(hero.state().walk_speed(config), config.stun_walk_speed);

        hero.state_mut().stun.clear();
        hero.state_mut().boost.start();
        assert_eq!(hero.state().walk_speed(config), config.speed_up_walk_speed);
    }

    #[test]
    fn repeated_pickup_refreshes_boost_with_one_effect() {
        let mut bench = Bench::new();
        let mut hero = bench.player(Vec3::ZERO);

        hero.apply_pickup(PickupKind::SpeedUp, &mut bench.effects, &mut bench.sound);
        bench.update_only(&mut hero, 10);
        hero.apply_pickup(PickupKind::SpeedUp, &mut bench.effects, &mut bench.sound);

        assert!(hero.is_boosted());
        assert_eq!(hero.state().boost.elapsed(), 0);
        assert_eq!(bench.effects.count_of(EffectKind::SpeedUp), 1);

        let frames = bench.config.speed_up_frames;
        bench.update_only(&mut hero, frames);
        assert!(!hero.is_boosted());
        assert_eq!(bench.effects.count_of(EffectKind::SpeedUp), 0);
    }

    #[test]
    fn boost_effect_follows_character() {
        let mut bench = Bench::new();
        let mut hero = bench.player(Vec3::ZERO);
        hero.apply_pickup(PickupKind::SpeedUp, &mut bench.effects, &mut bench.sound);
        hero.state_mut().position = Vec3::new(4.0, 0.0, 4.0);
        bench.update_only(&mut hero, 1);

        let handle = hero.state().boost_effect().expect("boost effect");
        assert_eq!(
            bench.effects.get(handle).map(|e| e.position),
            Some(Vec3::new(4.0, 0.0, 4.0))
        );
    }

    #[test]
    fn rival_closes_in_and_fires_on_cadence() {
        let mut bench = Bench::new();
        let mut rival = bench.rival(Vec3::new(0.0, 0.0, 50.0));

        let mut ctx = bench.ctx(Vec3::ZERO);
        rival.control(&mut ctx);
        drop(ctx);
        assert!(rival.state().movement.z < 0.0, "moves toward the target");
        assert_eq!(bench.pool.len(), 1, "fires on its first frame");
        assert!((rival.state().forward - Vec3::NEG_Z).length() < 1e-5);

        for _ in 1..bench.config.ai_fire_interval {
            let mut ctx = bench.ctx(Vec3::ZERO);
            rival.control(&mut ctx);
        }
        assert_eq!(bench.pool.len(), 1, "silent between cadence frames");
    }

    #[test]
    fn rival_turns_toward_target_gradually() {
        let mut bench = Bench::new();
        let mut rival = bench.rival(Vec3::new(0.0, 0.0, 50.0));
        let step = bench.config.turn_step;

        let mut ctx = bench.ctx(Vec3::ZERO);
        rival.control(&mut ctx);
        drop(ctx);

        let yaw = rival.state().yaw;
        let moved = yaw.min(TAU - yaw);
        assert!(moved <= step + 1e-5, "yaw jumped to {yaw}");
    }

    #[test]
    fn same_seed_same_rival() {
        let mut a_bench = Bench::new();
        let mut b_bench = Bench::new();
        let mut a = a_bench.rival(Vec3::new(20.0, 0.0, 40.0));
        let mut b = b_bench.rival(Vec3::new(20.0, 0.0, 40.0));
        for _ in 0..120 {
            a_bench.frame(&mut a);
            b_bench.frame(&mut b);
        }
        assert_eq!(a.position(), b.position());
        assert_eq!(a_bench.pool.len(), b_bench.pool.len());
    }

    #[test]
    fn pulled_down_onto_block_lands_on_top() {
        let mut bench = Bench::new();
        bench.map = ArenaMap::new(0.0, 100.0).with_block(Block::new(
            Vec3::new(0.0, 20.0, 0.0),
            Vec3::new(30.0, 20.0, 30.0),
        ));
        let mut hero = bench.player(Vec3::new(0.0, 42.0, 0.0));
        {
            let state = hero.state_mut();
            state.vertical_speed = -3.0;
            state.grapple_direction = Vec3::NEG_Y;
            state.grapple_speed = 3.0;
        }

        bench.frame(&mut hero);

        assert_eq!(hero.state().movement.y, -6.0);
        assert_eq!(hero.position(), Vec3::new(0.0, 40.0, 0.0));
    }

    #[test]
    fn far_hook_pull_is_clamped_to_max() {
        let mut bench = Bench::new();
        bench.pool.spawn(
            ProjectileKind::Grappler,
            Vec3::NEG_Y,
            Vec3::new(0.0, 1.0, 0.0),
            0,
            &mut bench.effects,
        );
        bench
            .pool
            .advance_all(&bench.map, &mut bench.effects, &mut bench.sound);
        assert!(bench.pool.is_collided_for(0));

        let reach = bench.config.grapple_max_speed / bench.config.grapple_speed_base;
        let mut hero = bench.player(Vec3::new(0.0, reach + 50.0, 0.0));
        bench.update_only(&mut hero, 1);

        assert_eq!(hero.state().grapple_speed, bench.config.grapple_max_speed);
    }

    #[test]
    fn fire_from_slot_without_grapple_tracking_changes_nothing() {
        let mut bench = Bench::new();
        let mut stray = CharacterController::player(
            MAX_SLOTS,
            0,
            Vec3::ZERO,
            Box::new(HeadlessRig::new()),
            &bench.config,
        );

        let mut ctx = bench.ctx(Vec3::ZERO);
        assert!(!stray.fire(ProjectileKind::Grappler, &mut ctx));
        drop(ctx);

        assert!(bench.pool.is_empty());
        assert!(bench.sound.pending().is_empty());
        assert!(stray.state().cooldowns.is_ready(ProjectileKind::Grappler));
    }

    /// One rival decision with the rival's height and vertical speed pinned,
    /// so only this frame's jump shows in `vertical_speed`.
    fn rival_step(bench: &mut Bench, rival: &mut CharacterController) -> bool {
        rival.state_mut().vertical_speed = 0.0;
        let mut ctx = bench.ctx(Vec3::ZERO);
        rival.control(&mut ctx);
        drop(ctx);
        rival.state().vertical_speed == bench.config.jump_speed
    }

    #[test]
    fn rival_held_in_place_jumps_at_stuck_check() {
        let mut bench = Bench::new();
        let mut rival = bench.rival(Vec3::new(0.0, 0.0, 50.0));
        let check = bench.config.ai_stuck_check_frames;

        // Frame 0 is itself a check; the next one is `check` frames later.
        assert!(rival_step(&mut bench, &mut rival));
        for frame in 1..check {
            assert!(!rival_step(&mut bench, &mut rival), "jumped on frame {frame}");
        }
        assert!(rival_step(&mut bench, &mut rival));
    }

    #[test]
    fn rival_that_keeps_moving_does_not_stuck_jump() {
        let mut bench = Bench::new();
        let mut rival = bench.rival(Vec3::new(0.0, 0.0, 50.0));
        let check = bench.config.ai_stuck_check_frames;
        let stride = bench.config.ai_stuck_distance * 2.0;

        rival_step(&mut bench, &mut rival);
        for _ in 1..check {
            rival_step(&mut bench, &mut rival);
        }
        rival.state_mut().position.x += stride;
        assert!(!rival_step(&mut bench, &mut rival));
    }

    #[test]
    fn rival_random_jump_needs_ground() {
        let mut bench = Bench::new();
        // An interval of one makes every grounded roll a jump.
        bench.config.ai_jump_interval = 1;
        let mut rival = bench.rival(Vec3::new(0.0, 0.0, 50.0));
        rival_step(&mut bench, &mut rival);

        assert!(!rival_step(&mut bench, &mut rival), "airborne rival jumped");
        rival.state_mut().grounded = true;
        assert!(rival_step(&mut bench, &mut rival));
    }

    #[test]
    fn rival_chases_harder_while_its_hook_is_pending() {
        let spawn = Vec3::new(0.0, 0.0, 50.0);
        let mut plain = Bench::new();
        let mut baseline = plain.rival(spawn);
        rival_step(&mut plain, &mut baseline);

        let mut hooked = Bench::new();
        hooked.pool.spawn(
            ProjectileKind::Grappler,
            Vec3::NEG_Y,
            Vec3::new(0.0, 1.0, 0.0),
            1,
            &mut hooked.effects,
        );
        hooked
            .pool
            .advance_all(&hooked.map, &mut hooked.effects, &mut hooked.sound);
        assert!(hooked.pool.is_collided_for(1));
        let mut chaser = hooked.rival(spawn);
        rival_step(&mut hooked, &mut chaser);

        let extra = hooked.config.stun_walk_speed * hooked.config.ai_grapple_chase_scale;
        let delta = chaser.state().movement - baseline.state().movement;
        assert!((delta - Vec3::NEG_Z * extra).length() < 1e-5, "{delta:?}");
    }

    #[test]
    fn rival_ignores_consumed_hook() {
        let spawn = Vec3::new(0.0, 0.0, 50.0);
        let mut plain = Bench::new();
        let mut baseline = plain.rival(spawn);
        rival_step(&mut plain, &mut baseline);

        let mut hooked = Bench::new();
        hooked.pool.spawn(
            ProjectileKind::Grappler,
            Vec3::NEG_Y,
            Vec3::new(0.0, 1.0, 0.0),
            1,
            &mut hooked.effects,
        );
        hooked
            .pool
            .advance_all(&hooked.map, &mut hooked.effects, &mut hooked.sound);
        hooked.pool.kill(1);
        let mut chaser = hooked.rival(spawn);
        rival_step(&mut hooked, &mut chaser);

        assert_eq!(chaser.state().movement, baseline.state().movement);
    }

    #[test]
    fn kill_marks_dead() {
        let bench = Bench::new();
        let mut hero = bench.player(Vec3::ZERO);
        assert!(!hero.is_dead());
        hero.kill();
        assert!(hero.is_dead());
    }
}
