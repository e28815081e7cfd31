//! The match-wide projectile pool.
//!
//! Grapples are tracked in a fixed array with at most one per owner slot;
//! the per-owner queries (`is_collided_for`, `position_for`, ...) only ever
//! look at that slot. Normal and Bomb rounds live in an unordered `Vec`
//! pruned by the dead flag.
//!
//! Every query tolerates an empty or out-of-range slot and answers with a
//! neutral value (`false` / `Vec3::ZERO`).

use super::{OwnerSlot, Projectile, ProjectileKind, ProjectileTuning, MAX_SLOTS};
use crate::arena::Capsule;
use crate::config::ArenaConfig;
use crate::services::{EffectKind, EffectService, MapCollision, SoundCue, SoundService};
use bevy::prelude::*;

/// Shared by every character and the world for the length of a match.
#[derive(Resource, Debug, Clone)]
pub struct ProjectilePool {
    tuning: [ProjectileTuning; 3],
    despawn_line: f32,
    grapple_lifetime: u32,
    grapples: [Option<Projectile>; MAX_SLOTS],
    rounds: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            tuning: ProjectileKind::ALL.map(|kind| config.projectile_tuning(kind)),
            despawn_line: config.despawn_line,
            grapple_lifetime: config.grapple_lifetime,
            grapples: Default::default(),
            rounds: Vec::new(),
        }
    }

    /// Launch a projectile. The caller has already checked its cooldown.
    ///
    /// A new grapple replaces the owner's previous one. Returns `false`, and
    /// launches nothing, for a grapple from a slot outside `0..MAX_SLOTS`.
    pub fn spawn(
        &mut self,
        kind: ProjectileKind,
        direction: Vec3,
        origin: Vec3,
        owner: OwnerSlot,
        effects: &mut dyn EffectService,
    ) -> bool {
        let projectile = Projectile::new(kind, owner, origin, direction, self.tuning[kind.index()]);

        if kind == ProjectileKind::Grappler {
            let Some(slot) = self.grapples.get_mut(owner) else {
                warn!("[pool] grapple from slot {owner} ignored: no such slot");
                return false;
            };
            if let Some(mut previous) = slot.take() {
                previous.stop_effect(effects);
            }
            let handle = effects.spawn(kind.trail(), origin);
            *slot = Some(projectile.with_effect(handle));
        } else {
            let handle = effects.spawn(kind.trail(), origin);
            self.rounds.push(projectile.with_effect(handle));
        }
        true
    }

    /// Advance every projectile one frame.
    ///
    /// Projectiles that died last frame are swept first, so a projectile
    /// marked dead here is still visible to this frame's queries.
    pub fn advance_all(
        &mut self,
        map: &dyn MapCollision,
        effects: &mut dyn EffectService,
        sound: &mut dyn SoundService,
    ) {
        self.sweep(effects);

        let (despawn_line, lifetime) = (self.despawn_line, self.grapple_lifetime);

        for grapple in self.grapples.iter_mut().flatten() {
            if grapple.advance(map, despawn_line, lifetime) {
                debug!(
                    "[pool] grapple from slot {} hooked at {:?}",
                    grapple.owner, grapple.position
                );
            }
            grapple.sync_effect(effects);
        }

        for round in &mut self.rounds {
            if round.advance(map, despawn_line, lifetime) {
                round.mark_dead();
                if round.kind == ProjectileKind::Bomb {
                    // One-shot: the blast plays out on its own, untracked.
                    effects.spawn(EffectKind::BombBlast, round.position);
                    sound.play_cue(SoundCue::BombBlast);
                }
            }
            round.sync_effect(effects);
        }
    }

    /// Remove dead projectiles, stopping any effect still attached.
    pub fn sweep(&mut self, effects: &mut dyn EffectService) {
        for slot in &mut self.grapples {
            if slot.as_ref().is_some_and(Projectile::is_dead) {
                if let Some(mut dead) = slot.take() {
                    dead.stop_effect(effects);
                }
            }
        }
        for round in self.rounds.iter_mut().filter(|r| r.is_dead()) {
            round.stop_effect(effects);
        }
        self.rounds.retain(|r| !r.is_dead());
    }

    // ── Per-owner grapple queries ────────────────────────────────────────────

    fn tracked(&self, owner: OwnerSlot) -> Option<&Projectile> {
        self.grapples
            .get(owner)
            .and_then(Option::as_ref)
            .filter(|p| !p.is_dead())
    }

    pub fn is_collided_for(&self, owner: OwnerSlot) -> bool {
        self.tracked(owner).is_some_and(Projectile::is_collided)
    }

    pub fn position_for(&self, owner: OwnerSlot) -> Vec3 {
        self.tracked(owner).map_or(Vec3::ZERO, |p| p.position)
    }

    pub fn exists_for(&self, owner: OwnerSlot) -> bool {
        self.tracked(owner).is_some()
    }

    pub fn invalid_for(&self, owner: OwnerSlot) -> bool {
        self.tracked(owner).is_some_and(Projectile::is_invalidated)
    }

    /// Invalidate the owner's grapple once its pull has been consumed.
    pub fn kill(&mut self, owner: OwnerSlot) {
        if let Some(grapple) = self.grapples.get_mut(owner).and_then(Option::as_mut) {
            grapple.invalidate();
        }
    }

    // ── Character hits ───────────────────────────────────────────────────────

    /// Consume the first live round fired by someone else that overlaps
    /// `body`, returning its kind.
    pub fn hit_test(&mut self, target: OwnerSlot, body: &Capsule) -> Option<ProjectileKind> {
        let round = self.rounds.iter_mut().find(|r| {
            r.owner != target
                && !r.is_dead()
                && !r.is_collided()
                && body.distance_to(r.position) <= body.radius + r.radius
        })?;
        round.mark_dead();
        Some(round.kind)
    }

    // ── Inspection / teardown ────────────────────────────────────────────────

    /// Every projectile, grapples first. Includes ones awaiting the sweep.
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.grapples.iter().flatten().chain(self.rounds.iter())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything at match teardown.
    pub fn clear(&mut self, effects: &mut dyn EffectService) {
        for slot in &mut self.grapples {
            if let Some(mut grapple) = slot.take() {
                grapple.stop_effect(effects);
            }
        }
        for round in &mut self.rounds {
            round.stop_effect(effects);
        }
        self.rounds.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{EffectRegistry, SoundQueue};

    struct OpenSky;

    impl MapCollision for OpenSky {
        fn test_collision(&self, _: Vec3, _: f32, _: ProjectileKind) -> bool {
            false
        }
    }

    /// Everything at or beyond `z` is solid.
    struct WallAt(f32);

    impl MapCollision for WallAt {
        fn test_collision(&self, position: Vec3, radius: f32, _: ProjectileKind) -> bool {
            position.z + radius >= self.0
        }
    }

    struct Harness {
        pool: ProjectilePool,
        effects: EffectRegistry,
        sound: SoundQueue,
        config: ArenaConfig,
    }

    impl Harness {
        fn new() -> Self {
            let config = ArenaConfig::default();
            Self {
                pool: ProjectilePool::new(&config),
                effects: EffectRegistry::default(),
                sound: SoundQueue::default(),
                config,
            }
        }

        fn spawn(&mut self, kind: ProjectileKind, owner: OwnerSlot) -> bool {
            self.pool
                .spawn(kind, Vec3::Z, Vec3::ZERO, owner, &mut self.effects)
        }

        fn advance(&mut self, map: &dyn MapCollision) {
            self.pool
                .advance_all(map, &mut self.effects, &mut self.sound);
        }
    }

    #[test]
    fn normal_round_flight_matches_closed_form() {
        let mut h = Harness::new();
        h.spawn(ProjectileKind::Normal, 0);

        let frames = 25;
        for _ in 0..frames {
            h.advance(&OpenSky);
        }

        let n = frames as f32;
        let speed = h.config.normal_speed;
        let gravity = h.config.normal_gravity;
        let expected_drop: f32 = (1..=frames).map(|i| i as f32 * gravity).sum();

        let p = h.pool.iter().next().expect("round still live");
        assert!((p.position.z - n * speed).abs() < 1e-3, "z = {}", p.position.z);
        assert!((p.position.y + expected_drop).abs() < 1e-3, "y = {}", p.position.y);
    }

    #[test]
    fn round_past_despawn_line_is_dead_then_swept() {
        let mut h = Harness::new();
        h.spawn(ProjectileKind::Normal, 0);

        let frames_to_cross = (h.config.despawn_line / h.config.normal_speed).ceil() as usize;
        for _ in 0..frames_to_cross {
            h.advance(&OpenSky);
        }
        assert!(h.pool.iter().all(Projectile::is_dead));
        assert_eq!(h.pool.len(), 1, "dead round waits for the sweep");

        h.advance(&OpenSky);
        assert!(h.pool.is_empty());
        assert!(h.effects.is_empty(), "trail stopped on death");
    }

    #[test]
    fn empty_slots_answer_neutrally() {
        let h = Harness::new();
        for owner in [0, 1, MAX_SLOTS, usize::MAX] {
            assert!(!h.pool.is_collided_for(owner));
            assert!(!h.pool.exists_for(owner));
            assert!(!h.pool.invalid_for(owner));
            assert_eq!(h.pool.position_for(owner), Vec3::ZERO);
        }
    }

    #[test]
    fn grapple_from_unknown_slot_is_refused() {
        let mut h = Harness::new();
        assert!(!h.spawn(ProjectileKind::Grappler, MAX_SLOTS));
        assert!(h.pool.is_empty());
        assert!(h.effects.is_empty(), "no trail left behind");

        assert!(h.spawn(ProjectileKind::Normal, MAX_SLOTS), "rounds need no slot");
        assert!(h.spawn(ProjectileKind::Grappler, MAX_SLOTS - 1));
    }

    #[test]
    fn kill_on_missing_slot_is_a_no_op() {
        let mut h = Harness::new();
        h.pool.kill(0);
        h.pool.kill(usize::MAX);
        assert!(h.pool.is_empty());
    }

    #[test]
    fn grapple_hook_then_kill_then_expire() {
        let mut h = Harness::new();
        h.spawn(ProjectileKind::Grappler, 1);
        assert!(h.pool.exists_for(1));
        assert!(!h.pool.exists_for(0));

        let wall = WallAt(6.0);
        h.advance(&wall);
        h.advance(&wall);
        assert!(h.pool.is_collided_for(1));
        let hooked_at = h.pool.position_for(1);

        h.pool.kill(1);
        assert!(h.pool.invalid_for(1));

        for _ in 0..h.config.grapple_lifetime {
            h.advance(&wall);
            assert_eq!(
                h.pool.position_for(1),
                if h.pool.exists_for(1) { hooked_at } else { Vec3::ZERO }
            );
        }
        assert!(!h.pool.exists_for(1), "dead after lifetime");

        h.advance(&wall);
        assert!(h.pool.is_empty());
    }

    #[test]
    fn second_grapple_replaces_first() {
        let mut h = Harness::new();
        h.spawn(ProjectileKind::Grappler, 0);
        h.advance(&OpenSky);
        h.spawn(ProjectileKind::Grappler, 0);

        assert_eq!(h.pool.len(), 1);
        assert_eq!(h.pool.position_for(0), Vec3::ZERO);
        assert_eq!(h.effects.count_of(EffectKind::GrappleTrail), 1);
    }

    #[test]
    fn grapples_are_partitioned_by_owner() {
        let mut h = Harness::new();
        h.spawn(ProjectileKind::Grappler, 0);
        h.spawn(ProjectileKind::Grappler, 1);
        h.pool.kill(0);
        assert!(h.pool.invalid_for(0));
        assert!(!h.pool.invalid_for(1));
    }

    #[test]
    fn bomb_impact_removes_round_and_blasts() {
        let mut h = Harness::new();
        h.spawn(ProjectileKind::Bomb, 0);
        h.advance(&WallAt(1.0));

        assert!(h.pool.iter().all(Projectile::is_dead));
        assert_eq!(h.effects.count_of(EffectKind::BombBlast), 1);
        assert_eq!(h.effects.count_of(EffectKind::BombTrail), 0);
        assert_eq!(h.sound.pending(), &[SoundCue::BombBlast]);
    }

    #[test]
    fn hit_test_skips_own_rounds_and_consumes_others() {
        let mut h = Harness::new();
        h.pool
            .spawn(ProjectileKind::Normal, Vec3::Z, Vec3::new(0.0, 5.0, 0.0), 0, &mut h.effects);

        let body = Capsule {
            base: Vec3::ZERO,
            height: 12.0,
            radius: 4.0,
        };
        assert_eq!(h.pool.hit_test(0, &body), None, "own round never hits");
        assert_eq!(h.pool.hit_test(1, &body), Some(ProjectileKind::Normal));
        assert_eq!(h.pool.hit_test(1, &body), None, "round consumed");
    }

    #[test]
    fn clear_stops_every_effect() {
        let mut h = Harness::new();
        h.spawn(ProjectileKind::Grappler, 0);
        h.spawn(ProjectileKind::Normal, 0);
        h.spawn(ProjectileKind::Bomb, 1);
        assert_eq!(h.effects.len(), 3);

        h.pool.clear(&mut h.effects);
        assert!(h.pool.is_empty());
        assert!(h.effects.is_empty());
    }
}
