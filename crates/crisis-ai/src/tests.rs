#[cfg(test)]
mod tests {
    use glam::DVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use crisis_core::components::{ArchetypeState, EnemyBrain};
    use crisis_core::constants::*;
    use crisis_core::enums::{AiBehavior, BossPhase, BossSpecial, EnemyKind};
    use crisis_core::types::Health;

    use crate::boss::{mitigate, teleport_x};
    use crate::fsm::{evaluate, EnemyAction, EnemyContext, PlayerTarget};
    use crate::profiles::{get_profile, new_brain};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn make_enemy(kind: EnemyKind, level: u8, x: f64) -> (EnemyBrain, Health) {
        let profile = get_profile(kind, level);
        (
            new_brain(kind, &profile, x, None),
            Health::new(profile.max_health),
        )
    }

    fn make_context(
        kind: EnemyKind,
        x: f64,
        health: Health,
        player_x: f64,
        now_ms: f64,
    ) -> EnemyContext {
        EnemyContext {
            kind,
            position: DVec2::new(x, ENEMY_GROUND_Y),
            velocity_x: 0.0,
            health,
            target: PlayerTarget {
                x: player_x,
                y: PLAYER_GROUND_Y,
                visible: true,
            },
            now_ms,
            attacks_suppressed: false,
        }
    }

    fn attacked(actions: &[EnemyAction]) -> bool {
        actions.contains(&EnemyAction::Attack)
    }

    // ---- Profiles ----

    #[test]
    fn test_grunt_profile_scales_with_level() {
        let l1 = get_profile(EnemyKind::Grunt, 1);
        assert_eq!(l1.max_health, 60);
        assert_eq!(l1.attack_power, 12);
        assert!((l1.attack_cooldown_ms - 1100.0).abs() < 1e-9);
        assert!((l1.ai.movement_speed - 1.2).abs() < 1e-9);

        let l5 = get_profile(EnemyKind::Grunt, 5);
        assert_eq!(l5.max_health, 100);
        assert!((l5.attack_cooldown_ms - 800.0).abs() < 1e-9, "cooldown floor");
    }

    #[test]
    fn test_unknown_enemy_uses_grunt_profile() {
        let kind = EnemyKind::from_id("mystery_drone");
        assert_eq!(get_profile(kind, 2), get_profile(EnemyKind::Grunt, 2));
    }

    #[test]
    fn test_boss_profile_does_not_scale() {
        assert_eq!(get_profile(EnemyKind::Boss, 1), get_profile(EnemyKind::Boss, 5));
        assert_eq!(get_profile(EnemyKind::Boss, 5).max_health, 300);
    }

    #[test]
    fn test_behavior_override() {
        let profile = get_profile(EnemyKind::Grunt, 2);
        let brain = new_brain(EnemyKind::Grunt, &profile, 1100.0, Some(AiBehavior::Patrol));
        assert_eq!(brain.ai.behavior, AiBehavior::Patrol);
        assert_eq!(brain.patrol.start_x, 1000.0);
        assert_eq!(brain.patrol.end_x, 1200.0);
    }

    // ---- Aggressive ----

    #[test]
    fn test_aggressive_pursues_within_detection() {
        let (mut brain, health) = make_enemy(EnemyKind::Grunt, 1, 800.0);
        let ctx = make_context(EnemyKind::Grunt, 800.0, health, 700.0, 0.0);
        let update = evaluate(&ctx, &mut brain, &mut rng());
        assert!((update.velocity_x + 1.2).abs() < 1e-9, "moves left toward player");
        assert_eq!(update.facing, -1.0);
        assert!(!attacked(&update.actions), "100 units is outside attack range");
    }

    #[test]
    fn test_aggressive_decays_outside_detection() {
        let (mut brain, health) = make_enemy(EnemyKind::Grunt, 1, 800.0);
        let mut ctx = make_context(EnemyKind::Grunt, 800.0, health, 100.0, 0.0);
        ctx.velocity_x = 2.0;
        let update = evaluate(&ctx, &mut brain, &mut rng());
        assert!((update.velocity_x - 2.0 * FRICTION).abs() < 1e-9);
    }

    #[test]
    fn test_aggressive_attack_respects_cooldown() {
        let (mut brain, health) = make_enemy(EnemyKind::Grunt, 1, 800.0);
        let ctx = make_context(EnemyKind::Grunt, 800.0, health, 780.0, 1000.0);
        let first = evaluate(&ctx, &mut brain, &mut rng());
        assert!(attacked(&first.actions));
        assert_eq!(brain.last_attack_ms, Some(1000.0));
        assert_eq!(brain.attacking_until_ms, Some(1000.0 + ENEMY_ATTACK_FLASH_MS));

        let soon = EnemyContext { now_ms: 1500.0, ..ctx };
        assert!(!attacked(&evaluate(&soon, &mut brain, &mut rng()).actions));

        let later = EnemyContext { now_ms: 2100.0, ..ctx };
        assert!(attacked(&evaluate(&later, &mut brain, &mut rng()).actions));
    }

    #[test]
    fn test_hidden_player_is_ignored() {
        let (mut brain, health) = make_enemy(EnemyKind::Grunt, 1, 800.0);
        let mut ctx = make_context(EnemyKind::Grunt, 800.0, health, 790.0, 0.0);
        ctx.target.visible = false;
        let update = evaluate(&ctx, &mut brain, &mut rng());
        assert_eq!(update.velocity_x, 0.0);
        assert!(update.actions.is_empty());
    }

    #[test]
    fn test_suppressed_attacks() {
        let (mut brain, health) = make_enemy(EnemyKind::Grunt, 1, 800.0);
        let mut ctx = make_context(EnemyKind::Grunt, 800.0, health, 790.0, 0.0);
        ctx.attacks_suppressed = true;
        let update = evaluate(&ctx, &mut brain, &mut rng());
        assert!(!attacked(&update.actions));
        assert!(update.velocity_x < 0.0, "still pursues");
        assert_eq!(brain.last_attack_ms, None);
    }

    // ---- Patrol ----

    #[rstest]
    #[case(1000.0, 1.0)]
    #[case(990.0, 1.0)]
    #[case(1200.0, -1.0)]
    #[case(1250.0, -1.0)]
    fn test_patrol_reverses_at_bounds(#[case] x: f64, #[case] expected_dir: f64) {
        let profile = get_profile(EnemyKind::Grunt, 2);
        let mut brain = new_brain(EnemyKind::Grunt, &profile, 1100.0, Some(AiBehavior::Patrol));
        brain.patrol.direction = -expected_dir;
        let ctx = make_context(EnemyKind::Grunt, x, Health::new(70), 100.0, 0.0);
        let update = evaluate(&ctx, &mut brain, &mut rng());
        assert_eq!(brain.patrol.direction, expected_dir);
        assert!((update.velocity_x - expected_dir * profile.ai.movement_speed).abs() < 1e-9);
    }

    #[test]
    fn test_patrol_ignores_player_but_attacks_opportunistically() {
        let profile = get_profile(EnemyKind::Grunt, 2);
        let mut brain = new_brain(EnemyKind::Grunt, &profile, 1100.0, Some(AiBehavior::Patrol));
        let ctx = make_context(EnemyKind::Grunt, 1100.0, Health::new(70), 1080.0, 0.0);
        let update = evaluate(&ctx, &mut brain, &mut rng());
        assert!(update.velocity_x > 0.0, "keeps heading right, away from player");
        assert!(attacked(&update.actions));
    }

    // ---- Sniper ----

    #[test]
    fn test_sniper_aims_before_firing() {
        let (mut brain, health) = make_enemy(EnemyKind::Sniper, 3, 1000.0);
        let at = |now: f64| make_context(EnemyKind::Sniper, 1000.0, health, 800.0, now);

        let first = evaluate(&at(0.0), &mut brain, &mut rng());
        assert_eq!(first.velocity_x, 0.0, "defensive never moves");
        assert_eq!(first.actions, vec![EnemyAction::AimStarted]);

        let early = evaluate(&at(SNIPER_AIM_MS - 1.0), &mut brain, &mut rng());
        assert!(!attacked(&early.actions));

        let fire = evaluate(&at(SNIPER_AIM_MS), &mut brain, &mut rng());
        assert!(attacked(&fire.actions));
        match brain.archetype {
            ArchetypeState::Aim(aim) => assert_eq!(aim.aiming_since_ms, None),
            ref other => panic!("unexpected archetype state {other:?}"),
        }
    }

    #[test]
    fn test_sniper_aim_resets_when_player_leaves() {
        let (mut brain, health) = make_enemy(EnemyKind::Sniper, 3, 1000.0);
        evaluate(
            &make_context(EnemyKind::Sniper, 1000.0, health, 800.0, 0.0),
            &mut brain,
            &mut rng(),
        );
        // Player steps out of detection just before the aim completes.
        evaluate(
            &make_context(EnemyKind::Sniper, 1000.0, health, 100.0, 900.0),
            &mut brain,
            &mut rng(),
        );
        let back = evaluate(
            &make_context(EnemyKind::Sniper, 1000.0, health, 800.0, 1100.0),
            &mut brain,
            &mut rng(),
        );
        assert_eq!(back.actions, vec![EnemyAction::AimStarted], "aim restarted");
    }

    // ---- Enforcer ----

    #[test]
    fn test_enforcer_charge_arms_then_launches_then_decays() {
        let (mut brain, health) = make_enemy(EnemyKind::Enforcer, 2, 900.0);

        let arm = make_context(EnemyKind::Enforcer, 900.0, health, 720.0, 0.0);
        let update = evaluate(&arm, &mut brain, &mut rng());
        assert!(update.actions.is_empty(), "armed at 180 units, not launched");

        let launch = make_context(EnemyKind::Enforcer, 900.0, health, 760.0, 100.0);
        let update = evaluate(&launch, &mut brain, &mut rng());
        assert_eq!(
            update.actions,
            vec![EnemyAction::ChargeLaunched { direction: -1.0 }]
        );
        assert_eq!(update.velocity_x, -CHARGE_SPEED);

        let mut during = make_context(EnemyKind::Enforcer, 880.0, health, 760.0, 300.0);
        during.velocity_x = -CHARGE_SPEED;
        let update = evaluate(&during, &mut brain, &mut rng());
        assert_eq!(update.velocity_x, -CHARGE_SPEED, "burst held while charging");

        let mut after = make_context(EnemyKind::Enforcer, 860.0, health, 760.0, 600.0);
        after.velocity_x = -CHARGE_SPEED;
        let update = evaluate(&after, &mut brain, &mut rng());
        assert!((update.velocity_x + CHARGE_SPEED * CHARGE_DECAY).abs() < 1e-9);
    }

    #[test]
    fn test_enforcer_charge_cooldown() {
        let (mut brain, health) = make_enemy(EnemyKind::Enforcer, 2, 900.0);
        let ctx = make_context(EnemyKind::Enforcer, 900.0, health, 800.0, 0.0);
        evaluate(&ctx, &mut brain, &mut rng());

        let again = make_context(EnemyKind::Enforcer, 900.0, health, 800.0, 1000.0);
        let update = evaluate(&again, &mut brain, &mut rng());
        assert!(!update
            .actions
            .iter()
            .any(|a| matches!(a, EnemyAction::ChargeLaunched { .. })));

        let ready = make_context(EnemyKind::Enforcer, 900.0, health, 800.0, CHARGE_COOLDOWN_MS);
        let update = evaluate(&ready, &mut brain, &mut rng());
        assert!(update
            .actions
            .iter()
            .any(|a| matches!(a, EnemyAction::ChargeLaunched { .. })));
    }

    // ---- Boss ----

    fn boss_phase(brain: &EnemyBrain) -> BossPhase {
        match &brain.archetype {
            ArchetypeState::Boss(state) => state.phase,
            other => panic!("not a boss: {other:?}"),
        }
    }

    #[test]
    fn test_boss_phase_transitions() {
        let (mut brain, mut health) = make_enemy(EnemyKind::Boss, 5, 600.0);

        health.take_damage(110);
        let ctx = make_context(EnemyKind::Boss, 600.0, health, 580.0, 0.0);
        let update = evaluate(&ctx, &mut brain, &mut rng());
        assert!(update
            .actions
            .contains(&EnemyAction::PhaseChanged(BossPhase::Two)));
        assert_eq!(boss_phase(&brain), BossPhase::Two);
        if let ArchetypeState::Boss(state) = &brain.archetype {
            let xs: Vec<f64> = state.clones.iter().map(|c| c.x).collect();
            assert_eq!(xs, vec![500.0, 700.0]);
        }

        health.take_damage(100);
        let ctx = make_context(EnemyKind::Boss, 600.0, health, 580.0, 100.0);
        evaluate(&ctx, &mut brain, &mut rng());
        assert_eq!(boss_phase(&brain), BossPhase::Three);
        assert_eq!(brain.ai.movement_speed, BOSS_PHASE3_SPEED);
        assert_eq!(brain.attack_cooldown_ms, BOSS_PHASE3_ATTACK_COOLDOWN_MS);
    }

    #[test]
    fn test_boss_skips_at_most_one_phase_per_tick() {
        let (mut brain, mut health) = make_enemy(EnemyKind::Boss, 5, 600.0);
        health.take_damage(250);
        let ctx = make_context(EnemyKind::Boss, 600.0, health, 580.0, 0.0);
        evaluate(&ctx, &mut brain, &mut rng());
        assert_eq!(boss_phase(&brain), BossPhase::Two);
        evaluate(&EnemyContext { now_ms: 16.0, ..ctx }, &mut brain, &mut rng());
        assert_eq!(boss_phase(&brain), BossPhase::Three);
    }

    #[test]
    fn test_boss_teleports_beside_player() {
        let (mut brain, health) = make_enemy(EnemyKind::Boss, 5, 300.0);
        let ctx = make_context(EnemyKind::Boss, 300.0, health, 1120.0, 0.0);
        let update = evaluate(&ctx, &mut brain, &mut rng());
        let landed = update.teleport_to.expect("boss should teleport");
        assert!(landed.x == 1020.0 || landed.x == BOSS_ARENA_MAX_X, "{landed:?}");
        assert_eq!(landed.y, PLAYER_GROUND_Y);

        // Still far away but the teleport is cooling down.
        let ctx = make_context(EnemyKind::Boss, 300.0, health, 1120.0, 1000.0);
        assert!(evaluate(&ctx, &mut brain, &mut rng()).teleport_to.is_none());
    }

    #[test]
    fn test_boss_does_not_teleport_when_close_or_hidden() {
        let (mut brain, health) = make_enemy(EnemyKind::Boss, 5, 600.0);
        let close = make_context(EnemyKind::Boss, 600.0, health, 550.0, 0.0);
        assert!(evaluate(&close, &mut brain, &mut rng()).teleport_to.is_none());

        let (mut brain, health) = make_enemy(EnemyKind::Boss, 5, 600.0);
        let mut hidden = make_context(EnemyKind::Boss, 600.0, health, 100.0, 0.0);
        hidden.target.visible = false;
        let update = evaluate(&hidden, &mut brain, &mut rng());
        assert!(update.teleport_to.is_none());
        assert!(update.actions.is_empty());
    }

    #[test]
    fn test_boss_special_depends_on_phase() {
        let (mut brain, health) = make_enemy(EnemyKind::Boss, 5, 600.0);
        let ctx = make_context(EnemyKind::Boss, 600.0, health, 580.0, 0.0);
        let update = evaluate(&ctx, &mut brain, &mut rng());
        assert!(update.actions.contains(&EnemyAction::Special {
            attack: BossSpecial::ShadowStrike,
            target_x: 580.0,
            target_y: PLAYER_GROUND_Y,
        }));

        let ctx = make_context(EnemyKind::Boss, 600.0, health, 580.0, 4000.0);
        let update = evaluate(&ctx, &mut brain, &mut rng());
        assert!(!update
            .actions
            .iter()
            .any(|a| matches!(a, EnemyAction::Special { .. })));
    }

    #[rstest]
    #[case(BossPhase::One, 20, 20)]
    #[case(BossPhase::Two, 20, 17)]
    #[case(BossPhase::Three, 20, 14)]
    #[case(BossPhase::Three, 45, 31)]
    #[case(BossPhase::Two, 0, 0)]
    fn test_boss_damage_mitigation(#[case] phase: BossPhase, #[case] raw: u32, #[case] expected: u32) {
        assert_eq!(mitigate(phase, raw), expected);
    }

    #[test]
    fn test_teleport_clamped_to_arena() {
        assert_eq!(teleport_x(20.0, -1.0), BOSS_ARENA_MIN_X);
        assert_eq!(teleport_x(1180.0, 1.0), BOSS_ARENA_MAX_X);
        assert_eq!(teleport_x(600.0, 1.0), 700.0);
    }
}
