#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::commands::{KeyCode, PlayerCommand};
    use crate::enums::*;
    use crate::error::CoreError;
    use crate::state::GameStateSnapshot;
    use crate::types::{Aabb, Body, Health, SimTime};

    // ---- Health clamping ----

    #[rstest]
    #[case(100, 30, 70)]
    #[case(100, 100, 0)]
    #[case(100, 5_000, 0)]
    #[case(100, i64::MAX, 0)]
    #[case(100, -50, 100)]
    #[case(100, i64::MIN, 100)]
    fn test_take_damage_clamps(#[case] max: u32, #[case] damage: i64, #[case] expected: u32) {
        let mut health = Health::new(max);
        health.take_damage(damage);
        assert_eq!(health.current(), expected);
        assert!(health.current() <= health.max());
    }

    #[rstest]
    #[case(40, 30, 70)]
    #[case(40, 1_000, 100)]
    #[case(40, i64::MAX, 100)]
    #[case(40, -1_000, 0)]
    #[case(40, i64::MIN, 0)]
    fn test_heal_clamps(#[case] damage_first: i64, #[case] heal: i64, #[case] expected: u32) {
        let mut health = Health::new(100);
        health.take_damage(damage_first);
        health.heal(heal);
        assert_eq!(health.current(), expected);
    }

    #[test]
    fn test_health_alive_and_restore() {
        let mut health = Health::new(120);
        health.take_damage(120);
        assert!(!health.is_alive());
        health.restore();
        assert_eq!(health.current(), 120);
        assert!(health.is_alive());
        assert!((health.fraction() - 1.0).abs() < 1e-12);
    }

    // ---- Collision ----

    #[test]
    fn test_collision_overlap_and_symmetry() {
        let boxes = [
            Aabb::new(0.0, 0.0, 40.0, 60.0),
            Aabb::new(30.0, 50.0, 35.0, 50.0),
            Aabb::new(40.0, 0.0, 10.0, 10.0),
            Aabb::new(-100.0, -100.0, 500.0, 500.0),
            Aabb::new(1000.0, 1000.0, 1.0, 1.0),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.collides(b), b.collides(a), "{a:?} vs {b:?}");
            }
        }
        assert!(boxes[0].collides(&boxes[1]));
        assert!(boxes[3].collides(&boxes[0]), "containment counts as overlap");
        assert!(!boxes[0].collides(&boxes[4]));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::new(0.0, 0.0, 40.0, 60.0);
        let right = Aabb::new(40.0, 0.0, 10.0, 60.0);
        let below = Aabb::new(0.0, 60.0, 40.0, 10.0);
        assert!(!a.collides(&right));
        assert!(!a.collides(&below));
    }

    #[test]
    fn test_body_bounds_follow_position() {
        let mut body = Body::new(100.0, 400.0, 40.0, 60.0);
        body.position.x += 5.0;
        let bounds = body.bounds();
        assert_eq!(bounds.min.x, 105.0);
        assert_eq!(bounds.max().y, 460.0);
        assert!(body.is_finite());
        body.position.y = f64::NAN;
        assert!(!body.is_finite());
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(16.0);
        time.advance(4.0);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed_ms - 20.0).abs() < 1e-12);
        assert_eq!(time.since(None), None);
        assert_eq!(time.since(Some(5.0)), Some(15.0));
    }

    // ---- Identifiers ----

    #[test]
    fn test_character_ids_parse() {
        for kind in CharacterKind::ALL {
            assert_eq!(kind.id().parse::<CharacterKind>(), Ok(kind));
        }
        assert_eq!(
            "wizard".parse::<CharacterKind>(),
            Err(CoreError::UnknownCharacter("wizard".to_owned()))
        );
        assert_eq!(CharacterKind::from_digit(3), Some(CharacterKind::Agent));
        assert_eq!(CharacterKind::from_digit(5), None);
    }

    #[test]
    fn test_unknown_enemy_id_degrades_to_grunt() {
        assert_eq!(EnemyKind::from_id("enforcer"), EnemyKind::Enforcer);
        assert_eq!(EnemyKind::from_id("shadow_boss"), EnemyKind::Boss);
        assert_eq!(EnemyKind::from_id("dragon"), EnemyKind::Grunt);
        assert_eq!(EnemyKind::from_id(""), EnemyKind::Grunt);
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(KeyCode::from_code("ArrowLeft"), Some(KeyCode::ArrowLeft));
        assert_eq!(KeyCode::from_code("KeyZ"), None);
        assert!(KeyCode::Enter.is_confirm());
        assert!(!KeyCode::KeyX.is_confirm());
        assert_eq!(KeyCode::Digit4.digit(), Some(4));
        assert_eq!(KeyCode::ArrowUp.digit(), None);
    }

    // ---- Serialization ----

    #[test]
    fn test_screen_wire_names() {
        let names: Vec<String> = [
            Screen::Intro,
            Screen::CharacterSelect,
            Screen::Playing,
            Screen::Victory,
            Screen::GameOver,
        ]
        .iter()
        .map(|s| serde_json::to_string(s).unwrap())
        .collect();
        assert_eq!(
            names,
            [
                "\"intro\"",
                "\"characterSelect\"",
                "\"playing\"",
                "\"victory\"",
                "\"gameOver\""
            ]
        );
        assert_eq!(
            serde_json::to_string(&EnemyKind::Boss).unwrap(),
            "\"shadow_boss\""
        );
    }

    #[test]
    fn test_player_command_tagged() {
        let cmd = PlayerCommand::SelectCharacter {
            character: CharacterKind::Hacker,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"SelectCharacter\""), "{json}");
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn test_default_snapshot_is_intro() {
        let snapshot = GameStateSnapshot::default();
        assert_eq!(snapshot.screen, Screen::Intro);
        assert!(snapshot.player.is_none());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"playerLives\""));
    }
}
