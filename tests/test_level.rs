use jumper::config::GameConfig;
use jumper::geometry::Rect;
use jumper::level::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn standard_level_layout() {
    let config = GameConfig::default();
    let level = Level::standard(&config).unwrap();
    let plats = level.platforms();
    assert_eq!(plats.len(), 5);
    assert_eq!(plats[0], Rect::new(0.0, 4960.0, 700.0, 40.0));
    assert_eq!(level.enemy_platforms().count(), 4);
    // The ground never hosts an enemy.
    assert!(level.enemy_platforms().all(|p| *p != plats[0]));
}

#[test]
fn rejects_out_of_range_enemy_platform() {
    let config = GameConfig::default();
    let err = Level::new(vec![Rect::new(0.0, 0.0, 100.0, 10.0)], vec![3], &config).unwrap_err();
    assert_eq!(err, LevelError::NoSuchPlatform { index: 3, count: 1 });
}

#[test]
fn rejects_platform_narrower_than_enemy() {
    let config = GameConfig::default();
    let err = Level::new(
        vec![
            Rect::new(0.0, 0.0, 100.0, 10.0),
            Rect::new(200.0, 0.0, 40.0, 10.0),
        ],
        vec![1],
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, LevelError::PlatformTooNarrow { index: 1, .. }));
    assert!(err.to_string().contains("too narrow"));
}

#[test]
fn empty_level_is_valid() {
    let config = GameConfig::default();
    let level = Level::new(Vec::new(), Vec::new(), &config).unwrap();
    assert!(level.platforms().is_empty());
    assert!(place_coins(&level, &config, &mut StdRng::seed_from_u64(1)).is_empty());
}

#[test]
fn coins_sit_above_non_ground_platforms() {
    let config = GameConfig::default();
    let level = Level::standard(&config).unwrap();
    let coins = place_coins(&level, &config, &mut StdRng::seed_from_u64(7));

    assert!((4..=8).contains(&coins.len()));
    for coin in &coins {
        assert!(!coin.collected);
        let host = level.platforms()[1..]
            .iter()
            .find(|p| coin.rect.y == p.top() - 25.0)
            .expect("coin floats above a ledge");
        assert!(coin.rect.x >= host.left() + 10.0);
        assert!(coin.rect.x <= host.right() - 30.0);
    }
}
