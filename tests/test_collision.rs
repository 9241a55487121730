use laser_defender::collision::{first_overlap, resolve_all, resolve_target, Hit};
use laser_defender::config::GameConfig;
use laser_defender::entities::{Paddle, Rect};
use laser_defender::store::EntityStore;

/// A laser whose rect is exactly `(x, y, 4, 20)`.
fn laser_at(store: &mut EntityStore, cfg: &GameConfig, x: i32, y: i32) -> u64 {
    // spawn_laser places the laser at (centre - 2, top - 20)
    let paddle = Paddle { rect: Rect::new(x + 2 - 40, y + 20, 80, 20) };
    let id = store.spawn_laser(&paddle, cfg);
    assert_eq!(store.lasers().last().unwrap().rect, Rect::new(x, y, 4, 20));
    id
}

#[test]
fn overlapping_pair_is_removed_and_scored() {
    let cfg = GameConfig::default();
    let mut store = EntityStore::new();
    let target = store.spawn_target(300, 100, &cfg); // bounds 280..320 × 80..120
    let laser = laser_at(&mut store, &cfg, 298, 110);
    let mut score = 0;

    let hit = resolve_target(&mut store, target, &mut score);

    assert_eq!(hit, Some(Hit { laser, target }));
    assert_eq!(score, 1);
    assert!(store.lasers().is_empty());
    assert!(store.targets().is_empty());
}

#[test]
fn touching_but_not_overlapping_is_a_miss() {
    let cfg = GameConfig::default();
    let mut store = EntityStore::new();
    let target = store.spawn_target(300, 100, &cfg); // bottom edge at y = 120
    laser_at(&mut store, &cfg, 298, 120); // top edge at y = 120
    laser_at(&mut store, &cfg, 320, 90); // left edge on target's right edge
    let mut score = 0;

    assert_eq!(resolve_target(&mut store, target, &mut score), None);
    assert_eq!(score, 0);
    assert_eq!(store.lasers().len(), 2);
    assert_eq!(store.targets().len(), 1);
}

#[test]
fn first_laser_in_insertion_order_wins() {
    let cfg = GameConfig::default();
    let mut store = EntityStore::new();
    let target = store.spawn_target(300, 100, &cfg);
    let first = laser_at(&mut store, &cfg, 290, 100);
    let second = laser_at(&mut store, &cfg, 305, 100);
    let mut score = 0;

    let hit = resolve_target(&mut store, target, &mut score).unwrap();

    assert_eq!(hit.laser, first);
    assert_eq!(score, 1);
    assert_eq!(store.lasers().len(), 1);
    assert_eq!(store.lasers()[0].id, second);
}

#[test]
fn one_laser_destroys_at_most_one_target() {
    let cfg = GameConfig::default();
    let mut store = EntityStore::new();
    // Two overlapping targets, one laser in the shared region
    store.spawn_target(300, 100, &cfg);
    store.spawn_target(310, 100, &cfg);
    laser_at(&mut store, &cfg, 300, 100);
    let mut score = 0;

    let hits = resolve_all(&mut store, &mut score);

    assert_eq!(hits.len(), 1);
    assert_eq!(score, 1);
    assert_eq!(store.targets().len(), 1);
    assert!(store.lasers().is_empty());
}

#[test]
fn full_pass_leaves_no_overlapping_pairs() {
    let cfg = GameConfig::default();
    let mut store = EntityStore::new();
    for i in 0..5 {
        store.spawn_target(50 + i * 100, 200, &cfg);
    }
    // Two lasers per target column, plus a stray
    for i in 0..5 {
        laser_at(&mut store, &cfg, 48 + i * 100, 195);
        laser_at(&mut store, &cfg, 52 + i * 100, 205);
    }
    laser_at(&mut store, &cfg, 5, 600);
    let mut score = 0;

    let hits = resolve_all(&mut store, &mut score);

    assert_eq!(hits.len(), 5);
    assert_eq!(score, 5);
    assert!(store.targets().is_empty());
    assert_eq!(store.lasers().len(), 6);
    for target in store.targets() {
        assert!(first_overlap(&store, &target.bounds()).is_none());
    }
}

#[test]
fn unknown_target_is_a_no_op() {
    let cfg = GameConfig::default();
    let mut store = EntityStore::new();
    laser_at(&mut store, &cfg, 298, 110);
    let mut score = 7;

    assert_eq!(resolve_target(&mut store, 999, &mut score), None);
    assert_eq!(score, 7);
    assert_eq!(store.lasers().len(), 1);
}

#[test]
fn resolving_twice_does_not_double_count() {
    let cfg = GameConfig::default();
    let mut store = EntityStore::new();
    let target = store.spawn_target(300, 100, &cfg);
    laser_at(&mut store, &cfg, 298, 110);
    let mut score = 0;

    assert!(resolve_target(&mut store, target, &mut score).is_some());
    assert!(resolve_target(&mut store, target, &mut score).is_none());
    assert_eq!(score, 1);
}
