use glam::Vec2;
use oval_rush::consts::*;
use oval_rush::laps_for;
use oval_rush::scene::SceneGraph;
use oval_rush::sim::{
    GamePhase, GameState, HitZones, InputState, PlayerCar, VehicleKind, move_player, player_speed,
    roll_speed, tick, zones_collide,
};
use oval_rush::Config;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn input_strategy() -> impl Strategy<Value = InputState> {
    (any::<bool>(), any::<bool>()).prop_map(|(accelerate, decelerate)| InputState {
        accelerate,
        decelerate,
    })
}

/// Zones far enough apart that only the pair under test can collide
fn lone_front(front: Vec2) -> HitZones {
    HitZones {
        front,
        middle: None,
        rear: front + Vec2::new(0.0, 1000.0),
    }
}

proptest! {
    #[test]
    fn displacement_drops_by_speed_times_dt(
        start in -100.0f32..100.0,
        dt in 0.0f32..100.0,
        input in input_strategy(),
    ) {
        let mut player = PlayerCar {
            angle_moved: start,
            ..PlayerCar::default()
        };
        move_player(&mut player, &input, dt);

        let expected = start - player_speed(&input) * dt;
        prop_assert!((player.angle_moved - expected).abs() < 1e-4);
    }

    #[test]
    fn score_tracks_displacement_and_never_drops(
        seed in any::<u64>(),
        frames in prop::collection::vec((1.0f32..50.0, input_strategy()), 1..200),
    ) {
        let mut state = GameState::new(seed);
        state.phase = GamePhase::Running;
        let mut scene = SceneGraph::new();
        let config = Config::default();

        let mut last_score = 0;
        for (dt, input) in frames {
            let traffic_before = state.traffic.len();
            tick(&mut state, &input, dt, &config, &mut scene);

            prop_assert_eq!(state.score, laps_for(state.player.angle_moved));
            prop_assert!(state.score >= last_score);
            prop_assert!(state.traffic.len() <= traffic_before + 1);
            last_score = state.score;

            if state.phase != GamePhase::Running {
                break;
            }
        }
    }

    #[test]
    fn front_zones_inside_hit_distance_collide(
        distance in 0.0f32..39.99,
        angle in 0.0f32..std::f32::consts::TAU,
    ) {
        let player = lone_front(Vec2::ZERO);
        let vehicle = lone_front(Vec2::new(angle.cos(), angle.sin()) * distance);
        prop_assert!(zones_collide(&player, &vehicle));
    }

    #[test]
    fn front_zones_at_or_beyond_hit_distance_miss(distance in 40.0f32..500.0) {
        let player = lone_front(Vec2::ZERO);
        let vehicle = lone_front(Vec2::new(distance, 0.0));
        prop_assert!(!zones_collide(&player, &vehicle));
    }
}

#[test]
fn exactly_hit_distance_is_a_miss() {
    let player = lone_front(Vec2::ZERO);
    let vehicle = lone_front(Vec2::new(HIT_DISTANCE, 0.0));
    assert!(!zones_collide(&player, &vehicle));

    let closer = lone_front(Vec2::new(HIT_DISTANCE - 0.01, 0.0));
    assert!(zones_collide(&player, &closer));
}

#[test]
fn player_rear_only_checks_vehicle_front() {
    let player = HitZones {
        front: Vec2::new(0.0, 1000.0),
        middle: None,
        rear: Vec2::ZERO,
    };
    // Rear zone of the vehicle right on top of the player's rear: not a qualifying pair
    let vehicle = HitZones {
        front: Vec2::new(0.0, -500.0),
        middle: None,
        rear: Vec2::ZERO,
    };
    assert!(!zones_collide(&player, &vehicle));

    let head_on = HitZones {
        front: Vec2::new(10.0, 0.0),
        ..vehicle
    };
    assert!(zones_collide(&player, &head_on));
}

#[test]
fn spawn_speeds_stay_in_range() {
    let mut rng = Pcg32::seed_from_u64(2024);
    for _ in 0..1000 {
        let car = roll_speed(&mut rng, VehicleKind::Car);
        assert!((CAR_SPEED_RANGE.0..=CAR_SPEED_RANGE.1).contains(&car));

        let truck = roll_speed(&mut rng, VehicleKind::Truck);
        assert!((TRUCK_SPEED_RANGE.0..=TRUCK_SPEED_RANGE.1).contains(&truck));
    }
}

#[test]
fn traffic_grows_once_per_threshold_crossing() {
    let mut state = GameState::new(8);
    state.phase = GamePhase::Running;
    let mut scene = SceneGraph::new();
    let config = Config::default();
    let idle = InputState::default();

    // Zero laps, empty track: one vehicle joins
    tick(&mut state, &idle, 0.0, &config, &mut scene);
    assert_eq!(state.traffic.len(), 1);

    for _ in 0..10 {
        tick(&mut state, &idle, 1.0, &config, &mut scene);
        assert_eq!(state.traffic.len(), 1);
    }

    // Nine laps call for a second vehicle, and only one
    state.player.angle_moved = -(9.0 * std::f32::consts::TAU + 0.1);
    tick(&mut state, &idle, 1.0, &config, &mut scene);
    assert_eq!(state.score, 9);
    assert_eq!(state.traffic.len(), 2);

    tick(&mut state, &idle, 1.0, &config, &mut scene);
    assert_eq!(state.traffic.len(), 2);
    assert_eq!(state.phase, GamePhase::Running);
}
