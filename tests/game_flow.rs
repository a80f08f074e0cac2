use oval_rush::consts::*;
use oval_rush::hud::START_PROMPT;
use oval_rush::scene::{VehicleRole, build_vehicle};
use oval_rush::sim::{Direction, GamePhase, TrafficVehicle, VehicleKind, arc_center_x};
use oval_rush::{
    Config, Control, Game, HudState, InputEvent, InputSource, LoopControl, SceneGraph,
};

fn new_game(config: Config) -> Game<SceneGraph, HudState> {
    Game::new(config, 99, SceneGraph::new(), HudState::default())
}

/// Park a motionless car on the lane crossing and move the player there too
fn stage_crash(game: &mut Game<SceneGraph, HudState>) {
    let crossing = (arc_center_x() / TRACK_RADIUS).acos();
    let show_hit_zones = game.config().show_hit_zones;
    let visual = build_vehicle(
        game.scene_mut(),
        VehicleKind::Car,
        VehicleRole::Traffic,
        show_hit_zones,
    );
    let mut car = TrafficVehicle::new(VehicleKind::Car, visual, 0.0, Direction::CounterClockwise);
    car.angle = std::f32::consts::PI - crossing;
    car.update_pose();

    let state = game.state_mut();
    state.player.angle_moved = crossing - PLAYER_ANGLE_INITIAL;
    state.player.update_pose();
    assert!(state.player.position.distance(car.position) < 39.0);
    state.traffic.push(car);
}

#[test]
fn accelerate_then_crash_shows_results() {
    let mut game = new_game(Config::default());
    assert_eq!(game.phase(), GamePhase::Idle);
    assert_eq!(game.display().score_text, START_PROMPT);

    let phase = game.handle_input(InputEvent::Pressed(Control::Accelerate, InputSource::Keyboard));
    assert_eq!(phase, Some(GamePhase::Running));
    assert_eq!(game.display().score_text, "0");
    assert!(game.display().controls_visible);
    assert!(!game.display().instructions_visible);

    assert_eq!(game.frame(1000.0), LoopControl::Continue);
    stage_crash(&mut game);

    assert_eq!(game.frame(1001.0), LoopControl::Stop);
    assert_eq!(game.phase(), GamePhase::Crashed);
    assert!(game.display().results_visible);

    // Frames after the crash do nothing
    let rendered = game.scene().frames_rendered();
    assert_eq!(game.frame(1020.0), LoopControl::Stop);
    assert_eq!(game.scene().frames_rendered(), rendered);
}

#[test]
fn reset_after_crash_returns_to_idle() {
    let mut game = new_game(Config {
        show_hit_zones: true,
        ..Config::default()
    });
    game.handle_input(InputEvent::Pressed(Control::Accelerate, InputSource::Button));
    game.frame(0.0);
    game.frame(16.0);
    stage_crash(&mut game);
    game.frame(17.0);
    assert_eq!(game.phase(), GamePhase::Crashed);

    let phase = game.handle_input(InputEvent::Pressed(Control::Reset, InputSource::Keyboard));
    assert_eq!(phase, Some(GamePhase::Idle));

    let state = game.state();
    assert_eq!(state.player.angle_moved, 0.0);
    assert_eq!(state.score, 0);
    assert!(state.traffic.is_empty());
    assert_eq!(state.last_timestamp, None);
    assert_eq!(game.display().score_text, START_PROMPT);
    assert!(!game.display().results_visible);

    // Only the player body and its two markers remain
    assert_eq!(game.scene().len(), 3);
}

#[test]
fn down_key_does_not_start_but_brake_button_does() {
    let mut game = new_game(Config::default());

    let phase = game.handle_input(InputEvent::Pressed(Control::Decelerate, InputSource::Keyboard));
    assert_eq!(phase, None);
    assert_eq!(game.phase(), GamePhase::Idle);

    let phase = game.handle_input(InputEvent::Pressed(Control::Decelerate, InputSource::Button));
    assert_eq!(phase, Some(GamePhase::Running));
}

#[test]
fn hints_reveal_instructions_only_while_idle() {
    let mut game = new_game(Config::default());
    game.reveal_hints();
    assert!(game.display().instructions_visible);
    assert!(game.display().controls_visible);

    let mut running = new_game(Config::default());
    running.handle_input(InputEvent::Pressed(Control::Accelerate, InputSource::Keyboard));
    running.reveal_hints();
    assert!(!running.display().instructions_visible);
}

#[test]
fn score_display_follows_completed_laps() {
    let mut game = new_game(Config::default());
    game.handle_input(InputEvent::Pressed(Control::Accelerate, InputSource::Keyboard));
    game.frame(0.0);

    // Just short of a lap, then across it
    game.state_mut().player.angle_moved = -(std::f32::consts::TAU - 0.001);
    game.state_mut().traffic.clear();
    game.frame(1.0);

    assert_eq!(game.phase(), GamePhase::Running);
    assert_eq!(game.score(), 1);
    assert_eq!(game.display().score_text, "1");
}
