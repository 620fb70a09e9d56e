// tests/controller.rs
mod common;

use common::{ToyEngine, setup};
use glam::Vec3;
use robot_actions::{
    Action, ActionController, ActionStatus, Arm, ChannelError, Command, MotionConfig, Primitive,
    SessionError, Target, WheelPair,
};
use serde_json::json;

#[test]
fn test_action_sequence_all_succeed() {
    let mut controller = setup(ToyEngine::default());

    let actions = [
        Action::TurnBy {
            angle: 45.0,
            aligned_at: 3.0,
        },
        Action::TurnBy {
            angle: -30.0,
            aligned_at: 3.0,
        },
        Action::MoveBy {
            distance: 0.8,
            arrived_at: 0.1,
        },
        Action::MoveTo {
            target: Target::Position(Vec3::new(1.2, 0.0, -1.0)),
            arrived_at: 0.1,
            aligned_at: 3.0,
            move_on_turn_fail: false,
        },
        Action::MoveBy {
            distance: -3.0,
            arrived_at: 0.1,
        },
        Action::TurnTo {
            target: Target::Position(Vec3::new(3.2, 0.0, 0.0)),
            aligned_at: 3.0,
        },
    ];
    for action in actions {
        assert_eq!(controller.dispatch(action).unwrap(), ActionStatus::Success, "{action:?}");
    }
}

#[test]
fn test_one_frame_per_iteration() {
    let mut controller = setup(ToyEngine::default());
    controller.turn_by(30.0).unwrap();
    controller.move_by(0.6).unwrap();
    controller.reset_arms().unwrap();

    let frames = controller.session().frames();
    assert!(frames > 0);
    assert_eq!(controller.channel().frame, frames);
    assert_eq!(controller.state().frame, frames);
}

#[test]
fn test_snapshot_tracks_latest_frame() {
    let mut controller = setup(ToyEngine::default());
    controller.move_by(0.5).unwrap();
    assert_eq!(controller.pose(), &controller.channel().pose);
    assert_eq!(controller.state(), &controller.channel().snapshot());
}

#[test]
fn test_closed_channel_is_fatal() {
    let engine = ToyEngine {
        close_after: Some(3),
        ..Default::default()
    };
    let mut controller = setup(engine);

    let result = controller.move_by(1.0);
    assert!(matches!(
        result,
        Err(SessionError::Channel(ChannelError::Closed))
    ));
    assert_eq!(controller.session().frames(), 3);
}

#[test]
fn test_connect_reads_bootstrap() {
    let mut engine = ToyEngine::default();
    engine.pose.position = Vec3::new(1.0, 0.0, 2.0);
    engine.objects.insert(3, Vec3::new(0.0, 0.5, 0.0));
    engine.statics.push(robot_actions::ObjectStatic::new(
        3,
        "vase",
        robot_actions::ShapePrimitive::Cylinder {
            radius: 0.1,
            height: 0.4,
        },
        300.0,
    ));

    let controller = ActionController::connect(engine, MotionConfig::default()).unwrap();
    assert_eq!(controller.pose().position, Vec3::new(1.0, 0.0, 2.0));
    assert_eq!(controller.session().object(3).map(|o| o.name.as_str()), Some("vase"));
    assert_eq!(controller.session().frames(), 0);
}

#[test]
fn test_commands_serialize_with_type_tag() {
    let wheels = serde_json::to_value(Command::SetWheels(WheelPair::spin(10.0))).unwrap();
    assert_eq!(
        wheels,
        json!({"$type": "set_wheels", "left": 10.0, "right": -10.0})
    );

    let ik = serde_json::to_value(Command::SetIkTarget {
        arm: Arm::Right,
        target: Vec3::new(1.0, 0.5, -2.0),
    })
    .unwrap();
    assert_eq!(
        ik,
        json!({"$type": "set_ik_target", "arm": "right", "target": [1.0, 0.5, -2.0]})
    );

    let back: Command = serde_json::from_value(ik).unwrap();
    assert!(matches!(back, Command::SetIkTarget { arm: Arm::Right, .. }));
}

#[test]
fn test_actions_and_statuses_deserialize() {
    let action: Action = serde_json::from_value(json!({
        "action": "move_to",
        "target": {"object": 4},
        "arrived_at": 0.1,
        "aligned_at": 3.0,
        "move_on_turn_fail": true
    }))
    .unwrap();
    assert_eq!(
        action,
        Action::MoveTo {
            target: Target::Object(4),
            arrived_at: 0.1,
            aligned_at: 3.0,
            move_on_turn_fail: true,
        }
    );

    let status: ActionStatus = serde_json::from_value(json!("failed_to_bend")).unwrap();
    assert_eq!(status, ActionStatus::FailedToBend);
    assert_eq!(ActionStatus::TooManyAttempts.to_string(), "too_many_attempts");
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config: MotionConfig = serde_json::from_value(json!({
        "aligned_at": 1.5,
        "arm": {"max_payload": 5.0}
    }))
    .unwrap();
    let defaults = MotionConfig::default();
    assert_eq!(config.aligned_at, 1.5);
    assert_eq!(config.arm.max_payload, 5.0);
    assert_eq!(config.arm.reach, defaults.arm.reach);
    assert_eq!(config.turn_attempts, defaults.turn_attempts);
}

#[test]
fn test_custom_tolerance_is_honoured() {
    let mut controller = setup(ToyEngine::default());
    let status = controller
        .dispatch(Action::TurnBy {
            angle: 60.0,
            aligned_at: 0.5,
        })
        .unwrap();
    assert_eq!(status, ActionStatus::Success);
    assert!((controller.pose().heading() - 60.0).abs() <= 0.5);
}

#[test]
fn test_move_to_resolves_turn_and_leaves_distance_for_later() {
    let controller = setup(ToyEngine::default());
    let target = Vec3::new(2.0, 0.0, 0.0);

    let primitive = Action::MoveTo {
        target: Target::Position(target),
        arrived_at: 0.1,
        aligned_at: 3.0,
        move_on_turn_fail: false,
    }
    .resolve(controller.session())
    .unwrap();
    let Primitive::Move(drive) = primitive else {
        panic!("expected a move, got {primitive:?}");
    };
    assert_eq!(drive.distance, 0.0);
    let approach = drive.approach.unwrap();
    assert_eq!(approach.target, target);
    assert!((approach.turn.angle - 90.0).abs() < 1e-3);
}
