//! Performing a planned sequence through recording collaborators.

use std::time::Duration;

use choreo_harness::config::Profile;
use choreo_harness::execution::{
    perform_sequence, AudioPlayer, ExecutionError, MoveError, MoveExecutor, RobotEndpoint,
};
use choreo_harness::runner::run_profile;
use choreo_kernel::catalog::MoveId;

#[derive(Default)]
struct RecordingRobot {
    calls: Vec<(String, String)>,
    fail_at: Option<usize>,
}

impl MoveExecutor for RecordingRobot {
    fn perform(
        &mut self,
        move_id: &MoveId,
        endpoint: &RobotEndpoint,
    ) -> Result<(), MoveError> {
        if self.fail_at == Some(self.calls.len()) {
            return Err(MoveError::Failed {
                detail: "robot fell over".into(),
            });
        }
        self.calls
            .push((move_id.as_str().to_string(), endpoint.to_string()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingPlayer {
    tracks: Vec<String>,
}

impl AudioPlayer for RecordingPlayer {
    fn play(&mut self, track: &str) -> Result<(), ExecutionError> {
        self.tracks.push(track.to_string());
        Ok(())
    }
}

fn best_moves() -> Vec<MoveId> {
    let mut profile = Profile::builtin("classic").unwrap();
    profile.budget.max_expansions = 200;
    let plan = run_profile(profile).unwrap();
    plan.report.best.unwrap().moves()
}

fn endpoint() -> RobotEndpoint {
    RobotEndpoint {
        address: "192.168.1.20".into(),
        port: 9559,
    }
}

#[test]
fn best_plan_is_performed_move_by_move() {
    let moves = best_moves();
    let mut robot = RecordingRobot::default();
    let mut player = RecordingPlayer::default();

    player.play("staying_alive.mp3").unwrap();
    let log = perform_sequence(&mut robot, &moves, &endpoint()).unwrap();

    assert_eq!(player.tracks, ["staying_alive.mp3"]);
    let performed: Vec<&str> = robot.calls.iter().map(|(m, _)| m.as_str()).collect();
    let planned: Vec<&str> = moves.iter().map(MoveId::as_str).collect();
    assert_eq!(performed, planned);
    assert!(robot.calls.iter().all(|(_, ep)| ep == "192.168.1.20:9559"));

    assert_eq!(log.len(), moves.len());
    let sum: Duration = log.moves.iter().map(|m| m.elapsed).sum();
    assert!(log.total >= sum);
}

#[test]
fn failing_move_stops_the_performance() {
    let moves = best_moves();
    let mut robot = RecordingRobot {
        fail_at: Some(3),
        ..RecordingRobot::default()
    };
    let err = perform_sequence(&mut robot, &moves, &endpoint()).unwrap_err();
    assert_eq!(robot.calls.len(), 3);
    match err {
        ExecutionError::MoveFailed { index, move_id, .. } => {
            assert_eq!(index, 3);
            assert_eq!(move_id, moves[3]);
        }
        other => panic!("unexpected error {other}"),
    }
}
