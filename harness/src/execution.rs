//! Execution layer: drive a finalized plan out to the robot.
//!
//! The search never touches this module. A plan is a list of move
//! identifiers; an executor turns each one into an external action and the
//! performer times them. Audio playback is a separate collaborator so a
//! track can start just before the first move.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use choreo_kernel::catalog::MoveId;

/// Network location of the robot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotEndpoint {
    pub address: String,
    pub port: u16,
}

impl std::fmt::Display for RobotEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// Error from a single move, before it is placed in the sequence.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    #[error("cannot launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{detail}")]
    Failed { detail: String },
}

/// Error while performing a plan or starting playback.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("cannot launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("move {move_id} failed at step {index}: {source}")]
    MoveFailed {
        index: usize,
        move_id: MoveId,
        #[source]
        source: MoveError,
    },
}

/// Performs a single move. Must block until the move has finished.
pub trait MoveExecutor {
    /// # Errors
    ///
    /// [`MoveError`] if the move could not be performed.
    fn perform(&mut self, move_id: &MoveId, endpoint: &RobotEndpoint) -> Result<(), MoveError>;
}

/// Starts audio playback without waiting for it to finish.
pub trait AudioPlayer {
    /// # Errors
    ///
    /// [`ExecutionError::Spawn`] if the player could not be started.
    fn play(&mut self, track: &str) -> Result<(), ExecutionError>;
}

/// Runs one script per move: `<interpreter> <moves_dir>/<move>.py <address> <port>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptExecutor {
    pub interpreter: String,
    pub moves_dir: PathBuf,
}

impl Default for ScriptExecutor {
    fn default() -> Self {
        Self {
            interpreter: "python2".to_string(),
            moves_dir: PathBuf::from("./moves"),
        }
    }
}

impl ScriptExecutor {
    /// Script path for `move_id`.
    #[must_use]
    pub fn script_path(&self, move_id: &MoveId) -> PathBuf {
        self.moves_dir.join(format!("{}.py", move_id.as_str()))
    }

    fn command(&self, move_id: &MoveId, endpoint: &RobotEndpoint) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(self.script_path(move_id))
            .arg(&endpoint.address)
            .arg(endpoint.port.to_string())
            .stdin(Stdio::null());
        cmd
    }
}

impl MoveExecutor for ScriptExecutor {
    fn perform(
        &mut self,
        move_id: &MoveId,
        endpoint: &RobotEndpoint,
    ) -> Result<(), MoveError> {
        let status = self
            .command(move_id, endpoint)
            .status()
            .map_err(|source| MoveError::Spawn {
                program: self.interpreter.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(MoveError::Failed {
                detail: format!("{} exited with {status}", self.script_path(move_id).display()),
            })
        }
    }
}

/// Spawns `<program> <args..> <track>` and detaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandAudioPlayer {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for CommandAudioPlayer {
    fn default() -> Self {
        Self {
            program: "cvlc".to_string(),
            args: vec!["--play-and-exit".to_string()],
        }
    }
}

impl AudioPlayer for CommandAudioPlayer {
    fn play(&mut self, track: &str) -> Result<(), ExecutionError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(track)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ExecutionError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        tracing::info!(track, pid = child.id(), "playback started");
        std::thread::spawn(move || {
            let _ = child.wait();
        });
        Ok(())
    }
}

/// Wall-clock time of one performed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTiming {
    pub move_id: MoveId,
    pub elapsed: Duration,
}

/// Timings of a complete performance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceLog {
    pub moves: Vec<MoveTiming>,
    pub total: Duration,
}

impl PerformanceLog {
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Perform `sequence` in order, timing each move.
///
/// Stops at the first failing move.
///
/// # Errors
///
/// [`ExecutionError::MoveFailed`] carrying the failing step index and the
/// executor's [`MoveError`].
pub fn perform_sequence(
    executor: &mut dyn MoveExecutor,
    sequence: &[MoveId],
    endpoint: &RobotEndpoint,
) -> Result<PerformanceLog, ExecutionError> {
    tracing::info!(endpoint = %endpoint, moves = sequence.len(), "performance starting");
    let start = Instant::now();
    let mut log = PerformanceLog::default();

    for (index, move_id) in sequence.iter().enumerate() {
        let move_start = Instant::now();
        executor
            .perform(move_id, endpoint)
            .map_err(|source| ExecutionError::MoveFailed {
                index,
                move_id: move_id.clone(),
                source,
            })?;
        let elapsed = move_start.elapsed();
        tracing::info!(
            step = index + 1,
            of = sequence.len(),
            move_id = %move_id,
            elapsed_s = elapsed.as_secs_f64(),
            "move performed"
        );
        log.moves.push(MoveTiming {
            move_id: move_id.clone(),
            elapsed,
        });
    }

    log.total = start.elapsed();
    tracing::info!(total_s = log.total.as_secs_f64(), "performance finished");
    Ok(log)
}
