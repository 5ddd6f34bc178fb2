//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::error::SimError;
use super::input::{Command, CommandSlot};
use super::piece::{GravityOutcome, LockReport};
use super::random::Randomizer;
use super::state::{GameEvent, GameOverCause, GameState};
use crate::consts::{MAX_SUBSTEPS, TICK_DT};

/// Advance the game state by one fixed timestep.
///
/// Order within a tick: gravity (when the accumulator is due), the queued
/// command, obstacle motion, actor hazard check. A finished game is left
/// untouched.
pub fn tick<R: Randomizer>(
    state: &mut GameState<R>,
    command: Option<Command>,
    dt: f32,
) -> Result<(), SimError> {
    if state.is_over() {
        return Ok(());
    }
    state.time_ticks += 1;

    // Gravity
    state.gravity_accumulator += dt;
    if state.gravity_accumulator >= state.config.gravity_interval {
        state.gravity_accumulator = 0.0;
        step_down(state)?;
        if state.is_over() {
            return Ok(());
        }
    }

    // Player input
    if let Some(command) = command {
        apply_command(state, command)?;
        if state.is_over() {
            return Ok(());
        }
    }

    // Obstacles
    let field_width = state.config.field_width;
    for obstacle in &mut state.obstacles {
        obstacle.update(field_width);
    }

    if state.check_actor_hit() {
        return Ok(());
    }

    log::trace!(
        "tick {}: piece {:?} at ({}, {}), actor at {:?}",
        state.time_ticks,
        state.pieces.piece().kind,
        state.pieces.piece().x,
        state.pieces.piece().y,
        state.actor.pos
    );
    Ok(())
}

/// Apply one player command. Rejected piece moves are silent no-ops.
fn apply_command<R: Randomizer>(
    state: &mut GameState<R>,
    command: Command,
) -> Result<(), SimError> {
    match command {
        Command::PieceLeft => {
            state.pieces.try_move(&state.grid, -1, 0);
        }
        Command::PieceRight => {
            state.pieces.try_move(&state.grid, 1, 0);
        }
        Command::PieceRotate => {
            state.pieces.try_rotate(&state.grid);
        }
        Command::PieceSoftDrop => step_down(state)?,
        Command::ActorUp | Command::ActorDown | Command::ActorLeft | Command::ActorRight => {
            if let Some((dx, dy)) = command.actor_delta() {
                state.actor.move_by(dx, dy);
            }
        }
        // Quit ends the loop in the driver, the state itself is untouched
        Command::Quit => {}
    }
    Ok(())
}

/// One descent of the active piece, committing and respawning on landing
fn step_down<R: Randomizer>(state: &mut GameState<R>) -> Result<(), SimError> {
    match state.pieces.tick_gravity(&mut state.grid)? {
        GravityOutcome::Fell => {}
        GravityOutcome::Locked(report) => on_lock(state, report),
    }
    Ok(())
}

fn on_lock<R: Randomizer>(state: &mut GameState<R>, report: LockReport) {
    log::debug!(
        "{:?} locked ({} cells), {} lines cleared, spawned {:?}",
        report.locked,
        report.committed,
        report.lines_cleared,
        report.spawned
    );
    state.events.push(GameEvent::PieceLocked {
        kind: report.locked,
        cells: report.committed,
    });
    if report.lines_cleared > 0 {
        state.lines_cleared += report.lines_cleared as u64;
        state.events.push(GameEvent::LinesCleared(report.lines_cleared));
    }
    state.events.push(GameEvent::PieceSpawned(report.spawned));
    if report.spawn_blocked {
        state.end(GameOverCause::BlockOut);
    }
}

/// Why the driver stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    Quit,
    GameOver,
}

/// Fixed-timestep driver
///
/// Accumulates real frame time and runs whole [`TICK_DT`] ticks, at most
/// [`MAX_SUBSTEPS`] per frame. The pending command goes to the first tick
/// of a frame only.
#[derive(Debug)]
pub struct Driver<R> {
    pub state: GameState<R>,
    input: CommandSlot,
    accumulator: f32,
    quit: bool,
}

impl<R: Randomizer> Driver<R> {
    pub fn new(state: GameState<R>) -> Self {
        Self {
            state,
            input: CommandSlot::new(),
            accumulator: 0.0,
            quit: false,
        }
    }

    /// Queue a command for the next tick (last one wins)
    pub fn push(&mut self, command: Command) {
        self.input.push(command);
    }

    pub fn status(&self) -> LoopStatus {
        if self.quit {
            LoopStatus::Quit
        } else if self.state.is_over() {
            LoopStatus::GameOver
        } else {
            LoopStatus::Running
        }
    }

    /// Feed `frame_dt` seconds of real time and run the ticks that are due
    pub fn advance(&mut self, frame_dt: f32) -> Result<LoopStatus, SimError> {
        if self.input.peek() == Some(Command::Quit) {
            self.input.take();
            self.quit = true;
            log::info!("Quit requested after {} ticks", self.state.time_ticks);
        }
        if self.status() != LoopStatus::Running {
            return Ok(self.status());
        }

        self.accumulator += frame_dt.max(0.0);
        let mut substeps = 0;
        while self.accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
            let command = self.input.take();
            tick(&mut self.state, command, TICK_DT)?;
            self.accumulator -= TICK_DT;
            substeps += 1;
            if self.state.is_over() {
                break;
            }
        }
        // Drop backlog we could not simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(TICK_DT);
        }

        Ok(self.status())
    }

    /// Tear down, handing back the final state
    pub fn finish(self) -> GameState<R> {
        self.state
    }
}
