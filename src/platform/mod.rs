//! Platform abstraction layer
//!
//! Handles the frontend side of the game loop:
//! - Frame timing
//! - Input events mapped onto [`Command`]s
//! - Drawing from a read-only [`Snapshot`]
//!
//! Only a headless frontend ships here. It plays itself with a seeded
//! autopilot and logs what happens.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::TICK_DT;
use crate::sim::{
    Command, Driver, GameEvent, LoopStatus, Randomizer, SimError, Snapshot,
};

/// A frontend the driver can run against
pub trait Presenter {
    /// Real time elapsed since the previous frame, in seconds
    fn frame_dt(&mut self) -> f32;

    /// Latest input since the previous frame, if any
    fn poll_input(&mut self) -> Option<Command>;

    /// Present the current frame. `events` holds everything recorded since
    /// the previous frame.
    fn draw(&mut self, snapshot: &Snapshot<'_>, events: &[GameEvent]);
}

impl<R: Randomizer> Driver<R> {
    /// Loop poll, advance, draw until the player quits or the game ends
    pub fn run(&mut self, presenter: &mut impl Presenter) -> Result<LoopStatus, SimError> {
        log::info!("Game loop started");
        loop {
            if let Some(command) = presenter.poll_input() {
                self.push(command);
            }
            let status = self.advance(presenter.frame_dt())?;
            let events = self.state.drain_events();
            presenter.draw(&self.state.snapshot(), &events);
            if status != LoopStatus::Running {
                log::info!(
                    "Game loop stopped ({:?}) after {} ticks",
                    status,
                    self.state.time_ticks
                );
                return Ok(status);
            }
        }
    }
}

/// Every command the autopilot may issue (never quits on its own)
const AUTOPILOT_COMMANDS: [Command; 8] = [
    Command::PieceLeft,
    Command::PieceRight,
    Command::PieceRotate,
    Command::PieceSoftDrop,
    Command::ActorUp,
    Command::ActorDown,
    Command::ActorLeft,
    Command::ActorRight,
];

/// Frontend with no window: fixed frame time, random input, log output
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    rng: Pcg32,
    /// Frames between autopilot commands
    input_every: u32,
    /// Quit after this many frames
    frame_limit: u64,
    frames: u64,
    lines_seen: u64,
}

impl HeadlessPlatform {
    pub fn new(seed: u64, frame_limit: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            input_every: 4,
            frame_limit,
            frames: 0,
            lines_seen: 0,
        }
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Rows cleared according to the events seen so far
    pub fn lines_seen(&self) -> u64 {
        self.lines_seen
    }
}

impl Presenter for HeadlessPlatform {
    fn frame_dt(&mut self) -> f32 {
        TICK_DT
    }

    fn poll_input(&mut self) -> Option<Command> {
        if self.frames >= self.frame_limit {
            return Some(Command::Quit);
        }
        if self.frames % u64::from(self.input_every) != 0 {
            return None;
        }
        let command = AUTOPILOT_COMMANDS[self.rng.random_range(0..AUTOPILOT_COMMANDS.len())];
        log::trace!("Autopilot: {:?}", command);
        Some(command)
    }

    fn draw(&mut self, snapshot: &Snapshot<'_>, events: &[GameEvent]) {
        self.frames += 1;
        for event in events {
            match event {
                GameEvent::LinesCleared(n) => {
                    self.lines_seen += *n as u64;
                    log::debug!("Cleared {} lines (total {})", n, snapshot.lines_cleared);
                }
                GameEvent::ActorHit { lane } => log::debug!("Actor hit in lane {}", lane),
                GameEvent::GameOver(cause) => log::debug!("Game over: {:?}", cause),
                _ => {}
            }
        }
        if self.frames % 600 == 0 {
            log::debug!(
                "Frame {}: tick {}, {} lines\n{}",
                self.frames,
                snapshot.time_ticks,
                snapshot.lines_cleared,
                snapshot.grid_ascii()
            );
        }
    }
}
