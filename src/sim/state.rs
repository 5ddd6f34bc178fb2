//! Game state and core simulation types
//!
//! One owned aggregate holds everything a tick mutates. It is built once from
//! a [`Config`] and threaded through [`tick`](super::tick::tick) by reference.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::first_hit;
use super::grid::Grid;
use super::lane::{LaneActor, Obstacle, spawn_obstacles};
use super::piece::PieceController;
use super::random::{Randomizer, seeded};
use super::shape::ShapeKind;
use super::snapshot::Snapshot;
use crate::settings::Config;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// A freshly spawned piece overlapped settled cells
    BlockOut,
    /// The actor ran into an obstacle in this lane
    ActorHit { lane: usize },
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// Terminal, no further mutation
    GameOver(GameOverCause),
}

/// Things that happened during a tick, for presentation and scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PieceLocked { kind: ShapeKind, cells: usize },
    LinesCleared(usize),
    PieceSpawned(ShapeKind),
    ActorHit { lane: usize },
    GameOver(GameOverCause),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    /// Immutable tuning
    pub config: Config,
    /// Settled cells
    pub grid: Grid,
    /// Falling piece and lookahead
    pub pieces: PieceController<R>,
    pub actor: LaneActor,
    /// All obstacles, lane by lane
    pub obstacles: Vec<Obstacle>,
    pub phase: GamePhase,
    /// Seconds since the last gravity step
    pub gravity_accumulator: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Total rows removed this run
    pub lines_cleared: u64,
    /// Events recorded since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState<Pcg32> {
    /// Create a new game seeded from `config.seed`
    pub fn new(config: Config) -> Self {
        let rng = seeded(config.seed);
        Self::with_randomizer(config, rng)
    }
}

impl<R: Randomizer> GameState<R> {
    /// Create a new game drawing every random choice from `rng`
    pub fn with_randomizer(config: Config, mut rng: R) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let actor = LaneActor::from_config(&config);
        let obstacles = spawn_obstacles(&config, &mut rng);
        let pieces = PieceController::new(&grid, rng);

        Self::from_parts(config, grid, pieces, actor, obstacles)
    }

    /// Assemble a state from prepared parts
    pub fn from_parts(
        config: Config,
        grid: Grid,
        pieces: PieceController<R>,
        actor: LaneActor,
        obstacles: Vec<Obstacle>,
    ) -> Self {
        let mut state = Self {
            config,
            grid,
            pieces,
            actor,
            obstacles,
            phase: GamePhase::Running,
            gravity_accumulator: 0.0,
            time_ticks: 0,
            lines_cleared: 0,
            events: Vec::new(),
        };
        // The first piece may already be blocked, or the actor may start on a hazard
        if !state.pieces.piece().fits(&state.grid) {
            state.end(GameOverCause::BlockOut);
        } else {
            state.check_actor_hit();
        }
        state
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    /// Enter the terminal phase (first cause wins)
    pub(crate) fn end(&mut self, cause: GameOverCause) {
        if self.is_over() {
            return;
        }
        log::info!(
            "Game over after {} ticks ({:?}), {} lines cleared",
            self.time_ticks,
            cause,
            self.lines_cleared
        );
        self.phase = GamePhase::GameOver(cause);
        self.events.push(GameEvent::GameOver(cause));
    }

    /// Test the actor against every obstacle, ending the run on contact
    pub(crate) fn check_actor_hit(&mut self) -> bool {
        let actor = self.actor.rect();
        match first_hit(&actor, self.obstacles.iter().map(Obstacle::rect)) {
            Some(idx) => {
                let lane = self.obstacles[idx].lane;
                self.events.push(GameEvent::ActorHit { lane });
                self.end(GameOverCause::ActorHit { lane });
                true
            }
            None => false,
        }
    }

    /// Take the events recorded so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            grid: &self.grid,
            piece: self.pieces.piece(),
            next: self.pieces.next(),
            actor: &self.actor,
            obstacles: &self.obstacles,
            lines_cleared: self.lines_cleared,
            time_ticks: self.time_ticks,
        }
    }
}
