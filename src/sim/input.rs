//! Input command vocabulary
//!
//! The presentation layer maps raw device events onto [`Command`]s. The
//! simulation consumes at most one per tick, the most recent one wins.

use serde::{Deserialize, Serialize};

/// Discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    PieceLeft,
    PieceRight,
    PieceRotate,
    PieceSoftDrop,
    ActorUp,
    ActorDown,
    ActorLeft,
    ActorRight,
    Quit,
}

impl Command {
    /// Every command, in declaration order
    pub const ALL: [Command; 9] = [
        Command::PieceLeft,
        Command::PieceRight,
        Command::PieceRotate,
        Command::PieceSoftDrop,
        Command::ActorUp,
        Command::ActorDown,
        Command::ActorLeft,
        Command::ActorRight,
        Command::Quit,
    ];

    /// Actor displacement in steps, `None` for non-actor commands
    pub fn actor_delta(self) -> Option<(i32, i32)> {
        match self {
            Command::ActorUp => Some((0, -1)),
            Command::ActorDown => Some((0, 1)),
            Command::ActorLeft => Some((-1, 0)),
            Command::ActorRight => Some((1, 0)),
            _ => None,
        }
    }
}

/// Single-slot command buffer. Pushing overwrites, taking empties it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandSlot {
    pending: Option<Command>,
}

impl CommandSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `command`, replacing anything not yet consumed.
    ///
    /// A queued `Quit` is never overwritten.
    pub fn push(&mut self, command: Command) {
        if self.pending != Some(Command::Quit) {
            self.pending = Some(command);
        }
    }

    /// Consume the pending command
    pub fn take(&mut self) -> Option<Command> {
        self.pending.take()
    }

    pub fn peek(&self) -> Option<Command> {
        self.pending
    }
}
