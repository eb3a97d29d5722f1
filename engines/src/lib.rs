//! Reversi Machine Player
//!
//! This crate contains the computer opponent for the `reversi` board crate:
//! - `score`: static evaluation combining positional weights, mobility and
//!   potential mobility
//! - `tree`: exhaustive depth-bounded game tree with additive minimax backup
//! - `session`: a running game with history for undo, observers, and a
//!   background worker for machine moves
//!
//! Machine moves are requested through the [`MachineMove`] extension trait:
//!
//! ```
//! use reversi::{new_game, Level, Player};
//! use reversi_engines::MachineMove;
//!
//! let state = new_game(Player::Machine);
//! let reply = state.machine_move(Level::new(2)?)?;
//! assert_eq!(reply.next_player(), Player::Human);
//! # Ok::<(), reversi::GameError>(())
//! ```

#[cfg(feature = "python")]
pub mod bindings;
pub mod score;
pub mod session;
pub mod tree;

use reversi::{GameError, GameState, Level, Player, Result};

pub use score::score;
pub use session::{MachineWorker, Session, SessionConfig, SessionEvent, SessionObserver};
pub use tree::SearchTree;

/// Computer moves for a [`GameState`].
pub trait MachineMove {
    /// Search `level` plies deep and return the state after the machine's
    /// chosen move.
    ///
    /// Fails with [`GameError::GameOver`] on a finished game and with
    /// [`GameError::InvalidTurn`] when the human is to move. Deterministic:
    /// the same state and level always give the same reply.
    fn machine_move(&self, level: Level) -> Result<GameState>;
}

impl MachineMove for GameState {
    fn machine_move(&self, level: Level) -> Result<GameState> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if self.next_player() != Player::Machine {
            return Err(GameError::InvalidTurn {
                expected: self.next_player(),
            });
        }

        let tree = SearchTree::new(self.clone(), level.depth());
        Ok(tree.calculate_best_move())
    }
}

/// Best reply for whichever player is to move, used for hints and self-play.
/// Returns `None` once the game is over.
pub fn suggest_move(state: &GameState, level: Level) -> Option<GameState> {
    if state.is_game_over() {
        return None;
    }
    Some(SearchTree::new(state.clone(), level.depth()).calculate_best_move())
}
