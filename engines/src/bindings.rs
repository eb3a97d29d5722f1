use crate::{Session, SessionConfig};
use ndarray::Array2;
use numpy::{PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
/// PyO3 bindings for the Reversi engine
/// Exposes a human-vs-machine session to Python
use pyo3::prelude::*;
use reversi::{GameError, Level, Player, SIZE};

fn to_py_err(err: GameError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for a game against the machine
///
/// Holds the full history, so moves can be taken back with `undo`.
#[pyclass]
pub struct ReversiGame {
    session: Session,
}

#[pymethods]
impl ReversiGame {
    /// Create a new game
    ///
    /// Args:
    ///     machine_first (bool): Whether the machine opens the game
    ///     level (int): Search depth of the machine, must be positive
    ///
    /// Raises:
    ///     ValueError: If level is not positive
    #[new]
    #[pyo3(signature = (machine_first = false, level = 3))]
    pub fn new(machine_first: bool, level: i64) -> PyResult<Self> {
        let first_player = if machine_first {
            Player::Machine
        } else {
            Player::Human
        };
        let config = SessionConfig::new()
            .with_first_player(first_player)
            .with_level(Level::new(level).map_err(to_py_err)?);

        Ok(Self {
            session: Session::new(config),
        })
    }

    /// Start over with the same opener
    pub fn reset(&mut self) {
        self.session.new_game();
    }

    /// Start over with the other player opening
    pub fn switch_player_order(&mut self) {
        self.session.switch_player_order();
    }

    /// Play a human move
    ///
    /// Args:
    ///     action (int): Position on the board (0-63), where action = row * 8 + col
    ///
    /// Returns:
    ///     tuple: (valid, game_over)
    ///         - valid (bool): Whether the move was legal and applied
    ///         - game_over (bool): Whether the game has ended
    ///
    /// Raises:
    ///     ValueError: If action is out of range, it is the machine's turn,
    ///         or the game is already over
    pub fn step(&mut self, action: usize) -> PyResult<(bool, bool)> {
        if action >= SIZE * SIZE {
            return Err(PyValueError::new_err(format!(
                "Action {} is out of range. Must be between 0 and 63 (inclusive).",
                action
            )));
        }

        let row = action / SIZE + 1;
        let col = action % SIZE + 1;

        match self.session.human_move(row, col) {
            Ok(()) => Ok((true, self.session.current().is_game_over())),
            // An illegal move is not an error, the caller simply tries again
            Err(err) if err.is_illegal_move() => Ok((false, false)),
            Err(err) => Err(to_py_err(err)),
        }
    }

    /// Let the machine move until it is the human's turn again
    ///
    /// Returns:
    ///     int: Number of machine moves played (more than one if the human had to pass)
    pub fn machine_step(&mut self) -> PyResult<usize> {
        self.session.machine_turns().map_err(to_py_err)
    }

    /// Take back the last human move and the machine's replies
    ///
    /// Returns:
    ///     bool: False if there was nothing to undo
    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    /// Set the search depth used for the next machine move
    ///
    /// Raises:
    ///     ValueError: If level is not positive
    pub fn set_level(&mut self, level: i64) -> PyResult<()> {
        let level = Level::new(level).map_err(to_py_err)?;
        self.session.set_level(level);
        Ok(())
    }

    /// Get the current board as a 2D numpy array
    ///
    /// Returns:
    ///     np.ndarray: Shape (8, 8) with dtype uint8
    ///         - 0 = Empty cell
    ///         - 1 = Human stone
    ///         - 2 = Machine stone
    pub fn get_board<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray2<u8>> {
        let state = self.session.current().get_state();
        let array = Array2::from_shape_fn((SIZE, SIZE), |(row, col)| state[row * SIZE + col]);

        Ok(PyArray2::from_owned_array(py, array))
    }

    /// Get legal moves for the player to move
    ///
    /// Returns:
    ///     np.ndarray: Shape (64,) with dtype bool, all False once the game is over
    pub fn get_valid_moves<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray1<bool>> {
        let state = self.session.current();
        let mut moves = [false; SIZE * SIZE];

        if !state.is_game_over() {
            for (row, col) in state.legal_moves(state.next_player()) {
                moves[(row - 1) * SIZE + (col - 1)] = true;
            }
        }

        Ok(PyArray1::from_slice(py, &moves))
    }

    /// Get the player to move
    ///
    /// Returns:
    ///     int: 0 for the human, 1 for the machine
    pub fn get_current_player(&self) -> u8 {
        match self.session.current().next_player() {
            Player::Human => 0,
            Player::Machine => 1,
        }
    }

    /// Get stone counts
    ///
    /// Returns:
    ///     tuple: (human_count, machine_count)
    pub fn get_piece_counts(&self) -> (usize, usize) {
        let state = self.session.current();
        (state.number_of_human_tiles(), state.number_of_machine_tiles())
    }

    /// Get the winner of the game
    ///
    /// Returns:
    ///     int:
    ///         - 0 = Human wins
    ///         - 1 = Machine wins
    ///         - 2 = Tie
    ///         - 3 = Game not finished
    pub fn get_winner(&self) -> u8 {
        match self.session.current().winner() {
            Ok(Some(Player::Human)) => 0,
            Ok(Some(Player::Machine)) => 1,
            Ok(None) => 2,
            Err(_) => 3,
        }
    }

    fn __str__(&self) -> String {
        self.session.current().to_string()
    }
}

/// Python module definition
///
/// This module can be imported in Python as `reversi_engines`
#[pymodule]
fn reversi_engines(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<ReversiGame>()?;
    Ok(())
}
