//! Static Evaluation
//!
//! Scores a [`GameState`] from one player's point of view. The value is the
//! sum of three terms, each comparing the assessed player with the opponent
//! on the same board:
//!   1. Field: positional weights of own stones minus 1.5x the opponent's
//!   2. Mobility: legal move counts, scaled up while the board is empty
//!   3. Potential: stones bordering empty cells are exposed to capture,
//!      so exposed opponent stones count for us and exposed own stones
//!      count against us
//!
//! All coefficients are hand-tuned and only meaningful on an 8x8 board.

use reversi::{GameState, Player, SIZE};

/// Positional weights, indexed `[row - 1][col - 1]`. Corners dominate, the
/// cells next to corners are nearly worthless.
pub const FIELD_WEIGHTS: [[i32; SIZE]; SIZE] = [
    [9999, 5, 500, 200, 200, 500, 5, 9999],
    [5, 1, 50, 150, 150, 50, 1, 5],
    [500, 50, 250, 100, 100, 250, 50, 500],
    [200, 150, 100, 50, 50, 100, 150, 200],
    [200, 150, 100, 50, 50, 100, 150, 200],
    [500, 50, 250, 100, 100, 250, 50, 500],
    [5, 1, 50, 150, 150, 50, 1, 5],
    [9999, 5, 500, 200, 200, 500, 5, 9999],
];

const OPPONENT_FIELD_FACTOR: f64 = 1.5;
const OWN_MOBILITY_FACTOR: f64 = 3.0;
const OPPONENT_MOBILITY_FACTOR: f64 = 4.0;
const OPPONENT_EXPOSURE_FACTOR: f64 = 2.5;
const OWN_EXPOSURE_FACTOR: f64 = 3.0;

/// Desirability of `state` for `player`; higher is better.
pub fn score(state: &GameState, player: Player) -> f64 {
    field_score(state, player) + mobility_score(state, player) + potential_score(state, player)
}

/// Weighted sum over own stones minus 1.5x the weighted sum over the
/// opponent's stones.
pub fn field_score(state: &GameState, player: Player) -> f64 {
    let mut own = 0;
    let mut opponent = 0;

    for (row, col, owner) in state.occupied() {
        let weight = FIELD_WEIGHTS[row - 1][col - 1];
        if owner == player {
            own += weight;
        } else {
            opponent += weight;
        }
    }

    own as f64 - OPPONENT_FIELD_FACTOR * opponent as f64
}

/// `(N² / occupied) * (3·own_moves − 4·opponent_moves)`
///
/// Mobility matters most early on; the factor shrinks as the board fills.
pub fn mobility_score(state: &GameState, player: Player) -> f64 {
    let own = state.number_of_legal_moves(player) as f64;
    let opponent = state.number_of_legal_moves(player.inverse()) as f64;

    board_fill_factor(state) * (OWN_MOBILITY_FACTOR * own - OPPONENT_MOBILITY_FACTOR * opponent)
}

/// `(N² / (2·occupied)) * (2.5·A − 3·B)` where `A` counts empty cells around
/// opponent stones and `B` empty cells around own stones.
pub fn potential_score(state: &GameState, player: Player) -> f64 {
    let mut opponent_exposure = 0;
    let mut own_exposure = 0;

    for (row, col, owner) in state.occupied() {
        let exposure = state.empty_neighbours(row, col);
        if owner == player {
            own_exposure += exposure;
        } else {
            opponent_exposure += exposure;
        }
    }

    board_fill_factor(state) / 2.0
        * (OPPONENT_EXPOSURE_FACTOR * opponent_exposure as f64
            - OWN_EXPOSURE_FACTOR * own_exposure as f64)
}

/// N² over the number of stones; never divides by zero since every state,
/// parsed ones included, holds at least one stone.
fn board_fill_factor(state: &GameState) -> f64 {
    (SIZE * SIZE) as f64 / state.occupied_count() as f64
}
