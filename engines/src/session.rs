//! A running game: the current state, the history below it, the difficulty
//! level and whoever wants to hear about changes.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use reversi::{GameState, Level, Player, Result};
use tracing::{debug, info, warn};

use crate::MachineMove;

/// Settings for a new [`Session`].
///
/// ```
/// use reversi::{Level, Player};
/// use reversi_engines::SessionConfig;
///
/// let config = SessionConfig::new()
///     .with_first_player(Player::Machine)
///     .with_level(Level::new(4)?);
/// # Ok::<(), reversi::GameError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Who opens the first game
    pub first_player: Player,
    /// Search depth for machine moves
    pub level: Level,
}

impl SessionConfig {
    /// Human opens, level 3.
    pub fn new() -> Self {
        Self {
            first_player: Player::Human,
            level: Level::DEFAULT,
        }
    }

    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What changed in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// History was reset to a fresh opening
    NewGame,
    /// `player` moved; the new state is on top
    Moved { player: Player },
    /// The top state was dropped
    Undone,
}

/// Receives every [`SessionEvent`] together with the state now current.
///
/// Implemented for closures, so `session.subscribe(|event, state| ...)`
/// works directly.
pub trait SessionObserver: Send {
    fn on_event(&mut self, event: SessionEvent, state: &GameState);
}

impl<F> SessionObserver for F
where
    F: FnMut(SessionEvent, &GameState) + Send,
{
    fn on_event(&mut self, event: SessionEvent, state: &GameState) {
        self(event, state)
    }
}

/// Machine moves computed on a background thread.
///
/// Dropping the worker abandons it: the thread finishes its current search
/// and exits without its result ever reaching the session.
pub struct MachineWorker {
    generation: u64,
    receiver: Receiver<GameState>,
    handle: Option<JoinHandle<()>>,
}

impl MachineWorker {
    /// True once the thread has delivered everything it is going to.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Block until the thread is done.
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("machine worker panicked");
            }
        }
    }
}

pub struct Session {
    current: GameState,
    history: Vec<GameState>,
    level: Level,
    generation: u64,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Session {
            current: GameState::new(config.first_player),
            history: Vec::new(),
            level: config.level,
            generation: 0,
            observers: Vec::new(),
        }
    }

    /// State on top of the history
    pub fn current(&self) -> &GameState {
        &self.current
    }

    /// Number of states held, the current one included
    pub fn history_len(&self) -> usize {
        self.history.len() + 1
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Takes effect on the next machine move; the game itself is untouched.
    pub fn set_level(&mut self, level: Level) {
        debug!(%level, "level changed");
        self.level = level;
    }

    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Restart with the same opener. When the machine opens, its first move
    /// is left to the caller: follow up with [`Session::machine_turns`] or
    /// [`Session::spawn_machine_turns`].
    pub fn new_game(&mut self) {
        self.restart(self.current.first_player());
    }

    /// Restart with the other player opening. As with [`Session::new_game`],
    /// a machine opening move has to be requested explicitly.
    pub fn switch_player_order(&mut self) {
        self.restart(self.current.first_player().inverse());
    }

    /// Play a human move on top of the history. Illegal moves leave the
    /// session unchanged.
    pub fn human_move(&mut self, row: usize, col: usize) -> Result<()> {
        let next = self.current.apply_move(row, col)?;
        self.generation += 1;
        self.push(next, Player::Human);
        Ok(())
    }

    /// Let the machine move until the human is to move or the game is over.
    /// More than one move is played when the human has to pass. Returns the
    /// number of machine moves. A background worker running at the same time
    /// is outdated by this and its results are discarded.
    pub fn machine_turns(&mut self) -> Result<usize> {
        let mut played = 0;
        while self.machine_to_move() {
            let next = self.current.machine_move(self.level)?;
            self.generation += 1;
            self.push(next, Player::Machine);
            played += 1;
        }
        Ok(played)
    }

    /// Compute the machine's moves on a background thread. Collect them with
    /// [`Session::absorb`].
    pub fn spawn_machine_turns(&self) -> MachineWorker {
        let (sender, receiver) = mpsc::channel();
        let mut state = self.current.clone();
        let level = self.level;
        let generation = self.generation;

        let handle = thread::spawn(move || {
            while !state.is_game_over() && state.next_player() == Player::Machine {
                let next = match state.machine_move(level) {
                    Ok(next) => next,
                    Err(err) => {
                        warn!(%err, "machine worker stopped");
                        return;
                    }
                };
                if sender.send(next.clone()).is_err() {
                    debug!("machine worker abandoned");
                    return;
                }
                state = next;
            }
        });

        debug!(generation, "machine worker started");
        MachineWorker {
            generation,
            receiver,
            handle: Some(handle),
        }
    }

    /// Push every state `worker` has delivered so far. Results of a worker
    /// started before the last new game, player switch, undo or synchronous
    /// move are discarded.
    pub fn absorb(&mut self, worker: &MachineWorker) -> usize {
        if worker.generation != self.generation {
            let stale = worker.receiver.try_iter().count();
            debug!(stale, "discarding results of a stale machine worker");
            return 0;
        }

        let mut absorbed = 0;
        for next in worker.receiver.try_iter() {
            self.push(next, Player::Machine);
            absorbed += 1;
        }
        absorbed
    }

    /// Undo needs a human move to take back. When the machine opened, its
    /// first move is never undone.
    pub fn can_undo(&self) -> bool {
        let minimum = match self.current.first_player() {
            Player::Human => 2,
            Player::Machine => 3,
        };
        self.history_len() >= minimum
    }

    /// Drop states until the human is to move again. Returns false when
    /// there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }

        self.generation += 1;
        while self.can_undo() {
            let Some(previous) = self.history.pop() else {
                break;
            };
            self.current = previous;
            self.notify(SessionEvent::Undone);
            if self.current.next_player() == Player::Human {
                break;
            }
        }
        debug!(depth = self.history_len(), "undo");
        true
    }

    /// Player to move in the state below the top, i.e. who made the last move.
    pub fn last_player(&self) -> Option<Player> {
        self.history.last().map(GameState::next_player)
    }

    fn machine_to_move(&self) -> bool {
        !self.current.is_game_over() && self.current.next_player() == Player::Machine
    }

    fn restart(&mut self, first_player: Player) {
        info!(%first_player, "new game");
        self.generation += 1;
        self.history.clear();
        self.current = GameState::new(first_player);
        self.notify(SessionEvent::NewGame);
    }

    fn push(&mut self, next: GameState, player: Player) {
        let previous = std::mem::replace(&mut self.current, next);
        self.history.push(previous);
        if self.current.is_forced_pass(player) {
            debug!(%player, "opponent has to pass");
        }
        self.notify(SessionEvent::Moved { player });
    }

    fn notify(&mut self, event: SessionEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_event(event, &self.current);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("current", &self.current)
            .field("history_len", &self.history_len())
            .field("level", &self.level)
            .field("observers", &self.observers.len())
            .finish()
    }
}
