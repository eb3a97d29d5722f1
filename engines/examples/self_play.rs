/// Play a whole game, the human side driven by the same search at a lower level
use reversi::{Level, Player};
use reversi_engines::{suggest_move, Session, SessionConfig, SessionEvent};

fn main() -> Result<(), reversi::GameError> {
    tracing_subscriber::fmt::init();

    println!("=== Reversi Self-Play ===\n");

    let human_level = Level::new(1)?;
    let mut session = Session::new(SessionConfig::new().with_level(Level::new(3)?));
    session.subscribe(|event: SessionEvent, state: &reversi::GameState| {
        if let SessionEvent::Moved { player } = event {
            println!("{} moved:", player);
            println!("{}\n", state);
            if state.is_forced_pass(player) {
                println!("{} has to miss a turn\n", player.inverse());
            }
        }
    });

    while !session.current().is_game_over() {
        match session.current().next_player() {
            Player::Human => {
                let Some(next) = suggest_move(session.current(), human_level) else {
                    break;
                };
                let (row, col) = placed_stone(session.current(), &next);
                session.human_move(row, col)?;
            }
            Player::Machine => {
                session.machine_turns()?;
            }
        }
    }

    let state = session.current();
    println!(
        "Human: {}, Machine: {}",
        state.number_of_human_tiles(),
        state.number_of_machine_tiles()
    );
    match state.winner()? {
        Some(Player::Human) => println!("You have won!"),
        Some(Player::Machine) => println!("Machine has won."),
        None => println!("Tie game!"),
    }

    Ok(())
}

/// The legal move of `before` that leads to `after`
fn placed_stone(before: &reversi::GameState, after: &reversi::GameState) -> (usize, usize) {
    before
        .legal_moves(before.next_player())
        .into_iter()
        .find(|&(row, col)| before.move_for_next_player(row, col).as_ref() == Ok(after))
        .expect("suggested state is one legal move away")
}
