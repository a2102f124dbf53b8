//! Interactive Connect Four against the search engine.
//!
//! You drop first; the engine ponders your position while you type, then
//! answers from the pondered tree.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use sapling_mcts::{Engine, GamePosition, MctsParams, Player, Thinking, Value};

const ROWS: usize = 6;
const COLS: usize = 7;

fn main() {
    // Initialize logging
    env_logger::init();

    println!("sapling-mcts Connect Four");
    println!("=========================");
    println!();

    let mut game = ConnectFour::new();

    let params = MctsParams::default().with_duration(Duration::from_millis(1500));
    let mut engine: Engine<ConnectFour> = Engine::new(params);
    let mut pondering: Option<Thinking<ConnectFour>> = None;

    while game.terminal().is_none() {
        println!("{}", game);

        if game.human_to_move {
            // Human player
            print!("Your move (enter column 0-6): ");
            io::stdout().flush().unwrap();

            let mut input = String::new();
            io::stdin().read_line(&mut input).unwrap();

            let column = match input.trim().parse::<usize>() {
                Ok(col) if col < COLS => col,
                _ => {
                    println!("Invalid column! Please enter a number between 0 and 6.");
                    continue;
                }
            };

            if !game.can_drop(column) {
                println!("Column {} is full! Choose another column.", column);
                continue;
            }

            // The ponder ran while you were typing; its tree seeds the
            // engine's reply.
            if let Some(thinking) = pondering.take() {
                if let Err(e) = engine.finish_thinking(thinking) {
                    println!("Error: {}", e);
                    break;
                }
            }
            game = game.drop_piece(column);
        } else {
            // Engine player
            println!("Engine is thinking...");
            match engine.act(&game) {
                Ok(Some(column)) => {
                    println!("Engine drops into column {}", column);
                    game = game.drop_piece(column);
                    if game.terminal().is_none() {
                        pondering = Some(engine.think(&game));
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    println!("Error: {}", e);
                    break;
                }
            }
        }
    }

    println!("{}", game);
    match game.winner() {
        Some(true) => println!("You win!"),
        Some(false) => println!("The engine wins!"),
        None => println!("The game is a draw!"),
    }
}

/// Connect Four position. `true` cells belong to the human.
#[derive(Clone, PartialEq, Eq, Hash)]
struct ConnectFour {
    board: [[Option<bool>; COLS]; ROWS],
    human_to_move: bool,
}

impl ConnectFour {
    fn new() -> Self {
        ConnectFour {
            board: [[None; COLS]; ROWS],
            human_to_move: true,
        }
    }

    fn can_drop(&self, column: usize) -> bool {
        self.board[0][column].is_none()
    }

    /// Drops the mover's piece into `column`, which must not be full.
    fn drop_piece(&self, column: usize) -> Self {
        let mut next = self.clone();
        for row in (0..ROWS).rev() {
            if next.board[row][column].is_none() {
                next.board[row][column] = Some(self.human_to_move);
                break;
            }
        }
        next.human_to_move = !self.human_to_move;
        next
    }

    fn winner(&self) -> Option<bool> {
        let lines: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
        for row in 0..ROWS as isize {
            for col in 0..COLS as isize {
                let Some(owner) = self.board[row as usize][col as usize] else {
                    continue;
                };
                for (dr, dc) in lines {
                    let end_row = row + 3 * dr;
                    let end_col = col + 3 * dc;
                    if end_row >= ROWS as isize || end_col < 0 || end_col >= COLS as isize {
                        continue;
                    }
                    if (1..4).all(|k| {
                        self.board[(row + k * dr) as usize][(col + k * dc) as usize] == Some(owner)
                    }) {
                        return Some(owner);
                    }
                }
            }
        }
        None
    }
}

impl GamePosition for ConnectFour {
    type Label = usize;

    fn player(&self) -> Player {
        if self.human_to_move {
            Player::Maximizer
        } else {
            Player::Minimizer
        }
    }

    fn actions(&self) -> Vec<(usize, ConnectFour)> {
        if self.terminal().is_some() {
            return Vec::new();
        }
        (0..COLS)
            .filter(|&col| self.can_drop(col))
            .map(|col| (col, self.drop_piece(col)))
            .collect()
    }

    fn terminal(&self) -> Option<Value> {
        match self.winner() {
            Some(true) => Some(1.0),
            Some(false) => Some(-1.0),
            None if (0..COLS).all(|col| !self.can_drop(col)) => Some(0.0),
            None => None,
        }
    }
}

impl fmt::Display for ConnectFour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " 0 1 2 3 4 5 6")?;
        for row in 0..ROWS {
            for col in 0..COLS {
                let symbol = match self.board[row][col] {
                    Some(true) => "X",
                    Some(false) => "O",
                    None => ".",
                };
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        if self.human_to_move {
            writeln!(f, "\nYou (X) to move")?;
        } else {
            writeln!(f, "\nEngine (O) to move")?;
        }
        Ok(())
    }
}
