//! Interactive tic-tac-toe against the search engine.
//!
//! You play X (the Maximizer); the engine plays O and carries its tree over
//! from move to move.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use sapling_mcts::{Engine, GamePosition, MctsParams, Player, Value};

fn main() {
    // Initialize logging
    env_logger::init();

    println!("sapling-mcts Tic-Tac-Toe");
    println!("========================");
    println!();

    let mut game = TicTacToe::new();

    let params = MctsParams::default().with_duration(Duration::from_millis(800));
    let mut engine: Engine<TicTacToe> = Engine::new(params);

    while game.terminal().is_none() {
        println!("{}", game);

        if game.to_move == Mark::X {
            // Human player (X)
            print!("Your move (enter row column, e.g. '1 2'): ");
            io::stdout().flush().unwrap();

            let mut input = String::new();
            io::stdin().read_line(&mut input).unwrap();

            let coords: Vec<usize> = input
                .trim()
                .split_whitespace()
                .filter_map(|s| s.parse::<usize>().ok())
                .collect();

            if coords.len() != 2 || coords[0] > 2 || coords[1] > 2 {
                println!("Invalid move! Enter row and column (0-2).");
                continue;
            }

            let cell = coords[0] * 3 + coords[1];
            if game.board[cell].is_some() {
                println!("Illegal move! Try again.");
                continue;
            }

            game = game.play(cell);
        } else {
            // Engine player (O)
            println!("Engine is thinking...");
            match engine.act(&game) {
                Ok(Some(cell)) => {
                    println!("Engine plays row {}, col {}", cell / 3, cell % 3);
                    game = game.play(cell);
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
        Some(Mark::X) => println!("You win!"),
        Some(Mark::O) => println!("The engine wins!"),
        None => println!("The game is a draw!"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Mark {
    X,
    O,
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct TicTacToe {
    board: [Option<Mark>; 9],
    to_move: Mark,
}

impl TicTacToe {
    fn new() -> Self {
        TicTacToe {
            board: [None; 9],
            to_move: Mark::X,
        }
    }

    fn play(&self, cell: usize) -> Self {
        let mut next = self.clone();
        next.board[cell] = Some(self.to_move);
        next.to_move = match self.to_move {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        };
        next
    }

    fn winner(&self) -> Option<Mark> {
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8],
            [2, 4, 6],
        ];
        for line in LINES {
            if self.board[line[0]].is_some()
                && self.board[line[0]] == self.board[line[1]]
                && self.board[line[0]] == self.board[line[2]]
            {
                return self.board[line[0]];
            }
        }
        None
    }
}

impl GamePosition for TicTacToe {
    type Label = usize;

    fn player(&self) -> Player {
        match self.to_move {
            Mark::X => Player::Maximizer,
            Mark::O => Player::Minimizer,
        }
    }

    fn actions(&self) -> Vec<(usize, TicTacToe)> {
        if self.terminal().is_some() {
            return Vec::new();
        }
        (0..9)
            .filter(|&cell| self.board[cell].is_none())
            .map(|cell| (cell, self.play(cell)))
            .collect()
    }

    fn terminal(&self) -> Option<Value> {
        match self.winner() {
            Some(Mark::X) => Some(1.0),
            Some(Mark::O) => Some(-1.0),
            None if self.board.iter().all(|c| c.is_some()) => Some(0.0),
            None => None,
        }
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2")?;
        for row in 0..3 {
            write!(f, "{} ", row)?;
            for col in 0..3 {
                let symbol = match self.board[row * 3 + col] {
                    Some(Mark::X) => "X",
                    Some(Mark::O) => "O",
                    None => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "\n{:?} to move", self.to_move)?;
        Ok(())
    }
}
