//! Line-oriented session loop driving one [`Game`]

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Instant;

use tracing::{info, warn};

use super::parser::{parse_command, Command};
use crate::board::{BoardState, Side};
use crate::config::GameConfig;
use crate::error::ProtocolError;
use crate::game::{Game, MoveOutcome};
use crate::time::Pacing;

pub struct Session {
    game: Game,
    // applied on the next `newgame`
    options: GameConfig,
    running: bool,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: Game::new(config.clone()),
            options: config,
            running: true,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle_command(&mut self, cmd: Command) -> Vec<String> {
        let mut res = Vec::new();
        match cmd {
            Command::NewGame => {
                self.game.restart(self.options.clone());
                res.push("ok".to_string());
            }
            Command::SetOption { name, value } => {
                match self.options.set_option(&name, value.as_deref()) {
                    Ok(()) => res.push("ok".to_string()),
                    Err(e) => {
                        warn!("setoption failed: {}", e);
                        res.push(format!("error {}", e));
                    }
                }
            }
            Command::Board => {
                res.extend(self.game.state().to_string().lines().map(str::to_string));
                res.push(format!("turn {}", self.game.turn()));
            }
            Command::Status => {
                let state = self.game.state();
                res.push(format!("turn {}", state.turn()));
                res.push(format!(
                    "pieces {} {}",
                    state.piece_count(Side::Dark),
                    state.piece_count(Side::Light)
                ));
                res.push(format!(
                    "kings {} {}",
                    state.king_count(Side::Dark),
                    state.king_count(Side::Light)
                ));
                if let Some((from, to)) = self.game.last_move() {
                    res.push(format!("lastmove {} {}", from, to));
                }
                if let Some(message) = self.game.game_over_message() {
                    res.push(format!("gameover {}", message));
                }
            }
            Command::Moves { square } => match self.game.legal_destinations(square) {
                Ok(destinations) if destinations.is_empty() => {
                    res.push(format!("outcome {}", self.game.blocked_feedback()));
                }
                Ok(destinations) => res.push(format!("destinations {}", join(&destinations))),
                Err(e) => res.push(format!("info string error: {}", e)),
            },
            Command::Movable => {
                res.push(format!("movable {}", join(&self.game.movable_squares())));
            }
            Command::Move { square, dx, dy } => {
                let outcome = self.game.attempt_move(square, dx, dy);
                res.push(format!("outcome {}", outcome));
            }
            Command::Play { from, to } => {
                let chosen = self.find_successor(from, to);
                let outcome = match chosen {
                    Some(state) => self.game.attempt_successor(&state),
                    None => MoveOutcome::UnknownInvalid,
                };
                res.push(format!("outcome {}", outcome));
            }
            Command::Go => self.engine_reply(&mut res),
            Command::Hint => match self.game.hint() {
                Ok(Some(state)) => res.push(format!("hint {}", describe(&state))),
                Ok(None) => res.push("hint none".to_string()),
                Err(e) => res.push(format!("info string error: {}", e)),
            },
            Command::Undo => {
                if self.game.undo() {
                    res.push("ok".to_string());
                } else {
                    res.push("info string nothing to undo".to_string());
                }
            }
            Command::Quit => {
                self.running = false;
            }
            Command::Unknown(s) => {
                res.push(format!("info string unknown command: {}", s));
            }
        }
        res
    }

    /// Enumerated successor of the side to move going from `from` to `to`
    fn find_successor(&self, from: usize, to: usize) -> Option<BoardState> {
        self.game
            .valid_moves(from)
            .ok()?
            .into_iter()
            .find(|s| s.to_square() == Some(to))
    }

    /// Play engine plies until the turn leaves the engine, holding each
    /// computed move back for the configured minimum pause.
    fn engine_reply(&mut self, res: &mut Vec<String>) {
        let pacing = Pacing::new(self.game.config().min_pause_ms);
        let mut played = false;
        loop {
            let started = Instant::now();
            match self.game.request_ai_move() {
                Ok(true) => {
                    let delay = pacing.delay_after(started.elapsed());
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    res.push(format!("bestmove {}", describe(self.game.state())));
                    played = true;
                }
                Ok(false) => break,
                Err(e) => {
                    res.push(format!("info string error: {}", e));
                    return;
                }
            }
        }
        if !played {
            res.push("info string not the engine's turn".to_string());
        }
        if let Some(message) = self.game.game_over_message() {
            res.push(format!("gameover {}", message));
        }
    }
}

fn describe(state: &BoardState) -> String {
    match (state.from_square(), state.to_square()) {
        (Some(from), Some(to)) => format!("{} {}", from, to),
        _ => "none".to_string(),
    }
}

fn join(squares: &[usize]) -> String {
    squares
        .iter()
        .map(|sq| sq.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn process_line(line: &str, session: &mut Session) -> Vec<String> {
    session.handle_command(parse_command(line))
}

/// Run the protocol over stdin/stdout until `quit` or end of input
pub fn run_loop(config: GameConfig) -> Result<(), ProtocolError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    let mut session = Session::new(config);
    let mut buf = String::new();

    while session.is_running() {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            continue;
        }
        for r in process_line(line, &mut session) {
            writeln!(writer, "{}", r)?;
        }
        // replies must reach the front end right away
        writer.flush()?;
    }

    info!("session closed");
    Ok(())
}
