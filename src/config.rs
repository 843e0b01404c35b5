//! Session configuration
//!
//! Everything a session needs is carried by an explicit [`GameConfig`]:
//! who moves first, which side the engine plays, the capture rule, search
//! strength and undo memory. Options can also be applied by name, the way the
//! text protocol's `setoption` command does.

use tracing::warn;

use crate::board::{Rules, Side};
use crate::error::ConfigError;
use crate::eval::Heuristic;
use crate::search::{SearchParams, MAX_SEARCH_DEPTH};

/// Named search strengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    OnFire,
}

impl Difficulty {
    /// Search depth for this level
    pub const fn depth(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 5,
            Difficulty::Hard => 8,
            Difficulty::OnFire => 12,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "onfire" | "on-fire" | "on_fire" => Some(Difficulty::OnFire),
            _ => None,
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Side with the first move
    pub first_mover: Side,

    /// Side played by the engine; the human plays the other one
    pub computer: Side,

    /// Captures are mandatory when available
    pub forced_captures: bool,

    /// Depth of the engine's search
    pub search_depth: u8,

    /// Leaf heuristic (mode 1 or 2)
    pub eval_mode: Heuristic,

    /// Depth of hint searches made for the human
    pub hint_depth: u8,

    /// Maximum number of states kept for undo (current state included)
    pub undo_capacity: usize,

    /// Minimum delay before an engine move is delivered, in milliseconds
    pub min_pause_ms: u64,

    /// Tie-break seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_mover: Side::Light,
            computer: Side::Dark,
            forced_captures: true,
            search_depth: Difficulty::Hard.depth(),
            eval_mode: Heuristic::Difference,
            hint_depth: 10,
            undo_capacity: 20,
            min_pause_ms: 800,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_mover(mut self, side: Side) -> Self {
        self.first_mover = side;
        self
    }

    pub fn computer(mut self, side: Side) -> Self {
        self.computer = side;
        self
    }

    pub fn forced_captures(mut self, enable: bool) -> Self {
        self.forced_captures = enable;
        self
    }

    pub fn search_depth(mut self, depth: u8) -> Self {
        self.search_depth = depth.min(MAX_SEARCH_DEPTH);
        self
    }

    pub fn difficulty(self, level: Difficulty) -> Self {
        self.search_depth(level.depth())
    }

    pub fn eval_mode(mut self, heuristic: Heuristic) -> Self {
        self.eval_mode = heuristic;
        self
    }

    pub fn hint_depth(mut self, depth: u8) -> Self {
        self.hint_depth = depth.min(MAX_SEARCH_DEPTH);
        self
    }

    /// Set undo memory; at least two states are always kept
    pub fn undo_capacity(mut self, capacity: usize) -> Self {
        self.undo_capacity = capacity.max(2);
        self
    }

    pub fn min_pause_ms(mut self, ms: u64) -> Self {
        self.min_pause_ms = ms;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn human(&self) -> Side {
        self.computer.opposite()
    }

    pub fn rules(&self) -> Rules {
        Rules {
            forced_captures: self.forced_captures,
        }
    }

    /// Parameters for the engine's own moves
    pub fn search_params(&self) -> SearchParams {
        SearchParams::new()
            .depth(self.search_depth)
            .heuristic(self.eval_mode)
            .seed(self.seed)
    }

    /// Parameters for hint searches
    pub fn hint_params(&self) -> SearchParams {
        SearchParams::new()
            .depth(self.hint_depth)
            .heuristic(self.eval_mode)
            .seed(self.seed)
    }

    /// Apply an option by name (names are case-insensitive)
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let key = name.to_ascii_lowercase();
        let known = matches!(
            key.as_str(),
            "firstmover"
                | "computer"
                | "forcedcaptures"
                | "depth"
                | "difficulty"
                | "eval"
                | "hintdepth"
                | "undocapacity"
                | "minpause"
                | "seed"
        );
        if !known {
            warn!("rejected unknown option {}", name);
            return Err(ConfigError::UnknownOption(name.to_string()));
        }
        let raw = value.ok_or_else(|| ConfigError::MissingValue {
            name: name.to_string(),
        })?;
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
        };

        match key.as_str() {
            "firstmover" => self.first_mover = Side::from_name(raw).ok_or_else(invalid)?,
            "computer" => self.computer = Side::from_name(raw).ok_or_else(invalid)?,
            "forcedcaptures" => self.forced_captures = parse_bool(raw).ok_or_else(invalid)?,
            "depth" => {
                let depth: u8 = raw.parse().map_err(|_| invalid())?;
                if depth > MAX_SEARCH_DEPTH {
                    return Err(invalid());
                }
                self.search_depth = depth;
            }
            "difficulty" => {
                self.search_depth = Difficulty::from_name(raw).ok_or_else(invalid)?.depth();
            }
            "eval" => {
                let mode: u8 = raw.parse().map_err(|_| invalid())?;
                self.eval_mode = Heuristic::from_mode(mode).ok_or_else(invalid)?;
            }
            "hintdepth" => {
                let depth: u8 = raw.parse().map_err(|_| invalid())?;
                if depth > MAX_SEARCH_DEPTH {
                    return Err(invalid());
                }
                self.hint_depth = depth;
            }
            "undocapacity" => {
                let capacity: usize = raw.parse().map_err(|_| invalid())?;
                if capacity < 2 {
                    return Err(invalid());
                }
                self.undo_capacity = capacity;
            }
            "minpause" => self.min_pause_ms = raw.parse().map_err(|_| invalid())?,
            _ => {
                // seed
                self.seed = if raw.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(raw.parse().map_err(|_| invalid())?)
                };
            }
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
