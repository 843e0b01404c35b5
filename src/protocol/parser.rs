//! Command parser for the text protocol
//!
//! One command per line, whitespace separated. Anything that cannot be parsed
//! becomes [`Command::Unknown`] carrying the original line.

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    NewGame,
    SetOption {
        name: String,
        value: Option<String>,
    },
    Board,
    Status,
    Moves {
        square: usize,
    },
    Movable,
    Move {
        square: usize,
        dx: i32,
        dy: i32,
    },
    Play {
        from: usize,
        to: usize,
    },
    Go,
    Hint,
    Undo,
    Quit,
    Unknown(String),
}

/// Parse a command from a line (simple tokenizer)
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return Command::Unknown(String::new());
    };
    let unknown = || Command::Unknown(trimmed.to_string());

    match (head, &parts[1..]) {
        ("newgame", []) => Command::NewGame,
        ("board", []) => Command::Board,
        ("status", []) => Command::Status,
        ("movable", []) => Command::Movable,
        ("go", []) => Command::Go,
        ("hint", []) => Command::Hint,
        ("undo", []) => Command::Undo,
        ("quit", []) => Command::Quit,
        ("moves", [square]) => square
            .parse()
            .map(|square| Command::Moves { square })
            .unwrap_or_else(|_| unknown()),
        ("move", [square, dx, dy]) => match (square.parse(), dx.parse(), dy.parse()) {
            (Ok(square), Ok(dx), Ok(dy)) => Command::Move { square, dx, dy },
            _ => unknown(),
        },
        ("play", [from, to]) => match (from.parse(), to.parse()) {
            (Ok(from), Ok(to)) => Command::Play { from, to },
            _ => unknown(),
        },
        ("setoption", rest) => parse_setoption(rest).unwrap_or_else(unknown),
        _ => unknown(),
    }
}

// expected: setoption name <name> [value <val>]
fn parse_setoption(parts: &[&str]) -> Option<Command> {
    if parts.first() != Some(&"name") {
        return None;
    }
    let value_at = parts.iter().position(|&s| s == "value");
    let name_parts = &parts[1..value_at.unwrap_or(parts.len())];
    if name_parts.is_empty() {
        return None;
    }
    let value = value_at
        .map(|i| parts[i + 1..].join(" "))
        .filter(|v| !v.is_empty());
    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}
