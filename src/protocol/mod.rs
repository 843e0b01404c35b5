pub mod parser;
pub mod session;

pub use parser::{parse_command, Command};
pub use session::{process_line, run_loop, Session};
