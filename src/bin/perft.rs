use clap::Parser;
use dama::{BoardState, Rules, Side};

#[derive(Parser, Debug)]
#[command(author, version, about = "Count successor-tree leaves from the starting position", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Let Dark move first instead of Light
    #[arg(long)]
    dark_first: bool,

    /// Allow quiet moves while a capture is available
    #[arg(long)]
    no_forced_captures: bool,
}

fn main() {
    let args = Args::parse();

    let first = if args.dark_first { Side::Dark } else { Side::Light };
    let rules = Rules {
        forced_captures: !args.no_forced_captures,
    };
    let state = BoardState::initial_layout(first, rules);

    println!(
        "Running perft, {} to move, forced captures {}",
        first, rules.forced_captures
    );

    for depth in 1..=args.depth {
        let start = std::time::Instant::now();
        let nodes = state.perft(depth);
        let duration = start.elapsed();
        println!(
            "perft({}) = {} nodes ({} ms)",
            depth,
            nodes,
            duration.as_millis()
        );
    }
}
