use clap::Parser;
use cube_scrambler::{
    moves::{format_moves, parse_moves},
    sparse::SPARSE_EXHAUSTIVE_DEPTH,
    CubeState, ExhaustiveTable,
};
use log::warn;
use tokio::task::spawn_blocking;

// Each move beyond the table depth multiplies the classifier's work by about 15.
const SLOW_EXTRA_MOVES: usize = 4;

#[derive(Clone, Parser)]
pub struct DistanceArgs {
    // A move sequence such as "R U R' U'".
    #[clap(value_parser)]
    moves: String,

    #[clap(short, long, value_parser, default_value_t = SPARSE_EXHAUSTIVE_DEPTH)]
    table_depth: u8,

    #[clap(long, value_parser)]
    max_states: Option<usize>,
}

pub async fn distance(cli: DistanceArgs) -> anyhow::Result<()> {
    let moves = parse_moves(&cli.moves)?;
    let state = CubeState::solved().apply_all(&moves);
    let limits = super::interruptible_limits(cli.max_states);
    let table_depth = cli.table_depth;
    if moves.len() > table_depth as usize + SLOW_EXTRA_MOVES {
        warn!(
            "{} moves against a depth {} table may take a very long time (Ctrl-C to stop)",
            moves.len(),
            table_depth
        );
    }

    println!("enumerating all states up to depth {}...", table_depth);
    let depth = spawn_blocking(move || {
        let oracle = ExhaustiveTable::build(table_depth, &limits)?;
        oracle.classify(&state, &limits)
    })
    .await??;

    println!(
        "{} ({} moves): distance {}",
        format_moves(&moves),
        moves.len(),
        depth
    );
    Ok(())
}
