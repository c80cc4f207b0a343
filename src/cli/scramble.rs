use clap::Parser;
use cube_scrambler::{
    moves::format_moves, random_scramble, sparse::SPARSE_EXHAUSTIVE_DEPTH, ExhaustiveTable,
};
use rand::{rngs::StdRng, SeedableRng};
use tokio::task::spawn_blocking;

#[derive(Clone, Parser)]
pub struct ScrambleArgs {
    #[clap(short, long, value_parser, default_value_t = 20)]
    length: usize,

    #[clap(short, long, value_parser, default_value_t = 1)]
    count: usize,

    // Seed for reproducible scrambles; random if omitted.
    #[clap(short, long, value_parser)]
    seed: Option<u64>,

    // Only scrambles up to this length get their true distance computed,
    // since classification time grows quickly with depth.
    #[clap(long, value_parser, default_value_t = 9)]
    classify_up_to: usize,

    #[clap(short, long, value_parser, default_value_t = SPARSE_EXHAUSTIVE_DEPTH)]
    table_depth: u8,
}

pub async fn scramble(cli: ScrambleArgs) -> anyhow::Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let scrambles = (0..cli.count)
        .map(|_| random_scramble(&mut rng, cli.length))
        .collect::<Vec<_>>();

    let limits = super::interruptible_limits(None);
    let oracle = if cli.length <= cli.classify_up_to {
        let limits = limits.clone();
        let table_depth = cli.table_depth;
        Some(spawn_blocking(move || ExhaustiveTable::build(table_depth, &limits)).await??)
    } else {
        None
    };

    for scramble in scrambles {
        let solution_start = scramble
            .solution_start
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_owned());
        match &oracle {
            Some(table) => println!(
                "{}  (distance {}, solution starts with {})",
                format_moves(&scramble.moves),
                table.classify(&scramble.state, &limits)?,
                solution_start
            ),
            None => println!(
                "{}  (solution starts with {})",
                format_moves(&scramble.moves),
                solution_start
            ),
        }
    }
    Ok(())
}
