use clap::Parser;
use cube_scrambler::{
    dataset::labeled_samples,
    sparse::{attempt, LevelSampler, SPARSE_EXHAUSTIVE_DEPTH},
    ExhaustiveTable, FeatureKind, MoveFilter, SearchLimits, SearchTable, SparseConfig,
};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use std::{sync::Arc, time::Instant};
use tokio::{
    fs::File,
    io::{AsyncWriteExt, BufWriter},
    sync::mpsc::channel,
    task::spawn_blocking,
};

#[derive(Clone, Parser)]
pub struct GenerateArgs {
    #[clap(value_parser)]
    output_path: String,

    #[clap(short, long, value_parser, default_value_t = 8)]
    max_depth: u8,

    // Maximum number of states written per depth.
    #[clap(short, long, value_parser, default_value_t = 10000)]
    width: usize,

    #[clap(short, long, value_parser, default_value_t = SPARSE_EXHAUSTIVE_DEPTH)]
    exhaustive_depth: u8,

    // Give up on a depth after width * attempts_per_sample failed draws.
    #[clap(long, value_parser, default_value_t = 1000)]
    attempts_per_sample: u64,

    #[clap(long, value_enum, default_value_t = MoveFilter::SameFace)]
    filter: MoveFilter,

    #[clap(short, long, value_enum, default_value_t = FeatureKind::Stickers)]
    features: FeatureKind,

    #[clap(short, long, value_parser, default_value_t = 0)]
    seed: u64,

    #[clap(long, value_parser)]
    max_states: Option<usize>,

    #[clap(short = 'j', long, value_parser, default_value_t = 4)]
    workers: usize,
}

pub async fn generate(cli: GenerateArgs) -> anyhow::Result<()> {
    let limits = super::interruptible_limits(cli.max_states);
    let config = SparseConfig {
        max_depth: cli.max_depth,
        width: cli.width,
        exhaustive_depth: cli.exhaustive_depth.min(cli.max_depth),
        attempts_per_sample: cli.attempts_per_sample,
        filter: cli.filter,
    };
    let mut rng = StdRng::seed_from_u64(cli.seed);

    println!(
        "enumerating all states up to depth {}...",
        config.exhaustive_depth
    );
    let oracle = {
        let limits = limits.clone();
        let depth = config.exhaustive_depth;
        Arc::new(spawn_blocking(move || ExhaustiveTable::build(depth, &limits)).await??)
    };

    let mut sparse_part = SearchTable::new();
    for depth in config.exhaustive_depth + 1..=config.max_depth {
        println!("sampling states at depth {}...", depth);
        let level =
            sample_level(oracle.clone(), depth, &config, &limits, cli.workers, &mut rng).await?;
        sparse_part.merge(level);
    }

    // Workers may still hold a reference for a moment after their last send.
    let mut table = match Arc::try_unwrap(oracle) {
        Ok(x) => x.into_table(),
        Err(x) => x.table().clone(),
    };
    table.merge(sparse_part);
    let table = table.prune(config.width, &mut rng);

    println!("writing {} samples to {}...", table.len(), cli.output_path);
    write_samples(&cli.output_path, &table, cli.features).await?;

    for (depth, count) in table.depth_counts() {
        println!("depth {}: {} states", depth, count);
    }
    Ok(())
}

// Fill one level using a pool of blocking workers. Each worker owns an RNG
// split off from the main one and reports every attempt, successful or not,
// so the attempt budget is enforced in one place.
async fn sample_level(
    oracle: Arc<ExhaustiveTable>,
    depth: u8,
    config: &SparseConfig,
    limits: &SearchLimits,
    workers: usize,
    rng: &mut StdRng,
) -> anyhow::Result<SearchTable> {
    let start = Instant::now();
    let (results_tx, mut results_rx) = channel(1000);

    for _ in 0..workers.max(1) {
        let results_tx_clone = results_tx.clone();
        let oracle_clone = oracle.clone();
        let limits_clone = limits.clone();
        let filter = config.filter;
        let mut worker_rng = StdRng::from_rng(&mut *rng)?;
        spawn_blocking(move || loop {
            let outcome = attempt(&mut worker_rng, &oracle_clone, depth, filter, &limits_clone);
            let failed = outcome.is_err();
            if results_tx_clone.blocking_send(outcome).is_err() || failed {
                return;
            }
        });
    }
    // Make sure we don't block on reading results.
    drop(results_tx);

    let mut sampler = LevelSampler::new(depth, config.width, config.max_attempts());
    let report_every = (config.width / 10).max(1);
    while !sampler.is_full() {
        let outcome = results_rx
            .recv()
            .await
            .ok_or_else(|| anyhow::Error::msg("sampling workers exited early"))??;
        let before = sampler.found();
        sampler.record(outcome)?;
        if sampler.found() > before && sampler.found() % report_every == 0 {
            info!(
                "depth {}: {}/{} samples after {} attempts",
                depth,
                sampler.found(),
                config.width,
                sampler.attempts()
            );
        }
    }

    // Tell the workers to stop sending results.
    drop(results_rx);

    println!(
        "depth {}: accepted {} of {} attempts ({:.2?})",
        depth,
        sampler.found(),
        sampler.attempts(),
        start.elapsed()
    );
    Ok(sampler.into_table())
}

async fn write_samples(path: &str, table: &SearchTable, kind: FeatureKind) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(File::create(path).await?);
    for sample in labeled_samples(table, kind) {
        writer
            .write_all((serde_json::to_string(&sample)? + "\n").as_bytes())
            .await?;
    }
    writer.flush().await?;
    Ok(())
}
