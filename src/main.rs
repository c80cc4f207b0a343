mod cli;

use clap::Parser;
use cli::{distance, generate, scramble};

#[derive(Parser, Clone)]
#[clap(author, version, about, long_about = None)]
enum Cli {
    /// Build a labeled dataset of cube states.
    Generate {
        #[clap(flatten)]
        args: generate::GenerateArgs,
    },
    /// Compute the true distance of a move sequence.
    Distance {
        #[clap(flatten)]
        args: distance::DistanceArgs,
    },
    /// Print random scrambles.
    Scramble {
        #[clap(flatten)]
        args: scramble::ScrambleArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli {
        Cli::Generate { args } => generate::generate(args).await,
        Cli::Distance { args } => distance::distance(args).await,
        Cli::Scramble { args } => scramble::scramble(args).await,
    }
}
