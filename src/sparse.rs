use crate::{
    cube::CubeState,
    error::{Result, SearchError},
    exhaustive::ExhaustiveTable,
    limits::SearchLimits,
    scramble::{random_moves, MoveFilter},
    table::SearchTable,
};
use log::{debug, info};
use rand::Rng;
use rustc_hash::FxHashSet;
use std::time::Instant;

// Levels up to this depth are enumerated outright.
pub const SPARSE_EXHAUSTIVE_DEPTH: u8 = 5;

#[derive(Clone, Debug)]
pub struct SparseConfig {
    pub max_depth: u8,
    // Maximum number of states kept per depth.
    pub width: usize,
    pub exhaustive_depth: u8,
    // Each level may spend width * attempts_per_sample random sequences
    // before giving up.
    pub attempts_per_sample: u64,
    pub filter: MoveFilter,
}

impl Default for SparseConfig {
    fn default() -> Self {
        SparseConfig {
            max_depth: 8,
            width: 10000,
            exhaustive_depth: SPARSE_EXHAUSTIVE_DEPTH,
            attempts_per_sample: 1000,
            filter: MoveFilter::SameFace,
        }
    }
}

impl SparseConfig {
    pub fn new(max_depth: u8, width: usize) -> SparseConfig {
        SparseConfig {
            max_depth,
            width,
            ..Default::default()
        }
    }

    pub fn max_attempts(&self) -> u64 {
        (self.width as u64).saturating_mul(self.attempts_per_sample)
    }
}

// Draw one random sequence of exactly `depth` moves and return its state if
// its true distance is also `depth`.
pub fn attempt<R: Rng>(
    rng: &mut R,
    oracle: &ExhaustiveTable,
    depth: u8,
    filter: MoveFilter,
    limits: &SearchLimits,
) -> Result<Option<CubeState>> {
    let moves = random_moves(rng, depth as usize, filter);
    let state = CubeState::solved().apply_all(&moves);
    if oracle.classify(&state, limits)? == depth {
        Ok(Some(state))
    } else {
        Ok(None)
    }
}

// Collects distinct states for one depth and enforces the attempt budget.
#[derive(Clone, Debug)]
pub struct LevelSampler {
    depth: u8,
    wanted: usize,
    max_attempts: u64,
    attempts: u64,
    accepted: FxHashSet<CubeState>,
}

impl LevelSampler {
    pub fn new(depth: u8, wanted: usize, max_attempts: u64) -> LevelSampler {
        LevelSampler {
            depth,
            wanted,
            max_attempts,
            attempts: 0,
            accepted: FxHashSet::default(),
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn found(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_full(&self) -> bool {
        self.accepted.len() >= self.wanted
    }

    // Record the outcome of one attempt. Fails once the budget is spent
    // without filling the level.
    pub fn record(&mut self, outcome: Option<CubeState>) -> Result<()> {
        self.attempts += 1;
        if let Some(state) = outcome {
            if !self.is_full() {
                self.accepted.insert(state);
            }
        }
        if !self.is_full() && self.attempts >= self.max_attempts {
            return Err(SearchError::SampleStarvation {
                depth: self.depth,
                found: self.found(),
                wanted: self.wanted,
                attempts: self.attempts,
            });
        }
        Ok(())
    }

    pub fn into_table(self) -> SearchTable {
        let depth = self.depth;
        self.accepted.into_iter().map(|s| (s, depth)).collect()
    }
}

// Fill one level with `config.width` states of exactly `depth` moves.
pub fn sample_level<R: Rng>(
    rng: &mut R,
    oracle: &ExhaustiveTable,
    depth: u8,
    config: &SparseConfig,
    limits: &SearchLimits,
) -> Result<SearchTable> {
    let start = Instant::now();
    let mut sampler = LevelSampler::new(depth, config.width, config.max_attempts());
    while !sampler.is_full() {
        limits.check()?;
        let outcome = attempt(rng, oracle, depth, config.filter, limits)?;
        sampler.record(outcome)?;
    }
    info!(
        "sparse search: depth {} has {} states after {} attempts ({:.2?})",
        depth,
        sampler.found(),
        sampler.attempts(),
        start.elapsed()
    );
    Ok(sampler.into_table())
}

// Sample up to `width` states at every depth up to `max_depth`. Shallow
// levels come from an exhaustive search; deeper levels are filled with
// random sequences whose true distance matches their length.
pub fn sparse<R: Rng>(
    config: &SparseConfig,
    rng: &mut R,
    limits: &SearchLimits,
) -> Result<SearchTable> {
    if config.max_depth <= config.exhaustive_depth {
        let table = ExhaustiveTable::build(config.max_depth, limits)?;
        return Ok(table.table().prune(config.width, rng));
    }

    let oracle = ExhaustiveTable::build(config.exhaustive_depth, limits)?;
    let mut sparse_part = SearchTable::new();
    for depth in config.exhaustive_depth + 1..=config.max_depth {
        sparse_part.merge(sample_level(rng, &oracle, depth, config, limits)?);
    }
    debug!("sparse part has {} states", sparse_part.len());

    let mut res = oracle.into_table();
    res.merge(sparse_part);
    Ok(res.prune(config.width, rng))
}
