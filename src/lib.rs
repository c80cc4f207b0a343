// Enumerating and sampling Rubik's cube states, each labeled with its true
// distance from the solved state in the half-turn metric.
//
// exhaustive() is ground truth up to a small depth. sparse() extends it to
// deeper levels by sampling random move sequences and checking their true
// distance with classify_depth(). Tables can be pruned to a fixed number of
// states per depth and turned into feature vectors for learners.

pub mod classify;
pub mod cube;
pub mod dataset;
pub mod error;
pub mod exhaustive;
pub mod limits;
pub mod moves;
pub mod scramble;
pub mod sparse;
pub mod table;
pub mod vectorize;

pub use classify::{classify_depth, GODS_NUMBER};
pub use cube::{CubeState, PackedCube, Stickers};
pub use error::{Result, SearchError};
pub use exhaustive::{exhaustive, ExhaustiveTable};
pub use limits::SearchLimits;
pub use moves::{Face, Move, Turn};
pub use scramble::{random_moves, random_scramble, MoveFilter, Scramble};
pub use sparse::{sparse, SparseConfig};
pub use table::{prune, SearchTable};
pub use vectorize::{sticker_vector, FeatureKind};
