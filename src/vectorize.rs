// Numeric representations of cube states for external learners.

use crate::cube::{CubeState, Stickers};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

pub const STICKER_FEATURES: usize = 8 * 6 * 6;
pub const SLOT_SCORE_FEATURES: usize = 12 * 8 + 8 * 7 + 12 * 11;
pub const CUBIE_FEATURES: usize = 54 + 12 + 8 + 4;

// Marginal statistics of a single one-hot color indicator. The deviation is
// an empirical population value, slightly above sqrt(5/36).
const STICKER_MEAN: f64 = 1.0 / 6.0;
const STICKER_VARIANCE: f64 = 0.13937;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum FeatureKind {
    // Standardized one-hot colors of the 48 moving stickers.
    #[default]
    Stickers,
    // One-hot colors with +1.0 / -0.2 placeholders.
    RawStickers,
    // Pairwise closeness-to-solved scores.
    SlotScores,
    // Sticker colors, piece ids and summary counts.
    Cubies,
}

impl FeatureKind {
    pub fn dimension(self) -> usize {
        match self {
            FeatureKind::Stickers | FeatureKind::RawStickers => STICKER_FEATURES,
            FeatureKind::SlotScores => SLOT_SCORE_FEATURES,
            FeatureKind::Cubies => CUBIE_FEATURES,
        }
    }

    pub fn vectorize(self, state: &CubeState) -> Array1<f64> {
        match self {
            FeatureKind::Stickers => sticker_vector(state),
            FeatureKind::RawStickers => raw_sticker_vector(state),
            FeatureKind::SlotScores => slot_scores(state),
            FeatureKind::Cubies => cubie_features(state),
        }
    }
}

pub fn sticker_vector(state: &CubeState) -> Array1<f64> {
    let stddev = STICKER_VARIANCE.sqrt();
    one_hot_stickers(
        &state.stickers(),
        (1.0 - STICKER_MEAN) / stddev,
        (0.0 - STICKER_MEAN) / stddev,
    )
}

pub fn raw_sticker_vector(state: &CubeState) -> Array1<f64> {
    one_hot_stickers(&state.stickers(), 1.0, -0.2)
}

// Six entries per non-center sticker, `on` at the sticker's color and `off`
// everywhere else.
fn one_hot_stickers(stickers: &Stickers, on: f64, off: f64) -> Array1<f64> {
    let mut res = Array1::from_elem(STICKER_FEATURES, off);
    for (i, color) in stickers
        .iter()
        .enumerate()
        .filter(|(i, _)| !Stickers::is_center(*i))
        .map(|(_, color)| color)
        .enumerate()
    {
        res[i * 6 + (color as usize - 1)] = on;
    }
    res
}

// One score per pair of pieces: edge/corner pairs, then ordered corner pairs,
// then ordered edge pairs. A pair scores higher the closer both pieces are to
// being solved.
pub fn slot_scores(state: &CubeState) -> Array1<f64> {
    let corner_score = |i: usize| {
        let c = state.corner(i);
        let mut score = 1.0;
        if c.piece as usize == i {
            score *= 8.0;
        }
        if c.orientation == 0 {
            score *= 3.0;
        }
        score
    };
    let edge_score = |i: usize| {
        let e = state.edge(i);
        let mut score = 1.0;
        if e.piece as usize == i {
            score *= 12.0;
        }
        if !e.flip {
            score *= 2.0;
        }
        score
    };

    let mut res = Vec::with_capacity(SLOT_SCORE_FEATURES);
    for edge in 0..12 {
        for corner in 0..8 {
            res.push(edge_score(edge) * corner_score(corner));
        }
    }
    for c1 in 0..8 {
        for c2 in (0..8).filter(|x| *x != c1) {
            res.push(corner_score(c1) * corner_score(c2));
        }
    }
    // Each edge is scored against its own slot, so (e1, e2) and (e2, e1) match.
    for e1 in 0..12 {
        for e2 in (0..12).filter(|x| *x != e1) {
            res.push(edge_score(e1) * edge_score(e2));
        }
    }
    Array1::from(res)
}

pub fn cubie_features(state: &CubeState) -> Array1<f64> {
    let mut res = Vec::with_capacity(CUBIE_FEATURES);
    res.extend(state.stickers().iter().map(|x| x as f64));
    res.extend(state.edges().iter().map(|e| e.piece as f64));
    res.extend(state.corners().iter().map(|c| c.piece as f64));
    res.push(state.flipped_edges() as f64);
    res.push(state.oriented_corners() as f64);
    res.push(state.positioned_edges() as f64);
    res.push(state.positioned_corners() as f64);
    Array1::from(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{parse_moves, Move};

    const ALL_KINDS: [FeatureKind; 4] = [
        FeatureKind::Stickers,
        FeatureKind::RawStickers,
        FeatureKind::SlotScores,
        FeatureKind::Cubies,
    ];

    #[test]
    fn dimensions() {
        let cube = CubeState::solved().apply_all(&parse_moves("R U2 F' L D B2").unwrap());
        for kind in ALL_KINDS {
            assert_eq!(kind.vectorize(&cube).len(), kind.dimension());
            assert_eq!(kind.vectorize(&CubeState::solved()).len(), kind.dimension());
        }
        assert_eq!(STICKER_FEATURES, 288);
        assert_eq!(SLOT_SCORE_FEATURES, 284);
        assert_eq!(CUBIE_FEATURES, 78);
    }

    #[test]
    fn sticker_vector_values() {
        let stddev = 0.13937f64.sqrt();
        let on = (1.0 - 1.0 / 6.0) / stddev;
        let off = (0.0 - 1.0 / 6.0) / stddev;
        for m in Move::ALL {
            let v = sticker_vector(&CubeState::solved().apply(m));
            for chunk in v.as_slice().unwrap().chunks(6) {
                assert_eq!(chunk.iter().filter(|x| (**x - on).abs() < 1e-12).count(), 1);
                assert_eq!(chunk.iter().filter(|x| (**x - off).abs() < 1e-12).count(), 5);
            }
        }
    }

    #[test]
    fn solved_vector_is_canonical() {
        let a = sticker_vector(&CubeState::solved());
        let b = sticker_vector(&CubeState::solved().apply_all(&parse_moves("R R'").unwrap()));
        assert_eq!(a, b);
        // The first sticker is on the U face, whose color is index 0.
        assert!(a[0] > 0.0);
        assert!(a[1] < 0.0);
    }

    #[test]
    fn raw_sticker_values() {
        let v = raw_sticker_vector(&CubeState::solved().apply(Move::ALL[5]));
        let total: f64 = v.iter().sum();
        // 48 stickers with one +1.0 and five -0.2 entries each.
        assert!((total - 48.0 * (1.0 - 5.0 * 0.2)).abs() < 1e-9);
        assert!(v.iter().all(|x| *x == 1.0 || *x == -0.2));
    }

    #[test]
    fn slot_scores_prefer_solved() {
        let solved = slot_scores(&CubeState::solved());
        assert!(solved.iter().all(|x| *x == solved[0]));
        assert_eq!(solved[0], 12.0 * 2.0 * 8.0 * 3.0);
        let scrambled = slot_scores(&CubeState::solved().apply_all(&parse_moves("R U F").unwrap()));
        assert!(scrambled.sum() < solved.sum());
    }

    #[test]
    fn edge_pair_scores_are_symmetric() {
        // U cycles edges 0-3 and leaves edge 4 solved.
        let v = slot_scores(&CubeState::solved().apply(parse_moves("U").unwrap()[0]));
        let edge_pairs = 12 * 8 + 8 * 7;
        let pair = |e1: usize, e2: usize| edge_pairs + e1 * 11 + if e2 > e1 { e2 - 1 } else { e2 };
        assert_eq!(v[pair(0, 4)], 2.0 * 12.0 * 2.0);
        assert_eq!(v[pair(0, 4)], v[pair(4, 0)]);
        assert_eq!(v[pair(4, 5)], 24.0 * 24.0);
    }

    #[test]
    fn cubie_summary_counts() {
        let solved = cubie_features(&CubeState::solved());
        assert_eq!(&solved.as_slice().unwrap()[74..], &[0.0, 8.0, 12.0, 8.0]);
        let turned = cubie_features(&CubeState::solved().apply(parse_moves("U").unwrap()[0]));
        // A U turn cycles four edges and four corners without twisting them.
        assert_eq!(&turned.as_slice().unwrap()[74..], &[0.0, 8.0, 8.0, 4.0]);
    }
}
