use crate::{
    cube::CubeState,
    moves::{Face, Move},
};
use rand::{seq::IteratorRandom, Rng};
use serde::{Deserialize, Serialize};

// Which moves may follow a given move in a random sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum MoveFilter {
    // Never turn the same face twice in a row.
    SameFace,
    // Additionally, once both faces of an axis have been turned back to back,
    // neither may be turned again until another axis is used (no U D U).
    SameAxis,
}

impl Default for MoveFilter {
    fn default() -> Self {
        MoveFilter::SameFace
    }
}

// Tracks which faces are currently forbidden.
#[derive(Clone, Debug, Default)]
struct MoveHistory {
    axis: Option<usize>,
    used_faces: Vec<Face>,
}

impl MoveHistory {
    fn allows(&self, m: Move) -> bool {
        !self.used_faces.contains(&m.face())
    }

    fn push(&mut self, m: Move, filter: MoveFilter) {
        match filter {
            MoveFilter::SameFace => {
                self.used_faces.clear();
            }
            MoveFilter::SameAxis => {
                if self.axis != Some(m.axis()) {
                    self.used_faces.clear();
                }
            }
        }
        self.axis = Some(m.axis());
        self.used_faces.push(m.face());
    }
}

// Random moves of an exact length, obeying the filter. The first move is
// unrestricted.
pub fn random_moves<R: Rng>(rng: &mut R, length: usize, filter: MoveFilter) -> Vec<Move> {
    let mut history = MoveHistory::default();
    let mut res = Vec::with_capacity(length);
    for _ in 0..length {
        let m = Move::ALL
            .into_iter()
            .filter(|m| history.allows(*m))
            .choose(rng)
            .expect("at least 12 moves are always allowed");
        history.push(m, filter);
        res.push(m);
    }
    res
}

#[derive(Clone, Debug)]
pub struct Scramble {
    pub state: CubeState,
    pub moves: Vec<Move>,
    // The inverse of the last scramble move, which begins a valid solution.
    pub solution_start: Option<Move>,
}

// A move-based scramble of a given length which avoids trivially redundant
// move pairs.
pub fn random_scramble<R: Rng>(rng: &mut R, length: usize) -> Scramble {
    let moves = random_moves(rng, length, MoveFilter::SameAxis);
    Scramble {
        state: CubeState::solved().apply_all(&moves),
        solution_start: moves.last().map(|m| m.inverse()),
        moves,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn same_face_never_repeats() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..200 {
            let moves = random_moves(&mut rng, 30, MoveFilter::SameFace);
            assert_eq!(moves.len(), 30);
            for pair in moves.windows(2) {
                assert_ne!(pair[0].face(), pair[1].face());
            }
        }
    }

    #[test]
    fn same_face_allows_opposite_sandwich() {
        // With only the face rule, U D U is a legal pattern and should show
        // up in long enough runs.
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = false;
        for _ in 0..500 {
            let moves = random_moves(&mut rng, 30, MoveFilter::SameFace);
            seen |= moves
                .windows(3)
                .any(|w| w[0].face() == w[2].face() && w[0].axis() == w[1].axis());
        }
        assert!(seen);
    }

    #[test]
    fn same_axis_forbids_sandwich() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..500 {
            let moves = random_moves(&mut rng, 30, MoveFilter::SameAxis);
            for pair in moves.windows(2) {
                assert_ne!(pair[0].face(), pair[1].face());
            }
            for w in moves.windows(3) {
                assert!(!(w[0].axis() == w[1].axis() && w[1].axis() == w[2].axis()));
            }
        }
    }

    #[test]
    fn reproducible_with_seed() {
        let a = random_moves(&mut StdRng::seed_from_u64(9), 20, MoveFilter::SameAxis);
        let b = random_moves(&mut StdRng::seed_from_u64(9), 20, MoveFilter::SameAxis);
        assert_eq!(a, b);
    }

    #[test]
    fn scramble_solution_start() {
        let mut rng = StdRng::seed_from_u64(3);
        let scramble = random_scramble(&mut rng, 12);
        assert_eq!(scramble.moves.len(), 12);
        assert_eq!(scramble.state, CubeState::solved().apply_all(&scramble.moves));
        let last = *scramble.moves.last().unwrap();
        assert_eq!(scramble.solution_start, Some(last.inverse()));
        let undone = scramble.state.apply(scramble.solution_start.unwrap());
        assert_eq!(undone, CubeState::solved().apply_all(&scramble.moves[..11]));

        let empty = random_scramble(&mut rng, 0);
        assert!(empty.state.is_solved());
        assert_eq!(empty.solution_start, None);
    }
}
