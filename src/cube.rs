// The cubie-level representation of a 3x3x3 cube.
//
// Corner slots: URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB.
// Edge slots: UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR.
//
// A state records which piece sits in each slot and how it is twisted.
// States are only ever produced by turning the solved cube, so every
// CubeState is reachable.

use crate::moves::{Face, Move, NUM_MOVES};
use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Corner {
    pub piece: u8,
    pub orientation: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub piece: u8,
    pub flip: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CubeState {
    corners: [Corner; 8],
    edges: [Edge; 12],
}

impl CubeState {
    pub const fn solved() -> CubeState {
        let mut corners = [Corner {
            piece: 0,
            orientation: 0,
        }; 8];
        let mut edges = [Edge {
            piece: 0,
            flip: false,
        }; 12];
        let mut i = 0;
        while i < 12 {
            if i < 8 {
                corners[i].piece = i as u8;
            }
            edges[i].piece = i as u8;
            i += 1;
        }
        CubeState { corners, edges }
    }

    pub fn is_solved(&self) -> bool {
        *self == CubeState::solved()
    }

    pub fn apply(&self, m: Move) -> CubeState {
        self.multiply(&MOVE_CUBES[m.index()])
    }

    pub fn apply_all(&self, moves: &[Move]) -> CubeState {
        moves.iter().fold(*self, |cube, m| cube.apply(*m))
    }

    pub fn corner(&self, slot: usize) -> Corner {
        self.corners[slot]
    }

    pub fn edge(&self, slot: usize) -> Edge {
        self.edges[slot]
    }

    pub fn corners(&self) -> &[Corner; 8] {
        &self.corners
    }

    pub fn edges(&self) -> &[Edge; 12] {
        &self.edges
    }

    pub fn flipped_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.flip).count()
    }

    pub fn oriented_corners(&self) -> usize {
        self.corners.iter().filter(|c| c.orientation == 0).count()
    }

    pub fn positioned_edges(&self) -> usize {
        self.edges
            .iter()
            .enumerate()
            .filter(|(i, e)| e.piece as usize == *i)
            .count()
    }

    pub fn positioned_corners(&self) -> usize {
        self.corners
            .iter()
            .enumerate()
            .filter(|(i, c)| c.piece as usize == *i)
            .count()
    }

    // Apply `other` after `self`. Slot i receives the piece that `other`
    // pulls into slot i, with both twists added together.
    const fn multiply(&self, other: &CubeState) -> CubeState {
        let mut res = *self;
        let mut i = 0;
        while i < 8 {
            let src = self.corners[other.corners[i].piece as usize];
            res.corners[i] = Corner {
                piece: src.piece,
                orientation: (src.orientation + other.corners[i].orientation) % 3,
            };
            i += 1;
        }
        let mut i = 0;
        while i < 12 {
            let src = self.edges[other.edges[i].piece as usize];
            res.edges[i] = Edge {
                piece: src.piece,
                flip: src.flip != other.edges[i].flip,
            };
            i += 1;
        }
        res
    }

    const fn from_tables(cp: [u8; 8], co: [u8; 8], ep: [u8; 12], eo: [u8; 12]) -> CubeState {
        let mut res = CubeState::solved();
        let mut i = 0;
        while i < 12 {
            if i < 8 {
                res.corners[i] = Corner {
                    piece: cp[i],
                    orientation: co[i],
                };
            }
            res.edges[i] = Edge {
                piece: ep[i],
                flip: eo[i] == 1,
            };
            i += 1;
        }
        res
    }

    pub fn pack(&self) -> PackedCube {
        let mut res: u128 = 0;
        for c in self.corners {
            res = (res << 5) | (c.piece as u128) | ((c.orientation as u128) << 3);
        }
        for e in self.edges {
            res = (res << 5) | (e.piece as u128) | ((e.flip as u128) << 4);
        }
        PackedCube(res)
    }

    pub fn stickers(&self) -> Stickers {
        let mut res = SOLVED_STICKERS;
        for (slot, corner) in self.corners.iter().enumerate() {
            let colors = CORNER_COLORS[corner.piece as usize];
            for k in 0..3 {
                let facelet = CORNER_FACELETS[slot][(k + corner.orientation as usize) % 3];
                res.0[facelet] = color_of(colors[k]);
            }
        }
        for (slot, edge) in self.edges.iter().enumerate() {
            let colors = EDGE_COLORS[edge.piece as usize];
            for k in 0..2 {
                let facelet = EDGE_FACELETS[slot][(k + edge.flip as usize) % 2];
                res.0[facelet] = color_of(colors[k]);
            }
        }
        res
    }
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::solved()
    }
}

// A CubeState packed into 100 bits: five bits per corner (piece, then two
// orientation bits) followed by five bits per edge (piece, then flip bit).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedCube(u128);

impl PackedCube {
    pub fn unpack(self) -> CubeState {
        let mut res = CubeState::solved();
        let mut bits = self.0;
        for edge in res.edges.iter_mut().rev() {
            let x = (bits & 0x1f) as u8;
            *edge = Edge {
                piece: x & 0xf,
                flip: x >> 4 == 1,
            };
            bits >>= 5;
        }
        for corner in res.corners.iter_mut().rev() {
            let x = (bits & 0x1f) as u8;
            *corner = Corner {
                piece: x & 0x7,
                orientation: x >> 3,
            };
            bits >>= 5;
        }
        res
    }

    pub fn bits(self) -> u128 {
        self.0
    }
}

impl Display for PackedCube {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:025x}", self.0)
    }
}

impl From<CubeState> for PackedCube {
    fn from(c: CubeState) -> Self {
        c.pack()
    }
}

// The 54 facelet colors of a cube in blocks of nine, one block per face in
// the order U, R, F, D, L, B. Within a block facelets are numbered row by
// row, so index 9k+4 is always a center. Colors are Face::index() + 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Stickers(pub [u8; 54]);

pub const FACELET_FACES: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

impl Stickers {
    pub fn is_center(idx: usize) -> bool {
        idx % 9 == 4
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

const fn color_of(face: Face) -> u8 {
    face as u8 + 1
}

const SOLVED_STICKERS: Stickers = {
    let mut res = [0; 54];
    let mut i = 0;
    while i < 54 {
        res[i] = color_of(FACELET_FACES[i / 9]);
        i += 1;
    }
    Stickers(res)
};

const U: usize = 0;
const R: usize = 9;
const F: usize = 18;
const D: usize = 27;
const L: usize = 36;
const B: usize = 45;

// Facelets of each corner slot, starting at the U or D facelet and going
// clockwise.
const CORNER_FACELETS: [[usize; 3]; 8] = [
    [U + 8, R, F + 2],
    [U + 6, F, L + 2],
    [U, L, B + 2],
    [U + 2, B, R + 2],
    [D + 2, F + 8, R + 6],
    [D, L + 8, F + 6],
    [D + 6, B + 8, L + 6],
    [D + 8, R + 8, B + 6],
];

const EDGE_FACELETS: [[usize; 2]; 12] = [
    [U + 5, R + 1],
    [U + 7, F + 1],
    [U + 3, L + 1],
    [U + 1, B + 1],
    [D + 5, R + 7],
    [D + 1, F + 7],
    [D + 3, L + 7],
    [D + 7, B + 7],
    [F + 5, R + 3],
    [F + 3, L + 5],
    [B + 5, L + 3],
    [B + 3, R + 5],
];

const CORNER_COLORS: [[Face; 3]; 8] = [
    [Face::U, Face::R, Face::F],
    [Face::U, Face::F, Face::L],
    [Face::U, Face::L, Face::B],
    [Face::U, Face::B, Face::R],
    [Face::D, Face::F, Face::R],
    [Face::D, Face::L, Face::F],
    [Face::D, Face::B, Face::L],
    [Face::D, Face::R, Face::B],
];

const EDGE_COLORS: [[Face; 2]; 12] = [
    [Face::U, Face::R],
    [Face::U, Face::F],
    [Face::U, Face::L],
    [Face::U, Face::B],
    [Face::D, Face::R],
    [Face::D, Face::F],
    [Face::D, Face::L],
    [Face::D, Face::B],
    [Face::F, Face::R],
    [Face::F, Face::L],
    [Face::B, Face::L],
    [Face::B, Face::R],
];

// Clockwise quarter turns, indexed by Face::index().
const QUARTER_TURNS: [CubeState; 6] = [
    // U
    CubeState::from_tables(
        [3, 0, 1, 2, 4, 5, 6, 7],
        [0; 8],
        [3, 0, 1, 2, 4, 5, 6, 7, 8, 9, 10, 11],
        [0; 12],
    ),
    // D
    CubeState::from_tables(
        [0, 1, 2, 3, 5, 6, 7, 4],
        [0; 8],
        [0, 1, 2, 3, 5, 6, 7, 4, 8, 9, 10, 11],
        [0; 12],
    ),
    // F
    CubeState::from_tables(
        [1, 5, 2, 3, 0, 4, 6, 7],
        [1, 2, 0, 0, 2, 1, 0, 0],
        [0, 9, 2, 3, 4, 8, 6, 7, 1, 5, 10, 11],
        [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
    ),
    // B
    CubeState::from_tables(
        [0, 1, 3, 7, 4, 5, 2, 6],
        [0, 0, 1, 2, 0, 0, 2, 1],
        [0, 1, 2, 11, 4, 5, 6, 10, 8, 9, 3, 7],
        [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
    ),
    // R
    CubeState::from_tables(
        [4, 1, 2, 0, 7, 5, 6, 3],
        [2, 0, 0, 1, 1, 0, 0, 2],
        [8, 1, 2, 3, 11, 5, 6, 7, 4, 9, 10, 0],
        [0; 12],
    ),
    // L
    CubeState::from_tables(
        [0, 2, 6, 3, 4, 1, 5, 7],
        [0, 1, 2, 0, 0, 2, 1, 0],
        [0, 1, 10, 3, 4, 5, 9, 7, 8, 2, 6, 11],
        [0; 12],
    ),
];

// The effect of each of the 18 moves on the solved cube, laid out to match
// Move::index(): clockwise, counter-clockwise, half turn for each face.
static MOVE_CUBES: [CubeState; NUM_MOVES] = {
    let mut res = [CubeState::solved(); NUM_MOVES];
    let mut face = 0;
    while face < 6 {
        let quarter = QUARTER_TURNS[face];
        let half = quarter.multiply(&quarter);
        res[face * 3] = quarter;
        res[face * 3 + 1] = half.multiply(&quarter);
        res[face * 3 + 2] = half;
        face += 1;
    }
    res
};
