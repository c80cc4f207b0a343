use std::{fmt::Display, str::FromStr};
use thiserror::Error;

// The six faces, ordered so that opposite faces share an axis:
// axis 0 is U/D, axis 1 is F/B, axis 2 is R/L.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Face {
    U,
    D,
    F,
    B,
    R,
    L,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::F, Face::B, Face::R, Face::L];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn axis(self) -> usize {
        self.index() / 2
    }

    pub fn opposite(self) -> Face {
        Face::ALL[self.index() ^ 1]
    }

    fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
            Face::R => 'R',
            Face::L => 'L',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

// One of the 18 face turns. Moves are grouped by face, so the move with
// index i turns face i / 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move(u8);

pub const NUM_MOVES: usize = 18;

impl Move {
    pub const ALL: [Move; NUM_MOVES] = {
        let mut res = [Move(0); NUM_MOVES];
        let mut i = 0;
        while i < NUM_MOVES {
            res[i] = Move(i as u8);
            i += 1;
        }
        res
    };

    pub fn new(face: Face, turn: Turn) -> Move {
        let offset = match turn {
            Turn::Clockwise => 0,
            Turn::CounterClockwise => 1,
            Turn::Half => 2,
        };
        Move((face.index() * 3 + offset) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn face(self) -> Face {
        Face::ALL[self.index() / 3]
    }

    pub fn axis(self) -> usize {
        self.face().axis()
    }

    pub fn turn(self) -> Turn {
        match self.0 % 3 {
            0 => Turn::Clockwise,
            1 => Turn::CounterClockwise,
            _ => Turn::Half,
        }
    }

    pub fn inverse(self) -> Move {
        let turn = match self.turn() {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        };
        Move::new(self.face(), turn)
    }

    // All moves that do not turn the given face. A minimal path never turns
    // the same face twice in a row.
    pub fn excluding_face(face: Face) -> impl Iterator<Item = Move> {
        Move::ALL.into_iter().filter(move |m| m.face() != face)
    }

    // Successors of a node whose last move turned `last_face`, or all 18
    // moves for the root.
    pub fn successors(last_face: Option<Face>) -> impl Iterator<Item = Move> {
        Move::ALL
            .into_iter()
            .filter(move |m| Some(m.face()) != last_face)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suffix = match self.turn() {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        };
        write!(f, "{}{}", self.face().letter(), suffix)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("empty move")]
    Empty,
    #[error("unknown face in move: {0}")]
    UnknownFace(String),
    #[error("unknown turn suffix in move: {0}")]
    UnknownTurn(String),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = match chars.next() {
            Some('U') => Face::U,
            Some('D') => Face::D,
            Some('F') => Face::F,
            Some('B') => Face::B,
            Some('R') => Face::R,
            Some('L') => Face::L,
            Some(_) => return Err(ParseMoveError::UnknownFace(s.to_owned())),
            None => return Err(ParseMoveError::Empty),
        };
        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "'" => Turn::CounterClockwise,
            "2" => Turn::Half,
            _ => return Err(ParseMoveError::UnknownTurn(s.to_owned())),
        };
        Ok(Move::new(face, turn))
    }
}

// Parse a whitespace-separated sequence such as "R U R' U2".
pub fn parse_moves(s: &str) -> Result<Vec<Move>, ParseMoveError> {
    s.split_whitespace().map(Move::from_str).collect()
}

pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

// The sequence that undoes `moves`.
pub fn invert_sequence(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.inverse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_and_axes() {
        for m in Move::ALL {
            assert_eq!(m.face().index(), m.index() / 3);
            assert_eq!(m.axis(), m.face().index() / 2);
            assert_eq!(m.face().opposite().axis(), m.axis());
            assert_ne!(m.face().opposite(), m.face());
        }
        assert_eq!(Face::U.axis(), Face::D.axis());
        assert_eq!(Face::R.axis(), Face::L.axis());
        assert_ne!(Face::U.axis(), Face::F.axis());
    }

    #[test]
    fn inverse_is_involution() {
        for m in Move::ALL {
            assert_eq!(m.inverse().inverse(), m);
            assert_eq!(m.inverse().face(), m.face());
            if m.turn() == Turn::Half {
                assert_eq!(m.inverse(), m);
            } else {
                assert_ne!(m.inverse(), m);
            }
        }
    }

    #[test]
    fn excluding_face() {
        for face in Face::ALL {
            let moves = Move::excluding_face(face).collect::<Vec<_>>();
            assert_eq!(moves.len(), 15);
            assert!(moves.iter().all(|m| m.face() != face));
        }
        assert_eq!(Move::successors(None).count(), 18);
        assert_eq!(Move::successors(Some(Face::B)).count(), 15);
    }

    #[test]
    fn notation() {
        let moves = parse_moves("R U R' U'  F2 D").unwrap();
        assert_eq!(moves.len(), 6);
        assert_eq!(moves[0], Move::new(Face::R, Turn::Clockwise));
        assert_eq!(moves[2], Move::new(Face::R, Turn::CounterClockwise));
        assert_eq!(moves[4], Move::new(Face::F, Turn::Half));
        assert_eq!(format_moves(&moves), "R U R' U' F2 D");
        for m in Move::ALL {
            assert_eq!(m.to_string().parse::<Move>(), Ok(m));
        }
        assert_eq!(
            "X".parse::<Move>(),
            Err(ParseMoveError::UnknownFace("X".to_owned()))
        );
        assert_eq!(
            "R3".parse::<Move>(),
            Err(ParseMoveError::UnknownTurn("R3".to_owned()))
        );
    }

    #[test]
    fn inverted_sequence() {
        let moves = parse_moves("R U2 F'").unwrap();
        assert_eq!(format_moves(&invert_sequence(&moves)), "F U2 R'");
    }
}
