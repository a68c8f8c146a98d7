// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::castling::Lane;
use super::material::{Color, Piece};
use super::square::Square;

/// Everything that can go wrong with a submitted move. All variants are
/// recoverable: a failed command leaves the position untouched and the
/// caller decides how to react.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("not a legal move")]
    IllegalMove,
    #[error("pawn reached the back rank without a promotion choice")]
    MissingPromotionChoice,
    #[error("the game is already over")]
    GameOver,
    #[error("malformed square coordinate")]
    InvalidSquare,
}

/// A caller-constructed move: origin, destination, and a promotion
/// choice when (and only when) a pawn finishes on the back rank.
/// Castling, en-passant and double advances are not distinct kinds
/// here; the engine infers them from board context during validation.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
}

impl Move {
    pub fn new(from: Square, to: Square, promotion: Option<Promotion>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// Parse coordinate notation: `<from><to>[promotion-letter]`,
    /// e.g. "e2e4" or "e7e8q". This is the exact textual contract the
    /// UI and the move-suggestion service exchange moves in.
    pub fn from_coord(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        let (from, to, promotion) = match chars.as_slice() {
            [f1, r1, f2, r2] => (Square::try_from_chars(*f1, *r1), Square::try_from_chars(*f2, *r2), None),
            [f1, r1, f2, r2, p] => {
                let promotion = Promotion::try_from_char(*p).ok_or(MoveError::InvalidSquare)?;
                (
                    Square::try_from_chars(*f1, *r1),
                    Square::try_from_chars(*f2, *r2),
                    Some(promotion),
                )
            }
            _ => return Err(MoveError::InvalidSquare.into()),
        };
        match (from, to) {
            (Some(from), Some(to)) => Ok(Self::new(from, to, promotion)),
            _ => Err(MoveError::InvalidSquare.into()),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_coord(s)
    }
}

/// The four pieces a pawn may become.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// Fixed generation order; keeps move lists reproducible.
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            'q' | 'Q' => Some(Promotion::Queen),
            'r' | 'R' => Some(Promotion::Rook),
            'b' | 'B' => Some(Promotion::Bishop),
            'n' | 'N' => Some(Promotion::Knight),
            _ => None,
        }
    }
    pub const fn to_char(&self) -> char {
        match *self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }
}

impl From<Promotion> for Piece {
    fn from(value: Promotion) -> Self {
        match value {
            Promotion::Queen => Piece::Queen,
            Promotion::Rook => Piece::Rook,
            Promotion::Bishop => Piece::Bishop,
            Promotion::Knight => Piece::Knight,
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A move the generator has fully classified. Only values of this type
/// reach the executor, so applying one never needs to re-check rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegalMove {
    Standard(Square, Square),
    DoubleAdvance(Square, Square),
    EnPassant(Square, Square),
    Promoting(Square, Square, Promotion),
    ShortCastle,
    LongCastle,
}

impl LegalMove {
    /// The caller-facing coordinate form. Castling renders as the king's
    /// two-square hop, which is also how callers request it.
    pub fn to_move(&self, turn: Color) -> Move {
        match *self {
            LegalMove::Standard(from, to)
            | LegalMove::DoubleAdvance(from, to)
            | LegalMove::EnPassant(from, to) => Move::new(from, to, None),
            LegalMove::Promoting(from, to, promotion) => Move::new(from, to, Some(promotion)),
            LegalMove::ShortCastle => {
                let lane = Lane::king_side(turn);
                Move::new(lane.king_src, lane.king_dest, None)
            }
            LegalMove::LongCastle => {
                let lane = Lane::queen_side(turn);
                Move::new(lane.king_src, lane.king_dest, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Color::*;

    fn sq(name: &str) -> Square {
        Square::try_from_str(name).unwrap()
    }

    #[test]
    fn test_coord_round_trip() {
        for coord in ["e2e4", "g8f6", "e7e8q", "a2a1n", "h7h8r"] {
            let mv = Move::from_coord(coord).unwrap();
            assert_eq!(mv.to_string(), coord);
        }
    }
    #[test]
    fn test_coord_parse_fields() {
        let mv = Move::from_coord("e7e8q").unwrap();
        assert_eq!(mv.from, sq("e7"));
        assert_eq!(mv.to, sq("e8"));
        assert_eq!(mv.promotion, Some(Promotion::Queen));
    }
    #[test]
    fn test_coord_rejects_garbage() {
        for coord in ["", "e2", "e2e", "e2e9", "i2e4", "e7e8x", "e2e4q1"] {
            let err = Move::from_coord(coord).unwrap_err();
            assert_eq!(
                err.downcast_ref::<MoveError>(),
                Some(&MoveError::InvalidSquare),
                "{coord:?} should be rejected"
            );
        }
    }
    #[test]
    fn test_castle_coordinate_form() {
        assert_eq!(LegalMove::ShortCastle.to_move(White).to_string(), "e1g1");
        assert_eq!(LegalMove::LongCastle.to_move(White).to_string(), "e1c1");
        assert_eq!(LegalMove::ShortCastle.to_move(Black).to_string(), "e8g8");
        assert_eq!(LegalMove::LongCastle.to_move(Black).to_string(), "e8c8");
    }
    #[test]
    fn test_promotion_letters() {
        for p in Promotion::ALL {
            assert_eq!(Promotion::try_from_char(p.to_char()), Some(p));
        }
        assert_eq!(Promotion::try_from_char('k'), None);
    }
}
