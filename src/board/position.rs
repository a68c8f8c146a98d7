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

use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;

use super::castling::{CastlingRights, Lane};
use super::material::{Color, Material, Pair, Piece};
use super::moves::LegalMove;
use super::square::{File, Rank, Square};
use super::Turn;

use Color::*;
use Piece::*;

/// Counts half-moves from the start of the game. The side to move and
/// the full-move number both fall out of it: White moves on even
/// values, and the move number advances every two half-moves, i.e.
/// after each of Black's moves.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveId(u16);

impl MoveId {
    pub const START: MoveId = MoveId(0);

    #[inline]
    pub fn new(move_count: u16, turn: Color) -> Self {
        match turn {
            White => Self(move_count * 2),
            Black => Self(move_count * 2 + 1),
        }
    }
    #[inline]
    pub fn turn(&self) -> Color {
        const TURNS: [Color; 2] = [White, Black];
        TURNS[self.value() % 2]
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0 as usize
    }
    #[inline]
    pub fn move_number(&self) -> usize {
        1 + self.value() / 2
    }
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for MoveId {
    #[inline]
    fn default() -> Self {
        MoveId::START
    }
}

/// The 8x8 grid: every square holds an optional `Material`. Owned
/// exclusively by `Position`; check queries can also run over a bare
/// `Board` snapshot handed in from outside.
#[derive(Clone, PartialEq, Eq)]
pub struct Board([Option<Material>; 64]);

impl Board {
    pub fn empty() -> Self {
        Self([None; 64])
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Material> {
        self.0[square.to_index()]
    }

    /// Occupied squares in index order (a8 first, h1 last). Move
    /// generation scans in this order, which is what makes its output
    /// reproducible for a given position.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Material)> + '_ {
        Square::all().filter_map(|square| self.0[square.to_index()].map(|m| (square, m)))
    }

    pub fn king(&self, color: Color) -> Option<Square> {
        self.iter()
            .find(|(_, m)| m.is(color, King))
            .map(|(square, _)| square)
    }
}

impl Index<Square> for Board {
    type Output = Option<Material>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl IndexMut<Square> for Board {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.to_index()]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter() {
            for file in File::iter() {
                let square = Square::new(file, rank);
                match self.get(square) {
                    Some(material) => write!(f, "{}", material.to_char())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// serde's derive stops at 32-element arrays, so the grid serializes by
// hand as a plain sequence of 64 optional squares.
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct BoardVisitor;
        impl<'de> Visitor<'de> for BoardVisitor {
            type Value = Board;
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of 64 optional squares")
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Board, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut array = [None; 64];
                for slot in array.iter_mut() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::custom("expected 64 squares"))?;
                }
                if seq.next_element::<Option<Material>>()?.is_some() {
                    return Err(serde::de::Error::custom("more than 64 squares"));
                }
                Ok(Board(array))
            }
        }
        deserializer.deserialize_seq(BoardVisitor)
    }
}

/// The authoritative game record: board, castling availability,
/// en-passant target, half-move clock, and the move counter that the
/// side to move and full-move number derive from.
///
/// A `Position` is created once per game (`Default` is the standard
/// starting configuration) and mutated only by [`Position::apply_move`].
/// Starting a new game means constructing a fresh instance.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    castling: Pair<CastlingRights>,
    en_passant: Option<Square>,
    next_move_id: MoveId,
    halfmove_clock: u8,
}

impl Default for Position {
    fn default() -> Self {
        const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Board::empty();
        for color in Color::iter() {
            for file in File::iter() {
                let piece = BACK_RANK[file.to_index()];
                board[Square::new(file, Rank::back_rank(color))] = Some(Material::new(color, piece));
                board[Square::new(file, Rank::pawn_rank(color))] = Some(Material::new(color, Pawn));
            }
        }
        Self {
            board,
            castling: Pair::default(),
            en_passant: None,
            next_move_id: MoveId::START,
            halfmove_clock: 0,
        }
    }
}

impl Turn for Position {
    #[inline]
    fn turn(&self) -> Color {
        self.next_move_id.turn()
    }
}

impl Index<Square> for Position {
    type Output = Option<Material>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.board[index]
    }
}

impl Position {
    /// Wrap a bare board snapshot so check and terminal queries can run
    /// against it. The snapshot carries no castling or en-passant
    /// context, so none is assumed.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            castling: Pair::new(
                CastlingRights::none(White),
                CastlingRights::none(Black),
            ),
            en_passant: None,
            next_move_id: MoveId::new(0, turn),
            halfmove_clock: 0,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }
    #[inline]
    pub fn contents(&self, square: Square) -> Option<Material> {
        self.board.get(square)
    }
    #[inline]
    pub fn castling(&self, color: Color) -> &CastlingRights {
        &self.castling[color]
    }
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    #[inline]
    pub fn halfmove_clock(&self) -> usize {
        self.halfmove_clock as usize
    }
    #[inline]
    pub fn move_number(&self) -> usize {
        self.next_move_id.move_number()
    }
    #[inline]
    pub fn king(&self, color: Color) -> Option<Square> {
        self.board.king(color)
    }

    /// Apply an already-validated move for the side to move, updating
    /// every derived field, and return the id the move was played as.
    ///
    /// Callers reach this through a validating wrapper; only values the
    /// generator produced for the current position may be passed in.
    pub fn apply_move(&mut self, mv: LegalMove) -> MoveId {
        let turn = self.turn();
        self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        match mv {
            LegalMove::Standard(from, to) => {
                let material = self.remove(from).unwrap();
                let captured = self.place(to, material);
                self.en_passant = None;
                self.castling[turn].update(from);
                self.castling[!turn].update(to);
                if captured.is_some() || material.piece().is_pawn() {
                    self.halfmove_clock = 0;
                }
            }
            LegalMove::DoubleAdvance(from, to) => {
                let material = self.remove(from).unwrap();
                self.place(to, material);
                let passed = Rank::from_index((from.rank().to_index() + to.rank().to_index()) / 2);
                self.en_passant = Some(Square::new(from.file(), passed));
                self.halfmove_clock = 0;
            }
            LegalMove::EnPassant(from, to) => {
                let material = self.remove(from).unwrap();
                // The captured pawn sits beside the destination, not on it
                let target = Square::new(to.file(), from.rank());
                let _ = self.remove(target).unwrap();
                self.place(to, material);
                self.en_passant = None;
                self.halfmove_clock = 0;
            }
            LegalMove::Promoting(from, to, promotion) => {
                let _ = self.remove(from).unwrap();
                self.place(to, Material::new(turn, promotion.into()));
                self.castling[!turn].update(to);
                self.en_passant = None;
                self.halfmove_clock = 0;
            }
            LegalMove::ShortCastle => {
                self.castle(Lane::king_side(turn), turn);
            }
            LegalMove::LongCastle => {
                self.castle(Lane::queen_side(turn), turn);
            }
        }
        let move_id = self.next_move_id;
        self.next_move_id = move_id.next();
        move_id
    }

    fn castle(&mut self, lane: Lane, turn: Color) {
        let king = self.remove(lane.king_src).unwrap();
        let rook = self.remove(lane.rook_src).unwrap();
        self.place(lane.king_dest, king);
        self.place(lane.rook_dest, rook);
        self.castling[turn].clear();
        self.en_passant = None;
    }

    fn place(&mut self, square: Square, material: Material) -> Option<Material> {
        self.board[square].replace(material)
    }
    fn remove(&mut self, square: Square) -> Option<Material> {
        self.board[square].take()
    }
}

#[cfg(test)]
impl Position {
    pub fn empty_board() -> Self {
        let mut position = Self::from_board(Board::empty(), White);
        position.castling = Pair::default();
        position
    }
    pub fn set_contents(mut self, square: Square, value: Option<Material>) -> Self {
        self.board[square] = value;
        self
    }
    pub fn set_en_passant(mut self, value: Option<Square>) -> Self {
        self.en_passant = value;
        self
    }
    pub fn set_turn(mut self, turn: Color) -> Self {
        self.next_move_id = MoveId::new(0, turn);
        self
    }
    pub fn clear_rights(mut self, color: Color) -> Self {
        self.castling[color].clear();
        self
    }
    pub fn clear_king_side_rights(mut self, color: Color) -> Self {
        self.castling[color].clear_king_side();
        self
    }
    pub fn clear_queen_side_rights(mut self, color: Color) -> Self {
        self.castling[color].clear_queen_side();
        self
    }
    pub fn set_halfmove_clock(mut self, value: u8) -> Self {
        self.halfmove_clock = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::try_from_str(name).unwrap()
    }

    #[test]
    fn test_starting_position() {
        let position = Position::default();
        assert_eq!(position.turn(), White);
        assert_eq!(position.move_number(), 1);
        assert_eq!(position.halfmove_clock(), 0);
        assert_eq!(position.en_passant(), None);
        assert_eq!(position.contents(sq("e1")), Some(Material::WK));
        assert_eq!(position.contents(sq("d8")), Some(Material::BQ));
        assert_eq!(position.contents(sq("a2")), Some(Material::WP));
        assert_eq!(position.contents(sq("e4")), None);
        assert!(position.castling(White).king_side());
        assert!(position.castling(Black).queen_side());
    }
    #[test]
    fn test_move_id_parity() {
        assert_eq!(MoveId::START.turn(), White);
        assert_eq!(MoveId::START.next().turn(), Black);
        assert_eq!(MoveId::START.move_number(), 1);
        assert_eq!(MoveId::new(4, Black).move_number(), 5);
    }
    #[test]
    fn test_apply_flips_turn_and_counts_moves() {
        let mut position = Position::default();
        position.apply_move(LegalMove::DoubleAdvance(sq("e2"), sq("e4")));
        assert_eq!(position.turn(), Black);
        assert_eq!(position.move_number(), 1);
        position.apply_move(LegalMove::DoubleAdvance(sq("e7"), sq("e5")));
        assert_eq!(position.turn(), White);
        assert_eq!(position.move_number(), 2);
    }
    #[test]
    fn test_double_advance_sets_en_passant_target() {
        let mut position = Position::default();
        position.apply_move(LegalMove::DoubleAdvance(sq("d2"), sq("d4")));
        assert_eq!(position.en_passant(), Some(sq("d3")));
        position.apply_move(LegalMove::Standard(sq("g8"), sq("f6")));
        assert_eq!(position.en_passant(), None);
    }
    #[test]
    fn test_halfmove_clock_resets_on_pawn_and_capture() {
        let mut position = Position::default();
        position.apply_move(LegalMove::Standard(sq("g1"), sq("f3")));
        assert_eq!(position.halfmove_clock(), 1);
        position.apply_move(LegalMove::Standard(sq("b8"), sq("c6")));
        assert_eq!(position.halfmove_clock(), 2);
        position.apply_move(LegalMove::Standard(sq("e2"), sq("e3")));
        assert_eq!(position.halfmove_clock(), 0);
    }
    #[test]
    fn test_king_move_forfeits_both_rights() {
        let mut position = Position::default()
            .set_contents(sq("e2"), None);
        position.apply_move(LegalMove::Standard(sq("e1"), sq("e2")));
        assert!(!position.castling(White).king_side());
        assert!(!position.castling(White).queen_side());
        assert!(position.castling(Black).king_side());
    }
    #[test]
    fn test_capturing_home_rook_forfeits_right() {
        let position = Position::empty_board()
            .set_contents(sq("e1"), Some(Material::WK))
            .set_contents(sq("h8"), Some(Material::BR))
            .set_contents(sq("e8"), Some(Material::BK))
            .set_contents(sq("h1"), Some(Material::WR))
            .set_contents(sq("g7"), Some(Material::WQ));
        let mut position = position;
        position.apply_move(LegalMove::Standard(sq("g7"), sq("h8")));
        assert!(!position.castling(Black).king_side());
        assert!(position.castling(Black).queen_side());
    }
    #[test]
    fn test_en_passant_removes_bypassed_pawn() {
        let mut position = Position::default().set_contents(sq("c4"), Some(Material::BP));
        position.apply_move(LegalMove::DoubleAdvance(sq("d2"), sq("d4")));
        position.apply_move(LegalMove::EnPassant(sq("c4"), sq("d3")));
        assert_eq!(position.contents(sq("d3")), Some(Material::BP));
        assert_eq!(position.contents(sq("d4")), None);
        assert_eq!(position.contents(sq("c4")), None);
    }
    #[test]
    fn test_promotion_replaces_the_pawn() {
        let mut position = Position::default()
            .set_contents(sq("b7"), Some(Material::WP))
            .set_contents(sq("b8"), None);
        position.apply_move(LegalMove::Promoting(
            sq("b7"),
            sq("b8"),
            crate::Promotion::Knight,
        ));
        assert_eq!(position.contents(sq("b8")), Some(Material::WN));
        assert_eq!(position.contents(sq("b7")), None);
    }
    #[test]
    fn test_castle_moves_king_and_rook_atomically() {
        let mut position = Position::default()
            .set_contents(sq("f1"), None)
            .set_contents(sq("g1"), None);
        position.apply_move(LegalMove::ShortCastle);
        assert_eq!(position.contents(sq("g1")), Some(Material::WK));
        assert_eq!(position.contents(sq("f1")), Some(Material::WR));
        assert_eq!(position.contents(sq("e1")), None);
        assert_eq!(position.contents(sq("h1")), None);
        assert!(!position.castling(White).king_side());
        assert!(!position.castling(White).queen_side());
    }
    #[test]
    fn test_position_serde_round_trip() {
        let mut position = Position::default();
        position.apply_move(LegalMove::DoubleAdvance(sq("e2"), sq("e4")));
        let encoded = serde_json::to_string(&position).unwrap();
        let decoded: Position = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, position);
    }
}
