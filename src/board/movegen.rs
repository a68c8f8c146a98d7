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

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use super::castling::Lane;
use super::material::{Color, Material, Piece};
use super::moves::{LegalMove, Move, MoveError, Promotion};
use super::position::{Board, Position};
use super::square::{Direction, Offset, Square};
use super::Turn;

use Color::*;
use Piece::*;

static KNIGHT_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
    ];
    std::array::from_fn(|index| {
        let square = Square::from_index(index);
        OFFSETS.into_iter().filter_map(|offset| square + offset).collect()
    })
});

static KING_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| {
    std::array::from_fn(|index| {
        let square = Square::from_index(index);
        Direction::iter().filter_map(|dir| square + dir).collect()
    })
});

/// Is `target` attacked by any piece of color `by`? Works on a bare
/// board, so the UI can re-check a fetched snapshot without rebuilding
/// full position state. Pawns count with their capture geometry only,
/// never their forward steps.
pub fn square_attacked(board: &Board, target: Square, by: Color) -> bool {
    for &from in KNIGHT_TARGETS[target.to_index()].iter() {
        if board.get(from).is_some_and(|m| m.is(by, Knight)) {
            return true;
        }
    }
    for &from in KING_TARGETS[target.to_index()].iter() {
        if board.get(from).is_some_and(|m| m.is(by, King)) {
            return true;
        }
    }
    // A pawn attacking `target` sits one row behind it (from the
    // attacker's point of view) on an adjacent file
    let dy = match by {
        White => 1,
        Black => -1,
    };
    for dx in [-1, 1] {
        if let Some(from) = target + Offset::new(dx, dy) {
            if board.get(from).is_some_and(|m| m.is(by, Pawn)) {
                return true;
            }
        }
    }
    for dir in Direction::horizontals() {
        if let Some(material) = first_along(board, target, dir) {
            if material.color() == by && matches!(material.piece(), Rook | Queen) {
                return true;
            }
        }
    }
    for dir in Direction::diagonals() {
        if let Some(material) = first_along(board, target, dir) {
            if material.color() == by && matches!(material.piece(), Bishop | Queen) {
                return true;
            }
        }
    }
    false
}

fn first_along(board: &Board, from: Square, dir: Direction) -> Option<Material> {
    let mut next = from + dir;
    while let Some(square) = next {
        if let Some(material) = board.get(square) {
            return Some(material);
        }
        next = square + dir;
    }
    None
}

/// Snapshot form of the check query.
pub fn is_check_on(board: &Board, side: Color) -> bool {
    match board.king(side) {
        Some(king) => square_attacked(board, king, !side),
        None => false,
    }
}

impl Position {
    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        self.legal_moves_for(self.turn())
    }

    /// Every legal move for `side`: pseudo-legal generation followed by
    /// the check-safety filter. Each candidate is simulated on a scratch
    /// copy of the board and discarded if the mover's own king ends up
    /// attacked; pins and discovered checks fall out of this without
    /// any special cases.
    pub fn legal_moves_for(&self, side: Color) -> Vec<LegalMove> {
        let mut out = Vec::new();
        for (from, material) in self.board().iter() {
            if material.color() == side {
                self.candidate_moves(from, material, &mut out);
            }
        }
        out.retain(|mv| !self.exposes_king(*mv, side));
        out
    }

    /// Legal moves for the piece on `from`. Empty when the square is
    /// vacant or holds a piece of the side not on move; this is the UI
    /// click path.
    pub fn legal_moves_from(&self, from: Square) -> Vec<LegalMove> {
        let mut out = Vec::new();
        if let Some(material) = self.contents(from) {
            if material.color() == self.turn() {
                self.candidate_moves(from, material, &mut out);
                out.retain(|mv| !self.exposes_king(*mv, material.color()));
            }
        }
        out
    }

    /// Distinct destination squares for the piece on `from`, in
    /// generation order (promotion choices collapse to one entry).
    pub fn destinations(&self, from: Square) -> Vec<Square> {
        let turn = self.turn();
        let mut out = Vec::new();
        for mv in self.legal_moves_from(from) {
            let to = mv.to_move(turn).to;
            if !out.contains(&to) {
                out.push(to);
            }
        }
        out
    }

    #[inline]
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        square_attacked(self.board(), square, by)
    }

    #[inline]
    pub fn in_check(&self, side: Color) -> bool {
        is_check_on(self.board(), side)
    }

    /// Resolve a caller move against the generated legal moves,
    /// classifying its kind from board context. A pawn move that ends
    /// on the back rank without a promotion choice is incomplete, not
    /// illegal; it reports `MissingPromotionChoice` so the caller can
    /// ask for the piece and resubmit.
    pub fn validate_move(&self, mv: Move) -> Result<LegalMove, MoveError> {
        let turn = self.turn();
        let mut needs_promotion = false;
        for candidate in self.legal_moves_from(mv.from) {
            let coord = candidate.to_move(turn);
            if coord.from != mv.from || coord.to != mv.to {
                continue;
            }
            match (candidate, mv.promotion) {
                (LegalMove::Promoting(from, to, _), Some(promotion)) => {
                    return Ok(LegalMove::Promoting(from, to, promotion));
                }
                (LegalMove::Promoting(..), None) => {
                    needs_promotion = true;
                }
                (candidate, None) => return Ok(candidate),
                // A promotion choice on a non-promoting move is bogus
                (_, Some(_)) => return Err(MoveError::IllegalMove),
            }
        }
        if needs_promotion {
            Err(MoveError::MissingPromotionChoice)
        } else {
            Err(MoveError::IllegalMove)
        }
    }

    fn candidate_moves(&self, from: Square, material: Material, out: &mut Vec<LegalMove>) {
        let color = material.color();
        match material.piece() {
            Pawn => self.pawn_moves(from, color, out),
            Knight => self.leaper_moves(from, color, &KNIGHT_TARGETS[from.to_index()], out),
            Bishop => self.ray_moves(from, color, Direction::diagonals(), out),
            Rook => self.ray_moves(from, color, Direction::horizontals(), out),
            Queen => {
                self.ray_moves(from, color, Direction::horizontals(), out);
                self.ray_moves(from, color, Direction::diagonals(), out);
            }
            King => {
                self.leaper_moves(from, color, &KING_TARGETS[from.to_index()], out);
                self.castle_moves(color, out);
            }
        }
    }

    fn pawn_moves(&self, from: Square, color: Color, out: &mut Vec<LegalMove>) {
        let dy: isize = match color {
            White => -1,
            Black => 1,
        };
        if let Some(one) = from + Offset::new(0, dy) {
            if self.contents(one).is_none() {
                if one.rank().is_back_rank(!color) {
                    for promotion in Promotion::ALL {
                        out.push(LegalMove::Promoting(from, one, promotion));
                    }
                } else {
                    out.push(LegalMove::Standard(from, one));
                    if from.rank() == super::square::Rank::pawn_rank(color) {
                        if let Some(two) = one + Offset::new(0, dy) {
                            if self.contents(two).is_none() {
                                out.push(LegalMove::DoubleAdvance(from, two));
                            }
                        }
                    }
                }
            }
        }
        for dx in [-1, 1] {
            let Some(to) = from + Offset::new(dx, dy) else {
                continue;
            };
            match self.contents(to) {
                Some(material) if material.color() != color => {
                    if to.rank().is_back_rank(!color) {
                        for promotion in Promotion::ALL {
                            out.push(LegalMove::Promoting(from, to, promotion));
                        }
                    } else {
                        out.push(LegalMove::Standard(from, to));
                    }
                }
                None if Some(to) == self.en_passant() => {
                    // The pawn being captured sits beside the target,
                    // on the capturer's own rank
                    let victim = Square::new(to.file(), from.rank());
                    if self.contents(victim).is_some_and(|m| m.is(!color, Pawn)) {
                        out.push(LegalMove::EnPassant(from, to));
                    }
                }
                _ => {}
            }
        }
    }

    fn leaper_moves(&self, from: Square, color: Color, targets: &[Square], out: &mut Vec<LegalMove>) {
        for &to in targets {
            match self.contents(to) {
                Some(material) if material.color() == color => {}
                _ => out.push(LegalMove::Standard(from, to)),
            }
        }
    }

    fn ray_moves(
        &self,
        from: Square,
        color: Color,
        dirs: impl Iterator<Item = Direction>,
        out: &mut Vec<LegalMove>,
    ) {
        for dir in dirs {
            let mut next = from + dir;
            while let Some(to) = next {
                match self.contents(to) {
                    None => {
                        out.push(LegalMove::Standard(from, to));
                        next = to + dir;
                    }
                    Some(material) => {
                        if material.color() != color {
                            out.push(LegalMove::Standard(from, to));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn castle_moves(&self, side: Color, out: &mut Vec<LegalMove>) {
        let rights = *self.castling(side);
        if !rights.king_side() && !rights.queen_side() {
            return;
        }
        // Castling out of check is never allowed
        if self.in_check(side) {
            return;
        }
        if rights.king_side() {
            self.try_castle(side, Lane::king_side(side), LegalMove::ShortCastle, out);
        }
        if rights.queen_side() {
            self.try_castle(side, Lane::queen_side(side), LegalMove::LongCastle, out);
        }
    }

    fn try_castle(&self, side: Color, lane: Lane, mv: LegalMove, out: &mut Vec<LegalMove>) {
        // The flags normally guarantee both pieces are home, but hand
        // assembled positions may disagree with them
        if !self.contents(lane.king_src).is_some_and(|m| m.is(side, King)) {
            return;
        }
        if !self.contents(lane.rook_src).is_some_and(|m| m.is(side, Rook)) {
            return;
        }
        if lane.blocking().iter().any(|&sq| self.contents(sq).is_some()) {
            return;
        }
        if lane.transit().iter().any(|&sq| self.is_attacked(sq, !side)) {
            return;
        }
        out.push(mv);
    }

    fn exposes_king(&self, mv: LegalMove, side: Color) -> bool {
        let board = self.board_after(mv, side);
        match board.king(side) {
            Some(king) => square_attacked(&board, king, !side),
            None => false,
        }
    }

    /// Scratch copy of the board with `mv` played for `side`. Only the
    /// square contents matter here; the derived position fields are
    /// irrelevant to an attack test.
    fn board_after(&self, mv: LegalMove, side: Color) -> Board {
        let mut board = self.board().clone();
        match mv {
            LegalMove::Standard(from, to) | LegalMove::DoubleAdvance(from, to) => {
                let material = board[from].take();
                board[to] = material;
            }
            LegalMove::EnPassant(from, to) => {
                let material = board[from].take();
                board[to] = material;
                board[Square::new(to.file(), from.rank())] = None;
            }
            LegalMove::Promoting(from, to, promotion) => {
                board[from] = None;
                board[to] = Some(Material::new(side, promotion.into()));
            }
            LegalMove::ShortCastle => {
                let lane = Lane::king_side(side);
                let king = board[lane.king_src].take();
                let rook = board[lane.rook_src].take();
                board[lane.king_dest] = king;
                board[lane.rook_dest] = rook;
            }
            LegalMove::LongCastle => {
                let lane = Lane::queen_side(side);
                let king = board[lane.king_src].take();
                let rook = board[lane.rook_src].take();
                board[lane.king_dest] = king;
                board[lane.rook_dest] = rook;
            }
        }
        board
    }
}

/// Count the leaf nodes of the legal move tree to `depth`. The standard
/// cross-check for generator and executor together.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for mv in position.legal_moves() {
        let mut next = position.clone();
        next.apply_move(mv);
        nodes += perft(&next, depth - 1);
    }
    nodes
}
