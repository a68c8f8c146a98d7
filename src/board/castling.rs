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

use serde::{Deserialize, Serialize};

use super::material::{Color, Pair};
use super::square::{File, Rank, Square};

use File::*;

/// Per-side castling availability. The flags track whether the king and
/// the corresponding rook have stayed home since the start of the game;
/// they only ever go from `true` to `false`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    color: Color,
    king_side: bool,
    queen_side: bool,
}

impl CastlingRights {
    pub const fn initial(color: Color) -> Self {
        Self {
            color,
            king_side: true,
            queen_side: true,
        }
    }
    pub const fn none(color: Color) -> Self {
        Self {
            color,
            king_side: false,
            queen_side: false,
        }
    }
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
    #[inline]
    pub fn king_side(&self) -> bool {
        self.king_side
    }
    #[inline]
    pub fn queen_side(&self) -> bool {
        self.queen_side
    }

    /// Clears whichever rights a move touching `square` forfeits: the
    /// king square kills both, a rook home square kills its own side.
    /// Called for the origin of every move and, to catch rook captures,
    /// for the destination against the opponent's rights.
    pub fn update(&mut self, square: Square) {
        let lane_oo = Lane::king_side(self.color);
        let lane_ooo = Lane::queen_side(self.color);
        if self.king_side && (square == lane_oo.king_src || square == lane_oo.rook_src) {
            self.king_side = false;
        }
        if self.queen_side && (square == lane_ooo.king_src || square == lane_ooo.rook_src) {
            self.queen_side = false;
        }
    }
    pub fn clear(&mut self) {
        self.king_side = false;
        self.queen_side = false;
    }
    pub fn clear_king_side(&mut self) {
        self.king_side = false;
    }
    pub fn clear_queen_side(&mut self) {
        self.queen_side = false;
    }
}

impl Default for Pair<CastlingRights> {
    fn default() -> Self {
        Pair::new(
            CastlingRights::initial(Color::White),
            CastlingRights::initial(Color::Black),
        )
    }
}

/// The fixed squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lane {
    pub king_src: Square,
    pub king_dest: Square,
    pub rook_src: Square,
    pub rook_dest: Square,
}

impl Lane {
    pub fn king_side(color: Color) -> Self {
        let rank = Rank::back_rank(color);
        Self {
            king_src: Square::new(FileE, rank),
            king_dest: Square::new(FileG, rank),
            rook_src: Square::new(FileH, rank),
            rook_dest: Square::new(FileF, rank),
        }
    }
    pub fn queen_side(color: Color) -> Self {
        let rank = Rank::back_rank(color);
        Self {
            king_src: Square::new(FileE, rank),
            king_dest: Square::new(FileC, rank),
            rook_src: Square::new(FileA, rank),
            rook_dest: Square::new(FileD, rank),
        }
    }

    /// Squares strictly between king and rook; all must be vacant.
    pub fn blocking(&self) -> Vec<Square> {
        let rank = self.king_src.rank();
        let lo = self.king_src.file().min(self.rook_src.file());
        let hi = self.king_src.file().max(self.rook_src.file());
        (lo.to_index() + 1..hi.to_index())
            .map(|i| Square::new(File::from_index(i), rank))
            .collect()
    }

    /// The square the king passes through and the square it lands on;
    /// neither may be attacked (its origin is checked separately).
    pub fn transit(&self) -> [Square; 2] {
        let rank = self.king_src.rank();
        let mid = (self.king_src.file().to_index() + self.king_dest.file().to_index()) / 2;
        [Square::new(File::from_index(mid), rank), self.king_dest]
    }
}
