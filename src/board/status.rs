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

use super::material::Color;
use super::movegen::is_check_on;
use super::position::{Board, Position};
use super::Turn;

/// Where the game stands after the latest move. Evaluated for the side
/// to move: no legal moves ends the game, and check decides between
/// mate and stalemate.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress { check: bool },
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }

    pub fn in_check(&self) -> bool {
        matches!(
            self,
            GameStatus::InProgress { check: true } | GameStatus::Checkmate { .. }
        )
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }
}

impl Position {
    pub fn status(&self) -> GameStatus {
        let turn = self.turn();
        let check = self.in_check(turn);
        if self.legal_moves().is_empty() {
            if check {
                GameStatus::Checkmate { winner: !turn }
            } else {
                GameStatus::Stalemate
            }
        } else {
            GameStatus::InProgress { check }
        }
    }

    pub fn is_checkmate(&self, side: Color) -> bool {
        self.in_check(side) && self.legal_moves_for(side).is_empty()
    }

    pub fn is_stalemate(&self, side: Color) -> bool {
        !self.in_check(side) && self.legal_moves_for(side).is_empty()
    }
}

/// Mate test over a bare board snapshot, with `side` treated as on
/// move. Castling and en passant state are absent from a snapshot, but
/// neither can rescue a mated king.
pub fn is_checkmate_on(board: &Board, side: Color) -> bool {
    let position = Position::from_board(board.clone(), side);
    position.is_checkmate(side)
}

pub fn is_stalemate_on(board: &Board, side: Color) -> bool {
    let position = Position::from_board(board.clone(), side);
    position.is_stalemate(side)
}
