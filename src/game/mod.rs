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

//! A `Game` drives one game of chess from the opening position to a
//! terminal state. It wraps a `Position` with the two pieces of flow
//! state a rules engine cannot keep on the board itself: the cached
//! `GameStatus`, refreshed after every executed move, and the
//! promotion-pending sub-state that a two-click interface enters when
//! a pawn reaches the back rank before its player has named a piece.

use anyhow::Result;
#[cfg(feature = "random")]
use rand::{seq::SliceRandom, thread_rng};
use serde::{Deserialize, Serialize};

use crate::board::{
    Color, GameStatus, LegalMove, Move, MoveError, MoveId, Position, Promotion, Square, Turn,
};

/// A pawn move awaiting its promotion choice. While one of these is
/// set, the move has not been executed and the turn has not changed.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
}

/// Outcome of selecting a from/to pair without a promotion choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Played(MoveId),
    PromotionPending,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Game {
    position: Position,
    status: GameStatus,
    pending: Option<PendingPromotion>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Turn for Game {
    #[inline]
    fn turn(&self) -> Color {
        self.position.turn()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            position: Position::default(),
            status: GameStatus::InProgress { check: false },
            pending: None,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending
    }

    pub fn in_check(&self) -> bool {
        self.status.in_check()
    }

    /// Every legal move for the side to move, in coordinate form.
    /// Promotions appear once per choice (`b7b8q`, `b7b8r`, ...).
    pub fn legal_moves(&self) -> Vec<Move> {
        let turn = self.turn();
        self.position
            .legal_moves()
            .iter()
            .map(|mv| mv.to_move(turn))
            .collect()
    }

    pub fn destinations(&self, from: Square) -> Vec<Square> {
        self.position.destinations(from)
    }

    /// Play a fully specified move. Fails with `GameOver` once the game
    /// has ended, and refuses anything while a promotion choice is
    /// outstanding; `resolve_promotion` or `cancel_promotion` must
    /// settle that first.
    pub fn submit_move(&mut self, mv: Move) -> Result<MoveId> {
        if self.status.is_over() {
            return Err(MoveError::GameOver.into());
        }
        if self.pending.is_some() {
            return Err(MoveError::IllegalMove.into());
        }
        let legal = self.position.validate_move(mv)?;
        Ok(self.execute(legal))
    }

    /// Two-click entry point: a from/to pair with no promotion choice
    /// attached. A promoting pair parks the game in the pending
    /// sub-state instead of failing.
    pub fn select(&mut self, from: Square, to: Square) -> Result<Selection> {
        if self.status.is_over() {
            return Err(MoveError::GameOver.into());
        }
        if self.pending.is_some() {
            return Err(MoveError::IllegalMove.into());
        }
        let mv = Move {
            from,
            to,
            promotion: None,
        };
        match self.position.validate_move(mv) {
            Ok(legal) => Ok(Selection::Played(self.execute(legal))),
            Err(MoveError::MissingPromotionChoice) => {
                self.pending = Some(PendingPromotion { from, to });
                Ok(Selection::PromotionPending)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Complete a pending promotion with the chosen piece. Fails with
    /// `MissingPromotionChoice` when nothing is pending.
    pub fn resolve_promotion(&mut self, promotion: Promotion) -> Result<MoveId> {
        let Some(pending) = self.pending.take() else {
            return Err(MoveError::MissingPromotionChoice.into());
        };
        let mv = Move {
            from: pending.from,
            to: pending.to,
            promotion: Some(promotion),
        };
        match self.position.validate_move(mv) {
            Ok(legal) => Ok(self.execute(legal)),
            Err(err) => {
                // Leave the sub-state intact so the caller may retry
                self.pending = Some(pending);
                Err(err.into())
            }
        }
    }

    /// Abandon a pending promotion; the pawn stays put and the same
    /// player remains on move.
    pub fn cancel_promotion(&mut self) {
        self.pending = None;
    }

    /// Pick a uniformly random legal move for the side to move, if any.
    #[cfg(feature = "random")]
    pub fn random_move(&self) -> Option<Move> {
        let turn = self.turn();
        self.position
            .legal_moves()
            .choose(&mut thread_rng())
            .map(|mv| mv.to_move(turn))
    }

    fn execute(&mut self, legal: LegalMove) -> MoveId {
        let id = self.position.apply_move(legal);
        self.status = self.position.status();
        id
    }
}
