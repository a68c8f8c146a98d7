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

//! Chess rules engine for standard chess
//!
//! A _board_ holds the state of a single game of chess and arbitrates
//! which moves may be played on it. The following features are
//! supported:
//!
//! [x] Standard chess rules
//! [x] Full legality filtering (pins, discovered checks, castling lanes)
//! [x] En passant, castling, pawn promotion
//! [x] Checkmate and stalemate recognition
//! [x] Coordinate move notation (`e2e4`, `e7e8q`)
//! [x] Attack and mate queries over bare board snapshots
//! [x] Halfmove clock bookkeeping (claims left to the caller)
//! [ ] Three-fold repetition detection
//! [ ] Insufficient mating material
//! [ ] Chess variants such as Chess960, Crazyhouse, etc.
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square on an
//!   8-by-8 board. The 8 rows and 8 columns are represented by `Rank`
//!   (`Rank1` .. `Rank8`) and `File` (`FileA` .. `FileH`) respectively.
//!   Each square is named by the letter of its file followed by the
//!   number of its rank (`a1` .. `h8`). Squares also index a flat
//!   64-slot grid, counting `a8` as 0 across to `h1` as 63.
//!
//! * `Material` represents a piece of a specific color. A `Piece` has
//!   six variants: `King`, `Queen`, `Rook`, `Bishop`, `Knight` and
//!   `Pawn`. `Color` is either `White` or `Black`. Pawn promotion uses
//!   a separate `Promotion` type with only four variants; convert to a
//!   `Piece` with `From<Promotion>`.
//!
//! * A `Board` is the bare grid of square contents with no game state
//!   attached. It is the snapshot type: serializable, cheap to clone,
//!   and accepted by the standalone attack and mate queries.
//!
//! * A `Position` wraps a `Board` together with everything else a legal
//!   ruling needs: castling rights per side, the en passant target, the
//!   halfmove clock and the move counter the side to move derives from.
//!   The only public method that modifies a position is `apply_move`,
//!   which consumes a `LegalMove` and toggles the turn. There is no
//!   undo; callers that want history keep their own snapshots.
//!
//! * A `Move` is the caller's statement of intent: two squares and an
//!   optional promotion choice, exactly what coordinate notation spells
//!   out. A `LegalMove` is the engine's ruling on one, classified as a
//!   standard move, double pawn advance, en passant capture, promotion
//!   or castle so that `apply_move` knows every side effect up front.
//!   `Position::validate_move` is the bridge between the two.
//!
//! * Legality is decided by simulation. Candidate moves are generated
//!   per piece, each is played on a scratch copy of the board, and any
//!   that leave the mover's king attacked are discarded. One rule
//!   covers pins, discovered checks and king walks alike.
//!

mod castling;
mod material;
mod movegen;
mod moves;
mod position;
mod square;
mod status;

pub use castling::*;
pub use material::*;
pub use movegen::*;
pub use moves::*;
pub use position::*;
pub use square::*;
pub use status::*;

pub trait Turn {
    fn turn(&self) -> Color;
}
