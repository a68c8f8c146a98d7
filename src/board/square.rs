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
use std::fmt;
use std::ops::Add;
use strum_macros::EnumIter;

use super::material::Color;

use Color::*;

/// A file (column) on the board, `a` through `h`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum File {
    FileA,
    FileB,
    FileC,
    FileD,
    FileE,
    FileF,
    FileG,
    FileH,
}

use File::{FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH};

impl File {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [File; 8] = [FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            'a' | 'A' => Some(FileA),
            'b' | 'B' => Some(FileB),
            'c' | 'C' => Some(FileC),
            'd' | 'D' => Some(FileD),
            'e' | 'E' => Some(FileE),
            'f' | 'F' => Some(FileF),
            'g' | 'G' => Some(FileG),
            'h' | 'H' => Some(FileH),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_char(&self) -> char {
        const VALUES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
        VALUES[self.to_index()]
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Add<isize> for File {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

/// A rank (row) on the board. `Rank8` carries index 0 so that rank
/// indices read top-down, matching how the board array is laid out.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Rank8,
    Rank7,
    Rank6,
    Rank5,
    Rank4,
    Rank3,
    Rank2,
    Rank1,
}

use Rank::{Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8};

impl Rank {
    #[inline]
    pub const fn back_rank(color: Color) -> Self {
        match color {
            White => Rank1,
            Black => Rank8,
        }
    }
    #[inline]
    pub fn is_back_rank(&self, color: Color) -> bool {
        Self::back_rank(color) == *self
    }
    #[inline]
    pub const fn pawn_rank(color: Color) -> Self {
        match color {
            White => Rank2,
            Black => Rank7,
        }
    }
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Rank; 8] = [Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank1),
            '2' => Some(Rank2),
            '3' => Some(Rank3),
            '4' => Some(Rank4),
            '5' => Some(Rank5),
            '6' => Some(Rank6),
            '7' => Some(Rank7),
            '8' => Some(Rank8),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_char(&self) -> char {
        const VALUES: [char; 8] = ['8', '7', '6', '5', '4', '3', '2', '1'];
        VALUES[self.to_index()]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Add<isize> for Rank {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

/// Coordinates of a single square, named by file letter and rank number
/// ("e4"). Also addressable as a board index (0..64, row-major from a8)
/// or as a `(row, col)` pair with both components in `[0, 7]`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self { file, rank }
    }
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index < 64);
        Self::new(File::from_index(index % 8), Rank::from_index(index / 8))
    }
    #[inline]
    pub const fn from_coords(row: usize, col: usize) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self::new(File::from_index(col), Rank::from_index(row)))
        } else {
            None
        }
    }
    #[inline]
    pub fn try_from_str(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let f = chars.next()?;
        let r = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::try_from_chars(f, r)
    }
    #[inline]
    pub const fn try_from_chars(f: char, r: char) -> Option<Self> {
        match (File::try_from_char(f), Rank::try_from_char(r)) {
            (Some(file), Some(rank)) => Some(Self::new(file, rank)),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        self.rank.to_index() * 8 + self.file.to_index()
    }
    #[inline]
    pub const fn file(&self) -> File {
        self.file
    }
    #[inline]
    pub const fn rank(&self) -> Rank {
        self.rank
    }
    #[inline]
    pub const fn row(&self) -> usize {
        self.rank.to_index()
    }
    #[inline]
    pub const fn col(&self) -> usize {
        self.file.to_index()
    }
    /// All 64 squares in index order (a8, b8, .. h1).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Self::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.to_index()
    }
}

/// A displacement between squares. `x` runs along files (positive
/// toward the h-file), `y` along rows (positive toward rank 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: isize,
    pub y: isize,
}

impl Offset {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        let file = (self.file + rhs.x)?;
        let rank = (self.rank + rhs.y)?;
        Some(Square::new(file, rank))
    }
}

/// One of the eight ray directions a line piece can travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    UpLeft,
    Up,
    UpRight,
    Left,
    Right,
    DownLeft,
    Down,
    DownRight,
}

use Direction::{Down, DownLeft, DownRight, Left, Right, Up, UpLeft, UpRight};

impl Direction {
    pub fn horizontals() -> impl Iterator<Item = Self> {
        [Up, Left, Right, Down].into_iter()
    }
    pub fn diagonals() -> impl Iterator<Item = Self> {
        [UpLeft, UpRight, DownLeft, DownRight].into_iter()
    }
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            UpLeft => Self::new(-1, -1),
            Up => Self::new(0, -1),
            UpRight => Self::new(1, -1),
            Left => Self::new(-1, 0),
            Right => Self::new(1, 0),
            DownLeft => Self::new(-1, 1),
            Down => Self::new(0, 1),
            DownRight => Self::new(1, 1),
        }
    }
}

impl Add<Direction> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::try_from_str(name).unwrap()
    }

    #[test]
    fn test_index_round_trip() {
        for index in 0..64 {
            assert_eq!(Square::from_index(index).to_index(), index);
        }
    }
    #[test]
    fn test_name_round_trip() {
        for square in Square::all() {
            let name = square.to_string();
            assert_eq!(Square::try_from_str(&name), Some(square));
        }
    }
    #[test]
    fn test_corner_coordinates() {
        assert_eq!(sq("a8").to_index(), 0);
        assert_eq!(sq("h8").to_index(), 7);
        assert_eq!(sq("a1").to_index(), 56);
        assert_eq!(sq("h1").to_index(), 63);
    }
    #[test]
    fn test_row_and_col() {
        let e4 = sq("e4");
        assert_eq!(e4.row(), 4);
        assert_eq!(e4.col(), 4);
        assert_eq!(Square::from_coords(4, 4), Some(e4));
        assert_eq!(Square::from_coords(8, 0), None);
        assert_eq!(Square::from_coords(0, 9), None);
    }
    #[test]
    fn test_rejects_malformed_names() {
        assert_eq!(Square::try_from_str(""), None);
        assert_eq!(Square::try_from_str("e"), None);
        assert_eq!(Square::try_from_str("e9"), None);
        assert_eq!(Square::try_from_str("i4"), None);
        assert_eq!(Square::try_from_str("e44"), None);
    }
    #[test]
    fn test_offsets_stay_on_board() {
        assert_eq!(sq("a1") + Offset::new(-1, 0), None);
        assert_eq!(sq("a1") + Offset::new(0, 1), None);
        assert_eq!(sq("h8") + Offset::new(1, -1), None);
        assert_eq!(sq("e4") + Offset::new(1, -1), Some(sq("f5")));
    }
    #[test]
    fn test_back_ranks() {
        assert!(sq("e1").rank().is_back_rank(White));
        assert!(sq("e8").rank().is_back_rank(Black));
        assert!(!sq("e4").rank().is_back_rank(White));
    }
}
