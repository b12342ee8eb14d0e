//! A single, bidirectionally growing tape and its head.
//!
//! Cells are stored contiguously in a `VecDeque`. The position of the front cell is kept in
//! `origin`, so a cell's position is `origin + index` and may be negative. The head is an index
//! into the deque; growing the tape at the front shifts it so that it keeps pointing at the same
//! logical cell.

use crate::types::Direction;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<char>,
    origin: i64,
    head: usize,
    blank: char,
}

impl Tape {
    /// Creates a tape holding `symbols` at positions `0..n`, with the head on position 0.
    ///
    /// An empty sequence yields a single blank cell.
    pub fn new(symbols: impl IntoIterator<Item = char>, blank: char) -> Self {
        let mut cells: VecDeque<char> = symbols.into_iter().collect();
        if cells.is_empty() {
            cells.push_back(blank);
        }

        Self {
            cells,
            origin: 0,
            head: 0,
            blank,
        }
    }

    /// Creates a tape of `len` blank cells (at least one).
    pub fn blank(len: usize, blank: char) -> Self {
        Self::new(std::iter::repeat(blank).take(len), blank)
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> char {
        self.cells[self.head]
    }

    /// Overwrites the symbol under the head.
    pub fn write(&mut self, symbol: char) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head, appending one blank cell when it would leave the tape.
    pub fn shift(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                if self.head == 0 {
                    self.cells.push_front(self.blank);
                    self.origin -= 1;
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                if self.head + 1 == self.cells.len() {
                    self.cells.push_back(self.blank);
                }
                self.head += 1;
            }
            Direction::Stay => {}
        }
    }

    /// Position of the cell under the head.
    pub fn head_position(&self) -> i64 {
        self.origin + self.head as i64
    }

    /// Position of the leftmost cell.
    pub fn origin(&self) -> i64 {
        self.origin
    }

    /// Number of cells allocated so far.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over `(position, symbol)` pairs from left to right.
    pub fn cells(&self) -> impl Iterator<Item = (i64, char)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &symbol)| (self.origin + i as i64, symbol))
    }

    /// The cells worth displaying: leading and trailing blanks are skipped unless the head is on them.
    pub fn window(&self) -> impl Iterator<Item = (i64, char, bool)> + '_ {
        let start = self
            .cells
            .iter()
            .position(|&c| c != self.blank)
            .map_or(self.head, |first| first.min(self.head));
        let end = self
            .cells
            .iter()
            .rposition(|&c| c != self.blank)
            .map_or(self.head, |last| last.max(self.head));

        (start..=end).map(move |i| (self.origin + i as i64, self.cells[i], i == self.head))
    }

    /// All symbols from left to right, blanks included.
    pub fn contents(&self) -> String {
        self.cells.iter().collect()
    }

    /// The symbols with leading and trailing blank runs removed.
    pub fn trimmed(&self) -> String {
        trim_blanks(&self.contents(), self.blank).to_string()
    }
}

/// Removes leading and trailing runs of `blank` from `s`.
pub fn trim_blanks(s: &str, blank: char) -> &str {
    s.trim_matches(blank)
}
