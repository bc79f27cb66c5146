use serde::{Deserialize, Serialize};

/// Sentinel for a grid cell that has not been written yet. Finished puzzles
/// never contain it; the filler pass replaces every remaining occurrence.
pub const EMPTY_CELL: char = ' ';

/// The eight compass headings a word can be hidden along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Per-step (row, col) delta for this heading. Row grows downward.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
        }
    }
}

/// Row-major character grid with bounds-checked access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterGrid {
    row_count: usize,
    col_count: usize,
    cells: Vec<Vec<char>>,
}

impl LetterGrid {
    /// Create an empty grid; every cell starts as [EMPTY_CELL].
    pub fn new(row_count: usize, col_count: usize) -> Self {
        Self {
            row_count,
            col_count,
            cells: vec![vec![EMPTY_CELL; col_count]; row_count],
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.row_count && (col as usize) < self.col_count
    }

    /// Read a cell, or `None` when out of bounds.
    pub fn at(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Write a cell. Writes outside the grid are rejected, not panics.
    pub fn set(&mut self, row: usize, col: usize, letter: char) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = letter;
                true
            }
            None => false,
        }
    }

    pub fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        self.at(row, col) == Some(EMPTY_CELL)
    }

    /// Iterate all (row, col) coordinates in row-major order.
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.row_count).flat_map(move |r| (0..self.col_count).map(move |c| (r, c)))
    }
}

/// A word committed to the grid. Immutable once the puzzle is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub start_row: usize,
    pub start_col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl PlacedWord {
    pub fn end_row(&self) -> usize {
        let (dr, _) = self.direction.delta();
        (self.start_row as isize + dr * (self.length as isize - 1)) as usize
    }

    pub fn end_col(&self) -> usize {
        let (_, dc) = self.direction.delta();
        (self.start_col as isize + dc * (self.length as isize - 1)) as usize
    }

    /// Every (row, col) the word covers, start to end.
    pub fn path(&self) -> Vec<(usize, usize)> {
        let (dr, dc) = self.direction.delta();
        (0..self.length as isize)
            .map(|i| {
                (
                    (self.start_row as isize + dr * i) as usize,
                    (self.start_col as isize + dc * i) as usize,
                )
            })
            .collect()
    }
}

/// A finished grid plus the words hidden in it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub grid: LetterGrid,
    pub placed_words: Vec<PlacedWord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_bounds() {
        let mut grid = LetterGrid::new(3, 4);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.col_count(), 4);
        assert!(grid.set(2, 3, 'X'));
        assert!(!grid.set(3, 0, 'X'));
        assert_eq!(grid.at(2, 3), Some('X'));
        assert_eq!(grid.at(0, 4), None);
        assert!(grid.is_empty_cell(0, 0));
        assert!(!grid.is_empty_cell(2, 3));
    }

    #[test]
    fn test_direction_deltas_cover_all_headings() {
        let deltas: Vec<_> = Direction::ALL.iter().map(|d| d.delta()).collect();
        assert_eq!(deltas.len(), 8);
        for (dr, dc) in deltas {
            assert!((dr, dc) != (0, 0));
            assert!(dr.abs() <= 1 && dc.abs() <= 1);
        }
    }

    #[test]
    fn test_placed_word_endpoints() {
        let placed = PlacedWord {
            word: "CAT".into(),
            start_row: 2,
            start_col: 2,
            direction: Direction::NorthEast,
            length: 3,
        };
        assert_eq!(placed.end_row(), 0);
        assert_eq!(placed.end_col(), 4);
        assert_eq!(placed.path(), vec![(2, 2), (1, 3), (0, 4)]);
    }
}
