use rand::Rng;

use crate::{models::LetterGrid, utils::letters::random_letter};

pub struct GridAllocator;

impl GridAllocator {
    /// Allocate an empty row_count x col_count grid.
    pub fn allocate(row_count: usize, col_count: usize) -> LetterGrid {
        LetterGrid::new(row_count, col_count)
    }

    /// Write a uniformly random letter into every still-empty cell, so a
    /// finished puzzle has no holes to give placements away.
    pub fn fill_empty(grid: &mut LetterGrid, rng: &mut impl Rng) {
        let coords: Vec<_> = grid.coordinates().collect();
        for (row, col) in coords {
            if grid.is_empty_cell(row, col) {
                let letter = random_letter(rng);
                grid.set(row, col, letter);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EMPTY_CELL;

    #[test]
    fn test_allocate_dimensions() {
        let grid = GridAllocator::allocate(6, 8);
        assert_eq!(grid.row_count(), 6);
        assert_eq!(grid.col_count(), 8);
        assert!(grid.coordinates().all(|(r, c)| grid.is_empty_cell(r, c)));
    }

    #[test]
    fn test_fill_empty_leaves_no_holes() {
        let mut grid = GridAllocator::allocate(5, 5);
        grid.set(2, 2, 'Q');
        let mut rng = rand::rng();
        GridAllocator::fill_empty(&mut grid, &mut rng);

        assert_eq!(grid.at(2, 2), Some('Q'));
        for (row, col) in grid.coordinates() {
            let letter = grid.at(row, col).unwrap();
            assert_ne!(letter, EMPTY_CELL);
        }
    }
}
