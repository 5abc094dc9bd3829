use std::fmt;

use crate::error::BoardError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Empty,
    Red,
    Blue,
}

impl Color {
    pub fn is_empty(self) -> bool {
        self == Color::Empty
    }

    fn symbol(self) -> char {
        match self {
            Color::Empty => '.',
            Color::Red => 'R',
            Color::Blue => 'B',
        }
    }
}

/// Board of `columns × rows` cells, stored column by column.
/// Row 0 is the bottom row; coins stack upward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<Color>>,
    rows: usize,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(columns: usize, rows: usize) -> Self {
        Grid {
            cells: vec![vec![Color::Empty; rows]; columns],
            rows,
        }
    }

    /// Build a grid from explicit column contents (bottom cell first).
    ///
    /// Every column must have the same height and no piece may sit above an
    /// empty cell.
    pub fn from_columns(columns: Vec<Vec<Color>>) -> Result<Self, BoardError> {
        let rows = columns.first().map_or(0, Vec::len);
        for (column, cells) in columns.iter().enumerate() {
            if cells.len() != rows {
                return Err(BoardError::RaggedColumn {
                    column,
                    len: cells.len(),
                    rows,
                });
            }
            if let Some(row) = cells
                .windows(2)
                .position(|pair| pair[0].is_empty() && !pair[1].is_empty())
            {
                return Err(BoardError::FloatingPiece {
                    column,
                    row: row + 1,
                });
            }
        }
        Ok(Grid {
            cells: columns,
            rows,
        })
    }

    pub fn columns(&self) -> usize {
        self.cells.len()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the cell at a position, or `None` outside the grid
    pub fn get(&self, column: usize, row: usize) -> Option<Color> {
        self.cells.get(column)?.get(row).copied()
    }

    fn check_column(&self, column: usize) -> Result<&[Color], BoardError> {
        self.cells
            .get(column)
            .map(Vec::as_slice)
            .ok_or(BoardError::ColumnOutOfRange {
                column,
                columns: self.columns(),
            })
    }

    /// Lowest empty row in a column, `None` when the column is full
    pub fn landing_row(&self, column: usize) -> Result<Option<usize>, BoardError> {
        let cells = self.check_column(column)?;
        Ok(cells.iter().position(|c| c.is_empty()))
    }

    /// Check if a column is full. Columns outside the grid count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        !matches!(self.landing_row(column), Ok(Some(_)))
    }

    /// Drop a coin into a column.
    ///
    /// Returns `Ok(false)` without touching the grid when the column is full.
    pub fn place(&mut self, column: usize, color: Color) -> Result<bool, BoardError> {
        Ok(self.drop_piece(column, color)?.is_some())
    }

    /// Drop a coin into a column, returning the row where it landed
    pub fn drop_piece(&mut self, column: usize, color: Color) -> Result<Option<usize>, BoardError> {
        if color.is_empty() {
            return Err(BoardError::EmptyPiece);
        }
        let Some(row) = self.landing_row(column)? else {
            return Ok(None);
        };
        self.cells[column][row] = color;
        Ok(Some(row))
    }

    /// Check if every cell holds a coin
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|c| !c.is_empty())
    }

    /// Columns that still accept a coin
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.columns())
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Number of coins on the board
    pub fn coin_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| !c.is_empty()).count()
    }

    /// Remove every coin
    pub fn clear(&mut self) {
        self.cells
            .iter_mut()
            .for_each(|column| column.fill(Color::Empty));
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(COLS, ROWS)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            let line: String = self.cells.iter().map(|column| column[row].symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::default();
        assert_eq!(grid.columns(), 7);
        assert_eq!(grid.rows(), 6);
        for col in 0..COLS {
            for row in 0..ROWS {
                assert_eq!(grid.get(col, row), Some(Color::Empty));
            }
        }
        assert!(!grid.is_full());
    }

    #[test]
    fn test_place_stacks_from_bottom() {
        let mut grid = Grid::default();

        assert_eq!(grid.drop_piece(3, Color::Red), Ok(Some(0)));
        assert_eq!(grid.get(3, 0), Some(Color::Red));

        assert_eq!(grid.drop_piece(3, Color::Blue), Ok(Some(1)));
        assert_eq!(grid.get(3, 1), Some(Color::Blue));
        assert_eq!(grid.coin_count(), 2);
    }

    #[test]
    fn test_place_changes_exactly_one_cell() {
        let mut grid = Grid::default();
        grid.place(2, Color::Blue).unwrap();
        let before = grid.clone();

        assert_eq!(grid.place(2, Color::Red), Ok(true));

        let mut changed = Vec::new();
        for col in 0..grid.columns() {
            for row in 0..grid.rows() {
                if grid.get(col, row) != before.get(col, row) {
                    changed.push((col, row));
                }
            }
        }
        assert_eq!(changed, vec![(2, 1)]);
    }

    #[test]
    fn test_full_column_is_noop() {
        let mut grid = Grid::default();
        for _ in 0..ROWS {
            assert_eq!(grid.place(0, Color::Red), Ok(true));
        }
        let before = grid.clone();

        assert!(grid.is_column_full(0));
        assert_eq!(grid.place(0, Color::Blue), Ok(false));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_invalid_column() {
        let mut grid = Grid::default();
        assert_eq!(
            grid.place(7, Color::Red),
            Err(BoardError::ColumnOutOfRange {
                column: 7,
                columns: 7
            })
        );
        assert!(grid.is_column_full(7));
        assert_eq!(grid.get(7, 0), None);
    }

    #[test]
    fn test_empty_piece_rejected() {
        let mut grid = Grid::default();
        assert_eq!(grid.place(0, Color::Empty), Err(BoardError::EmptyPiece));
        assert_eq!(grid.coin_count(), 0);
    }

    #[test]
    fn test_full_grid() {
        let mut grid = Grid::default();
        for col in 0..COLS {
            for _ in 0..ROWS {
                grid.place(col, Color::Red).unwrap();
            }
        }
        assert!(grid.is_full());
        assert!(grid.legal_columns().is_empty());
        assert!((0..COLS).all(|col| grid.place(col, Color::Blue) == Ok(false)));
    }

    #[test]
    fn test_is_full_iff_no_column_accepts() {
        let mut grid = Grid::new(3, 2);
        for col in 0..3 {
            assert!(!grid.is_full());
            grid.place(col, Color::Red).unwrap();
            grid.place(col, Color::Blue).unwrap();
            assert_eq!(grid.is_full(), grid.legal_columns().is_empty());
        }
        assert!(grid.is_full());
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::default();
        grid.place(4, Color::Red).unwrap();
        grid.clear();
        assert_eq!(grid, Grid::default());
    }

    #[test]
    fn test_from_columns_rejects_floating_piece() {
        let result = Grid::from_columns(vec![
            vec![Color::Red, Color::Empty, Color::Blue],
            vec![Color::Empty; 3],
        ]);
        assert_eq!(
            result,
            Err(BoardError::FloatingPiece { column: 0, row: 2 })
        );
    }

    #[test]
    fn test_from_columns_rejects_ragged() {
        let result = Grid::from_columns(vec![vec![Color::Empty; 3], vec![Color::Empty; 2]]);
        assert_eq!(
            result,
            Err(BoardError::RaggedColumn {
                column: 1,
                len: 2,
                rows: 3
            })
        );
    }

    #[test]
    fn test_display_top_row_first() {
        let mut grid = Grid::new(3, 2);
        grid.place(0, Color::Red).unwrap();
        grid.place(0, Color::Blue).unwrap();
        grid.place(2, Color::Blue).unwrap();
        assert_eq!(grid.to_string(), "B..\nR.B\n");
    }
}
