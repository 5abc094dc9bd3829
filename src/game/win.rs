//! Four-in-a-row detection.
//!
//! Every line of the grid (row, column, rising and falling diagonal) is
//! enumerated as a sequence of `(column, row)` coordinates and fed through a
//! single run-length counter. Families are checked in a fixed order: rising
//! diagonals, falling diagonals, rows, then columns. The first run of
//! [`WIN_LENGTH`] found decides the result.

use super::board::{Color, Grid};

/// Length of a winning run.
pub const WIN_LENGTH: usize = 4;

type Line = Vec<(usize, usize)>;

/// Color of the first run of [`WIN_LENGTH`] equal non-empty colors, or
/// [`Color::Empty`] if the sequence has none.
pub fn first_run_of_four<I>(colors: I) -> Color
where
    I: IntoIterator<Item = Color>,
{
    let mut last = Color::Empty;
    let mut run = 0;
    for color in colors {
        if color.is_empty() {
            run = 0;
        } else if color == last {
            run += 1;
        } else {
            run = 1;
        }
        last = color;
        if run >= WIN_LENGTH {
            return color;
        }
    }
    Color::Empty
}

/// Winning color of the grid, or [`Color::Empty`] if nobody has four in a row.
pub fn evaluate(grid: &Grid) -> Color {
    all_lines(grid)
        .map(|line| {
            first_run_of_four(
                line.iter()
                    .map(|&(col, row)| grid.get(col, row).unwrap_or_default()),
            )
        })
        .find(|color| !color.is_empty())
        .unwrap_or(Color::Empty)
}

/// Winning color together with the coordinates of the run that decided it.
pub fn winning_line(grid: &Grid) -> Option<(Color, Line)> {
    all_lines(grid).find_map(|line| run_in_line(grid, &line))
}

fn run_in_line(grid: &Grid, line: &[(usize, usize)]) -> Option<(Color, Line)> {
    let mut start = 0;
    for end in 0..line.len() {
        let (col, row) = line[end];
        let color = grid.get(col, row).unwrap_or_default();
        if color.is_empty() {
            start = end + 1;
            continue;
        }
        let (prev_col, prev_row) = line[start];
        if grid.get(prev_col, prev_row) != Some(color) {
            start = end;
        }
        if end + 1 - start >= WIN_LENGTH {
            return Some((color, line[end + 1 - WIN_LENGTH..=end].to_vec()));
        }
    }
    None
}

fn all_lines(grid: &Grid) -> impl Iterator<Item = Line> + '_ {
    rising_diagonals(grid)
        .chain(falling_diagonals(grid))
        .chain(rows(grid))
        .chain(columns(grid))
}

/// One line per row, left to right, bottom row first.
pub fn rows(grid: &Grid) -> impl Iterator<Item = Line> + '_ {
    (0..grid.rows()).map(move |row| (0..grid.columns()).map(|col| (col, row)).collect())
}

/// One line per column, bottom to top.
pub fn columns(grid: &Grid) -> impl Iterator<Item = Line> + '_ {
    (0..grid.columns()).map(move |col| (0..grid.rows()).map(|row| (col, row)).collect())
}

/// Diagonals going up to the right, anchored on the left column and the
/// bottom row.
pub fn rising_diagonals(grid: &Grid) -> impl Iterator<Item = Line> + '_ {
    let from_side = (0..grid.rows()).rev().map(|row| (0, row));
    let from_bottom = (1..grid.columns()).map(|col| (col, 0));
    from_side
        .chain(from_bottom)
        .map(move |anchor| walk(grid, anchor, 1))
        .filter(|line| line.len() >= WIN_LENGTH)
}

/// Diagonals going down to the right, anchored on the left column and the
/// top row.
pub fn falling_diagonals(grid: &Grid) -> impl Iterator<Item = Line> + '_ {
    let top = grid.rows().saturating_sub(1);
    let from_side = (0..grid.rows()).map(|row| (0, row));
    let from_top = (1..grid.columns()).map(move |col| (col, top));
    from_side
        .chain(from_top)
        .map(move |anchor| walk(grid, anchor, -1))
        .filter(|line| line.len() >= WIN_LENGTH)
}

fn walk(grid: &Grid, (mut col, mut row): (usize, usize), step: isize) -> Line {
    let mut line = Vec::new();
    while col < grid.columns() && row < grid.rows() {
        line.push((col, row));
        col += 1;
        match row.checked_add_signed(step) {
            Some(next) => row = next,
            None => break,
        }
    }
    line
}
