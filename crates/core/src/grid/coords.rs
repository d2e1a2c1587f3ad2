//! Screen ↔ grid coordinate mapping
//!
//! Screen space has its origin at the centre of the grid with y pointing up,
//! so the top-left cell sits at negative x and positive y. These helpers are
//! pure; drivers use them to turn pointer events into cell operations.

/// Map a screen point to `(row, col)`, or `None` when it falls outside the grid.
pub fn pixel_to_cell(x: f32, y: f32, grid_size: usize, cell_size: f32) -> Option<(usize, usize)> {
    if grid_size == 0 || !cell_size.is_finite() || cell_size <= 0.0 {
        return None;
    }
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    let half_extent = grid_size as f32 * cell_size / 2.0;
    let col = ((x + half_extent) / cell_size).floor();
    let row = ((half_extent - y) / cell_size).floor();
    if col < 0.0 || row < 0.0 {
        return None;
    }

    let (row, col) = (row as usize, col as usize);
    (row < grid_size && col < grid_size).then_some((row, col))
}

/// Screen position of the centre of cell `(row, col)`.
pub fn cell_center(row: usize, col: usize, grid_size: usize, cell_size: f32) -> (f32, f32) {
    let half_extent = grid_size as f32 * cell_size / 2.0;
    let x = -half_extent + cell_size / 2.0 + col as f32 * cell_size;
    let y = half_extent - cell_size / 2.0 - row as f32 * cell_size;
    (x, y)
}
