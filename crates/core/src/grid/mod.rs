//! Grid of cells, neighbour topology and coordinate helpers

pub mod coords;
pub mod fire_grid;
pub mod stats;
pub mod topology;

pub use coords::{cell_center, pixel_to_cell};
pub use fire_grid::FireGrid;
pub use stats::GridStats;
pub use topology::{build_topology, Neighbourhood, ORTHOGONAL_OFFSETS};
